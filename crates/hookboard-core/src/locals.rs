//! # Context frames
//!
//! Shared state (the theme, for instance) is handed to consumers through
//! scoped context frames rather than globals. A provider pushes a frame,
//! builds its subtree inside the closure, and the frame is popped again
//! afterwards, even on unwind:
//!
//! ```rust
//! use hookboard_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Locale(&'static str);
//!
//! let seen = provide_context(Locale("en"), || use_context::<Locale>());
//! assert_eq!(seen, Some(Locale("en")));
//! assert!(try_use_context::<Locale>().is_err());
//! ```
//!
//! Consumers should grab the context while they are being created and keep
//! the handle; frames do not outlive the provider's closure.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ContextError;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

/// Makes `value` visible to `use_context::<C>()` for the duration of `f`.
pub fn provide_context<C: Clone + 'static, R>(value: C, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<C>(), Box::new(value));
        f()
    })
}

/// Innermost provided value of type `C`, if any.
pub fn use_context<C: Clone + 'static>() -> Option<C> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<C>())
                && let Some(c) = v.downcast_ref::<C>()
            {
                return Some(c.clone());
            }
        }
        None
    })
}

pub fn try_use_context<C: Clone + 'static>() -> Result<C, ContextError> {
    use_context::<C>().ok_or_else(|| ContextError::Missing {
        name: std::any::type_name::<C>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Depth(u32);

    #[test]
    fn inner_frame_shadows_outer() {
        provide_context(Depth(1), || {
            assert_eq!(use_context::<Depth>(), Some(Depth(1)));
            provide_context(Depth(2), || {
                assert_eq!(use_context::<Depth>(), Some(Depth(2)));
            });
            assert_eq!(use_context::<Depth>(), Some(Depth(1)));
        });
        assert_eq!(use_context::<Depth>(), None);
    }

    #[test]
    fn missing_context_names_the_type() {
        let err = try_use_context::<Depth>().unwrap_err();
        assert!(err.to_string().contains("Depth"));
    }

    #[test]
    fn frame_pops_on_unwind() {
        let result = std::panic::catch_unwind(|| {
            let _: u8 = provide_context(Depth(7), || panic!("boom"));
        });
        assert!(result.is_err());
        assert_eq!(use_context::<Depth>(), None);
    }
}
