use std::cell::RefCell;
use std::rc::Rc;

use crate::{Scope, reactive};

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn has_run(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Helper to build the cleanup returned from an effect routine.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Option<Dispose> {
    Some(Dispose::new(f))
}

/// One declared side effect, gated on a dependency snapshot.
///
/// `run` compares `deps` with the snapshot of the active invocation. When they
/// differ (or nothing ran yet) the previous cleanup runs first, then the
/// routine, and its cleanup becomes the active one. A unit snapshot `()`
/// therefore runs exactly once. The owning scope's teardown runs the active
/// cleanup exactly once and disables the effect.
pub struct Effect<D> {
    slot: Rc<RefCell<Slot<D>>>,
}

struct Slot<D> {
    deps: Option<D>,
    cleanup: Option<Dispose>,
    runs: u64,
    torn_down: bool,
}

impl<D: PartialEq + 'static> Effect<D> {
    pub fn new(scope: &Scope) -> Self {
        let slot = Rc::new(RefCell::new(Slot {
            deps: None,
            cleanup: None,
            runs: 0,
            torn_down: false,
        }));
        scope.add_disposer({
            let slot = slot.clone();
            move || {
                let cleanup = {
                    let mut s = slot.borrow_mut();
                    s.torn_down = true;
                    s.cleanup.take()
                };
                if let Some(d) = cleanup {
                    d.run();
                }
            }
        });
        Self { slot }
    }

    /// Returns whether the routine ran.
    pub fn run(&self, deps: D, routine: impl FnOnce() -> Option<Dispose>) -> bool {
        {
            let s = self.slot.borrow();
            if s.torn_down || s.deps.as_ref() == Some(&deps) {
                return false;
            }
        }

        let previous = self.slot.borrow_mut().cleanup.take();
        if let Some(d) = previous {
            d.run();
        }

        let cleanup = reactive::untrack(routine);

        let mut s = self.slot.borrow_mut();
        s.deps = Some(deps);
        s.cleanup = cleanup;
        s.runs += 1;
        true
    }

    pub fn runs(&self) -> u64 {
        self.slot.borrow().runs
    }

    /// Whether a cleanup is waiting for the next change or teardown.
    pub fn has_cleanup(&self) -> bool {
        self.slot.borrow().cleanup.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispose_runs_once() {
        let n = Rc::new(Cell::new(0));
        let d = Dispose::new({
            let n = n.clone();
            move || n.set(n.get() + 1)
        });
        d.run();
        d.run();
        assert_eq!(n.get(), 1);
        assert!(d.has_run());
    }

    #[test]
    fn cleanup_precedes_next_invocation() {
        let scope = Scope::new();
        let effect = Effect::new(&scope);
        let log = Rc::new(RefCell::new(Vec::new()));

        for key in [1, 1, 2, 2, 3] {
            let log = log.clone();
            effect.run(key, move || {
                log.borrow_mut().push(format!("run {key}"));
                on_unmount(move || log.borrow_mut().push(format!("clean {key}")))
            });
        }
        assert_eq!(
            *log.borrow(),
            vec!["run 1", "clean 1", "run 2", "clean 2", "run 3"]
        );
        assert_eq!(effect.runs(), 3);

        scope.dispose();
        assert_eq!(log.borrow().last().map(String::as_str), Some("clean 3"));
        assert_eq!(log.borrow().len(), 6);
    }

    #[test]
    fn unit_snapshot_runs_once() {
        let scope = Scope::new();
        let effect = Effect::new(&scope);
        let n = Cell::new(0);
        for _ in 0..4 {
            effect.run((), || {
                n.set(n.get() + 1);
                None
            });
        }
        assert_eq!(n.get(), 1);
    }

    #[test]
    fn teardown_cleanup_runs_exactly_once_and_disables() {
        let scope = Scope::new();
        let effect = Effect::new(&scope);
        let cleaned = Rc::new(Cell::new(0));
        effect.run(1, {
            let cleaned = cleaned.clone();
            move || on_unmount(move || cleaned.set(cleaned.get() + 1))
        });
        assert!(effect.has_cleanup());

        scope.dispose();
        scope.dispose();
        assert_eq!(cleaned.get(), 1);
        assert!(!effect.run(2, || None));
    }
}
