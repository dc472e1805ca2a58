use std::cell::{Cell, RefCell};

/// Memoized pure computation keyed by its inputs.
///
/// `get` compares `deps` against the inputs that produced the cached value and
/// only calls `compute` when they differ. `compute` must be pure: no side
/// effects and no signal writes.
pub struct Memo<D, T> {
    cached: RefCell<Option<(D, T)>>,
    computations: Cell<u64>,
}

impl<D: PartialEq, T: Clone> Memo<D, T> {
    pub fn new() -> Self {
        Self {
            cached: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    pub fn get(&self, deps: D, compute: impl FnOnce() -> T) -> T {
        if let Some((last, value)) = self.cached.borrow().as_ref()
            && *last == deps
        {
            return value.clone();
        }
        let value = compute();
        self.computations.set(self.computations.get() + 1);
        *self.cached.borrow_mut() = Some((deps, value.clone()));
        value
    }

    /// How many times `compute` has actually run.
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }

    pub fn invalidate(&self) {
        *self.cached.borrow_mut() = None;
    }
}

impl<D: PartialEq, T: Clone> Default for Memo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}
