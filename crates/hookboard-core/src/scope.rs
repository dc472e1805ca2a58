use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Owner of teardown work for one widget instance.
///
/// Disposers run once, in registration order, on `dispose()` or when the last
/// handle is dropped.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    disposed: Cell<bool>,
}

impl ScopeInner {
    fn run_disposers(&self) {
        self.disposed.set(true);
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        }
    }

    /// Registers teardown work. On an already disposed scope it runs at once.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        if self.inner.disposed.get() {
            log::warn!("add_disposer on a disposed scope; running it now");
            disposer();
            return;
        }
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn dispose(&self) {
        if !self.inner.disposed.get() {
            self.inner.run_disposers();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        if !self.disposed.get() {
            self.run_disposers();
        }
    }
}
