use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::clock::{Clock, SystemClock, VirtualClock};
use crate::random::{self, RandomSource, SystemRandom};
use crate::reactive::{self, ObserverId};
use crate::storage::{MemoryStorage, Storage, ValueStore};
use crate::{Scope, Timers};

/// A widget instance the runtime can re-evaluate.
///
/// `evaluate` runs once at mount and again in every pass after a signal it
/// read changed. It is where effects are declared, in order.
pub trait Component: 'static {
    fn scope(&self) -> &Scope;
    fn evaluate(&self);
}

/// The injectable environment shared by every widget: timers, wall clock,
/// randomness, and the value store.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

struct RuntimeInner {
    timers: Timers,
    clock: Rc<dyn Clock>,
    rng: RefCell<Box<dyn RandomSource>>,
    store: ValueStore,
}

pub struct RuntimeBuilder {
    timers: Timers,
    clock: Option<Rc<dyn Clock>>,
    rng: Option<Box<dyn RandomSource>>,
    storage: Option<Rc<dyn Storage>>,
}

impl RuntimeBuilder {
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }

    /// Wall clock that starts at `start` and moves with the virtual timers.
    pub fn virtual_clock(mut self, start: DateTime<Local>) -> Self {
        self.clock = Some(Rc::new(VirtualClock {
            start,
            timers: self.timers.clone(),
        }));
        self
    }

    pub fn random(mut self, rng: impl RandomSource) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn storage(mut self, storage: Rc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Runtime {
        let storage = self
            .storage
            .unwrap_or_else(|| Rc::new(MemoryStorage::new()));
        Runtime {
            inner: Rc::new(RuntimeInner {
                timers: self.timers,
                clock: self.clock.unwrap_or_else(|| Rc::new(SystemClock)),
                rng: RefCell::new(self.rng.unwrap_or_else(|| Box::new(SystemRandom::new()))),
                store: ValueStore::new(storage),
            }),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder {
            timers: Timers::new(),
            clock: None,
            rng: None,
            storage: None,
        }
    }

    pub fn timers(&self) -> &Timers {
        &self.inner.timers
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        self.inner.clock.clone()
    }

    pub fn now(&self) -> DateTime<Local> {
        self.inner.clock.now()
    }

    pub fn store(&self) -> &ValueStore {
        &self.inner.store
    }

    pub fn random_integer(&self, min: f64, max: f64) -> i64 {
        random::random_integer(self.inner.rng.borrow_mut().as_mut(), min, max)
    }

    pub fn random_number(&self, min: f64, max: f64, digits: u32) -> f64 {
        random::random_number(self.inner.rng.borrow_mut().as_mut(), min, max, digits)
    }

    /// Moves virtual time forward, firing due timers.
    pub fn advance(&self, by: Duration) -> usize {
        self.inner.timers.advance(by)
    }

    /// Evaluates `component` once and keeps re-evaluating it after changes to
    /// anything it read, until unmounted.
    pub fn mount<C: Component>(&self, component: Rc<C>) -> Mounted<C> {
        let weak = Rc::downgrade(&component);
        let observer = reactive::new_observer(move || {
            if let Some(c) = weak.upgrade() {
                c.evaluate();
            }
        });
        reactive::run_observer_now(observer);
        Mounted {
            component,
            observer: Cell::new(Some(observer)),
        }
    }
}

/// A mounted widget. Unmounting (or dropping the handle) stops
/// re-evaluation and disposes the widget's scope.
pub struct Mounted<C: Component> {
    component: Rc<C>,
    observer: Cell<Option<ObserverId>>,
}

impl<C: Component> Mounted<C> {
    pub fn unmount(&self) {
        if let Some(id) = self.observer.take() {
            reactive::remove_observer(id);
            self.component.scope().dispose();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.get().is_some()
    }

    pub fn component(&self) -> &Rc<C> {
        &self.component
    }
}

impl<C: Component> Deref for Mounted<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.component
    }
}

impl<C: Component> Drop for Mounted<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
