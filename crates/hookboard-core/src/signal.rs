use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::reactive::{self, PendingCommit, SignalId};

type Update<T> = Box<dyn FnOnce(&T) -> T>;
type Subscriber<T> = Rc<dyn Fn(&T)>;

/// An owned, observable value: the reactive cell.
///
/// Writes are total: `set` replaces the value, `update` derives the next value
/// from the previous one. Both are queued until the current batch ends, so a
/// `get` inside a batch keeps returning the committed value.
pub struct Signal<T: 'static>(Rc<Inner<T>>);

struct Inner<T> {
    id: SignalId,
    state: RefCell<State<T>>,
}

struct State<T> {
    value: T,
    version: u64,
    pending: Vec<Update<T>>,
    scheduled: bool,
    subs: SmallVec<[Subscriber<T>; 2]>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.0.state.borrow();
        f.debug_struct("Signal")
            .field("id", &self.0.id)
            .field("value", &st.value)
            .field("version", &st.version)
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            id: reactive::next_signal_id(),
            state: RefCell::new(State {
                value,
                version: 0,
                pending: Vec::new(),
                scheduled: false,
                subs: SmallVec::new(),
            }),
        }))
    }

    pub fn id(&self) -> SignalId {
        self.0.id
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::register_signal_read(self.0.id);
        self.0.state.borrow().value.clone()
    }

    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.0.state.borrow().value.clone()
    }

    /// Borrows the committed value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        reactive::register_signal_read(self.0.id);
        f(&self.0.state.borrow().value)
    }

    /// Number of committed write batches. Every commit bumps it, even when
    /// the new value equals the old one.
    pub fn version(&self) -> u64 {
        reactive::register_signal_read(self.0.id);
        self.0.state.borrow().version
    }

    pub fn set(&self, v: T) {
        self.queue(Box::new(move |_| v));
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.queue(Box::new(f));
    }

    /// Registers a listener called with the new value after every commit.
    /// Listeners must not write to this signal.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) {
        self.0.state.borrow_mut().subs.push(Rc::new(f));
    }

    fn queue(&self, f: Update<T>) {
        let schedule = {
            let mut st = self.0.state.borrow_mut();
            st.pending.push(f);
            !std::mem::replace(&mut st.scheduled, true)
        };
        if schedule {
            reactive::enqueue_commit(Rc::new(self.clone()));
        }
        reactive::request_flush();
    }
}

impl<T> PendingCommit for Signal<T> {
    fn commit(&self) -> SignalId {
        let updates = {
            let mut st = self.0.state.borrow_mut();
            st.scheduled = false;
            std::mem::take(&mut st.pending)
        };
        if updates.is_empty() {
            return self.0.id;
        }
        for f in updates {
            let next = {
                let st = self.0.state.borrow();
                f(&st.value)
            };
            self.0.state.borrow_mut().value = next;
        }
        let subs = {
            let mut st = self.0.state.borrow_mut();
            st.version += 1;
            st.subs.clone()
        };
        let st = self.0.state.borrow();
        for s in &subs {
            s(&st.value);
        }
        self.0.id
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
