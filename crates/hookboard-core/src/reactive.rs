//! Dependency graph, batching, and re-evaluation passes.
//!
//! Reads made while an observer runs are recorded as edges
//! `signal -> observer`. Writes never run observers directly: they queue on
//! the signal and the signal registers itself as dirty for the current batch.
//! When the outermost batch ends, dirty signals commit and every observer that
//! read one of them is re-run in creation order. Writes made by those
//! observers are queued again and committed before the next pass starts, so a
//! pass always sees one consistent snapshot.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

pub type SignalId = usize;
pub type ObserverId = usize;

thread_local! {
    static CURRENT_OBSERVER: RefCell<Option<ObserverId>> = const { RefCell::new(None) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
    static BATCH: RefCell<BatchState> = RefCell::new(BatchState::default());
    static NEXT_SIGNAL: Cell<SignalId> = const { Cell::new(0) };
}

/// A signal holding queued writes for the current batch.
pub(crate) trait PendingCommit {
    /// Applies the queued writes and returns the committed signal's id.
    fn commit(&self) -> SignalId;
}

#[derive(Default)]
struct DepGraph {
    next_observer: ObserverId,
    // signal_id -> observers that depend on it
    edges: HashMap<SignalId, HashSet<ObserverId>>,
    // observer_id -> signals it depends on
    back: HashMap<ObserverId, HashSet<SignalId>>,
    // recompute closures
    observers: HashMap<ObserverId, Rc<dyn Fn()>>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        if let Some(signals) = self.back.remove(&obs) {
            for s in signals {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                }
            }
        }
    }

    fn remove_observer(&mut self, obs: ObserverId) {
        self.observers.remove(&obs);
        self.remove_all_edges_for(obs);
    }
}

#[derive(Default)]
struct BatchState {
    depth: usize,
    flushing: bool,
    dirty: Vec<Rc<dyn PendingCommit>>,
    // BTreeSet keeps observers in creation (mount) order.
    pending: BTreeSet<ObserverId>,
    passes: u64,
}

pub(crate) fn next_signal_id() -> SignalId {
    NEXT_SIGNAL.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

pub fn register_signal_read(sig: SignalId) {
    CURRENT_OBSERVER.with(|co| {
        if let Some(obs) = *co.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                g.edges.entry(sig).or_default().insert(obs);
                g.back.entry(obs).or_default().insert(sig);
            });
        }
    });
}

/// Runs `f` without recording any signal reads against the current observer.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let prev = CURRENT_OBSERVER.with(|co| co.borrow_mut().take());
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| *co.borrow_mut() = self.0);
        }
    }
    let _restore = Restore(prev);
    f()
}

/// Groups every write made inside `f` into one logical interaction.
///
/// Reads inside the batch keep returning the values from before it started;
/// the writes commit together when the outermost batch returns, followed by a
/// single re-evaluation pass.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            BATCH.with(|b| b.borrow_mut().depth -= 1);
        }
    }
    BATCH.with(|b| b.borrow_mut().depth += 1);
    let result = {
        let _guard = Guard;
        f()
    };
    request_flush();
    result
}

pub fn is_batching() -> bool {
    BATCH.with(|b| b.borrow().depth > 0)
}

/// Number of re-evaluation passes run on this thread so far.
pub fn pass_count() -> u64 {
    BATCH.with(|b| b.borrow().passes)
}

pub(crate) fn enqueue_commit(commit: Rc<dyn PendingCommit>) {
    BATCH.with(|b| b.borrow_mut().dirty.push(commit));
}

pub(crate) fn request_flush() {
    let ready = BATCH.with(|b| {
        let b = b.borrow();
        b.depth == 0 && !b.flushing
    });
    if ready {
        flush();
    }
}

fn flush() {
    struct Flushing;
    impl Drop for Flushing {
        fn drop(&mut self) {
            BATCH.with(|b| b.borrow_mut().flushing = false);
        }
    }
    BATCH.with(|b| b.borrow_mut().flushing = true);
    let _flushing = Flushing;

    loop {
        let dirty = BATCH.with(|b| std::mem::take(&mut b.borrow_mut().dirty));
        for commit in dirty {
            let sig = commit.commit();
            let observers = GRAPH.with(|g| g.borrow().edges.get(&sig).cloned().unwrap_or_default());
            BATCH.with(|b| b.borrow_mut().pending.extend(observers));
        }

        let pass = BATCH.with(|b| std::mem::take(&mut b.borrow_mut().pending));
        if pass.is_empty() {
            break;
        }

        BATCH.with(|b| {
            let mut b = b.borrow_mut();
            b.depth += 1;
            b.passes += 1;
        });
        struct PassGuard;
        impl Drop for PassGuard {
            fn drop(&mut self) {
                BATCH.with(|b| b.borrow_mut().depth -= 1);
            }
        }
        let _pass = PassGuard;
        log::trace!("re-evaluation pass over {} observer(s)", pass.len());
        for obs in pass {
            run_observer(obs);
        }
    }
}

fn run_observer(id: ObserverId) {
    let f = GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        // clear previous deps before recompute
        g.remove_all_edges_for(id);
        g.observers.get(&id).cloned()
    });
    let Some(f) = f else {
        return;
    };
    let prev = CURRENT_OBSERVER.with(|co| co.borrow_mut().replace(id));
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| *co.borrow_mut() = self.0);
        }
    }
    let _restore = Restore(prev);
    f();
}

pub fn new_observer(f: impl Fn() + 'static) -> ObserverId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_observer;
        g.next_observer += 1;
        g.observers.insert(id, Rc::new(f));
        id
    })
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    GRAPH.with(|g| g.borrow_mut().remove_observer(id));
    BATCH.with(|b| {
        b.borrow_mut().pending.remove(&id);
    });
}

/// Runs an observer immediately under tracking, as its own batch.
pub fn run_observer_now(id: ObserverId) {
    batch(|| run_observer(id));
}
