//! Virtual timers.
//!
//! Nothing here sleeps. Time only moves when `advance` is called; due timers
//! fire in deadline order (ties in scheduling order), each callback inside
//! its own batch. The demo binary feeds real elapsed time in, tests feed
//! exact durations.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::reactive;

new_key_type! {
    pub struct TimerId;
}

enum Callback {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<dyn Fn()>),
}

struct Entry {
    due: Duration,
    seq: u64,
    period: Option<Duration>,
    callback: Option<Callback>,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    entries: SlotMap<TimerId, Entry>,
    created: u64,
}

impl Queue {
    fn insert(&mut self, delay: Duration, period: Option<Duration>, callback: Callback) -> TimerId {
        self.seq += 1;
        self.created += 1;
        let due = self.now + delay;
        self.entries.insert(Entry {
            due,
            seq: self.seq,
            period,
            callback: Some(callback),
        })
    }

    fn next_due(&self, limit: Duration) -> Option<TimerId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.due <= limit)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(id, _)| id)
    }
}

/// Shared handle to the timer queue.
#[derive(Clone, Default)]
pub struct Timers {
    inner: Rc<RefCell<Queue>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `f` once after `delay`.
    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
        self.inner
            .borrow_mut()
            .insert(delay, None, Callback::Once(Box::new(f)))
    }

    /// Fires `f` every `period` until cleared. A zero period is bumped to 1ms.
    pub fn set_interval(&self, period: Duration, f: impl Fn() + 'static) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.inner
            .borrow_mut()
            .insert(period, Some(period), Callback::Repeat(Rc::new(f)))
    }

    /// Cancels a timer. Returns false if it already fired or was cleared.
    pub fn clear(&self, id: TimerId) -> bool {
        self.inner.borrow_mut().entries.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().entries.contains_key(id)
    }

    /// Timers currently scheduled.
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Timers ever scheduled on this queue.
    pub fn created(&self) -> u64 {
        self.inner.borrow().created
    }

    /// Virtual time since the queue was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Time until the next timer is due, if any.
    pub fn until_next(&self) -> Option<Duration> {
        let q = self.inner.borrow();
        q.entries
            .values()
            .map(|e| e.due.saturating_sub(q.now))
            .min()
    }

    /// Moves virtual time forward by `by`, firing everything that falls due.
    /// Returns how many callbacks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.borrow().now + by;
        let mut fired = 0;
        loop {
            let callback = {
                let mut q = self.inner.borrow_mut();
                let Some(id) = q.next_due(target) else {
                    break;
                };
                let due = q.entries[id].due;
                q.now = due;
                match q.entries[id].period {
                    Some(period) => {
                        q.seq += 1;
                        let seq = q.seq;
                        let entry = &mut q.entries[id];
                        entry.due = due + period;
                        entry.seq = seq;
                        match &entry.callback {
                            Some(Callback::Repeat(f)) => Some(Callback::Repeat(f.clone())),
                            _ => None,
                        }
                    }
                    None => q.entries.remove(id).and_then(|mut e| e.callback.take()),
                }
            };
            match callback {
                Some(Callback::Once(f)) => reactive::batch(f),
                Some(Callback::Repeat(f)) => reactive::batch(|| f()),
                None => {}
            }
            fired += 1;
        }
        self.inner.borrow_mut().now = target;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timeout_fires_once_when_due() {
        let timers = Timers::new();
        let hits = Rc::new(Cell::new(0));
        timers.set_timeout(ms(1000), {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        assert_eq!(timers.advance(ms(999)), 0);
        assert_eq!(timers.advance(ms(1)), 1);
        assert_eq!(timers.advance(ms(5000)), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn interval_repeats_until_cleared() {
        let timers = Timers::new();
        let hits = Rc::new(Cell::new(0));
        let id = timers.set_interval(ms(1000), {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        timers.advance(ms(3500));
        assert_eq!(hits.get(), 3);
        assert!(timers.clear(id));
        assert!(!timers.clear(id));
        timers.advance(ms(3000));
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn fires_in_deadline_order() {
        let timers = Timers::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let order = order.clone();
            timers.set_timeout(ms(delay), move || order.borrow_mut().push(tag));
        }
        timers.advance(ms(1000));
        assert_eq!(*order.borrow(), vec!["a", "a2", "b", "c"]);
        assert_eq!(timers.elapsed(), ms(1000));
    }

    #[test]
    fn callbacks_may_schedule_more_timers() {
        let timers = Timers::new();
        let hits = Rc::new(Cell::new(0));
        timers.set_timeout(ms(10), {
            let timers = timers.clone();
            let hits = hits.clone();
            move || {
                hits.set(hits.get() + 1);
                let hits = hits.clone();
                timers.set_timeout(ms(10), move || hits.set(hits.get() + 1));
            }
        });
        timers.advance(ms(25));
        assert_eq!(hits.get(), 2);
        assert_eq!(timers.created(), 2);
    }

    #[test]
    fn until_next_reports_nearest_deadline() {
        let timers = Timers::new();
        assert_eq!(timers.until_next(), None);
        timers.set_timeout(ms(500), || {});
        timers.set_interval(ms(200), || {});
        timers.advance(ms(50));
        assert_eq!(timers.until_next(), Some(ms(150)));
    }
}
