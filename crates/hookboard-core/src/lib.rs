//! # Signals, Memos, and Effects
//!
//! Hookboard widgets are built from three small pieces instead of ad hoc
//! state handling:
//!
//! - `Signal<T>`: an owned, observable value.
//! - `Memo<D, T>`: a cached pure computation keyed by its inputs.
//! - `Effect<D>`: a side effect gated on a dependency snapshot, with cleanup.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use hookboard_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| v + 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Writes made inside `batch` are coalesced. Reads inside the batch still see
//! the value from before it, so two `set(count.get() + 1)` calls in one batch
//! add one, while two `update(|v| v + 1)` calls add two:
//!
//! ```rust
//! use hookboard_core::*;
//!
//! let count = signal(0);
//! batch(|| {
//!     count.set(count.get() + 1);
//!     count.set(count.get() + 1);
//! });
//! assert_eq!(count.get(), 1);
//!
//! batch(|| {
//!     count.update(|v| v + 1);
//!     count.update(|v| v + 1);
//! });
//! assert_eq!(count.get(), 3);
//! ```
//!
//! ## Derived values
//!
//! `Memo` only recomputes when the inputs handed to `get` change:
//!
//! ```rust
//! use hookboard_core::*;
//!
//! let notes = signal(vec!["a".to_string(), "bb".to_string()]);
//! let total_len: Memo<u64, usize> = Memo::new();
//!
//! let len = total_len.get(notes.version(), || notes.with(|n| n.iter().map(String::len).sum()));
//! assert_eq!(len, 3);
//! total_len.get(notes.version(), || unreachable!());
//! assert_eq!(total_len.computations(), 1);
//! ```
//!
//! ## Effects and cleanup
//!
//! A widget implements `Component`; the `Runtime` mounts it, re-runs
//! `evaluate` whenever a signal it read changes, and disposes its `Scope` on
//! unmount. Effects are declared inside `evaluate`:
//!
//! ```rust
//! use hookboard_core::*;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! struct Ticker {
//!     scope: Scope,
//!     timers: Timers,
//!     ticks: Signal<u32>,
//!     interval: Effect<()>,
//! }
//!
//! impl Component for Ticker {
//!     fn scope(&self) -> &Scope {
//!         &self.scope
//!     }
//!     fn evaluate(&self) {
//!         self.interval.run((), || {
//!             let ticks = self.ticks.clone();
//!             let id = self.timers.set_interval(Duration::from_secs(1), move || {
//!                 ticks.update(|t| t + 1)
//!             });
//!             let timers = self.timers.clone();
//!             on_unmount(move || {
//!                 timers.clear(id);
//!             })
//!         });
//!     }
//! }
//!
//! let rt = Runtime::default();
//! let scope = Scope::new();
//! let ticker = rt.mount(Rc::new(Ticker {
//!     interval: Effect::new(&scope),
//!     scope,
//!     timers: rt.timers().clone(),
//!     ticks: signal(0),
//! }));
//!
//! rt.advance(Duration::from_secs(3));
//! assert_eq!(ticker.ticks.get(), 3);
//!
//! ticker.unmount();
//! rt.advance(Duration::from_secs(3));
//! assert_eq!(ticker.ticks.get(), 3);
//! ```
//!
//! Shared state such as the theme is passed through `provide_context` /
//! `use_context` frames rather than globals, and preferences survive restarts
//! through `use_local_storage`.

pub mod clock;
pub mod effects;
pub mod error;
pub mod locals;
pub mod prelude;
pub mod random;
pub mod reactive;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod state;
pub mod storage;
pub mod tests;
pub mod timer;
pub mod view;

pub use clock::*;
pub use effects::*;
pub use error::*;
pub use locals::*;
pub use random::*;
pub use reactive::{batch, pass_count, untrack};
pub use runtime::*;
pub use scope::*;
pub use signal::*;
pub use state::*;
pub use storage::*;
pub use timer::*;
pub use view::*;
