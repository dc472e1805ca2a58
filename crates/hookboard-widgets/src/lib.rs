//! # Widgets
//!
//! The dashboard's feature units, each built from the core's signals, memos
//! and effects:
//!
//! - [`Counter`]: one integer cell.
//! - [`Clock`]: an interval effect with cleanup, plus a leaking demo mode.
//! - [`ButtonShowcase`]: one reusable button driven by [`ButtonProps`].
//! - [`ProfileLoader`]: loading, error, success and signed-out states.
//! - [`TodoList`]: list records replaced by `map`, never edited in place.
//! - [`ContactForm`]: controlled fields, validation and a submission log.
//! - [`ThemeToggle`]: shared theme reached through [`ThemeProvider`] context.
//! - [`Notes`]: a stored list with memoized statistics.
//!
//! [`Dashboard`] mounts all of them under numbered sections.
//!
//! ```rust
//! use std::rc::Rc;
//! use hookboard_core::prelude::*;
//! use hookboard_widgets::{Counter, Widget};
//!
//! let rt = Runtime::default();
//! let counter = rt.mount(Rc::new(Counter::new()));
//! counter.increment();
//! assert!(counter.render().contains_text("Counter Widget"));
//! ```
#![allow(non_snake_case)]

pub mod buttons;
pub mod clock;
pub mod config;
pub mod contact;
pub mod counter;
pub mod dashboard;
pub mod notes;
pub mod profile;
pub mod theme;
pub mod todo;

pub use buttons::*;
pub use clock::{Clock, TIME_PLACEHOLDER};
pub use config::WidgetConfig;
pub use contact::*;
pub use counter::Counter;
pub use dashboard::*;
pub use notes::*;
pub use profile::*;
pub use theme::*;
pub use todo::*;

use hookboard_core::prelude::{Column, Component, Heading, View};

/// A mounted dashboard tile.
pub trait Widget: Component {
    fn title(&self) -> &'static str;

    /// Name of the state pattern the widget demonstrates.
    fn badge(&self) -> &'static str;

    fn body(&self) -> View;

    fn render(&self) -> View {
        Column().with_children([Heading(self.title(), self.badge()), self.body()])
    }
}
