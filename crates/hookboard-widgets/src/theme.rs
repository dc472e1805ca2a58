//! Shared theme, reached through context rather than passed down by hand.
//!
//! [`ThemeProvider`] owns the stored theme and applies it to the document.
//! Widgets built inside [`ThemeProvider::provide`] pick up a [`ThemeContext`]
//! with [`use_theme`]:
//!
//! ```rust
//! use std::rc::Rc;
//! use hookboard_core::prelude::*;
//! use hookboard_widgets::{RecordingDocument, Theme, ThemeProvider, WidgetConfig, use_theme};
//!
//! let rt = Runtime::default();
//! let doc = Rc::new(RecordingDocument::default());
//! let provider = rt.mount(Rc::new(ThemeProvider::new(&rt, &WidgetConfig::default(), doc.clone())));
//!
//! let ctx = provider.provide(use_theme);
//! ctx.toggle();
//! assert_eq!(ctx.theme(), Theme::Dark);
//! assert_eq!(doc.body_class().as_deref(), Some("dark"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hookboard_core::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Widget, WidgetConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-page presentation target.
pub trait Document {
    fn set_body_class(&self, class: &str);
}

/// Keeps every class it was given.
#[derive(Default)]
pub struct RecordingDocument {
    classes: RefCell<Vec<String>>,
}

impl RecordingDocument {
    pub fn body_class(&self) -> Option<String> {
        self.classes.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }
}

impl Document for RecordingDocument {
    fn set_body_class(&self, class: &str) {
        self.classes.borrow_mut().push(class.to_string());
    }
}

/// What consumers of the shared theme see.
#[derive(Clone)]
pub struct ThemeContext {
    theme: Signal<Theme>,
}

impl ThemeContext {
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) {
        self.theme.update(|t| t.toggled());
    }
}

/// The shared theme for the current context frame.
///
/// # Panics
///
/// Outside [`ThemeProvider::provide`]. Use [`try_use_theme`] to get an error
/// instead.
pub fn use_theme() -> ThemeContext {
    match try_use_theme() {
        Ok(ctx) => ctx,
        Err(_) => panic!("use_theme must be used within ThemeProvider"),
    }
}

pub fn try_use_theme() -> Result<ThemeContext, ContextError> {
    try_use_context::<ThemeContext>()
}

pub struct ThemeProvider {
    scope: Scope,
    theme: StoredSignal<Theme>,
    document: Rc<dyn Document>,
    apply: Effect<Theme>,
}

impl ThemeProvider {
    pub fn new(rt: &Runtime, config: &WidgetConfig, document: Rc<dyn Document>) -> Self {
        let scope = Scope::new();
        Self {
            apply: Effect::new(&scope),
            scope,
            theme: use_local_storage(rt.store(), config.theme_key.as_str(), Theme::default()),
            document,
        }
    }

    pub fn context(&self) -> ThemeContext {
        ThemeContext {
            theme: self.theme.signal().clone(),
        }
    }

    /// Runs `f` with this provider's context visible to [`use_theme`].
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        provide_context(self.context(), f)
    }
}

impl Component for ThemeProvider {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {
        let theme = self.theme.get();
        self.apply.run(theme, || {
            log::debug!("applying {theme} theme");
            self.document.set_body_class(theme.as_str());
            None
        });
    }
}

pub struct ThemeToggle {
    scope: Scope,
    ctx: ThemeContext,
}

impl ThemeToggle {
    /// # Panics
    ///
    /// Outside [`ThemeProvider::provide`].
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_context(use_theme())
    }

    pub fn with_context(ctx: ThemeContext) -> Self {
        Self {
            scope: Scope::new(),
            ctx,
        }
    }

    pub fn theme(&self) -> Theme {
        self.ctx.theme()
    }

    pub fn toggle(&self) {
        self.ctx.toggle();
    }
}

impl Component for ThemeToggle {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for ThemeToggle {
    fn title(&self) -> &'static str {
        "Theme Switcher"
    }

    fn badge(&self) -> &'static str {
        "Context API"
    }

    fn body(&self) -> View {
        let theme = self.theme();
        let target = match theme.toggled() {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        };
        Column().with_children([
            Text("Global state without prop drilling"),
            Text(format!("Current theme: {theme}")),
            Button(format!("Switch to {target} mode"), ButtonVariant::Primary, false),
        ])
    }
}
