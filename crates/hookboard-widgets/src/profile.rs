//! Simulated user fetch with four mutually exclusive display states.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use hookboard_core::prelude::*;

use crate::{Widget, WidgetConfig};

pub const LOAD_ERROR: &str = "Failed to load user data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn demo() -> Self {
        Self {
            name: "John Doe".into(),
            email: "john@example.com".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileState {
    Loading,
    Error { message: String, draw: Option<f64> },
    Success { user: User, draw: Option<f64> },
    /// Loaded, but nobody is logged in.
    SignedOut,
}

pub struct ProfileLoader {
    scope: Scope,
    rt: Runtime,
    fetch_delay: Duration,
    threshold: f64,
    user: Signal<Option<User>>,
    error: Signal<Option<String>>,
    draw: Signal<Option<f64>>,
    loading: Signal<bool>,
    generation: Rc<Cell<u64>>,
    on_mount: Effect<()>,
}

impl ProfileLoader {
    pub fn new(rt: &Runtime, config: &WidgetConfig) -> Self {
        let scope = Scope::new();
        Self {
            on_mount: Effect::new(&scope),
            scope,
            rt: rt.clone(),
            fetch_delay: config.fetch_delay(),
            threshold: config.error_threshold,
            user: signal(None),
            error: signal(None),
            draw: signal(None),
            loading: signal(true),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> ProfileState {
        if self.loading.get() {
            return ProfileState::Loading;
        }
        let draw = self.draw.get();
        if let Some(message) = self.error.get() {
            return ProfileState::Error { message, draw };
        }
        match self.user.get() {
            Some(user) => ProfileState::Success { user, draw },
            None => ProfileState::SignedOut,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Last drawn value, cleared whenever a fetch starts.
    pub fn draw(&self) -> Option<f64> {
        self.draw.get()
    }

    pub fn retry(&self) {
        self.fetch_user();
    }

    pub fn sign_out(&self) {
        batch(|| {
            self.loading.set(false);
            self.error.set(None);
            self.user.set(None);
            self.draw.set(None);
        });
    }

    /// Resets to loading and resolves after the fetch delay. Only the most
    /// recent fetch resolves; earlier ones still in flight are dropped.
    fn fetch_user(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        batch(|| {
            self.loading.set(true);
            self.error.set(None);
            self.user.set(None);
            self.draw.set(None);
        });

        let latest = self.generation.clone();
        let rt = self.rt.clone();
        let threshold = self.threshold;
        let (user, error, draw, loading) = (
            self.user.clone(),
            self.error.clone(),
            self.draw.clone(),
            self.loading.clone(),
        );
        self.rt.timers().set_timeout(self.fetch_delay, move || {
            if latest.get() != generation {
                log::debug!("stale profile fetch {generation} ignored");
                return;
            }
            let r = rt.random_number(0.0, 1.0, 0);
            log::info!("profile fetch drew {r}");
            draw.set(Some(r));
            if r > threshold {
                error.set(Some(LOAD_ERROR.to_string()));
            } else {
                user.set(Some(User::demo()));
            }
            loading.set(false);
        });
    }
}

impl Component for ProfileLoader {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {
        self.on_mount.run((), || {
            self.fetch_user();
            None
        });
    }
}

impl Widget for ProfileLoader {
    fn title(&self) -> &'static str {
        "User Profile"
    }

    fn badge(&self) -> &'static str {
        "Conditional"
    }

    fn body(&self) -> View {
        let draw_line = |draw: Option<f64>, note: &str| {
            draw.map(|r| Text(format!("Random number: {r:.3} ({note})")))
        };
        match self.state() {
            ProfileState::Loading => Column().child(Text("Loading user data...")),
            ProfileState::Error { message, draw } => Column()
                .child(Text(format!("Error: {message}")))
                .with_children(draw_line(draw, "> 0.7 = Error"))
                .child(Button("Try Again", ButtonVariant::Secondary, false)),
            ProfileState::SignedOut => Column().child(Text("Please log in")),
            ProfileState::Success { user, draw } => Column()
                .child(Text("User loaded successfully!"))
                .with_children(draw_line(draw, "≤ 0.7 = Success"))
                .with_children([
                    Text(format!("Name: {}", user.name)),
                    Text(format!("Email: {}", user.email)),
                    Button("Reload User", ButtonVariant::Secondary, false),
                ]),
        }
    }
}
