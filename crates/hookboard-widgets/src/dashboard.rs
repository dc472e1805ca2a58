//! The composition root: every widget mounted once, grouped into numbered
//! sections. The dashboard holds no state of its own.

use std::rc::Rc;

use hookboard_core::prelude::*;

use crate::{
    ButtonShowcase, Clock, ContactForm, Counter, Document, Notes, ProfileLoader, Theme,
    ThemeContext, ThemeProvider, ThemeToggle, TodoList, Widget, WidgetConfig, use_theme,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub number: u32,
    pub title: &'static str,
    pub description: &'static str,
}

impl Section {
    pub fn anchor_id(&self) -> String {
        anchor_id(self.title)
    }
}

/// `"State Management"` becomes `"state-management"`.
pub fn anchor_id(title: &str) -> String {
    let mut dashed = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                dashed.push('-');
            }
            in_space = true;
        } else {
            dashed.push(c);
            in_space = false;
        }
    }
    dashed.retain(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    dashed
}

pub const SECTIONS: [Section; 7] = [
    Section {
        number: 1,
        title: "State Management",
        description: "useState + useEffect - The foundation of React components",
    },
    Section {
        number: 2,
        title: "Component Architecture",
        description: "Props & Composition - Building reusable components",
    },
    Section {
        number: 3,
        title: "Conditional Rendering",
        description: "Showing the right content at the right time (Loading states, error states, feature flags)",
    },
    Section {
        number: 4,
        title: "Data Display",
        description: "List Rendering & Keys - Efficiently displaying arrays of data",
    },
    Section {
        number: 5,
        title: "User Interaction",
        description: "Event Handling & Forms - Managing user input and validation",
    },
    Section {
        number: 6,
        title: "Global State",
        description: "Context API - Sharing state across components without prop drilling - useCallback",
    },
    Section {
        number: 7,
        title: "Advanced Patterns",
        description: "Custom Hooks & Performance - Reusable logic and optimization",
    },
];

struct Widgets {
    counter: Mounted<Counter>,
    clock: Mounted<Clock>,
    buttons: Mounted<ButtonShowcase>,
    profile: Mounted<ProfileLoader>,
    todos: Mounted<TodoList>,
    contact: Mounted<ContactForm>,
    theme_toggle: Mounted<ThemeToggle>,
    notes: Mounted<Notes>,
}

impl Widgets {
    fn unmount(&self) {
        self.counter.unmount();
        self.clock.unmount();
        self.buttons.unmount();
        self.profile.unmount();
        self.todos.unmount();
        self.contact.unmount();
        self.theme_toggle.unmount();
        self.notes.unmount();
    }
}

pub struct Dashboard {
    theme: ThemeContext,
    widgets: Widgets,
    // Declared last so it drops after the widgets reading it.
    provider: Mounted<ThemeProvider>,
}

impl Dashboard {
    /// Mounts the theme provider, then every widget inside its context.
    pub fn new(rt: &Runtime, config: &WidgetConfig, document: Rc<dyn Document>) -> Self {
        let provider = rt.mount(Rc::new(ThemeProvider::new(rt, config, document)));
        let (theme, widgets) = provider.provide(|| {
            let widgets = Widgets {
                counter: rt.mount(Rc::new(Counter::new())),
                clock: rt.mount(Rc::new(Clock::new(rt, config))),
                buttons: rt.mount(Rc::new(ButtonShowcase::new())),
                profile: rt.mount(Rc::new(ProfileLoader::new(rt, config))),
                todos: rt.mount(Rc::new(TodoList::new())),
                contact: rt.mount(Rc::new(ContactForm::new(rt, config))),
                theme_toggle: rt.mount(Rc::new(ThemeToggle::new())),
                notes: rt.mount(Rc::new(Notes::new(rt, config))),
            };
            (use_theme(), widgets)
        });
        log::info!("dashboard mounted with {} sections", SECTIONS.len());
        Self {
            theme,
            widgets,
            provider,
        }
    }

    pub fn sections(&self) -> &'static [Section] {
        &SECTIONS
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn counter(&self) -> &Counter {
        &self.widgets.counter
    }

    pub fn clock(&self) -> &Clock {
        &self.widgets.clock
    }

    pub fn buttons(&self) -> &ButtonShowcase {
        &self.widgets.buttons
    }

    pub fn profile(&self) -> &ProfileLoader {
        &self.widgets.profile
    }

    pub fn todos(&self) -> &TodoList {
        &self.widgets.todos
    }

    pub fn contact(&self) -> &ContactForm {
        &self.widgets.contact
    }

    pub fn theme_toggle(&self) -> &ThemeToggle {
        &self.widgets.theme_toggle
    }

    pub fn notes(&self) -> &Notes {
        &self.widgets.notes
    }

    pub fn is_mounted(&self) -> bool {
        self.provider.is_mounted()
    }

    fn section_widgets(&self, number: u32) -> Vec<View> {
        let w = &self.widgets;
        match number {
            1 => vec![w.counter.render(), w.clock.render()],
            2 => vec![w.buttons.render()],
            3 => vec![w.profile.render()],
            4 => vec![w.todos.render()],
            5 => vec![w.contact.render()],
            6 => vec![w.theme_toggle.render()],
            7 => vec![w.notes.render()],
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> View {
        Column()
            .child(Text(format!("Hookboard ({} theme)", self.theme())))
            .with_children(SECTIONS.iter().map(|s| {
                SectionView(s.number, s.title, s.description, s.anchor_id())
                    .with_children(self.section_widgets(s.number))
            }))
    }

    /// Tears down every widget, then the provider. Pending fetches and
    /// submissions may still fire afterwards but nothing re-evaluates.
    pub fn unmount(&self) {
        self.widgets.unmount();
        self.provider.unmount();
        log::info!("dashboard unmounted");
    }
}
