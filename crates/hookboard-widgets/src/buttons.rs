#![allow(non_snake_case)]

use hookboard_core::prelude::*;

use crate::Widget;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonKind {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonKind {
    /// Suffix shown after the label. Plain buttons have none.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            ButtonKind::Button => None,
            ButtonKind::Submit => Some("submit"),
            ButtonKind::Reset => Some("reset"),
        }
    }
}

/// Props for the one reusable button every widget draws with.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonProps {
    pub label: String,
    pub variant: ButtonVariant,
    pub disabled: bool,
    pub kind: ButtonKind,
}

impl ButtonProps {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            disabled: false,
            kind: ButtonKind::default(),
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn kind(mut self, kind: ButtonKind) -> Self {
        self.kind = kind;
        self
    }
}

pub fn CustomButton(props: &ButtonProps) -> View {
    let label = match props.kind.marker() {
        Some(marker) => format!("{} ({marker})", props.label),
        None => props.label.clone(),
    };
    Button(label, props.variant, props.disabled)
}

struct ShowcaseEntry {
    props: ButtonProps,
    alert: &'static str,
}

/// One component, several looks, all driven by props.
pub struct ButtonShowcase {
    scope: Scope,
    entries: Vec<ShowcaseEntry>,
    last_alert: Signal<Option<String>>,
}

impl ButtonShowcase {
    pub fn new() -> Self {
        let entries = vec![
            ShowcaseEntry {
                props: ButtonProps::new("Primary CustomButton"),
                alert: "Primary!",
            },
            ShowcaseEntry {
                props: ButtonProps::new("Secondary CustomButton").variant(ButtonVariant::Secondary),
                alert: "Secondary!",
            },
            ShowcaseEntry {
                props: ButtonProps::new("Destructive CustomButton")
                    .variant(ButtonVariant::Destructive),
                alert: "Danger!",
            },
            ShowcaseEntry {
                props: ButtonProps::new("Disabled CustomButton").disabled(true),
                alert: "Never fires",
            },
            ShowcaseEntry {
                props: ButtonProps::new("Sean CustomButton").variant(ButtonVariant::Sean),
                alert: "Sean is on fire!",
            },
        ];
        Self {
            scope: Scope::new(),
            entries,
            last_alert: signal(None),
        }
    }

    pub fn props(&self) -> Vec<ButtonProps> {
        self.entries.iter().map(|e| e.props.clone()).collect()
    }

    /// Presses the button at `index`. Disabled or missing buttons do nothing.
    pub fn click(&self, index: usize) -> bool {
        match self.entries.get(index) {
            Some(entry) if !entry.props.disabled => {
                log::info!("button clicked: {}", entry.props.label);
                self.last_alert.set(Some(entry.alert.to_string()));
                true
            }
            _ => false,
        }
    }

    pub fn last_alert(&self) -> Option<String> {
        self.last_alert.get()
    }
}

impl Default for ButtonShowcase {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ButtonShowcase {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for ButtonShowcase {
    fn title(&self) -> &'static str {
        "CustomButton Variants"
    }

    fn badge(&self) -> &'static str {
        "Props"
    }

    fn body(&self) -> View {
        let mut col = Column()
            .child(Text("One component, multiple styles via props"))
            .child(Row().with_children(self.entries.iter().map(|e| CustomButton(&e.props))));
        if let Some(alert) = self.last_alert() {
            col = col.child(Text(format!("Alert: {alert}")));
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_primary_enabled_plain_button() {
        let p = ButtonProps::new("Go");
        assert_eq!(p.variant, ButtonVariant::Primary);
        assert!(!p.disabled);
        assert_eq!(p.kind, ButtonKind::Button);
        assert_eq!(
            ButtonProps::new("Send").kind(ButtonKind::Submit).kind,
            ButtonKind::Submit
        );
    }

    #[test]
    fn kind_is_shown_after_the_label() {
        let send = ButtonProps::new("Send").kind(ButtonKind::Submit);
        assert_eq!(
            CustomButton(&send).buttons(),
            vec![("Send (submit)".to_string(), ButtonVariant::Primary, false)]
        );
        let clear = ButtonProps::new("Clear").kind(ButtonKind::Reset).disabled(true);
        assert!(CustomButton(&clear).contains_text("[Clear (reset)]"));
        assert_eq!(CustomButton(&ButtonProps::new("Go")).buttons()[0].0, "Go");
    }

    #[test]
    fn disabled_button_never_fires() {
        let s = ButtonShowcase::new();
        assert!(!s.click(3));
        assert_eq!(s.last_alert(), None);
        assert!(!s.click(99));

        assert!(s.click(2));
        assert_eq!(s.last_alert().as_deref(), Some("Danger!"));
    }

    #[test]
    fn renders_every_variant() {
        let s = ButtonShowcase::new();
        let buttons = s.render().buttons();
        assert_eq!(buttons.len(), 5);
        assert_eq!(buttons[3], ("Disabled CustomButton".into(), ButtonVariant::Primary, true));
        assert_eq!(buttons[4].1, ButtonVariant::Sean);
    }
}
