#![allow(non_snake_case)]
//! Plain view tree describing what a widget shows. Rendering is line-based
//! text; layout and styling are left to whoever draws it.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Sean,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Sean => "sean",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Column,
    Row,
    Section {
        number: u32,
        title: String,
        description: String,
        anchor: String,
    },
    Heading {
        text: String,
        badge: String,
    },
    Text {
        text: String,
    },
    Button {
        text: String,
        variant: ButtonVariant,
        disabled: bool,
    },
    TextField {
        label: String,
        value: String,
        error: Option<String>,
    },
    Checkbox {
        checked: bool,
        label: String,
    },
    ProgressBar {
        value: f32,
        max: f32,
        label: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    /// One line per node, children indented below their parent. Rows collapse
    /// onto a single line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_lines(0, &mut out);
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.render_text().contains(needle)
    }

    /// Buttons anywhere in the tree as `(text, variant, disabled)`.
    pub fn buttons(&self) -> Vec<(String, ButtonVariant, bool)> {
        let mut out = Vec::new();
        self.collect_buttons(&mut out);
        out
    }

    fn collect_buttons(&self, out: &mut Vec<(String, ButtonVariant, bool)>) {
        if let ViewKind::Button {
            text,
            variant,
            disabled,
        } = &self.kind
        {
            out.push((text.clone(), *variant, *disabled));
        }
        for c in &self.children {
            c.collect_buttons(out);
        }
    }

    fn write_lines(&self, depth: usize, out: &mut String) {
        match &self.kind {
            ViewKind::Column => {
                for c in &self.children {
                    c.write_lines(depth, out);
                }
            }
            ViewKind::Row => {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&self.inline());
                out.push('\n');
            }
            _ => {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&self.inline());
                out.push('\n');
                for c in &self.children {
                    c.write_lines(depth + 1, out);
                }
            }
        }
    }

    fn inline(&self) -> String {
        match &self.kind {
            ViewKind::Column | ViewKind::Row => self
                .children
                .iter()
                .map(View::inline)
                .collect::<Vec<_>>()
                .join("  "),
            ViewKind::Section {
                number,
                title,
                description,
                anchor,
            } => format!("{number}. {title} (#{anchor}) - {description}"),
            ViewKind::Heading { text, badge } => format!("== {text} [{badge}] =="),
            ViewKind::Text { text } => text.clone(),
            ViewKind::Button {
                text,
                variant,
                disabled,
            } => {
                let mut s = format!("[{text}]");
                if *variant != ButtonVariant::Primary {
                    s.push_str(&format!("<{}>", variant.as_str()));
                }
                if *disabled {
                    s.push_str("(disabled)");
                }
                s
            }
            ViewKind::TextField { label, value, error } => match error {
                Some(e) => format!("{label}: {value} ! {e}"),
                None => format!("{label}: {value}"),
            },
            ViewKind::Checkbox { checked, label } => {
                format!("[{}] {label}", if *checked { "x" } else { " " })
            }
            ViewKind::ProgressBar { value, max, label } => {
                let filled = if *max > 0.0 {
                    ((value / max) * 10.0).round().clamp(0.0, 10.0) as usize
                } else {
                    0
                };
                format!("{label} [{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
            }
        }
    }
}

pub fn Column() -> View {
    View::new(ViewKind::Column)
}

pub fn Row() -> View {
    View::new(ViewKind::Row)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() })
}

pub fn Heading(text: impl Into<String>, badge: impl Into<String>) -> View {
    View::new(ViewKind::Heading {
        text: text.into(),
        badge: badge.into(),
    })
}

pub fn Button(text: impl Into<String>, variant: ButtonVariant, disabled: bool) -> View {
    View::new(ViewKind::Button {
        text: text.into(),
        variant,
        disabled,
    })
}

pub fn TextField(label: impl Into<String>, value: impl Into<String>, error: Option<String>) -> View {
    View::new(ViewKind::TextField {
        label: label.into(),
        value: value.into(),
        error,
    })
}

pub fn Checkbox(checked: bool, label: impl Into<String>) -> View {
    View::new(ViewKind::Checkbox {
        checked,
        label: label.into(),
    })
}

pub fn ProgressBar(value: f32, max: f32, label: impl Into<String>) -> View {
    View::new(ViewKind::ProgressBar {
        value,
        max,
        label: label.into(),
    })
}

pub fn SectionView(number: u32, title: &str, description: &str, anchor: String) -> View {
    View::new(ViewKind::Section {
        number,
        title: title.to_string(),
        description: description.to_string(),
        anchor,
    })
}
