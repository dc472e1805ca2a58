//! Controlled form with per-field validation and a newest-first history of
//! submissions.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use hookboard_core::prelude::*;

use crate::{ButtonKind, ButtonProps, CustomButton, Widget, WidgetConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "message" => Ok(Field::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn with(&self, field: Field, value: String) -> Self {
        let mut next = self.clone();
        match field {
            Field::Name => next.name = value,
            Field::Email => next.email = value,
            Field::Message => next.message = value,
        }
        next
    }

    /// Every failing field with its message. Empty when the form may be sent.
    pub fn validate(&self) -> BTreeMap<Field, String> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required".to_string());
        }
        if !self.email.contains('@') {
            errors.insert(Field::Email, "Valid email required".to_string());
        }
        if self.message.trim().is_empty() {
            errors.insert(Field::Message, "Message is required".to_string());
        }
        errors
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    pub total: usize,
    pub unique_emails: usize,
    pub avg_message_length: usize,
}

impl SubmissionStats {
    fn compute(list: &[Submission]) -> Self {
        if list.is_empty() {
            return Self::default();
        }
        let chars: usize = list.iter().map(|s| s.message.chars().count()).sum();
        Self {
            total: list.len(),
            unique_emails: list.iter().map(|s| s.email.as_str()).collect::<HashSet<_>>().len(),
            avg_message_length: (chars as f64 / list.len() as f64).round() as usize,
        }
    }
}

pub struct ContactForm {
    scope: Scope,
    rt: Runtime,
    submit_delay: Duration,
    form: Signal<FormData>,
    errors: Signal<BTreeMap<Field, String>>,
    submissions: Signal<Vec<Submission>>,
    submitting: Signal<bool>,
    next_id: Signal<u32>,
    stats: Memo<u64, SubmissionStats>,
}

impl ContactForm {
    pub fn new(rt: &Runtime, config: &WidgetConfig) -> Self {
        Self {
            scope: Scope::new(),
            rt: rt.clone(),
            submit_delay: config.submit_delay(),
            form: signal(blank_form(rt)),
            errors: signal(BTreeMap::new()),
            submissions: signal(Vec::new()),
            submitting: signal(false),
            next_id: signal(1),
            stats: Memo::new(),
        }
    }

    pub fn form(&self) -> FormData {
        self.form.get()
    }

    pub fn errors(&self) -> BTreeMap<Field, String> {
        self.errors.get()
    }

    pub fn error(&self, field: Field) -> Option<String> {
        self.errors.with(|e| e.get(&field).cloned())
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Updates one field and clears its validation error. Inputs are locked
    /// while a submission is in flight.
    pub fn change(&self, field: Field, value: impl Into<String>) {
        if self.submitting.get() {
            log::debug!("ignoring change to {field} while submitting");
            return;
        }
        let value = value.into();
        batch(|| {
            self.form.update(move |f| f.with(field, value));
            if self.errors.with(|e| e.contains_key(&field)) {
                self.errors.update(move |e| {
                    let mut e = e.clone();
                    e.remove(&field);
                    e
                });
            }
        });
    }

    /// Publishes any errors and reports whether the form may be sent.
    pub fn validate(&self) -> bool {
        let errors = self.form.with(FormData::validate);
        if errors.is_empty() {
            return true;
        }
        self.errors.set(errors);
        false
    }

    /// Starts a submission of the current field values. Refused while another
    /// is in flight or when validation fails.
    pub fn submit(&self) -> bool {
        if self.submitting.get() || !self.validate() {
            return false;
        }
        self.submitting.set(true);

        let data = self.form.get();
        let rt = self.rt.clone();
        let (form, errors, submissions, submitting, next_id) = (
            self.form.clone(),
            self.errors.clone(),
            self.submissions.clone(),
            self.submitting.clone(),
            self.next_id.clone(),
        );
        self.rt.timers().set_timeout(self.submit_delay, move || {
            let id = next_id.get();
            let entry = Submission {
                id,
                name: data.name,
                email: data.email,
                message: data.message,
                submitted_at: format_date_time(&rt.now()),
            };
            log::info!("form submission #{id} stored");
            submissions.update(move |list| {
                let mut next = Vec::with_capacity(list.len() + 1);
                next.push(entry);
                next.extend(list.iter().cloned());
                next
            });
            next_id.update(|n| n + 1);
            form.set(blank_form(&rt));
            errors.set(BTreeMap::new());
            submitting.set(false);
        });
        true
    }

    pub fn delete(&self, id: u32) {
        self.submissions
            .update(move |list| list.iter().filter(|s| s.id != id).cloned().collect());
    }

    pub fn delete_all(&self) {
        log::info!("deleting all submissions");
        self.submissions.set(Vec::new());
    }

    /// Recomputed only when the submission list has been replaced.
    pub fn stats(&self) -> SubmissionStats {
        self.stats.get(self.submissions.version(), || {
            log::debug!("recomputing submission stats");
            self.submissions.with(|list| SubmissionStats::compute(list))
        })
    }

    pub fn stats_computations(&self) -> u64 {
        self.stats.computations()
    }
}

fn blank_form(rt: &Runtime) -> FormData {
    FormData {
        email: format!("{}@gmail.com", rt.random_integer(1000.0, 9999.0)),
        ..FormData::default()
    }
}

impl Component for ContactForm {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for ContactForm {
    fn title(&self) -> &'static str {
        "Contact Form"
    }

    fn badge(&self) -> &'static str {
        "Forms"
    }

    fn body(&self) -> View {
        let submitting = self.is_submitting();
        let form = self.form();
        let mut left = Column().child(Text("Submit Message"));
        if submitting {
            left = left.child(Text("Sending..."));
        }
        left = left
            .with_children(
                [Field::Name, Field::Email, Field::Message]
                    .map(|f| TextField(f.as_str(), form.get(f), self.error(f))),
            )
            .child(CustomButton(
                &ButtonProps::new(if submitting { "Sending..." } else { "Send Message" })
                    .kind(ButtonKind::Submit)
                    .disabled(submitting),
            ));

        let list = self.submissions();
        let mut right = Column().child(Text("Message History"));
        if list.is_empty() {
            right = right.child(Text("No Messages Yet"));
        } else {
            let stats = self.stats();
            right = right
                .child(Button("Clear All", ButtonVariant::Destructive, false))
                .child(Row().with_children([
                    Text(format!("Total Messages: {}", stats.total)),
                    Text(format!("Unique Senders: {}", stats.unique_emails)),
                    Text(format!("Avg Length: {}", stats.avg_message_length)),
                ]));
            for (i, s) in list.iter().enumerate() {
                let header = if i == 0 {
                    format!("#{} Latest", s.id)
                } else {
                    format!("#{}", s.id)
                };
                right = right.child(Text(header).with_children([
                    Text(format!("Sender: {}", s.name)),
                    Text(format!("Email: {}", s.email)),
                    Text(format!("Message ({} chars): {}", s.message.chars().count(), s.message)),
                    Text(&s.submitted_at),
                ]));
            }
        }

        Column()
            .child(Text("Controlled components with validation and multiple data persistence"))
            .child(left)
            .child(right)
    }
}
