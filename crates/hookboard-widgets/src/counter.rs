use hookboard_core::prelude::*;

use crate::Widget;

pub struct Counter {
    scope: Scope,
    count: Signal<i64>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            count: signal(0),
        }
    }

    pub fn value(&self) -> i64 {
        self.count.get()
    }

    pub fn increment(&self) {
        self.count.update(|c| c + 1);
    }

    pub fn decrement(&self) {
        self.count.update(|c| c - 1);
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Counter {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for Counter {
    fn title(&self) -> &'static str {
        "Counter Widget"
    }

    fn badge(&self) -> &'static str {
        "useState"
    }

    fn body(&self) -> View {
        Column().with_children([
            Text(self.value().to_string()),
            Text("Click buttons to see automatic re-renders"),
            Row().with_children([
                Button("-1", ButtonVariant::Secondary, false),
                Button("Reset", ButtonVariant::Destructive, false),
                Button("+1", ButtonVariant::Primary, false),
            ]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_sum_of_steps_since_reset() {
        let c = Counter::new();
        for _ in 0..5 {
            c.increment();
        }
        c.decrement();
        assert_eq!(c.value(), 4);

        c.reset();
        c.decrement();
        c.decrement();
        c.increment();
        assert_eq!(c.value(), -1);
    }

    #[test]
    fn steps_in_one_batch_are_not_lost() {
        let c = Counter::new();
        batch(|| {
            c.increment();
            c.increment();
            c.decrement();
            c.increment();
        });
        assert_eq!(c.value(), 2);
    }

    #[test]
    fn reset_then_steps_in_one_batch() {
        let c = Counter::new();
        c.increment();
        batch(|| {
            c.reset();
            c.increment();
        });
        assert_eq!(c.value(), 1);
    }

    #[test]
    fn renders_current_value() {
        let rt = Runtime::default();
        let c = rt.mount(std::rc::Rc::new(Counter::new()));
        c.increment();
        c.increment();
        let view = c.render();
        assert!(view.contains_text("== Counter Widget [useState] =="));
        assert!(view.render_text().lines().any(|l| l.trim() == "2"));
    }
}
