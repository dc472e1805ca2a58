use hookboard_core::prelude::*;

use crate::Widget;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: u32,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u32, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }
}

pub fn default_todos() -> Vec<Todo> {
    vec![
        Todo::new(1, "Learn React useState", true),
        Todo::new(2, "Master useEffect", true),
        Todo::new(3, "Understand props", false),
        Todo::new(4, "Practice conditional rendering", false),
        Todo::new(5, "Build awesome apps", false),
    ]
}

pub struct TodoList {
    scope: Scope,
    todos: Signal<Vec<Todo>>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::with_items(default_todos())
    }

    pub fn with_items(items: Vec<Todo>) -> Self {
        Self {
            scope: Scope::new(),
            todos: signal(items),
        }
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.get()
    }

    /// Flips `completed` on the record with `id`. Unknown ids leave the list
    /// as it was, apart from being a fresh copy.
    pub fn toggle(&self, id: u32) {
        self.todos.update(move |list| {
            list.iter()
                .map(|t| {
                    if t.id == id {
                        Todo {
                            completed: !t.completed,
                            ..t.clone()
                        }
                    } else {
                        t.clone()
                    }
                })
                .collect()
        });
    }

    /// `(completed, total)`
    pub fn progress(&self) -> (usize, usize) {
        self.todos
            .with(|list| (list.iter().filter(|t| t.completed).count(), list.len()))
    }

    pub fn progress_fraction(&self) -> f64 {
        match self.progress() {
            (_, 0) => 0.0,
            (done, total) => done as f64 / total as f64,
        }
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TodoList {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for TodoList {
    fn title(&self) -> &'static str {
        "Learning Checklist"
    }

    fn badge(&self) -> &'static str {
        "List Rendering"
    }

    fn body(&self) -> View {
        let (done, total) = self.progress();
        Column()
            .child(ProgressBar(
                done as f32,
                total as f32,
                format!("Progress: {done}/{total} completed"),
            ))
            .with_children(
                self.todos
                    .with(|list| list.iter().map(|t| Checkbox(t.completed, &t.text)).collect::<Vec<_>>()),
            )
    }
}
