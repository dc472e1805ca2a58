use hookboard_core::prelude::*;

use crate::{Widget, WidgetConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoteStats {
    pub total: usize,
    /// Notes longer than the configured threshold.
    pub long: usize,
    pub avg_length: usize,
}

/// Notes kept in local storage, with statistics recomputed only when the list
/// changes.
pub struct Notes {
    scope: Scope,
    notes: StoredSignal<Vec<String>>,
    draft: Signal<String>,
    long_chars: usize,
    stats: Memo<u64, NoteStats>,
}

impl Notes {
    pub fn new(rt: &Runtime, config: &WidgetConfig) -> Self {
        Self {
            scope: Scope::new(),
            notes: use_local_storage(rt.store(), config.notes_key.as_str(), Vec::new()),
            draft: signal(String::new()),
            long_chars: config.long_note_chars,
            stats: Memo::new(),
        }
    }

    pub fn notes(&self) -> Vec<String> {
        self.notes.get()
    }

    /// Appends the trimmed text. Blank input is ignored.
    pub fn add(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let text = text.to_string();
        self.notes.update(move |notes| {
            let mut next = notes.clone();
            next.push(text);
            next
        });
        true
    }

    pub fn draft(&self) -> String {
        self.draft.get()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.draft.set(text.into());
    }

    /// Adds the draft and clears it, unless the draft is blank.
    pub fn add_draft(&self) -> bool {
        let draft = self.draft.get();
        batch(|| {
            let added = self.add(&draft);
            if added {
                self.draft.set(String::new());
            }
            added
        })
    }

    pub fn clear(&self) {
        self.notes.set(Vec::new());
    }

    pub fn stats(&self) -> NoteStats {
        self.stats.get(self.notes.version(), || {
            log::info!("Calculating note statistics...");
            self.notes.with(|notes| {
                if notes.is_empty() {
                    return NoteStats::default();
                }
                let lengths: Vec<usize> = notes.iter().map(|n| n.chars().count()).collect();
                let sum: usize = lengths.iter().sum();
                NoteStats {
                    total: notes.len(),
                    long: lengths.iter().filter(|&&l| l > self.long_chars).count(),
                    avg_length: (sum as f64 / notes.len() as f64).round() as usize,
                }
            })
        })
    }

    pub fn stats_computations(&self) -> u64 {
        self.stats.computations()
    }
}

impl Component for Notes {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {}
}

impl Widget for Notes {
    fn title(&self) -> &'static str {
        "Smart Notes"
    }

    fn badge(&self) -> &'static str {
        "Custom Hooks"
    }

    fn body(&self) -> View {
        let stats = self.stats();
        let notes = self.notes();
        let mut col = Column()
            .child(Row().with_children([
                Text(format!("{} Notes", stats.total)),
                Text(format!("{} Long", stats.long)),
                Text(format!("{} Avg chars", stats.avg_length)),
            ]))
            .child(Row().with_children([
                TextField("Add a note...", self.draft(), None),
                Button("Add", ButtonVariant::Primary, false),
            ]));
        if notes.is_empty() {
            col = col.child(Text("No notes yet. Add one above!"));
        } else {
            col = col
                .with_children(notes.into_iter().map(|n| Text(format!("- {n}"))))
                .child(Button("Clear All Notes", ButtonVariant::Destructive, false));
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn notes(rt: &Runtime) -> Notes {
        Notes::new(rt, &WidgetConfig::default())
    }

    #[test]
    fn blank_input_is_ignored() {
        let rt = Runtime::default();
        let n = notes(&rt);
        assert!(!n.add(""));
        assert!(!n.add("   "));
        assert!(n.notes().is_empty());

        assert!(n.add("  hello "));
        assert_eq!(n.notes(), vec!["hello"]);
    }

    #[test]
    fn appends_in_order_and_clears() {
        let rt = Runtime::default();
        let n = notes(&rt);
        for t in ["one", "two", "three"] {
            n.add(t);
        }
        assert_eq!(n.notes(), vec!["one", "two", "three"]);
        n.clear();
        assert!(n.notes().is_empty());
        n.clear();
        assert!(n.notes().is_empty());
    }

    #[test]
    fn stats_match_manual_computation() {
        let rt = Runtime::default();
        let n = notes(&rt);
        for t in ["hello", "hello world!", "abc"] {
            n.add(t);
        }
        // (5 + 12 + 3) / 3 = 6.67
        assert_eq!(
            n.stats(),
            NoteStats {
                total: 3,
                long: 1,
                avg_length: 7
            }
        );
    }

    #[test]
    fn stats_only_recompute_when_notes_change() {
        let rt = Runtime::default();
        let n = notes(&rt);
        n.add("first");
        let _ = n.stats();
        let _ = n.stats();
        assert_eq!(n.stats_computations(), 1);

        n.set_draft("typing...");
        let _ = n.stats();
        assert_eq!(n.stats_computations(), 1);

        n.add("second");
        assert_eq!(n.stats().total, 2);
        assert_eq!(n.stats_computations(), 2);
    }

    #[test]
    fn draft_is_cleared_only_when_added() {
        let rt = Runtime::default();
        let n = notes(&rt);
        n.set_draft("  ");
        assert!(!n.add_draft());
        assert_eq!(n.draft(), "  ");

        n.set_draft(" remember milk ");
        assert!(n.add_draft());
        assert_eq!(n.draft(), "");
        assert_eq!(n.notes(), vec!["remember milk"]);
    }

    #[test]
    fn notes_survive_restart() {
        let backend: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        {
            let rt = Runtime::builder().storage(backend.clone()).build();
            notes(&rt).add("kept");
        }
        let rt = Runtime::builder().storage(backend.clone()).build();
        assert_eq!(notes(&rt).notes(), vec!["kept"]);
        assert!(backend.get_item("tutorial-notes").unwrap().is_some());
    }

    #[test]
    fn full_quota_keeps_the_session_copy() {
        let rt = Runtime::builder()
            .storage(Rc::new(MemoryStorage::with_quota(4)))
            .build();
        let n = notes(&rt);
        assert!(n.add("far too long to store"));
        assert_eq!(n.notes(), vec!["far too long to store"]);
    }
}
