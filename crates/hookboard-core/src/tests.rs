#[cfg(test)]
mod tests {
    use crate::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| v + 1);
        assert_eq!(sig.get(), 101);
        assert_eq!(sig.version(), 2);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));
        let doubled = Rc::new(RefCell::new(Vec::new()));
        sig.subscribe({
            let doubled = doubled.clone();
            move |v| doubled.borrow_mut().push(v * 2)
        });

        sig.set(42);
        batch(|| {
            sig.set(1);
            sig.set(2);
        });
        assert_eq!(*seen.borrow(), vec![42, 2]);
        assert_eq!(*doubled.borrow(), vec![84, 4]);
    }

    #[test]
    fn test_batch_reads_pre_batch_value() {
        let sig = signal(10);
        let inside = batch(|| {
            sig.set(20);
            sig.get()
        });
        assert_eq!(inside, 10);
        assert_eq!(sig.get(), 20);
    }

    #[test]
    fn test_nested_batches_commit_once() {
        let sig = signal(0);
        let commits = Rc::new(Cell::new(0));
        sig.subscribe({
            let commits = commits.clone();
            move |_| commits.set(commits.get() + 1)
        });
        batch(|| {
            sig.update(|v| v + 1);
            batch(|| sig.update(|v| v + 1));
            assert_eq!(sig.get(), 0);
        });
        assert_eq!(sig.get(), 2);
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(0));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || cleaned_up_clone.set(cleaned_up_clone.get() + 1));

        assert_eq!(cleaned_up.get(), 0);
        scope.dispose();
        scope.dispose();
        assert_eq!(cleaned_up.get(), 1);
        assert!(scope.is_disposed());
    }

    #[test]
    fn test_scope_drop_runs_disposers() {
        let cleaned_up = Rc::new(Cell::new(false));
        {
            let scope = Scope::new();
            let cleaned_up = cleaned_up.clone();
            scope.add_disposer(move || cleaned_up.set(true));
        }
        assert!(cleaned_up.get());
    }

    struct Probe {
        scope: Scope,
        source: Signal<i32>,
        mirror: Signal<i32>,
        evaluations: Cell<u32>,
        sync: Effect<i32>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(log: Rc<RefCell<Vec<String>>>) -> Rc<Self> {
            let scope = Scope::new();
            Rc::new(Self {
                sync: Effect::new(&scope),
                scope,
                source: signal(1),
                mirror: signal(0),
                evaluations: Cell::new(0),
                log,
            })
        }
    }

    impl Component for Probe {
        fn scope(&self) -> &Scope {
            &self.scope
        }

        fn evaluate(&self) {
            self.evaluations.set(self.evaluations.get() + 1);
            let value = self.source.get();
            self.sync.run(value, || {
                self.mirror.set(value * 10);
                self.log.borrow_mut().push(format!("run {value}"));
                let log = self.log.clone();
                on_unmount(move || log.borrow_mut().push(format!("clean {value}")))
            });
        }
    }

    #[test]
    fn test_mount_runs_effect_and_tracks_reads() {
        let rt = Runtime::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let probe = rt.mount(Probe::new(log.clone()));

        assert_eq!(probe.mirror.get(), 10);
        assert_eq!(probe.evaluations.get(), 1);

        // mirror is not read by evaluate, so writing it does not re-evaluate
        probe.mirror.set(0);
        assert_eq!(probe.evaluations.get(), 1);

        probe.source.set(2);
        assert_eq!(probe.evaluations.get(), 2);
        assert_eq!(probe.mirror.get(), 20);
        assert_eq!(*log.borrow(), vec!["run 1", "clean 1", "run 2"]);

        probe.unmount();
        assert_eq!(log.borrow().last().map(String::as_str), Some("clean 2"));
        probe.source.set(3);
        assert_eq!(probe.evaluations.get(), 2);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn test_coalesced_writes_run_one_pass() {
        let rt = Runtime::default();
        let probe = rt.mount(Probe::new(Rc::default()));
        let before = pass_count();

        batch(|| {
            probe.source.set(5);
            probe.source.set(6);
        });
        assert_eq!(pass_count() - before, 1);
        assert_eq!(probe.evaluations.get(), 2);
        assert_eq!(probe.mirror.get(), 60);
    }

    #[test]
    fn test_dropping_mounted_handle_tears_down() {
        let rt = Runtime::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _probe = rt.mount(Probe::new(log.clone()));
        }
        assert_eq!(*log.borrow(), vec!["run 1", "clean 1"]);
    }

    #[test]
    fn test_timer_writes_trigger_passes() {
        let rt = Runtime::default();
        let probe = rt.mount(Probe::new(Rc::default()));
        let source = probe.source.clone();
        rt.timers()
            .set_timeout(Duration::from_millis(500), move || source.set(9));

        rt.advance(Duration::from_millis(499));
        assert_eq!(probe.mirror.get(), 10);
        rt.advance(Duration::from_millis(1));
        assert_eq!(probe.mirror.get(), 90);
    }

    #[test]
    fn test_stored_preference_survives_restart() {
        let backend: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        {
            let rt = Runtime::builder().storage(backend.clone()).build();
            let theme = use_local_storage(rt.store(), "theme", "light".to_string());
            theme.set("dark".into());
        }
        let rt = Runtime::builder().storage(backend).build();
        let theme = use_local_storage(rt.store(), "theme", "light".to_string());
        assert_eq!(theme.get(), "dark");
    }

    #[test]
    fn test_runtime_randomness_is_injectable() {
        let rt = Runtime::builder()
            .random(SequenceRandom::new([0.75, 0.0]))
            .build();
        assert_eq!(rt.random_number(0.0, 1.0, 0), 0.8);
        assert_eq!(rt.random_integer(1000.0, 9999.0), 1000);
    }
}
