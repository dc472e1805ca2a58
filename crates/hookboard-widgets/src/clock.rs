//! Live clock, with a switchable "bad" mode that schedules a fresh one-shot
//! timer on every evaluation instead of using a cleaned-up interval. The bad
//! mode is kept on purpose as the counterexample: its timers are never
//! cancelled.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local};
use hookboard_core::Clock as WallClock;
use hookboard_core::prelude::*;

use crate::{Widget, WidgetConfig};

pub const TIME_PLACEHOLDER: &str = "--:--:-- --";

pub struct Clock {
    scope: Scope,
    timers: Timers,
    wall: Rc<dyn WallClock>,
    tick: Duration,
    bad_delay: Duration,
    time: Signal<Option<DateTime<Local>>>,
    bad_mode: Signal<bool>,
    ticker: Effect<bool>,
    evaluations: Cell<u64>,
    leaked_timers: Cell<u64>,
}

impl Clock {
    pub fn new(rt: &Runtime, config: &WidgetConfig) -> Self {
        let scope = Scope::new();
        Self {
            ticker: Effect::new(&scope),
            scope,
            timers: rt.timers().clone(),
            wall: rt.clock(),
            tick: config.tick_interval(),
            bad_delay: config.bad_timer_delay(),
            time: signal(None),
            bad_mode: signal(false),
            evaluations: Cell::new(0),
            leaked_timers: Cell::new(0),
        }
    }

    pub fn time(&self) -> Option<DateTime<Local>> {
        self.time.get()
    }

    pub fn display(&self) -> String {
        self.time
            .with(|t| t.as_ref().map(format_time))
            .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
    }

    pub fn is_bad_mode(&self) -> bool {
        self.bad_mode.get()
    }

    pub fn toggle_bad_mode(&self) {
        self.bad_mode.update(|b| !b);
    }

    /// Evaluation passes seen so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    /// One-shot timers created by the bad mode. None of them is ever cleared.
    pub fn leaked_timers(&self) -> u64 {
        self.leaked_timers.get()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.has_cleanup()
    }

    fn stamp(&self) -> impl Fn() + 'static {
        let time = self.time.clone();
        let wall = self.wall.clone();
        move || time.set(Some(wall.now()))
    }
}

impl Component for Clock {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn evaluate(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
        let bad = self.bad_mode.get();

        if bad {
            // Reading the time here is what makes every tick re-evaluate.
            let _ = self.time.get();
            log::warn!(
                "clock re-evaluated {} times: creating another timer",
                self.evaluations.get()
            );
            self.timers.set_timeout(self.bad_delay, self.stamp());
            self.leaked_timers.set(self.leaked_timers.get() + 1);
        }

        self.ticker.run(bad, || {
            if bad {
                return None;
            }
            let stamp = self.stamp();
            stamp();
            let id = self.timers.set_interval(self.tick, stamp);
            let timers = self.timers.clone();
            on_unmount(move || {
                log::info!("clock cleanup ran");
                timers.clear(id);
            })
        });
    }
}

impl Widget for Clock {
    fn title(&self) -> &'static str {
        "Live Clock"
    }

    fn badge(&self) -> &'static str {
        "useEffect"
    }

    fn body(&self) -> View {
        let bad = self.is_bad_mode();
        let mut col = Column().child(if bad {
            Button("Stop Bad Demo", ButtonVariant::Destructive, false)
        } else {
            Button("Show Bad Example", ButtonVariant::Secondary, false)
        });
        if bad {
            col = col.child(
                Text(format!("Renders: {} | Check console!", self.evaluations()))
                    .child(Text("New timer created every render")),
            );
        }
        col.with_children([
            Text(self.display()),
            Text(if bad {
                "Using a one-shot timer in render (creating leaks!)"
            } else {
                "Updates every second with automatic cleanup"
            }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn runtime() -> Runtime {
        let start = Local
            .with_ymd_and_hms(2026, 3, 4, 9, 0, 0)
            .single()
            .expect("unambiguous local time");
        Runtime::builder().virtual_clock(start).build()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn absent_until_mounted() {
        let rt = runtime();
        let clock = Clock::new(&rt, &WidgetConfig::default());
        assert_eq!(clock.time(), None);
        assert_eq!(clock.display(), TIME_PLACEHOLDER);

        let clock = rt.mount(Rc::new(clock));
        assert_eq!(clock.display(), "9:00:00 AM");
    }

    #[test]
    fn ticks_every_interval_while_mounted() {
        let rt = runtime();
        let clock = rt.mount(Rc::new(Clock::new(&rt, &WidgetConfig::default())));
        assert!(clock.is_ticking());

        for n in 1..=3 {
            rt.advance(secs(1));
            assert_eq!(clock.display(), format!("9:00:0{n} AM"));
        }
        // interval ticks do not re-evaluate the widget in good mode
        assert_eq!(clock.evaluations(), 1);
    }

    #[test]
    fn unmount_cancels_the_interval() {
        let rt = runtime();
        let clock = rt.mount(Rc::new(Clock::new(&rt, &WidgetConfig::default())));
        rt.advance(secs(2));
        clock.unmount();

        assert_eq!(rt.timers().pending(), 0);
        let frozen = clock.time();
        rt.advance(secs(5));
        assert_eq!(clock.time(), frozen);
    }

    #[test]
    fn bad_mode_cancels_interval_and_leaks_one_shots() {
        let rt = runtime();
        let clock = rt.mount(Rc::new(Clock::new(&rt, &WidgetConfig::default())));

        clock.toggle_bad_mode();
        assert!(clock.is_bad_mode());
        assert!(!clock.is_ticking());
        assert_eq!(clock.leaked_timers(), 1);
        assert_eq!(rt.timers().pending(), 1);

        // each firing writes the time, re-evaluates, and schedules another
        rt.advance(secs(3));
        assert_eq!(clock.leaked_timers(), 4);
        assert_eq!(clock.display(), "9:00:03 AM");

        // any extra pass piles on another timer
        let time = clock.time.clone();
        time.set(clock.time());
        assert_eq!(rt.timers().pending(), 2);
    }

    #[test]
    fn leaving_bad_mode_restarts_the_interval() {
        let rt = runtime();
        let clock = rt.mount(Rc::new(Clock::new(&rt, &WidgetConfig::default())));
        clock.toggle_bad_mode();
        rt.advance(secs(2));
        let leaked = clock.leaked_timers();

        clock.toggle_bad_mode();
        assert!(clock.is_ticking());
        assert_eq!(clock.leaked_timers(), leaked);

        // the leaked one-shot still fires once, the interval keeps going
        rt.advance(secs(3));
        assert_eq!(clock.leaked_timers(), leaked);
        assert_eq!(rt.timers().pending(), 1);
        assert_eq!(clock.display(), "9:00:05 AM");
    }

    #[test]
    fn bad_mode_render_shows_counter() {
        let rt = runtime();
        let clock = rt.mount(Rc::new(Clock::new(&rt, &WidgetConfig::default())));
        clock.toggle_bad_mode();
        let text = clock.render().render_text();
        assert!(text.contains("Renders: 2"));
        assert!(text.contains("[Stop Bad Demo]<destructive>"));
    }
}
