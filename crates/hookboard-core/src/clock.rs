use chrono::{DateTime, Local, TimeDelta};

use crate::Timers;

/// Wall-clock source for timestamps shown to the user.
pub trait Clock: 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Clone)]
pub struct FixedClock(pub DateTime<Local>);
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// `start` plus the virtual time elapsed on a timer queue, so timestamps move
/// in step with `Timers::advance`.
#[derive(Clone)]
pub struct VirtualClock {
    pub start: DateTime<Local>,
    pub timers: Timers,
}
impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Local> {
        let elapsed = TimeDelta::from_std(self.timers.elapsed()).unwrap_or_else(|_| TimeDelta::zero());
        self.start + elapsed
    }
}

/// 12-hour time of day, e.g. `3:04:05 PM`.
pub fn format_time(t: &DateTime<Local>) -> String {
    t.format("%-I:%M:%S %p").to_string()
}

/// Date and time, e.g. `1/2/2026, 3:04:05 PM`.
pub fn format_date_time(t: &DateTime<Local>) -> String {
    t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn afternoon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 2, 15, 4, 5)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn formats_like_a_locale_clock() {
        let t = afternoon();
        assert_eq!(format_time(&t), "3:04:05 PM");
        assert_eq!(format_date_time(&t), "1/2/2026, 3:04:05 PM");
    }

    #[test]
    fn virtual_clock_follows_timers() {
        let timers = Timers::new();
        let clock = VirtualClock {
            start: afternoon(),
            timers: timers.clone(),
        };
        timers.advance(Duration::from_secs(2));
        assert_eq!(format_time(&clock.now()), "3:04:07 PM");
    }
}
