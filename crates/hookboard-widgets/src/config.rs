use std::time::Duration;

use serde::Deserialize;

/// Timing constants, thresholds, and storage keys for the dashboard widgets.
///
/// Every field has a default, so a config file only needs the values it
/// overrides:
///
/// ```rust
/// use hookboard_widgets::WidgetConfig;
///
/// let cfg: WidgetConfig = serde_json::from_str(r#"{ "fetch_delay_ms": 250 }"#).unwrap();
/// assert_eq!(cfg.fetch_delay().as_millis(), 250);
/// assert_eq!(cfg.error_threshold, 0.7);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub tick_interval_ms: u64,
    pub bad_timer_delay_ms: u64,
    pub fetch_delay_ms: u64,
    /// Draws above this value make the simulated fetch fail.
    pub error_threshold: f64,
    pub submit_delay_ms: u64,
    pub notes_key: String,
    pub theme_key: String,
    /// Notes longer than this many characters count as "long".
    pub long_note_chars: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            bad_timer_delay_ms: 1000,
            fetch_delay_ms: 1000,
            error_threshold: 0.7,
            submit_delay_ms: 1000,
            notes_key: "tutorial-notes".into(),
            theme_key: "theme".into(),
            long_note_chars: 10,
        }
    }
}

impl WidgetConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn bad_timer_delay(&self) -> Duration {
        Duration::from_millis(self.bad_timer_delay_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
