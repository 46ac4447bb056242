use std::time::Duration;

use crate::error::HostError;

/// Tuning knobs for the per-window input state machine.
///
/// The defaults reproduce the classic desktop behaviour: a 200ms multi-click
/// window, a 250ms scroll momentum window and a 1.1 acceleration factor with
/// no ceiling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostConfig {
    /// Longest gap between two presses that still continues a click
    /// sequence.
    pub multi_click_interval: Duration,
    /// Longest gap between two wheel events that keeps the scroll velocity.
    pub scroll_reset_interval: Duration,
    pub scroll_acceleration: f64,
    /// Ceiling for the scroll velocity, unbounded when `None`.
    pub max_scroll_velocity: Option<f64>,
    /// Deliver the horizontal wheel axis too.
    pub horizontal_scroll: bool,
    pub pixels_per_line: f64,
    pub exit_on_last_window_closed: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            multi_click_interval: Duration::from_millis(200),
            scroll_reset_interval: Duration::from_millis(250),
            scroll_acceleration: 1.1,
            max_scroll_velocity: None,
            horizontal_scroll: false,
            pixels_per_line: 20.0,
            exit_on_last_window_closed: true,
        }
    }
}

impl HostConfig {
    /// Button presses further apart than this restart the click count at 1.
    pub fn multi_click_interval(mut self, interval: Duration) -> Self {
        self.multi_click_interval = interval;
        self
    }

    /// Wheel events further apart than this reset the scroll velocity.
    pub fn scroll_reset_interval(mut self, interval: Duration) -> Self {
        self.scroll_reset_interval = interval;
        self
    }

    /// Factor the scroll velocity is multiplied by on each accelerated event.
    pub fn scroll_acceleration(mut self, factor: f64) -> Self {
        self.scroll_acceleration = factor;
        self
    }

    /// Upper bound for the scroll velocity. `None` leaves it unbounded.
    pub fn max_scroll_velocity(mut self, max: Option<f64>) -> Self {
        self.max_scroll_velocity = max;
        self
    }

    /// Forward the horizontal wheel axis as well as the vertical one.
    pub fn horizontal_scroll(mut self, enabled: bool) -> Self {
        self.horizontal_scroll = enabled;
        self
    }

    /// How many pixels of a pixel-precise wheel delta make up one line.
    pub fn pixels_per_line(mut self, pixels: f64) -> Self {
        self.pixels_per_line = pixels;
        self
    }

    pub fn exit_on_last_window_closed(mut self, exit: bool) -> Self {
        self.exit_on_last_window_closed = exit;
        self
    }

    pub fn validate(&self) -> Result<(), HostError> {
        if !(self.scroll_acceleration >= 1.0) {
            return Err(HostError::InvalidConfig(format!(
                "scroll_acceleration must be at least 1.0, got {}",
                self.scroll_acceleration
            )));
        }
        if let Some(max) = self.max_scroll_velocity
            && !(max >= 1.0)
        {
            return Err(HostError::InvalidConfig(format!(
                "max_scroll_velocity must be at least 1.0, got {max}"
            )));
        }
        if !(self.pixels_per_line > 0.0) {
            return Err(HostError::InvalidConfig(format!(
                "pixels_per_line must be positive, got {}",
                self.pixels_per_line
            )));
        }
        Ok(())
    }
}
