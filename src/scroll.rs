use std::time::Instant;

use peniko::kurbo::Vec2;

use crate::config::HostConfig;

/// Turns raw wheel deltas into accelerated scroll deltas.
///
/// Consecutive wheel events in the same direction speed up by a constant
/// factor. A pause longer than the reset interval or a change of direction
/// on either axis drops back to the base velocity of 1.0. Nothing decays in
/// the background; the velocity only changes when an event arrives.
#[derive(Debug)]
pub struct ScrollMomentum {
    scroll_start: Option<Instant>,
    velocity: f64,
    direction: Vec2,
}

impl Default for ScrollMomentum {
    fn default() -> Self {
        Self {
            scroll_start: None,
            velocity: 1.0,
            direction: Vec2::ZERO,
        }
    }
}

impl ScrollMomentum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Feed one raw wheel delta observed at `time` and return the delta to
    /// deliver.
    pub fn scroll(&mut self, delta: Vec2, time: Instant, config: &HostConfig) -> Vec2 {
        let elapsed = self
            .scroll_start
            .map(|start| time.saturating_duration_since(start));
        self.scroll_start = Some(time);

        let reset = elapsed.is_none_or(|elapsed| elapsed > config.scroll_reset_interval)
            || (self.direction.x > 0.0) != (delta.x > 0.0)
            || (self.direction.y > 0.0) != (delta.y > 0.0);
        self.direction = delta;

        if reset {
            self.velocity = 1.0;
        } else {
            self.velocity *= config.scroll_acceleration;
            if let Some(max) = config.max_scroll_velocity {
                self.velocity = self.velocity.min(max);
            }
        }

        delta * self.velocity
    }
}
