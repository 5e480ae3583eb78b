//! Navigation panel: simulated compass plus a one-shot GPS fix

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::services::location::LocationFix;

pub const COMPASS_PERIOD: Duration = Duration::from_secs(1);

const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass name for a heading in degrees
pub fn direction_name(heading: u16) -> &'static str {
    let index = (f64::from(heading % 360) / 22.5).round() as usize % DIRECTIONS.len();
    DIRECTIONS[index]
}

/// Where the one-shot location request stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GpsStatus {
    Pending,
    Fixed { fix: LocationFix },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationState {
    pub heading: u16,
    pub gps: GpsStatus,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::with_heading(0)
    }

    pub fn with_heading(heading: u16) -> Self {
        Self {
            heading: heading % 360,
            gps: GpsStatus::Pending,
        }
    }

    /// Deterministic sweep, one degree per tick
    pub fn compass_tick(&mut self) -> u16 {
        self.heading = (self.heading + 1) % 360;
        self.heading
    }

    pub fn direction(&self) -> &'static str {
        direction_name(self.heading)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_wraps_modulo_360() {
        let mut nav = NavigationState::with_heading(358);
        for _ in 0..5 {
            nav.compass_tick();
        }
        assert_eq!(nav.heading, 3);
    }

    #[test]
    fn heading_after_n_ticks() {
        let mut nav = NavigationState::with_heading(123);
        for _ in 0..1_000 {
            nav.compass_tick();
        }
        assert_eq!(nav.heading, (123 + 1_000) % 360);
    }

    #[test]
    fn direction_names() {
        assert_eq!(direction_name(0), "N");
        assert_eq!(direction_name(45), "NE");
        assert_eq!(direction_name(180), "S");
        assert_eq!(direction_name(350), "N");
        assert_eq!(direction_name(293), "WNW");
    }
}
