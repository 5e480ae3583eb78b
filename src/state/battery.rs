//! Simulated battery owned by the root shell

use serde::{Deserialize, Serialize};

/// Lowest level the simulated drain will reach
pub const BATTERY_FLOOR: f64 = 10.0;
/// Drain per tick with power save off
pub const NORMAL_DRAIN: f64 = 0.2;
/// Drain per tick with power save on
pub const POWER_SAVE_DRAIN: f64 = 0.1;

/// Coarse charge band used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryBand {
    Good,
    Low,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryState {
    pub level: f64,
    pub power_save: bool,
}

impl BatteryState {
    pub fn new(level: f64, power_save: bool) -> Self {
        Self {
            level: level.clamp(BATTERY_FLOOR, 100.0),
            power_save,
        }
    }

    /// Drain for one tick. Never increases, never goes below the floor.
    pub fn drain(&mut self) -> f64 {
        let rate = if self.power_save { POWER_SAVE_DRAIN } else { NORMAL_DRAIN };
        // keep one decimal so repeated ticks do not accumulate float noise
        let next = ((self.level - rate) * 10.0).round() / 10.0;
        self.level = next.max(BATTERY_FLOOR).min(self.level);
        self.level
    }

    pub fn band(&self) -> BatteryBand {
        if self.level > 50.0 {
            BatteryBand::Good
        } else if self.level > 20.0 {
            BatteryBand::Low
        } else {
            BatteryBand::Critical
        }
    }
}

impl Default for BatteryState {
    fn default() -> Self {
        Self::new(85.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_ticks_from_85() {
        let mut battery = BatteryState::new(85.0, false);
        for _ in 0..3 {
            battery.drain();
        }
        assert!((battery.level - 84.4).abs() < 1e-9);
    }

    #[test]
    fn power_save_halves_the_rate() {
        let mut battery = BatteryState::new(50.0, true);
        battery.drain();
        battery.drain();
        assert!((battery.level - 49.8).abs() < 1e-9);
    }

    #[test]
    fn never_drops_below_floor_and_never_rises() {
        let mut battery = BatteryState::new(10.3, false);
        let mut previous = battery.level;
        for _ in 0..20 {
            let level = battery.drain();
            assert!(level <= previous);
            assert!(level >= BATTERY_FLOOR);
            previous = level;
        }
        assert_eq!(battery.level, BATTERY_FLOOR);
    }

    #[test]
    fn bands() {
        assert_eq!(BatteryState::new(85.0, false).band(), BatteryBand::Good);
        assert_eq!(BatteryState::new(50.0, false).band(), BatteryBand::Low);
        assert_eq!(BatteryState::new(20.0, false).band(), BatteryBand::Critical);
    }
}
