//! Emergency radio panel state

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolkitError};

pub const SCAN_PERIOD: Duration = Duration::from_millis(1500);
pub const MIN_FREQUENCY: f64 = 88.1;
pub const MAX_FREQUENCY: f64 = 162.6;
pub const DEFAULT_FREQUENCY: f64 = 162.550;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Channel {
    pub frequency: f64,
    pub name: &'static str,
    pub kind: &'static str,
}

pub static CHANNELS: [Channel; 9] = [
    Channel { frequency: 162.400, name: "NOAA Weather 1", kind: "Weather Alert" },
    Channel { frequency: 162.425, name: "NOAA Weather 2", kind: "Weather Alert" },
    Channel { frequency: 162.450, name: "NOAA Weather 3", kind: "Weather Alert" },
    Channel { frequency: 162.475, name: "NOAA Weather 4", kind: "Weather Alert" },
    Channel { frequency: 162.500, name: "NOAA Weather 5", kind: "Weather Alert" },
    Channel { frequency: 162.525, name: "NOAA Weather 6", kind: "Weather Alert" },
    Channel { frequency: 162.550, name: "NOAA Weather 7", kind: "Weather Alert" },
    Channel { frequency: 121.500, name: "Aviation Emergency", kind: "Emergency" },
    Channel { frequency: 156.800, name: "Marine Emergency", kind: "Emergency" },
];

fn channel_index(frequency: f64) -> Option<usize> {
    CHANNELS
        .iter()
        .position(|ch| (ch.frequency - frequency).abs() < 1e-6)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioState {
    pub on: bool,
    pub scanning: bool,
    pub volume: u8,
    pub frequency: f64,
    pub signal_strength: u8,
}

impl RadioState {
    pub fn new() -> Self {
        Self {
            on: false,
            scanning: false,
            volume: 50,
            frequency: DEFAULT_FREQUENCY,
            signal_strength: 3,
        }
    }

    pub fn toggle_power(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Starting a scan also powers the radio on
    pub fn toggle_scan(&mut self) -> bool {
        self.scanning = !self.scanning;
        if !self.on {
            self.on = true;
        }
        self.scanning
    }

    pub fn set_volume(&mut self, volume: u8) -> u8 {
        self.volume = volume.min(100);
        self.volume
    }

    pub fn tune(&mut self, frequency: f64) -> f64 {
        self.frequency = frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.frequency
    }

    pub fn select_channel(&mut self, index: usize) -> Result<&'static Channel> {
        let channel = CHANNELS.get(index).ok_or(ToolkitError::UnknownChannel(index))?;
        self.frequency = channel.frequency;
        if !self.on {
            self.on = true;
        }
        Ok(channel)
    }

    pub fn current_channel(&self) -> Option<&'static Channel> {
        channel_index(self.frequency).map(|i| &CHANNELS[i])
    }

    pub fn current_index(&self) -> Option<usize> {
        channel_index(self.frequency)
    }

    /// Hop to the next channel in the list, wrapping, and re-roll the signal
    pub fn scan_tick<R: Rng>(&mut self, rng: &mut R) -> usize {
        let next = self.current_index().map_or(0, |i| (i + 1) % CHANNELS.len());
        self.frequency = CHANNELS[next].frequency;
        self.signal_strength = rng.gen_range(1..=5);
        next
    }
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn scan_lands_on_expected_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut radio = RadioState::new();
        let initial = radio.current_index().unwrap();
        for k in 1..=25 {
            let index = radio.scan_tick(&mut rng);
            assert_eq!(index, (initial + k) % CHANNELS.len());
            assert!((1..=5).contains(&radio.signal_strength));
        }
    }

    #[test]
    fn off_list_frequency_scans_to_first_channel() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut radio = RadioState::new();
        radio.tune(100.0);
        assert!(radio.current_channel().is_none());
        assert_eq!(radio.scan_tick(&mut rng), 0);
    }

    #[test]
    fn scanning_and_channel_select_power_on() {
        let mut radio = RadioState::new();
        assert!(radio.toggle_scan());
        assert!(radio.on);

        let mut radio = RadioState::new();
        let channel = radio.select_channel(7).unwrap();
        assert_eq!(channel.name, "Aviation Emergency");
        assert!(radio.on);
        assert!(matches!(radio.select_channel(9), Err(ToolkitError::UnknownChannel(9))));
    }

    #[test]
    fn tuner_and_volume_are_bounded() {
        let mut radio = RadioState::new();
        assert_eq!(radio.tune(50.0), MIN_FREQUENCY);
        assert_eq!(radio.tune(200.0), MAX_FREQUENCY);
        assert_eq!(radio.set_volume(180), 100);
    }
}
