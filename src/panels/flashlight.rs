//! Flashlight panel state

use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

pub const STROBE_PERIOD: Duration = Duration::from_millis(200);
pub const MIN_BRIGHTNESS: u8 = 10;
pub const MAX_BRIGHTNESS: u8 = 100;
/// Haptic pulse fired on every on/off toggle
pub const TOGGLE_PULSE_MS: u64 = 50;

const DOT_MS: u64 = 200;
const DASH_MS: u64 = 600;
const GAP_MS: u64 = 200;
const WORD_PAUSE_MS: u64 = 1400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightMode {
    Steady,
    Strobe,
    Sos,
}

impl FromStr for LightMode {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steady" => Ok(LightMode::Steady),
            "strobe" => Ok(LightMode::Strobe),
            "sos" => Ok(LightMode::Sos),
            other => Err(ToolkitError::InvalidMode(other.to_string())),
        }
    }
}

/// One step of a blink pattern: whether the light is lit, and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkStep {
    pub lit: bool,
    pub duration: Duration,
}

/// `... --- ...` followed by a pause before the pattern repeats
pub fn sos_pattern() -> Vec<BlinkStep> {
    let symbols = [DOT_MS, DOT_MS, DOT_MS, DASH_MS, DASH_MS, DASH_MS, DOT_MS, DOT_MS, DOT_MS];
    let mut steps = Vec::with_capacity(symbols.len() * 2);
    for (i, on) in symbols.iter().enumerate() {
        steps.push(BlinkStep { lit: true, duration: Duration::from_millis(*on) });
        let off = if i + 1 == symbols.len() { WORD_PAUSE_MS } else { GAP_MS };
        steps.push(BlinkStep { lit: false, duration: Duration::from_millis(off) });
    }
    steps
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashlightState {
    pub on: bool,
    pub mode: LightMode,
    pub brightness: u8,
    /// Whether the emitter is lit right now (differs from `on` while blinking)
    pub lit: bool,
    #[serde(skip)]
    sos_step: usize,
}

impl FlashlightState {
    pub fn new() -> Self {
        Self {
            on: false,
            mode: LightMode::Steady,
            brightness: MAX_BRIGHTNESS,
            lit: false,
            sos_step: 0,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.reset_phase();
        self.on
    }

    pub fn set_mode(&mut self, mode: LightMode) {
        self.mode = mode;
        self.reset_phase();
    }

    pub fn set_brightness(&mut self, brightness: u8) -> u8 {
        self.brightness = brightness.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
        self.brightness
    }

    /// Whether a blink timer should be running
    pub fn is_blinking(&self) -> bool {
        self.on && self.mode != LightMode::Steady
    }

    pub fn strobe_tick(&mut self) {
        self.lit = !self.lit;
    }

    /// Advance to the next SOS step and return how long it lasts
    pub fn sos_tick(&mut self, pattern: &[BlinkStep]) -> Duration {
        self.sos_step = (self.sos_step + 1) % pattern.len();
        let step = pattern[self.sos_step];
        self.lit = step.lit;
        step.duration
    }

    fn reset_phase(&mut self) {
        self.sos_step = 0;
        self.lit = self.on;
    }
}

impl Default for FlashlightState {
    fn default() -> Self {
        Self::new()
    }
}
