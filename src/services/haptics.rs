//! Haptic feedback triggers

use std::sync::Mutex;

use tracing::info;

/// Fire-and-forget vibration. `pattern` alternates on/off durations in ms.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern: &[u64]);
}

/// Logs the pattern instead of driving a motor
#[derive(Debug, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn vibrate(&self, pattern: &[u64]) {
        info!("Haptic pulse: {:?}", pattern);
    }
}

/// Keeps every pattern it was asked to play
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: Mutex<Vec<Vec<u64>>>,
}

impl RecordingHaptics {
    pub fn pulses(&self) -> Vec<Vec<u64>> {
        self.pulses.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, pattern: &[u64]) {
        if let Ok(mut pulses) = self.pulses.lock() {
            pulses.push(pattern.to_vec());
        }
    }
}
