//! Root-owned shell state

use serde::{Deserialize, Serialize};

use super::{BatteryState, View};

/// State owned by the root shell: the view selector, the status line and the battery.
/// Panels only ever see this read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellState {
    pub view: View,
    /// Latest status message, if anything has been reported yet
    pub status: Option<String>,
    pub battery: BatteryState,
}

impl ShellState {
    pub fn new(battery: BatteryState) -> Self {
        Self {
            view: View::Main,
            status: None,
            battery,
        }
    }

    pub fn show_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(BatteryState::default())
    }
}
