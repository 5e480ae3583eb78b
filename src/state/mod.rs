//! State management module
//!
//! The shell owns the current view, the status line and the battery; the
//! mounted panel owns its own local state and timers.

pub mod app_state;
pub mod battery;
pub mod controls;
pub mod shell_state;
pub mod view;

// Re-export main types
pub use app_state::{AppState, MountedPanel, Settings};
pub use battery::{BatteryBand, BatteryState};
pub use shell_state::ShellState;
pub use view::View;
