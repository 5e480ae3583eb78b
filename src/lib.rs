//! OneTap SOS - An emergency toolkit shell with simulated telemetry
//!
//! The shell routes between a fixed set of panels (flashlight, radio, weather,
//! supplies, navigation, survival manual, first aid). Every "live" reading is
//! simulated by timers owned by the panel on screen.

pub mod api;
pub mod config;
pub mod error;
pub mod panels;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::ToolkitError;
pub use state::{AppState, View};
pub use utils::signals::shutdown_signal;
