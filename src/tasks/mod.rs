//! Background tasks module
//!
//! The battery monitor runs for the life of the server; panel timers live
//! only as long as the panel that started them.

pub mod battery_monitor;
pub mod panel_timers;

// Re-export main functions
pub use battery_monitor::battery_monitor_task;
pub use panel_timers::Timers;
