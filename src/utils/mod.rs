//! Utility functions module
//!
//! Process-level helpers that sit outside the shell itself.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
