//! External collaborators and the SOS flow
//!
//! Location fixes and haptics sit behind traits so the shell never depends on
//! real hardware.

pub mod haptics;
pub mod location;
pub mod sos;

// Re-export main types
pub use haptics::{Haptics, LogHaptics, RecordingHaptics};
pub use location::{
    locate_with_timeout, FailingLocation, LocationError, LocationFix, LocationProvider,
    NoLocation, StaticLocation,
};
