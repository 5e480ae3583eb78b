//! One-tap SOS flow
//!
//! Purely local: it reports progress through the shell's status line and
//! never retries or waits for delivery.

use std::{sync::Weak, time::Duration};

use tokio::{task::JoinHandle, time::sleep};
use tracing::{info, warn};

use crate::{
    services::location::{locate_with_timeout, LocationError, LocationFix},
    state::AppState,
};

/// Vibration played when SOS is triggered
pub const SOS_PULSE: [u64; 5] = [200, 100, 200, 100, 200];
/// Delay between the alert and the dispatch confirmation
pub const DISPATCH_DELAY: Duration = Duration::from_secs(3);

pub const LOCATING: &str = "Detecting precise location...";
pub const DISPATCHED: &str =
    "Emergency services & contacts notified. Help dispatched. Stay calm & visible.";
pub const LOCATION_UNAVAILABLE: &str =
    "Location unavailable. Emergency alert sent with device info. Help is coming!";
pub const NO_LOCATION_SERVICES: &str =
    "Emergency alert sent! Help has been notified and is on the way.";

pub fn alert_sent(fix: &LocationFix) -> String {
    format!(
        "EMERGENCY ALERT SENT! Location: {:.4}, {:.4}",
        fix.latitude, fix.longitude
    )
}

/// Second half of the SOS flow, after the locating message has been shown.
/// The task belongs to the shell, so it runs to completion whatever view is on screen.
pub fn spawn_sos(state: Weak<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some((provider, limit)) = state
            .upgrade()
            .map(|s| (s.location.clone(), s.settings.locate_timeout))
        else {
            return;
        };

        let outcome = locate_with_timeout(provider.as_ref(), limit).await;
        let Some(app) = state.upgrade() else { return };

        match outcome {
            Ok(fix) => {
                info!("SOS alert sent with location {:.4}, {:.4}", fix.latitude, fix.longitude);
                if !app.post_status(alert_sent(&fix)) {
                    return;
                }
                drop(app);

                sleep(DISPATCH_DELAY).await;
                if let Some(app) = state.upgrade() {
                    app.post_status(DISPATCHED);
                }
            }
            Err(LocationError::Unsupported) => {
                warn!("SOS sent without location services");
                app.post_status(NO_LOCATION_SERVICES);
            }
            Err(e) => {
                warn!("SOS sent in degraded mode: {}", e);
                app.post_status(LOCATION_UNAVAILABLE);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_message_rounds_to_four_decimals() {
        let fix = LocationFix {
            latitude: 40.712776,
            longitude: -74.005974,
            altitude: 10.0,
            accuracy: 5.0,
        };
        assert_eq!(
            alert_sent(&fix),
            "EMERGENCY ALERT SENT! Location: 40.7128, -74.0060"
        );
    }
}
