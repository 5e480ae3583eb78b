//! Location-fix providers

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Upper bound on how long a fix request may take
pub const DEFAULT_LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Metres
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location request timed out")]
    Timeout,
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("location services not supported")]
    Unsupported,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request a single fix
    async fn current_fix(&self) -> Result<LocationFix, LocationError>;
}

/// Always reports the same fix, optionally after a simulated delay
#[derive(Debug, Clone)]
pub struct StaticLocation {
    fix: LocationFix,
    latency: Duration,
}

impl StaticLocation {
    pub fn new(fix: LocationFix) -> Self {
        Self { fix, latency: Duration::ZERO }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn current_fix(&self) -> Result<LocationFix, LocationError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        Ok(self.fix)
    }
}

/// A device without location services
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_fix(&self) -> Result<LocationFix, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// A provider that always refuses, e.g. permission was denied
#[derive(Debug, Clone)]
pub struct FailingLocation(pub LocationError);

#[async_trait]
impl LocationProvider for FailingLocation {
    async fn current_fix(&self) -> Result<LocationFix, LocationError> {
        Err(self.0.clone())
    }
}

/// Ask `provider` for a fix, giving up after `limit`
pub async fn locate_with_timeout(
    provider: &dyn LocationProvider,
    limit: Duration,
) -> Result<LocationFix, LocationError> {
    match timeout(limit, provider.current_fix()).await {
        Ok(Ok(fix)) => {
            debug!("Location fix: {:.4}, {:.4}", fix.latitude, fix.longitude);
            Ok(fix)
        }
        Ok(Err(e)) => {
            warn!("Location request failed: {}", e);
            Err(e)
        }
        Err(_) => {
            warn!("Location request timed out after {:?}", limit);
            Err(LocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix() -> LocationFix {
        LocationFix { latitude: 47.6062, longitude: -122.3321, altitude: 56.0, accuracy: 12.0 }
    }

    #[tokio::test(start_paused = true)]
    async fn fast_provider_succeeds() {
        let provider = StaticLocation::new(fix()).with_latency(Duration::from_secs(2));
        let result = locate_with_timeout(&provider, DEFAULT_LOCATE_TIMEOUT).await;
        assert_eq!(result, Ok(fix()));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let provider = StaticLocation::new(fix()).with_latency(Duration::from_secs(30));
        let result = locate_with_timeout(&provider, DEFAULT_LOCATE_TIMEOUT).await;
        assert_eq!(result, Err(LocationError::Timeout));
    }

    #[tokio::test]
    async fn failures_pass_through() {
        assert_eq!(
            locate_with_timeout(&NoLocation, DEFAULT_LOCATE_TIMEOUT).await,
            Err(LocationError::Unsupported)
        );
        let denied = FailingLocation(LocationError::PermissionDenied);
        assert_eq!(
            locate_with_timeout(&denied, DEFAULT_LOCATE_TIMEOUT).await,
            Err(LocationError::PermissionDenied)
        );
    }
}
