//! Configuration and CLI argument handling

use std::{sync::Arc, time::Duration};

use clap::Parser;

use crate::{
    services::{LocationFix, LocationProvider, NoLocation, StaticLocation},
    state::Settings,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "onetap-sos")]
#[command(about = "An emergency toolkit shell with simulated telemetry")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20911")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial battery level in percent
    #[arg(short, long, default_value = "85")]
    pub battery: f64,

    /// Start with power save enabled
    #[arg(long)]
    pub power_save: bool,

    /// Latitude of the simulated location fix (location services are off without it)
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude of the simulated location fix
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Altitude of the simulated fix in metres
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub altitude: f64,

    /// Accuracy of the simulated fix in metres
    #[arg(long, default_value = "10")]
    pub accuracy: f64,

    /// Simulated delay before the fix is reported, in milliseconds
    #[arg(long, default_value = "0")]
    pub locate_latency_ms: u64,

    /// Give up on a location fix after this many seconds
    #[arg(long, default_value = "10")]
    pub locate_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            initial_battery: self.battery,
            power_save: self.power_save,
            locate_timeout: Duration::from_secs(self.locate_timeout_secs),
        }
    }

    /// The configured fix, if both coordinates were given
    pub fn location_fix(&self) -> Option<LocationFix> {
        Some(LocationFix {
            latitude: self.latitude?,
            longitude: self.longitude?,
            altitude: self.altitude,
            accuracy: self.accuracy,
        })
    }

    pub fn location_provider(&self) -> Arc<dyn LocationProvider> {
        match self.location_fix() {
            Some(fix) => Arc::new(
                StaticLocation::new(fix)
                    .with_latency(Duration::from_millis(self.locate_latency_ms)),
            ),
            None => Arc::new(NoLocation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["onetap-sos"]);
        assert_eq!(config.address(), "0.0.0.0:20911");
        assert_eq!(config.log_level(), "info");
        assert!(config.location_fix().is_none());

        let settings = config.settings();
        assert_eq!(settings.initial_battery, 85.0);
        assert_eq!(settings.locate_timeout, Duration::from_secs(10));
    }

    #[test]
    fn coordinates_build_a_fix() {
        let config = Config::parse_from([
            "onetap-sos",
            "--latitude",
            "-33.8688",
            "--longitude",
            "151.2093",
            "-v",
        ]);
        let fix = config.location_fix().unwrap();
        assert_eq!(fix.latitude, -33.8688);
        assert_eq!(fix.longitude, 151.2093);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn latitude_requires_longitude() {
        assert!(Config::try_parse_from(["onetap-sos", "--latitude", "10"]).is_err());
    }
}
