//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    panels::PanelView,
    state::{BatteryBand, BatteryState, ShellState, View},
};

pub const APP_TITLE: &str = "OneTap SOS";
pub const APP_TAGLINE: &str = "Complete Emergency Survival Toolkit";
pub const FOOTER: &str = "OneTap SOS. Emergency toolkit for life-critical situations.";

/// Response for user actions
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub view: View,
    pub result: T,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn ok(view: View, result: T) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            view,
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    pub tagline: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            tagline: APP_TAGLINE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryResponse {
    pub level: f64,
    pub power_save: bool,
    pub band: BatteryBand,
}

impl From<&BatteryState> for BatteryResponse {
    fn from(battery: &BatteryState) -> Self {
        Self {
            level: battery.level,
            power_save: battery.power_save,
            band: battery.band(),
        }
    }
}

/// The whole rendered shell: header, the routed panel and, on main, the footer
#[derive(Debug, Clone, Serialize)]
pub struct ShellResponse {
    pub header: Header,
    pub view: View,
    pub panel: PanelView,
    pub status: Option<String>,
    pub battery: BatteryResponse,
    pub footer: Option<&'static str>,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl ShellResponse {
    pub fn new(
        shell: ShellState,
        panel: PanelView,
        last_action: Option<String>,
        last_action_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            header: Header::default(),
            view: shell.view,
            panel,
            footer: shell.view.is_main().then_some(FOOTER),
            battery: BatteryResponse::from(&shell.battery),
            status: shell.status,
            last_action,
            last_action_time,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PowerSaveRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrightnessRequest {
    pub brightness: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TuneRequest {
    pub frequency: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}
