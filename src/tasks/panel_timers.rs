//! Periodic work owned by a mounted panel

use std::{collections::HashMap, sync::Weak, time::Duration};

use rand::{rngs::StdRng, SeedableRng};
use tokio::{
    task::JoinHandle,
    time::{interval_at, sleep, Instant},
};
use tracing::debug;

use crate::{
    panels::{flashlight::sos_pattern, navigation::GpsStatus, Panel},
    services::location::locate_with_timeout,
    state::AppState,
};

pub const WEATHER_TIMER: &str = "weather";
pub const WEATHER_ALERT_TIMER: &str = "weather-alert";
pub const COMPASS_TIMER: &str = "compass";
pub const GPS_TIMER: &str = "gps";
pub const RADIO_SCAN_TIMER: &str = "radio-scan";
pub const BLINK_TIMER: &str = "blink";
pub const SOS_TIMER: &str = "sos";

/// Named background tasks belonging to one mounted panel.
/// Dropping the group aborts every task in it.
#[derive(Debug, Default)]
pub struct Timers {
    handles: HashMap<&'static str, JoinHandle<()>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under `name`, aborting whatever ran there before
    pub fn start(&mut self, name: &'static str, handle: JoinHandle<()>) {
        if let Some(previous) = self.handles.insert(name, handle) {
            debug!("Replacing timer {}", name);
            previous.abort();
        }
    }

    pub fn cancel(&mut self, name: &str) -> bool {
        match self.handles.remove(name) {
            Some(handle) => {
                debug!("Cancelling timer {}", name);
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (name, handle) in self.handles.drain() {
            debug!("Cancelling timer {}", name);
            handle.abort();
        }
    }

    /// Names of the tasks that are still alive
    pub fn running(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .handles
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Run `on_tick` against the mounted panel every `period`, first tick after one period.
/// The task exits once the panel mounted at `epoch` is gone.
pub fn spawn_panel_ticker<F>(
    state: Weak<AppState>,
    epoch: u64,
    period: Duration,
    mut on_tick: F,
) -> JoinHandle<()>
where
    F: FnMut(&mut Panel, &mut StdRng) + Send + 'static,
{
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            interval.tick().await;

            let Some(app) = state.upgrade() else { break };
            let alive = app.with_mounted_epoch(epoch, |panel| on_tick(panel, &mut rng));
            if !alive {
                debug!("Panel at epoch {} unmounted, ticker exiting", epoch);
                break;
            }
        }
    })
}

/// Blink the flashlight through the SOS pattern until cancelled
pub fn spawn_sos_blinker(state: Weak<AppState>, epoch: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let pattern = sos_pattern();
        let mut wait = pattern[0].duration;

        loop {
            sleep(wait).await;

            let Some(app) = state.upgrade() else { break };
            let mut next = None;
            let alive = app.with_mounted_epoch(epoch, |panel| {
                if let Panel::Flashlight(light) = panel {
                    next = Some(light.sos_tick(&pattern));
                }
            });
            match (alive, next) {
                (true, Some(duration)) => wait = duration,
                _ => break,
            }
        }
    })
}

/// Request the navigation panel's GPS fix once
pub fn spawn_gps_fix(state: Weak<AppState>, epoch: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some((provider, limit)) = state
            .upgrade()
            .map(|s| (s.location.clone(), s.settings.locate_timeout))
        else {
            return;
        };

        let status = match locate_with_timeout(provider.as_ref(), limit).await {
            Ok(fix) => GpsStatus::Fixed { fix },
            Err(e) => GpsStatus::Unavailable { reason: e.to_string() },
        };

        if let Some(app) = state.upgrade() {
            app.with_mounted_epoch(epoch, |panel| {
                if let Panel::Navigation(nav) = panel {
                    nav.gps = status;
                }
            });
        }
    })
}
