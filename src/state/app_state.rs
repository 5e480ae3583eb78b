//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{BatteryState, ShellState, View};
use crate::{
    error::{Result, ToolkitError},
    panels::{navigation, weather, Panel, PanelView},
    services::{location::DEFAULT_LOCATE_TIMEOUT, Haptics, LocationProvider},
    tasks::panel_timers::{
        spawn_gps_fix, spawn_panel_ticker, Timers, COMPASS_TIMER, GPS_TIMER, WEATHER_ALERT_TIMER,
        WEATHER_TIMER,
    },
};

/// Runtime knobs that do not change after startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub initial_battery: f64,
    pub power_save: bool,
    pub locate_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_battery: 85.0,
            power_save: false,
            locate_timeout: DEFAULT_LOCATE_TIMEOUT,
        }
    }
}

/// The panel currently on screen, its mount generation and its timers
#[derive(Debug)]
pub struct MountedPanel {
    pub panel: Panel,
    /// Bumped on every navigation; tasks compare against it before writing
    pub epoch: u64,
    pub timers: Timers,
}

impl MountedPanel {
    fn new(panel: Panel, epoch: u64) -> Self {
        Self {
            panel,
            epoch,
            timers: Timers::new(),
        }
    }
}

/// Main application state: the shell plus whichever panel is mounted
pub struct AppState {
    me: Weak<AppState>,
    /// View selector, status line and battery
    pub shell_state: Arc<Mutex<ShellState>>,
    /// Local state of the mounted panel. Lock this before `shell_state` when both are needed.
    pub mounted: Arc<Mutex<MountedPanel>>,
    /// Tasks owned by the shell itself; they survive navigation. Locked last.
    shell_timers: Arc<Mutex<Timers>>,
    pub settings: Settings,
    pub location: Arc<dyn LocationProvider>,
    pub haptics: Arc<dyn Haptics>,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Power-save flag for the battery monitor
    pub power_save_tx: watch::Sender<bool>,
    /// Keep the receiver alive to prevent channel closure
    pub _power_save_rx: watch::Receiver<bool>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("shell_state", &self.shell_state)
            .field("mounted", &self.mounted)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create the shell on the main view
    pub fn new(
        settings: Settings,
        location: Arc<dyn LocationProvider>,
        haptics: Arc<dyn Haptics>,
    ) -> Arc<Self> {
        let battery = BatteryState::new(settings.initial_battery, settings.power_save);
        let (power_save_tx, power_save_rx) = watch::channel(battery.power_save);

        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            shell_state: Arc::new(Mutex::new(ShellState::new(battery))),
            mounted: Arc::new(Mutex::new(MountedPanel::new(Panel::Main, 0))),
            shell_timers: Arc::new(Mutex::new(Timers::new())),
            settings,
            location,
            haptics,
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            power_save_tx,
            _power_save_rx: power_save_rx,
        })
    }

    pub(crate) fn weak(&self) -> Weak<AppState> {
        self.me.clone()
    }

    pub(crate) fn lock_shell(&self) -> Result<MutexGuard<'_, ShellState>> {
        self.shell_state
            .lock()
            .map_err(|_| ToolkitError::StateLock("shell state"))
    }

    pub(crate) fn lock_mounted(&self) -> Result<MutexGuard<'_, MountedPanel>> {
        self.mounted
            .lock()
            .map_err(|_| ToolkitError::StateLock("mounted panel"))
    }

    pub(crate) fn lock_shell_timers(&self) -> Result<MutexGuard<'_, Timers>> {
        self.shell_timers
            .lock()
            .map_err(|_| ToolkitError::StateLock("shell timers"))
    }

    /// Show `view`, tearing down the previous panel and its timers.
    /// Navigating to the view that is already shown keeps its state.
    pub fn navigate(&self, view: View) -> Result<ShellState> {
        let mut mounted = self.lock_mounted()?;

        if mounted.panel.view() != view {
            let epoch = mounted.epoch + 1;
            let mut fresh = MountedPanel::new(Panel::mount(view), epoch);
            self.start_mount_timers(&mut fresh);

            let previous = std::mem::replace(&mut *mounted, fresh);
            debug!(
                "Unmounted {} (timers: {:?})",
                previous.panel.view(),
                previous.timers.running()
            );
            drop(previous);
        }

        let shell = {
            let mut shell = self.lock_shell()?;
            shell.view = view;
            shell.clone()
        };
        drop(mounted);

        info!("Navigated to {}", view);
        self.record_action(&format!("navigate:{}", view));
        Ok(shell)
    }

    /// Every panel's back action lands on main
    pub fn back(&self) -> Result<ShellState> {
        self.navigate(View::Main)
    }

    pub fn current_view(&self) -> Result<View> {
        Ok(self.lock_shell()?.view)
    }

    fn start_mount_timers(&self, mounted: &mut MountedPanel) {
        let epoch = mounted.epoch;
        match mounted.panel.view() {
            View::Weather => {
                mounted.timers.start(
                    WEATHER_TIMER,
                    spawn_panel_ticker(self.weak(), epoch, weather::SAMPLE_PERIOD, |panel, rng| {
                        if let Panel::Weather(w) = panel {
                            w.sample_tick(rng);
                        }
                    }),
                );
                mounted.timers.start(
                    WEATHER_ALERT_TIMER,
                    spawn_panel_ticker(self.weak(), epoch, weather::ALERT_PERIOD, |panel, rng| {
                        if let Panel::Weather(w) = panel {
                            w.alert_tick(rng);
                        }
                    }),
                );
            }
            View::Navigation => {
                mounted.timers.start(
                    COMPASS_TIMER,
                    spawn_panel_ticker(self.weak(), epoch, navigation::COMPASS_PERIOD, |panel, _| {
                        if let Panel::Navigation(nav) = panel {
                            nav.compass_tick();
                        }
                    }),
                );
                mounted
                    .timers
                    .start(GPS_TIMER, spawn_gps_fix(self.weak(), epoch));
            }
            _ => {}
        }
    }

    /// Apply `f` to the mounted panel if it is still the one mounted at `epoch`.
    /// Returns false when that panel has been dismissed.
    pub fn with_mounted_epoch<F>(&self, epoch: u64, f: F) -> bool
    where
        F: FnOnce(&mut Panel),
    {
        match self.lock_mounted() {
            Ok(mut mounted) if mounted.epoch == epoch => {
                f(&mut mounted.panel);
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Set the status line from a background task
    pub fn post_status(&self, message: impl Into<String>) -> bool {
        match self.lock_shell() {
            Ok(mut shell) => {
                let message = message.into();
                info!("Status: {}", message);
                shell.show_status(message);
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    pub fn set_power_save(&self, enabled: bool) -> Result<BatteryState> {
        let battery = {
            let mut shell = self.lock_shell()?;
            shell.battery.power_save = enabled;
            shell.battery.clone()
        };

        if let Err(e) = self.power_save_tx.send(enabled) {
            warn!("Failed to send power-save update: {}", e);
        }

        info!("Power save {}", if enabled { "enabled" } else { "disabled" });
        self.record_action(if enabled { "power-save-on" } else { "power-save-off" });
        Ok(battery)
    }

    /// One battery monitor tick
    pub fn drain_battery(&self) -> Result<BatteryState> {
        let mut shell = self.lock_shell()?;
        let level = shell.battery.drain();
        debug!("Battery at {:.1}%", level);
        Ok(shell.battery.clone())
    }

    pub fn get_shell_state(&self) -> Result<ShellState> {
        Ok(self.lock_shell()?.clone())
    }

    /// Shell state and the mounted panel, read under one lock order
    pub fn render(&self) -> Result<(ShellState, PanelView)> {
        let mounted = self.lock_mounted()?;
        let shell = self.lock_shell()?.clone();
        Ok((shell, mounted.panel.render()))
    }

    /// Names of the mounted panel's live timers
    pub fn running_timers(&self) -> Result<Vec<&'static str>> {
        Ok(self.lock_mounted()?.timers.running())
    }

    /// Names of the shell's live tasks (the SOS flow)
    pub fn running_shell_timers(&self) -> Result<Vec<&'static str>> {
        Ok(self.lock_shell_timers()?.running())
    }

    /// Stop every task: the shell's own and the mounted panel's
    pub fn shutdown(&self) -> Result<()> {
        self.lock_shell_timers()?.cancel_all();
        self.back()?;
        Ok(())
    }

    pub(crate) fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{LogHaptics, NoLocation};

    fn app() -> Arc<AppState> {
        AppState::new(Settings::default(), Arc::new(NoLocation), Arc::new(LogHaptics))
    }

    #[tokio::test]
    async fn back_always_returns_to_main() {
        let state = app();
        for view in View::ALL {
            state.navigate(view).unwrap();
            assert_eq!(state.current_view().unwrap(), view);
            let shell = state.back().unwrap();
            assert_eq!(shell.view, View::Main);
        }
    }

    #[tokio::test]
    async fn navigation_resets_panel_state() {
        let state = app();
        state.navigate(View::Supplies).unwrap();
        state.toggle_supply("2").unwrap();
        state.back().unwrap();
        state.navigate(View::Supplies).unwrap();

        let mounted = state.lock_mounted().unwrap();
        let Panel::Supplies(supplies) = &mounted.panel else { panic!("supplies not mounted") };
        assert!(!supplies.items[1].checked);
    }

    #[tokio::test]
    async fn renavigating_to_same_view_keeps_state() {
        let state = app();
        state.navigate(View::Supplies).unwrap();
        state.toggle_supply("2").unwrap();
        state.navigate(View::Supplies).unwrap();

        let mounted = state.lock_mounted().unwrap();
        let Panel::Supplies(supplies) = &mounted.panel else { panic!("supplies not mounted") };
        assert!(supplies.items[1].checked);
    }

    #[tokio::test]
    async fn stale_epoch_cannot_write() {
        let state = app();
        state.navigate(View::Navigation).unwrap();
        let stale = state.lock_mounted().unwrap().epoch;
        state.back().unwrap();

        assert!(!state.with_mounted_epoch(stale, |_| {}));
        assert!(state.with_mounted_epoch(stale + 1, |_| {}));
    }

    #[tokio::test]
    async fn timers_follow_the_mounted_panel() {
        let state = app();
        state.navigate(View::Weather).unwrap();
        assert_eq!(state.running_timers().unwrap(), vec![WEATHER_TIMER, WEATHER_ALERT_TIMER]);

        state.navigate(View::Navigation).unwrap();
        assert!(state.running_timers().unwrap().contains(&COMPASS_TIMER));

        state.back().unwrap();
        assert!(state.running_timers().unwrap().is_empty());
    }

    #[test]
    fn power_save_is_broadcast() {
        let state = AppState::new(Settings::default(), Arc::new(NoLocation), Arc::new(LogHaptics));
        let rx = state.power_save_tx.subscribe();
        let battery = state.set_power_save(true).unwrap();
        assert!(battery.power_save);
        assert!(*rx.borrow());
    }
}
