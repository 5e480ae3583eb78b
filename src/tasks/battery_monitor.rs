//! Battery drain background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

/// How often the simulated battery drains
pub const BATTERY_PERIOD: Duration = Duration::from_secs(30);

/// Background task that drains the root shell's battery.
/// A power-save change restarts the period, like re-arming a fresh interval.
pub async fn battery_monitor_task(state: Arc<AppState>) {
    info!("Starting battery monitor task");

    let mut power_save_rx = state.power_save_tx.subscribe();
    let mut interval = interval_at(Instant::now() + BATTERY_PERIOD, BATTERY_PERIOD);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.drain_battery() {
                    Ok(battery) => debug!("Battery drained to {:.1}% (power save: {})",
                                          battery.level, battery.power_save),
                    Err(e) => error!("Failed to drain battery: {}", e),
                }
            }

            changed = power_save_rx.changed() => {
                if changed.is_err() {
                    info!("Power-save channel closed, stopping battery monitor");
                    break;
                }
                let enabled = *power_save_rx.borrow_and_update();
                debug!("Power save changed to {}, restarting battery interval", enabled);
                interval = interval_at(Instant::now() + BATTERY_PERIOD, BATTERY_PERIOD);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{LogHaptics, NoLocation},
        state::Settings,
    };

    #[tokio::test(start_paused = true)]
    async fn drains_once_per_period() {
        let state = AppState::new(Settings::default(), Arc::new(NoLocation), Arc::new(LogHaptics));
        let monitor = tokio::spawn(battery_monitor_task(Arc::clone(&state)));

        tokio::time::sleep(BATTERY_PERIOD * 3 + Duration::from_secs(1)).await;
        let level = state.get_shell_state().unwrap().battery.level;
        assert!((level - 84.4).abs() < 1e-9, "level = {level}");

        monitor.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn power_save_slows_the_drain() {
        let state = AppState::new(Settings::default(), Arc::new(NoLocation), Arc::new(LogHaptics));
        let monitor = tokio::spawn(battery_monitor_task(Arc::clone(&state)));

        state.set_power_save(true).unwrap();
        tokio::time::sleep(BATTERY_PERIOD * 2 + Duration::from_secs(1)).await;
        let level = state.get_shell_state().unwrap().battery.level;
        assert!((level - 84.8).abs() < 1e-9, "level = {level}");

        monitor.abort();
    }
}
