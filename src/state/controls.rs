//! User actions on the mounted panel
//!
//! Each action checks that its panel is the one on screen, mutates that
//! panel's local state and starts or stops the panel's timers to match.

use tracing::info;

use super::{AppState, MountedPanel, View};
use crate::{
    error::{Result, ToolkitError},
    panels::{
        flashlight::{FlashlightState, LightMode, STROBE_PERIOD, TOGGLE_PULSE_MS},
        guide::{GuideState, GuideTopic},
        radio::{RadioState, SCAN_PERIOD},
        supplies::{ChecklistItem, SuppliesState},
        Panel,
    },
    services::sos::{spawn_sos, LOCATING, SOS_PULSE},
    tasks::panel_timers::{
        spawn_panel_ticker, spawn_sos_blinker, BLINK_TIMER, RADIO_SCAN_TIMER, SOS_TIMER,
    },
};

impl AppState {
    /// Run `f` against the mounted panel, provided `expected` is on screen
    fn with_panel<T, F>(&self, expected: View, action: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut MountedPanel) -> Option<Result<T>>,
    {
        let mut mounted = self.lock_mounted()?;
        let active = mounted.panel.view();
        if active != expected {
            return Err(ToolkitError::PanelNotActive { expected, active });
        }
        let result = f(&mut *mounted)
            .unwrap_or(Err(ToolkitError::PanelNotActive { expected, active }))?;
        drop(mounted);

        self.record_action(action);
        Ok(result)
    }

    // --- main view ---

    /// Fire the SOS flow: show the locating message now, finish in the background.
    /// A second trigger restarts the flow.
    pub fn trigger_sos(&self) -> Result<String> {
        self.with_panel(View::Main, "sos", |_| {
            // the locating message must land before the task can overwrite it
            match self.lock_shell() {
                Ok(mut shell) => shell.show_status(LOCATING),
                Err(e) => return Some(Err(e)),
            }
            match self.lock_shell_timers() {
                Ok(mut timers) => timers.start(SOS_TIMER, spawn_sos(self.weak())),
                Err(e) => return Some(Err(e)),
            }
            Some(Ok(()))
        })?;

        self.haptics.vibrate(&SOS_PULSE);
        info!("SOS triggered");
        Ok(LOCATING.to_string())
    }

    // --- flashlight ---

    pub fn toggle_flashlight(&self) -> Result<FlashlightState> {
        let light = self.with_flashlight("flashlight-toggle", |light| {
            light.toggle();
        })?;
        self.haptics.vibrate(&[TOGGLE_PULSE_MS]);
        info!("Flashlight {}", if light.on { "on" } else { "off" });
        Ok(light)
    }

    pub fn set_flashlight_mode(&self, mode: LightMode) -> Result<FlashlightState> {
        self.with_flashlight("flashlight-mode", |light| light.set_mode(mode))
    }

    pub fn set_flashlight_brightness(&self, brightness: u8) -> Result<FlashlightState> {
        self.with_flashlight("flashlight-brightness", |light| {
            light.set_brightness(brightness);
        })
    }

    fn with_flashlight<F>(&self, action: &str, f: F) -> Result<FlashlightState>
    where
        F: FnOnce(&mut FlashlightState),
    {
        let me = self.weak();
        self.with_panel(View::Flashlight, action, |mounted| {
            let MountedPanel { panel, epoch, timers } = mounted;
            let Panel::Flashlight(light) = panel else { return None };

            let was_blinking = light.is_blinking().then_some(light.mode);
            f(light);
            let now_blinking = light.is_blinking().then_some(light.mode);

            if was_blinking != now_blinking {
                match now_blinking {
                    Some(LightMode::Strobe) => timers.start(
                        BLINK_TIMER,
                        spawn_panel_ticker(me, *epoch, STROBE_PERIOD, |panel, _| {
                            if let Panel::Flashlight(light) = panel {
                                light.strobe_tick();
                            }
                        }),
                    ),
                    Some(LightMode::Sos) => timers.start(BLINK_TIMER, spawn_sos_blinker(me, *epoch)),
                    _ => {
                        timers.cancel(BLINK_TIMER);
                    }
                }
            }
            Some(Ok(light.clone()))
        })
    }

    // --- radio ---

    pub fn toggle_radio_power(&self) -> Result<RadioState> {
        self.with_radio("radio-power", |radio| {
            // switching off also ends a running scan
            if !radio.toggle_power() {
                radio.scanning = false;
            }
            Ok(())
        })
    }

    pub fn toggle_radio_scan(&self) -> Result<RadioState> {
        self.with_radio("radio-scan", |radio| {
            radio.toggle_scan();
            Ok(())
        })
    }

    pub fn set_radio_volume(&self, volume: u8) -> Result<RadioState> {
        self.with_radio("radio-volume", |radio| {
            radio.set_volume(volume);
            Ok(())
        })
    }

    pub fn tune_radio(&self, frequency: f64) -> Result<RadioState> {
        self.with_radio("radio-tune", |radio| {
            radio.tune(frequency);
            Ok(())
        })
    }

    pub fn select_radio_channel(&self, index: usize) -> Result<RadioState> {
        self.with_radio("radio-channel", |radio| radio.select_channel(index).map(|_| ()))
    }

    fn with_radio<F>(&self, action: &str, f: F) -> Result<RadioState>
    where
        F: FnOnce(&mut RadioState) -> Result<()>,
    {
        let me = self.weak();
        self.with_panel(View::Radio, action, |mounted| {
            let MountedPanel { panel, epoch, timers } = mounted;
            let Panel::Radio(radio) = panel else { return None };

            let was_scanning = radio.scanning;
            if let Err(e) = f(radio) {
                return Some(Err(e));
            }

            match (was_scanning, radio.scanning) {
                (false, true) => {
                    info!("Radio scan started");
                    timers.start(
                        RADIO_SCAN_TIMER,
                        spawn_panel_ticker(me, *epoch, SCAN_PERIOD, |panel, rng| {
                            if let Panel::Radio(radio) = panel {
                                radio.scan_tick(rng);
                            }
                        }),
                    );
                }
                (true, false) => {
                    info!("Radio scan stopped");
                    timers.cancel(RADIO_SCAN_TIMER);
                }
                _ => {}
            }
            Some(Ok(radio.clone()))
        })
    }

    // --- supplies ---

    pub fn toggle_supply(&self, id: &str) -> Result<ChecklistItem> {
        self.with_supplies("supplies-toggle", |supplies| supplies.toggle(id).cloned())
    }

    pub fn select_supply_category(&self, category: &str) -> Result<Vec<ChecklistItem>> {
        self.with_supplies("supplies-category", |supplies| {
            supplies.select_category(category);
            Ok(supplies.visible().into_iter().cloned().collect())
        })
    }

    /// Snapshot of the mounted checklist
    pub fn supplies(&self) -> Result<SuppliesState> {
        let mounted = self.lock_mounted()?;
        match &mounted.panel {
            Panel::Supplies(supplies) => Ok(supplies.clone()),
            other => Err(ToolkitError::PanelNotActive {
                expected: View::Supplies,
                active: other.view(),
            }),
        }
    }

    fn with_supplies<T, F>(&self, action: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut SuppliesState) -> Result<T>,
    {
        self.with_panel(View::Supplies, action, |mounted| match &mut mounted.panel {
            Panel::Supplies(supplies) => Some(f(supplies)),
            _ => None,
        })
    }

    // --- survival manual and first aid ---

    pub fn select_topic(&self, view: View, id: &str) -> Result<&'static GuideTopic> {
        self.with_guide(view, "guide-topic", |guide| guide.select_topic(id))
    }

    pub fn close_topic(&self, view: View) -> Result<()> {
        self.with_guide(view, "guide-close", |guide| {
            guide.close_topic();
            Ok(())
        })
    }

    fn with_guide<T, F>(&self, view: View, action: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut GuideState) -> Result<T>,
    {
        self.with_panel(view, action, |mounted| match &mut mounted.panel {
            Panel::Survival(guide) | Panel::FirstAid(guide) => Some(f(guide)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        services::{
            sos::{DISPATCHED, LOCATING},
            LocationFix, LogHaptics, NoLocation, RecordingHaptics, StaticLocation,
        },
        state::Settings,
    };

    fn app() -> Arc<AppState> {
        AppState::new(Settings::default(), Arc::new(NoLocation), Arc::new(LogHaptics))
    }

    #[tokio::test]
    async fn actions_require_their_panel() {
        let state = app();
        assert!(matches!(
            state.toggle_flashlight(),
            Err(ToolkitError::PanelNotActive { expected: View::Flashlight, active: View::Main })
        ));
        state.navigate(View::Radio).unwrap();
        assert!(matches!(state.trigger_sos(), Err(ToolkitError::PanelNotActive { .. })));
        assert!(matches!(
            state.select_topic(View::Survival, "fire"),
            Err(ToolkitError::PanelNotActive { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn scan_timer_stops_when_toggled_off() {
        let state = app();
        state.navigate(View::Radio).unwrap();
        let radio = state.toggle_radio_scan().unwrap();
        assert!(radio.on && radio.scanning);
        assert_eq!(state.running_timers().unwrap(), vec![RADIO_SCAN_TIMER]);

        let radio = state.toggle_radio_power().unwrap();
        assert!(!radio.on && !radio.scanning);
        assert!(state.running_timers().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn strobe_blinks_and_stops() {
        let state = app();
        state.navigate(View::Flashlight).unwrap();
        state.set_flashlight_mode(LightMode::Strobe).unwrap();
        assert!(state.running_timers().unwrap().is_empty());

        let light = state.toggle_flashlight().unwrap();
        assert!(light.lit);
        assert_eq!(state.running_timers().unwrap(), vec![BLINK_TIMER]);

        tokio::time::sleep(Duration::from_millis(250)).await;
        let (_, view) = state.render().unwrap();
        let rendered = serde_json::to_value(view).unwrap();
        assert_eq!(rendered["lit"], false);

        state.set_flashlight_mode(LightMode::Steady).unwrap();
        assert!(state.running_timers().unwrap().is_empty());
    }

    #[tokio::test]
    async fn flashlight_toggle_vibrates() {
        let haptics = Arc::new(RecordingHaptics::default());
        let state = AppState::new(Settings::default(), Arc::new(NoLocation), haptics.clone());
        state.navigate(View::Flashlight).unwrap();
        state.toggle_flashlight().unwrap();
        assert_eq!(haptics.pulses(), vec![vec![TOGGLE_PULSE_MS]]);
    }

    #[tokio::test]
    async fn guides_select_topics() {
        let state = app();
        state.navigate(View::FirstAid).unwrap();
        assert_eq!(state.select_topic(View::FirstAid, "burns").unwrap().title, "Burns");
        assert!(matches!(
            state.select_topic(View::FirstAid, "fire"),
            Err(ToolkitError::UnknownTopic(_))
        ));
        state.close_topic(View::FirstAid).unwrap();
    }

    fn lit(state: &AppState) -> bool {
        match &state.lock_mounted().unwrap().panel {
            Panel::Flashlight(light) => light.lit,
            other => panic!("flashlight not mounted: {:?}", other.view()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sos_blinker_follows_morse_timing() {
        let state = app();
        state.navigate(View::Flashlight).unwrap();
        state.toggle_flashlight().unwrap();
        state.set_flashlight_mode(LightMode::Sos).unwrap();
        assert_eq!(state.running_timers().unwrap(), vec![BLINK_TIMER]);

        // (sample at ms, expected lit): three dots, a dash, then the pause and restart
        let samples = [
            (100, true),
            (300, false),
            (500, true),
            (1_100, false),
            (1_300, true),
            (1_700, true),
            (1_900, false),
            (4_500, true),
            (4_700, false),
            (5_900, false),
            (6_100, true),
        ];
        let mut elapsed = 0;
        for (at, expected) in samples {
            tokio::time::sleep(Duration::from_millis(at - elapsed)).await;
            elapsed = at;
            assert_eq!(lit(&state), expected, "at {at}ms");
        }

        let light = state.toggle_flashlight().unwrap();
        assert!(!light.lit);
        assert!(state.running_timers().unwrap().is_empty());
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!lit(&state));

        state.toggle_flashlight().unwrap();
        assert_eq!(state.running_timers().unwrap(), vec![BLINK_TIMER]);
        state.back().unwrap();
        assert!(state.running_timers().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sos_finishes_after_leaving_main() {
        let fix = LocationFix {
            latitude: 51.5074,
            longitude: -0.1278,
            altitude: 11.0,
            accuracy: 6.0,
        };
        let location = StaticLocation::new(fix).with_latency(Duration::from_secs(2));
        let state = AppState::new(Settings::default(), Arc::new(location), Arc::new(LogHaptics));

        assert_eq!(state.trigger_sos().unwrap(), LOCATING);
        state.navigate(View::Radio).unwrap();
        assert_eq!(state.running_shell_timers().unwrap(), vec![SOS_TIMER]);
        state.back().unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        let status = state.get_shell_state().unwrap().status;
        assert_eq!(status.as_deref(), Some(DISPATCHED));
        assert!(state.running_shell_timers().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_sos_flow() {
        let location = StaticLocation::new(LocationFix {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            accuracy: 1.0,
        })
        .with_latency(Duration::from_secs(2));
        let state = AppState::new(Settings::default(), Arc::new(location), Arc::new(LogHaptics));

        state.trigger_sos().unwrap();
        state.shutdown().unwrap();
        assert!(state.running_shell_timers().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let status = state.get_shell_state().unwrap().status;
        assert_eq!(status.as_deref(), Some(LOCATING));
    }
}
