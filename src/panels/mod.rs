//! Panel state holders
//!
//! Each panel owns its own local state. A panel is created fresh when its
//! view is mounted and dropped when the shell navigates away, so nothing
//! survives a round trip through `main`.

pub mod contacts;
pub mod flashlight;
pub mod guide;
pub mod navigation;
pub mod radio;
pub mod supplies;
pub mod weather;

use serde::Serialize;

use crate::state::View;
use contacts::{Contact, Feature, CONTACTS, FEATURES, QUICK_ACTIONS};
use flashlight::FlashlightState;
use guide::{GuideState, GuideTopic};
use navigation::NavigationState;
use radio::{Channel, RadioState, CHANNELS};
use supplies::{ChecklistItem, PriorityProgress, SuppliesState};
use weather::{ForecastSlot, WeatherSample, WeatherState};

pub use flashlight::LightMode;
pub use supplies::Priority;

const LIVE_BROADCAST: &str = "...National Weather Service has issued a severe weather warning \
for your area. Seek immediate shelter and monitor emergency channels for updates...";

/// The mounted panel and its local state
#[derive(Debug, Clone)]
pub enum Panel {
    Main,
    Survival(GuideState),
    Flashlight(FlashlightState),
    Radio(RadioState),
    FirstAid(GuideState),
    Weather(WeatherState),
    Supplies(SuppliesState),
    Navigation(NavigationState),
}

impl Panel {
    /// Fresh state for `view`
    pub fn mount(view: View) -> Self {
        match view {
            View::Main => Panel::Main,
            View::Survival => Panel::Survival(GuideState::survival()),
            View::Flashlight => Panel::Flashlight(FlashlightState::new()),
            View::Radio => Panel::Radio(RadioState::new()),
            View::FirstAid => Panel::FirstAid(GuideState::first_aid()),
            View::Weather => Panel::Weather(WeatherState::default()),
            View::Supplies => Panel::Supplies(SuppliesState::new()),
            View::Navigation => Panel::Navigation(NavigationState::new()),
        }
    }

    pub fn view(&self) -> View {
        match self {
            Panel::Main => View::Main,
            Panel::Survival(_) => View::Survival,
            Panel::Flashlight(_) => View::Flashlight,
            Panel::Radio(_) => View::Radio,
            Panel::FirstAid(_) => View::FirstAid,
            Panel::Weather(_) => View::Weather,
            Panel::Supplies(_) => View::Supplies,
            Panel::Navigation(_) => View::Navigation,
        }
    }

    pub fn render(&self) -> PanelView {
        match self {
            Panel::Main => PanelView::Main {
                features: &FEATURES,
                quick_actions: &QUICK_ACTIONS,
                contacts: &CONTACTS,
            },
            Panel::Survival(guide) | Panel::FirstAid(guide) => PanelView::Guide {
                title: if matches!(self, Panel::Survival(_)) {
                    "Survival Manual"
                } else {
                    "First Aid Guide"
                },
                topics: guide
                    .topics()
                    .iter()
                    .map(|topic| TopicSummary { id: topic.id, title: topic.title })
                    .collect(),
                selected: guide.selected_topic(),
            },
            Panel::Flashlight(light) => PanelView::Flashlight { state: light.clone() },
            Panel::Radio(radio) => PanelView::Radio {
                state: radio.clone(),
                channel: radio.current_channel(),
                broadcast: radio.on.then_some(LIVE_BROADCAST),
                channels: &CHANNELS,
            },
            Panel::Weather(weather) => PanelView::Weather {
                sample: weather.sample.clone(),
                alert: weather.alert_text(),
                recommendations: weather.sample.recommendations(),
                forecast: weather.sample.forecast(),
            },
            Panel::Supplies(supplies) => PanelView::Supplies {
                categories: supplies.categories().into_iter().map(str::to_string).collect(),
                selected_category: supplies.selected_category.clone(),
                items: supplies.visible().into_iter().cloned().collect(),
                progress: supplies.progress(),
            },
            Panel::Navigation(nav) => PanelView::Navigation {
                direction: nav.direction(),
                state: nav.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub id: &'static str,
    pub title: &'static str,
}

/// What a panel looks like to the rendering surface
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum PanelView {
    Main {
        features: &'static [Feature],
        quick_actions: &'static [Feature],
        contacts: &'static [Contact],
    },
    Guide {
        title: &'static str,
        topics: Vec<TopicSummary>,
        selected: Option<&'static GuideTopic>,
    },
    Flashlight {
        #[serde(flatten)]
        state: FlashlightState,
    },
    Radio {
        #[serde(flatten)]
        state: RadioState,
        channel: Option<&'static Channel>,
        broadcast: Option<&'static str>,
        channels: &'static [Channel],
    },
    Weather {
        sample: WeatherSample,
        alert: Option<&'static str>,
        recommendations: Vec<&'static str>,
        forecast: Vec<ForecastSlot>,
    },
    Supplies {
        categories: Vec<String>,
        selected_category: String,
        items: Vec<ChecklistItem>,
        progress: Vec<PriorityProgress>,
    },
    Navigation {
        #[serde(flatten)]
        state: NavigationState,
        direction: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_matches_view() {
        for view in View::ALL {
            assert_eq!(Panel::mount(view).view(), view);
        }
    }

    #[test]
    fn radio_broadcast_only_when_on() {
        let mut panel = Panel::mount(View::Radio);
        let rendered = serde_json::to_value(panel.render()).unwrap();
        assert!(rendered["broadcast"].is_null());
        assert_eq!(rendered["panel"], "radio");

        if let Panel::Radio(radio) = &mut panel {
            radio.toggle_power();
        }
        let rendered = serde_json::to_value(panel.render()).unwrap();
        assert!(rendered["broadcast"].is_string());
        assert_eq!(rendered["channel"]["name"], "NOAA Weather 7");
    }

    #[test]
    fn supplies_render_respects_filter() {
        let mut panel = Panel::mount(View::Supplies);
        if let Panel::Supplies(supplies) = &mut panel {
            supplies.select_category("Medical");
        }
        let rendered = serde_json::to_value(panel.render()).unwrap();
        assert_eq!(rendered["items"].as_array().unwrap().len(), 2);
        assert_eq!(rendered["progress"].as_array().unwrap().len(), 3);
    }
}
