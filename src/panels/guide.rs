//! Read-only topic guides: the survival manual and the first aid guide

use serde::Serialize;

use crate::error::{Result, ToolkitError};

#[derive(Debug, Serialize)]
pub struct GuideTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub priority: &'static str,
    pub steps: &'static [&'static str],
    pub tips: &'static [&'static str],
}

pub static SURVIVAL_TOPICS: [GuideTopic; 4] = [
    GuideTopic {
        id: "shelter",
        title: "Emergency Shelter",
        priority: "Find or build shelter within 3 hours in harsh conditions",
        steps: &[
            "Look for natural shelters: caves, rock overhangs, dense trees",
            "Build lean-to: prop large branch against tree, cover with smaller branches",
            "Create insulation layer with leaves, grass, or pine needles",
            "Ensure shelter is large enough for you plus insulation",
            "Block wind and create heat reflection with materials",
            "Signal for help by making shelter visible from air",
        ],
        tips: &[
            "Location matters: avoid low areas that collect water",
            "Face opening away from prevailing wind",
            "Insulation is critical - cold ground steals body heat",
        ],
    },
    GuideTopic {
        id: "water",
        title: "Water Procurement",
        priority: "Find water within 3 days maximum",
        steps: &[
            "Look for natural sources: streams, springs, rain collection",
            "Dig for water in dry creek beds or low-lying areas",
            "Collect dew with cloth in early morning",
            "Purify all water: boil for 1 minute, use purification tablets, or filter",
            "Store clean water in multiple containers",
            "Ration wisely: 1 gallon per person per day minimum",
        ],
        tips: &[
            "Clear, moving water is generally safer than stagnant",
            "Avoid water with algae, strong odor, or dead animals nearby",
            "Melted snow/ice requires 2x more fuel than liquid water",
        ],
    },
    GuideTopic {
        id: "fire",
        title: "Fire Making",
        priority: "Essential for warmth, cooking, signaling, and morale",
        steps: &[
            "Gather tinder: dry grass, paper, birch bark, steel wool",
            "Collect kindling: pencil-thick dry twigs and small branches",
            "Prepare fuel wood: various sizes from thumb to wrist thick",
            "Create fire lay: tinder nest, kindling teepee, fuel wood ready",
            "Ignite tinder with matches, lighter, or friction method",
            "Gradually feed larger materials as fire establishes",
        ],
        tips: &[
            "Prepare all materials before lighting - fires die quickly",
            "Build fire in safe location away from overhanging branches",
            "Three fires in triangle shape signals distress",
        ],
    },
    GuideTopic {
        id: "signaling",
        title: "Rescue Signaling",
        priority: "Critical for rescue - be visible and audible",
        steps: &[
            "Use mirror or shiny object to reflect sunlight toward aircraft",
            "Create large ground signals: rocks, logs, bright clothing",
            "Make three of anything: fires, rock piles, whistle blasts",
            "Use bright colors that contrast with environment",
            "Conserve energy - signal when you hear/see potential rescuers",
        ],
        tips: &[
            "International distress signal is three of anything",
            "Smoke during day, fire/light during night",
            "Stay near your signal area once established",
        ],
    },
];

pub static FIRST_AID_TOPICS: [GuideTopic; 4] = [
    GuideTopic {
        id: "cpr",
        title: "CPR",
        priority: "Start immediately if the person is unresponsive and not breathing",
        steps: &[
            "Check the scene is safe and call emergency services",
            "Place the heel of your hand on the center of the chest",
            "Push hard and fast: 2 inches deep, 100-120 compressions per minute",
            "Give 2 rescue breaths after every 30 compressions if trained",
            "Continue until help arrives or the person starts breathing",
        ],
        tips: &["Use an AED as soon as one is available"],
    },
    GuideTopic {
        id: "bleeding",
        title: "Severe Bleeding",
        priority: "Stop the bleeding before anything else",
        steps: &[
            "Apply firm, direct pressure with a clean cloth",
            "Do not remove soaked cloth; add more layers on top",
            "Raise the wound above heart level if possible",
            "Apply a tourniquet above the wound for uncontrolled limb bleeding",
        ],
        tips: &["Note the time a tourniquet was applied"],
    },
    GuideTopic {
        id: "burns",
        title: "Burns",
        priority: "Cool the burn as quickly as possible",
        steps: &[
            "Cool under running water for at least 10 minutes",
            "Remove rings or tight items before swelling starts",
            "Cover loosely with a sterile, non-stick dressing",
        ],
        tips: &["Never apply ice, butter, or ointments to a burn"],
    },
    GuideTopic {
        id: "choking",
        title: "Choking",
        priority: "Act fast if the person cannot cough, speak, or breathe",
        steps: &[
            "Give 5 firm back blows between the shoulder blades",
            "Give 5 abdominal thrusts just above the navel",
            "Alternate until the object is expelled or the person becomes unresponsive",
            "Begin CPR if the person becomes unresponsive",
        ],
        tips: &["For pregnant or large persons, use chest thrusts instead"],
    },
];

/// Topic list with at most one topic opened
#[derive(Debug, Clone, Serialize)]
pub struct GuideState {
    #[serde(skip)]
    topics: &'static [GuideTopic],
    pub selected: Option<&'static str>,
}

impl GuideState {
    pub fn new(topics: &'static [GuideTopic]) -> Self {
        Self { topics, selected: None }
    }

    pub fn survival() -> Self {
        Self::new(&SURVIVAL_TOPICS)
    }

    pub fn first_aid() -> Self {
        Self::new(&FIRST_AID_TOPICS)
    }

    pub fn topics(&self) -> &'static [GuideTopic] {
        self.topics
    }

    pub fn select_topic(&mut self, id: &str) -> Result<&'static GuideTopic> {
        let topic = self
            .topics
            .iter()
            .find(|topic| topic.id == id)
            .ok_or_else(|| ToolkitError::UnknownTopic(id.to_string()))?;
        self.selected = Some(topic.id);
        Ok(topic)
    }

    pub fn close_topic(&mut self) {
        self.selected = None;
    }

    pub fn selected_topic(&self) -> Option<&'static GuideTopic> {
        let id = self.selected?;
        self.topics.iter().find(|topic| topic.id == id)
    }
}
