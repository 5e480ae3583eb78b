//! Emergency contacts and the main-view feature grid

use serde::Serialize;

use crate::state::View;

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub id: &'static str,
    pub name: &'static str,
    pub relationship: &'static str,
    pub phone: &'static str,
    pub avatar: &'static str,
}

pub static CONTACTS: [Contact; 3] = [
    Contact {
        id: "1",
        name: "Sarah Johnson",
        relationship: "Emergency Contact",
        phone: "+1 (555) 123-4567",
        avatar: "avatars/sarah-johnson.jpg",
    },
    Contact {
        id: "2",
        name: "Dr. Mike Chen",
        relationship: "Family Doctor",
        phone: "+1 (555) 987-6543",
        avatar: "avatars/mike-chen.jpg",
    },
    Contact {
        id: "3",
        name: "Local Emergency",
        relationship: "911 Service",
        phone: "911",
        avatar: "avatars/emergency-badge.jpg",
    },
];

/// A tile on the main view that navigates to a panel
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub label: &'static str,
    pub view: View,
    pub description: &'static str,
}

pub static FEATURES: [Feature; 6] = [
    Feature {
        label: "Flashlight",
        view: View::Flashlight,
        description: "High-intensity LED with SOS patterns",
    },
    Feature {
        label: "Emergency Radio",
        view: View::Radio,
        description: "Weather alerts & emergency broadcasts",
    },
    Feature {
        label: "First Aid",
        view: View::FirstAid,
        description: "Medical emergency protocols",
    },
    Feature {
        label: "Weather Monitor",
        view: View::Weather,
        description: "Real-time weather & alerts",
    },
    Feature {
        label: "Supply Kit",
        view: View::Supplies,
        description: "Emergency supplies checklist",
    },
    Feature {
        label: "Navigation",
        view: View::Navigation,
        description: "Compass & offline maps",
    },
];

/// Shortcut buttons below the grid
pub static QUICK_ACTIONS: [Feature; 2] = [
    Feature {
        label: "Survival Guide",
        view: View::Survival,
        description: "Shelter, water, fire and signaling",
    },
    Feature {
        label: "Quick Light",
        view: View::Flashlight,
        description: "Jump straight to the flashlight",
    },
];
