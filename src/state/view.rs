//! The closed set of views the shell can display

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

/// Exactly one view is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Main,
    Survival,
    Flashlight,
    Radio,
    FirstAid,
    Weather,
    Supplies,
    Navigation,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Main,
        View::Survival,
        View::Flashlight,
        View::Radio,
        View::FirstAid,
        View::Weather,
        View::Supplies,
        View::Navigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Main => "main",
            View::Survival => "survival",
            View::Flashlight => "flashlight",
            View::Radio => "radio",
            View::FirstAid => "firstaid",
            View::Weather => "weather",
            View::Supplies => "supplies",
            View::Navigation => "navigation",
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, View::Main)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .iter()
            .copied()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| ToolkitError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_view_name() {
        for view in View::ALL {
            assert_eq!(view.as_str().parse::<View>().unwrap(), view);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!("settings".parse::<View>(), Err(ToolkitError::UnknownView(_))));
    }

    #[test]
    fn serializes_first_aid_without_separator() {
        assert_eq!(serde_json::to_string(&View::FirstAid).unwrap(), "\"firstaid\"");
    }
}
