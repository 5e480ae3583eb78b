//! Supplies checklist panel state

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolkitError};

/// Category value that disables filtering
pub const ALL_CATEGORIES: &str = "All";

/// A blank category means no filter
pub fn normalize_category(category: &str) -> &str {
    let category = category.trim();
    if category.is_empty() {
        ALL_CATEGORIES
    } else {
        category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Important,
    Helpful,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::Important, Priority::Helpful];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub priority: Priority,
    pub checked: bool,
}

impl ChecklistItem {
    fn seed(id: &str, name: &str, category: &str, priority: Priority, checked: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            priority,
            checked,
        }
    }
}

/// Fresh copy of the built-in kit list
pub fn seed_items() -> Vec<ChecklistItem> {
    use Priority::*;
    vec![
        ChecklistItem::seed("1", "Water (1 gallon per person per day)", "Water & Food", Critical, true),
        ChecklistItem::seed("2", "Non-perishable food (3-day supply)", "Water & Food", Critical, false),
        ChecklistItem::seed("3", "Battery-powered radio", "Communication", Critical, true),
        ChecklistItem::seed("4", "Flashlight with extra batteries", "Light & Power", Critical, true),
        ChecklistItem::seed("5", "First aid kit", "Medical", Critical, false),
        ChecklistItem::seed("6", "Extra batteries", "Light & Power", Important, false),
        ChecklistItem::seed("7", "Whistle for signaling help", "Communication", Important, true),
        ChecklistItem::seed("8", "Dust masks", "Medical", Important, false),
        ChecklistItem::seed("9", "Plastic sheeting and duct tape", "Shelter", Important, false),
        ChecklistItem::seed("10", "Moist towelettes", "Hygiene", Important, false),
        ChecklistItem::seed("11", "Manual can opener", "Tools", Helpful, false),
        ChecklistItem::seed("12", "Local maps", "Navigation", Helpful, false),
        ChecklistItem::seed("13", "Cell phone charger", "Communication", Helpful, true),
        ChecklistItem::seed("14", "Cash and coins", "Financial", Helpful, false),
        ChecklistItem::seed("15", "Emergency blanket", "Shelter", Helpful, false),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityProgress {
    pub priority: Priority,
    pub checked: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppliesState {
    pub items: Vec<ChecklistItem>,
    pub selected_category: String,
}

impl SuppliesState {
    pub fn new() -> Self {
        Self::with_items(seed_items())
    }

    pub fn with_items(items: Vec<ChecklistItem>) -> Self {
        Self {
            items,
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }

    /// Flip exactly the item with `id`
    pub fn toggle(&mut self, id: &str) -> Result<&ChecklistItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ToolkitError::UnknownItem(id.to_string()))?;
        item.checked = !item.checked;
        Ok(item)
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<&ChecklistItem> {
        let category = normalize_category(category);
        self.items
            .iter()
            .filter(|item| category == ALL_CATEGORIES || item.category == category)
            .collect()
    }

    /// Items under the currently selected category
    pub fn visible(&self) -> Vec<&ChecklistItem> {
        self.filter_by_category(&self.selected_category)
    }

    pub fn select_category(&mut self, category: &str) {
        self.selected_category = normalize_category(category).to_string();
    }

    /// "All" first, then every category in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    pub fn counts(&self, priority: Priority) -> (usize, usize) {
        self.items
            .iter()
            .filter(|item| item.priority == priority)
            .fold((0, 0), |(checked, total), item| {
                (checked + usize::from(item.checked), total + 1)
            })
    }

    /// Percentage of `priority` items checked; 0 when there are none
    pub fn progress_by_priority(&self, priority: Priority) -> f64 {
        match self.counts(priority) {
            (_, 0) => 0.0,
            (checked, total) => checked as f64 * 100.0 / total as f64,
        }
    }

    pub fn progress(&self) -> Vec<PriorityProgress> {
        Priority::ALL
            .iter()
            .map(|&priority| {
                let (checked, total) = self.counts(priority);
                PriorityProgress {
                    priority,
                    checked,
                    total,
                    percent: self.progress_by_priority(priority),
                }
            })
            .collect()
    }
}

impl Default for SuppliesState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_only_the_target() {
        let mut supplies = SuppliesState::new();
        for id in (1..=15).map(|i| i.to_string()) {
            let before = supplies.items.clone();
            supplies.toggle(&id).unwrap();
            for (old, new) in before.iter().zip(&supplies.items) {
                if old.id == id {
                    assert_ne!(old.checked, new.checked);
                } else {
                    assert_eq!(old, new);
                }
            }
            supplies.toggle(&id).unwrap();
            assert_eq!(before, supplies.items);
        }
    }

    #[test]
    fn toggle_unknown_id() {
        let mut supplies = SuppliesState::new();
        assert!(matches!(supplies.toggle("99"), Err(ToolkitError::UnknownItem(_))));
    }

    #[test]
    fn filter_by_category() {
        let supplies = SuppliesState::new();
        assert_eq!(supplies.filter_by_category(ALL_CATEGORIES).len(), 15);
        let comms = supplies.filter_by_category("Communication");
        assert_eq!(comms.len(), 3);
        assert!(comms.iter().all(|item| item.category == "Communication"));
        assert!(supplies.filter_by_category("Pets").is_empty());
    }

    #[test]
    fn blank_category_means_all() {
        let mut supplies = SuppliesState::new();
        assert_eq!(supplies.filter_by_category("").len(), 15);
        assert_eq!(supplies.filter_by_category("  ").len(), 15);
        supplies.select_category("");
        assert_eq!(supplies.selected_category, ALL_CATEGORIES);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let supplies = SuppliesState::new();
        assert_eq!(
            supplies.categories(),
            vec![
                "All",
                "Water & Food",
                "Communication",
                "Light & Power",
                "Medical",
                "Shelter",
                "Hygiene",
                "Tools",
                "Navigation",
                "Financial",
            ]
        );
    }

    #[test]
    fn progress_by_priority() {
        let mut supplies = SuppliesState::new();
        assert_eq!(supplies.progress_by_priority(Priority::Critical), 60.0);
        assert_eq!(supplies.progress_by_priority(Priority::Important), 20.0);
        assert_eq!(supplies.progress_by_priority(Priority::Helpful), 20.0);

        supplies.toggle("2").unwrap();
        supplies.toggle("5").unwrap();
        assert_eq!(supplies.progress_by_priority(Priority::Critical), 100.0);
    }

    #[test]
    fn progress_is_zero_without_items() {
        let supplies = SuppliesState::with_items(Vec::new());
        for priority in Priority::ALL {
            assert_eq!(supplies.progress_by_priority(priority), 0.0);
        }
    }
}
