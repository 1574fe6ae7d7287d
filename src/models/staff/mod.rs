// Staff module
// Read-only roster of bookable staff members

use serde::{Deserialize, Serialize};

/// A bookable staff member. The roster is provided by the backend and never
/// mutated from this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub display_name: String,
}

impl Staff {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Restricts which appointments populate the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StaffFilter {
    /// Show every staff member's appointments.
    #[default]
    All,
    /// Show only appointments assigned to this staff id.
    One(String),
}

impl StaffFilter {
    pub fn matches(&self, staff_id: &str) -> bool {
        match self {
            StaffFilter::All => true,
            StaffFilter::One(id) => id == staff_id,
        }
    }

    pub fn label<'a>(&self, roster: &'a [Staff]) -> &'a str {
        match self {
            StaffFilter::All => "All staff",
            StaffFilter::One(id) => roster
                .iter()
                .find(|s| &s.id == id)
                .map(|s| s.display_name.as_str())
                .unwrap_or("Unknown staff"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_everyone() {
        assert!(StaffFilter::All.matches("staff-1"));
        assert!(StaffFilter::All.matches("anything"));
    }

    #[test]
    fn test_one_matches_only_that_id() {
        let filter = StaffFilter::One("staff-1".to_string());
        assert!(filter.matches("staff-1"));
        assert!(!filter.matches("staff-2"));
    }

    #[test]
    fn test_label_falls_back_for_dangling_id() {
        let roster = vec![Staff::new("staff-1", "Ana")];
        let filter = StaffFilter::One("staff-9".to_string());
        assert_eq!(filter.label(&roster), "Unknown staff");
    }
}
