// Settings module
// Display and business-hour preferences

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Opening hours and slot granularity for the time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub slot_minutes: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            slot_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: String,
    pub first_day_of_week: u8,
    pub date_format: String,
    pub business_hours: BusinessHours,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            first_day_of_week: 0, // Sunday
            date_format: "MM/DD/YYYY".to_string(),
            business_hours: BusinessHours::default(),
        }
    }
}
