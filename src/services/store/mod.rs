//! Appointment store seam.
//!
//! The calendar never persists anything itself: every read and mutation
//! goes through [`AppointmentStore`], backed in production by the hosted
//! scheduling backend (`remote`) and kept off the render thread by a
//! dedicated worker (`worker`).

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::staff::{Staff, StaffFilter};

pub mod remote;
pub mod worker;

/// Inclusive calendar-date range, normally one displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The week window starting at `week_start`.
    pub fn week_of(week_start: NaiveDate) -> Self {
        Self {
            start: week_start,
            end: week_start + chrono::Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned HTTP status {0}")]
    Http(u16),

    #[error("failed to decode backend response: {0}")]
    Decode(String),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether retrying the same call may succeed. Client-side errors and
    /// decode failures are final.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Network(_) => true,
            StoreError::Http(status) => *status >= 500 || *status == 429,
            StoreError::Decode(_) | StoreError::Config(_) => false,
        }
    }
}

/// Narrow contract to the hosted data layer (the only external interface
/// this application consumes).
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentStore: Send + Sync {
    /// Appointments overlapping the date range. The staff filter lets a
    /// backend scope the query server-side; callers that filter locally
    /// pass [`StaffFilter::All`].
    fn fetch_appointments(
        &self,
        range: DateRange,
        staff: &StaffFilter,
    ) -> Result<Vec<Appointment>, StoreError>;

    fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<(), StoreError>;

    fn reschedule(&self, id: &str, day: NaiveDate, time: NaiveTime) -> Result<(), StoreError>;

    fn fetch_staff(&self) -> Result<Vec<Staff>, StoreError>;
}
