// Appointment module
// Bookable salon appointment as mirrored from the hosted backend

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an appointment.
///
/// The set is closed; anything else coming off the wire is normalized at
/// the store boundary (see `services::store::remote`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Done,
    Canceled,
}

impl AppointmentStatus {
    /// Stable wire/storage token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Done => "done",
            AppointmentStatus::Canceled => "canceled",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Done => "Done",
            AppointmentStatus::Canceled => "Canceled",
        }
    }

    /// Parse a wire token. Unknown tokens yield `None`; callers decide the
    /// fallback (the remote store falls back to `Pending` with a warning).
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "done" => Some(AppointmentStatus::Done),
            "canceled" | "cancelled" => Some(AppointmentStatus::Canceled),
            _ => None,
        }
    }

    /// Statuses this one may move to from the details surface.
    ///
    /// Done cannot go back to Pending; a finished appointment is either
    /// left alone or reopened as Confirmed to correct a mistake.
    pub fn allowed_transitions(&self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Pending => &[Confirmed, Canceled],
            Confirmed => &[Pending, Done, Canceled],
            Done => &[Confirmed],
            Canceled => &[Pending, Confirmed],
        }
    }

    pub fn can_transition_to(&self, target: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

/// One booked appointment on the week grid.
///
/// The grid never owns persistence: instances mirror the externally-held
/// collection and mutations flow back through the store adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub staff_id: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Appointment {
    /// Create a new appointment with required fields.
    ///
    /// # Returns
    /// Returns `Result<Appointment, String>` with validation
    pub fn new(
        id: impl Into<String>,
        client_name: impl Into<String>,
        service_name: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: u32,
        staff_id: impl Into<String>,
    ) -> Result<Self, String> {
        let appointment = Self {
            id: id.into(),
            client_name: client_name.into(),
            service_name: service_name.into(),
            date,
            start,
            duration_minutes,
            staff_id: staff_id.into(),
            status: AppointmentStatus::Pending,
            notes: None,
            created_at: None,
            updated_at: None,
        };

        appointment.validate()?;
        Ok(appointment)
    }

    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    /// Validate the appointment
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Appointment id cannot be empty".to_string());
        }

        if self.client_name.trim().is_empty() {
            return Err("Client name cannot be empty".to_string());
        }

        if self.service_name.trim().is_empty() {
            return Err("Service name cannot be empty".to_string());
        }

        if self.staff_id.trim().is_empty() {
            return Err("Staff id cannot be empty".to_string());
        }

        if self.duration_minutes == 0 {
            return Err("Duration must be positive".to_string());
        }

        Ok(())
    }

    /// Start of the appointment as a full timestamp.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// End of the appointment, clamped to the end of its day.
    pub fn end_datetime(&self) -> NaiveDateTime {
        let end = self.start_datetime() + Duration::minutes(self.duration_minutes as i64);
        let day_end = self.date.and_hms_opt(23, 59, 59).unwrap();
        end.min(day_end)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes as i64)
    }

    /// Whether this appointment belongs in the (day, time) grid cell.
    /// Matching is joint on date and slot time.
    pub fn occupies_slot(&self, day: NaiveDate, slot: NaiveTime) -> bool {
        self.date == day && self.start == slot
    }
}

/// Builder for creating appointments with optional fields
pub struct AppointmentBuilder {
    id: Option<String>,
    client_name: Option<String>,
    service_name: Option<String>,
    date: Option<NaiveDate>,
    start: Option<NaiveTime>,
    duration_minutes: u32,
    staff_id: Option<String>,
    status: AppointmentStatus,
    notes: Option<String>,
}

impl AppointmentBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            client_name: None,
            service_name: None,
            date: None,
            start: None,
            duration_minutes: 30,
            staff_id: None,
            status: AppointmentStatus::Pending,
            notes: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn start(mut self, start: NaiveTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn staff_id(mut self, staff_id: impl Into<String>) -> Self {
        self.staff_id = Some(staff_id.into());
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the appointment
    pub fn build(self) -> Result<Appointment, String> {
        let appointment = Appointment {
            id: self.id.ok_or("Appointment id is required")?,
            client_name: self.client_name.ok_or("Client name is required")?,
            service_name: self.service_name.ok_or("Service name is required")?,
            date: self.date.ok_or("Appointment date is required")?,
            start: self.start.ok_or("Appointment start time is required")?,
            duration_minutes: self.duration_minutes,
            staff_id: self.staff_id.ok_or("Staff id is required")?,
            status: self.status,
            notes: self.notes,
            created_at: None,
            updated_at: None,
        };

        appointment.validate()?;
        Ok(appointment)
    }
}

impl Default for AppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
    }

    fn sample_time() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn sample_appointment() -> Appointment {
        Appointment::new(
            "apt-1",
            "Dana Reed",
            "Balayage",
            sample_date(),
            sample_time(),
            90,
            "staff-1",
        )
        .unwrap()
    }

    #[test]
    fn test_new_appointment_success() {
        let appointment = sample_appointment();
        assert_eq!(appointment.client_name, "Dana Reed");
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.duration_minutes, 90);
    }

    #[test]
    fn test_new_appointment_empty_client() {
        let result = Appointment::new(
            "apt-1",
            "  ",
            "Manicure",
            sample_date(),
            sample_time(),
            30,
            "staff-1",
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Client name cannot be empty");
    }

    #[test]
    fn test_new_appointment_zero_duration() {
        let result = Appointment::new(
            "apt-1",
            "Dana Reed",
            "Manicure",
            sample_date(),
            sample_time(),
            0,
            "staff-1",
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Duration must be positive");
    }

    #[test]
    fn test_builder_basic() {
        let appointment = Appointment::builder()
            .id("apt-2")
            .client_name("Maya Ortiz")
            .service_name("Gel nails")
            .date(sample_date())
            .start(sample_time())
            .duration_minutes(45)
            .staff_id("staff-2")
            .build()
            .unwrap();

        assert_eq!(appointment.id, "apt-2");
        assert_eq!(appointment.duration_minutes, 45);
        assert!(appointment.notes.is_none());
    }

    #[test]
    fn test_builder_missing_client() {
        let result = Appointment::builder()
            .id("apt-2")
            .service_name("Gel nails")
            .date(sample_date())
            .start(sample_time())
            .staff_id("staff-2")
            .build();

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Client name is required");
    }

    #[test]
    fn test_end_datetime() {
        let appointment = sample_appointment();
        let expected = sample_date().and_hms_opt(11, 30, 0).unwrap();
        assert_eq!(appointment.end_datetime(), expected);
    }

    #[test]
    fn test_end_datetime_clamped_to_day() {
        let mut appointment = sample_appointment();
        appointment.start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        appointment.duration_minutes = 120;
        assert_eq!(
            appointment.end_datetime(),
            sample_date().and_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_occupies_slot_joint_on_day_and_time() {
        let appointment = sample_appointment();
        assert!(appointment.occupies_slot(sample_date(), sample_time()));

        // Same time on a different day must not match.
        let other_day = sample_date().succ_opt().unwrap();
        assert!(!appointment.occupies_slot(other_day, sample_time()));

        // Same day at a different time must not match.
        let other_time = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        assert!(!appointment.occupies_slot(sample_date(), other_time));
    }

    #[test]
    fn test_status_from_wire() {
        assert_eq!(
            AppointmentStatus::from_wire("confirmed"),
            Some(AppointmentStatus::Confirmed)
        );
        assert_eq!(
            AppointmentStatus::from_wire("CANCELLED"),
            Some(AppointmentStatus::Canceled)
        );
        assert_eq!(AppointmentStatus::from_wire("no-show"), None);
    }

    #[test]
    fn test_status_roundtrip_tokens() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Done,
            AppointmentStatus::Canceled,
        ] {
            assert_eq!(AppointmentStatus::from_wire(status.as_str()), Some(status));
        }
    }

    #[test_case(AppointmentStatus::Pending, AppointmentStatus::Confirmed, true; "pending can be confirmed")]
    #[test_case(AppointmentStatus::Pending, AppointmentStatus::Canceled, true; "pending can be canceled")]
    #[test_case(AppointmentStatus::Pending, AppointmentStatus::Done, false; "pending cannot jump to done")]
    #[test_case(AppointmentStatus::Confirmed, AppointmentStatus::Done, true; "confirmed can finish")]
    #[test_case(AppointmentStatus::Confirmed, AppointmentStatus::Pending, true; "confirmed can fall back to pending")]
    #[test_case(AppointmentStatus::Done, AppointmentStatus::Pending, false; "done cannot return to pending")]
    #[test_case(AppointmentStatus::Done, AppointmentStatus::Confirmed, true; "done can be reopened as confirmed")]
    #[test_case(AppointmentStatus::Canceled, AppointmentStatus::Pending, true; "canceled can be rebooked")]
    #[test_case(AppointmentStatus::Canceled, AppointmentStatus::Done, false; "canceled cannot finish directly")]
    fn test_transition_graph(from: AppointmentStatus, to: AppointmentStatus, allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_no_status_transitions_to_itself() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Done,
            AppointmentStatus::Canceled,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }
}
