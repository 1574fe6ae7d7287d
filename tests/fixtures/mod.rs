//! Shared test fixtures: a scriptable in-memory store and builders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};

use salon_agenda::models::appointment::{Appointment, AppointmentStatus};
use salon_agenda::models::staff::{Staff, StaffFilter};
use salon_agenda::services::store::{AppointmentStore, DateRange, StoreError};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

pub fn appointment(
    id: &str,
    day: NaiveDate,
    start: NaiveTime,
    staff_id: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment::builder()
        .id(id)
        .client_name(format!("Client {id}"))
        .service_name("Haircut")
        .date(day)
        .start(start)
        .duration_minutes(30)
        .staff_id(staff_id)
        .status(status)
        .build()
        .unwrap()
}

/// In-memory store with switchable failure modes, standing in for the
/// hosted backend.
pub struct FakeStore {
    appointments: Mutex<Vec<Appointment>>,
    staff: Vec<Staff>,
    pub fail_mutations: AtomicBool,
    pub fail_fetches: AtomicBool,
}

impl FakeStore {
    pub fn new(appointments: Vec<Appointment>, staff: Vec<Staff>) -> Self {
        Self {
            appointments: Mutex::new(appointments),
            staff,
            fail_mutations: AtomicBool::new(false),
            fail_fetches: AtomicBool::new(false),
        }
    }

    pub fn stored(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }
}

impl AppointmentStore for FakeStore {
    fn fetch_appointments(
        &self,
        range: DateRange,
        staff: &StaffFilter,
    ) -> Result<Vec<Appointment>, StoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::Network("backend unreachable".to_string()));
        }

        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| range.contains(a.date) && staff.matches(&a.staff_id))
            .cloned()
            .collect())
    }

    fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<(), StoreError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(StoreError::Http(409));
        }

        let mut appointments = self.appointments.lock().unwrap();
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Http(404))?;
        appointment.status = status;
        Ok(())
    }

    fn reschedule(&self, id: &str, day: NaiveDate, new_time: NaiveTime) -> Result<(), StoreError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(StoreError::Http(409));
        }

        let mut appointments = self.appointments.lock().unwrap();
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Http(404))?;
        appointment.date = day;
        appointment.start = new_time;
        Ok(())
    }

    fn fetch_staff(&self) -> Result<Vec<Staff>, StoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::Network("backend unreachable".to_string()));
        }
        Ok(self.staff.clone())
    }
}
