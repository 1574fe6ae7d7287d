//! Working collection of appointments mirrored from the store.
//!
//! Mutations are applied optimistically: the model snapshots the record
//! before changing it, keyed by the worker operation id, and either
//! confirms (drops the snapshot) or rolls back when the store answers.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::staff::{Staff, StaffFilter};

#[derive(Default)]
pub struct ScheduleModel {
    appointments: Vec<Appointment>,
    staff: Vec<Staff>,
    filter: StaffFilter,
    pending: HashMap<u64, Appointment>,
}

impl ScheduleModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mirrored collection with a fresh fetch result.
    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
    }

    pub fn set_staff(&mut self, staff: Vec<Staff>) {
        self.staff = staff;
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn staff_name(&self, staff_id: &str) -> Option<&str> {
        self.staff
            .iter()
            .find(|s| s.id == staff_id)
            .map(|s| s.display_name.as_str())
    }

    pub fn filter(&self) -> &StaffFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: StaffFilter) {
        self.filter = filter;
    }

    /// Appointments passing the current staff filter.
    pub fn visible(&self) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| self.filter.matches(&a.staff_id))
            .collect()
    }

    pub fn get(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Optimistically change a status. Fails without side effects when the
    /// appointment is unknown or the transition is not allowed.
    pub fn apply_status(
        &mut self,
        op_id: u64,
        appointment_id: &str,
        new_status: AppointmentStatus,
    ) -> Result<(), String> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| format!("Unknown appointment {appointment_id}"))?;

        if !appointment.status.can_transition_to(new_status) {
            return Err(format!(
                "Cannot change status from {} to {}",
                appointment.status.label(),
                new_status.label()
            ));
        }

        self.pending.insert(op_id, appointment.clone());
        appointment.status = new_status;
        Ok(())
    }

    /// Optimistically move an appointment to a new (day, time).
    pub fn apply_reschedule(
        &mut self,
        op_id: u64,
        appointment_id: &str,
        day: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), String> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| format!("Unknown appointment {appointment_id}"))?;

        self.pending.insert(op_id, appointment.clone());
        appointment.date = day;
        appointment.start = time;
        Ok(())
    }

    /// The store accepted the mutation; the optimistic state stands.
    pub fn confirm(&mut self, op_id: u64) {
        self.pending.remove(&op_id);
    }

    /// The store rejected the mutation; restore the snapshot. Returns the
    /// restored record so the caller can word its notification.
    pub fn rollback(&mut self, op_id: u64) -> Option<Appointment> {
        let snapshot = self.pending.remove(&op_id)?;
        if let Some(slot) = self
            .appointments
            .iter_mut()
            .find(|a| a.id == snapshot.id)
        {
            *slot = snapshot.clone();
        } else {
            // A refetch replaced the collection mid-flight; reinstate the
            // record so the rollback is still visible.
            self.appointments.push(snapshot.clone());
        }
        Some(snapshot)
    }
}
