use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::appointment::Appointment;

pub mod appointment_card;
mod palette;
pub mod time_grid;
pub mod time_grid_cell;
pub mod week_view;

/// The logical request produced by a completed drag-drop: move an
/// appointment to a new day and slot time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RescheduleIntent {
    pub appointment_id: String,
    pub day: NaiveDate,
    pub time: NaiveTime,
}

/// What the grid reports back to the calendar view for one frame.
/// The grid never mutates appointment state itself.
#[derive(Default)]
pub struct GridInteraction {
    /// Appointment card that was clicked (opens the details surface).
    pub clicked_appointment: Option<String>,
    /// Completed drag-drop, if any.
    pub reschedule: Option<RescheduleIntent>,
}

impl GridInteraction {
    pub fn merge(&mut self, other: GridInteraction) {
        if other.clicked_appointment.is_some() {
            self.clicked_appointment = other.clicked_appointment;
        }
        if other.reschedule.is_some() {
            self.reschedule = other.reschedule;
        }
    }
}

/// Appointments bucketed by (day, slot time), built once per frame so each
/// cell lookup is O(1) instead of re-scanning the whole collection per cell.
pub struct SlotIndex<'a> {
    buckets: HashMap<(NaiveDate, NaiveTime), Vec<&'a Appointment>>,
}

impl<'a> SlotIndex<'a> {
    pub fn build<I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut buckets: HashMap<(NaiveDate, NaiveTime), Vec<&'a Appointment>> = HashMap::new();
        for appointment in appointments {
            buckets
                .entry((appointment.date, appointment.start))
                .or_default()
                .push(appointment);
        }

        // Stable stacking order inside a cell.
        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| a.client_name.cmp(&b.client_name).then(a.id.cmp(&b.id)));
        }

        Self { buckets }
    }

    /// Appointments booked for exactly this (day, time) cell.
    pub fn appointments_at(&self, day: NaiveDate, time: NaiveTime) -> &[&'a Appointment] {
        self.buckets
            .get(&(day, time))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Rich hover text for an appointment card.
pub fn format_appointment_tooltip(appointment: &Appointment) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} — {}", appointment.client_name, appointment.service_name));
    lines.push(format!(
        "{} {} ({} min)",
        appointment.date.format("%A, %B %d"),
        appointment.start.format("%H:%M"),
        appointment.duration_minutes
    ));
    lines.push(format!("Status: {}", appointment.status.label()));

    if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.is_empty()) {
        let preview = if notes.len() > 100 {
            format!("{}...", &notes[..100])
        } else {
            notes.to_string()
        };
        lines.push(preview);
    }

    lines.join("\n")
}
