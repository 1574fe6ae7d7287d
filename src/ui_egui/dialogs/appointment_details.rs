//! Details window for a single appointment: the status-change surface.

use egui::{Color32, RichText};

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::ui_egui::views::appointment_card::status_color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsAction {
    /// User picked one of the allowed target statuses.
    ChangeStatus(AppointmentStatus),
    Close,
}

/// Render the details window. Returns the user's action, if any; status
/// buttons are limited to the transitions the status graph allows.
pub fn render_appointment_details(
    ctx: &egui::Context,
    appointment: &Appointment,
    staff_name: Option<&str>,
) -> Option<DetailsAction> {
    let mut action = None;
    let mut open = true;

    egui::Window::new("Appointment")
        .id(egui::Id::new(("appointment_details", &appointment.id)))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.set_min_width(260.0);

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&appointment.client_name)
                        .size(16.0)
                        .strong(),
                );
                ui.label(
                    RichText::new(appointment.status.label())
                        .size(12.0)
                        .color(status_color(appointment.status))
                        .strong(),
                );
            });
            ui.label(&appointment.service_name);

            ui.separator();

            ui.label(format!(
                "{}  {} – {}",
                appointment.date.format("%A, %B %d, %Y"),
                appointment.start.format("%H:%M"),
                appointment.end_datetime().format("%H:%M"),
            ));
            ui.label(format!("Duration: {} min", appointment.duration_minutes));
            if let Some(name) = staff_name {
                ui.label(format!("With: {name}"));
            } else {
                ui.label(
                    RichText::new("With: unassigned staff")
                        .italics()
                        .color(Color32::from_gray(140)),
                );
            }

            if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.is_empty()) {
                ui.separator();
                ui.label(RichText::new(notes).size(11.0));
            }

            ui.separator();
            ui.label(RichText::new("Set status").size(11.0).strong());

            ui.horizontal(|ui| {
                for target in appointment.status.allowed_transitions() {
                    let button = egui::Button::new(
                        RichText::new(target.label()).color(Color32::WHITE),
                    )
                    .fill(status_color(*target));

                    if ui.add(button).clicked() {
                        action = Some(DetailsAction::ChangeStatus(*target));
                    }
                }
            });
        });

    if !open {
        action = Some(DetailsAction::Close);
    }

    action
}
