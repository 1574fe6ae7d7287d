//! Rendering for a single appointment card inside a time-slot cell.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::models::appointment::{Appointment, AppointmentStatus};

/// Badge color for a status. Pure 4-way mapping over the closed enum;
/// records with unrecognized wire statuses were already normalized at the
/// store boundary.
pub fn status_color(status: AppointmentStatus) -> Color32 {
    match status {
        AppointmentStatus::Pending => Color32::from_rgb(225, 160, 50),
        AppointmentStatus::Confirmed => Color32::from_rgb(80, 140, 220),
        AppointmentStatus::Done => Color32::from_rgb(90, 175, 110),
        AppointmentStatus::Canceled => Color32::from_rgb(165, 90, 90),
    }
}

/// Width of the status badge stripe on the card's left edge.
const BADGE_WIDTH: f32 = 4.0;

/// Paint one appointment card into `card_rect` and return the hit rect.
///
/// The card being dragged is dimmed in place; the drop highlight on the
/// target cell shows where it will land.
pub fn render_appointment_card(
    ui: &mut egui::Ui,
    card_rect: Rect,
    appointment: &Appointment,
    is_dragged: bool,
) -> Rect {
    let badge = status_color(appointment.status);
    let fill = if is_dragged {
        badge.linear_multiply(0.25)
    } else {
        badge.linear_multiply(0.55)
    };

    ui.painter()
        .rect_filled(card_rect, egui::Rounding::same(3.0), fill);

    // Status badge stripe
    let badge_rect = Rect::from_min_size(
        card_rect.min,
        Vec2::new(BADGE_WIDTH, card_rect.height()),
    );
    ui.painter().rect_filled(
        badge_rect,
        egui::Rounding {
            nw: 3.0,
            sw: 3.0,
            ne: 0.0,
            se: 0.0,
        },
        badge,
    );

    let text_color = if is_dragged {
        Color32::from_rgba_unmultiplied(255, 255, 255, 140)
    } else {
        Color32::WHITE
    };

    let label = if card_rect.height() >= 26.0 {
        format!("{}\n{}", appointment.client_name, appointment.service_name)
    } else {
        format!("{} · {}", appointment.client_name, appointment.service_name)
    };

    let font_id = egui::FontId::proportional(10.0);
    let available_width = card_rect.width() - BADGE_WIDTH - 10.0;
    let layout_job =
        egui::text::LayoutJob::simple(label, font_id, text_color, available_width.max(10.0));
    let galley = ui.fonts(|f| f.layout_job(layout_job));

    ui.painter().galley(
        Pos2::new(card_rect.left() + BADGE_WIDTH + 4.0, card_rect.top() + 2.0),
        galley,
        text_color,
    );

    card_rect
}
