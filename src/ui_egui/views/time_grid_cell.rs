//! A single (day, time) bucket of the week grid.
//!
//! Cells receive their appointments pre-filtered by the caller's slot index
//! and do no filtering of their own: they paint the slot, stack the cards,
//! and report themselves as drop targets while a drag is in flight.

use chrono::{NaiveDate, NaiveTime};
use egui::{CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

use super::appointment_card::render_appointment_card;
use super::format_appointment_tooltip;
use super::palette::TimeGridPalette;
use crate::models::appointment::Appointment;
use crate::ui_egui::drag::{DragContext, DragManager};

pub const SLOT_HEIGHT: f32 = 34.0;

pub struct TimeCell<'a> {
    pub day: NaiveDate,
    pub time: NaiveTime,
    pub is_hour_start: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    /// Pre-filtered by the caller; the cell is a dumb rendering bucket.
    pub appointments: &'a [&'a Appointment],
}

pub(crate) fn render_time_cell(
    ui: &mut egui::Ui,
    col_width: f32,
    cell: &TimeCell<'_>,
    palette: &TimeGridPalette,
) {
    let desired_size = Vec2::new(col_width, SLOT_HEIGHT);
    let sense = Sense::click_and_drag().union(Sense::hover());
    let (rect, response) = ui.allocate_exact_size(desired_size, sense);

    // Background: today column is visually distinguished.
    let bg_color = if cell.is_today {
        palette.today_bg
    } else if cell.is_weekend {
        palette.weekend_bg
    } else {
        palette.regular_bg
    };
    ui.painter().rect_filled(rect, 0.0, bg_color);

    // Horizontal grid line
    let line_color = if cell.is_hour_start {
        palette.hour_line
    } else {
        palette.slot_line
    };
    ui.painter().line_segment(
        [
            Pos2::new(rect.left(), rect.top()),
            Pos2::new(rect.right(), rect.top()),
        ],
        Stroke::new(1.0, line_color),
    );

    // Vertical grid line
    ui.painter().line_segment(
        [
            Pos2::new(rect.right(), rect.top()),
            Pos2::new(rect.right(), rect.bottom()),
        ],
        Stroke::new(1.0, palette.divider),
    );

    if response.hovered() {
        ui.painter().rect_filled(rect, 0.0, palette.hover_overlay);
    }

    // Stack the cards vertically inside the cell.
    let drag_phase = DragManager::current(ui.ctx());
    let dragged_id = drag_phase
        .as_ref()
        .filter(|p| p.is_dragging())
        .map(|p| p.context().appointment_id.clone());

    let mut hitboxes: Vec<(Rect, &Appointment)> = Vec::new();
    if !cell.appointments.is_empty() {
        let count = cell.appointments.len() as f32;
        let inner = rect.shrink2(Vec2::new(2.0, 2.0));
        let card_height = (inner.height() - (count - 1.0)) / count;

        for (i, appointment) in cell.appointments.iter().enumerate() {
            let top = inner.top() + i as f32 * (card_height + 1.0);
            let card_rect = Rect::from_min_size(
                Pos2::new(inner.left(), top),
                Vec2::new(inner.width(), card_height),
            );
            let is_dragged = dragged_id.as_deref() == Some(appointment.id.as_str());
            let hit = render_appointment_card(ui, card_rect, appointment, is_dragged);
            hitboxes.push((hit, appointment));
        }
    }

    let pointer_pos = response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));
    let pointer_hit = pointer_pos.and_then(|pos| {
        hitboxes
            .iter()
            .rev()
            .find(|(hit_rect, _)| hit_rect.contains(pos))
            .map(|(hit_rect, appointment)| (*hit_rect, *appointment))
    });

    // Arm a potential drag when a press lands on a card. The press only
    // becomes a drag after the pointer travels past the activation distance
    // (see ui_egui::drag); until then release resolves to a click.
    let pressed = ui.input(|i| i.pointer.primary_pressed());
    if pressed && drag_phase.is_none() {
        if let (Some((_, appointment)), Some(pos)) = (pointer_hit, pointer_pos) {
            DragManager::arm(
                ui.ctx(),
                DragContext::new(
                    appointment.id.clone(),
                    appointment.date,
                    appointment.start,
                    pos,
                ),
            );
        }
    }

    let dragging = DragManager::is_dragging(ui.ctx());

    // Drop-target tracking while a drag is in flight.
    if dragging {
        if let Some(pointer) = ui
            .ctx()
            .pointer_interact_pos()
            .or_else(|| ui.input(|i| i.pointer.hover_pos()))
        {
            if rect.contains(pointer) {
                DragManager::update_hover(ui.ctx(), cell.day, cell.time);
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
                ui.ctx().request_repaint();
            }
        }

        // Highlight the cell currently targeted by the drag.
        if let Some(phase) = DragManager::current(ui.ctx()) {
            let ctx_data = phase.context();
            if ctx_data.hovered_date == Some(cell.day) && ctx_data.hovered_time == Some(cell.time)
            {
                let highlight = rect.shrink2(Vec2::new(3.0, 2.0));
                ui.painter()
                    .rect_filled(highlight, 2.0, palette.drop_highlight);
                ui.painter().rect_stroke(
                    highlight,
                    2.0,
                    Stroke::new(1.5, palette.drop_highlight_border),
                );
            }
        }
    } else if let Some((hit_rect, appointment)) = pointer_hit {
        // Pointer cursor and tooltip over a card when idle.
        ui.output_mut(|out| out.cursor_icon = CursorIcon::PointingHand);
        if response.hovered() && hit_rect.contains(pointer_pos.unwrap_or_default()) {
            let tooltip_text = format_appointment_tooltip(appointment);
            response.clone().on_hover_ui_at_pointer(|ui| {
                ui.label(tooltip_text);
            });
        }
    }
}
