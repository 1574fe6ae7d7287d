//! Week grid rendering: the day-header strip and the time × day matrix.
//!
//! The grid owns drag terminal resolution for the frame: cells arm and
//! track drags, the grid resolves the release into a click or a
//! reschedule intent and reports it upward without mutating anything.

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};
use egui::{Color32, Stroke, Vec2};

use super::palette::{DayStripPalette, TimeGridPalette};
use super::time_grid_cell::{render_time_cell, TimeCell, SLOT_HEIGHT};
use super::{GridInteraction, RescheduleIntent, SlotIndex};
use crate::models::settings::{BusinessHours, Settings};
use crate::ui_egui::drag::{resolve_release, DragManager, DragOutcome};
use crate::utils::date::{day_names, format_short_date, is_today};

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;

/// Header strip: weekday name + day-of-month per column, today marked.
pub(crate) fn render_day_headers(
    ui: &mut egui::Ui,
    dates: &[NaiveDate],
    col_width: f32,
    palette: &DayStripPalette,
    settings: &Settings,
) {
    let names = day_names(settings.first_day_of_week);

    let header_frame = egui::Frame::none()
        .fill(palette.strip_bg)
        .rounding(egui::Rounding::same(8.0))
        .stroke(Stroke::new(1.0, palette.strip_border))
        .inner_margin(egui::Margin {
            left: 0.0,
            right: 0.0,
            top: 8.0,
            bottom: 8.0,
        });

    let header_response = header_frame.show(ui, |strip_ui| {
        strip_ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            // Placeholder matching the time-label gutter of the grid body.
            ui.allocate_ui_with_layout(
                Vec2::new(TIME_LABEL_WIDTH, 44.0),
                egui::Layout::right_to_left(egui::Align::Center),
                |_ui| {},
            );
            ui.add_space(COLUMN_SPACING);

            for (i, date) in dates.iter().enumerate() {
                let today = is_today(*date);
                let cell_bg = if today {
                    palette.today_cell_bg
                } else {
                    palette.cell_bg
                };
                let border_color = if today {
                    palette.accent_line
                } else {
                    palette.strip_border
                };
                let name_color = if today {
                    palette.today_text
                } else {
                    palette.text
                };

                ui.allocate_ui_with_layout(
                    Vec2::new(col_width, 44.0),
                    egui::Layout::top_down(egui::Align::Center),
                    |cell_ui| {
                        egui::Frame::none()
                            .fill(cell_bg)
                            .rounding(egui::Rounding::same(6.0))
                            .stroke(Stroke::new(1.0, border_color))
                            .inner_margin(egui::Margin::symmetric(6.0, 4.0))
                            .show(cell_ui, |content_ui| {
                                content_ui.vertical_centered(|ui| {
                                    ui.label(
                                        egui::RichText::new(names[i])
                                            .size(12.0)
                                            .color(name_color)
                                            .strong(),
                                    );
                                    let date_label = if today {
                                        "Today".to_string()
                                    } else {
                                        format_short_date(*date, &settings.date_format)
                                    };
                                    ui.label(
                                        egui::RichText::new(date_label)
                                            .size(11.0)
                                            .color(palette.date_text),
                                    );
                                });
                            });
                    },
                );

                if i < dates.len() - 1 {
                    ui.add_space(COLUMN_SPACING);
                }
            }
        });
    });

    let header_rect = header_response.response.rect;
    ui.painter().hline(
        header_rect.x_range(),
        header_rect.bottom(),
        Stroke::new(1.0, palette.accent_line),
    );
}

/// Render the slot matrix for the displayed week.
pub(crate) fn render_time_grid(
    ui: &mut egui::Ui,
    col_width: f32,
    dates: &[NaiveDate],
    slots: &[NaiveTime],
    index: &SlotIndex<'_>,
    palette: &TimeGridPalette,
    hours: &BusinessHours,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    let today = Local::now().date_naive();

    // Remove vertical spacing between slots so row geometry stays exact.
    ui.spacing_mut().item_spacing.y = 0.0;

    for time in slots {
        let is_hour_start = time.minute() == 0;

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            // Time label gutter
            ui.allocate_ui_with_layout(
                Vec2::new(TIME_LABEL_WIDTH, SLOT_HEIGHT),
                egui::Layout::right_to_left(egui::Align::Center),
                |ui| {
                    if is_hour_start {
                        ui.add_space(5.0);
                        ui.label(
                            egui::RichText::new(time.format("%H:%M").to_string())
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                    }
                },
            );

            ui.add_space(COLUMN_SPACING);

            for (day_idx, date) in dates.iter().enumerate() {
                let cell = TimeCell {
                    day: *date,
                    time: *time,
                    is_hour_start,
                    is_today: *date == today,
                    is_weekend: date.weekday().num_days_from_sunday() == 0
                        || date.weekday().num_days_from_sunday() == 6,
                    appointments: index.appointments_at(*date, *time),
                };
                render_time_cell(ui, col_width, &cell, palette);

                if day_idx < dates.len() - 1 {
                    ui.add_space(COLUMN_SPACING);
                }
            }
        });
    }

    draw_current_time_indicator(ui, dates, col_width, hours);

    // Advance the drag machine with the latest pointer position, then
    // resolve terminal transitions for this frame.
    if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
        DragManager::track_pointer(ui.ctx(), pos);
    }

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) && DragManager::current(ui.ctx()).is_some() {
        DragManager::cancel(ui.ctx());
    }

    if ui.input(|i| i.pointer.primary_released()) {
        if let Some(phase) = DragManager::take(ui.ctx()) {
            match resolve_release(phase) {
                DragOutcome::Click { appointment_id } => {
                    interaction.clicked_appointment = Some(appointment_id);
                }
                DragOutcome::Dropped {
                    appointment_id,
                    day,
                    time,
                } => {
                    interaction.reschedule = Some(RescheduleIntent {
                        appointment_id,
                        day,
                        time,
                    });
                }
                DragOutcome::Cancelled => {}
            }
        }
    }

    interaction
}

/// Draw the current time indicator line across today's column.
fn draw_current_time_indicator(
    ui: &mut egui::Ui,
    dates: &[NaiveDate],
    col_width: f32,
    hours: &BusinessHours,
) {
    let now = Local::now();
    let now_date = now.date_naive();
    let now_time = now.time();

    if now_time < hours.open || now_time >= hours.close {
        return;
    }

    if let Some(day_index) = dates.iter().position(|d| *d == now_date) {
        let minutes_since_open =
            (now_time.num_seconds_from_midnight() - hours.open.num_seconds_from_midnight()) as f32
                / 60.0;
        let relative_y = minutes_since_open / hours.slot_minutes.max(1) as f32 * SLOT_HEIGHT;

        let ui_top = ui.min_rect().top();
        let y_position = ui_top + relative_y;

        let ui_left = ui.min_rect().left();
        let x_start = ui_left
            + TIME_LABEL_WIDTH
            + COLUMN_SPACING
            + (day_index as f32 * (col_width + COLUMN_SPACING));
        let x_end = x_start + col_width;

        let painter = ui.painter();
        let line_color = Color32::from_rgb(255, 100, 100);
        let circle_center = egui::pos2(x_start - 4.0, y_position);

        painter.circle_filled(circle_center, 3.0, line_color);
        painter.line_segment(
            [
                egui::pos2(x_start, y_position),
                egui::pos2(x_end, y_position),
            ],
            egui::Stroke::new(2.0, line_color),
        );
    }
}
