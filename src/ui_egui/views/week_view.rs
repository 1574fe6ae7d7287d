//! The 7-day week view: header strip plus the scrollable slot matrix.

use chrono::NaiveDate;

use super::palette::{DayStripPalette, TimeGridPalette};
use super::time_grid::{render_day_headers, render_time_grid, COLUMN_SPACING, TIME_LABEL_WIDTH};
use super::{GridInteraction, SlotIndex};
use crate::models::appointment::Appointment;
use crate::models::settings::Settings;
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::date::{time_slots, week_days};

pub struct WeekView;

impl WeekView {
    /// Render the week containing `current_date` with the given (already
    /// staff-filtered) appointments. Interactions bubble back unhandled.
    pub fn show(
        ui: &mut egui::Ui,
        current_date: NaiveDate,
        appointments: &[&Appointment],
        settings: &Settings,
        theme: &CalendarTheme,
    ) -> GridInteraction {
        let week_dates = week_days(current_date, settings.first_day_of_week);
        let slots = time_slots(&settings.business_hours);
        let index = SlotIndex::build(appointments.iter().copied());

        let day_strip_palette = DayStripPalette::from_theme(theme);
        let grid_palette = TimeGridPalette::from_theme(theme);

        let total_spacing = COLUMN_SPACING * 6.0; // 6 gaps between 7 columns

        let available_width = ui.available_width();
        let col_width = (available_width - TIME_LABEL_WIDTH - total_spacing) / 7.0;

        render_day_headers(ui, &week_dates, col_width, &day_strip_palette, settings);

        ui.add_space(8.0);

        let mut interaction = GridInteraction::default();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |scroll_ui| {
                let scroll_width = scroll_ui.available_width();
                let col_width = (scroll_width - TIME_LABEL_WIDTH - total_spacing) / 7.0;

                interaction.merge(render_time_grid(
                    scroll_ui,
                    col_width,
                    &week_dates,
                    &slots,
                    &index,
                    &grid_palette,
                    &settings.business_hours,
                ));
            });

        interaction
    }
}
