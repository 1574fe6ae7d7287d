//! Theme definitions for the agenda UI.

use egui::Color32;

/// Colors used across the calendar surface.
#[derive(Debug, Clone)]
pub struct CalendarTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,
    pub calendar_background: Color32,
    pub weekend_background: Color32,
    pub today_background: Color32,
    pub today_border: Color32,
    pub day_background: Color32,
    pub day_border: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl CalendarTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(247, 245, 243),
            calendar_background: Color32::from_rgb(255, 255, 255),
            weekend_background: Color32::from_rgb(250, 248, 250),
            today_background: Color32::from_rgb(238, 231, 245),
            today_border: Color32::from_rgb(150, 110, 200),
            day_background: Color32::from_rgb(255, 255, 255),
            day_border: Color32::from_rgb(222, 218, 224),
            text_primary: Color32::from_rgb(40, 38, 42),
            text_secondary: Color32::from_rgb(105, 100, 110),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(28, 26, 30),
            calendar_background: Color32::from_rgb(38, 36, 42),
            weekend_background: Color32::from_rgb(34, 32, 38),
            today_background: Color32::from_rgb(54, 46, 68),
            today_border: Color32::from_rgb(160, 125, 210),
            day_background: Color32::from_rgb(38, 36, 42),
            day_border: Color32::from_rgb(60, 57, 64),
            text_primary: Color32::from_rgb(238, 236, 240),
            text_secondary: Color32::from_rgb(168, 163, 173),
        }
    }

    /// Resolve the configured preference ("light", "dark", or "system").
    pub fn from_preference(preference: &str) -> Self {
        match preference {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.widgets.noninteractive.bg_fill = self.day_background;
        visuals.widgets.inactive.bg_fill = self.day_background;
        visuals.widgets.hovered.bg_fill = self.today_background;
        visuals.widgets.active.bg_fill = self.today_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}

impl Default for CalendarTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_preferences() {
        assert!(!CalendarTheme::from_preference("light").is_dark);
        assert!(CalendarTheme::from_preference("dark").is_dark);
    }
}
