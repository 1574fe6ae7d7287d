use super::AgendaApp;
use chrono::Local;

impl AgendaApp {
    /// Shift the visible week back by 7 days and refetch.
    pub(super) fn navigate_previous(&mut self) {
        self.current_date = self.current_date - chrono::Duration::weeks(1);
        self.request_week();
    }

    /// Shift the visible week forward by 7 days and refetch.
    pub(super) fn navigate_next(&mut self) {
        self.current_date = self.current_date + chrono::Duration::weeks(1);
        self.request_week();
    }

    pub(super) fn jump_to_today(&mut self) {
        let today = Local::now().date_naive();
        if self.current_date != today {
            self.current_date = today;
            self.request_week();
        }
    }
}
