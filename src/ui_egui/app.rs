mod navigation;
pub mod schedule;
mod state;
pub mod toast;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Local, NaiveDate};

use self::schedule::ScheduleModel;
use self::state::{DetailsState, LoadPhase};
use self::toast::ToastManager;
use crate::models::appointment::AppointmentStatus;
use crate::models::settings::Settings;
use crate::models::staff::StaffFilter;
use crate::services::config::AppConfig;
use crate::services::store::remote::RemoteStore;
use crate::services::store::worker::{StoreEvent, StoreRequest, StoreWorker};
use crate::services::store::{AppointmentStore, DateRange};
use crate::ui_egui::dialogs::appointment_details::{render_appointment_details, DetailsAction};
use crate::ui_egui::theme::CalendarTheme;
use crate::ui_egui::views::week_view::WeekView;
use crate::ui_egui::views::{GridInteraction, RescheduleIntent};
use crate::utils::date::week_start;

/// Which store mutation an operation id belongs to, for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    StatusChange,
    Reschedule,
}

impl OpKind {
    fn success_message(&self) -> &'static str {
        match self {
            OpKind::StatusChange => "Status updated",
            OpKind::Reschedule => "Appointment rescheduled",
        }
    }

    fn failure_label(&self) -> &'static str {
        match self {
            OpKind::StatusChange => "Status update",
            OpKind::Reschedule => "Reschedule",
        }
    }
}

pub struct AgendaApp {
    worker: StoreWorker,
    settings: Settings,
    theme: CalendarTheme,
    /// Reference date defining the visible week.
    current_date: NaiveDate,
    schedule: ScheduleModel,
    load_phase: LoadPhase,
    week_loaded: bool,
    staff_loaded: bool,
    /// Fetch generation; completions from older generations are discarded.
    generation: u64,
    staff_generation: u64,
    op_counter: u64,
    op_kinds: HashMap<u64, OpKind>,
    details: Option<DetailsState>,
    toasts: ToastManager,
}

impl AgendaApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> anyhow::Result<Self> {
        let store = RemoteStore::new(&config.backend_url)?;
        let theme = CalendarTheme::from_preference(&config.settings.theme);
        theme.apply_to_context(&cc.egui_ctx);

        Ok(Self::with_store(Arc::new(store), config.settings, theme))
    }

    /// Assemble the app around any store implementation. The injected
    /// collaborator is the only path to the backend.
    pub fn with_store(
        store: Arc<dyn AppointmentStore>,
        settings: Settings,
        theme: CalendarTheme,
    ) -> Self {
        let worker = StoreWorker::spawn(store);
        let mut app = Self {
            worker,
            settings,
            theme,
            current_date: Local::now().date_naive(),
            schedule: ScheduleModel::new(),
            load_phase: LoadPhase::Loading,
            week_loaded: false,
            staff_loaded: false,
            generation: 0,
            staff_generation: 0,
            op_counter: 0,
            op_kinds: HashMap::new(),
            details: None,
            toasts: ToastManager::new(),
        };

        app.request_staff();
        app.request_week();
        app
    }

    fn next_op_id(&mut self) -> u64 {
        self.op_counter += 1;
        self.op_counter
    }

    /// Fetch the displayed week. Bumping the generation invalidates any
    /// response still in flight for a previous week.
    pub(super) fn request_week(&mut self) {
        self.generation += 1;
        self.week_loaded = false;
        self.load_phase = LoadPhase::Loading;

        let start = week_start(self.current_date, self.settings.first_day_of_week);
        self.worker.send(StoreRequest::FetchWeek {
            generation: self.generation,
            range: DateRange::week_of(start),
            // The full week is fetched; the staff filter narrows locally.
            staff: StaffFilter::All,
        });
    }

    fn request_staff(&mut self) {
        self.staff_generation += 1;
        self.worker.send(StoreRequest::FetchStaff {
            generation: self.staff_generation,
        });
    }

    fn process_store_events(&mut self) {
        for event in self.worker.poll() {
            match event {
                StoreEvent::WeekLoaded { generation, result } => {
                    if generation != self.generation {
                        log::debug!("discarding stale week fetch (generation {generation})");
                        continue;
                    }
                    match result {
                        Ok(appointments) => {
                            log::info!("loaded {} appointments", appointments.len());
                            self.schedule.set_appointments(appointments);
                            self.week_loaded = true;
                            if self.staff_loaded {
                                self.load_phase = LoadPhase::Ready;
                            }
                        }
                        Err(err) => {
                            log::error!("failed to load appointments: {err}");
                            self.load_phase = LoadPhase::Failed(err.to_string());
                        }
                    }
                }
                StoreEvent::StaffLoaded { generation, result } => {
                    if generation != self.staff_generation {
                        continue;
                    }
                    match result {
                        Ok(staff) => {
                            self.schedule.set_staff(staff);
                            self.staff_loaded = true;
                            if self.week_loaded && self.load_phase == LoadPhase::Loading {
                                self.load_phase = LoadPhase::Ready;
                            }
                        }
                        Err(err) => {
                            log::error!("failed to load staff roster: {err}");
                            self.staff_loaded = false;
                            self.load_phase = LoadPhase::Failed(err.to_string());
                        }
                    }
                }
                StoreEvent::MutationFinished { op_id, result } => {
                    let kind = self.op_kinds.remove(&op_id);
                    match result {
                        Ok(()) => {
                            self.schedule.confirm(op_id);
                            if let Some(kind) = kind {
                                self.toasts.success(kind.success_message());
                            }
                        }
                        Err(err) => {
                            let label = kind
                                .map(|k| k.failure_label())
                                .unwrap_or("Store operation");
                            self.schedule.rollback(op_id);
                            self.toasts.error(format!("{label} failed: {err}"));
                        }
                    }
                }
            }
        }
    }

    fn handle_interaction(&mut self, interaction: GridInteraction) {
        if let Some(appointment_id) = interaction.clicked_appointment {
            self.details = Some(DetailsState { appointment_id });
        }

        if let Some(intent) = interaction.reschedule {
            self.reschedule(intent);
        }
    }

    fn reschedule(&mut self, intent: RescheduleIntent) {
        let op_id = self.next_op_id();
        match self.schedule.apply_reschedule(
            op_id,
            &intent.appointment_id,
            intent.day,
            intent.time,
        ) {
            Ok(()) => {
                self.op_kinds.insert(op_id, OpKind::Reschedule);
                self.worker.send(StoreRequest::Reschedule {
                    op_id,
                    appointment_id: intent.appointment_id,
                    day: intent.day,
                    time: intent.time,
                });
            }
            Err(message) => self.toasts.error(message),
        }
    }

    fn change_status(&mut self, appointment_id: &str, status: AppointmentStatus) {
        let op_id = self.next_op_id();
        match self.schedule.apply_status(op_id, appointment_id, status) {
            Ok(()) => {
                self.op_kinds.insert(op_id, OpKind::StatusChange);
                self.worker.send(StoreRequest::UpdateStatus {
                    op_id,
                    appointment_id: appointment_id.to_string(),
                    status,
                });
            }
            Err(message) => self.toasts.error(message),
        }
    }

    fn week_label(&self) -> String {
        let start = week_start(self.current_date, self.settings.first_day_of_week);
        let end = start + chrono::Duration::days(6);
        if start.format("%Y").to_string() == end.format("%Y").to_string() {
            format!("{} – {}", start.format("%b %d"), end.format("%b %d, %Y"))
        } else {
            format!(
                "{} – {}",
                start.format("%b %d, %Y"),
                end.format("%b %d, %Y")
            )
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("agenda_top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.navigate_previous();
                }
                if ui.button("Today").clicked() {
                    self.jump_to_today();
                }
                if ui.button("▶").clicked() {
                    self.navigate_next();
                }

                ui.add_space(8.0);
                ui.heading(self.week_label());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⟳").on_hover_text("Refresh").clicked() {
                        self.request_staff();
                        self.request_week();
                    }

                    ui.add_space(4.0);
                    self.render_staff_filter(ui);
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_staff_filter(&mut self, ui: &mut egui::Ui) {
        let selected_label = self
            .schedule
            .filter()
            .label(self.schedule.staff())
            .to_string();
        let roster = self.schedule.staff().to_vec();
        let current = self.schedule.filter().clone();

        let mut new_filter: Option<StaffFilter> = None;
        egui::ComboBox::from_id_source("staff_filter")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(current == StaffFilter::All, "All staff")
                    .clicked()
                {
                    new_filter = Some(StaffFilter::All);
                }
                for staff in &roster {
                    let is_selected = current == StaffFilter::One(staff.id.clone());
                    if ui
                        .selectable_label(is_selected, &staff.display_name)
                        .clicked()
                    {
                        new_filter = Some(StaffFilter::One(staff.id.clone()));
                    }
                }
            });

        if let Some(filter) = new_filter {
            // Pure local re-filter; no refetch.
            self.schedule.set_filter(filter);
        }
    }

    fn render_loading(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.spinner();
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Loading appointments…")
                    .color(self.theme.text_secondary),
            );
        });
    }

    fn render_error(&mut self, ui: &mut egui::Ui, message: String) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(
                egui::RichText::new("Could not load the calendar")
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(message)
                    .size(12.0)
                    .color(self.theme.text_secondary),
            );
            ui.add_space(12.0);
            if ui.button("Retry").clicked() {
                self.request_staff();
                self.request_week();
            }
        });
    }

    fn render_details(&mut self, ctx: &egui::Context) {
        let Some(details) = self.details.clone() else {
            return;
        };

        let Some(appointment) = self.schedule.get(&details.appointment_id).cloned() else {
            // The record left the mirrored window (refetch); close quietly.
            self.details = None;
            return;
        };

        let staff_name = self
            .schedule
            .staff_name(&appointment.staff_id)
            .map(str::to_string);

        match render_appointment_details(ctx, &appointment, staff_name.as_deref()) {
            Some(DetailsAction::ChangeStatus(status)) => {
                self.change_status(&appointment.id, status);
            }
            Some(DetailsAction::Close) => self.details = None,
            None => {}
        }
    }
}

impl eframe::App for AgendaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_store_events();

        self.render_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.load_phase.clone() {
                LoadPhase::Failed(message) => self.render_error(ui, message),
                LoadPhase::Loading => self.render_loading(ui),
                LoadPhase::Ready => {
                    let interaction = {
                        let visible = self.schedule.visible();
                        WeekView::show(
                            ui,
                            self.current_date,
                            &visible,
                            &self.settings,
                            &self.theme,
                        )
                    };
                    self.handle_interaction(interaction);
                }
            }
        });

        self.render_details(ctx);
        self.toasts.render(ctx, self.theme.is_dark);

        // Keep polling while work is in flight so completions land without
        // user interaction.
        if self.load_phase.is_loading() || self.schedule.has_pending() {
            ctx.request_repaint_after(StdDuration::from_millis(150));
        }
    }
}
