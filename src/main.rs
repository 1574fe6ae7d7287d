// Salon Agenda Application
// Main entry point

use salon_agenda::services::config;
use salon_agenda::ui_egui::AgendaApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Salon Agenda");

    let config = config::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salon Agenda",
        options,
        Box::new(move |cc| {
            let app = AgendaApp::new(cc, config)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
}
