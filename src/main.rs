//! SOS GUI
//!
//! Play SOS against the AI, against another player, or watch two AIs.

use sos::ui::SosApp;
use tracing::info;

fn main() -> Result<(), eframe::Error> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    info!("Starting SOS");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("SOS"),
        ..Default::default()
    };

    eframe::run_native(
        "SOS",
        options,
        Box::new(|cc| Ok(Box::new(SosApp::new(cc)))),
    )
}
