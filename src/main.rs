mod api;
mod app;
mod config;
mod upload;
mod utils;

use app::StatementUploader;
use config::UploaderConfig;
use tracing_subscriber::EnvFilter;
use upload::UploadController;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("statement_uploader=info")),
        )
        .init();

    let config = UploaderConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting statement uploader");
    let controller = UploadController::new(config)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([620.0, 560.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Excel Statement Uploader",
        options,
        Box::new(move |cc| Box::new(StatementUploader::new(cc, controller))),
    )?;

    Ok(())
}
