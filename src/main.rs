use eframe::egui;
use kakitori::{
    core::{
        tasks::TaskManager,
        Settings,
    },
    gui::{
        AppServices,
        KakitoriApp,
    },
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kakitori=info")),
        )
        .init();

    let settings = Settings::load();
    let services = AppServices::from_settings(&settings)?;
    let task_manager = TaskManager::new()?;
    tracing::info!("Kakitori starting against {}", settings.api_base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Kakitori")
            .with_inner_size([720.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Kakitori",
        options,
        Box::new(move |cc| Ok(Box::new(KakitoriApp::new(cc, settings, services, task_manager)))),
    )?;

    Ok(())
}
