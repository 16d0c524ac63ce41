use sales_coach::{
    api::AnalysisClient,
    core::{
        config::{
            ClientConfig,
            SettingsData,
        },
        tasks::TaskManager,
        CoachError,
    },
    gui::CoachApp,
    persistence::{
        load_json_or_default,
        SETTINGS_FILE,
    },
};
use tracing::{
    error,
    info,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        error!("Sales coach exited with an error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CoachError> {
    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    let config = ClientConfig::from_env(&settings);
    info!(
        "Analysis service at {} (fallback: {:?})",
        config.base_url, config.fallback_policy
    );

    let max_upload_bytes = config.max_upload_bytes;
    let task_manager = TaskManager::new(AnalysisClient::new(config)?)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Coach",
        options,
        Box::new(move |cc| {
            Ok(Box::new(CoachApp::new(cc, settings, task_manager, max_upload_bytes)))
        }),
    )
    .map_err(|e| CoachError::Custom(format!("UI error: {}", e)))
}
