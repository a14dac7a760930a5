use std::time::Duration;

use log::info;

mod api;
mod app;
mod config;
mod models;
mod worker;

fn main() -> eframe::Result<()> {
    std::env::set_var("RUST_LOG", "broadcast_dashboard=info");

    env_logger::init();

    info!("Backend URL: {}", config::CONFIG.backend_url);

    let api = api::BroadcastApi::new(
        config::CONFIG.backend_url.clone(),
        Duration::from_secs(config::CONFIG.request_timeout_secs),
    );

    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(64);
    let (event_tx, event_rx) = crossbeam_channel::bounded(256);
    worker::spawn(api, cmd_rx, event_tx);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Broadcast Dashboard")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Broadcast Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app::DashboardApp::new(cmd_tx, event_rx)))),
    )
}
