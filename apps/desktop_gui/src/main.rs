use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::FeedbackApp;

#[derive(Parser, Debug)]
#[command(
    name = "feedback-desk",
    about = "Desktop client for the sentiment feedback service"
)]
struct Args {
    /// Backend API root. Also configurable via feedback.toml or the
    /// FEEDBACK_API_ROOT environment variable.
    #[arg(long)]
    api_root: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = client_core::load_settings();
    if let Some(api_root) = args.api_root {
        settings.api_root = client_core::normalize_api_root(&api_root);
    }
    tracing::info!(api_root = %settings.api_root, "starting feedback desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Feedback Desk")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Feedback Desk",
        options,
        Box::new(|_cc| Ok(Box::new(FeedbackApp::new(cmd_tx, ui_rx)))),
    )
}
