use crate::app::App;
use crate::log_widget::{LogBuffer, LogState};

pub mod app;
pub mod event;
pub mod gauge_widget;
pub mod log_widget;
pub mod poller;
pub mod tracing_layer;
pub mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        std::env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Sensor endpoint answering GET with a JSON reading
    #[arg(long, default_value = "http://10.0.0.252/data")]
    url: String,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Show the log panel at the bottom of the screen
    #[arg(long, default_value = "true")]
    show_logs: bool,

    /// Hide the log panel at the bottom of the screen
    #[arg(long)]
    hide_logs: bool,
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "ambient", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn initialize_logging(buffer: LogBuffer) -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(directory.clone())?;
    let log_path = directory.join(LOG_FILE.clone());
    let log_file = std::fs::File::create(log_path)?;
    let log_filter = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.clone()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_PKG_NAME")));
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::EnvFilter::builder().parse_lossy(log_filter));

    let panel_layer = tracing_layer::PanelLayer::new(buffer);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(panel_layer)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let show_logs = args.show_logs && !args.hide_logs;

    let buffer = LogBuffer::new();
    initialize_logging(buffer.clone())?;
    let terminal = ratatui::init();
    let log_state = LogState::new(buffer, show_logs);
    let interval = Duration::from_millis(args.interval_ms);
    let result = App::new(args.url, interval, log_state).run(terminal).await;
    ratatui::restore();
    result
}
