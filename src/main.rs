use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use tripsync::StartScreen;
use tripsync::core::config::{self, CliOverrides, TripSyncConfig};

#[derive(Parser)]
#[command(name = "tripsync", about = "Plan trips with friends from the terminal")]
struct Args {
    /// Simulated search latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Terminal width (columns) at or below which the narrow layout is used
    #[arg(long)]
    narrow_breakpoint: Option<u16>,

    /// Screen to open on
    #[arg(long, default_value_t, value_enum)]
    start: StartScreen,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config problems are reported after the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(file_config) => (file_config, None),
        Err(e) => (TripSyncConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            latency_ms: args.latency_ms,
            narrow_breakpoint: args.narrow_breakpoint,
        },
    );

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Falling back to default config: {}", e);
    }
    log::info!("TripSync starting up: {:?}", resolved);

    tripsync::tui::run(resolved, args.start)
}
