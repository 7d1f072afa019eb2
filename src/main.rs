use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use wayfare::core::config::{self, CliOverrides, WayfareConfig};

#[derive(Parser)]
#[command(name = "wayfare", about = "Interactive trip cost estimator")]
struct Args {
    /// Destination to start with
    #[arg(short, long)]
    destination: Option<String>,

    /// Trip length in days
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=30))]
    days: Option<i64>,

    /// Config file (default: ~/.wayfare/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the booked itinerary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wayfare.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wayfare.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    info!("Wayfare starting up");

    let loaded = match args.config.as_deref() {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = loaded.unwrap_or_else(|e| {
        warn!("{e}, falling back to defaults");
        eprintln!("wayfare: {e}, falling back to defaults");
        WayfareConfig::default()
    });

    let cli = CliOverrides {
        destination: args.destination,
        duration_days: args.days,
    };
    let resolved = config::resolve(&file_config, &cli);

    if let Some(summary) = wayfare::tui::run(resolved)? {
        if args.json {
            let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
            println!("{json}");
        } else {
            println!("{}", summary.to_text());
        }
    }
    Ok(())
}
