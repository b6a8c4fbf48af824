use clap::Parser;
use flowpilot::LogLevel;
use flowpilot::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};

#[derive(Parser)]
#[command(name = "flowpilot", about = "Coordinator-driven navigation demo")]
struct Args {
    /// Honour reduce-motion: no transition animates
    #[arg(long)]
    reduce_motion: bool,

    /// Turn all transition animations off
    #[arg(long)]
    no_animations: bool,

    /// Log verbosity (overrides config and FLOWPILOT_LOG_LEVEL)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Falling back to default settings");
            config::FlowpilotConfig::default()
        }
    };
    let cli = CliOverrides {
        reduce_motion: args.reduce_motion,
        no_animations: args.no_animations,
        log_level: args.log_level.map(Into::into),
    };
    let resolved = config::resolve(&file_config, &cli);

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Some(dir) = resolved.log_file.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Flowpilot starting up (animations: {}, reduce motion: {})",
        resolved.animations,
        resolved.reduce_motion
    );

    // Coordinators are single-threaded; the response tasks they spawn are local
    let local = tokio::task::LocalSet::new();
    local.run_until(flowpilot::tui::run(resolved)).await
}
