//! cashlens - Entry Point

use cashlens::model::{AppError, HistoryRange, PlatformId, SortBy, ViewMode};
use cashlens::state::AppState;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// cashlens - browse store cashback offers across platforms
#[derive(Parser, Debug)]
#[command(name = "cashlens")]
#[command(version)]
#[command(about = "Browse store cashback offers across partner platforms")]
pub struct Args {
    /// Path to the JSON catalog (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Start with this search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Platform id to filter by (repeatable)
    #[arg(short = 'p', long = "platform")]
    pub platforms: Vec<i64>,

    /// Value mode: global or max
    #[arg(long)]
    pub mode: Option<String>,

    /// Sort order: cashback-desc, name-asc or name-desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Hide history entries that ended before this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub history_from: Option<NaiveDate>,

    /// Hide history entries that started after this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub history_to: Option<NaiveDate>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the list as plain text instead of starting the TUI
    #[arg(long)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cashlens::config::load_config_with_precedence(args.config.clone())?;
        let merged = cashlens::config::merge_config(config_file);
        let with_env = cashlens::config::apply_env_overrides(merged);

        cashlens::config::apply_cli_overrides(
            with_env,
            args.mode.as_deref().map(ViewMode::parse_lenient),
            args.sort.as_deref().map(SortBy::parse_lenient),
            args.platforms.iter().copied().map(PlatformId::new).collect(),
        )
    };

    cashlens::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = cashlens::source::detect_input_source(args.file.clone())?;
    let catalog = input_source.load()?;
    let filter = config.initial_filter(args.query.as_deref());

    if args.print {
        let view = cashlens::view_state::recompute(&catalog.stores, &filter);
        print!(
            "{}",
            cashlens::view::render_plain(&catalog, &filter, &view, config.display_offset)
        );
        return Ok(());
    }

    let history_range = HistoryRange {
        start: args.history_from,
        end: args.history_to,
    };
    let app_state = AppState::new(catalog, filter)
        .with_display_offset(config.display_offset)
        .with_history_range(history_range);
    cashlens::view::run_with_state(app_state)?;

    Ok(())
}
