//! Listening History - Main entry point
//!
//! Loads a directory of streaming-history exports and prints the listening
//! dashboard for a period.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use listening_history::{
    analytics, display,
    error::Result,
    selector::{self, YearSelector},
    Config, ListeningHistory, APP_NAME,
};

#[derive(Parser)]
#[command(name = "listening-history")]
#[command(author, version, about = "Listening statistics from streaming-history exports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory of export files (overrides the configured one)
    #[arg(short, long, global = true, env = "LISTENING_HISTORY_DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show listening statistics
    Stats {
        /// Show stats for a specific year
        #[arg(long)]
        year: Option<i32>,

        /// Show stats for a selector value ("All Time" or a year)
        #[arg(long)]
        period: Option<String>,

        /// Show all-time stats
        #[arg(long)]
        all_time: bool,

        /// Number of items to show in top lists (1-100)
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=100))]
        limit: Option<u16>,
    },

    /// List the selectable periods
    Years,

    /// Show the totals computed at load time
    Summary,

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{APP_NAME}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Runs before loading so a broken config file can be replaced
    if matches!(cli.command, Some(Commands::Config { init: true, .. })) {
        let path = init_config(cli.config.as_deref())?;
        println!("Created default configuration at {}", path.display());
        return Ok(());
    }

    // Load and validate configuration
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.validate()?;

    if cli.data_dir.is_some() {
        config.data.dir.clone_from(&cli.data_dir);
    }

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.general.log_level.to_lowercase())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Stats {
            year,
            period,
            all_time,
            limit,
        }) => {
            let selector = selector::from_cli_flags(all_time, period.as_deref(), year)?;
            let limit = limit.map_or(config.display.limit, usize::from);
            run_stats(&config, selector, limit)
        }

        Some(Commands::Years) => {
            let history = load_history(&config)?;
            let options = selector::options(&history.years());
            display::display_selector(&options, YearSelector::AllTime);
            Ok(())
        }

        Some(Commands::Summary) => {
            let history = load_history(&config)?;
            display::print_section(&format!("DATA - {}", history.dir().display()));
            display::display_load_summary(history.summary());
            Ok(())
        }

        Some(Commands::Config { show, .. }) => {
            if show {
                let contents = toml::to_string_pretty(&config)?;
                println!("{contents}");
            } else {
                println!("Configuration path: {}", Config::config_path()?.display());
            }
            Ok(())
        }

        None => {
            // Default: all-time stats
            run_stats(&config, YearSelector::AllTime, config.display.limit)
        }
    }
}

/// Write the default configuration to `path`, or to the default location.
fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    Config::default().save_to(&path)?;
    Ok(path)
}

fn load_history(config: &Config) -> Result<ListeningHistory> {
    let data_dir = config.data_dir()?;
    tracing::debug!("Reading exports from {}", data_dir.display());
    ListeningHistory::load_with_extension(&data_dir, config.extension())
}

fn run_stats(config: &Config, selector: YearSelector, limit: usize) -> Result<()> {
    let history = load_history(config)?;
    let show_bars = config.display.show_bars;

    display::print_banner(selector);

    display::print_section_simple("PERIOD");
    display::display_selector(&selector::options(&history.years()), selector);

    let selection = history.select(selector);
    if selection.is_empty() {
        println!("\nNo listening data found for {selector}.");
        return Ok(());
    }

    display::print_section_simple("OVERVIEW");
    display::display_overview(&analytics::overview(&selection));

    display::print_section_simple(&format!("TOP {limit} SONGS"));
    display::display_top_songs(&analytics::top_songs(&selection, limit), show_bars);

    display::print_section_simple(&format!("TOP {limit} ARTISTS"));
    display::display_top_artists(&analytics::top_artists(&selection, limit), show_bars);

    display::print_section_simple(&format!("LISTENING HABITS - {selector}"));
    display::display_listening_habits(&analytics::yearly_breakdown(&selection));

    println!("\n{}\n", "*".repeat(50));

    Ok(())
}
