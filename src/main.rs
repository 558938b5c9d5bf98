//! usagebyuser: per-user disk usage reports from filesystem walk output.
//!
//! Run: `usagebyuser graph walk.txt` or `usagebyuser top walk.txt alice`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use usage_by_user::config::Config;
use usage_by_user::output::OutputSink;
use usage_by_user::report;
use usage_by_user::units::format_total;

/// Summarize a filesystem walk report by user.
#[derive(Parser, Debug)]
#[command(name = "usagebyuser")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Per-user disk usage pie chart and largest-path tables", long_about = None)]
struct Cli {
    /// Worker threads for parsing
    #[arg(short = 'j', long = "threads", value_name = "THREADS", global = true)]
    threads: Option<usize>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root prefix every reported path starts with
    #[arg(long, global = true)]
    root: Option<String>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare usage by user as a pie chart
    Graph {
        /// Text output of the filesystem walk
        file: PathBuf,

        /// PNG output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write an SVG with user names
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Get the largest paths for a user
    Top {
        /// Text output of the filesystem walk
        file: PathBuf,

        /// A unix user
        user: String,

        /// Write the HTML table to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        inline: bool,

        /// HTML output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
    if let Some(threads) = cli.threads {
        config.threads = threads.max(1);
    }
    if let Some(root) = &cli.root {
        config.root_prefix.clone_from(root);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Command::Graph { file, output, svg } => {
            if let Some(output) = output {
                config.chart.path = output;
            }
            if svg.is_some() {
                config.chart.svg = svg;
            }
            let summary = report::graph(&config, &file)
                .with_context(|| format!("graphing {}", file.display()))?;
            eprintln!(
                "{} of {} users charted ({} total) -> {}",
                summary.charted.len(),
                summary.users,
                format_total(summary.total_bytes),
                summary.chart_path.display()
            );
        }
        Command::Top {
            file,
            user,
            inline,
            output,
        } => {
            let sink = if inline {
                OutputSink::Inline
            } else {
                OutputSink::File(output.unwrap_or_else(|| config.table.path.clone()))
            };
            let summary = report::top(&config, &file, &user, &sink)
                .with_context(|| format!("listing paths for {user} in {}", file.display()))?;
            if let Some(path) = sink.path() {
                eprintln!(
                    "{} paths for {} ({} total) -> {}",
                    summary.rows,
                    summary.user,
                    format_total(summary.total_bytes),
                    path.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
