//! CLI for consul-debug-read — inspect a Consul debug bundle offline.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "consul-debug-read")]
#[command(about = "consul-debug-read — inspect agent, members and metrics of a consul debug bundle")]
#[command(version = debugread_core::VERSION)]
struct Cli {
    /// User config file (default: ~/.consul-debug-read/config.yaml)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Extracted debug bundle directory; overrides DebugDirectoryPath for this run
    #[arg(long, global = true)]
    debug_path: Option<PathBuf>,

    /// Only print results and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    silent: bool,

    /// Print debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Agent details from agent.json
    Agent {
        /// Node identity, version and raft state
        #[arg(long)]
        summary: bool,

        /// Full runtime configuration (DebugConfig) as JSON
        #[arg(long)]
        config: bool,
    },

    /// Cluster members from members.json, in `consul members` layout
    Members,

    /// Telemetry metric values captured in the bundle.
    /// Units and types are looked up in the published telemetry reference.
    Metrics {
        /// Metric name, matched as a substring of captured metric names
        #[arg(long)]
        name: Option<String>,

        /// Do not check --name against the telemetry reference
        #[arg(long, requires = "name")]
        skip_name_validation: bool,

        /// Sort rows by value, highest first
        #[arg(long, requires = "name")]
        sort_by_value: bool,

        /// List every documented metric with its unit and type
        #[arg(long, conflicts_with_all = ["name", "summary", "names"])]
        list: bool,

        /// Capture interval, duration and snapshot span of the bundle
        #[arg(long, conflicts_with = "name")]
        summary: bool,

        /// Distinct metric names present in the bundle
        #[arg(long, conflicts_with = "name")]
        names: bool,
    },

    /// Show or change the user config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved config
    Show,

    /// Point DebugDirectoryPath at an extracted bundle directory
    SetPath {
        /// Bundle directory
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.silent, cli.verbose);

    let ctx = commands::Context {
        config_file: cli.config_file,
        debug_path: cli.debug_path,
    };

    let result = match cli.command {
        Commands::Agent { summary, config } => commands::agent::run(&ctx, summary, config),
        Commands::Members => commands::members::run(&ctx),
        Commands::Metrics {
            name,
            skip_name_validation,
            sort_by_value,
            list,
            summary,
            names,
        } => commands::metrics::run(
            &ctx,
            commands::metrics::MetricsCommandConfig {
                name: name.as_deref(),
                validate: !skip_name_validation,
                sort_by_value,
                list,
                summary,
                names,
            },
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx),
            ConfigAction::SetPath { dir } => commands::config::set_path(&ctx, &dir),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
