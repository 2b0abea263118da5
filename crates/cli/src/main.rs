mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use hindsight_interchange::EventView;

use crate::config::HindsightConfig;

/// View argument for the history subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ViewArg {
    Summary,
    Full,
    Compact,
    Json,
}

impl From<ViewArg> for EventView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Summary => EventView::Summary,
            ViewArg::Full => EventView::Full,
            ViewArg::Compact => EventView::Compact,
            ViewArg::Json => EventView::Json,
        }
    }
}

/// Navigational route kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RouteKind {
    Namespace,
    Workflows,
    Archival,
    Workflow,
    History,
    Event,
    Workers,
    StackTrace,
    Query,
    PendingActivities,
}

/// Workflow history inspector.
#[derive(Parser)]
#[command(name = "hindsight", version, about = "Workflow history inspector")]
struct Cli {
    /// Path to hindsight.toml (default: ./hindsight.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every payload in a history page and print it as JSON
    Decode {
        /// Path to the history page JSON file
        file: PathBuf,
        /// Remote data converter endpoint (overrides config and env)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Decode, group and print a history page
    History {
        /// Path to the history page JSON file
        file: PathBuf,
        /// Display mode (default: [display].default_view, then summary)
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
        /// Remote data converter endpoint (overrides config and env)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Print the canonical path for a navigational concept
    Route {
        /// Route kind
        #[arg(value_enum)]
        kind: RouteKind,
        /// Namespace (default: [display].namespace)
        #[arg(long)]
        namespace: Option<String>,
        /// Workflow id
        #[arg(long)]
        workflow: Option<String>,
        /// Run id
        #[arg(long)]
        run: Option<String>,
        /// Event history view tag
        #[arg(long)]
        view: Option<String>,
        /// Event id
        #[arg(long)]
        event_id: Option<String>,
        /// Trailing endpoint segment
        #[arg(long)]
        endpoint: Option<String>,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Decode { file, endpoint } => {
            let converter = converter_config(&config, endpoint);
            commands::decode::cmd_decode(&file, &converter, cli.quiet);
        }
        Commands::History {
            file,
            view,
            endpoint,
        } => {
            let converter = converter_config(&config, endpoint);
            let view = view
                .map(EventView::from)
                .or(config.display.default_view)
                .unwrap_or(EventView::Summary);
            commands::history::cmd_history(&file, view, &converter, cli.quiet);
        }
        Commands::Route {
            kind,
            namespace,
            workflow,
            run,
            view,
            event_id,
            endpoint,
            params,
        } => {
            let namespace = namespace.or_else(|| config.display.namespace.clone());
            let args = commands::route::RouteArgs {
                namespace,
                workflow,
                run,
                view,
                event_id,
                endpoint,
                params,
            };
            commands::route::cmd_route(kind, args, cli.quiet);
        }
    }
}

/// Config file, then environment, then `--endpoint`.
fn converter_config(
    config: &HindsightConfig,
    endpoint: Option<String>,
) -> hindsight_codec::ConverterConfig {
    config
        .data_converter
        .clone()
        .with_env_overrides()
        .with_overrides(endpoint, None)
}

/// Print an error message to stderr unless `quiet`.
pub(crate) fn report_error(msg: &str, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!("{}", msg);
}

/// Single-threaded runtime for the remote converter round trip.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
