use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::commands::buildings::handle_buildings_command;
use wayfinder_cli::commands::emergency::handle_emergency_command;
use wayfinder_cli::commands::route::{handle_route_command, RouteCommandArgs};
use wayfinder_cli::commands::SiteArgs;
use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{HeuristicUnits, IdScheme};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor route planning over building waypoint graphs")]
struct Cli {
    /// Building JSON file or directory. Falls back to `WAYFINDER_DATA_PATH`,
    /// then the platform data directory.
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    /// How node ids are namespaced: `prefixed` (building-id) or `flat`.
    #[arg(long, global = true, default_value_t = IdScheme::Prefixed)]
    id_scheme: IdScheme,

    /// Units of the A* heuristic: `degrees` or `metres`.
    #[arg(long, global = true, default_value_t = HeuristicUnits::Degrees)]
    heuristic: HeuristicUnits,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two nodes.
    Route {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Only show the part of a cross-floor route on this floor.
        #[arg(long)]
        floor: Option<String>,
    },
    /// Compute the route to the nearest exit.
    Emergency {
        #[arg(long = "from")]
        from: String,
    },
    /// List loaded buildings.
    Buildings,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let site = SiteArgs {
        data_path: cli.data_path.as_deref(),
        id_scheme: cli.id_scheme,
        heuristic: cli.heuristic,
    };

    match cli.command {
        Command::Route { from, to, floor } => {
            handle_route_command(&site, &RouteCommandArgs { from, to, floor }, cli.format)
        }
        Command::Emergency { from } => handle_emergency_command(&site, &from, cli.format),
        Command::Buildings => handle_buildings_command(&site, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
