use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadtrip_lib::{
    load_atlas, plan_route, CostMode, Error as LibError, RouteRenderMode, RouteRequest,
    RouteSummary,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road network route finder")]
struct Cli {
    /// Directory holding road-segments.txt and city-gps.txt.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Output rendering.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two named locations.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Cost mode: segments, distance, time, or delivery.
        #[arg(long)]
        mode: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Compact,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route { from, to, mode } => {
            handle_route(&cli.data_dir, cli.format, &from, &to, &mode)
        }
    }
}

fn handle_route(
    data_dir: &Path,
    format: OutputFormat,
    from: &str,
    to: &str,
    mode: &str,
) -> Result<()> {
    let mode = CostMode::from_str(mode)?;
    let atlas = load_atlas(data_dir)
        .with_context(|| format!("failed to load road network from {}", data_dir.display()))?;

    let request = RouteRequest::new(from, to, mode);
    let plan = match plan_route(&atlas, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(err)),
    };

    let summary =
        RouteSummary::from_plan(&atlas, &plan).context("failed to build route summary")?;

    match format {
        OutputFormat::Text => print!("{}", summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Compact => print!("{}", summary.render(RouteRenderMode::Compact)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn handle_route_failure(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownLocation {
            ref name,
            ref suggestions,
        } => anyhow::anyhow!(format_unknown_location_message(name, suggestions)),
        LibError::UnknownGoal { name } => anyhow::anyhow!(
            "Goal location '{name}' has no entry in the GPS file, so no route can target it."
        ),
        LibError::RouteNotFound { start, goal } => anyhow::anyhow!(
            "No route found between {start} and {goal}. The segment file does not connect them."
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    if !suggestions.is_empty() {
        let formatted = if suggestions.len() == 1 {
            format!("Did you mean '{}'?", suggestions[0])
        } else {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Did you mean one of: {}?", joined)
        };
        message.push(' ');
        message.push_str(&formatted);
    }
    message
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
