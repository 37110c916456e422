mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightroute_cli::output::OutputFormat;
use flightroute_lib::{DEFAULT_MAX_DETOUR, DEFAULT_SPEED_KNOTS};

use commands::airport::{handle_add_airport, AddAirportArgs};
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::search::{handle_list_airports, handle_search};
use commands::DataOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airport lookup and flight route estimation")]
struct Cli {
    /// Override the dataset directory or file path.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Keep only airports whose ICAO code starts with one of these prefixes
    /// (comma separated, e.g. `K,MM`).
    #[arg(long, value_delimiter = ',', global = true)]
    countries: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the best route and flight time between two airports.
    Route {
        /// Departure airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Cruise speed in knots.
        #[arg(long, default_value_t = DEFAULT_SPEED_KNOTS)]
        speed: f64,
        /// Minutes added for taxi, climb and descent.
        #[arg(long, default_value_t = 0.0)]
        extra_minutes: f64,
        /// Skip the airway lookup and fly direct.
        #[arg(long)]
        direct: bool,
        /// Ignore airway waypoints that lengthen the leg by more than this
        /// ratio (0.3 allows a 30% detour).
        #[arg(
            long,
            value_name = "RATIO",
            num_args = 0..=1,
            default_missing_value = DEFAULT_MAX_DETOUR.to_string()
        )]
        max_detour: Option<f64>,
    },
    /// Search airports by code or name.
    Search {
        query: String,
        /// Maximum number of results.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Add a custom airport to the local store.
    AddAirport {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        icao: Option<String>,
    },
    /// List the loaded airports.
    Airports,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data = DataOptions {
        data_dir: cli.data_dir,
        countries: cli.countries,
    };

    match cli.command {
        Command::Route {
            from,
            to,
            speed,
            extra_minutes,
            direct,
            max_detour,
        } => handle_route_command(
            &data,
            cli.format,
            &RouteCommandArgs {
                from,
                to,
                speed,
                extra_minutes,
                direct,
                max_detour,
            },
        ),
        Command::Search { query, limit } => handle_search(&data, cli.format, &query, limit),
        Command::AddAirport {
            code,
            name,
            lat,
            lon,
            icao,
        } => handle_add_airport(
            &data,
            cli.format,
            &AddAirportArgs {
                code,
                icao,
                name,
                latitude: lat,
                longitude: lon,
            },
        ),
        Command::Airports => handle_list_airports(&data, cli.format),
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
