//! Route command handler for estimating a flight between two airports.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use flightroute_lib::{
    AirwayCache, AirwayClient, AirwayLookup, ClientConfig, FlightSettings, NoAirways,
    OpenAipClient, Role, Session,
};

use flightroute_cli::output::OutputFormat;
use flightroute_cli::terminal::ColorPalette;

use crate::commands::DataOptions;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure airport code.
    pub from: String,
    /// Destination airport code.
    pub to: String,
    /// Cruise speed in knots.
    pub speed: f64,
    /// Minutes added to the cruise time.
    pub extra_minutes: f64,
    /// Skip the airway lookup.
    pub direct: bool,
    /// Detour ratio above which airway waypoints are discarded.
    pub max_detour: Option<f64>,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data: &DataOptions,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let settings = FlightSettings::new(args.speed, args.extra_minutes)?;
    if let Some(ratio) = args.max_detour {
        if !ratio.is_finite() || ratio < 0.0 {
            anyhow::bail!("max detour must be zero or a positive ratio, got {ratio}");
        }
    }
    let (_, catalog) = data.load()?;

    let mut session = Session::new(catalog, airway_lookup(args)?);
    session.select_airport(Role::From, &args.from)?;
    session.select_airport(Role::To, &args.to)?;

    let summary = session
        .compute_route(&settings)
        .context("failed to compute route")?;
    println!("{}", format.render_route(&summary, &ColorPalette::detect())?);
    Ok(())
}

/// Airway lookup for this run; without an API key only direct routes are
/// produced.
fn airway_lookup(args: &RouteCommandArgs) -> Result<Box<dyn AirwayLookup>> {
    if args.direct {
        return Ok(Box::new(NoAirways));
    }

    let config = ClientConfig::from_env();
    if !config.has_api_key() {
        info!("OPENAIP_API_KEY is not set; airway lookup disabled, using direct routes");
        return Ok(Box::new(NoAirways));
    }

    let client = OpenAipClient::new(config).context("failed to build OpenAIP client")?;
    let airways = AirwayClient::new(client, Arc::new(AirwayCache::default()));
    let airways = match args.max_detour {
        Some(ratio) => airways.with_max_detour(ratio),
        None => airways,
    };
    Ok(Box::new(airways))
}
