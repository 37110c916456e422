//! Add-airport command handler.

use anyhow::{Context, Result};

use flightroute_lib::{Airport, Coordinate, NoAirways, Session};

use flightroute_cli::output::OutputFormat;

use crate::commands::DataOptions;

/// Arguments for the add-airport command.
#[derive(Debug, Clone)]
pub struct AddAirportArgs {
    pub code: String,
    pub icao: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Validate and persist a user airport next to the dataset.
pub fn handle_add_airport(
    data: &DataOptions,
    format: OutputFormat,
    args: &AddAirportArgs,
) -> Result<()> {
    let coordinate = Coordinate::new(args.latitude, args.longitude)?;
    let (paths, catalog) = data.load()?;
    let store = paths.custom_store();

    let mut session = Session::new(catalog, Box::new(NoAirways)).with_store(store);
    let airport = Airport::new(&args.code, args.icao.clone(), &args.name, coordinate);
    let added = session.add_airport(airport).with_context(|| {
        format!(
            "failed to add airport {}",
            args.code.trim().to_ascii_uppercase()
        )
    })?;

    println!("{}", format.render_added(added)?);
    Ok(())
}
