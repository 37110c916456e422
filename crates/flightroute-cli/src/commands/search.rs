//! Airport search and listing.

use anyhow::Result;

use flightroute_cli::output::OutputFormat;
use flightroute_cli::terminal::ColorPalette;

use crate::commands::DataOptions;

/// Handle the search subcommand: case-insensitive match on code or name.
pub fn handle_search(
    data: &DataOptions,
    format: OutputFormat,
    query: &str,
    limit: usize,
) -> Result<()> {
    let (_, catalog) = data.load()?;
    let matches = catalog.search(query, limit);
    println!(
        "{}",
        format.render_airports(&matches, &ColorPalette::detect())?
    );
    Ok(())
}

/// Handle the airports subcommand: list every loaded airport.
pub fn handle_list_airports(data: &DataOptions, format: OutputFormat) -> Result<()> {
    let (_, catalog) = data.load()?;
    let airports: Vec<_> = catalog.iter().collect();
    println!(
        "{}",
        format.render_airports(&airports, &ColorPalette::detect())?
    );
    Ok(())
}
