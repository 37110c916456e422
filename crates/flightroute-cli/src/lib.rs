//! Flightroute CLI library.
//!
//! Terminal styling and output formatting shared by the `flightroute-cli`
//! subcommands.

pub mod output;
pub mod terminal;
