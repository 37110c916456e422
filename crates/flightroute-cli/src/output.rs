//! Output formatting for route reports and airport listings.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;

use flightroute_lib::{Airport, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON for scripting.
    Json,
    /// One line per result.
    Note,
}

impl OutputFormat {
    /// Render a route summary.
    pub fn render_route(&self, summary: &RouteSummary, palette: &ColorPalette) -> Result<String> {
        Ok(match self {
            OutputFormat::Text => {
                colorize_report(&summary.render(RouteRenderMode::PlainText), summary, palette)
            }
            OutputFormat::Json => serde_json::to_string_pretty(summary)?,
            OutputFormat::Note => summary.render(RouteRenderMode::Note),
        })
    }

    /// Render a list of airports.
    pub fn render_airports(&self, airports: &[&Airport], palette: &ColorPalette) -> Result<String> {
        if *self == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(airports)?);
        }
        if airports.is_empty() {
            return Ok("No airports found.".to_string());
        }

        let mut buffer = String::new();
        for (idx, airport) in airports.iter().enumerate() {
            if idx > 0 {
                buffer.push('\n');
            }
            match self {
                OutputFormat::Note => {
                    let _ = write!(buffer, "{}: {}", airport.label(), airport.name);
                }
                _ => {
                    let code = palette.paint(palette.white_bold, &format!("{:<4}", airport.code));
                    let _ = write!(
                        buffer,
                        "{} {:<4} {} ({:.4}, {:.4})",
                        code,
                        airport.icao.as_deref().unwrap_or("-"),
                        airport.name,
                        airport.latitude,
                        airport.longitude
                    );
                }
            }
        }
        Ok(buffer)
    }

    /// Render confirmation for a newly added airport.
    pub fn render_added(&self, airport: &Airport) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(airport)?,
            _ => format!(
                "Added {}: {} ({:.4}, {:.4})",
                airport.label(),
                airport.name,
                airport.latitude,
                airport.longitude
            ),
        })
    }
}

/// Paint labels and key values of a plain-text route report.
fn colorize_report(report: &str, summary: &RouteSummary, palette: &ColorPalette) -> String {
    report
        .lines()
        .map(|line| match line.split_once(':') {
            Some((label, value)) if !label.is_empty() => {
                let value = match label {
                    "Route type" if summary.is_direct() => palette.paint(palette.green, value),
                    "Route type" | "Airway" => palette.paint(palette.cyan, value),
                    "Estimated flight time" => palette.paint(palette.white_bold, value),
                    _ => value.to_string(),
                };
                format!("{}{}", palette.paint(palette.gray, &format!("{label}:")), value)
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
