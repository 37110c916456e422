use std::fmt::Write;

use serde::Serialize;

use crate::airports::Airport;
use crate::airways::Waypoint;
use crate::estimate::{FlightEstimate, FlightSettings};
use crate::routing::RouteResult;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Multi-line report.
    PlainText,
    /// Single line suitable for notes or logs.
    Note,
}

/// Departure or arrival airport in a summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    pub name: String,
}

impl RouteEndpoint {
    fn from_airport(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            icao: airport.icao.clone(),
            name: airport.name.clone(),
        }
    }

    fn display(&self) -> String {
        match &self.icao {
            Some(icao) => format!("{} ({} - {})", self.name, self.code, icao),
            None => format!("{} ({})", self.name, self.code),
        }
    }
}

/// Structured report of a computed route that consumers can render or
/// serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub from: RouteEndpoint,
    pub to: RouteEndpoint,
    pub route_type: String,
    pub route_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airway_id: Option<String>,
    pub waypoint_chain: String,
    pub waypoints: Vec<Waypoint>,
    pub settings: FlightSettings,
    pub estimate: FlightEstimate,
    pub flight_time: String,
}

impl RouteSummary {
    /// Build a summary from an already computed route.
    pub fn from_route(
        from: &Airport,
        to: &Airport,
        route: &RouteResult,
        settings: &FlightSettings,
    ) -> Self {
        let estimate = FlightEstimate::new(route.distance_km(), settings);
        Self {
            from: RouteEndpoint::from_airport(from),
            to: RouteEndpoint::from_airport(to),
            route_type: route.route_type().to_string(),
            route_name: route.name.clone(),
            airway_id: route.airway_id.clone(),
            waypoint_chain: route.waypoint_chain(),
            waypoints: route.waypoints.clone(),
            settings: *settings,
            flight_time: estimate.formatted_time(),
            estimate,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.airway_id.is_none()
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Note => self.render_note(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "From: {}", self.from.display());
        let _ = writeln!(buffer, "To:   {}", self.to.display());
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Route type: {}", self.route_type);
        if !self.is_direct() {
            let enroute = self.waypoints.len().saturating_sub(2);
            let _ = writeln!(buffer, "Airway: {} ({} waypoints)", self.route_name, enroute);
        }
        let _ = writeln!(buffer, "Route: {}", self.waypoint_chain);
        let _ = writeln!(
            buffer,
            "Distance: {:.1} km / {:.1} NM",
            self.estimate.distance_km, self.estimate.distance_nm
        );
        let _ = writeln!(
            buffer,
            "Cruise: {} kt, +{} min",
            self.settings.speed_knots, self.settings.extra_minutes
        );
        let _ = write!(buffer, "Estimated flight time: {}", self.flight_time);
        buffer
    }

    fn render_note(&self) -> String {
        format!(
            "{} | {} | {:.1} km / {:.1} NM | {}",
            self.waypoint_chain,
            self.route_type,
            self.estimate.distance_km,
            self.estimate.distance_nm,
            self.flight_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn note_is_single_line() {
        let from = Airport::new("AAA", None, "Alpha", Coordinate::new_unchecked(0.0, 0.0));
        let to = Airport::new(
            "BBB",
            Some("KBBB".into()),
            "Bravo",
            Coordinate::new_unchecked(0.0, 1.0),
        );
        let route = RouteResult::direct(&from, &to);
        let summary = RouteSummary::from_route(&from, &to, &route, &FlightSettings::default());

        let note = summary.render(RouteRenderMode::Note);
        assert!(!note.contains('\n'));
        assert!(note.starts_with("AAA → BBB | Direct Route | 111.2 km"));

        let plain = summary.render(RouteRenderMode::PlainText);
        assert!(plain.contains("To:   Bravo (BBB - KBBB)"));
        assert!(!plain.contains("Airway:"));
    }
}
