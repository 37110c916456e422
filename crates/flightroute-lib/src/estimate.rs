//! Flight time estimation from route distance and cruise settings.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::km_to_nm;

pub const DEFAULT_SPEED_KNOTS: f64 = 450.0;

/// Cruise speed and fixed buffer applied to every estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSettings {
    pub speed_knots: f64,
    /// Minutes added on top of the cruise time (taxi, climb, descent).
    pub extra_minutes: f64,
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            speed_knots: DEFAULT_SPEED_KNOTS,
            extra_minutes: 0.0,
        }
    }
}

impl FlightSettings {
    pub fn new(speed_knots: f64, extra_minutes: f64) -> Result<Self> {
        let settings = Self {
            speed_knots,
            extra_minutes,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.speed_knots.is_finite() || self.speed_knots <= 0.0 {
            return Err(Error::InvalidSettings {
                message: format!(
                    "speed must be a positive number of knots, got {}",
                    self.speed_knots
                ),
            });
        }
        if !self.extra_minutes.is_finite() || self.extra_minutes < 0.0 {
            return Err(Error::InvalidSettings {
                message: format!(
                    "extra minutes must be zero or positive, got {}",
                    self.extra_minutes
                ),
            });
        }
        Ok(())
    }
}

/// Distance and time for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightEstimate {
    pub distance_km: f64,
    pub distance_nm: f64,
    pub total_minutes: f64,
}

impl FlightEstimate {
    /// Cruise time is `nm / knots` hours; the buffer is added on top.
    pub fn new(distance_km: f64, settings: &FlightSettings) -> Self {
        let distance_nm = km_to_nm(distance_km);
        let total_minutes = distance_nm / settings.speed_knots * 60.0 + settings.extra_minutes;
        Self {
            distance_km,
            distance_nm,
            total_minutes,
        }
    }

    /// Whole hours and remaining minutes, rounded to the nearest minute.
    pub fn hours_minutes(&self) -> (u64, u64) {
        let minutes = self.total_minutes.max(0.0).round() as u64;
        (minutes / 60, minutes % 60)
    }

    /// Time formatted as `1h 43m`.
    pub fn formatted_time(&self) -> String {
        let (hours, minutes) = self.hours_minutes();
        format!("{hours}h {minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_before_splitting() {
        let settings = FlightSettings::new(60.0, 0.0).expect("valid");
        // 119.7 minutes would read "1h 60m" if the remainder were rounded alone.
        let estimate = FlightEstimate::new(119.7 * 1.852, &settings);
        assert_eq!(estimate.formatted_time(), "2h 0m");
    }

    #[test]
    fn adds_extra_minutes() {
        let settings = FlightSettings::new(450.0, 15.0).expect("valid");
        let estimate = FlightEstimate::new(450.0 * 1.852, &settings);
        assert!((estimate.distance_nm - 450.0).abs() < 1e-9);
        assert_eq!(estimate.formatted_time(), "1h 15m");
    }

    #[test]
    fn rejects_unusable_settings() {
        assert!(FlightSettings::new(0.0, 0.0).is_err());
        assert!(FlightSettings::new(-100.0, 0.0).is_err());
        assert!(FlightSettings::new(f64::NAN, 0.0).is_err());
        assert!(FlightSettings::new(450.0, -5.0).is_err());
    }
}
