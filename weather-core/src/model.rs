use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// A temperature on the Kelvin scale, the unit every provider normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn from_celsius(celsius: f64) -> Self {
        Self(celsius + CELSIUS_OFFSET)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_celsius(self) -> f64 {
        self.0 - CELSIUS_OFFSET
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}K", self.0)
    }
}

/// Success body of `GET /weather/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReport {
    pub city: String,
    pub temp: Kelvin,
    /// Wall-clock time spent answering, e.g. `"1.52ms"`.
    pub took: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn freezing_point_is_273_15() {
        assert!(close(Kelvin::from_celsius(0.0).value(), 273.15));
    }

    #[test]
    fn boiling_point_is_373_15() {
        assert!(close(Kelvin::from_celsius(100.0).value(), 373.15));
    }

    #[test]
    fn celsius_roundtrip_through_kelvin() {
        assert!(close(Kelvin::from_celsius(16.85).to_celsius(), 16.85));
    }

    #[test]
    fn report_serializes_temp_as_plain_number() {
        let report = TemperatureReport {
            city: "Boston".into(),
            temp: Kelvin(290.0),
            took: "1ms".into(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["city"], "Boston");
        assert_eq!(json["temp"], 290.0);
        assert_eq!(json["took"], "1ms");
    }
}
