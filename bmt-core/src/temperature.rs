use crate::error::{Result, TemperatureError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert Fahrenheit to Celsius.
pub fn f2c(f: f64) -> f64 {
    (f - 32.0) * (5.0 / 9.0)
}

/// Convert Celsius to Fahrenheit.
pub fn c2f(c: f64) -> f64 {
    c * (9.0 / 5.0) + 32.0
}

/// Convert Celsius to Kelvin.
pub fn c2k(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

/// A temperature scale.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Parse the unit a source was recorded in. Only Celsius and Fahrenheit
    /// are accepted; Kelvin is always derived.
    pub fn parse_source_unit(declared: &str) -> Result<TemperatureUnit> {
        match declared.parse::<TemperatureUnit>()? {
            TemperatureUnit::Kelvin => Err(TemperatureError::UnsupportedUnit(declared.to_string())),
            unit => Ok(unit),
        }
    }

    /// Short symbol used in column names and axis labels.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Value of this unit out of a full set of conversions.
    pub fn pick(&self, temperatures: &Temperatures) -> f64 {
        match self {
            TemperatureUnit::Celsius => temperatures.celsius,
            TemperatureUnit::Fahrenheit => temperatures.fahrenheit,
            TemperatureUnit::Kelvin => temperatures.kelvin,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = TemperatureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            _ => Err(TemperatureError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "temperature {}", self.symbol())
    }
}

/// One temperature expressed in all three scales.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Temperatures {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl Temperatures {
    /// Fill in the missing scales from a value recorded in `unit`.
    pub fn from_recorded(value: f64, unit: TemperatureUnit) -> Temperatures {
        let celsius = match unit {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => f2c(value),
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        };
        let fahrenheit = match unit {
            TemperatureUnit::Fahrenheit => value,
            _ => c2f(celsius),
        };
        Temperatures {
            celsius,
            fahrenheit,
            kelvin: c2k(celsius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_celsius_round_trip() {
        for c in [-40.0, -17.5, 0.0, 21.3, 37.0, 48.9, 100.0] {
            assert!((f2c(c2f(c)) - c).abs() < EPSILON, "round trip failed for {c}");
        }
    }

    #[test]
    fn test_known_points() {
        assert!((c2f(100.0) - 212.0).abs() < EPSILON);
        assert!((f2c(32.0)).abs() < EPSILON);
        assert!((c2f(-40.0) + 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_fahrenheit_only_reading() {
        let t = Temperatures::from_recorded(98.6, TemperatureUnit::Fahrenheit);
        let expected_c = (98.6 - 32.0) * 5.0 / 9.0;
        assert_eq!(t.fahrenheit, 98.6);
        assert!((t.celsius - expected_c).abs() < EPSILON);
        assert!((t.kelvin - (expected_c + 273.15)).abs() < EPSILON);
    }

    #[test]
    fn test_celsius_only_reading() {
        let t = Temperatures::from_recorded(25.0, TemperatureUnit::Celsius);
        assert_eq!(t.celsius, 25.0);
        assert!((t.fahrenheit - 77.0).abs() < EPSILON);
        assert!((t.kelvin - 298.15).abs() < EPSILON);
    }

    #[test]
    fn test_parse_source_unit() {
        assert_eq!(
            TemperatureUnit::parse_source_unit("F").unwrap(),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!(
            TemperatureUnit::parse_source_unit("celsius").unwrap(),
            TemperatureUnit::Celsius
        );
        assert!(matches!(
            TemperatureUnit::parse_source_unit("K"),
            Err(TemperatureError::UnsupportedUnit(_))
        ));
        assert!(matches!(
            TemperatureUnit::parse_source_unit("R"),
            Err(TemperatureError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_display_matches_column_naming() {
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "temperature F");
    }
}
