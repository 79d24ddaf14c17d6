use crate::source::SourceDescriptor;
use crate::temperature::{TemperatureUnit, Temperatures};
use chrono::DateTime;
use chrono_tz::Tz;

/// A single reading, timestamped in the display timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub timestamp: DateTime<Tz>,
    pub temperature: Temperatures,
}

impl TemperatureReading {
    pub fn new(timestamp: DateTime<Tz>, temperature: Temperatures) -> TemperatureReading {
        TemperatureReading {
            timestamp,
            temperature,
        }
    }

    pub fn value(&self, unit: TemperatureUnit) -> f64 {
        unit.pick(&self.temperature)
    }
}

/// Readings of one source ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemperatureSeries(pub Vec<TemperatureReading>);

impl TemperatureSeries {
    /// Build a series, sorting the readings by timestamp.
    pub fn from_readings(mut readings: Vec<TemperatureReading>) -> TemperatureSeries {
        readings.sort_by_key(|r| r.timestamp);
        TemperatureSeries(readings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn readings(&self) -> &[TemperatureReading] {
        &self.0
    }

    /// Earliest and latest timestamps, if any readings exist.
    pub fn time_span(&self) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// (timestamp, value) pairs in the requested unit.
    pub fn values(&self, unit: TemperatureUnit) -> Vec<(DateTime<Tz>, f64)> {
        self.0.iter().map(|r| (r.timestamp, r.value(unit))).collect()
    }

    pub fn head(&self, n: usize) -> &[TemperatureReading] {
        &self.0[..n.min(self.0.len())]
    }
}

/// A descriptor together with the series loaded from its file.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub descriptor: SourceDescriptor,
    pub series: TemperatureSeries,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Los_Angeles;

    fn reading(hour: u32, celsius: f64) -> TemperatureReading {
        let timestamp = Los_Angeles
            .with_ymd_and_hms(2019, 8, 26, hour, 0, 0)
            .unwrap();
        TemperatureReading::new(
            timestamp,
            Temperatures::from_recorded(celsius, TemperatureUnit::Celsius),
        )
    }

    #[test]
    fn test_from_readings_sorts() {
        let series = TemperatureSeries::from_readings(vec![reading(9, 30.0), reading(7, 20.0)]);
        assert_eq!(series.readings()[0].temperature.celsius, 20.0);
        let (first, last) = series.time_span().unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_head_clamps() {
        let series = TemperatureSeries::from_readings(vec![reading(7, 20.0)]);
        assert_eq!(series.head(5).len(), 1);
        assert!(TemperatureSeries::default().time_span().is_none());
    }
}
