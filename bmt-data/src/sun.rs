//! Sunrise and sunset transitions for the event site.
//!
//! Each row pairs a day's sunrise with the previous day's sunset so the
//! interval between them can be shaded as night.

use crate::clock::mean_clock_time;
use crate::error::{DataError, Result};
use bmt_core::site::EventSite;
use bmt_utils::date_range::DateRange;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use log::debug;
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// Night shading interval: one day's sunset to the next day's sunrise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightSpan {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Solar events for one day in the display timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct SunTransition {
    pub date: NaiveDate,
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    pub previous_sunset: DateTime<Tz>,
}

impl SunTransition {
    pub fn night_span(&self) -> NightSpan {
        NightSpan {
            start: self.previous_sunset,
            end: self.sunrise,
        }
    }
}

/// One transition per day over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SunTransitionTable(pub Vec<SunTransition>);

impl SunTransitionTable {
    /// Transitions for every day of the event.
    pub fn for_site(site: &EventSite) -> Result<SunTransitionTable> {
        SunTransitionTable::compute(
            site.latitude,
            site.longitude,
            site.elevation,
            site.start_date,
            site.end_date,
            site.display_timezone,
        )
    }

    /// Transitions for each day from `start` through `end`.
    ///
    /// The first row's previous sunset comes from the day before `start`.
    pub fn compute(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        start: NaiveDate,
        end: NaiveDate,
        display_tz: Tz,
    ) -> Result<SunTransitionTable> {
        let coordinates = Coordinates::new(latitude, longitude).ok_or(
            DataError::InvalidCoordinates {
                latitude,
                longitude,
            },
        )?;
        let day_before = start - TimeDelta::days(1);
        let (_, mut previous_sunset) = solar_events(coordinates, elevation, day_before)?;

        let mut rows = Vec::new();
        for date in DateRange(start, end) {
            let (sunrise, sunset) = solar_events(coordinates, elevation, date)?;
            rows.push(SunTransition {
                date,
                sunrise: sunrise.with_timezone(&display_tz),
                sunset: sunset.with_timezone(&display_tz),
                previous_sunset: previous_sunset.with_timezone(&display_tz),
            });
            previous_sunset = sunset;
        }
        debug!("computed {} sun transitions from {} to {}", rows.len(), start, end);
        Ok(SunTransitionTable(rows))
    }

    pub fn rows(&self) -> &[SunTransition] {
        &self.0
    }

    pub fn night_spans(&self) -> Vec<NightSpan> {
        self.0.iter().map(SunTransition::night_span).collect()
    }

    /// Average local clock time of sunrise across the table.
    pub fn mean_sunrise(&self) -> Option<NaiveTime> {
        let times: Vec<NaiveTime> = self.0.iter().map(|t| t.sunrise.time()).collect();
        mean_clock_time(&times)
    }

    /// Average local clock time of sunset across the table.
    pub fn mean_sunset(&self) -> Option<NaiveTime> {
        let times: Vec<NaiveTime> = self.0.iter().map(|t| t.sunset.time()).collect();
        mean_clock_time(&times)
    }
}

fn solar_events(
    coordinates: Coordinates,
    elevation: f64,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let solar_day = SolarDay::new(coordinates, date).with_altitude(elevation);
    let sunrise = solar_day
        .event_time(SolarEvent::Sunrise)
        .ok_or(DataError::NoSolarEvent {
            date,
            event: "sunrise",
        })?;
    let sunset = solar_day
        .event_time(SolarEvent::Sunset)
        .ok_or(DataError::NoSolarEvent {
            date,
            event: "sunset",
        })?;
    Ok((sunrise, sunset))
}
