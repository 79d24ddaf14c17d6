use bmt_utils::date_range::DateRange;
use chrono::NaiveDate;
use chrono_tz::Tz;

const START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2019, 8, 24) {
    Some(date) => date,
    None => panic!("invalid event start date"),
};

const END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2019, 9, 3) {
    Some(date) => date,
    None => panic!("invalid event end date"),
};

/// Where and when the recordings were made.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSite {
    pub name: &'static str,
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
    /// Meters above sea level
    pub elevation: f64,
    /// Zone every timestamp is displayed in
    pub display_timezone: Tz,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EventSite {
    /// Black Rock City, Burning Man 2019 (Aug 24 - Sep 3).
    pub fn burning_man_2019() -> EventSite {
        EventSite {
            name: "Black Rock City",
            latitude: 40.7864,
            longitude: -119.2065,
            elevation: 1190.0,
            display_timezone: chrono_tz::America::Los_Angeles,
            start_date: START_DATE,
            end_date: END_DATE,
        }
    }

    /// Every day of the event, inclusive.
    pub fn days(&self) -> DateRange {
        DateRange(self.start_date, self.end_date)
    }
}
