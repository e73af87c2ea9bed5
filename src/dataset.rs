//! Partition keys for the NYC TLC trip record archive.
//!
//! A [`DatasetKey`] names one monthly file of one taxi service and knows how
//! to turn itself into a download URL.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::DatasetError;

/// Root of the public release archive mirroring the TLC trip data.
pub const DEFAULT_BASE_URL: &str = "https://github.com/DataTalksClub/nyc-tlc-data/releases/download";

/// Taxi dataset category. Its lowercase name is both the release tag and the
/// filename prefix in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Yellow,
    Green,
    Fhv,
    Fhvhv,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Yellow => "yellow",
            Service::Green => "green",
            Service::Fhv => "fhv",
            Service::Fhvhv => "fhvhv",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yellow" => Ok(Service::Yellow),
            "green" => Ok(Service::Green),
            "fhv" => Ok(Service::Fhv),
            "fhvhv" => Ok(Service::Fhvhv),
            _ => Err(DatasetError::UnknownService(s.to_string())),
        }
    }
}

/// One (service, year, month) partition of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetKey {
    pub service: Service,
    pub year: i32,
    pub month: u32,
}

impl DatasetKey {
    /// Builds a key, rejecting months outside `1..=12`.
    pub fn new(service: Service, year: i32, month: u32) -> Result<Self, DatasetError> {
        if !(1..=12).contains(&month) {
            return Err(DatasetError::InvalidMonth(month));
        }
        Ok(Self {
            service,
            year,
            month,
        })
    }

    /// Month zero-padded to two digits, as it appears in archive filenames.
    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Archive filename, e.g. `yellow_tripdata_2021-03.csv.gz`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_tripdata_{}-{}.csv.gz",
            self.service,
            self.year,
            self.month_str()
        )
    }

    /// Download URL under `base`. A trailing slash on `base` is ignored.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.service,
            self.file_name()
        )
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{:02}", self.service, self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_pads_month() {
        let key = DatasetKey::new(Service::Yellow, 2021, 3).unwrap();
        assert_eq!(
            key.url(DEFAULT_BASE_URL),
            "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/yellow/yellow_tripdata_2021-03.csv.gz"
        );
    }

    #[test]
    fn test_url_two_digit_month_untouched() {
        let key = DatasetKey::new(Service::Green, 2020, 12).unwrap();
        assert!(key.url("http://localhost").ends_with("/green/green_tripdata_2020-12.csv.gz"));
    }

    #[test]
    fn test_url_trailing_slash_on_base() {
        let key = DatasetKey::new(Service::Fhv, 2019, 1).unwrap();
        assert_eq!(
            key.url("http://localhost:8080/"),
            "http://localhost:8080/fhv/fhv_tripdata_2019-01.csv.gz"
        );
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(
            DatasetKey::new(Service::Yellow, 2020, 0),
            Err(DatasetError::InvalidMonth(0))
        ));
        assert!(matches!(
            DatasetKey::new(Service::Yellow, 2020, 13),
            Err(DatasetError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_service_from_str() {
        assert_eq!("Yellow".parse::<Service>().unwrap(), Service::Yellow);
        assert_eq!(" fhvhv ".parse::<Service>().unwrap(), Service::Fhvhv);
        assert!("purple".parse::<Service>().is_err());
    }

    #[test]
    fn test_display() {
        let key = DatasetKey::new(Service::Green, 2020, 7).unwrap();
        assert_eq!(key.to_string(), "green 2020-07");
    }
}
