//! Per-year row totals across monthly partitions.
//!
//! Every month is fetched and decoded on its own. A failing month is logged
//! and contributes nothing; the run always reaches the total.

use serde::{Serialize, Serializer};
use tracing::{error, info, warn};

use crate::dataset::{DatasetKey, Service};
use crate::decode;
use crate::error::PartitionError;
use crate::fetch::{HttpClient, fetch_partition};
use crate::output::format_thousands;

/// Result of processing one month.
#[derive(Debug, Serialize)]
pub struct MonthOutcome {
    pub month: u32,
    #[serde(serialize_with = "serialize_outcome")]
    pub result: Result<u64, PartitionError>,
}

fn serialize_outcome<S: Serializer>(
    result: &Result<u64, PartitionError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Outcome<'a> {
        Rows(u64),
        Error(&'a str),
    }

    match result {
        Ok(rows) => Outcome::Rows(*rows).serialize(serializer),
        Err(e) => Outcome::Error(&e.to_string()).serialize(serializer),
    }
}

/// Month-by-month row counts for one (service, year).
#[derive(Debug, Serialize)]
pub struct YearTally {
    pub service: Service,
    pub year: i32,
    pub months: Vec<MonthOutcome>,
}

impl YearTally {
    /// Sum of rows over the months that succeeded.
    pub fn total(&self) -> u64 {
        self.months
            .iter()
            .filter_map(|m| m.result.as_ref().ok())
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &MonthOutcome> {
        self.months.iter().filter(|m| m.result.is_err())
    }

    pub fn succeeded(&self) -> usize {
        self.months.iter().filter(|m| m.result.is_ok()).count()
    }
}

/// Counts rows for each of `months`, returning the total of the months that
/// succeeded.
pub async fn count_rows<C: HttpClient>(
    client: &C,
    base_url: &str,
    service: Service,
    year: i32,
    months: &[u32],
) -> u64 {
    tally_rows(client, base_url, service, year, months)
        .await
        .total()
}

/// Counts rows for each of `months` in order and keeps every month's outcome.
#[tracing::instrument(skip(client, base_url, service), fields(service = %service))]
pub async fn tally_rows<C: HttpClient>(
    client: &C,
    base_url: &str,
    service: Service,
    year: i32,
    months: &[u32],
) -> YearTally {
    info!("--- Processing {} taxi data for {} ---", service, year);

    let mut tally = YearTally {
        service,
        year,
        months: Vec::with_capacity(months.len()),
    };

    for &month in months {
        let result = count_month(client, base_url, service, year, month).await;
        match &result {
            Ok(rows) => info!(month, rows, "Month {:02}: {} rows", month, rows),
            Err(e) => error!(
                service = %service,
                year,
                month,
                error = %e,
                "Error processing {}-{:02}: {}",
                year,
                month,
                e
            ),
        }
        tally.months.push(MonthOutcome { month, result });
    }

    let total = tally.total();
    info!(
        total,
        succeeded = tally.succeeded(),
        failed = tally.months.len() - tally.succeeded(),
        "Total rows for {} {}: {}",
        service,
        year,
        format_thousands(total)
    );

    tally
}

async fn count_month<C: HttpClient>(
    client: &C,
    base_url: &str,
    service: Service,
    year: i32,
    month: u32,
) -> Result<u64, PartitionError> {
    let key = DatasetKey::new(service, year, month)?;
    let bytes = fetch_partition(client, base_url, &key).await?;
    let shape = decode::count_rows(&bytes)?;

    if shape.short_rows > 0 {
        warn!(
            partition = %key,
            short_rows = shape.short_rows,
            columns = shape.columns,
            "Rows with missing trailing fields"
        );
    }

    Ok(shape.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatasetError, FetchError};
    use reqwest::StatusCode;

    fn outcome(month: u32, result: Result<u64, PartitionError>) -> MonthOutcome {
        MonthOutcome { month, result }
    }

    fn not_found(month: u32) -> PartitionError {
        FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: format!("http://host/yellow/yellow_tripdata_2020-{:02}.csv.gz", month),
        }
        .into()
    }

    #[test]
    fn test_total_skips_failures() {
        let tally = YearTally {
            service: Service::Yellow,
            year: 2020,
            months: vec![
                outcome(1, Ok(100)),
                outcome(2, Err(not_found(2))),
                outcome(3, Ok(50)),
            ],
        };

        assert_eq!(tally.total(), 150);
        assert_eq!(tally.succeeded(), 2);
        let failed: Vec<u32> = tally.failures().map(|m| m.month).collect();
        assert_eq!(failed, vec![2]);
    }

    #[test]
    fn test_empty_tally_is_zero() {
        let tally = YearTally {
            service: Service::Green,
            year: 2020,
            months: vec![],
        };
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.failures().count(), 0);
    }

    #[test]
    fn test_tally_serializes_outcomes() {
        let tally = YearTally {
            service: Service::Green,
            year: 2020,
            months: vec![
                outcome(1, Ok(7)),
                outcome(13, Err(DatasetError::InvalidMonth(13).into())),
            ],
        };

        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["service"], "green");
        assert_eq!(json["months"][0]["result"]["rows"], 7);
        assert_eq!(
            json["months"][1]["result"]["error"],
            "month must be between 1 and 12, got 13"
        );
    }

    #[tokio::test]
    async fn test_invalid_month_contributes_zero_without_request() {
        // An unreachable base proves no request is attempted for month 13.
        let client = crate::fetch::BasicClient::new().unwrap();
        let tally = tally_rows(&client, "http://127.0.0.1:9", Service::Yellow, 2020, &[13]).await;

        assert_eq!(tally.total(), 0);
        assert!(matches!(
            tally.months[0].result,
            Err(PartitionError::Dataset(DatasetError::InvalidMonth(13)))
        ));
    }
}
