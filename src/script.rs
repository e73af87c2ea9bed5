//! The fixed sequence of checks run by default.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::counter::tally_rows;
use crate::dataset::Service;
use crate::fetch::HttpClient;
use crate::output::print_pretty;
use crate::size::{SizeReport, check_uncompressed_size};

/// One row-count aggregation in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowQuery {
    pub service: Service,
    pub year: i32,
    pub months: &'static [u32],
}

const ALL_MONTHS: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Partition whose uncompressed size is reported first.
pub const SIZE_CHECK: (Service, i32, u32) = (Service::Yellow, 2020, 12);

/// Row-count aggregations, run in order after the size check.
pub const ROW_QUERIES: &[RowQuery] = &[
    RowQuery {
        service: Service::Yellow,
        year: 2020,
        months: ALL_MONTHS,
    },
    RowQuery {
        service: Service::Green,
        year: 2020,
        months: ALL_MONTHS,
    },
    RowQuery {
        service: Service::Yellow,
        year: 2021,
        months: &[3],
    },
];

/// Total for one (service, year) aggregation.
#[derive(Debug, Serialize)]
pub struct RowTotal {
    pub service: Service,
    pub year: i32,
    pub months: Vec<u32>,
    pub failed_months: Vec<u32>,
    pub total_rows: u64,
}

/// Everything the script computed.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub size: SizeReport,
    pub totals: Vec<RowTotal>,
}

/// Runs the size check, then every row-count aggregation.
///
/// # Errors
///
/// A failed size check ends the run. Row-count failures never do.
pub async fn run_script<C: HttpClient>(client: &C, base_url: &str) -> Result<RunSummary> {
    let (service, year, month) = SIZE_CHECK;
    let size = check_uncompressed_size(client, base_url, service, year, month).await?;
    print_pretty(&size);

    let mut totals = Vec::with_capacity(ROW_QUERIES.len());
    for query in ROW_QUERIES {
        let tally = tally_rows(client, base_url, query.service, query.year, query.months).await;
        totals.push(RowTotal {
            service: tally.service,
            year: tally.year,
            months: query.months.to_vec(),
            failed_months: tally.failures().map(|m| m.month).collect(),
            total_rows: tally.total(),
        });
    }

    info!(aggregations = totals.len(), "Script finished");

    Ok(RunSummary {
        timestamp: Utc::now(),
        size,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_covers_expected_partitions() {
        assert_eq!(SIZE_CHECK, (Service::Yellow, 2020, 12));
        assert_eq!(ROW_QUERIES.len(), 3);
        assert_eq!(ROW_QUERIES[0].months, ALL_MONTHS);
        assert_eq!(ROW_QUERIES[1].service, Service::Green);
        assert_eq!(ROW_QUERIES[2].year, 2021);
        assert_eq!(ROW_QUERIES[2].months, &[3]);
    }
}
