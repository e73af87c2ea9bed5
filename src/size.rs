//! Uncompressed size of a single partition.

use serde::Serialize;
use tracing::info;

use crate::dataset::{DatasetKey, Service};
use crate::decode;
use crate::error::PartitionError;
use crate::fetch::{HttpClient, fetch_partition};
use crate::output::{format_mib, to_mib};

/// Compressed and uncompressed byte sizes of one partition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeReport {
    pub key: DatasetKey,
    pub compressed_bytes: u64,
    pub uncompressed_bytes: u64,
}

impl SizeReport {
    pub fn mib(&self) -> f64 {
        to_mib(self.uncompressed_bytes)
    }

    /// Uncompressed size in MiB with one decimal place.
    pub fn mib_display(&self) -> String {
        format_mib(self.uncompressed_bytes)
    }
}

/// Downloads one partition, decompresses it in memory and logs its size.
///
/// # Errors
///
/// Any failure to build the key, fetch or decompress is returned as is.
#[tracing::instrument(skip(client, base_url, service), fields(service = %service))]
pub async fn check_uncompressed_size<C: HttpClient>(
    client: &C,
    base_url: &str,
    service: Service,
    year: i32,
    month: u32,
) -> Result<SizeReport, PartitionError> {
    let key = DatasetKey::new(service, year, month)?;
    info!("--- Checking size for {} {}-{} ---", service, year, key.month_str());

    let bytes = fetch_partition(client, base_url, &key).await?;
    let uncompressed_bytes = decode::uncompressed_size(&bytes)?;

    let report = SizeReport {
        key,
        compressed_bytes: bytes.len() as u64,
        uncompressed_bytes,
    };
    info!(
        compressed_bytes = report.compressed_bytes,
        uncompressed_bytes,
        "Uncompressed size: {} MiB",
        report.mib_display()
    );

    Ok(report)
}
