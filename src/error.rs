//! Error types for fetching and decoding trip record partitions.

use reqwest::StatusCode;
use thiserror::Error;

/// A partition key could not be built.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("unknown taxi service '{0}'")]
    UnknownService(String),
}

/// The HTTP download of a partition failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{status} for url {url}")]
    Status { status: StatusCode, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The downloaded bytes could not be decompressed or read as CSV.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("gzip stream is malformed: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("csv content is unreadable: {0}")]
    Csv(#[from] csv::Error),

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("line {line}: expected {expected} fields, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Any failure while processing one partition.
#[derive(Error, Debug)]
pub enum PartitionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_url() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: "http://host/yellow/yellow_tripdata_2020-02.csv.gz".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("yellow_tripdata_2020-02.csv.gz"));
    }

    #[test]
    fn test_partition_error_is_transparent() {
        let err: PartitionError = DatasetError::InvalidMonth(13).into();
        assert_eq!(err.to_string(), "month must be between 1 and 12, got 13");
    }
}
