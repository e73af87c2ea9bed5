//! Gzip and CSV decoding of downloaded trip files.
//!
//! Trip files drift in layout from month to month, so rows are read as raw
//! byte records and no per-column type is ever inferred.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};
use flate2::read::MultiGzDecoder;
use serde::Serialize;

use crate::error::DecodeError;

/// Bytes in one mebibyte.
pub const MIB: f64 = 1024.0 * 1024.0;

/// Column and row counts of a decoded trip file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableShape {
    /// Fields in the header record.
    pub columns: usize,
    /// Data records, header excluded.
    pub rows: u64,
    /// Data records carrying fewer fields than the header.
    pub short_rows: u64,
}

/// Decompresses a whole gzip payload into memory.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    MultiGzDecoder::new(bytes).read_to_end(&mut out)?;
    Ok(out)
}

/// Uncompressed size in bytes of a gzip payload.
pub fn uncompressed_size(bytes: &[u8]) -> Result<u64, DecodeError> {
    Ok(decompress(bytes)?.len() as u64)
}

/// Counts the data rows of a gzip-compressed CSV file.
///
/// The first record is the header. Blank lines are skipped. A record with
/// fewer fields than the header is still a row; one with more is rejected.
///
/// # Errors
///
/// - [`DecodeError::Gzip`] when the compressed stream is unreadable
/// - [`DecodeError::NoColumns`] when the file holds no header
/// - [`DecodeError::Csv`] on malformed CSV
/// - [`DecodeError::RaggedRow`] on an over-long record
pub fn count_rows(bytes: &[u8]) -> Result<TableShape, DecodeError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(MultiGzDecoder::new(bytes));

    let columns = rdr.byte_headers().map_err(csv_error)?.len();
    if columns == 0 {
        return Err(DecodeError::NoColumns);
    }
    let mut shape = TableShape {
        columns,
        ..Default::default()
    };

    let mut record = ByteRecord::new();
    while rdr.read_byte_record(&mut record).map_err(csv_error)? {
        let found = record.len();
        if found > shape.columns {
            return Err(DecodeError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: shape.columns,
                found,
            });
        }
        if found < shape.columns {
            shape.short_rows += 1;
        }
        shape.rows += 1;
    }

    Ok(shape)
}

/// Read failures inside the csv reader come from the gzip layer underneath.
fn csv_error(err: csv::Error) -> DecodeError {
    if !err.is_io_error() {
        return DecodeError::Csv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DecodeError::Gzip(e),
        _ => unreachable!("is_io_error checked above"),
    }
}
