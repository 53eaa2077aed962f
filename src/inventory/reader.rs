//! Header parsing and chunked decompression of the inventory body.

use crate::error::{LookupError, Result};
use flate2::bufread::ZlibDecoder;
use std::io::{BufRead, BufReader};

/// First line of every supported inventory.
pub const INVENTORY_MAGIC: &str = "# Sphinx inventory version 2";

/// Length of the `"# Project: "` prefix on line 2.
const PROJECT_PREFIX_LEN: usize = 11;

/// Length of the `"# Version: "` prefix on line 3.
const VERSION_PREFIX_LEN: usize = 11;

/// Default read size for the compressed body.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// The four plain-text lines preceding the compressed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryHeader {
    pub project: String,
    pub version: String,
}

/// Read one header line, without its line terminator.
fn read_header_line<R: BufRead>(reader: &mut R, line_no: usize) -> Result<String> {
    let mut buf = Vec::new();
    let read = reader
        .read_until(b'\n', &mut buf)
        .map_err(|e| LookupError::Format(format!("failed to read header line {}: {}", line_no, e)))?;

    if read == 0 {
        return Err(LookupError::Format(format!(
            "stream ended before header line {}",
            line_no
        )));
    }

    let line = String::from_utf8(buf)
        .map_err(|_| LookupError::Format(format!("header line {} is not UTF-8", line_no)))?;
    Ok(line.trim_end().to_string())
}

/// Consume and validate the four header lines.
///
/// Leaves `reader` positioned at the first byte of the compressed body.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<InventoryHeader> {
    let magic = read_header_line(reader, 1)?;
    if magic != INVENTORY_MAGIC {
        return Err(LookupError::Format(format!(
            "unsupported inventory version line '{}'",
            magic
        )));
    }

    let project = read_header_line(reader, 2)?;
    let project = project.get(PROJECT_PREFIX_LEN..).unwrap_or_default().to_string();

    let version = read_header_line(reader, 3)?;
    let version = version.get(VERSION_PREFIX_LEN..).unwrap_or_default().to_string();

    let compression = read_header_line(reader, 4)?;
    if !compression.contains("zlib") {
        return Err(LookupError::Format(
            "inventory body is not zlib-compressed".to_string(),
        ));
    }

    Ok(InventoryHeader { project, version })
}

/// Inflate the body `chunk_size` bytes at a time, yielding one record line per item.
///
/// Lines are produced as soon as the bytes covering them have been inflated,
/// so the decompressed body is never held in memory as a whole.
pub fn compressed_lines<R: BufRead>(
    reader: R,
    chunk_size: usize,
) -> impl Iterator<Item = Result<Vec<u8>>> {
    BufReader::with_capacity(chunk_size.max(1), ZlibDecoder::new(reader))
        .split(b'\n')
        .map(|line| line.map_err(|e| LookupError::Format(format!("corrupt zlib body: {}", e))))
}
