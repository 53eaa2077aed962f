//! Sphinx `objects.inv` decoding.
//!
//! An inventory is four plain-text header lines followed by a zlib stream of
//! newline-delimited records. Decoding validates the header, inflates the body
//! incrementally, and folds each record into a [`SymbolIndex`] whose keys are
//! what users type and whose values are absolute documentation URLs.

mod reader;
mod record;

pub use reader::{DEFAULT_CHUNK_SIZE, INVENTORY_MAGIC, InventoryHeader, compressed_lines, read_header};
pub use record::InventoryRecord;

use crate::error::{LookupError, Result};
use crate::fetch::Fetcher;
use crate::registry::SourceDescriptor;
use crate::search::SymbolIndex;
use std::io::{BufRead, Cursor};

/// Namespace prefixes stripped for projects that document everything under one root.
fn builtin_namespaces(project: &str) -> &'static [&'static str] {
    match project {
        "discord.py" => &["discord.ext.commands.", "discord."],
        _ => &[],
    }
}

/// Turns an inventory byte stream into a [`SymbolIndex`].
#[derive(Debug, Clone)]
pub struct InventoryDecoder {
    base_url: String,
    strip_namespaces: Vec<String>,
    chunk_size: usize,
}

impl InventoryDecoder {
    /// A decoder resolving record locations against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            strip_namespaces: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// A decoder configured from a source descriptor.
    pub fn for_source(source: &SourceDescriptor) -> Self {
        Self::new(source.base_url.clone()).strip_namespaces(source.strip_namespaces.iter().cloned())
    }

    /// Prefixes removed from every key. Overrides the per-project defaults.
    pub fn strip_namespaces(mut self, prefixes: impl IntoIterator<Item = String>) -> Self {
        self.strip_namespaces = prefixes.into_iter().collect();
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Decode a complete inventory stream.
    ///
    /// Lines that do not look like records are skipped. Any header problem or
    /// a corrupt compressed body fails the whole decode.
    pub fn decode<R: BufRead>(&self, mut reader: R) -> Result<SymbolIndex> {
        let header = read_header(&mut reader)?;

        let namespaces: Vec<&str> = if self.strip_namespaces.is_empty() {
            builtin_namespaces(&header.project).to_vec()
        } else {
            self.strip_namespaces.iter().map(String::as_str).collect()
        };

        let mut index = SymbolIndex::new(header.project.clone());
        let mut skipped = 0usize;

        for line in compressed_lines(reader, self.chunk_size) {
            let line = line?;
            let Ok(line) = std::str::from_utf8(&line) else {
                skipped += 1;
                continue;
            };
            let Some(record) = InventoryRecord::parse(line) else {
                skipped += 1;
                continue;
            };

            let mut key = record.label().to_string();
            for prefix in &namespaces {
                key = key.replace(*prefix, "");
            }
            if record.domain == "std" {
                key = format!("{}:{}", record.effective_role(), key);
            }

            // Older generators emit python modules twice; the first entry is correct
            if record.is_python_module() && index.contains_key(&key) {
                continue;
            }

            let url = join_url(&self.base_url, &record.expanded_location());
            index.insert(key, url);
        }

        tracing::debug!(
            "Decoded inventory for {} {} ({} entries, {} lines skipped)",
            header.project,
            header.version,
            index.len(),
            skipped
        );

        Ok(index)
    }
}

/// Join a record location onto the documentation root.
fn join_url(base: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), location)
}

/// Download and decode the inventory of an inventory-backed source.
///
/// Decompression runs on the blocking pool so large inventories do not stall
/// the async workers.
pub async fn fetch_index(
    fetcher: &dyn Fetcher,
    source: &SourceDescriptor,
    chunk_size: usize,
) -> Result<SymbolIndex> {
    let url = source.inventory_url();
    tracing::info!("Building symbol index for {} from {}", source.name, url);

    let bytes = fetcher.fetch_bytes(&url).await?.into_success(&url)?;
    let decoder = InventoryDecoder::for_source(source).chunk_size(chunk_size);

    tokio::task::spawn_blocking(move || decoder.decode(Cursor::new(bytes)))
        .await
        .map_err(|e| LookupError::Interrupted(format!("inventory decode task failed: {}", e)))?
}
