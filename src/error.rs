//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for lookup operations.
///
/// Application-level code (config loading, the binary, MCP plumbing) uses
/// `anyhow::Result` with `.context()` instead.
pub type Result<T, E = LookupError> = std::result::Result<T, E>;

/// Error returned by the lookup engine.
///
/// `Clone` so a single failed build can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Malformed inventory header or unreadable compressed body.
    #[error("invalid inventory: {0}")]
    Format(String),

    /// The fetch collaborator answered with a non-2xx status.
    #[error("HTTP {status} while fetching {url}")]
    Http { status: u16, url: String },

    /// No documentation source is registered under this name or alias.
    #[error("{}", not_found_message(name, suggestions))]
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// The fetch collaborator could not complete the request at all.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A shared build task panicked or was aborted before publishing a result.
    #[error("lookup task interrupted: {0}")]
    Interrupted(String),
}

impl LookupError {
    /// Status code for `Http` errors.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn not_found_message(name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("Documentation source '{}' not found", name)
    } else {
        format!(
            "Documentation source '{}' not found. Did you mean: {}?",
            name,
            suggestions.join(", ")
        )
    }
}

/// Error returned when the source catalog violates its uniqueness rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A name or alias (compared case-insensitively) maps to two sources.
    #[error("'{key}' is claimed by both '{first}' and '{second}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    /// A source was declared without a name.
    #[error("source with base URL '{0}' has an empty name")]
    EmptyName(String),
}
