//! Catalog of documentation sources and how each one is searched.
//!
//! Every source is reachable through its name and any of its aliases, compared
//! case-insensitively. Names and aliases partition across sources: a key that
//! would resolve to two different sources is rejected at construction time.

mod catalog;

pub use catalog::builtin_sources;

use crate::error::RegistryError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How results are retrieved for a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Download `objects.inv` once, then fuzzy-match locally.
    Inventory,
    /// Ask a live search endpoint on every new query.
    Scrape(AdapterKind),
}

/// Scraping adapter variants, each carrying only what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterKind {
    /// JSON proxy whose `description` field holds markdown links.
    StructuredApi,
    /// Script-rendered search page with a results table.
    RenderedSearch {
        /// Prefix for the relative links found in result rows.
        link_base: String,
    },
    /// MediaWiki search page shared by two sibling languages.
    WikiSearch {
        /// Which `mw-search-results` list belongs to this source.
        section: usize,
        /// Prefix for the relative links found in result anchors.
        link_base: String,
    },
}

impl AdapterKind {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StructuredApi => "structured-api",
            Self::RenderedSearch { .. } => "rendered-search",
            Self::WikiSearch { .. } => "wiki-search",
        }
    }
}

/// What kind of thing a source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Library,
    Language,
    Api,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Library => "Package/Library",
            Self::Language => "Language",
            Self::Api => "API",
        })
    }
}

/// One documentation corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub name: String,
    /// Inventory root for [`Strategy::Inventory`], search endpoint prefix otherwise.
    pub base_url: String,
    /// Human-facing landing page, when it differs from `base_url`.
    pub display_url: Option<String>,
    pub aliases: Vec<String>,
    pub strategy: Strategy,
    pub language: String,
    pub category: Category,
    /// Namespace prefixes removed from inventory keys.
    pub strip_namespaces: Vec<String>,
}

impl SourceDescriptor {
    /// A source indexed through its Sphinx inventory.
    pub fn inventory(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_strategy(name, base_url, Strategy::Inventory)
    }

    /// A source queried through a scraping adapter.
    pub fn scrape(name: impl Into<String>, base_url: impl Into<String>, kind: AdapterKind) -> Self {
        Self::with_strategy(name, base_url, Strategy::Scrape(kind))
    }

    fn with_strategy(name: impl Into<String>, base_url: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            display_url: None,
            aliases: Vec::new(),
            strategy,
            language: "Python".to_string(),
            category: Category::Library,
            strip_namespaces: Vec::new(),
        }
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn display_url(mut self, url: impl Into<String>) -> Self {
        self.display_url = Some(url.into());
        self
    }

    pub fn strip_namespaces<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_namespaces = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// The URL shown when no query is given.
    pub fn info_url(&self) -> &str {
        self.display_url.as_deref().unwrap_or(&self.base_url)
    }

    /// Location of the Sphinx inventory for inventory-backed sources.
    pub fn inventory_url(&self) -> String {
        format!("{}/objects.inv", self.base_url.trim_end_matches('/'))
    }
}

/// Read-only catalog with case-insensitive name and alias resolution.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<SourceDescriptor>>,
    /// Lowercased name or alias -> index into `sources`
    keys: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Build a registry, rejecting any name or alias claimed twice.
    pub fn new(sources: impl IntoIterator<Item = SourceDescriptor>) -> Result<Self, RegistryError> {
        let mut registry = Self {
            sources: Vec::new(),
            keys: HashMap::new(),
        };

        for source in sources {
            registry.insert(source)?;
        }

        Ok(registry)
    }

    /// The builtin catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin_sources())
    }

    /// The builtin catalog extended with `extra` sources.
    pub fn builtin_with(extra: impl IntoIterator<Item = SourceDescriptor>) -> Result<Self, RegistryError> {
        Self::new(builtin_sources().into_iter().chain(extra))
    }

    fn insert(&mut self, source: SourceDescriptor) -> Result<(), RegistryError> {
        if source.name.trim().is_empty() {
            return Err(RegistryError::EmptyName(source.base_url));
        }

        let index = self.sources.len();
        let mut claimed: Vec<String> = Vec::with_capacity(source.aliases.len() + 1);

        for key in std::iter::once(&source.name).chain(&source.aliases) {
            let key = key.to_lowercase();
            if let Some(&existing) = self.keys.get(&key) {
                return Err(RegistryError::DuplicateKey {
                    key,
                    first: self.sources[existing].name.clone(),
                    second: source.name.clone(),
                });
            }
            // An alias equal to its own name is harmless
            if claimed.contains(&key) {
                continue;
            }
            claimed.push(key);
        }

        for key in claimed {
            self.keys.insert(key, index);
        }
        self.sources.push(Arc::new(source));
        Ok(())
    }

    /// Resolve a name or alias, ignoring case.
    pub fn resolve(&self, name_or_alias: &str) -> Option<&Arc<SourceDescriptor>> {
        let key = name_or_alias.trim().to_lowercase();
        self.keys.get(&key).map(|&index| &self.sources[index])
    }

    /// Source names sorted case-insensitively.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.iter().map(|s| s.name.as_str()).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    /// Every resolvable key (lowercased names and aliases).
    pub fn keys(&self) -> impl Iterator<Item = (&str, &Arc<SourceDescriptor>)> {
        self.keys
            .iter()
            .map(|(key, &index)| (key.as_str(), &self.sources[index]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SourceDescriptor>> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
