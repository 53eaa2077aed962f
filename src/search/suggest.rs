//! "Did you mean" suggestions for unknown source names.

use crate::registry::SourceRegistry;
use rapidfuzz::distance::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a key to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 3;

/// Source names whose name or alias resembles `name`, most similar first.
pub fn suggest_sources(registry: &SourceRegistry, name: &str) -> Vec<String> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = registry
        .keys()
        .map(|(key, source)| {
            (
                jaro_winkler::similarity(needle.chars(), key.chars()),
                source.name.as_str(),
            )
        })
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let mut suggestions: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    for (_, source) in scored {
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
        if !suggestions.iter().any(|s| s == source) {
            suggestions.push(source.to_string());
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_suggests_close_names() {
        let registry = SourceRegistry::builtin().unwrap();
        let suggestions = suggest_sources(&registry, "pyhton");
        check!(suggestions.contains(&"Python".to_string()));
    }

    #[test]
    fn test_no_suggestions_for_unrelated_names() {
        let registry = SourceRegistry::builtin().unwrap();
        check!(suggest_sources(&registry, "qqqqqqqqqqqq").is_empty());
        check!(suggest_sources(&registry, "").is_empty());
    }

    #[test]
    fn test_suggestions_are_unique_sources() {
        let registry = SourceRegistry::builtin().unwrap();
        let suggestions = suggest_sources(&registry, "discord");
        let mut deduped = suggestions.clone();
        deduped.dedup();
        check!(suggestions.len() <= MAX_SUGGESTIONS);
        check!(suggestions == deduped);
    }
}
