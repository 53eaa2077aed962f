//! Subsequence matching and ranking.
//!
//! A candidate matches when every character of the query appears in it, in
//! order, ignoring case. Candidates are ranked by how tight the match is:
//! - shorter matched span first
//! - then earlier start of the span
//! - then the candidate key itself, so the order is total and reproducible

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Locate the span of `candidate` covering `query` as a subsequence.
///
/// The span starts at the leftmost position a match can start from and takes
/// the earliest occurrence of each following query character. Returns the
/// `(start, length)` in characters, or `None` when the query is empty or is
/// not a subsequence of the candidate.
pub fn subsequence_span(query: &str, candidate: &str) -> Option<(usize, usize)> {
    let mut needle = query.chars().map(fold);
    let first = needle.next()?;

    let mut haystack = candidate.chars().map(fold).enumerate();
    let (start, _) = haystack.by_ref().find(|&(_, c)| c == first)?;

    let mut end = start;
    for wanted in needle {
        (end, _) = haystack.by_ref().find(|&(_, c)| c == wanted)?;
    }

    Some((start, end - start + 1))
}

/// Rank `candidates` against `query` and keep the best `limit`.
///
/// Each candidate is a `(key, value)` pair matched on its key. An empty query
/// or no candidates yields an empty vector.
pub fn fuzzy_match<'a, I>(query: &str, candidates: I, limit: usize) -> Vec<(&'a str, &'a str)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, usize, &str, &str)> = candidates
        .into_iter()
        .filter_map(|(key, value)| {
            subsequence_span(query, key).map(|(start, len)| (len, start, key, value))
        })
        .collect();

    ranked.sort_unstable_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(_, _, key, value)| (key, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("get", "getcontext", Some((0, 3)))]
    #[case("gc", "getcontext", Some((0, 4)))]
    #[case("GET", "getcontext", Some((0, 3)))]
    #[case("ctx", "getcontext", Some((3, 6)))]
    #[case("set", "settings", Some((0, 3)))]
    #[case("e", "regex", Some((1, 1)))]
    #[case("zzz", "getcontext", None)]
    #[case("", "getcontext", None)]
    #[case("ab", "ba", None)]
    fn test_subsequence_span(
        #[case] query: &str,
        #[case] candidate: &str,
        #[case] expected: Option<(usize, usize)>,
    ) {
        check!(subsequence_span(query, candidate) == expected);
    }

    #[test]
    fn test_span_takes_first_start_not_tightest() {
        // The tightest window is "ab" at 3, but the match starts at the first 'a'
        check!(subsequence_span("ab", "axxab") == Some((0, 5)));
    }

    #[test]
    fn test_span_counts_characters_not_bytes() {
        check!(subsequence_span("éb", "xéab") == Some((1, 3)));
    }

    #[test]
    fn test_get_ranks_getcontext_first() {
        let candidates = [
            ("getcontext", "u1"),
            ("settings", "u2"),
            ("regex", "u3"),
        ];
        let results = fuzzy_match("get", candidates, 8);
        check!(results.first() == Some(&("getcontext", "u1")));
    }

    #[test]
    fn test_no_match_yields_empty() {
        let candidates = [("getcontext", "u1"), ("settings", "u2"), ("regex", "u3")];
        check!(fuzzy_match("zzz", candidates, 8).is_empty());
    }

    #[test]
    fn test_empty_query_and_empty_candidates() {
        check!(fuzzy_match("", [("a", "b")], 8).is_empty());
        check!(fuzzy_match("a", std::iter::empty(), 8).is_empty());
    }

    #[test]
    fn test_ranking_order() {
        let candidates = [
            ("xxsend", "3"),
            ("send_message", "2"),
            ("s_e_n_d", "5"),
            ("send", "1"),
            ("resend", "4"),
        ];
        let keys: Vec<&str> = fuzzy_match("send", candidates, 8)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        // Span length 4 for all but s_e_n_d; ties broken by start, then key
        check!(keys == ["send", "send_message", "resend", "xxsend", "s_e_n_d"]);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let keys: Vec<String> = (0..20).map(|i| format!("item{:02}", 19 - i)).collect();
        let candidates: Vec<(&str, &str)> = keys.iter().map(|k| (k.as_str(), "url")).collect();
        let results = fuzzy_match("item", candidates, 8);
        check!(results.len() == 8);
        check!(results[0].0 == "item00");
        check!(results[7].0 == "item07");
    }
}
