use serde::Serialize;

use crate::catalog::{Catalog, CatalogEntry};

/// One line of the comparison report.
///
/// Built once by `compare`, consumed once by the report writer. Difference
/// is our price minus the competitor's; both are absent when no competitor
/// entry matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub title: String,
    pub our_price: u64,
    pub competitor_price: Option<u64>,
    pub difference: Option<i64>,
}

/// The rule deciding whether two catalog entries from different sources
/// refer to the same physical product.
///
/// There is no shared identifier (SKU/EAN) across the storefronts, so this
/// is heuristic by nature. Keeping it behind a trait means the pairing
/// control flow never changes when the heuristic does, and each strategy is
/// testable in isolation.
pub trait MatchStrategy {
    /// Find the competitor entry for one of our normalized titles, scanning
    /// the competitor catalog in its iteration order
    fn find_match<'a>(&self, our_title: &str, competitor: &'a Catalog) -> Option<&'a CatalogEntry>;
}

/// Prefix-word containment: take the first `words` whitespace-separated
/// words of our title and accept the FIRST competitor entry whose title
/// contains every one of them as a substring.
///
/// Containment is substring, not whole-word, so short words can match
/// inside unrelated longer words. A title with fewer words just uses what
/// it has. A title that normalized to the empty string yields zero match
/// words and the all-contained check passes vacuously, pairing it with the
/// first competitor entry - a known quirk of the heuristic, kept as-is
/// rather than silently redefined.
#[derive(Debug, Clone)]
pub struct PrefixWords {
    pub words: usize,
}

impl Default for PrefixWords {
    fn default() -> Self {
        Self { words: 2 }
    }
}

impl MatchStrategy for PrefixWords {
    fn find_match<'a>(&self, our_title: &str, competitor: &'a Catalog) -> Option<&'a CatalogEntry> {
        let key_words: Vec<&str> = our_title.split_whitespace().take(self.words).collect();

        competitor
            .iter()
            .find(|entry| key_words.iter().all(|word| entry.title.contains(word)))
    }
}

/// Exact normalized-title equality. Strict alternate to `PrefixWords` for
/// catalogs that share naming conventions.
#[derive(Debug, Clone, Default)]
pub struct ExactTitle;

impl MatchStrategy for ExactTitle {
    fn find_match<'a>(&self, our_title: &str, competitor: &'a Catalog) -> Option<&'a CatalogEntry> {
        competitor.iter().find(|entry| entry.title == our_title)
    }
}

/// Pair each of our products with at most one competitor product and
/// compute price deltas. One row per our-entry, in our catalog's order;
/// unmatched products keep their row with absent competitor fields.
pub fn compare(ours: &Catalog, competitor: &Catalog, strategy: &dyn MatchStrategy) -> Vec<ComparisonRow> {
    ours.iter()
        .map(|our_entry| match strategy.find_match(&our_entry.title, competitor) {
            Some(matched) => ComparisonRow {
                title: our_entry.title.clone(),
                our_price: our_entry.price,
                competitor_price: Some(matched.price),
                difference: Some(our_entry.price as i64 - matched.price as i64),
            },
            None => ComparisonRow {
                title: our_entry.title.clone(),
                our_price: our_entry.price,
                competitor_price: None,
                difference: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, u64)]) -> Catalog {
        entries
            .iter()
            .map(|(t, p)| (t.to_string(), *p))
            .collect()
    }

    #[test]
    fn test_prefix_words_reordered_title_matches() {
        let ours = catalog(&[("weber genesis 300", 15000)]);
        let competitor = catalog(&[
            ("genesis weber edition 300", 14500),
            ("other grill", 9000),
        ]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].competitor_price, Some(14500));
        assert_eq!(rows[0].difference, Some(500));
    }

    #[test]
    fn test_first_match_wins_no_scoring() {
        let ours = catalog(&[("weber genesis", 100)]);
        // Second entry is the "better" match but the scan stops at the first
        let competitor = catalog(&[
            ("weber genesis ii something", 90),
            ("weber genesis", 95),
        ]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].competitor_price, Some(90));
    }

    #[test]
    fn test_one_word_title_uses_one_word() {
        let ours = catalog(&[("napoleon", 8000)]);
        let competitor = catalog(&[("гриль napoleon rogue", 7500)]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].difference, Some(500));
    }

    #[test]
    fn test_substring_not_whole_word() {
        // "gas" matches inside "megastore" - substring containment by design
        let ours = catalog(&[("gas grill", 100)]);
        let competitor = catalog(&[("megastore grilled set", 80)]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].competitor_price, Some(80));
    }

    #[test]
    fn test_empty_title_matches_first_entry_vacuously() {
        // Known quirk: zero match words pass the all-contained check
        let ours = catalog(&[("", 100)]);
        let competitor = catalog(&[("anything at all", 60), ("second", 70)]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].competitor_price, Some(60));
        assert_eq!(rows[0].difference, Some(40));
    }

    #[test]
    fn test_no_match_leaves_absent_fields() {
        let ours = catalog(&[("weber genesis", 100)]);
        let competitor = catalog(&[("char broil", 90)]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].competitor_price, None);
        assert_eq!(rows[0].difference, None);
    }

    #[test]
    fn test_compare_is_deterministic() {
        let ours = catalog(&[("a one", 10), ("b two", 20), ("c three", 30)]);
        let competitor = catalog(&[("one a extra", 9), ("two b extra", 25)]);

        let first = compare(&ours, &competitor, &PrefixWords::default());
        let second = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_difference_when_we_are_cheaper() {
        let ours = catalog(&[("grill x", 100)]);
        let competitor = catalog(&[("grill x pro", 130)]);

        let rows = compare(&ours, &competitor, &PrefixWords::default());
        assert_eq!(rows[0].difference, Some(-30));
    }

    #[test]
    fn test_exact_title_strategy() {
        let ours = catalog(&[("weber genesis", 100)]);
        let competitor = catalog(&[("weber genesis ii", 90), ("weber genesis", 95)]);

        let rows = compare(&ours, &competitor, &ExactTitle);
        assert_eq!(rows[0].competitor_price, Some(95));

        let no_match = compare(&catalog(&[("weber", 1)]), &competitor, &ExactTitle);
        assert_eq!(no_match[0].competitor_price, None);
    }
}
