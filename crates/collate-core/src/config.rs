//! Tunable policy for the comparison pipeline.
//!
//! Every magic number the engine relies on lives here as a named field
//! with a documented default, so a caller can tighten or loosen the
//! heuristics without touching the pipeline itself.

use crate::compare::outcome::Verdict;

/// Environment variable overriding the expected-table keyword list.
/// Comma-separated; blank entries are dropped.
pub const EXPECTED_TABLES_ENV: &str = "COLLATE_EXPECTED_TABLES";

/// Keywords checked against inferred titles and headings when no
/// override is configured.
pub const DEFAULT_EXPECTED_TABLES: &[&str] = &[
    "Policy Declarations",
    "State Coverage Summary",
    "Premium Summary",
    "Schedule of Forms and Endorsements",
];

/// Knobs for the line-scan table detector.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHeuristics {
    /// A line shorter than this is never table-like.
    pub min_line_len: usize,
    /// Regions with fewer table-like lines than this are discarded.
    pub min_table_lines: usize,
    /// How many preceding text lines to consider when inferring a title.
    pub lookback_lines: usize,
    /// Shortest trimmed line accepted as a title or heading.
    pub title_min_len: usize,
    /// Longest trimmed line accepted as a title or heading.
    pub title_max_len: usize,
    /// Most words a title or heading may have.
    pub title_max_words: usize,
}

impl Default for TableHeuristics {
    fn default() -> Self {
        TableHeuristics {
            min_line_len: 10,
            min_table_lines: 3,
            lookback_lines: 4,
            title_min_len: 4,
            title_max_len: 80,
            title_max_words: 12,
        }
    }
}

/// Similarity cutoffs for table pairing.
///
/// Strictly above `full` is a match, strictly above `partial` is a
/// partial match, anything else leaves the table unmatched. Both
/// boundaries are exclusive: a similarity of exactly `full` is only a
/// partial match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    pub full: f64,
    pub partial: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        MatchThresholds {
            full: 0.8,
            partial: 0.5,
        }
    }
}

/// Maps a difference count to an overall verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictPolicy {
    /// Difference count at which the verdict becomes significant.
    pub significant_at: usize,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        VerdictPolicy { significant_at: 5 }
    }
}

impl VerdictPolicy {
    pub fn classify(&self, differences: usize) -> Verdict {
        if differences == 0 {
            Verdict::Identical
        } else if differences < self.significant_at {
            Verdict::MostlySimilar
        } else {
            Verdict::SignificantDifferences
        }
    }
}

/// Caps on the per-page text diff output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffLimits {
    /// Line differences reported per page before summarizing the rest.
    pub max_line_diffs_per_page: usize,
    /// Characters kept from each differing line.
    pub excerpt_chars: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        DiffLimits {
            max_line_diffs_per_page: 10,
            excerpt_chars: 100,
        }
    }
}

/// Complete configuration for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub heuristics: TableHeuristics,
    pub thresholds: MatchThresholds,
    pub verdict: VerdictPolicy,
    pub limits: DiffLimits,
    /// Table names whose presence is checked in both documents.
    pub expected_tables: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            heuristics: TableHeuristics::default(),
            thresholds: MatchThresholds::default(),
            verdict: VerdictPolicy::default(),
            limits: DiffLimits::default(),
            expected_tables: DEFAULT_EXPECTED_TABLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CompareConfig {
    /// Default configuration with the expected-table list taken from
    /// `COLLATE_EXPECTED_TABLES` when the variable is set and non-empty.
    pub fn from_env() -> Self {
        let mut config = CompareConfig::default();
        if let Ok(raw) = std::env::var(EXPECTED_TABLES_ENV) {
            let keywords = parse_keyword_list(&raw);
            if !keywords.is_empty() {
                config.expected_tables = keywords;
            }
        }
        config
    }
}

/// Splits a comma-separated keyword list, trimming entries and dropping
/// blank ones.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_list_splits_and_trims() {
        let keywords = parse_keyword_list(" Premium Summary , Coverage ,, Forms ");
        assert_eq!(keywords, vec!["Premium Summary", "Coverage", "Forms"]);
    }

    #[test]
    fn test_parse_keyword_list_empty_input() {
        assert!(parse_keyword_list("").is_empty());
        assert!(parse_keyword_list(" , , ").is_empty());
    }

    #[test]
    fn test_verdict_policy_boundaries() {
        let policy = VerdictPolicy::default();
        assert_eq!(policy.classify(0), Verdict::Identical);
        assert_eq!(policy.classify(1), Verdict::MostlySimilar);
        assert_eq!(policy.classify(4), Verdict::MostlySimilar);
        assert_eq!(policy.classify(5), Verdict::SignificantDifferences);
        assert_eq!(policy.classify(40), Verdict::SignificantDifferences);
    }

    #[test]
    fn test_default_expected_tables_populated() {
        let config = CompareConfig::default();
        assert_eq!(config.expected_tables.len(), 4);
        assert!(config
            .expected_tables
            .iter()
            .any(|k| k == "Premium Summary"));
    }
}
