use crate::compare::outcome::{
    Difference, DocSide, ExpectedStatus, ExpectedTableCheck, MatchEntry, Severity, TableOutcome,
    TableStatus,
};
use crate::config::{DiffLimits, MatchThresholds};
use crate::extraction::{excerpt, normalize_ws};
use crate::tables::TableBlock;
use std::collections::{BTreeSet, HashSet};

/// Everything table matching yields for one document pair.
#[derive(Debug, Default)]
pub struct MatchResult {
    pub matches: Vec<MatchEntry>,
    pub differences: Vec<Difference>,
    pub outcomes: Vec<TableOutcome>,
}

/// Pairs up tables between the two documents.
///
/// Greedy in document-A extraction order: each A table takes the
/// highest-scoring unconsumed B table. Scores above the full threshold
/// consume the B table; partial matches do not, so one B table can be
/// cited as the best partial match for several A tables. B tables never
/// consumed are reported missing from A.
pub fn match_tables(
    tables_a: &[TableBlock],
    tables_b: &[TableBlock],
    thresholds: &MatchThresholds,
    limits: &DiffLimits,
) -> MatchResult {
    let mut result = MatchResult::default();
    let mut consumed_b: HashSet<usize> = HashSet::new();

    for (ia, table_a) in tables_a.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (ib, table_b) in tables_b.iter().enumerate() {
            if consumed_b.contains(&ib) {
                continue;
            }
            let similarity = table_similarity(&table_a.content, &table_b.content);
            // Strictly greater, so the earliest B table wins ties.
            if best.map_or(true, |(_, s)| similarity > s) {
                best = Some((ib, similarity));
            }
        }

        let label = table_a.label(ia);
        match best {
            Some((ib, similarity)) if similarity > thresholds.full => {
                consumed_b.insert(ib);
                result.matches.push(MatchEntry::TableMatch {
                    table: label.clone(),
                    similarity,
                    description: format!(
                        "table \"{}\" matches (similarity {:.2})",
                        label, similarity
                    ),
                });
                // A full match can still differ in word order or short
                // tokens the similarity ignores.
                let norm_a = normalize_ws(&table_a.content);
                let norm_b = normalize_ws(&tables_b[ib].content);
                if norm_a != norm_b {
                    let description = format!(
                        "table \"{}\" matches but content differs (similarity {:.2})",
                        label, similarity
                    );
                    result.differences.push(Difference::TableMismatch {
                        table: label,
                        similarity,
                        excerpt_a: excerpt(&norm_a, limits.excerpt_chars),
                        excerpt_b: excerpt(&norm_b, limits.excerpt_chars),
                        severity: Severity::Medium,
                        description,
                    });
                }
                result.outcomes.push(outcome_for(
                    table_a,
                    DocSide::A,
                    TableStatus::Matched,
                    Some(similarity),
                ));
            }
            Some((_, similarity)) if similarity > thresholds.partial => {
                result.differences.push(Difference::TablePartialMatch {
                    table: label.clone(),
                    similarity,
                    severity: Severity::Medium,
                    description: format!(
                        "table \"{}\" only partially matches document B (similarity {:.2})",
                        label, similarity
                    ),
                });
                result.outcomes.push(outcome_for(
                    table_a,
                    DocSide::A,
                    TableStatus::PartialMatch,
                    Some(similarity),
                ));
            }
            _ => {
                result.differences.push(Difference::TableMissing {
                    table: label.clone(),
                    missing_from: DocSide::B,
                    severity: Severity::High,
                    description: format!("table \"{}\" has no match in document B", label),
                });
                result.outcomes.push(outcome_for(
                    table_a,
                    DocSide::A,
                    TableStatus::Missing,
                    best.map(|(_, s)| s),
                ));
            }
        }
    }

    for (ib, table_b) in tables_b.iter().enumerate() {
        if consumed_b.contains(&ib) {
            continue;
        }
        let label = table_b.label(ib);
        result.differences.push(Difference::TableMissing {
            table: label.clone(),
            missing_from: DocSide::A,
            severity: Severity::High,
            description: format!("table \"{}\" has no match in document A", label),
        });
        result
            .outcomes
            .push(outcome_for(table_b, DocSide::B, TableStatus::Missing, None));
    }

    result
}

fn outcome_for(
    table: &TableBlock,
    source: DocSide,
    status: TableStatus,
    similarity: Option<f64>,
) -> TableOutcome {
    TableOutcome {
        title: table.title.clone(),
        rows: table.row_count,
        preview: table.preview.clone(),
        source,
        status,
        similarity,
    }
}

/// Checks each expected keyword against the inferred titles and headings
/// of both documents, using the same similarity measure as table pairing.
pub fn check_expected_tables(
    keywords: &[String],
    candidates: &BTreeSet<String>,
    thresholds: &MatchThresholds,
) -> Vec<ExpectedTableCheck> {
    keywords
        .iter()
        .map(|keyword| {
            let mut best_similarity = 0.0_f64;
            let mut best_candidate: Option<&str> = None;
            for candidate in candidates {
                let similarity = table_similarity(keyword, candidate);
                if similarity > best_similarity {
                    best_similarity = similarity;
                    best_candidate = Some(candidate);
                }
            }

            let status = if best_similarity > thresholds.full {
                ExpectedStatus::Found
            } else if best_similarity > thresholds.partial {
                ExpectedStatus::PossibleMatch
            } else {
                ExpectedStatus::Missing
            };

            ExpectedTableCheck {
                keyword: keyword.clone(),
                status,
                similarity: best_similarity,
                best_candidate: if best_similarity > thresholds.partial {
                    best_candidate.map(str::to_string)
                } else {
                    None
                },
            }
        })
        .collect()
}

/// Jaccard index of the two texts' word sets.
pub fn table_similarity(a: &str, b: &str) -> f64 {
    let set_a = word_set(a);
    let set_b = word_set(b);
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Lowercased words longer than two characters.
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(content: &str, title: Option<&str>) -> TableBlock {
        let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
        TableBlock {
            content: lines.join("\n"),
            preview: lines.join("\n"),
            row_count: lines.len(),
            title: title.map(str::to_string),
        }
    }

    fn run(tables_a: &[TableBlock], tables_b: &[TableBlock]) -> MatchResult {
        match_tables(
            tables_a,
            tables_b,
            &MatchThresholds::default(),
            &DiffLimits::default(),
        )
    }

    #[test]
    fn test_word_set() {
        let words = word_set("The Premium IS 42 usd");
        assert!(words.contains("the"));
        assert!(words.contains("premium"));
        assert!(words.contains("usd"));
        // Two characters or fewer are dropped.
        assert!(!words.contains("is"));
        assert!(!words.contains("42"));
    }

    #[test]
    fn test_table_similarity_identical() {
        assert_eq!(table_similarity("alpha beta gamma", "alpha beta gamma"), 1.0);
    }

    #[test]
    fn test_table_similarity_disjoint() {
        assert_eq!(table_similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_table_similarity_both_empty() {
        assert_eq!(table_similarity("", ""), 0.0);
        // Only short words on both sides also leaves empty sets.
        assert_eq!(table_similarity("a b", "c d"), 0.0);
    }

    #[test]
    fn test_table_similarity_partial_overlap() {
        // Sets {aaa, bbb, ccc} and {aaa, bbb, ddd}: 2 shared of 4 total.
        let sim = table_similarity("aaa bbb ccc", "aaa bbb ddd");
        assert!((sim - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_match_above_full_threshold() {
        // 9 shared words of 11 total: similarity 0.818.
        let shared = "w01 w02 w03 w04 w05 w06 w07 w08 w09";
        let a = table(&format!("{} only_a", shared), None);
        let b = table(&format!("{} only_b", shared), None);
        let result = run(&[a], &[b]);
        assert_eq!(result.matches.len(), 1);
        assert!(result
            .differences
            .iter()
            .all(|d| matches!(d, Difference::TableMismatch { .. })));
        match &result.matches[0] {
            MatchEntry::TableMatch { similarity, .. } => {
                assert!((similarity - 9.0 / 11.0).abs() < 1e-9);
            }
            other => panic!("unexpected match entry: {:?}", other),
        }
    }

    #[test]
    fn test_exact_full_threshold_is_partial() {
        // 4 shared words of 5 total: similarity exactly 0.8.
        let a = table("w01 w02 w03 w04", None);
        let b = table("w01 w02 w03 w04 w05", None);
        let result = run(&[a], &[b]);
        assert!(result.matches.is_empty());
        assert!(matches!(
            result.differences[0],
            Difference::TablePartialMatch { .. }
        ));
        // The B table was not consumed, so it is also reported missing.
        assert!(result
            .differences
            .iter()
            .any(|d| matches!(d, Difference::TableMissing { missing_from: DocSide::A, .. })));
    }

    #[test]
    fn test_exact_partial_threshold_is_missing() {
        // 2 shared words of 4 total: similarity exactly 0.5.
        let a = table("w01 w02", None);
        let b = table("w01 w02 w03 w04", None);
        let result = run(&[a], &[b]);
        assert!(result.matches.is_empty());
        assert!(matches!(
            result.differences[0],
            Difference::TableMissing {
                missing_from: DocSide::B,
                ..
            }
        ));
    }

    #[test]
    fn test_identical_tables_no_mismatch() {
        let a = table("alpha   beta   gamma\n111   222   333", Some("Totals"));
        let b = table("alpha   beta   gamma\n111   222   333", Some("Totals"));
        let result = run(&[a], &[b]);
        assert_eq!(result.matches.len(), 1);
        assert!(result.differences.is_empty());
        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.outcomes[0].status, TableStatus::Matched);
    }

    #[test]
    fn test_full_match_with_content_drift() {
        // Same word set, different order: similarity 1.0 but the
        // normalized contents differ.
        let a = table("alpha beta gamma", None);
        let b = table("gamma beta alpha", None);
        let result = run(&[a], &[b]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.differences.len(), 1);
        match &result.differences[0] {
            Difference::TableMismatch {
                similarity,
                excerpt_a,
                ..
            } => {
                assert_eq!(*similarity, 1.0);
                assert_eq!(excerpt_a, "alpha beta gamma");
            }
            other => panic!("unexpected difference: {:?}", other),
        }
    }

    #[test]
    fn test_greedy_consumption() {
        // Both A tables are identical; only one B table exists. The
        // first A table consumes it, leaving the second unmatched.
        let a1 = table("alpha beta gamma delta", None);
        let a2 = table("alpha beta gamma delta", None);
        let b = table("alpha beta gamma delta", None);
        let result = run(&[a1, a2], &[b]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.differences.len(), 1);
        assert!(matches!(
            result.differences[0],
            Difference::TableMissing {
                missing_from: DocSide::B,
                ..
            }
        ));
    }

    #[test]
    fn test_partial_match_does_not_consume() {
        // Both A tables cite the same B table as a partial match, and
        // the B table is still reported missing from A afterwards.
        // Each pair shares 3 words of 5: similarity 0.6.
        let a1 = table("w01 w02 w03 extra", None);
        let a2 = table("w01 w02 w03 other", None);
        let b = table("w01 w02 w03 w04", None);
        let result = run(&[a1, a2], &[b]);
        let partials = result
            .differences
            .iter()
            .filter(|d| matches!(d, Difference::TablePartialMatch { .. }))
            .count();
        assert_eq!(partials, 2);
        assert!(result
            .differences
            .iter()
            .any(|d| matches!(d, Difference::TableMissing { missing_from: DocSide::A, .. })));
    }

    #[test]
    fn test_leftover_b_tables_reported() {
        let b1 = table("alpha beta gamma", Some("Premium Summary"));
        let result = run(&[], &[b1]);
        assert_eq!(result.differences.len(), 1);
        match &result.differences[0] {
            Difference::TableMissing {
                table,
                missing_from,
                description,
                ..
            } => {
                assert_eq!(table, "Premium Summary");
                assert_eq!(*missing_from, DocSide::A);
                assert!(description.contains("no match in document A"));
            }
            other => panic!("unexpected difference: {:?}", other),
        }
        assert_eq!(result.outcomes[0].source, DocSide::B);
    }

    #[test]
    fn test_no_tables_at_all() {
        let result = run(&[], &[]);
        assert!(result.matches.is_empty());
        assert!(result.differences.is_empty());
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn test_check_expected_tables_found_exact() {
        let mut candidates = BTreeSet::new();
        candidates.insert("State Coverage Summary".to_string());
        let keywords = vec!["State Coverage Summary".to_string()];
        let checks =
            check_expected_tables(&keywords, &candidates, &MatchThresholds::default());
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, ExpectedStatus::Found);
        assert_eq!(checks[0].similarity, 1.0);
        assert_eq!(
            checks[0].best_candidate.as_deref(),
            Some("State Coverage Summary")
        );
    }

    #[test]
    fn test_check_expected_tables_possible_match() {
        let mut candidates = BTreeSet::new();
        // {premium, summary} vs {premium, summary, page}: 2 of 3.
        candidates.insert("Premium Summary Page".to_string());
        let keywords = vec!["Premium Summary".to_string()];
        let checks =
            check_expected_tables(&keywords, &candidates, &MatchThresholds::default());
        assert_eq!(checks[0].status, ExpectedStatus::PossibleMatch);
        assert!((checks[0].similarity - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_expected_tables_missing() {
        let mut candidates = BTreeSet::new();
        candidates.insert("Unrelated Heading".to_string());
        let keywords = vec!["Premium Summary".to_string()];
        let checks =
            check_expected_tables(&keywords, &candidates, &MatchThresholds::default());
        assert_eq!(checks[0].status, ExpectedStatus::Missing);
        assert_eq!(checks[0].similarity, 0.0);
        assert!(checks[0].best_candidate.is_none());
    }
}
