use crate::compare::outcome::{
    ComparisonReport, Difference, DocSide, MatchEntry, Severity, Stats, Summary,
};
use crate::config::{CompareConfig, DiffLimits};
use crate::extraction::{excerpt, normalize_ws, split_pages};
use crate::tables::matching::{check_expected_tables, match_tables};
use crate::tables::scan_document;
use chrono::Utc;
use std::collections::BTreeSet;

/// Compares two documents' extracted text and builds the full report.
///
/// `label_a` and `label_b` identify the documents in the summary,
/// typically their file paths.
pub fn compare_documents(
    label_a: &str,
    label_b: &str,
    text_a: &str,
    text_b: &str,
    config: &CompareConfig,
) -> ComparisonReport {
    let pages_a = split_pages(text_a);
    let pages_b = split_pages(text_b);

    let (mut differences, mut matches) = diff_pages(&pages_a, &pages_b, &config.limits);

    let scan_a = scan_document(&pages_a, &config.heuristics);
    let scan_b = scan_document(&pages_b, &config.heuristics);
    let tables_found = scan_a.tables.len() + scan_b.tables.len();

    let mut table_result = match_tables(
        &scan_a.tables,
        &scan_b.tables,
        &config.thresholds,
        &config.limits,
    );
    differences.append(&mut table_result.differences);
    matches.append(&mut table_result.matches);

    // Expected keywords are checked against every name either document
    // offers, inferred titles and headings alike.
    let mut headings: BTreeSet<String> = scan_a.headings;
    headings.extend(scan_b.headings);
    let mut candidates = headings.clone();
    candidates.extend(
        scan_a
            .tables
            .iter()
            .chain(scan_b.tables.iter())
            .filter_map(|t| t.title.clone()),
    );
    let expected_tables =
        check_expected_tables(&config.expected_tables, &candidates, &config.thresholds);

    let stats = Stats {
        total_pages: pages_a.len().max(pages_b.len()),
        tables_found,
        table_matches: matches
            .iter()
            .filter(|m| matches!(m, MatchEntry::TableMatch { .. }))
            .count(),
        table_mismatches: differences.iter().filter(|d| d.is_table_kind()).count(),
        text_matches: matches
            .iter()
            .filter(|m| matches!(m, MatchEntry::PageMatch { .. }))
            .count(),
        text_mismatches: differences
            .iter()
            .filter(|d| matches!(d, Difference::TextMismatch { .. }))
            .count(),
    };

    let verdict = config.verdict.classify(differences.len());

    ComparisonReport {
        summary: Summary {
            generated_at: Utc::now(),
            document_a: label_a.to_string(),
            document_b: label_b.to_string(),
            total_differences: differences.len(),
            total_matches: matches.len(),
            stats,
        },
        differences,
        matches,
        tables: table_result.outcomes,
        expected_tables,
        headings,
        verdict,
    }
}

/// Walks both page sequences in parallel, recording missing pages,
/// whole-page matches, and line-level differences.
fn diff_pages(
    pages_a: &[String],
    pages_b: &[String],
    limits: &DiffLimits,
) -> (Vec<Difference>, Vec<MatchEntry>) {
    let mut differences = Vec::new();
    let mut matches = Vec::new();

    for i in 0..pages_a.len().max(pages_b.len()) {
        let page = i + 1;

        if i >= pages_a.len() {
            differences.push(Difference::PageMissing {
                page,
                missing_from: DocSide::A,
                severity: Severity::High,
                description: format!("page {} exists only in document B", page),
            });
            continue;
        }
        if i >= pages_b.len() {
            differences.push(Difference::PageMissing {
                page,
                missing_from: DocSide::B,
                severity: Severity::High,
                description: format!("page {} exists only in document A", page),
            });
            continue;
        }

        if normalize_ws(&pages_a[i]) == normalize_ws(&pages_b[i]) {
            matches.push(MatchEntry::PageMatch {
                page,
                description: format!("page {} content matches", page),
            });
        } else {
            diff_lines(page, &pages_a[i], &pages_b[i], limits, &mut differences);
        }
    }

    (differences, matches)
}

/// Compares two pages' non-blank lines pairwise by index, capping the
/// emitted differences and summarizing the rest.
fn diff_lines(
    page: usize,
    page_a: &str,
    page_b: &str,
    limits: &DiffLimits,
    differences: &mut Vec<Difference>,
) {
    let lines_a = nonblank_lines(page_a);
    let lines_b = nonblank_lines(page_b);

    let mut emitted = 0;
    let mut suppressed = 0;

    for i in 0..lines_a.len().max(lines_b.len()) {
        let line_a = lines_a.get(i).copied().unwrap_or("");
        let line_b = lines_b.get(i).copied().unwrap_or("");
        if line_a == line_b {
            continue;
        }

        if emitted < limits.max_line_diffs_per_page {
            emitted += 1;
            differences.push(Difference::TextMismatch {
                page,
                line: Some(i + 1),
                excerpt_a: Some(excerpt(line_a, limits.excerpt_chars)),
                excerpt_b: Some(excerpt(line_b, limits.excerpt_chars)),
                severity: Severity::Medium,
                description: format!("page {} line {} differs", page, i + 1),
            });
        } else {
            suppressed += 1;
        }
    }

    if suppressed > 0 {
        differences.push(Difference::TextMismatch {
            page,
            line: None,
            excerpt_a: None,
            excerpt_b: None,
            severity: Severity::Info,
            description: format!(
                "{} more line differences on page {} not shown",
                suppressed, page
            ),
        });
    }
}

fn nonblank_lines(page: &str) -> Vec<&str> {
    page.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
