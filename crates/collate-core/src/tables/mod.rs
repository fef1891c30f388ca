pub mod matching;

use crate::config::TableHeuristics;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Lines in a table preview before the rest is elided.
const PREVIEW_LINES: usize = 3;

/// One table-like region detected in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    /// All region lines joined with newlines.
    pub content: String,
    /// First lines of the region, for display.
    pub preview: String,
    pub row_count: usize,
    /// Title inferred from the lines preceding the region, if any.
    pub title: Option<String>,
}

impl TableBlock {
    fn from_lines(lines: &[String], title: Option<String>) -> TableBlock {
        let preview = if lines.len() > PREVIEW_LINES {
            format!("{}\n...", lines[..PREVIEW_LINES].join("\n"))
        } else {
            lines.join("\n")
        };
        TableBlock {
            content: lines.join("\n"),
            preview,
            row_count: lines.len(),
            title,
        }
    }

    /// Display name: the inferred title, else a positional fallback.
    pub fn label(&self, index: usize) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("table {}", index + 1),
        }
    }
}

/// Everything the table scan yields for one document.
#[derive(Debug, Clone, Default)]
pub struct TableScan {
    pub tables: Vec<TableBlock>,
    /// Heading-like lines seen anywhere in the document, deduplicated.
    pub headings: BTreeSet<String>,
}

/// Scans a document's pages for table-like regions.
///
/// Regions and the title lookback window never cross a page boundary.
pub fn scan_document(pages: &[String], rules: &TableHeuristics) -> TableScan {
    let mut scan = TableScan::default();
    for page in pages {
        scan_page(page, rules, &mut scan);
    }
    scan
}

fn scan_page(page: &str, rules: &TableHeuristics, scan: &mut TableScan) {
    let mut lookback: VecDeque<String> = VecDeque::new();
    let mut current: Vec<String> = Vec::new();

    for line in page.lines() {
        let trimmed = line.trim();

        if is_table_like(trimmed, rules) {
            current.push(line.to_string());
            continue;
        }

        // Any other line ends the current region. Close before updating
        // the lookback so title inference only sees pre-table lines.
        close_region(&mut current, &lookback, rules, &mut scan.tables);

        if trimmed.is_empty() {
            continue;
        }

        if is_heading_like(trimmed, rules) {
            scan.headings.insert(trimmed.to_string());
        }

        lookback.push_back(trimmed.to_string());
        if lookback.len() > rules.lookback_lines {
            lookback.pop_front();
        }
    }

    close_region(&mut current, &lookback, rules, &mut scan.tables);
}

fn close_region(
    current: &mut Vec<String>,
    lookback: &VecDeque<String>,
    rules: &TableHeuristics,
    tables: &mut Vec<TableBlock>,
) {
    // Shorter regions are discarded silently.
    if current.len() >= rules.min_table_lines {
        let title = infer_title(lookback, rules);
        tables.push(TableBlock::from_lines(current, title));
    }
    current.clear();
}

/// A line is table-like if it has a column gap (a tab or two consecutive
/// whitespace characters) and enough substance after trimming.
fn is_table_like(trimmed: &str, rules: &TableHeuristics) -> bool {
    trimmed.chars().count() > rules.min_line_len && has_column_gap(trimmed)
}

fn has_column_gap(s: &str) -> bool {
    let mut prev_ws = false;
    for c in s.chars() {
        if c == '\t' {
            return true;
        }
        let ws = c.is_whitespace();
        if ws && prev_ws {
            return true;
        }
        prev_ws = ws;
    }
    false
}

fn is_heading_like(trimmed: &str, rules: &TableHeuristics) -> bool {
    let len = trimmed.chars().count();
    len >= rules.title_min_len
        && len <= rules.title_max_len
        && trimmed.split_whitespace().count() <= rules.title_max_words
}

/// Scans the lookback window, most recent line first, for a plausible
/// title: contains a letter, sensible length after stripping trailing
/// colons and dashes, not too many words.
fn infer_title(lookback: &VecDeque<String>, rules: &TableHeuristics) -> Option<String> {
    lookback.iter().rev().find_map(|line| {
        let candidate = line
            .trim_end_matches(|c: char| c == ':' || c == '-')
            .trim_end();
        let len = candidate.chars().count();
        if candidate.chars().any(|c| c.is_alphabetic())
            && len >= rules.title_min_len
            && len <= rules.title_max_len
            && candidate.split_whitespace().count() <= rules.title_max_words
        {
            Some(candidate.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> TableHeuristics {
        TableHeuristics::default()
    }

    #[test]
    fn test_is_table_like() {
        assert!(is_table_like("col1   col2   col3", &rules()));
        assert!(is_table_like("name\tvalue\tunit", &rules()));
        // Too short even with a gap.
        assert!(!is_table_like("a   b", &rules()));
        // Long enough but no column gap.
        assert!(!is_table_like("a plain sentence of text", &rules()));
    }

    #[test]
    fn test_has_column_gap() {
        assert!(has_column_gap("a  b"));
        assert!(has_column_gap("a\tb"));
        assert!(!has_column_gap("a b c"));
    }

    #[test]
    fn test_scan_finds_table_with_title() {
        let page = "Premium Summary:\n  col1   col2   col3\n  1      2      3\n  4      5      6\n"
            .to_string();
        let scan = scan_document(&[page], &rules());
        assert_eq!(scan.tables.len(), 1);
        let table = &scan.tables[0];
        assert_eq!(table.row_count, 3);
        assert_eq!(table.title.as_deref(), Some("Premium Summary"));
    }

    #[test]
    fn test_short_region_discarded() {
        let page = "Header\n  col1   col2   col3\n  1      2      3\n".to_string();
        let scan = scan_document(&[page], &rules());
        assert!(scan.tables.is_empty());
    }

    #[test]
    fn test_blank_line_closes_region() {
        let page = "  a1   b1   c1\n  a2   b2   c2\n\n  a3   b3   c3\n  a4   b4   c4\n".to_string();
        let scan = scan_document(&[page], &rules());
        // Both halves are two lines, below the minimum.
        assert!(scan.tables.is_empty());
    }

    #[test]
    fn test_text_line_closes_region() {
        let page = concat!(
            "  a1   b1   c1\n",
            "  a2   b2   c2\n",
            "  a3   b3   c3\n",
            "interrupting text\n",
            "  d1   e1   f1\n",
        )
        .to_string();
        let scan = scan_document(&[page], &rules());
        assert_eq!(scan.tables.len(), 1);
        assert_eq!(scan.tables[0].row_count, 3);
    }

    #[test]
    fn test_title_lookback_window() {
        // The real title sits five non-blank lines back, outside the
        // default window of four, so a nearer line wins.
        let page = concat!(
            "Actual Title\n",
            "filler one\n",
            "filler two\n",
            "filler three\n",
            "filler four\n",
            "  a1   b1   c1\n",
            "  a2   b2   c2\n",
            "  a3   b3   c3\n",
        )
        .to_string();
        let scan = scan_document(&[page], &rules());
        assert_eq!(scan.tables.len(), 1);
        assert_eq!(scan.tables[0].title.as_deref(), Some("filler four"));
    }

    #[test]
    fn test_title_skips_unsuitable_lines() {
        // The nearest lookback line has too many words; the one before
        // it qualifies.
        let page = concat!(
            "Schedule of Forms\n",
            "a b c d e f g h i j k l m n\n",
            "  a1   b1   c1\n",
            "  a2   b2   c2\n",
            "  a3   b3   c3\n",
        )
        .to_string();
        let scan = scan_document(&[page], &rules());
        assert_eq!(scan.tables[0].title.as_deref(), Some("Schedule of Forms"));
    }

    #[test]
    fn test_no_title_when_lookback_empty() {
        let page = "  a1   b1   c1\n  a2   b2   c2\n  a3   b3   c3\n".to_string();
        let scan = scan_document(&[page], &rules());
        assert_eq!(scan.tables.len(), 1);
        assert!(scan.tables[0].title.is_none());
        assert_eq!(scan.tables[0].label(0), "table 1");
    }

    #[test]
    fn test_headings_collected_and_deduplicated() {
        let pages = vec![
            "State Coverage Summary\nsome body text here\n".to_string(),
            "State Coverage Summary\nanother page\n".to_string(),
        ];
        let scan = scan_document(&pages, &rules());
        assert!(scan.headings.contains("State Coverage Summary"));
        assert_eq!(
            scan.headings
                .iter()
                .filter(|h| h.as_str() == "State Coverage Summary")
                .count(),
            1
        );
    }

    #[test]
    fn test_heading_length_limits() {
        let long = "x".repeat(81);
        let page = format!("abc\n{}\nvalid heading\n", long);
        let scan = scan_document(&[page], &rules());
        assert!(!scan.headings.contains("abc"));
        assert!(!scan.headings.contains(long.as_str()));
        assert!(scan.headings.contains("valid heading"));
    }

    #[test]
    fn test_preview_truncation() {
        let page = concat!(
            "  a1   b1   c1\n",
            "  a2   b2   c2\n",
            "  a3   b3   c3\n",
            "  a4   b4   c4\n",
        )
        .to_string();
        let scan = scan_document(&[page], &rules());
        let table = &scan.tables[0];
        assert_eq!(table.row_count, 4);
        assert!(table.preview.ends_with("..."));
        assert!(!table.preview.contains("a4"));
        assert!(table.content.contains("a4"));
    }

    #[test]
    fn test_regions_do_not_cross_pages() {
        let pages = vec![
            "  a1   b1   c1\n  a2   b2   c2\n".to_string(),
            "  a3   b3   c3\n  a4   b4   c4\n".to_string(),
        ];
        let scan = scan_document(&pages, &rules());
        // Two lines per page, never three in one region.
        assert!(scan.tables.is_empty());
    }
}
