use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which of the two input documents a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocSide {
    A,
    B,
}

/// How much a recorded difference matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single recorded difference between the two documents.
///
/// Differences are the expected output of a comparison, never errors: a
/// missing page or an unmatched table is recorded here and absorbed into
/// the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// A page present in only one document.
    PageMissing {
        /// 1-based page number.
        page: usize,
        /// The document that lacks the page.
        missing_from: DocSide,
        severity: Severity,
        description: String,
    },
    /// A pair of pages whose text differs on one line, or (with `line`
    /// unset) a per-page summary of suppressed further line differences.
    TextMismatch {
        /// 1-based page number.
        page: usize,
        /// 1-based index into the page's non-blank lines.
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        excerpt_a: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        excerpt_b: Option<String>,
        severity: Severity,
        description: String,
    },
    /// A matched table pair whose contents still drifted apart.
    TableMismatch {
        table: String,
        similarity: f64,
        excerpt_a: String,
        excerpt_b: String,
        severity: Severity,
        description: String,
    },
    /// A table whose best counterpart only partially matches.
    TablePartialMatch {
        table: String,
        similarity: f64,
        severity: Severity,
        description: String,
    },
    /// A table with no counterpart in the other document.
    TableMissing {
        table: String,
        /// The document that lacks the table.
        missing_from: DocSide,
        severity: Severity,
        description: String,
    },
}

impl Difference {
    pub fn severity(&self) -> Severity {
        match self {
            Difference::PageMissing { severity, .. }
            | Difference::TextMismatch { severity, .. }
            | Difference::TableMismatch { severity, .. }
            | Difference::TablePartialMatch { severity, .. }
            | Difference::TableMissing { severity, .. } => *severity,
        }
    }

    /// The serde tag, for renderers that group by kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Difference::PageMissing { .. } => "page_missing",
            Difference::TextMismatch { .. } => "text_mismatch",
            Difference::TableMismatch { .. } => "table_mismatch",
            Difference::TablePartialMatch { .. } => "table_partial_match",
            Difference::TableMissing { .. } => "table_missing",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Difference::PageMissing { description, .. }
            | Difference::TextMismatch { description, .. }
            | Difference::TableMismatch { description, .. }
            | Difference::TablePartialMatch { description, .. }
            | Difference::TableMissing { description, .. } => description,
        }
    }

    pub fn is_table_kind(&self) -> bool {
        matches!(
            self,
            Difference::TableMismatch { .. }
                | Difference::TablePartialMatch { .. }
                | Difference::TableMissing { .. }
        )
    }
}

/// A single recorded agreement between the two documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEntry {
    /// A pair of pages equal after whitespace normalization.
    PageMatch { page: usize, description: String },
    /// A pair of tables above the full-match similarity threshold.
    TableMatch {
        table: String,
        /// Word-set Jaccard similarity in [0, 1].
        similarity: f64,
        description: String,
    },
}

impl MatchEntry {
    pub fn description(&self) -> &str {
        match self {
            MatchEntry::PageMatch { description, .. }
            | MatchEntry::TableMatch { description, .. } => description,
        }
    }
}

/// Outcome classification for one extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Matched,
    PartialMatch,
    Missing,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Matched => write!(f, "matched"),
            TableStatus::PartialMatch => write!(f, "partial match"),
            TableStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Per-table outcome: one entry for each document-A table plus one for
/// each document-B table that no full match consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOutcome {
    /// Inferred title, if the lookback window held a plausible one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Number of table-like lines in the region.
    pub rows: usize,
    /// First lines of the table content, for display.
    pub preview: String,
    /// The document the table was extracted from.
    pub source: DocSide,
    pub status: TableStatus,
    /// Similarity against the counterpart, when one was considered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Result of checking one expected-table keyword against the documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedTableCheck {
    pub keyword: String,
    pub status: ExpectedStatus,
    /// Best similarity across all inferred titles and headings.
    pub similarity: f64,
    /// The title or heading that produced the best similarity, when it
    /// cleared the partial threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_candidate: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedStatus {
    Found,
    PossibleMatch,
    Missing,
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedStatus::Found => write!(f, "found"),
            ExpectedStatus::PossibleMatch => write!(f, "possible match"),
            ExpectedStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Aggregate counters for the report summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Larger of the two page counts.
    pub total_pages: usize,
    /// Tables extracted across both documents.
    pub tables_found: usize,
    /// Table pairs above the full-match threshold.
    pub table_matches: usize,
    /// Table differences of any kind (mismatch, partial, missing).
    pub table_mismatches: usize,
    /// Page pairs equal after whitespace normalization.
    pub text_matches: usize,
    /// Emitted text mismatch entries, summary rows included.
    pub text_mismatches: usize,
}

/// Overall classification of the comparison, derived solely from the
/// count of recorded differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Identical,
    MostlySimilar,
    SignificantDifferences,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Identical => write!(f, "identical"),
            Verdict::MostlySimilar => write!(f, "mostly similar"),
            Verdict::SignificantDifferences => write!(f, "significant differences"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub document_a: String,
    pub document_b: String,
    pub total_differences: usize,
    pub total_matches: usize,
    pub stats: Stats,
}

/// Full comparison report for one document pair.
///
/// Created once per comparison and never mutated afterwards; serializes
/// to JSON as-is and feeds the HTML rendering in the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub summary: Summary,
    pub differences: Vec<Difference>,
    pub matches: Vec<MatchEntry>,
    pub tables: Vec<TableOutcome>,
    pub expected_tables: Vec<ExpectedTableCheck>,
    /// Heading-like lines collected from both documents.
    pub headings: BTreeSet<String>,
    pub verdict: Verdict,
}
