pub mod pdftotext;

use crate::error::CollateError;
use regex::Regex;
use std::sync::LazyLock;

/// Page separator emitted by pdftotext and most text extractors.
pub const PAGE_BREAK: char = '\x0c';

static MULTI_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid page break regex"));

/// Raw text pulled from one document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    /// Page count as reported by the extraction backend.
    pub page_count: usize,
}

/// Trait for document text extraction backends.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text content from document bytes.
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedText, CollateError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Splits raw document text into page texts.
///
/// Uses form feeds when the extractor emitted them, otherwise falls back
/// to treating runs of three or more newlines as page breaks. Pages that
/// are blank after trimming are dropped; text without any separator
/// yields a single page.
pub fn split_pages(text: &str) -> Vec<String> {
    let raw_pages: Vec<&str> = if text.contains(PAGE_BREAK) {
        text.split(PAGE_BREAK).collect()
    } else {
        MULTI_NEWLINE.split(text).collect()
    };

    raw_pages
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Collapses all whitespace runs to single spaces and trims.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, marking elision.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
