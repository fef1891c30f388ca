use crate::error::CollateError;
use crate::extraction::{ExtractedText, TextExtractor, PAGE_BREAK};
use std::io::Write;
use std::process::Command;

/// Text extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment, which the
/// table detector depends on.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdftotextExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedText, CollateError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| CollateError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| CollateError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        // Run pdftotext -layout for table-friendly text extraction.
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CollateError::PdftotextNotFound
                } else {
                    CollateError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(CollateError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        let page_count = count_pages(&text);

        Ok(ExtractedText { text, page_count })
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Counts pages in pdftotext output by its form feed separators,
/// ignoring trailing blank pages. Any non-empty output is at least one
/// page.
fn count_pages(text: &str) -> usize {
    let pages = text
        .split(PAGE_BREAK)
        .filter(|p| !p.trim().is_empty())
        .count();
    if pages == 0 && !text.is_empty() {
        1
    } else {
        pages
    }
}
