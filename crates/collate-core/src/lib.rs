pub mod compare;
pub mod config;
pub mod error;
pub mod extraction;
pub mod tables;

use compare::outcome::ComparisonReport;
use config::CompareConfig;
use error::CollateError;
use extraction::{split_pages, TextExtractor};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tables::TableBlock;

/// Main API entry point: compare two document files on disk.
///
/// Reads both files, runs the extractor, and labels the report with the
/// file paths. An unreadable file or a failing extractor aborts the
/// comparison; no partial report is produced.
pub fn compare_files(
    path_a: &Path,
    path_b: &Path,
    extractor: &dyn TextExtractor,
    config: &CompareConfig,
) -> Result<ComparisonReport, CollateError> {
    let bytes_a = std::fs::read(path_a)?;
    let bytes_b = std::fs::read(path_b)?;

    let extracted_a = extractor.extract(&bytes_a)?;
    let extracted_b = extractor.extract(&bytes_b)?;

    Ok(compare::compare_documents(
        &path_a.display().to_string(),
        &path_b.display().to_string(),
        &extracted_a.text,
        &extracted_b.text,
        config,
    ))
}

/// Compare two documents already loaded into memory.
pub fn compare_pdfs(
    bytes_a: &[u8],
    bytes_b: &[u8],
    extractor: &dyn TextExtractor,
    config: &CompareConfig,
) -> Result<ComparisonReport, CollateError> {
    let extracted_a = extractor.extract(bytes_a)?;
    let extracted_b = extractor.extract(bytes_b)?;

    Ok(compare::compare_documents(
        "document A",
        "document B",
        &extracted_a.text,
        &extracted_b.text,
        config,
    ))
}

/// Compare already-extracted text, bypassing extraction entirely.
pub fn compare_texts(text_a: &str, text_b: &str, config: &CompareConfig) -> ComparisonReport {
    compare::compare_documents("document A", "document B", text_a, text_b, config)
}

/// What one document looks like to the engine, without a comparison:
/// its pages and whatever the table scan finds in them.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInspection {
    pub backend: String,
    /// Page count as reported by the extraction backend.
    pub reported_page_count: usize,
    /// Page count after splitting.
    pub page_count: usize,
    pub pages: Vec<String>,
    pub tables: Vec<TableBlock>,
    pub headings: BTreeSet<String>,
}

/// Extract and scan a single document, for inspection tooling.
pub fn inspect_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TextExtractor,
    config: &CompareConfig,
) -> Result<DocumentInspection, CollateError> {
    let extracted = extractor.extract(pdf_bytes)?;
    let pages = split_pages(&extracted.text);
    let scan = tables::scan_document(&pages, &config.heuristics);

    Ok(DocumentInspection {
        backend: extractor.backend_name().to_string(),
        reported_page_count: extracted.page_count,
        page_count: pages.len(),
        pages,
        tables: scan.tables,
        headings: scan.headings,
    })
}
