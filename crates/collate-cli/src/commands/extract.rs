use collate_core::config::CompareConfig;
use collate_core::error::CollateError;
use collate_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), CollateError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let inspection = collate_core::inspect_pdf(&pdf_bytes, &extractor, &CompareConfig::from_env())?;

    let rendered = match output_format {
        "json" => output::json::render_inspection(&inspection)?,
        _ => output::text::render_inspection(&input_file.display().to_string(), &inspection),
    };
    println!("{rendered}");

    Ok(())
}
