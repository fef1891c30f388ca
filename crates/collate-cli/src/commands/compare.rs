use collate_core::config::CompareConfig;
use collate_core::error::CollateError;
use collate_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    file_a: PathBuf,
    file_b: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    expected_tables: Vec<String>,
    show_matches: bool,
) -> Result<(), CollateError> {
    // Command-line keywords win over the environment override.
    let mut config = CompareConfig::from_env();
    if !expected_tables.is_empty() {
        config.expected_tables = expected_tables;
    }

    let extractor = PdftotextExtractor::new();
    let report = collate_core::compare_files(&file_a, &file_b, &extractor, &config)?;

    let rendered = match output_format {
        "json" => output::json::render_report(&report)?,
        "html" => output::html::render(&report),
        _ => output::text::render(&report, show_matches),
    };

    match output_file {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            eprintln!(
                "Report ({} differences, verdict: {}) written to {}",
                report.summary.total_differences,
                report.verdict,
                path.display()
            );
        }
        None => {
            println!("{rendered}");
        }
    }

    Ok(())
}
