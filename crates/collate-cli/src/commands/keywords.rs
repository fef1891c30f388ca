use collate_core::config::{
    parse_keyword_list, CompareConfig, DEFAULT_EXPECTED_TABLES, EXPECTED_TABLES_ENV,
};
use collate_core::error::CollateError;
use collate_core::extraction::pdftotext::PdftotextExtractor;
use collate_core::tables::matching::check_expected_tables;
use std::path::Path;

pub fn list() -> Result<(), CollateError> {
    let from_env = std::env::var(EXPECTED_TABLES_ENV)
        .ok()
        .map(|raw| parse_keyword_list(&raw))
        .filter(|keywords| !keywords.is_empty());

    match from_env {
        Some(keywords) => {
            println!("Expected tables (from {}):\n", EXPECTED_TABLES_ENV);
            for keyword in &keywords {
                println!("  {}", keyword);
            }
        }
        None => {
            println!("Expected tables (built-in default):\n");
            for keyword in DEFAULT_EXPECTED_TABLES {
                println!("  {}", keyword);
            }
            println!();
            println!(
                "Override with {} as a comma-separated list.",
                EXPECTED_TABLES_ENV
            );
        }
    }

    Ok(())
}

pub fn check(file: &Path) -> Result<(), CollateError> {
    let config = CompareConfig::from_env();
    let pdf_bytes = std::fs::read(file)?;
    let extractor = PdftotextExtractor::new();
    let inspection = collate_core::inspect_pdf(&pdf_bytes, &extractor, &config)?;

    let mut candidates = inspection.headings.clone();
    candidates.extend(inspection.tables.iter().filter_map(|t| t.title.clone()));

    let checks = check_expected_tables(&config.expected_tables, &candidates, &config.thresholds);

    println!("Expected tables in {}:\n", file.display());
    for check in &checks {
        match &check.best_candidate {
            Some(candidate) if candidate != &check.keyword => {
                println!(
                    "  {:<16} {} -> \"{}\" (similarity {:.2})",
                    check.status.to_string(),
                    check.keyword,
                    candidate,
                    check.similarity
                );
            }
            Some(_) => {
                println!(
                    "  {:<16} {} (similarity {:.2})",
                    check.status.to_string(),
                    check.keyword,
                    check.similarity
                );
            }
            None => {
                println!("  {:<16} {}", check.status.to_string(), check.keyword);
            }
        }
    }

    Ok(())
}
