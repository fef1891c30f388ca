use collate_core::compare::ComparisonReport;
use collate_core::error::CollateError;
use collate_core::DocumentInspection;

pub fn render_report(report: &ComparisonReport) -> Result<String, CollateError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_inspection(inspection: &DocumentInspection) -> Result<String, CollateError> {
    Ok(serde_json::to_string_pretty(inspection)?)
}
