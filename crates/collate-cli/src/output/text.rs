use collate_core::compare::{ComparisonReport, Difference, DocSide, TableOutcome};
use collate_core::DocumentInspection;

/// Render a comparison report as plain terminal text.
pub fn render(report: &ComparisonReport, show_matches: bool) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str(&format!(
        "=== Comparison: {} vs {} ===\n\n",
        summary.document_a, summary.document_b
    ));
    out.push_str(&format!("  Verdict: {}\n", report.verdict));
    out.push_str(&format!(
        "  Differences: {}, matches: {}\n",
        summary.total_differences, summary.total_matches
    ));
    out.push_str(&format!(
        "  Pages: {}, tables: {} ({} matched)\n\n",
        summary.stats.total_pages, summary.stats.tables_found, summary.stats.table_matches
    ));

    if !report.expected_tables.is_empty() {
        out.push_str("  Expected tables:\n");
        for check in &report.expected_tables {
            match &check.best_candidate {
                Some(candidate) if *candidate != check.keyword => {
                    out.push_str(&format!(
                        "    {:<16} {} -> \"{}\" (similarity {:.2})\n",
                        check.status.to_string(),
                        check.keyword,
                        candidate,
                        check.similarity
                    ));
                }
                Some(_) => {
                    out.push_str(&format!(
                        "    {:<16} {} (similarity {:.2})\n",
                        check.status.to_string(),
                        check.keyword,
                        check.similarity
                    ));
                }
                None => {
                    out.push_str(&format!(
                        "    {:<16} {}\n",
                        check.status.to_string(),
                        check.keyword
                    ));
                }
            }
        }
        out.push('\n');
    }

    if report.differences.is_empty() {
        out.push_str("  No differences found.\n");
    } else {
        out.push_str("  Differences:\n");
        for difference in &report.differences {
            out.push_str(&format!(
                "    {:<9} {}\n",
                format!("[{}]", difference.severity()),
                difference.description()
            ));
            if let Difference::TextMismatch {
                excerpt_a: Some(a),
                excerpt_b: Some(b),
                ..
            } = difference
            {
                out.push_str(&format!("              A: {}\n", a));
                out.push_str(&format!("              B: {}\n", b));
            }
        }
    }

    if show_matches && !report.matches.is_empty() {
        out.push_str("\n  Matches:\n");
        for entry in &report.matches {
            out.push_str(&format!("    {}\n", entry.description()));
        }
        out.push_str("\n  Tables:\n");
        for outcome in &report.tables {
            out.push_str(&format!("    {}\n", table_outcome_line(outcome)));
        }
    }

    out
}

fn table_outcome_line(outcome: &TableOutcome) -> String {
    let side = match outcome.source {
        DocSide::A => "A",
        DocSide::B => "B",
    };
    let name = outcome.title.as_deref().unwrap_or("(untitled)");
    let similarity = match outcome.similarity {
        Some(s) => format!(", similarity {:.2}", s),
        None => String::new(),
    };
    format!(
        "{}  {:<14} {} ({} rows{})",
        side,
        outcome.status.to_string(),
        name,
        outcome.rows,
        similarity
    )
}

/// Render a single-document inspection as plain terminal text.
pub fn render_inspection(label: &str, inspection: &DocumentInspection) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Document: {} ===\n\n", label));
    out.push_str(&format!(
        "  Backend: {} ({} pages reported, {} after splitting)\n\n",
        inspection.backend, inspection.reported_page_count, inspection.page_count
    ));

    if inspection.tables.is_empty() {
        out.push_str("  No tables detected.\n");
    } else {
        out.push_str(&format!("  Tables ({}):\n", inspection.tables.len()));
        for (i, table) in inspection.tables.iter().enumerate() {
            out.push_str(&format!(
                "    {}. {} ({} rows)\n",
                i + 1,
                table.title.as_deref().unwrap_or("(untitled)"),
                table.row_count
            ));
            for line in table.preview.lines() {
                out.push_str(&format!("         {}\n", line.trim_end()));
            }
        }
    }

    if !inspection.headings.is_empty() {
        out.push_str(&format!("\n  Headings ({}):\n", inspection.headings.len()));
        for heading in &inspection.headings {
            out.push_str(&format!("    {}\n", heading));
        }
    }

    out
}
