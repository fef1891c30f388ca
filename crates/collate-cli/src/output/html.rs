use collate_core::compare::{
    ComparisonReport, Difference, DocSide, ExpectedStatus, Severity, Verdict,
};

/// Render a comparison report as a standalone HTML page.
///
/// The markup is a presentation concern; everything shown here comes
/// straight from the report fields.
pub fn render(report: &ComparisonReport) -> String {
    let summary = &report.summary;
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>Document comparison report</title>\n",
    );
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>Document comparison</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} vs {}<br>generated {}</p>\n",
        escape(&summary.document_a),
        escape(&summary.document_b),
        summary.generated_at
    ));

    html.push_str(&format!(
        "<div class=\"verdict\" style=\"background:{}\">{}</div>\n",
        verdict_color(report.verdict),
        escape(&report.verdict.to_string().to_uppercase())
    ));

    // Summary stat boxes
    html.push_str("<div class=\"stats\">\n");
    for (label, value) in [
        ("Pages", summary.stats.total_pages),
        ("Tables found", summary.stats.tables_found),
        ("Table matches", summary.stats.table_matches),
        ("Text matches", summary.stats.text_matches),
        ("Differences", summary.total_differences),
        ("Matches", summary.total_matches),
    ] {
        html.push_str(&format!(
            "<div class=\"stat\"><div class=\"num\">{}</div><div class=\"label\">{}</div></div>\n",
            value, label
        ));
    }
    html.push_str("</div>\n");

    if !report.expected_tables.is_empty() {
        html.push_str("<h2>Expected tables</h2>\n<table>\n");
        html.push_str("<tr><th>Keyword</th><th>Status</th><th>Similarity</th><th>Best candidate</th></tr>\n");
        for check in &report.expected_tables {
            html.push_str(&format!(
                "<tr><td>{}</td><td style=\"color:{}\">{}</td><td>{:.2}</td><td>{}</td></tr>\n",
                escape(&check.keyword),
                expected_color(check.status),
                check.status,
                check.similarity,
                escape(check.best_candidate.as_deref().unwrap_or("-"))
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str(&format!(
        "<h2>Differences ({})</h2>\n",
        report.differences.len()
    ));
    if report.differences.is_empty() {
        html.push_str("<p>No differences found.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Severity</th><th>Kind</th><th>Description</th><th>Details</th></tr>\n");
        for difference in &report.differences {
            html.push_str(&format!(
                "<tr><td class=\"sev\" style=\"background:{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                severity_color(difference.severity()),
                difference.severity(),
                difference.kind().replace('_', " "),
                escape(difference.description()),
                difference_details(difference)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str(&format!("<h2>Matches ({})</h2>\n", report.matches.len()));
    if !report.matches.is_empty() {
        html.push_str("<ul>\n");
        for entry in &report.matches {
            html.push_str(&format!("<li>{}</li>\n", escape(entry.description())));
        }
        html.push_str("</ul>\n");
    }

    if !report.tables.is_empty() {
        html.push_str("<h2>Tables</h2>\n<table>\n");
        html.push_str(
            "<tr><th>Document</th><th>Title</th><th>Rows</th><th>Status</th><th>Similarity</th><th>Preview</th></tr>\n",
        );
        for outcome in &report.tables {
            let side = match outcome.source {
                DocSide::A => "A",
                DocSide::B => "B",
            };
            let similarity = match outcome.similarity {
                Some(s) => format!("{:.2}", s),
                None => "-".to_string(),
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><pre>{}</pre></td></tr>\n",
                side,
                escape(outcome.title.as_deref().unwrap_or("(untitled)")),
                outcome.rows,
                outcome.status,
                similarity,
                escape(&outcome.preview)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
h1 { margin-bottom: 0.2em; }
.meta { color: #666; margin-top: 0; }
.verdict { color: #fff; padding: 0.6em 1em; font-weight: bold; border-radius: 4px; display: inline-block; }
.stats { display: flex; gap: 1em; margin: 1.5em 0; flex-wrap: wrap; }
.stat { border: 1px solid #ddd; border-radius: 4px; padding: 0.8em 1.2em; text-align: center; }
.stat .num { font-size: 1.6em; font-weight: bold; }
.stat .label { color: #666; font-size: 0.85em; }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #ddd; padding: 0.4em 0.8em; text-align: left; vertical-align: top; }
th { background: #f5f5f5; }
td.sev { color: #fff; font-weight: bold; }
pre { margin: 0; font-size: 0.85em; }
";

fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Identical => "#2e7d32",
        Verdict::MostlySimilar => "#f9a825",
        Verdict::SignificantDifferences => "#c62828",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "#c62828",
        Severity::Medium => "#ef6c00",
        Severity::Info => "#1565c0",
    }
}

fn expected_color(status: ExpectedStatus) -> &'static str {
    match status {
        ExpectedStatus::Found => "#2e7d32",
        ExpectedStatus::PossibleMatch => "#ef6c00",
        ExpectedStatus::Missing => "#c62828",
    }
}

/// Kind-specific cell content: excerpts for text and table drift,
/// nothing for the rest (the description already says it all).
fn difference_details(difference: &Difference) -> String {
    match difference {
        Difference::TextMismatch {
            excerpt_a: Some(a),
            excerpt_b: Some(b),
            ..
        } => format!(
            "<pre>A: {}\nB: {}</pre>",
            escape(a),
            escape(b)
        ),
        Difference::TableMismatch {
            excerpt_a,
            excerpt_b,
            ..
        } => format!(
            "<pre>A: {}\nB: {}</pre>",
            escape(excerpt_a),
            escape(excerpt_b)
        ),
        _ => String::new(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
