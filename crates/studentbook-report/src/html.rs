//! HTML class report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use studentbook_core::report::ClassReport;
use studentbook_core::statistics::Summary;
use studentbook_core::Grade;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Row class for a grade. Only the extremes are highlighted.
fn row_class(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "grade-a",
        Grade::F => "grade-f",
        _ => "normal",
    }
}

/// Generate an HTML page from a class report.
pub fn generate_html(report: &ClassReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>studentbook report - {}</title>\n",
        html_escape(&report.source)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Class report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Source: <strong>{}</strong> | {} | {}</p>\n",
        html_escape(&report.source),
        html_escape(&report.summary.status_line()),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Grade distribution</h2>\n");
    html.push_str(&generate_bar_chart(&report.summary));
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"students\">\n");
    html.push_str("<thead><tr>");
    for (i, col) in COLUMNS.iter().enumerate() {
        html.push_str(&format!("<th onclick=\"sortTable({i})\">{col}</th>"));
    }
    html.push_str("</tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.records {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}%</td><td>{}</td></tr>\n",
            row_class(r.grade),
            r.id,
            html_escape(&r.name),
            r.c1,
            r.c2,
            r.c3,
            r.exam,
            r.total,
            r.percentage,
            r.grade,
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ClassReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const COLUMNS: [&str; 9] = ["ID", "Name", "C1", "C2", "C3", "Exam", "Total", "%", "Grade"];

fn generate_bar_chart(summary: &Summary) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 40;

    let max_count = summary.grade_counts.values().copied().max().unwrap_or(0).max(1);
    let total_height = Grade::ALL.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, grade) in Grade::ALL.iter().enumerate() {
        let count = summary.grade_count(*grade);
        let y = i * (bar_height + padding) + padding;
        let width = count * max_width / max_count;

        let color = match grade {
            Grade::A => "#22c55e",
            Grade::B | Grade::C => "#eab308",
            Grade::D => "#f97316",
            Grade::F => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            grade
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --grade-a: #d4edda; --grade-f: #f8d7da; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --grade-a: #064e3b; --grade-f: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: center; }
td:nth-child(2) { text-align: left; }
th { background: var(--border); cursor: pointer; }
.grade-a { background: var(--grade-a); }
.grade-f { background: var(--grade-f); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

// Numeric columns compare as numbers, falling back to text.
const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('students');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va.replace('%', ''));
    const nb = parseFloat(vb.replace('%', ''));
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use studentbook_core::{Scores, StudentRecord};

    fn make_test_report() -> ClassReport {
        let records = vec![
            StudentRecord::new(1345, "John <Curry>", Scores::new(8, 15, 7, 45)),
            StudentRecord::new(9876, "Lee Scott", Scores::new(17, 11, 16, 99)),
            StudentRecord::new(5, "Low Score", Scores::new(0, 0, 0, 10)),
        ];
        ClassReport::new("StudentMarks.txt", &records)
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("StudentMarks.txt"));
        assert!(html.contains("Lee Scott"));
        assert!(html.contains("Records Shown: 3"));
    }

    #[test]
    fn html_report_highlights_extremes_and_escapes() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("<tr class=\"grade-a\"><td>9876</td>"));
        assert!(html.contains("<tr class=\"grade-f\"><td>5</td>"));
        assert!(html.contains("<tr class=\"normal\"><td>1345</td>"));
        assert!(html.contains("John &lt;Curry&gt;"));
        assert!(!html.contains("John <Curry>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
