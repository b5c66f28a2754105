//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use aprovatec_core::engine::{DisciplineResult, Projection};
use aprovatec_core::model::{approval_label, DisciplineStatus, StoredSemester, PASSING_AVERAGE};
use aprovatec_core::report::{HistoryTotals, SemesterReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "—".to_string())
}

fn status_class(status: DisciplineStatus) -> &'static str {
    match status {
        DisciplineStatus::Aprovado => "pass",
        DisciplineStatus::ReprovadoNota | DisciplineStatus::ReprovadoFalta => "fail",
        DisciplineStatus::EmRisco => "risk",
        DisciplineStatus::EmAndamento => "",
    }
}

fn approval_class(approved: Option<bool>) -> &'static str {
    match approved {
        Some(true) => "pass",
        Some(false) => "fail",
        None => "",
    }
}

fn projection_text(result: &DisciplineResult) -> String {
    match result.projection() {
        Projection::Complete => "Todas as avaliações lançadas".to_string(),
        Projection::Reachable { required_score } => format!(
            "Precisa de {required_score:.2} em {}",
            result.missing_assessments.join(", ")
        ),
        Projection::Unreachable { max_achievable } => {
            format!("Média máxima possível {max_achievable:.2}")
        }
    }
}

fn open_document(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

fn close_document(html: &mut String, raw_json: &str) {
    html.push_str("<section class=\"raw-data no-print\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&raw_json.replace('<', "&lt;").replace('>', "&gt;"));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
}

/// Generate the printable view of one evaluated semester.
pub fn generate_semester_html(report: &SemesterReport) -> String {
    let mut html = String::new();
    let eval = &report.evaluation;
    open_document(&mut html, &format!("AprovaTec — Semestre {}", report.label()));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>Semestre {}</h1>\n", report.label()));
    html.push_str(&format!(
        "<p class=\"meta\">{} disciplinas | Média do semestre: <strong>{}</strong> | <span class=\"{}\">{}</span> | {}</p>\n",
        report.disciplines.len(),
        score(eval.average),
        approval_class(eval.approved),
        approval_label(eval.approved),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Disciplinas</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Disciplina</th><th onclick=\"sortTable(1)\">CH</th><th onclick=\"sortTable(2)\">Faltas</th><th>AV1</th><th>AV2</th><th>AV3</th><th>EDAG</th><th onclick=\"sortTable(7)\">Média</th><th onclick=\"sortTable(8)\">Situação</th><th>Projeção</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for (d, r) in report.disciplines.iter().zip(&eval.disciplines) {
        let class = status_class(r.status);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{} / {:.2}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            html_escape(&d.name),
            d.workload,
            d.absences,
            r.limit_absences,
            score(d.av1),
            score(d.av2),
            score(d.av3),
            score(d.edag),
            score(r.average),
            class,
            r.status.label(),
            html_escape(&projection_text(r)),
        ));
    }

    html.push_str("</tbody></table>\n");

    let averages: Vec<(&str, Option<f64>)> = report
        .disciplines
        .iter()
        .zip(&eval.disciplines)
        .map(|(d, r)| (d.name.as_str(), r.average))
        .collect();
    if averages.iter().any(|(_, avg)| avg.is_some()) {
        html.push_str(&generate_bar_chart(&averages));
    }

    html.push_str("</section>\n");

    let raw = serde_json::to_string_pretty(report).unwrap_or_default();
    close_document(&mut html, &raw);
    html
}

/// Generate the printable dashboard of every stored semester.
pub fn generate_history_html(semesters: &[StoredSemester]) -> String {
    let mut html = String::new();
    let totals = HistoryTotals::from_semesters(semesters);
    open_document(&mut html, "AprovaTec — Histórico");

    html.push_str("<header>\n");
    html.push_str("<h1>Histórico acadêmico</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} semestres | {} disciplinas | <span class=\"pass\">{} aprovados</span> | <span class=\"fail\">{} reprovados</span> | {} pendentes</p>\n",
        totals.semesters, totals.disciplines, totals.approved, totals.reproved, totals.pending
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Semestres</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Semestre</th><th>Disciplinas</th><th>Média</th><th>Situação</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in semesters {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            s.label(),
            s.disciplines.len(),
            score(s.average),
            approval_class(s.approved),
            s.approval_label()
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Disciplinas</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Semestre</th><th onclick=\"sortTable(1)\">Disciplina</th><th onclick=\"sortTable(2)\">Média</th><th onclick=\"sortTable(3)\">Situação</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in semesters {
        for d in &s.disciplines {
            let status = d.status();
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                s.label(),
                html_escape(&d.name),
                score(d.average),
                status_class(status),
                status.label()
            ));
        }
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    let raw = serde_json::to_string_pretty(semesters).unwrap_or_default();
    close_document(&mut html, &raw);
    html
}

fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Write a semester export to a file.
pub fn write_semester_report(report: &SemesterReport, path: &Path) -> Result<()> {
    write_html(&generate_semester_html(report), path)
}

/// Write a history export to a file.
pub fn write_history_report(semesters: &[StoredSemester], path: &Path) -> Result<()> {
    write_html(&generate_history_html(semesters), path)
}

/// Horizontal bars of discipline averages on a 0–10 scale, with the
/// passing mark drawn as a vertical line.
fn generate_bar_chart(averages: &[(&str, Option<f64>)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = averages.len() * (bar_height + padding) + padding;
    let pass_x = label_width + (PASSING_AVERAGE / 10.0 * max_width as f64) as usize;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (name, average)) in averages.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let value = average.unwrap_or(0.0).clamp(0.0, 10.0);
        let width = (value / 10.0 * max_width as f64) as usize;

        let color = if value >= PASSING_AVERAGE {
            "#22c55e"
        } else if value >= PASSING_AVERAGE - 2.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score(*average)
        ));
    }

    svg.push_str(&format!(
        "  <line x1=\"{pass_x}\" y1=\"0\" x2=\"{pass_x}\" y2=\"{total_height}\" stroke=\"currentColor\" stroke-dasharray=\"4\"/>\n"
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --risk: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --risk: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.risk { background: var(--risk); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
@media print {
  .no-print { display: none; }
  body { padding: 0; }
}
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
