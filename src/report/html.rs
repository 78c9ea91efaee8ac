//! Printable HTML rendering.
//!
//! The document is self-contained and laid out for landscape printing, so a
//! browser's "print to PDF" produces the match report export.

use std::fmt::Write;

use super::{FundamentalRow, Report, ReportRow, RowSubject};
use crate::models::{Fundamental, Outcome};

const STYLE: &str = r#"
@page { size: letter landscape; margin: 0.5in; }
body { font-family: "Helvetica Neue", Arial, sans-serif; font-size: 11px; color: #222; }
h1 { font-size: 18px; margin-bottom: 2px; }
.generated { color: #666; margin-top: 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #bbb; padding: 3px 5px; text-align: center; }
th { background: #f0f0f0; }
td.name { text-align: left; }
tr.team-totals td { font-weight: bold; border-top: 2px solid #444; }
.band-excellent { background: #2e7d32; color: #fff; }
.band-good { background: #a5d6a7; }
.band-fair { background: #fff59d; }
.band-none { background: #eeeeee; }
.band-negative { background: #ffcc80; }
.band-very-negative { background: #e57373; color: #fff; }
"#;

/// Escape text for HTML element and attribute content.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn column_count(fundamental: Fundamental) -> usize {
    // TOT, four grades, [M], points, errors, Pos%, Eff%
    let blocked = usize::from(fundamental.tracks_blocked());
    1 + Outcome::ALL.len() + blocked + 4
}

fn write_fundamental_cells(out: &mut String, row: &FundamentalRow) {
    let _ = write!(out, "<td>{}</td>", row.total_attempts);
    for count in [row.excellent, row.good, row.poor, row.error] {
        let _ = write!(out, "<td>{}</td>", count);
    }
    if let Some(blocked) = row.blocked {
        let _ = write!(out, "<td>{}</td>", blocked);
    }
    let _ = write!(out, "<td>{}</td><td>{}</td>", row.points, row.errors);
    let _ = write!(
        out,
        "<td class=\"{}\">{}%</td><td class=\"{}\">{}%</td>",
        row.positivity_band.css_class(),
        row.positivity,
        row.efficiency_band.css_class(),
        row.efficiency
    );
}

fn write_row(out: &mut String, row: &ReportRow, team_label: &str) {
    match &row.subject {
        RowSubject::Player {
            jersey_number,
            name,
            surname,
        } => {
            let _ = write!(
                out,
                "<tr><td>{}</td><td class=\"name\">{}</td><td class=\"name\">{}</td>",
                jersey_number,
                escape(name),
                escape(surname.as_deref().unwrap_or_default())
            );
        }
        RowSubject::Team => {
            let _ = write!(
                out,
                "<tr class=\"team-totals\"><td colspan=\"3\">{}</td>",
                escape(team_label)
            );
        }
    }
    for fundamental in &row.fundamentals {
        write_fundamental_cells(out, fundamental);
    }
    out.push_str("</tr>\n");
}

/// Render the report as a standalone HTML document.
pub fn render(report: &Report) -> String {
    let labels = report.language.labels();
    let heading = escape(&report.heading());
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"{}\">", report.language.code());
    let _ = writeln!(
        out,
        "<head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>",
        heading, STYLE
    );
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<h1>{}</h1>", heading);
    let _ = writeln!(
        out,
        "<p class=\"generated\">{} {}</p>",
        labels.generated,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    if report.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(labels.no_data));
        out.push_str("</body>\n</html>\n");
        return out;
    }

    out.push_str("<table>\n<thead>\n<tr>");
    for label in [labels.number, labels.name, labels.surname] {
        let _ = write!(out, "<th rowspan=\"2\">{}</th>", escape(label));
    }
    for fundamental in Fundamental::ALL {
        let _ = write!(
            out,
            "<th colspan=\"{}\">{}</th>",
            column_count(fundamental),
            escape(labels.fundamental(fundamental))
        );
    }
    out.push_str("</tr>\n<tr>");
    for fundamental in Fundamental::ALL {
        let _ = write!(out, "<th>{}</th>", labels.total);
        for outcome in Outcome::ALL {
            let _ = write!(out, "<th>{}</th>", outcome.symbol());
        }
        if fundamental.tracks_blocked() {
            out.push_str("<th>M</th>");
        }
        let _ = write!(
            out,
            "<th>{}</th><th>{}</th><th>{}</th><th>{}</th>",
            labels.points,
            labels.errors,
            escape(labels.positivity),
            escape(labels.efficiency)
        );
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in report.rows() {
        write_row(&mut out, row, labels.team_total);
    }

    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}
