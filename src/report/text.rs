//! Plain-text table rendering.

use std::fmt::Write;

use super::{FundamentalRow, Labels, Report, ReportRow, RowSubject};
use crate::models::{Fundamental, Outcome};

const GROUP_SEPARATOR: &str = " | ";

/// Column headers of one fundamental group.
fn group_headers(fundamental: Fundamental, labels: &Labels) -> Vec<String> {
    let mut headers = vec![labels.total.to_string()];
    headers.extend(Outcome::ALL.iter().map(|o| o.symbol().to_string()));
    if fundamental.tracks_blocked() {
        headers.push("M".to_string());
    }
    headers.push(labels.points.to_string());
    headers.push(labels.errors.to_string());
    headers.push(labels.positivity.to_string());
    headers.push(labels.efficiency.to_string());
    headers
}

fn group_cells(row: &FundamentalRow) -> Vec<String> {
    let mut cells = vec![
        row.total_attempts.to_string(),
        row.excellent.to_string(),
        row.good.to_string(),
        row.poor.to_string(),
        row.error.to_string(),
    ];
    if let Some(blocked) = row.blocked {
        cells.push(blocked.to_string());
    }
    cells.push(row.points.to_string());
    cells.push(row.errors.to_string());
    cells.push(format!("{}%", row.positivity));
    cells.push(format!("{}%", row.efficiency));
    cells
}

fn identity_cells(row: &ReportRow, labels: &Labels) -> [String; 3] {
    match &row.subject {
        RowSubject::Player {
            jersey_number,
            name,
            surname,
        } => [
            jersey_number.to_string(),
            name.clone(),
            surname.clone().unwrap_or_default(),
        ],
        RowSubject::Team => [String::new(), labels.team_total.to_string(), String::new()],
    }
}

/// One rendered line: identity cells, then one cell list per fundamental.
struct Line {
    identity: [String; 3],
    groups: Vec<Vec<String>>,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, w: usize) -> String {
    format!("{}{}", s, " ".repeat(w.saturating_sub(width(s))))
}

fn pad_left(s: &str, w: usize) -> String {
    format!("{}{}", " ".repeat(w.saturating_sub(width(s))), s)
}

fn center(s: &str, w: usize) -> String {
    let gap = w.saturating_sub(width(s));
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(gap - left))
}

fn render_line(line: &Line, id_widths: &[usize; 3], group_widths: &[Vec<usize>]) -> String {
    let mut out = line
        .identity
        .iter()
        .zip(id_widths)
        .map(|(cell, &w)| pad_right(cell, w))
        .collect::<Vec<_>>()
        .join(" ");

    for (cells, widths) in line.groups.iter().zip(group_widths) {
        out.push_str(GROUP_SEPARATOR);
        let joined = cells
            .iter()
            .zip(widths)
            .map(|(cell, &w)| pad_left(cell, w))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&joined);
    }

    out.trim_end().to_string()
}

/// Render the report as an aligned text table.
pub fn render(report: &Report) -> String {
    let labels = report.language.labels();
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.heading());
    let _ = writeln!(
        out,
        "{} {}",
        labels.generated,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    out.push('\n');

    if report.is_empty() {
        let _ = writeln!(out, "{}", labels.no_data);
        return out;
    }

    let header = Line {
        identity: [
            labels.number.to_string(),
            labels.name.to_string(),
            labels.surname.to_string(),
        ],
        groups: Fundamental::ALL
            .iter()
            .map(|&f| group_headers(f, labels))
            .collect(),
    };

    let body: Vec<Line> = report
        .rows()
        .map(|row| Line {
            identity: identity_cells(row, labels),
            groups: row.fundamentals.iter().map(group_cells).collect(),
        })
        .collect();

    let mut id_widths = [0usize; 3];
    let mut group_widths: Vec<Vec<usize>> = header
        .groups
        .iter()
        .map(|cells| vec![0; cells.len()])
        .collect();

    for line in std::iter::once(&header).chain(&body) {
        for (w, cell) in id_widths.iter_mut().zip(&line.identity) {
            *w = (*w).max(width(cell));
        }
        for (widths, cells) in group_widths.iter_mut().zip(&line.groups) {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(width(cell));
            }
        }
    }

    // Group titles centred over their columns.
    let id_total: usize = id_widths.iter().sum::<usize>() + id_widths.len() - 1;
    let mut titles = " ".repeat(id_total);
    for (fundamental, widths) in Fundamental::ALL.iter().zip(&group_widths) {
        let group_total = widths.iter().sum::<usize>() + widths.len() - 1;
        titles.push_str(GROUP_SEPARATOR);
        titles.push_str(&center(labels.fundamental(*fundamental), group_total));
    }
    let _ = writeln!(out, "{}", titles.trim_end());

    let header_line = render_line(&header, &id_widths, &group_widths);
    let _ = writeln!(out, "{}", header_line);
    let _ = writeln!(out, "{}", "-".repeat(width(&header_line)));

    let (players, team) = body.split_at(body.len() - 1);
    for line in players {
        let _ = writeln!(out, "{}", render_line(line, &id_widths, &group_widths));
    }
    let _ = writeln!(out, "{}", "-".repeat(width(&header_line)));
    for line in team {
        let _ = writeln!(out, "{}", render_line(line, &id_widths, &group_widths));
    }

    out
}
