//! Plain-text rendering of pipeline results for the terminal.

use crate::adapters::export::DISEASE_CSV_HEADER;
use crate::domain::{AccessionId, DiseaseRecord, Notice, PipelineResult, Severity};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

/// Description column is clipped to this many characters in the terminal table.
const MAX_DESCRIPTION_WIDTH: usize = 72;

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Render the disease table with aligned columns.
pub fn render_table(records: &[DiseaseRecord]) -> String {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                clip(&r.description, MAX_DESCRIPTION_WIDTH),
            ]
        })
        .collect();

    let mut widths = DISEASE_CSV_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$} | {:<w1$} | {}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
        .trim_end()
        .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(DISEASE_CSV_HEADER));
    out.push('\n');
    out.push_str(&format!(
        "{}-+-{}-+-{}\n",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    ));
    for row in &rows {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
        out.push('\n');
    }
    out
}

/// Render gene, pathways and disease table. The notice is printed separately.
pub fn render_result(accession: &AccessionId, result: &PipelineResult) -> String {
    let mut out = String::new();
    let Some(gene_id) = result.gene_id() else {
        return out;
    };

    out.push_str(&format!("KEGG gene ID: {}\n", gene_id));

    let pathways = result.pathways();
    if !pathways.is_empty() {
        out.push_str(&format!("Found {} pathway(s):\n", pathways.len()));
        for p in pathways {
            out.push_str(&format!("  {:<12} {} disease(s)", p.id.as_str(), p.disease_count));
            if let Some(img) = &p.image {
                out.push_str(&format!("  map {}x{}", img.width, img.height));
            }
            out.push('\n');
        }
    }

    if !result.diseases().is_empty() {
        out.push_str(&format!("\nDiseases associated with {}:\n", accession));
        out.push_str(&render_table(result.diseases()));
    }
    out
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Print a notice colored by severity.
pub fn print_notice(notice: &Notice) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(severity_color(notice.severity)));
    let _ = out.execute(Print(format!("{}\n", notice.message)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

/// Print the full result followed by its notice.
pub fn print_result(accession: &AccessionId, result: &PipelineResult) {
    print!("{}", render_result(accession, result));
    print_notice(&result.notice());
}
