use crate::import_flow::{ImportOutcome, ImportSession};
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ERROR_LINE_WIDTH: usize = 100;

/// The error lines shown on the summary screen, plus a trailer when some were cut.
pub fn error_preview_lines(session: &ImportSession, limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = session
        .report
        .error_preview(limit)
        .into_iter()
        .map(|e| truncate_string(&e, ERROR_LINE_WIDTH))
        .collect();

    let hidden = session.report.errors.len().saturating_sub(limit);
    if hidden > 0 {
        lines.push(format!("... and {} more", hidden));
    }
    lines
}

pub fn draw_import_summary(f: &mut Frame, session: &ImportSession, preview_limit: usize) {
    let layout = calculate_summary_chunks(f.area());

    let title_text = format!("Import {} -> {}", session.file_name, session.bank.name);
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut counts = Text::default();
    counts.push_line(Line::from(format!(
        "{} succeeded, {} failed",
        session.report.accepted.len(),
        session.report.errors.len()
    )));
    match &session.outcome {
        Some(outcome) => {
            let color = match outcome {
                ImportOutcome::Imported(_) => Color::Green,
                ImportOutcome::Cancelled | ImportOutcome::NothingToImport => Color::Yellow,
                ImportOutcome::Rejected | ImportOutcome::Failed(_) => Color::Red,
            };
            counts.push_line(Line::styled(
                outcome.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        None => {
            counts.push_line(Line::styled(
                format!(
                    "Import the {} valid questions and skip the rest?",
                    session.report.accepted.len()
                ),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    let counts = Paragraph::new(counts).block(Block::default().borders(Borders::ALL));
    f.render_widget(counts, layout.counts_area);

    let mut errors = Text::default();
    for line in error_preview_lines(session, preview_limit) {
        errors.push_line(Line::from(line));
    }
    let errors = Paragraph::new(errors)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Row errors"));
    f.render_widget(errors, layout.errors_area);

    let help_text = if session.awaiting_confirmation() {
        vec![Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Import Valid Rows  "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" Cancel  "),
        ])]
    } else {
        vec![Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Main Menu  "),
        ])]
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
