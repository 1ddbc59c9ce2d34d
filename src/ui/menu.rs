use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, BANKS_PANEL, FILES_PANEL};
use crate::store::QuestionStore;
use crate::ui::banks::format_bank_item;
use crate::ui::layout::{calculate_menu_chunks, centered_rect};

fn draw_panel_header(area: Rect, title: &str, focused: bool, f: &mut Frame) {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

fn panel_list<'a>(items: Vec<String>, empty: &'a str, selected: usize, focused: bool) -> List<'a> {
    let list_items: Vec<ListItem> = if items.is_empty() {
        vec![ListItem::new(empty).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        items
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == selected && focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if i == selected {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };

    List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    )
}

fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw_menu<S: QuestionStore>(f: &mut Frame, app: &App<S>) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new("Question Bank Import")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let files_title = format!("[1] CSV Files ({})", app.config.import_dir.display());
    draw_panel_header(
        layout.files_header,
        &files_title,
        app.focused_panel == FILES_PANEL,
        f,
    );
    let file_names = app
        .csv_files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
        .collect();
    f.render_widget(
        panel_list(
            file_names,
            "No CSV files found",
            app.selected_file,
            app.focused_panel == FILES_PANEL,
        ),
        layout.files_list,
    );

    draw_panel_header(
        layout.banks_header,
        "[2] Question Banks",
        app.focused_panel == BANKS_PANEL,
        f,
    );
    let bank_items = app.banks.iter().map(format_bank_item).collect();
    f.render_widget(
        panel_list(
            bank_items,
            "No banks yet - press n to create one",
            app.selected_bank,
            app.focused_panel == BANKS_PANEL,
        ),
        layout.banks_list,
    );

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, layout.status_area);

    let help_text = vec![Line::from(vec![
        key_hint("1/2"),
        Span::from(" Focus Panel  "),
        key_hint("↑/↓"),
        Span::from(" Navigate  "),
        key_hint("Enter"),
        Span::from(" Import File Into Bank  "),
        key_hint("n"),
        Span::from(" New Bank  "),
        key_hint("r"),
        Span::from(" Refresh  "),
        key_hint("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_new_bank_prompt(f: &mut Frame, input: &str) {
    let area = centered_rect(60, 5, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(format!("{}_", input)),
        Line::from(vec![
            key_hint("Enter"),
            Span::from(" Create  "),
            key_hint("Esc"),
            Span::from(" Cancel"),
        ]),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("New Bank Name"),
    );
    f.render_widget(prompt, area);
}
