use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use lookup_core::models::SelectionMode;

use crate::app::{App, AppState, Focus};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Mode bar
            Constraint::Min(8),    // Selectors
            Constraint::Length(6), // Output
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_mode_bar(frame, app, chunks[1]);
    render_selectors(frame, app, chunks[2]);
    render_output(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ShowingError => render_error_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Competency Lookup";
    let source = format!("{}  ", app.source_description());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + source.len() + help_hint.len() + 2),
        )),
        Span::styled(source, styles::muted_style()),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_mode_bar(frame: &mut Frame, app: &App, area: Rect) {
    let modes = [
        ("[1] Participant", SelectionMode::Participant),
        ("[2] Summary", SelectionMode::Summary),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, mode)) in modes.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::tab_style(app.form.mode() == *mode)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_selectors(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_list(
        frame,
        chunks[0],
        " Competency ",
        &app.competencies,
        app.competency_selection,
        app.form.competency(),
        app.focus == Focus::Competencies,
    );

    let title = match app.form.mode() {
        SelectionMode::Participant => " Participant ",
        SelectionMode::Summary => " Summary Method ",
    };
    let chosen = match app.form.mode() {
        SelectionMode::Participant => app.form.participant(),
        SelectionMode::Summary => app.form.summary_mode().map(|m| m.label()),
    };
    render_list(
        frame,
        chunks[1],
        title,
        &app.secondary_items(),
        app.secondary_selection,
        chosen,
        app.focus == Focus::Secondary,
    );
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selection: usize,
    chosen: Option<&str>,
    focused: bool,
) {
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_chosen = chosen == Some(item.as_str());
            let marker = if is_chosen { "● " } else { "  " };

            let style = if i == selection && focused {
                styles::selected_style()
            } else if is_chosen {
                styles::chosen_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(Line::from(format!("{}{}", marker, item))).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!("{}({}) ", title, items.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    if list_items.is_empty() {
        let paragraph = Paragraph::new(Span::styled("  Nothing to choose from", styles::muted_style()))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(list_items).block(block);

    let mut state = ListState::default();
    state.select(Some(selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let second_label = match form.mode() {
        SelectionMode::Participant => "Participant",
        SelectionMode::Summary => "Method",
    };
    let second_value = match form.mode() {
        SelectionMode::Participant => form.participant().unwrap_or("-").to_string(),
        SelectionMode::Summary => form
            .summary_mode()
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| "-".to_string()),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Competency: ", styles::muted_style()),
            Span::styled(form.competency().unwrap_or("-"), styles::list_item_style()),
            Span::styled(format!("   {}: ", second_label), styles::muted_style()),
            Span::styled(second_value, styles::list_item_style()),
        ]),
        Line::from(""),
    ];

    match form.output() {
        Some(outcome) => {
            let style = if outcome.found {
                styles::success_style()
            } else {
                styles::error_style()
            };
            lines.push(Line::from(Span::styled(format!(" {}", outcome.text), style)));
        }
        None if form.is_submittable() => {
            lines.push(Line::from(vec![
                Span::styled(" Press ", styles::muted_style()),
                Span::styled("r", styles::help_key_style()),
                Span::styled(" to look it up", styles::muted_style()),
            ]));
        }
        None => {}
    }

    let block = Block::default()
        .title(" Result ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]un | [u]pdate | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.loading {
        " Loading... ".to_string()
    } else if app.dataset.is_empty() {
        " No participants loaded ".to_string()
    } else {
        format!(
            " {} participants, updated {} ",
            app.dataset.len(),
            app.dataset.age_display()
        )
    };

    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 22, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Competency Lookup", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1 / 2", "Participant / summary mode"),
        help_line("Tab", "Switch list"),
        help_line("↑/↓ j/k", "Move selection"),
        help_line("Home/End", "First / last item"),
        help_line("PgUp/PgDn", "Scroll a page"),
        help_line("Enter", "Choose highlighted item"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("r", "Look up / summarise"),
        help_line("c", "Clear selections"),
        help_line("u", "Reload participants"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

fn render_error_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(60, 9, frame.area());

    frame.render_widget(Clear, area);

    let message = app.error_message.as_deref().unwrap_or("Unknown error");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {}", message), styles::error_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("[Enter]", styles::help_key_style()),
            Span::styled(" to dismiss, ", styles::muted_style()),
            Span::styled("[u]", styles::help_key_style()),
            Span::styled(" to retry", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Error ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
