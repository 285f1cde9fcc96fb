//! UI module - renders the published view model.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  CUBE TRANSFER  ·  Amount              09:41│
//! ├─────────────────────────────────────────────┤
//! │  (screen body)                              │
//! ├─────────────────────────────────────────────┤
//! │  toast / error                              │
//! │  [0-9] Amount  [⌫] Delete  [Enter] Next ... │
//! └─────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use transfer_flow::domain::{AuthPhase, RecipientCard, TransferSummaryView};
use transfer_flow::{format_currency, ScreenId};

use crate::app::{App, InputMode};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(10),   // Screen body
            Constraint::Length(4), // Toast + keybinds
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.screen() {
        ScreenId::Home => render_home(frame, chunks[1], app),
        ScreenId::Recipient => render_recipient(frame, chunks[1], app),
        ScreenId::Amount => render_amount(frame, chunks[1], app),
        ScreenId::Auth => render_auth(frame, chunks[1], app),
        ScreenId::Success => render_success(frame, chunks[1], app),
    }
    render_footer(frame, chunks[2], app);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " CUBE TRANSFER ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.screen().title()),
            Style::default().fg(Color::White),
        ),
    ];
    let clock = Span::styled(
        format!(" {} ", app.view.clock_text),
        Style::default().fg(Color::DarkGray),
    );

    let title_len: usize = title.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(title_len + clock.content.chars().count() + 2);

    let mut spans = title;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(clock);

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(bordered("")),
        area,
    );
}

fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Available balance",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            app.view.amount.available_balance_text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[T]", Style::default().fg(Color::Yellow)),
            Span::raw(" Quick transfer"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(bordered(" Home ")), area);
}

fn render_recipient(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let search_style = if app.mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let placeholder = if app.query.is_empty() && app.mode != InputMode::Search {
        "Search name or bank".to_string()
    } else {
        app.query.clone()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(placeholder, search_style)).block(bordered(" Search ")),
        chunks[0],
    );

    let items: Vec<ListItem> = app
        .filtered()
        .into_iter()
        .enumerate()
        .map(|(idx, recipient)| {
            let card = RecipientCard::from(recipient);
            let style = if idx == app.selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(card_line(&card)).style(style)
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "No matching recipients",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };
    frame.render_widget(list.block(bordered(" Recipients ")), chunks[1]);
}

fn card_line(card: &RecipientCard) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", card.avatar),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(card.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(card.account_line.clone(), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_amount(frame: &mut Frame, area: Rect, app: &App) {
    let amount = &app.view.amount;
    let mut lines = Vec::new();

    if let Some(card) = &app.view.selected {
        lines.push(card_line(card));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("NT$ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            amount.amount_text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    match &amount.warning {
        Some(warning) => lines.push(Line::from(Span::styled(
            warning.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from(Span::styled(
            format!(
                "Available {}  ·  Limit {}",
                amount.available_balance_text, amount.max_single_text
            ),
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));

    let chips: Vec<Span> = app
        .quick_amounts
        .iter()
        .enumerate()
        .flat_map(|(idx, value)| {
            [
                Span::styled(format!("[F{}]", idx + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" +{}  ", format_currency(*value))),
            ]
        })
        .collect();
    lines.push(Line::from(chips));

    let memo_style = if app.mode == InputMode::Memo {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let memo = if app.mode == InputMode::Memo {
        app.memo_draft.as_str()
    } else {
        app.view.memo.as_str()
    };
    lines.push(Line::from(vec![
        Span::styled("Memo: ", Style::default().fg(Color::DarkGray)),
        Span::styled(memo.to_string(), memo_style),
    ]));
    lines.push(Line::from(""));

    let next_style = if amount.next_enabled {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled("  Next  ", next_style)));

    frame.render_widget(Paragraph::new(lines).block(bordered(" Amount ")), area);
}

fn summary_lines(summary: &TransferSummaryView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(card) = &summary.recipient {
        lines.push(card_line(card));
    }
    lines.push(Line::from(Span::styled(
        summary.amount_text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines
}

fn render_auth(frame: &mut Frame, area: Rect, app: &App) {
    let (label, color) = match app.view.auth.phase {
        AuthPhase::Idle => ("Touch the sensor to authenticate", Color::DarkGray),
        AuthPhase::InProgress => ("Verifying...", Color::Yellow),
        AuthPhase::Succeeded => ("Verified", Color::Green),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(summary) = &app.view.auth.summary {
        lines.extend(summary_lines(summary));
    }
    frame.render_widget(
        Paragraph::new(lines).block(bordered(" Authentication ")),
        area,
    );
}

fn render_success(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Transfer successful",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(summary) = &app.view.success {
        lines.extend(summary_lines(summary));
    }
    frame.render_widget(Paragraph::new(lines).block(bordered(" Success ")), area);
}

fn keybinds(app: &App) -> Vec<(&'static str, &'static str)> {
    match (app.mode, app.screen()) {
        (InputMode::Search, _) => vec![("[type]", "Search"), ("[Enter]", "Done")],
        (InputMode::Memo, _) => vec![("[type]", "Memo"), ("[Enter]", "Done")],
        (_, ScreenId::Home) => vec![("[T]", "Transfer"), ("[Q]", "Quit")],
        (_, ScreenId::Recipient) => vec![
            ("[/]", "Search"),
            ("[↑↓]", "Move"),
            ("[Enter]", "Select"),
            ("[Esc]", "Back"),
        ],
        (_, ScreenId::Amount) => vec![
            ("[0-9]", "Amount"),
            ("[⌫]", "Delete"),
            ("[F1-F3]", "Quick"),
            ("[M]", "Memo"),
            ("[Enter]", "Next"),
            ("[Esc]", "Back"),
        ],
        (_, ScreenId::Auth) => vec![("[Esc]", "Cancel")],
        (_, ScreenId::Success) => vec![("[S]", "Share"), ("[Enter]", "Done")],
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let notice = match (&app.error_message, &app.view.toast) {
        (Some(err), _) => Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red)),
        (None, Some(toast)) => {
            Span::styled(format!(" {} ", toast), Style::default().fg(Color::Cyan))
        }
        (None, None) => Span::raw(""),
    };

    let hints: Vec<Span> = keybinds(app)
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {}  ", label)),
            ]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(vec![Line::from(notice), Line::from(hints)]).block(bordered("")),
        area,
    );
}
