//! Stateless UI rendering for the guessing game.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::app::App;
use crate::scores::ScoreStore;

/// Renders the whole screen.
pub fn draw<S: ScoreStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Selectors and readouts
            Constraint::Min(6),    // Description
            Constraint::Length(3), // Guess input
            Constraint::Length(7), // Suggestions / reveal
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Pokédex Guesser")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_header(frame, chunks[1], app);
    draw_description(frame, chunks[2], app);
    draw_input(frame, chunks[3], app);

    if app.revealed() {
        draw_reveal(frame, chunks[4], app);
    } else {
        draw_suggestions(frame, chunks[4], app);
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[5]);

    let help = Paragraph::new(
        "Enter: Guess | Tab: Complete | Ctrl+G: Give Up | Ctrl+R: Restart | Ctrl+L: Language | Ctrl+N: Generation | Esc: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);
}

fn draw_header<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let controller = app.controller();
    let attempts = controller
        .session()
        .map(|s| s.attempts_remaining().to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled("Generation: ", Style::default().fg(Color::DarkGray)),
        Span::raw(controller.generation().label()),
        Span::raw("   "),
        Span::styled("Language: ", Style::default().fg(Color::DarkGray)),
        Span::raw(controller.language().label()),
        Span::raw("   "),
        Span::styled("Attempts Left: ", Style::default().fg(Color::DarkGray)),
        Span::styled(attempts, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("Record: ", Style::default().fg(Color::DarkGray)),
        Span::styled(controller.success_rate(), Style::default().fg(Color::Green)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_description<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let controller = app.controller();
    let (text, style) = match controller.displayed_text() {
        Some(text) => (text.to_string(), Style::default()),
        None if controller.translation_pending() => {
            ("Translating...".to_string(), Style::default().fg(Color::DarkGray))
        }
        None => (String::new(), Style::default()),
    };

    let description = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Pokédex Entry"));
    frame.render_widget(description, area);
}

fn draw_input<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let enabled = app.controller().accepts_guesses();
    let style = if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if app.input().is_empty() && enabled {
        Span::styled("Your guess", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.input(), style)
    };

    let input = Paragraph::new(Line::from(text)).block(Block::default().borders(Borders::ALL).title("Guess"));
    frame.render_widget(input, area);
}

fn draw_suggestions<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let items: Vec<ListItem> = app
        .suggestions()
        .into_iter()
        .map(|name| ListItem::new(name.to_string()))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Suggestions"));
    frame.render_widget(list, area);
}

fn draw_reveal<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(session) = app.controller().session() else {
        return;
    };
    let target = session.target();
    let lines = vec![
        Line::from(Span::styled(
            target.name().clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            target.sprite_url().clone().unwrap_or_else(|| "(no sprite)".to_string()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(session.source_text().to_string()),
    ];

    let reveal = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answer"));
    frame.render_widget(reveal, area);
}
