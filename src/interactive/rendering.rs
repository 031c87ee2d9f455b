//! TUI rendering with ratatui
//!
//! Setup, loading, play and failure screens for the crossword player.

use super::app::{App, GridGeometry, MessageStyle, TopicChoice};
use crate::config::SizeClass;
use crate::core::Orientation;
use crate::generator::{Clue, Puzzle};
use crate::session::{GameState, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.session.state() {
        GameState::Setup => render_setup(f, app, chunks[1]),
        GameState::Loading => render_loading(f, app, chunks[1]),
        GameState::Playing | GameState::Won => render_game(f, app, chunks[1]),
        GameState::Error { received, needed } => {
            render_failure(f, app, chunks[1], received, needed);
        }
    }

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let (title, color) = match session.state() {
        GameState::Setup => ("OPENCROSS - New Puzzle".to_string(), Color::Cyan),
        GameState::Won => (
            format!("SOLVED! {} ({})", session.topic(), session.size().label()),
            Color::Green,
        ),
        GameState::Error { .. } => ("OPENCROSS - Generation Failed".to_string(), Color::Red),
        GameState::Loading | GameState::Playing => (
            format!("OPENCROSS - {} ({})", session.topic(), session.size().label()),
            Color::Cyan,
        ),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        );
    f.render_widget(header, area);
}

fn render_setup(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let selected = app.topic_choice();
    let highlight = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut items = vec![topic_item("Random theme", selected == TopicChoice::Random, highlight)];
    for (i, name) in app.theme_names.iter().enumerate() {
        items.push(topic_item(name, selected == TopicChoice::Theme(i), highlight));
    }
    let custom = format!("Custom topic: {}_", app.setup.custom_topic);
    items.push(topic_item(&custom, selected == TopicChoice::Custom, highlight));

    let topics = List::new(items).block(
        Block::default()
            .title(" Theme (Up/Down) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(topics, chunks[0]);

    let sizes: Vec<Line> = SizeClass::ALL
        .iter()
        .map(|&size| {
            let text = format!(
                "{:<11} {:>2}-{:<2} words  {}x{}",
                size.label(),
                size.min_words(),
                size.max_words(),
                size.grid_dimension(),
                size.grid_dimension()
            );
            if size == app.setup.size {
                Line::from(Span::styled(text, highlight))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let size_panel = Paragraph::new(sizes).block(
        Block::default()
            .title(" Size (Left/Right) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(size_panel, chunks[1]);
}

fn topic_item<'a>(text: &str, selected: bool, highlight: Style) -> ListItem<'a> {
    let marker = if selected { "> " } else { "  " };
    let item = ListItem::new(format!("{marker}{text}"));
    if selected { item.style(highlight) } else { item }
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Building a {} puzzle about {}...",
                app.session.size().label().to_lowercase(),
                app.session.topic()
            ),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} layout attempts on a {}x{} grid",
            app.generator.config().attempts,
            app.session.size().grid_dimension(),
            app.session.size().grid_dimension()
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_failure(f: &mut Frame, app: &App, area: Rect, received: usize, needed: usize) {
    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not build a puzzle for this topic.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Words: {received} of {needed} needed")),
    ];
    if let Some(reason) = app.session.failure() {
        text.push(Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from("Enter: retry | n: change settings | q: quit"));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_game(f: &mut Frame, app: &App, area: Rect) {
    let Some(puzzle) = app.session.puzzle() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_grid(f, app, puzzle, chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Active clue
            Constraint::Min(6),    // Clue lists
            Constraint::Length(3), // Progress
            Constraint::Length(7), // Messages
        ])
        .split(chunks[1]);

    render_active_clue(f, &app.session, side[0]);
    render_clue_lists(f, &app.session, puzzle, side[1]);
    render_progress(f, &app.session, side[2]);
    render_messages(f, app, side[3]);
}

fn render_grid(f: &mut Frame, app: &App, puzzle: &Puzzle, area: Rect) {
    let block = Block::default()
        .title(" Grid ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let size = puzzle.size() as u16;
    let (cell_width, cell_height) = if size * 4 <= inner.width && size * 2 <= inner.height {
        (4, 2)
    } else {
        (3, 1)
    };
    app.grid_geometry.set(GridGeometry {
        area: Rect {
            x: inner.x,
            y: inner.y,
            width: (size * cell_width).min(inner.width),
            height: (size * cell_height).min(inner.height),
        },
        cell_width,
        cell_height,
    });

    let session = &app.session;
    let now = Instant::now();
    let active = session.active_entry();
    let won = session.state() == GameState::Won;

    let mut lines = Vec::new();
    for row in 0..puzzle.size() {
        let mut numbers = Vec::new();
        let mut letters = Vec::new();
        for col in 0..puzzle.size() {
            let in_active = active.is_some_and(|e| e.covers(row, col));
            let style = cell_style(session, puzzle, (row, col), in_active, won, now);
            let letter = session.letter_at(row, col).map_or(' ', char::from);

            if cell_height == 2 {
                let number = puzzle
                    .number_at(row, col)
                    .map_or_else(String::new, |n| n.to_string());
                numbers.push(Span::styled(format!("{number:<4}"), style));
                letters.push(Span::styled(format!(" {letter}  "), style));
            } else {
                letters.push(Span::styled(format!(" {letter} "), style));
            }
        }
        if cell_height == 2 {
            lines.push(Line::from(numbers));
        }
        lines.push(Line::from(letters));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn cell_style(
    session: &Session,
    puzzle: &Puzzle,
    (row, col): (usize, usize),
    in_active_entry: bool,
    won: bool,
    now: Instant,
) -> Style {
    if !puzzle.is_letter_cell(row, col) {
        return Style::default().bg(Color::Black);
    }

    let base = Style::default().fg(Color::Black);
    let style = if won {
        base.bg(Color::LightGreen)
    } else if session.cursor() == (row, col) {
        base.bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if in_active_entry {
        base.bg(Color::LightCyan)
    } else {
        base.bg(Color::White)
    };

    if session.is_marked_wrong(row, col, now) {
        style.fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_active_clue(f: &mut Frame, session: &Session, area: Rect) {
    let content = session.active_entry().map_or_else(
        || vec![Line::from("")],
        |entry| {
            vec![Line::from(vec![
                Span::styled(
                    format!(
                        "{}{} ",
                        entry.number.unwrap_or_default(),
                        short_label(entry.orientation)
                    ),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} ({})", entry.clue, entry.len())),
            ])]
        },
    );

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Clue ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

const fn short_label(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Across => "A",
        Orientation::Down => "D",
    }
}

fn render_clue_lists(f: &mut Frame, session: &Session, puzzle: &Puzzle, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (chunk, orientation, clues) in [
        (chunks[0], Orientation::Across, puzzle.across()),
        (chunks[1], Orientation::Down, puzzle.down()),
    ] {
        let items: Vec<ListItem> = clues
            .iter()
            .map(|clue| clue_item(session, puzzle, clue))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(format!(" {orientation} "))
                .borders(Borders::ALL),
        );
        f.render_widget(list, chunk);
    }
}

fn clue_item<'a>(session: &Session, puzzle: &Puzzle, clue: &Clue) -> ListItem<'a> {
    let text = format!("{:>2}. {}", clue.number, clue.clue);
    let entry = puzzle.entry_numbered(clue.number, clue.orientation);
    let active = session
        .active_entry()
        .is_some_and(|a| a.number == Some(clue.number) && a.orientation == clue.orientation);
    let complete = entry.is_some_and(|e| session.is_entry_complete(e));

    let style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if complete {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    ListItem::new(text).style(style)
}

fn render_progress(f: &mut Frame, session: &Session, area: Rect) {
    let (filled, total) = session.progress();
    let percent = if total == 0 {
        0
    } else {
        (filled * 100 / total) as u16
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{filled}/{total} letters"));
    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(5)
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let stats_text = format!(
        "Solved: {}/{} | Revealed: {}",
        app.stats.games_won, app.stats.games_started, app.stats.words_revealed
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let help_text = match app.session.state() {
        GameState::Setup => "Enter: Start | Up/Down: Theme | Left/Right: Size | Esc: Quit",
        GameState::Loading => "Generating...",
        GameState::Playing => {
            "Space: Direction | Tab: Next clue | ^L/^W: Reveal letter/word | ^E: Check | ^X: Clear | Esc: Menu"
        }
        GameState::Won => "n: New puzzle | q: Quit",
        GameState::Error { .. } => "Enter: Retry | n: Settings | q: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}
