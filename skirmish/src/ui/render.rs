//! Render orchestration for the TUI.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use skirmish_core::{Character, Position, TurnOutcome};

use crate::app::{App, LogKind};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let [title_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .areas(area);

    render_title(frame, app, title_area);

    let [map_area, roster_area, log_area] = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(28),
        Constraint::Percentage(32),
    ])
    .areas(body_area);

    render_map(frame, app, map_area);
    render_roster(frame, app, roster_area);
    render_log(frame, app, log_area);
    render_status(frame, app, status_area);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let outcome = match app.outcome {
        TurnOutcome::Continue => Span::raw(""),
        TurnOutcome::Victory => Span::styled(
            " VICTORY! ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        TurnOutcome::Defeat => Span::styled(
            " DEFEAT... ",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" skirmish - turn {} ", app.engine.turn()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        outcome,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One glyph per cell: `P` for the player, `E` for a live enemy, `.` for
/// background. Dead characters are not drawn.
fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let grid = app.engine.grid();
    let roster = app.engine.roster();

    let mut lines = Vec::with_capacity(grid.height() as usize);
    for y in 0..grid.height() {
        let mut spans = Vec::with_capacity(grid.width() as usize);
        for x in 0..grid.width() {
            let cell = Position::new(x, y);
            let occupant = roster.iter().find(|c| !c.is_dead() && c.position == cell);
            spans.push(match occupant {
                Some(c) if c.is_player() => Span::styled(
                    "P ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(_) => Span::styled("E ", Style::default().fg(Color::Red)),
                None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            });
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().title(" Map ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_roster(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .engine
        .roster()
        .iter()
        .map(roster_line)
        .collect();

    let block = Block::default().title(" Roster ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn roster_line(character: &Character) -> Line<'_> {
    if character.is_dead() {
        return Line::from(Span::styled(
            format!("{} (dead)", character.name),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ));
    }

    let name_style = if character.is_player() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };

    Line::from(vec![
        Span::styled(character.name.clone(), name_style),
        Span::raw(format!(
            "  hp {}  ar {}  dmg {}  @ {}",
            character.health, character.armor, character.damage, character.position
        )),
    ])
}

fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    // Show the newest lines that fit.
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.log.len().saturating_sub(visible);
    let lines: Vec<Line> = app.log[start..]
        .iter()
        .map(|entry| {
            let style = match entry.kind {
                LogKind::Move => Style::default().fg(Color::Gray),
                LogKind::Attack => Style::default().fg(Color::Yellow),
                LogKind::Death => Style::default().fg(Color::Red),
                LogKind::System => Style::default().fg(Color::Cyan),
                LogKind::Error => Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    let block = Block::default().title(" Battle Log ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::raw(app.status.clone()),
        Span::raw("  "),
        Span::styled(
            "arrows/hjkl move | s save | L load | ? help | q quit",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect_fixed(46, 14, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " skirmish - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  arrows / hjkl   Move (one turn per step)"),
        Line::from("  s               Save to skirmish.sav"),
        Line::from("  L               Load from skirmish.sav"),
        Line::from("  q / Esc         Quit"),
        Line::from(""),
        Line::from("  Walking into an enemy attacks it: armor"),
        Line::from("  soaks the damage first, the rest carries"),
        Line::from("  into health. Enemies wander randomly."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default().title(" Help ").borders(Borders::ALL);
    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// A fixed-size rect centered in `area`, clamped to it.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
