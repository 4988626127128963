use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    Axis, CellPicker, Direction, GameOverReason, GameSession, Segment, SegmentSprite, SessionStatus,
};
use crate::leaderboard::LeaderboardEntry;
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<P: CellPicker>(
        &self,
        frame: &mut Frame,
        session: &GameSession<P>,
        metrics: &GameMetrics,
        leaderboard: &[LeaderboardEntry],
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session, metrics), chunks[0]);

        match session.status() {
            SessionStatus::Over(reason) => {
                frame.render_widget(self.render_game_over(session, reason, leaderboard), chunks[1]);
            }
            status => {
                frame.render_widget(self.render_grid(session, status == SessionStatus::Paused), chunks[1]);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid<P: CellPicker>(&self, session: &GameSession<P>, paused: bool) -> Paragraph<'static> {
        let grid = session.grid();
        let snake = session.snake();

        // Paint tail first so the head wins where segments overlap
        let mut cells: HashMap<Segment, Span<'static>> = HashMap::new();
        for (segment, sprite) in snake.body().zip(session.sprites()).rev() {
            cells.insert(*segment, sprite_span(sprite));
        }

        let mut lines = Vec::with_capacity(grid.rows());
        for row in 1..=grid.rows() as i32 {
            let mut spans = Vec::with_capacity(grid.cols());
            for col in 1..=grid.cols() as i32 {
                let pos = Segment::new(row, col);
                let cell = if let Some(span) = cells.get(&pos) {
                    span.clone()
                } else if Some(pos) == session.food() {
                    Span::styled("● ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };
                spans.push(cell);
            }
            lines.push(Line::from(spans));
        }

        let title = if paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<P: CellPicker>(&self, session: &GameSession<P>, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(session.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(session.score()).to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(session.config().difficulty.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over<P: CellPicker>(
        &self,
        session: &GameSession<P>,
        reason: GameOverReason,
        leaderboard: &[LeaderboardEntry],
    ) -> Paragraph<'static> {
        let headline = match reason {
            GameOverReason::SelfCollision => "GAME OVER",
            GameOverReason::BoardFull => "BOARD CLEARED",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if !leaderboard.is_empty() {
            text.push(Line::from(Span::styled(
                format!("Top scores ({})", session.config().difficulty),
                Style::default().fg(Color::Cyan),
            )));
            for (rank, entry) in leaderboard.iter().enumerate() {
                text.push(Line::from(format!("{}. {:<12} {:>5}", rank + 1, entry.name, entry.score)));
            }
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        Paragraph::new(vec![controls_line()]).alignment(Alignment::Center)
    }
}

/// Footer listing every key the input handler understands
fn controls_line() -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    Line::from(vec![
        Span::styled("↑↓←→", key),
        Span::raw(" or "),
        Span::styled("WASD", key),
        Span::raw(" to move | "),
        Span::styled("Esc", key),
        Span::raw("/"),
        Span::styled("Space", key),
        Span::raw("/"),
        Span::styled("P", key),
        Span::raw(" to pause | "),
        Span::styled("R", Style::default().fg(Color::Green)),
        Span::raw(" to restart | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ])
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-column glyph for one snake segment
pub fn sprite_glyph(sprite: SegmentSprite) -> &'static str {
    match sprite {
        SegmentSprite::Head(Some(Direction::Up)) => "▲ ",
        SegmentSprite::Head(Some(Direction::Down)) => "▼ ",
        SegmentSprite::Head(Some(Direction::Left)) => "◀ ",
        SegmentSprite::Head(Some(Direction::Right)) => "▶ ",
        SegmentSprite::Head(None) => "◆ ",
        SegmentSprite::Tail(Some(Direction::Up)) => "╹ ",
        SegmentSprite::Tail(Some(Direction::Down)) => "╻ ",
        SegmentSprite::Tail(Some(Direction::Left)) => "╸ ",
        SegmentSprite::Tail(Some(Direction::Right)) => "╺═",
        SegmentSprite::Tail(None) => "• ",
        SegmentSprite::Straight(Axis::Horizontal) => "══",
        SegmentSprite::Straight(Axis::Vertical) => "║ ",
        SegmentSprite::Corner { from, to } => corner_glyph(from, to),
        SegmentSprite::Plain => "■ ",
    }
}

/// A corner joins the side the snake came in through with the side it left by
fn corner_glyph(from: Direction, to: Direction) -> &'static str {
    let entered = from.opposite();
    let touches = |side: Direction| entered == side || to == side;

    match (touches(Direction::Up), touches(Direction::Left)) {
        (false, false) => "╔═",
        (false, true) => "╗ ",
        (true, false) => "╚═",
        (true, true) => "╝ ",
    }
}

fn sprite_span(sprite: SegmentSprite) -> Span<'static> {
    let style = match sprite {
        SegmentSprite::Head(_) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Green),
    };
    Span::styled(sprite_glyph(sprite), style)
}
