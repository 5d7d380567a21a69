use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::field::{Cell, Field, RenderError};
use crate::game::{GameSession, Size};
use crate::metrics::GameMetrics;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// Each cell is drawn two columns wide to look roughly square
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Terminal columns and rows needed to draw a grid of `grid` cells
    pub fn required_area(grid: Size) -> (u16, u16) {
        let side = |n: i32| u16::try_from(n.max(0)).unwrap_or(u16::MAX);
        let width = side(grid.x).saturating_mul(CELL_WIDTH).saturating_add(2);
        let height = side(grid.y)
            .saturating_add(2)
            .saturating_add(HEADER_HEIGHT + FOOTER_HEIGHT);
        (width, height)
    }

    /// Fail if a terminal of `width` x `height` cannot hold the whole grid
    pub fn check_fits(width: u16, height: u16, grid: Size) -> Result<(), RenderError> {
        let (need_width, need_height) = Self::required_area(grid);

        if width < need_width || height < need_height {
            return Err(RenderError::TerminalTooSmall {
                have_width: width,
                have_height: height,
                need_width,
                need_height,
            });
        }

        Ok(())
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        field: &Field,
        session: &GameSession,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(field, session, metrics);
        frame.render_widget(stats, chunks[0]);

        let (grid_width, grid_height) = Self::required_area(field.size());
        let game_area = centered(
            chunks[1],
            grid_width,
            grid_height - HEADER_HEIGHT - FOOTER_HEIGHT,
        );
        frame.render_widget(self.render_grid(field), game_area);

        if !session.is_running() {
            let overlay = centered(game_area, 20.min(game_area.width), 3.min(game_area.height));
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_stopped(), overlay);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, field: &Field) -> Paragraph<'_> {
        let lines: Vec<Line> = field
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Snake => Span::styled("■ ", Style::default().fg(Color::Green)),
                        Cell::Food => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(
        &self,
        field: &Field,
        session: &GameSession,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(field.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(session.tick_count().to_string(), value),
            Span::raw("    "),
            Span::styled("Rate: ", label),
            Span::styled(format!("{}ms", session.tick_rate_ms()), value),
            Span::raw("    "),
            Span::styled("Round: ", label),
            Span::styled((metrics.rounds_played + 1).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_stopped(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(vec![Span::styled(
            "STOPPED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" stop/resume | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
