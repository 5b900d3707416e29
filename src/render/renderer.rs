use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GridSpec, Position};
use crate::session::{EndReason, SessionStatus, Snapshot};

/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const BORDER: u16 = 2;
/// Smallest box the idle and game-over messages fit in
const MESSAGE_SIZE: (u16, u16) = (40, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

/// Board contents indexed as `[row][col]`
pub fn cell_map(snapshot: &Snapshot<'_>) -> Vec<Vec<Cell>> {
    let grid = snapshot.grid;
    let mut cells = vec![vec![Cell::Empty; grid.cols()]; grid.rows()];

    let mut mark = |pos: Position, cell: Cell| {
        if grid.contains(pos) {
            cells[pos.row as usize][pos.col as usize] = cell;
        }
    };

    if let Some(food) = snapshot.food {
        mark(food, Cell::Food);
    }
    if let Some(snake) = snapshot.snake {
        for (i, segment) in snake.segments().enumerate() {
            mark(segment, if i == 0 { Cell::Head } else { Cell::Body });
        }
    }

    cells
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Grid cells (width, height) that fit a terminal of the given size
    pub fn playfield_capacity(width: u16, height: u16) -> (u16, u16) {
        (
            width.saturating_sub(BORDER),
            height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + BORDER),
        )
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let (width, height) = board_size(snapshot.grid);
        match snapshot.status {
            SessionStatus::Running => {
                let area = centered(chunks[1], width, height);
                frame.render_widget(self.render_grid(snapshot), area);
            }
            SessionStatus::Idle => {
                let area =
                    centered(chunks[1], width.max(MESSAGE_SIZE.0), height.max(MESSAGE_SIZE.1));
                frame.render_widget(self.render_idle(snapshot), area);
            }
            SessionStatus::Ended(reason) => {
                let area =
                    centered(chunks[1], width.max(MESSAGE_SIZE.0), height.max(MESSAGE_SIZE.1));
                frame.render_widget(self.render_game_over(snapshot, reason), area);
            }
        }

        frame.render_widget(self.render_controls(snapshot.status), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let lines: Vec<Line> = cell_map(snapshot)
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|cell| match cell {
                            Cell::Head => Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                            Cell::Food => Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            Cell::Empty => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        })
                        .collect::<Vec<_>>(),
                )
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

    fn render_stats(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.metrics.format_time(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_idle(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "{} x {} grid",
                snapshot.grid.rows(),
                snapshot.grid.cols()
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>, reason: EndReason) -> Paragraph<'static> {
        let (title, color) = match reason {
            EndReason::BoardFilled => ("BOARD CLEARED", Color::Green),
            EndReason::Collision(_) | EndReason::Stopped => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::raw(snapshot.metrics.format_time()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, status: SessionStatus) -> Paragraph<'static> {
        let lifecycle = match status {
            SessionStatus::Idle => " | Enter to start | ",
            _ => " | R to restart | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move"),
            Span::raw(lifecycle),
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

/// Terminal size of `grid` including its border, saturating at `u16::MAX`
fn board_size(grid: GridSpec) -> (u16, u16) {
    let cols = u16::try_from(grid.cols()).unwrap_or(u16::MAX);
    let rows = u16::try_from(grid.rows()).unwrap_or(u16::MAX);
    let width = cols.saturating_mul(CELL_WIDTH).saturating_add(BORDER);
    let height = rows.saturating_add(BORDER);
    (width, height)
}

/// `width` x `height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    cell
}
