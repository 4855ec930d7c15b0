use std::{collections::HashSet, fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::{
        sidebar::{self, Button, SIDEBAR_WIDTH, Sidebar},
        state::{GameState, Tone},
        summary::Summary,
    },
    maze::{Cell, Direction, Grid, Position},
};

/// What a single maze cell looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Start,
    Goal,
    /// A cell on the path the solver is currently following
    Footprint,
    /// The player avatar, or the cell a solver is expanding
    Player,
    /// A cell on the final solution path
    Arrow(Direction),
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Tile::Wall,
            Cell::Floor => Tile::Floor,
            Cell::Start => Tile::Start,
            Cell::Goal => Tile::Goal,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Floor => "  ".with(Color::Reset),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
            Tile::Footprint => "· ".with(Color::Blue),
            Tile::Player => "🟡".with(Color::Yellow),
            Tile::Arrow(direction) => match direction {
                Direction::Right => "→ ".with(Color::Yellow),
                Direction::Down => "↓ ".with(Color::Yellow),
                Direction::Left => "← ".with(Color::Yellow),
                Direction::Up => "↑ ".with(Color::Yellow),
            },
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Transient per-frame decorations drawn over the maze while a solver runs.
#[derive(Debug, Default)]
pub struct Overlay {
    /// Cell being expanded by the solver
    searcher: Option<Position>,
    /// Path that led the solver to `searcher`
    footprints: HashSet<Position>,
}

impl Overlay {
    pub fn idle() -> Self {
        Overlay::default()
    }

    pub fn searching(position: Position, partial_path: &[Position]) -> Self {
        Overlay {
            searcher: Some(position),
            footprints: partial_path.iter().copied().collect(),
        }
    }

    fn is_searching(&self) -> bool {
        self.searcher.is_some()
    }
}

/// Pick the tile for `pos`. While searching the solver's position replaces the player
/// avatar; otherwise the player is drawn over the solution arrows.
pub fn tile_at(state: &GameState, overlay: &Overlay, pos: Position) -> Tile {
    if overlay.searcher == Some(pos) {
        return Tile::Player;
    }
    if overlay.footprints.contains(&pos) {
        return Tile::Footprint;
    }
    if !overlay.is_searching() && state.player() == pos {
        return Tile::Player;
    }
    if let Some(direction) = state.arrow_at(pos) {
        return Tile::Arrow(direction);
    }
    Tile::from(state.maze().grid()[pos])
}

/// Rows below the maze reserved for the status line and the summary panel
pub const NUM_LOG_ROWS: u16 = 9;

/// Maze footprint `(columns, rows)` on screen, saturating at the terminal coordinate range.
fn maze_extent(grid: &Grid) -> (u16, u16) {
    let cols = u16::try_from(grid.cols())
        .unwrap_or(u16::MAX)
        .saturating_mul(Tile::CELL_WIDTH);
    let rows = u16::try_from(grid.rows()).unwrap_or(u16::MAX);
    (cols, rows)
}

/// Terminal size `(columns, rows)` needed to show the maze, sidebar and log rows.
pub fn required_size(grid: &Grid) -> (u16, u16) {
    let (maze_cols, maze_rows) = maze_extent(grid);
    let cols = maze_cols.saturating_add(SIDEBAR_WIDTH);
    let rows = maze_rows
        .max(sidebar::MIN_SIDEBAR_HEIGHT)
        .saturating_add(NUM_LOG_ROWS);
    (cols, rows)
}

/// Sidebar placed right of the maze.
pub fn sidebar_for(grid: &Grid) -> Sidebar {
    let (maze_cols, maze_rows) = maze_extent(grid);
    Sidebar::new(maze_cols.saturating_add(1), maze_rows)
}

/// Draw a whole frame: maze with overlay, sidebar, status line and summary.
/// Falls back to a resize hint if the terminal is too small.
pub fn draw<W: Write>(
    out: &mut W,
    state: &GameState,
    overlay: &Overlay,
) -> std::io::Result<()> {
    let grid = state.maze().grid();
    let (needed_cols, needed_rows) = required_size(grid);
    let (term_cols, term_rows) = terminal::size()?;
    if term_cols < needed_cols || term_rows < needed_rows {
        return draw_too_small(out, (term_cols, term_rows), (needed_cols, needed_rows));
    }

    for row in 0..grid.rows() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for col in 0..grid.cols() {
            out.queue(style::Print(tile_at(state, overlay, Position::new(row, col))))?;
        }
    }

    let sidebar = sidebar_for(grid);
    draw_sidebar(out, state, &sidebar)?;

    let log_row = maze_extent(grid)
        .1
        .max(sidebar::MIN_SIDEBAR_HEIGHT)
        .saturating_add(1);
    draw_status(out, state, log_row)?;
    draw_summary(out, state.summary(), log_row + 2)?;

    out.flush()
}

fn draw_too_small<W: Write>(
    out: &mut W,
    (term_cols, term_rows): (u16, u16),
    (needed_cols, needed_rows): (u16, u16),
) -> std::io::Result<()> {
    let msg = format!(
        "Terminal size ({}x{}) is too small for this maze, it needs {}x{}. Please resize the terminal.\r\n",
        term_cols, term_rows, needed_cols, needed_rows
    );
    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
        style::PrintStyledContent(
            "Press Esc to exit...\r\n"
                .with(Color::Blue)
                .attribute(Attribute::Bold)
        )
    )?;
    out.flush()
}

fn draw_sidebar<W: Write>(
    out: &mut W,
    state: &GameState,
    sidebar: &Sidebar,
) -> std::io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(sidebar.content_col(), 0),
        style::PrintStyledContent(
            sidebar::TITLE
                .with(Color::White)
                .attribute(Attribute::Bold)
        )
    )?;

    for button in Button::ALL {
        let rect = sidebar.button_rect(button);
        let background = match button {
            Button::Restart => Color::Green,
            Button::Solve => Color::Red,
            Button::Dfs | Button::AStar if button.is_active(state) => Color::Blue,
            Button::Dfs | Button::AStar => Color::Grey,
            Button::Sound if button.is_active(state) => Color::DarkYellow,
            Button::Sound => Color::DarkGrey,
        };
        queue!(
            out,
            cursor::MoveTo(rect.col, rect.row),
            style::PrintStyledContent(
                button
                    .padded_label(state)
                    .with(Color::Black)
                    .on(background)
            )
        )?;
    }
    Ok(())
}

fn draw_status<W: Write>(out: &mut W, state: &GameState, row: u16) -> std::io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    if let Some(status) = state.status() {
        let color = match status.tone {
            Tone::Info => Color::Cyan,
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
        };
        out.queue(style::PrintStyledContent(
            status.text.as_str().with(color).attribute(Attribute::Bold),
        ))?;
    } else {
        out.queue(style::PrintStyledContent(
            "Arrows: move  Enter: solve  Esc: quit".with(Color::DarkGrey),
        ))?;
    }
    Ok(())
}

fn draw_summary<W: Write>(
    out: &mut W,
    summary: Option<&Summary>,
    row: u16,
) -> std::io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    let Some(summary) = summary else {
        return Ok(());
    };

    out.queue(style::PrintStyledContent(
        Summary::TITLE
            .with(Color::Yellow)
            .attribute(Attribute::Reverse),
    ))?;
    for (i, line) in summary.lines().iter().enumerate() {
        queue!(
            out,
            cursor::MoveTo(2, row + 1 + i as u16),
            style::PrintStyledContent(line.as_str().with(Color::White))
        )?;
    }
    queue!(
        out,
        cursor::MoveTo(2, row + 5),
        style::PrintStyledContent(
            Summary::DISMISS_HINT
                .with(Color::White)
                .on(Color::Red)
                .attribute(Attribute::Bold)
        )
    )?;
    Ok(())
}

/// Ring the terminal bell, standing in for click and victory sounds.
pub fn ring_bell<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::Print('\u{7}'))?;
    out.flush()
}
