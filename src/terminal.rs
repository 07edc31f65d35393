//! Native terminal frontend
//!
//! Draws the three screens with crossterm and maps keys onto `App` actions.
//! The arena is sized from the terminal: every cell is `CELL_W` x `CELL_H`
//! arena units, so resizing the terminal resizes the arena.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use hack_dodge::app::text;
use hack_dodge::consts::SIM_DT;
use hack_dodge::sim::{Direction, Entity};
use hack_dodge::{App, Screen};

/// Arena units per terminal column
const CELL_W: f32 = 10.0;
/// Arena units per terminal row (cells are roughly twice as tall as wide)
const CELL_H: f32 = 20.0;
/// Rows used by the status line, both borders and the help line
const CHROME_ROWS: u16 = 4;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Exit,
    Move(Direction),
    BackToMenu,
    ToggleFps,
}

/// Map a key press to an action for the current screen
fn action_for(screen: Screen, key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Exit);
    }
    match screen {
        Screen::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Start),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Exit),
            _ => None,
        },
        Screen::Playing => match key.code {
            KeyCode::Left | KeyCode::Char('a') => Some(Action::Move(Direction::Left)),
            KeyCode::Right | KeyCode::Char('d') => Some(Action::Move(Direction::Right)),
            KeyCode::Up | KeyCode::Char('w') => Some(Action::Move(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s') => Some(Action::Move(Direction::Down)),
            KeyCode::Char('f') => Some(Action::ToggleFps),
            KeyCode::Esc => Some(Action::BackToMenu),
            KeyCode::Char('q') => Some(Action::Exit),
            _ => None,
        },
        Screen::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Some(Action::BackToMenu),
            KeyCode::Char('q') => Some(Action::Exit),
            _ => None,
        },
    }
}

fn apply(app: &mut App, action: Action) {
    match action {
        Action::Start => app.start_game(),
        Action::Exit => app.request_exit(),
        Action::Move(direction) => app.command(direction),
        Action::BackToMenu => app.back_to_menu(),
        Action::ToggleFps => app.toggle_fps(),
    }
}

/// Interior of the arena in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct View {
    cols: u16,
    rows: u16,
}

/// Half-open cell ranges covered by a square, rows counted from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    col0: u16,
    col1: u16,
    row0: u16,
    row1: u16,
}

impl View {
    fn from_terminal(term_cols: u16, term_rows: u16) -> Self {
        Self {
            cols: term_cols.saturating_sub(2).max(1),
            rows: term_rows.saturating_sub(CHROME_ROWS).max(1),
        }
    }

    fn arena_size(&self) -> (f32, f32) {
        (self.cols as f32 * CELL_W, self.rows as f32 * CELL_H)
    }

    /// Cells covered by a square at `pos` (arena units, relative to origin)
    fn square_cells(&self, entity: &Entity, origin_x: f32, origin_y: f32) -> CellRect {
        let x0 = (entity.pos.x - origin_x) / CELL_W;
        let x1 = (entity.pos.x - origin_x + entity.size) / CELL_W;
        let y0 = (entity.pos.y - origin_y) / CELL_H;
        let y1 = (entity.pos.y - origin_y + entity.size) / CELL_H;

        let clamp_col = |v: f32| (v.max(0.0) as u16).min(self.cols);
        let clamp_row = |v: f32| (v.max(0.0) as u16).min(self.rows);

        let bottom0 = clamp_row(y0.floor());
        let bottom1 = clamp_row(y1.ceil());
        CellRect {
            col0: clamp_col(x0.floor()),
            col1: clamp_col(x1.ceil()),
            row0: self.rows - bottom1,
            row1: self.rows - bottom0,
        }
    }
}

/// Enter raw mode, run until the player exits, restore the terminal
pub fn run(app: &mut App) -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(app, &mut stdout);

    let _ = execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

fn event_loop(app: &mut App, stdout: &mut Stdout) -> io::Result<()> {
    let (term_cols, term_rows) = terminal::size()?;
    let mut view = View::from_terminal(term_cols, term_rows);
    let (w, h) = view.arena_size();
    app.resize(w, h);
    log::info!("Terminal {}x{}, arena {}x{}", term_cols, term_rows, w, h);

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();
    let mut fps = Fps::default();

    while !app.should_exit() {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = action_for(app.screen(), &key) {
                        apply(app, action);
                    }
                }
                Event::Resize(cols, rows) => {
                    view = View::from_terminal(cols, rows);
                    let (w, h) = view.arena_size();
                    app.resize(w, h);
                    queue!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        app.update(dt);
        fps.record(dt);

        draw(stdout, app, &view, fps.value())?;

        let spent = now.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }
    }
    Ok(())
}

/// Smoothed frames per second
#[derive(Debug, Default)]
struct Fps {
    avg_dt: f32,
}

impl Fps {
    fn record(&mut self, dt: f32) {
        self.avg_dt = if self.avg_dt == 0.0 {
            dt
        } else {
            self.avg_dt * 0.9 + dt * 0.1
        };
    }

    fn value(&self) -> u32 {
        if self.avg_dt > 0.0 {
            (1.0 / self.avg_dt).round() as u32
        } else {
            0
        }
    }
}

fn draw(stdout: &mut Stdout, app: &App, view: &View, fps: u32) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    match app.screen() {
        Screen::Menu => draw_menu(stdout, view)?,
        Screen::Playing => draw_game(stdout, app, view, fps)?,
        Screen::GameOver => draw_game_over(stdout, view)?,
    }
    queue!(stdout, ResetColor)?;
    stdout.flush()
}

fn centered<W: Write>(w: &mut W, view: &View, row: u16, s: &str, color: Color) -> io::Result<()> {
    let width = view.cols + 2;
    let col = width.saturating_sub(s.chars().count() as u16) / 2;
    queue!(
        w,
        cursor::MoveTo(col, row),
        SetForegroundColor(color),
        Print(s)
    )
}

fn draw_menu<W: Write>(w: &mut W, view: &View) -> io::Result<()> {
    let mid = (view.rows + CHROME_ROWS) / 2;
    centered(w, view, mid.saturating_sub(2), text::TITLE, Color::Green)?;
    centered(
        w,
        view,
        mid,
        &format!("[Enter] {}", text::START),
        Color::White,
    )?;
    centered(
        w,
        view,
        mid + 1,
        &format!("[Esc] {}", text::EXIT),
        Color::White,
    )
}

fn draw_game_over<W: Write>(w: &mut W, view: &View) -> io::Result<()> {
    let mid = (view.rows + CHROME_ROWS) / 2;
    centered(w, view, mid.saturating_sub(1), text::GAME_OVER, Color::Green)?;
    centered(
        w,
        view,
        mid + 1,
        &format!("[Enter] {}", text::BACK_TO_MENU),
        Color::White,
    )
}

fn draw_game<W: Write>(w: &mut W, app: &App, view: &View, fps: u32) -> io::Result<()> {
    let sim = app.sim();
    let origin = sim.arena().origin;

    // Status line
    queue!(w, SetForegroundColor(Color::Green), Print(text::TITLE))?;
    if app.settings.show_fps {
        queue!(w, SetForegroundColor(Color::DarkGrey), Print(format!("  {} fps", fps)))?;
    }

    // Border
    let horizontal = "─".repeat(view.cols as usize);
    queue!(
        w,
        SetForegroundColor(Color::White),
        cursor::MoveTo(0, 1),
        Print(format!("┌{}┐", horizontal)),
        cursor::MoveTo(0, view.rows + 2),
        Print(format!("└{}┘", horizontal)),
    )?;
    for row in 0..view.rows {
        queue!(
            w,
            cursor::MoveTo(0, row + 2),
            Print('│'),
            cursor::MoveTo(view.cols + 1, row + 2),
            Print('│'),
        )?;
    }

    let (player_color, enemy_color) = if app.settings.high_contrast {
        (Color::Magenta, Color::Yellow)
    } else {
        (Color::Red, Color::Green)
    };
    draw_square(w, view, view.square_cells(sim.player(), origin.x, origin.y), player_color)?;
    draw_square(w, view, view.square_cells(sim.enemy(), origin.x, origin.y), enemy_color)?;

    // Controls
    queue!(
        w,
        SetForegroundColor(Color::DarkGrey),
        cursor::MoveTo(0, view.rows + 3),
        Print("←/a Left  →/d Right  ↑/w Up  ↓/s Down  f FPS  Esc Menu  q Quit"),
    )
}

fn draw_square<W: Write>(w: &mut W, view: &View, cells: CellRect, color: Color) -> io::Result<()> {
    if cells.col0 >= cells.col1 || cells.row0 >= cells.row1 {
        return Ok(());
    }
    let fill = "█".repeat((cells.col1 - cells.col0) as usize);
    queue!(w, SetForegroundColor(color))?;
    for row in cells.row0..cells.row1.min(view.rows) {
        queue!(w, cursor::MoveTo(cells.col0 + 1, row + 2), Print(&fill))?;
    }
    Ok(())
}
