/// Terminal front-end: draws the shapes scene into the terminal and turns
/// key presses into orientation changes
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Duration;
use shapes_core::{draw_frame, FixedFunction, Key, Orientation, Projection};

pub mod config;
pub mod logging;
pub mod renderer;

pub use config::{Command, Options};
pub use renderer::AsciiRenderer;

pub const TITLE: &str = "A Simple Unlit Cube -- ARROW KEYS ROTATE";

/// How long to wait for input before checking for a pending repaint
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a terminal key press means to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Key(Key),
    Quit,
}

/// Map a crossterm key event; keys the viewer does not use map to `None`
pub fn map_key(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit)
        }
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::Char('w') | KeyCode::Char('W') => Key::W,
        _ => return None,
    };
    Some(Action::Key(key))
}

/// Render one frame off-screen and return it as plain text
pub fn snapshot(orientation: &Orientation, projection: Projection, width: usize, height: usize) -> String {
    let mut gl = FixedFunction::new(AsciiRenderer::new(width, height), projection);
    draw_frame(&mut gl, orientation);
    gl.sink().render_plain()
}

/// Status text for the bottom row, cut to `width` columns so it never wraps
pub fn status_line(o: &Orientation, width: usize) -> String {
    let text = format!(
        "rot x {:.0} y {:.0} z {:.0} | shift x {:.0} y {:.0} | Arrows/PgUp/PgDn rotate, Home reset, W move, Q quit",
        o.rotate_x, o.rotate_y, o.rotate_z, o.translate_x, o.translate_y
    );
    text.chars().take(width).collect()
}

/// Raw mode and the alternate screen for as long as it lives
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(TITLE),
            cursor::Hide
        )?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show) {
            log::warn!("failed to restore the main screen: {}", e);
        }
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    orientation: Orientation,
    gl: FixedFunction<AsciiRenderer>,
    running: bool,
    redraw_requested: bool,
}

impl TerminalApp {
    pub fn new(orientation: Orientation, projection: Projection) -> Result<Self> {
        let (width, height) = terminal::size().context("cannot query terminal size")?;
        Ok(Self::with_size(orientation, projection, width, height))
    }

    /// App for a terminal of `width` x `height` cells
    pub fn with_size(orientation: Orientation, projection: Projection, width: u16, height: u16) -> Self {
        // last row holds the status line
        let renderer = AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize);

        Self {
            orientation,
            gl: FixedFunction::new(renderer, projection),
            running: true,
            redraw_requested: true,
        }
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn run(&mut self) -> Result<()> {
        let _terminal = TerminalGuard::enter(stdout())?;
        self.main_loop()
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            if self.redraw_requested {
                self.redraw_requested = false;
                self.render()?;
            }

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }
        log::info!("window closed");
        Ok(())
    }

    /// Apply one terminal event; repaint happens on the next loop turn
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key_event) => match map_key(key_event) {
                Some(Action::Quit) => self.running = false,
                Some(Action::Key(key)) => {
                    log::debug!("key {}", key);
                    self.orientation.apply(key);
                    self.redraw_requested = true;
                }
                None => {}
            },
            Event::Resize(width, height) => {
                self.gl
                    .sink_mut()
                    .resize(*width as usize, height.saturating_sub(1) as usize);
                self.redraw_requested = true;
            }
            _ => {}
        }
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn render(&mut self) -> Result<()> {
        draw_frame(&mut self.gl, &self.orientation);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
        self.gl.sink().draw(&mut stdout)?;

        let status_row = self.gl.sink().height() as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, status_row),
            SetForegroundColor(TermColor::Yellow),
            Print(status_line(&self.orientation, self.gl.sink().width())),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
