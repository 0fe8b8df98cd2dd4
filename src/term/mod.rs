//! Terminal state: grids, modes, palette, and escape-sequence processing.
//!
//! `Term` owns a primary and an alternate grid plus everything the escape
//! protocol mutates outside the grid: mode flags, palette, charsets, title,
//! working directory, and clipboard text. Byte chunks from the PTY go
//! through [`Term::process`]; reports the terminal must answer (DSR, DA,
//! DECRPM, color queries) accumulate in a response buffer the caller drains
//! with [`Term::take_responses`] and writes back to the PTY.

pub mod charset;
mod handler;
mod interceptor;


pub use charset::CharsetState;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::palette::Palette;
use crate::term_mode::TermMode;
use handler::TermHandler;
use interceptor::CwdInterceptor;

pub struct Term {
    grid: Grid,
    alt_grid: Grid,
    active_is_alt: bool,
    mode: TermMode,
    palette: Palette,
    charset: CharsetState,
    title: String,
    title_stack: Vec<String>,
    /// Latest working directory reported via OSC 7.
    cwd: Option<String>,
    /// Text stored by the application via OSC 52.
    clipboard: Option<String>,
    /// Pending reports to be written back to the PTY.
    responses: Vec<u8>,
    processor: vte::ansi::Processor,
    raw_parser: vte::Parser,
}

impl Term {
    pub fn new(cols: usize, lines: usize, max_scrollback: usize) -> Self {
        Self {
            grid: Grid::with_max_scrollback(cols, lines, max_scrollback),
            // The alternate screen has no scrollback.
            alt_grid: Grid::with_max_scrollback(cols, lines, 0),
            active_is_alt: false,
            mode: TermMode::default(),
            palette: Palette::new(),
            charset: CharsetState::default(),
            title: String::new(),
            title_stack: Vec::new(),
            cwd: None,
            clipboard: None,
            responses: Vec::new(),
            processor: vte::ansi::Processor::new(),
            raw_parser: vte::Parser::new(),
        }
    }

    /// Feed a chunk of PTY output through both parsers. UTF-8 sequences and
    /// escape sequences split across chunks are carried over.
    pub fn process(&mut self, bytes: &[u8]) {
        // The raw interceptor captures OSC 7, which the high-level processor
        // silently drops.
        let mut interceptor = CwdInterceptor { cwd: &mut self.cwd };
        self.raw_parser.advance(&mut interceptor, bytes);

        let mut handler = TermHandler {
            grid: &mut self.grid,
            alt_grid: &mut self.alt_grid,
            active_is_alt: &mut self.active_is_alt,
            mode: &mut self.mode,
            palette: &mut self.palette,
            charset: &mut self.charset,
            title: &mut self.title,
            title_stack: &mut self.title_stack,
            clipboard: &mut self.clipboard,
            responses: &mut self.responses,
        };
        self.processor.advance(&mut handler, bytes);
    }

    /// Drain pending reports (DSR, DA, clipboard and color replies) for the
    /// caller to write to the PTY.
    pub fn take_responses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.responses)
    }

    /// Reference to the active grid.
    pub fn grid(&self) -> &Grid {
        if self.active_is_alt { &self.alt_grid } else { &self.grid }
    }

    /// Mutable reference to the active grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        if self.active_is_alt { &mut self.alt_grid } else { &mut self.grid }
    }

    /// Current terminal mode flags.
    pub fn mode(&self) -> TermMode {
        self.mode
    }

    /// True while the alternate screen is active.
    pub fn is_alt_screen(&self) -> bool {
        self.active_is_alt
    }

    /// Window title (set by OSC 0/2).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Latest working directory reported via OSC 7.
    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    /// Text stored by the application via OSC 52.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Reference to the color palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Cursor position and visibility for the renderer.
    pub fn cursor(&self) -> (usize, usize, bool) {
        let grid = self.grid();
        (
            grid.cursor.col,
            grid.cursor.row,
            self.mode.contains(TermMode::SHOW_CURSOR),
        )
    }

    /// Cell at a viewport coordinate of the active grid.
    pub fn display_cell(&self, col: usize, line: usize) -> Cell {
        self.grid().display_cell(col, line)
    }

    /// Resize both screens. Scrollback is preserved; the scroll regions
    /// reset to the full screen.
    pub fn resize(&mut self, cols: usize, lines: usize) {
        self.grid.resize(cols, lines);
        self.alt_grid.resize(cols, lines);
    }
}
