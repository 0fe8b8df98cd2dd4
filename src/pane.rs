//! A pane: one terminal bound to one PTY, pumped by a dedicated reader task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::debug;
use parking_lot::RwLock;

use crate::cell::Cell;
use crate::config::TerminalConfig;
use crate::pty::PtySession;
use crate::term::Term;
use crate::term_mode::TermMode;

/// Reader task chunk size.
const READ_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

/// One live shell and its terminal state.
///
/// Construction spawns a reader thread that feeds PTY output through the
/// terminal under an exclusive lock and flushes any queued reports back to
/// the PTY. All renderer-facing accessors take the lock briefly and return
/// plain values.
pub struct Pane {
    pub id: PaneId,
    term: Arc<RwLock<Term>>,
    pty: PtySession,
    exited: Arc<AtomicBool>,
}

impl Pane {
    pub fn spawn(
        id: PaneId,
        cols: usize,
        rows: usize,
        config: &TerminalConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let (pty, mut reader) = PtySession::open(cols, rows, config)?;
        let term = Arc::new(RwLock::new(Term::new(cols, rows, config.scrollback)));
        let exited = Arc::new(AtomicBool::new(false));

        let reader_term = Arc::clone(&term);
        let reader_exited = Arc::clone(&exited);
        let writer = pty.writer_handle();
        thread::Builder::new()
            .name(format!("pane-{}-reader", id.0))
            .spawn(move || {
                let mut buf = [0u8; READ_BUFFER_SIZE];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => {
                            debug!("pane {}: pty eof", id.0);
                            break;
                        }
                        Err(e) => {
                            debug!("pane {}: pty read error: {e}", id.0);
                            break;
                        }
                        Ok(n) => {
                            let responses = {
                                let mut term = reader_term.write();
                                term.process(&buf[..n]);
                                term.take_responses()
                            };
                            if !responses.is_empty() {
                                if let Some(w) = writer.lock().as_mut() {
                                    let _ = w.write_all(&responses);
                                    let _ = w.flush();
                                }
                            }
                        }
                    }
                }
                reader_exited.store(true, Ordering::SeqCst);
            })?;

        Ok(Self {
            id,
            term,
            pty,
            exited,
        })
    }

    /// Forward input bytes to the shell. Write failures are logged and the
    /// input dropped; the exit flag reports the session state.
    pub fn write(&self, data: &[u8]) {
        if let Err(e) = self.pty.write(data) {
            debug!("pane {}: pty write failed: {e}", self.id.0);
        }
    }

    /// Resize terminal and PTY in lockstep. The reader never observes a
    /// partially resized grid.
    pub fn resize(&self, cols: usize, rows: usize) {
        let mut term = self.term.write();
        term.resize(cols, rows);
        self.pty.resize(cols, rows);
    }

    /// True once the shell has exited (reader EOF/error or child gone).
    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst) || self.pty.has_exited()
    }

    /// Stop the PTY; the reader terminates on the resulting EOF.
    pub fn close(&self) {
        self.pty.close();
    }

    // Renderer-facing snapshots.

    /// Current grid dimensions as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        let term = self.term.read();
        let grid = term.grid();
        (grid.cols, grid.lines)
    }

    /// Cell at a viewport coordinate.
    pub fn display_cell(&self, col: usize, line: usize) -> Cell {
        self.term.read().display_cell(col, line)
    }

    /// Cursor position and visibility.
    pub fn cursor(&self) -> (usize, usize, bool) {
        self.term.read().cursor()
    }

    /// Current terminal mode flags (for input encoding decisions).
    pub fn mode(&self) -> TermMode {
        self.term.read().mode()
    }

    pub fn title(&self) -> String {
        self.term.read().title().to_owned()
    }

    /// Latest working directory reported by shell integration.
    pub fn cwd(&self) -> Option<String> {
        self.term.read().cwd().map(str::to_owned)
    }

    /// Text stored by the application via the clipboard escape.
    pub fn clipboard(&self) -> Option<String> {
        self.term.read().clipboard().map(str::to_owned)
    }

    pub fn is_selected(&self, col: usize, line: usize) -> bool {
        self.term.read().grid().is_selected(col, line)
    }

    pub fn selected_text(&self) -> String {
        self.term.read().grid().selected_text()
    }

    pub fn visible_text(&self) -> String {
        self.term.read().grid().visible_text()
    }

    pub fn set_selection(&self, start_col: usize, start_row: usize, end_col: usize, end_row: usize) {
        self.term
            .write()
            .grid_mut()
            .set_selection(start_col, start_row, end_col, end_row);
    }

    pub fn clear_selection(&self) {
        self.term.write().grid_mut().clear_selection();
    }

    /// Scroll the viewport: positive into history, negative toward live.
    pub fn scroll_display(&self, delta: isize) {
        self.term.write().grid_mut().scroll_display(delta);
    }

    pub fn reset_display_offset(&self) {
        self.term.write().grid_mut().reset_display_offset();
    }

    pub fn display_offset(&self) -> usize {
        self.term.read().grid().display_offset
    }
}
