//! Terminal grid with cursor, scroll region, scrollback, and selection.

pub mod cursor;
mod editing;
mod navigation;
pub mod row;
mod scroll;


use std::collections::VecDeque;

use crate::cell::Cell;
use crate::selection::{self, Selection};
use cursor::Cursor;
use row::Row;

const DEFAULT_TAB_INTERVAL: usize = 8;

/// Default maximum scrollback lines.
pub const DEFAULT_MAX_SCROLLBACK: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Row>,
    pub cols: usize,
    pub lines: usize,
    pub cursor: Cursor,
    saved_cursor: Option<Cursor>,
    scroll_top: usize,
    scroll_bottom: usize,
    tab_stops: Vec<bool>,
    /// Rows scrolled off the top, oldest first. Bounded at `max_scrollback`.
    pub scrollback: VecDeque<Row>,
    max_scrollback: usize,
    /// How many scrollback rows above the live grid the viewport shows.
    /// 0 means the viewport is at the live grid.
    pub display_offset: usize,
    /// DECAWM. When false, writes to the last column overwrite in place.
    pub autowrap: bool,
    selection: Option<Selection>,
}

impl Grid {
    pub fn new(cols: usize, lines: usize) -> Self {
        Self::with_max_scrollback(cols, lines, DEFAULT_MAX_SCROLLBACK)
    }

    pub fn with_max_scrollback(cols: usize, lines: usize, max_scrollback: usize) -> Self {
        let cols = cols.max(1);
        let lines = lines.max(1);
        let rows = (0..lines).map(|_| Row::new(cols)).collect();
        let tab_stops = Self::build_tab_stops(cols);

        Self {
            rows,
            cols,
            lines,
            cursor: Cursor::default(),
            saved_cursor: None,
            scroll_top: 0,
            scroll_bottom: lines - 1,
            tab_stops,
            scrollback: VecDeque::new(),
            max_scrollback,
            display_offset: 0,
            autowrap: true,
            selection: None,
        }
    }

    fn build_tab_stops(cols: usize) -> Vec<bool> {
        let mut stops = vec![false; cols];
        for i in (DEFAULT_TAB_INTERVAL..cols).step_by(DEFAULT_TAB_INTERVAL) {
            stops[i] = true;
        }
        stops
    }

    pub fn max_scrollback(&self) -> usize {
        self.max_scrollback
    }

    pub fn row(&self, line: usize) -> &Row {
        &self.rows[line]
    }

    pub fn row_mut(&mut self, line: usize) -> &mut Row {
        &mut self.rows[line]
    }

    /// The row shown at viewport position `line`, resolving the current
    /// display offset into scrollback.
    pub fn visible_row(&self, line: usize) -> &Row {
        if self.display_offset == 0 {
            return &self.rows[line];
        }
        let scrollback_len = self.scrollback.len();
        let offset_line = line as isize - self.display_offset as isize;
        if offset_line < 0 {
            let sb_idx = scrollback_len as isize + offset_line;
            if sb_idx >= 0 && (sb_idx as usize) < scrollback_len {
                return &self.scrollback[sb_idx as usize];
            }
            if !self.scrollback.is_empty() {
                return &self.scrollback[0];
            }
            return &self.rows[0];
        }
        &self.rows[offset_line as usize]
    }

    /// Cell at a live-grid coordinate. Out of bounds yields an empty cell.
    pub fn cell(&self, col: usize, line: usize) -> Cell {
        if col < self.cols && line < self.lines {
            self.rows[line][col].clone()
        } else {
            Cell::default()
        }
    }

    /// Overwrite a live-grid cell. Out of bounds is a no-op.
    pub fn set_cell(&mut self, col: usize, line: usize, cell: Cell) {
        if col < self.cols && line < self.lines {
            self.rows[line][col] = cell;
        }
    }

    /// Cell at a viewport coordinate, accounting for the display offset.
    /// Out of bounds yields an empty cell.
    pub fn display_cell(&self, col: usize, line: usize) -> Cell {
        if col < self.cols && line < self.lines {
            self.visible_row(line)[col].clone()
        } else {
            Cell::default()
        }
    }

    pub fn clear_all(&mut self) {
        let template = Cell::default();
        for r in 0..self.lines {
            self.rows[r].reset(&template);
        }
        self.cursor.col = 0;
        self.cursor.row = 0;
        self.cursor.input_needs_wrap = false;
    }

    /// DECALN: fill the screen with 'E' for alignment checks.
    pub fn decaln(&mut self) {
        let template = Cell::default();
        for r in 0..self.lines {
            for c in 0..self.cols {
                self.rows[r][c].reset(&template);
                self.rows[r][c].c = 'E';
            }
        }
    }

    /// Resize the grid, preserving the top-left intersection of the old and
    /// new dimensions. The cursor is clamped, the scroll region reset to the
    /// full screen, and scrollback retained (rows re-cut to the new width).
    pub fn resize(&mut self, cols: usize, lines: usize) {
        let cols = cols.max(1);
        let lines = lines.max(1);
        if cols == self.cols && lines == self.lines {
            return;
        }

        for row in &mut self.rows {
            row.resize(cols);
        }
        for row in &mut self.scrollback {
            row.resize(cols);
        }
        if lines < self.lines {
            self.rows.truncate(lines);
        } else {
            for _ in self.lines..lines {
                self.rows.push(Row::new(cols));
            }
        }

        self.cols = cols;
        self.lines = lines;
        self.scroll_top = 0;
        self.scroll_bottom = lines - 1;
        self.tab_stops = Self::build_tab_stops(cols);
        self.cursor.col = self.cursor.col.min(cols - 1);
        self.cursor.row = self.cursor.row.min(lines - 1);
        self.cursor.input_needs_wrap = false;
        self.display_offset = self.display_offset.min(self.scrollback.len());
        self.selection = None;
    }

    // Selection

    /// Replace the selection. Endpoints are clamped into the viewport and the
    /// current display offset becomes the selection anchor.
    pub fn set_selection(&mut self, start_col: usize, start_row: usize, end_col: usize, end_row: usize) {
        self.selection = Some(Selection::new(
            start_col.min(self.cols - 1),
            start_row.min(self.lines - 1),
            end_col.min(self.cols - 1),
            end_row.min(self.lines - 1),
            self.display_offset,
        ));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Whether the viewport cell at (`col`, `line`) is selected. Always false
    /// once the viewport has scrolled away from the selection anchor.
    pub fn is_selected(&self, col: usize, line: usize) -> bool {
        match &self.selection {
            Some(sel) if sel.anchor_offset == self.display_offset => sel.contains(col, line),
            _ => false,
        }
    }

    /// Materialize the selected text, or an empty string when no selection is
    /// active at the current display offset.
    pub fn selected_text(&self) -> String {
        match &self.selection {
            Some(sel) if sel.anchor_offset == self.display_offset => {
                selection::selection_text(self, sel)
            }
            _ => String::new(),
        }
    }

    /// Materialize the visible viewport as text: one line per row, trailing
    /// spaces trimmed, trailing blank lines dropped.
    pub fn visible_text(&self) -> String {
        let mut out_lines: Vec<String> = Vec::with_capacity(self.lines);
        for line in 0..self.lines {
            out_lines.push(selection::row_text(self.visible_row(line), 0, self.cols - 1));
        }
        while out_lines.last().is_some_and(String::is_empty) {
            out_lines.pop();
        }
        out_lines.join("\n")
    }
}
