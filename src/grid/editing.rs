//! Character writing, erasing, and insertion/deletion operations.

use vte::ansi::{ClearMode, LineClearMode};

use crate::cell::CellFlags;

use super::Grid;

impl Grid {
    pub fn put_char(&mut self, c: char) {
        if self.cursor.input_needs_wrap {
            if self.autowrap {
                self.wrap_cursor();
            } else {
                self.cursor.input_needs_wrap = false;
            }
        }

        if self.cursor.col >= self.cols {
            self.cursor.col = self.cols - 1;
        }

        let col = self.cursor.col;
        let row = self.cursor.row;

        // Overwriting the spacer half of a wide char orphans its base cell.
        if col > 0
            && self.rows[row][col]
                .flags
                .contains(CellFlags::WIDE_CHAR_SPACER)
        {
            self.rows[row][col - 1].c = ' ';
            self.rows[row][col - 1].flags.remove(CellFlags::WIDE_CHAR);
        }
        // Overwriting a wide char orphans its spacer.
        if self.rows[row][col].flags.contains(CellFlags::WIDE_CHAR) && col + 1 < self.cols {
            self.rows[row][col + 1].c = ' ';
            self.rows[row][col + 1]
                .flags
                .remove(CellFlags::WIDE_CHAR_SPACER);
        }

        let cell = &mut self.rows[row][col];
        cell.c = c;
        cell.fg = self.cursor.template.fg;
        cell.bg = self.cursor.template.bg;
        cell.flags = self.cursor.template.flags;
        cell.extra = None;

        self.cursor.col += 1;
        if self.cursor.col >= self.cols {
            self.cursor.input_needs_wrap = true;
            self.cursor.col = self.cols - 1;
        }
    }

    pub fn put_wide_char(&mut self, c: char) {
        if self.cols < 2 {
            return;
        }

        if self.cursor.input_needs_wrap {
            if self.autowrap {
                self.wrap_cursor();
            } else {
                self.cursor.input_needs_wrap = false;
            }
        }

        // A wide char cannot start in the last column: leave a placeholder
        // spacer there and wrap first.
        if self.cursor.col + 1 >= self.cols {
            let col = self.cursor.col;
            let row = self.cursor.row;
            self.rows[row][col].c = ' ';
            self.rows[row][col].flags = CellFlags::LEADING_WIDE_CHAR_SPACER;
            self.wrap_cursor();
        }

        let col = self.cursor.col;
        let row = self.cursor.row;

        let cell = &mut self.rows[row][col];
        cell.c = c;
        cell.fg = self.cursor.template.fg;
        cell.bg = self.cursor.template.bg;
        cell.flags = self.cursor.template.flags | CellFlags::WIDE_CHAR;
        cell.extra = None;

        let spacer = &mut self.rows[row][col + 1];
        spacer.c = ' ';
        spacer.fg = self.cursor.template.fg;
        spacer.bg = self.cursor.template.bg;
        spacer.flags = CellFlags::WIDE_CHAR_SPACER;
        spacer.extra = None;

        self.cursor.col += 2;
        if self.cursor.col >= self.cols {
            self.cursor.input_needs_wrap = true;
            self.cursor.col = self.cols - 1;
        }
    }

    pub(super) fn wrap_cursor(&mut self) {
        let row = self.cursor.row;
        self.rows[row][self.cols - 1]
            .flags
            .insert(CellFlags::WRAPLINE);

        self.cursor.col = 0;
        self.cursor.input_needs_wrap = false;

        if self.cursor.row >= self.scroll_bottom {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
    }

    pub fn erase_display(&mut self, mode: ClearMode) {
        let template = self.cursor.template.clone();
        match mode {
            ClearMode::Below => {
                let row = self.cursor.row;
                let col = self.cursor.col;
                for c in col..self.cols {
                    self.rows[row][c].reset(&template);
                }
                for r in (row + 1)..self.lines {
                    self.rows[r].reset(&template);
                }
            }
            ClearMode::Above => {
                let row = self.cursor.row;
                let col = self.cursor.col;
                for r in 0..row {
                    self.rows[r].reset(&template);
                }
                for c in 0..=col.min(self.cols - 1) {
                    self.rows[row][c].reset(&template);
                }
            }
            ClearMode::All => {
                for r in 0..self.lines {
                    self.rows[r].reset(&template);
                }
            }
            ClearMode::Saved => {
                self.scrollback.clear();
                self.display_offset = 0;
            }
        }
    }

    pub fn erase_line(&mut self, mode: LineClearMode) {
        let template = self.cursor.template.clone();
        let row = self.cursor.row;
        let col = self.cursor.col;
        match mode {
            LineClearMode::Right => {
                for c in col..self.cols {
                    self.rows[row][c].reset(&template);
                }
            }
            LineClearMode::Left => {
                for c in 0..=col.min(self.cols - 1) {
                    self.rows[row][c].reset(&template);
                }
            }
            LineClearMode::All => {
                self.rows[row].reset(&template);
            }
        }
    }

    /// ECH: blank `count` cells from the cursor without moving it.
    pub fn erase_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let template = self.cursor.template.clone();
        let end = (col + count).min(self.cols);
        for c in col..end {
            self.rows[row][c].reset(&template);
        }
    }

    /// ICH: shift cells right from the cursor, blank-filling the gap.
    pub fn insert_blank_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let count = count.min(self.cols - col);

        for c in (col + count..self.cols).rev() {
            self.rows[row][c] = self.rows[row][c - count].clone();
        }
        let template = self.cursor.template.clone();
        for c in col..(col + count).min(self.cols) {
            self.rows[row][c].reset(&template);
        }
    }

    /// DCH: shift cells left onto the cursor, blank-filling the tail.
    pub fn delete_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let count = count.min(self.cols - col);

        for c in col..(self.cols - count) {
            self.rows[row][c] = self.rows[row][c + count].clone();
        }
        let template = self.cursor.template.clone();
        for c in (self.cols - count)..self.cols {
            self.rows[row][c].reset(&template);
        }
    }

    /// IL: open `count` blank lines at the cursor row, pushing the rest of
    /// the scroll region down.
    pub fn insert_lines(&mut self, count: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_down_in_region(row, self.scroll_bottom, count);
    }

    /// DL: delete `count` lines at the cursor row, pulling the rest of the
    /// scroll region up.
    pub fn delete_lines(&mut self, count: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_up_in_region(row, self.scroll_bottom, count);
    }
}
