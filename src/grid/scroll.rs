//! Scroll operations: scroll up/down, newline, reverse index, and the
//! scrollback viewport.

use super::Grid;
use super::row::Row;

impl Grid {
    pub fn newline(&mut self) {
        self.cursor.input_needs_wrap = false;
        if self.cursor.row >= self.scroll_bottom {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
    }

    pub fn linefeed(&mut self) {
        self.newline();
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor.input_needs_wrap = false;
    }

    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            self.cursor.input_needs_wrap = false;
        }
    }

    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.scroll_top {
            self.scroll_down(1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    pub fn scroll_up(&mut self, count: usize) {
        self.scroll_up_in_region(self.scroll_top, self.scroll_bottom, count);
    }

    pub fn scroll_down(&mut self, count: usize) {
        self.scroll_down_in_region(self.scroll_top, self.scroll_bottom, count);
    }

    pub(super) fn scroll_up_in_region(&mut self, top: usize, bottom: usize, count: usize) {
        if top > bottom || bottom >= self.lines {
            return;
        }
        let count = count.min(bottom - top + 1);

        for _ in 0..count {
            let scrolled_row = self.rows.remove(top);

            // Rows leaving the top of the full screen feed the scrollback
            // ring; region-local scrolls discard them.
            if top == 0 {
                if self.scrollback.len() >= self.max_scrollback {
                    self.scrollback.pop_front();
                    // An eviction while the user is scrolled up would drift
                    // the viewport past the top.
                    if self.display_offset > 0 {
                        self.display_offset = self.display_offset.saturating_sub(1);
                    }
                } else if self.display_offset > 0 {
                    // Scrollback grew; bump the offset to keep the viewport
                    // anchored on the same content.
                    self.display_offset += 1;
                }
                if self.max_scrollback > 0 {
                    self.scrollback.push_back(scrolled_row);
                }
            }

            self.rows.insert(bottom, Row::new(self.cols));
        }
    }

    pub(super) fn scroll_down_in_region(&mut self, top: usize, bottom: usize, count: usize) {
        if top > bottom || bottom >= self.lines {
            return;
        }
        let count = count.min(bottom - top + 1);

        for _ in 0..count {
            self.rows.remove(bottom);
            self.rows.insert(top, Row::new(self.cols));
        }
    }

    // Viewport navigation. Never moves the cursor or mutates cells.

    /// Scroll the viewport by `delta` lines: positive moves into history,
    /// negative back toward the live grid.
    pub fn scroll_display(&mut self, delta: isize) {
        if delta > 0 {
            let max = self.scrollback.len();
            self.display_offset = (self.display_offset + delta as usize).min(max);
        } else {
            self.display_offset = self.display_offset.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Snap the viewport back to the live grid.
    pub fn reset_display_offset(&mut self) {
        self.display_offset = 0;
    }

    /// Scroll the viewport to the oldest scrollback row.
    pub fn scroll_display_to_top(&mut self) {
        self.display_offset = self.scrollback.len();
    }
}

#[cfg(test)]
mod tests;
