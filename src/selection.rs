//! Viewport-anchored selection overlay and text extraction.
//!
//! Selections live in display coordinates and remember the display offset at
//! which they were made. Scrolling the viewport away from that offset
//! deactivates the selection implicitly; queries simply return false until
//! the viewport returns.

use crate::cell::CellFlags;
use crate::grid::Grid;
use crate::grid::row::Row;

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint {
    pub col: usize,
    pub row: usize,
}

/// A selection between two viewport points, anchored to a display offset.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub start: SelectionPoint,
    pub end: SelectionPoint,
    /// Display offset at the time the selection was made.
    pub anchor_offset: usize,
}

impl Selection {
    pub fn new(
        start_col: usize,
        start_row: usize,
        end_col: usize,
        end_row: usize,
        anchor_offset: usize,
    ) -> Self {
        Self {
            start: SelectionPoint {
                col: start_col,
                row: start_row,
            },
            end: SelectionPoint {
                col: end_col,
                row: end_row,
            },
            anchor_offset,
        }
    }

    /// Endpoints in row-major order (start before end).
    pub fn normalized(&self) -> (SelectionPoint, SelectionPoint) {
        if (self.end.row, self.end.col) < (self.start.row, self.start.col) {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        }
    }

    /// Whether the viewport cell at (`col`, `row`) lies in the selection.
    ///
    /// Single-row selections cover the inclusive column span; multi-row
    /// selections run to end-of-row on the start row, cover full rows in
    /// between, and run from start-of-row on the end row.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        let (start, end) = self.normalized();
        if row < start.row || row > end.row {
            return false;
        }
        if start.row == end.row {
            return col >= start.col && col <= end.col;
        }
        if row == start.row {
            return col >= start.col;
        }
        if row == end.row {
            return col <= end.col;
        }
        true
    }
}

/// Collect the text of one visible row between two inclusive columns, with
/// trailing spaces trimmed. Wide-char spacers are skipped and NUL reads as a
/// space.
pub(crate) fn row_text(row: &Row, start_col: usize, end_col: usize) -> String {
    let mut line = String::new();
    let last = end_col.min(row.len().saturating_sub(1));
    for col in start_col..=last {
        let cell = &row[col];
        if cell
            .flags
            .intersects(CellFlags::WIDE_CHAR_SPACER | CellFlags::LEADING_WIDE_CHAR_SPACER)
        {
            continue;
        }
        line.push(if cell.c == '\0' { ' ' } else { cell.c });
        for &zw in cell.zerowidth() {
            line.push(zw);
        }
    }
    line.truncate(line.trim_end().len());
    line
}

/// Extract the selected text from the grid's viewport.
pub(crate) fn selection_text(grid: &Grid, selection: &Selection) -> String {
    let (start, end) = selection.normalized();
    let mut result = String::new();

    for row_idx in start.row..=end.row.min(grid.lines - 1) {
        let row = grid.visible_row(row_idx);
        let row_start = if row_idx == start.row { start.col } else { 0 };
        let row_end = if row_idx == end.row {
            end.col
        } else {
            grid.cols - 1
        };

        let line = row_text(row, row_start, row_end);

        // Soft-wrapped rows flow into the next row without a newline.
        let is_wrapped = !row.is_empty() && row[row.len() - 1].flags.contains(CellFlags::WRAPLINE);
        if is_wrapped && row_idx < end.row {
            // Re-collect untrimmed: a wrapped row's spaces are real content.
            let mut untrimmed = String::new();
            for col in row_start..=row_end.min(row.len() - 1) {
                let cell = &row[col];
                if cell
                    .flags
                    .intersects(CellFlags::WIDE_CHAR_SPACER | CellFlags::LEADING_WIDE_CHAR_SPACER)
                {
                    continue;
                }
                untrimmed.push(if cell.c == '\0' { ' ' } else { cell.c });
                for &zw in cell.zerowidth() {
                    untrimmed.push(zw);
                }
            }
            result.push_str(&untrimmed);
        } else {
            result.push_str(&line);
            if row_idx < end.row {
                result.push('\n');
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(lines: &[&str]) -> Grid {
        let cols = lines.iter().map(|l| l.len()).max().unwrap_or(1).max(1);
        let mut grid = Grid::new(cols, lines.len().max(1));
        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                grid.goto(r, c);
                grid.put_char(ch);
            }
        }
        grid.goto(0, 0);
        grid
    }

    #[test]
    fn contains_single_row() {
        let sel = Selection::new(2, 5, 8, 5, 0);
        assert!(!sel.contains(1, 5));
        assert!(sel.contains(2, 5));
        assert!(sel.contains(5, 5));
        assert!(sel.contains(8, 5));
        assert!(!sel.contains(9, 5));
        assert!(!sel.contains(5, 4));
        assert!(!sel.contains(5, 6));
    }

    #[test]
    fn contains_multi_row() {
        let sel = Selection::new(5, 2, 3, 4, 0);
        // Start row: col >= 5.
        assert!(!sel.contains(4, 2));
        assert!(sel.contains(5, 2));
        assert!(sel.contains(100, 2));
        // Middle row fully selected.
        assert!(sel.contains(0, 3));
        assert!(sel.contains(100, 3));
        // End row: col <= 3.
        assert!(sel.contains(0, 4));
        assert!(sel.contains(3, 4));
        assert!(!sel.contains(4, 4));
    }

    #[test]
    fn normalized_swaps_reversed_endpoints() {
        let sel = Selection::new(3, 4, 5, 2, 0);
        let (start, end) = sel.normalized();
        assert_eq!(start, SelectionPoint { col: 5, row: 2 });
        assert_eq!(end, SelectionPoint { col: 3, row: 4 });
        // Same membership as the forward form.
        assert!(sel.contains(0, 3));
        assert!(sel.contains(5, 2));
        assert!(!sel.contains(4, 2));
    }

    #[test]
    fn grid_selection_anchors_to_offset() {
        let mut grid = grid_with(&["hello", "world"]);
        grid.set_selection(0, 0, 4, 0);
        assert!(grid.is_selected(2, 0));
        // Push a row into scrollback and scroll the viewport up.
        grid.goto(1, 0);
        grid.newline();
        grid.scroll_display(1);
        assert!(!grid.is_selected(2, 0));
        assert_eq!(grid.selected_text(), "");
        // Returning to the anchor offset revives the selection.
        grid.reset_display_offset();
        assert!(grid.is_selected(2, 0));
    }

    #[test]
    fn selected_text_multi_row() {
        let mut grid = grid_with(&["Hello", "World"]);
        grid.set_selection(0, 0, 4, 1);
        assert_eq!(grid.selected_text(), "Hello\nWorld");
    }

    #[test]
    fn selected_text_trims_trailing_blanks() {
        let mut grid = grid_with(&["hi        ", "there     "]);
        grid.set_selection(0, 0, 9, 1);
        assert_eq!(grid.selected_text(), "hi\nthere");
    }

    #[test]
    fn set_selection_clamps_endpoints() {
        let mut grid = grid_with(&["abc"]);
        grid.set_selection(0, 0, 99, 99);
        assert!(grid.is_selected(2, 0));
        assert_eq!(grid.selected_text(), "abc");
    }
}
