use crate::grid::Grid;

fn write_char(grid: &mut Grid, line: usize, c: char) {
    grid.goto(line, 0);
    grid.put_char(c);
}

// --- newline / carriage return / backspace ---

#[test]
fn newline_moves_down_within_region() {
    let mut grid = Grid::new(10, 5);
    grid.newline();
    assert_eq!(grid.cursor.row, 1);
    assert_eq!(grid.cursor.col, 0);
}

#[test]
fn newline_at_bottom_scrolls() {
    let mut grid = Grid::new(10, 3);
    for line in 0..3 {
        write_char(&mut grid, line, (b'A' + line as u8) as char);
    }
    grid.goto(2, 0);
    grid.newline();
    assert_eq!(grid.cursor.row, 2);
    assert_eq!(grid.cell(0, 0).c, 'B');
    assert_eq!(grid.cell(0, 1).c, 'C');
    assert!(grid.cell(0, 2).is_blank());
    // The displaced top row landed in scrollback.
    assert_eq!(grid.scrollback.len(), 1);
    assert_eq!(grid.scrollback[0][0].c, 'A');
}

#[test]
fn carriage_return_resets_column() {
    let mut grid = Grid::new(10, 3);
    grid.goto(1, 7);
    grid.carriage_return();
    assert_eq!(grid.cursor.col, 0);
    assert_eq!(grid.cursor.row, 1);
}

#[test]
fn backspace_stops_at_column_zero() {
    let mut grid = Grid::new(10, 3);
    grid.goto(0, 1);
    grid.backspace();
    assert_eq!(grid.cursor.col, 0);
    grid.backspace();
    assert_eq!(grid.cursor.col, 0);
}

// --- reverse index ---

#[test]
fn reverse_index_moves_up() {
    let mut grid = Grid::new(10, 3);
    grid.goto(2, 0);
    grid.reverse_index();
    assert_eq!(grid.cursor.row, 1);
}

#[test]
fn reverse_index_at_top_scrolls_down() {
    let mut grid = Grid::new(10, 3);
    for line in 0..3 {
        write_char(&mut grid, line, (b'A' + line as u8) as char);
    }
    grid.goto(0, 0);
    grid.reverse_index();
    assert_eq!(grid.cursor.row, 0);
    assert!(grid.cell(0, 0).is_blank());
    assert_eq!(grid.cell(0, 1).c, 'A');
    assert_eq!(grid.cell(0, 2).c, 'B');
}

// --- region-limited scrolling ---

#[test]
fn scroll_up_respects_region() {
    let mut grid = Grid::new(10, 6);
    for line in 0..6 {
        write_char(&mut grid, line, (b'A' + line as u8) as char);
    }
    // Region rows 1..=3 (0-based).
    grid.set_scroll_region(1, Some(3));
    grid.scroll_up(1);
    assert_eq!(grid.cell(0, 0).c, 'A');
    assert_eq!(grid.cell(0, 1).c, 'C');
    assert_eq!(grid.cell(0, 2).c, 'D');
    assert!(grid.cell(0, 3).is_blank());
    assert_eq!(grid.cell(0, 4).c, 'E');
    assert_eq!(grid.cell(0, 5).c, 'F');
    // Region-local scrolls never touch scrollback.
    assert!(grid.scrollback.is_empty());
}

#[test]
fn scroll_down_respects_region() {
    let mut grid = Grid::new(10, 6);
    for line in 0..6 {
        write_char(&mut grid, line, (b'A' + line as u8) as char);
    }
    grid.set_scroll_region(1, Some(3));
    grid.scroll_down(1);
    assert_eq!(grid.cell(0, 0).c, 'A');
    assert!(grid.cell(0, 1).is_blank());
    assert_eq!(grid.cell(0, 2).c, 'B');
    assert_eq!(grid.cell(0, 3).c, 'C');
    assert_eq!(grid.cell(0, 4).c, 'E');
}

#[test]
fn scroll_count_clamps_to_region_height() {
    let mut grid = Grid::new(10, 4);
    for line in 0..4 {
        write_char(&mut grid, line, (b'A' + line as u8) as char);
    }
    grid.scroll_up(100);
    for line in 0..4 {
        assert!(grid.cell(0, line).is_blank());
    }
    assert_eq!(grid.scrollback.len(), 4);
}

// --- scrollback bounding ---

#[test]
fn scrollback_discards_oldest_at_capacity() {
    let mut grid = Grid::with_max_scrollback(4, 2, 3);
    for i in 0..6 {
        grid.goto(1, 0);
        grid.put_char(char::from_digit(i, 10).unwrap());
        grid.goto(1, 0);
        grid.newline();
    }
    assert_eq!(grid.scrollback.len(), 3);
    // Six rows were pushed (a blank first, then '0'..'4'); only the last
    // three survive.
    assert_eq!(grid.scrollback[0][0].c, '2');
    assert_eq!(grid.scrollback[2][0].c, '4');
}

#[test]
fn zero_capacity_keeps_no_scrollback() {
    let mut grid = Grid::with_max_scrollback(4, 2, 0);
    for _ in 0..5 {
        grid.goto(1, 0);
        grid.newline();
    }
    assert!(grid.scrollback.is_empty());
}

// --- viewport ---

#[test]
fn scroll_display_clamps_to_history() {
    let mut grid = Grid::new(4, 2);
    for _ in 0..3 {
        grid.goto(1, 0);
        grid.newline();
    }
    assert_eq!(grid.scrollback.len(), 3);
    grid.scroll_display(100);
    assert_eq!(grid.display_offset, 3);
    grid.scroll_display(-1);
    assert_eq!(grid.display_offset, 2);
    grid.reset_display_offset();
    assert_eq!(grid.display_offset, 0);
    grid.scroll_display_to_top();
    assert_eq!(grid.display_offset, 3);
}

#[test]
fn viewport_does_not_move_cursor() {
    let mut grid = Grid::new(4, 2);
    grid.goto(1, 2);
    for _ in 0..3 {
        grid.newline();
    }
    let (col, row) = (grid.cursor.col, grid.cursor.row);
    grid.scroll_display(2);
    assert_eq!((grid.cursor.col, grid.cursor.row), (col, row));
}

#[test]
fn viewport_stays_anchored_while_output_scrolls() {
    let mut grid = Grid::new(4, 2);
    grid.goto(1, 0);
    grid.newline();
    grid.scroll_display(1);
    assert_eq!(grid.display_offset, 1);
    // More output arrives; the offset grows to keep the same content on screen.
    grid.goto(1, 0);
    grid.newline();
    assert_eq!(grid.display_offset, 2);
}
