//! VTE escape sequence handler: translates decoded sequences into grid and
//! terminal-state mutations.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use unicode_width::UnicodeWidthChar;
use vte::ansi::{
    Attr, CharsetIndex, ClearMode, Color, Handler, LineClearMode, Mode, NamedColor, NamedMode,
    NamedPrivateMode, PrivateMode, Rgb, StandardCharset, TabulationClearMode,
};

use crate::cell::CellFlags;
use crate::grid::Grid;
use crate::palette::Palette;
use crate::term_mode::TermMode;

use super::charset::CharsetState;

/// Borrows the mutable pieces of a [`super::Term`] for one `process` call.
pub(super) struct TermHandler<'a> {
    pub grid: &'a mut Grid,
    pub alt_grid: &'a mut Grid,
    pub active_is_alt: &'a mut bool,
    pub mode: &'a mut TermMode,
    pub palette: &'a mut Palette,
    pub charset: &'a mut CharsetState,
    pub title: &'a mut String,
    pub title_stack: &'a mut Vec<String>,
    pub clipboard: &'a mut Option<String>,
    pub responses: &'a mut Vec<u8>,
}

impl TermHandler<'_> {
    /// Returns a mutable reference to the currently active grid.
    fn active_grid(&mut self) -> &mut Grid {
        if *self.active_is_alt {
            &mut *self.alt_grid
        } else {
            &mut *self.grid
        }
    }

    /// Returns a shared reference to the currently active grid.
    fn active_grid_ref(&self) -> &Grid {
        if *self.active_is_alt {
            &*self.alt_grid
        } else {
            &*self.grid
        }
    }

    /// Queue a report for the PTY.
    fn respond(&mut self, data: &[u8]) {
        self.responses.extend_from_slice(data);
    }

    /// Row addressing for CUP/HVP/VPA: relative to the scroll-region top and
    /// clamped to its bottom while origin mode is set.
    fn origin_row(&mut self, line: i32) -> usize {
        let row = usize::try_from(line).unwrap_or(0);
        if self.mode.contains(TermMode::ORIGIN) {
            let grid = self.active_grid();
            (grid.scroll_top() + row).min(grid.scroll_bottom())
        } else {
            row
        }
    }

    fn swap_alt_screen(&mut self) {
        if *self.active_is_alt {
            return;
        }
        self.grid.save_cursor();
        // SGR state carries across the switch.
        self.alt_grid.cursor.template = self.grid.cursor.template.clone();
        self.alt_grid.clear_all();
        *self.active_is_alt = true;
        self.mode.insert(TermMode::ALT_SCREEN);
    }

    fn restore_primary_screen(&mut self) {
        if !*self.active_is_alt {
            return;
        }
        *self.active_is_alt = false;
        self.grid.restore_cursor();
        self.mode.remove(TermMode::ALT_SCREEN);
    }
}

/// Find the column of the previous base cell (skipping wide char spacers).
///
/// Accounts for `input_needs_wrap`: when true, cursor.col already points at
/// the last written cell rather than the cell after it.
fn prev_base_col(grid: &Grid) -> Option<usize> {
    let row = grid.cursor.row;
    let col = if grid.cursor.input_needs_wrap {
        grid.cursor.col
    } else if grid.cursor.col > 0 {
        grid.cursor.col - 1
    } else {
        return None;
    };

    if row >= grid.lines || col >= grid.cols {
        return None;
    }

    if grid.row(row)[col].flags.contains(CellFlags::WIDE_CHAR_SPACER) && col > 0 {
        Some(col - 1)
    } else {
        Some(col)
    }
}

impl Handler for TermHandler<'_> {
    fn input(&mut self, c: char) {
        let c = self.charset.map(c);
        let grid = self.active_grid();
        match UnicodeWidthChar::width(c) {
            Some(2) => grid.put_wide_char(c),
            Some(0) => {
                // Zero-width: attach to the previous base cell.
                if let Some(col) = prev_base_col(grid) {
                    let row = grid.cursor.row;
                    grid.row_mut(row)[col].push_zerowidth(c);
                }
            }
            _ => grid.put_char(c),
        }
    }

    fn goto(&mut self, line: i32, col: usize) {
        let row = self.origin_row(line);
        self.active_grid().goto(row, col);
    }

    fn goto_line(&mut self, line: i32) {
        let row = self.origin_row(line);
        self.active_grid().goto_line(row);
    }

    fn goto_col(&mut self, col: usize) {
        self.active_grid().goto_col(col);
    }

    fn move_up(&mut self, n: usize) {
        self.active_grid().move_up(n);
    }

    fn move_down(&mut self, n: usize) {
        self.active_grid().move_down(n);
    }

    fn move_forward(&mut self, n: usize) {
        self.active_grid().move_forward(n);
    }

    fn move_backward(&mut self, n: usize) {
        self.active_grid().move_backward(n);
    }

    fn move_down_and_cr(&mut self, n: usize) {
        let grid = self.active_grid();
        grid.move_down(n);
        grid.carriage_return();
    }

    fn move_up_and_cr(&mut self, n: usize) {
        let grid = self.active_grid();
        grid.move_up(n);
        grid.carriage_return();
    }

    fn terminal_attribute(&mut self, attr: Attr) {
        let template = &mut self.active_grid().cursor.template;
        match attr {
            Attr::Reset => {
                template.fg = Color::Named(NamedColor::Foreground);
                template.bg = Color::Named(NamedColor::Background);
                template.flags = CellFlags::empty();
                template.extra = None;
            }
            Attr::Bold => template.flags.insert(CellFlags::BOLD),
            Attr::Dim => template.flags.insert(CellFlags::DIM),
            Attr::Italic => template.flags.insert(CellFlags::ITALIC),
            Attr::Underline
            | Attr::DoubleUnderline
            | Attr::Undercurl
            | Attr::DottedUnderline
            | Attr::DashedUnderline => template.flags.insert(CellFlags::UNDERLINE),
            Attr::Reverse => template.flags.insert(CellFlags::INVERSE),
            Attr::Hidden => template.flags.insert(CellFlags::HIDDEN),
            Attr::Strike => template.flags.insert(CellFlags::STRIKEOUT),
            Attr::CancelBold => template.flags.remove(CellFlags::BOLD),
            Attr::CancelBoldDim => {
                template.flags.remove(CellFlags::BOLD);
                template.flags.remove(CellFlags::DIM);
            }
            Attr::CancelItalic => template.flags.remove(CellFlags::ITALIC),
            Attr::CancelUnderline => template.flags.remove(CellFlags::UNDERLINE),
            Attr::CancelReverse => template.flags.remove(CellFlags::INVERSE),
            Attr::CancelHidden => template.flags.remove(CellFlags::HIDDEN),
            Attr::CancelStrike => template.flags.remove(CellFlags::STRIKEOUT),
            Attr::Foreground(color) => template.fg = color,
            Attr::Background(color) => template.bg = color,
            // Blink and underline-color variants are not tracked.
            _ => {}
        }
    }

    fn clear_screen(&mut self, mode: ClearMode) {
        self.active_grid().erase_display(mode);
    }

    fn clear_line(&mut self, mode: LineClearMode) {
        self.active_grid().erase_line(mode);
    }

    fn clear_tabs(&mut self, mode: TabulationClearMode) {
        self.active_grid().clear_tab_stops(mode);
    }

    fn erase_chars(&mut self, count: usize) {
        self.active_grid().erase_chars(count);
    }

    fn delete_chars(&mut self, count: usize) {
        self.active_grid().delete_chars(count);
    }

    fn insert_blank(&mut self, count: usize) {
        self.active_grid().insert_blank_chars(count);
    }

    fn insert_blank_lines(&mut self, count: usize) {
        self.active_grid().insert_lines(count);
    }

    fn delete_lines(&mut self, count: usize) {
        self.active_grid().delete_lines(count);
    }

    fn scroll_up(&mut self, count: usize) {
        self.active_grid().scroll_up(count);
    }

    fn scroll_down(&mut self, count: usize) {
        self.active_grid().scroll_down(count);
    }

    fn set_scrolling_region(&mut self, top: usize, bottom: Option<usize>) {
        // Parameters are 1-based; the grid stores 0-based inclusive bounds.
        self.active_grid().set_scroll_region(
            top.saturating_sub(1),
            bottom.map(|b| b.saturating_sub(1)),
        );
    }

    fn reverse_index(&mut self) {
        self.active_grid().reverse_index();
    }

    fn linefeed(&mut self) {
        let nl = self.mode.contains(TermMode::LINE_FEED_NEW_LINE);
        let grid = self.active_grid();
        grid.linefeed();
        if nl {
            grid.carriage_return();
        }
    }

    fn carriage_return(&mut self) {
        self.active_grid().carriage_return();
    }

    fn backspace(&mut self) {
        self.active_grid().backspace();
    }

    fn newline(&mut self) {
        let grid = self.active_grid();
        grid.linefeed();
        grid.carriage_return();
    }

    fn substitute(&mut self) {
        // SUB is rendered as a blank.
        self.active_grid().put_char(' ');
    }

    fn put_tab(&mut self, count: u16) {
        self.active_grid().advance_tab(count);
    }

    fn move_forward_tabs(&mut self, count: u16) {
        self.active_grid().advance_tab(count);
    }

    fn move_backward_tabs(&mut self, count: u16) {
        self.active_grid().backward_tab(count);
    }

    fn set_horizontal_tabstop(&mut self) {
        self.active_grid().set_tab_stop();
    }

    fn save_cursor_position(&mut self) {
        self.active_grid().save_cursor();
    }

    fn restore_cursor_position(&mut self) {
        self.active_grid().restore_cursor();
    }

    fn set_title(&mut self, title: Option<String>) {
        if let Some(t) = title {
            *self.title = t;
        }
    }

    fn push_title(&mut self) {
        self.title_stack.push(self.title.clone());
    }

    fn pop_title(&mut self) {
        if let Some(t) = self.title_stack.pop() {
            *self.title = t;
        }
    }

    fn device_status(&mut self, status: usize) {
        match status {
            // DSR 5 — Device Status Report: respond "OK".
            5 => self.respond(b"\x1b[0n"),
            // DSR 6 — Cursor Position Report.
            6 => {
                let grid = self.active_grid_ref();
                let response =
                    format!("\x1b[{};{}R", grid.cursor.row + 1, grid.cursor.col + 1);
                self.respond(response.as_bytes());
            }
            _ => {}
        }
    }

    fn identify_terminal(&mut self, intermediate: Option<char>) {
        match intermediate {
            // DA2 — Secondary Device Attributes (CSI > c).
            Some('>') => self.respond(b"\x1b[>1;100;0c"),
            // DA1 — report as VT220-compatible.
            _ => self.respond(b"\x1b[?62;22c"),
        }
    }

    fn report_mode(&mut self, mode: Mode) {
        // DECRPM response: CSI Ps; Pm $ y (1 = set, 2 = reset, 0 = unknown).
        let (param, state) = match mode {
            Mode::Named(NamedMode::Insert) => {
                (4, if self.mode.contains(TermMode::INSERT) { 1 } else { 2 })
            }
            Mode::Named(NamedMode::LineFeedNewLine) => (
                20,
                if self.mode.contains(TermMode::LINE_FEED_NEW_LINE) { 1 } else { 2 },
            ),
            Mode::Unknown(n) => (n as u32, 0u8),
        };
        let response = format!("\x1b[{param};{state}$y");
        self.respond(response.as_bytes());
    }

    fn report_private_mode(&mut self, mode: PrivateMode) {
        let (param, state) = match mode {
            PrivateMode::Named(named) => {
                let flag = match named {
                    NamedPrivateMode::CursorKeys => (1, TermMode::APP_CURSOR),
                    NamedPrivateMode::Origin => (6, TermMode::ORIGIN),
                    NamedPrivateMode::LineWrap => (7, TermMode::LINE_WRAP),
                    NamedPrivateMode::ShowCursor => (25, TermMode::SHOW_CURSOR),
                    NamedPrivateMode::ReportMouseClicks => (1000, TermMode::MOUSE_REPORT),
                    NamedPrivateMode::ReportCellMouseMotion => (1002, TermMode::MOUSE_MOTION),
                    NamedPrivateMode::ReportAllMouseMotion => (1003, TermMode::MOUSE_ALL),
                    NamedPrivateMode::SgrMouse => (1006, TermMode::SGR_MOUSE),
                    NamedPrivateMode::BracketedPaste => (2004, TermMode::BRACKETED_PASTE),
                    NamedPrivateMode::SwapScreenAndSetRestoreCursor => {
                        (1049, TermMode::ALT_SCREEN)
                    }
                    _ => return,
                };
                (flag.0, if self.mode.contains(flag.1) { 1u8 } else { 2 })
            }
            PrivateMode::Unknown(n) => (n as u32, 0u8),
        };
        let response = format!("\x1b[?{param};{state}$y");
        self.respond(response.as_bytes());
    }

    fn set_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Named(NamedMode::Insert) => self.mode.insert(TermMode::INSERT),
            Mode::Named(NamedMode::LineFeedNewLine) => {
                self.mode.insert(TermMode::LINE_FEED_NEW_LINE);
            }
            Mode::Unknown(_) => {}
        }
    }

    fn unset_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Named(NamedMode::Insert) => self.mode.remove(TermMode::INSERT),
            Mode::Named(NamedMode::LineFeedNewLine) => {
                self.mode.remove(TermMode::LINE_FEED_NEW_LINE);
            }
            Mode::Unknown(_) => {}
        }
    }

    fn set_private_mode(&mut self, mode: PrivateMode) {
        let named = match mode {
            PrivateMode::Named(named) => named,
            PrivateMode::Unknown(_) => return,
        };
        match named {
            NamedPrivateMode::CursorKeys => self.mode.insert(TermMode::APP_CURSOR),
            NamedPrivateMode::Origin => self.mode.insert(TermMode::ORIGIN),
            NamedPrivateMode::LineWrap => {
                self.mode.insert(TermMode::LINE_WRAP);
                self.grid.autowrap = true;
                self.alt_grid.autowrap = true;
            }
            NamedPrivateMode::ShowCursor => self.mode.insert(TermMode::SHOW_CURSOR),
            NamedPrivateMode::ReportMouseClicks => self.mode.insert(TermMode::MOUSE_REPORT),
            NamedPrivateMode::ReportCellMouseMotion => self.mode.insert(TermMode::MOUSE_MOTION),
            NamedPrivateMode::ReportAllMouseMotion => self.mode.insert(TermMode::MOUSE_ALL),
            NamedPrivateMode::SgrMouse => self.mode.insert(TermMode::SGR_MOUSE),
            NamedPrivateMode::BracketedPaste => self.mode.insert(TermMode::BRACKETED_PASTE),
            NamedPrivateMode::SwapScreenAndSetRestoreCursor => self.swap_alt_screen(),
            _ => {}
        }
    }

    fn unset_private_mode(&mut self, mode: PrivateMode) {
        let named = match mode {
            PrivateMode::Named(named) => named,
            PrivateMode::Unknown(_) => return,
        };
        match named {
            NamedPrivateMode::CursorKeys => self.mode.remove(TermMode::APP_CURSOR),
            NamedPrivateMode::Origin => self.mode.remove(TermMode::ORIGIN),
            NamedPrivateMode::LineWrap => {
                self.mode.remove(TermMode::LINE_WRAP);
                self.grid.autowrap = false;
                self.alt_grid.autowrap = false;
            }
            NamedPrivateMode::ShowCursor => self.mode.remove(TermMode::SHOW_CURSOR),
            NamedPrivateMode::ReportMouseClicks => self.mode.remove(TermMode::MOUSE_REPORT),
            NamedPrivateMode::ReportCellMouseMotion => self.mode.remove(TermMode::MOUSE_MOTION),
            NamedPrivateMode::ReportAllMouseMotion => self.mode.remove(TermMode::MOUSE_ALL),
            NamedPrivateMode::SgrMouse => self.mode.remove(TermMode::SGR_MOUSE),
            NamedPrivateMode::BracketedPaste => self.mode.remove(TermMode::BRACKETED_PASTE),
            NamedPrivateMode::SwapScreenAndSetRestoreCursor => self.restore_primary_screen(),
            _ => {}
        }
    }

    fn set_keypad_application_mode(&mut self) {
        self.mode.insert(TermMode::APP_KEYPAD);
    }

    fn unset_keypad_application_mode(&mut self) {
        self.mode.remove(TermMode::APP_KEYPAD);
    }

    fn dynamic_color_sequence(&mut self, prefix: String, index: usize, terminator: &str) {
        // OSC 10/11/12 queries: respond with the current color in
        // XParseColor form (16-bit per channel).
        let color = match index {
            0 => Some(self.palette.default_fg()),
            1 => Some(self.palette.default_bg()),
            2 => Some(self.palette.cursor_color()),
            _ => None,
        };
        if let Some(rgb) = color {
            let response = format!(
                "\x1b]{prefix};rgb:{:04x}/{:04x}/{:04x}{terminator}",
                (rgb.r as u16) << 8 | rgb.r as u16,
                (rgb.g as u16) << 8 | rgb.g as u16,
                (rgb.b as u16) << 8 | rgb.b as u16,
            );
            self.respond(response.as_bytes());
        }
    }

    fn set_color(&mut self, index: usize, color: Rgb) {
        self.palette.set_color(index, color);
    }

    fn reset_color(&mut self, index: usize) {
        self.palette.reset_color(index);
    }

    fn configure_charset(&mut self, index: CharsetIndex, charset: StandardCharset) {
        self.charset.configure(index, charset);
    }

    fn set_active_charset(&mut self, index: CharsetIndex) {
        self.charset.set_active(index);
    }

    fn clipboard_store(&mut self, _clipboard: u8, data: &[u8]) {
        // OSC 52 store: payload is base64-encoded text from the application.
        if let Ok(decoded) = BASE64.decode(data) {
            if let Ok(text) = String::from_utf8(decoded) {
                *self.clipboard = Some(text);
            }
        }
    }

    fn clipboard_load(&mut self, _clipboard: u8, terminator: &str) {
        // OSC 52 query: respond with the stored text, base64-encoded.
        if let Some(text) = self.clipboard.as_deref() {
            let encoded = BASE64.encode(text.as_bytes());
            let response = format!("\x1b]52;c;{encoded}{terminator}");
            self.respond(response.as_bytes());
        }
    }

    fn decaln(&mut self) {
        self.active_grid().decaln();
    }

    fn reset_state(&mut self) {
        self.grid.clear_all();
        self.grid.cursor.reset_attrs();
        self.grid.set_scroll_region(0, None);
        self.grid.reset_display_offset();
        self.grid.autowrap = true;
        self.alt_grid.clear_all();
        self.alt_grid.cursor.reset_attrs();
        self.alt_grid.set_scroll_region(0, None);
        self.alt_grid.autowrap = true;
        *self.active_is_alt = false;
        *self.mode = TermMode::default();
        *self.charset = CharsetState::default();
        self.title_stack.clear();
    }

    fn bell(&mut self) {
        // Audible/visual bells are a presentation concern.
    }

    fn text_area_size_chars(&mut self) {
        let grid = self.active_grid_ref();
        let response = format!("\x1b[8;{};{}t", grid.lines, grid.cols);
        self.respond(response.as_bytes());
    }
}
