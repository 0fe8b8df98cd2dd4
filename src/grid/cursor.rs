//! Terminal cursor state and attribute template.

use vte::ansi::{Color, NamedColor};

use crate::cell::{Cell, CellFlags};

/// Terminal cursor position and attribute template for newly written cells.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    /// Column position (0-based)
    pub col: usize,
    /// Row position (0-based)
    pub row: usize,
    /// Attribute template for new cells
    pub template: Cell,
    /// Wraparound pending flag: set after writing the last column, consumed
    /// by the next write.
    pub input_needs_wrap: bool,
}

impl Cursor {
    /// Resets the cursor's attribute template to default colors and flags.
    pub fn reset_attrs(&mut self) {
        self.template.fg = Color::Named(NamedColor::Foreground);
        self.template.bg = Color::Named(NamedColor::Background);
        self.template.flags = CellFlags::empty();
        self.template.extra = None;
    }
}
