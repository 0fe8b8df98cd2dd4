//! Terminal grid cell representation with attributes and flags.

use std::sync::Arc;

use bitflags::bitflags;
use vte::ansi::{Color, NamedColor};

bitflags! {
    /// Bitflags for cell text attributes and layout hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u16 {
        const BOLD                     = 0b0000_0000_0001;
        const DIM                      = 0b0000_0000_0010;
        const ITALIC                   = 0b0000_0000_0100;
        const UNDERLINE                = 0b0000_0000_1000;
        const INVERSE                  = 0b0000_0001_0000;
        const HIDDEN                   = 0b0000_0010_0000;
        const STRIKEOUT                = 0b0000_0100_0000;
        const WIDE_CHAR                = 0b0000_1000_0000;
        const WIDE_CHAR_SPACER         = 0b0001_0000_0000;
        const WRAPLINE                 = 0b0010_0000_0000;
        const LEADING_WIDE_CHAR_SPACER = 0b0100_0000_0000;
    }
}

impl CellFlags {
    /// Flags describing character layout rather than text style. These are
    /// owned by the write path and never copied from the cursor template.
    pub const LAYOUT: Self = Self::WIDE_CHAR
        .union(Self::WIDE_CHAR_SPACER)
        .union(Self::WRAPLINE)
        .union(Self::LEADING_WIDE_CHAR_SPACER);
}

/// Extended cell data stored out-of-line (zero-width combining marks).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellExtra {
    pub zerowidth: Vec<char>,
}

/// A single grid cell with character, colors, and attributes.
#[derive(Debug, Clone)]
pub struct Cell {
    pub c: char,
    pub fg: Color,
    pub bg: Color,
    pub flags: CellFlags,
    pub extra: Option<Arc<CellExtra>>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            fg: Color::Named(NamedColor::Foreground),
            bg: Color::Named(NamedColor::Background),
            flags: CellFlags::empty(),
            extra: None,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c && self.fg == other.fg && self.bg == other.bg && self.flags == other.flags
    }
}

impl Cell {
    /// Returns the zero-width combining characters for this cell.
    pub fn zerowidth(&self) -> &[char] {
        match &self.extra {
            Some(extra) => &extra.zerowidth,
            None => &[],
        }
    }

    /// Resets this cell to match the template, dropping character layout flags.
    pub fn reset(&mut self, template: &Self) {
        self.c = template.c;
        self.fg = template.fg;
        self.bg = template.bg;
        self.flags = template.flags & !CellFlags::LAYOUT;
        self.extra = None;
    }

    /// Adds a zero-width combining character to this cell.
    pub fn push_zerowidth(&mut self, c: char) {
        let extra = self
            .extra
            .get_or_insert_with(|| Arc::new(CellExtra::default()));
        Arc::make_mut(extra).zerowidth.push(c);
    }

    /// True when this cell renders as blank space.
    pub fn is_blank(&self) -> bool {
        (self.c == ' ' || self.c == '\0') && !self.flags.intersects(CellFlags::LAYOUT)
    }
}
