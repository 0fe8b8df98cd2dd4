//! Color palette management — 270-entry RGB table addressed by SGR indices
//! and semantic color names.

use vte::ansi::{Color, NamedColor, Rgb};

use crate::cell::CellFlags;

pub const NUM_COLORS: usize = 270;

/// Built-in ANSI colors 0-15 (xterm defaults).
const DEFAULT_ANSI: [Rgb; 16] = [
    Rgb { r: 0x00, g: 0x00, b: 0x00 },
    Rgb { r: 0xcd, g: 0x00, b: 0x00 },
    Rgb { r: 0x00, g: 0xcd, b: 0x00 },
    Rgb { r: 0xcd, g: 0xcd, b: 0x00 },
    Rgb { r: 0x00, g: 0x00, b: 0xee },
    Rgb { r: 0xcd, g: 0x00, b: 0xcd },
    Rgb { r: 0x00, g: 0xcd, b: 0xcd },
    Rgb { r: 0xe5, g: 0xe5, b: 0xe5 },
    Rgb { r: 0x7f, g: 0x7f, b: 0x7f },
    Rgb { r: 0xff, g: 0x00, b: 0x00 },
    Rgb { r: 0x00, g: 0xff, b: 0x00 },
    Rgb { r: 0xff, g: 0xff, b: 0x00 },
    Rgb { r: 0x5c, g: 0x5c, b: 0xff },
    Rgb { r: 0xff, g: 0x00, b: 0xff },
    Rgb { r: 0x00, g: 0xff, b: 0xff },
    Rgb { r: 0xff, g: 0xff, b: 0xff },
];

const DEFAULT_FG: Rgb = Rgb { r: 0xe5, g: 0xe5, b: 0xe5 };
const DEFAULT_BG: Rgb = Rgb { r: 0x12, g: 0x12, b: 0x12 };
const DEFAULT_CURSOR: Rgb = Rgb { r: 0xe5, g: 0xe5, b: 0xe5 };

#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Rgb; NUM_COLORS],
    defaults: [Rgb; NUM_COLORS],
    pub bold_is_bright: bool,
}

impl Palette {
    pub fn new() -> Self {
        let mut colors = [Rgb { r: 0, g: 0, b: 0 }; NUM_COLORS];

        // 0-15: ANSI colors
        colors[..16].copy_from_slice(&DEFAULT_ANSI);

        // 16-231: 6x6x6 color cube
        for r in 0..6u8 {
            for g in 0..6u8 {
                for b in 0..6u8 {
                    let idx = 16 + (r as usize * 36) + (g as usize * 6) + b as usize;
                    colors[idx] = Rgb {
                        r: if r == 0 { 0 } else { 55 + r * 40 },
                        g: if g == 0 { 0 } else { 55 + g * 40 },
                        b: if b == 0 { 0 } else { 55 + b * 40 },
                    };
                }
            }
        }

        // 232-255: grayscale ramp
        for i in 0..24u8 {
            let v = 8 + i * 10;
            colors[232 + i as usize] = Rgb { r: v, g: v, b: v };
        }

        // 256+: semantic colors
        colors[NamedColor::Foreground as usize] = DEFAULT_FG;
        colors[NamedColor::Background as usize] = DEFAULT_BG;
        colors[NamedColor::Cursor as usize] = DEFAULT_CURSOR;

        // Dim variants of ANSI 0-7
        for i in 0..8 {
            colors[NamedColor::DimBlack as usize + i] = dim_color(colors[i]);
        }

        colors[NamedColor::BrightForeground as usize] = DEFAULT_FG;
        colors[NamedColor::DimForeground as usize] = dim_color(DEFAULT_FG);

        Self {
            colors,
            defaults: colors,
            bold_is_bright: true,
        }
    }

    /// Resolve a cell color to concrete RGB.
    pub fn resolve(&self, color: Color, flags: CellFlags) -> Rgb {
        match color {
            Color::Spec(rgb) => rgb,
            Color::Indexed(idx) => self.colors[idx as usize],
            Color::Named(name) => {
                let idx = name as usize;
                if idx < NUM_COLORS {
                    // Bold-as-bright: for standard colors 0-7, promote to 8-15
                    if self.bold_is_bright && flags.contains(CellFlags::BOLD) && idx < 8 {
                        self.colors[idx + 8]
                    } else {
                        self.colors[idx]
                    }
                } else {
                    self.colors[NamedColor::Foreground as usize]
                }
            }
        }
    }

    pub fn default_fg(&self) -> Rgb {
        self.colors[NamedColor::Foreground as usize]
    }

    pub fn default_bg(&self) -> Rgb {
        self.colors[NamedColor::Background as usize]
    }

    pub fn cursor_color(&self) -> Rgb {
        self.colors[NamedColor::Cursor as usize]
    }

    /// Set a palette entry (OSC 4 and the dynamic-color OSCs).
    pub fn set_color(&mut self, idx: usize, rgb: Rgb) {
        if idx < NUM_COLORS {
            self.colors[idx] = rgb;
        }
    }

    /// Restore a palette entry to its built-in value (OSC 104).
    pub fn reset_color(&mut self, idx: usize) {
        if idx < NUM_COLORS {
            self.colors[idx] = self.defaults[idx];
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

fn dim_color(c: Rgb) -> Rgb {
    Rgb {
        r: (c.r as u16 * 2 / 3) as u8,
        g: (c.g as u16 * 2 / 3) as u8,
        b: (c.b as u16 * 2 / 3) as u8,
    }
}
