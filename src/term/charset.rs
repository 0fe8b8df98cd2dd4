//! Character set translation state (G0–G3).

use vte::ansi::{CharsetIndex, StandardCharset};

/// Charset state: 4 designated slots and an active index.
#[derive(Debug, Clone)]
pub struct CharsetState {
    charsets: [StandardCharset; 4],
    active: CharsetIndex,
}

impl Default for CharsetState {
    fn default() -> Self {
        Self {
            charsets: [StandardCharset::Ascii; 4],
            active: CharsetIndex::G0,
        }
    }
}

impl CharsetState {
    /// Translate a character through the active charset (e.g. DEC Special
    /// Graphics for box drawing).
    pub fn map(&self, c: char) -> char {
        self.charsets[Self::slot(self.active)].map(c)
    }

    /// Designate a charset into a slot (ESC ( / ESC ) and friends).
    pub fn configure(&mut self, index: CharsetIndex, charset: StandardCharset) {
        self.charsets[Self::slot(index)] = charset;
    }

    /// Select the active slot (SO/SI).
    pub fn set_active(&mut self, index: CharsetIndex) {
        self.active = index;
    }

    fn slot(index: CharsetIndex) -> usize {
        match index {
            CharsetIndex::G0 => 0,
            CharsetIndex::G1 => 1,
            CharsetIndex::G2 => 2,
            CharsetIndex::G3 => 3,
        }
    }
}
