use bitflags::bitflags;

bitflags! {
    /// Terminal mode state driven by SM/RM and DECSET/DECRST.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TermMode: u32 {
        const SHOW_CURSOR        = 1 << 0;
        const APP_CURSOR         = 1 << 1;
        const APP_KEYPAD         = 1 << 2;
        const LINE_WRAP          = 1 << 3;
        const ORIGIN             = 1 << 4;
        const INSERT             = 1 << 5;
        const ALT_SCREEN         = 1 << 6;
        const MOUSE_REPORT       = 1 << 7;
        const MOUSE_MOTION       = 1 << 8;
        const MOUSE_ALL          = 1 << 9;
        const SGR_MOUSE          = 1 << 10;
        const BRACKETED_PASTE    = 1 << 11;
        const LINE_FEED_NEW_LINE = 1 << 12;
    }
}

impl TermMode {
    /// Any of the mouse reporting modes (1000/1002/1003).
    pub const ANY_MOUSE: Self = Self::MOUSE_REPORT
        .union(Self::MOUSE_MOTION)
        .union(Self::MOUSE_ALL);
}

impl Default for TermMode {
    fn default() -> Self {
        Self::LINE_WRAP | Self::SHOW_CURSOR
    }
}
