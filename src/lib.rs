//! Core terminal emulation, sessions, and pane management for the Corvid
//! terminal emulator.
//!
//! This crate owns everything between the PTY byte stream and the renderer:
//! escape-sequence processing, the cell grid with scrollback and selection,
//! shell session lifecycles, and the tab/pane split trees. It contains no
//! GUI, rendering, or font code — the renderer consumes read-only snapshots
//! (cells, cursor, selection membership, pane rectangles) and feeds input
//! bytes back through the tab manager.

pub mod cell;
pub mod config;
pub mod grid;
pub mod palette;
pub mod pane;
pub mod pty;
pub mod selection;
pub mod tab;
pub mod tabs;
pub mod term;
pub mod term_mode;

pub use cell::{Cell, CellFlags};
pub use config::Config;
pub use grid::Grid;
pub use palette::Palette;
pub use pane::{Pane, PaneId};
pub use pty::PtySession;
pub use selection::{Selection, SelectionPoint};
pub use tab::{Direction, MAX_PANES_PER_TAB, PaneLayout, Tab};
pub use tabs::{MAX_TABS, TabInfo, TabManager};
pub use term::Term;
pub use term_mode::TermMode;
