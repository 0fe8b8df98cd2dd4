//! A tab: one split tree of shell-backed panes.

pub mod tree;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use parking_lot::Mutex;

use crate::config::TerminalConfig;
use crate::pane::{Pane, PaneId};

pub use tree::{Direction, LayoutRect, NodeId, SplitTree};

/// Upper bound on panes in one tab.
pub const MAX_PANES_PER_TAB: usize = 16;

/// A pane's normalized rectangle for the renderer.
#[derive(Clone)]
pub struct PaneLayout {
    pub pane: Arc<Pane>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

struct TabInner {
    tree: SplitTree<Arc<Pane>>,
    cols: usize,
    rows: usize,
}

/// One independent split tree of panes. Tab numbers are positional (1..N)
/// and reassigned by the manager when tabs close.
pub struct Tab {
    id: AtomicU64,
    next_pane_id: AtomicU64,
    inner: Mutex<TabInner>,
}

impl Tab {
    pub fn new(
        id: u64,
        cols: usize,
        rows: usize,
        config: &TerminalConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let tab = Self {
            id: AtomicU64::new(id),
            next_pane_id: AtomicU64::new(1),
            inner: Mutex::new(TabInner {
                tree: SplitTree::new(Arc::new(Pane::spawn(
                    PaneId(0),
                    cols,
                    rows,
                    config,
                )?)),
                cols,
                rows,
            }),
        };
        Ok(tab)
    }

    pub fn id(&self) -> u64 {
        self.id.load(Ordering::Relaxed)
    }

    pub(crate) fn set_id(&self, id: u64) {
        self.id.store(id, Ordering::Relaxed);
    }

    fn alloc_pane_id(&self) -> PaneId {
        PaneId(self.next_pane_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Split the active pane. The new pane becomes active. A full tab is a
    /// silent no-op; a PTY spawn failure propagates with the tree untouched.
    pub fn split(
        &self,
        direction: Direction,
        config: &TerminalConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut inner = self.inner.lock();
        if inner.tree.leaf_count() >= MAX_PANES_PER_TAB {
            debug!("tab {}: pane limit reached", self.id());
            return Ok(());
        }
        // Initial size is provisional; the layout pass below corrects it.
        let pane = Arc::new(Pane::spawn(
            self.alloc_pane_id(),
            (inner.cols / 2).max(1),
            (inner.rows / 2).max(1),
            config,
        )?);
        inner.tree.split_active(direction, pane);
        Self::resize_panes(&mut inner);
        Ok(())
    }

    /// Close the active pane and promote its sibling. Closing the only pane
    /// is a no-op; the tab itself is closed through the manager.
    pub fn close_active_pane(&self) {
        let mut inner = self.inner.lock();
        if let Some(pane) = inner.tree.remove_active() {
            pane.close();
            Self::resize_panes(&mut inner);
        }
    }

    pub fn focus_next(&self) {
        self.inner.lock().tree.focus_next();
    }

    pub fn focus_prev(&self) {
        self.inner.lock().tree.focus_prev();
    }

    pub fn active_pane(&self) -> Arc<Pane> {
        Arc::clone(self.inner.lock().tree.active_payload())
    }

    pub fn panes(&self) -> Vec<Arc<Pane>> {
        let inner = self.inner.lock();
        inner
            .tree
            .leaves()
            .iter()
            .filter_map(|&id| inner.tree.payload(id).cloned())
            .collect()
    }

    pub fn pane_count(&self) -> usize {
        self.inner.lock().tree.leaf_count()
    }

    /// Resize the tab rectangle; every pane gets its share.
    pub fn resize(&self, cols: usize, rows: usize) {
        let mut inner = self.inner.lock();
        inner.cols = cols.max(1);
        inner.rows = rows.max(1);
        Self::resize_panes(&mut inner);
    }

    /// Normalized layout rectangles for the renderer, in in-order.
    pub fn pane_layouts(&self) -> Vec<PaneLayout> {
        let inner = self.inner.lock();
        inner
            .tree
            .layout()
            .into_iter()
            .filter_map(|(id, rect)| {
                inner.tree.payload(id).map(|pane| PaneLayout {
                    pane: Arc::clone(pane),
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                })
            })
            .collect()
    }

    /// True once every pane's shell has exited.
    pub fn all_exited(&self) -> bool {
        self.panes().iter().all(|pane| pane.has_exited())
    }

    /// Close every pane in the tab.
    pub fn close(&self) {
        for pane in self.panes() {
            pane.close();
        }
    }

    /// Re-cut every pane to the integer cell rectangle corresponding to its
    /// normalized layout share, minimum 1x1.
    fn resize_panes(inner: &mut TabInner) {
        let (cols, rows) = (inner.cols, inner.rows);
        for (id, rect) in inner.tree.layout() {
            if let Some(pane) = inner.tree.payload(id) {
                let pane_cols = span_cells(rect.x, rect.width, cols);
                let pane_rows = span_cells(rect.y, rect.height, rows);
                pane.resize(pane_cols, pane_rows);
            }
        }
    }
}

/// Integer cell count for a fractional span, cut on rounded boundaries so
/// adjacent panes tile the tab exactly.
fn span_cells(start: f32, extent: f32, total: usize) -> usize {
    let lo = (start * total as f32).round() as usize;
    let hi = ((start + extent) * total as f32).round() as usize;
    hi.saturating_sub(lo).max(1)
}
