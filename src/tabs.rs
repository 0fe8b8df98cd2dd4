//! Tab manager: a bounded list of tabs with active-index tracking.

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::config::Config;
use crate::pane::Pane;
use crate::tab::{Direction, Tab};

/// Upper bound on simultaneously open tabs.
pub const MAX_TABS: usize = 10;

/// Renderer-facing tab summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabInfo {
    pub id: u64,
    pub active: bool,
}

struct ManagerState {
    tabs: Vec<Arc<Tab>>,
    active: usize,
    cols: usize,
    rows: usize,
}

/// Owns every tab. Tabs are numbered 1..N positionally; closing or cleaning
/// up renumbers the survivors.
pub struct TabManager {
    config: Config,
    state: RwLock<ManagerState>,
}

impl TabManager {
    /// Start with a single tab of the given size.
    pub fn new(
        cols: usize,
        rows: usize,
        config: Config,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let first = Arc::new(Tab::new(1, cols, rows, &config.terminal)?);
        Ok(Self {
            config,
            state: RwLock::new(ManagerState {
                tabs: vec![first],
                active: 0,
                cols,
                rows,
            }),
        })
    }

    /// Open a new tab and make it active. At capacity this is a silent
    /// no-op; a PTY spawn failure propagates and leaves the list unchanged.
    pub fn new_tab(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut state = self.state.write();
        if state.tabs.len() >= MAX_TABS {
            debug!("tab limit reached");
            return Ok(());
        }
        let id = state.tabs.len() as u64 + 1;
        let tab = Arc::new(Tab::new(id, state.cols, state.rows, &self.config.terminal)?);
        state.tabs.push(tab);
        state.active = state.tabs.len() - 1;
        Ok(())
    }

    /// Close the active tab. Keeping at least one tab open is the caller's
    /// lifecycle anchor, so closing the last tab is a no-op.
    pub fn close_current_tab(&self) {
        let mut state = self.state.write();
        if state.tabs.len() <= 1 {
            return;
        }
        let active = state.active;
        let closing = state.tabs.remove(active);
        closing.close();
        state.active = state.active.min(state.tabs.len() - 1);
        renumber(&state.tabs);
    }

    pub fn next_tab(&self) {
        let mut state = self.state.write();
        state.active = (state.active + 1) % state.tabs.len();
    }

    pub fn prev_tab(&self) {
        let mut state = self.state.write();
        state.active = (state.active + state.tabs.len() - 1) % state.tabs.len();
    }

    pub fn active_index(&self) -> usize {
        self.state.read().active
    }

    pub fn tab_count(&self) -> usize {
        self.state.read().tabs.len()
    }

    pub fn active_tab(&self) -> Arc<Tab> {
        let state = self.state.read();
        Arc::clone(&state.tabs[state.active])
    }

    pub fn active_pane(&self) -> Arc<Pane> {
        self.active_tab().active_pane()
    }

    /// Route input bytes to the active pane's PTY.
    pub fn send_input(&self, data: &[u8]) {
        self.active_pane().write(data);
    }

    /// Split the active pane of the active tab.
    pub fn split_active(&self, direction: Direction) -> Result<(), Box<dyn std::error::Error>> {
        self.active_tab().split(direction, &self.config.terminal)
    }

    /// Propagate a new cell geometry to every tab.
    pub fn resize_all(&self, cols: usize, rows: usize) {
        let mut state = self.state.write();
        state.cols = cols.max(1);
        state.rows = rows.max(1);
        let (cols, rows) = (state.cols, state.rows);
        for tab in &state.tabs {
            tab.resize(cols, rows);
        }
    }

    /// Drop tabs whose every pane has exited and renumber the rest. When
    /// that would leave nothing, the state is left untouched and the caller
    /// decides shutdown via [`TabManager::all_exited`].
    pub fn cleanup_exited(&self) {
        let mut state = self.state.write();
        let exited: Vec<bool> = state.tabs.iter().map(|tab| tab.all_exited()).collect();
        if exited.iter().all(|&gone| gone) {
            return;
        }
        if !exited.iter().any(|&gone| gone) {
            return;
        }

        let active_tab = Arc::clone(&state.tabs[state.active]);
        let mut kept = Vec::with_capacity(state.tabs.len());
        for (tab, gone) in state.tabs.drain(..).zip(exited) {
            if gone {
                tab.close();
            } else {
                kept.push(tab);
            }
        }
        state.active = kept
            .iter()
            .position(|tab| Arc::ptr_eq(tab, &active_tab))
            .unwrap_or_else(|| state.active.min(kept.len() - 1));
        state.tabs = kept;
        renumber(&state.tabs);
    }

    /// True once every pane of every tab has exited.
    pub fn all_exited(&self) -> bool {
        self.state.read().tabs.iter().all(|tab| tab.all_exited())
    }

    /// Renderer-facing tab summaries in display order.
    pub fn tab_list(&self) -> Vec<TabInfo> {
        let state = self.state.read();
        state
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| TabInfo {
                id: tab.id(),
                active: i == state.active,
            })
            .collect()
    }
}

fn renumber(tabs: &[Arc<Tab>]) {
    for (i, tab) in tabs.iter().enumerate() {
        tab.set_id(i as u64 + 1);
    }
}
