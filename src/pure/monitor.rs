//! Physical outputs and their workspaces
use crate::{
    pure::{
        geometry::{Point, Rect},
        ClientRegistry, WorkspaceStore,
    },
    Error, Result, Xid,
};
use tracing::debug;

/// A single physical output along with its status bar and its own independent set of
/// workspaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub(crate) r: Rect,
    pub(crate) bar: Xid,
    pub(crate) store: WorkspaceStore,
    pub(crate) primary: bool,
}

impl Monitor {
    /// Create a new monitor covering `r` with `n_workspaces` empty workspaces.
    pub fn new(r: Rect, bar: Xid, n_workspaces: usize, primary: bool) -> Self {
        Self {
            r,
            bar,
            store: WorkspaceStore::new(n_workspaces),
            primary,
        }
    }

    /// The screen area covered by this monitor.
    pub fn rect(&self) -> Rect {
        self.r
    }

    /// The ID of the status bar window for this monitor.
    pub fn bar(&self) -> Xid {
        self.bar
    }

    /// Whether or not this monitor was reported as the primary output.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// The index of the workspace currently shown on this monitor.
    pub fn active_workspace(&self) -> usize {
        self.store.active()
    }

    /// The workspaces belonging to this monitor.
    pub fn workspaces(&self) -> &WorkspaceStore {
        &self.store
    }

    /// Mutable access to the workspaces belonging to this monitor.
    pub fn workspaces_mut(&mut self) -> &mut WorkspaceStore {
        &mut self.store
    }

    /// The clients on the workspace currently shown on this monitor.
    pub fn clients(&self) -> &ClientRegistry {
        self.store.live()
    }

    /// Mutable access to the clients on the workspace currently shown on this monitor.
    pub fn clients_mut(&mut self) -> &mut ClientRegistry {
        self.store.live_mut()
    }
}

/// The ordered set of [Monitor]s attached to the display, exactly one of which is
/// selected at any given time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSet {
    monitors: Vec<Monitor>,
    selected: usize,
}

impl MonitorSet {
    /// Create a new MonitorSet with the first monitor selected.
    ///
    /// Returns an error if `monitors` is empty.
    pub fn try_new(monitors: Vec<Monitor>) -> Result<Self> {
        if monitors.is_empty() {
            return Err(Error::NoScreens);
        }

        Ok(Self {
            monitors,
            selected: 0,
        })
    }

    /// The number of monitors in this set.
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Always false: there is always at least one monitor.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the monitors in order.
    pub fn iter(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter()
    }

    /// Iterate mutably over the monitors in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Monitor> {
        self.monitors.iter_mut()
    }

    /// The monitor at the given index, if there is one.
    pub fn get(&self, ix: usize) -> Option<&Monitor> {
        self.monitors.get(ix)
    }

    /// Mutable access to the monitor at the given index, if there is one.
    pub fn get_mut(&mut self, ix: usize) -> Option<&mut Monitor> {
        self.monitors.get_mut(ix)
    }

    /// The index of the selected monitor.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected monitor.
    pub fn selected(&self) -> &Monitor {
        &self.monitors[self.selected]
    }

    /// Mutable access to the selected monitor.
    pub fn selected_mut(&mut self) -> &mut Monitor {
        &mut self.monitors[self.selected]
    }

    /// The index of the monitor containing `p`, falling back to the selected monitor if no
    /// monitor contains it.
    pub fn monitor_at(&self, p: Point) -> usize {
        self.monitors
            .iter()
            .position(|m| m.r.contains_point(p))
            .unwrap_or(self.selected)
    }

    /// Select the monitor at the given index, returning true if the selection changed.
    ///
    /// Selecting an unknown index or the monitor that is already selected is a no-op.
    pub fn select(&mut self, ix: usize) -> bool {
        if ix == self.selected || ix >= self.monitors.len() {
            return false;
        }

        debug!(from = self.selected, to = ix, "selecting monitor");
        self.selected = ix;

        true
    }

    /// The index of the monitor after the selected one, wrapping back around to the first
    /// monitor. Returns `None` if there is only a single monitor.
    pub fn next_monitor(&self) -> Option<usize> {
        if self.monitors.len() < 2 {
            None
        } else {
            Some((self.selected + 1) % self.monitors.len())
        }
    }

    /// Locate a managed client, returning the index of its monitor and workspace.
    pub fn locate_client(&self, id: &Xid) -> Option<(usize, usize)> {
        self.monitors
            .iter()
            .enumerate()
            .find_map(|(i, m)| m.store.workspace_for_client(id).map(|ws| (i, ws)))
    }

    /// Whether or not the given client is managed on any workspace of any monitor.
    pub fn contains(&self, id: &Xid) -> bool {
        self.locate_client(id).is_some()
    }

    /// Whether or not the given client is on a workspace that is currently shown.
    pub fn is_visible(&self, id: &Xid) -> bool {
        self.monitors.iter().any(|m| m.clients().contains(id))
    }

    /// Every managed client on every workspace of every monitor.
    pub fn all_clients(&self) -> Vec<Xid> {
        self.monitors
            .iter()
            .flat_map(|m| (0..m.store.len()).filter_map(move |ix| m.store.workspace(ix)))
            .flat_map(|ws| ws.iter().copied())
            .collect()
    }

    /// The index of the monitor owning the given status bar window.
    pub fn monitor_for_bar(&self, bar: Xid) -> Option<usize> {
        self.monitors.iter().position(|m| m.bar == bar)
    }

    /// The status bar windows of all monitors.
    pub fn bars(&self) -> Vec<Xid> {
        self.monitors.iter().map(|m| m.bar).collect()
    }
}
