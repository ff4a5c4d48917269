//! A fixed size set of workspaces for a single monitor.
use crate::{pure::ClientRegistry, Xid};
use std::mem::take;
use tracing::{debug, trace};

/// The visibility changes resulting from switching between two workspaces.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkspaceSwitch {
    /// The workspace that was active before the switch
    pub from: usize,
    /// The workspace that is active after the switch
    pub to: usize,
    /// Clients that were visible before the switch and now need hiding, in order
    pub hidden: Vec<Xid>,
    /// Clients that need to be made visible after the switch, in order
    pub revealed: Vec<Xid>,
}

/// A fixed number of independent [ClientRegistry] slots, exactly one of which is active
/// at any given time.
///
/// The active workspace is held in a dedicated "live" registry which is where all client
/// management takes place. Inactive workspaces are frozen in their slot until they are
/// switched to, at which point the live registry is saved into its own slot and the target
/// slot is loaded in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceStore {
    live: ClientRegistry,
    slots: Vec<ClientRegistry>,
    active: usize,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new(1)
    }
}

impl WorkspaceStore {
    /// Create a new store with `n` empty workspaces. Workspace 0 is active.
    ///
    /// There is always at least one workspace.
    pub fn new(n: usize) -> Self {
        Self {
            live: ClientRegistry::new(),
            slots: vec![ClientRegistry::new(); n.max(1)],
            active: 0,
        }
    }

    /// The number of workspaces held in this store.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a store holds at least one workspace.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The index of the active workspace.
    pub fn active(&self) -> usize {
        self.active
    }

    /// The clients of the active workspace.
    pub fn live(&self) -> &ClientRegistry {
        &self.live
    }

    /// Mutable access to the clients of the active workspace.
    pub fn live_mut(&mut self) -> &mut ClientRegistry {
        &mut self.live
    }

    /// The clients of the workspace with the given index, if it exists.
    pub fn workspace(&self, ix: usize) -> Option<&ClientRegistry> {
        if ix == self.active {
            Some(&self.live)
        } else {
            self.slots.get(ix)
        }
    }

    /// The index of the workspace holding the given client, if any.
    pub fn workspace_for_client(&self, id: &Xid) -> Option<usize> {
        (0..self.len()).find(|&ix| self.workspace(ix).is_some_and(|ws| ws.contains(id)))
    }

    /// Whether or not any workspace in this store holds the given client.
    pub fn contains(&self, id: &Xid) -> bool {
        self.workspace_for_client(id).is_some()
    }

    /// Remove the given client from whichever workspace holds it, returning that workspace's
    /// index.
    pub fn remove_client(&mut self, id: &Xid) -> Option<usize> {
        let ix = self.workspace_for_client(id)?;
        if ix == self.active {
            self.live.remove(id);
        } else {
            self.slots[ix].remove(id);
        }

        Some(ix)
    }

    /// Make workspace `ix` the active one.
    ///
    /// Switching to the workspace that is already active, or to one that does not exist,
    /// is a no-op and returns `None`. Otherwise the returned [WorkspaceSwitch] details the
    /// clients that need hiding and revealing in order to match the new state.
    pub fn switch_to(&mut self, ix: usize) -> Option<WorkspaceSwitch> {
        if ix == self.active || ix >= self.len() {
            return None;
        }

        let from = self.active;
        let hidden = self.live.clients();
        self.save();
        self.load(ix);
        debug!(from, to = ix, "switched workspace");

        Some(WorkspaceSwitch {
            from,
            to: ix,
            hidden,
            revealed: self.live.clients(),
        })
    }

    /// Move the focused client of the active workspace to the end of workspace `ix`,
    /// where it becomes the focused client.
    ///
    /// This is a pure data migration: the target workspace is loaded, updated and saved
    /// again without it ever becoming the visible workspace. Returns the ID of the client
    /// that was moved, or `None` if there was no focused client or `ix` is the active
    /// workspace (or does not exist).
    pub fn move_focused_to(&mut self, ix: usize) -> Option<Xid> {
        if ix == self.active || ix >= self.len() {
            return None;
        }
        let id = *self.live.focused()?;
        let original = self.active;

        self.save();
        self.load(ix);
        self.live.add(id);
        self.save();
        self.load(original);
        self.live.remove(&id);
        trace!(%id, from = original, to = ix, "moved client between workspaces");

        Some(id)
    }

    // Freeze the live registry into the slot of the active workspace.
    fn save(&mut self) {
        self.slots[self.active] = take(&mut self.live);
    }

    // Pull the registry for workspace `ix` into the live registry and mark it active.
    fn load(&mut self, ix: usize) {
        self.live = take(&mut self.slots[ix]);
        self.active = ix;
    }
}
