//! The ordered set of managed clients for a single workspace.
//!
//! Clients are held in a doubly linked list that lives inside of an arena: each [Client]
//! refers to its neighbours by [ClientIdx] rather than by reference so there is never any
//! aliasing between nodes and removing a client can not leave a dangling link behind.
//! Slots freed by removal are recycled by later insertions.
use crate::Xid;
use std::{fmt, mem::swap};
use tracing::trace;

/// The position of a [Client] inside of the arena of its [ClientRegistry].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIdx(usize);

/// A single managed top level window and its links to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: Xid,
    prev: Option<ClientIdx>,
    next: Option<ClientIdx>,
}

impl Client {
    /// The X window ID of this client.
    pub fn id(&self) -> Xid {
        self.id
    }

    /// The client before this one, if there is one.
    pub fn prev(&self) -> Option<ClientIdx> {
        self.prev
    }

    /// The client after this one, if there is one.
    pub fn next(&self) -> Option<ClientIdx> {
        self.next
    }
}

/// An insertion ordered list of [Client]s with an optional focus point.
///
/// By convention the first client in the registry is the "master" client. Focusing operations
/// never reorder the registry: the only operation that changes the order of existing clients
/// is [ClientRegistry::swap_focused_with_master].
#[derive(Default, Clone)]
pub struct ClientRegistry {
    nodes: Vec<Option<Client>>,
    free: Vec<ClientIdx>,
    head: Option<ClientIdx>,
    tail: Option<ClientIdx>,
    current: Option<ClientIdx>,
    len: usize,
}

// Two registries are equal if they hold the same clients in the same order with the same
// focus, regardless of where those clients sit in their respective arenas.
impl PartialEq for ClientRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.focused() == other.focused() && self.iter().eq(other.iter())
    }
}

impl Eq for ClientRegistry {}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("clients", &self.clients())
            .field("focused", &self.focused())
            .finish()
    }
}

impl ClientRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of clients currently held in this registry.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether or not this registry holds any clients.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The master client: the first client in the registry.
    pub fn head(&self) -> Option<&Xid> {
        self.head.map(|ix| &self.node(ix).id)
    }

    /// The currently focused client.
    pub fn focused(&self) -> Option<&Xid> {
        self.current.map(|ix| &self.node(ix).id)
    }

    /// Look up the arena position of a given client by its ID.
    ///
    /// Clients are unique within a registry so the first match is the only one.
    pub fn find(&self, id: &Xid) -> Option<ClientIdx> {
        let mut cursor = self.head;

        while let Some(ix) = cursor {
            let node = self.node(ix);
            if node.id == *id {
                return Some(ix);
            }
            cursor = node.next;
        }

        None
    }

    /// Look up a [Client] by its arena position.
    pub fn get(&self, ix: ClientIdx) -> Option<&Client> {
        self.nodes.get(ix.0).and_then(|n| n.as_ref())
    }

    /// Whether or not the given client is held in this registry.
    pub fn contains(&self, id: &Xid) -> bool {
        self.find(id).is_some()
    }

    /// Iterate over the clients in this registry from the master client to the last one.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Iterate over the clients in this registry from the last client back to the master.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.tail,
            forward: false,
        }
    }

    /// The client IDs held in this registry in order.
    pub fn clients(&self) -> Vec<Xid> {
        self.iter().copied().collect()
    }

    /// Append a new client to the end of this registry and focus it.
    pub fn add(&mut self, id: Xid) {
        let node = Client {
            id,
            prev: self.tail,
            next: None,
        };

        let ix = match self.free.pop() {
            Some(ix) => {
                self.nodes[ix.0] = Some(node);
                ix
            }
            None => {
                self.nodes.push(Some(node));
                ClientIdx(self.nodes.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(ix),
            None => self.head = Some(ix),
        }

        trace!(%id, "adding client to registry");
        self.tail = Some(ix);
        self.current = Some(ix);
        self.len += 1;
    }

    /// Remove a client from this registry, returning whether or not it was present.
    ///
    /// If the removed client had a predecessor then that becomes the new focus, otherwise its
    /// successor does. Removing the last client in the registry leaves it with no focus.
    pub fn remove(&mut self, id: &Xid) -> bool {
        let ix = match self.find(id) {
            Some(ix) => ix,
            None => return false,
        };

        let Client { prev, next, .. } = match self.nodes[ix.0].take() {
            Some(node) => node,
            None => return false,
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        trace!(%id, "removing client from registry");
        self.current = prev.or(next);
        self.free.push(ix);
        self.len -= 1;

        true
    }

    /// Set focus to the given client, returning whether or not it is held in this registry.
    pub fn focus_client(&mut self, id: &Xid) -> bool {
        match self.find(id) {
            Some(ix) => {
                self.current = Some(ix);
                true
            }
            None => false,
        }
    }

    /// Move focus to the master client.
    pub fn focus_master(&mut self) {
        if self.current.is_some() {
            self.current = self.head;
        }
    }

    /// If the master client is focused, move focus to the first client in the stack.
    pub fn focus_stack(&mut self) {
        if let (Some(cur), Some(head)) = (self.current, self.head) {
            if cur == head {
                if let Some(next) = self.node(head).next {
                    self.current = Some(next);
                }
            }
        }
    }

    /// Move focus to the client before the current one if there is one.
    pub fn focus_up(&mut self) {
        if let Some(cur) = self.current {
            if let Some(prev) = self.node(cur).prev {
                self.current = Some(prev);
            }
        }
    }

    /// Move focus to the client after the current one if there is one.
    pub fn focus_down(&mut self) {
        if let Some(cur) = self.current {
            if let Some(next) = self.node(cur).next {
                self.current = Some(next);
            }
        }
    }

    /// Exchange the focused client with the master client, leaving focus on the master
    /// position.
    ///
    /// The window IDs held by the two positions are swapped: the links between nodes are
    /// untouched. Returns false (and does nothing) if the registry is empty or the master
    /// client already holds focus.
    pub fn swap_focused_with_master(&mut self) -> bool {
        let (cur, head) = match (self.current, self.head) {
            (Some(cur), Some(head)) if cur != head => (cur, head),
            _ => return false,
        };

        let mut id = self.node(cur).id;
        swap(&mut id, &mut self.node_mut(head).id);
        self.node_mut(cur).id = id;
        self.current = Some(head);

        true
    }

    // Links held in the registry always point at occupied slots so a missing node here
    // is a broken invariant rather than a recoverable error.
    #[allow(clippy::expect_used)]
    fn node(&self, ix: ClientIdx) -> &Client {
        self.nodes[ix.0].as_ref().expect("linked node to be occupied")
    }

    #[allow(clippy::expect_used)]
    fn node_mut(&mut self, ix: ClientIdx) -> &mut Client {
        self.nodes[ix.0].as_mut().expect("linked node to be occupied")
    }

    // Walk the list in both directions checking that each link is mirrored by its
    // neighbour and that the focus point (if any) is reachable from the head.
    #[cfg(test)]
    pub(crate) fn is_well_linked(&self) -> bool {
        if let Some(h) = self.head {
            if self.node(h).prev.is_some() {
                return false;
            }
        }
        if let Some(t) = self.tail {
            if self.node(t).next.is_some() {
                return false;
            }
        }

        let mut forward = Vec::new();
        let mut cursor = self.head;
        let mut prev = None;
        while let Some(ix) = cursor {
            let node = match self.get(ix) {
                Some(n) => n,
                None => return false,
            };
            if node.prev != prev || forward.len() > self.nodes.len() {
                return false;
            }
            forward.push(node.id);
            prev = Some(ix);
            cursor = node.next;
        }

        if prev != self.tail || forward.len() != self.len {
            return false;
        }

        let mut backward: Vec<Xid> = self.iter_rev().copied().collect();
        backward.reverse();

        let current_reachable = match self.focused() {
            Some(id) => forward.contains(id),
            None => forward.is_empty(),
        };

        forward == backward && current_reachable
    }
}

/// An iterator over the client IDs held in a [ClientRegistry].
#[derive(Debug)]
pub struct Iter<'a> {
    registry: &'a ClientRegistry,
    cursor: Option<ClientIdx>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Xid;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.registry.get(self.cursor?)?;
        self.cursor = if self.forward { node.next() } else { node.prev() };

        Some(&node.id)
    }
}

impl<'a> IntoIterator for &'a ClientRegistry {
    type Item = &'a Xid;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Xid> for ClientRegistry {
    fn from_iter<I: IntoIterator<Item = Xid>>(iter: I) -> Self {
        let mut r = Self::new();
        for id in iter {
            r.add(id);
        }

        r
    }
}
