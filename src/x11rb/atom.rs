use crate::Result;
use std::collections::HashMap;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use x11rb::{connection::Connection, protocol::xproto::ConnectionExt};

/// The X atoms used by the window manager.
#[derive(AsRefStr, EnumIter, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) enum Atom {
    #[strum(serialize = "WM_PROTOCOLS")]
    WmProtocols,
    #[strum(serialize = "WM_DELETE_WINDOW")]
    WmDeleteWindow,
}

#[derive(Debug)]
pub(crate) struct Atoms {
    atoms: HashMap<Atom, u32>,
}

impl Atoms {
    pub(crate) fn new(conn: &impl Connection) -> Result<Self> {
        // First send all requests...
        let atom_requests = Atom::iter()
            .map(|atom| Ok((atom, conn.intern_atom(false, atom.as_ref().as_bytes())?)))
            .collect::<Result<Vec<_>>>()?;
        // ..then get all the replies so that we only need a single round trip
        let atoms = atom_requests
            .into_iter()
            .map(|(atom, cookie)| Ok((atom, cookie.reply()?.atom)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self { atoms })
    }

    // Every variant is interned in `new` so lookups can not miss
    pub(crate) fn known_atom(&self, atom: Atom) -> u32 {
        self.atoms.get(&atom).copied().unwrap_or(x11rb::NONE)
    }
}
