//! An [XConn] implementation backed by the pure Rust [x11rb](https://crates.io/crates/x11rb)
//! crate.
use crate::{
    core::bindings::ModMask,
    pure::geometry::Rect,
    x::{BarState, ConfigureRequest, KeySym, Output, XConn, XEvent},
    Color, Error, Result, Xid,
};
use tracing::{debug, warn};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        randr::{self, ConnectionExt as _},
        xproto::{
            self, ChangeGCAux, ChangeWindowAttributesAux, ClientMessageEvent, ConfigureWindowAux,
            ConnectionExt as _, CreateGCAux, CreateWindowAux, EventMask, Gcontext, GrabMode,
            InputFocus, MapState, Rectangle, WindowClass,
        },
    },
    rust_connection::RustConnection,
    CURRENT_TIME,
};

mod atom;
mod event;

use atom::{Atom, Atoms};
use event::{convert_event, x_stack_mode};

// Grab each binding with every combination of the lock modifiers held
const LOCK_COMBINATIONS: [ModMask; 4] = [
    ModMask::empty(),
    ModMask::LOCK,
    ModMask::MOD2,
    ModMask::LOCKS,
];

#[derive(Debug)]
struct KeyboardMap {
    min_keycode: u8,
    per_keycode: usize,
    keysyms: Vec<KeySym>,
}

impl KeyboardMap {
    fn new(conn: &impl Connection) -> Result<Self> {
        let setup = conn.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let mapping = conn.get_keyboard_mapping(min, max - min + 1)?.reply()?;

        Ok(Self {
            min_keycode: min,
            per_keycode: (mapping.keysyms_per_keycode as usize).max(1),
            keysyms: mapping.keysyms,
        })
    }

    fn keysym(&self, code: u8) -> Option<KeySym> {
        let ix = (code.checked_sub(self.min_keycode)? as usize) * self.per_keycode;

        self.keysyms.get(ix).copied().filter(|&sym| sym != 0)
    }

    fn keycode(&self, sym: KeySym) -> Option<u8> {
        self.keysyms
            .chunks(self.per_keycode)
            .position(|syms| syms.contains(&sym))
            .and_then(|i| u8::try_from(i).ok())
            .and_then(|i| self.min_keycode.checked_add(i))
    }
}

/// A connection to the X server using the x11rb crate.
#[derive(Debug)]
pub struct X11rbConn<C: Connection> {
    conn: C,
    root: Xid,
    screen_rect: Rect,
    atoms: Atoms,
    keymap: KeyboardMap,
    gc: Gcontext,
}

impl X11rbConn<RustConnection> {
    /// Connect to the X server named by the DISPLAY environment variable.
    pub fn new() -> Result<Self> {
        let (conn, _) = RustConnection::connect(None)?;

        Self::new_for_connection(conn)
    }
}

impl<C: Connection> X11rbConn<C> {
    /// Wrap an existing x11rb connection.
    pub fn new_for_connection(conn: C) -> Result<Self> {
        let screen = conn.setup().roots.first().ok_or(Error::NoScreens)?;
        let root = screen.root;
        let screen_rect = Rect::new(
            0,
            0,
            screen.width_in_pixels as u32,
            screen.height_in_pixels as u32,
        );

        let atoms = Atoms::new(&conn)?;
        let keymap = KeyboardMap::new(&conn)?;
        let gc = conn.generate_id()?;
        conn.create_gc(gc, root, &CreateGCAux::new())?;

        Ok(Self {
            conn,
            root: Xid(root),
            screen_rect,
            atoms,
            keymap,
            gc,
        })
    }

    /// The underlying x11rb connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    fn fill(&self, win: Xid, color: Color, r: Rectangle) -> Result<()> {
        self.conn
            .change_gc(self.gc, &ChangeGCAux::new().foreground(color.rgb_u32()))?;
        self.conn.poly_fill_rectangle(*win, self.gc, &[r])?;

        Ok(())
    }
}

impl<C: Connection> XConn for X11rbConn<C> {
    fn root(&self) -> Xid {
        self.root
    }

    fn outputs(&self) -> Result<Vec<Output>> {
        if self
            .conn
            .extension_information(randr::X11_EXTENSION_NAME)?
            .is_none()
        {
            return Err(Error::MissingRandRSupport);
        }

        let resources = self.conn.randr_get_screen_resources(*self.root)?.reply()?;
        // Send queries for all CRTCs before waiting on any replies
        let cookies = resources
            .crtcs
            .iter()
            .map(|&c| self.conn.randr_get_crtc_info(c, 0))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut outputs = Vec::new();
        for cookie in cookies {
            let reply = cookie.reply()?;
            if reply.width == 0 || reply.height == 0 {
                continue;
            }

            outputs.push(Output {
                r: Rect::new(
                    reply.x.max(0) as u32,
                    reply.y.max(0) as u32,
                    reply.width as u32,
                    reply.height as u32,
                ),
                primary: outputs.is_empty(),
            });
        }

        Ok(outputs)
    }

    fn root_geometry(&self) -> Result<Rect> {
        Ok(self.screen_rect)
    }

    fn select_root_events(&self) -> Result<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::ENTER_WINDOW
            | EventMask::STRUCTURE_NOTIFY;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        // Fails if another window manager is already running
        self.conn.change_window_attributes(*self.root, &aux)?.check()?;

        Ok(())
    }

    fn next_event(&self) -> Result<XEvent> {
        loop {
            let event = self.conn.wait_for_event()?;
            if let Some(event) = convert_event(&self.conn, event)? {
                return Ok(event);
            }
        }
    }

    fn flush(&self) {
        if let Err(e) = self.conn.flush() {
            warn!(%e, "unable to flush X connection");
        }
    }

    fn grab_key(&self, mods: ModMask, sym: KeySym) -> Result<()> {
        let code = match self.keymap.keycode(sym) {
            Some(code) => code,
            None => {
                warn!(sym, "no key code for keysym: skipping grab");
                return Ok(());
            }
        };

        for extra in LOCK_COMBINATIONS {
            self.conn.grab_key(
                true,
                *self.root,
                xproto::ModMask::from((mods | extra).bits()),
                code,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
            )?;
        }

        Ok(())
    }

    fn ungrab_keys(&self) -> Result<()> {
        self.conn
            .ungrab_key(xproto::Grab::ANY, *self.root, xproto::ModMask::ANY)?;

        Ok(())
    }

    fn keysym_for_keycode(&self, code: u8) -> Result<Option<KeySym>> {
        Ok(self.keymap.keysym(code))
    }

    fn create_overlay_window(&self, r: Rect, bg: Color) -> Result<Xid> {
        let id = self.conn.generate_id()?;
        let (x, y, w, h) = r.values();
        let aux = CreateWindowAux::new()
            .override_redirect(1)
            .background_pixel(bg.rgb_u32())
            .event_mask(EventMask::EXPOSURE);

        self.conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            id,
            *self.root,
            x as i16,
            y as i16,
            w.max(1) as u16,
            h.max(1) as u16,
            0, // border width
            WindowClass::INPUT_OUTPUT,
            x11rb::COPY_FROM_PARENT,
            &aux,
        )?;
        self.conn.map_window(id)?;
        debug!(id, ?r, "created overlay window");

        Ok(Xid(id))
    }

    fn destroy_window(&self, id: Xid) -> Result<()> {
        self.conn.destroy_window(*id)?;

        Ok(())
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        let tree = self.conn.query_tree(*self.root)?.reply()?;
        let cookies = tree
            .children
            .iter()
            .map(|&id| Ok((id, self.conn.get_window_attributes(id)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut clients = Vec::new();
        for (id, cookie) in cookies {
            // Windows can be destroyed between listing and querying them
            let attrs = match cookie.reply() {
                Ok(attrs) => attrs,
                Err(_) => continue,
            };

            if !attrs.override_redirect && attrs.map_state == MapState::VIEWABLE {
                clients.push(Xid(id));
            }
        }

        Ok(clients)
    }

    fn map(&self, client: Xid) -> Result<()> {
        self.conn.map_window(*client)?;

        Ok(())
    }

    fn unmap(&self, client: Xid) -> Result<()> {
        self.conn.unmap_window(*client)?;

        Ok(())
    }

    fn move_resize(&self, client: Xid, r: Rect) -> Result<()> {
        let (x, y, w, h) = r.values();
        let aux = ConfigureWindowAux::new()
            .x(x as i32)
            .y(y as i32)
            .width(w.max(1))
            .height(h.max(1));
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn raise(&self, client: Xid) -> Result<()> {
        let aux = ConfigureWindowAux::new().stack_mode(xproto::StackMode::ABOVE);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        let aux = ConfigureWindowAux::new().border_width(px);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        let aux = ChangeWindowAttributesAux::new().border_pixel(color.rgb_u32());
        self.conn.change_window_attributes(*client, &aux)?;

        Ok(())
    }

    fn focus(&self, client: Xid) -> Result<()> {
        self.conn
            .set_input_focus(InputFocus::PARENT, *client, CURRENT_TIME)?;

        Ok(())
    }

    fn send_close_request(&self, client: Xid) -> Result<()> {
        let event = ClientMessageEvent::new(
            32,
            *client,
            self.atoms.known_atom(Atom::WmProtocols),
            [self.atoms.known_atom(Atom::WmDeleteWindow), CURRENT_TIME, 0, 0, 0],
        );
        self.conn
            .send_event(false, *client, EventMask::NO_EVENT, event)?;

        Ok(())
    }

    fn track_pointer_enter(&self, client: Xid) -> Result<()> {
        let mask = EventMask::ENTER_WINDOW | EventMask::STRUCTURE_NOTIFY;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        self.conn.change_window_attributes(*client, &aux)?;

        Ok(())
    }

    fn configure_as_requested(&self, req: &ConfigureRequest) -> Result<()> {
        let aux = ConfigureWindowAux::new()
            .x(req.x)
            .y(req.y)
            .width(req.w)
            .height(req.h)
            .border_width(req.border_width)
            .sibling(req.sibling.map(|s| *s))
            .stack_mode(req.stack_mode.map(x_stack_mode));
        self.conn.configure_window(*req.id, &aux)?;

        Ok(())
    }

    fn draw_bar(&self, bar: Xid, r: Rect, s: BarState) -> Result<()> {
        let (w, h) = (r.w as u16, r.h as u16);
        self.fill(bar, s.bg, Rectangle { x: 0, y: 0, width: w, height: h })?;

        // One square cell per workspace, the active one highlighted
        let cell = h;
        for ix in 0..s.n_workspaces {
            let x = (ix as u16).saturating_mul(cell) as i16;
            if ix == s.active {
                let inset = if s.selected { 2 } else { h / 3 };
                let r = Rectangle {
                    x: x + inset as i16,
                    y: inset as i16,
                    width: cell.saturating_sub(2 * inset),
                    height: h.saturating_sub(2 * inset),
                };
                self.fill(bar, s.fg, r)?;
            }
        }

        Ok(())
    }
}
