//! Logic for interacting with the X server
use crate::{
    core::{bindings::ModMask, layout::MainAndStack, State},
    pure::geometry::Rect,
    Color, Result, Xid,
};
use tracing::{debug, trace};

pub mod event;
pub mod keysym;

#[cfg(test)]
pub mod mock;

pub use event::{ConfigureRequest, ExposeEvent, PointerChange, StackMode, XEvent};
pub use keysym::KeySym;

/// A physical output as reported by the X server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Output {
    /// The area of the root window covered by this output
    pub r: Rect,
    /// Whether or not this is the primary output
    pub primary: bool,
}

/// Details of how to draw the status bar for a single monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarState {
    /// The number of workspaces to show
    pub n_workspaces: usize,
    /// The workspace currently shown on the monitor
    pub active: usize,
    /// Whether or not the monitor is the selected one
    pub selected: bool,
    /// Foreground color for highlighted cells
    pub fg: Color,
    /// Background color for the bar
    pub bg: Color,
}

/// A handle on a running X11 connection that we can use for issuing X requests.
///
/// XConn is the minimal set of display server primitives that the window manager is built
/// on top of. Everything else (tiling, focus handling, workspace switching) is provided by
/// [XConnExt] in terms of these methods.
pub trait XConn {
    /// The ID of the window manager root window.
    fn root(&self) -> Xid;
    /// Ask the X server for the currently connected outputs.
    fn outputs(&self) -> Result<Vec<Output>>;
    /// The geometry of the default screen, for when no outputs are reported.
    fn root_geometry(&self) -> Result<Rect>;
    /// Ask to receive substructure redirect events for the root window.
    fn select_root_events(&self) -> Result<()>;

    /// Block and wait for the next event from the X server so it can be processed.
    fn next_event(&self) -> Result<XEvent>;
    /// Flush any pending requests to the X server.
    fn flush(&self);

    /// Intercept the given key combination for processing within the window manager.
    fn grab_key(&self, mods: ModMask, sym: KeySym) -> Result<()>;
    /// Release all grabbed key combinations.
    fn ungrab_keys(&self) -> Result<()>;
    /// Look up the keysym for the given key code.
    fn keysym_for_keycode(&self, code: u8) -> Result<Option<KeySym>>;

    /// Create a new override-redirect window covering `r`, returning its ID.
    fn create_overlay_window(&self, r: Rect, bg: Color) -> Result<Xid>;
    /// Destroy a window that was created by the window manager.
    fn destroy_window(&self, id: Xid) -> Result<()>;
    /// Ask the X server for the IDs of all current top level windows.
    fn existing_clients(&self) -> Result<Vec<Xid>>;

    /// Map the given client window to the screen, making it visible.
    fn map(&self, client: Xid) -> Result<()>;
    /// Unmap the given client window from the screen, hiding it.
    fn unmap(&self, client: Xid) -> Result<()>;
    /// Set the position and size of the given client window.
    fn move_resize(&self, client: Xid, r: Rect) -> Result<()>;
    /// Raise the given client window above its siblings.
    fn raise(&self, client: Xid) -> Result<()>;
    /// Set the border width of the given client window in pixels.
    fn set_border_width(&self, client: Xid, px: u32) -> Result<()>;
    /// Set the border color of the given client window.
    fn set_border_color(&self, client: Xid, color: Color) -> Result<()>;
    /// Set X input focus to be held by the given window.
    fn focus(&self, client: Xid) -> Result<()>;
    /// Ask the given client to close itself via WM_DELETE_WINDOW.
    fn send_close_request(&self, client: Xid) -> Result<()>;
    /// Ask to receive enter events when the pointer moves into the given client.
    fn track_pointer_enter(&self, client: Xid) -> Result<()>;
    /// Apply a configure request made by a client exactly as it was asked for.
    fn configure_as_requested(&self, req: &ConfigureRequest) -> Result<()>;

    /// Render the status bar window `bar` covering `r`.
    fn draw_bar(&self, bar: Xid, r: Rect, bar_state: BarState) -> Result<()>;
}

/// Extended functionality for [XConn] impls in order to run the window manager.
pub trait XConnExt: XConn + Sized {
    /// Start managing a new client on the selected monitor's active workspace, making it
    /// visible and focused.
    fn manage(&self, client: Xid, state: &mut State) -> Result<()> {
        trace!(%client, "managing new client");
        state.monitors.selected_mut().clients_mut().add(client);
        self.track_pointer_enter(client)?;
        self.map(client)?;
        self.tile_selected(state)?;
        self.refresh_focus(state)
    }

    /// Stop managing a client that has been destroyed.
    ///
    /// If the client was visible then its monitor is re-tiled, otherwise it is simply
    /// dropped from the hidden workspace that held it.
    fn unmanage(&self, client: Xid, state: &mut State) -> Result<()> {
        let (m, ws) = match state.monitors.locate_client(&client) {
            Some(loc) => loc,
            None => return Ok(()),
        };

        trace!(%client, monitor = m, workspace = ws, "removing client");
        let was_visible = match state.monitors.get_mut(m) {
            Some(mon) => {
                let visible = mon.active_workspace() == ws;
                mon.workspaces_mut().remove_client(&client);
                visible
            }
            None => false,
        };

        if was_visible {
            self.tile_monitor(state, m)?;
            self.refresh_focus(state)?;
        }

        Ok(())
    }

    /// Position the clients on the active workspace of the given monitor.
    fn tile_monitor(&self, state: &State, ix: usize) -> Result<()> {
        let m = match state.monitors.get(ix) {
            Some(m) => m,
            None => return Ok(()),
        };

        let layout = MainAndStack::from_config(&state.config);
        for (client, r) in layout.layout(m.clients(), m.rect()) {
            trace!(%client, ?r, "positioning client");
            self.move_resize(client, r)?;
        }

        Ok(())
    }

    /// Position the clients on the active workspace of the selected monitor.
    fn tile_selected(&self, state: &State) -> Result<()> {
        self.tile_monitor(state, state.monitors.selected_index())
    }

    /// Update the borders, stacking and input focus of the clients on the selected monitor
    /// to reflect the currently focused client.
    fn refresh_focus(&self, state: &State) -> Result<()> {
        let clients = state.monitors.selected().clients();
        let focused = clients.focused().copied();

        for &c in clients.iter() {
            if Some(c) == focused {
                self.set_border_width(c, state.config.border_width)?;
                self.set_border_color(c, state.config.focused_border)?;
                self.focus(c)?;
                self.raise(c)?;
            } else {
                self.set_border_color(c, state.config.normal_border)?;
            }
        }

        if focused.is_none() {
            self.focus(state.root)?;
        }

        Ok(())
    }

    /// Re-tile the selected monitor and refresh focus.
    fn refresh(&self, state: &State) -> Result<()> {
        self.tile_selected(state)?;
        self.refresh_focus(state)
    }

    /// Render the status bar for the monitor at the given index.
    fn redraw_bar(&self, state: &State, ix: usize) -> Result<()> {
        let m = match state.monitors.get(ix) {
            Some(m) => m,
            None => return Ok(()),
        };

        let bar_state = BarState {
            n_workspaces: m.workspaces().len(),
            active: m.active_workspace(),
            selected: ix == state.monitors.selected_index(),
            fg: state.config.focused_border,
            bg: state.config.normal_border,
        };

        self.draw_bar(m.bar(), m.rect().top_strip(state.config.bar_height), bar_state)
    }

    /// Switch the selected monitor to the given workspace, hiding the clients of the
    /// workspace being left and revealing those of the new one.
    ///
    /// Switching to the workspace that is already shown is a no-op.
    fn switch_workspace(&self, ix: usize, state: &mut State) -> Result<()> {
        let switch = match state.monitors.selected_mut().workspaces_mut().switch_to(ix) {
            Some(s) => s,
            None => return Ok(()),
        };

        debug!(from = switch.from, to = switch.to, "changing workspace");
        for &c in switch.hidden.iter() {
            self.unmap(c)?;
        }
        for &c in switch.revealed.iter() {
            self.map(c)?;
        }

        self.refresh(state)?;
        self.redraw_bar(state, state.monitors.selected_index())
    }

    /// Move the focused client of the selected monitor to another of its workspaces
    /// without changing which workspace is shown.
    fn move_focused_to_workspace(&self, ix: usize, state: &mut State) -> Result<()> {
        let moved = state
            .monitors
            .selected_mut()
            .workspaces_mut()
            .move_focused_to(ix);

        match moved {
            Some(client) => {
                debug!(%client, workspace = ix, "moving client to workspace");
                self.unmap(client)?;
                self.refresh(state)
            }
            None => Ok(()),
        }
    }

    /// Select a different monitor, refreshing focus and redrawing its bar.
    ///
    /// The workspaces of every monitor are left untouched.
    fn select_monitor(&self, ix: usize, state: &mut State) -> Result<()> {
        let previous = state.monitors.selected_index();
        if !state.monitors.select(ix) {
            return Ok(());
        }

        if let Some(&c) = state.monitors.get(previous).and_then(|m| m.clients().focused()) {
            self.set_border_color(c, state.config.normal_border)?;
        }

        self.refresh_focus(state)?;
        self.redraw_bar(state, previous)?;
        self.redraw_bar(state, ix)
    }
}

// Auto impl XConnExt for all XConn impls
impl<T> XConnExt for T where T: XConn {}
