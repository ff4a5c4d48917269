//! A mock implementation of XConn that is easier to implement for
//! use in tests.
//! This module and its contents are only available when testing.
use crate::{
    core::bindings::ModMask,
    pure::geometry::Rect,
    x::{BarState, ConfigureRequest, KeySym, Output, XConn, XEvent},
    Color, Error, Result, Xid,
};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
};

/// All methods on this trait that return a Result unimplemented by
/// default unless an implementation is provided.
/// The `mock_root` method always returns id 0 and `mock_flush` by default is a no-op.
///
/// Any implementation of `MockXConn` will automatically implement `XConn` by forwarding on
/// calls to `$method` to `mock_$method`.
#[allow(unused_variables)]
pub trait MockXConn {
    fn mock_root(&self) -> Xid {
        Xid(0)
    }

    fn mock_outputs(&self) -> Result<Vec<Output>> {
        unimplemented!("mock_outputs")
    }

    fn mock_root_geometry(&self) -> Result<Rect> {
        unimplemented!("mock_root_geometry")
    }

    fn mock_select_root_events(&self) -> Result<()> {
        unimplemented!("mock_select_root_events")
    }

    fn mock_next_event(&self) -> Result<XEvent> {
        unimplemented!("mock_next_event")
    }

    fn mock_flush(&self) {}

    fn mock_grab_key(&self, mods: ModMask, sym: KeySym) -> Result<()> {
        unimplemented!("mock_grab_key")
    }

    fn mock_ungrab_keys(&self) -> Result<()> {
        unimplemented!("mock_ungrab_keys")
    }

    fn mock_keysym_for_keycode(&self, code: u8) -> Result<Option<KeySym>> {
        unimplemented!("mock_keysym_for_keycode")
    }

    fn mock_create_overlay_window(&self, r: Rect, bg: Color) -> Result<Xid> {
        unimplemented!("mock_create_overlay_window")
    }

    fn mock_destroy_window(&self, id: Xid) -> Result<()> {
        unimplemented!("mock_destroy_window")
    }

    fn mock_existing_clients(&self) -> Result<Vec<Xid>> {
        unimplemented!("mock_existing_clients")
    }

    fn mock_map(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_map")
    }

    fn mock_unmap(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_unmap")
    }

    fn mock_move_resize(&self, client: Xid, r: Rect) -> Result<()> {
        unimplemented!("mock_move_resize")
    }

    fn mock_raise(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_raise")
    }

    fn mock_set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        unimplemented!("mock_set_border_width")
    }

    fn mock_set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        unimplemented!("mock_set_border_color")
    }

    fn mock_focus(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_focus")
    }

    fn mock_send_close_request(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_send_close_request")
    }

    fn mock_track_pointer_enter(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_track_pointer_enter")
    }

    fn mock_configure_as_requested(&self, req: &ConfigureRequest) -> Result<()> {
        unimplemented!("mock_configure_as_requested")
    }

    fn mock_draw_bar(&self, bar: Xid, r: Rect, bar_state: BarState) -> Result<()> {
        unimplemented!("mock_draw_bar")
    }
}

impl<T> XConn for T
where
    T: MockXConn,
{
    fn root(&self) -> Xid {
        self.mock_root()
    }

    fn outputs(&self) -> Result<Vec<Output>> {
        self.mock_outputs()
    }

    fn root_geometry(&self) -> Result<Rect> {
        self.mock_root_geometry()
    }

    fn select_root_events(&self) -> Result<()> {
        self.mock_select_root_events()
    }

    fn next_event(&self) -> Result<XEvent> {
        self.mock_next_event()
    }

    fn flush(&self) {
        self.mock_flush()
    }

    fn grab_key(&self, mods: ModMask, sym: KeySym) -> Result<()> {
        self.mock_grab_key(mods, sym)
    }

    fn ungrab_keys(&self) -> Result<()> {
        self.mock_ungrab_keys()
    }

    fn keysym_for_keycode(&self, code: u8) -> Result<Option<KeySym>> {
        self.mock_keysym_for_keycode(code)
    }

    fn create_overlay_window(&self, r: Rect, bg: Color) -> Result<Xid> {
        self.mock_create_overlay_window(r, bg)
    }

    fn destroy_window(&self, id: Xid) -> Result<()> {
        self.mock_destroy_window(id)
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        self.mock_existing_clients()
    }

    fn map(&self, client: Xid) -> Result<()> {
        self.mock_map(client)
    }

    fn unmap(&self, client: Xid) -> Result<()> {
        self.mock_unmap(client)
    }

    fn move_resize(&self, client: Xid, r: Rect) -> Result<()> {
        self.mock_move_resize(client, r)
    }

    fn raise(&self, client: Xid) -> Result<()> {
        self.mock_raise(client)
    }

    fn set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        self.mock_set_border_width(client, px)
    }

    fn set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        self.mock_set_border_color(client, color)
    }

    fn focus(&self, client: Xid) -> Result<()> {
        self.mock_focus(client)
    }

    fn send_close_request(&self, client: Xid) -> Result<()> {
        self.mock_send_close_request(client)
    }

    fn track_pointer_enter(&self, client: Xid) -> Result<()> {
        self.mock_track_pointer_enter(client)
    }

    fn configure_as_requested(&self, req: &ConfigureRequest) -> Result<()> {
        self.mock_configure_as_requested(req)
    }

    fn draw_bar(&self, bar: Xid, r: Rect, bar_state: BarState) -> Result<()> {
        self.mock_draw_bar(bar, r, bar_state)
    }
}

/// A single request made against a [RecordingXConn].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateOverlay(Xid, Rect),
    Destroy(Xid),
    Map(Xid),
    Unmap(Xid),
    MoveResize(Xid, Rect),
    Raise(Xid),
    BorderWidth(Xid, u32),
    BorderColor(Xid, Color),
    Focus(Xid),
    CloseRequest(Xid),
    TrackEnter(Xid),
    Configure(ConfigureRequest),
    GrabKey(ModMask, KeySym),
    UngrabKeys,
    SelectRootEvents,
    DrawBar(Xid, BarState),
}

/// An in-memory display server that records every request made against it.
///
/// Top level windows are tracked so that they can be enumerated: managed clients are
/// added via [RecordingXConn::open_window] and removed again via
/// [RecordingXConn::close_window]. Windows created by the window manager itself are
/// included in the enumeration until they are destroyed, the same as on a real X server.
///
/// Events queued in `events` are handed out by `next_event`, opening the window for a map
/// request and closing it for a destroy notification. Requests made against any window in
/// `bad_windows` fail the way they would for a window the server no longer knows about.
#[derive(Debug)]
pub struct RecordingXConn {
    pub outputs: Vec<Output>,
    pub root_rect: Rect,
    pub keysyms: HashMap<u8, KeySym>,
    pub calls: RefCell<Vec<Call>>,
    pub children: RefCell<Vec<Xid>>,
    pub events: RefCell<VecDeque<XEvent>>,
    pub bad_windows: RefCell<Vec<Xid>>,
    next_id: Cell<u32>,
}

impl Default for RecordingXConn {
    fn default() -> Self {
        Self::new(vec![Output {
            r: Rect::new(0, 0, 1000, 600),
            primary: true,
        }])
    }
}

impl RecordingXConn {
    pub fn new(outputs: Vec<Output>) -> Self {
        Self {
            outputs,
            root_rect: Rect::new(0, 0, 1000, 600),
            keysyms: HashMap::new(),
            calls: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            events: RefCell::new(VecDeque::new()),
            bad_windows: RefCell::new(Vec::new()),
            next_id: Cell::new(1000),
        }
    }

    pub fn with_keysyms(mut self, keysyms: &[(u8, KeySym)]) -> Self {
        self.keysyms = keysyms.iter().copied().collect();
        self
    }

    pub fn open_window(&self, id: Xid) {
        self.children.borrow_mut().push(id);
    }

    pub fn close_window(&self, id: Xid) {
        self.children.borrow_mut().retain(|&c| c != id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        Ok(())
    }

    fn request(&self, id: Xid, call: Call) -> Result<()> {
        if self.bad_windows.borrow().contains(&id) {
            return Err(Error::Raw(format!("BadWindow: {id}")));
        }

        self.record(call)
    }
}

impl MockXConn for RecordingXConn {
    fn mock_outputs(&self) -> Result<Vec<Output>> {
        Ok(self.outputs.clone())
    }

    fn mock_root_geometry(&self) -> Result<Rect> {
        Ok(self.root_rect)
    }

    fn mock_select_root_events(&self) -> Result<()> {
        self.record(Call::SelectRootEvents)
    }

    fn mock_next_event(&self) -> Result<XEvent> {
        let event = self
            .events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Raw("no more events".into()))?;

        match event {
            XEvent::MapRequest(id) => self.open_window(id),
            XEvent::Destroy(id) => self.close_window(id),
            _ => (),
        }

        Ok(event)
    }

    fn mock_grab_key(&self, mods: ModMask, sym: KeySym) -> Result<()> {
        self.record(Call::GrabKey(mods, sym))
    }

    fn mock_ungrab_keys(&self) -> Result<()> {
        self.record(Call::UngrabKeys)
    }

    fn mock_keysym_for_keycode(&self, code: u8) -> Result<Option<KeySym>> {
        Ok(self.keysyms.get(&code).copied())
    }

    fn mock_create_overlay_window(&self, r: Rect, _: Color) -> Result<Xid> {
        let id = Xid(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.children.borrow_mut().push(id);
        self.record(Call::CreateOverlay(id, r))?;

        Ok(id)
    }

    fn mock_destroy_window(&self, id: Xid) -> Result<()> {
        self.close_window(id);
        self.record(Call::Destroy(id))
    }

    fn mock_existing_clients(&self) -> Result<Vec<Xid>> {
        Ok(self.children.borrow().clone())
    }

    fn mock_map(&self, client: Xid) -> Result<()> {
        self.request(client, Call::Map(client))
    }

    fn mock_unmap(&self, client: Xid) -> Result<()> {
        self.request(client, Call::Unmap(client))
    }

    fn mock_move_resize(&self, client: Xid, r: Rect) -> Result<()> {
        self.request(client, Call::MoveResize(client, r))
    }

    fn mock_raise(&self, client: Xid) -> Result<()> {
        self.request(client, Call::Raise(client))
    }

    fn mock_set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        self.request(client, Call::BorderWidth(client, px))
    }

    fn mock_set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        self.request(client, Call::BorderColor(client, color))
    }

    fn mock_focus(&self, client: Xid) -> Result<()> {
        self.request(client, Call::Focus(client))
    }

    fn mock_send_close_request(&self, client: Xid) -> Result<()> {
        self.request(client, Call::CloseRequest(client))
    }

    fn mock_track_pointer_enter(&self, client: Xid) -> Result<()> {
        self.request(client, Call::TrackEnter(client))
    }

    fn mock_configure_as_requested(&self, req: &ConfigureRequest) -> Result<()> {
        self.record(Call::Configure(*req))
    }

    fn mock_draw_bar(&self, bar: Xid, _: Rect, bar_state: BarState) -> Result<()> {
        self.record(Call::DrawBar(bar, bar_state))
    }
}
