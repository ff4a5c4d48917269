//! Data types for working with X events
use crate::{
    core::bindings::KeyCode,
    pure::geometry::{Point, Rect},
    Xid,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrapper around the low level X event types that correspond to request / response data
/// when communicating with the X server itself.
///
/// This is the closed set of events that the window manager responds to: X backends are
/// expected to drop any other event types before they reach the event loop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
pub enum XEvent {
    /// A client window is requesting to be positioned and rendered on the screen.
    ConfigureRequest(ConfigureRequest),
    /// A client window has been closed
    Destroy(Xid),
    /// The mouse pointer has entered a new client window
    Enter(PointerChange),
    /// A part or all of a client has become visible
    Expose(ExposeEvent),
    /// A grabbed key combination has been entered by the user
    KeyPress(KeyCode),
    /// A client window is requesting to be mapped (made visible) on the screen
    MapRequest(Xid),
}

/// How a client window is asking to be restacked relative to its siblings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackMode {
    /// Above its sibling (or all windows if no sibling was given)
    Above,
    /// Below its sibling (or all windows if no sibling was given)
    Below,
    /// Above its sibling only if the sibling occludes it
    TopIf,
    /// Below its sibling only if it occludes the sibling
    BottomIf,
    /// Whichever of TopIf or BottomIf applies
    Opposite,
}

/// A client asking to change its own position, size or stacking order.
///
/// Only the fields that the client actually asked to change are set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigureRequest {
    /// The ID of the window that made the request
    pub id: Xid,
    /// Requested x coordinate
    pub x: Option<i32>,
    /// Requested y coordinate
    pub y: Option<i32>,
    /// Requested width
    pub w: Option<u32>,
    /// Requested height
    pub h: Option<u32>,
    /// Requested border width
    pub border_width: Option<u32>,
    /// The sibling to stack relative to
    pub sibling: Option<Xid>,
    /// The requested stacking operation
    pub stack_mode: Option<StackMode>,
}

/// A notification that a window has become visible
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExposeEvent {
    /// The ID of the window that has become exposed
    pub id: Xid,
    /// The portion of the window that has become exposed
    pub r: Rect,
    /// The number of remaining pending expose events to come
    pub count: usize,
}

/// A notification that the mouse pointer has entered or left a window
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerChange {
    /// The ID of the window that was entered
    pub id: Xid,
    /// Absolute coordinate of the event
    pub abs: Point,
}
