//! # stackwm: a minimal master/stack tiling window manager
//!
//! `stackwm` tracks the top-level windows on an X11 display, keeps them in per-workspace
//! ordered lists on each monitor and tiles them with a fixed master/stack layout. The first
//! client of a workspace (the "master") takes the left hand side of the screen and all
//! remaining clients share the right hand side in equal height slices.
//!
//! ## Structure
//! - [pure] holds all of the side effect free state: the client registry for a single
//!   workspace, the per-monitor workspace store and the set of monitors.
//! - [core] holds the [WindowManager][core::WindowManager] event loop, the tiling engine,
//!   key bindings and the commands that they run.
//! - [x] defines the [XConn][x::XConn] trait: the minimal set of display server primitives that
//!   the window manager needs in order to run.
//! - `x11rb` (behind the feature of the same name) is the real [XConn][x::XConn] backend.
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rustdoc::all
)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

#[macro_use]
pub mod macros;

pub mod core;
pub mod pure;
pub mod util;
pub mod x;

#[cfg(feature = "x11rb")]
pub mod x11rb;

#[doc(inline)]
pub use crate::core::{Config, State, WindowManager};

/// Error variants from the core stackwm library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Creation of a [Color] from a string hex code was invalid
    #[error("Invalid Hex color code: '{code}'")]
    InvalidHexColor {
        /// The invalid string that was intended as a color hex code
        code: String,
    },

    /// An IO error was encountered (e.g. when launching an external program)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The X server did not report any usable screen geometry at all
    #[error("unable to determine any screen geometry for the display")]
    NoScreens,

    /// Unable to parse an integer from a provided string.
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// A generic error type for use in user code when needing to construct
    /// a simple [Error].
    #[error("Unhandled error: {0}")]
    Raw(String),

    /// The X server does not support the RandR extension
    #[error("the X server does not support the RandR extension")]
    MissingRandRSupport,

    /// Unable to establish a connection to the X server
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbConnect(#[from] ::x11rb::errors::ConnectError),

    /// The X11 connection broke
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbConnection(#[from] ::x11rb::errors::ConnectionError),

    /// Could not get a reply to an X11 request
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbReplyError(#[from] ::x11rb::errors::ReplyError),

    /// Could not get a reply to an X11 request or could not generate an ID
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbReplyOrIdError(#[from] ::x11rb::errors::ReplyOrIdError),
}

impl Error {
    /// Whether this error means that the connection to the X server can no longer be used.
    ///
    /// Any other error raised while handling an event only affects that event.
    pub fn is_fatal(&self) -> bool {
        match self {
            #[cfg(feature = "x11rb")]
            Error::X11rbConnect(_) | Error::X11rbConnection(_) => true,
            #[cfg(feature = "x11rb")]
            Error::X11rbReplyError(::x11rb::errors::ReplyError::ConnectionError(_)) => true,
            #[cfg(feature = "x11rb")]
            Error::X11rbReplyOrIdError(
                ::x11rb::errors::ReplyOrIdError::ConnectionError(_)
                | ::x11rb::errors::ReplyOrIdError::IdsExhausted,
            ) => true,
            _ => false,
        }
    }
}

/// A Result where the error type is a stackwm [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// An X11 ID for a given resource
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub(crate) u32);

impl fmt::Display for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Xid> for u32 {
    fn from(id: Xid) -> Self {
        id.0
    }
}

/// A simple RGB based color used for client borders and the status bar.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    rgb_hex: u32,
}

impl Color {
    /// Create a new Color from a hex encoded u32: 0xRRGGBB
    pub const fn new_from_hex(rgb_hex: u32) -> Self {
        Self {
            rgb_hex: rgb_hex & 0x00FF_FFFF,
        }
    }

    /// The individual RGB channels of this color
    pub fn rgb_u8(&self) -> (u8, u8, u8) {
        (
            ((self.rgb_hex >> 16) & 0xFF) as u8,
            ((self.rgb_hex >> 8) & 0xFF) as u8,
            (self.rgb_hex & 0xFF) as u8,
        )
    }

    /// Render this color as a `#RRGGBB` hex string
    pub fn as_rgb_hex_string(&self) -> String {
        format!("#{:0>6X}", self.rgb_hex)
    }

    /// The 0xRRGGBB representation of this color as used for X border pixels
    pub fn rgb_u32(&self) -> u32 {
        self.rgb_hex
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::new_from_hex(hex)
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| Error::InvalidHexColor { code: s.into() })?;

        Ok(Self::new_from_hex(u32::from_str_radix(hex, 16)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case("#f9f5d7", 0xf9f5d7; "lowercase")]
    #[test_case("#282828", 0x282828; "digits only")]
    #[test_case("#ABCDEF", 0xabcdef; "uppercase")]
    #[test]
    fn color_from_valid_hex(s: &str, expected: u32) {
        let c = Color::try_from(s).unwrap();

        assert_eq!(c.rgb_u32(), expected);
    }

    #[test_case("f9f5d7"; "missing hash")]
    #[test_case("#f9f5"; "too short")]
    #[test_case("#f9f5d7ff"; "too long")]
    #[test]
    fn color_from_invalid_hex_is_an_error(s: &str) {
        assert!(Color::try_from(s).is_err());
    }

    #[test]
    fn errors_local_to_one_event_are_not_fatal() {
        assert!(!Error::Raw("BadWindow".into()).is_fatal());
        assert!(!Error::MissingRandRSupport.is_fatal());
    }

    #[cfg(feature = "x11rb")]
    #[test]
    fn losing_the_x_connection_is_fatal() {
        use ::x11rb::errors::{ConnectionError, ReplyError};

        assert!(Error::X11rbConnection(ConnectionError::UnknownError).is_fatal());
        assert!(
            Error::X11rbReplyError(ReplyError::ConnectionError(ConnectionError::UnknownError))
                .is_fatal()
        );
    }

    #[test]
    fn color_rgb_parts() {
        let c = Color::new_from_hex(0x10ff00);

        assert_eq!(c.rgb_u8(), (0x10, 0xff, 0x00));
        assert_eq!(c.as_rgb_hex_string(), "#10FF00");
    }
}
