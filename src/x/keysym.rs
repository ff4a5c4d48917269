//! Named X keysym values for the keys used in bindings.
//!
//! Values are taken from `X11/keysymdef.h`: latin characters share their ASCII code point.
#![allow(non_upper_case_globals, missing_docs)]

/// An X keysym value
pub type KeySym = u32;

pub const XK_Return: KeySym = 0xff0d;
pub const XK_period: KeySym = 0x002e;

pub const XK_0: KeySym = 0x0030;
pub const XK_1: KeySym = 0x0031;
pub const XK_2: KeySym = 0x0032;
pub const XK_3: KeySym = 0x0033;
pub const XK_4: KeySym = 0x0034;
pub const XK_5: KeySym = 0x0035;
pub const XK_6: KeySym = 0x0036;
pub const XK_7: KeySym = 0x0037;
pub const XK_8: KeySym = 0x0038;
pub const XK_9: KeySym = 0x0039;

pub const XK_e: KeySym = 0x0065;
pub const XK_h: KeySym = 0x0068;
pub const XK_j: KeySym = 0x006a;
pub const XK_k: KeySym = 0x006b;
pub const XK_l: KeySym = 0x006c;
pub const XK_p: KeySym = 0x0070;
pub const XK_q: KeySym = 0x0071;

/// The number row keys in workspace order: 1 through 9 followed by 0.
pub const WORKSPACE_KEYS: [KeySym; 10] = [XK_1, XK_2, XK_3, XK_4, XK_5, XK_6, XK_7, XK_8, XK_9, XK_0];
