//! Setting up and responding to user defined key bindings
use crate::{core::State, x::KeySym, Result};
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Modifier keys as reported in the state field of X key events.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Shift
        const SHIFT   = 1 << 0;
        /// Caps lock
        const LOCK    = 1 << 1;
        /// Control
        const CONTROL = 1 << 2;
        /// Alt
        const MOD1    = 1 << 3;
        /// Num lock
        const MOD2    = 1 << 4;
        /// Unused by most keyboard layouts
        const MOD3    = 1 << 5;
        /// Super / Windows key
        const MOD4    = 1 << 6;
        /// AltGr
        const MOD5    = 1 << 7;
    }
}

impl ModMask {
    /// The lock modifiers that are ignored when matching key bindings.
    pub const LOCKS: ModMask = ModMask::LOCK.union(ModMask::MOD2);

    /// This mask with the lock modifiers removed.
    pub fn without_locks(self) -> ModMask {
        self.difference(Self::LOCKS)
    }
}

/// A key press and held modifiers
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct KeyCode {
    /// The held modifier mask
    pub mask: ModMask,
    /// The key code that was held
    pub code: u8,
}

impl KeyCode {
    /// Create a new KeyCode from an existing one, removing the given modifier mask
    pub fn ignoring_modifier(&self, mask: ModMask) -> KeyCode {
        KeyCode {
            mask: self.mask.difference(mask),
            code: self.code,
        }
    }
}

/// The argument passed to an [Action] when its binding fires.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    /// No argument
    #[default]
    None,
    /// A program to run along with its arguments
    Command(Vec<String>),
    /// A workspace index
    Workspace(usize),
}

impl Arg {
    /// Build a [Arg::Command] from a slice of program arguments.
    pub fn command(argv: &[&str]) -> Self {
        Self::Command(argv.iter().map(|s| s.to_string()).collect())
    }
}

/// Some action to be run by a user key binding
pub type Action<X> = fn(&Arg, &mut State, &X) -> Result<()>;

/// A single key binding: the modifiers and keysym that trigger it along with the
/// [Action] to run and the [Arg] to run it with.
pub struct KeyBinding<X> {
    /// The modifiers that must be held
    pub mods: ModMask,
    /// The key that must be pressed
    pub sym: KeySym,
    /// What to run
    pub action: Action<X>,
    /// What to run it with
    pub arg: Arg,
}

impl<X> KeyBinding<X> {
    /// Create a new binding.
    pub fn new(mods: ModMask, sym: KeySym, action: Action<X>, arg: Arg) -> Self {
        Self {
            mods,
            sym,
            action,
            arg,
        }
    }

    /// Whether or not this binding fires for the given modifiers and keysym.
    pub fn matches(&self, mods: ModMask, sym: KeySym) -> bool {
        self.sym == sym && self.mods == mods.without_locks()
    }
}

impl<X> fmt::Debug for KeyBinding<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("mods", &self.mods)
            .field("sym", &format_args!("{:#x}", self.sym))
            .field("arg", &self.arg)
            .finish()
    }
}

/// An ordered table of [KeyBinding]s.
///
/// Lookups scan the table in order and the first match wins, so duplicate combinations
/// later in the table are shadowed.
#[derive(Debug)]
pub struct KeyBindings<X> {
    inner: Vec<KeyBinding<X>>,
}

impl<X> Default for KeyBindings<X> {
    fn default() -> Self {
        Self { inner: Vec::new() }
    }
}

impl<X> KeyBindings<X> {
    /// Create a new table from the given bindings.
    pub fn new(inner: Vec<KeyBinding<X>>) -> Self {
        Self { inner }
    }

    /// Append a binding to the end of the table.
    pub fn push(&mut self, binding: KeyBinding<X>) {
        self.inner.push(binding);
    }

    /// The first binding matching the given modifiers and keysym.
    pub fn lookup(&self, mods: ModMask, sym: KeySym) -> Option<&KeyBinding<X>> {
        self.inner.iter().find(|b| b.matches(mods, sym))
    }

    /// Iterate over the bindings in order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding<X>> {
        self.inner.iter()
    }

    /// The number of bindings in the table.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether or not the table is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<X> FromIterator<KeyBinding<X>> for KeyBindings<X> {
    fn from_iter<I: IntoIterator<Item = KeyBinding<X>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x::keysym::*;
    use simple_test_case::test_case;

    fn first(_: &Arg, _: &mut State, _: &()) -> Result<()> {
        Ok(())
    }

    fn second(_: &Arg, _: &mut State, _: &()) -> Result<()> {
        Err(crate::Error::Raw("second".into()))
    }

    fn table() -> KeyBindings<()> {
        KeyBindings::new(vec![
            KeyBinding::new(ModMask::MOD4, XK_j, first, Arg::None),
            KeyBinding::new(ModMask::MOD4 | ModMask::SHIFT, XK_j, first, Arg::Workspace(1)),
            KeyBinding::new(ModMask::MOD4, XK_j, second, Arg::Workspace(2)),
        ])
    }

    #[test_case(ModMask::MOD4, XK_j, Some(Arg::None); "exact match")]
    #[test_case(ModMask::MOD4 | ModMask::SHIFT, XK_j, Some(Arg::Workspace(1)); "with shift")]
    #[test_case(ModMask::MOD4 | ModMask::MOD2, XK_j, Some(Arg::None); "num lock ignored")]
    #[test_case(ModMask::MOD4 | ModMask::LOCK, XK_j, Some(Arg::None); "caps lock ignored")]
    #[test_case(ModMask::CONTROL, XK_j, None; "wrong modifiers")]
    #[test_case(ModMask::MOD4, XK_k, None; "wrong key")]
    #[test]
    fn lookup(mods: ModMask, sym: KeySym, expected: Option<Arg>) {
        let bindings = table();

        assert_eq!(bindings.lookup(mods, sym).map(|b| b.arg.clone()), expected);
    }

    #[test]
    fn first_match_wins() {
        let bindings = table();
        let b = bindings.lookup(ModMask::MOD4, XK_j).unwrap();

        assert_eq!(b.arg, Arg::None);
    }

    #[test]
    fn ignoring_modifier_only_clears_the_given_bits() {
        let k = KeyCode {
            mask: ModMask::MOD4 | ModMask::MOD2 | ModMask::SHIFT,
            code: 44,
        };

        assert_eq!(
            k.ignoring_modifier(ModMask::LOCKS),
            KeyCode {
                mask: ModMask::MOD4 | ModMask::SHIFT,
                code: 44
            }
        );
    }

    #[test]
    fn command_args_are_owned_strings() {
        assert_eq!(
            Arg::command(&["kitty", "-e", "htop"]),
            Arg::Command(vec!["kitty".into(), "-e".into(), "htop".into()])
        );
    }
}
