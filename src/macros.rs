//! Utility macros for use in the rest of stackwm.

/// Make creating a [KeyBindings][crate::core::bindings::KeyBindings] table less verbose.
///
/// Each entry is a list of [ModMask][crate::core::bindings::ModMask] flag names, a keysym,
/// the action to run and the [Arg][crate::core::bindings::Arg] to run it with. A
/// `forall_workspaces` entry expands to one binding per number row key (1 through 9
/// followed by 0), each passing the matching workspace index.
///
/// Entries are kept in the order they are written.
#[macro_export]
macro_rules! gen_keybindings(
    {
        $([$($modifier:ident),+] $sym:expr => $action:path, $arg:expr;)+
        $(forall_workspaces: [$($ws_modifier:ident),+] => $ws_action:path;)*
    } => {
        {
            let mut _bindings = $crate::core::bindings::KeyBindings::default();

            $(
                _bindings.push($crate::core::bindings::KeyBinding::new(
                    $crate::core::bindings::ModMask::empty()
                        $(| $crate::core::bindings::ModMask::$modifier)+,
                    $sym,
                    $action,
                    $arg,
                ));
            )+

            $(
                for (i, &sym) in $crate::x::keysym::WORKSPACE_KEYS.iter().enumerate() {
                    _bindings.push($crate::core::bindings::KeyBinding::new(
                        $crate::core::bindings::ModMask::empty()
                            $(| $crate::core::bindings::ModMask::$ws_modifier)+,
                        sym,
                        $ws_action,
                        $crate::core::bindings::Arg::Workspace(i),
                    ));
                }
            )*

            _bindings
        }
    };
);
