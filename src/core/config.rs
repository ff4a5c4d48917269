//! User facing configuration of the stackwm [WindowManager][crate::core::WindowManager].
use crate::{
    core::{
        actions::{
            change_workspace, focus_down, focus_left, focus_next_monitor, focus_right, focus_up,
            kill_focused, move_to_workspace, quit, spawn, swap_with_master,
        },
        bindings::{Arg, KeyBindings},
    },
    x::{keysym::*, XConn},
    Color,
};

/// The main user facing configuration details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The fraction of the screen width given to the main client
    pub master_ratio: f32,
    /// Gap in pixels around each client
    pub space: u32,
    /// Height in pixels of the status bar at the top of each monitor
    pub bar_height: u32,
    /// The number of workspaces on each monitor
    pub workspaces: usize,
    /// Border width in pixels of the focused client
    pub border_width: u32,
    /// Border color of the focused client
    pub focused_border: Color,
    /// Border color of all other clients
    pub normal_border: Color,
    /// Whether or not focus follows the mouse pointer
    pub focus_follow_mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_ratio: 0.55,
            space: 10,
            bar_height: 20,
            workspaces: 10,
            border_width: 5,
            focused_border: Color::new_from_hex(0xf9f5d7),
            normal_border: Color::new_from_hex(0x282828),
            focus_follow_mouse: true,
        }
    }
}

/// The default key bindings, using the Super key as the main modifier.
pub fn default_key_bindings<X: XConn>() -> KeyBindings<X> {
    gen_keybindings! {
        [MOD4, SHIFT] XK_p => spawn, Arg::command(&["dmenu_run"]);
        [MOD4, SHIFT] XK_q => kill_focused, Arg::None;
        [MOD4, SHIFT] XK_Return => spawn, Arg::command(&["kitty"]);
        [MOD4, SHIFT] XK_e => quit, Arg::None;
        [MOD4] XK_h => focus_left, Arg::None;
        [MOD4] XK_l => focus_right, Arg::None;
        [MOD4] XK_k => focus_up, Arg::None;
        [MOD4] XK_j => focus_down, Arg::None;
        [MOD4] XK_Return => swap_with_master, Arg::None;
        [MOD4] XK_period => focus_next_monitor, Arg::None;

        forall_workspaces: [MOD4] => change_workspace;
        forall_workspaces: [MOD4, SHIFT] => move_to_workspace;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::bindings::ModMask, x::mock::RecordingXConn};
    use simple_test_case::test_case;

    #[test_case(ModMask::MOD4, XK_1, Arg::Workspace(0); "first workspace")]
    #[test_case(ModMask::MOD4, XK_0, Arg::Workspace(9); "zero is the last workspace")]
    #[test_case(ModMask::MOD4 | ModMask::SHIFT, XK_5, Arg::Workspace(4); "move to workspace")]
    #[test_case(ModMask::MOD4 | ModMask::SHIFT, XK_p, Arg::command(&["dmenu_run"]); "launcher")]
    #[test]
    fn default_bindings(mods: ModMask, sym: KeySym, expected: Arg) {
        let bindings = default_key_bindings::<RecordingXConn>();

        assert_eq!(bindings.lookup(mods, sym).map(|b| &b.arg), Some(&expected));
    }

    #[test]
    fn default_bindings_cover_all_workspaces_twice() {
        let bindings = default_key_bindings::<RecordingXConn>();
        let n = bindings
            .iter()
            .filter(|b| matches!(b.arg, Arg::Workspace(_)))
            .count();

        assert_eq!(n, 20);
        assert_eq!(bindings.len(), 30);
    }

    #[test]
    fn default_colors_parse_from_hex_strings() {
        let c = Config::default();

        assert_eq!(Color::try_from("#f9f5d7").unwrap(), c.focused_border);
        assert_eq!(Color::try_from("#282828").unwrap(), c.normal_border);
    }
}
