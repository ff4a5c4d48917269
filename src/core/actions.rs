//! The commands that can be bound to keys.
//!
//! Every command has the same signature so that it can be stored in a
//! [KeyBinding][crate::core::bindings::KeyBinding] as an
//! [Action][crate::core::bindings::Action]. Commands that need an [Arg] of a particular
//! kind log a warning and do nothing when given anything else.
use crate::{
    core::{bindings::Arg, State},
    pure::ClientRegistry,
    util,
    x::{XConn, XConnExt},
    Result,
};
use tracing::{debug, error, warn};

fn workspace_index(arg: &Arg, action: &str) -> Option<usize> {
    match arg {
        Arg::Workspace(ix) => Some(*ix),
        _ => {
            warn!(?arg, %action, "expected a workspace index");
            None
        }
    }
}

fn change_focus<X, F>(state: &mut State, x: &X, f: F) -> Result<()>
where
    X: XConn,
    F: FnOnce(&mut ClientRegistry),
{
    let clients = state.monitors.selected_mut().clients_mut();
    if clients.is_empty() {
        return Ok(());
    }

    f(clients);
    x.refresh_focus(state)
}

/// Launch an external program.
///
/// Failing to launch the program is logged rather than returned as an error.
pub fn spawn<X: XConn>(arg: &Arg, _: &mut State, _: &X) -> Result<()> {
    match arg {
        Arg::Command(argv) => {
            if let Err(e) = util::spawn(argv) {
                error!(%e, ?argv, "unable to spawn program");
            }
        }
        _ => warn!(?arg, "expected a command to spawn"),
    }

    Ok(())
}

/// Ask the focused client to close.
pub fn kill_focused<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    match state.monitors.selected().clients().focused() {
        Some(&client) => {
            debug!(%client, "asking focused client to close");
            x.send_close_request(client)
        }
        None => Ok(()),
    }
}

/// Show the given workspace on the selected monitor.
pub fn change_workspace<X: XConn>(arg: &Arg, state: &mut State, x: &X) -> Result<()> {
    match workspace_index(arg, "change_workspace") {
        Some(ix) => x.switch_workspace(ix, state),
        None => Ok(()),
    }
}

/// Move the focused client to the given workspace of the selected monitor.
pub fn move_to_workspace<X: XConn>(arg: &Arg, state: &mut State, x: &X) -> Result<()> {
    match workspace_index(arg, "move_to_workspace") {
        Some(ix) => x.move_focused_to_workspace(ix, state),
        None => Ok(()),
    }
}

/// Focus the master client.
pub fn focus_left<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    change_focus(state, x, |cs| cs.focus_master())
}

/// Focus the first client of the stack when the master client is focused.
pub fn focus_right<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    change_focus(state, x, |cs| cs.focus_stack())
}

/// Focus the previous client.
pub fn focus_up<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    change_focus(state, x, |cs| cs.focus_up())
}

/// Focus the next client.
pub fn focus_down<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    change_focus(state, x, |cs| cs.focus_down())
}

/// Swap the focused client into the master position.
pub fn swap_with_master<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    if state.monitors.selected_mut().clients_mut().swap_focused_with_master() {
        x.refresh(state)?;
    }

    Ok(())
}

/// Select the next monitor, wrapping back around to the first.
pub fn focus_next_monitor<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    match state.monitors.next_monitor() {
        Some(ix) => x.select_monitor(ix, state),
        None => Ok(()),
    }
}

/// Begin shutting down, or finish shutting down if this is the second request.
pub fn quit<X: XConn>(_: &Arg, state: &mut State, x: &X) -> Result<()> {
    state.quit(x)
}
