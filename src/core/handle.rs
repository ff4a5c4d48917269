//! XEvent handlers for use in the main event loop;
use crate::{
    core::{
        bindings::{KeyBindings, KeyCode, ModMask},
        State,
    },
    x::{ConfigureRequest, ExposeEvent, PointerChange, XConn, XConnExt},
    Result, Xid,
};
use tracing::{error, trace};

pub(crate) fn keypress<X>(
    key: KeyCode,
    bindings: &KeyBindings<X>,
    state: &mut State,
    x: &X,
) -> Result<()>
where
    X: XConn,
{
    let key = key.ignoring_modifier(ModMask::LOCKS);
    let sym = match x.keysym_for_keycode(key.code)? {
        Some(sym) => sym,
        None => {
            trace!(?key, "no keysym for key code");
            return Ok(());
        }
    };

    if let Some(binding) = bindings.lookup(key.mask, sym) {
        trace!(?key, ?binding, "running user keybinding");
        if let Err(error) = (binding.action)(&binding.arg, state, x) {
            error!(%error, ?key, "error running user keybinding");
            return Err(error);
        }
    }

    Ok(())
}

pub(crate) fn map_request<X>(client: Xid, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    trace!(%client, "handling new map request");

    if state.monitors.is_visible(&client) {
        x.map(client)
    } else if state.monitors.contains(&client) {
        trace!(%client, "ignoring map request for client on a hidden workspace");
        Ok(())
    } else {
        x.manage(client, state)
    }
}

pub(crate) fn destroy<X>(client: Xid, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    if state.monitors.contains(&client) {
        trace!(%client, "destroying client");
        x.unmanage(client, state)?;
    }

    Ok(())
}

pub(crate) fn configure_request<X>(req: &ConfigureRequest, x: &X) -> Result<()>
where
    X: XConn,
{
    trace!(id = %req.id, ?req, "honouring configure request");
    x.configure_as_requested(req)
}

pub(crate) fn enter<X>(
    PointerChange { id, abs }: PointerChange,
    state: &mut State,
    x: &X,
) -> Result<()>
where
    X: XConn,
{
    if !state.config.focus_follow_mouse {
        return Ok(());
    }

    if id == state.root {
        let m = state.monitors.monitor_at(abs);
        return x.select_monitor(m, state);
    }

    let m = match state.monitors.iter().position(|m| m.clients().contains(&id)) {
        Some(m) => m,
        None => return Ok(()),
    };

    x.select_monitor(m, state)?;
    state.monitors.selected_mut().clients_mut().focus_client(&id);
    x.refresh_focus(state)
}

pub(crate) fn expose<X>(e: ExposeEvent, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    if e.count > 0 {
        return Ok(());
    }

    match state.monitors.monitor_for_bar(e.id) {
        Some(m) => x.redraw_bar(state, m),
        None => Ok(()),
    }
}
