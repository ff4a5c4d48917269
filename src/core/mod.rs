//! Core data structures and user facing functionality for the window manager
use crate::{
    pure::{Monitor, MonitorSet},
    x::{Output, XConn, XConnExt, XEvent},
    Error, Result, Xid,
};
use nix::sys::signal::{signal, SigHandler, Signal};
use tracing::{debug, error, info, span, trace, warn, Level};

pub mod actions;
pub mod bindings;
pub mod config;
mod handle;
pub mod layout;

#[doc(inline)]
pub use bindings::{Action, Arg, KeyBinding, KeyBindings, ModMask};
#[doc(inline)]
pub use config::{default_key_bindings, Config};
#[doc(inline)]
pub use layout::MainAndStack;

/// Where the window manager is in its lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Managing clients as normal
    #[default]
    Running,
    /// All clients have been asked to close and we are waiting for them to do so
    Draining,
    /// Shutdown is complete and the event loop will exit
    Finished,
}

/// The pure window manager state.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) config: Config,
    pub(crate) monitors: MonitorSet,
    pub(crate) root: Xid,
    pub(crate) run_state: RunState,
}

impl State {
    pub(crate) fn try_new(config: Config, root: Xid, monitors: Vec<Monitor>) -> Result<Self> {
        Ok(Self {
            config,
            monitors: MonitorSet::try_new(monitors)?,
            root,
            run_state: RunState::Running,
        })
    }

    /// The configuration the window manager is running with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The monitors attached to the display along with their workspaces.
    pub fn monitors(&self) -> &MonitorSet {
        &self.monitors
    }

    /// The root window ID.
    pub fn root(&self) -> Xid {
        self.root
    }

    /// Where the window manager is in its lifecycle.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Step the quit state machine.
    ///
    /// The first call asks every remaining top level window to close and waits for them to
    /// be destroyed. Calling this again while waiting finishes shutting down immediately.
    pub fn quit<X: XConn>(&mut self, x: &X) -> Result<()> {
        match self.run_state {
            RunState::Running => {
                let remaining = self.remaining_windows(x)?;
                info!(n_windows = remaining.len(), "quit requested: closing all windows");
                self.run_state = RunState::Draining;

                for id in remaining {
                    x.send_close_request(id)?;
                }

                self.check_drained(x)
            }

            RunState::Draining => {
                info!("quit requested again: shutting down without waiting");
                self.teardown(x)
            }

            RunState::Finished => Ok(()),
        }
    }

    // Managed clients on hidden workspaces are unmapped so they need including explicitly
    fn remaining_windows<X: XConn>(&self, x: &X) -> Result<Vec<Xid>> {
        let bars = self.monitors.bars();
        let mut remaining: Vec<Xid> = x
            .existing_clients()?
            .into_iter()
            .filter(|id| !bars.contains(id))
            .collect();

        for id in self.monitors.all_clients() {
            if !remaining.contains(&id) {
                remaining.push(id);
            }
        }

        Ok(remaining)
    }

    pub(crate) fn check_drained<X: XConn>(&mut self, x: &X) -> Result<()> {
        if self.run_state != RunState::Draining {
            return Ok(());
        }

        let remaining = self.remaining_windows(x)?;
        if remaining.is_empty() {
            info!("all windows closed");
            self.teardown(x)
        } else {
            debug!(n_windows = remaining.len(), "waiting for windows to close");
            Ok(())
        }
    }

    fn teardown<X: XConn>(&mut self, x: &X) -> Result<()> {
        x.ungrab_keys()?;
        for bar in self.monitors.bars() {
            x.destroy_window(bar)?;
        }
        self.run_state = RunState::Finished;

        Ok(())
    }
}

/// A top level struct holding all of the state required to run as an X11 window manager.
#[derive(Debug)]
pub struct WindowManager<X>
where
    X: XConn,
{
    x: X,
    /// The mutable [State] of the window manager
    pub state: State,
    key_bindings: KeyBindings<X>,
}

impl<X> WindowManager<X>
where
    X: XConn,
{
    /// Construct a new [WindowManager] with the provided config and X connection.
    ///
    /// One monitor is created for each output reported by the X server, each with its own
    /// status bar window. If no outputs are reported then a single monitor covering the
    /// whole root window is used instead.
    pub fn new(config: Config, key_bindings: KeyBindings<X>, x: X) -> Result<Self> {
        let mut outputs = match x.outputs() {
            Ok(outputs) => outputs,
            Err(Error::MissingRandRSupport) => {
                warn!("RandR is not supported by the X server");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        if outputs.is_empty() {
            warn!("no outputs reported: falling back to the root window geometry");
            outputs.push(Output {
                r: x.root_geometry()?,
                primary: true,
            });
        }

        let monitors = outputs
            .into_iter()
            .map(|o| {
                let r = o.r.top_strip(config.bar_height);
                let bar = x.create_overlay_window(r, config.normal_border)?;
                debug!(r = ?o.r, %bar, primary = o.primary, "adding monitor");

                Ok(Monitor::new(o.r, bar, config.workspaces, o.primary))
            })
            .collect::<Result<Vec<_>>>()?;

        let state = State::try_new(config, x.root(), monitors)?;

        Ok(Self {
            x,
            state,
            key_bindings,
        })
    }

    /// The X connection being used to talk to the X server.
    pub fn x(&self) -> &X {
        &self.x
    }

    /// Start the window manager and run it until it exits.
    ///
    /// Errors raised while handling a single event are logged and the event is dropped. Losing
    /// the connection to the X server stops the window manager and the error is returned.
    pub fn run(mut self) -> Result<()> {
        // ignore SIGCHILD and allow child / inherited processes to be inherited by pid1
        debug!("registering SIGCHILD signal handler");
        if let Err(e) = unsafe { signal(Signal::SIGCHLD, SigHandler::SigIgn) } {
            return Err(Error::Raw(format!("unable to set signal handler: {e}")));
        }

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        self.x.select_root_events()?;
        self.grab_keys()?;

        for ix in 0..self.state.monitors.len() {
            self.x.redraw_bar(&self.state, ix)?;
        }
        self.x.refresh_focus(&self.state)?;
        self.x.flush();

        info!("entering main event loop");
        while self.state.run_state != RunState::Finished {
            let event = self.x.next_event()?;
            let span = span!(target: "stackwm", Level::DEBUG, "XEvent", kind = event.as_ref());
            let _enter = span.enter();
            trace!(details = ?event, "event details");

            if let Err(e) = self.handle_xevent(event) {
                if e.is_fatal() {
                    error!(%e, "lost connection to the X server");
                    return Err(e);
                }
                error!(%e, "error handling event");
            }
            self.x.flush();
        }

        info!("exiting");
        Ok(())
    }

    fn grab_keys(&self) -> Result<()> {
        debug!(n_bindings = self.key_bindings.len(), "grabbing key bindings");
        for b in self.key_bindings.iter() {
            self.x.grab_key(b.mods, b.sym)?;
        }

        Ok(())
    }

    pub(crate) fn handle_xevent(&mut self, event: XEvent) -> Result<()> {
        use XEvent::*;

        let (x, state, key_bindings) = (&self.x, &mut self.state, &self.key_bindings);

        match event {
            ConfigureRequest(req) => handle::configure_request(&req, x)?,
            Destroy(id) => handle::destroy(id, state, x)?,
            Enter(p) => handle::enter(p, state, x)?,
            Expose(e) => handle::expose(e, state, x)?,
            KeyPress(k) => handle::keypress(k, key_bindings, state, x)?,
            MapRequest(id) => handle::map_request(id, state, x)?,
        }

        state.check_drained(x)
    }
}
