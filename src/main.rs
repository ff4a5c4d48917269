//! stackwm: run the window manager with the default configuration and key bindings.
use stackwm::{
    core::{default_key_bindings, Config, WindowManager},
    x11rb::X11rbConn,
    Result,
};
use std::process::exit;
use tracing::error;
use tracing_subscriber::{self, prelude::*, EnvFilter};

fn run() -> Result<()> {
    let conn = X11rbConn::new()?;
    let wm = WindowManager::new(Config::default(), default_key_bindings(), conn)?;

    wm.run()
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish()
        .init();

    if let Err(e) = run() {
        error!(%e, "stackwm exited with an error");
        exit(1);
    }
}
