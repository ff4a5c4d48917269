//! Utility functions for use in other parts of stackwm
use crate::{Error, Result};
use std::{
    os::unix::process::CommandExt,
    process::{Command, Stdio},
};
use tracing::info;

/// Run an external program with the given arguments, detached from the window manager.
///
/// The child is placed in its own process group and has stdin, stdout and stderr
/// redirected to /dev/null. It is never waited on: with SIGCHLD ignored the kernel reaps
/// it when it exits.
pub fn spawn<S: AsRef<str>>(argv: &[S]) -> Result<()> {
    let (prog, args) = match argv.split_first() {
        Some((prog, args)) => (prog.as_ref(), args),
        None => return Err(Error::Raw("unable to spawn an empty command".into())),
    };

    info!(%prog, "spawning external program");
    Command::new(prog)
        .args(args.iter().map(|a| a.as_ref()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_commands_are_an_error() {
        let argv: [&str; 0] = [];

        assert!(matches!(spawn(&argv), Err(Error::Raw(_))));
    }

    #[test]
    fn missing_programs_are_an_io_error() {
        let res = spawn(&["this-program-does-not-exist-anywhere"]);

        assert!(matches!(res, Err(Error::Io(_))));
    }
}
