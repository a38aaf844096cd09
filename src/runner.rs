//! Execution hand-off.
//!
//! Generated programs are never written to disk; the interpreter reads the
//! source from its standard input (`python3 -`).

use std::{
    io::{self, Write},
    process::{Child, Command, ExitStatus, Output, Stdio},
};

use tracing::debug;

pub const DEFAULT_INTERPRETER: &str = "python3";

fn spawn(code: &str, interpreter: &str, capture: bool) -> io::Result<Child> {
    let mut command = Command::new(interpreter);
    command.arg("-").stdin(Stdio::piped());

    if capture {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }

    debug!("spawning {} with {} bytes of source", interpreter, code.len());
    let mut child = command.spawn()?;

    // Closing stdin marks the end of the program text
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(error) = stdin.write_all(code.as_bytes()) {
            drop(stdin);
            // Reap the interpreter before reporting the failed write
            let status = child.wait();
            debug!("{} exited early with {:?}", interpreter, status);
            return Err(error);
        }
    }

    Ok(child)
}

/// Runs `code` with the interpreter's output going to this process's
/// terminal.
pub fn run(code: &str, interpreter: &str) -> io::Result<ExitStatus> {
    spawn(code, interpreter, false)?.wait()
}

/// Runs `code` and collects everything the interpreter printed.
pub fn run_captured(code: &str, interpreter: &str) -> io::Result<Output> {
    spawn(code, interpreter, true)?.wait_with_output()
}

/// Whether `interpreter` can be started at all.
pub fn interpreter_available(interpreter: &str) -> bool {
    Command::new(interpreter)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
