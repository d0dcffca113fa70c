//! External command dispatch.
//!
//! The listener hands an already-formatted command line to a [`ScriptRunner`]
//! and never hears back: the generator runs out of process, unmonitored.

use std::process::{Command, Stdio};

/// Executes a formatted command line. Fire-and-forget: implementations do not
/// report success or failure to the caller.
pub trait ScriptRunner {
    fn run(&mut self, command: &str);
}

/// Spawns the command as a detached child process. Output is discarded and
/// the child is never waited on.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ScriptRunner for ProcessRunner {
    fn run(&mut self, command: &str) {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };

        let _ = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }
}

/// Prints the command to stdout instead of spawning it. Used for dry runs.
#[derive(Debug, Default)]
pub struct EchoRunner;

impl ScriptRunner for EchoRunner {
    fn run(&mut self, command: &str) {
        println!("{command}");
    }
}

/// Records every command instead of executing anything. Used in tests to
/// observe what the listener dispatched.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub commands: Vec<String>,
}

impl ScriptRunner for RecordingRunner {
    fn run(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}
