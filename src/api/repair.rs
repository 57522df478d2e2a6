//! Purpose: Boundary contract for the external JSON repair module.
//! Exports: `RepairModule`, `RepairOutput`, `CommandModule`.
//! Role: Host-side adapter; the module's internals stay opaque to this crate.
//! Invariants: The module reply is exactly one of `{result}` or `{error}`.
//! Invariants: Transport failures are `Io`/`Repair` errors, never panics.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};

/// One reply from the repair module: either repaired text or a
/// module-reported failure message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RepairOutput {
    Result(String),
    Error(String),
}

/// Which of the module's two entry points to invoke. `Must` asks the module
/// to produce output even for input it would otherwise reject.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepairEntry {
    Repair,
    MustRepair,
}

impl RepairEntry {
    fn as_arg(self) -> &'static str {
        match self {
            RepairEntry::Repair => "repair",
            RepairEntry::MustRepair => "must-repair",
        }
    }
}

pub trait RepairModule {
    fn repair(&self, input: &str, entry: RepairEntry) -> Result<RepairOutput, Error>;
}

/// Runs an external executable as the repair module: input on stdin, a
/// single `{"result": ...}` or `{"error": ...}` JSON object on stdout.
#[derive(Clone, Debug)]
pub struct CommandModule {
    program: PathBuf,
    args: Vec<String>,
}

#[derive(Deserialize)]
struct ModuleReply {
    result: Option<String>,
    error: Option<String>,
}

impl CommandModule {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }
}

impl RepairModule for CommandModule {
    fn repair(&self, input: &str, entry: RepairEntry) -> Result<RepairOutput, Error> {
        debug!(program = %self.program.display(), entry = entry.as_arg(), "invoking repair module");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(entry.as_arg())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!(
                        "failed to start repair module {}",
                        self.program.display()
                    ))
                    .with_hint("Check that the module path is an executable.")
                    .with_source(err)
            })?;

        {
            let stdin = child.stdin.take().ok_or_else(|| {
                Error::new(ErrorKind::Internal).with_message("repair module stdin unavailable")
            })?;
            write_input(stdin, input)?;
        }

        let output = child.wait_with_output().map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to collect repair module output")
                .with_source(err)
        })?;
        if !output.status.success() {
            return Err(Error::new(ErrorKind::Repair)
                .with_message(format!("repair module exited with {}", output.status))
                .with_hint("Run the module directly to see its diagnostics."));
        }

        parse_reply(&output.stdout)
    }
}

fn write_input(mut stdin: std::process::ChildStdin, input: &str) -> Result<(), Error> {
    stdin.write_all(input.as_bytes()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write input to repair module")
            .with_source(err)
    })
}

fn parse_reply(stdout: &[u8]) -> Result<RepairOutput, Error> {
    let text = std::str::from_utf8(stdout).map_err(|err| {
        Error::new(ErrorKind::Repair)
            .with_message("repair module output is not UTF-8")
            .with_source(err)
    })?;
    let reply: ModuleReply = serde_json::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Repair)
            .with_message("repair module output is not a result/error object")
            .with_hint("The module must print {\"result\": ...} or {\"error\": ...} on stdout.")
            .with_source(err)
    })?;
    match (reply.result, reply.error) {
        (Some(result), None) => Ok(RepairOutput::Result(result)),
        (None, Some(error)) => Ok(RepairOutput::Error(error)),
        _ => Err(Error::new(ErrorKind::Repair)
            .with_message("repair module reply must contain exactly one of result or error")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_reply, RepairEntry, RepairOutput};
    use crate::core::error::ErrorKind;

    #[test]
    fn reply_with_result_is_accepted() {
        let reply = parse_reply(br#"{"result": "{\"a\":1}"}"#).unwrap();
        assert_eq!(reply, RepairOutput::Result("{\"a\":1}".to_string()));
    }

    #[test]
    fn reply_with_error_is_accepted() {
        let reply = parse_reply(br#"{"error": "unbalanced brackets"}"#).unwrap();
        assert_eq!(reply, RepairOutput::Error("unbalanced brackets".to_string()));
    }

    #[test]
    fn reply_with_both_fields_is_rejected() {
        let err = parse_reply(br#"{"result": "x", "error": "y"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Repair);
    }

    #[test]
    fn non_json_reply_is_rejected_with_hint() {
        let err = parse_reply(b"oops").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Repair);
        assert!(err.hint().is_some());
    }

    #[test]
    fn entry_arg_names_are_stable() {
        assert_eq!(RepairEntry::Repair.as_arg(), "repair");
        assert_eq!(RepairEntry::MustRepair.as_arg(), "must-repair");
    }
}
