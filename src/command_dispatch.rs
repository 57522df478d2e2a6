//! Purpose: Hold top-level CLI command dispatch for `jsonmend`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command behavior, output envelopes, and exit code semantics stay unchanged.
//! Invariants: Helpers in `main.rs` remain the source of command business logic.

use super::*;

pub(super) fn dispatch_command(command: Command, reporter: Reporter) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "jsonmend", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::ParseEscapes { text } => {
            let input = read_input(text)?;
            require_nonempty(&input, reporter)?;
            println!("{}", decode(&input, Variant::ParseEscapes));
            emit_status(
                Severity::Success,
                "parse-escapes",
                reporter.messages.get(MessageKey::ParseEscapesDone),
                reporter,
            );
            Ok(RunOutcome::ok())
        }
        Command::Unescape { text } => {
            let input = read_input(text)?;
            require_nonempty(&input, reporter)?;
            println!("{}", decode(&input, Variant::Unescape));
            emit_status(
                Severity::Success,
                "unescape",
                reporter.messages.get(MessageKey::UnescapeDone),
                reporter,
            );
            Ok(RunOutcome::ok())
        }
        Command::Unwrap { text } => {
            let input = read_input(text)?;
            require_nonempty(&input, reporter)?;
            println!("{}", advanced_unescape(&input)?);
            emit_status(
                Severity::Success,
                "unwrap",
                reporter.messages.get(MessageKey::UnwrapDone),
                reporter,
            );
            Ok(RunOutcome::ok())
        }
        Command::Repair {
            text,
            module,
            module_args,
            must,
            decode,
        } => {
            let input = read_input(text)?;
            require_nonempty(&input, reporter)?;
            let normalized = decode_step(input.trim(), decode)?;
            let repaired = run_repair(&normalized, &module, &module_args, must, reporter)?;
            println!("{}", render_repaired(&repaired, reporter));
            emit_status(
                Severity::Success,
                "repair",
                reporter.messages.get(MessageKey::RepairDone),
                reporter,
            );
            Ok(RunOutcome::ok())
        }
    }
}
