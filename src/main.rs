//! Purpose: `jsonmend` CLI entry point and command dispatch bootstrap.
//! Role: Binary crate root; parses args, runs commands, prints decoded text on stdout.
//! Invariants: Decoded/repaired payloads go to stdout; status reports go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;
mod messages;

use color_json::colorize_json;
use jsonmend::api::{
    CommandModule, Error, ErrorKind, RepairEntry, RepairModule, RepairOutput, Variant,
    advanced_unescape, decode, to_exit_code,
};
use jsonmend::status::{Severity, Status, status_json};
use messages::{Lang, MessageKey, Messages};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

/// How this invocation reports status and errors: message catalog, color
/// policy, and whether stderr carries JSON envelopes or human lines.
#[derive(Copy, Clone, Debug)]
struct Reporter {
    color: ColorMode,
    json: bool,
    messages: Messages,
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, reporter)) => {
            emit_error(&err, reporter);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, Reporter)> {
    let default_reporter = Reporter {
        color: ColorMode::Auto,
        json: false,
        messages: Messages::new(Lang::En),
    };
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        default_reporter,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome { exit_code });
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    default_reporter,
                ));
            }
        },
    };

    init_tracing();

    let reporter = Reporter {
        color: cli.color,
        json: cli.json,
        messages: Messages::new(cli.lang),
    };

    command_dispatch::dispatch_command(cli.command, reporter).map_err(|err| (err, reporter))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "jsonmend",
    version,
    about = "Fix malformed JSON from the command line",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Decode backslash-escape notation, then hand the text to a repair module.

Mental model:
  - `parse-escapes` / `unescape` decode \n, \t, \" and friends
  - `unwrap` also strips one enclosing quote pair first
  - `repair` feeds the text to an external repair module
"#,
    after_help = r#"EXAMPLES
  $ jsonmend parse-escapes '{\"a\": \"line1\nline2\"}'
  $ echo '"a\nb"' | jsonmend unwrap
  $ jsonmend repair --module ./jsonrepair '{"a": 1,}'
  # Recommended order: parse-escapes first, then repair

LEARN MORE
  $ jsonmend <command> --help"#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        long,
        default_value = "en",
        value_enum,
        help = "Language for status messages: en|zh"
    )]
    lang: Lang,
    #[arg(long, help = "Emit status reports as JSON envelopes on stderr")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Escape normalization applied before handing text to the repair module.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum DecodeStep {
    None,
    ParseEscapes,
    Unescape,
    Unwrap,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        name = "parse-escapes",
        about = "Convert escape sequences like \\n and \\t into the characters they name"
    )]
    ParseEscapes {
        #[arg(help = "Text to decode; reads stdin when omitted")]
        text: Option<String>,
    },
    #[command(about = "Decode common escape characters like \\\", \\n, \\t")]
    Unescape {
        #[arg(help = "Text to decode; reads stdin when omitted")]
        text: Option<String>,
    },
    #[command(about = "Strip one enclosing quote pair, then decode the body")]
    Unwrap {
        #[arg(help = "Text to decode; reads stdin when omitted")]
        text: Option<String>,
    },
    #[command(about = "Send text to an external repair module and print the repaired JSON")]
    Repair {
        #[arg(help = "Text to repair; reads stdin when omitted")]
        text: Option<String>,
        #[arg(
            long,
            value_hint = ValueHint::FilePath,
            help = "Path to the repair module executable"
        )]
        module: PathBuf,
        #[arg(
            long = "module-arg",
            value_name = "ARG",
            help = "Extra argument passed to the module before the entry name (repeatable)"
        )]
        module_args: Vec<String>,
        #[arg(long, help = "Use the module's must-repair entry point")]
        must: bool,
        #[arg(
            long,
            default_value = "none",
            value_enum,
            help = "Escape normalization applied before repair: none|parse-escapes|unescape|unwrap"
        )]
        decode: DecodeStep,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn read_input(text: Option<String>) -> Result<String, Error> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(buffer)
        }
    }
}

fn require_nonempty(text: &str, reporter: Reporter) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(reporter.messages.get(MessageKey::EmptyInput))
            .with_hint("Pass text as an argument or pipe it on stdin."));
    }
    Ok(())
}

fn decode_step(text: &str, step: DecodeStep) -> Result<String, Error> {
    match step {
        DecodeStep::None => Ok(text.to_string()),
        DecodeStep::ParseEscapes => Ok(decode(text, Variant::ParseEscapes)),
        DecodeStep::Unescape => Ok(decode(text, Variant::Unescape)),
        DecodeStep::Unwrap => advanced_unescape(text),
    }
}

fn run_repair(
    input: &str,
    module: &PathBuf,
    module_args: &[String],
    must: bool,
    reporter: Reporter,
) -> Result<String, Error> {
    let module = CommandModule::new(module).with_args(module_args.iter().cloned());
    let entry = if must {
        RepairEntry::MustRepair
    } else {
        RepairEntry::Repair
    };
    match module.repair(input, entry)? {
        RepairOutput::Result(result) => Ok(result),
        RepairOutput::Error(error) => Err(Error::new(ErrorKind::Repair).with_message(format!(
            "{}: {error}",
            reporter.messages.get(MessageKey::ModuleError)
        ))),
    }
}

/// Pretty-print when the repaired text parses as JSON; otherwise pass it
/// through verbatim.
fn render_repaired(result: &str, reporter: Reporter) -> String {
    match serde_json::from_str::<Value>(result) {
        Ok(value) => {
            let is_tty = io::stdout().is_terminal();
            colorize_json(&value, reporter.color.use_color(is_tty))
        }
        Err(_) => result.to_string(),
    }
}

fn emit_status(severity: Severity, cmd: &str, message: &str, reporter: Reporter) {
    let status = Status::now(severity, cmd, message);
    if reporter.json {
        let json = serde_json::to_string(&status_json(&status)).unwrap_or_else(|_| {
            "{\"status\":{\"severity\":\"error\",\"message\":\"json encode failed\"}}".to_string()
        });
        eprintln!("{json}");
        return;
    }
    let is_tty = io::stderr().is_terminal();
    let use_color = reporter.color.use_color(is_tty);
    let color = match severity {
        Severity::Success => AnsiColor::Green,
        Severity::Error => AnsiColor::Red,
        Severity::Info => AnsiColor::Yellow,
    };
    let label = format!("{}:", severity.as_str());
    eprintln!("{} {message}", colorize_label(&label, use_color, color));
}

fn emit_error(err: &Error, reporter: Reporter) {
    if reporter.json || !io::stderr().is_terminal() {
        let value = error_json(err);
        let json = serde_json::to_string(&value).unwrap_or_else(|_| {
            "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
        });
        eprintln!("{json}");
        return;
    }
    let use_color = reporter.color.use_color(true);
    eprintln!("{}", error_text(err, use_color));
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Repair => "repair failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let subcommand = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: jsonmend "))
        .and_then(|usage| usage.split_whitespace().next())
        .filter(|token| !token.starts_with('-') && !token.starts_with('<') && !token.starts_with('['));

    match subcommand {
        Some(name) => format!("Try `jsonmend {name} --help`."),
        None => "Try `jsonmend --help`.".to_string(),
    }
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

enum AnsiColor {
    Red,
    Yellow,
    Green,
}

#[cfg(test)]
mod tests {
    use super::{
        clap_error_hint, clap_error_summary, decode_step, error_json, error_text, DecodeStep,
    };
    use jsonmend::api::{Error, ErrorKind};

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::Usage).with_message("bad input");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31merror:\u{1b}[0m"));
        assert!(plain.contains("error:"));
        assert!(!plain.contains("\u{1b}["));
    }

    #[test]
    fn error_json_includes_kind_message_and_hint() {
        let err = Error::new(ErrorKind::Repair)
            .with_message("module failed")
            .with_hint("Run the module directly.");
        let value = error_json(&err);
        let inner = value.get("error").and_then(|v| v.as_object()).expect("error");
        assert_eq!(inner.get("kind").and_then(|v| v.as_str()), Some("Repair"));
        assert_eq!(
            inner.get("message").and_then(|v| v.as_str()),
            Some("module failed")
        );
        assert_eq!(
            inner.get("hint").and_then(|v| v.as_str()),
            Some("Run the module directly.")
        );
    }

    #[test]
    fn decode_step_variants_differ_on_v_escape() {
        assert_eq!(decode_step(r"\v", DecodeStep::ParseEscapes).unwrap(), "\u{000b}");
        assert_eq!(decode_step(r"\v", DecodeStep::Unescape).unwrap(), r"\v");
        assert_eq!(decode_step(r"\v", DecodeStep::None).unwrap(), r"\v");
    }

    #[test]
    fn decode_step_unwrap_strips_quotes() {
        assert_eq!(decode_step(r#""a\nb""#, DecodeStep::Unwrap).unwrap(), "a\nb");
    }

    #[test]
    fn clap_error_helpers_produce_usable_text() {
        let err = <super::Cli as clap::CommandFactory>::command()
            .try_get_matches_from(["jsonmend", "repair"])
            .unwrap_err();
        assert!(!clap_error_summary(&err).is_empty());
        assert!(clap_error_hint(&err).contains("--help"));
    }
}
