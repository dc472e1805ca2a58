//! Terminal front end for the dashboard.
//!
//! Reads one command per line from stdin. Wall-clock time between commands
//! drives the widget timers, so `wait 1000` (or just typing slowly) lets the
//! clock tick and pending fetches resolve.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use hookboard_core::prelude::*;
use hookboard_widgets::{Dashboard, Document, Field, WidgetConfig};
use web_time::Instant;

/// Terminal dashboard of state-management widgets.
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(version, long_about = None)]
struct Opts {
    /// Directory holding persisted preferences
    #[arg(long, env = "HOOKBOARD_STORAGE_DIR", default_value = "./.hookboard")]
    storage_dir: PathBuf,

    /// JSON file overriding the widget defaults
    #[arg(long, env = "HOOKBOARD_CONFIG", value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Counter widget
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },
    /// Live clock
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },
    /// Profile loader
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Learning checklist
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// Contact form
    Form {
        #[command(subcommand)]
        action: FormAction,
    },
    /// Theme switcher
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Smart notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Press a showcase button
    Button { index: usize },
    /// Sleep so timers can fire
    Wait { ms: u64 },
    /// Print the whole dashboard
    Show,
    /// List commands
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Subcommand)]
enum CounterAction {
    Inc,
    Dec,
    Reset,
}

#[derive(Debug, PartialEq, Subcommand)]
enum ClockAction {
    /// Toggle the leaky interval mode
    Bad,
}

#[derive(Debug, PartialEq, Subcommand)]
enum ProfileAction {
    Retry,
    Signout,
}

#[derive(Debug, PartialEq, Subcommand)]
enum TodoAction {
    Toggle { id: u32 },
}

#[derive(Debug, PartialEq, Subcommand)]
enum FormAction {
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    Email {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    Message {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    Submit,
    Delete { id: u32 },
    Clear,
}

#[derive(Debug, PartialEq, Subcommand)]
enum ThemeAction {
    Toggle,
}

#[derive(Debug, PartialEq, Subcommand)]
enum NoteAction {
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    Clear,
}

fn parse(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

struct StdoutDocument;

impl Document for StdoutDocument {
    fn set_body_class(&self, class: &str) {
        println!("(document body class is now `{class}`)");
    }
}

/// Returns `false` once the session should end.
fn apply(board: &Dashboard, cmd: Command) -> bool {
    match cmd {
        Command::Counter { action } => match action {
            CounterAction::Inc => board.counter().increment(),
            CounterAction::Dec => board.counter().decrement(),
            CounterAction::Reset => board.counter().reset(),
        },
        Command::Clock {
            action: ClockAction::Bad,
        } => board.clock().toggle_bad_mode(),
        Command::Profile { action } => match action {
            ProfileAction::Retry => board.profile().retry(),
            ProfileAction::Signout => board.profile().sign_out(),
        },
        Command::Todo {
            action: TodoAction::Toggle { id },
        } => board.todos().toggle(id),
        Command::Form { action } => match action {
            FormAction::Name { text } => board.contact().change(Field::Name, text.join(" ")),
            FormAction::Email { text } => board.contact().change(Field::Email, text.join(" ")),
            FormAction::Message { text } => {
                board.contact().change(Field::Message, text.join(" "))
            }
            FormAction::Submit => {
                if !board.contact().submit() {
                    println!("not submitted: {:?}", board.contact().errors());
                }
            }
            FormAction::Delete { id } => board.contact().delete(id),
            FormAction::Clear => board.contact().delete_all(),
        },
        Command::Theme {
            action: ThemeAction::Toggle,
        } => board.theme_toggle().toggle(),
        Command::Note { action } => match action {
            NoteAction::Add { text } => {
                board.notes().set_draft(text.join(" "));
                if !board.notes().add_draft() {
                    println!("empty notes are ignored");
                }
            }
            NoteAction::Clear => board.notes().clear(),
        },
        Command::Button { index } => {
            if board.buttons().click(index) {
                if let Some(alert) = board.buttons().last_alert() {
                    println!("alert: {alert}");
                }
            } else {
                println!("button {index} is disabled or missing");
            }
        }
        Command::Wait { ms } => std::thread::sleep(Duration::from_millis(ms)),
        Command::Show => print!("{}", board.render().render_text()),
        Command::Help => println!("{}", Line::command().render_help()),
        Command::Quit => return false,
    }
    true
}

fn load_config(path: Option<&Path>) -> anyhow::Result<WidgetConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(WidgetConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let config = load_config(opts.config.as_deref())?;
    let dir = opts.storage_dir;
    let storage = FileStorage::new(&dir)
        .with_context(|| format!("opening storage in {}", dir.display()))?;
    log::info!("storing preferences in {}", dir.display());

    let rt = Runtime::builder().storage(Rc::new(storage)).build();
    let board = Dashboard::new(&rt, &config, Rc::new(StdoutDocument));

    println!("{}", Line::command().render_help());
    let mut last = Instant::now();
    let stdin = io::stdin();
    let mut out = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let running = match parse(&line) {
            Ok(cmd) => apply(&board, cmd),
            Err(e) => {
                println!("{e}");
                true
            }
        };

        let now = Instant::now();
        let fired = rt.advance(now.duration_since(last));
        last = now;
        log::debug!("{fired} timers fired");

        if !running {
            break;
        }
        out.flush()?;
    }

    board.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn opts_are_well_formed() {
        Opts::command().debug_assert();
        Line::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let opts = Opts::try_parse_from([
            "dashboard",
            "--storage-dir",
            "/tmp/hb",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(opts.storage_dir, PathBuf::from("/tmp/hb"));
        assert_eq!(opts.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn parses_subcommands_with_free_text() {
        assert_eq!(
            parse("counter inc").unwrap(),
            Command::Counter {
                action: CounterAction::Inc
            }
        );
        assert_eq!(
            parse("form message hello there").unwrap(),
            Command::Form {
                action: FormAction::Message {
                    text: words("hello there")
                }
            }
        );
        assert_eq!(
            parse("note add  buy milk ").unwrap(),
            Command::Note {
                action: NoteAction::Add {
                    text: words("buy milk")
                }
            }
        );
        assert_eq!(
            parse("todo toggle 3").unwrap(),
            Command::Todo {
                action: TodoAction::Toggle { id: 3 }
            }
        );
        assert_eq!(parse("wait 250").unwrap(), Command::Wait { ms: 250 });
        assert_eq!(parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn any_whitespace_separates_words() {
        assert_eq!(
            parse("note\tadd hi").unwrap(),
            Command::Note {
                action: NoteAction::Add { text: words("hi") }
            }
        );
        assert_eq!(
            parse("  form\temail  a@b.co ").unwrap(),
            Command::Form {
                action: FormAction::Email {
                    text: words("a@b.co")
                }
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("").is_err());
        assert!(parse("todo toggle x").is_err());
        assert!(parse("form phone 123").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn session_drives_widgets() {
        let rt = Runtime::builder()
            .random(SequenceRandom::new([0.1]))
            .build();
        let board = Dashboard::new(&rt, &WidgetConfig::default(), Rc::new(StdoutDocument));
        for line in ["counter inc", "counter inc", "todo toggle 3", "note add hi there"] {
            assert!(apply(&board, parse(line).unwrap()));
        }
        assert_eq!(board.counter().value(), 2);
        assert_eq!(board.todos().progress(), (3, 5));
        assert_eq!(board.notes().notes(), vec!["hi there"]);
        assert!(!apply(&board, Command::Quit));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(load_config(None).is_ok());
        assert!(load_config(Some(Path::new("/nonexistent/hookboard.json"))).is_err());
    }
}
