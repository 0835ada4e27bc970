//! Line-oriented command parsing for the terminal front end.

use crate::types::{BoardAction, ToastId, TodoId};
use thiserror::Error;

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send an action to the store
    Dispatch(BoardAction),
    /// Print the board
    Show,
    /// Print the command summary
    Help,
    /// Leave the program
    Quit,
}

/// Rejected input line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing was typed
    #[error("empty command")]
    Empty,

    /// The first word is not a command
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The command needs an argument
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    /// The argument is not a number
    #[error("not a valid id: {0}")]
    InvalidId(String),
}

/// Usage summary printed by `help`
pub const HELP: &str = "\
commands:
  add <text>          add an item
  type <text>         set the input field
  submit              add the input field's text
  toggle <id>         flip an item's completed flag
  clear               delete all items
  clear-done          delete completed items
  close <toast-id>    close a toast
  hover <toast-id>    pause a toast
  leave <toast-id>    resume a toast
  show                print the board
  help                print this summary
  quit                exit";

/// Parses one input line
///
/// Text arguments are taken verbatim after the first space so leading and
/// trailing whitespace survive.
///
/// # Errors
///
/// Returns [`CommandError`] when the line is not a known command or an
/// argument is missing or malformed.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    let action = match word {
        "" => return Err(CommandError::Empty),
        "show" => return Ok(Command::Show),
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "add" => BoardAction::AddTodo {
            text: rest.to_string(),
        },
        "type" => BoardAction::DraftChanged {
            text: rest.to_string(),
        },
        "submit" => BoardAction::SubmitDraft,
        "toggle" => BoardAction::ToggleTodo {
            id: TodoId::new(number("toggle", rest)?),
        },
        "clear" => BoardAction::DeleteAll,
        "clear-done" => BoardAction::DeleteCompleted,
        "close" => BoardAction::DismissToast {
            id: ToastId::new(number("close", rest)?),
        },
        "hover" => BoardAction::ToastHovered {
            id: ToastId::new(number("hover", rest)?),
        },
        "leave" => BoardAction::ToastUnhovered {
            id: ToastId::new(number("leave", rest)?),
        },
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Command::Dispatch(action))
}

fn number<T: std::str::FromStr>(command: &'static str, arg: &str) -> Result<T, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}
