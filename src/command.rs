//! Line commands accepted by the interactive shell.
//!
//! Each command stands in for an action a screen would take against the
//! session context (sign-in success, profile load, logout) or the navigator.

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use crate::router::Screen;
use crate::session::UserProfile;

pub const USAGE: &str = "\
commands:
  token <value>   set the auth token (no value clears it)
  user <json>     set the user profile (no value clears it)
  logout          clear the session
  go <screen>     navigate to Auth, OTP, Feed or ReviewForm
  back            pop the current screen
  show            print the current state
  quit            flush pending writes and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetToken(Option<String>),
    SetUser(Option<UserProfile>),
    Logout,
    Go(Screen),
    Back,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("unknown screen `{0}`")]
    UnknownScreen(String),
    #[error("invalid user JSON: {0}")]
    InvalidUser(#[from] serde_json::Error),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown verbs, unknown screens, missing
/// arguments, or a user payload that is not a valid profile.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let command = match verb.to_ascii_lowercase().as_str() {
        "token" => Command::SetToken(arg.map(str::to_owned)),
        "user" => match arg {
            Some(raw) => Command::SetUser(Some(serde_json::from_str(raw)?)),
            None => Command::SetUser(None),
        },
        "logout" => Command::Logout,
        "go" => {
            let name = arg.ok_or(CommandError::MissingArgument("screen"))?;
            let screen = Screen::from_name(name).ok_or_else(|| CommandError::UnknownScreen(name.to_owned()))?;
            Command::Go(screen)
        }
        "back" => Command::Back,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}
