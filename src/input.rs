//! Line commands typed into the terminal.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `/name <name>`; an empty name leaves the chat.
    SetName(String),
    /// `/draft <text>` replaces the draft as a user edit.
    EditDraft(String),
    /// `/send`
    Send,
    /// Plain line: edit the draft to this text, then send it.
    Say(String),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  /name <name>    set your display name (required before sending)
  /draft <text>   edit the draft (others see you typing)
  /send           send the draft
  /help           show this help
  /quit, /exit    leave
  <text>          send a line right away (start with // to send a leading /)";

/// Parse one input line. Blank lines yield `None`.
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    if let Some(escaped) = line.strip_prefix("//") {
        return Some(Command::Say(format!("/{escaped}")));
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Say(line.to_owned()));
    };

    let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    let command = match name {
        "name" => Command::SetName(arg.trim().to_owned()),
        "draft" => Command::EditDraft(arg.to_owned()),
        "send" => Command::Send,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_owned()),
    };
    Some(command)
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
