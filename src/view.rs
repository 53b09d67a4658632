//! Terminal rendering of the chat history and typing line.

use std::io::Write;

use frames::ChatMessage;
use tracing::debug;

use crate::client::View;

/// Writes chat output line by line. Appending always lands at the bottom,
/// which is the terminal's scroll-to-bottom.
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            debug!(%error, "terminal write failed");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn message_appended(&mut self, message: &ChatMessage, own: bool) {
        let line = format_message(message, own);
        self.write_line(&line);
    }

    fn typing_changed(&mut self, display: &str) {
        let line = format_typing_line(display);
        self.write_line(&line);
    }
}

/// `name: text`, with own messages marked and continuation lines indented.
#[must_use]
pub fn format_message(message: &ChatMessage, own: bool) -> String {
    let marker = if own { " (you)" } else { "" };
    let body = message.text.replace('\n', "\n    ");
    format!("{}{marker}: {body}", message.sender_name)
}

#[must_use]
pub fn format_typing_line(display: &str) -> String {
    if display.is_empty() {
        "* nobody is typing".to_owned()
    } else {
        format!("* {display}")
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
