//! Terminal chat loop.
//!
//! One `select!` loop drives the whole session serially: stdin commands,
//! inbound channel events, typing timer expiries, and Ctrl-C. The transport is
//! subscribed once here and released when the loop ends.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::channel::Channel;
use crate::client::{ChatSession, View};
use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::input::{self, Command};
use crate::transport;
use crate::view::TerminalView;

/// Run the interactive client until `/quit`, end of input, Ctrl-C, or (with
/// reconnect disabled) the connection closing.
///
/// # Errors
///
/// Returns [`ChatError::Io`] when reading the terminal fails.
pub async fn run(config: ClientConfig) -> Result<(), ChatError> {
    let (channel, mut inbound, subscription) = transport::subscribe(&config);
    let view = TerminalView::new(std::io::stdout());
    let (mut session, mut expired) = ChatSession::new(channel, view, config.typing_debounce);
    if !config.user_name.is_empty() {
        session.set_user_name(config.user_name.as_str());
    }

    let mut out = std::io::stdout();
    notice(&mut out, input::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("input closed");
                    break;
                };
                let Some(command) = input::parse_command(&line) else {
                    continue;
                };
                if command == Command::Quit {
                    break;
                }
                apply_command(&mut session, command, &mut out);
            }
            event = inbound.recv() => {
                let Some(event) = event else {
                    info!("channel closed");
                    break;
                };
                session.handle_inbound(event);
            }
            Some(timer) = expired.recv() => {
                session.handle_timer_expired(timer);
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }

    drop(subscription);
    Ok(())
}

/// Apply one parsed command to the session. Hints for the user go to `out`.
fn apply_command<C: Channel, V: View>(session: &mut ChatSession<C, V>, command: Command, out: &mut impl Write) {
    match command {
        Command::SetName(name) => {
            session.set_user_name(name);
            if session.state().can_send() {
                let line = format!("* you are {}", session.state().user_name());
                notice(out, &line);
            } else {
                notice(out, "* no name set; sending disabled");
            }
        }
        Command::EditDraft(text) => session.edit_draft(text),
        Command::Send => send(session, out),
        Command::Say(text) => {
            session.edit_draft(text);
            send(session, out);
        }
        Command::Help => notice(out, input::HELP),
        Command::Unknown(name) => notice(out, &format!("* unknown command /{name}; try /help")),
        Command::Quit => {}
    }
}

fn send<C: Channel, V: View>(session: &mut ChatSession<C, V>, out: &mut impl Write) {
    if !session.send_current_draft() && !session.state().can_send() {
        notice(out, "* set a name with /name before sending");
    }
}

fn notice(out: &mut impl Write, line: &str) {
    if let Err(error) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        debug!(%error, "terminal write failed");
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
