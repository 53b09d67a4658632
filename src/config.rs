//! Client configuration parsed from command-line flags and environment variables.
//!
//! Every flag has an environment fallback (`PARLEY_*`). `ClientConfig` is the
//! validated form handed to the rest of the client.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::ChatError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001";
pub const DEFAULT_TYPING_DEBOUNCE_MS: u64 = 3000;
pub const DEFAULT_RECONNECT_INITIAL_MS: u64 = 1000;
pub const DEFAULT_RECONNECT_MAX_MS: u64 = 5000;

/// Fraction of each reconnect delay that is randomized (±).
pub const RECONNECT_JITTER: f64 = 0.5;

/// Encoding used for outbound frames. Inbound frames are accepted in either.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WireFormat {
    /// JSON text messages.
    #[default]
    Json,
    /// Protobuf binary messages.
    Binary,
}

#[derive(Parser, Debug)]
#[command(name = "parley", about = "Realtime chat client with typing presence")]
pub struct CliArgs {
    /// Chat server endpoint (http, https, ws or wss).
    #[arg(long, env = "PARLEY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Display name. Sending stays disabled until a name is set.
    #[arg(long, env = "PARLEY_USER_NAME", default_value = "")]
    pub name: String,

    /// Quiet period after the last draft edit before typing is considered stopped.
    #[arg(long, env = "PARLEY_TYPING_DEBOUNCE_MS", default_value_t = DEFAULT_TYPING_DEBOUNCE_MS)]
    pub typing_debounce_ms: u64,

    #[arg(long, env = "PARLEY_WIRE_FORMAT", value_enum, default_value_t = WireFormat::Json)]
    pub wire_format: WireFormat,

    #[arg(long, env = "PARLEY_RECONNECT_INITIAL_MS", default_value_t = DEFAULT_RECONNECT_INITIAL_MS)]
    pub reconnect_initial_ms: u64,

    #[arg(long, env = "PARLEY_RECONNECT_MAX_MS", default_value_t = DEFAULT_RECONNECT_MAX_MS)]
    pub reconnect_max_ms: u64,

    /// Give up after the first disconnect instead of reconnecting.
    #[arg(long, env = "PARLEY_NO_RECONNECT")]
    pub no_reconnect: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub enabled: bool,
    pub initial: Duration,
    pub max: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            initial: Duration::from_millis(DEFAULT_RECONNECT_INITIAL_MS),
            max: Duration::from_millis(DEFAULT_RECONNECT_MAX_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL (`ws://` or `wss://`).
    pub ws_url: String,
    /// Initial display name; empty means not yet joined.
    pub user_name: String,
    pub typing_debounce: Duration,
    pub wire_format: WireFormat,
    pub reconnect: ReconnectPolicy,
}

impl ClientConfig {
    /// Validate parsed arguments into a typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidServerUrl`] for unsupported URL schemes and
    /// [`ChatError::InvalidConfig`] for zero or inverted durations.
    pub fn from_args(args: CliArgs) -> Result<Self, ChatError> {
        let ws_url = ws_url(&args.server_url)?;

        if args.typing_debounce_ms == 0 {
            return Err(ChatError::InvalidConfig("typing debounce must be greater than zero".into()));
        }
        if args.reconnect_initial_ms == 0 {
            return Err(ChatError::InvalidConfig("reconnect initial delay must be greater than zero".into()));
        }
        if args.reconnect_max_ms < args.reconnect_initial_ms {
            return Err(ChatError::InvalidConfig(format!(
                "reconnect max delay ({}ms) is below initial delay ({}ms)",
                args.reconnect_max_ms, args.reconnect_initial_ms
            )));
        }

        Ok(Self {
            ws_url,
            user_name: args.name,
            typing_debounce: Duration::from_millis(args.typing_debounce_ms),
            wire_format: args.wire_format,
            reconnect: ReconnectPolicy {
                enabled: !args.no_reconnect,
                initial: Duration::from_millis(args.reconnect_initial_ms),
                max: Duration::from_millis(args.reconnect_max_ms),
            },
        })
    }
}

/// Map a server endpoint to its WebSocket URL.
///
/// `http` becomes `ws` and `https` becomes `wss`; WebSocket URLs pass through.
///
/// # Errors
///
/// Returns [`ChatError::InvalidServerUrl`] for any other scheme.
pub fn ws_url(server_url: &str) -> Result<String, ChatError> {
    let trimmed = server_url.trim();
    if let Some(rest) = trimmed.strip_prefix("http://") {
        return Ok(format!("ws://{rest}"));
    }
    if let Some(rest) = trimmed.strip_prefix("https://") {
        return Ok(format!("wss://{rest}"));
    }
    if trimmed.starts_with("ws://") || trimmed.starts_with("wss://") {
        return Ok(trimmed.to_owned());
    }

    Err(ChatError::InvalidServerUrl(server_url.to_owned()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
