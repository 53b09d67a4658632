//! Client error type.
//!
//! Only startup and terminal failures are errors. Chat traffic itself is
//! fire-and-forget: a lost emission or an undecodable inbound frame is logged
//! and dropped, never returned.

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid server URL: {0}")]
    InvalidServerUrl(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
