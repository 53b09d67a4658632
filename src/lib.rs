//! Realtime chat client core: session state, typing presence, and the
//! WebSocket channel they talk through.

pub mod app;
pub mod backoff;
pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod presence;
pub mod session;
pub mod transport;
pub mod view;

pub use client::{ChatSession, View};
pub use config::ClientConfig;
pub use error::ChatError;
pub use frames::{ChatMessage, InboundEvent, OutboundEvent};
