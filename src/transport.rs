//! WebSocket transport: the external channel over `tokio-tungstenite`.
//!
//! DESIGN
//! ======
//! `subscribe` is called once per session. It spawns one background task that
//! owns the socket and returns:
//! - a [`WsChannel`] for fire-and-forget emission,
//! - a receiver of decoded [`InboundEvent`]s,
//! - a [`Subscription`] guard; dropping it aborts the task and closes the socket.
//!
//! LIFECYCLE
//! =========
//! 1. Connect → pump frames both ways until the socket closes or errors
//! 2. Disconnect → wait a jittered backoff delay → reconnect (unless disabled)
//! 3. While offline, outbound events are dropped, not queued
//!
//! Undecodable frames and unknown events are logged and skipped.

use frames::{Frame, InboundEvent, OutboundEvent};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::backoff::Backoff;
use crate::channel::Channel;
use crate::config::{ClientConfig, ReconnectPolicy, WireFormat};

/// Outbound half of the transport.
#[derive(Clone, Debug)]
pub struct WsChannel {
    outbound: mpsc::UnboundedSender<OutboundEvent>,
}

impl Channel for WsChannel {
    fn emit(&self, event: OutboundEvent) {
        let name = event.name();
        if self.outbound.send(event).is_err() {
            debug!(event = name, "transport stopped; event dropped");
        }
    }
}

/// Keeps the transport task alive. Dropping it tears the connection down.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Whether the transport task has ended (reconnect disabled and the
    /// connection is gone).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Open the channel described by `config`.
#[must_use]
pub fn subscribe(config: &ClientConfig) -> (WsChannel, mpsc::UnboundedReceiver<InboundEvent>, Subscription) {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run_transport(
        config.ws_url.clone(),
        config.wire_format,
        config.reconnect,
        outbound_rx,
        inbound_tx,
    ));

    (WsChannel { outbound: outbound_tx }, inbound_rx, Subscription { task })
}

// =============================================================================
// CONNECTION LOOP
// =============================================================================

enum PumpExit {
    /// Socket closed or failed; a reconnect may follow.
    Disconnected,
    /// The session side is gone; stop for good.
    SessionClosed,
}

async fn run_transport(
    url: String,
    format: WireFormat,
    policy: ReconnectPolicy,
    mut outbound_rx: mpsc::UnboundedReceiver<OutboundEvent>,
    inbound_tx: mpsc::UnboundedSender<InboundEvent>,
) {
    let mut backoff = Backoff::from_policy(&policy);

    loop {
        let connected = tokio::select! {
            result = tokio_tungstenite::connect_async(url.as_str()) => result,
            () = drop_while_offline(&mut outbound_rx) => return,
        };

        match connected {
            Ok((stream, _)) => {
                info!(%url, "channel connected");
                backoff.reset();
                match pump(stream, format, &mut outbound_rx, &inbound_tx).await {
                    PumpExit::SessionClosed => return,
                    PumpExit::Disconnected => warn!(%url, "channel disconnected"),
                }
            }
            Err(error) => warn!(%url, %error, "channel connect failed"),
        }

        if !policy.enabled {
            info!("reconnect disabled; transport stopping");
            return;
        }

        let delay = backoff.next_delay();
        debug!(delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), "reconnecting");
        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            () = drop_while_offline(&mut outbound_rx) => return,
        }
    }
}

/// Discard outbound events until the session side hangs up.
async fn drop_while_offline(outbound_rx: &mut mpsc::UnboundedReceiver<OutboundEvent>) {
    while let Some(event) = outbound_rx.recv().await {
        debug!(event = event.name(), "channel offline; event dropped");
    }
}

async fn pump<S>(
    stream: WebSocketStream<S>,
    format: WireFormat,
    outbound_rx: &mut mpsc::UnboundedReceiver<OutboundEvent>,
    inbound_tx: &mpsc::UnboundedSender<InboundEvent>,
) -> PumpExit
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(event) = outbound else {
                    let _ = write.send(Message::Close(None)).await;
                    return PumpExit::SessionClosed;
                };
                let frame = event.to_frame();
                if let Err(error) = write.send(encode_message(&frame, format)).await {
                    debug!(event = event.name(), %error, "emit failed; event dropped");
                    return PumpExit::Disconnected;
                }
            }
            inbound = read.next() => {
                let message = match inbound {
                    Some(Ok(message)) => message,
                    Some(Err(error)) => {
                        debug!(%error, "channel read failed");
                        return PumpExit::Disconnected;
                    }
                    None => return PumpExit::Disconnected,
                };
                if matches!(message, Message::Close(_)) {
                    return PumpExit::Disconnected;
                }
                if let Some(event) = decode_message(&message) {
                    if inbound_tx.send(event).is_err() {
                        return PumpExit::SessionClosed;
                    }
                }
            }
        }
    }
}

// =============================================================================
// FRAME <-> MESSAGE
// =============================================================================

fn encode_message(frame: &Frame, format: WireFormat) -> Message {
    match format {
        WireFormat::Json => Message::Text(frames::encode_text(frame).into()),
        WireFormat::Binary => Message::Binary(frames::encode_frame(frame).into()),
    }
}

/// Decode one socket message into an inbound event. Either encoding is
/// accepted; control messages and bad frames yield `None`.
fn decode_message(message: &Message) -> Option<InboundEvent> {
    let decoded = match message {
        Message::Text(text) => frames::decode_text(text.as_str()),
        Message::Binary(bytes) => frames::decode_frame(bytes),
        _ => return None,
    };

    let frame = match decoded {
        Ok(frame) => frame,
        Err(error) => {
            warn!(%error, "undecodable frame dropped");
            return None;
        }
    };

    match InboundEvent::from_frame(&frame) {
        Ok(event) => Some(event),
        Err(error) => {
            warn!(id = %frame.id, event = %frame.event, %error, "inbound event dropped");
            None
        }
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
