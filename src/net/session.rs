#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::net::frame::{self, OutboundFrame};

/// Lifecycle status of the assistant connection.
///
/// Observable for logging and diagnostics; the only behavior gated on it is
/// the send path, which drops frames unless the socket is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Connecting,
    Open,
    Closed,
    Errored,
}

enum Command {
    Send(String),
    Close,
}

/// One long-lived connection to the assistant endpoint.
///
/// Created once at startup and reused across every navigation and support
/// request until shutdown; never re-created per event. Frames sent while the
/// socket is not open are dropped: no queueing, no reconnect, no error to
/// the caller.
#[derive(Clone)]
pub struct ConnectionSession {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SessionStatus>,
}

impl ConnectionSession {
    /// Start connecting to `endpoint` and return the session handle plus the
    /// stream of inbound frames.
    ///
    /// The connect runs on a spawned task, so this never blocks. Inbound
    /// frames arrive on the returned receiver in receive order; malformed
    /// frames are logged and dropped. The receiver ends when the connection
    /// does.
    #[must_use]
    pub fn connect(endpoint: &str) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SessionStatus::Connecting);
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        tokio::spawn(run(endpoint.to_owned(), command_rx, status_tx, inbound_tx));

        (
            Self {
                commands: command_tx,
                status: status_rx,
            },
            inbound_rx,
        )
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Send one frame if the connection is open; otherwise drop it.
    pub fn send(&self, outbound: &OutboundFrame) {
        let status = self.status();
        if status != SessionStatus::Open {
            tracing::debug!(?status, "connection not open, dropping outbound frame");
            return;
        }
        if self.commands.send(Command::Send(outbound.to_wire())).is_err() {
            tracing::debug!("connection task gone, dropping outbound frame");
        }
    }

    /// Gracefully close the connection. No-op unless it is open; idempotent.
    pub fn close(&self) {
        if self.status() == SessionStatus::Open {
            let _ = self.commands.send(Command::Close);
        }
    }
}

/// Connection task: connect, then pump outbound commands and inbound frames
/// until either side closes.
async fn run(
    endpoint: String,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<SessionStatus>,
    inbound: mpsc::UnboundedSender<Value>,
) {
    let (stream, _) = match connect_async(endpoint.as_str()).await {
        Ok(connected) => connected,
        Err(error) => {
            tracing::warn!(%endpoint, error = %error, "websocket connect failed");
            let _ = status.send(SessionStatus::Errored);
            return;
        }
    };
    tracing::info!(%endpoint, "websocket connected");
    let _ = status.send(SessionStatus::Open);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    if let Err(error) = sink.send(Message::Text(text.into())).await {
                        tracing::warn!(error = %error, "websocket send failed");
                        let _ = status.send(SessionStatus::Errored);
                        return;
                    }
                }
                Some(Command::Close) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    let _ = status.send(SessionStatus::Closed);
                    return;
                }
            },
            message = source.next() => match message {
                Some(Ok(Message::Text(text))) => match frame::parse(text.as_str()) {
                    Ok(value) => {
                        let _ = inbound.send(value);
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "dropping malformed inbound frame");
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("websocket closed by remote");
                    let _ = status.send(SessionStatus::Closed);
                    return;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::warn!(error = %error, "websocket error");
                    let _ = status.send(SessionStatus::Errored);
                    return;
                }
            },
        }
    }
}
