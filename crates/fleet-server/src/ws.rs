use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use fleet_feed::EventStream;

use crate::registry::Registry;

/// A send that has not completed by this deadline marks the observer dead.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// `GET /ws` — upgrade to a push-only observer connection.
///
/// The subscription is taken before the upgrade completes, so the observer
/// cannot miss an event committed between upgrade and first poll.
pub async fn ws_handler(ws: WebSocketUpgrade, State(registry): State<Registry>) -> Response {
    let events = registry.subscribe();
    ws.on_upgrade(move |socket| observe(socket, events))
}

async fn observe(socket: WebSocket, events: EventStream) {
    debug!("observer connected");
    let (sink, stream) = socket.split();
    pump(sink, stream, events).await;
}

/// Pump change events into one observer socket until it closes, fails, or
/// stops accepting sends.
///
/// Dropping the receiver on return deregisters the observer from the feed.
async fn pump<Si, St, E>(mut sink: Si, mut stream: St, mut events: EventStream)
where
    Si: Sink<Message> + Unpin,
    St: Stream<Item = Result<Message, E>> + Unpin,
{
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(err) => {
                            warn!(error = %err, "event serialization failed");
                            continue;
                        }
                    };
                    match tokio::time::timeout(SEND_TIMEOUT, sink.send(Message::Text(text))).await {
                        Ok(Ok(())) => {}
                        Ok(Err(_)) => {
                            debug!("observer unreachable, dropping connection");
                            break;
                        }
                        Err(_) => {
                            debug!("observer send timed out, dropping connection");
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // The observer fell behind the buffer; those events are
                    // gone for it, delivery resumes from the next one.
                    warn!(missed, "observer lagged behind the change feed");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                // The channel is push-only; inbound frames are ignored.
                Some(Ok(_)) => {}
                Some(Err(_)) | None => {
                    debug!("observer disconnected");
                    break;
                }
            },
        }
    }
}
