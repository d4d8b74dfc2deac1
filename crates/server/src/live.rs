// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live marketplace event feed.
//!
//! Successful tender and bid mutations are announced to every connected
//! WebSocket client. Events are informational only: clients must still
//! read tenders and bids over HTTP for authoritative data, and nothing a
//! client sends over the socket is executed.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 100;

/// Marketplace event announced after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    TenderCreated {
        tender_id: String,
    },
    TenderStatusChanged {
        tender_id: String,
        status: String,
        version: i32,
    },
    TenderEdited {
        tender_id: String,
        version: i32,
    },
    TenderRolledBack {
        tender_id: String,
        version: i32,
    },
    BidCreated {
        bid_id: String,
    },
    BidStatusChanged {
        bid_id: String,
        status: String,
        version: i32,
    },
    BidEdited {
        bid_id: String,
        version: i32,
    },
    BidRolledBack {
        bid_id: String,
        version: i32,
    },
    /// A tender owner's vote on a bid was recorded.
    DecisionRecorded {
        bid_id: String,
        decision: String,
    },
    /// A vote reached quorum and closed the bid's tender.
    TenderAwarded {
        bid_id: String,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

/// Fan-out of marketplace events to WebSocket clients.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<MarketEvent>,
}

impl LiveEventBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Never blocks. With no clients connected the event is dropped.
    pub fn broadcast(&self, event: MarketEvent) {
        match self.tx.send(event) {
            Ok(count) => debug!(receivers = count, "Broadcast market event"),
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "No receivers for market event");
            }
        }
    }

    /// Returns a receiver for events sent from now on.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the request to a WebSocket and streams market events over it.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then streams events until the client
/// disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<MarketEvent> = broadcaster.subscribe();

    let connected_event = MarketEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(?e, "Failed to serialize market event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
