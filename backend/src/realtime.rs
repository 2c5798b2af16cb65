//! Realtime ticket-change feed
//!
//! Phoenix-style channel over a WebSocket: join a topic scoped to one
//! campaign's tickets, keep the socket alive with heartbeats, and surface
//! row changes as typed notifications. Consumers treat a notification as
//! "the board is stale" and refetch; no incremental merging happens here.
//!
//! The channel is single-shot like the rest of this crate: a socket error
//! or server close ends the feed (the change receiver yields `None`), and
//! reconnecting is the caller's decision.

use crate::{config::BackendConfig, error::BackendError};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use uuid::Uuid;

/// Keepalive cadence expected by the realtime service
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Change notifications buffered before the pump starts dropping
const CHANGE_BUFFER: usize = 64;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Kind of row change behind a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketChangeKind {
    /// A ticket row was inserted
    Insert,
    /// A ticket row was updated (reserve, purchase, release)
    Update,
    /// A ticket row was deleted
    Delete,
}

/// A ticket row changed server-side
///
/// Field values come from the change payload when present; consumers must
/// not rely on them for state (the follow-up refetch is authoritative).
#[derive(Clone, Debug, PartialEq)]
pub struct TicketChange {
    /// What happened to the row
    pub kind: TicketChangeKind,
    /// Campaign the subscription was scoped to
    pub campaign_id: Uuid,
    /// Quota number of the changed row, when the payload carried it
    pub quota_number: Option<i64>,
    /// New status of the row, when the payload carried it
    pub status: Option<String>,
}

/// Wire frame of the Phoenix channel protocol
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SocketMessage {
    topic: String,
    event: String,
    payload: serde_json::Value,
    #[serde(rename = "ref")]
    reference: Option<String>,
}

/// Live subscription to one campaign's ticket changes
///
/// Created with [`RealtimeChannel::connect`]; changes arrive through
/// [`RealtimeChannel::recv`]. Dropping the channel (or calling
/// [`RealtimeChannel::close`]) leaves the topic and closes the socket.
pub struct RealtimeChannel {
    changes: mpsc::Receiver<TicketChange>,
    stop: watch::Sender<bool>,
    pump: tokio::task::JoinHandle<()>,
}

impl RealtimeChannel {
    /// Connect and join the ticket topic for one campaign
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Realtime`] when the socket cannot be
    /// established or the join frame cannot be sent.
    pub async fn connect(
        config: &BackendConfig,
        campaign_id: Uuid,
    ) -> Result<Self, BackendError> {
        let url = format!(
            "{}?apikey={}&vsn=1.0.0",
            config.realtime_url, config.api_key
        );

        let (mut socket, _response) = connect_async(url)
            .await
            .map_err(|e| BackendError::Realtime(format!("connect failed: {e}")))?;

        let topic = ticket_topic(campaign_id);
        tracing::debug!(%campaign_id, topic, "Joining realtime topic");

        let join = SocketMessage {
            topic: topic.clone(),
            event: "phx_join".to_string(),
            payload: json!({}),
            reference: Some("1".to_string()),
        };
        send_frame(&mut socket, &join).await?;

        let (change_tx, change_rx) = mpsc::channel(CHANGE_BUFFER);
        let (stop_tx, stop_rx) = watch::channel(false);

        let pump = tokio::spawn(pump_socket(socket, topic, campaign_id, change_tx, stop_rx));

        Ok(Self {
            changes: change_rx,
            stop: stop_tx,
            pump,
        })
    }

    /// Receive the next change notification
    ///
    /// Returns `None` once the feed has ended (socket closed or errored).
    pub async fn recv(&mut self) -> Option<TicketChange> {
        self.changes.recv().await
    }

    /// Leave the topic and close the socket
    ///
    /// Waits for the pump task to finish its teardown.
    pub async fn close(self) {
        let _ = self.stop.send(true);
        let _ = self.pump.await;
    }
}

/// Topic for one campaign's ticket changes
fn ticket_topic(campaign_id: Uuid) -> String {
    format!("realtime:public:tickets:campaign_id=eq.{campaign_id}")
}

async fn send_frame(socket: &mut Socket, frame: &SocketMessage) -> Result<(), BackendError> {
    let text = serde_json::to_string(frame)
        .map_err(|e| BackendError::Realtime(format!("encode failed: {e}")))?;
    socket
        .send(Message::Text(text))
        .await
        .map_err(|e| BackendError::Realtime(format!("send failed: {e}")))
}

/// Socket pump: heartbeats out, change notifications in
///
/// Ends on stop signal, socket error, or server close. On stop it leaves
/// the topic and sends a close frame before returning.
async fn pump_socket(
    socket: Socket,
    topic: String,
    campaign_id: Uuid,
    changes: mpsc::Sender<TicketChange>,
    mut stop: watch::Receiver<bool>,
) {
    let (mut sink, mut stream) = socket.split();
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    // The first tick fires immediately; the join frame just went out, skip it
    heartbeat.tick().await;
    let mut frame_ref: u64 = 1;

    loop {
        tokio::select! {
            _ = stop.changed() => {
                frame_ref += 1;
                let leave = SocketMessage {
                    topic: topic.clone(),
                    event: "phx_leave".to_string(),
                    payload: json!({}),
                    reference: Some(frame_ref.to_string()),
                };
                if let Ok(text) = serde_json::to_string(&leave) {
                    let _ = sink.send(Message::Text(text)).await;
                }
                let _ = sink.send(Message::Close(None)).await;
                tracing::debug!(%campaign_id, "Realtime channel closed");
                break;
            }
            _ = heartbeat.tick() => {
                frame_ref += 1;
                let ping = SocketMessage {
                    topic: "phoenix".to_string(),
                    event: "heartbeat".to_string(),
                    payload: json!({}),
                    reference: Some(frame_ref.to_string()),
                };
                match serde_json::to_string(&ping) {
                    Ok(text) => {
                        if sink.send(Message::Text(text)).await.is_err() {
                            tracing::warn!(%campaign_id, "Realtime heartbeat failed, closing feed");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode heartbeat");
                    }
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(change) = parse_change(&text, campaign_id) {
                            tracing::debug!(
                                %campaign_id,
                                kind = ?change.kind,
                                quota_number = ?change.quota_number,
                                "Ticket change notification"
                            );
                            if changes.try_send(change).is_err() {
                                // Receiver slow or gone; a later notification
                                // triggers the same full refetch
                                tracing::debug!(%campaign_id, "Dropped realtime change");
                            }
                        }
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(%campaign_id, "Realtime socket closed by server");
                        break;
                    }
                    Some(Ok(_)) => {} // Binary frames are not part of this protocol
                    Some(Err(e)) => {
                        tracing::warn!(%campaign_id, error = %e, "Realtime socket error");
                        break;
                    }
                }
            }
        }
    }
}

/// Parse an incoming frame into a change notification
///
/// Non-change frames (join replies, presence, unknown events) return `None`.
fn parse_change(text: &str, campaign_id: Uuid) -> Option<TicketChange> {
    let message: SocketMessage = serde_json::from_str(text).ok()?;

    let kind = match message.event.as_str() {
        "INSERT" => TicketChangeKind::Insert,
        "UPDATE" => TicketChangeKind::Update,
        "DELETE" => TicketChangeKind::Delete,
        "phx_reply" => {
            tracing::trace!(reference = ?message.reference, "Realtime reply frame");
            return None;
        },
        _ => return None,
    };

    // DELETE frames carry the row under old_record instead
    let record = message
        .payload
        .get("record")
        .or_else(|| message.payload.get("old_record"));

    let quota_number = record
        .and_then(|r| r.get("quota_number"))
        .and_then(serde_json::Value::as_i64);
    let status = record
        .and_then(|r| r.get("status"))
        .and_then(serde_json::Value::as_str)
        .map(String::from);

    Some(TicketChange {
        kind,
        campaign_id,
        quota_number,
        status,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_scoped_to_campaign() {
        let id = Uuid::parse_str("2c7c1f51-4c70-4e9f-9de6-4a97c2c8be01").unwrap();
        assert_eq!(
            ticket_topic(id),
            "realtime:public:tickets:campaign_id=eq.2c7c1f51-4c70-4e9f-9de6-4a97c2c8be01"
        );
    }

    #[test]
    fn join_frame_serializes_ref_key() {
        let join = SocketMessage {
            topic: "realtime:public:tickets:campaign_id=eq.x".to_string(),
            event: "phx_join".to_string(),
            payload: json!({}),
            reference: Some("1".to_string()),
        };
        let text = serde_json::to_string(&join).unwrap();
        assert!(text.contains(r#""ref":"1""#));
        assert!(text.contains(r#""event":"phx_join""#));
    }

    #[test]
    fn parses_update_frame_into_change() {
        let campaign_id = Uuid::new_v4();
        let frame = json!({
            "topic": ticket_topic(campaign_id),
            "event": "UPDATE",
            "payload": {
                "record": { "quota_number": 41, "status": "reservado" }
            },
            "ref": null
        })
        .to_string();

        let change = parse_change(&frame, campaign_id).unwrap();
        assert_eq!(change.kind, TicketChangeKind::Update);
        assert_eq!(change.quota_number, Some(41));
        assert_eq!(change.status.as_deref(), Some("reservado"));
    }

    #[test]
    fn delete_frame_reads_old_record() {
        let campaign_id = Uuid::new_v4();
        let frame = json!({
            "topic": ticket_topic(campaign_id),
            "event": "DELETE",
            "payload": {
                "old_record": { "quota_number": 9, "status": "disponivel" }
            },
            "ref": null
        })
        .to_string();

        let change = parse_change(&frame, campaign_id).unwrap();
        assert_eq!(change.kind, TicketChangeKind::Delete);
        assert_eq!(change.quota_number, Some(9));
    }

    #[test]
    fn reply_frames_are_not_changes() {
        let campaign_id = Uuid::new_v4();
        let frame = json!({
            "topic": ticket_topic(campaign_id),
            "event": "phx_reply",
            "payload": { "status": "ok", "response": {} },
            "ref": "1"
        })
        .to_string();

        assert!(parse_change(&frame, campaign_id).is_none());
    }
}
