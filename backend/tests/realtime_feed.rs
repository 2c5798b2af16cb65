//! Loopback test for the realtime channel
//!
//! Runs a minimal Phoenix-style server on a local socket and drives the
//! join / change / leave cycle end to end.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use futures::{SinkExt, StreamExt};
use rifaqui_backend::{BackendConfig, RealtimeChannel, TicketChangeKind};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use uuid::Uuid;

#[tokio::test]
async fn channel_joins_receives_changes_and_leaves() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let campaign_id = Uuid::new_v4();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        // First frame must be the scoped join
        let join = ws.next().await.unwrap().unwrap();
        let join: serde_json::Value = serde_json::from_str(join.to_text().unwrap()).unwrap();
        assert_eq!(join["event"], "phx_join");
        let topic = join["topic"].as_str().unwrap().to_string();
        assert!(topic.ends_with(&format!("campaign_id=eq.{campaign_id}")));

        // Ack the join, then push one row change
        let reply = json!({
            "topic": topic,
            "event": "phx_reply",
            "payload": { "status": "ok", "response": {} },
            "ref": "1"
        });
        ws.send(Message::Text(reply.to_string())).await.unwrap();

        let change = json!({
            "topic": topic,
            "event": "UPDATE",
            "payload": { "record": { "quota_number": 17, "status": "comprado" } },
            "ref": null
        });
        ws.send(Message::Text(change.to_string())).await.unwrap();

        // Drain until the client leaves or closes the socket
        while let Some(Ok(frame)) = ws.next().await {
            match frame {
                Message::Text(text) if text.contains("phx_leave") => break,
                Message::Close(_) => break,
                _ => {},
            }
        }
    });

    let config = BackendConfig::new("http://backend.invalid", "test-key")
        .with_realtime_url(format!("ws://{addr}"));
    let mut channel = RealtimeChannel::connect(&config, campaign_id).await?;

    let change = tokio::time::timeout(Duration::from_secs(5), channel.recv())
        .await?
        .expect("change notification before the feed ended");

    assert_eq!(change.kind, TicketChangeKind::Update);
    assert_eq!(change.campaign_id, campaign_id);
    assert_eq!(change.quota_number, Some(17));
    assert_eq!(change.status.as_deref(), Some("comprado"));

    channel.close().await;
    server.await?;
    Ok(())
}

#[tokio::test]
async fn feed_ends_when_server_closes() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let campaign_id = Uuid::new_v4();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        // Consume the join, then hang up without acking
        let _ = ws.next().await;
        ws.send(Message::Close(None)).await.unwrap();
    });

    let config = BackendConfig::new("http://backend.invalid", "test-key")
        .with_realtime_url(format!("ws://{addr}"));
    let mut channel = RealtimeChannel::connect(&config, campaign_id).await?;

    let next = tokio::time::timeout(Duration::from_secs(5), channel.recv()).await?;
    assert!(next.is_none(), "feed should end after server close");

    server.await?;
    Ok(())
}
