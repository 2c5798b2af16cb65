//! Mock ticket feed for testing.

use crate::error::{CampaignError, Result};
use crate::providers::feed::{TicketChange, TicketFeed};
use tokio::sync::mpsc;

const FEED_CAPACITY: usize = 16;

/// Sender half of a [`MockTicketFeed`].
///
/// Dropping every handle ends the feed, like a closed socket.
#[derive(Debug, Clone)]
pub struct MockTicketFeedHandle {
    tx: mpsc::Sender<TicketChange>,
}

impl MockTicketFeedHandle {
    /// Push a change into the feed.
    ///
    /// # Errors
    ///
    /// Returns error if the feed side has been dropped.
    pub async fn push(&self, change: TicketChange) -> Result<()> {
        self.tx
            .send(change)
            .await
            .map_err(|_| CampaignError::Internal("mock feed closed".to_string()))
    }
}

/// Mock ticket feed backed by an in-memory channel.
#[derive(Debug)]
pub struct MockTicketFeed {
    rx: mpsc::Receiver<TicketChange>,
}

impl MockTicketFeed {
    /// Create a feed and its sender handle.
    #[must_use]
    pub fn channel() -> (MockTicketFeedHandle, Self) {
        let (tx, rx) = mpsc::channel(FEED_CAPACITY);
        (MockTicketFeedHandle { tx }, Self { rx })
    }
}

impl TicketFeed for MockTicketFeed {
    fn next_change(&mut self) -> impl std::future::Future<Output = Option<TicketChange>> + Send {
        self.rx.recv()
    }
}
