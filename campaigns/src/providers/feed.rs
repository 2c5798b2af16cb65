//! Realtime ticket feed trait.

pub use rifaqui_backend::{TicketChange, TicketChangeKind};

/// A stream of ticket change notifications for one campaign.
///
/// Notifications only invalidate: the board reacts with a full refetch,
/// never an incremental merge, so a feed is free to coalesce or drop
/// changes under load.
pub trait TicketFeed: Send {
    /// Wait for the next change.
    ///
    /// Returns `None` once the feed has ended (socket closed or torn
    /// down); the consumer should stop pumping at that point.
    fn next_change(&mut self) -> impl std::future::Future<Output = Option<TicketChange>> + Send;
}

impl TicketFeed for rifaqui_backend::RealtimeChannel {
    fn next_change(&mut self) -> impl std::future::Future<Output = Option<TicketChange>> + Send {
        self.recv()
    }
}
