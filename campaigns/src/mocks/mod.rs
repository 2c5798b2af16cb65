//! Mock providers for testing.
//!
//! In-memory implementations of the campaign providers. The gateway mock
//! records the exact calls the orchestration issues (page windows, batch
//! sizes) so tests can assert call shapes, and supports scripted failures
//! at chosen points.

pub mod feed;
pub mod gateway;

// Re-export
pub use feed::{MockTicketFeed, MockTicketFeedHandle};
pub use gateway::MockCampaignGateway;
