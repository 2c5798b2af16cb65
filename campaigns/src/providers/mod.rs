//! Campaign providers.
//!
//! This module defines traits for the external collaborators of the
//! campaign flows. Providers are **interfaces**, not implementations:
//! the reducers depend on these traits, the runtime wires in concrete
//! implementations (the HTTP/WebSocket gateway in production, in-memory
//! mocks in tests).
//!
//! Every business invariant that matters (no double reservation, draw
//! fairness, aggregate consistency) lives behind these traits on the
//! backend side; the client treats the calls as opaque and single-shot.

pub mod backend;
pub mod feed;
pub mod gateway;

// Re-export
pub use backend::BackendCampaignGateway;
pub use feed::TicketFeed;
pub use gateway::CampaignGateway;
