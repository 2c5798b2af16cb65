//! # Rifaqui Backend Client
//!
//! Typed Rust client for the Rifaqui backend service (Postgres + RPC
//! functions + realtime channels behind a REST gateway).
//!
//! All business invariants (reservation atomicity, draw fairness, sales
//! aggregation) are enforced server-side. This crate is deliberately thin:
//! it shapes requests, decodes responses, and maps transport/status errors
//! into a small taxonomy. It performs no retries, no caching, and no
//! circuit breaking; callers own those decisions.
//!
//! ## Example
//!
//! ```no_run
//! use rifaqui_backend::{BackendClient, BackendError};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BackendError> {
//!     // Reads RIFAQUI_API_URL / RIFAQUI_API_KEY from the environment
//!     let client = BackendClient::from_env()?;
//!
//!     let campaign = client.campaign_by_slug("rifa-do-bairro").await?;
//!     let page = client
//!         .ticket_status_page(campaign.id, None, 0, 1000)
//!         .await?;
//!
//!     println!("fetched {} tickets", page.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - RPC calls (`POST /rest/v1/rpc/{name}`) with typed responses
//! - Table reads (`GET /rest/v1/{table}`) with filter parameters
//! - Realtime ticket-change feed over WebSocket (Phoenix-style channel)
//! - Env-driven configuration

pub mod client;
pub mod config;
pub mod error;
pub mod realtime;
pub mod types;

// Re-export main types for convenience
pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
pub use realtime::{RealtimeChannel, TicketChange, TicketChangeKind};
pub use types::{
    CampaignRow, CustomDomainRow, DrawOutcome, DrawTicketValidation, PhoneTicketRow, ProfileRow,
    PromotionWire, PublicProfileRow, RankingEntry, SalesHistoryPoint, TicketStatusRow,
    WinnerRecord, WinnerRow,
};
