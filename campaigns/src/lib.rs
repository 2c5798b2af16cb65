//! # Rifaqui Campaigns
//!
//! Campaign domain for the Rifaqui client platform: the ticket board,
//! reservations and releases, promotion pricing, draws, organizer reports,
//! and buyer lookup.
//!
//! ## Architecture
//!
//! Every flow is implemented as reducers and effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! The backend owns every business invariant (reservation atomicity, draw
//! fairness, aggregation); this crate mirrors it. The board never patches
//! ticket status locally: a reserve, a release, or a realtime notification
//! all end in a full refetch.
//!
//! ## Example: Opening a board
//!
//! ```rust,ignore
//! use rifaqui_campaigns::*;
//!
//! // 1. Open the board
//! let effects = reducer.reduce(
//!     &mut state,
//!     CampaignAction::OpenBoard { campaign_id, viewer: None },
//!     &env,
//! );
//!
//! // 2. Execute effects (paged fetch of every ticket)
//! // 3. The BoardLoaded event installs the snapshot
//! assert!(state.campaign.is_some());
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod constants;
pub mod environment;
pub mod error;
pub mod pricing;
pub mod providers;
pub mod realtime;
pub mod reducers;
pub mod remote;
pub mod state;
pub mod views;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::CampaignAction;
pub use environment::CampaignEnvironment;
pub use error::{CampaignError, Result};
pub use reducers::CampaignReducer;
pub use state::{
    Campaign, CampaignId, CampaignState, CustomerData, Money, Ticket, TicketStatus, UserId,
};
