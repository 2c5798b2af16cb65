//! Campaign environment.
//!
//! This module defines the environment type for dependency injection
//! in campaign reducers.

use rifaqui_core::Clock;

use crate::providers::CampaignGateway;

/// Campaign environment.
///
/// Contains the external dependencies needed by campaign reducers.
///
/// # Type Parameters
///
/// - `G`: Campaign gateway (backend RPCs and table reads)
/// - `C`: Clock
#[derive(Clone)]
pub struct CampaignEnvironment<G, C>
where
    G: CampaignGateway + Clone,
    C: Clock + Clone,
{
    /// Campaign gateway (HTTP in production, in-memory mock in tests).
    pub gateway: G,

    /// Clock, used to stamp board snapshots.
    pub clock: C,
}

impl<G, C> CampaignEnvironment<G, C>
where
    G: CampaignGateway + Clone,
    C: Clock + Clone,
{
    /// Create an environment from its dependencies.
    #[must_use]
    pub const fn new(gateway: G, clock: C) -> Self {
        Self { gateway, clock }
    }
}
