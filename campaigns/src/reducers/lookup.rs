//! Buyer lookup reducer.
//!
//! Finds a buyer's tickets across campaigns by phone number. The input is
//! free-form; it is normalized to bare digits before the call, and the
//! normalized form is what the state remembers.

use crate::actions::CampaignAction;
use crate::environment::CampaignEnvironment;
use crate::providers::CampaignGateway;
use crate::state::{CampaignState, LoadPhase, normalize_phone};
use rifaqui_core::Clock;
use rifaqui_core::effect::Effect;
use rifaqui_core::reducer::Reducer;
use rifaqui_core::{SmallVec, smallvec};

/// Buyer lookup reducer.
#[derive(Debug, Clone)]
pub struct LookupReducer<G, C> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(G, C)>,
}

impl<G, C> LookupReducer<G, C> {
    /// Create a new lookup reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, C> Default for LookupReducer<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for LookupReducer<G, C>
where
    G: CampaignGateway + Clone + 'static,
    C: Clock + Clone + 'static,
{
    type State = CampaignState;
    type Action = CampaignAction;
    type Environment = CampaignEnvironment<G, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CampaignAction::LookupByPhone { phone } => {
                // Soft validation: fast feedback only, the server re-checks.
                let normalized = match normalize_phone(&phone) {
                    Ok(normalized) => normalized,
                    Err(error) => {
                        return self.reduce(
                            state,
                            CampaignAction::LookupFailed {
                                error: error.to_string(),
                            },
                            env,
                        );
                    }
                };

                state.lookup.phase = LoadPhase::Loading;
                state.lookup.phone = Some(normalized.clone());
                state.lookup.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.tickets_by_phone(&normalized).await {
                        Ok(tickets) => Some(CampaignAction::LookupCompleted { tickets }),
                        Err(error) => {
                            tracing::warn!(error = %error, "phone lookup failed");
                            Some(CampaignAction::LookupFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::LookupCompleted { tickets } => {
                state.lookup.phase = LoadPhase::Loaded;
                state.lookup.tickets = tickets;
                smallvec![Effect::None]
            }

            CampaignAction::LookupFailed { error } => {
                state.lookup.phase = LoadPhase::Failed;
                state.lookup.last_error = Some(error);
                smallvec![Effect::None]
            }

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
