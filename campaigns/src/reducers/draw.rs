//! Draw reducer.
//!
//! Drives the winner draw and its satellite reads: the pre-draw number
//! check, the recorded winners list, and winner contact details. The draw
//! itself is server-authoritative; this reducer only requests it and
//! mirrors the outcome.

use crate::actions::CampaignAction;
use crate::environment::CampaignEnvironment;
use crate::error::CampaignError;
use crate::providers::CampaignGateway;
use crate::remote;
use crate::state::{CampaignState, DrawPhase};
use rifaqui_core::Clock;
use rifaqui_core::effect::Effect;
use rifaqui_core::reducer::Reducer;
use rifaqui_core::{SmallVec, smallvec};

/// Draw reducer.
///
/// Handles the draw state machine (idle → drawing → drawn | failed) and
/// the winner/validation reads around it.
#[derive(Debug, Clone)]
pub struct DrawReducer<G, C> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(G, C)>,
}

impl<G, C> DrawReducer<G, C> {
    /// Create a new draw reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, C> Default for DrawReducer<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for DrawReducer<G, C>
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
            // ═══════════════════════════════════════════════════════════════
            // PerformDraw: Ask the backend to draw a winner
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::PerformDraw { campaign_id } => {
                if state.draw.phase == DrawPhase::Drawing {
                    tracing::warn!("draw already in flight, ignoring");
                    return smallvec![Effect::None];
                }

                state.draw.phase = DrawPhase::Drawing;
                state.draw.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.perform_draw(campaign_id).await {
                        Ok(winner) => Some(CampaignAction::DrawCompleted { winner }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "draw failed"
                            );
                            Some(CampaignAction::DrawFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::DrawCompleted { winner } => {
                tracing::info!(quota_number = winner.quota_number, "draw completed");
                state.draw.phase = DrawPhase::Drawn;
                state.draw.latest = Some(winner);
                smallvec![Effect::None]
            }

            CampaignAction::DrawFailed { error } => {
                state.draw.phase = DrawPhase::Failed;
                state.draw.last_error = Some(error);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ValidateDrawNumbers: Check external numbers against sold tickets
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ValidateDrawNumbers {
                campaign_id,
                numbers,
            } => {
                let quotas = remote::coerce_quota_numbers(&numbers);
                if quotas.is_empty() {
                    return self.reduce(
                        state,
                        CampaignAction::DrawValidationFailed {
                            error: CampaignError::EmptySelection.to_string(),
                        },
                        env,
                    );
                }

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.validate_draw(campaign_id, &quotas).await {
                        Ok(validations) => {
                            Some(CampaignAction::DrawNumbersValidated { validations })
                        }
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "draw number check failed"
                            );
                            Some(CampaignAction::DrawValidationFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::DrawNumbersValidated { validations } => {
                state.draw.validations = validations;
                smallvec![Effect::None]
            }

            CampaignAction::DrawValidationFailed { error } => {
                state.draw.last_error = Some(error);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // LoadWinners / LoadWinnerDetails: Table-backed reads
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::LoadWinners { campaign_id } => {
                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.winners(campaign_id).await {
                        Ok(winners) => Some(CampaignAction::WinnersLoaded { winners }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "winners load failed"
                            );
                            Some(CampaignAction::WinnersLoadFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::WinnersLoaded { winners } => {
                state.draw.winners = winners;
                smallvec![Effect::None]
            }

            CampaignAction::WinnersLoadFailed { error } => {
                state.draw.last_error = Some(error);
                smallvec![Effect::None]
            }

            CampaignAction::LoadWinnerDetails {
                campaign_id,
                quota_number,
            } => {
                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.winner_details(campaign_id, quota_number).await {
                        Ok(details) => Some(CampaignAction::WinnerDetailsLoaded { details }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                quota_number,
                                error = %error,
                                "winner details load failed"
                            );
                            Some(CampaignAction::WinnerDetailsFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::WinnerDetailsLoaded { details } => {
                state.draw.winner_details = Some(details);
                smallvec![Effect::None]
            }

            CampaignAction::WinnerDetailsFailed { error } => {
                state.draw.last_error = Some(error);
                smallvec![Effect::None]
            }

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
