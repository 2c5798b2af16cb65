//! Ticket board reducer.
//!
//! Owns the load lifecycle of a campaign's ticket board and the
//! reservation/release round trips. The board is a mirror of the backend:
//! reserves, releases, and realtime notifications all end in a full
//! refetch, never a local patch, so ticket status has a single source of
//! truth.
//!
//! # Staleness
//!
//! Every (re)fetch bumps `refresh_epoch` and stamps its completion events
//! with the epoch it started from. A completion carrying an older epoch is
//! dropped. Overlapping refreshes therefore resolve last-started-wins; a
//! slow response can never clobber a fresher snapshot.

use crate::actions::CampaignAction;
use crate::environment::CampaignEnvironment;
use crate::providers::CampaignGateway;
use crate::remote;
use crate::state::{CampaignState, LoadPhase};
use rifaqui_core::Clock;
use rifaqui_core::effect::Effect;
use rifaqui_core::reducer::Reducer;
use rifaqui_core::{SmallVec, smallvec};

/// Ticket board reducer.
///
/// Handles board open/refresh, realtime invalidations, and the
/// reservation/release flows.
#[derive(Debug, Clone)]
pub struct BoardReducer<G, C> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(G, C)>,
}

impl<G, C> BoardReducer<G, C> {
    /// Create a new board reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, C> Default for BoardReducer<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for BoardReducer<G, C>
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
            // OpenBoard: Bind the board to a campaign and fetch it
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::OpenBoard {
                campaign_id,
                viewer,
            } => {
                state.board.campaign_id = Some(campaign_id);
                state.board.viewer = viewer;
                self.reduce(state, CampaignAction::RefreshBoard, env)
            }

            // ═══════════════════════════════════════════════════════════════
            // ChangeViewer: Swap the signed-in viewer, refetch if open
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ChangeViewer { viewer } => {
                state.board.viewer = viewer;
                if state.board.campaign_id.is_some() {
                    self.reduce(state, CampaignAction::RefreshBoard, env)
                } else {
                    smallvec![Effect::None]
                }
            }

            // ═══════════════════════════════════════════════════════════════
            // RefreshBoard: Full refetch under a fresh epoch
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::RefreshBoard => {
                let Some(campaign_id) = state.board.campaign_id else {
                    tracing::warn!("RefreshBoard without an open board");
                    return smallvec![Effect::None];
                };

                state.board.refresh_epoch += 1;
                state.board.phase = LoadPhase::Loading;
                state.board.last_error = None;

                let epoch = state.board.refresh_epoch;
                let viewer = state.board.viewer;
                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match remote::fetch_board(&gateway, campaign_id, viewer).await {
                        Ok((campaign, tickets)) => Some(CampaignAction::BoardLoaded {
                            epoch,
                            campaign: Box::new(campaign),
                            tickets,
                        }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "board fetch failed"
                            );
                            Some(CampaignAction::BoardLoadFailed {
                                epoch,
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // TicketChanged: Realtime invalidation, answered with a refetch
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::TicketChanged { campaign_id } => {
                if state.board.campaign_id == Some(campaign_id) {
                    self.reduce(state, CampaignAction::RefreshBoard, env)
                } else {
                    tracing::debug!(
                        campaign_id = %campaign_id,
                        "ticket change for a campaign the board is not showing"
                    );
                    smallvec![Effect::None]
                }
            }

            // ═══════════════════════════════════════════════════════════════
            // BoardLoaded: Install the snapshot, unless a newer fetch started
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::BoardLoaded {
                epoch,
                campaign,
                tickets,
            } => {
                if epoch != state.board.refresh_epoch {
                    tracing::debug!(
                        epoch,
                        current = state.board.refresh_epoch,
                        "dropping stale board snapshot"
                    );
                    return smallvec![Effect::None];
                }

                // Purchase limits may have changed; keep the selection legal.
                state.selection.quantity = campaign.clamp_quantity(state.selection.quantity);

                state.campaign = Some(*campaign);
                state.board.tickets = tickets;
                state.board.phase = LoadPhase::Loaded;
                state.board.loaded_at = Some(env.clock.now());
                state.board.last_error = None;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // BoardLoadFailed: Record the failure, unless a newer fetch started
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::BoardLoadFailed { epoch, error } => {
                if epoch != state.board.refresh_epoch {
                    tracing::debug!(
                        epoch,
                        current = state.board.refresh_epoch,
                        "dropping stale board failure"
                    );
                    return smallvec![Effect::None];
                }

                state.board.phase = LoadPhase::Failed;
                state.board.last_error = Some(error);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ReserveTickets: Validate, then run the batched reserve
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ReserveTickets { quotas, customer } => {
                let Some(campaign_id) = state.board.campaign_id else {
                    tracing::warn!("ReserveTickets without an open board");
                    return smallvec![Effect::None];
                };
                if state.board.reserving {
                    tracing::warn!("reservation already in flight, ignoring");
                    return smallvec![Effect::None];
                }

                // Soft validation: fast feedback only, the server re-checks.
                if let Err(error) = customer.validate() {
                    return self.reduce(
                        state,
                        CampaignAction::ReserveFailed {
                            error: error.to_string(),
                        },
                        env,
                    );
                }

                state.board.reserving = true;
                state.board.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match remote::reserve_all(&gateway, campaign_id, &quotas, &customer).await {
                        Ok(confirmed) => Some(CampaignAction::TicketsReserved { quotas: confirmed }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "reservation failed"
                            );
                            Some(CampaignAction::ReserveFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // TicketsReserved: Confirmed; the board is stale, refetch
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::TicketsReserved { quotas } => {
                state.board.reserving = false;
                tracing::info!(reserved = quotas.len(), "reservation confirmed");
                self.reduce(state, CampaignAction::RefreshBoard, env)
            }

            // ═══════════════════════════════════════════════════════════════
            // ReserveFailed: Record and stop; no compensation for done batches
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ReserveFailed { error } => {
                state.board.reserving = false;
                state.board.last_error = Some(error);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ReleaseTickets: Run the batched release
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ReleaseTickets { quotas } => {
                let Some(campaign_id) = state.board.campaign_id else {
                    tracing::warn!("ReleaseTickets without an open board");
                    return smallvec![Effect::None];
                };
                if state.board.releasing {
                    tracing::warn!("release already in flight, ignoring");
                    return smallvec![Effect::None];
                }

                state.board.releasing = true;
                state.board.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match remote::release_all(&gateway, campaign_id, &quotas).await {
                        Ok(confirmed) => Some(CampaignAction::TicketsReleased { quotas: confirmed }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "release failed"
                            );
                            Some(CampaignAction::ReleaseFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // TicketsReleased: Confirmed; the board is stale, refetch
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::TicketsReleased { quotas } => {
                state.board.releasing = false;
                tracing::info!(released = quotas.len(), "release confirmed");
                self.reduce(state, CampaignAction::RefreshBoard, env)
            }

            // ═══════════════════════════════════════════════════════════════
            // ReleaseFailed: Record and stop
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::ReleaseFailed { error } => {
                state.board.releasing = false;
                state.board.last_error = Some(error);
                smallvec![Effect::None]
            }

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
