//! Reports reducer.
//!
//! Single-shot loads of the organizer reports: top-buyers ranking and the
//! per-day sales history. Both series are aggregated server-side; the
//! reducer only mirrors the latest result.

use crate::actions::CampaignAction;
use crate::environment::CampaignEnvironment;
use crate::providers::CampaignGateway;
use crate::state::{CampaignState, LoadPhase};
use rifaqui_core::Clock;
use rifaqui_core::effect::Effect;
use rifaqui_core::reducer::Reducer;
use rifaqui_core::{SmallVec, smallvec};

/// Reports reducer.
#[derive(Debug, Clone)]
pub struct ReportsReducer<G, C> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(G, C)>,
}

impl<G, C> ReportsReducer<G, C> {
    /// Create a new reports reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, C> Default for ReportsReducer<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for ReportsReducer<G, C>
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
            // Ranking
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::LoadRanking { campaign_id, limit } => {
                state.reports.ranking_phase = LoadPhase::Loading;
                state.reports.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.ranking(campaign_id, limit).await {
                        Ok(ranking) => Some(CampaignAction::RankingLoaded { ranking }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "ranking load failed"
                            );
                            Some(CampaignAction::RankingLoadFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::RankingLoaded { ranking } => {
                state.reports.ranking_phase = LoadPhase::Loaded;
                state.reports.ranking = ranking;
                smallvec![Effect::None]
            }

            CampaignAction::RankingLoadFailed { error } => {
                state.reports.ranking_phase = LoadPhase::Failed;
                state.reports.last_error = Some(error);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Sales history
            // ═══════════════════════════════════════════════════════════════
            CampaignAction::LoadSalesHistory { campaign_id, days } => {
                state.reports.history_phase = LoadPhase::Loading;
                state.reports.last_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.sales_history(campaign_id, days).await {
                        Ok(history) => Some(CampaignAction::SalesHistoryLoaded { history }),
                        Err(error) => {
                            tracing::warn!(
                                campaign_id = %campaign_id,
                                error = %error,
                                "sales history load failed"
                            );
                            Some(CampaignAction::SalesHistoryLoadFailed {
                                error: error.to_string(),
                            })
                        }
                    }
                }))]
            }

            CampaignAction::SalesHistoryLoaded { history } => {
                state.reports.history_phase = LoadPhase::Loaded;
                state.reports.history = history;
                smallvec![Effect::None]
            }

            CampaignAction::SalesHistoryLoadFailed { error } => {
                state.reports.history_phase = LoadPhase::Failed;
                state.reports.last_error = Some(error);
                smallvec![Effect::None]
            }

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
