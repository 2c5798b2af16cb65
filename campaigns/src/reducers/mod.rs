//! Campaign reducers.
//!
//! This module contains pure reducer functions for the campaign flows.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod board;
pub mod draw;
pub mod lookup;
pub mod reports;
pub mod selection;

use crate::{CampaignAction, CampaignEnvironment, CampaignState, providers::CampaignGateway};
use rifaqui_core::{Clock, SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use board::BoardReducer;
pub use draw::DrawReducer;
pub use lookup::LookupReducer;
pub use reports::ReportsReducer;
pub use selection::SelectionReducer;

/// Unified campaign reducer.
///
/// Combines the board, selection, draw, reports, and lookup flows into a
/// single reducer. Routes actions to the appropriate sub-reducer based on
/// action type.
#[derive(Clone, Debug)]
pub struct CampaignReducer<G, C>
where
    G: CampaignGateway + Clone + 'static,
    C: Clock + Clone + 'static,
{
    board: BoardReducer<G, C>,
    selection: SelectionReducer<G, C>,
    draw: DrawReducer<G, C>,
    reports: ReportsReducer<G, C>,
    lookup: LookupReducer<G, C>,
}

impl<G, C> CampaignReducer<G, C>
where
    G: CampaignGateway + Clone + 'static,
    C: Clock + Clone + 'static,
{
    /// Create a new unified campaign reducer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: BoardReducer::new(),
            selection: SelectionReducer::new(),
            draw: DrawReducer::new(),
            reports: ReportsReducer::new(),
            lookup: LookupReducer::new(),
        }
    }
}

impl<G, C> Default for CampaignReducer<G, C>
where
    G: CampaignGateway + Clone + 'static,
    C: Clock + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for CampaignReducer<G, C>
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
        // Route to appropriate sub-reducer based on action type
        match action {
            // Board and reservation actions
            CampaignAction::OpenBoard { .. }
            | CampaignAction::ChangeViewer { .. }
            | CampaignAction::RefreshBoard
            | CampaignAction::TicketChanged { .. }
            | CampaignAction::BoardLoaded { .. }
            | CampaignAction::BoardLoadFailed { .. }
            | CampaignAction::ReserveTickets { .. }
            | CampaignAction::TicketsReserved { .. }
            | CampaignAction::ReserveFailed { .. }
            | CampaignAction::ReleaseTickets { .. }
            | CampaignAction::TicketsReleased { .. }
            | CampaignAction::ReleaseFailed { .. } => self.board.reduce(state, action, env),

            // Selection actions
            CampaignAction::SetQuantity { .. } | CampaignAction::AddQuantity { .. } => {
                self.selection.reduce(state, action, env)
            }

            // Draw actions
            CampaignAction::PerformDraw { .. }
            | CampaignAction::DrawCompleted { .. }
            | CampaignAction::DrawFailed { .. }
            | CampaignAction::ValidateDrawNumbers { .. }
            | CampaignAction::DrawNumbersValidated { .. }
            | CampaignAction::DrawValidationFailed { .. }
            | CampaignAction::LoadWinners { .. }
            | CampaignAction::WinnersLoaded { .. }
            | CampaignAction::WinnersLoadFailed { .. }
            | CampaignAction::LoadWinnerDetails { .. }
            | CampaignAction::WinnerDetailsLoaded { .. }
            | CampaignAction::WinnerDetailsFailed { .. } => self.draw.reduce(state, action, env),

            // Reports actions
            CampaignAction::LoadRanking { .. }
            | CampaignAction::RankingLoaded { .. }
            | CampaignAction::RankingLoadFailed { .. }
            | CampaignAction::LoadSalesHistory { .. }
            | CampaignAction::SalesHistoryLoaded { .. }
            | CampaignAction::SalesHistoryLoadFailed { .. } => {
                self.reports.reduce(state, action, env)
            }

            // Lookup actions
            CampaignAction::LookupByPhone { .. }
            | CampaignAction::LookupCompleted { .. }
            | CampaignAction::LookupFailed { .. } => self.lookup.reduce(state, action, env),
        }
    }
}
