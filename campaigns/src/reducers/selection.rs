//! Quantity selection reducer.
//!
//! Keeps the stepper quantity inside the campaign's purchase limits. The
//! price preview is derived, not stored: [`crate::state::CampaignState`]
//! recomputes it from the selection and the loaded promotions on demand.

use crate::actions::CampaignAction;
use crate::environment::CampaignEnvironment;
use crate::providers::CampaignGateway;
use crate::state::CampaignState;
use rifaqui_core::Clock;
use rifaqui_core::effect::Effect;
use rifaqui_core::reducer::Reducer;
use rifaqui_core::{SmallVec, smallvec};

/// Quantity selection reducer.
#[derive(Debug, Clone)]
pub struct SelectionReducer<G, C> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(G, C)>,
}

impl<G, C> SelectionReducer<G, C> {
    /// Create a new selection reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, C> Default for SelectionReducer<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, C> Reducer for SelectionReducer<G, C>
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
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CampaignAction::SetQuantity { quantity } => {
                let Some(campaign) = &state.campaign else {
                    tracing::warn!("SetQuantity before the campaign loaded");
                    return smallvec![Effect::None];
                };
                state.selection.quantity = campaign.clamp_quantity(quantity);
                smallvec![Effect::None]
            }

            CampaignAction::AddQuantity { delta } => {
                let Some(campaign) = &state.campaign else {
                    tracing::warn!("AddQuantity before the campaign loaded");
                    return smallvec![Effect::None];
                };
                let stepped = state.selection.quantity.saturating_add_signed(delta);
                state.selection.quantity = campaign.clamp_quantity(stepped);
                smallvec![Effect::None]
            }

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
