//! Realtime feed wiring.
//!
//! Bridges a [`TicketFeed`] into a running store: every change
//! notification becomes a [`CampaignAction::TicketChanged`] dispatch,
//! which the board reducer answers with a full refetch. Changes carry no
//! payload worth merging; they only invalidate.

use crate::actions::CampaignAction;
use crate::providers::TicketFeed;
use crate::state::{CampaignId, CampaignState};
use rifaqui_core::reducer::Reducer;
use rifaqui_runtime::store::Store;
use tokio::task::JoinHandle;

/// Pump a ticket feed into the store until the feed ends.
///
/// The task stops when the feed returns `None` (socket closed or torn
/// down) or the store refuses the dispatch (shutdown in progress). Both
/// ends are quiet stops, not errors; reconnecting is the caller's call.
pub fn spawn_ticket_forwarder<E, R, F>(
    store: Store<CampaignState, CampaignAction, E, R>,
    mut feed: F,
) -> JoinHandle<()>
where
    R: Reducer<State = CampaignState, Action = CampaignAction, Environment = E>
        + Clone
        + Send
        + Sync
        + 'static,
    E: Clone + Send + Sync + 'static,
    F: TicketFeed + 'static,
{
    tokio::spawn(async move {
        while let Some(change) = feed.next_change().await {
            tracing::debug!(
                campaign_id = %change.campaign_id,
                kind = ?change.kind,
                "ticket change received"
            );
            let action = CampaignAction::TicketChanged {
                campaign_id: CampaignId(change.campaign_id),
            };
            if let Err(error) = store.send(action).await {
                tracing::warn!(error = %error, "store rejected ticket change, stopping forwarder");
                return;
            }
        }
        tracing::debug!("ticket feed ended");
    })
}
