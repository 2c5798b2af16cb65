//! Remote orchestration helpers.
//!
//! The thin coordination layer over the gateway: paging the full board,
//! batching reservation calls, coercing raw quota input. No business
//! rules live here; reservation atomicity and draw fairness are enforced
//! server-side and the calls stay single-shot (no retry, no backoff).

use std::sync::Arc;

use futures::future;
use tokio::sync::Semaphore;

use crate::constants::{batching, paging};
use crate::error::{CampaignError, Result};
use crate::providers::CampaignGateway;
use crate::state::{Campaign, CampaignId, CustomerData, Ticket, UserId};

/// Coerce raw quota identifiers to integers.
///
/// Non-numeric entries are dropped with a warning and never reach the
/// wire. Duplicates pass through untouched; the backend rejects the
/// conflict.
#[must_use]
pub fn coerce_quota_numbers(raw: &[String]) -> Vec<i64> {
    raw.iter()
        .filter_map(|value| match value.trim().parse::<i64>() {
            Ok(quota) => Some(quota),
            Err(_) => {
                tracing::warn!(value = value.as_str(), "dropping non-numeric quota identifier");
                None
            }
        })
        .collect()
}

/// Fetch the campaign record and its full per-ticket status list.
///
/// # Errors
///
/// Returns the campaign fetch error, or the first page error (the whole
/// fetch fails and partial pages are discarded).
pub async fn fetch_board<G: CampaignGateway>(
    gateway: &G,
    campaign_id: CampaignId,
    viewer: Option<UserId>,
) -> Result<(Campaign, Vec<Ticket>)> {
    let campaign = gateway.fetch_campaign(campaign_id).await?;
    let tickets = fetch_all_tickets(gateway, campaign_id, viewer, campaign.total_quotas).await?;
    Ok((campaign, tickets))
}

/// Fetch every status page of a board.
///
/// Pages are [`paging::STATUS_PAGE_SIZE`] rows, the last one short, with
/// at most [`paging::MAX_CONCURRENT_PAGE_FETCHES`] requests in flight.
/// Results concatenate in page order, preserving the row order of each
/// page.
///
/// # Errors
///
/// Single-shot: the first failing page cancels the rest and its error is
/// returned; no partial list is kept.
pub async fn fetch_all_tickets<G: CampaignGateway>(
    gateway: &G,
    campaign_id: CampaignId,
    viewer: Option<UserId>,
    total: i64,
) -> Result<Vec<Ticket>> {
    if total <= 0 {
        return Ok(Vec::new());
    }

    let limiter = Arc::new(Semaphore::new(paging::MAX_CONCURRENT_PAGE_FETCHES));
    let page_futures = page_plan(total).into_iter().map(|(offset, limit)| {
        let limiter = Arc::clone(&limiter);
        async move {
            let _permit = limiter
                .acquire()
                .await
                .map_err(|_| CampaignError::Internal("page limiter closed".to_string()))?;
            gateway
                .fetch_status_page(campaign_id, viewer, offset, limit)
                .await
        }
    });

    let pages = future::try_join_all(page_futures).await?;

    tracing::debug!(
        campaign_id = %campaign_id,
        pages = pages.len(),
        "board pages fetched"
    );
    Ok(pages.into_iter().flatten().collect())
}

/// Page plan for a board of `total` tickets, as `(offset, limit)` pairs.
fn page_plan(total: i64) -> Vec<(i64, i64)> {
    let mut requests = Vec::new();
    let mut offset = 0;
    while offset < total {
        let limit = paging::STATUS_PAGE_SIZE.min(total - offset);
        requests.push((offset, limit));
        offset += paging::STATUS_PAGE_SIZE;
    }
    requests
}

/// Reserve quota numbers for a customer.
///
/// Raw input is coerced first. Coerced numbers split into batches of at
/// most [`batching::RESERVE_BATCH_SIZE`], issued sequentially.
///
/// # Errors
///
/// Returns [`CampaignError::EmptySelection`] when nothing numeric
/// remains after coercion. A failing batch aborts the remaining batches
/// and surfaces its error; prior successful batches are not compensated
/// (server-side reservation expiry reclaims them).
pub async fn reserve_all<G: CampaignGateway>(
    gateway: &G,
    campaign_id: CampaignId,
    raw_quotas: &[String],
    customer: &CustomerData,
) -> Result<Vec<i64>> {
    let quotas = coerce_quota_numbers(raw_quotas);
    if quotas.is_empty() {
        return Err(CampaignError::EmptySelection);
    }

    let mut confirmed = Vec::with_capacity(quotas.len());
    for batch in quotas.chunks(batching::RESERVE_BATCH_SIZE) {
        let accepted = gateway.reserve_batch(campaign_id, batch, customer).await?;
        confirmed.extend(accepted);
    }

    tracing::info!(
        campaign_id = %campaign_id,
        reserved = confirmed.len(),
        "tickets reserved"
    );
    Ok(confirmed)
}

/// Release quota numbers back to the pool.
///
/// Same coercion and batching contract as [`reserve_all`], against the
/// release RPC.
///
/// # Errors
///
/// Returns [`CampaignError::EmptySelection`] when nothing numeric
/// remains after coercion, or the first failing batch's error.
pub async fn release_all<G: CampaignGateway>(
    gateway: &G,
    campaign_id: CampaignId,
    raw_quotas: &[String],
) -> Result<Vec<i64>> {
    let quotas = coerce_quota_numbers(raw_quotas);
    if quotas.is_empty() {
        return Err(CampaignError::EmptySelection);
    }

    let mut confirmed = Vec::with_capacity(quotas.len());
    for batch in quotas.chunks(batching::RESERVE_BATCH_SIZE) {
        let accepted = gateway.release_batch(campaign_id, batch).await?;
        confirmed.extend(accepted);
    }

    tracing::info!(
        campaign_id = %campaign_id,
        released = confirmed.len(),
        "tickets released"
    );
    Ok(confirmed)
}
