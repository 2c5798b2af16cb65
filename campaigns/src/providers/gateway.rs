//! Campaign gateway trait.

use crate::error::Result;
use crate::state::{
    Campaign, CampaignId, CustomerData, PhoneTicket, RankingRow, SalesPoint, Ticket,
    TicketValidation, UserId, Winner, WinnerDetails,
};

/// Remote campaign surface.
///
/// This trait abstracts the backend RPCs and table reads at page/batch
/// granularity. Orchestration (paging the full board, splitting
/// reservation batches) happens above this trait, so mocks can record
/// the exact call shapes the orchestration produces.
///
/// # Implementation Notes
///
/// - Calls are single-shot: no retry or backoff at any layer.
/// - Reservation atomicity is server-side; implementations perform no
///   locking.
pub trait CampaignGateway: Send + Sync {
    /// Fetch a campaign record by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CampaignError::CampaignNotFound`] when the row
    /// does not exist, or a remote error when the call fails.
    fn fetch_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Campaign>> + Send;

    /// Fetch one page of the per-ticket status list.
    ///
    /// # Arguments
    ///
    /// - `viewer`: optional signed-in viewer, lets the backend mark
    ///   ownership on the rows
    /// - `offset` / `limit`: page window in quota-number order
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn fetch_status_page(
        &self,
        campaign_id: CampaignId,
        viewer: Option<UserId>,
        offset: i64,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Ticket>>> + Send;

    /// Reserve one batch of quota numbers for a customer.
    ///
    /// Returns the quota numbers the backend confirmed.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the batch fails; conflicts (a quota
    /// already taken) surface as remote errors too.
    fn reserve_batch(
        &self,
        campaign_id: CampaignId,
        quotas: &[i64],
        customer: &CustomerData,
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send;

    /// Release one batch of quota numbers back to the pool.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the batch fails.
    fn release_batch(
        &self,
        campaign_id: CampaignId,
        quotas: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send;

    /// Top buyers of a campaign, best first.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn ranking(
        &self,
        campaign_id: CampaignId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RankingRow>>> + Send;

    /// Per-day sales points for the last `days` days, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn sales_history(
        &self,
        campaign_id: CampaignId,
        days: u32,
    ) -> impl std::future::Future<Output = Result<Vec<SalesPoint>>> + Send;

    /// Ask the backend to draw a winner.
    ///
    /// The draw is server-authoritative; the client only mirrors the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the draw fails (e.g. no sold
    /// tickets).
    fn perform_draw(
        &self,
        campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Winner>> + Send;

    /// Buyer contact details for a winning quota.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn winner_details(
        &self,
        campaign_id: CampaignId,
        quota_number: i64,
    ) -> impl std::future::Future<Output = Result<WinnerDetails>> + Send;

    /// Check externally-drawn numbers against sold tickets.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn validate_draw(
        &self,
        campaign_id: CampaignId,
        numbers: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<TicketValidation>>> + Send;

    /// Recorded winners of a campaign, newest first.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn winners(
        &self,
        campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Vec<Winner>>> + Send;

    /// A buyer's tickets across campaigns, found by normalized phone.
    ///
    /// # Errors
    ///
    /// Returns a remote error when the call fails.
    fn tickets_by_phone(
        &self,
        phone: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PhoneTicket>>> + Send;
}
