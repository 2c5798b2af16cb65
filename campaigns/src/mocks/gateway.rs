//! Mock campaign gateway for testing.

use crate::error::{CampaignError, Result};
use crate::providers::CampaignGateway;
use crate::state::{
    Campaign, CampaignId, CustomerData, PhoneTicket, RankingRow, SalesPoint, Ticket, TicketStatus,
    TicketValidation, UserId, Winner, WinnerDetails,
};
use std::sync::{Arc, Mutex};

fn scripted(message: &str) -> CampaignError {
    CampaignError::Remote {
        message: message.to_string(),
        transient: false,
    }
}

#[derive(Debug, Default)]
struct MockGatewayState {
    // Seeded data
    campaign: Option<Campaign>,
    tickets: Vec<Ticket>,
    ranking: Vec<RankingRow>,
    history: Vec<SalesPoint>,
    winners: Vec<Winner>,
    winner_details: Option<WinnerDetails>,
    draw_outcome: Option<Winner>,
    validations: Vec<TicketValidation>,
    phone_tickets: Vec<PhoneTicket>,

    // Scripted failures
    fail_campaign_fetch: bool,
    fail_page_at_offset: Option<i64>,
    fail_reserve_at_call: Option<usize>,
    fail_release_at_call: Option<usize>,
    fail_draw: bool,

    // Recorded calls
    page_calls: Vec<(i64, i64)>,
    reserve_calls: Vec<Vec<i64>>,
    reserve_customers: Vec<CustomerData>,
    release_calls: Vec<Vec<i64>>,
    validate_calls: Vec<Vec<i64>>,
    phone_queries: Vec<String>,
}

/// Mock campaign gateway.
///
/// Serves seeded in-memory data and records every call it receives.
#[derive(Debug, Clone, Default)]
pub struct MockCampaignGateway {
    inner: Arc<Mutex<MockGatewayState>>,
}

impl MockCampaignGateway {
    /// Create an empty mock gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockGatewayState) -> T) -> Result<T> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;
        Ok(f(&mut state))
    }

    /// Seed a campaign and a fully available board of
    /// `campaign.total_quotas` tickets.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_board(&self, campaign: Campaign) -> Result<()> {
        let tickets = (1..=campaign.total_quotas)
            .map(|quota_number| Ticket {
                quota_number,
                status: TicketStatus::Available,
                user_id: None,
                reserved_at: None,
                bought_at: None,
            })
            .collect();
        self.with_state(|state| {
            state.campaign = Some(campaign);
            state.tickets = tickets;
        })
    }

    /// Seed a campaign with an explicit ticket list.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_board_with_tickets(&self, campaign: Campaign, tickets: Vec<Ticket>) -> Result<()> {
        self.with_state(|state| {
            state.campaign = Some(campaign);
            state.tickets = tickets;
        })
    }

    /// Seed the top-buyers ranking.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_ranking(&self, ranking: Vec<RankingRow>) -> Result<()> {
        self.with_state(|state| state.ranking = ranking)
    }

    /// Seed the sales history series.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_history(&self, history: Vec<SalesPoint>) -> Result<()> {
        self.with_state(|state| state.history = history)
    }

    /// Seed the recorded winners list.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_winners(&self, winners: Vec<Winner>) -> Result<()> {
        self.with_state(|state| state.winners = winners)
    }

    /// Seed the winner contact details.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_winner_details(&self, details: WinnerDetails) -> Result<()> {
        self.with_state(|state| state.winner_details = Some(details))
    }

    /// Seed the outcome the next draw returns.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_draw_outcome(&self, winner: Winner) -> Result<()> {
        self.with_state(|state| state.draw_outcome = Some(winner))
    }

    /// Seed the pre-draw check results.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_validations(&self, validations: Vec<TicketValidation>) -> Result<()> {
        self.with_state(|state| state.validations = validations)
    }

    /// Seed the phone-lookup result.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn seed_phone_tickets(&self, tickets: Vec<PhoneTicket>) -> Result<()> {
        self.with_state(|state| state.phone_tickets = tickets)
    }

    /// Script the campaign fetch to fail.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn fail_campaign_fetch(&self) -> Result<()> {
        self.with_state(|state| state.fail_campaign_fetch = true)
    }

    /// Script the status page at the given offset to fail.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn fail_page_at_offset(&self, offset: i64) -> Result<()> {
        self.with_state(|state| state.fail_page_at_offset = Some(offset))
    }

    /// Script the nth reserve call (1-based) to fail.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn fail_reserve_call(&self, call: usize) -> Result<()> {
        self.with_state(|state| state.fail_reserve_at_call = Some(call))
    }

    /// Script the nth release call (1-based) to fail.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn fail_release_call(&self, call: usize) -> Result<()> {
        self.with_state(|state| state.fail_release_at_call = Some(call))
    }

    /// Script the draw to fail.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn fail_draw(&self) -> Result<()> {
        self.with_state(|state| state.fail_draw = true)
    }

    /// The `(offset, limit)` of every status page call, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn page_calls(&self) -> Result<Vec<(i64, i64)>> {
        self.with_state(|state| state.page_calls.clone())
    }

    /// The quota batches of every reserve call, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn reserve_calls(&self) -> Result<Vec<Vec<i64>>> {
        self.with_state(|state| state.reserve_calls.clone())
    }

    /// The customer data sent with each reserve call, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn reserve_customers(&self) -> Result<Vec<CustomerData>> {
        self.with_state(|state| state.reserve_customers.clone())
    }

    /// The quota batches of every release call, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn release_calls(&self) -> Result<Vec<Vec<i64>>> {
        self.with_state(|state| state.release_calls.clone())
    }

    /// The number batches of every pre-draw check, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn validate_calls(&self) -> Result<Vec<Vec<i64>>> {
        self.with_state(|state| state.validate_calls.clone())
    }

    /// The normalized phones looked up, in order.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn phone_queries(&self) -> Result<Vec<String>> {
        self.with_state(|state| state.phone_queries.clone())
    }
}

impl CampaignGateway for MockCampaignGateway {
    fn fetch_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Campaign>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            if state.fail_campaign_fetch {
                return Err(scripted("scripted campaign fetch failure"));
            }

            state
                .campaign
                .clone()
                .ok_or_else(|| CampaignError::CampaignNotFound(campaign_id.to_string()))
        }
    }

    fn fetch_status_page(
        &self,
        _campaign_id: CampaignId,
        _viewer: Option<UserId>,
        offset: i64,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Ticket>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state.page_calls.push((offset, limit));

            if state.fail_page_at_offset == Some(offset) {
                return Err(scripted("scripted page failure"));
            }

            let start = usize::try_from(offset).unwrap_or(0).min(state.tickets.len());
            let end = start
                .saturating_add(usize::try_from(limit).unwrap_or(0))
                .min(state.tickets.len());
            Ok(state.tickets[start..end].to_vec())
        }
    }

    fn reserve_batch(
        &self,
        _campaign_id: CampaignId,
        quotas: &[i64],
        customer: &CustomerData,
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send {
        let inner = Arc::clone(&self.inner);
        let quotas = quotas.to_vec();
        let customer = customer.clone();

        async move {
            let mut state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state.reserve_calls.push(quotas.clone());
            state.reserve_customers.push(customer);

            if state.fail_reserve_at_call == Some(state.reserve_calls.len()) {
                return Err(scripted("scripted reserve failure"));
            }

            Ok(quotas)
        }
    }

    fn release_batch(
        &self,
        _campaign_id: CampaignId,
        quotas: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send {
        let inner = Arc::clone(&self.inner);
        let quotas = quotas.to_vec();

        async move {
            let mut state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state.release_calls.push(quotas.clone());

            if state.fail_release_at_call == Some(state.release_calls.len()) {
                return Err(scripted("scripted release failure"));
            }

            Ok(quotas)
        }
    }

    fn ranking(
        &self,
        _campaign_id: CampaignId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RankingRow>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            Ok(state.ranking.iter().take(limit).cloned().collect())
        }
    }

    fn sales_history(
        &self,
        _campaign_id: CampaignId,
        _days: u32,
    ) -> impl std::future::Future<Output = Result<Vec<SalesPoint>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            Ok(state.history.clone())
        }
    }

    fn perform_draw(
        &self,
        _campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Winner>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            if state.fail_draw {
                return Err(scripted("scripted draw failure"));
            }

            state
                .draw_outcome
                .clone()
                .ok_or_else(|| scripted("no draw outcome seeded"))
        }
    }

    fn winner_details(
        &self,
        _campaign_id: CampaignId,
        _quota_number: i64,
    ) -> impl std::future::Future<Output = Result<WinnerDetails>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state
                .winner_details
                .clone()
                .ok_or_else(|| scripted("no winner details seeded"))
        }
    }

    fn validate_draw(
        &self,
        _campaign_id: CampaignId,
        numbers: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<TicketValidation>>> + Send {
        let inner = Arc::clone(&self.inner);
        let numbers = numbers.to_vec();

        async move {
            let mut state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state.validate_calls.push(numbers);
            Ok(state.validations.clone())
        }
    }

    fn winners(
        &self,
        _campaign_id: CampaignId,
    ) -> impl std::future::Future<Output = Result<Vec<Winner>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            Ok(state.winners.clone())
        }
    }

    fn tickets_by_phone(
        &self,
        phone: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PhoneTicket>>> + Send {
        let inner = Arc::clone(&self.inner);
        let phone = phone.to_string();

        async move {
            let mut state = inner
                .lock()
                .map_err(|_| CampaignError::Internal("Mutex lock failed".to_string()))?;

            state.phone_queries.push(phone);
            Ok(state.phone_tickets.clone())
        }
    }
}
