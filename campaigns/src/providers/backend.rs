//! Campaign gateway backed by the hosted REST/RPC backend.

use crate::error::Result;
use crate::providers::CampaignGateway;
use crate::state::{
    Campaign, CampaignId, CustomerData, Money, PhoneTicket, Promotion, RankingRow, SalesPoint,
    Ticket, TicketStatus, TicketValidation, UserId, Winner, WinnerDetails,
};
use rifaqui_backend::{
    BackendClient, CampaignRow, DrawOutcome, DrawTicketValidation, PhoneTicketRow, PromotionWire,
    RankingEntry, SalesHistoryPoint, TicketStatusRow, WinnerRecord, WinnerRow,
};

/// Production [`CampaignGateway`] over [`BackendClient`].
///
/// A thin mapping layer: every call delegates to one backend RPC or table
/// read and converts wire rows into domain types. No caching, no retries;
/// the reducers own retry policy through their own actions.
///
/// # Examples
///
/// ```ignore
/// use rifaqui_campaigns::providers::BackendCampaignGateway;
///
/// let gateway = BackendCampaignGateway::from_env()?;
/// ```
#[derive(Clone)]
pub struct BackendCampaignGateway {
    /// Shared HTTP client for the backend.
    client: BackendClient,
}

impl BackendCampaignGateway {
    /// Wrap an already-configured backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Build a gateway from `RIFAQUI_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CampaignError::Remote`] when required variables are
    /// missing.
    pub fn from_env() -> Result<Self> {
        let client = BackendClient::from_env()?;
        Ok(Self::new(client))
    }
}

impl CampaignGateway for BackendCampaignGateway {
    async fn fetch_campaign(&self, campaign_id: CampaignId) -> Result<Campaign> {
        let row = self.client.campaign_by_id(campaign_id.0).await?;
        Ok(campaign_from_row(row))
    }

    async fn fetch_status_page(
        &self,
        campaign_id: CampaignId,
        viewer: Option<UserId>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Ticket>> {
        let rows = self
            .client
            .ticket_status_page(campaign_id.0, viewer.map(|v| v.0), offset, limit)
            .await?;
        Ok(rows.into_iter().map(ticket_from_row).collect())
    }

    async fn reserve_batch(
        &self,
        campaign_id: CampaignId,
        quota_numbers: &[i64],
        customer: &CustomerData,
    ) -> Result<Vec<i64>> {
        let reserved = self
            .client
            .reserve_tickets(
                campaign_id.0,
                quota_numbers,
                &customer.name,
                &customer.phone,
                customer.email.as_deref(),
            )
            .await?;
        Ok(reserved)
    }

    async fn release_batch(
        &self,
        campaign_id: CampaignId,
        quota_numbers: &[i64],
    ) -> Result<Vec<i64>> {
        let released = self
            .client
            .release_tickets(campaign_id.0, quota_numbers)
            .await?;
        Ok(released)
    }

    async fn ranking(&self, campaign_id: CampaignId, limit: u32) -> Result<Vec<RankingRow>> {
        let rows = self.client.campaign_ranking(campaign_id.0, limit).await?;
        Ok(rows.into_iter().map(ranking_from_entry).collect())
    }

    async fn sales_history(&self, campaign_id: CampaignId, days: u32) -> Result<Vec<SalesPoint>> {
        let rows = self.client.sales_history(campaign_id.0, days).await?;
        Ok(rows.into_iter().map(sales_from_point).collect())
    }

    async fn perform_draw(&self, campaign_id: CampaignId) -> Result<Winner> {
        let outcome = self.client.perform_draw(campaign_id.0).await?;
        Ok(winner_from_outcome(outcome))
    }

    async fn winner_details(
        &self,
        campaign_id: CampaignId,
        quota_number: i64,
    ) -> Result<WinnerDetails> {
        let record = self
            .client
            .winner_details(campaign_id.0, quota_number)
            .await?;
        Ok(details_from_record(record))
    }

    async fn validate_draw(
        &self,
        campaign_id: CampaignId,
        quota_numbers: &[i64],
    ) -> Result<Vec<TicketValidation>> {
        let rows = self
            .client
            .validate_draw_tickets(campaign_id.0, quota_numbers)
            .await?;
        Ok(rows.into_iter().map(validation_from_row).collect())
    }

    async fn winners(&self, campaign_id: CampaignId) -> Result<Vec<Winner>> {
        let rows = self.client.campaign_winners(campaign_id.0).await?;
        Ok(rows.into_iter().map(winner_from_row).collect())
    }

    async fn tickets_by_phone(&self, phone: &str) -> Result<Vec<PhoneTicket>> {
        let rows = self.client.tickets_by_phone(phone).await?;
        Ok(rows.into_iter().map(phone_ticket_from_row).collect())
    }
}

fn campaign_from_row(row: CampaignRow) -> Campaign {
    let total_quotas = row.total_quotas;
    Campaign {
        id: CampaignId(row.id),
        slug: row.slug,
        title: row.title,
        description: row.description,
        total_quotas,
        quota_price: Money::from_cents(row.quota_price_cents),
        min_purchase: purchase_bound(row.min_purchase, 1),
        max_purchase: purchase_bound(row.max_purchase, total_quotas),
        promotions: row
            .promotions
            .unwrap_or_default()
            .into_iter()
            .map(promotion_from_wire)
            .collect(),
        organizer_id: row.organizer_id.map(UserId),
        draw_date: row.draw_date,
    }
}

/// Convert an optional purchase bound, defaulting and flooring at 1.
fn purchase_bound(raw: Option<i64>, fallback: i64) -> u32 {
    u32::try_from(raw.unwrap_or(fallback).max(1)).unwrap_or(u32::MAX)
}

fn promotion_from_wire(wire: PromotionWire) -> Promotion {
    Promotion {
        id: wire.id,
        ticket_quantity: wire.ticket_quantity,
        discounted_total_value: Money::from_cents(wire.discounted_total_value),
        fixed_discount_amount: wire.fixed_discount_amount.map(Money::from_cents),
    }
}

fn ticket_from_row(row: TicketStatusRow) -> Ticket {
    Ticket {
        quota_number: row.quota_number,
        status: TicketStatus::from_wire_lossy(&row.status),
        user_id: row.user_id.map(UserId),
        reserved_at: row.reserved_at,
        bought_at: row.bought_at,
    }
}

fn ranking_from_entry(row: RankingEntry) -> RankingRow {
    RankingRow {
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        ticket_count: row.ticket_count,
    }
}

fn sales_from_point(row: SalesHistoryPoint) -> SalesPoint {
    SalesPoint {
        day: row.day,
        tickets_sold: row.tickets_sold,
        revenue: Money::from_cents(row.revenue_cents),
    }
}

fn winner_from_outcome(row: DrawOutcome) -> Winner {
    Winner {
        quota_number: row.quota_number,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        user_id: row.user_id.map(UserId),
        drawn_at: row.drawn_at,
        position: None,
    }
}

fn winner_from_row(row: WinnerRow) -> Winner {
    Winner {
        quota_number: row.quota_number,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        user_id: None,
        drawn_at: row.drawn_at,
        position: row.position,
    }
}

fn details_from_record(row: WinnerRecord) -> WinnerDetails {
    WinnerDetails {
        quota_number: row.quota_number,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        customer_email: row.customer_email,
        bought_at: row.bought_at,
    }
}

fn validation_from_row(row: DrawTicketValidation) -> TicketValidation {
    TicketValidation {
        quota_number: row.quota_number,
        valid: row.valid,
        status: row.status.and_then(|s| TicketStatus::from_wire(&s)),
    }
}

fn phone_ticket_from_row(row: PhoneTicketRow) -> PhoneTicket {
    PhoneTicket {
        campaign_id: CampaignId(row.campaign_id),
        campaign_title: row.campaign_title,
        quota_number: row.quota_number,
        status: TicketStatus::from_wire_lossy(&row.status),
        bought_at: row.bought_at,
    }
}
