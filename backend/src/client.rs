//! HTTP client for the Rifaqui backend

use crate::{
    config::BackendConfig,
    error::BackendError,
    types::{
        CampaignRow, CustomDomainRow, DrawOutcome, DrawTicketValidation, PhoneTicketRow,
        ProfileRow, PublicProfileRow, RankingEntry, SalesHistoryPoint, TicketStatusRow,
        WinnerRecord, WinnerRow,
    },
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

/// Typed client for the backend REST gateway
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a client from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingEnv`] if `RIFAQUI_API_URL` or
    /// `RIFAQUI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, BackendError> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    /// Create a client with an explicit config
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The config this client was built with
    ///
    /// The realtime channel reuses it for the WebSocket URL and API key.
    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Call an RPC function (`POST /rest/v1/rpc/{name}`)
    async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        params: serde_json::Value,
    ) -> Result<T, BackendError> {
        tracing::debug!(function, "Calling backend RPC");

        let response = self
            .client
            .post(format!("{}/rest/v1/rpc/{function}", self.config.api_url))
            .header("apikey", &self.config.api_key)
            .header("authorization", format!("Bearer {}", self.config.api_key))
            .header("content-type", "application/json")
            .json(&params)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Read rows from a table (`GET /rest/v1/{table}`)
    ///
    /// `filters` are PostgREST query parameters, e.g. `("id", "eq.{uuid}")`.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        tracing::debug!(table, "Reading backend table");

        let response = self
            .client
            .get(format!("{}/rest/v1/{table}", self.config.api_url))
            .header("apikey", &self.config.api_key)
            .header("authorization", format!("Bearer {}", self.config.api_key))
            .query(filters)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Map a response into a typed value or an error
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        match response.status() {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|e| BackendError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(BackendError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BackendError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RPC surface
    // ═══════════════════════════════════════════════════════════════════════

    /// Fetch one page of per-ticket statuses for a campaign
    ///
    /// `viewer_id` lets the server mark rows owned by the viewer; `offset`
    /// and `limit` select the page. Callers own paging and concurrency.
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn ticket_status_page(
        &self,
        campaign_id: Uuid,
        viewer_id: Option<Uuid>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TicketStatusRow>, BackendError> {
        self.rpc(
            "get_campaign_tickets_status",
            json!({
                "campaign_id": campaign_id,
                "user_id": viewer_id,
                "offset_count": offset,
                "limit_count": limit,
            }),
        )
        .await
    }

    /// Reserve a batch of quota numbers for a customer
    ///
    /// Atomicity across concurrent buyers is the server's job; a conflict
    /// surfaces as [`BackendError::ApiError`]. Returns the quota numbers
    /// actually reserved.
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn reserve_tickets(
        &self,
        campaign_id: Uuid,
        quota_numbers: &[i64],
        customer_name: &str,
        customer_phone: &str,
        customer_email: Option<&str>,
    ) -> Result<Vec<i64>, BackendError> {
        self.rpc(
            "reserve_tickets",
            json!({
                "campaign_id": campaign_id,
                "quota_numbers": quota_numbers,
                "customer_name": customer_name,
                "customer_phone": customer_phone,
                "customer_email": customer_email,
            }),
        )
        .await
    }

    /// Release a batch of previously reserved quota numbers
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn release_tickets(
        &self,
        campaign_id: Uuid,
        quota_numbers: &[i64],
    ) -> Result<Vec<i64>, BackendError> {
        self.rpc(
            "release_tickets",
            json!({
                "campaign_id": campaign_id,
                "quota_numbers": quota_numbers,
            }),
        )
        .await
    }

    /// Top buyers for a campaign, ordered by ticket count
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn campaign_ranking(
        &self,
        campaign_id: Uuid,
        limit: u32,
    ) -> Result<Vec<RankingEntry>, BackendError> {
        self.rpc(
            "get_campaign_ranking",
            json!({
                "campaign_id": campaign_id,
                "limit_count": limit,
            }),
        )
        .await
    }

    /// Per-day sales series for the last `days` days
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn sales_history(
        &self,
        campaign_id: Uuid,
        days: u32,
    ) -> Result<Vec<SalesHistoryPoint>, BackendError> {
        self.rpc(
            "get_campaign_sales_history",
            json!({
                "campaign_id": campaign_id,
                "days_count": days,
            }),
        )
        .await
    }

    /// Ask the server to draw a winner for the campaign
    ///
    /// The draw is server-authoritative; this call only reports the outcome.
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn perform_draw(&self, campaign_id: Uuid) -> Result<DrawOutcome, BackendError> {
        self.rpc(
            "perform_campaign_draw",
            json!({
                "campaign_id": campaign_id,
            }),
        )
        .await
    }

    /// Buyer details for a winning quota
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn winner_details(
        &self,
        campaign_id: Uuid,
        quota_number: i64,
    ) -> Result<WinnerRecord, BackendError> {
        self.rpc(
            "get_winner_details",
            json!({
                "campaign_id": campaign_id,
                "quota_number": quota_number,
            }),
        )
        .await
    }

    /// Check externally drawn numbers against sold tickets
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn validate_draw_tickets(
        &self,
        campaign_id: Uuid,
        quota_numbers: &[i64],
    ) -> Result<Vec<DrawTicketValidation>, BackendError> {
        self.rpc(
            "validate_draw_tickets",
            json!({
                "campaign_id": campaign_id,
                "quota_numbers": quota_numbers,
            }),
        )
        .await
    }

    /// A buyer's tickets across campaigns, looked up by phone
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn tickets_by_phone(&self, phone: &str) -> Result<Vec<PhoneTicketRow>, BackendError> {
        self.rpc(
            "get_tickets_by_phone",
            json!({
                "phone": phone,
            }),
        )
        .await
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Table reads
    // ═══════════════════════════════════════════════════════════════════════

    /// Fetch a campaign by id
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] when no such campaign exists, plus the
    /// usual transport/auth/decode failures.
    pub async fn campaign_by_id(&self, id: Uuid) -> Result<CampaignRow, BackendError> {
        let rows: Vec<CampaignRow> = self
            .select(
                "campaigns",
                &[("id", format!("eq.{id}")), ("limit", "1".to_string())],
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("campaign {id}")))
    }

    /// Fetch a campaign by its URL slug
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] when no such campaign exists, plus the
    /// usual transport/auth/decode failures.
    pub async fn campaign_by_slug(&self, slug: &str) -> Result<CampaignRow, BackendError> {
        let rows: Vec<CampaignRow> = self
            .select(
                "campaigns",
                &[("slug", format!("eq.{slug}")), ("limit", "1".to_string())],
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("campaign with slug {slug}")))
    }

    /// Fetch a profile row, if one exists
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn profile(&self, id: Uuid) -> Result<Option<ProfileRow>, BackendError> {
        let rows: Vec<ProfileRow> = self
            .select(
                "profiles",
                &[("id", format!("eq.{id}")), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Fetch a public profile row, if one exists
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn public_profile(&self, id: Uuid) -> Result<Option<PublicProfileRow>, BackendError> {
        let rows: Vec<PublicProfileRow> = self
            .select(
                "public_profiles",
                &[("id", format!("eq.{id}")), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Recorded winners for a campaign, newest draw first
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn campaign_winners(&self, campaign_id: Uuid) -> Result<Vec<WinnerRow>, BackendError> {
        self.select(
            "campaign_winners",
            &[
                ("campaign_id", format!("eq.{campaign_id}")),
                ("order", "drawn_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Resolve a host name to its campaign, if a mapping exists
    ///
    /// # Errors
    ///
    /// Transport, auth, and decode failures per [`BackendError`].
    pub async fn campaign_for_domain(
        &self,
        host: &str,
    ) -> Result<Option<CustomDomainRow>, BackendError> {
        let rows: Vec<CustomDomainRow> = self
            .select(
                "custom_domains",
                &[("domain", format!("eq.{host}")), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}
