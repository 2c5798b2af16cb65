//! Campaign domain state types.
//!
//! This module defines the state managed by the campaign reducers: the
//! loaded campaign, the ticket board, the quantity selection, and the
//! draw/report/lookup surfaces. All types are `Clone` to support the
//! functional architecture pattern.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::validation;
use crate::error::{CampaignError, Result};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignId(pub uuid::Uuid);

impl CampaignId {
    /// Generate a new random `CampaignId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for CampaignId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Money
// ═══════════════════════════════════════════════════════════════════════

/// A monetary amount in integer cents (centavos).
///
/// All pricing math stays in integer cents; formatting to reais happens
/// only at display time.
///
/// # Examples
///
/// ```
/// # use rifaqui_campaigns::state::Money;
/// let price = Money::from_cents(1050);
/// assert_eq!(price.cents(), 1050);
/// assert_eq!(price.to_string(), "R$ 10,50");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(pub i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Build an amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in integer cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Clamp negative amounts to zero.
    #[must_use]
    pub const fn floor_at_zero(self) -> Self {
        if self.0 < 0 { Self::ZERO } else { self }
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}R$ {},{:02}", cents / 100, cents % 100)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tickets
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle status of a ticket (quota).
///
/// Transitions are enforced server-side: available → reserved → purchased,
/// or reserved → available when a reservation expires or is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Nobody holds the quota.
    Available,
    /// A buyer holds the quota pending payment.
    Reserved,
    /// The quota is paid for.
    Purchased,
}

impl TicketStatus {
    /// Parse the raw wire value.
    ///
    /// The backend stores Portuguese status strings; both the plain and
    /// accented spellings appear in older rows, so both are accepted.
    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "disponivel" | "disponível" => Some(Self::Available),
            "reservado" => Some(Self::Reserved),
            "comprado" => Some(Self::Purchased),
            _ => None,
        }
    }

    /// Parse the raw wire value, degrading unknown values to
    /// [`TicketStatus::Available`] with a warning instead of failing the
    /// whole page.
    #[must_use]
    pub fn from_wire_lossy(raw: &str) -> Self {
        Self::from_wire(raw).unwrap_or_else(|| {
            tracing::warn!(status = raw, "unknown ticket status on the wire");
            Self::Available
        })
    }

    /// The canonical (unaccented) wire spelling.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Available => "disponivel",
            Self::Reserved => "reservado",
            Self::Purchased => "comprado",
        }
    }
}

/// One ticket of a campaign, as mirrored from the backend.
///
/// The client never mutates tickets locally; every change goes through a
/// reservation/release RPC and comes back via a board refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// 1-based quota number within the campaign.
    pub quota_number: i64,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Owner of the reservation/purchase, if any.
    pub user_id: Option<UserId>,
    /// When the ticket was reserved, if it was.
    pub reserved_at: Option<DateTime<Utc>>,
    /// When the ticket was bought, if it was.
    pub bought_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Whether this ticket belongs to the given viewer.
    #[must_use]
    pub fn is_mine(&self, viewer: Option<UserId>) -> bool {
        match (self.user_id, viewer) {
            (Some(owner), Some(viewer)) => owner == viewer,
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Promotions
// ═══════════════════════════════════════════════════════════════════════

/// A promotional price tier on a campaign.
///
/// Exactly one tier applies to a purchase: the one with the highest
/// `ticket_quantity` that does not exceed the selected quantity. Tiers
/// do not stack or repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Client-generated identifier.
    pub id: String,
    /// Number of tickets the tier covers.
    pub ticket_quantity: u32,
    /// Total price for `ticket_quantity` tickets.
    pub discounted_total_value: Money,
    /// Alternative pricing: flat discount off the unit total for the
    /// covered tickets. Takes precedence over `discounted_total_value`
    /// when present.
    pub fixed_discount_amount: Option<Money>,
}

// ═══════════════════════════════════════════════════════════════════════
// Customers and winners
// ═══════════════════════════════════════════════════════════════════════

/// Buyer form input used to reserve tickets.
///
/// Validation here is a UX affordance only; the backend re-validates on
/// every reservation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    /// Buyer display name.
    pub name: String,
    /// Buyer phone, free-form (normalized before hitting the wire).
    pub phone: String,
    /// Buyer email, optional.
    pub email: Option<String>,
}

impl CustomerData {
    /// Soft-validate the form input.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank, the phone does
    /// not normalize to an acceptable digit count, or the email is
    /// present but not plausibly an address.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CampaignError::MissingCustomerName);
        }
        normalize_phone(&self.phone)?;
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(CampaignError::InvalidCustomerEmail {
                    email: email.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Normalize a free-form phone to bare digits.
///
/// Strips formatting characters and checks the digit count covers local
/// numbers up to country-prefixed ones.
///
/// # Errors
///
/// Returns [`CampaignError::InvalidCustomerPhone`] when the digit count
/// falls outside the accepted range.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < validation::MIN_PHONE_DIGITS || digits.len() > validation::MAX_PHONE_DIGITS {
        return Err(CampaignError::InvalidCustomerPhone {
            phone: raw.to_string(),
        });
    }
    Ok(digits)
}

/// A drawn winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    /// The winning quota number.
    pub quota_number: i64,
    /// Winner display name.
    pub customer_name: String,
    /// Winner phone, when the campaign exposes it.
    pub customer_phone: Option<String>,
    /// Winner account id, when the buyer was signed in.
    pub user_id: Option<UserId>,
    /// When the draw was performed.
    pub drawn_at: DateTime<Utc>,
    /// Prize position for multi-prize campaigns (1 = first prize).
    pub position: Option<i32>,
}

/// Buyer contact details for a winning quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerDetails {
    /// The winning quota number.
    pub quota_number: i64,
    /// Buyer display name.
    pub customer_name: String,
    /// Buyer phone, when available.
    pub customer_phone: Option<String>,
    /// Buyer email, when available.
    pub customer_email: Option<String>,
    /// When the winning ticket was bought.
    pub bought_at: Option<DateTime<Utc>>,
}

/// Per-number validity from the pre-draw check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketValidation {
    /// The quota number that was checked.
    pub quota_number: i64,
    /// Whether the number corresponds to a sold ticket.
    pub valid: bool,
    /// Current status of the ticket, when it exists.
    pub status: Option<TicketStatus>,
}

// ═══════════════════════════════════════════════════════════════════════
// Reports and lookup rows
// ═══════════════════════════════════════════════════════════════════════

/// One row of the top-buyers ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    /// Buyer display name.
    pub customer_name: String,
    /// Buyer phone, when the campaign exposes it.
    pub customer_phone: Option<String>,
    /// Number of tickets bought by this buyer.
    pub ticket_count: i64,
}

/// One day of the sales history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// Calendar day the point aggregates.
    pub day: NaiveDate,
    /// Tickets sold on that day.
    pub tickets_sold: i64,
    /// Revenue for that day.
    pub revenue: Money,
}

/// One of a buyer's tickets, found by phone lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneTicket {
    /// Campaign the ticket belongs to.
    pub campaign_id: CampaignId,
    /// Campaign title for display.
    pub campaign_title: String,
    /// The quota number.
    pub quota_number: i64,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Purchase timestamp, if bought.
    pub bought_at: Option<DateTime<Utc>>,
}

// ═══════════════════════════════════════════════════════════════════════
// Campaign
// ═══════════════════════════════════════════════════════════════════════

/// A campaign as loaded from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign id.
    pub id: CampaignId,
    /// URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Long description, when set.
    pub description: Option<String>,
    /// Total number of quotas in the campaign.
    pub total_quotas: i64,
    /// Unit price per quota.
    pub quota_price: Money,
    /// Minimum quotas per purchase.
    pub min_purchase: u32,
    /// Maximum quotas per purchase.
    pub max_purchase: u32,
    /// Promotional price tiers.
    pub promotions: Vec<Promotion>,
    /// Organizer account id.
    pub organizer_id: Option<UserId>,
    /// Scheduled draw date, when announced.
    pub draw_date: Option<DateTime<Utc>>,
}

impl Campaign {
    /// Clamp a selected quantity into the campaign's purchase limits.
    #[must_use]
    pub const fn clamp_quantity(&self, quantity: u32) -> u32 {
        let max = if self.max_purchase < self.min_purchase {
            self.min_purchase
        } else {
            self.max_purchase
        };
        if quantity < self.min_purchase {
            self.min_purchase
        } else if quantity > max {
            max
        } else {
            quantity
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Flow state
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle of a single-shot remote load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Failed,
}

/// Ticket board state: the full per-ticket status list of one campaign.
///
/// Every refresh bumps `refresh_epoch`; completion events carry the epoch
/// they started with so a slow stale fetch can never clobber a fresher
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Campaign the board is showing, once opened.
    pub campaign_id: Option<CampaignId>,
    /// Signed-in viewer, used for the "mine" view.
    pub viewer: Option<UserId>,
    /// Load lifecycle of the board.
    pub phase: LoadPhase,
    /// The loaded ticket list, in quota-number order.
    pub tickets: Vec<Ticket>,
    /// Monotonic refresh counter for stale-response protection.
    pub refresh_epoch: u64,
    /// When the current snapshot was loaded.
    pub loaded_at: Option<DateTime<Utc>>,
    /// Message of the last board failure, if any.
    pub last_error: Option<String>,
    /// A reservation call is in flight.
    pub reserving: bool,
    /// A release call is in flight.
    pub releasing: bool,
}

impl BoardState {
    /// Tickets with the given status, preserving board order.
    #[must_use]
    pub fn by_status(&self, status: TicketStatus) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| t.status == status).collect()
    }

    /// Tickets owned by the current viewer.
    #[must_use]
    pub fn mine(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.is_mine(self.viewer))
            .collect()
    }

    /// Convenience view of the available tickets.
    #[must_use]
    pub fn available(&self) -> Vec<&Ticket> {
        self.by_status(TicketStatus::Available)
    }
}

/// Quantity selector state for the purchase stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Currently selected quantity.
    pub quantity: u32,
}

/// Lifecycle of a server-side draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPhase {
    /// No draw requested.
    #[default]
    Idle,
    /// The draw RPC is in flight.
    Drawing,
    /// The last draw completed.
    Drawn,
    /// The last draw failed.
    Failed,
}

/// Draw surface state.
///
/// The client never picks winners; it requests a draw and mirrors the
/// outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    /// Draw lifecycle.
    pub phase: DrawPhase,
    /// Most recent draw outcome.
    pub latest: Option<Winner>,
    /// Recorded winners, newest first.
    pub winners: Vec<Winner>,
    /// Contact details for a selected winning quota.
    pub winner_details: Option<WinnerDetails>,
    /// Results of the last pre-draw number check.
    pub validations: Vec<TicketValidation>,
    /// Message of the last draw failure, if any.
    pub last_error: Option<String>,
}

/// Reports surface state: ranking and sales history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsState {
    /// Ranking load lifecycle.
    pub ranking_phase: LoadPhase,
    /// Top buyers, best first.
    pub ranking: Vec<RankingRow>,
    /// Sales history load lifecycle.
    pub history_phase: LoadPhase,
    /// Per-day sales points, oldest first.
    pub history: Vec<SalesPoint>,
    /// Message of the last reports failure, if any.
    pub last_error: Option<String>,
}

/// Buyer lookup surface state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupState {
    /// Lookup lifecycle.
    pub phase: LoadPhase,
    /// Normalized phone of the last search.
    pub phone: Option<String>,
    /// Tickets found for that phone, across campaigns.
    pub tickets: Vec<PhoneTicket>,
    /// Message of the last lookup failure, if any.
    pub last_error: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Root state
// ═══════════════════════════════════════════════════════════════════════

/// Root campaign state.
///
/// This is the state managed by the campaign reducer: one campaign page
/// worth of board, selection, draw, report and lookup state.
///
/// # Examples
///
/// ```
/// # use rifaqui_campaigns::state::CampaignState;
/// let state = CampaignState::default();
/// assert!(state.campaign.is_none());
/// assert!(state.board.tickets.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignState {
    /// The loaded campaign, once the board has been opened.
    pub campaign: Option<Campaign>,
    /// Ticket board state.
    pub board: BoardState,
    /// Quantity selector state.
    pub selection: SelectionState,
    /// Draw surface state.
    pub draw: DrawState,
    /// Reports surface state.
    pub reports: ReportsState,
    /// Buyer lookup surface state.
    pub lookup: LookupState,
}

impl CampaignState {
    /// Live price preview for the current selection, once the campaign
    /// is loaded.
    #[must_use]
    pub fn price_preview(&self) -> Option<crate::pricing::PricePreview> {
        let campaign = self.campaign.as_ref()?;
        Some(crate::pricing::price_preview(
            self.selection.quantity,
            campaign.quota_price,
            &campaign.promotions,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ticket(quota: i64, status: TicketStatus, user: Option<UserId>) -> Ticket {
        Ticket {
            quota_number: quota,
            status,
            user_id: user,
            reserved_at: None,
            bought_at: None,
        }
    }

    #[test]
    fn status_parses_plain_and_accented_spellings() {
        assert_eq!(
            TicketStatus::from_wire("disponivel"),
            Some(TicketStatus::Available)
        );
        assert_eq!(
            TicketStatus::from_wire("Disponível"),
            Some(TicketStatus::Available)
        );
        assert_eq!(
            TicketStatus::from_wire("reservado"),
            Some(TicketStatus::Reserved)
        );
        assert_eq!(
            TicketStatus::from_wire(" comprado "),
            Some(TicketStatus::Purchased)
        );
        assert_eq!(TicketStatus::from_wire("pendente"), None);
    }

    #[test]
    fn lossy_status_degrades_to_available() {
        assert_eq!(
            TicketStatus::from_wire_lossy("???"),
            TicketStatus::Available
        );
    }

    #[test]
    fn money_formats_as_reais() {
        assert_eq!(Money::from_cents(1050).to_string(), "R$ 10,50");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(-250).to_string(), "-R$ 2,50");
    }

    #[test]
    fn money_arithmetic_stays_in_cents() {
        let unit = Money::from_cents(100);
        assert_eq!((unit * 30).cents(), 3000);
        assert_eq!((unit * 30 - Money::from_cents(500)).cents(), 2500);
        assert_eq!(Money::from_cents(-10).floor_at_zero(), Money::ZERO);
    }

    #[test]
    fn ticket_ownership_requires_both_sides() {
        let owner = UserId::new();
        let other = UserId::new();
        let mine = ticket(1, TicketStatus::Purchased, Some(owner));

        assert!(mine.is_mine(Some(owner)));
        assert!(!mine.is_mine(Some(other)));
        assert!(!mine.is_mine(None));
        assert!(!ticket(2, TicketStatus::Available, None).is_mine(Some(owner)));
    }

    #[test]
    fn board_views_filter_by_status_and_owner() {
        let viewer = UserId::new();
        let board = BoardState {
            viewer: Some(viewer),
            tickets: vec![
                ticket(1, TicketStatus::Available, None),
                ticket(2, TicketStatus::Reserved, Some(viewer)),
                ticket(3, TicketStatus::Purchased, Some(UserId::new())),
            ],
            ..BoardState::default()
        };

        assert_eq!(board.available().len(), 1);
        assert_eq!(board.by_status(TicketStatus::Purchased).len(), 1);
        let mine = board.mine();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].quota_number, 2);
    }

    #[test]
    fn phone_normalization_strips_formatting() {
        assert_eq!(
            normalize_phone("(11) 98888-7766").unwrap(),
            "11988887766"
        );
        assert_eq!(normalize_phone("+55 11 98888 7766").unwrap(), "5511988887766");
        assert!(normalize_phone("1234").is_err());
        assert!(normalize_phone("not a phone").is_err());
    }

    #[test]
    fn customer_validation_is_soft_but_typed() {
        let ok = CustomerData {
            name: "Maria Silva".to_string(),
            phone: "(11) 98888-7766".to_string(),
            email: Some("maria@example.com".to_string()),
        };
        assert!(ok.validate().is_ok());

        let blank_name = CustomerData {
            name: "  ".to_string(),
            ..ok.clone()
        };
        assert!(matches!(
            blank_name.validate(),
            Err(CampaignError::MissingCustomerName)
        ));

        let bad_email = CustomerData {
            email: Some("not-an-address".to_string()),
            ..ok
        };
        assert!(matches!(
            bad_email.validate(),
            Err(CampaignError::InvalidCustomerEmail { .. })
        ));
    }

    #[test]
    fn quantity_clamps_into_purchase_limits() {
        let campaign = Campaign {
            id: CampaignId::new(),
            slug: "rifa".to_string(),
            title: "Rifa".to_string(),
            description: None,
            total_quotas: 1000,
            quota_price: Money::from_cents(100),
            min_purchase: 5,
            max_purchase: 200,
            promotions: vec![],
            organizer_id: None,
            draw_date: None,
        };

        assert_eq!(campaign.clamp_quantity(1), 5);
        assert_eq!(campaign.clamp_quantity(50), 50);
        assert_eq!(campaign.clamp_quantity(999), 200);
    }
}
