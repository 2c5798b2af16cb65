//! Wire types for the Rifaqui backend

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ticket row from the paged status RPC
///
/// `status` is the raw wire value (`disponivel` / `reservado` / `comprado`);
/// the domain layer owns the mapping to its own enum so an unknown value
/// degrades instead of failing the whole page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketStatusRow {
    /// 1-based quota number within the campaign
    pub quota_number: i64,
    /// Raw status string as stored server-side
    pub status: String,
    /// Owner of the reservation/purchase, if any
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// When the ticket was reserved, if it was
    #[serde(default)]
    pub reserved_at: Option<DateTime<Utc>>,
    /// When the ticket was bought, if it was
    #[serde(default)]
    pub bought_at: Option<DateTime<Utc>>,
}

/// One row of the buyer ranking
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
    /// Buyer display name
    pub customer_name: String,
    /// Buyer phone, when the campaign exposes it
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Number of tickets bought by this buyer
    pub ticket_count: i64,
}

/// One day of the sales history series
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SalesHistoryPoint {
    /// Calendar day the point aggregates
    pub day: NaiveDate,
    /// Tickets sold on that day
    pub tickets_sold: i64,
    /// Revenue for that day, in integer cents
    pub revenue_cents: i64,
}

/// Result of a server-side draw
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrawOutcome {
    /// The winning quota number
    pub quota_number: i64,
    /// Winner display name
    pub customer_name: String,
    /// Winner phone, when available
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Winner account id, when the buyer was signed in
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// When the draw was performed
    pub drawn_at: DateTime<Utc>,
}

/// Buyer details for a winning quota
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WinnerRecord {
    /// The winning quota number
    pub quota_number: i64,
    /// Buyer display name
    pub customer_name: String,
    /// Buyer phone, when available
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Buyer email, when available
    #[serde(default)]
    pub customer_email: Option<String>,
    /// When the winning ticket was bought
    #[serde(default)]
    pub bought_at: Option<DateTime<Utc>>,
}

/// Per-number validity from the pre-draw check
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrawTicketValidation {
    /// The quota number that was checked
    pub quota_number: i64,
    /// Whether the number corresponds to a sold ticket
    pub valid: bool,
    /// Current status of the ticket, when it exists
    #[serde(default)]
    pub status: Option<String>,
}

/// One of a buyer's tickets, looked up by phone
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PhoneTicketRow {
    /// Campaign the ticket belongs to
    pub campaign_id: Uuid,
    /// Campaign title for display
    pub campaign_title: String,
    /// The quota number
    pub quota_number: i64,
    /// Raw status string
    pub status: String,
    /// Purchase timestamp, if bought
    #[serde(default)]
    pub bought_at: Option<DateTime<Utc>>,
}

/// A promotion tier as persisted on the campaign row
///
/// The blob is client-constructed, so the field names are the camelCase
/// the web clients wrote. Money values are integer cents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionWire {
    /// Client-generated identifier
    pub id: String,
    /// Number of tickets the tier covers
    pub ticket_quantity: u32,
    /// Total price for `ticket_quantity` tickets, in cents
    pub discounted_total_value: i64,
    /// Alternative: flat discount off the unit total, in cents
    #[serde(default)]
    pub fixed_discount_amount: Option<i64>,
}

/// A campaign row
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CampaignRow {
    /// Campaign id
    pub id: Uuid,
    /// URL slug
    pub slug: String,
    /// Display title
    pub title: String,
    /// Long description, when set
    #[serde(default)]
    pub description: Option<String>,
    /// Total number of quotas in the campaign
    pub total_quotas: i64,
    /// Unit price per quota, in integer cents
    pub quota_price_cents: i64,
    /// Minimum quotas per purchase, when the organizer set one
    #[serde(default)]
    pub min_purchase: Option<i64>,
    /// Maximum quotas per purchase, when the organizer set one
    #[serde(default)]
    pub max_purchase: Option<i64>,
    /// Promotion tiers, stored as a JSON blob on the row
    #[serde(default)]
    pub promotions: Option<Vec<PromotionWire>>,
    /// Organizer account id
    #[serde(default)]
    pub organizer_id: Option<Uuid>,
    /// Scheduled draw date, when announced
    #[serde(default)]
    pub draw_date: Option<DateTime<Utc>>,
}

/// A profile row (viewer-facing account data)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileRow {
    /// Account id
    pub id: Uuid,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// A public profile row (organizer display data)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PublicProfileRow {
    /// Account id
    pub id: Uuid,
    /// Public display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A recorded winner row (`campaign_winners` table)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WinnerRow {
    /// Row id
    pub id: Uuid,
    /// Campaign the win belongs to
    pub campaign_id: Uuid,
    /// The winning quota number
    pub quota_number: i64,
    /// Winner display name
    pub customer_name: String,
    /// Winner phone, when available
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// When the draw was performed
    pub drawn_at: DateTime<Utc>,
    /// Prize position for multi-prize campaigns (1 = first prize)
    #[serde(default)]
    pub position: Option<i32>,
}

/// A custom domain mapping row
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomDomainRow {
    /// Row id
    pub id: Uuid,
    /// The mapped host name
    pub domain: String,
    /// Campaign served on that host
    pub campaign_id: Uuid,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ticket_status_row_parses_minimal_payload() {
        let row: TicketStatusRow =
            serde_json::from_str(r#"{"quota_number": 7, "status": "disponivel"}"#).unwrap();
        assert_eq!(row.quota_number, 7);
        assert_eq!(row.status, "disponivel");
        assert!(row.user_id.is_none());
    }

    #[test]
    fn promotion_wire_uses_camel_case() {
        let promo = PromotionWire {
            id: "p1".to_string(),
            ticket_quantity: 10,
            discounted_total_value: 800,
            fixed_discount_amount: None,
        };

        let json = serde_json::to_string(&promo).unwrap();
        assert!(json.contains(r#""ticketQuantity":10"#));
        assert!(json.contains(r#""discountedTotalValue":800"#));
    }

    #[test]
    fn campaign_row_tolerates_missing_optionals() {
        let json = r#"{
            "id": "2c7c1f51-4c70-4e9f-9de6-4a97c2c8be01",
            "slug": "rifa-do-bairro",
            "title": "Rifa do Bairro",
            "total_quotas": 10000,
            "quota_price_cents": 100
        }"#;
        let row: CampaignRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.total_quotas, 10_000);
        assert!(row.promotions.is_none());
        assert!(row.max_purchase.is_none());
    }

    #[test]
    fn sales_history_day_round_trips() {
        let point = SalesHistoryPoint {
            day: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            tickets_sold: 42,
            revenue_cents: 4200,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains(r#""day":"2025-03-14""#));
    }
}
