//! Promotion pricing.
//!
//! Pure arithmetic over a campaign's promotion tiers, all in integer
//! cents. Exactly one tier can apply to a purchase; tiers never stack
//! or repeat.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CampaignError, Result};
use crate::state::{Money, Promotion};

/// The promotion that applies to a selected quantity.
///
/// A linear scan for the tier with the highest `ticket_quantity` not
/// exceeding the selection; `None` when no tier fits.
#[must_use]
pub fn best_promotion(quantity: u32, promotions: &[Promotion]) -> Option<&Promotion> {
    promotions
        .iter()
        .filter(|p| p.ticket_quantity <= quantity)
        .max_by_key(|p| p.ticket_quantity)
}

/// Total price for a quantity, applying at most one promotion tier.
///
/// The applied tier covers its `ticket_quantity` tickets: at the tier's
/// discounted total, or, when a fixed discount is set, at the unit total
/// minus that discount (floored at zero). Tickets beyond the tier are
/// charged at the unit price.
///
/// # Examples
///
/// ```
/// # use rifaqui_campaigns::pricing::total_with_promotions;
/// # use rifaqui_campaigns::state::{Money, Promotion};
/// let unit = Money::from_cents(100);
/// let tiers = vec![Promotion {
///     id: "p10".to_string(),
///     ticket_quantity: 10,
///     discounted_total_value: Money::from_cents(800),
///     fixed_discount_amount: None,
/// }];
///
/// // 10 covered at 800, 20 more at unit price.
/// assert_eq!(total_with_promotions(30, unit, &tiers).cents(), 2800);
/// ```
#[must_use]
pub fn total_with_promotions(quantity: u32, unit_price: Money, promotions: &[Promotion]) -> Money {
    let Some(promotion) = best_promotion(quantity, promotions) else {
        return unit_price * i64::from(quantity);
    };

    let covered = i64::from(promotion.ticket_quantity);
    let tier_total = match promotion.fixed_discount_amount {
        Some(discount) => (unit_price * covered - discount).floor_at_zero(),
        None => promotion.discounted_total_value,
    };

    let remainder = i64::from(quantity - promotion.ticket_quantity);
    tier_total + unit_price * remainder
}

/// Presentation-ready price preview for the quantity stepper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePreview {
    /// Selected quantity.
    pub quantity: u32,
    /// Total after promotions.
    pub total: Money,
    /// Plain unit total, for strikethrough display.
    pub unit_total: Money,
    /// Savings against the unit total.
    pub savings: Money,
    /// Id of the applied promotion, if one fit.
    pub applied_promotion: Option<String>,
}

/// Build the live price preview for a selection.
#[must_use]
pub fn price_preview(quantity: u32, unit_price: Money, promotions: &[Promotion]) -> PricePreview {
    let unit_total = unit_price * i64::from(quantity);
    let total = total_with_promotions(quantity, unit_price, promotions);
    PricePreview {
        quantity,
        total,
        unit_total,
        savings: (unit_total - total).floor_at_zero(),
        applied_promotion: best_promotion(quantity, promotions).map(|p| p.id.clone()),
    }
}

/// Soft-validate that promotion quantities are unique across a campaign.
///
/// This is a client-side affordance before saving a campaign; nothing
/// guards the table server-side.
///
/// # Errors
///
/// Returns [`CampaignError::DuplicatePromotionQuantity`] for the first
/// repeated quantity.
pub fn validate_promotions(promotions: &[Promotion]) -> Result<()> {
    let mut seen = HashSet::new();
    for promotion in promotions {
        if !seen.insert(promotion.ticket_quantity) {
            return Err(CampaignError::DuplicatePromotionQuantity {
                quantity: promotion.ticket_quantity,
            });
        }
    }
    Ok(())
}
