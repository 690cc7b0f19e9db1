//! # Tier Selector
//!
//! Builds the tier choices shown next to a product's draft price and tracks
//! which single tier is chosen.
//!
//! ```text
//! draft price "100" + tiers
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ ( ) Retail     Markup: 10% — Value: 110.00   │
//! │ (•) Wholesale  Discount: 5% — Value: 95.00   │
//! │ ( ) Staff                                    │  ◄── no effective rule
//! └──────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{BasePrice, PricingRule};
use crate::types::PriceTier;
use crate::validation::ValidationResult;

/// One selectable tier with the price it would produce.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierOption {
    pub tier_id: i64,
    pub name: String,
    pub is_active: bool,
    pub rule: PricingRule,
    pub price: Money,
    /// `"Markup: 10% — Value: 110.00"`; absent when the rule changes nothing.
    pub effect: Option<String>,
}

/// Prices every tier against one draft base price.
///
/// The base price is parsed once; a non-numeric base fails the whole call.
pub fn tier_options(
    base_price: impl Into<BasePrice>,
    tiers: &[PriceTier],
) -> CoreResult<Vec<TierOption>> {
    let base = base_price.into().to_amount()?;

    Ok(tiers
        .iter()
        .map(|tier| {
            let price = if base.is_zero() {
                Money::zero()
            } else {
                tier.rule.apply_amount(base)
            };
            TierOption {
                tier_id: tier.id,
                name: tier.name.clone(),
                is_active: tier.is_active,
                rule: tier.rule,
                price,
                effect: effect_line(&tier.rule, price),
            }
        })
        .collect())
}

/// Human-readable effect of a rule at a given price.
pub fn effect_line(rule: &PricingRule, price: Money) -> Option<String> {
    if !rule.is_effective() {
        return None;
    }
    let label = rule.label()?;
    let percent = rule.percent()?;
    Some(format!(
        "{}: {}% — Value: {}",
        label,
        percent,
        price.format_grouped()
    ))
}

// =============================================================================
// Selection
// =============================================================================

/// Single-choice tier selection for one product form.
///
/// Only active tiers are offered. Choosing the selected tier again clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierSelection {
    offered: Vec<i64>,
    selected: Option<i64>,
}

impl TierSelection {
    pub fn from_tiers(tiers: &[PriceTier]) -> Self {
        TierSelection {
            offered: tiers.iter().filter(|t| t.is_active).map(|t| t.id).collect(),
            selected: None,
        }
    }

    /// Starts from a product's current assignment, dropping it if the tier
    /// is no longer offered.
    pub fn with_selected(mut self, tier_id: Option<i64>) -> Self {
        self.selected = tier_id.filter(|id| self.offered.contains(id));
        self
    }

    pub fn offered(&self) -> &[i64] {
        &self.offered
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn select(&mut self, tier_id: i64) -> ValidationResult<()> {
        if !self.offered.contains(&tier_id) {
            return Err(ValidationError::NotAllowed {
                field: "priceTierId".to_string(),
                allowed: self.offered.iter().map(ToString::to_string).collect(),
            });
        }
        self.selected = Some(tier_id);
        Ok(())
    }

    /// Selects `tier_id`, or clears the selection when it is already chosen.
    pub fn toggle(&mut self, tier_id: i64) -> ValidationResult<()> {
        if self.selected == Some(tier_id) {
            self.selected = None;
            return Ok(());
        }
        self.select(tier_id)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::pricing::Percentage;
    use chrono::Utc;

    fn tier(id: i64, rule: PricingRule, is_active: bool) -> PriceTier {
        PriceTier {
            id,
            outlet_id: 1,
            name: format!("Tier {id}"),
            description: None,
            rule,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tiers() -> Vec<PriceTier> {
        vec![
            tier(1, PricingRule::markup(Percentage::from_bps(1000)), true),
            tier(2, PricingRule::discount(Percentage::from_bps(500)), true),
            tier(3, PricingRule::None, true),
            tier(4, PricingRule::markup(Percentage::from_bps(0)), false),
        ]
    }

    #[test]
    fn test_tier_options_prices_and_effects() {
        let options = tier_options("100", &tiers()).unwrap();
        assert_eq!(options.len(), 4);

        assert_eq!(options[0].price.cents(), 11000);
        assert_eq!(options[0].effect.as_deref(), Some("Markup: 10% — Value: 110.00"));

        assert_eq!(options[1].price.cents(), 9500);
        assert_eq!(options[1].effect.as_deref(), Some("Discount: 5% — Value: 95.00"));

        assert_eq!(options[2].price.cents(), 10000);
        assert_eq!(options[2].effect, None);

        assert_eq!(options[3].effect, None);
    }

    #[test]
    fn test_tier_options_groups_large_values() {
        let options = tier_options(1_000_000, &tiers()[1..2]).unwrap();
        assert_eq!(
            options[0].effect.as_deref(),
            Some("Discount: 5% — Value: 950,000.00")
        );
    }

    #[test]
    fn test_tier_options_round_after_rule() {
        // 1.125 × 1.10 = 1.2375 → 1.24; 1.125 × 0.95 = 1.06875 → 1.07
        let options = tier_options("1.125", &tiers()).unwrap();
        assert_eq!(options[0].price.cents(), 124);
        assert_eq!(options[1].price.cents(), 107);
        assert_eq!(options[2].price.cents(), 113);
    }

    #[test]
    fn test_tier_options_empty_base() {
        let options = tier_options("", &tiers()).unwrap();
        assert!(options.iter().all(|o| o.price.is_zero()));
    }

    #[test]
    fn test_tier_options_rejects_non_numeric() {
        let err = tier_options("ten", &tiers()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_selection_is_single_choice() {
        let mut selection = TierSelection::from_tiers(&tiers());
        assert_eq!(selection.offered(), &[1, 2, 3]);

        selection.select(1).unwrap();
        selection.select(2).unwrap();
        assert_eq!(selection.selected(), Some(2));

        selection.toggle(2).unwrap();
        assert_eq!(selection.selected(), None);

        selection.toggle(3).unwrap();
        assert_eq!(selection.selected(), Some(3));

        selection.clear();
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_selection_rejects_inactive_or_unknown() {
        let mut selection = TierSelection::from_tiers(&tiers());
        assert!(matches!(
            selection.select(4),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(selection.select(99).is_err());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_with_selected_drops_unoffered() {
        let selection = TierSelection::from_tiers(&tiers()).with_selected(Some(4));
        assert_eq!(selection.selected(), None);

        let selection = TierSelection::from_tiers(&tiers()).with_selected(Some(1));
        assert_eq!(selection.selected(), Some(1));
    }
}
