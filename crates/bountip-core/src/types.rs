//! # Domain Types
//!
//! Core domain types for outlet price tiers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Outlet      │   │    PriceTier    │   │     Product     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  outlet_id      │◄──│  price_tier_id  │       │
//! │  │  business_id    │   │  name           │   │  outlet_id      │       │
//! │  │  name           │   │  rule           │   │  price_cents    │       │
//! │  │  currency       │   │  is_active      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Inputs: TierInput ──validate──► NewPriceTier                          │
//! │          TierPatchInput ──validate──► PriceTierPatch                   │
//! │          ProductInput ──validate──► NewProduct                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{BasePrice, PricingRule, PricingRuleInput};
use crate::validation::{
    validate_currency, validate_description, validate_name, validate_price, validate_tier_name,
    ValidationResult,
};

// =============================================================================
// Outlet
// =============================================================================

/// A single physical/business location belonging to a business tenant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Outlet {
    pub id: i64,
    /// Tenant owning this outlet.
    pub business_id: String,
    pub name: String,
    /// ISO 4217 code, uppercase.
    pub currency: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A validated outlet ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOutlet {
    pub name: String,
    pub currency: String,
}

impl NewOutlet {
    /// Validates the outlet fields, falling back to `default_currency`.
    pub fn parse(
        name: &str,
        currency: Option<&str>,
        default_currency: &str,
    ) -> ValidationResult<Self> {
        Ok(NewOutlet {
            name: validate_name("name", name)?,
            currency: validate_currency(currency.unwrap_or(default_currency))?,
        })
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// A named markup/discount policy scoped to an outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    /// Server-assigned id; always positive once persisted.
    pub id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub rule: PricingRule,
    /// Whether the tier currently applies.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A price tier as submitted by the settings form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing_rules: Option<PricingRuleInput>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TierInput {
    /// Validates a tier for creation.
    ///
    /// ## Rules
    /// - Name required (trimmed, at most 100 characters)
    /// - Description optional (blank becomes absent)
    /// - A markup or discount rule is required
    /// - Active unless stated otherwise
    pub fn validate(&self) -> ValidationResult<NewPriceTier> {
        let name = validate_tier_name(&self.name)?;
        let description = validate_description(self.description.as_deref())?;
        let rule = self
            .pricing_rules
            .as_ref()
            .map(PricingRuleInput::resolve)
            .transpose()?
            .unwrap_or_default();

        if rule == PricingRule::None {
            return Err(ValidationError::MissingPricingRule);
        }

        Ok(NewPriceTier {
            name,
            description,
            rule,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// A validated price tier ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceTier {
    pub name: String,
    pub description: Option<String>,
    pub rule: PricingRule,
    pub is_active: bool,
}

/// An edit to an existing tier as submitted by the settings form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPatchInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing_rules: Option<PricingRuleInput>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TierPatchInput {
    /// Validates the present fields. A blank description clears it.
    pub fn validate(&self) -> ValidationResult<PriceTierPatch> {
        Ok(PriceTierPatch {
            name: self.name.as_deref().map(validate_tier_name).transpose()?,
            description: self
                .description
                .as_deref()
                .map(|d| validate_description(Some(d)))
                .transpose()?,
            rule: self
                .pricing_rules
                .as_ref()
                .map(PricingRuleInput::resolve)
                .transpose()?,
            is_active: self.is_active,
        })
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTierPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub rule: Option<PricingRule>,
    pub is_active: Option<bool>,
}

impl PriceTierPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.rule.is_none()
            && self.is_active.is_none()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product sold at an outlet, optionally priced through a tier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub outlet_id: i64,
    pub name: String,
    /// Base selling price in minor units.
    pub price_cents: i64,
    /// At most one tier per product.
    pub price_tier_id: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Selling price after the assigned tier.
    ///
    /// Falls back to the base price when no tier is given, when the tier is
    /// not the one assigned, or when the tier is inactive.
    pub fn tier_price(&self, tier: Option<&PriceTier>) -> Money {
        match tier {
            Some(tier) if Some(tier.id) == self.price_tier_id && tier.is_active => {
                tier.rule.apply(self.price())
            }
            _ => self.price(),
        }
    }
}

/// A product as submitted by the product creation form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: BasePrice,
    #[serde(default)]
    pub price_tier_id: Option<i64>,
}

impl ProductInput {
    /// Validates name and price. The tier reference is checked by the store.
    pub fn validate(&self) -> CoreResult<NewProduct> {
        let name = validate_name("name", &self.name)?;
        let price = self.price.to_money()?;
        validate_price(price)?;

        Ok(NewProduct {
            name,
            price,
            price_tier_id: self.price_tier_id,
        })
    }
}

/// A validated product ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub price_tier_id: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::pricing::{Percentage, PricingRules};

    fn tier(rule: PricingRule) -> PriceTier {
        PriceTier {
            id: 7,
            outlet_id: 1,
            name: "Wholesale".to_string(),
            description: None,
            rule,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(price_cents: i64, price_tier_id: Option<i64>) -> Product {
        Product {
            id: 1,
            outlet_id: 1,
            name: "Jollof rice".to_string(),
            price_cents,
            price_tier_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tier_input_requires_rule() {
        let input = TierInput {
            name: "VIP".to_string(),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err(), ValidationError::MissingPricingRule);
    }

    #[test]
    fn test_tier_input_validates() {
        let input: TierInput = serde_json::from_value(serde_json::json!({
            "name": "  Staff ",
            "description": "",
            "pricingRules": { "discountPercentage": 15 }
        }))
        .unwrap();

        let new_tier = input.validate().unwrap();
        assert_eq!(new_tier.name, "Staff");
        assert_eq!(new_tier.description, None);
        assert_eq!(new_tier.rule, PricingRule::discount(Percentage::from_bps(1500)));
        assert!(new_tier.is_active);
    }

    #[test]
    fn test_patch_input_clears_description_and_rule() {
        let input: TierPatchInput = serde_json::from_value(serde_json::json!({
            "description": "  ",
            "pricingRules": {}
        }))
        .unwrap();

        let patch = input.validate().unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.rule, Some(PricingRule::None));
        assert_eq!(patch.name, None);
        assert!(!patch.is_empty());
        assert!(PriceTierPatch::default().is_empty());
    }

    #[test]
    fn test_product_tier_price() {
        let t = tier(PricingRule::discount(Percentage::from_bps(2500)));

        assert_eq!(product(20000, Some(7)).tier_price(Some(&t)).cents(), 15000);
        assert_eq!(product(20000, None).tier_price(Some(&t)).cents(), 20000);
        assert_eq!(product(20000, Some(7)).tier_price(None).cents(), 20000);

        let mut inactive = t.clone();
        inactive.is_active = false;
        assert_eq!(product(20000, Some(7)).tier_price(Some(&inactive)).cents(), 20000);
    }

    #[test]
    fn test_product_input() {
        let input: ProductInput = serde_json::from_value(serde_json::json!({
            "name": "Suya",
            "price": "1500.75"
        }))
        .unwrap();
        let product = input.validate().unwrap();
        assert_eq!(product.price.cents(), 150075);
        assert_eq!(product.price_tier_id, None);

        let bad = ProductInput {
            name: "Suya".to_string(),
            price: BasePrice::from("abc"),
            price_tier_id: None,
        };
        assert!(matches!(bad.validate().unwrap_err(), CoreError::InvalidArgument(_)));

        let negative = ProductInput {
            name: "Suya".to_string(),
            price: BasePrice::from(-1.0),
            price_tier_id: None,
        };
        assert!(matches!(negative.validate().unwrap_err(), CoreError::Validation(_)));
    }

    #[test]
    fn test_new_outlet_defaults_currency() {
        let outlet = NewOutlet::parse("Lekki", None, "ngn").unwrap();
        assert_eq!(outlet.currency, "NGN");
        assert!(NewOutlet::parse("", Some("USD"), "NGN").is_err());
    }

    #[test]
    fn test_legacy_rules_round_trip_through_tier() {
        let t = tier(PricingRule::markup(Percentage::from_bps(1000)));
        let wire = PricingRules::from(t.rule);
        assert_eq!(wire.markup_percentage, Some(10.0));
        assert_eq!(wire.discount_percentage, None);
    }
}
