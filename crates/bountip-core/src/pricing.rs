//! # Pricing Module
//!
//! Tier pricing rules and the tier price calculator.
//!
//! ## Rule Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wire (legacy)                         Canonical                        │
//! │  ─────────────                         ─────────                        │
//! │  { markupPercentage?: number,   ──►    PricingRule::None                │
//! │    discountPercentage?: number }       PricingRule::Markup { percent }  │
//! │                                        PricingRule::Discount { percent }│
//! │                                                                         │
//! │  Both fields set? markup is checked first and wins.                    │
//! │  The canonical enum cannot hold both.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Calculation
//! ```text
//! base price ("50.5" | 50.5 | "")
//!      │
//!      ├── "", "0", 0 ──────────────► 0
//!      ├── not a number ────────────► InvalidArgument
//!      ▼
//! Money (minor units)
//!      │
//!      ├── Markup m   ─► base × (10000 + m_bps) / 10000
//!      ├── Discount d ─► base × (10000 − d_bps) / 10000
//!      └── None       ─► base
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Amount, Money};
use crate::validation::{validate_percentage, ValidationResult};
use crate::MAX_PERCENTAGE_BPS;

// =============================================================================
// Percentage
// =============================================================================

/// A markup or discount percentage in basis points (1250 = 12.5%).
///
/// Serialized as a plain percentage number (`12.5`), so the wire format
/// matches what the settings forms send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points without range checks.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from basis points, rejecting values above 100%.
    pub fn try_from_bps(bps: u32) -> ValidationResult<Self> {
        if bps > MAX_PERCENTAGE_BPS {
            return Err(ValidationError::OutOfRange {
                field: "percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(Percentage(bps))
    }

    /// Creates a percentage from a float such as `12.5`.
    pub fn from_percent(value: f64) -> ValidationResult<Self> {
        validate_percentage("percent", value)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the percentage as a float (display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Renders without trailing zeros: `10`, `12.5`, `0.05`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percent())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Percentage::from_percent(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Rule Kind
// =============================================================================

/// Discriminant of a [`PricingRule`], stored in its own database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    None,
    Markup,
    Discount,
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// How a tier adjusts a base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRule {
    /// No adjustment.
    #[default]
    None,
    /// Price increase: `base × (1 + percent/100)`.
    Markup { percent: Percentage },
    /// Price decrease: `base × (1 − percent/100)`.
    Discount { percent: Percentage },
}

impl PricingRule {
    pub fn markup(percent: Percentage) -> Self {
        PricingRule::Markup { percent }
    }

    pub fn discount(percent: Percentage) -> Self {
        PricingRule::Discount { percent }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            PricingRule::None => RuleKind::None,
            PricingRule::Markup { .. } => RuleKind::Markup,
            PricingRule::Discount { .. } => RuleKind::Discount,
        }
    }

    pub fn percent(&self) -> Option<Percentage> {
        match self {
            PricingRule::None => None,
            PricingRule::Markup { percent } | PricingRule::Discount { percent } => Some(*percent),
        }
    }

    /// Rebuilds a rule from its stored columns.
    pub fn from_parts(kind: RuleKind, percent: Option<Percentage>) -> ValidationResult<Self> {
        match (kind, percent) {
            (RuleKind::None, _) => Ok(PricingRule::None),
            (RuleKind::Markup, Some(percent)) => Ok(PricingRule::Markup { percent }),
            (RuleKind::Discount, Some(percent)) => Ok(PricingRule::Discount { percent }),
            (_, None) => Err(ValidationError::required("percent")),
        }
    }

    /// Whether the rule visibly changes a price.
    ///
    /// `Markup(0)` is a valid rule and computes the base price unchanged; it
    /// is not effective, so no effect line is rendered for it.
    pub fn is_effective(&self) -> bool {
        self.percent().is_some_and(|p| !p.is_zero())
    }

    /// Display label for the rule kind.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            PricingRule::None => None,
            PricingRule::Markup { .. } => Some("Markup"),
            PricingRule::Discount { .. } => Some("Discount"),
        }
    }

    /// Whole multiplier in basis points: 11000 for a 10% markup.
    fn factor_bps(&self) -> i64 {
        let whole = MAX_PERCENTAGE_BPS as i64;
        match self {
            PricingRule::None => whole,
            PricingRule::Markup { percent } => whole + percent.bps() as i64,
            PricingRule::Discount { percent } => whole - percent.bps() as i64,
        }
    }

    /// Applies the rule to an amount already in minor units.
    pub fn apply(&self, base: Money) -> Money {
        match self {
            PricingRule::None => base,
            _ => base.scale_bps(self.factor_bps()),
        }
    }

    /// Applies the rule to an unrounded amount, rounding the result once.
    pub fn apply_amount(&self, base: Amount) -> Money {
        base.scale_bps_to_money(self.factor_bps())
    }
}

// =============================================================================
// Wire Shapes
// =============================================================================

/// The two-optional-field rule shape used by the settings forms.
///
/// Unknown keys are rejected: a misspelled field must not read as "no rule".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PricingRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl From<PricingRule> for PricingRules {
    fn from(rule: PricingRule) -> Self {
        match rule {
            PricingRule::None => PricingRules::default(),
            PricingRule::Markup { percent } => PricingRules {
                markup_percentage: Some(percent.percent()),
                discount_percentage: None,
            },
            PricingRule::Discount { percent } => PricingRules {
                markup_percentage: None,
                discount_percentage: Some(percent.percent()),
            },
        }
    }
}

/// A rule as received from a client, in either shape.
///
/// ```rust
/// use bountip_core::pricing::{PricingRule, PricingRuleInput};
///
/// let legacy: PricingRuleInput =
///     serde_json::from_str(r#"{"markupPercentage": 10, "discountPercentage": 5}"#).unwrap();
/// assert!(matches!(legacy.resolve().unwrap(), PricingRule::Markup { .. }));
///
/// let tagged: PricingRuleInput =
///     serde_json::from_str(r#"{"kind": "discount", "percent": 25}"#).unwrap();
/// assert!(matches!(tagged.resolve().unwrap(), PricingRule::Discount { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PricingRuleInput {
    Tagged {
        kind: RuleKind,
        #[serde(default)]
        percent: Option<f64>,
    },
    Legacy(PricingRules),
}

impl Default for PricingRuleInput {
    fn default() -> Self {
        PricingRuleInput::Legacy(PricingRules::default())
    }
}

impl From<PricingRule> for PricingRuleInput {
    fn from(rule: PricingRule) -> Self {
        PricingRuleInput::Tagged {
            kind: rule.kind(),
            percent: rule.percent().map(|p| p.percent()),
        }
    }
}

impl PricingRuleInput {
    /// Validates the percentages and produces the canonical rule.
    ///
    /// For the legacy shape the markup is checked first; a discount set
    /// alongside it is ignored.
    pub fn resolve(&self) -> ValidationResult<PricingRule> {
        match self {
            PricingRuleInput::Tagged { kind, percent } => match kind {
                RuleKind::None => Ok(PricingRule::None),
                RuleKind::Markup | RuleKind::Discount => {
                    let value = percent.ok_or_else(|| ValidationError::required("percent"))?;
                    let percent = validate_percentage("percent", value)?;
                    PricingRule::from_parts(*kind, Some(percent))
                }
            },
            PricingRuleInput::Legacy(rules) => {
                if let Some(markup) = rules.markup_percentage {
                    Ok(PricingRule::Markup {
                        percent: validate_percentage("markupPercentage", markup)?,
                    })
                } else if let Some(discount) = rules.discount_percentage {
                    Ok(PricingRule::Discount {
                        percent: validate_percentage("discountPercentage", discount)?,
                    })
                } else {
                    Ok(PricingRule::None)
                }
            }
        }
    }
}

// =============================================================================
// Base Price
// =============================================================================

/// A base price as typed into a form: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BasePrice {
    Number(f64),
    Text(String),
}

impl BasePrice {
    /// Reads the base price without rounding it to minor units.
    ///
    /// `""` (or whitespace), `"0"` and `0` are zero. Anything that does not
    /// parse as a finite number is an `InvalidArgument`.
    pub fn to_amount(&self) -> CoreResult<Amount> {
        let value = match self {
            BasePrice::Number(value) => *value,
            BasePrice::Text(text) => {
                let text = text.trim();
                if text.is_empty() || text == "0" {
                    return Ok(Amount::default());
                }
                text.parse::<f64>().map_err(|_| not_a_number())?
            }
        };

        if value.is_nan() || value.is_infinite() {
            return Err(not_a_number());
        }
        if value == 0.0 {
            return Ok(Amount::default());
        }

        Amount::try_from_major(value)
            .ok_or_else(|| CoreError::invalid_argument("Invalid basePrice: out of range"))
    }

    /// Converts to Money, rounding to minor units.
    pub fn to_money(&self) -> CoreResult<Money> {
        Ok(self.to_amount()?.to_money())
    }
}

fn not_a_number() -> CoreError {
    CoreError::invalid_argument("Invalid basePrice: not a number")
}

impl From<f64> for BasePrice {
    fn from(value: f64) -> Self {
        BasePrice::Number(value)
    }
}

impl From<i32> for BasePrice {
    fn from(value: i32) -> Self {
        BasePrice::Number(value as f64)
    }
}

impl From<i64> for BasePrice {
    fn from(value: i64) -> Self {
        BasePrice::Number(value as f64)
    }
}

impl From<&str> for BasePrice {
    fn from(value: &str) -> Self {
        BasePrice::Text(value.to_string())
    }
}

impl From<String> for BasePrice {
    fn from(value: String) -> Self {
        BasePrice::Text(value)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the price of a product under a tier's rule.
///
/// ## Rules
/// - Zero, `""` and `"0"` short-circuit to zero whatever the rule
/// - Non-numeric input fails with `CoreError::InvalidArgument`
/// - The rule is applied to the unrounded base; only the result is rounded
///   to two decimals (half away from zero)
///
/// ## Example
/// ```rust
/// use bountip_core::pricing::{calculate_tier_price, Percentage, PricingRule};
///
/// let discount = PricingRule::discount(Percentage::from_bps(500));
/// let price = calculate_tier_price(1_000_000, &discount).unwrap();
/// assert_eq!(price.format_grouped(), "950,000.00");
///
/// assert!(calculate_tier_price("abc", &PricingRule::None).is_err());
/// ```
pub fn calculate_tier_price(
    base_price: impl Into<BasePrice>,
    rule: &PricingRule,
) -> CoreResult<Money> {
    let base = base_price.into().to_amount()?;
    if base.is_zero() {
        return Ok(Money::zero());
    }
    Ok(rule.apply_amount(base))
}

// =============================================================================
// Unit Tests
// =============================================================================
