//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    100 × 1.1 = 110.00000000000001  ❌                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    10000 × 11000 / 10000 = 11000   (110.00)                            │
//! │                                                                         │
//! │  Base prices arrive as numbers or numeric strings and are read into    │
//! │  an unrounded `Amount` (micro-units). A tier rule scales the Amount    │
//! │  and the result is rounded to minor units ONCE.                        │
//! │                                                                         │
//! │    1.125 × 2.00 ──► 2_250_000 µ ──► 225 (2.25)   not 1.13 × 2 = 2.26   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bountip_core::money::Money;
//!
//! let price = Money::from_cents(95_000_000);
//! assert_eq!(price.format_grouped(), "950,000.00");
//! assert_eq!(price.to_string(), "950000.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// Largest major-unit amount accepted from floating point input.
///
/// Keeps the minor-unit value below 2^53 so the f64 → i64 conversion is exact
/// to the cent.
pub const MAX_MAJOR_AMOUNT: f64 = 10_000_000_000_000.0;

/// Fixed-point units per major unit in an [`Amount`].
pub const MICROS_PER_UNIT: i128 = 1_000_000;

/// Micro-units per minor unit.
const MICROS_PER_CENT: i128 = MICROS_PER_UNIT / 100;

/// Basis points in a whole multiplier (×1.00).
const BPS_SCALE: i128 = 10_000;

/// Integer division rounding half away from zero.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        quotient + numerator.signum() * denominator.signum()
    } else {
        quotient
    }
}

fn clamp_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kobo, cents, ...).
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► calculate_tier_price(rule) ──► tier price
///                                                   │
///                                                   └──► "1,234.50" in UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Scales the amount by `factor_bps / 10000`, rounding half away from zero.
    ///
    /// `factor_bps` is the whole multiplier in basis points: 11000 is ×1.10,
    /// 7500 is ×0.75.
    ///
    /// ```rust
    /// use bountip_core::money::Money;
    ///
    /// let base = Money::from_cents(10000);
    /// assert_eq!(base.scale_bps(11000).cents(), 11000);
    /// assert_eq!(Money::from_cents(5).scale_bps(5000).cents(), 3); // 2.5 → 3
    /// ```
    pub fn scale_bps(&self, factor_bps: i64) -> Money {
        // i128: a full i64 amount times a 5-digit factor cannot overflow
        let product = self.0 as i128 * factor_bps as i128;
        Money(clamp_i64(div_round(product, BPS_SCALE)))
    }

    /// Formats with thousands separators and exactly two decimals.
    ///
    /// This is the presentation form shown next to a tier
    /// (`"950,000.00"`). Calculations never go through it.
    pub fn format_grouped(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{}.{:02}", sign, grouped, abs % 100)
    }
}

// =============================================================================
// Amount
// =============================================================================

/// An unrounded major-unit amount held in micro-units (1e-6).
///
/// Base prices typed into a form may carry more than two decimals. They are
/// kept at this precision until a rule has been applied, so the price is
/// rounded to minor units a single time.
///
/// ```rust
/// use bountip_core::money::{Amount, Money};
///
/// let base = Amount::try_from_major(1.125).unwrap();
/// assert_eq!(base.to_money(), Money::from_cents(113));
/// assert_eq!(base.scale_bps_to_money(20_000), Money::from_cents(225));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i128);

impl Amount {
    #[inline]
    pub const fn from_micros(micros: i128) -> Self {
        Amount(micros)
    }

    /// Reads a major-unit float, rounding to the nearest micro-unit.
    ///
    /// Returns `None` for NaN, infinities, and magnitudes above
    /// [`MAX_MAJOR_AMOUNT`].
    pub fn try_from_major(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_MAJOR_AMOUNT {
            return None;
        }
        Some(Amount((value * MICROS_PER_UNIT as f64).round() as i128))
    }

    #[inline]
    pub const fn micros(&self) -> i128 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Rounds to minor units, half away from zero.
    pub fn to_money(&self) -> Money {
        Money(clamp_i64(div_round(self.0, MICROS_PER_CENT)))
    }

    /// Scales by `factor_bps / 10000` and rounds to minor units once.
    pub fn scale_bps_to_money(&self, factor_bps: i64) -> Money {
        let product = self.0 * factor_bps as i128;
        Money(clamp_i64(div_round(product, MICROS_PER_CENT * BPS_SCALE)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without grouping (`"1234.50"`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert!(!money.is_negative());
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn test_amount_to_money() {
        assert_eq!(Amount::try_from_major(110.0).unwrap().to_money(), Money::from_cents(11000));
        assert_eq!(Amount::try_from_major(0.015).unwrap().to_money(), Money::from_cents(2));
        assert_eq!(Amount::try_from_major(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_cents(95_000_000).format_grouped(), "950,000.00");
        assert_eq!(Money::from_cents(123_456_789).format_grouped(), "1,234,567.89");
        assert_eq!(Money::from_cents(100_000).format_grouped(), "1,000.00");
        assert_eq!(Money::from_cents(99_999).format_grouped(), "999.99");
        assert_eq!(Money::from_cents(6).format_grouped(), "0.06");
        assert_eq!(Money::from_cents(-150_000).format_grouped(), "-1,500.00");
    }

    #[test]
    fn test_scale_bps_rounding() {
        // 0.05 × 0.5 = 0.025 → 0.03 (half away from zero)
        assert_eq!(Money::from_cents(5).scale_bps(5000).cents(), 3);
        assert_eq!(Money::from_cents(-5).scale_bps(5000).cents(), -3);
        // 0.05 × 0.4 = 0.02 exactly
        assert_eq!(Money::from_cents(5).scale_bps(4000).cents(), 2);
        assert_eq!(Money::from_cents(12345).scale_bps(10_000).cents(), 12345);
        assert_eq!(Money::from_cents(12345).scale_bps(0).cents(), 0);
    }

    #[test]
    fn test_amount_keeps_sub_cent_precision() {
        let base = Amount::try_from_major(0.004).unwrap();
        assert_eq!(base.micros(), 4_000);
        assert!(!base.is_zero());
        assert_eq!(base.to_money(), Money::zero());
        // 0.004 × 2 = 0.008 → 0.01
        assert_eq!(base.scale_bps_to_money(20_000), Money::from_cents(1));
    }

    #[test]
    fn test_amount_rounds_once() {
        let base = Amount::try_from_major(1.125).unwrap();
        assert_eq!(base.scale_bps_to_money(20_000), Money::from_cents(225));
        // 1.005 × 1.0 = 1.005 → 1.01
        let base = Amount::try_from_major(1.005).unwrap();
        assert_eq!(base.scale_bps_to_money(10_000), Money::from_cents(101));
        let base = Amount::try_from_major(-0.125).unwrap();
        assert_eq!(base.to_money(), Money::from_cents(-13));
    }

    #[test]
    fn test_amount_bounds() {
        assert_eq!(Amount::from_micros(10_990_000).to_money(), Money::from_cents(1099));
        assert_eq!(Amount::try_from_major(f64::NAN), None);
        assert_eq!(Amount::try_from_major(1e20), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
    }
}
