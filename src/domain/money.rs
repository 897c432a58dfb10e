use crate::error::{PaymentError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of micros in one unit of currency.
pub const MICROS_PER_UNIT: u64 = 1_000_000;

/// A non-negative monetary amount counted in micros.
///
/// Request documents never carry micros directly: the amount is rendered with
/// [`Money::to_decimal_string`], which always yields exactly two fractional
/// digits using banker's rounding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Converts a decimal unit price (e.g. `10.00`) to micros, rounding to the
    /// nearest micro.
    pub fn from_units(units: Decimal) -> Result<Self> {
        if units.is_sign_negative() && !units.is_zero() {
            return Err(PaymentError::InvalidAmount(format!(
                "{units} is negative"
            )));
        }
        units
            .checked_mul(Decimal::from(MICROS_PER_UNIT))
            .map(|micros| micros.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|micros| micros.to_u64())
            .map(Self)
            .ok_or_else(|| PaymentError::InvalidAmount(format!("{units} is out of range")))
    }

    pub fn micros(&self) -> u64 {
        self.0
    }

    /// The exact amount in currency units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 6)
    }

    /// Renders the amount as a fixed-point string with two fractional digits.
    pub fn to_decimal_string(&self) -> String {
        let rounded = self
            .to_decimal()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        format!("{rounded:.2}")
    }

    /// Sums two amounts, `None` when the total does not fit in micros.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_whole_units() {
        assert_eq!(Money::from_micros(90_000_000).to_decimal_string(), "90.00");
        assert_eq!(Money::ZERO.to_decimal_string(), "0.00");
    }

    #[test]
    fn test_sub_cent_amounts_round_down() {
        assert_eq!(Money::from_micros(1).to_decimal_string(), "0.00");
        assert_eq!(Money::from_micros(2_500_001).to_decimal_string(), "2.50");
    }

    #[test]
    fn test_half_even_rounding() {
        assert_eq!(Money::from_micros(5_000).to_decimal_string(), "0.00");
        assert_eq!(Money::from_micros(15_000).to_decimal_string(), "0.02");
        assert_eq!(Money::from_micros(25_000).to_decimal_string(), "0.02");
        assert_eq!(Money::from_micros(25_001).to_decimal_string(), "0.03");
    }

    #[test]
    fn test_largest_amount_converts() {
        assert_eq!(
            Money::from_micros(u64::MAX).to_decimal_string(),
            "18446744073709.55"
        );
    }

    #[test]
    fn test_random_amounts_stay_within_half_a_cent() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            let money = Money::from_micros(rng.gen_range(0..1_000_000_000_000_000));
            let rendered = money.to_decimal_string();

            let (_, fraction) = rendered.split_once('.').unwrap();
            assert_eq!(fraction.len(), 2, "{rendered}");

            let parsed = Decimal::from_str(&rendered).unwrap();
            assert!((parsed - money.to_decimal()).abs() <= dec!(0.005));
        }
    }

    #[test]
    fn test_from_units() {
        assert_eq!(
            Money::from_units(dec!(10.00)).unwrap(),
            Money::from_micros(10_000_000)
        );
        assert_eq!(
            Money::from_units(dec!(24.9999995)).unwrap(),
            Money::from_micros(25_000_000)
        );
        assert!(matches!(
            Money::from_units(dec!(-1.0)),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_product_plus_shipping() {
        let product = Money::from_units(dec!(10.00)).unwrap();
        let shipping = Money::from_micros(90 * MICROS_PER_UNIT);
        let total = product.checked_add(shipping).unwrap();
        assert_eq!(total.to_decimal_string(), "100.00");
    }

    #[test]
    fn test_overflowing_sum_is_none() {
        let max = Money::from_micros(u64::MAX);
        assert_eq!(max.checked_add(Money::from_micros(1)), None);
        assert_eq!(max.checked_add(Money::ZERO), Some(max));
    }
}
