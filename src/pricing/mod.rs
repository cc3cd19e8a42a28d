//! Line-item pricing and invoice aggregation

pub mod aggregator;
pub mod calculator;

pub use aggregator::*;
pub use calculator::*;

use bigdecimal::{BigDecimal, RoundingMode};

/// Decimal places used for displayed and persisted money amounts
pub const MONEY_SCALE: i64 = 2;

/// Round an amount half-up to `scale` decimal places
pub fn round_amount(amount: &BigDecimal, scale: i64) -> BigDecimal {
    amount.with_scale_round(scale, RoundingMode::HalfUp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_amount_half_up() {
        let value = BigDecimal::from_str("10.005").unwrap();
        assert_eq!(round_amount(&value, 2), BigDecimal::from_str("10.01").unwrap());

        let value = BigDecimal::from_str("10.004").unwrap();
        assert_eq!(round_amount(&value, 2), BigDecimal::from_str("10.00").unwrap());
    }
}
