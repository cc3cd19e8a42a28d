//! Pure pricing functions for a single invoice line
//!
//! None of these clamp their inputs. Negative prices, out-of-range discounts
//! and non-positive quantities are rejected or clamped by the caller before
//! they get here (see [`crate::utils::validation`]).

use bigdecimal::BigDecimal;

use super::{round_amount, MONEY_SCALE};

fn hundred() -> BigDecimal {
    BigDecimal::from(100)
}

/// `1 + tax_percentage / 100`
fn tax_multiplier(tax_percentage: &BigDecimal) -> BigDecimal {
    BigDecimal::from(1) + tax_percentage / hundred()
}

/// Unit price including tax
pub fn price_with_tax(unit_price: &BigDecimal, tax_percentage: &BigDecimal) -> BigDecimal {
    unit_price + (unit_price * tax_percentage) / hundred()
}

/// Back out the pre-tax unit price from a tax-inclusive one, rounded to 2 dp
pub fn unit_price_from_taxed(
    price_with_tax: &BigDecimal,
    tax_percentage: &BigDecimal,
) -> BigDecimal {
    if *tax_percentage <= BigDecimal::from(0) {
        return price_with_tax.clone();
    }

    round_amount(&(price_with_tax / tax_multiplier(tax_percentage)), MONEY_SCALE)
}

/// Line amount after discount, including tax
pub fn line_total(
    unit_price: &BigDecimal,
    quantity: &BigDecimal,
    discount_percent: &BigDecimal,
    tax_percentage: &BigDecimal,
) -> BigDecimal {
    let subtotal = unit_price * quantity;
    let discounted = &subtotal * (BigDecimal::from(1) - discount_percent / hundred());
    let tax = (&discounted * tax_percentage) / hundred();
    discounted + tax
}

/// Taxable base of a total whose tax amount is already known
pub fn taxable_value(total: &BigDecimal, tax_amount: &BigDecimal) -> BigDecimal {
    total - tax_amount
}

/// Taxable base of a tax-inclusive total, derived from the rate
///
/// This is the formula the aggregator uses for lines whose total was
/// overridden by the user.
pub fn taxable_from_total(total: &BigDecimal, tax_percentage: &BigDecimal) -> BigDecimal {
    if *tax_percentage <= BigDecimal::from(0) {
        return total.clone();
    }

    total / tax_multiplier(tax_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_price_with_tax() {
        assert_eq!(price_with_tax(&dec("100"), &dec("18")), dec("118"));
        assert_eq!(price_with_tax(&dec("250"), &dec("0")), dec("250"));
        assert_eq!(price_with_tax(&dec("99.99"), &dec("5")), dec("104.9895"));
    }

    #[test]
    fn test_unit_price_from_taxed() {
        assert_eq!(unit_price_from_taxed(&dec("118"), &dec("18")), dec("100"));
        assert_eq!(unit_price_from_taxed(&dec("100"), &dec("12")), dec("89.29"));
    }

    #[test]
    fn test_unit_price_from_taxed_zero_rate_passes_through() {
        assert_eq!(unit_price_from_taxed(&dec("57.123"), &dec("0")), dec("57.123"));
    }

    #[test]
    fn test_line_total_scenario() {
        // 100 x 2 = 200, 10% off = 180, 18% tax = 32.4
        let total = line_total(&dec("100"), &dec("2"), &dec("10"), &dec("18"));
        assert_eq!(total, dec("212.4"));
    }

    #[test]
    fn test_line_total_full_discount() {
        let total = line_total(&dec("100"), &dec("3"), &dec("100"), &dec("28"));
        assert_eq!(total, dec("0"));
    }

    #[test]
    fn test_backward_paths() {
        assert_eq!(taxable_value(&dec("212.4"), &dec("32.4")), dec("180"));
        assert_eq!(taxable_from_total(&dec("212.4"), &dec("18")), dec("180"));
        assert_eq!(taxable_from_total(&dec("75"), &dec("0")), dec("75"));
    }
}
