//! Amount-in-words formatting using the Indian numbering system
//!
//! Groups are Hundred, Thousand, Lakh (10^5) and Crore (10^7). No "and" is
//! placed between Hundred and the remainder, so 105 reads "One Hundred Five".

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use crate::config::PaisaMode;
use crate::types::{InvoiceError, InvoiceResult};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const THOUSAND: u64 = 1_000;
const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

fn join(head: String, tail: String) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (_, true) => head,
        (true, false) => tail,
        (false, false) => format!("{} {}", head, tail),
    }
}

fn band(n: u64, divisor: u64, label: &str) -> String {
    join(format!("{} {}", spell(n / divisor), label), spell(n % divisor))
}

// Zero spells as the empty string so that round numbers drop their remainder.
fn spell(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => join(TENS[(n / 10) as usize].to_string(), spell(n % 10)),
        100..=999 => band(n, 100, "Hundred"),
        _ if n < LAKH => band(n, THOUSAND, "Thousand"),
        _ if n < CRORE => band(n, LAKH, "Lakh"),
        _ => band(n, CRORE, "Crore"),
    }
}

/// Spell a whole number in words, `0` becomes "Zero"
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    spell(n).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Spell a currency amount in words
///
/// The amount is rounded half-up to paisa first. With [`PaisaMode::Words`] a
/// non-zero fraction is appended as "and <N> Paisa"; [`PaisaMode::Truncate`]
/// drops it.
pub fn amount_to_words(amount: &BigDecimal, paisa_mode: PaisaMode) -> InvoiceResult<String> {
    if *amount < BigDecimal::from(0) {
        return Err(InvoiceError::Validation(format!(
            "Cannot spell a negative amount: {}",
            amount
        )));
    }

    let amount = amount.with_scale_round(2, RoundingMode::HalfUp);
    let rupees_part = amount.with_scale_round(0, RoundingMode::Down);
    let paisa_part = (&amount - &rupees_part) * BigDecimal::from(100);

    let rupees = rupees_part.to_u64().ok_or_else(|| {
        InvoiceError::AmountOutOfRange(format!("{} is too large to spell", amount))
    })?;
    let paisa = paisa_part.to_u64().unwrap_or(0);

    if paisa_mode == PaisaMode::Truncate || paisa == 0 {
        return Ok(number_to_words(rupees));
    }

    if rupees == 0 {
        return Ok(format!("{} Paisa", number_to_words(paisa)));
    }

    Ok(format!(
        "{} and {} Paisa",
        number_to_words(rupees),
        number_to_words(paisa)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(number_to_words(0), "Zero");
        assert_eq!(amount_to_words(&dec("0"), PaisaMode::Words).unwrap(), "Zero");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_to_words(7), "Seven");
        assert_eq!(number_to_words(13), "Thirteen");
        assert_eq!(number_to_words(40), "Forty");
        assert_eq!(number_to_words(99), "Ninety Nine");
    }

    #[test]
    fn test_hundreds_without_and() {
        assert_eq!(number_to_words(100), "One Hundred");
        assert_eq!(number_to_words(105), "One Hundred Five");
        assert_eq!(number_to_words(999), "Nine Hundred Ninety Nine");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(number_to_words(1_000), "One Thousand");
        assert_eq!(number_to_words(10_001), "Ten Thousand One");
        assert_eq!(number_to_words(100_000), "One Lakh");
        assert_eq!(
            number_to_words(1_234_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven"
        );
        assert_eq!(number_to_words(10_000_000), "One Crore");
        assert_eq!(number_to_words(1_000_000_000), "One Hundred Crore");
        assert_eq!(
            number_to_words(123_456_789),
            "Twelve Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine"
        );
    }

    #[test]
    fn test_paisa_words() {
        assert_eq!(
            amount_to_words(&dec("424.80"), PaisaMode::Words).unwrap(),
            "Four Hundred Twenty Four and Eighty Paisa"
        );
        assert_eq!(
            amount_to_words(&dec("0.5"), PaisaMode::Words).unwrap(),
            "Fifty Paisa"
        );
    }

    #[test]
    fn test_paisa_truncate() {
        assert_eq!(
            amount_to_words(&dec("424.80"), PaisaMode::Truncate).unwrap(),
            "Four Hundred Twenty Four"
        );
    }

    #[test]
    fn test_rounds_to_paisa_first() {
        assert_eq!(
            amount_to_words(&dec("99.999"), PaisaMode::Words).unwrap(),
            "One Hundred"
        );
    }

    #[test]
    fn test_negative_rejected() {
        let err = amount_to_words(&dec("-1"), PaisaMode::Words).unwrap_err();
        assert!(matches!(err, InvoiceError::Validation(_)));
    }
}
