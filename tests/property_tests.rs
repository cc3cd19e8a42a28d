//! Property-based tests for pricing, aggregation and words

use bigdecimal::BigDecimal;
use invoice_core::{
    aggregate, number_to_words, price_with_tax, unit_price_from_taxed, utils::clamp_discount,
    GstSlab, InvoiceDraft, ProductRef, Unit,
};
use proptest::prelude::*;

/// Generate a price in paisa precision (0.00 to 99999.99)
fn arb_price() -> impl Strategy<Value = BigDecimal> {
    (0i64..10_000_000i64).prop_map(|paisa| BigDecimal::new(paisa.into(), 2))
}

fn arb_slab() -> impl Strategy<Value = GstSlab> {
    prop::sample::select(GstSlab::ALL.to_vec())
}

fn arb_quantity() -> impl Strategy<Value = BigDecimal> {
    (1i64..10_000i64).prop_map(|milli| BigDecimal::new(milli.into(), 3))
}

fn arb_discount() -> impl Strategy<Value = BigDecimal> {
    (-50i64..=150i64).prop_map(BigDecimal::from)
}

proptest! {
    #[test]
    fn unit_price_round_trips_through_tax(price in arb_price(), slab in arb_slab()) {
        let rate = slab.rate();
        let back = unit_price_from_taxed(&price_with_tax(&price, &rate), &rate);
        let drift = (back - &price).abs();
        prop_assert!(
            drift <= BigDecimal::new(1.into(), 2),
            "drift {} for {} at {}%",
            drift,
            price,
            rate
        );
    }

    #[test]
    fn total_is_taxable_plus_tax(
        lines in prop::collection::vec(
            (
                arb_price(),
                arb_quantity(),
                arb_discount(),
                arb_slab(),
                prop::option::of(arb_price()),
            ),
            0..12,
        )
    ) {
        let mut draft = InvoiceDraft::new();
        for (index, line) in lines.into_iter().enumerate() {
            let (price, quantity, discount, slab, override_total) = line;
            let id = format!("p{}", index);
            let product = ProductRef::new(id.clone(), id.clone(), price, slab.rate(), Unit::Pcs);
            draft.add_product(&product, quantity).unwrap();
            draft.set_discount(&id, discount).unwrap();
            if let Some(total) = override_total {
                draft.override_total(&id, total).unwrap();
            }
        }

        let totals = aggregate(draft.items());
        prop_assert_eq!(&totals.total_amount, &(&totals.taxable_value + &totals.tax_amount));
        prop_assert_eq!(&totals.cgst_amount, &totals.sgst_amount);

        let rounded = totals.rounded(2);
        prop_assert_eq!(&rounded.total_amount, &(&rounded.taxable_value + &rounded.tax_amount));
        prop_assert_eq!(&rounded.tax_amount, &(&rounded.cgst_amount + &rounded.sgst_amount));
    }

    #[test]
    fn discount_always_within_bounds(discount in -1_000i64..1_000i64) {
        let clamped = clamp_discount(BigDecimal::from(discount));
        prop_assert!(clamped >= BigDecimal::from(0));
        prop_assert!(clamped <= BigDecimal::from(100));
    }

    #[test]
    fn words_are_single_spaced(n in 0u64..100_000_000_000u64) {
        let words = number_to_words(n);
        prop_assert!(!words.is_empty());
        prop_assert_eq!(words.trim(), words.as_str());
        prop_assert!(!words.contains("  "));
        prop_assert!(!words.contains(" and "));
        if n != 0 {
            prop_assert!(!words.contains("Zero"));
        }
    }
}
