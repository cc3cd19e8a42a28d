//! Folding line items into invoice totals

use bigdecimal::BigDecimal;
use std::collections::BTreeMap;

use super::calculator::taxable_from_total;
use super::round_amount;
use crate::tax::TaxSplit;
use crate::types::{InvoiceTotals, LineItem, SlabSummary};

/// What a single line adds to the invoice totals
#[derive(Debug, Clone, PartialEq)]
pub struct LineContribution {
    pub taxable: BigDecimal,
    pub tax: BigDecimal,
    pub discount: BigDecimal,
}

impl LineContribution {
    /// Taxable plus tax for this line
    pub fn total(&self) -> BigDecimal {
        &self.taxable + &self.tax
    }
}

/// Compute the taxable, tax and discount amounts contributed by one line
///
/// An overridden total is split backwards through the tax rate and carries
/// no discount. Otherwise the amounts are computed forward from unit price,
/// quantity and discount.
pub fn line_contribution(item: &LineItem) -> LineContribution {
    let hundred = BigDecimal::from(100);

    if item.total_overridden {
        let taxable = taxable_from_total(&item.total, &item.tax_percentage);
        let tax = &item.total - &taxable;
        return LineContribution {
            taxable,
            tax,
            discount: BigDecimal::from(0),
        };
    }

    let item_subtotal = &item.unit_price * &item.quantity;
    let discount = (&item_subtotal * &item.discount_percent) / &hundred;
    let discounted = &item_subtotal - &discount;
    let tax = (&discounted * &item.tax_percentage) / &hundred;

    LineContribution {
        taxable: discounted,
        tax,
        discount,
    }
}

/// Fold a list of line items into invoice totals
///
/// Amounts are kept at full precision; call [`InvoiceTotals::rounded`] at
/// the display or persistence boundary.
pub fn aggregate(items: &[LineItem]) -> InvoiceTotals {
    let mut totals = InvoiceTotals::zero();

    for contribution in items.iter().map(line_contribution) {
        totals.taxable_value += contribution.taxable;
        totals.tax_amount += contribution.tax;
        totals.total_discount += contribution.discount;
    }

    totals.total_amount = &totals.taxable_value + &totals.tax_amount;

    let split = TaxSplit::even(&totals.tax_amount);
    totals.cgst_amount = split.cgst_amount;
    totals.sgst_amount = split.sgst_amount;

    totals
}

/// Group taxable value and tax by GST rate, lowest rate first
pub fn tax_by_slab(items: &[LineItem]) -> Vec<SlabSummary> {
    let mut slabs: BTreeMap<BigDecimal, (BigDecimal, BigDecimal)> = BTreeMap::new();

    for item in items {
        let contribution = line_contribution(item);
        let entry = slabs
            .entry(item.tax_percentage.normalized())
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
        entry.0 += contribution.taxable;
        entry.1 += contribution.tax;
    }

    slabs
        .into_iter()
        .map(|(tax_percentage, (taxable_value, tax_amount))| SlabSummary {
            tax_percentage,
            taxable_value,
            tax_amount,
        })
        .collect()
}

impl InvoiceTotals {
    /// Round every amount half-up to `scale` decimal places
    ///
    /// The total is re-derived from the rounded parts so that
    /// `total_amount == taxable_value + tax_amount` still holds. CGST takes
    /// the half-up half of the rounded tax and SGST the remainder, so an odd
    /// paisa lands on CGST and `cgst_amount + sgst_amount == tax_amount`.
    pub fn rounded(&self, scale: i64) -> Self {
        let taxable_value = round_amount(&self.taxable_value, scale);
        let tax_amount = round_amount(&self.tax_amount, scale);
        let cgst_amount = round_amount(&(&tax_amount / BigDecimal::from(2)), scale);
        let sgst_amount = &tax_amount - &cgst_amount;

        Self {
            total_amount: &taxable_value + &tax_amount,
            total_discount: round_amount(&self.total_discount, scale),
            cgst_amount,
            sgst_amount,
            taxable_value,
            tax_amount,
        }
    }
}
