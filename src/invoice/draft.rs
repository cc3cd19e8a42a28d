//! Line items of an invoice that is still being edited
//!
//! Every edit clamps its input, recomputes the affected line and leaves the
//! totals to be re-folded from the full list. Transient text typed into a
//! field belongs to the presentation layer; only committed values reach
//! this type.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pricing::{
    aggregate, line_total, price_with_tax, round_amount, tax_by_slab, unit_price_from_taxed,
    MONEY_SCALE,
};
use crate::types::*;
use crate::utils::validation::{
    clamp_discount, clamp_non_negative, parse_quantity, validate_product, validate_quantity,
};

/// Outcome of committing a quantity edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityCommit {
    /// The line kept the new quantity
    Updated,
    /// The quantity was not a positive number and the line was dropped
    Removed,
}

/// Caller-owned collection of line items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    items: Vec<LineItem>,
}

impl LineItem {
    /// Build a line from a catalog product at its selling price
    pub fn from_product(product: &ProductRef, quantity: BigDecimal) -> Self {
        let mut item = Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            hsn_sac_code: product.hsn_sac_code.clone(),
            unit: product.primary_units,
            quantity,
            unit_price: product.selling_price.clone(),
            discount_percent: BigDecimal::from(0),
            tax_percentage: product.tax_percentage.clone(),
            price_with_tax: BigDecimal::from(0),
            total: BigDecimal::from(0),
            driver: PriceDriver::UnitPrice,
            total_overridden: false,
        };
        item.reprice();
        item
    }

    /// Re-derive the dependent price field and the computed total
    ///
    /// Leaves an overridden total untouched.
    pub fn reprice(&mut self) {
        match self.driver {
            PriceDriver::UnitPrice => {
                self.price_with_tax = round_amount(
                    &price_with_tax(&self.unit_price, &self.tax_percentage),
                    MONEY_SCALE,
                );
            }
            PriceDriver::PriceWithTax => {
                self.unit_price =
                    unit_price_from_taxed(&self.price_with_tax, &self.tax_percentage);
            }
        }

        if !self.total_overridden {
            self.total = line_total(
                &self.unit_price,
                &self.quantity,
                &self.discount_percent,
                &self.tax_percentage,
            );
        }
    }
}

impl InvoiceDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in the order they were added
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the draft has no lines
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product ID
    pub fn item(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    fn item_mut(&mut self, product_id: &str) -> InvoiceResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| InvoiceError::ItemNotFound(product_id.to_string()))
    }

    /// Add a product to the draft
    ///
    /// Adding a product that is already on the draft increases its quantity.
    pub fn add_product(
        &mut self,
        product: &ProductRef,
        quantity: BigDecimal,
    ) -> InvoiceResult<()> {
        validate_product(product)?;
        validate_quantity(&quantity)?;

        if let Ok(item) = self.item_mut(&product.id) {
            item.quantity += quantity;
            item.total_overridden = false;
            item.reprice();
            debug!(
                product_id = %product.id,
                quantity = %item.quantity,
                "increased line quantity"
            );
            return Ok(());
        }

        debug!(product_id = %product.id, %quantity, "added line");
        self.items.push(LineItem::from_product(product, quantity));
        Ok(())
    }

    /// Remove a line
    pub fn remove_item(&mut self, product_id: &str) -> InvoiceResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| InvoiceError::ItemNotFound(product_id.to_string()))?;
        debug!(product_id, "removed line");
        Ok(self.items.remove(index))
    }

    /// Commit a numeric quantity, dropping the line if it is not positive
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: BigDecimal,
    ) -> InvoiceResult<QuantityCommit> {
        if quantity <= BigDecimal::from(0) {
            self.remove_item(product_id)?;
            debug!(product_id, %quantity, "dropped line with non-positive quantity");
            return Ok(QuantityCommit::Removed);
        }

        let item = self.item_mut(product_id)?;
        item.quantity = quantity;
        item.total_overridden = false;
        item.reprice();
        Ok(QuantityCommit::Updated)
    }

    /// Commit a quantity as typed, dropping the line if it does not parse to a positive number
    pub fn commit_quantity(
        &mut self,
        product_id: &str,
        raw: &str,
    ) -> InvoiceResult<QuantityCommit> {
        match parse_quantity(raw) {
            Some(quantity) => self.set_quantity(product_id, quantity),
            None => {
                self.remove_item(product_id)?;
                debug!(product_id, raw, "dropped line with invalid quantity");
                Ok(QuantityCommit::Removed)
            }
        }
    }

    /// Set the discount percentage, clamped into `[0, 100]`
    pub fn set_discount(
        &mut self,
        product_id: &str,
        discount_percent: BigDecimal,
    ) -> InvoiceResult<()> {
        let item = self.item_mut(product_id)?;
        item.discount_percent = clamp_discount(discount_percent);
        item.total_overridden = false;
        item.reprice();
        Ok(())
    }

    /// Set the pre-tax unit price; the tax-inclusive price follows it
    pub fn set_unit_price(
        &mut self,
        product_id: &str,
        unit_price: BigDecimal,
    ) -> InvoiceResult<()> {
        let item = self.item_mut(product_id)?;
        item.unit_price = clamp_non_negative(unit_price);
        item.driver = PriceDriver::UnitPrice;
        item.total_overridden = false;
        item.reprice();
        Ok(())
    }

    /// Set the tax-inclusive unit price; the pre-tax price follows it
    pub fn set_price_with_tax(
        &mut self,
        product_id: &str,
        price_with_tax: BigDecimal,
    ) -> InvoiceResult<()> {
        let item = self.item_mut(product_id)?;
        item.price_with_tax = clamp_non_negative(price_with_tax);
        item.driver = PriceDriver::PriceWithTax;
        item.total_overridden = false;
        item.reprice();
        Ok(())
    }

    /// Replace the computed line total with one entered by the user
    pub fn override_total(&mut self, product_id: &str, total: BigDecimal) -> InvoiceResult<()> {
        let item = self.item_mut(product_id)?;
        item.total = clamp_non_negative(total);
        item.total_overridden = true;
        debug!(product_id, total = %item.total, "overrode line total");
        Ok(())
    }

    /// Go back to the computed line total
    pub fn clear_total_override(&mut self, product_id: &str) -> InvoiceResult<()> {
        let item = self.item_mut(product_id)?;
        item.total_overridden = false;
        item.reprice();
        Ok(())
    }

    /// Running totals over every line
    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.items)
    }

    /// Taxable value and tax grouped by GST rate
    pub fn tax_by_slab(&self) -> Vec<SlabSummary> {
        tax_by_slab(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn product(id: &str, price: &str, tax: &str) -> ProductRef {
        ProductRef::new(
            id.to_string(),
            format!("Product {}", id),
            dec(price),
            dec(tax),
            Unit::Pcs,
        )
    }

    fn draft_with(id: &str, price: &str, tax: &str, quantity: &str) -> InvoiceDraft {
        let mut draft = InvoiceDraft::new();
        draft
            .add_product(&product(id, price, tax), dec(quantity))
            .unwrap();
        draft
    }

    #[test]
    fn test_add_product_defaults_to_selling_price() {
        let draft = draft_with("p1", "100", "18", "2");
        let item = draft.item("p1").unwrap();

        assert_eq!(item.unit_price, dec("100"));
        assert_eq!(item.price_with_tax, dec("118.00"));
        assert_eq!(item.total, dec("236"));
        assert_eq!(item.driver, PriceDriver::UnitPrice);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut draft = draft_with("p1", "100", "18", "2");
        draft.add_product(&product("p1", "100", "18"), dec("3")).unwrap();

        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.item("p1").unwrap().quantity, dec("5"));
    }

    #[test]
    fn test_add_product_rejects_bad_input() {
        let mut draft = InvoiceDraft::new();
        assert!(matches!(
            draft.add_product(&product("p1", "100", "15"), dec("1")),
            Err(InvoiceError::InvalidTaxRate(_))
        ));
        assert!(matches!(
            draft.add_product(&product("p1", "100", "18"), dec("0")),
            Err(InvoiceError::Validation(_))
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_discount_is_clamped() {
        let mut draft = draft_with("p1", "100", "18", "2");
        draft.set_discount("p1", dec("150")).unwrap();

        let item = draft.item("p1").unwrap();
        assert_eq!(item.discount_percent, dec("100"));
        assert_eq!(item.total, dec("0"));
    }

    #[test]
    fn test_discount_scenario() {
        let mut draft = draft_with("p1", "100", "18", "2");
        draft.set_discount("p1", dec("10")).unwrap();
        assert_eq!(draft.item("p1").unwrap().total, dec("212.4"));
    }

    #[test]
    fn test_price_with_tax_drives_unit_price() {
        let mut draft = draft_with("p1", "100", "12", "1");
        draft.set_price_with_tax("p1", dec("100")).unwrap();

        let item = draft.item("p1").unwrap();
        assert_eq!(item.driver, PriceDriver::PriceWithTax);
        assert_eq!(item.unit_price, dec("89.29"));
        assert_eq!(item.price_with_tax, dec("100"));
    }

    #[test]
    fn test_unit_price_drives_price_with_tax() {
        let mut draft = draft_with("p1", "100", "12", "1");
        draft.set_price_with_tax("p1", dec("100")).unwrap();
        draft.set_unit_price("p1", dec("50")).unwrap();

        let item = draft.item("p1").unwrap();
        assert_eq!(item.driver, PriceDriver::UnitPrice);
        assert_eq!(item.price_with_tax, dec("56.00"));
    }

    #[test]
    fn test_negative_prices_clamp_to_zero() {
        let mut draft = draft_with("p1", "100", "5", "1");
        draft.set_unit_price("p1", dec("-10")).unwrap();
        assert_eq!(draft.item("p1").unwrap().unit_price, dec("0"));
        assert_eq!(draft.item("p1").unwrap().total, dec("0"));
    }

    #[test]
    fn test_invalid_quantity_removes_line() {
        let mut draft = draft_with("p1", "100", "18", "2");
        draft.add_product(&product("p2", "50", "5"), dec("1")).unwrap();

        assert_eq!(
            draft.commit_quantity("p1", "abc").unwrap(),
            QuantityCommit::Removed
        );
        assert_eq!(
            draft.set_quantity("p2", dec("-1")).unwrap(),
            QuantityCommit::Removed
        );
        assert!(draft.is_empty());
        assert_eq!(draft.totals(), InvoiceTotals::zero());
    }

    #[test]
    fn test_commit_quantity_updates_line() {
        let mut draft = draft_with("p1", "100", "0", "1");
        assert_eq!(
            draft.commit_quantity("p1", "4").unwrap(),
            QuantityCommit::Updated
        );
        assert_eq!(draft.item("p1").unwrap().total, dec("400"));
    }

    #[test]
    fn test_override_total_and_clear() {
        let mut draft = draft_with("p1", "100", "18", "1");
        draft.override_total("p1", dec("236")).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.taxable_value, dec("200"));
        assert_eq!(totals.tax_amount, dec("36"));

        draft.clear_total_override("p1").unwrap();
        assert_eq!(draft.item("p1").unwrap().total, dec("118"));
        assert_eq!(draft.totals().total_amount, dec("118"));
    }

    #[test]
    fn test_edit_unknown_line() {
        let mut draft = InvoiceDraft::new();
        assert!(matches!(
            draft.set_discount("missing", dec("5")),
            Err(InvoiceError::ItemNotFound(_))
        ));
    }
}
