//! Validation and clamping applied at the edit boundary

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::tax::GstSlab;
use crate::traits::*;
use crate::types::*;

/// Clamp a negative amount to zero
pub fn clamp_non_negative(amount: BigDecimal) -> BigDecimal {
    let zero = BigDecimal::from(0);
    if amount < zero {
        zero
    } else {
        amount
    }
}

/// Clamp a discount percentage into `[0, 100]`
pub fn clamp_discount(discount_percent: BigDecimal) -> BigDecimal {
    let max = BigDecimal::from(100);
    if discount_percent > max {
        max
    } else {
        clamp_non_negative(discount_percent)
    }
}

/// Parse a quantity as typed by the user
///
/// Returns `None` for anything that is not a number greater than zero.
pub fn parse_quantity(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw.trim())
        .ok()
        .filter(|quantity| *quantity > BigDecimal::from(0))
}

/// Validate that a quantity is greater than zero
pub fn validate_quantity(quantity: &BigDecimal) -> InvoiceResult<()> {
    if *quantity <= BigDecimal::from(0) {
        Err(InvoiceError::Validation(format!(
            "Quantity must be greater than zero, got {}",
            quantity
        )))
    } else {
        Ok(())
    }
}

/// Validate that a tax percentage is one of the GST slabs
pub fn validate_tax_percentage(tax_percentage: &BigDecimal) -> InvoiceResult<()> {
    GstSlab::from_percentage(tax_percentage).map(|_| ())
}

/// Validate that an invoice number is usable
pub fn validate_invoice_number(number: &str) -> InvoiceResult<()> {
    if number.trim().is_empty() {
        return Err(InvoiceError::Validation(
            "Invoice number cannot be empty".to_string(),
        ));
    }

    if number.len() > 50 {
        return Err(InvoiceError::Validation(
            "Invoice number cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, slashes, underscores)
    if !number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '/' || c == '_')
    {
        return Err(InvoiceError::Validation(
            "Invoice number can only contain alphanumeric characters, dashes, slashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate a catalog product before it is added to a draft
pub fn validate_product(product: &ProductRef) -> InvoiceResult<()> {
    if product.id.trim().is_empty() {
        return Err(InvoiceError::Validation(
            "Product ID cannot be empty".to_string(),
        ));
    }

    if product.selling_price < BigDecimal::from(0) {
        return Err(InvoiceError::Validation(format!(
            "Product '{}' has a negative selling price",
            product.id
        )));
    }

    validate_tax_percentage(&product.tax_percentage)
}

/// Stricter validator that also checks invoice number format and every line's tax rate
pub struct StrictInvoiceValidator;

impl InvoiceValidator for StrictInvoiceValidator {
    fn validate_new_invoice(
        &self,
        params: &CreateInvoiceParams,
        items: &[LineItem],
    ) -> InvoiceResult<()> {
        DefaultInvoiceValidator.validate_new_invoice(params, items)?;
        validate_invoice_number(&params.number)?;

        for item in items {
            validate_quantity(&item.quantity)?;
            validate_tax_percentage(&item.tax_percentage)?;
        }

        Ok(())
    }

    fn validate_payment(&self, invoice: &Invoice, amount: &BigDecimal) -> InvoiceResult<()> {
        DefaultInvoiceValidator.validate_payment(invoice, amount)
    }
}
