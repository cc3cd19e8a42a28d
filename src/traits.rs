//! Traits for storage abstraction and validation

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;

/// Storage abstraction for products and invoices
///
/// The engine never talks to a database directly. Implement this trait over
/// whatever backend the surrounding application uses.
#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    /// Save a catalog product
    async fn save_product(&mut self, product: &ProductRef) -> InvoiceResult<()>;

    /// Get a catalog product by ID
    async fn get_product(&self, product_id: &str) -> InvoiceResult<Option<ProductRef>>;

    /// List all catalog products
    async fn list_products(&self) -> InvoiceResult<Vec<ProductRef>>;

    /// Save a new invoice
    async fn save_invoice(&mut self, invoice: &Invoice) -> InvoiceResult<()>;

    /// Get an invoice by ID
    async fn get_invoice(&self, invoice_id: &uuid::Uuid) -> InvoiceResult<Option<Invoice>>;

    /// Find an invoice by its human-facing number
    async fn find_invoice_by_number(&self, number: &str) -> InvoiceResult<Option<Invoice>>;

    /// List invoices, optionally only those billed to one client
    async fn list_invoices(&self, client_id: Option<&str>) -> InvoiceResult<Vec<Invoice>>;

    /// Replace a stored invoice
    async fn update_invoice(&mut self, invoice: &Invoice) -> InvoiceResult<()>;

    /// Delete an invoice
    async fn delete_invoice(&mut self, invoice_id: &uuid::Uuid) -> InvoiceResult<()>;
}

/// Trait for implementing custom invoice validation rules
pub trait InvoiceValidator: Send + Sync {
    /// Validate a draft before it becomes an invoice
    fn validate_new_invoice(
        &self,
        params: &CreateInvoiceParams,
        items: &[LineItem],
    ) -> InvoiceResult<()>;

    /// Validate a payment against an invoice
    fn validate_payment(&self, invoice: &Invoice, amount: &BigDecimal) -> InvoiceResult<()>;
}

/// Default invoice validator with basic rules
pub struct DefaultInvoiceValidator;

impl InvoiceValidator for DefaultInvoiceValidator {
    fn validate_new_invoice(
        &self,
        params: &CreateInvoiceParams,
        items: &[LineItem],
    ) -> InvoiceResult<()> {
        if params.number.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Invoice number cannot be empty".to_string(),
            ));
        }

        if params.client_id.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Client ID cannot be empty".to_string(),
            ));
        }

        if items.is_empty() {
            return Err(InvoiceError::Validation(
                "Invoice must have at least one line item".to_string(),
            ));
        }

        if let Some(due_date) = params.due_date {
            if due_date < params.issue_date {
                return Err(InvoiceError::Validation(format!(
                    "Due date {} is before issue date {}",
                    due_date, params.issue_date
                )));
            }
        }

        if let Some(ref upfront) = params.upfront_payment {
            if *upfront < BigDecimal::from(0) {
                return Err(InvoiceError::Payment(
                    "Upfront payment cannot be negative".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn validate_payment(&self, invoice: &Invoice, amount: &BigDecimal) -> InvoiceResult<()> {
        if *amount <= BigDecimal::from(0) {
            return Err(InvoiceError::Payment(
                "Payment amount must be positive".to_string(),
            ));
        }

        if *amount > invoice.balance_amount {
            return Err(InvoiceError::Payment(format!(
                "Payment of {} exceeds outstanding balance {} on invoice {}",
                amount, invoice.balance_amount, invoice.number
            )));
        }

        Ok(())
    }
}
