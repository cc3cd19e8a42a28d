//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    products: Arc<RwLock<HashMap<String, ProductRef>>>,
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
}

fn read<T>(lock: &RwLock<T>) -> InvoiceResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| InvoiceError::Storage(format!("lock poisoned: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> InvoiceResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| InvoiceError::Storage(format!("lock poisoned: {}", e)))
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            invoices: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a storage instance pre-loaded with a product catalog
    pub fn with_products(products: impl IntoIterator<Item = ProductRef>) -> Self {
        let catalog: HashMap<String, ProductRef> = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            products: Arc::new(RwLock::new(catalog)),
            invoices: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> InvoiceResult<()> {
        write(&self.products)?.clear();
        write(&self.invoices)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceStorage for MemoryStorage {
    async fn save_product(&mut self, product: &ProductRef) -> InvoiceResult<()> {
        write(&self.products)?.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn get_product(&self, product_id: &str) -> InvoiceResult<Option<ProductRef>> {
        Ok(read(&self.products)?.get(product_id).cloned())
    }

    async fn list_products(&self) -> InvoiceResult<Vec<ProductRef>> {
        let mut products: Vec<ProductRef> = read(&self.products)?.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    async fn save_invoice(&mut self, invoice: &Invoice) -> InvoiceResult<()> {
        write(&self.invoices)?.insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn get_invoice(&self, invoice_id: &Uuid) -> InvoiceResult<Option<Invoice>> {
        Ok(read(&self.invoices)?.get(invoice_id).cloned())
    }

    async fn find_invoice_by_number(&self, number: &str) -> InvoiceResult<Option<Invoice>> {
        Ok(read(&self.invoices)?
            .values()
            .find(|invoice| invoice.number == number)
            .cloned())
    }

    async fn list_invoices(&self, client_id: Option<&str>) -> InvoiceResult<Vec<Invoice>> {
        let invoices = read(&self.invoices)?;
        let mut filtered: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| client_id.is_none_or(|id| invoice.client_id == id))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            a.issue_date
                .cmp(&b.issue_date)
                .then_with(|| a.number.cmp(&b.number))
        });
        Ok(filtered)
    }

    async fn update_invoice(&mut self, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = write(&self.invoices)?;
        match invoices.get_mut(&invoice.id) {
            Some(stored) => {
                *stored = invoice.clone();
                Ok(())
            }
            None => Err(InvoiceError::InvoiceNotFound(invoice.id.to_string())),
        }
    }

    async fn delete_invoice(&mut self, invoice_id: &Uuid) -> InvoiceResult<()> {
        if write(&self.invoices)?.remove(invoice_id).is_some() {
            Ok(())
        } else {
            Err(InvoiceError::InvoiceNotFound(invoice_id.to_string()))
        }
    }
}
