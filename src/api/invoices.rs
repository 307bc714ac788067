//! Invoice operations

use super::client::TursoClient;
use super::models::Invoice;
use crate::error::Result;
use crate::http::RequestConfig;
use reqwest::Method;

impl TursoClient {
    /// List invoices for the organization
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        self.get_list(&self.org_path("/invoices"), "invoices", RequestConfig::new())
            .await
    }

    /// Get one invoice by number
    pub async fn get_invoice(&self, invoice_number: &str) -> Result<Invoice> {
        self.entity(
            Method::GET,
            &self.org_path(&format!("/invoices/{invoice_number}")),
            "invoice",
            RequestConfig::new(),
        )
        .await
    }
}
