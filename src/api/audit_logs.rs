//! Audit log operations
//!
//! The only paginated endpoint in the Platform API. `audit_logs` drains
//! every page through [`PageCollector`]; `audit_logs_page` fetches a
//! single page for callers that want a bounded read.

use super::client::TursoClient;
use super::models::AuditLogEntry;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::pagination::PageCollector;
use crate::types::Record;
use crate::util::compact_params;
use reqwest::Method;

impl TursoClient {
    /// Fetch a single page of audit log entries
    pub async fn audit_logs_page(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<AuditLogEntry>> {
        let params = compact_params([
            ("page", page.map(|p| p.to_string())),
            ("per_page", per_page.map(|p| p.to_string())),
        ]);
        self.get_list(
            &self.org_path("/audit-logs"),
            "audit_logs",
            RequestConfig::new().queries(params),
        )
        .await
    }

    /// Fetch every audit log entry, draining all pages
    pub async fn audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        self.collect_audit_log_records()
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(Into::into))
            .collect()
    }

    /// Drain all audit log pages as raw records
    pub async fn collect_audit_log_records(&self) -> Result<Vec<Record>> {
        let path = self.org_path("/audit-logs");
        PageCollector::new("audit_logs")
            .collect(|page| {
                let path = path.clone();
                async move {
                    self.value(
                        Method::GET,
                        &path,
                        RequestConfig::new()
                            .query("page", page.page.to_string())
                            .query("per_page", page.per_page.to_string()),
                    )
                    .await
                }
            })
            .await
    }
}
