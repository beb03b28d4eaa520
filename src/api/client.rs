use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

/// Remote operations the updater needs from the registrar.
///
/// Each method is exactly one request. Nothing here retries.
#[async_trait]
pub trait RegistrarClient: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session>;

    async fn fetch_zone_records(&self, session: &Session, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Creates `record`; the registrar assigns its id.
    async fn add_record(
        &self,
        session: &Session,
        domain: &str,
        record: &DnsRecord,
    ) -> Result<ApiResponse<serde_json::Value>>;

    /// Updates an existing record. `record.id` must be set.
    async fn modify_record(
        &self,
        session: &Session,
        domain: &str,
        record: &DnsRecord,
    ) -> Result<ApiResponse<serde_json::Value>>;
}
