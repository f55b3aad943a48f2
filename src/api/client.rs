use super::models::HostOverride;
use crate::error::Result;
use async_trait::async_trait;
use log::info;

/// Host-override CRUD against the resolver settings.
#[async_trait]
pub trait HostOverrideApi: Send + Sync {
    /// Creates the record and returns the server-assigned identifier.
    async fn create(&self, host: &HostOverride) -> Result<String>;

    /// Updates the record named by `host.uuid`.
    async fn update(&self, host: &HostOverride) -> Result<String>;

    async fn get_by_uuid(&self, uuid: &str) -> Result<HostOverride>;

    /// Fuzzy search on `hostname`, narrowed to exact hostname and domain.
    async fn get_by_fqdn(&self, hostname: &str, domain: &str) -> Result<HostOverride>;

    async fn list(&self) -> Result<Vec<HostOverride>>;

    async fn remove(&self, uuid: &str) -> Result<()>;

    /// Updates when a record with the same identity exists, creates otherwise.
    ///
    /// Without an identifier the (hostname, domain) pair is looked up first;
    /// a single match lends its identifier. Zero or several matches fall
    /// through to create. Any other lookup failure is returned.
    async fn create_or_update(&self, host: &HostOverride) -> Result<String> {
        if host.uuid.is_some() {
            return self.update(host).await;
        }

        match self.get_by_fqdn(&host.hostname, &host.domain).await {
            Ok(found) => match found.uuid {
                Some(uuid) => {
                    info!(
                        "Found entry with same FQDN {}, doing update with uuid: {}",
                        host.fqdn(),
                        uuid
                    );
                    let host = HostOverride {
                        uuid: Some(uuid),
                        ..host.clone()
                    };
                    self.update(&host).await
                }
                None => self.create(host).await,
            },
            Err(e) if e.is_not_found() || e.is_too_many_found() => self.create(host).await,
            Err(e) => Err(e),
        }
    }

    /// `Ok(false)` only when nothing matches; ambiguity is an error.
    async fn exists(&self, hostname: &str, domain: &str) -> Result<bool> {
        match self.get_by_fqdn(hostname, domain).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Resolver service lifecycle.
#[async_trait]
pub trait ServiceApi: Send + Sync {
    async fn restart(&self) -> Result<()>;
}
