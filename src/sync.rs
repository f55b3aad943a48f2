use log::{error, info};

use crate::api::{HostOverride, HostOverrideApi, ServiceApi};
use crate::config::Config;
use crate::error::Result;

/// Pushes a declared set of host overrides to the resolver.
pub struct HostSync<C> {
    client: C,
    overrides: Vec<HostOverride>,
    restart_after_apply: bool,
}

impl<C: HostOverrideApi + ServiceApi> HostSync<C> {
    pub fn new(client: C, overrides: Vec<HostOverride>, restart_after_apply: bool) -> Self {
        Self {
            client,
            overrides,
            restart_after_apply,
        }
    }

    pub fn from_config(client: C, config: &Config) -> Self {
        let overrides = config.host_overrides.iter().map(HostOverride::from).collect();
        Self::new(client, overrides, config.restart_after_apply)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Upserts every override in order and returns their identifiers.
    ///
    /// Stops at the first failure. The resolver is only restarted after a
    /// complete, non-empty apply.
    pub async fn apply(&self) -> Result<Vec<String>> {
        let mut applied = Vec::with_capacity(self.overrides.len());

        for host in &self.overrides {
            info!("Applying host override for: {}", host.fqdn());
            match self.client.create_or_update(host).await {
                Ok(uuid) => applied.push(uuid),
                Err(e) => {
                    error!("Failed to apply host override {}: {}", host.fqdn(), e);
                    return Err(e);
                }
            }
        }

        if self.restart_after_apply && !applied.is_empty() {
            info!("Restarting unbound to pick up {} override(s)", applied.len());
            self.client.restart().await?;
        }

        Ok(applied)
    }
}
