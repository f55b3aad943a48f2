use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::Validate;

use crate::api::{ConnectionConfig, HostOverride};
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub connection: ConnectionSettings,

    #[serde(default = "default_restart")]
    pub restart_after_apply: bool,

    #[serde(default)]
    #[validate(nested)]
    pub host_overrides: Vec<HostEntry>,
}

fn default_restart() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ConnectionSettings {
    #[validate(length(min = 1, message = "Base URL cannot be empty"))]
    pub base_url: Cow<'static, str>,

    #[validate(length(min = 1, message = "API key cannot be empty"))]
    pub api_key: Cow<'static, str>,

    #[validate(length(min = 1, message = "API secret cannot be empty"))]
    pub api_secret: Cow<'static, str>,

    #[serde(default)]
    pub no_ssl_verify: bool,
}

impl ConnectionSettings {
    pub fn to_connection(&self) -> Result<ConnectionConfig> {
        let connection = ConnectionConfig::new(
            &self.base_url,
            self.api_key.to_string(),
            self.api_secret.to_string(),
        )?;
        Ok(connection.with_no_ssl_verify(self.no_ssl_verify))
    }
}

/// A host override declared in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HostEntry {
    #[validate(length(min = 1, message = "Hostname cannot be empty"))]
    pub hostname: Cow<'static, str>,

    #[validate(length(min = 1, message = "Domain cannot be empty"))]
    pub domain: Cow<'static, str>,

    #[validate(length(min = 1, message = "Server address cannot be empty"))]
    pub server: Cow<'static, str>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    pub mxprio: Option<u32>,
    pub mx: Option<Cow<'static, str>>,
    pub description: Option<Cow<'static, str>>,
}

fn default_enabled() -> bool {
    true
}

impl From<&HostEntry> for HostOverride {
    fn from(entry: &HostEntry) -> Self {
        HostOverride {
            enabled: entry.enabled,
            mxprio: entry.mxprio.map(|p| p.to_string()),
            mx: entry.mx.as_ref().map(|mx| mx.to_string()),
            description: entry.description.as_ref().map(|d| d.to_string()),
            ..HostOverride::new(
                entry.hostname.to_string(),
                entry.domain.to_string(),
                entry.server.to_string(),
            )
        }
    }
}
