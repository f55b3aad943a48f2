use async_trait::async_trait;
use log::{debug, info};
use reqwest::StatusCode;

use super::client::HostOverrideApi;
use super::endpoint::{Controller, Module};
use super::models::*;
use super::transport::{read_json, server_error, OpnSense};
use crate::error::{ApiError, Result};

const ADD_HOST_OVERRIDE: &str = "addHostOverride";
const SET_HOST_OVERRIDE: &str = "setHostOverride";
const GET_HOST_OVERRIDE: &str = "getHostOverride";
const SEARCH_HOST_OVERRIDE: &str = "searchHostOverride";
const DEL_HOST_OVERRIDE: &str = "delHostOverride";

/// Client for the Unbound DNS plugin.
#[derive(Debug, Clone)]
pub struct UnboundClient {
    opn: OpnSense,
}

impl UnboundClient {
    pub fn new(opn: OpnSense) -> Self {
        Self { opn }
    }

    pub(crate) fn opn(&self) -> &OpnSense {
        &self.opn
    }

    fn settings(&self, method: &str) -> String {
        self.opn.endpoint(Module::Unbound, Controller::Settings, method)
    }

    async fn save(&self, url: &str, host: &HostOverride) -> Result<ServerResult> {
        let response = self
            .opn
            .post(url)
            .json(&HostContainer { host: host.clone() })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(server_error(response).await);
        }

        let result: ServerResult = read_json(response).await?;
        if result.is_failed() {
            return Err(ApiError::Validation {
                fields: result.validation_messages(),
                result: result.result,
            });
        }
        Ok(result)
    }
}

#[async_trait]
impl HostOverrideApi for UnboundClient {
    async fn create(&self, host: &HostOverride) -> Result<String> {
        let result = self.save(&self.settings(ADD_HOST_OVERRIDE), host).await?;

        let uuid = result.uuid.ok_or_else(|| ApiError::Server {
            status: StatusCode::OK.as_u16(),
            message: format!("no uuid returned for {} ({})", host.fqdn(), result.result),
            detail: None,
        })?;
        info!("Created host override {} as {}", host.fqdn(), uuid);
        Ok(uuid)
    }

    async fn update(&self, host: &HostOverride) -> Result<String> {
        let uuid = host.uuid.as_deref().ok_or(ApiError::MissingIdentifier)?;
        let url = format!("{}/{}", self.settings(SET_HOST_OVERRIDE), uuid);

        let result = self.save(&url, host).await?;
        info!("Updated host override {} ({})", host.fqdn(), uuid);
        Ok(result.uuid.unwrap_or_else(|| uuid.to_string()))
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<HostOverride> {
        let url = format!("{}/{}", self.settings(GET_HOST_OVERRIDE), uuid);
        let response = self.opn.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(ApiError::not_found(uuid)),
            _ => return Err(server_error(response).await),
        }

        // Unknown identifiers come back as 200 with an empty payload.
        let text = response.text().await?;
        match serde_json::from_str::<HostContainer>(&text) {
            Ok(container) => Ok(HostOverride {
                uuid: Some(uuid.to_string()),
                ..container.host
            }),
            Err(_) if matches!(text.trim(), "" | "[]" | "{}") => Err(ApiError::not_found(uuid)),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_fqdn(&self, hostname: &str, domain: &str) -> Result<HostOverride> {
        let response = self
            .opn
            .get(&self.settings(SEARCH_HOST_OVERRIDE))
            .query(&[("searchPhrase", hostname)])
            .send()
            .await?;

        let fqdn = format!("{}.{}", hostname, domain);
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(ApiError::not_found(fqdn)),
            _ => return Err(server_error(response).await),
        }

        let container: HostsContainer = read_json(response).await?;
        let mut matching: Vec<HostOverride> = container
            .rows
            .into_iter()
            .filter(|row| row.hostname == hostname && row.domain == domain)
            .collect();
        debug!("{} search rows match {}", matching.len(), fqdn);

        match matching.len() {
            0 => Err(ApiError::not_found(fqdn)),
            1 => Ok(matching.remove(0)),
            _ => Err(ApiError::too_many_found(fqdn)),
        }
    }

    async fn list(&self) -> Result<Vec<HostOverride>> {
        let response = self
            .opn
            .get(&self.settings(SEARCH_HOST_OVERRIDE))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(server_error(response).await);
        }

        let container: HostsContainer = read_json(response).await?;
        Ok(container.rows)
    }

    async fn remove(&self, uuid: &str) -> Result<()> {
        let url = format!("{}/{}", self.settings(DEL_HOST_OVERRIDE), uuid);
        let response = self.opn.post(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(server_error(response).await);
        }

        // Any 200 is success unless the body says the record was missing.
        let text = response.text().await?;
        if let Ok(result) = serde_json::from_str::<ServerResult>(&text) {
            if result.is_not_found() {
                return Err(ApiError::not_found(uuid));
            }
        }
        info!("Removed host override {}", uuid);
        Ok(())
    }
}
