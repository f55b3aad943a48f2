use log::debug;
use reqwest::{RequestBuilder, Response, Url};

use super::endpoint::{method_endpoint, Controller, Module};
use super::models::ServerError;
use crate::error::{ApiError, Result};

/// Where and how to reach the appliance.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub base_url: Url,
    pub api_key: String,
    pub api_secret: String,
    /// Skip TLS certificate verification for this connection only.
    pub no_ssl_verify: bool,
}

impl ConnectionConfig {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("base url {base_url}: {e}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            no_ssl_verify: false,
        })
    }

    pub fn with_no_ssl_verify(mut self, no_ssl_verify: bool) -> Self {
        self.no_ssl_verify = no_ssl_verify;
        self
    }
}

/// Authenticated HTTP access to the OPNsense API.
#[derive(Debug, Clone)]
pub struct OpnSense {
    client: reqwest::Client,
    config: ConnectionConfig,
}

impl OpnSense {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.no_ssl_verify)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn endpoint(&self, module: Module, controller: Controller, method: &str) -> String {
        method_endpoint(&self.config.base_url, module, controller, method)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        debug!("GET {}", url);
        self.authorize(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        debug!("POST {}", url);
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.api_key, Some(&self.config.api_secret))
    }
}

/// Reads the JSON body of a successful response.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Turns a non-success response into [`ApiError::Server`].
pub(crate) async fn server_error(response: Response) -> ApiError {
    let status = response.status();
    let fallback = || status.canonical_reason().unwrap_or("unknown error").to_string();

    match response.text().await {
        Ok(body) => {
            let message = match serde_json::from_str::<ServerError>(&body) {
                Ok(err) => err.message,
                Err(_) if body.trim().is_empty() => fallback(),
                Err(_) => body.trim().to_string(),
            };
            ApiError::Server {
                status: status.as_u16(),
                message,
                detail: None,
            }
        }
        Err(e) => ApiError::Server {
            status: status.as_u16(),
            message: fallback(),
            detail: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_config_rejects_bad_url() {
        let err = ConnectionConfig::new("not a url", "key", "secret").unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn test_no_ssl_verify_is_scoped_to_each_connection() {
        let secure = ConnectionConfig::new("https://fw.lan", "key", "secret").unwrap();
        let insecure = secure.clone().with_no_ssl_verify(true);

        let a = OpnSense::new(secure).unwrap();
        let b = OpnSense::new(insecure).unwrap();

        assert!(!a.config().no_ssl_verify);
        assert!(b.config().no_ssl_verify);
    }

    #[test]
    fn test_endpoint_uses_base_url() {
        let config = ConnectionConfig::new("https://fw.lan/", "key", "secret").unwrap();
        let opn = OpnSense::new(config).unwrap();
        assert_eq!(
            opn.endpoint(Module::Unbound, Controller::Service, "restart"),
            "https://fw.lan/api/unbound/service/restart"
        );
    }
}
