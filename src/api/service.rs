use async_trait::async_trait;
use log::info;
use reqwest::StatusCode;

use super::client::ServiceApi;
use super::endpoint::{Controller, Module};
use super::transport::server_error;
use super::unbound::UnboundClient;
use crate::error::Result;

const RESTART: &str = "restart";

#[async_trait]
impl ServiceApi for UnboundClient {
    async fn restart(&self) -> Result<()> {
        let url = self
            .opn()
            .endpoint(Module::Unbound, Controller::Service, RESTART);
        let response = self.opn().post(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(server_error(response).await);
        }

        info!("Unbound service restarted");
        Ok(())
    }
}
