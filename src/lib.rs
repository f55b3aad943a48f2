//! Client for the OPNsense Unbound DNS API: host overrides and service restart.

pub mod api;
pub mod config;
pub mod error;
pub mod sync;

pub use api::{
    ConnectionConfig, HostOverride, HostOverrideApi, OpnSense, ServiceApi, UnboundClient,
};
pub use error::{ApiError, Result};

#[cfg(test)]
mod tests;
