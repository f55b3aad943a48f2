pub mod client;
pub mod endpoint;
pub mod models;
pub mod service;
pub mod transport;
pub mod unbound;

pub use client::{HostOverrideApi, ServiceApi};
pub use endpoint::{Controller, Module};
pub use models::HostOverride;
pub use transport::{ConnectionConfig, OpnSense};
pub use unbound::UnboundClient;
