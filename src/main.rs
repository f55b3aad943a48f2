use anyhow::{bail, Result};
use log::info;
use opnsense_unbound::{
    config::Config, sync::HostSync, HostOverrideApi, OpnSense, ServiceApi, UnboundClient,
};

const USAGE: &str = "usage: opnsense-unbound <apply|list|restart> [config.yaml]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "apply".to_string());
    let config_path = args.next().unwrap_or_else(|| "config.yaml".to_string());

    let config = Config::load(&config_path)?;
    let client = UnboundClient::new(OpnSense::new(config.connection.to_connection()?)?);

    match command.as_str() {
        "apply" => {
            let sync = HostSync::from_config(client, &config);
            let applied = sync.apply().await?;
            info!("Applied {} host override(s)", applied.len());
        }
        "list" => {
            for host in client.list().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    host.uuid.as_deref().unwrap_or("-"),
                    if host.enabled { "enabled" } else { "disabled" },
                    host.fqdn(),
                    host.server
                );
            }
        }
        "restart" => client.restart().await?,
        other => bail!("unknown command: {}\n{}", other, USAGE),
    }

    Ok(())
}
