//! CLI command implementations.

pub mod run;
pub mod show_indices;

use anyhow::Result;
use curator_client::EsClient;
use curator_config::Config;
use tracing::{debug, info};

/// Build a client from `config` and confirm the cluster answers.
pub(crate) async fn connect(config: &Config) -> Result<EsClient> {
    let client = EsClient::builder().from_config(config).build()?;
    info!("Connecting to {}", client.base_url());
    let cluster = client.info().await?;
    debug!(
        cluster = %cluster.cluster_name,
        version = %cluster.version.number,
        "Connected"
    );
    Ok(client)
}
