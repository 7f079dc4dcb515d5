// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bindery::binding::{binding_secret, resolve_all, SecretConfigMapReader};
use bindery::config::Config;
use bindery::kubernetes::{apply_binding_secret, fetch_source_object};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    info!(
        "Resolving binding for {} {}/{}",
        config.source_kind, config.namespace, config.source_name
    );

    let specs = config.load_definitions()?;

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let reader = SecretConfigMapReader::new(client.clone());
    let definitions = specs
        .into_iter()
        .map(|spec| spec.build(&reader))
        .collect::<bindery::error::Result<Vec<_>>>()
        .context("Invalid binding definition")?;

    let object = fetch_source_object(
        &client,
        &config.source_api_version,
        &config.source_kind,
        &config.namespace,
        &config.source_name,
    )
    .await?;

    let data = resolve_all(&definitions, &object).await.map_err(|e| {
        anyhow::anyhow!("Binding resolution failed ({}): {}", e.reason(), e)
    })?;

    let secret = binding_secret(&config.secret_name, &config.namespace, &data);
    if config.dry_run {
        print!("{}", serde_yaml::to_string(&secret)?);
        return Ok(());
    }

    apply_binding_secret(&client, &secret).await?;
    Ok(())
}
