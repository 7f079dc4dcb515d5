// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Binding Secret persistence

use crate::constants::OPERATOR_NAME;
use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Patch, PatchParams},
    Api, Client, ResourceExt,
};
use tracing::{info, instrument};

/// Create or update the binding Secret with server-side apply
#[instrument(
    skip(client, secret),
    fields(secret = %format!("{}/{}", secret.namespace().unwrap_or_default(), secret.name_any()))
)]
pub async fn apply_binding_secret(client: &Client, secret: &Secret) -> Result<()> {
    let name = secret.name_any();
    let namespace = secret.namespace().unwrap_or_default();
    let secrets: Api<Secret> = Api::namespaced(client.clone(), &namespace);

    let pp = PatchParams::apply(OPERATOR_NAME).force();
    secrets.patch(&name, &pp, &Patch::Apply(secret)).await?;

    info!(
        "Applied binding Secret {}/{} with {} keys",
        namespace,
        name,
        secret.string_data.as_ref().map_or(0, |d| d.len())
    );
    Ok(())
}
