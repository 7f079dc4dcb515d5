// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source object retrieval

use crate::error::Result;
use kube::{
    api::{ApiResource, DynamicObject, GroupVersionKind},
    Api, Client,
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Split an apiVersion into group and version. The core group is empty.
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    api_version.split_once('/').unwrap_or(("", api_version))
}

/// Fetch any namespaced object and return it as a structured object
#[instrument(skip(client))]
pub async fn fetch_source_object(
    client: &Client,
    api_version: &str,
    kind: &str,
    namespace: &str,
    name: &str,
) -> Result<Value> {
    let (group, version) = split_api_version(api_version);
    let resource = ApiResource::from_gvk(&GroupVersionKind::gvk(group, version, kind));
    let api: Api<DynamicObject> = Api::namespaced_with(client.clone(), namespace, &resource);

    let object = api.get(name).await?;
    debug!("Fetched {} {}/{}", kind, namespace, name);

    Ok(serde_json::to_value(&object)?)
}
