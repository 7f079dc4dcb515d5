// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reads the data fields of Secrets and ConfigMaps referenced by a binding.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::ByteString;
use kube::{Api, Client};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BinderyError, Result};

/// Kind of object holding the referenced data
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum ObjectType {
    Secret,
    ConfigMap,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Secret => f.write_str("Secret"),
            ObjectType::ConfigMap => f.write_str("ConfigMap"),
        }
    }
}

/// Data fields of one Secret or ConfigMap.
///
/// Values stay raw bytes until a key is projected, so a binary entry only
/// fails the read when it is actually selected.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFields {
    kind: ObjectType,
    namespace: String,
    name: String,
    entries: BTreeMap<String, Vec<u8>>,
}

impl DataFields {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove one key and decode its value as UTF-8
    pub fn take(&mut self, key: &str) -> Result<Option<String>> {
        self.entries
            .remove(key)
            .map(|bytes| decode(self.kind, &self.namespace, &self.name, key, bytes))
            .transpose()
    }

    /// Decode every value as UTF-8
    pub fn into_strings(self) -> Result<BTreeMap<String, String>> {
        let DataFields {
            kind,
            namespace,
            name,
            entries,
        } = self;
        entries
            .into_iter()
            .map(|(key, bytes)| {
                let value = decode(kind, &namespace, &name, &key, bytes)?;
                Ok((key, value))
            })
            .collect()
    }
}

impl fmt::Display for DataFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Fetches Secret and ConfigMap data from the cluster.
///
/// Holds no state besides the client, so it can be cloned into every
/// definition and used concurrently. Nothing is cached; each read hits the API.
#[derive(Clone)]
pub struct SecretConfigMapReader {
    client: Client,
}

impl SecretConfigMapReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn read(&self, kind: ObjectType, namespace: &str, name: &str) -> Result<DataFields> {
        match kind {
            ObjectType::Secret => self.read_secret(namespace, name).await,
            ObjectType::ConfigMap => self.read_config_map(namespace, name).await,
        }
    }

    /// Data of a Secret. `stringData` entries win over `data`.
    #[instrument(skip(self))]
    pub async fn read_secret(&self, namespace: &str, name: &str) -> Result<DataFields> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secrets
            .get(name)
            .await
            .map_err(|e| fetch_error(ObjectType::Secret, namespace, name, e))?;

        let data = data_fields(
            ObjectType::Secret,
            namespace,
            name,
            secret.data,
            secret.string_data,
        );
        debug!("Read {} keys from Secret {}/{}", data.len(), namespace, name);
        Ok(data)
    }

    /// Data of a ConfigMap. `data` entries win over `binaryData`.
    #[instrument(skip(self))]
    pub async fn read_config_map(&self, namespace: &str, name: &str) -> Result<DataFields> {
        let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let config_map = config_maps
            .get(name)
            .await
            .map_err(|e| fetch_error(ObjectType::ConfigMap, namespace, name, e))?;

        let data = data_fields(
            ObjectType::ConfigMap,
            namespace,
            name,
            config_map.binary_data,
            config_map.data,
        );
        debug!("Read {} keys from ConfigMap {}/{}", data.len(), namespace, name);
        Ok(data)
    }
}

fn fetch_error(kind: ObjectType, namespace: &str, name: &str, err: kube::Error) -> BinderyError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => BinderyError::ExternalResourceNotFound {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        e => BinderyError::ExternalResourceUnreadable {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason: e.to_string(),
        },
    }
}

fn data_fields(
    kind: ObjectType,
    namespace: &str,
    name: &str,
    bytes: Option<BTreeMap<String, ByteString>>,
    strings: Option<BTreeMap<String, String>>,
) -> DataFields {
    let mut entries: BTreeMap<String, Vec<u8>> = bytes
        .unwrap_or_default()
        .into_iter()
        .map(|(key, ByteString(value))| (key, value))
        .collect();
    entries.extend(
        strings
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes())),
    );
    DataFields {
        kind,
        namespace: namespace.to_string(),
        name: name.to_string(),
        entries,
    }
}

fn decode(kind: ObjectType, namespace: &str, name: &str, key: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| BinderyError::ExternalResourceUnreadable {
        kind,
        namespace: namespace.to_string(),
        name: name.to_string(),
        reason: format!("key '{}' is not valid UTF-8: {}", key, e),
    })
}
