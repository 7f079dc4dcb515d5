// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builds the binding Secret from resolved binding data.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use kube::api::ObjectMeta;
use serde_json::{Map, Value};
use tracing::debug;

use crate::binding::path::render;
use crate::constants::{labels, OPERATOR_NAME};

/// Flatten binding data into Secret entries.
///
/// Nested mapping keys are joined with `_`, sequence elements get their index
/// appended, e.g. `{"bootstrap": ["a"]}` becomes `bootstrap_0 = a`.
pub fn flatten(data: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in data {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

fn flatten_into(prefix: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(entries) if !entries.is_empty() => {
            for (key, entry) in entries {
                flatten_into(format!("{}_{}", prefix, key), entry, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(format!("{}_{}", prefix, i), item, out);
            }
        }
        leaf => {
            if out.insert(prefix.clone(), render(leaf)).is_some() {
                debug!("Binding Secret key '{}' overwritten by a later entry", prefix);
            }
        }
    }
}

/// Create the Opaque binding Secret holding the flattened data as `stringData`
pub fn binding_secret(name: &str, namespace: &str, data: &Map<String, Value>) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(BTreeMap::from([(
                labels::MANAGED_BY.to_string(),
                OPERATOR_NAME.to_string(),
            )])),
            ..Default::default()
        },
        string_data: Some(flatten(data)),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}
