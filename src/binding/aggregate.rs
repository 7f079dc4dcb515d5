// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Merging resolved values into the binding output.

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::binding::definition::Definition;
use crate::binding::value::BindingValue;
use crate::error::Result;

/// Merge values in order. A key produced twice keeps the later value.
pub fn merge(values: impl IntoIterator<Item = BindingValue>) -> Map<String, Value> {
    let mut output = Map::new();
    for value in values {
        for (key, entry) in value.into_map() {
            if output.insert(key.clone(), entry).is_some() {
                debug!("Binding key '{}' overwritten by a later definition", key);
            }
        }
    }
    output
}

/// Apply every definition to the object and merge the results.
///
/// Definitions are resolved concurrently. The first failure aborts the whole
/// batch, so callers never see a partial binding.
#[instrument(skip_all, fields(definitions = definitions.len()))]
pub async fn resolve_all(definitions: &[Definition], object: &Value) -> Result<Map<String, Value>> {
    let values = try_join_all(definitions.iter().map(|d| d.apply(object))).await?;
    let output = merge(values);
    info!("Resolved {} binding keys", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::definition::{
        MapFromDataFieldDefinition, SliceOfMapsDefinition, StringDefinition, StringOfMapDefinition,
        StringSource,
    };
    use crate::binding::path::Template;
    use crate::binding::reader::{ObjectType, SecretConfigMapReader};
    use crate::error::BinderyError;
    use crate::test_utils::{secret_json, MockService};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn string(output_name: &str, path: &str) -> Definition {
        Definition::String(StringDefinition {
            output_name: output_name.to_string(),
            source: StringSource::Path(Template::parse(path).unwrap()),
        })
    }

    fn object() -> Value {
        json!({
            "metadata": {"name": "db", "namespace": "test-namespace"},
            "status": {
                "host": "db.example.com",
                "dbCredentials": {"username": "AzureDiamond", "password": "hunter2"},
                "credentialsSecret": "db-credentials",
                "bootstrap": [
                    {"type": "http", "url": "a"},
                    {"type": "https", "url": "b"}
                ]
            }
        })
    }

    #[test]
    fn test_merge_later_value_wins() {
        let output = merge([
            BindingValue::named("host", json!("first")),
            BindingValue::flat(Map::from_iter([
                ("host".to_string(), json!("second")),
                ("port".to_string(), json!("5432")),
            ])),
        ]);

        assert_eq!(Value::Object(output), json!({"host": "second", "port": "5432"}));
    }

    #[test]
    fn test_merge_nothing_is_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_all() {
        let client = MockService::new()
            .on_get(
                "/api/v1/namespaces/test-namespace/secrets/db-credentials",
                200,
                &secret_json(
                    "test-namespace",
                    "db-credentials",
                    &BTreeMap::from([("ca.crt".to_string(), "CERT".to_string())]),
                ),
            )
            .into_client();

        let definitions = vec![
            string("host", "{.status.host}"),
            Definition::StringOfMap(StringOfMapDefinition {
                output_name: None,
                path: Template::parse("{.status.dbCredentials}").unwrap(),
            }),
            Definition::SliceOfMaps(SliceOfMapsDefinition {
                output_name: "bootstrap".to_string(),
                path: Template::parse("{.status.bootstrap}").unwrap(),
                source_key: "type".to_string(),
                source_value: "url".to_string(),
            }),
            Definition::MapFromDataField(MapFromDataFieldDefinition {
                reader: SecretConfigMapReader::new(client),
                object_type: ObjectType::Secret,
                output_name: None,
                path: Template::parse("{.status.credentialsSecret}").unwrap(),
                source_value: None,
            }),
        ];

        let output = resolve_all(&definitions, &object()).await.unwrap();

        assert_eq!(
            Value::Object(output),
            json!({
                "host": "db.example.com",
                "username": "AzureDiamond",
                "password": "hunter2",
                "bootstrap": {"http": "a", "https": "b"},
                "ca.crt": "CERT"
            })
        );
    }

    #[tokio::test]
    async fn test_resolve_all_later_definition_overwrites() {
        let definitions = vec![
            string("username", "{.status.host}"),
            Definition::StringOfMap(StringOfMapDefinition {
                output_name: None,
                path: Template::parse("{.status.dbCredentials}").unwrap(),
            }),
        ];

        let output = resolve_all(&definitions, &object()).await.unwrap();

        assert_eq!(output["username"], json!("AzureDiamond"));
    }

    #[tokio::test]
    async fn test_resolve_all_fails_on_any_error() {
        let definitions = vec![
            string("host", "{.status.host}"),
            string("port", "{.status.port}"),
        ];

        let err = resolve_all(&definitions, &object()).await.unwrap_err();

        assert!(matches!(err, BinderyError::PathNotFound { ref path } if path == ".status.port"));
    }
}
