// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Binding definitions: one configured resolution task each.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::binding::path::{render, type_name, Template};
use crate::binding::reader::{ObjectType, SecretConfigMapReader};
use crate::binding::value::BindingValue;
use crate::error::{BinderyError, Result};

/// Where a string definition takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringSource {
    /// A literal, used as is
    Value(String),
    Path(Template),
}

/// A single string, always nested under its output name
#[derive(Debug, Clone)]
pub struct StringDefinition {
    pub output_name: String,
    pub source: StringSource,
}

impl StringDefinition {
    pub fn apply(&self, object: &Value) -> Result<BindingValue> {
        let payload = match &self.source {
            StringSource::Value(value) => value.clone(),
            StringSource::Path(path) => path.evaluate_string(object)?,
        };
        Ok(BindingValue::named(&self.output_name, Value::String(payload)))
    }
}

/// A mapping subtree, nested under the output name or merged flat without one
#[derive(Debug, Clone)]
pub struct StringOfMapDefinition {
    pub output_name: Option<String>,
    pub path: Template,
}

impl StringOfMapDefinition {
    pub fn apply(&self, object: &Value) -> Result<BindingValue> {
        let entries = expect_mapping(self.path.evaluate(object)?, &self.path)?;
        Ok(match &self.output_name {
            Some(name) => BindingValue::named(name, Value::Object(entries)),
            None => BindingValue::flat(entries),
        })
    }
}

/// One string per element of a sequence of mappings, in element order
#[derive(Debug, Clone)]
pub struct SliceOfStringsDefinition {
    pub output_name: String,
    pub path: Template,
    pub source_value: String,
}

impl SliceOfStringsDefinition {
    pub fn apply(&self, object: &Value) -> Result<BindingValue> {
        let values = mapping_elements(object, &self.path)?
            .iter()
            .map(|element| {
                field(element, &self.source_value, &self.path).map(|v| Value::String(render(v)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(BindingValue::named(&self.output_name, Value::Array(values)))
    }
}

/// A sequence of mappings turned into a key to value mapping.
///
/// When two elements share a key the later one wins.
#[derive(Debug, Clone)]
pub struct SliceOfMapsDefinition {
    pub output_name: String,
    pub path: Template,
    pub source_key: String,
    pub source_value: String,
}

impl SliceOfMapsDefinition {
    pub fn apply(&self, object: &Value) -> Result<BindingValue> {
        let mut entries = Map::new();
        for element in mapping_elements(object, &self.path)? {
            let key = render(field(&element, &self.source_key, &self.path)?);
            let value = field(&element, &self.source_value, &self.path)?.clone();
            if entries.insert(key.clone(), value).is_some() {
                debug!("Duplicate key '{}' under {}, keeping the later element", key, self.path);
            }
        }
        Ok(BindingValue::named(&self.output_name, Value::Object(entries)))
    }
}

/// Data of a Secret or ConfigMap whose name is resolved from the object.
///
/// The object's own `metadata.namespace` is the lookup namespace.
#[derive(Clone)]
pub struct MapFromDataFieldDefinition {
    pub reader: SecretConfigMapReader,
    pub object_type: ObjectType,
    pub output_name: Option<String>,
    pub path: Template,
    pub source_value: Option<String>,
}

impl MapFromDataFieldDefinition {
    #[instrument(skip_all, fields(kind = %self.object_type, path = %self.path))]
    pub async fn apply(&self, object: &Value) -> Result<BindingValue> {
        let name = self.path.evaluate_string(object)?;
        let namespace = object
            .pointer("/metadata/namespace")
            .and_then(Value::as_str)
            .ok_or_else(|| BinderyError::PathNotFound {
                path: ".metadata.namespace".to_string(),
            })?;

        debug!("Resolving data of {} {}/{}", self.object_type, namespace, name);
        let mut data = self.reader.read(self.object_type, namespace, &name).await?;

        if let Some(source_value) = &self.source_value {
            let value = data.take(source_value)?.ok_or_else(|| BinderyError::MissingKey {
                key: source_value.clone(),
                location: data.to_string(),
            })?;
            let key = self.output_name.as_ref().unwrap_or(source_value).clone();
            return Ok(BindingValue::flat(Map::from_iter([(key, Value::String(value))])));
        }

        let entries: Map<String, Value> = data
            .into_strings()?
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Ok(match &self.output_name {
            Some(name) => BindingValue::named(name, Value::Object(entries)),
            None => BindingValue::flat(entries),
        })
    }
}

impl std::fmt::Debug for MapFromDataFieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapFromDataFieldDefinition")
            .field("object_type", &self.object_type)
            .field("output_name", &self.output_name)
            .field("path", &self.path)
            .field("source_value", &self.source_value)
            .finish_non_exhaustive()
    }
}

/// The closed set of definition behaviors
#[derive(Debug, Clone)]
pub enum Definition {
    String(StringDefinition),
    StringOfMap(StringOfMapDefinition),
    SliceOfStrings(SliceOfStringsDefinition),
    SliceOfMaps(SliceOfMapsDefinition),
    MapFromDataField(MapFromDataFieldDefinition),
}

impl Definition {
    /// Resolve this definition against a source object.
    ///
    /// Only `MapFromDataField` performs I/O; the others are pure.
    pub async fn apply(&self, object: &Value) -> Result<BindingValue> {
        match self {
            Definition::String(d) => d.apply(object),
            Definition::StringOfMap(d) => d.apply(object),
            Definition::SliceOfStrings(d) => d.apply(object),
            Definition::SliceOfMaps(d) => d.apply(object),
            Definition::MapFromDataField(d) => d.apply(object).await,
        }
    }
}

fn expect_mapping(value: Value, path: &Template) -> Result<Map<String, Value>> {
    match value {
        Value::Object(entries) => Ok(entries),
        other => Err(type_mismatch(path, "mapping", &other)),
    }
}

/// Elements of the sequence at `path`, each checked to be a mapping
fn mapping_elements(object: &Value, path: &Template) -> Result<Vec<Map<String, Value>>> {
    match path.evaluate(object)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(entries) => Ok(entries),
                other => Err(BinderyError::TypeMismatch {
                    path: path.to_string(),
                    expected: "sequence of mappings",
                    found: type_name(&other),
                }),
            })
            .collect(),
        other => Err(type_mismatch(path, "sequence", &other)),
    }
}

fn field<'v>(element: &'v Map<String, Value>, key: &str, path: &Template) -> Result<&'v Value> {
    element.get(key).ok_or_else(|| BinderyError::MissingKey {
        key: key.to_string(),
        location: format!("element of {}", path),
    })
}

fn type_mismatch(path: &Template, expected: &'static str, found: &Value) -> BinderyError {
    BinderyError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: type_name(found),
    }
}
