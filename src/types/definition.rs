// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::binding::definition::{
    Definition, MapFromDataFieldDefinition, SliceOfMapsDefinition, SliceOfStringsDefinition,
    StringDefinition, StringOfMapDefinition, StringSource,
};
use crate::binding::path::Template;
use crate::binding::reader::{ObjectType, SecretConfigMapReader};
use crate::error::{BinderyError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration of one binding definition, as written in YAML or JSON
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DefinitionSpec {
    #[serde(rename_all = "camelCase")]
    String {
        output_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    StringOfMap {
        #[serde(skip_serializing_if = "Option::is_none")]
        output_name: Option<String>,
        path: String,
    },
    #[serde(rename_all = "camelCase")]
    SliceOfStrings {
        output_name: String,
        path: String,
        source_value: String,
    },
    #[serde(rename_all = "camelCase")]
    SliceOfMaps {
        output_name: String,
        path: String,
        source_key: String,
        source_value: String,
    },
    #[serde(rename_all = "camelCase")]
    MapFromDataField {
        object_type: ObjectType,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        output_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        source_value: Option<String>,
    },
}

impl DefinitionSpec {
    /// Validate the configuration and build the definition it describes.
    ///
    /// The reader is only kept by definitions that read Secrets or ConfigMaps.
    pub fn build(self, reader: &SecretConfigMapReader) -> Result<Definition> {
        Ok(match self {
            DefinitionSpec::String {
                output_name,
                path,
                value,
            } => {
                // a literal value takes precedence over the path
                let source = match (non_empty(value), non_empty(path)) {
                    (Some(value), _) => StringSource::Value(value),
                    (None, Some(path)) => StringSource::Path(Template::parse(&path)?),
                    (None, None) => {
                        return Err(BinderyError::InvalidDefinition(format!(
                            "string definition '{}' needs a path or a value",
                            output_name
                        )))
                    }
                };
                Definition::String(StringDefinition {
                    output_name: required("outputName", output_name)?,
                    source,
                })
            }
            DefinitionSpec::StringOfMap { output_name, path } => {
                Definition::StringOfMap(StringOfMapDefinition {
                    output_name: non_empty(output_name),
                    path: template(&path)?,
                })
            }
            DefinitionSpec::SliceOfStrings {
                output_name,
                path,
                source_value,
            } => Definition::SliceOfStrings(SliceOfStringsDefinition {
                output_name: required("outputName", output_name)?,
                path: template(&path)?,
                source_value: required("sourceValue", source_value)?,
            }),
            DefinitionSpec::SliceOfMaps {
                output_name,
                path,
                source_key,
                source_value,
            } => Definition::SliceOfMaps(SliceOfMapsDefinition {
                output_name: required("outputName", output_name)?,
                path: template(&path)?,
                source_key: required("sourceKey", source_key)?,
                source_value: required("sourceValue", source_value)?,
            }),
            DefinitionSpec::MapFromDataField {
                object_type,
                path,
                output_name,
                source_value,
            } => Definition::MapFromDataField(MapFromDataFieldDefinition {
                reader: reader.clone(),
                object_type,
                output_name: non_empty(output_name),
                path: template(&path)?,
                source_value: non_empty(source_value),
            }),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(BinderyError::InvalidDefinition(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}

fn template(path: &str) -> Result<Template> {
    Template::parse(&required("path", path.to_string())?)
}
