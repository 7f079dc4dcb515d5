// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::BINDING_SECRET_SUFFIX;
use crate::types::DefinitionSpec;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Resolution configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// YAML file holding the list of definitions
    pub definitions_path: PathBuf,
    pub source_api_version: String,
    pub source_kind: String,
    pub source_name: String,
    /// Namespace of both the source object and the binding Secret
    pub namespace: String,
    pub secret_name: String,
    /// Print the binding Secret instead of applying it
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} environment variable not set", key))
        };

        let source_name = required("BINDING_SOURCE_NAME")?;
        let secret_name = lookup("BINDING_SECRET_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("{}{}", source_name, BINDING_SECRET_SUFFIX));
        let dry_run: bool = lookup("BINDING_DRY_RUN")
            .unwrap_or("false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Config {
            definitions_path: required("BINDING_DEFINITIONS")?.into(),
            source_api_version: required("BINDING_SOURCE_API_VERSION")?,
            source_kind: required("BINDING_SOURCE_KIND")?,
            source_name,
            namespace: required("BINDING_NAMESPACE")?,
            secret_name,
            dry_run,
        })
    }

    /// Read and parse the definitions file
    pub fn load_definitions(&self) -> Result<Vec<DefinitionSpec>> {
        let raw = std::fs::read_to_string(&self.definitions_path).with_context(|| {
            format!(
                "Failed to read definitions from {}",
                self.definitions_path.display()
            )
        })?;
        serde_yaml::from_str(&raw).with_context(|| {
            format!(
                "Failed to parse definitions in {}",
                self.definitions_path.display()
            )
        })
    }
}
