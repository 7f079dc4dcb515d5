// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolved binding values.

use serde_json::{Map, Value};

/// The result of applying a definition.
///
/// A value either nests its payload under an output name, or is a mapping
/// that merges flat into the aggregate output.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    Named { output_name: String, payload: Value },
    Flat(Map<String, Value>),
}

impl BindingValue {
    /// A payload of any shape, nested under `output_name`
    pub fn named(output_name: impl Into<String>, payload: Value) -> Self {
        BindingValue::Named {
            output_name: output_name.into(),
            payload,
        }
    }

    /// A mapping whose entries merge directly into the output
    pub fn flat(entries: Map<String, Value>) -> Self {
        BindingValue::Flat(entries)
    }

    /// Render into a mapping entry set
    pub fn get(&self) -> Map<String, Value> {
        self.clone().into_map()
    }

    pub fn into_map(self) -> Map<String, Value> {
        match self {
            BindingValue::Named {
                output_name,
                payload,
            } => Map::from_iter([(output_name, payload)]),
            BindingValue::Flat(entries) => entries,
        }
    }
}
