// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::binding::reader::ObjectType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderyError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path '{path}' not found")]
    PathNotFound { path: String },

    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Key '{key}' missing from {location}")]
    MissingKey { key: String, location: String },

    #[error("{kind} {namespace}/{name} not found")]
    ExternalResourceNotFound {
        kind: ObjectType,
        namespace: String,
        name: String,
    },

    #[error("Failed to read {kind} {namespace}/{name}: {reason}")]
    ExternalResourceUnreadable {
        kind: ObjectType,
        namespace: String,
        name: String,
        reason: String,
    },

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}

impl BinderyError {
    /// Machine readable reason, suitable for a status condition on the owning resource
    pub fn reason(&self) -> &'static str {
        match self {
            BinderyError::KubeError(_) => "KubeError",
            BinderyError::SerializationError(_) => "SerializationError",
            BinderyError::InvalidPath { .. } => "InvalidPath",
            BinderyError::PathNotFound { .. } => "PathNotFound",
            BinderyError::TypeMismatch { .. } => "TypeMismatch",
            BinderyError::MissingKey { .. } => "MissingKey",
            BinderyError::ExternalResourceNotFound { .. } => "ExternalResourceNotFound",
            BinderyError::ExternalResourceUnreadable { .. } => "ExternalResourceUnreadable",
            BinderyError::InvalidDefinition(_) => "InvalidDefinition",
        }
    }
}

pub type Result<T> = std::result::Result<T, BinderyError>;
