// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys set on binding Secrets
pub mod labels {
    /// Marks the Secret as written by this tool
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
}

/// The operator name, used as field manager for server-side apply
pub const OPERATOR_NAME: &str = "bindery";

/// Appended to the source object name when no binding Secret name is configured
pub const BINDING_SECRET_SUFFIX: &str = "-binding";
