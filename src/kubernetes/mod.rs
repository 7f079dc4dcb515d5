// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for reading source objects and writing binding Secrets.

pub mod secret;
pub mod source;

pub use secret::apply_binding_secret;
pub use source::fetch_source_object;
