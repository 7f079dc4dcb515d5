// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of binding values from Kubernetes objects.

pub mod aggregate;
pub mod definition;
pub mod path;
pub mod reader;
pub mod secret;
pub mod value;

pub use aggregate::{merge, resolve_all};
pub use definition::Definition;
pub use path::Template;
pub use reader::{ObjectType, SecretConfigMapReader};
pub use secret::binding_secret;
pub use value::BindingValue;
