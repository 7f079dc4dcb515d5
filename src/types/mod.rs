// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Serializable configuration types.

pub mod definition;

pub use definition::DefinitionSpec;
