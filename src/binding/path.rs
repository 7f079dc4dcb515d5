// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Path templates evaluated against structured objects.
//!
//! A template is literal text interleaved with `{...}` path tokens, e.g.
//! `foo-{.status.dbCredentials}` or `{.status.users[0]['user.name']}`.
//!
//! Supported inside a token:
//! - `.field` (a leading field may omit its dot)
//! - `[0]` sequence index
//! - `['key.with.dots']` / `["key"]` quoted field
//! - `{.}` or `{$}` for the whole object
//!
//! Filters, wildcards, slices and recursive descent are not supported.

use std::fmt;

use serde_json::Value;

use crate::error::{BinderyError, Result};

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Field(String),
    Index(usize),
}

/// A parsed path expression, the contents of one `{...}` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    steps: Vec<Step>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| invalid_path(raw, reason);

        let mut rest = raw.trim();
        if rest.is_empty() {
            return Err(invalid("empty path expression"));
        }
        rest = rest.strip_prefix('$').unwrap_or(rest);

        let mut steps = Vec::new();
        if rest.is_empty() || rest == "." {
            return Ok(Self {
                raw: raw.trim().to_string(),
                steps,
            });
        }

        if !rest.starts_with('.') && !rest.starts_with('[') {
            let (field, tail) = split_field(rest);
            steps.push(Step::Field(field.to_string()));
            rest = tail;
        }

        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix('.') {
                let (field, tail) = split_field(tail);
                if field.is_empty() {
                    return Err(invalid("empty field name"));
                }
                steps.push(Step::Field(field.to_string()));
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('[') {
                let end = tail.find(']').ok_or_else(|| invalid("unterminated '['"))?;
                steps.push(parse_bracket(&tail[..end]).ok_or_else(|| {
                    invalid("bracket must hold an index or a quoted field name")
                })?);
                rest = &tail[end + 1..];
            } else {
                return Err(invalid("expected '.' or '[' between steps"));
            }
        }

        Ok(Self {
            raw: raw.trim().to_string(),
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Find the value this path addresses, borrowing from the object
    pub fn lookup<'a>(&self, object: &'a Value) -> Result<&'a Value> {
        let mut current = object;
        for step in &self.steps {
            let next = match (step, current) {
                (Step::Field(name), Value::Object(map)) => map.get(name),
                (Step::Field(name), Value::Array(items)) => {
                    name.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                (Step::Index(i), Value::Array(items)) => items.get(*i),
                _ => None,
            };
            current = next.ok_or_else(|| BinderyError::PathNotFound {
                path: self.raw.clone(),
            })?;
        }
        Ok(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn split_field(s: &str) -> (&str, &str) {
    let end = s.find(['.', '[']).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn parse_bracket(inner: &str) -> Option<Step> {
    let inner = inner.trim();
    for quote in ['\'', '"'] {
        if let Some(key) = inner
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return (!key.is_empty()).then(|| Step::Field(key.to_string()));
        }
    }
    inner.parse().ok().map(Step::Index)
}

fn invalid_path(path: &str, reason: &str) -> BinderyError {
    BinderyError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Path(FieldPath),
}

/// Literal text interleaved with path tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices();

        while let Some((start, c)) = chars.next() {
            match c {
                '{' => {
                    let end = loop {
                        match chars.next() {
                            Some((i, '}')) => break i,
                            Some((_, '{')) => return Err(invalid_path(source, "nested '{'")),
                            Some(_) => {}
                            None => return Err(invalid_path(source, "unterminated '{'")),
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Path(FieldPath::parse(&source[start + 1..end])?));
                }
                '}' => return Err(invalid_path(source, "unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Evaluate against an object.
    ///
    /// A template made of exactly one token yields the addressed value with its
    /// native type. Anything else is rendered and concatenated into a string.
    pub fn evaluate(&self, object: &Value) -> Result<Value> {
        if let [Segment::Path(path)] = self.segments.as_slice() {
            return path.lookup(object).cloned();
        }
        self.evaluate_string(object).map(Value::String)
    }

    /// Evaluate and always render the result as a string
    pub fn evaluate_string(&self, object: &Value) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Path(path) => out.push_str(&render(path.lookup(object)?)),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// String form of a resolved value: strings verbatim, everything else as compact JSON
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
