//! Single-document schema inference.
//!
//! Walk one parsed JSON document and derive a structural, strongly-typed
//! schema for it. Pure recursive descent over the value tree: no state
//! survives a call, so concurrent calls on distinct documents are safe.
//!
//! Rules, in short:
//! - Every schema produced is optional; one document proves nothing about presence.
//! - Numbers resolve to the narrowest of int32 / int64 / float64.
//! - Arrays must be homogeneous (nulls skipped); arrays of objects merge into one union struct.
//! - Fields whose type cannot be inferred (null, empty array) are dropped, not errors.
pub mod num;
pub mod arr;
pub mod obj;

use std::fmt;
use serde_json::Value;

use crate::error::Result;
use crate::schema::{PrimitiveKind, Schema};

pub use num::classify_number;

/// Path label of the document root in error messages.
pub const ROOT_PATH: &str = "$";

// ------------------------------- Tags ------------------------------------- //

/// JSON value tag, used for array homogeneity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag { Null, Boolean, Number, String, Array, Object }

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Boolean => "boolean",
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Object => "object",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn tag_of(v: &Value) -> Tag {
    match v {
        Value::Null      => Tag::Null,
        Value::Bool(_)   => Tag::Boolean,
        Value::Number(_) => Tag::Number,
        Value::String(_) => Tag::String,
        Value::Array(_)  => Tag::Array,
        Value::Object(_) => Tag::Object,
    }
}

/// Short human description of a value for error messages.
pub(crate) fn describe(v: &Value) -> String {
    const MAX_CHARS: usize = 40;
    match v {
        Value::Array(_) | Value::Object(_) => tag_of(v).name().to_owned(),
        _ => {
            let text = v.to_string();
            if text.chars().count() > MAX_CHARS {
                let head: String = text.chars().take(MAX_CHARS).collect();
                format!("{head}…")
            } else {
                text
            }
        }
    }
}

// ------------------------------ Resolve ----------------------------------- //

/// Scalar → primitive schema. `None` for null and composite values.
pub fn scalar_to_schema(v: &Value) -> Option<Schema> {
    let kind = match v {
        Value::String(_) => PrimitiveKind::String,
        Value::Bool(_) => PrimitiveKind::Boolean,
        Value::Number(n) => classify_number(n),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    Some(Schema::optional_primitive(kind))
}

/// Schema of any nested value; `Ok(None)` means the field is dropped.
pub(crate) fn value_to_schema(v: &Value, path: &str) -> Result<Option<Schema>> {
    match v {
        Value::Array(xs) => arr::array_schema(xs, path),
        Value::Object(map) => obj::build_struct(map, path).map(Some),
        _ => Ok(scalar_to_schema(v)),
    }
}

// ------------------------------- Front API -------------------------------- //

/// Infer the schema of one document.
///
/// `Value::Null` stands for an absent document and yields an empty optional
/// struct. Top-level scalars and arrays are not inferred either; they also
/// yield the empty struct.
pub fn infer_schema(document: &Value) -> Result<Schema> {
    match document {
        Value::Object(map) => obj::build_struct(map, ROOT_PATH),
        Value::Null => Ok(Schema::empty_struct()),
        other => {
            tracing::debug!(root = %tag_of(other), "non-object document root; inferring empty struct");
            Ok(Schema::empty_struct())
        }
    }
}

/// Nesting depth of a document (a scalar is depth 0, `{}` and `[]` are 1).
///
/// Iterative, so it is safe to call on documents too deep for the
/// recursive inference itself.
pub fn nesting_depth(document: &Value) -> usize {
    let mut max = 0;
    let mut stack = vec![(document, 0usize)];
    while let Some((v, depth)) = stack.pop() {
        let depth = depth + 1;
        match v {
            Value::Array(xs) => stack.extend(xs.iter().map(|c| (c, depth))),
            Value::Object(map) => stack.extend(map.values().map(|c| (c, depth))),
            _ => continue,
        }
        max = max.max(depth);
    }
    max
}


// ------------------------------- Tests ------------------------------------ //
