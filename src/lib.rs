//! Infer Connect-style struct schemas from JSON documents.
//!
//! ```
//! use serde_json::json;
//!
//! let schema = outbox_schema::infer_schema(&json!({"id": 5, "tags": ["a", null]})).unwrap();
//! assert_eq!(schema.to_string(), "struct{id: int32, tags: array<string>}");
//! ```
pub mod schema;
pub mod error;
pub mod inference;
pub mod emit;
pub mod cli;
pub mod jq_exec;

pub use error::{ArrayConflict, InferenceError};
pub use inference::{infer_schema, nesting_depth};
pub use schema::{Field, PrimitiveKind, Schema, StructBuilder};
