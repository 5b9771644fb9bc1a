//! Inference failures.
//!
//! Only two conditions abort an inference call; everything else (empty
//! arrays, all-null arrays, duplicate names) drops the field instead.
use thiserror::Error;

use crate::inference::Tag;
use crate::schema::PrimitiveKind;

pub type Result<T, E = InferenceError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("field `{path}` is not a homogeneous array ({conflict})")]
    InconsistentArrayType { path: String, conflict: ArrayConflict },

    #[error("array `{path}` has unrecognized member schema ({member} elements)")]
    UnrecognizedArrayMember { path: String, member: Tag },
}

/// What broke homogeneity, relative to the array's representative element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayConflict {
    #[error("{reference} x {found}")]
    Tag { reference: String, found: Tag },

    #[error("{reference} x {found}, different number types ({reference_kind} x {found_kind})")]
    Number {
        reference: String,
        found: String,
        reference_kind: PrimitiveKind,
        found_kind: PrimitiveKind,
    },
}

impl InferenceError {
    /// Stable identifier, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InconsistentArrayType { .. } => "inconsistent_array_type",
            Self::UnrecognizedArrayMember { .. } => "unrecognized_array_member",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::InconsistentArrayType { path, .. }
            | Self::UnrecognizedArrayMember { path, .. } => path,
        }
    }
}
