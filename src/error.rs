//! Error types

use thiserror::Error;

/// Soft failure raised when a non-scalar value is assigned as a node label.
///
/// The node keeps its previous label; nothing in this crate escalates the
/// rejection. The host pipeline decides whether to treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label must be a scalar or null value, got {kind}")]
    NotScalar { kind: &'static str },
}
