//! Planner error types
//!
//! Error codes:
//! - KEYPLANE_UNSUPPORTED_OPERATOR (query aborted, surfaced to caller)

use thiserror::Error;

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors raised while resolving predicates or planning a query
///
/// Plan-time failures abort the query before any request is built; the
/// planner mutates nothing on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// Predicate uses an operator outside the comparison table
    #[error("unsupported operator '{operator}'")]
    UnsupportedOperator { operator: String },
}

impl PlannerError {
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    /// Returns the stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            PlannerError::UnsupportedOperator { .. } => "KEYPLANE_UNSUPPORTED_OPERATOR",
        }
    }
}
