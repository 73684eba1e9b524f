use serde::Serialize;
use thiserror::Error;

/// Structured error returned to callers on a rejected operation.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `BLANK_CRITERIA`, `INVALID_TOTAL`,
    /// `VALIDATION_ERROR`, `CONFLICT`, `PERMISSION_DENIED`, `NOT_FOUND`.
    #[schema(example = "INVALID_TOTAL")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Criteria must have an exact total of 100%")]
    pub message: String,
}

/// Domain-level error type.
///
/// Every variant is recoverable by editing the input; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TallyError {
    /// A criterion has a blank title or a zero weight.
    #[error("Criteria are required")]
    BlankCriteria,
    /// Criteria weights do not add up to 100.
    #[error("Criteria must have an exact total of 100% (got {total})")]
    InvalidTotal { total: f64 },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Insufficient permissions")]
    PermissionDenied,
    #[error("{0}")]
    NotFound(String),
}

impl TallyError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankCriteria => "BLANK_CRITERIA",
            Self::InvalidTotal { .. } => "INVALID_TOTAL",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<TallyError> for ErrorBody {
    fn from(err: TallyError) -> Self {
        let message = match &err {
            TallyError::InvalidTotal { .. } => "Criteria must have an exact total of 100%".into(),
            other => other.to_string(),
        };
        Self {
            code: err.code(),
            message,
        }
    }
}
