use thiserror::Error;

use crate::domain::customer::CustomerId;

/// Typed failures raised by the command/query handlers. The HTTP boundary
/// maps each variant to a status code, domain-specific variants first.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("customer `{0}` was not found")]
    NotFound(CustomerId),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::customer::CustomerId;

    use super::ServiceError;

    #[test]
    fn not_found_names_the_missing_id() {
        let error = ServiceError::NotFound(CustomerId(41));
        assert_eq!(error.to_string(), "customer `41` was not found");
    }

    #[test]
    fn conflict_carries_the_storage_message() {
        let error = ServiceError::conflict("UNIQUE constraint failed: customers.tax_id");
        assert!(error.to_string().contains("customers.tax_id"));
    }
}
