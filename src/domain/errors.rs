use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A query matched no rows. Services rename this into [`DomainError::NotFound`].
    #[error("no rows")]
    NoRows,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("foreign key violated")]
    ForeignKeyViolation,
    #[error("{0} constraint violated")]
    ConstraintViolation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest(reason.into())
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn internal(reason: impl ToString) -> Self {
        Self::Internal(reason.to_string())
    }

    /// Rename an empty result into a not-found error for `entity`.
    pub fn or_not_found(self, entity: &'static str) -> Self {
        match self {
            Self::NoRows => Self::NotFound(entity),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_becomes_named_not_found() {
        let err = DomainError::NoRows.or_not_found("product");
        assert_eq!(err, DomainError::NotFound("product"));
        assert_eq!(err.to_string(), "product not found");
    }

    #[test]
    fn other_errors_pass_through_or_not_found() {
        let err = DomainError::ForeignKeyViolation.or_not_found("order");
        assert_eq!(err, DomainError::ForeignKeyViolation);
    }

    #[test]
    fn constraint_violation_display_names_the_constraint() {
        assert_eq!(
            DomainError::ConstraintViolation("stock".to_string()).to_string(),
            "stock constraint violated"
        );
    }
}
