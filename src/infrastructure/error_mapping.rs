use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::debug;

use crate::domain::errors::DomainError;

// Store errors are translated here and nowhere else.

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        if let DieselError::DatabaseError(kind, info) = &e {
            debug!("database error {:?}: {}", kind, info.message());
        }

        match e {
            DieselError::NotFound => DomainError::NoRows,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::AlreadyExists(unique_entity(info.table_name()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                DomainError::ForeignKeyViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                DomainError::ConstraintViolation(
                    info.constraint_name().unwrap_or("check").to_string(),
                )
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for DomainError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        DomainError::Internal(e.to_string())
    }
}

fn unique_entity(table: Option<&str>) -> &'static str {
    match table {
        Some("users") => "user",
        Some("categories") => "category",
        Some("products") => "product",
        _ => "record",
    }
}
