use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

pub mod categories;
pub mod products;
pub mod tags;

/// Errors returned by the catalog services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The request payload was rejected.
    #[error("{0}")]
    Validation(String),
    /// The persistence layer failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Record not found".to_string()),
            other => ServiceError::Repository(other),
        }
    }
}

/// Replaces a bare `NotFound` from the repository with a resource specific message.
pub(crate) fn not_found_as(
    message: impl Into<String>,
) -> impl FnOnce(RepositoryError) -> ServiceError {
    let message = message.into();
    move |err| match err {
        RepositoryError::NotFound => ServiceError::NotFound(message),
        other => ServiceError::Repository(other),
    }
}
