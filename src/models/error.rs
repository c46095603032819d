use thiserror::Error;

/// Failure categories understood by the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("CSV file not found")]
    Missing,

    #[error("No data available")]
    Empty,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Missing | StoreError::Empty => ErrorKind::NotFound,
            StoreError::Io(_) | StoreError::Csv(_) => ErrorKind::Io,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Store(e) => e.kind(),
        }
    }
}
