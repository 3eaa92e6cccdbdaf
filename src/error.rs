use thiserror::Error;

/// Errors returned by the trees, the probing table and the trading layer.
///
/// Keys are stored in their `Debug` rendering so the error stays free of the
/// container's type parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("key {0} is already present")]
    DuplicateKey(String),

    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("table is full ({table_size} slots occupied)")]
    TableFull { table_size: usize },
}

impl Error {
    pub(crate) fn duplicate_key<K: std::fmt::Debug>(key: &K) -> Self {
        Error::DuplicateKey(format!("{key:?}"))
    }

    pub(crate) fn key_not_found<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Error::KeyNotFound(format!("{key:?}"))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
