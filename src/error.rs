//! Process-level error: everything that ends the program.

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("{0}")]
    Setup(String),
}
