//! CLI error type and exit-code mapping.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] casona_config::ConfigError),

    #[error("store error: {0}")]
    Store(#[from] casona_store::StoreError),

    #[error("{message}")]
    #[diagnostic(help("{help}"))]
    Unavailable { message: String, help: String },
}

impl CliError {
    /// Stable exit codes: 2 config, 3 store/network, 1 everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Store(_) => 3,
            Self::Unavailable { .. } => 1,
        }
    }
}
