// src/corridor/error.rs
use super::connector::ConnectorClass;

/// Everything `initialize` / `tick` can fail with. None of these are retried internally.
#[derive(thiserror::Error, Debug)]
pub enum CorridorError {
    #[error("no template in the catalog starts with connector {required}")]
    EmptyCatalogSubset { required: ConnectorClass },
    #[error("corridor configuration error: {0}")]
    Configuration(String),
    #[error("payload instantiation failed: {0}")]
    PayloadInstantiation(#[from] PayloadError),
    #[error("corridor ticked before initialize()")]
    NotInitialized,
}

/// Failure reported by a host payload factory.
#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("template '{template}' needs assets but no AssetServer is available")]
    AssetServerUnavailable { template: String },
    #[error("payload rejected: {0}")]
    Rejected(String),
}
