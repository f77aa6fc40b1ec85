pub mod domain;
mod model;
mod schema;
mod service;
mod vector;

pub use model::{LogisticModel, ModelError};
pub use schema::FeatureSchema;
pub use service::{ChurnScoringService, ScoringError};
pub use vector::FeatureVector;

/// Failure while loading one of the two classifier artifacts. Always fatal
/// at startup: the service has no partial-functionality mode without them.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feature column list is empty")]
    EmptySchema,
    #[error("feature column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("unsupported model type '{0}'")]
    UnsupportedModelType(String),
    #[error("model weight references unknown column '{0}'")]
    UnknownWeightColumn(String),
    #[error("no weight provided for feature column '{0}'")]
    MissingWeight(String),
}
