use super::domain::{ChurnAssessment, CustomerProfile, ProfileError, RiskTier};
use super::model::{LogisticModel, ModelError};
use super::schema::FeatureSchema;
use super::vector::FeatureVector;
use super::ArtifactError;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Composes the vector builder, classifier, and tier bucketer behind one
/// call. Built once at startup from the two artifacts and shared read-only;
/// every assessment reconstructs its feature vector fresh.
#[derive(Debug)]
pub struct ChurnScoringService {
    schema: Arc<FeatureSchema>,
    model: LogisticModel,
}

impl ChurnScoringService {
    pub fn new(schema: Arc<FeatureSchema>, model: LogisticModel) -> Self {
        Self { schema, model }
    }

    /// Load both artifacts from disk. Any failure here is startup-fatal:
    /// the service cannot score without them.
    pub fn from_artifacts(
        feature_columns_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, ArtifactError> {
        let schema = Arc::new(FeatureSchema::from_path(feature_columns_path)?);
        let model = LogisticModel::from_path(model_path, &schema)?;
        Ok(Self::new(schema, model))
    }

    /// In-memory service backed by the baseline telco artifact. Used by the
    /// demo command and tests; no disk access.
    pub fn baseline() -> Self {
        let schema = Arc::new(FeatureSchema::standard());
        let model = LogisticModel::baseline(&schema);
        Self::new(schema, model)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Run the full pipeline for one profile: validate, align, score, bucket.
    pub fn assess(&self, profile: &CustomerProfile) -> Result<ChurnAssessment, ScoringError> {
        profile.validate()?;

        let vector = FeatureVector::align(profile, Arc::clone(&self.schema));
        let [_, churn_probability] = self.model.predict_distribution(&vector)?;
        let tier = RiskTier::from_probability(churn_probability);

        debug!(
            probability = churn_probability,
            tier = tier.label(),
            "assessment complete"
        );

        Ok(ChurnAssessment {
            probability: churn_probability,
            tier,
            recommendation: tier.recommendation(),
            generated_at: Utc::now(),
        })
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
