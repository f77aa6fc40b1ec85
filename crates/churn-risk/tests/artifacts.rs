use churn_risk::scoring::{ArtifactError, ChurnScoringService, FeatureSchema};
use std::path::{Path, PathBuf};

fn artifact_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../model")
        .join(name)
}

#[test]
fn checked_in_baseline_artifacts_load() {
    let service = ChurnScoringService::from_artifacts(
        artifact_path("feature_columns.json"),
        artifact_path("churn_model.json"),
    )
    .expect("baseline artifacts load");

    assert_eq!(service.schema().len(), 12);
    assert!(service.schema().contains("Payment_Method_Electronic check"));
}

#[test]
fn checked_in_columns_match_the_standard_schema() {
    let loaded =
        FeatureSchema::from_path(artifact_path("feature_columns.json")).expect("columns load");
    assert_eq!(loaded, FeatureSchema::standard());
}

#[test]
fn missing_artifact_is_fatal_with_a_clear_diagnostic() {
    let result = ChurnScoringService::from_artifacts(
        artifact_path("no_such_columns.json"),
        artifact_path("churn_model.json"),
    );

    match result {
        Err(ArtifactError::Io { path, .. }) => {
            assert!(path.contains("no_such_columns.json"));
        }
        other => panic!("expected io artifact error, got {other:?}"),
    }
}

#[test]
fn model_trained_against_different_columns_is_rejected_at_load() {
    // Columns artifact trimmed to a subset the model does not match.
    let schema = std::sync::Arc::new(
        FeatureSchema::new(["Tenure_Months", "Monthly_Charges"]).expect("schema builds"),
    );
    let result =
        churn_risk::scoring::LogisticModel::from_path(artifact_path("churn_model.json"), &schema);

    assert!(matches!(
        result,
        Err(ArtifactError::UnknownWeightColumn(_))
    ));
}
