use super::schema::FeatureSchema;
use super::vector::FeatureVector;
use super::ArtifactError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

/// On-disk shape of the scoring artifact.
#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    model_type: Option<String>,
    intercept: f64,
    weights: BTreeMap<String, f64>,
}

const SUPPORTED_MODEL_TYPE: &str = "logistic_regression";

/// Pre-trained binary churn classifier.
///
/// Holds per-column weights aligned to the schema order plus an intercept;
/// `predict_distribution` answers the probability distribution over
/// {stay, churn} for one aligned row.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    schema: Arc<FeatureSchema>,
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Parse the scoring artifact and align its weights against the schema.
    /// Every schema column must carry a weight and every weight must name a
    /// schema column; a mismatch means the two artifacts drifted apart and
    /// is fatal.
    pub fn from_reader<R: Read>(
        reader: R,
        schema: &Arc<FeatureSchema>,
    ) -> Result<Self, ArtifactError> {
        let document: ModelDocument = serde_json::from_reader(reader)?;
        Self::from_document(document, schema)
    }

    pub fn from_path(
        path: impl AsRef<Path>,
        schema: &Arc<FeatureSchema>,
    ) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), schema)
    }

    fn from_document(
        document: ModelDocument,
        schema: &Arc<FeatureSchema>,
    ) -> Result<Self, ArtifactError> {
        if let Some(model_type) = document.model_type {
            if model_type != SUPPORTED_MODEL_TYPE {
                return Err(ArtifactError::UnsupportedModelType(model_type));
            }
        }

        let mut weights = vec![0.0; schema.len()];
        let mut covered = vec![false; schema.len()];
        for (column, weight) in document.weights {
            match schema.position(&column) {
                Some(index) => {
                    weights[index] = weight;
                    covered[index] = true;
                }
                None => return Err(ArtifactError::UnknownWeightColumn(column)),
            }
        }

        if let Some(index) = covered.iter().position(|seen| !seen) {
            return Err(ArtifactError::MissingWeight(
                schema.columns()[index].clone(),
            ));
        }

        Ok(Self {
            schema: Arc::clone(schema),
            weights,
            intercept: document.intercept,
        })
    }

    /// Illustrative weights paired with [`FeatureSchema::standard`], matching
    /// the checked-in baseline artifact under `model/`. Columns absent from
    /// the supplied schema simply do not contribute.
    pub fn baseline(schema: &Arc<FeatureSchema>) -> Self {
        const BASELINE_INTERCEPT: f64 = -1.2;
        const BASELINE_WEIGHTS: [(&str, f64); 12] = [
            ("Tenure_Months", -0.035),
            ("Monthly_Charges", 0.012),
            ("Contract_Month-to-month", 0.9),
            ("Contract_One year", -0.2),
            ("Contract_Two year", -1.1),
            ("Internet_Service_DSL", -0.1),
            ("Internet_Service_Fiber optic", 0.7),
            ("Internet_Service_No", -0.6),
            ("Payment_Method_Electronic check", 0.45),
            ("Payment_Method_Mailed check", 0.1),
            ("Payment_Method_Bank transfer (automatic)", -0.15),
            ("Payment_Method_Credit card (automatic)", -0.2),
        ];

        let mut weights = vec![0.0; schema.len()];
        for (column, weight) in BASELINE_WEIGHTS {
            if let Some(index) = schema.position(column) {
                weights[index] = weight;
            }
        }

        Self {
            schema: Arc::clone(schema),
            weights,
            intercept: BASELINE_INTERCEPT,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Probability distribution over {stay, churn} for one aligned row.
    ///
    /// A vector built against a different column set than the model was
    /// trained on is a drift the lenient builder could not protect against;
    /// it is surfaced here rather than swallowed.
    pub fn predict_distribution(&self, vector: &FeatureVector) -> Result<[f64; 2], ModelError> {
        if vector.schema() != self.schema.as_ref() {
            return Err(ModelError::ShapeMismatch {
                expected: self.schema.len(),
                actual: vector.schema().len(),
            });
        }

        let mut score = self.intercept;
        for (weight, value) in self.weights.iter().zip(vector.values()) {
            score += weight * value;
        }

        let churn = logistic(score);
        Ok([1.0 - churn, churn])
    }
}

fn logistic(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error(
        "feature vector does not match the trained column set \
         (model expects {expected} columns, vector carries {actual})"
    )]
    ShapeMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::super::domain::{ContractType, CustomerProfile, InternetService, PaymentMethod};
    use super::*;
    use std::io::Cursor;

    fn schema() -> Arc<FeatureSchema> {
        Arc::new(FeatureSchema::standard())
    }

    fn flat_model(schema: &Arc<FeatureSchema>, intercept: f64) -> LogisticModel {
        let weights = schema
            .columns()
            .iter()
            .map(|column| format!("\"{column}\": 0.0"))
            .collect::<Vec<_>>()
            .join(", ");
        let artifact = format!("{{\"intercept\": {intercept}, \"weights\": {{{weights}}}}}");
        LogisticModel::from_reader(Cursor::new(artifact), schema).expect("artifact parses")
    }

    fn profile() -> CustomerProfile {
        CustomerProfile::new(
            12,
            70,
            ContractType::MonthToMonth,
            InternetService::FiberOptic,
            PaymentMethod::ElectronicCheck,
        )
        .expect("profile within bounds")
    }

    #[test]
    fn zero_weights_and_intercept_predict_even_odds() {
        let schema = schema();
        let model = flat_model(&schema, 0.0);
        let vector = FeatureVector::align(&profile(), Arc::clone(&schema));

        let [stay, churn] = model.predict_distribution(&vector).expect("shapes match");
        assert!((churn - 0.5).abs() < 1e-12);
        assert!((stay + churn - 1.0).abs() < 1e-12);
    }

    #[test]
    fn large_negative_intercept_predicts_near_zero_churn() {
        let schema = schema();
        let model = flat_model(&schema, -10.0);
        let vector = FeatureVector::align(&profile(), Arc::clone(&schema));

        let [_, churn] = model.predict_distribution(&vector).expect("shapes match");
        assert!(churn < 0.001);
    }

    #[test]
    fn prediction_is_deterministic() {
        let schema = schema();
        let model = LogisticModel::baseline(&schema);
        let vector = FeatureVector::align(&profile(), Arc::clone(&schema));

        let first = model.predict_distribution(&vector).expect("shapes match");
        let second = model.predict_distribution(&vector).expect("shapes match");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_weight_for_unknown_column() {
        let schema = Arc::new(FeatureSchema::new(["Tenure_Months"]).expect("schema builds"));
        let artifact = r#"{"intercept": 0.0, "weights": {"Tenure_Months": 0.1, "Ghost": 1.0}}"#;
        let result = LogisticModel::from_reader(Cursor::new(artifact), &schema);
        assert!(matches!(
            result,
            Err(ArtifactError::UnknownWeightColumn(column)) if column == "Ghost"
        ));
    }

    #[test]
    fn rejects_schema_column_without_weight() {
        let schema = Arc::new(
            FeatureSchema::new(["Tenure_Months", "Monthly_Charges"]).expect("schema builds"),
        );
        let artifact = r#"{"intercept": 0.0, "weights": {"Tenure_Months": 0.1}}"#;
        let result = LogisticModel::from_reader(Cursor::new(artifact), &schema);
        assert!(matches!(
            result,
            Err(ArtifactError::MissingWeight(column)) if column == "Monthly_Charges"
        ));
    }

    #[test]
    fn rejects_unsupported_model_type() {
        let schema = Arc::new(FeatureSchema::new(["Tenure_Months"]).expect("schema builds"));
        let artifact =
            r#"{"model_type": "gradient_boosting", "intercept": 0.0, "weights": {"Tenure_Months": 0.1}}"#;
        let result = LogisticModel::from_reader(Cursor::new(artifact), &schema);
        assert!(matches!(
            result,
            Err(ArtifactError::UnsupportedModelType(kind)) if kind == "gradient_boosting"
        ));
    }

    #[test]
    fn shape_mismatch_is_surfaced_not_swallowed() {
        let schema = schema();
        let model = LogisticModel::baseline(&schema);

        let other_schema = Arc::new(
            FeatureSchema::new(["Tenure_Months", "Monthly_Charges"]).expect("schema builds"),
        );
        let vector = FeatureVector::align(&profile(), other_schema);

        let result = model.predict_distribution(&vector);
        assert_eq!(
            result,
            Err(ModelError::ShapeMismatch {
                expected: 12,
                actual: 2
            })
        );
    }
}
