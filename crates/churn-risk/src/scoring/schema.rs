use super::ArtifactError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Ordered list of feature columns the classifier was trained against.
///
/// Produced by the out-of-scope training process and consumed read-only. The
/// order fixes the weight-vector alignment; lookups are by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new<I, S>(columns: I) -> Result<Self, ArtifactError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            if positions.insert(name.clone(), index).is_some() {
                return Err(ArtifactError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, positions })
    }

    /// Parse the feature-columns artifact: a JSON array of column names.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let columns: Vec<String> = serde_json::from_reader(reader)?;
        Self::new(columns)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// The column set the baseline telco artifact under `model/` was trained
    /// with: the two numeric fields plus one column per categorical option.
    pub fn standard() -> Self {
        use super::domain::{ContractType, InternetService, PaymentMethod};

        let mut columns = vec!["Tenure_Months".to_string(), "Monthly_Charges".to_string()];
        columns.extend(
            ContractType::ordered()
                .into_iter()
                .map(|option| option.schema_column().to_string()),
        );
        columns.extend(
            InternetService::ordered()
                .into_iter()
                .map(|option| option.schema_column().to_string()),
        );
        columns.extend(
            PaymentMethod::ordered()
                .into_iter()
                .map(|option| option.schema_column().to_string()),
        );

        Self::new(columns).expect("baseline column set is non-empty and unique")
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
