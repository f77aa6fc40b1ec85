use super::domain::CustomerProfile;
use super::schema::FeatureSchema;
use std::sync::Arc;
use tracing::debug;

/// One scoring row whose key set is always exactly the schema's key set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Arc<FeatureSchema>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeroed(schema: Arc<FeatureSchema>) -> Self {
        let values = vec![0.0; schema.len()];
        Self { schema, values }
    }

    /// Align a customer profile onto the schema.
    ///
    /// Numeric fields bind to their column by name; each categorical option
    /// binds its one-hot column to 1. An input whose column is absent from
    /// the schema is dropped without error — the row still covers exactly
    /// the schema's columns, with that column left at 0.
    pub fn align(profile: &CustomerProfile, schema: Arc<FeatureSchema>) -> Self {
        let mut vector = Self::zeroed(schema);
        vector.set_if_present("Tenure_Months", f64::from(profile.tenure_months));
        vector.set_if_present("Monthly_Charges", f64::from(profile.monthly_charges));
        vector.set_if_present(profile.contract.schema_column(), 1.0);
        vector.set_if_present(profile.internet_service.schema_column(), 1.0);
        vector.set_if_present(profile.payment_method.schema_column(), 1.0);
        vector
    }

    fn set_if_present(&mut self, column: &str, value: f64) {
        match self.schema.position(column) {
            Some(index) => self.values[index] = value,
            None => {
                // Deliberate no-op: a schema that evolved away from this
                // column silently drops the input instead of failing.
                debug!(column, "feature column absent from schema, input dropped");
            }
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema
            .position(column)
            .map(|index| self.values[index])
    }
}
