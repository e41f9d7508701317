//! Metric definitions attached to semantic models.

use crate::metric_name::MetricName;
use crate::model_name::ModelName;
use serde::{Deserialize, Serialize};

/// Aggregation applied by a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCalculation {
    /// Sum aggregation
    Sum,
    /// Count aggregation
    Count,
    /// Average aggregation
    Avg,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Count distinct values
    CountDistinct,
}

impl std::fmt::Display for MetricCalculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MetricCalculation::Sum => "SUM",
            MetricCalculation::Count => "COUNT",
            MetricCalculation::Avg => "AVG",
            MetricCalculation::Min => "MIN",
            MetricCalculation::Max => "MAX",
            MetricCalculation::CountDistinct => "COUNT_DISTINCT",
        };
        write!(f, "{}", s)
    }
}

/// A validated top-level metric from the manifest.
///
/// Raw metric nodes only become `Metric` values after passing the metric
/// schema document; there is no partially-validated form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Unique identifier from the manifest
    pub unique_id: String,
    /// Metric name
    pub name: MetricName,
    /// The model this metric is defined on
    pub model: ModelName,
    /// Aggregation function to apply
    pub calculation: MetricCalculation,
    /// Column the aggregation is applied to
    pub column: String,
    /// Human-readable label
    #[serde(default)]
    pub label: Option<String>,
    /// Description of what the metric measures
    #[serde(default)]
    pub description: Option<String>,
}

impl Metric {
    /// Get the human-readable label, falling back to the name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.name.as_str())
    }
}
