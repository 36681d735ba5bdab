use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::ForecastError;
use crate::network::template::ModelTemplate;
use crate::predictor::heuristics::repeat_count;

/// How a sequence should be interpreted.
///
/// Each kind carries a fixed template; `Boolean` additionally sizes its input
/// window from the repeat pattern of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Approximately binary / repeating signal; outputs are 0 or 1.
    Boolean,
    /// Continuous values.
    Double,
    /// Monotonic series such as timestamps; the deltas are modelled.
    DoubleTimestamp,
    /// Anything else: a single-input linear unit.
    Other,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Boolean,
        ModelKind::Double,
        ModelKind::DoubleTimestamp,
        ModelKind::Other,
    ];

    pub fn template(&self, sequence: &[f64]) -> ModelTemplate {
        match self {
            ModelKind::Boolean => {
                ModelTemplate::new(vec![repeat_count(sequence) + 1, 1], 0.5, 5000)
            }
            ModelKind::Double => ModelTemplate::new(vec![4, 3, 1], 0.000135, 65000),
            ModelKind::DoubleTimestamp => ModelTemplate::new(vec![3, 6, 1], 0.02, 20000),
            ModelKind::Other => ModelTemplate::new(vec![1, 1], 0.05, 1000),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ModelKind::Boolean)
    }

    pub fn activation(&self) -> ActivationFunction {
        ActivationFunction::for_mode(self.is_boolean())
    }

    /// Whether the network is trained on consecutive differences.
    pub fn uses_deltas(&self) -> bool {
        matches!(self, ModelKind::DoubleTimestamp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Boolean => "boolean",
            ModelKind::Double => "double",
            ModelKind::DoubleTimestamp => "double_timestamp",
            ModelKind::Other => "other",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "boolean" | "bool" => Ok(ModelKind::Boolean),
            "double" => Ok(ModelKind::Double),
            "double_timestamp" | "timestamp" => Ok(ModelKind::DoubleTimestamp),
            "other" | "default" => Ok(ModelKind::Other),
            _ => Err(ForecastError::UnknownMode(s.to_string())),
        }
    }
}
