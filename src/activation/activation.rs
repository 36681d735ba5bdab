use serde::{Serialize, Deserialize};

/// Element-wise activation applied by every layer of a network.
///
/// A whole forward pass uses one activation: `Sigmoid` when the signal is
/// treated as boolean, `ReLU` for continuous values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// `1 / (1 + e^-x)`, bounded to (0, 1).
    Sigmoid,
    /// `x` for `x >= 0`, otherwise `0`.
    #[serde(rename = "relu")]
    ReLU,
}

impl ActivationFunction {
    pub fn for_mode(is_boolean: bool) -> ActivationFunction {
        if is_boolean {
            ActivationFunction::Sigmoid
        } else {
            ActivationFunction::ReLU
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => if x < 0.0 { 0.0 } else { x },
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ActivationFunction::Sigmoid)
    }
}
