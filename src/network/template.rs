use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{ForecastError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::train_config::TrainConfig;

/// Architecture plus training hyperparameters for one prediction run.
///
/// A template is fixed once chosen; every prediction builds a fresh
/// [`Network`] from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTemplate {
    /// Width of every layer boundary, input first, e.g. `[4, 3, 1]`.
    pub layer_sizes: Vec<usize>,
    pub learning_rate: f64,
    pub iterations: usize,
}

impl ModelTemplate {
    pub fn new(layer_sizes: Vec<usize>, learning_rate: f64, iterations: usize) -> ModelTemplate {
        ModelTemplate { layer_sizes, learning_rate, iterations }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(ForecastError::InvalidHyperparameter(format!(
                "learning rate must be finite and non-negative, got {}",
                self.learning_rate
            )));
        }
        // Architecture problems are reported by `Network::new`.
        Ok(())
    }

    pub fn build_network(&self) -> Result<Network> {
        self.validate()?;
        Network::new(&self.layer_sizes)
    }

    pub fn optimizer(&self) -> Sgd {
        Sgd::new(self.learning_rate)
    }

    pub fn train_config(&self, activation: ActivationFunction) -> TrainConfig {
        TrainConfig::new(self.iterations, activation)
    }

    /// Serializes the template to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a template from a JSON file.
    pub fn load_json(path: &str) -> Result<ModelTemplate> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let template: ModelTemplate = serde_json::from_reader(reader)?;
        template.validate()?;
        Ok(template)
    }
}
