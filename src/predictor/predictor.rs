use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

use tracing::info;

use crate::error::{ForecastError, Result};
use crate::network::template::ModelTemplate;
use crate::predictor::heuristics::{has_at_most_two_distinct, nearest_value_correction, round_to_millis};
use crate::predictor::mode::ModelKind;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;

/// Shortest sequence every model kind can window.
pub const MIN_SAMPLES: usize = 4;

/// Trains a fresh network on `sequence` and predicts the next `steps` values,
/// each rounded to three decimal places.
pub fn predict(sequence: &[f64], steps: usize, kind: ModelKind) -> Result<Vec<f64>> {
    Predictor::new(kind).predict(sequence, steps)
}

/// Configurable entry point behind [`predict`].
///
/// By default the template is chosen from the model kind. A custom template
/// replaces the architecture and hyperparameters only; the kind still decides
/// the activation, delta modelling, correction and rounding.
#[derive(Debug, Clone)]
pub struct Predictor {
    kind: ModelKind,
    template: Option<ModelTemplate>,
    parallel: bool,
    progress_tx: Option<mpsc::Sender<IterationStats>>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Predictor {
    pub fn new(kind: ModelKind) -> Predictor {
        Predictor {
            kind,
            template: None,
            parallel: false,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_template(mut self, template: ModelTemplate) -> Predictor {
        self.template = Some(template);
        self
    }

    /// Estimate gradients on the rayon pool. Predictions agree with the
    /// sequential run up to floating-point rounding, not bit for bit.
    pub fn parallel(mut self, parallel: bool) -> Predictor {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<IterationStats>) -> Predictor {
        self.progress_tx = Some(tx);
        self
    }

    /// Setting the flag ends training early; prediction continues with the
    /// parameters reached so far.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Predictor {
        self.stop_flag = Some(flag);
        self
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn template_for(&self, sequence: &[f64]) -> ModelTemplate {
        self.template
            .clone()
            .unwrap_or_else(|| self.kind.template(sequence))
    }

    pub fn predict(&self, sequence: &[f64], steps: usize) -> Result<Vec<f64>> {
        check_preconditions(sequence, steps)?;

        let template = self.template_for(sequence);
        info!(
            kind = %self.kind,
            sizes = ?template.layer_sizes,
            learning_rate = template.learning_rate,
            iterations = template.iterations,
            "template selected"
        );

        let mut network = template.build_network()?;
        let optimizer = template.optimizer();
        let config = TrainConfig {
            parallel: self.parallel,
            progress_tx: self.progress_tx.clone(),
            stop_flag: self.stop_flag.clone(),
            ..template.train_config(self.kind.activation())
        };

        let mut predictions = if self.kind.uses_deltas() {
            network.predict_timestamp_with(sequence, steps, &optimizer, &config)?
        } else {
            network.predict_with(sequence, steps, &optimizer, &config)?
        };

        if self.kind == ModelKind::Double && has_at_most_two_distinct(sequence) {
            info!("two-valued sequence, snapping predictions to observed values");
            nearest_value_correction(&mut predictions, sequence);
        }

        Ok(predictions.into_iter().map(round_to_millis).collect())
    }
}

fn check_preconditions(sequence: &[f64], steps: usize) -> Result<()> {
    if steps == 0 {
        return Err(ForecastError::InvalidSteps);
    }
    if sequence.len() < MIN_SAMPLES {
        return Err(ForecastError::InsufficientData {
            needed: MIN_SAMPLES,
            got: sequence.len(),
        });
    }
    if let Some((index, &value)) = sequence.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ForecastError::NonFiniteInput { index, value });
    }
    Ok(())
}
