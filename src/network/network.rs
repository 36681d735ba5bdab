use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::data::window::{accumulate_deltas, delta_transform, window_inputs, window_outputs};
use crate::error::{ForecastError, Result};
use crate::layers::dense::Layer;
use crate::loss::l1::L1Loss;
use crate::network::template::ModelTemplate;
use crate::optim::sgd::Sgd;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Address of a single trainable parameter inside a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Weight { layer: usize, input: usize, output: usize },
    Bias { layer: usize, output: usize },
}

/// Ordered stack of dense layers where each layer's output width equals the
/// next layer's input width.
///
/// [`Network::new`] is the only way to build one, so the stack is never empty
/// and the widths always chain:
///
/// ```compile_fail
/// let network = nn_forecast::Network { layers: Vec::new() };
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) layers: Vec<Layer>,
}

impl Network {
    /// Builds one layer per adjacent pair of `layer_sizes`.
    pub fn new(layer_sizes: &[usize]) -> Result<Network> {
        if layer_sizes.len() < 2 {
            return Err(ForecastError::InvalidArchitecture(format!(
                "need at least two layer sizes, got {layer_sizes:?}"
            )));
        }
        if let Some(pos) = layer_sizes.iter().position(|&s| s == 0) {
            return Err(ForecastError::InvalidArchitecture(format!(
                "layer size at position {pos} is zero in {layer_sizes:?}"
            )));
        }

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;

        let network = Network { layers };
        debug!(
            sizes = ?layer_sizes,
            parameters = network.parameter_count(),
            "network constructed"
        );
        Ok(network)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Every parameter, layer by layer: all weights (row-major) then all biases.
    pub fn params(&self) -> Vec<Param> {
        let mut params = Vec::with_capacity(self.parameter_count());
        for (l, layer) in self.layers.iter().enumerate() {
            for input in 0..layer.input_size() {
                for output in 0..layer.size() {
                    params.push(Param::Weight { layer: l, input, output });
                }
            }
            for output in 0..layer.size() {
                params.push(Param::Bias { layer: l, output });
            }
        }
        params
    }

    pub fn param(&self, param: Param) -> f64 {
        match param {
            Param::Weight { layer, input, output } => self.layers[layer].weight(input, output),
            Param::Bias { layer, output } => self.layers[layer].bias(output),
        }
    }

    pub fn set_param(&mut self, param: Param, value: f64) {
        match param {
            Param::Weight { layer, input, output } => {
                self.layers[layer].set_weight(input, output, value)
            }
            Param::Bias { layer, output } => self.layers[layer].set_bias(output, value),
        }
    }

    pub fn set_gradient(&mut self, param: Param, gradient: f64) {
        match param {
            Param::Weight { layer, input, output } => {
                self.layers[layer].set_weight_gradient(input, output, gradient)
            }
            Param::Bias { layer, output } => self.layers[layer].set_bias_gradient(output, gradient),
        }
    }

    /// Forward pass through every layer with a single activation.
    pub fn forward(&self, input: &[f64], activation: ActivationFunction) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(ForecastError::ShapeMismatch {
                context: "network input",
                expected: self.input_size(),
                got: input.len(),
            });
        }
        Ok(self.feed(input, activation))
    }

    pub(crate) fn feed(&self, input: &[f64], activation: ActivationFunction) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current, activation);
        }
        current
    }

    /// Mean over rows of the summed per-unit L1 cost.
    ///
    /// Callers must pass matching, non-empty row sets of the right widths.
    pub fn cost(
        &self,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        activation: ActivationFunction,
    ) -> f64 {
        let total: f64 = inputs
            .iter()
            .zip(expected.iter())
            .map(|(input, target)| L1Loss::sample_cost(&self.feed(input, activation), target))
            .sum();
        total / inputs.len() as f64
    }

    /// Trains in place with finite-difference gradients; returns the final mean cost.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        learning_rate: f64,
        iterations: usize,
        activation: ActivationFunction,
    ) -> Result<f64> {
        let config = TrainConfig::new(iterations, activation);
        train_loop(self, inputs, expected, &Sgd::new(learning_rate), &config)
    }

    /// Trains on `sequence` with `template`'s hyperparameters, then rolls out
    /// `steps` predictions.
    pub fn predict(
        &mut self,
        sequence: &[f64],
        steps: usize,
        template: &ModelTemplate,
        is_boolean: bool,
    ) -> Result<Vec<f64>> {
        let config = template.train_config(ActivationFunction::for_mode(is_boolean));
        self.predict_with(sequence, steps, &template.optimizer(), &config)
    }

    /// Like [`Network::predict`], but models the deltas between consecutive
    /// values and returns absolute values accumulated from the last sample.
    pub fn predict_timestamp(
        &mut self,
        sequence: &[f64],
        steps: usize,
        template: &ModelTemplate,
        is_boolean: bool,
    ) -> Result<Vec<f64>> {
        let config = template.train_config(ActivationFunction::for_mode(is_boolean));
        self.predict_timestamp_with(sequence, steps, &template.optimizer(), &config)
    }

    pub fn predict_with(
        &mut self,
        sequence: &[f64],
        steps: usize,
        optimizer: &Sgd,
        config: &TrainConfig,
    ) -> Result<Vec<f64>> {
        self.fit_and_rollout(sequence, steps, optimizer, config)
    }

    pub fn predict_timestamp_with(
        &mut self,
        sequence: &[f64],
        steps: usize,
        optimizer: &Sgd,
        config: &TrainConfig,
    ) -> Result<Vec<f64>> {
        let last = *sequence.last().ok_or(ForecastError::EmptyDataset)?;
        let deltas = delta_transform(sequence);
        let predicted = self.fit_and_rollout(&deltas, steps, optimizer, config)?;
        Ok(accumulate_deltas(last, &predicted))
    }

    fn fit_and_rollout(
        &mut self,
        series: &[f64],
        steps: usize,
        optimizer: &Sgd,
        config: &TrainConfig,
    ) -> Result<Vec<f64>> {
        if steps == 0 {
            return Err(ForecastError::InvalidSteps);
        }

        let inputs = window_inputs(series, self.input_size());
        let mut expected = window_outputs(series, self.output_size());
        if inputs.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }
        // Output windows past the last input window have no partner.
        if expected.len() < inputs.len() {
            return Err(ForecastError::ShapeMismatch {
                context: "output windows",
                expected: inputs.len(),
                got: expected.len(),
            });
        }
        expected.truncate(inputs.len());

        train_loop(self, &inputs, &expected, optimizer, config)?;

        let seed = inputs[inputs.len() - 1].clone();
        Ok(self.rollout(seed, steps, config.activation))
    }

    /// Autoregressive prediction: the first output unit of each step is
    /// appended to the window, which then slides left by one.
    ///
    /// With a sigmoid activation the output is thresholded to `0` or `1`.
    pub fn rollout(
        &self,
        mut window: Vec<f64>,
        steps: usize,
        activation: ActivationFunction,
    ) -> Vec<f64> {
        let mut predictions = Vec::with_capacity(steps);
        for _ in 0..steps {
            let raw = self.feed(&window, activation)[0];
            let prediction = if activation.is_boolean() {
                if raw > 0.5 { 1.0 } else { 0.0 }
            } else {
                raw
            };
            predictions.push(prediction);
            window.remove(0);
            window.push(prediction);
        }
        predictions
    }
}
