use crate::activation::activation::ActivationFunction;
use crate::error::{ForecastError, Result};
use crate::loss::l1::L1Loss;
use crate::math::matrix::Matrix;

/// Value every weight and bias starts from.
pub const INITIAL_PARAMETER: f64 = 0.5;

/// Fully connected layer mapping `input_size` values to `size` values.
///
/// The gradient accumulators always have the same shape as the parameters
/// they belong to. They are only meaningful between a finished gradient
/// estimate and the following `update_gradients` call.
#[derive(Debug, Clone)]
pub struct Layer{
    input_size: usize,
    size: usize,
    weights: Matrix,
    biases: Vec<f64>,
    weight_gradients: Matrix,
    bias_gradients: Vec<f64>,
}

impl Layer {
    pub fn new(input_size: usize, size: usize) -> Result<Layer> {
        if input_size == 0 || size == 0 {
            return Err(ForecastError::InvalidArchitecture(format!(
                "layer dimensions must be positive, got {input_size} -> {size}"
            )));
        }

        Ok(Layer {
            input_size,
            size,
            weights: Matrix::filled(input_size, size, INITIAL_PARAMETER),
            biases: vec![INITIAL_PARAMETER; size],
            weight_gradients: Matrix::zeros(input_size, size),
            bias_gradients: vec![0.0; size],
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of weights plus biases.
    pub fn parameter_count(&self) -> usize {
        self.input_size * self.size + self.size
    }

    /// `activation(bias[j] + Σ_i input[i] * weight[i][j])` for every output unit `j`.
    pub fn forward(&self, input: &[f64], activation: ActivationFunction) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_size,
            "layer expects {} inputs, got {}",
            self.input_size,
            input.len()
        );

        (0..self.size)
            .map(|j| {
                let mut sum = self.biases[j];
                for (i, x) in input.iter().enumerate() {
                    sum += x * self.weights.get(i, j);
                }
                activation.function(sum)
            })
            .collect()
    }

    pub fn node_cost(output: f64, expected: f64) -> f64 {
        L1Loss::node_cost(output, expected)
    }

    /// Moves every parameter against its recorded gradient, scaled by `learning_rate`.
    pub fn update_gradients(&mut self, learning_rate: f64) {
        self.weights.sub_scaled(&self.weight_gradients, learning_rate);
        for (b, g) in self.biases.iter_mut().zip(self.bias_gradients.iter()) {
            *b -= learning_rate * g;
        }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn weight(&self, input: usize, output: usize) -> f64 {
        self.weights.get(input, output)
    }

    pub fn set_weight(&mut self, input: usize, output: usize, value: f64) {
        self.weights.set(input, output, value);
    }

    pub fn bias(&self, output: usize) -> f64 {
        self.biases[output]
    }

    pub fn set_bias(&mut self, output: usize, value: f64) {
        self.biases[output] = value;
    }

    pub fn weight_gradient(&self, input: usize, output: usize) -> f64 {
        self.weight_gradients.get(input, output)
    }

    pub fn set_weight_gradient(&mut self, input: usize, output: usize, gradient: f64) {
        self.weight_gradients.set(input, output, gradient);
    }

    pub fn bias_gradient(&self, output: usize) -> f64 {
        self.bias_gradients[output]
    }

    pub fn set_bias_gradient(&mut self, output: usize, gradient: f64) {
        self.bias_gradients[output] = gradient;
    }
}
