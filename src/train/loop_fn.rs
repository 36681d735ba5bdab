use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::{ForecastError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::finite_diff::FiniteDifference;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.iterations` full-batch steps and returns the
/// mean cost of the trained network over the training rows.
///
/// Each iteration measures the baseline cost, records a finite-difference
/// gradient for every parameter against that baseline, then applies
/// `optimizer` to every layer.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `EmptyDataset` for no rows, `ShapeMismatch` when row counts or row widths
/// do not fit the network, `InvalidHyperparameter` for a negative or
/// non-finite learning rate.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
    optimizer: &Sgd,
    config: &TrainConfig,
) -> Result<f64> {
    validate(network, inputs, expected, optimizer)?;

    let estimator = FiniteDifference::default();
    let report_every = config.report_every.max(1);
    let started = Instant::now();

    debug!(
        iterations = config.iterations,
        parameters = network.parameter_count(),
        rows = inputs.len(),
        learning_rate = optimizer.learning_rate,
        parallel = config.parallel,
        "training started"
    );

    for iteration in 1..=config.iterations {
        if stop_requested(config) {
            debug!(iteration, "training stopped by flag");
            break;
        }

        let t_start = Instant::now();

        let baseline = network.cost(inputs, expected, config.activation);
        estimator.record_gradients(
            network,
            inputs,
            expected,
            config.activation,
            baseline,
            config.parallel,
        );
        for layer in &mut network.layers {
            optimizer.step(layer);
        }

        if iteration % report_every == 0 || iteration == config.iterations {
            trace!(iteration, cost = baseline, "iteration finished");

            let stats = IterationStats {
                iteration,
                total_iterations: config.iterations,
                cost: baseline,
                elapsed_us: t_start.elapsed().as_micros() as u64,
            };
            if let Some(ref tx) = config.progress_tx {
                // If the receiver has been dropped, stop training.
                if tx.send(stats).is_err() {
                    debug!(iteration, "progress receiver dropped, stopping");
                    break;
                }
            }
        }
    }

    let final_cost = network.cost(inputs, expected, config.activation);
    debug!(
        final_cost,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "training finished"
    );
    Ok(final_cost)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

fn validate(
    network: &Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<()> {
    if inputs.is_empty() {
        return Err(ForecastError::EmptyDataset);
    }
    if inputs.len() != expected.len() {
        return Err(ForecastError::ShapeMismatch {
            context: "expected output rows",
            expected: inputs.len(),
            got: expected.len(),
        });
    }
    if let Some(row) = inputs.iter().find(|r| r.len() != network.input_size()) {
        return Err(ForecastError::ShapeMismatch {
            context: "input row width",
            expected: network.input_size(),
            got: row.len(),
        });
    }
    if let Some(row) = expected.iter().find(|r| r.len() != network.output_size()) {
        return Err(ForecastError::ShapeMismatch {
            context: "expected output width",
            expected: network.output_size(),
            got: row.len(),
        });
    }
    if !optimizer.learning_rate.is_finite() || optimizer.learning_rate < 0.0 {
        return Err(ForecastError::InvalidHyperparameter(format!(
            "learning rate must be finite and non-negative, got {}",
            optimizer.learning_rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    fn ramp() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let inputs = vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]];
        let expected = vec![vec![3.0], vec![4.0], vec![5.0]];
        (inputs, expected)
    }

    #[test]
    fn training_reduces_cost() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[2, 1]).unwrap();
        let before = network.cost(&inputs, &expected, ActivationFunction::ReLU);
        let after = network
            .train(&inputs, &expected, 0.01, 200, ActivationFunction::ReLU)
            .unwrap();
        assert!(after < before, "cost went from {before} to {after}");
    }

    #[test]
    fn zero_iterations_leave_parameters_untouched() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[2, 1]).unwrap();
        network.train(&inputs, &expected, 0.5, 0, ActivationFunction::ReLU).unwrap();
        assert_eq!(network.layers[0].bias(0), 0.5);
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let (inputs, mut expected) = ramp();
        expected.pop();
        let mut network = Network::new(&[2, 1]).unwrap();
        let err = network
            .train(&inputs, &expected, 0.01, 1, ActivationFunction::ReLU)
            .unwrap_err();
        assert!(matches!(err, ForecastError::ShapeMismatch { expected: 3, got: 2, .. }));
    }

    #[test]
    fn wrong_row_width_is_rejected() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[3, 1]).unwrap();
        let err = network
            .train(&inputs, &expected, 0.01, 1, ActivationFunction::ReLU)
            .unwrap_err();
        assert!(matches!(err, ForecastError::ShapeMismatch { context: "input row width", .. }));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut network = Network::new(&[2, 1]).unwrap();
        let err = network.train(&[], &[], 0.01, 1, ActivationFunction::ReLU).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyDataset));
    }

    #[test]
    fn progress_is_reported_per_interval() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[2, 1]).unwrap();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(10, ActivationFunction::ReLU);
        config.report_every = 4;
        config.progress_tx = Some(tx);

        train_loop(&mut network, &inputs, &expected, &Sgd::new(0.01), &config).unwrap();
        drop(config);

        let iterations: Vec<usize> = rx.iter().map(|s| s.iteration).collect();
        assert_eq!(iterations, vec![4, 8, 10]);
    }

    #[test]
    fn stop_flag_halts_before_first_iteration() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[2, 1]).unwrap();
        let mut config = TrainConfig::new(1000, ActivationFunction::ReLU);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

        train_loop(&mut network, &inputs, &expected, &Sgd::new(0.5), &config).unwrap();
        assert_eq!(network.layers[0].weight(0, 0), 0.5);
    }

    #[test]
    fn dropped_receiver_stops_training() {
        let (inputs, expected) = ramp();
        let mut network = Network::new(&[2, 1]).unwrap();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(1000, ActivationFunction::ReLU);
        config.progress_tx = Some(tx);
        let reference_cost = {
            let mut reference = Network::new(&[2, 1]).unwrap();
            reference.train(&inputs, &expected, 0.01, 1, ActivationFunction::ReLU).unwrap()
        };

        let cost = train_loop(&mut network, &inputs, &expected, &Sgd::new(0.01), &config).unwrap();
        assert_eq!(cost, reference_cost);
    }
}
