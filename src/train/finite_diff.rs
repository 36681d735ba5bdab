use rayon::prelude::*;

use crate::activation::activation::ActivationFunction;
use crate::network::network::{Network, Param};

/// Perturbation applied to one parameter at a time.
pub const DEFAULT_STEP: f64 = 1e-4;

/// Forward-difference gradient estimator.
///
/// For each parameter: add `step`, measure the mean cost over the whole
/// training set, subtract `step` again, and record
/// `(perturbed - baseline) / step` in the owning layer's accumulator.
/// The add-then-subtract round trip is not exact in floating point; the
/// residue is carried into later measurements and into the update, and long
/// runs depend on it.
/// No parameter is updated until every gradient has been recorded, so all of
/// them are measured against the same baseline.
#[derive(Debug, Clone, Copy)]
pub struct FiniteDifference {
    pub step: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        FiniteDifference { step: DEFAULT_STEP }
    }
}

impl FiniteDifference {
    pub fn new(step: f64) -> FiniteDifference {
        FiniteDifference { step }
    }

    /// Records a gradient for every parameter of `network`.
    ///
    /// With `parallel` set, parameters are perturbed on the rayon pool using
    /// per-worker copies of the network. Each copy only sees the rounding
    /// residue of its own perturbations, so the gradients agree with the
    /// sequential path to within that residue rather than bit for bit.
    pub fn record_gradients(
        &self,
        network: &mut Network,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        activation: ActivationFunction,
        baseline: f64,
        parallel: bool,
    ) {
        let params = network.params();

        if parallel {
            let snapshot = &*network;
            let gradients: Vec<f64> = params
                .par_iter()
                .map_init(
                    || snapshot.clone(),
                    |local, &param| self.perturbed_gradient(local, param, inputs, expected, activation, baseline),
                )
                .collect();
            for (param, gradient) in params.into_iter().zip(gradients) {
                network.set_gradient(param, gradient);
            }
        } else {
            for param in params {
                let gradient = self.perturbed_gradient(network, param, inputs, expected, activation, baseline);
                network.set_gradient(param, gradient);
            }
        }
    }

    fn perturbed_gradient(
        &self,
        network: &mut Network,
        param: Param,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        activation: ActivationFunction,
        baseline: f64,
    ) -> f64 {
        network.set_param(param, network.param(param) + self.step);
        let perturbed = network.cost(inputs, expected, activation);
        network.set_param(param, network.param(param) - self.step);
        (perturbed - baseline) / self.step
    }
}
