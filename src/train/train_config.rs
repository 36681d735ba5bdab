use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::activation::activation::ActivationFunction;
use crate::train::iteration_stats::IterationStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`   — number of full-batch gradient steps
/// - `activation`   — activation used by every layer during training
/// - `parallel`     — evaluate the perturbed costs on the rayon pool; the
///                    gradients match the sequential path up to rounding
/// - `report_every` — emit progress every this many iterations (`0` acts as `1`)
/// - `progress_tx`  — optional channel sender for `IterationStats`.  If the
///                    receiver is dropped the loop terminates early.
/// - `stop_flag`    — optional atomic flag; when set to `true` from another
///                    thread the loop terminates after the current iteration.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub iterations: usize,
    pub activation: ActivationFunction,
    pub parallel: bool,
    pub report_every: usize,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a sequential `TrainConfig` with no progress channel and no stop flag.
    pub fn new(iterations: usize, activation: ActivationFunction) -> Self {
        TrainConfig {
            iterations,
            activation,
            parallel: false,
            report_every: 1,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
