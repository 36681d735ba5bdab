use serde::{Serialize, Deserialize};

/// Progress record emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent every `report_every` iterations and after the final iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Total iterations requested for this run.
    pub total_iterations: usize,
    /// Mean cost over the training rows before this iteration's update.
    pub cost: f64,
    /// Wall-clock duration of this single iteration in microseconds.
    pub elapsed_us: u64,
}
