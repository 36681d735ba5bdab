pub mod heuristics;
pub mod mode;
pub mod predictor;

pub use mode::ModelKind;
pub use predictor::{predict, Predictor, MIN_SAMPLES};
