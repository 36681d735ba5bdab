pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod train;
pub mod network;
pub mod data;
pub mod predictor;

// Convenience re-exports
pub use error::{ForecastError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::template::ModelTemplate;
pub use optim::sgd::Sgd;
pub use train::{train_loop, TrainConfig, IterationStats};
pub use predictor::{predict, ModelKind, Predictor};
