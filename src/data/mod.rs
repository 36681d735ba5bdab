pub mod parse;
pub mod window;

pub use parse::parse_sequence;
pub use window::{accumulate_deltas, delta_transform, window_inputs, window_outputs};
