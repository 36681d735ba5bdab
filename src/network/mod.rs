pub mod network;
pub mod template;

pub use network::{Network, Param};
pub use template::ModelTemplate;
