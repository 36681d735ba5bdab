use crate::layers::dense::Layer;

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies the gradients currently recorded in `layer`.
    pub fn step(&self, layer: &mut Layer) {
        layer.update_gradients(self.learning_rate);
    }
}
