//! Tests for the dense layer and its cost function

use nn_forecast::{ActivationFunction, Layer};
use proptest::prelude::*;

#[test]
fn test_layer_output_width() {
    let layer = Layer::new(4, 3).unwrap();
    let out = layer.forward(&[1.0, 2.0, 3.0, 4.0], ActivationFunction::ReLU);
    assert_eq!(out.len(), 3);
    // 0.5 + 0.5 * (1 + 2 + 3 + 4)
    assert!(out.iter().all(|&x| x == 5.5));
}

#[test]
fn test_sigmoid_layer_is_bounded() {
    let layer = Layer::new(2, 2).unwrap();
    for out in layer.forward(&[1000.0, -5.0], ActivationFunction::Sigmoid) {
        assert!((0.0..=1.0).contains(&out));
    }
}

#[test]
fn test_node_cost_is_l1() {
    assert_eq!(Layer::node_cost(0.25, 1.0), 0.75);
    assert_eq!(Layer::node_cost(-1.0, 1.0), 2.0);
}

proptest! {
    #[test]
    fn proptest_node_cost_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assert_eq!(Layer::node_cost(a, b), Layer::node_cost(b, a));
        prop_assert!(Layer::node_cost(a, b) >= 0.0);
    }

    #[test]
    fn proptest_node_cost_zero_iff_equal(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assert_eq!(Layer::node_cost(a, a), 0.0);
        prop_assert_eq!(Layer::node_cost(a, b) == 0.0, a == b);
    }

    #[test]
    fn proptest_relu_layer_never_negative(
        inputs in proptest::collection::vec(-100.0f64..100.0, 3),
    ) {
        let layer = Layer::new(3, 5).unwrap();
        let out = layer.forward(&inputs, ActivationFunction::ReLU);
        prop_assert_eq!(out.len(), 5);
        prop_assert!(out.iter().all(|&x| x >= 0.0));
    }
}
