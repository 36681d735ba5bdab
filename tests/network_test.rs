//! Tests for the network forward pass and finite-difference training

use std::sync::mpsc;

use nn_forecast::{train_loop, ActivationFunction, ModelTemplate, Network, Sgd, TrainConfig};
use proptest::prelude::*;

fn ramp() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]];
    let expected = vec![vec![3.0], vec![4.0], vec![5.0]];
    (inputs, expected)
}

#[test]
fn test_cost_never_increases_with_small_learning_rate() {
    let (inputs, expected) = ramp();
    let mut network = Network::new(&[2, 1]).unwrap();
    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(40, ActivationFunction::ReLU);
    config.progress_tx = Some(tx);

    let final_cost = train_loop(&mut network, &inputs, &expected, &Sgd::new(0.001), &config).unwrap();
    drop(config);

    let costs: Vec<f64> = rx.iter().map(|s| s.cost).collect();
    assert_eq!(costs.len(), 40);
    for pair in costs.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "cost rose from {} to {}", pair[0], pair[1]);
    }
    assert!(final_cost < costs[0]);
}

#[test]
fn test_parallel_training_agrees_with_sequential() {
    let (inputs, expected) = ramp();
    let mut seq = Network::new(&[2, 3, 1]).unwrap();
    let mut par = seq.clone();

    let config = TrainConfig::new(25, ActivationFunction::ReLU);
    let mut par_config = config.clone();
    par_config.parallel = true;

    let a = train_loop(&mut seq, &inputs, &expected, &Sgd::new(0.001), &config).unwrap();
    let b = train_loop(&mut par, &inputs, &expected, &Sgd::new(0.001), &par_config).unwrap();

    assert!((a - b).abs() < 1e-6, "sequential cost {a}, parallel cost {b}");
    for (l1, l2) in seq.layers().iter().zip(par.layers().iter()) {
        let w1 = l1.weights().data.iter().flatten();
        let w2 = l2.weights().data.iter().flatten();
        for (x, y) in w1.zip(w2) {
            assert!((x - y).abs() < 1e-6, "weight {x} vs {y}");
        }
        for (x, y) in l1.biases().iter().zip(l2.biases()) {
            assert!((x - y).abs() < 1e-6, "bias {x} vs {y}");
        }
    }
}

#[test]
fn test_sigmoid_network_learns_constant_zero() {
    let inputs = vec![vec![0.0, 0.0, 0.0]; 4];
    let expected = vec![vec![0.0]; 4];
    let mut network = Network::new(&[3, 1]).unwrap();
    network.train(&inputs, &expected, 0.5, 500, ActivationFunction::Sigmoid).unwrap();
    let out = network.forward(&[0.0, 0.0, 0.0], ActivationFunction::Sigmoid).unwrap();
    assert!(out[0] < 0.5, "output {}", out[0]);
}

#[test]
fn test_predict_uses_template_hyperparameters() {
    let template = ModelTemplate::new(vec![1, 1], 0.05, 1000);
    let mut network = template.build_network().unwrap();
    let out = network.predict(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, &template, false).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out[0] < out[1] && out[1] < out[2], "{out:?}");
}

fn architecture() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..6, 2..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_forward_width_matches_last_layer(
        (sizes, input) in architecture().prop_flat_map(|sizes| {
            let width = sizes[0];
            (Just(sizes), proptest::collection::vec(-10.0f64..10.0, width))
        }),
        boolean in any::<bool>(),
    ) {
        let network = Network::new(&sizes).unwrap();
        let out = network.forward(&input, ActivationFunction::for_mode(boolean)).unwrap();
        prop_assert_eq!(out.len(), *sizes.last().unwrap());
        prop_assert!(out.iter().all(|x| x.is_finite()));
    }
}
