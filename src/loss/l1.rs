/// Absolute-difference cost used by the finite-difference trainer.
///
/// Unlike a mean absolute error, the per-sample cost is the plain *sum* of the
/// per-unit costs; averaging only happens across samples.
pub struct L1Loss;

impl L1Loss {
    /// `|output - expected|`
    #[inline]
    pub fn node_cost(output: f64, expected: f64) -> f64 {
        (output - expected).abs()
    }

    /// Sum of node costs over every output unit of one sample.
    pub fn sample_cost(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(&p, &y)| L1Loss::node_cost(p, y))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_cost_is_absolute_difference() {
        assert_eq!(L1Loss::node_cost(3.0, 1.0), 2.0);
        assert_eq!(L1Loss::node_cost(1.0, 3.0), 2.0);
        assert_eq!(L1Loss::node_cost(-0.5, -0.5), 0.0);
    }

    #[test]
    fn sample_cost_sums_instead_of_averaging() {
        let cost = L1Loss::sample_cost(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]);
        assert_eq!(cost, 6.0);
    }
}
