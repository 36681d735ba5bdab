//! Rule-based helpers layered around the network.

/// Combined length of the first two runs of equal consecutive values,
/// capped at half the sequence length.
///
/// Each run counts at least one element, so the result is at least 2 unless
/// the cap is smaller.
pub fn repeat_count(sequence: &[f64]) -> usize {
    let mut runs = [1usize, 1usize];
    let mut run = 0;

    for pair in sequence.windows(2) {
        if pair[0] == pair[1] {
            runs[run] += 1;
        } else {
            run += 1;
            if run == runs.len() {
                break;
            }
        }
    }

    (runs[0] + runs[1]).min(sequence.len() / 2)
}

/// True when the sequence holds no more than two distinct values.
pub fn has_at_most_two_distinct(sequence: &[f64]) -> bool {
    let mut seen: Vec<f64> = Vec::with_capacity(2);
    for &value in sequence {
        if !seen.contains(&value) {
            if seen.len() == 2 {
                return false;
            }
            seen.push(value);
        }
    }
    true
}

/// Snaps network output onto the values of a two-valued sequence.
///
/// The first two predictions pick whichever of `sequence[i]` and
/// `sequence[i + 1]` they are closer to (ties keep `sequence[i]`); every later
/// prediction repeats the corrected value two positions earlier.
pub fn nearest_value_correction(predictions: &mut [f64], sequence: &[f64]) {
    for i in 0..predictions.len() {
        if i >= 2 {
            predictions[i] = predictions[i - 2];
        } else if i + 1 < sequence.len() {
            let current = sequence[i];
            let next = sequence[i + 1];
            predictions[i] = if (predictions[i] - current).abs() > (predictions[i] - next).abs() {
                next
            } else {
                current
            };
        }
    }
}

/// Rounds to three decimal places.
pub fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
