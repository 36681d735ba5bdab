//! Turns a 1-D sequence into supervised `(input window, next values)` rows.

/// Row `i` is `sequence[i .. i + width]`, for every `i` in `0..=len - width`.
///
/// Returns no rows when `width` is zero or longer than the sequence.
pub fn window_inputs(sequence: &[f64], width: usize) -> Vec<Vec<f64>> {
    if width == 0 || width > sequence.len() {
        return Vec::new();
    }
    sequence.windows(width).map(|w| w.to_vec()).collect()
}

/// Row `i` is `sequence[i + 1 .. i + 1 + width]`, with as many rows as
/// [`window_inputs`] produces for the same width.
///
/// The last row would run one element past the end of the sequence; it falls
/// back to `sequence[0 .. width]` instead.
pub fn window_outputs(sequence: &[f64], width: usize) -> Vec<Vec<f64>> {
    if width == 0 || width > sequence.len() {
        return Vec::new();
    }
    let rows = sequence.len() - width + 1;
    (0..rows)
        .map(|i| {
            let start = i + 1;
            if start + width <= sequence.len() {
                sequence[start..start + width].to_vec()
            } else {
                sequence[..width].to_vec()
            }
        })
        .collect()
}

/// `result[i] = sequence[i + 1] - sequence[i]`
pub fn delta_transform(sequence: &[f64]) -> Vec<f64> {
    sequence.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Running sum of `deltas` seeded from `start`; `start` itself is not emitted.
pub fn accumulate_deltas(start: f64, deltas: &[f64]) -> Vec<f64> {
    deltas
        .iter()
        .scan(start, |acc, d| {
            *acc += d;
            Some(*acc)
        })
        .collect()
}
