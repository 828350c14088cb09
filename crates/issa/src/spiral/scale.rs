//! Radial scale sequences.

/// Fraction of the starting radius the multiplicative spiral decays toward.
const MULTIPLICATIVE_FLOOR: f64 = 0.01;

/// `num_points` evenly spaced values from 1.0 down to 0.0, both included.
pub(super) fn linear(num_points: usize) -> Vec<f64> {
    match num_points {
        0 => Vec::new(),
        1 => vec![1.0],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| 1.0 - i as f64 / last).collect()
        }
    }
}

/// Geometric decay `r^i` with `r = 0.01^(1/num_points)`.
///
/// Never reaches zero; the last value is close to 0.01 for large counts.
pub(super) fn multiplicative(num_points: usize) -> Vec<f64> {
    if num_points == 0 {
        return Vec::new();
    }
    let ratio = MULTIPLICATIVE_FLOOR.powf(1.0 / num_points as f64);
    (0..num_points).map(|i| ratio.powf(i as f64)).collect()
}
