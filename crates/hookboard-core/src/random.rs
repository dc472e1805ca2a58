//! Injectable randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform source of floats in `[0, 1)`.
pub trait RandomSource: 'static {
    fn next_f64(&mut self) -> f64;
}

/// Draws from an OS-seeded [`StdRng`].
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays scripted draws, cycling when exhausted. Draws are clamped into
/// `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Integer in `[ceil(min), floor(max)]`, both ends inclusive.
pub fn random_integer(rng: &mut dyn RandomSource, min: f64, max: f64) -> i64 {
    let min = min.ceil();
    let max = max.floor();
    ((rng.next_f64() * (max - min + 1.0)).floor() + min) as i64
}

/// Decimal in `[min, max)` rounded to `digits` fractional digits (one digit
/// when `digits` is 0) if the range lies inside `[0, 1]` or `digits` is set;
/// otherwise an integer from [`random_integer`].
pub fn random_number(rng: &mut dyn RandomSource, min: f64, max: f64, digits: u32) -> f64 {
    if (max <= 1.0 && min >= 0.0) || digits > 0 {
        let raw = rng.next_f64() * (max - min) + min;
        let scale = 10f64.powi(if digits > 0 { digits as i32 } else { 1 });
        (raw * scale).round() / scale
    } else {
        random_integer(rng, min, max) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_range_is_inclusive() {
        let mut low = SequenceRandom::new([0.0]);
        let mut high = SequenceRandom::new([0.9999]);
        assert_eq!(random_integer(&mut low, 1000.0, 9999.0), 1000);
        assert_eq!(random_integer(&mut high, 1000.0, 9999.0), 9999);
    }

    #[test]
    fn unit_range_rounds_to_one_digit() {
        let mut rng = SequenceRandom::new([0.734, 0.76, 0.96]);
        assert_eq!(random_number(&mut rng, 0.0, 1.0, 0), 0.7);
        assert_eq!(random_number(&mut rng, 0.0, 1.0, 0), 0.8);
        assert_eq!(random_number(&mut rng, 0.0, 1.0, 0), 1.0);
    }

    #[test]
    fn explicit_digits_apply_outside_unit_range() {
        let mut rng = SequenceRandom::new([0.5]);
        assert_eq!(random_number(&mut rng, 0.0, 10.0, 2), 5.0);
        let mut rng = SequenceRandom::new([0.12345]);
        assert_eq!(random_number(&mut rng, 0.0, 10.0, 2), 1.23);
    }

    #[test]
    fn wide_range_without_digits_is_integral() {
        let mut rng = SequenceRandom::new([0.5]);
        assert_eq!(random_number(&mut rng, 1.0, 20.0, 0), 11.0);
    }

    #[test]
    fn system_random_stays_in_unit_interval() {
        let mut rng = SystemRandom::new();
        for _ in 0..100 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn seeded_system_random_repeats() {
        let mut a = SystemRandom::seeded(7);
        let mut b = SystemRandom::seeded(7);
        let left: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let right: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn sequence_cycles() {
        let mut rng = SequenceRandom::new([0.1, 0.2]);
        let draws: Vec<f64> = (0..4).map(|_| rng.next_f64()).collect();
        assert_eq!(draws, vec![0.1, 0.2, 0.1, 0.2]);
    }
}
