//! Integer draws shared by the pools and record assembly.
//!
//! Both functions take the entropy source as a parameter so callers can pass
//! a seeded `StdRng` for reproducible output.

use rand::Rng;

/// Draw an integer uniformly from `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn uniform_int<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    assert!(min <= max, "uniform_int: min ({min}) > max ({max})");
    rng.random_range(min..=max)
}

/// Draw an integer from `[min, max]` skewed toward `min`.
///
/// Computes `round(s / (u * s + 1)) + (min - 1)` with `s = max - min + 1`
/// and `u` uniform in `[0, 1)`. For `min = 1` this is the classic
/// `round(max / (u * max + 1))` household-size curve: `1` is by far the most
/// likely outcome and each larger value is rarer.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn weighted_int<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    assert!(min <= max, "weighted_int: min ({min}) > max ({max})");
    let (min, max) = (i128::from(min), i128::from(max));
    let span = (max - min + 1) as f64;
    let u: f64 = rng.random();
    let offset = (span / (u * span + 1.0)).round() as i128;
    (offset + min - 1).clamp(min, max) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_int_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];

        for _ in 0..1000 {
            let value = uniform_int(&mut rng, 0, 2);
            assert!((0..=2).contains(&value));
            seen[value as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_uniform_int_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(uniform_int(&mut rng, 7, 7), 7);
        }
    }

    #[test]
    #[should_panic]
    fn test_uniform_int_rejects_inverted_range() {
        let mut rng = StdRng::seed_from_u64(42);
        uniform_int(&mut rng, 3, 2);
    }

    #[test]
    fn test_weighted_int_single_value() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert_eq!(weighted_int(&mut rng, 1, 1), 1);
        }
    }

    #[test]
    fn test_weighted_int_skews_low() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<i64> = (0..10_000).map(|_| weighted_int(&mut rng, 1, 10)).collect();

        assert!(samples.iter().all(|v| (1..=10).contains(v)));
        let mean = samples.iter().sum::<i64>() as f64 / samples.len() as f64;
        assert!(mean < 5.5, "mean {mean} not below midpoint");

        let ones = samples.iter().filter(|v| **v == 1).count();
        let tens = samples.iter().filter(|v| **v == 10).count();
        assert!(ones > tens);
    }

    #[test]
    fn test_weighted_int_offset_range_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let value = weighted_int(&mut rng, 2, 5);
            assert!((2..=5).contains(&value));
        }
    }

    #[test]
    fn test_weighted_int_extreme_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            weighted_int(&mut rng, i64::MIN, i64::MAX);
            assert!(weighted_int(&mut rng, i64::MIN, 0) <= 0);
            assert!(weighted_int(&mut rng, i64::MAX - 3, i64::MAX) >= i64::MAX - 3);
            assert_eq!(weighted_int(&mut rng, i64::MIN, i64::MIN), i64::MIN);
        }
    }

    #[test]
    #[should_panic]
    fn test_weighted_int_rejects_inverted_range() {
        let mut rng = StdRng::seed_from_u64(42);
        weighted_int(&mut rng, 10, 1);
    }
}
