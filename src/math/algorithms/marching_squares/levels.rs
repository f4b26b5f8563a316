// src/math/algorithms/marching_squares/levels.rs

use crate::math::error::{MathError, MathResult};

/// Erzeugt `count` gleichmäßig verteilte Level strikt im Inneren von [min, max]:
/// `min + (max - min) * i / (count + 1)` für `i = 1..=count`.
///
/// `count == 0` liefert eine leere Liste, ein negativer Wert ist ein Aufruffehler.
pub fn isoline_levels(min: f32, max: f32, count: i32) -> MathResult<Vec<f32>> {
    if count < 0 {
        return Err(MathError::InvalidIsolineCount { count });
    }
    let divisor = count as f32 + 1.0;
    Ok((1..=count)
        .map(|i| min + (max - min) * i as f32 / divisor)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_five_levels_over_zero_to_ten() {
        let levels = isoline_levels(0.0, 10.0, 5).unwrap();
        let expected = [1.6667, 3.3333, 5.0, 6.6667, 8.3333];
        assert_eq!(levels.len(), expected.len());
        for (level, want) in levels.iter().zip(expected) {
            assert_abs_diff_eq!(*level, want, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_levels_are_strictly_interior() {
        let levels = isoline_levels(-2.0, 3.0, 7).unwrap();
        assert!(levels.iter().all(|&l| l > -2.0 && l < 3.0));
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_and_negative_counts() {
        assert!(isoline_levels(0.0, 1.0, 0).unwrap().is_empty());
        assert_eq!(
            isoline_levels(0.0, 1.0, -1),
            Err(MathError::InvalidIsolineCount { count: -1 })
        );
    }

    #[test]
    fn test_collapsed_range() {
        let levels = isoline_levels(4.0, 4.0, 3).unwrap();
        assert_eq!(levels, vec![4.0, 4.0, 4.0]);
    }
}
