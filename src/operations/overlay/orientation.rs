use crate::math::{perp_dot, Vector2};

/// Largest value returned by [`clockwise_turn`]: a full turn.
pub const FULL_TURN: f64 = 4.0;

/// Measures the clockwise rotation from `reference` to `candidate`.
///
/// Returns a diamond angle in `[0, 4]` that grows monotonically with the
/// clockwise angle: `1` is a quarter turn, `2` a half turn, `3` three
/// quarters. Exact alignment maps to [`FULL_TURN`] so that walking straight
/// back along `reference` ranks last. Zero-length inputs also rank last.
///
/// Built from the dot and perpendicular-dot products only, so nearly
/// parallel directions still get distinct values.
#[must_use]
pub fn clockwise_turn(reference: &Vector2, candidate: &Vector2) -> f64 {
    // Coordinates of `candidate` in a frame where `reference` is +x and
    // clockwise is +y; both scaled by |reference| * |candidate|.
    let x = reference.dot(candidate);
    let y = -perp_dot(reference, candidate);

    if y == 0.0 && x >= 0.0 {
        return FULL_TURN;
    }
    if y >= 0.0 {
        if x >= 0.0 {
            y / (x + y)
        } else {
            1.0 - x / (y - x)
        }
    } else if x < 0.0 {
        2.0 - y / (-x - y)
    } else {
        3.0 + x / (x - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turns() {
        let west = Vector2::new(-1.0, 0.0);
        assert_abs_diff_eq!(clockwise_turn(&west, &Vector2::new(0.0, 1.0)), 1.0);
        assert_abs_diff_eq!(clockwise_turn(&west, &Vector2::new(1.0, 0.0)), 2.0);
        assert_abs_diff_eq!(clockwise_turn(&west, &Vector2::new(0.0, -1.0)), 3.0);
    }

    #[test]
    fn scale_does_not_matter() {
        let reference = Vector2::new(0.0, 2.0);
        let a = clockwise_turn(&reference, &Vector2::new(1.0, 1.0));
        let b = clockwise_turn(&(reference * 10.0), &Vector2::new(0.01, 0.01));
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        assert_abs_diff_eq!(a, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn alignment_ranks_last() {
        let v = Vector2::new(2.0, 3.0);
        assert_abs_diff_eq!(clockwise_turn(&v, &(v * 5.0)), FULL_TURN);
    }

    #[test]
    fn monotone_in_clockwise_angle() {
        let reference = Vector2::new(1.0, 0.0);
        let mut previous = -1.0;
        for step in 1..64 {
            let angle = -f64::from(step) * std::f64::consts::TAU / 64.0;
            let candidate = Vector2::new(angle.cos(), angle.sin());
            let turn = clockwise_turn(&reference, &candidate);
            assert!(turn > previous, "step {step}: {turn} <= {previous}");
            assert!((0.0..FULL_TURN).contains(&turn));
            previous = turn;
        }
    }

    #[test]
    fn nearly_parallel_directions_are_distinct() {
        let reference = Vector2::new(1.0, 0.0);
        let cw = clockwise_turn(&reference, &Vector2::new(1.0, -1e-9));
        let ccw = clockwise_turn(&reference, &Vector2::new(1.0, 1e-9));
        assert!(cw > 0.0 && cw < 1e-6, "cw={cw}");
        assert!(ccw < FULL_TURN && ccw > FULL_TURN - 1e-6, "ccw={ccw}");
    }

    #[test]
    fn zero_length_ranks_last() {
        let reference = Vector2::new(1.0, 0.0);
        assert_abs_diff_eq!(clockwise_turn(&reference, &Vector2::zeros()), FULL_TURN);
    }
}
