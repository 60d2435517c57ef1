//! Numeric helpers shared by the carving passes.

/// Slack subtracted before taking the ceiling of a vote threshold, so that
/// products like `0.8 * 5` that land a hair above an integer don't round up.
const THRESHOLD_SLACK: f64 = 1e-9;

/// Round a sub-pixel coordinate to the nearest integer, ties to even.
///
/// Matches NumPy's `round`, so `0.5 -> 0`, `1.5 -> 2`, `2.5 -> 2`.
pub fn round_pixel(coord: f64) -> f64 {
    coord.round_ties_even()
}

/// Convert a rounded pixel coordinate to an index, `None` if negative or
/// not below `limit`.
pub fn pixel_index(rounded: f64, limit: u32) -> Option<u32> {
    if rounded < 0.0 || rounded >= limit as f64 {
        return None;
    }
    Some(rounded as u32)
}

/// Minimum vote count for `fraction` of `cameras`: ceil(fraction * cameras), at least 1.
pub fn consensus_threshold(fraction: f64, cameras: usize) -> usize {
    let raw = (fraction * cameras as f64 - THRESHOLD_SLACK).ceil();
    (raw.max(1.0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ties_even() {
        assert_eq!(round_pixel(0.5), 0.0);
        assert_eq!(round_pixel(1.5), 2.0);
        assert_eq!(round_pixel(2.5), 2.0);
        assert_eq!(round_pixel(2.6), 3.0);
        assert_eq!(round_pixel(-0.4), -0.0);
        assert_eq!(round_pixel(-0.6), -1.0);
    }

    #[test]
    fn test_pixel_index_bounds() {
        assert_eq!(pixel_index(0.0, 10), Some(0));
        assert_eq!(pixel_index(9.0, 10), Some(9));
        assert_eq!(pixel_index(10.0, 10), None);
        assert_eq!(pixel_index(-1.0, 10), None);
        // -0.0 from rounding a small negative is still column 0
        assert_eq!(pixel_index(-0.0, 10), Some(0));
    }

    #[test]
    fn test_consensus_threshold() {
        assert_eq!(consensus_threshold(0.8, 5), 4);
        assert_eq!(consensus_threshold(0.8, 10), 8);
        assert_eq!(consensus_threshold(0.8, 36), 29);
        assert_eq!(consensus_threshold(0.8, 1), 1);
        assert_eq!(consensus_threshold(1.0, 7), 7);
        assert_eq!(consensus_threshold(0.01, 3), 1);
    }
}
