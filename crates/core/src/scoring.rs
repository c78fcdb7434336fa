//! Scoring module - line-clear points, levels and gravity scaling
//!
//! Points for a clear are `(level + 1) * lines * LINE_MULTIPLIERS[lines]`,
//! where `level` is the level reached after counting the new lines. Clears of
//! more than four lines reuse the four-line multiplier.

use crate::types::LINE_MULTIPLIERS;

/// Result of feeding a clear into the grid counters.
///
/// This is what the score/level/line display receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    pub score: u32,
    pub line_total: u32,
    pub level: u32,
    /// Points added by this update
    pub gained: u32,
}

/// Multiplier for a clear of `lines` rows
pub fn line_multiplier(lines: u32) -> u32 {
    let index = (lines as usize).min(LINE_MULTIPLIERS.len() - 1);
    LINE_MULTIPLIERS[index]
}

/// Points for clearing `lines` rows at `level`
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    (level.saturating_add(1))
        .saturating_mul(lines)
        .saturating_mul(line_multiplier(lines))
}

/// Level for a running line total
pub fn level_for_lines(line_total: u32, lines_per_level: u32) -> u32 {
    if lines_per_level == 0 {
        return 0;
    }
    line_total / lines_per_level
}

/// Gravity speed-up factor; levels 0 and 1 both fall at base speed
pub fn gravity_scale(level: u32) -> u64 {
    level.max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_points() {
        assert_eq!(line_clear_points(0, 0), 0);
        assert_eq!(line_clear_points(1, 0), 40);
        assert_eq!(line_clear_points(2, 0), 100);
        assert_eq!(line_clear_points(3, 0), 300);
        assert_eq!(line_clear_points(4, 0), 1200);
    }

    #[test]
    fn test_points_scale_with_level() {
        assert_eq!(line_clear_points(1, 5), 40 * 6);
        assert_eq!(line_clear_points(4, 2), 1200 * 3);
    }

    #[test]
    fn test_oversized_clear_uses_last_multiplier() {
        assert_eq!(line_multiplier(5), 300);
        assert_eq!(line_clear_points(6, 0), 6 * 300);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0, 10), 0);
        assert_eq!(level_for_lines(9, 10), 0);
        assert_eq!(level_for_lines(10, 10), 1);
        assert_eq!(level_for_lines(25, 10), 2);
        assert_eq!(level_for_lines(25, 0), 0);
    }

    #[test]
    fn test_gravity_scale() {
        assert_eq!(gravity_scale(0), 1);
        assert_eq!(gravity_scale(1), 1);
        assert_eq!(gravity_scale(4), 4);
    }
}
