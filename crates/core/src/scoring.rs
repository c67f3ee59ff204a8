//! Classic scoring rules and the gravity table.

use crate::types::{DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS};

/// Points per line clear count, before the level multiplier.
const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Classic line-clear score: table value times (level + 1).
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level + 1)
}

/// Drop score: 1 point per soft-dropped cell, 2 per hard-dropped cell.
pub fn drop_score(cells: u32, hard: bool) -> u32 {
    if hard {
        cells * 2
    } else {
        cells
    }
}

/// Level grows every ten cleared lines on top of the starting level.
pub fn level_for(starting_level: u32, total_lines: u32) -> u32 {
    starting_level + total_lines / 10
}

/// Gravity interval for a level, clamped to the table floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}
