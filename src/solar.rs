// Sun band and battery arithmetic. The sun lives on row 0 and sweeps one
// column per tick; cells within one column of it are lit.

use crate::config;
use crate::grid::Position;

/// True when `position` sits inside the sunbeam: row 0, within
/// `SUN_HALF_WIDTH` columns of the sun's center. The beam does not wrap
/// around the board edges, so it narrows near either end.
pub fn is_lit(position: Position, sun: i32) -> bool {
    position.y == 0 && (position.x - sun).abs() <= config::SUN_HALF_WIDTH
}

/// The sun's next column, wrapping back to 0 past the right edge.
pub fn advance_sun(sun: i32, grid_size: i32) -> i32 {
    (sun + 1) % grid_size
}

/// Apply a charge or drain, clamped to the gauge range.
pub fn adjust_battery(battery: i32, delta: i32) -> i32 {
    (battery + delta).clamp(0, config::BATTERY_MAX)
}
