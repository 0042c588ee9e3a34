// Grid geometry: cell positions, facing directions, clamped stepping.

/// A cell coordinate. (0, 0) is the top-left corner and y grows downward,
/// so row 0 is the sunlit top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The robot's spawn cell. Level generation never places anything here.
    pub const START: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// One step in `direction`, clamped to the board. Walking into a wall
    /// yields the same position; the caller decides how to report that.
    pub fn step(&self, direction: Direction, grid_size: i32) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: (self.x + dx).clamp(0, grid_size - 1),
            y: (self.y + dy).clamp(0, grid_size - 1),
        }
    }
}

// Facing directions in clockwise order; rotation steps through this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// A quarter-turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Direction {
    const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// The facing after one quarter turn.
    pub fn rotated(&self, turn: Turn) -> Direction {
        let shift = match turn {
            Turn::Right => 1,
            Turn::Left => 3, // one step backward through the cycle
        };
        Self::CLOCKWISE[(self.index() + shift) % 4]
    }

    /// Unit displacement of a single step while facing this way.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}
