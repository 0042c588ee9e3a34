// Advisory events emitted by state transitions. They carry no game state;
// the driver logs them and surfaces most of them as on-screen notices.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The robot entered a dirt cell and cleaned it.
    DirtCleaned,
    /// A move was rejected because it would leave the board.
    BlockedByWall,
    /// A move was rejected because an obstacle occupies the target cell.
    BlockedByObstacle,
    /// A move was rejected because the battery is empty.
    BatteryDepleted,
    /// The battery gained charge from the sun this tick.
    Charging,
    /// The last dirt cell of the named level was just cleaned.
    LevelComplete(u32),
}

impl GameEvent {
    /// True for events that report a rejected move.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameEvent::BlockedByWall | GameEvent::BlockedByObstacle | GameEvent::BatteryDepleted
        )
    }
}

// The display text is what the player sees in the notice area.
impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::DirtCleaned => write!(f, "Dirt cleaned!"),
            GameEvent::BlockedByWall => write!(f, "Can't move there!"),
            GameEvent::BlockedByObstacle => write!(f, "Ouch! Hit an obstacle!"),
            GameEvent::BatteryDepleted => write!(f, "Battery empty! Wait for the sun."),
            GameEvent::Charging => write!(f, "Charging..."),
            GameEvent::LevelComplete(level) => write!(f, "Level {} complete!", level),
        }
    }
}
