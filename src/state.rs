// Game state and the pure transition rules that advance it.
//
// Every operation takes the current state by reference and returns a fresh
// one; the driver replaces its copy wholesale. Rejected moves are reported
// as events on the side, never as errors, so a transition always yields a
// usable state.

use crate::config;
use crate::error::LevelError;
use crate::events::GameEvent;
use crate::grid::{Direction, Position, Turn};
use crate::level;
use crate::solar;
use rand::Rng;
use std::collections::HashSet;

/// The numeric knobs the reducer needs from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    pub move_cost: i32,
    pub charge_rate: i32,
}

/// One command for the reducer, from the player or from a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move,
    Rotate(Turn),
    TickSun,
    TickCharge,
}

/// The result of one reduction: the successor state plus whatever advisory
/// events the transition produced.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Complete state of one level in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub robot: Position,
    pub facing: Direction,
    pub dirt: HashSet<Position>,
    pub obstacles: HashSet<Position>,
    pub battery: i32,
    pub sun: i32,
    pub score: u32,
    pub level: u32,
    pub path: Vec<Position>,
    pub grid_size: i32,
}

impl GameState {
    /// Fresh state for the given level: robot at the spawn corner facing
    /// right, full battery, sun at column 0, newly generated layout.
    pub fn new<R: Rng>(
        grid_size: i32,
        level: u32,
        score: u32,
        rng: &mut R,
    ) -> Result<GameState, LevelError> {
        let layout = level::generate(level, grid_size, rng)?;
        Ok(GameState {
            robot: Position::START,
            facing: Direction::Right,
            dirt: layout.dirt,
            obstacles: layout.obstacles,
            battery: config::BATTERY_MAX,
            sun: 0,
            score,
            level,
            path: vec![Position::START],
            grid_size,
        })
    }

    /// The successor level: layout regenerated one level up, score kept,
    /// robot and battery reset. The sun keeps its column so its sweep never
    /// jumps when a level ends.
    pub fn next_level<R: Rng>(&self, rng: &mut R) -> Result<GameState, LevelError> {
        let mut next = GameState::new(self.grid_size, self.level + 1, self.score, rng)?;
        next.sun = self.sun;
        Ok(next)
    }
}

/// Advance the game by one intent. Pure: `state` is never mutated and the
/// same inputs always produce the same transition.
pub fn reduce(state: &GameState, intent: Intent, tuning: &Tuning) -> Transition {
    match intent {
        Intent::Move => apply_move(state, tuning),
        Intent::Rotate(turn) => apply_rotate(state, turn),
        Intent::TickSun => apply_sun_tick(state),
        Intent::TickCharge => apply_charge_tick(state, tuning),
    }
}

fn rejected(state: &GameState, event: GameEvent) -> Transition {
    Transition {
        state: state.clone(),
        events: vec![event],
    }
}

fn quiet(state: GameState) -> Transition {
    Transition {
        state,
        events: Vec::new(),
    }
}

fn apply_move(state: &GameState, tuning: &Tuning) -> Transition {
    // An empty battery blocks movement outright. A low but non-empty one
    // does not: the cost lands afterward and clamps at zero.
    if state.battery <= 0 {
        return rejected(state, GameEvent::BatteryDepleted);
    }

    let candidate = state.robot.step(state.facing, state.grid_size);
    if candidate == state.robot {
        return rejected(state, GameEvent::BlockedByWall);
    }
    if state.obstacles.contains(&candidate) {
        return rejected(state, GameEvent::BlockedByObstacle);
    }

    let mut next = state.clone();
    let mut events = Vec::new();

    next.robot = candidate;
    next.path.push(candidate);

    let cleaned = next.dirt.remove(&candidate);
    if cleaned {
        next.score += 1;
        events.push(GameEvent::DirtCleaned);
    }

    next.battery = solar::adjust_battery(next.battery, -tuning.move_cost);

    // Only the move that cleans the final dirt announces completion; rolling
    // around an already-clean board stays quiet.
    if cleaned && next.dirt.is_empty() {
        events.push(GameEvent::LevelComplete(next.level));
    }

    Transition {
        state: next,
        events,
    }
}

fn apply_rotate(state: &GameState, turn: Turn) -> Transition {
    let mut next = state.clone();
    next.facing = state.facing.rotated(turn);
    quiet(next)
}

fn apply_sun_tick(state: &GameState) -> Transition {
    let mut next = state.clone();
    next.sun = solar::advance_sun(state.sun, state.grid_size);
    quiet(next)
}

fn apply_charge_tick(state: &GameState, tuning: &Tuning) -> Transition {
    if !solar::is_lit(state.robot, state.sun) {
        return quiet(state.clone());
    }
    let charged = solar::adjust_battery(state.battery, tuning.charge_rate);
    if charged == state.battery {
        // Already full; nothing worth reporting.
        return quiet(state.clone());
    }
    let mut next = state.clone();
    next.battery = charged;
    Transition {
        state: next,
        events: vec![GameEvent::Charging],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TUNING: Tuning = Tuning {
        move_cost: 3,
        charge_rate: 10,
    };

    fn empty_board() -> GameState {
        GameState {
            robot: Position::START,
            facing: Direction::Right,
            dirt: HashSet::new(),
            obstacles: HashSet::new(),
            battery: 100,
            sun: 0,
            score: 0,
            level: 1,
            path: vec![Position::START],
            grid_size: 8,
        }
    }

    fn board_with_dirt(cells: &[(i32, i32)]) -> GameState {
        let mut state = empty_board();
        state.dirt = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        state
    }

    #[test]
    fn test_move_advances_drains_and_records() {
        let state = board_with_dirt(&[(5, 5)]);
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.state.robot, Position::new(1, 0));
        assert_eq!(transition.state.battery, 97);
        assert_eq!(
            transition.state.path,
            vec![Position::START, Position::new(1, 0)]
        );
        assert!(transition.events.is_empty());
        // Source state untouched
        assert_eq!(state.robot, Position::START);
        assert_eq!(state.battery, 100);
    }

    #[test]
    fn test_move_into_a_wall_is_rejected() {
        let mut state = board_with_dirt(&[(5, 5)]);
        state.facing = Direction::Up;
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.events, vec![GameEvent::BlockedByWall]);
        assert_eq!(transition.state, state);
    }

    #[test]
    fn test_move_into_an_obstacle_is_rejected() {
        let mut state = board_with_dirt(&[(5, 5)]);
        state.obstacles.insert(Position::new(1, 0));
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.events, vec![GameEvent::BlockedByObstacle]);
        assert_eq!(transition.state, state);
    }

    #[test]
    fn test_move_with_an_empty_battery_is_rejected() {
        let mut state = board_with_dirt(&[(5, 5)]);
        state.battery = 0;
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.events, vec![GameEvent::BatteryDepleted]);
        assert_eq!(transition.state, state);
    }

    #[test]
    fn test_a_nearly_flat_battery_still_moves_and_clamps() {
        // battery 2 with cost 3: the move goes through and the gauge
        // bottoms out at zero rather than blocking up front.
        let mut state = board_with_dirt(&[(5, 5)]);
        state.battery = 2;
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.state.robot, Position::new(1, 0));
        assert_eq!(transition.state.battery, 0);
        assert!(transition.events.is_empty());
    }

    #[test]
    fn test_cleaning_dirt_scores_and_reports() {
        let state = board_with_dirt(&[(1, 0), (5, 5)]);
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(transition.events, vec![GameEvent::DirtCleaned]);
        assert_eq!(transition.state.score, 1);
        assert!(!transition.state.dirt.contains(&Position::new(1, 0)));
        assert_eq!(transition.state.dirt.len(), 1);
    }

    #[test]
    fn test_cleaning_the_last_dirt_completes_the_level() {
        let state = board_with_dirt(&[(1, 0)]);
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert_eq!(
            transition.events,
            vec![GameEvent::DirtCleaned, GameEvent::LevelComplete(1)]
        );
        assert!(transition.state.dirt.is_empty());
        assert_eq!(transition.state.score, 1);
    }

    #[test]
    fn test_completion_is_not_re_emitted_on_a_clean_board() {
        let state = empty_board();
        let transition = reduce(&state, Intent::Move, &TUNING);
        assert!(transition.events.is_empty());
        assert_eq!(transition.state.robot, Position::new(1, 0));
    }

    #[test]
    fn test_rotation_changes_facing_and_nothing_else() {
        let state = board_with_dirt(&[(1, 0)]);
        let transition = reduce(&state, Intent::Rotate(Turn::Left), &TUNING);
        assert_eq!(transition.state.facing, Direction::Up);
        assert!(transition.events.is_empty());

        let mut expected = state.clone();
        expected.facing = Direction::Up;
        assert_eq!(transition.state, expected);
    }

    #[test]
    fn test_rotating_back_restores_the_original_state() {
        let state = board_with_dirt(&[(2, 2)]);
        let once = reduce(&state, Intent::Rotate(Turn::Right), &TUNING);
        let back = reduce(&once.state, Intent::Rotate(Turn::Left), &TUNING);
        assert_eq!(back.state, state);
    }

    #[test]
    fn test_sun_tick_advances_and_wraps() {
        let mut state = empty_board();
        state.sun = 7;
        let transition = reduce(&state, Intent::TickSun, &TUNING);
        assert_eq!(transition.state.sun, 0);
        assert!(transition.events.is_empty());
    }

    #[test]
    fn test_charge_tick_charges_only_under_the_beam() {
        let mut state = empty_board();
        state.battery = 40;
        // Robot at (0, 0) with the sun at column 0: lit.
        let transition = reduce(&state, Intent::TickCharge, &TUNING);
        assert_eq!(transition.state.battery, 50);
        assert_eq!(transition.events, vec![GameEvent::Charging]);

        // Sun far away: nothing happens.
        state.sun = 4;
        let transition = reduce(&state, Intent::TickCharge, &TUNING);
        assert_eq!(transition.state, state);
        assert!(transition.events.is_empty());
    }

    #[test]
    fn test_charge_tick_saturates_silently_at_full() {
        let state = empty_board();
        let transition = reduce(&state, Intent::TickCharge, &TUNING);
        assert_eq!(transition.state.battery, 100);
        assert!(transition.events.is_empty());
    }

    #[test]
    fn test_charge_tick_clamps_at_the_gauge_top() {
        let mut state = empty_board();
        state.battery = 95;
        let transition = reduce(&state, Intent::TickCharge, &TUNING);
        assert_eq!(transition.state.battery, 100);
        assert_eq!(transition.events, vec![GameEvent::Charging]);
    }

    #[test]
    fn test_new_state_spawns_at_the_corner() {
        let mut rng = StdRng::seed_from_u64(11);
        let state = GameState::new(8, 1, 0, &mut rng).unwrap();
        assert_eq!(state.robot, Position::START);
        assert_eq!(state.facing, Direction::Right);
        assert_eq!(state.battery, 100);
        assert_eq!(state.sun, 0);
        assert_eq!(state.path, vec![Position::START]);
        assert!(!state.dirt.is_empty());
        assert!(!state.dirt.contains(&Position::START));
        assert!(!state.obstacles.contains(&Position::START));
    }

    #[test]
    fn test_next_level_carries_score_and_sun_only() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut state = GameState::new(8, 1, 0, &mut rng).unwrap();
        state.score = 9;
        state.sun = 5;
        state.battery = 17;
        state.robot = Position::new(4, 4);
        state.path.push(Position::new(4, 4));

        let next = state.next_level(&mut rng).unwrap();
        assert_eq!(next.level, 2);
        assert_eq!(next.score, 9);
        assert_eq!(next.sun, 5);
        assert_eq!(next.battery, 100);
        assert_eq!(next.robot, Position::START);
        assert_eq!(next.path, vec![Position::START]);
        assert_eq!(next.dirt.len(), crate::level::dirt_count(2, 8));
    }
}
