use crate::config::{self, GameConfig};
use crate::error::LevelError;
use crate::events::GameEvent;
use crate::grid::Turn;
use crate::render::Renderer;
use crate::state::{self, GameState, Intent, Tuning};
use log::{info, warn};
use macroquad::prelude::{KeyCode, get_frame_time, is_key_pressed, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

const MAX_NOTICES: usize = 4;

/// A short-lived on-screen message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub age: f32,
}

/// The Game struct owns the authoritative state and everything around it:
/// the two fixed-cadence timers, input dispatch, the level-complete window,
/// and progress persistence. All rule changes go through the reducer.
pub struct Game {
    state: GameState,
    tuning: Tuning,
    config_path: PathBuf,
    rng: StdRng,
    sun_interval: f32,
    charge_interval: f32,
    sun_accumulator: f32,
    charge_accumulator: f32,
    level_delay: Option<f32>,
    notices: Vec<Notice>,
}

impl Game {
    /// Create a game resuming from the saved level and score.
    pub fn new(config: GameConfig, config_path: PathBuf) -> Result<Self, LevelError> {
        let mut rng = StdRng::from_entropy();
        let level = config.last_level.max(1);
        let state = GameState::new(config.grid_size, level, config.last_score, &mut rng)?;
        info!(
            "Level {} ready: {} dirt, {} obstacles on a {}x{} grid",
            state.level,
            state.dirt.len(),
            state.obstacles.len(),
            config.grid_size,
            config.grid_size
        );

        Ok(Game {
            tuning: config.tuning(),
            sun_interval: config.sun_move_interval as f32 / 1000.0,
            charge_interval: config::CHARGE_INTERVAL_MS as f32 / 1000.0,
            state,
            config_path,
            rng,
            sun_accumulator: 0.0,
            charge_accumulator: 0.0,
            level_delay: None,
            notices: Vec::new(),
        })
    }

    /// Run the main loop until the window closes.
    pub async fn run(&mut self, renderer: &Renderer) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting main loop...");

        while !Renderer::window_should_close() {
            let frame_time = get_frame_time();
            self.tick_frame(frame_time, Self::poll_intent())?;

            let banner = self
                .level_delay
                .map(|_| format!("Level {} complete!", self.state.level));
            renderer.draw_frame(&self.state, banner.as_deref(), &self.notices);
            next_frame().await;
        }

        info!("Exiting Sunvac.");
        Ok(())
    }

    /// Advance one frame: run any timers that came due, then either count
    /// down the level-complete window or apply the player's intent.
    fn tick_frame(&mut self, frame_time: f32, intent: Option<Intent>) -> Result<(), LevelError> {
        self.step_timers(frame_time);

        if let Some(remaining) = self.level_delay {
            let remaining = remaining - frame_time;
            if remaining <= 0.0 {
                self.advance_level()?;
            } else {
                self.level_delay = Some(remaining);
            }
        } else if let Some(intent) = intent {
            self.dispatch(intent);
        }

        for notice in self.notices.iter_mut() {
            notice.age += frame_time;
        }
        self.notices.retain(|n| n.age < config::NOTICE_TTL_SECS);
        Ok(())
    }

    // Fixed-cadence updates. Both timers run off accumulated frame time and
    // keep running through level changes, so the sun's sweep never stutters.
    fn step_timers(&mut self, frame_time: f32) {
        self.sun_accumulator += frame_time;
        while self.sun_accumulator >= self.sun_interval {
            self.sun_accumulator -= self.sun_interval;
            self.dispatch(Intent::TickSun);
        }

        self.charge_accumulator += frame_time;
        while self.charge_accumulator >= self.charge_interval {
            self.charge_accumulator -= self.charge_interval;
            self.dispatch(Intent::TickCharge);
        }
    }

    fn poll_intent() -> Option<Intent> {
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            Some(Intent::Move)
        } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            Some(Intent::Rotate(Turn::Left))
        } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            Some(Intent::Rotate(Turn::Right))
        } else {
            None
        }
    }

    /// Run one intent through the reducer and install the result.
    fn dispatch(&mut self, intent: Intent) {
        let transition = state::reduce(&self.state, intent, &self.tuning);
        self.state = transition.state;
        self.react(intent, &transition.events);
    }

    fn react(&mut self, intent: Intent, events: &[GameEvent]) {
        match intent {
            Intent::Move => crate::debug_input!(
                "Move -> {:?}, battery {}",
                self.state.robot,
                self.state.battery
            ),
            Intent::Rotate(turn) => {
                crate::debug_input!("Rotate {:?} -> facing {:?}", turn, self.state.facing)
            }
            Intent::TickSun => crate::debug_solar!("Sun advanced to column {}", self.state.sun),
            Intent::TickCharge => {}
        }

        for event in events {
            match event {
                GameEvent::LevelComplete(level) => {
                    info!("Level {} cleared with score {}", level, self.state.score);
                    self.level_delay = Some(config::LEVEL_BANNER_SECS);
                }
                GameEvent::Charging => {
                    // The battery bar already shows this; a notice per tick
                    // would flood the queue.
                    crate::debug_solar!("Charging: battery at {}", self.state.battery);
                }
                GameEvent::DirtCleaned => {
                    crate::debug_state!(
                        "Dirt cleaned at {:?}, score {}",
                        self.state.robot,
                        self.state.score
                    );
                    self.push_notice(event.to_string());
                }
                rejection => {
                    crate::debug_state!("Move rejected: {:?}", rejection);
                    self.push_notice(rejection.to_string());
                }
            }
        }

        if intent == Intent::Move && !events.iter().any(|e| e.is_rejection()) {
            self.persist_progress();
        }
    }

    /// Install the next level once the banner delay runs out.
    fn advance_level(&mut self) -> Result<(), LevelError> {
        self.state = self.state.next_level(&mut self.rng)?;
        self.level_delay = None;
        crate::debug_level!(
            "Level {} installed: {} dirt, {} obstacles",
            self.state.level,
            self.state.dirt.len(),
            self.state.obstacles.len()
        );
        info!("Starting level {}", self.state.level);
        self.persist_progress();
        Ok(())
    }

    // The game owns only lastLevel/lastScore in the blob, so the file is
    // re-read before each save: a session grid override or an edit made
    // outside the game never lands back in it. Losing a write only costs
    // the resume point, so failures are warnings and the session keeps
    // going.
    fn persist_progress(&self) {
        let mut saved = match GameConfig::load(&self.config_path) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Could not save progress: {}", e);
                return;
            }
        };
        saved.last_level = self.state.level;
        saved.last_score = self.state.score;
        if let Err(e) = saved.save(&self.config_path) {
            warn!("Could not save progress: {}", e);
        }
    }

    fn push_notice(&mut self, text: String) {
        self.notices.push(Notice { text, age: 0.0 });
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }
}
