use crate::config;
use crate::game::Notice;
use crate::grid::Position;
use crate::solar;
use crate::state::GameState;
use crate::utils;
use macroquad::prelude::*;

const GRID_LINE_THICKNESS: f32 = 1.0;
const ROBOT_RADIUS_FRACTION: f32 = 0.36;
const DIRT_RADIUS_FRACTION: f32 = 0.22;
const TRAIL_MAX_ALPHA: f32 = 0.8;
const BATTERY_SEGMENTS: i32 = 10;

// Battery bar gradient: red when nearly flat, through yellow, to green.
fn battery_gradient_color(ratio: f32) -> Color {
    let green = Color::new(0.20, 0.85, 0.30, 1.0);
    let yellow = Color::new(0.95, 0.85, 0.20, 1.0);
    let red = Color::new(0.90, 0.20, 0.15, 1.0);
    if ratio > 0.5 {
        utils::lerp_color(yellow, green, (ratio - 0.5) * 2.0)
    } else {
        utils::lerp_color(red, yellow, ratio * 2.0)
    }
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Handles rendering the game state using macroquad
pub struct Renderer {
    tile: f32,
    board_px: f32,
    window_height: f32,
}

impl Renderer {
    pub fn new(grid_size: i32, tile_size: i32) -> Self {
        let tile = tile_size as f32;
        let board_px = grid_size as f32 * tile;
        Renderer {
            tile,
            board_px,
            window_height: board_px.max(config::MIN_WINDOW_HEIGHT as f32),
        }
    }

    /// Total window size for this board: the grid plus the side panel.
    pub fn window_size(&self) -> (f32, f32) {
        (
            self.board_px + config::UI_PANEL_WIDTH as f32,
            self.window_height,
        )
    }

    pub fn draw_frame(&self, state: &GameState, banner: Option<&str>, notices: &[Notice]) {
        clear_background(Color::from_rgba(24, 26, 34, 255));

        self.draw_board_background(state);
        self.draw_sunbeam(state);
        self.draw_trail(state);
        self.draw_dirt(state);
        self.draw_obstacles(state);
        self.draw_grid_lines(state);
        self.draw_robot(state);
        self.draw_ui_panel(state);
        self.draw_notices(notices);

        if let Some(msg) = banner {
            self.draw_banner(msg);
        }
    }

    fn cell_origin(&self, cell: Position) -> Vec2 {
        Vec2::new(cell.x as f32 * self.tile, cell.y as f32 * self.tile)
    }

    fn cell_center(&self, cell: Position) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.tile / 2.0)
    }

    fn draw_board_background(&self, _state: &GameState) {
        draw_rectangle(
            0.0,
            0.0,
            self.board_px,
            self.board_px,
            Color::from_rgba(32, 35, 46, 255),
        );
    }

    // Gold wash over the lit cells, plus a small disc marking the sun's
    // center column.
    fn draw_sunbeam(&self, state: &GameState) {
        for x in 0..state.grid_size {
            let cell = Position::new(x, 0);
            if solar::is_lit(cell, state.sun) {
                let origin = self.cell_origin(cell);
                draw_rectangle(
                    origin.x,
                    origin.y,
                    self.tile,
                    self.tile,
                    Color::from_rgba(255, 215, 90, 70),
                );
            }
        }
        let sun_center = self.cell_center(Position::new(state.sun, 0));
        draw_circle(sun_center.x, sun_center.y - self.tile * 0.26, self.tile * 0.14, GOLD);
    }

    // Visited cells fade from a faint green (oldest) to pale yellow
    // (newest), the alpha rising with recency.
    fn draw_trail(&self, state: &GameState) {
        let old = Color::from_rgba(150, 230, 175, 255);
        let new = Color::from_rgba(243, 246, 140, 255);
        let len = state.path.len();
        for (index, cell) in state.path.iter().enumerate() {
            let t = (index + 1) as f32 / len as f32;
            let color = faded_color(utils::lerp_color(old, new, t), t * TRAIL_MAX_ALPHA);
            let origin = self.cell_origin(*cell);
            draw_rectangle(origin.x, origin.y, self.tile, self.tile, color);
        }
    }

    fn draw_dirt(&self, state: &GameState) {
        for cell in &state.dirt {
            let center = self.cell_center(*cell);
            draw_circle(
                center.x,
                center.y,
                self.tile * DIRT_RADIUS_FRACTION,
                Color::from_rgba(139, 69, 19, 255),
            );
            draw_circle(
                center.x - self.tile * 0.12,
                center.y - self.tile * 0.10,
                self.tile * 0.07,
                Color::from_rgba(100, 50, 14, 255),
            );
        }
    }

    fn draw_obstacles(&self, state: &GameState) {
        let inset = self.tile * 0.08;
        for cell in &state.obstacles {
            let origin = self.cell_origin(*cell);
            draw_rectangle(
                origin.x + inset,
                origin.y + inset,
                self.tile - 2.0 * inset,
                self.tile - 2.0 * inset,
                Color::from_rgba(120, 124, 134, 255),
            );
            draw_rectangle_lines(
                origin.x + inset,
                origin.y + inset,
                self.tile - 2.0 * inset,
                self.tile - 2.0 * inset,
                2.0,
                Color::from_rgba(80, 84, 94, 255),
            );
        }
    }

    fn draw_grid_lines(&self, state: &GameState) {
        let line_color = Color::from_rgba(60, 64, 76, 255);
        for i in 0..=state.grid_size {
            let offset = i as f32 * self.tile;
            draw_line(
                offset,
                0.0,
                offset,
                self.board_px,
                GRID_LINE_THICKNESS,
                line_color,
            );
            draw_line(
                0.0,
                offset,
                self.board_px,
                offset,
                GRID_LINE_THICKNESS,
                line_color,
            );
        }
    }

    // Round body with a white heading bar, like a top-down vacuum.
    fn draw_robot(&self, state: &GameState) {
        let center = self.cell_center(state.robot);
        let radius = self.tile * ROBOT_RADIUS_FRACTION;
        let body_color = Color::from_rgba(64, 120, 200, 255);

        draw_circle(center.x, center.y, radius, body_color);
        draw_circle_lines(center.x, center.y, radius, 2.0, Color::from_rgba(30, 60, 110, 255));

        let (dx, dy) = state.facing.delta();
        let tip = center + Vec2::new(dx as f32, dy as f32) * radius * 0.75;
        draw_line(center.x, center.y, tip.x, tip.y, 3.0, WHITE);
    }

    fn draw_ui_panel(&self, state: &GameState) {
        let panel_x = self.board_px;
        let panel_width = config::UI_PANEL_WIDTH as f32;
        let padding = 10.0;
        let mut y = 30.0;

        // Panel background (dark indigo)
        draw_rectangle(
            panel_x,
            0.0,
            panel_width,
            self.window_height,
            Color::from_rgba(20, 20, 50, 255),
        );

        draw_text("SUNVAC", panel_x + padding, y, 26.0, GOLD);
        y += 34.0;

        draw_text(
            &format!("Level {}", state.level),
            panel_x + padding,
            y,
            20.0,
            WHITE,
        );
        y += 24.0;
        draw_text(
            &format!("Score {}", state.score),
            panel_x + padding,
            y,
            20.0,
            WHITE,
        );
        y += 24.0;
        draw_text(
            &format!("Dirt left {}", state.dirt.len()),
            panel_x + padding,
            y,
            20.0,
            WHITE,
        );
        y += 32.0;

        // Battery readout: label, segmented gradient bar, charge indicator
        draw_text("Battery", panel_x + padding, y, 16.0, LIGHTGRAY);
        let value_text = format!("{}%", state.battery);
        let value_dims = measure_text(&value_text, None, 16, 1.0);
        draw_text(
            &value_text,
            panel_x + panel_width - padding - value_dims.width,
            y,
            16.0,
            LIGHTGRAY,
        );
        y += 8.0;

        let bar_x = panel_x + padding;
        let bar_width = panel_width - 2.0 * padding;
        let bar_height = 10.0;
        let ratio = state.battery as f32 / config::BATTERY_MAX as f32;
        draw_rectangle(bar_x, y, bar_width, bar_height, Color::from_rgba(44, 48, 60, 255));

        let segment_gap = 2.0;
        let total_gap = segment_gap * (BATTERY_SEGMENTS - 1) as f32;
        let segment_width = (bar_width - total_gap) / BATTERY_SEGMENTS as f32;
        let filled = (ratio * BATTERY_SEGMENTS as f32).ceil() as i32;
        for i in 0..filled {
            let segment_x = bar_x + (segment_width + segment_gap) * i as f32;
            let segment_ratio = (i + 1) as f32 / BATTERY_SEGMENTS as f32;
            // The last segment may be partial
            let width = if i == filled - 1 {
                (bar_width * ratio) - ((segment_width + segment_gap) * i as f32)
            } else {
                segment_width
            }
            .max(0.0)
            .min(segment_width);
            draw_rectangle(
                segment_x,
                y,
                width,
                bar_height,
                battery_gradient_color(segment_ratio),
            );
        }
        y += bar_height + 18.0;

        if solar::is_lit(state.robot, state.sun) {
            draw_text("CHARGING", panel_x + padding, y, 16.0, GOLD);
        }

        // Key help pinned to the bottom
        let mut help_y = self.window_height - 78.0;
        for line in [
            "W / Up      forward",
            "A / Left    turn left",
            "D / Right   turn right",
            "Esc         quit",
        ] {
            draw_text(line, panel_x + padding, help_y, 14.0, LIGHTGRAY);
            help_y += 18.0;
        }
    }

    // Transient messages stack up from the bottom-left corner of the board
    // and fade out as they age.
    fn draw_notices(&self, notices: &[Notice]) {
        let mut y = self.board_px - 16.0;
        for notice in notices.iter().rev() {
            let alpha = (1.0 - notice.age / config::NOTICE_TTL_SECS).clamp(0.0, 1.0);
            let dims = measure_text(&notice.text, None, 18, 1.0);
            draw_rectangle(
                8.0,
                y - 16.0,
                dims.width + 12.0,
                22.0,
                faded_color(Color::from_rgba(0, 0, 0, 170), alpha),
            );
            draw_text(
                &notice.text,
                14.0,
                y,
                18.0,
                faded_color(WHITE, alpha),
            );
            y -= 26.0;
        }
    }

    fn draw_banner(&self, msg: &str) {
        let rect_width = (self.board_px * 0.8).max(260.0);
        let rect_height = 100.0;
        let x = (self.board_px / 2.0) - (rect_width / 2.0);
        let y = (self.board_px / 2.0) - (rect_height / 2.0);
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 190));
        draw_rectangle_lines(x, y, rect_width, rect_height, 2.0, GOLD);

        let font_size = 30.0;
        let text_dims = measure_text(msg, None, font_size as u16, 1.0);
        let text_x = x + (rect_width - text_dims.width) / 2.0;
        let text_y = y + rect_height / 2.0;
        draw_text(msg, text_x, text_y, font_size, WHITE);

        let hint = "Next level starting...";
        let hint_size = 16.0;
        let hint_dims = measure_text(hint, None, hint_size as u16, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        draw_text(hint, hint_x, y + rect_height - 18.0, hint_size, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}
