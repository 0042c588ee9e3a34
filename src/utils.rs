use macroquad::color::Color;

/// Linear interpolation between two f32 values
pub fn lerp(start: f32, end: f32, alpha: f32) -> f32 {
    start + (end - start) * alpha
}

/// Linear interpolation between two colors, channel by channel
pub fn lerp_color(start: Color, end: Color, alpha: f32) -> Color {
    Color::new(
        lerp(start.r, end.r, alpha),
        lerp(start.g, end.g, alpha),
        lerp(start.b, end.b, alpha),
        lerp(start.a, end.a, alpha),
    )
}
