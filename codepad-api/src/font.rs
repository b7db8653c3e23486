//! Editor font size bounds.

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 24;
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Clamp any requested size into `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.
pub fn clamp_font_size(requested: i64) -> u32 {
    requested.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u32
}
