//! Rendering of visibility snapshots to terminal text and PPM images.

use crate::grid::Grid;
use std::fs::File;
use std::io::{self, Write};

/// Convert a float value (0.0-1.0) to a byte (0-255)
#[inline]
pub fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Pack an (r, g, b) float color into minifb's 0x00RRGGBB pixel format.
#[inline]
pub fn pack_rgb(r: f32, g: f32, b: f32) -> u32 {
    ((to_byte(r) as u32) << 16) | ((to_byte(g) as u32) << 8) | to_byte(b) as u32
}

/// Render a grid to terminal text, one glyph per cell, top row first.
pub fn render_glyphs<T>(grid: &Grid<T>, glyph: impl Fn(&T) -> char) -> String {
    let mut result = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            result.push(glyph(grid.get(x, y)));
        }
        result.push('\n');
    }
    result
}

/// Save a visibility map to a PPM file: white = visible, black = unseen.
pub fn save_ppm(visibility: &Vec<Vec<bool>>, filename: &str, scale: usize) -> io::Result<()> {
    save_ppm_with_walls(visibility, None, filename, scale)
}

/// Save a visibility map to a PPM file, painting visible opaque tiles of
/// the transparency map gray so walls stand out from lit floor.
pub fn save_ppm_with_walls(
    visibility: &Vec<Vec<bool>>,
    transparency: Option<&Vec<Vec<bool>>>,
    filename: &str,
    scale: usize,
) -> io::Result<()> {
    let height = visibility.len();
    let width = if height > 0 { visibility[0].len() } else { 0 };

    let img_width = width * scale;
    let img_height = height * scale;

    let mut file = File::create(filename)?;
    writeln!(file, "P3")?;
    writeln!(file, "{} {}", img_width, img_height)?;
    writeln!(file, "255")?;

    for img_y in 0..img_height {
        for img_x in 0..img_width {
            let x = img_x / scale;
            let y = img_y / scale;

            let visible = visibility[y][x];
            let is_wall = transparency.map(|t| !t[y][x]).unwrap_or(false);

            let (r, g, b) = if visible && is_wall {
                (128u8, 128u8, 128u8)
            } else if visible {
                (255u8, 255u8, 255u8)
            } else {
                (0u8, 0u8, 0u8)
            };

            write!(file, "{} {} {} ", r, g, b)?;
        }
        writeln!(file)?;
    }

    Ok(())
}
