/// Character-cell rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point3;
use shapes_core::{Color, FanSink, Projection};
use std::io::Write;

/// Glyph used for filled cells on a colour terminal
const FILL: char = '█';

/// Depth the buffer is cleared to: the far plane
const FAR_DEPTH: f64 = 1.0;

/// Rasterizer holding one colour and one depth value per terminal cell
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    color_buffer: Vec<Option<Color>>,
    background: Color,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![FAR_DEPTH; size],
            color_buffer: vec![None; size],
            background: Color::BLACK,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate the buffers for a new surface size; contents are cleared
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!("resizing raster {}x{} -> {}x{}", self.width, self.height, width, height);
        *self = Self {
            background: self.background,
            ..Self::new(width, height)
        };
    }

    /// Colour of cell `(x, y)`, `None` where nothing was drawn
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        self.color_buffer[y * self.width + x]
    }

    pub fn filled_cells(&self) -> usize {
        self.color_buffer.iter().filter(|c| c.is_some()).count()
    }

    fn rasterize_triangle(&mut self, coords: [(f64, f64, f64); 3], color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                // outside the near/far planes
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.color_buffer[idx] = Some(color);
                }
            }
        }
    }

    /// Write the frame as coloured block characters
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let (br, bg, bb) = self.background.to_rgb8();
        writer.queue(SetBackgroundColor(TermColor::Rgb { r: br, g: bg, b: bb }))?;

        let mut current: Option<Color> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cell(x, y) {
                    Some(color) => {
                        if current != Some(color) {
                            let (r, g, b) = color.to_rgb8();
                            writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                            current = Some(color);
                        }
                        writer.queue(Print(FILL))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// The frame as plain text, one glyph per cell
    pub fn render_plain(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cell(x, y).map_or(' ', glyph));
            }
            out.push('\n');
        }
        out
    }
}

impl FanSink for AsciiRenderer {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.depth_buffer.fill(FAR_DEPTH);
        self.color_buffer.fill(None);
    }

    fn fill_triangle(&mut self, triangle: [Point3<f64>; 3], color: Color) {
        let coords = triangle.map(|p| Projection::to_screen(&p, self.width, self.height));
        self.rasterize_triangle(coords, color);
    }
}

/// Plain-text glyph for a face colour
pub fn glyph(color: Color) -> char {
    match color.to_rgb8() {
        (255, 0, 0) => 'r',
        (0, 255, 0) => 'g',
        (0, 0, 255) => 'b',
        (255, 255, 0) => 'y',
        (255, 0, 255) => 'm',
        (0, 255, 255) => 'c',
        _ => '#',
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
