/// Additive point splatting for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use galaxy_core::{Camera, PointBuffer, Rgb, Transform};
use nalgebra::Matrix4;
use std::io::Write;

/// Character ramp for accumulated density (empty to saturated)
const DENSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Point size that contributes a weight of 1.0 per point
const REFERENCE_POINT_SIZE: f32 = 0.01;

/// Splats points into a character grid.
///
/// Points never occlude each other: every point landing in a cell adds its
/// weight and color to that cell, like additive blending with depth writes
/// turned off.
pub struct PointRenderer {
    width: usize,
    height: usize,
    weight: Vec<f32>,
    color_sum: Vec<[f32; 3]>,
}

impl PointRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            weight: vec![0.0; size],
            color_sum: vec![[0.0; 3]; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.weight.fill(0.0);
        self.color_sum.fill([0.0; 3]);
    }

    /// Accumulate every visible point; returns how many landed on screen
    pub fn render_points(
        &mut self,
        buffer: &PointBuffer,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) -> usize {
        let mvp = Transform::mvp_matrix(
            model_matrix,
            &camera.view_matrix(),
            &camera.projection_matrix(),
        );
        let splat = buffer.point_size() / REFERENCE_POINT_SIZE;
        let (w, h) = (self.width as u32, self.height as u32);
        let mut drawn = 0;

        for point in buffer.points() {
            let Some((x, y, _depth)) = camera.project_with(&mvp, &point.position, w, h) else {
                continue;
            };
            let (cx, cy) = (x as usize, y as usize);
            if cx >= self.width || cy >= self.height {
                continue;
            }

            let idx = cy * self.width + cx;
            self.weight[idx] += splat;
            let sum = &mut self.color_sum[idx];
            sum[0] += point.color.r * splat;
            sum[1] += point.color.g * splat;
            sum[2] += point.color.b * splat;
            drawn += 1;
        }

        drawn
    }

    fn max_weight(&self) -> f32 {
        self.weight.iter().copied().fold(0.0, f32::max)
    }

    /// Character and tint for a cell, `None` when nothing landed there
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Rgb)> {
        self.shade(y * self.width + x, self.max_weight())
    }

    fn shade(&self, idx: usize, max_weight: f32) -> Option<(char, Rgb)> {
        let weight = *self.weight.get(idx)?;
        if weight <= 0.0 || max_weight <= 0.0 {
            return None;
        }

        // Log scale so sparse outer arms stay visible next to a dense core
        let level = (1.0 + weight).ln() / (1.0 + max_weight).ln();
        let steps = (DENSITY_RAMP.len() - 1) as f32;
        let index = 1 + (level * (steps - 1.0)).round() as usize;
        let character = DENSITY_RAMP[index.min(DENSITY_RAMP.len() - 1)];

        let sum = self.color_sum[idx];
        let brightness = 0.35 + 0.65 * level;
        let tint = Rgb::new(
            sum[0] / weight * brightness,
            sum[1] / weight * brightness,
            sum[2] / weight * brightness,
        )
        .clamped();

        Some((character, tint))
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let max_weight = self.max_weight();
        for y in 0..self.height {
            for x in 0..self.width {
                match self.shade(y * self.width + x, max_weight) {
                    Some((c, tint)) => {
                        writer.queue(SetForegroundColor(to_terminal_color(tint)))?;
                        writer.queue(Print(c))?;
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
}

fn to_terminal_color(color: Rgb) -> Color {
    let [r, g, b] = color.to_array().map(|c| (c * 255.0).round() as u8);
    Color::Rgb { r, g, b }
}
