/// Flat position/color buffers handed to renderers
use nalgebra::Point3;

use crate::color::Rgb;

/// A single point as read back from a [`PointBuffer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub position: Point3<f32>,
    pub color: Rgb,
}

/// Parallel position and color arrays, three floats per point each.
///
/// Only the generator fills a buffer. Once returned it is read-only; a new
/// parameter set produces a new buffer rather than editing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    positions: Vec<f32>,
    colors: Vec<f32>,
    point_size: f32,
}

impl PointBuffer {
    pub(crate) fn with_capacity(count: usize, point_size: f32) -> Self {
        let floats = count.saturating_mul(3);
        Self {
            positions: Vec::with_capacity(floats),
            colors: Vec::with_capacity(floats),
            point_size,
        }
    }

    pub(crate) fn push(&mut self, position: Point3<f32>, color: Rgb) {
        self.positions
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.colors.extend_from_slice(&color.to_array());
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x, y, z, x, y, z, ...]` array
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, r, g, b, ...]` array, indexed like `positions`
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn position(&self, index: usize) -> Option<Point3<f32>> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        let c = self.colors.get(index * 3..index * 3 + 3)?;
        Some(Rgb::new(c[0], c[1], c[2]))
    }

    pub fn points(&self) -> impl Iterator<Item = PointRecord> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| PointRecord {
                position: Point3::new(p[0], p[1], p[2]),
                color: Rgb::new(c[0], c[1], c[2]),
            })
    }

    /// Largest distance from the Y axis over all points
    pub fn planar_extent(&self) -> f32 {
        self.positions
            .chunks_exact(3)
            .map(|p| (p[0] * p[0] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max)
    }

    /// Hand the raw arrays to a renderer: `(positions, colors, point_size)`
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>, f32) {
        (self.positions, self.colors, self.point_size)
    }
}
