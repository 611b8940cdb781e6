/// Galaxy generation parameters and their clamping rules
use crate::color::Rgb;

/// Smallest radius a galaxy may have after sanitizing
pub const MIN_RADIUS: f32 = 1e-4;
/// Smallest randomness exponent after sanitizing
pub const MIN_POWER: f32 = 1e-3;
/// Smallest point size after sanitizing
pub const MIN_SIZE: f32 = 1e-4;
/// Largest point count after sanitizing
pub const MAX_COUNT: usize = 10_000_000;

/// Parameter set consumed by the generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    /// Number of spiral arms
    pub branches: u32,
    /// Number of points to synthesize
    pub count: usize,
    pub radius: f32,
    /// Scale of the per-axis random offset, relative to the point's radius
    pub randomness: f32,
    /// Exponent applied to the random offset; values above 1 pull points
    /// towards the arm centre line
    pub randomness_power: f32,
    /// Extra rotation per unit of radius
    pub spin: f32,
    /// Rendered point size, carried through to the buffer
    pub size: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            branches: 3,
            count: 100_000,
            radius: 5.0,
            randomness: 0.2,
            randomness_power: 3.0,
            spin: 1.0,
            size: 0.01,
            // #ff6030
            inside_color: Rgb::new(1.0, 96.0 / 255.0, 48.0 / 255.0),
            // #1b3984
            outside_color: Rgb::new(27.0 / 255.0, 57.0 / 255.0, 132.0 / 255.0),
        }
    }
}

impl GenerationParameters {
    pub fn with_branches(mut self, branches: u32) -> Self {
        self.branches = branches;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_randomness(mut self, randomness: f32, power: f32) -> Self {
        self.randomness = randomness;
        self.randomness_power = power;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_colors(mut self, inside: Rgb, outside: Rgb) -> Self {
        self.inside_color = inside;
        self.outside_color = outside;
        self
    }

    /// Clamp every field into its valid range.
    ///
    /// Non-finite values fall back to the default for that field, then
    /// lower bounds apply. A count of zero is kept and yields an empty
    /// buffer; counts above `MAX_COUNT` are capped. Zero branches become one.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            branches: self.branches.max(1),
            count: self.count.min(MAX_COUNT),
            radius: finite_or(self.radius, defaults.radius).max(MIN_RADIUS),
            randomness: finite_or(self.randomness, defaults.randomness).max(0.0),
            randomness_power: finite_or(self.randomness_power, defaults.randomness_power)
                .max(MIN_POWER),
            spin: finite_or(self.spin, defaults.spin),
            size: finite_or(self.size, defaults.size).max(MIN_SIZE),
            inside_color: self.inside_color.clamped(),
            outside_color: self.outside_color.clamped(),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
