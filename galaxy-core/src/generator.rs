/// Procedural spiral galaxy generator
use std::f32::consts::TAU;

use nalgebra::Point3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::buffer::PointBuffer;
use crate::params::GenerationParameters;

/// Stateless generator: parameters in, a fresh buffer out.
///
/// Nothing is kept between calls. Callers that hold on to buffers manage
/// their lifetime themselves, see [`crate::PointCloudSlot`].
pub struct GalaxyGenerator;

impl GalaxyGenerator {
    /// Generate with the thread-local random source
    pub fn generate(params: &GenerationParameters) -> PointBuffer {
        Self::generate_with_rng(params, &mut rand::rng())
    }

    /// Generate reproducibly from a seed
    pub fn generate_seeded(params: &GenerationParameters, seed: u64) -> PointBuffer {
        Self::generate_with_rng(params, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn generate_with_rng<R: Rng>(params: &GenerationParameters, rng: &mut R) -> PointBuffer {
        let params = params.sanitized();
        let mut buffer = PointBuffer::with_capacity(params.count, params.size);

        for i in 0..params.count {
            let radius = rng.random::<f32>() * params.radius;
            let branch_angle = Self::branch_angle(i, params.branches);
            let spin_angle = radius * params.spin;
            let angle = branch_angle + spin_angle;

            let offset_x = random_offset(rng, &params, radius);
            let offset_y = random_offset(rng, &params, radius);
            let offset_z = random_offset(rng, &params, radius);

            let position = Point3::new(
                angle.cos() * radius + offset_x,
                offset_y,
                angle.sin() * radius + offset_z,
            );
            let color = params
                .inside_color
                .lerp(params.outside_color, radius / params.radius);

            buffer.push(position, color);
        }

        tracing::debug!(
            count = params.count,
            branches = params.branches,
            radius = params.radius,
            "generated galaxy"
        );

        buffer
    }

    /// Angle of the arm that point `index` is seeded on
    pub fn branch_angle(index: usize, branches: u32) -> f32 {
        let branches = branches.max(1) as usize;
        (index % branches) as f32 / branches as f32 * TAU
    }
}

/// Signed offset along one axis. Raising the sample to `randomness_power`
/// concentrates offsets near zero for powers above 1.
fn random_offset<R: Rng>(rng: &mut R, params: &GenerationParameters, radius: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(params.randomness_power);
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude * params.randomness * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use std::f32::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

    fn small_params() -> GenerationParameters {
        GenerationParameters::default().with_count(2_000)
    }

    #[test]
    fn test_buffer_length_matches_count() {
        for count in [1, 7, 1_000] {
            let params = GenerationParameters::default().with_count(count);
            let buffer = GalaxyGenerator::generate(&params);
            assert_eq!(buffer.len(), count);
            assert_eq!(buffer.positions().len(), count * 3);
            assert_eq!(buffer.colors().len(), count * 3);
        }
    }

    #[test]
    fn test_zero_count_gives_empty_buffer() {
        let params = GenerationParameters::default().with_count(0);
        assert!(GalaxyGenerator::generate_seeded(&params, 1).is_empty());
    }

    #[test]
    fn test_points_stay_within_perturbed_radius() {
        let params = small_params().with_randomness(0.5, 1.0);
        let buffer = GalaxyGenerator::generate_seeded(&params, 7);
        let planar_limit = params.radius * (1.0 + SQRT_2 * params.randomness) + 1e-4;
        let vertical_limit = params.radius * params.randomness + 1e-4;

        for point in buffer.points() {
            let p = point.position;
            assert!((p.x * p.x + p.z * p.z).sqrt() <= planar_limit);
            assert!(p.y.abs() <= vertical_limit);
        }
    }

    #[test]
    fn test_color_channels_in_unit_range() {
        let params = small_params().with_colors(Rgb::new(1.0, 0.2, 0.0), Rgb::new(0.0, 0.9, 1.0));
        let buffer = GalaxyGenerator::generate_seeded(&params, 3);
        assert!(buffer.colors().iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let params = small_params();
        let a = GalaxyGenerator::generate_seeded(&params, 42);
        let b = GalaxyGenerator::generate_seeded(&params, 42);
        let c = GalaxyGenerator::generate_seeded(&params, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_two_branches_without_randomness() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        let blue = Rgb::new(0.0, 0.0, 1.0);
        let params = GenerationParameters::default()
            .with_branches(2)
            .with_count(4)
            .with_radius(1.0)
            .with_randomness(0.0, 1.0)
            .with_spin(0.0)
            .with_colors(red, blue);
        let buffer = GalaxyGenerator::generate_seeded(&params, 11);

        for (i, point) in buffer.points().enumerate() {
            let p = point.position;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r < 1.0);
            assert_eq!(p.y, 0.0);
            assert!(p.z.abs() < 1e-6);
            if i % 2 == 0 {
                assert!(p.x >= 0.0, "even points sit on the arm at angle 0");
            } else {
                assert!(p.x <= 0.0, "odd points sit on the arm at angle pi");
            }

            let expected = red.lerp(blue, r);
            assert!((point.color.r - expected.r).abs() < 1e-5);
            assert!((point.color.b - expected.b).abs() < 1e-5);
            assert_eq!(point.color.g, 0.0);
        }
    }

    #[test]
    fn test_branch_angles_evenly_spaced() {
        assert_eq!(GalaxyGenerator::branch_angle(0, 4), 0.0);
        assert!((GalaxyGenerator::branch_angle(1, 4) - PI / 2.0).abs() < 1e-6);
        assert!((GalaxyGenerator::branch_angle(6, 4) - PI).abs() < 1e-6);
        assert_eq!(GalaxyGenerator::branch_angle(5, 0), 0.0);
    }

    #[test]
    fn test_arms_follow_branch_angles() {
        // Without spin or randomness every point lies exactly on its arm.
        let params = GenerationParameters::default()
            .with_branches(3)
            .with_count(300)
            .with_randomness(0.0, 1.0)
            .with_spin(0.0);
        let buffer = GalaxyGenerator::generate_seeded(&params, 5);

        for (i, point) in buffer.points().enumerate() {
            let p = point.position;
            if (p.x * p.x + p.z * p.z).sqrt() < 1e-3 {
                continue;
            }
            let expected = GalaxyGenerator::branch_angle(i, 3);
            let angle = p.z.atan2(p.x).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-3 || (TAU - diff) < 1e-3);
        }
    }

    #[test]
    fn test_radius_distribution_roughly_uniform() {
        let params = GenerationParameters::default()
            .with_count(20_000)
            .with_radius(2.0)
            .with_randomness(0.0, 1.0);
        let buffer = GalaxyGenerator::generate_seeded(&params, 99);

        let radii: Vec<f32> = buffer
            .points()
            .map(|p| (p.position.x.powi(2) + p.position.z.powi(2)).sqrt())
            .collect();
        let mean = radii.iter().sum::<f32>() / radii.len() as f32;
        assert!((mean - 1.0).abs() < 0.05, "mean radius {mean}");

        let inner = radii.iter().filter(|r| **r < 1.0).count() as f32 / radii.len() as f32;
        assert!((inner - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_higher_power_tightens_arms() {
        let loose = small_params().with_randomness(1.0, 1.0);
        let tight = small_params().with_randomness(1.0, 5.0);
        let spread = |params: &GenerationParameters| {
            let buffer = GalaxyGenerator::generate_seeded(params, 21);
            buffer.points().map(|p| p.position.y.abs()).sum::<f32>() / buffer.len() as f32
        };
        assert!(spread(&tight) < spread(&loose) * FRAC_1_SQRT_2);
    }

    #[test]
    fn test_lower_power_spreads_arms() {
        let loose = small_params().with_randomness(1.0, 1.0);
        let wide = small_params().with_randomness(1.0, 0.3);
        let spread = |params: &GenerationParameters| {
            let buffer = GalaxyGenerator::generate_seeded(params, 21);
            buffer.points().map(|p| p.position.y.abs()).sum::<f32>() / buffer.len() as f32
        };
        assert!(spread(&wide) > spread(&loose) * 1.3);
    }

    #[test]
    fn test_spin_rotates_outer_points_more() {
        let params = GenerationParameters::default()
            .with_branches(1)
            .with_count(500)
            .with_radius(1.0)
            .with_randomness(0.0, 1.0)
            .with_spin(1.0);
        let buffer = GalaxyGenerator::generate_seeded(&params, 8);

        for point in buffer.points() {
            let p = point.position;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            if r < 1e-3 {
                continue;
            }
            // angle == radius * spin for a single arm
            let angle = p.z.atan2(p.x);
            assert!((angle - r).abs() < 1e-3);
        }
    }

    #[test]
    fn test_point_size_carried_through() {
        let params = small_params().with_size(0.07);
        assert_eq!(GalaxyGenerator::generate_seeded(&params, 0).point_size(), 0.07);
    }
}
