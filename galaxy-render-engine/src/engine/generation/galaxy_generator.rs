use std::f32::consts::TAU;

use bevy::color::Mix;
use bevy::prelude::*;

use super::error::GenerationError;
use super::parameters::{GalaxyParameters, ValidatedParameters};
use super::random_source::RandomSource;

/// One generated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyPoint {
    pub position: Vec3,
    pub color: LinearRgba,
}

/// Ordered positions and colours of one galaxy instance. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalaxyPointCloud {
    positions: Vec<Vec3>,
    colors: Vec<LinearRgba>,
}

impl GalaxyPointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[LinearRgba] {
        &self.colors
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = GalaxyPoint> + '_ {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(&position, &color)| GalaxyPoint { position, color })
    }
}

/// Validate `params`, then generate. Nothing is drawn from `source` when
/// validation fails.
pub fn generate<R: RandomSource + ?Sized>(
    params: &GalaxyParameters,
    source: &mut R,
) -> Result<GalaxyPointCloud, GenerationError> {
    let validated = params.validate()?;
    Ok(generate_validated(validated, source))
}

/// Build the spiral point cloud. Per point, draws from `source` in the order
/// radius, then magnitude and sign for x, y and z.
pub fn generate_validated<R: RandomSource + ?Sized>(
    params: ValidatedParameters<'_>,
    source: &mut R,
) -> GalaxyPointCloud {
    let params = params.get();
    let inside = LinearRgba::from(params.inside_color);
    let outside = LinearRgba::from(params.outside_color);

    let mut positions = Vec::with_capacity(params.count);
    let mut colors = Vec::with_capacity(params.count);

    for i in 0..params.count {
        let radius = source.next_unit() * params.radius;
        let spin_angle = radius * params.spin;
        let angle = branch_angle(i, params.branches) + spin_angle;

        let jitter_x = jitter(source, params, radius);
        let jitter_y = jitter(source, params, radius);
        let jitter_z = jitter(source, params, radius);

        positions.push(Vec3::new(
            angle.cos() * radius + jitter_x,
            jitter_y,
            angle.sin() * radius + jitter_z,
        ));
        colors.push(inside.mix(&outside, blend_factor(radius, params.radius)));
    }

    GalaxyPointCloud { positions, colors }
}

/// Arm a point belongs to, assigned by ordinal position.
pub fn branch_index(index: usize, branches: u32) -> u32 {
    (index % branches as usize) as u32
}

/// Angle of the arm a point belongs to, evenly spaced around the full turn.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    branch_index(index, branches) as f32 / branches as f32 * TAU
}

/// Normalised radial distance in `[0, 1]`; `0` for a degenerate zero radius.
pub fn blend_factor(point_radius: f32, galaxy_radius: f32) -> f32 {
    if galaxy_radius > 0.0 {
        (point_radius / galaxy_radius).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Sharpened, signed offset that grows with distance from the centre.
fn jitter<R: RandomSource + ?Sized>(
    source: &mut R,
    params: &GalaxyParameters,
    point_radius: f32,
) -> f32 {
    let magnitude = source.next_unit().powf(params.randomness_power);
    let sign = source.next_sign();
    magnitude * sign * params.randomness * point_radius
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::f32::consts::PI;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const EPSILON: f32 = 1e-5;

    /// Replays a fixed list of draws.
    struct ScriptedSource(VecDeque<f32>);

    impl ScriptedSource {
        fn new(draws: impl IntoIterator<Item = f32>) -> Self {
            Self(draws.into_iter().collect())
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f32 {
            self.0.pop_front().expect("scripted source exhausted")
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    fn approx_color(a: LinearRgba, b: LinearRgba) -> bool {
        approx(a.red, b.red) && approx(a.green, b.green) && approx(a.blue, b.blue)
    }

    fn sample_params() -> GalaxyParameters {
        GalaxyParameters {
            count: 1_000,
            ..default()
        }
    }

    #[test]
    fn produces_exactly_count_records() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0, 1, 7, 1_000] {
            let params = GalaxyParameters {
                count,
                ..default()
            };
            let cloud = generate(&params, &mut rng).unwrap();
            assert_eq!(cloud.len(), count);
            assert_eq!(cloud.positions().len(), count);
            assert_eq!(cloud.colors().len(), count);
        }
    }

    #[test]
    fn empty_count_is_not_an_error() {
        let params = GalaxyParameters {
            count: 0,
            ..default()
        };
        let cloud = generate(&params, &mut ScriptedSource::new([])).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(cloud.points().len(), 0);
    }

    #[test]
    fn same_seed_same_cloud() {
        let params = sample_params();
        let first = generate(&params, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = generate(&params, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);

        let other = generate(&params, &mut StdRng::seed_from_u64(100)).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn branch_counts_follow_ordinal_assignment() {
        for (count, branches) in [(10usize, 3u32), (100, 7), (5, 5), (3, 4)] {
            for arm in 0..branches {
                let expected = (count as u32).saturating_sub(arm).div_ceil(branches) as usize;
                let actual = (0..count)
                    .filter(|&i| branch_index(i, branches) == arm)
                    .count();
                assert_eq!(actual, expected, "count={count} branches={branches} arm={arm}");
            }
        }
    }

    #[test]
    fn single_branch_keeps_every_point_on_one_arm() {
        let params = GalaxyParameters {
            count: 200,
            branches: 1,
            spin: 0.0,
            randomness: 0.0,
            ..default()
        };
        let cloud = generate(&params, &mut StdRng::seed_from_u64(3)).unwrap();

        for position in cloud.positions() {
            // With no spin or jitter the single arm lies along +x.
            assert!(position.x >= 0.0);
            assert!(approx(position.y, 0.0));
            assert!(approx(position.z, 0.0));
        }
    }

    #[test]
    fn zero_randomness_adds_no_jitter() {
        let params = GalaxyParameters {
            count: 500,
            randomness: 0.0,
            ..default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let cloud = generate(&params, &mut rng).unwrap();

        let mut replay = StdRng::seed_from_u64(5);
        for (i, position) in cloud.positions().iter().enumerate() {
            let radius = replay.next_unit() * params.radius;
            for _ in 0..6 {
                replay.next_unit();
            }
            let angle = branch_angle(i, params.branches) + radius * params.spin;

            assert_eq!(position.y, 0.0);
            assert_eq!(position.x, angle.cos() * radius);
            assert_eq!(position.z, angle.sin() * radius);
        }
    }

    #[test]
    fn points_stay_within_jittered_radius() {
        let params = sample_params();
        let cloud = generate(&params, &mut StdRng::seed_from_u64(8)).unwrap();
        let bound = params.radius * (1.0 + 3f32.sqrt() * params.randomness) + EPSILON;
        for position in cloud.positions() {
            assert!(position.length() <= bound);
        }
    }

    #[test]
    fn blend_factor_is_clamped() {
        assert_eq!(blend_factor(0.0, 5.0), 0.0);
        assert_eq!(blend_factor(5.0, 5.0), 1.0);
        assert_eq!(blend_factor(2.5, 5.0), 0.5);
        assert_eq!(blend_factor(6.0, 5.0), 1.0);
        assert_eq!(blend_factor(0.0, 0.0), 0.0);
    }

    #[test]
    fn zero_radius_collapses_to_origin_with_inside_colour() {
        let params = GalaxyParameters {
            count: 16,
            radius: 0.0,
            ..default()
        };
        let cloud = generate(&params, &mut StdRng::seed_from_u64(2)).unwrap();
        let inside = LinearRgba::from(params.inside_color);

        for point in cloud.points() {
            assert_eq!(point.position, Vec3::ZERO);
            assert!(approx_color(point.color, inside));
        }
    }

    #[test]
    fn invalid_parameters_draw_nothing() {
        let params = GalaxyParameters {
            branches: 0,
            ..default()
        };
        let mut source = ScriptedSource::new([0.25]);
        assert!(generate(&params, &mut source).is_err());
        assert_eq!(source.0.len(), 1);
    }

    #[test]
    fn four_point_scenario() {
        let params = GalaxyParameters {
            count: 4,
            radius: 1.0,
            branches: 2,
            spin: 0.0,
            randomness: 0.0,
            randomness_power: 1.0,
            inside_color: Srgba::rgb_u8(255, 0, 0),
            outside_color: Srgba::rgb_u8(0, 0, 255),
            ..default()
        };

        // Radius draw followed by three (magnitude, sign) pairs per point.
        let draws = [0.0, 0.5, 0.5, 1.0]
            .into_iter()
            .flat_map(|radius| [radius, 0.3, 0.2, 0.3, 0.7, 0.3, 0.2]);
        let cloud = generate(&params, &mut ScriptedSource::new(draws)).unwrap();

        assert_eq!(branch_angle(0, 2), 0.0);
        assert!(approx(branch_angle(1, 2), PI));

        let expected_positions = [
            Vec3::ZERO,
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ];
        for (position, expected) in cloud.positions().iter().zip(expected_positions) {
            assert!(approx_vec(*position, expected), "{position} != {expected}");
        }

        let inside = LinearRgba::rgb(1.0, 0.0, 0.0);
        let mid = LinearRgba::rgb(0.5, 0.0, 0.5);
        let outside = LinearRgba::rgb(0.0, 0.0, 1.0);
        let colors = cloud.colors();
        assert!(approx_color(colors[0], inside));
        assert!(approx_color(colors[1], mid));
        assert!(approx_color(colors[2], mid));
        assert_eq!(colors[1], colors[2]);
        assert!(approx_color(colors[3], outside));
    }

    #[test]
    fn jitter_sign_and_scale_follow_draws() {
        let params = GalaxyParameters {
            count: 1,
            radius: 2.0,
            branches: 1,
            spin: 0.0,
            randomness: 0.5,
            randomness_power: 2.0,
            ..default()
        };
        // radius 1.0; x: 0.5^2 positive; y: 0.5^2 negative; z: 0.0.
        let draws = [0.5, 0.5, 0.1, 0.5, 0.9, 0.0, 0.1];
        let cloud = generate(&params, &mut ScriptedSource::new(draws)).unwrap();

        let expected = Vec3::new(1.0 + 0.25 * 0.5, -0.25 * 0.5, 0.0);
        assert!(approx_vec(cloud.positions()[0], expected));
    }
}
