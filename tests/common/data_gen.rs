//! Data generation utilities for testing.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Random points in a `dim`-dimensional cube with sides `[min, max]`.
pub fn random_tabular(car: usize, dim: usize, min: f64, max: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car)
        .map(|_| (0..dim).map(|_| rng.gen_range(min..=max)).collect())
        .collect()
}

/// Random planar poses, each a position in `[-extent, extent]^2` followed by
/// a unit quaternion, stored as `[x, y, qx, qy, qz, qw]`.
pub fn random_poses(car: usize, extent: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car)
        .map(|_| {
            let x = rng.gen_range(-extent..=extent);
            let y = rng.gen_range(-extent..=extent);
            let mut q = [0.0_f64; 4];
            let mut norm = 0.0;
            while norm < 1e-3 {
                q = core::array::from_fn(|_| rng.gen_range(-1.0..=1.0));
                norm = q.iter().map(|v| v * v).sum::<f64>().sqrt();
            }
            let mut pose = vec![x, y];
            pose.extend(q.iter().map(|v| v / norm));
            pose
        })
        .collect()
}

/// The distance between two poses from [`random_poses`]: the planar distance
/// between the positions plus the angle between the orientations. Both terms
/// obey the triangle inequality, so their sum does too.
pub fn pose_distance(a: &Vec<f64>, b: &Vec<f64>) -> f64 {
    let translation = (a[0] - b[0]).hypot(a[1] - b[1]);
    translation + quat_dot(a, b).acos()
}

/// A cheaper pose cost that replaces the angle with `1 - |dot|`. Near zero it
/// grows like the square of the angle, so it violates the triangle
/// inequality.
pub fn pose_cost(a: &Vec<f64>, b: &Vec<f64>) -> f64 {
    let translation = (a[0] - b[0]).hypot(a[1] - b[1]);
    translation + (1.0 - quat_dot(a, b))
}

/// The absolute dot product of two orientations, clamped into the domain of
/// `acos`.
fn quat_dot(a: &[f64], b: &[f64]) -> f64 {
    let dot = a[2..].iter().zip(b[2..].iter()).map(|(p, q)| p * q).sum::<f64>();
    dot.abs().clamp(0.0, 1.0)
}

/// Reorders `points` deterministically, based on `seed`.
pub fn shuffled<I>(mut points: Vec<I>, seed: u64) -> Vec<I> {
    points.shuffle(&mut StdRng::seed_from_u64(seed));
    points
}
