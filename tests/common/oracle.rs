//! Brute-force search, used as the ground truth for the tree's results.

use distances::Number;
use gnat::Metric;

/// The distances to the `k` nearest neighbors of `query` among `points`,
/// sorted in non-decreasing order.
pub fn knn_distances<I, T: Number, M: Metric<I, T>>(
    metric: &M,
    points: &[I],
    query: &I,
    k: usize,
) -> Vec<T> {
    let mut dists = points
        .iter()
        .map(|p| metric.distance(query, p))
        .collect::<Vec<_>>();
    dists.sort_by(T::total_cmp);
    dists.truncate(k);
    dists
}

/// The distances to all points within `radius` of `query`, sorted in
/// non-decreasing order.
pub fn rnn_distances<I, T: Number, M: Metric<I, T>>(
    metric: &M,
    points: &[I],
    query: &I,
    radius: T,
) -> Vec<T> {
    let mut dists = points
        .iter()
        .map(|p| metric.distance(query, p))
        .filter(|&d| d <= radius)
        .collect::<Vec<_>>();
    dists.sort_by(T::total_cmp);
    dists
}

/// Checks that the hits returned by the tree carry the same distances, in
/// the same sorted order, as the brute-force ground truth.
pub fn check_hits_by_distance<I>(true_dists: &[f64], hits: &[(&I, f64)], name: &str) {
    assert_eq!(
        true_dists.len(),
        hits.len(),
        "{name}: expected {} hits, got {}",
        true_dists.len(),
        hits.len()
    );
    let mut hit_dists = hits.iter().map(|&(_, d)| d).collect::<Vec<_>>();
    hit_dists.sort_by(f64::total_cmp);
    for (i, (&td, &hd)) in true_dists.iter().zip(hit_dists.iter()).enumerate() {
        assert!(
            float_cmp::approx_eq!(f64, td, hd, ulps = 4),
            "{name}: hit {i} is at distance {hd}, expected {td}"
        );
    }
}
