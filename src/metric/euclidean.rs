//! The `Euclidean` distance metric.

use distances::number::Float;

use super::{Metric, ParMetric};

/// The `Euclidean` distance metric.
pub struct Euclidean;

impl<I: AsRef<[T]>, T: Float> Metric<I, T> for Euclidean {
    fn distance(&self, a: &I, b: &I) -> T {
        distances::vectors::euclidean(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "euclidean"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}

impl<I: AsRef<[T]> + Send + Sync, T: Float> ParMetric<I, T> for Euclidean {}
