//! The `AbsoluteDifference` metric.

use distances::Number;

use super::{Metric, ParMetric};

/// The `AbsoluteDifference` metric measures the absolute difference between
/// two values. It is meant to be used with scalars.
pub struct AbsoluteDifference;

impl<T: Number> Metric<T, T> for AbsoluteDifference {
    fn distance(&self, a: &T, b: &T) -> T {
        a.abs_diff(*b)
    }

    fn name(&self) -> &str {
        "absolute-difference"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}

impl<T: Number> ParMetric<T, T> for AbsoluteDifference {}
