//! The `Metric` trait is used for all distance computations in the tree.

use distances::Number;

mod absolute_difference;
mod euclidean;
mod manhattan;

pub use absolute_difference::AbsoluteDifference;
pub use euclidean::Euclidean;
pub use manhattan::Manhattan;

use crate::GnatError;

/// A distance function over items of type `I`, with distance values of type
/// `T`.
///
/// The tree assumes that the metric is non-negative (`d(a, b) >= 0`) and
/// symmetric (`d(a, b) == d(b, a)`), and that `d(a, a) == 0`. The triangle
/// inequality is *not* assumed: its absence degrades the pruning bounds from
/// exact to best-effort, but never produces a wrong distance or a crash. See
/// [`Metric::obeys_triangle_inequality`].
///
/// Any closure `Fn(&I, &I) -> T` is a `Metric` via a blanket implementation,
/// so a composite cost can be supplied inline:
///
/// ```rust
/// use gnat::Gnat;
///
/// // Positional distance plus rotational disagreement.
/// let metric = |a: &(f64, f64), b: &(f64, f64)| {
///     (a.0 - b.0).abs() + (1.0 - (a.1 - b.1).cos())
/// };
/// let mut tree = Gnat::new(metric);
/// tree.add((0.0, 0.0)).unwrap();
/// assert_eq!(tree.size(), 1);
/// ```
pub trait Metric<I, T: Number> {
    /// Call the metric on two items.
    fn distance(&self, a: &I, b: &I) -> T;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric satisfies the triangle inequality.
    ///
    /// The triangle inequality is defined as `d(a, b) + d(b, c) >= d(a, c)`
    /// for all items `a`, `b`, and `c`. If it holds, the search results are
    /// exact. If it does not, the tree may prune a subtree that contains a
    /// qualifying point, returning suboptimal-but-true results instead.
    ///
    /// This flag is diagnostic; it is never enforced.
    fn obeys_triangle_inequality(&self) -> bool;
}

/// Marker for metrics that can be called from multiple threads at once.
///
/// Required by the `par_batch_*` query helpers on [`Gnat`](crate::Gnat),
/// which evaluate the metric concurrently for different queries.
#[allow(clippy::module_name_repetitions)]
pub trait ParMetric<I: Send + Sync, T: Number>: Metric<I, T> + Send + Sync {}

impl<I, T: Number, F: Fn(&I, &I) -> T> Metric<I, T> for F {
    fn distance(&self, a: &I, b: &I) -> T {
        self(a, b)
    }

    fn name(&self) -> &str {
        "closure"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        // Unknown for an arbitrary closure, so claim the weaker contract.
        false
    }
}

impl<I: Send + Sync, T: Number, F: Fn(&I, &I) -> T + Send + Sync> ParMetric<I, T> for F {}

/// Computes the distance between two items and validates it at the point of
/// use.
///
/// # Errors
///
/// * If the metric returns a value that is not finite and non-negative.
pub(crate) fn checked_distance<I, T: Number, M: Metric<I, T>>(
    metric: &M,
    a: &I,
    b: &I,
) -> Result<T, GnatError> {
    let d = metric.distance(a, b);
    if d.as_f64().is_finite() && d >= T::ZERO {
        Ok(d)
    } else {
        Err(GnatError::DistanceFunction(d.as_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::{checked_distance, AbsoluteDifference, Euclidean, Metric};
    use crate::GnatError;

    #[test]
    fn builtin_metrics() {
        let (a, b) = (vec![0.0_f64, 0.0], vec![3.0, 4.0]);
        assert_eq!(Euclidean.distance(&a, &b), 5.0);
        assert_eq!(AbsoluteDifference.distance(&-2, &5), 7);
        assert!(Euclidean.obeys_triangle_inequality());
    }

    #[test]
    fn closures_are_metrics() {
        let metric = |a: &i32, b: &i32| a.abs_diff(*b);
        assert_eq!(metric.distance(&3, &-4), 7_u32);
        assert_eq!(metric.name(), "closure");
    }

    #[test]
    fn validation_rejects_bad_distances() {
        let nan = |_: &i32, _: &i32| f64::NAN;
        assert_eq!(
            checked_distance(&nan, &0, &1).map_err(|e| matches!(e, GnatError::DistanceFunction(_))),
            Err(true)
        );

        let negative = |_: &i32, _: &i32| -1.0;
        assert!(checked_distance(&negative, &0, &1).is_err());

        let fine = |a: &i32, b: &i32| f64::from((a - b).abs());
        assert_eq!(checked_distance(&fine, &0, &5), Ok(5.0));
    }
}
