//! Exact search over the tree.
//!
//! Both algorithms prune subtrees with the same lower bound, derived from the
//! radius bounds of a child and the range bounds its siblings keep toward it.
//! Since the bounds are over-approximations, a pruned subtree can never
//! contain a qualifying point as long as the metric obeys the triangle
//! inequality.

mod knn_best_first;
mod rnn_clustered;

pub(crate) use knn_best_first::search as knn_search;
pub(crate) use rnn_clustered::search as rnn_search;

use distances::Number;

use crate::{metric::checked_distance, node::Node, GnatError, Metric};

/// `a - b`, clamped at zero. Distance values may be unsigned.
pub(crate) fn pos_diff<T: Number>(a: T, b: T) -> T {
    if a > b {
        a - b
    } else {
        T::ZERO
    }
}

/// Distances from `query` to the pivot of each child of `node`.
pub(crate) fn distances_to_child_pivots<I, T: Number, M: Metric<I, T>>(
    node: &Node<I, T>,
    metric: &M,
    query: &I,
) -> Result<Vec<T>, GnatError> {
    node.children
        .iter()
        .map(|c| checked_distance(metric, query, &c.pivot))
        .collect()
}

/// A lower bound on the distance from the query to any point in the subtree
/// of `children[j]`, given the distances from the query to every child
/// pivot.
///
/// Every sibling contributes a bound: a point of subtree `j` lies within
/// `[min_range[j], max_range[j]]` of sibling `i`'s pivot, so its distance to
/// the query is at least `|d_i - r|` for some `r` in that interval. The
/// child's own radius bounds contribute the same way.
pub(crate) fn lower_bound<I, T: Number>(children: &[Node<I, T>], dists: &[T], j: usize) -> T {
    let mut lb = pos_diff(dists[j], children[j].max_radius)
        .max(pos_diff(children[j].min_radius, dists[j]));
    for (i, (child, &d)) in children.iter().zip(dists.iter()).enumerate() {
        if i != j {
            lb = lb
                .max(pos_diff(d, child.max_range[j]))
                .max(pos_diff(child.min_range[j], d));
        }
    }
    lb
}
