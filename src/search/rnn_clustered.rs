//! Ranged Nearest Neighbors search, with pruning of subtrees that lie
//! entirely outside the query ball.

use distances::Number;

use crate::{metric::checked_distance, node::Node, GnatError, Metric};

use super::{distances_to_child_pivots, lower_bound};

/// Finds all points in the subtree of `root` that are within `radius` of
/// `query`, in no particular order.
///
/// A subtree is descended into only if its lower bound does not exceed the
/// radius. Every point in a surviving leaf is still checked individually, so
/// no reported hit can be outside the ball, even under a metric that
/// violates the triangle inequality.
pub(crate) fn search<'a, I, T: Number, M: Metric<I, T>>(
    root: &'a Node<I, T>,
    metric: &M,
    query: &I,
    radius: T,
) -> Result<Vec<(&'a I, T)>, GnatError> {
    let mut hits = Vec::new();
    let mut frontier = vec![root];
    while let Some(node) = frontier.pop() {
        if node.is_leaf() {
            for item in &node.bucket {
                let d = checked_distance(metric, query, item)?;
                if d <= radius {
                    hits.push((item, d));
                }
            }
        } else {
            let dists = distances_to_child_pivots(node, metric, query)?;
            for (j, child) in node.children.iter().enumerate() {
                if lower_bound(&node.children, &dists, j) <= radius {
                    frontier.push(child);
                }
            }
        }
    }
    Ok(hits)
}
