//! K-Nearest Neighbors search, with a best-first traversal of the tree.

use core::cmp::Reverse;

use distances::Number;

use crate::{
    metric::checked_distance, node::Node, ord_items::MaxItem, GnatError, Metric, SizedHeap,
};

use super::{distances_to_child_pivots, lower_bound, pos_diff};

/// Finds the `k` points in the subtree of `root` that are closest to
/// `query`, sorted by non-decreasing distance.
///
/// Nodes are visited in order of their lower bound on the distance to the
/// query. Once `k` hits have been collected and the smallest outstanding
/// lower bound is no better than the worst hit, no unvisited subtree can
/// improve the result and the traversal stops.
pub(crate) fn search<'a, I, T: Number, M: Metric<I, T>>(
    root: &'a Node<I, T>,
    metric: &M,
    query: &I,
    k: usize,
) -> Result<Vec<(&'a I, T)>, GnatError> {
    let mut candidates = SizedHeap::<Reverse<MaxItem<&Node<I, T>, T>>>::new(None);
    let mut hits = SizedHeap::<MaxItem<&I, T>>::new(Some(k));

    let d_root = checked_distance(metric, query, &root.pivot)?;
    let lb_root = pos_diff(d_root, root.max_radius).max(pos_diff(root.min_radius, d_root));
    candidates.push(Reverse(MaxItem(root, lb_root)));

    while let Some(Reverse(MaxItem(node, lb))) = candidates.pop() {
        if hits.is_full() {
            if let Some(MaxItem(_, worst)) = hits.peek() {
                if lb >= *worst {
                    break;
                }
            }
        }
        if node.is_leaf() {
            for item in &node.bucket {
                let d = checked_distance(metric, query, item)?;
                hits.push(MaxItem(item, d));
            }
        } else {
            let dists = distances_to_child_pivots(node, metric, query)?;
            for (j, child) in node.children.iter().enumerate() {
                let lb = lower_bound(&node.children, &dists, j);
                candidates.push(Reverse(MaxItem(child, lb)));
            }
        }
    }

    let mut hits = hits.items().map(|MaxItem(i, d)| (i, d)).collect::<Vec<_>>();
    hits.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use crate::search::tests::{check_knn_hits, grid_tree, line_tree};

    #[test]
    fn line() {
        let tree = line_tree(100);
        for query in [0, 17, 50, 99] {
            for k in [1, 3, 10] {
                let hits = tree
                    .nearest_k(&query, k)
                    .unwrap_or_else(|e| unreachable!("{e}"));

                let mut expected = (0..100).map(|p| (query - p).abs()).collect::<Vec<_>>();
                expected.sort_unstable();
                expected.truncate(k);

                assert_eq!(hits.iter().map(|&(_, d)| d).collect::<Vec<_>>(), expected);
                assert_eq!(hits[0], (&query, 0));
            }
        }
    }

    #[test]
    fn grid() {
        let tree = grid_tree(20);
        let points = tree.iter().copied().collect::<Vec<_>>();
        let metric = |a: &(f64, f64), b: &(f64, f64)| (a.0 - b.0).hypot(a.1 - b.1);

        for query in [(0.0, 0.0), (9.5, 9.5), (3.2, 17.8), (-5.0, 10.0)] {
            for k in [1, 5, 32] {
                let hits = tree
                    .nearest_k(&query, k)
                    .unwrap_or_else(|e| unreachable!("{e}"));
                check_knn_hits(&metric, &points, &query, k, &hits);
            }
        }
    }

    #[test]
    fn k_larger_than_tree() {
        let tree = line_tree(10);
        let hits = tree.nearest_k(&3, 100).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(hits.len(), 10);
        assert_eq!(hits[0], (&3, 0));
        assert_eq!(hits[9].1, 6);
    }
}
