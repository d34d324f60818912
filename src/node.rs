//! A `Node` in the tree, with the distance bounds used for pruning.

use distances::Number;
use mt_logger::{mt_log, Level};

use crate::{
    metric::checked_distance,
    tree::GnatConfig,
    utils::{arg_max, arg_min},
    GnatError, Metric,
};

/// A single node in a [`Gnat`](crate::Gnat).
///
/// A leaf holds its points in `bucket`. An internal node holds no points of
/// its own; its `bucket` is empty and every point in its subtree lives in the
/// bucket of exactly one leaf below it. Pivots are clones of points, kept
/// only for routing, so the same value may appear as the pivot of several
/// ancestors of the leaf that owns it.
///
/// The distance bounds (`min_radius`, `max_radius`, `min_range`, `max_range`)
/// are maintained as over-approximations. Insertions widen them on the way
/// down and removals never tighten them, so a bound may be looser than the
/// true extremum but never cuts off a point it should cover.
pub(crate) struct Node<I, T: Number> {
    /// The routing point for this node, a clone of one of the points that
    /// were in its bucket when it was created.
    pub pivot: I,
    /// The number of children this node will split into.
    pub degree: usize,
    /// The points owned by this node. Empty for internal nodes.
    pub bucket: Vec<I>,
    /// The children of this node. Empty for leaves, and immutable once set.
    pub children: Vec<Node<I, T>>,
    /// A lower bound on the distance from `pivot` to any point in this
    /// node's subtree.
    pub min_radius: T,
    /// An upper bound on the distance from `pivot` to any point in this
    /// node's subtree.
    pub max_radius: T,
    /// `min_range[j]` is a lower bound on the distance from `pivot` to any
    /// point in the subtree of the `j`th sibling (including this node
    /// itself). Empty for the root.
    pub min_range: Vec<T>,
    /// `max_range[j]` is the corresponding upper bound.
    pub max_range: Vec<T>,
}

impl<I: Clone, T: Number> Node<I, T> {
    /// Creates a root node owning the given first point.
    pub fn new_root(point: I, degree: usize) -> Self {
        Self {
            pivot: point.clone(),
            degree,
            bucket: vec![point],
            children: Vec::new(),
            min_radius: T::ZERO,
            max_radius: T::ZERO,
            min_range: Vec::new(),
            max_range: Vec::new(),
        }
    }

    /// Whether this node holds its points directly.
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Widens the radius bounds to cover a point at distance `d` from this
    /// node's pivot.
    pub fn absorb_radius(&mut self, d: T) {
        if d < self.min_radius {
            self.min_radius = d;
        }
        if d > self.max_radius {
            self.max_radius = d;
        }
    }

    /// Widens the range bounds toward sibling `j` to cover a point at
    /// distance `d` from this node's pivot that is being placed in sibling
    /// `j`'s subtree.
    pub fn absorb_range(&mut self, j: usize, d: T) {
        if d < self.min_range[j] {
            self.min_range[j] = d;
        }
        if d > self.max_range[j] {
            self.max_range[j] = d;
        }
    }

    /// Inserts `point` into this node's subtree, splitting the receiving
    /// leaf if its bucket outgrows `config.max_bucket_size`.
    ///
    /// The caller is responsible for having absorbed the distance from
    /// `point` to this node's pivot into this node's radius bounds.
    ///
    /// # Errors
    ///
    /// * If the metric returns an invalid distance. The point is not added,
    ///   though bounds along the descent path may have been widened.
    pub fn add<M: Metric<I, T>>(
        &mut self,
        metric: &M,
        point: I,
        config: &GnatConfig,
    ) -> Result<(), GnatError> {
        if self.is_leaf() {
            self.bucket.push(point);
            if self.bucket.len() > config.max_bucket_size {
                if let Err(e) = self.split(metric, config) {
                    self.bucket.pop();
                    return Err(e);
                }
            }
            Ok(())
        } else {
            let dists = self
                .children
                .iter()
                .map(|c| checked_distance(metric, &point, &c.pivot))
                .collect::<Result<Vec<_>, _>>()?;
            let (c, d_c) = arg_min(&dists)
                .unwrap_or_else(|| unreachable!("internal nodes have at least two children"));
            for (i, &d) in dists.iter().enumerate() {
                self.children[i].absorb_range(c, d);
            }
            self.children[c].absorb_radius(d_c);
            self.children[c].add(metric, point, config)
        }
    }

    /// Splits this leaf's bucket into up to `self.degree` children.
    ///
    /// Pivots are chosen farthest-first: the first is the bucket point
    /// farthest from this node's pivot, and each subsequent one is the point
    /// farthest from all pivots chosen so far. Selection stops early once
    /// every remaining point coincides with a pivot. If fewer than two
    /// distinct pivots exist the bucket is left intact, over-full, and the
    /// next insertion into it will try again.
    ///
    /// All distances are computed before any state is mutated, so on error
    /// the node is unchanged.
    fn split<M: Metric<I, T>>(&mut self, metric: &M, config: &GnatConfig) -> Result<(), GnatError> {
        let n = self.bucket.len();
        let seed = self
            .bucket
            .iter()
            .map(|x| checked_distance(metric, &self.pivot, x))
            .collect::<Result<Vec<_>, _>>()?;
        let Some((first, _)) = arg_max(&seed) else {
            return Ok(());
        };

        // rows[p][j] is the distance from the p-th pivot to the j-th point.
        let mut pivot_indices = vec![first];
        let mut rows = vec![self.distances_from(metric, first)?];
        let mut min_dists = rows[0].clone();
        while pivot_indices.len() < self.degree {
            let (next, separation) = arg_max(&min_dists)
                .unwrap_or_else(|| unreachable!("the bucket is not empty"));
            if separation == T::ZERO {
                break;
            }
            let row = self.distances_from(metric, next)?;
            for (m, &d) in min_dists.iter_mut().zip(row.iter()) {
                if d < *m {
                    *m = d;
                }
            }
            pivot_indices.push(next);
            rows.push(row);
        }

        let k = pivot_indices.len();
        if k < 2 {
            return Ok(());
        }
        mt_log!(
            Level::Debug,
            "Splitting a bucket of {n} points into {k} children..."
        );

        // Each pivot point goes to its own part. Everything else goes to its
        // closest pivot, the earliest-chosen one on ties.
        let assignment = (0..n)
            .map(|j| {
                pivot_indices.iter().position(|&pi| pi == j).unwrap_or_else(|| {
                    let dists = rows.iter().map(|row| row[j]).collect::<Vec<_>>();
                    arg_min(&dists)
                        .unwrap_or_else(|| unreachable!("at least two pivots were chosen"))
                        .0
                })
            })
            .collect::<Vec<_>>();

        let pivots = pivot_indices
            .iter()
            .map(|&pi| self.bucket[pi].clone())
            .collect::<Vec<_>>();
        let mut parts = (0..k).map(|_| Vec::new()).collect::<Vec<_>>();
        let mut part_rows = (0..k).map(|_| Vec::new()).collect::<Vec<Vec<Vec<T>>>>();
        for (j, item) in core::mem::take(&mut self.bucket).into_iter().enumerate() {
            parts[assignment[j]].push(item);
            part_rows[assignment[j]].push(rows.iter().map(|row| row[j]).collect());
        }

        self.children = pivots
            .into_iter()
            .zip(parts)
            .enumerate()
            .map(|(p, (pivot, bucket))| {
                let degree = ((config.degree * bucket.len()) / n)
                    .clamp(config.min_degree, config.max_degree);
                // Bounds on distances from this pivot to each part.
                let (min_range, max_range) = (0..k)
                    .map(|q| {
                        part_rows[q]
                            .iter()
                            .map(|row| row[p])
                            .fold((T::MAX, T::ZERO), |(lo, hi), d| (lo.min(d), hi.max(d)))
                    })
                    .unzip::<_, _, Vec<_>, Vec<_>>();
                Node {
                    pivot,
                    degree,
                    bucket,
                    children: Vec::new(),
                    min_radius: min_range[p],
                    max_radius: max_range[p],
                    min_range,
                    max_range,
                }
            })
            .collect();

        Ok(())
    }

    /// Distances from the `p`th bucket point to every bucket point.
    fn distances_from<M: Metric<I, T>>(&self, metric: &M, p: usize) -> Result<Vec<T>, GnatError> {
        self.bucket
            .iter()
            .map(|x| checked_distance(metric, &self.bucket[p], x))
            .collect()
    }

    /// Removes one point at distance zero from `query`, if any, following
    /// the same closest-pivot path an insertion of `query` would take.
    ///
    /// Bounds are not tightened by removal.
    ///
    /// # Errors
    ///
    /// * If the metric returns an invalid distance.
    pub fn locate_and_remove<M: Metric<I, T>>(
        &mut self,
        metric: &M,
        query: &I,
    ) -> Result<bool, GnatError> {
        if self.is_leaf() {
            for j in 0..self.bucket.len() {
                if checked_distance(metric, query, &self.bucket[j])? == T::ZERO {
                    self.bucket.remove(j);
                    return Ok(true);
                }
            }
            Ok(false)
        } else {
            let dists = self
                .children
                .iter()
                .map(|c| checked_distance(metric, query, &c.pivot))
                .collect::<Result<Vec<_>, _>>()?;
            let (c, _) = arg_min(&dists)
                .unwrap_or_else(|| unreachable!("internal nodes have at least two children"));
            self.children[c].locate_and_remove(metric, query)
        }
    }
}
