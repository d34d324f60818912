//! The `Gnat` tree and its construction parameters.

use distances::Number;
use rayon::prelude::*;

use crate::{
    metric::checked_distance,
    node::Node,
    search::{knn_search, rnn_search},
    GnatError, Metric, ParMetric,
};

/// Construction parameters for a [`Gnat`].
///
/// The defaults match common practice for in-memory trees: a split arity of
/// 8, allowed to drift between 4 and 12 as subtrees turn out sparse or
/// dense, and leaf buckets of up to 8 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GnatConfig {
    /// The number of children a node aims to split into.
    pub degree: usize,
    /// The smallest split arity allowed when a subtree holds few points.
    pub min_degree: usize,
    /// The largest split arity allowed when a subtree holds many points.
    pub max_degree: usize,
    /// The number of points a leaf may hold before it is split.
    pub max_bucket_size: usize,
}

impl Default for GnatConfig {
    fn default() -> Self {
        Self {
            degree: 8,
            min_degree: 4,
            max_degree: 12,
            max_bucket_size: 8,
        }
    }
}

impl GnatConfig {
    /// Checks that the parameters describe a tree that can be built.
    ///
    /// # Errors
    ///
    /// * If `degree` or `min_degree` is less than 2.
    /// * If `min_degree <= degree <= max_degree` does not hold.
    /// * If `max_bucket_size` is zero.
    pub fn validate(&self) -> Result<(), GnatError> {
        if self.degree < 2 {
            return Err(GnatError::Configuration(format!(
                "degree must be at least 2, got {}",
                self.degree
            )));
        }
        if self.min_degree < 2 || self.min_degree > self.degree || self.degree > self.max_degree {
            return Err(GnatError::Configuration(format!(
                "degrees must satisfy 2 <= min_degree <= degree <= max_degree, got {} <= {} <= {}",
                self.min_degree, self.degree, self.max_degree
            )));
        }
        if self.max_bucket_size == 0 {
            return Err(GnatError::Configuration(
                "max_bucket_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A Geometric Near-neighbor Access Tree over points of type `I`, under a
/// user-supplied [`Metric`].
///
/// The tree supports incremental insertion and removal, and three exact
/// queries: the single nearest neighbor, the `k` nearest neighbors, and all
/// neighbors within a radius. Queries never return a wrong distance; if the
/// metric violates the triangle inequality they may miss a point that a
/// linear scan would find, but every reported hit is genuine.
///
/// Mutation is single-threaded. To query from several threads at once, share
/// the tree behind an `RwLock` or freeze it behind an `Arc` and use the
/// `par_batch_*` helpers.
pub struct Gnat<I, T: Number, M: Metric<I, T>> {
    /// The distance function.
    metric: M,
    /// The construction parameters.
    config: GnatConfig,
    /// The root node. `None` iff the tree is empty.
    root: Option<Node<I, T>>,
    /// The number of points in the tree.
    size: usize,
}

impl<I: Clone, T: Number, M: Metric<I, T>> Gnat<I, T, M> {
    /// Creates an empty tree with the default [`GnatConfig`].
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            config: GnatConfig::default(),
            root: None,
            size: 0,
        }
    }

    /// Creates an empty tree with the given construction parameters.
    ///
    /// # Errors
    ///
    /// * If the parameters fail [`GnatConfig::validate`].
    pub fn with_config(metric: M, config: GnatConfig) -> Result<Self, GnatError> {
        config.validate()?;
        Ok(Self {
            metric,
            config,
            root: None,
            size: 0,
        })
    }

    /// Adds a point to the tree.
    ///
    /// # Errors
    ///
    /// * If the metric returns an invalid distance for the point. The point
    ///   is not added and the tree remains usable, though some distance
    ///   bounds may have been loosened.
    pub fn add(&mut self, point: I) -> Result<(), GnatError> {
        match self.root.as_mut() {
            None => self.root = Some(Node::new_root(point, self.config.degree)),
            Some(root) => {
                let d = checked_distance(&self.metric, &point, &root.pivot)?;
                root.absorb_radius(d);
                root.add(&self.metric, point, &self.config)?;
            }
        }
        self.size += 1;
        Ok(())
    }

    /// Adds every point from the iterator, in order.
    ///
    /// # Errors
    ///
    /// * If any insertion fails; points before the failing one stay in the
    ///   tree, the rest are not added.
    pub fn add_many(&mut self, points: impl IntoIterator<Item = I>) -> Result<(), GnatError> {
        points.into_iter().try_for_each(|point| self.add(point))
    }

    /// Removes one point at distance zero from `point`, returning whether
    /// one was found.
    ///
    /// Only points on the insertion path of `point` are considered, so under
    /// a deterministic metric a previously added point is always found. The
    /// distance bounds are not tightened by removal.
    ///
    /// # Errors
    ///
    /// * If the metric returns an invalid distance.
    pub fn remove(&mut self, point: &I) -> Result<bool, GnatError> {
        let Some(root) = self.root.as_mut() else {
            return Ok(false);
        };
        let removed = root.locate_and_remove(&self.metric, point)?;
        if removed {
            self.size -= 1;
            if self.size == 0 {
                self.root = None;
            }
        }
        Ok(removed)
    }

    /// Removes every point from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// The number of points in the tree.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The distance function of the tree.
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// The construction parameters of the tree.
    pub const fn config(&self) -> &GnatConfig {
        &self.config
    }

    /// Iterates over the points in the tree, in no particular order.
    pub fn iter(&self) -> Items<'_, I, T> {
        Items {
            stack: self.root.iter().collect(),
            bucket: core::slice::Iter::default(),
        }
    }

    /// Finds the point closest to `query` and its distance.
    ///
    /// # Errors
    ///
    /// * If the tree is empty.
    /// * If the metric returns an invalid distance.
    pub fn nearest(&self, query: &I) -> Result<(&I, T), GnatError> {
        if self.is_empty() {
            return Err(GnatError::EmptyTree);
        }
        self.nearest_k(query, 1).map(|hits| {
            hits.into_iter()
                .next()
                .unwrap_or_else(|| unreachable!("the tree is not empty"))
        })
    }

    /// Finds the `k` points closest to `query`, sorted by non-decreasing
    /// distance. If the tree holds fewer than `k` points, all of them are
    /// returned.
    ///
    /// # Errors
    ///
    /// * If `k` is zero.
    /// * If the metric returns an invalid distance.
    pub fn nearest_k(&self, query: &I, k: usize) -> Result<Vec<(&I, T)>, GnatError> {
        if k == 0 {
            return Err(GnatError::InvalidArgument("k must be at least 1".to_string()));
        }
        self.root
            .as_ref()
            .map_or_else(|| Ok(Vec::new()), |root| knn_search(root, &self.metric, query, k))
    }

    /// Finds all points within `radius` of `query`, in no particular order.
    ///
    /// # Errors
    ///
    /// * If `radius` is not a finite, non-negative number.
    /// * If the metric returns an invalid distance.
    pub fn nearest_r(&self, query: &I, radius: T) -> Result<Vec<(&I, T)>, GnatError> {
        if !(radius.as_f64().is_finite() && radius >= T::ZERO) {
            return Err(GnatError::InvalidArgument(format!(
                "radius must be finite and non-negative, got {radius}"
            )));
        }
        self.root.as_ref().map_or_else(
            || Ok(Vec::new()),
            |root| rnn_search(root, &self.metric, query, radius),
        )
    }

    /// [`Gnat::nearest`] for a batch of queries.
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest`].
    pub fn batch_nearest(&self, queries: &[I]) -> Result<Vec<(&I, T)>, GnatError> {
        queries.iter().map(|query| self.nearest(query)).collect()
    }

    /// [`Gnat::nearest_k`] for a batch of queries.
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest_k`].
    pub fn batch_nearest_k(&self, queries: &[I], k: usize) -> Result<Vec<Vec<(&I, T)>>, GnatError> {
        queries.iter().map(|query| self.nearest_k(query, k)).collect()
    }

    /// [`Gnat::nearest_r`] for a batch of queries.
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest_r`].
    pub fn batch_nearest_r(
        &self,
        queries: &[I],
        radius: T,
    ) -> Result<Vec<Vec<(&I, T)>>, GnatError> {
        queries
            .iter()
            .map(|query| self.nearest_r(query, radius))
            .collect()
    }
}

impl<I: Clone + Send + Sync, T: Number, M: ParMetric<I, T>> Gnat<I, T, M> {
    /// Parallel version of [`Gnat::batch_nearest`].
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest`].
    pub fn par_batch_nearest(&self, queries: &[I]) -> Result<Vec<(&I, T)>, GnatError> {
        queries.par_iter().map(|query| self.nearest(query)).collect()
    }

    /// Parallel version of [`Gnat::batch_nearest_k`].
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest_k`].
    pub fn par_batch_nearest_k(
        &self,
        queries: &[I],
        k: usize,
    ) -> Result<Vec<Vec<(&I, T)>>, GnatError> {
        queries
            .par_iter()
            .map(|query| self.nearest_k(query, k))
            .collect()
    }

    /// Parallel version of [`Gnat::batch_nearest_r`].
    ///
    /// # Errors
    ///
    /// * See [`Gnat::nearest_r`].
    pub fn par_batch_nearest_r(
        &self,
        queries: &[I],
        radius: T,
    ) -> Result<Vec<Vec<(&I, T)>>, GnatError> {
        queries
            .par_iter()
            .map(|query| self.nearest_r(query, radius))
            .collect()
    }
}

impl<I, T: Number, M: Metric<I, T>> core::fmt::Debug for Gnat<I, T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gnat")
            .field("metric", &self.metric.name())
            .field("config", &self.config)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<'a, I: Clone, T: Number, M: Metric<I, T>> IntoIterator for &'a Gnat<I, T, M> {
    type Item = &'a I;
    type IntoIter = Items<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the points in a [`Gnat`], in no particular order.
pub struct Items<'a, I, T: Number> {
    /// Nodes whose buckets have not been visited yet.
    stack: Vec<&'a Node<I, T>>,
    /// The bucket currently being drained.
    bucket: core::slice::Iter<'a, I>,
}

impl<'a, I, T: Number> Iterator for Items<'a, I, T> {
    type Item = &'a I;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.bucket.next() {
                return Some(item);
            }
            let node = self.stack.pop()?;
            self.stack.extend(node.children.iter());
            self.bucket = node.bucket.iter();
        }
    }
}
