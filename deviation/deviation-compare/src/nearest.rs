//! Nearest-neighbor queries against the observed points.

use hashbrown::HashMap;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use tracing::debug;

use crate::NeighborSearch;

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index into the candidate slice.
    pub index: usize,
    /// Euclidean distance to the candidate.
    pub distance: f64,
}

/// Finds the candidate closest to `query` by scanning every candidate.
///
/// Ties go to the earliest candidate. Returns `None` if `candidates` is empty.
///
/// # Example
///
/// ```
/// use deviation_compare::nearest_point;
/// use nalgebra::Point3;
///
/// let candidates = [Point3::new(3.0, 0.0, 0.0), Point3::new(0.0, 4.0, 0.0)];
/// let nearest = nearest_point(&Point3::origin(), &candidates).unwrap();
/// assert_eq!(nearest.index, 0);
/// assert!((nearest.distance - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn nearest_point(query: &Point3<f64>, candidates: &[Point3<f64>]) -> Option<Nearest> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let dist_sq = (candidate - query).norm_squared();
        if best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((index, dist_sq));
        }
    }

    best.map(|(index, dist_sq)| Nearest {
        index,
        distance: dist_sq.sqrt(),
    })
}

/// Leaf capacity of kiddo's default `KdTree`.
///
/// A bucket that fills with points sharing one coordinate on its split axis
/// cannot be split, and kiddo panics.
pub(crate) const KDTREE_BUCKET_SIZE: usize = 32;

/// Returns `true` if some coordinate value repeats at least
/// [`KDTREE_BUCKET_SIZE`] times on one axis.
pub(crate) fn has_crowded_axis(points: &[Point3<f64>]) -> bool {
    (0..3).any(|axis| {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        points.iter().any(|p| {
            // +0.0 folds -0.0 onto 0.0
            let count = counts.entry((p[axis] + 0.0).to_bits()).or_insert(0);
            *count += 1;
            *count >= KDTREE_BUCKET_SIZE
        })
    })
}

/// Observed points prepared for repeated distance queries.
pub(crate) enum ObservedIndex<'a> {
    Scan(&'a [Point3<f64>]),
    Tree(KdTree<f64, 3>),
}

impl<'a> ObservedIndex<'a> {
    /// Builds the index for `search`.
    ///
    /// A KD-tree is only built for non-empty sets the tree can hold; anything
    /// else is scanned, which gives the same distances.
    pub(crate) fn build(points: &'a [Point3<f64>], search: NeighborSearch) -> Self {
        match search {
            NeighborSearch::BruteForce => Self::Scan(points),
            NeighborSearch::KdTree if points.is_empty() => Self::Scan(points),
            NeighborSearch::KdTree if has_crowded_axis(points) => {
                debug!(
                    points = points.len(),
                    bucket_size = KDTREE_BUCKET_SIZE,
                    "Repeated axis values exceed KD-tree bucket, scanning instead"
                );
                Self::Scan(points)
            }
            NeighborSearch::KdTree => {
                let mut tree: KdTree<f64, 3> = KdTree::new();
                for (i, p) in points.iter().enumerate() {
                    tree.add(&[p.x, p.y, p.z], i as u64);
                }
                Self::Tree(tree)
            }
        }
    }

    /// Returns `true` if queries go through a KD-tree.
    #[cfg(test)]
    pub(crate) const fn is_tree(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    /// Distance from `query` to the nearest observed point.
    ///
    /// An index over an empty set is always a scan and returns infinity.
    pub(crate) fn distance(&self, query: &Point3<f64>) -> f64 {
        match self {
            Self::Scan(points) => nearest_point(query, points).map_or(f64::INFINITY, |n| n.distance),
            Self::Tree(tree) => tree
                .nearest_one::<SquaredEuclidean>(&[query.x, query.y, query.z])
                .distance
                .sqrt(),
        }
    }
}
