//! Finite point sets.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// Returns `true` if all three coordinates are finite.
#[inline]
#[must_use]
pub fn is_finite_point(point: &Point3<f64>) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

/// An ordered set of world-space points.
///
/// Every point in a `PointSet` is finite: constructors and [`PointSet::push`]
/// drop points with NaN or infinite coordinates. Order is preserved and has no
/// meaning beyond tie-breaking in nearest-neighbor search.
///
/// # Example
///
/// ```
/// use deviation_types::{PointSet, Point3};
///
/// let set = PointSet::from_positions([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(f64::NAN, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 3.0),
/// ]);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set[1], Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<Point3<f64>>", into = "Vec<Point3<f64>>")
)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
}

impl PointSet {
    /// Creates an empty point set.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates an empty point set with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Creates a point set from positions, dropping non-finite ones.
    #[must_use]
    pub fn from_positions(positions: impl IntoIterator<Item = Point3<f64>>) -> Self {
        positions.into_iter().collect()
    }

    /// Appends a point.
    ///
    /// Returns `false` (and leaves the set unchanged) if the point is not finite.
    pub fn push(&mut self, point: Point3<f64>) -> bool {
        if is_finite_point(&point) {
            self.points.push(point);
            true
        } else {
            false
        }
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// The points as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consumes the set, returning the underlying points.
    #[must_use]
    pub fn into_vec(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Axis-aligned bounds of the set. Empty sets give an empty box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.points.iter())
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point3<f64>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl FromIterator<Point3<f64>> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().filter(is_finite_point).collect(),
        }
    }
}

impl From<Vec<Point3<f64>>> for PointSet {
    fn from(points: Vec<Point3<f64>>) -> Self {
        if points.iter().all(is_finite_point) {
            Self { points }
        } else {
            points.into_iter().collect()
        }
    }
}

impl From<PointSet> for Vec<Point3<f64>> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for PointSet {
    type Item = Point3<f64>;
    type IntoIter = std::vec::IntoIter<Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_non_finite() {
        let mut set = PointSet::new();
        assert!(set.push(Point3::new(1.0, 2.0, 3.0)));
        assert!(!set.push(Point3::new(f64::INFINITY, 0.0, 0.0)));
        assert!(!set.push(Point3::new(0.0, f64::NAN, 0.0)));
        assert!(!set.push(Point3::new(0.0, 0.0, f64::NEG_INFINITY)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_vec_keeps_order() {
        let points = vec![
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let set = PointSet::from(points.clone());
        assert_eq!(set.as_slice(), points.as_slice());
    }

    #[test]
    fn from_vec_filters_non_finite() {
        let set = PointSet::from(vec![
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(set.len(), 1);
        assert!((set[0].x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_bounds() {
        let set = PointSet::new();
        assert!(set.is_empty());
        assert!(set.bounds().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_as_plain_point_list() {
        let set = PointSet::from_positions([Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)]);

        let json = serde_json::to_value(&set).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], serde_json::json!([1.0, 2.0, 3.0]));

        let parsed: PointSet = serde_json::from_str("[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]").unwrap();
        assert_eq!(parsed, set);

        let back: PointSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn bounds_cover_points() {
        let set = PointSet::from_positions([Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, -5.0)]);
        let bounds = set.bounds();
        assert_eq!(bounds.min, Point3::new(-1.0, 0.0, -5.0));
        assert_eq!(bounds.max, Point3::new(3.0, 4.0, 2.0));
    }
}
