//! Grid downsampling.
//!
//! Points are hashed into cubic cells by component-wise floor division; each
//! occupied cell contributes one representative point. Output order is the
//! order in which cells were first occupied.

use deviation_types::PointSet;
use hashbrown::{HashMap, HashSet};
use nalgebra::{Point3, Vector3};

use crate::params::validate_grid_size;
use crate::{CompareResult, DownsampleStrategy};

/// Integer coordinates of a grid cell.
pub type CellKey = (i64, i64, i64);

/// The cell containing `point` for a given cell size.
///
/// Coordinates beyond the `i64` range saturate.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cell_key(point: &Point3<f64>, cell_size: f64) -> CellKey {
    (
        (point.x / cell_size).floor() as i64,
        (point.y / cell_size).floor() as i64,
        (point.z / cell_size).floor() as i64,
    )
}

/// Keeps the first point seen in each occupied cell.
///
/// Deterministic, single pass. Later points in an already occupied cell are
/// dropped, not averaged. Applying it twice with the same cell size gives the
/// same result as applying it once.
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if `cell_size` is not positive and finite.
///
/// # Example
///
/// ```
/// use deviation_compare::downsample;
/// use deviation_types::{PointSet, Point3};
///
/// let points = PointSet::from_positions([
///     Point3::new(0.01, 0.0, 0.0),
///     Point3::new(0.05, 0.0, 0.0), // same 10 cm cell as the first
///     Point3::new(0.15, 0.0, 0.0),
/// ]);
///
/// let reduced = downsample(&points, 0.1).unwrap();
/// assert_eq!(reduced.len(), 2);
/// assert_eq!(reduced[0], Point3::new(0.01, 0.0, 0.0));
/// ```
pub fn downsample(points: &PointSet, cell_size: f64) -> CompareResult<PointSet> {
    downsample_with(points, cell_size, DownsampleStrategy::KeepFirst)
}

/// Downsamples with an explicit representative strategy.
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if `cell_size` is not positive and finite.
pub fn downsample_with(
    points: &PointSet,
    cell_size: f64,
    strategy: DownsampleStrategy,
) -> CompareResult<PointSet> {
    validate_grid_size(cell_size)?;

    Ok(match strategy {
        DownsampleStrategy::KeepFirst => keep_first(points, cell_size),
        DownsampleStrategy::Centroid => centroids(points, cell_size),
    })
}

fn keep_first(points: &PointSet, cell_size: f64) -> PointSet {
    let mut seen: HashSet<CellKey> = HashSet::new();
    let mut result = PointSet::new();

    for point in points {
        if seen.insert(cell_key(point, cell_size)) {
            result.push(*point);
        }
    }

    result
}

fn centroids(points: &PointSet, cell_size: f64) -> PointSet {
    let mut slots: HashMap<CellKey, usize> = HashMap::new();
    let mut sums: Vec<(Vector3<f64>, usize)> = Vec::new();

    for point in points {
        let slot = *slots.entry(cell_key(point, cell_size)).or_insert_with(|| {
            sums.push((Vector3::zeros(), 0));
            sums.len() - 1
        });
        sums[slot].0 += point.coords;
        sums[slot].1 += 1;
    }

    sums.into_iter()
        .map(|(sum, count)| {
            #[allow(clippy::cast_precision_loss)]
            let centroid = sum / count as f64;
            Point3::from(centroid)
        })
        .collect()
}
