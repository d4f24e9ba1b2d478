//! World-space point extraction.

use deviation_types::{Aabb, PointSet, is_finite_point};
use tracing::{debug, warn};

use crate::{SceneNode, walk_world};

/// Points extracted from a scene, with rejection counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// World-space positions in traversal order.
    pub points: PointSet,
    /// Nodes that carried a vertex buffer.
    pub geometry_nodes: usize,
    /// Vertices rejected because the source coordinates were not finite.
    pub rejected_source: usize,
    /// Vertices rejected because the world transform produced non-finite coordinates.
    pub rejected_transformed: usize,
}

impl Extraction {
    /// Total vertices dropped.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected_source + self.rejected_transformed
    }
}

/// Extracts every vertex of `root` and its descendants in world coordinates.
///
/// Traversal is depth-first, pre-order, children in declaration order; within
/// a node, vertex buffer order is kept. Vertices that are not finite before or
/// after the world transform are dropped with a warning. A scene without
/// geometry yields an empty set.
///
/// # Example
///
/// ```
/// use deviation_scene::{extract_points, SceneObject};
/// use nalgebra::{Point3, Vector3};
///
/// let scan = SceneObject::points("scan", vec![Point3::new(1.0, 0.0, 0.0)])
///     .with_scale(2.0)
///     .with_position(Vector3::new(0.0, 1.0, 0.0));
///
/// let points = extract_points(&scan);
/// assert_eq!(points[0], Point3::new(2.0, 1.0, 0.0));
/// ```
#[must_use]
pub fn extract_points<N: SceneNode>(root: &N) -> PointSet {
    extract_points_detailed(root).points
}

/// Like [`extract_points`], also reporting how many vertices were dropped.
#[must_use]
pub fn extract_points_detailed<N: SceneNode>(root: &N) -> Extraction {
    let mut extraction = Extraction::default();

    walk_world(root, |node, world| {
        let Some(positions) = node.vertex_positions() else {
            return;
        };
        extraction.geometry_nodes += 1;

        for (index, local) in positions.iter().enumerate() {
            if !is_finite_point(local) {
                warn!(index, x = local.x, y = local.y, z = local.z, "Invalid vertex coordinates");
                extraction.rejected_source += 1;
                continue;
            }

            let point = world.transform_point(local);
            if !extraction.points.push(point) {
                warn!(
                    index,
                    x = point.x,
                    y = point.y,
                    z = point.z,
                    "Invalid vertex after world transform"
                );
                extraction.rejected_transformed += 1;
            }
        }
    });

    debug!(
        points = extraction.points.len(),
        geometry_nodes = extraction.geometry_nodes,
        rejected = extraction.rejected(),
        "Extracted scene points"
    );

    extraction
}

/// World-space bounding box of every valid vertex under `root`.
///
/// Empty scenes give an empty box.
#[must_use]
pub fn world_bounds<N: SceneNode>(root: &N) -> Aabb {
    extract_points(root).bounds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneObject;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, UnitQuaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn empty_scene_gives_empty_set() {
        let scene = SceneObject::group("root").with_child(SceneObject::group("child"));
        let extraction = extract_points_detailed(&scene);
        assert!(extraction.points.is_empty());
        assert_eq!(extraction.geometry_nodes, 0);
        assert_eq!(extraction.rejected(), 0);
    }

    #[test]
    fn order_is_preorder_then_buffer() {
        let scene = SceneObject::mesh("root", vec![Point3::new(0.0, 0.0, 0.0)])
            .with_child(SceneObject::mesh(
                "a",
                vec![Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)],
            ))
            .with_child(SceneObject::points("b", vec![Point3::new(3.0, 0.0, 0.0)]));

        let xs: Vec<f64> = extract_points(&scene).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn nested_transforms_apply() {
        let child = SceneObject::mesh("child", vec![Point3::new(1.0, 0.0, 0.0)])
            .with_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2));
        let scene = SceneObject::group("root")
            .with_position(Vector3::new(0.0, 5.0, 0.0))
            .with_child(child);

        let points = extract_points(&scene);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].coords, Vector3::new(0.0, 5.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_source_vertices_dropped() {
        let scene = SceneObject::mesh(
            "m",
            vec![
                Point3::new(f64::NAN, 0.0, 0.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(0.0, f64::INFINITY, 0.0),
            ],
        );
        let extraction = extract_points_detailed(&scene);
        assert_eq!(extraction.points.len(), 1);
        assert_eq!(extraction.rejected_source, 2);
        assert_eq!(extraction.rejected_transformed, 0);
    }

    #[test]
    fn degenerate_transform_vertices_dropped() {
        let scene = SceneObject::mesh("m", vec![Point3::new(1.0, 0.0, 0.0), Point3::origin()])
            .with_scale(f64::INFINITY);
        let extraction = extract_points_detailed(&scene);
        // An infinite scale poisons the world matrix
        assert_eq!(extraction.rejected_source, 0);
        assert_eq!(extraction.rejected_transformed, 2);
        assert!(extraction.points.is_empty());
    }

    #[test]
    fn bounds_in_world_space() {
        let scene = SceneObject::mesh(
            "m",
            vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 0.5)],
        )
        .with_position(Vector3::new(0.0, -1.0, 0.0));
        let bounds = world_bounds(&scene);
        assert_eq!(bounds.min, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.5));
    }
}
