//! Owned scene tree.

use deviation_types::AlignmentResult;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

use crate::SceneNode;

/// Position, rotation and per-axis scale of a node relative to its parent.
///
/// Composed as translate * rotate * scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Translation.
    pub position: Vector3<f64>,
    /// Rotation.
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale.
    pub scale: Vector3<f64>,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl NodeTransform {
    /// No translation, rotation or scaling.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// The homogeneous matrix of this transform.
    #[must_use]
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Applies an alignment on top of this transform.
    ///
    /// The alignment acts in the parent's space, after the existing transform.
    pub fn apply_alignment(&mut self, alignment: &AlignmentResult) {
        let rotation = alignment.rotation_quaternion();
        self.position = rotation * (self.position * alignment.scale) + alignment.translation;
        self.rotation = rotation * self.rotation;
        self.scale *= alignment.scale;
    }
}

/// What a [`SceneObject`] carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeContent {
    /// Pure grouping node.
    #[default]
    Group,
    /// Mesh vertices. Face topology is not needed for deviation analysis.
    Mesh(Vec<Point3<f64>>),
    /// Point-cloud positions.
    Points(Vec<Point3<f64>>),
}

/// An owned node of a scene hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneObject {
    /// Node name, for diagnostics.
    pub name: String,
    /// Transform relative to the parent.
    pub transform: NodeTransform,
    /// Geometry carried by this node.
    pub content: NodeContent,
    /// Child nodes.
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    /// Creates a grouping node.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a mesh node from its vertex buffer.
    #[must_use]
    pub fn mesh(name: impl Into<String>, positions: Vec<Point3<f64>>) -> Self {
        Self {
            name: name.into(),
            content: NodeContent::Mesh(positions),
            ..Self::default()
        }
    }

    /// Creates a point-cloud node.
    #[must_use]
    pub fn points(name: impl Into<String>, positions: Vec<Point3<f64>>) -> Self {
        Self {
            name: name.into(),
            content: NodeContent::Points(positions),
            ..Self::default()
        }
    }

    /// Adds a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the local position.
    #[must_use]
    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.transform.position = position;
        self
    }

    /// Sets the local rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Sets a uniform local scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Appends a child node.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Applies a solver result to this node's transform.
    ///
    /// Alignment solvers never touch the scene; the owner calls this.
    pub fn apply_alignment(&mut self, alignment: &AlignmentResult) {
        self.transform.apply_alignment(alignment);
    }

    /// Total number of vertices in this node and its descendants.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        let own = self.vertex_positions().map_or(0, <[Point3<f64>]>::len);
        own + self.children.iter().map(Self::vertex_count).sum::<usize>()
    }
}

impl SceneNode for SceneObject {
    fn local_transform(&self) -> Matrix4<f64> {
        self.transform.to_matrix4()
    }

    fn vertex_positions(&self) -> Option<&[Point3<f64>]> {
        match &self.content {
            NodeContent::Group => None,
            NodeContent::Mesh(positions) | NodeContent::Points(positions) => Some(positions),
        }
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}
