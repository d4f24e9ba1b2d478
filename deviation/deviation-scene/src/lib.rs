//! Scene-graph abstraction and world-space point extraction.
//!
//! Model loaders produce hierarchical scene objects; the deviation pipeline
//! only ever needs three things from them:
//!
//! - hierarchical traversal ([`SceneNode::children`])
//! - a per-node transform ([`SceneNode::local_transform`])
//! - per-node vertex buffers ([`SceneNode::vertex_positions`])
//!
//! Any scene representation implementing [`SceneNode`] can be compared.
//! [`SceneObject`] is a ready-made owned tree for loaders that have no scene
//! graph of their own.
//!
//! # Example
//!
//! ```
//! use deviation_scene::{extract_points, SceneObject};
//! use nalgebra::{Point3, Vector3};
//!
//! let wall = SceneObject::mesh("wall", vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ])
//! .with_position(Vector3::new(0.0, 0.0, 2.0));
//!
//! let building = SceneObject::group("building").with_child(wall);
//! let points = extract_points(&building);
//!
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[1], Point3::new(1.0, 0.0, 2.0));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod extract;
mod node;
mod object;

pub use extract::{Extraction, extract_points, extract_points_detailed, world_bounds};
pub use node::{SceneNode, walk_world};
pub use object::{NodeContent, NodeTransform, SceneObject};
