//! The geometric node interface and world-space traversal.

use nalgebra::{Matrix4, Point3};

/// A node in a hierarchical scene.
///
/// A node may carry a vertex buffer (mesh or point cloud) or be a pure
/// grouping node. Its transform is relative to its parent; world transforms
/// are accumulated by [`walk_world`].
pub trait SceneNode {
    /// Transform from this node's space to its parent's space.
    fn local_transform(&self) -> Matrix4<f64>;

    /// Vertex positions in this node's space, if it carries geometry.
    fn vertex_positions(&self) -> Option<&[Point3<f64>]> {
        None
    }

    /// Child nodes in declaration order.
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// Visits every node depth-first, pre-order, with its world transform.
///
/// A node is visited before its children; children are visited in
/// declaration order. The walk uses an explicit stack, so hierarchy depth is
/// bounded by memory rather than the call stack.
pub fn walk_world<N, F>(root: &N, mut visit: F)
where
    N: SceneNode,
    F: FnMut(&N, &Matrix4<f64>),
{
    let mut stack: Vec<(&N, Matrix4<f64>)> = vec![(root, root.local_transform())];

    while let Some((node, world)) = stack.pop() {
        visit(node, &world);

        let children: Vec<&N> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, world * child.local_transform()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    struct Node {
        name: &'static str,
        offset: f64,
        children: Vec<Node>,
    }

    impl SceneNode for Node {
        fn local_transform(&self) -> Matrix4<f64> {
            Matrix4::new_translation(&Vector3::new(self.offset, 0.0, 0.0))
        }

        fn children(&self) -> impl Iterator<Item = &Self> {
            self.children.iter()
        }
    }

    fn leaf(name: &'static str, offset: f64) -> Node {
        Node {
            name,
            offset,
            children: Vec::new(),
        }
    }

    #[test]
    fn preorder_declaration_order() {
        let root = Node {
            name: "root",
            offset: 0.0,
            children: vec![
                Node {
                    name: "a",
                    offset: 1.0,
                    children: vec![leaf("a1", 0.0), leaf("a2", 0.0)],
                },
                leaf("b", 0.0),
            ],
        };

        let mut order = Vec::new();
        walk_world(&root, |node, _| order.push(node.name));
        assert_eq!(order, vec!["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn world_transforms_accumulate() {
        let root = Node {
            name: "root",
            offset: 1.0,
            children: vec![Node {
                name: "child",
                offset: 2.0,
                children: vec![leaf("grandchild", 4.0)],
            }],
        };

        let mut offsets = Vec::new();
        walk_world(&root, |node, world| {
            offsets.push((node.name, world.transform_point(&Point3::origin()).x));
        });
        assert_eq!(
            offsets,
            vec![("root", 1.0), ("child", 3.0), ("grandchild", 7.0)]
        );
    }

    #[test]
    fn deep_hierarchy() {
        let mut node = leaf("bottom", 1.0);
        for _ in 0..2_000 {
            node = Node {
                name: "level",
                offset: 0.0,
                children: vec![node],
            };
        }

        let mut visited = 0;
        walk_world(&node, |_, _| visited += 1);
        assert_eq!(visited, 2_001);
    }
}
