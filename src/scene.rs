use maths_rs::prelude::*;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::Error;
use crate::gfx::MeshId;

/// Axis a `TransformOp::Rotate` spins around
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z
}

/// A single scale, rotation or translation primitive. Rotations are animated, with an angle
/// in radians of `rate * t + phase` for elapsed seconds `t`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    Scale((f32, f32, f32)),
    Rotate {
        axis: Axis,
        rate: f32,
        #[serde(default)]
        phase: f32
    },
    Translate((f32, f32, f32))
}

impl TransformOp {
    /// Uniform scale by `s` on all axes
    pub fn uniform_scale(s: f32) -> Self {
        TransformOp::Scale((s, s, s))
    }

    /// Rotation about y of `rate` radians per second
    pub fn rotate_y(rate: f32) -> Self {
        TransformOp::Rotate {
            axis: Axis::Y,
            rate,
            phase: 0.0
        }
    }

    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        TransformOp::Translate((x, y, z))
    }

    /// Matrix for this primitive at elapsed time `t`
    pub fn evaluate(&self, t: f32) -> Mat4f {
        match *self {
            TransformOp::Scale(s) => Mat4f::from_scale(Vec3f::from(s)),
            TransformOp::Translate(p) => Mat4f::from_translation(Vec3f::from(p)),
            TransformOp::Rotate { axis, rate, phase } => {
                let theta = rate * t + phase;
                match axis {
                    Axis::X => Mat4f::from_x_rotation(theta),
                    Axis::Y => Mat4f::from_y_rotation(theta),
                    Axis::Z => Mat4f::from_z_rotation(theta)
                }
            }
        }
    }
}

/// Pure function of elapsed time to a local matrix, the ordered product `ops[0] * ops[1] * .. * ops[n]`.
/// An empty list evaluates to identity.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LocalTransform(pub Vec<TransformOp>);

impl LocalTransform {
    pub fn evaluate(&self, t: f32) -> Mat4f {
        self.0.iter().fold(Mat4f::identity(), |m, op| m * op.evaluate(t))
    }
}

impl From<Vec<TransformOp>> for LocalTransform {
    fn from(ops: Vec<TransformOp>) -> Self {
        LocalTransform(ops)
    }
}

/// Runtime scene node, parents are indices into the owning `Scene`
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub mesh: MeshId,
    pub index_count: u32,
    pub local_transform: LocalTransform
}

/// Ordered node arena, insertion order is draw order and every parent precedes its children
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            nodes: Vec::new()
        }
    }

    /// Append `node` and return its index. The parent must already be in the scene and names must be unique.
    pub fn add_node(&mut self, node: Node) -> Result<usize, Error> {
        if let Some(parent) = node.parent {
            if parent >= self.nodes.len() {
                return Err(crate::err!(
                    "node `{}` has parent index {} which is not declared before it", node.name, parent
                ));
            }
        }
        if self.find_node(&node.name).is_some() {
            return Err(crate::err!("duplicate node name `{}`", node.name));
        }
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    /// Resolve a serialised scene against the meshes created at startup, keyed by name
    pub fn create(info: &SceneInfo, meshes: &HashMap<String, (MeshId, u32)>) -> Result<Scene, Error> {
        let mut scene = Scene::new();
        for node in &info.nodes {
            let (mesh, mesh_index_count) = meshes.get(&node.mesh).copied().ok_or_else(|| {
                crate::err!("node `{}` references unknown mesh `{}`", node.name, node.mesh)
            })?;

            let parent = match &node.parent {
                Some(parent_name) => Some(scene.find_node(parent_name).ok_or_else(|| {
                    crate::err!(
                        "node `{}` references parent `{}` which is not declared before it", node.name, parent_name
                    )
                })?),
                None => None
            };

            let index_count = node.index_count.unwrap_or(mesh_index_count);
            if index_count == 0 || index_count > mesh_index_count {
                return Err(crate::err!(
                    "node `{}` draws {} indices from mesh `{}` which has {}",
                    node.name, index_count, node.mesh, mesh_index_count
                ));
            }

            scene.add_node(Node {
                name: node.name.to_string(),
                parent,
                mesh,
                index_count,
                local_transform: node.transform.clone()
            })?;
        }
        Ok(scene)
    }

    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Serialisable node description, parents and meshes are referenced by name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub mesh: String,
    /// Defaults to the full index count of `mesh`
    #[serde(default)]
    pub index_count: Option<u32>,
    pub transform: LocalTransform
}

/// Serialisable scene description
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneInfo {
    pub nodes: Vec<NodeInfo>
}

fn node_info(name: &str, parent: Option<&str>, mesh: &str, transform: Vec<TransformOp>) -> NodeInfo {
    NodeInfo {
        name: name.to_string(),
        parent: parent.map(|p| p.to_string()),
        mesh: mesh.to_string(),
        index_count: None,
        transform: LocalTransform(transform)
    }
}

/// A sun with two orbiting planets, each with a moon, and a pyramid spinning on its own
impl Default for SceneInfo {
    fn default() -> Self {
        SceneInfo {
            nodes: vec![
                node_info("Sun", None, "cube", vec![
                    TransformOp::rotate_y(1.0),
                    TransformOp::uniform_scale(1.4)
                ]),
                node_info("Planet1", Some("Sun"), "cube", vec![
                    TransformOp::translate(5.0, 0.0, 0.0),
                    TransformOp::rotate_y(1.0),
                    TransformOp::uniform_scale(1.1)
                ]),
                node_info("Planet2", Some("Sun"), "cube", vec![
                    TransformOp::rotate_y(1.0),
                    TransformOp::translate(-5.0, 0.0, 0.0),
                    TransformOp::rotate_y(1.0),
                    TransformOp::uniform_scale(0.65)
                ]),
                node_info("Moon1", Some("Planet1"), "pyramid", vec![
                    TransformOp::rotate_y(1.0),
                    TransformOp::translate(3.0, 0.0, 0.0),
                    TransformOp::rotate_y(2.0),
                    TransformOp::uniform_scale(0.45)
                ]),
                node_info("Moon2", Some("Planet2"), "pyramid", vec![
                    TransformOp::rotate_y(0.5),
                    TransformOp::translate(3.0, 0.0, 0.0),
                    TransformOp::rotate_y(2.0),
                    TransformOp::uniform_scale(0.6)
                ]),
                node_info("Pyramid", None, "pyramid", vec![
                    TransformOp::translate(3.0, 2.0, 3.0),
                    TransformOp::rotate_y(2.0)
                ])
            ]
        }
    }
}
