use crate::scene::mesh::MeshData;
use nalgebra_glm as glm;

/// A node in the flat scene arena. Parent/children are indices into
/// `Scene::nodes`; `parent == -1` marks a root.
///
/// Rotation is kept as a 3-component Euler vector (applied X, then Y, then Z)
/// so per-frame offsets can be added component-wise onto rest snapshots.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: i32,
    pub children: Vec<usize>,
    pub translation: glm::Vec3,
    pub rotation: glm::Vec3,
    pub scale: glm::Vec3,
    pub meshes: Vec<usize>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Node {
    pub fn new(name: String) -> Self {
        Self {
            name,
            parent: -1,
            children: Vec::new(),
            translation: glm::Vec3::zeros(),
            rotation: glm::Vec3::zeros(),
            scale: glm::vec3(1.0, 1.0, 1.0),
            meshes: Vec::new(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// A loaded model: node hierarchy plus the flattened mesh primitives the
/// nodes reference.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub nodes: Vec<Node>,
    pub roots: Vec<usize>,
    pub meshes: Vec<MeshData>,
}

impl Scene {
    /// Find a node by its exact name. First match wins.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    pub fn local_matrix(&self, idx: usize) -> glm::Mat4 {
        let node = &self.nodes[idx];
        glm::translation(&node.translation)
            * rotation_matrix(&node.rotation)
            * glm::scaling(&node.scale)
    }

    /// World matrix of a single node, walking up the parent chain.
    pub fn world_matrix(&self, mut idx: usize) -> glm::Mat4 {
        let mut m = self.local_matrix(idx);
        while self.nodes[idx].parent >= 0 {
            idx = self.nodes[idx].parent as usize;
            m = self.local_matrix(idx) * m;
        }
        m
    }

    /// World matrices for every node. Children are always computed after
    /// their parent, so one pass over the traversal stack suffices.
    pub fn world_matrices(&self) -> Vec<glm::Mat4> {
        let mut world = vec![glm::Mat4::identity(); self.nodes.len()];
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(idx) = stack.pop() {
            let local = self.local_matrix(idx);
            world[idx] = match self.nodes[idx].parent {
                p if p >= 0 => world[p as usize] * local,
                _ => local,
            };
            stack.extend(self.nodes[idx].children.iter().copied());
        }
        world
    }

    /// The node's facing direction in world space: its +Z axis, normalized.
    pub fn world_direction(&self, idx: usize) -> glm::Vec3 {
        let m = self.world_matrix(idx);
        let dir = glm::vec3(m[(0, 2)], m[(1, 2)], m[(2, 2)]);
        let len = glm::length(&dir);
        if len <= f32::EPSILON {
            return glm::vec3(0.0, 0.0, 1.0);
        }
        dir / len
    }

    /// Collapse multiple roots under a synthetic group node so whole-model
    /// transforms have a single handle. Returns the root index.
    pub fn ensure_single_root(&mut self, name: &str) -> usize {
        if self.roots.len() == 1 {
            return self.roots[0];
        }
        let group = self.nodes.len();
        self.nodes.push(Node::new(name.to_string()));
        let children = std::mem::take(&mut self.roots);
        for &child in &children {
            self.nodes[child].parent = group as i32;
        }
        self.nodes[group].children = children;
        self.roots = vec![group];
        group
    }
}

/// Rotation matrix for an Euler vector, X applied first, then Y, then Z.
pub fn rotation_matrix(euler: &glm::Vec3) -> glm::Mat4 {
    let m = glm::Mat4::identity();
    let m = glm::rotate_z(&m, euler.z);
    let m = glm::rotate_y(&m, euler.y);
    glm::rotate_x(&m, euler.x)
}

/// Convert a unit quaternion (x, y, z, w) into the Euler vector convention
/// used by [`rotation_matrix`].
pub fn quat_to_euler(q: [f32; 4]) -> glm::Vec3 {
    let [x, y, z, w] = q;

    let r11 = 1.0 - 2.0 * (y * y + z * z);
    let r12 = 2.0 * (x * y - z * w);
    let r13 = 2.0 * (x * z + y * w);
    let r21 = 2.0 * (x * y + z * w);
    let r31 = 2.0 * (x * z - y * w);
    let r32 = 2.0 * (y * z + x * w);
    let r33 = 1.0 - 2.0 * (x * x + y * y);

    let sin_pitch = (-r31).clamp(-1.0, 1.0);
    if sin_pitch.abs() > 0.99999 {
        // Gimbal lock: yaw folded into roll
        let pitch = std::f32::consts::FRAC_PI_2.copysign(sin_pitch);
        let roll = if sin_pitch > 0.0 {
            f32::atan2(r12, r13)
        } else {
            f32::atan2(-r12, -r13)
        };
        return glm::vec3(roll, pitch, 0.0);
    }

    glm::vec3(
        f32::atan2(r32, r33),
        sin_pitch.asin(),
        f32::atan2(r21, r11),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn child(scene: &mut Scene, parent: i32, name: &str) -> usize {
        let idx = scene.nodes.len();
        let mut node = Node::new(name.to_string());
        node.parent = parent;
        scene.nodes.push(node);
        if parent >= 0 {
            scene.nodes[parent as usize].children.push(idx);
        } else {
            scene.roots.push(idx);
        }
        idx
    }

    #[test]
    fn find_by_name_walks_the_whole_arena() {
        let mut scene = Scene::default();
        let root = child(&mut scene, -1, "Armature");
        let neck = child(&mut scene, root as i32, "Neck");
        let head = child(&mut scene, neck as i32, "Head");

        assert_eq!(scene.find_by_name("Head"), Some(head));
        assert_eq!(scene.find_by_name("Neck"), Some(neck));
        assert_eq!(scene.find_by_name("Thorax"), None);
    }

    #[test]
    fn quat_euler_round_trip() {
        let angles = [
            glm::vec3(0.3, -0.5, 1.1),
            glm::vec3(-FRAC_PI_4, 0.2, 0.0),
            glm::vec3(0.0, 0.0, 0.0),
        ];
        for euler in angles {
            let m = rotation_matrix(&euler);
            // Recover the quaternion from the matrix via nalgebra, then convert back.
            let rot = glm::mat4_to_mat3(&m);
            let q = glm::mat3_to_quat(&rot);
            let back = quat_to_euler([q.i, q.j, q.k, q.w]);
            let m2 = rotation_matrix(&back);
            for i in 0..3 {
                for j in 0..3 {
                    assert!(
                        (m[(i, j)] - m2[(i, j)]).abs() < 1e-5,
                        "mismatch at ({i},{j}) for {euler:?}: {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn world_direction_follows_yaw() {
        let mut scene = Scene::default();
        let root = child(&mut scene, -1, "Bug");
        // Unrotated: facing +Z
        let dir = scene.world_direction(root);
        assert!((dir - glm::vec3(0.0, 0.0, 1.0)).norm() < 1e-6);

        // Quarter turn around Y: +Z maps onto +X
        scene.nodes[root].rotation.y = FRAC_PI_2;
        let dir = scene.world_direction(root);
        assert!((dir - glm::vec3(1.0, 0.0, 0.0)).norm() < 1e-5, "{dir:?}");
    }

    #[test]
    fn world_matrix_composes_parent_transforms() {
        let mut scene = Scene::default();
        let root = child(&mut scene, -1, "Bug");
        let leg = child(&mut scene, root as i32, "Foot");
        scene.nodes[root].translation = glm::vec3(1.0, 2.0, 3.0);
        scene.nodes[leg].translation = glm::vec3(0.0, -1.0, 0.0);

        let world = scene.world_matrices();
        let origin = world[leg] * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin.xyz() - glm::vec3(1.0, 1.0, 3.0)).norm() < 1e-6);
        // Single-node path agrees with the full traversal
        let single = scene.world_matrix(leg) * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((single.xyz() - origin.xyz()).norm() < 1e-6);
    }

    #[test]
    fn ensure_single_root_groups_forests() {
        let mut scene = Scene::default();
        let a = child(&mut scene, -1, "a");
        let b = child(&mut scene, -1, "b");
        let root = scene.ensure_single_root("Bug");

        assert_eq!(scene.roots, vec![root]);
        assert_eq!(scene.nodes[root].children, vec![a, b]);
        assert_eq!(scene.nodes[a].parent, root as i32);
        assert_eq!(scene.nodes[b].parent, root as i32);

        // Already single-rooted: no new node
        let len = scene.nodes.len();
        assert_eq!(scene.ensure_single_root("Bug"), root);
        assert_eq!(scene.nodes.len(), len);
    }
}
