use crate::scene::loader::LoadError;
use crate::scene::node::Scene;
use nalgebra_glm as glm;
use std::f32::consts::FRAC_PI_4;

/// Whole-model scale applied to the character after import.
pub const BUG_SCALE: f32 = 0.003;

/// One vector per animated joint. Used both for the immutable rest snapshot
/// and for the per-frame offsets layered on top of it.
#[derive(Debug, Clone, Copy)]
pub struct JointVectors {
    pub head: glm::Vec3,
    pub neck: glm::Vec3,
    pub foot: glm::Vec3,
    pub tail: glm::Vec3,
}

impl JointVectors {
    pub fn zeros() -> Self {
        Self {
            head: glm::Vec3::zeros(),
            neck: glm::Vec3::zeros(),
            foot: glm::Vec3::zeros(),
            tail: glm::Vec3::zeros(),
        }
    }
}

/// The walking character: its scene, the four named joints the walk cycle
/// drives, rest transforms captured once at load, and the oscillator state.
///
/// Rest values are never written after construction; the pose driver only
/// touches the offsets and the node transforms derived from them.
pub struct BugModel {
    pub scene: Scene,
    pub root: usize,
    pub head: usize,
    pub neck: usize,
    pub foot: usize,
    pub tail: usize,

    pub rest_rotation: JointVectors,
    pub rotation_offset: JointVectors,
    pub rest_position: glm::Vec3,
    pub position_offset: glm::Vec3,
    pub rest_direction: glm::Vec3,

    pub foot_length: f32,
    pub pose_angle: f32,
    pub shrinking: bool,
}

impl BugModel {
    /// One-time rig setup on a freshly imported scene: flag every mesh node
    /// for shadows, resolve the four joints by name, snapshot rest
    /// transforms, and apply the model scale.
    pub fn from_scene(mut scene: Scene) -> Result<Self, LoadError> {
        let root = scene.ensure_single_root("Bug");

        for node in &mut scene.nodes {
            if !node.meshes.is_empty() {
                node.cast_shadow = true;
                node.receive_shadow = true;
            }
        }

        let head = scene
            .find_by_name("Head")
            .ok_or(LoadError::MissingJoint("Head"))?;
        let neck = scene
            .find_by_name("Neck")
            .ok_or(LoadError::MissingJoint("Neck"))?;
        let foot = scene
            .find_by_name("Foot")
            .ok_or(LoadError::MissingJoint("Foot"))?;
        let tail = scene
            .find_by_name("Tail")
            .ok_or(LoadError::MissingJoint("Tail"))?;

        let rest_rotation = JointVectors {
            head: scene.nodes[head].rotation,
            neck: scene.nodes[neck].rotation,
            foot: scene.nodes[foot].rotation,
            tail: scene.nodes[tail].rotation,
        };
        let rest_direction = scene.world_direction(root);

        scene.nodes[root].scale *= BUG_SCALE;

        Ok(Self {
            scene,
            root,
            head,
            neck,
            foot,
            tail,
            rest_rotation,
            rotation_offset: JointVectors::zeros(),
            rest_position: glm::vec3(0.0, 0.3, 0.0),
            position_offset: glm::Vec3::zeros(),
            rest_direction,
            foot_length: 1.85 / FRAC_PI_4,
            pose_angle: FRAC_PI_4,
            shrinking: false,
        })
    }
}

/// Minimal four-joint rig used by the unit tests here and in the pose
/// driver.
#[cfg(test)]
pub(crate) fn rigged_scene() -> Scene {
    use crate::scene::mesh::MeshData;
    use crate::scene::node::Node;

    let mut scene = Scene::default();
    scene.meshes.push(MeshData {
        name: "shell".into(),
        positions: vec![[0.0; 3]; 3],
        normals: vec![[0.0, 1.0, 0.0]; 3],
        indices: vec![0, 1, 2],
        base_color: [0.4, 0.3, 0.2],
    });

    let mut root = Node::new("Armature".into());
    root.rotation = glm::vec3(0.0, 0.0, 0.0);
    scene.nodes.push(root);
    scene.roots.push(0);

    for (i, name) in ["Head", "Neck", "Foot", "Tail"].iter().enumerate() {
        let mut node = Node::new((*name).to_string());
        node.parent = 0;
        node.rotation = glm::vec3(0.1 * (i + 1) as f32, 0.0, 0.0);
        node.meshes = vec![0];
        scene.nodes.push(node);
        scene.nodes[0].children.push(i + 1);
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_extraction_snapshots_rest_state() {
        let bug = BugModel::from_scene(rigged_scene()).unwrap();

        assert_eq!(bug.scene.nodes[bug.head].name, "Head");
        assert!((bug.rest_rotation.head.x - 0.1).abs() < 1e-6);
        assert!((bug.rest_rotation.tail.x - 0.4).abs() < 1e-6);
        assert!((bug.rest_position - glm::vec3(0.0, 0.3, 0.0)).norm() < 1e-6);
        assert_eq!(bug.position_offset, glm::Vec3::zeros());
        assert!((bug.pose_angle - FRAC_PI_4).abs() < 1e-6);
        assert!(!bug.shrinking);
        assert!((bug.foot_length - 1.85 / FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn mesh_nodes_are_flagged_for_shadows_and_scaled() {
        let bug = BugModel::from_scene(rigged_scene()).unwrap();

        for node in &bug.scene.nodes {
            if !node.meshes.is_empty() {
                assert!(node.cast_shadow && node.receive_shadow, "{}", node.name);
            }
        }
        let root_scale = bug.scene.nodes[bug.root].scale;
        assert!((root_scale.x - BUG_SCALE).abs() < 1e-7);
    }

    #[test]
    fn missing_joint_is_an_error() {
        let mut scene = rigged_scene();
        let tail = scene.find_by_name("Tail").unwrap();
        scene.nodes[tail].name = "Abdomen".into();

        let err = BugModel::from_scene(scene)
            .err()
            .expect("rig extraction should fail without a Tail joint");
        match err {
            LoadError::MissingJoint(name) => assert_eq!(name, "Tail"),
            other => panic!("expected missing joint, got {other}"),
        }
    }
}
