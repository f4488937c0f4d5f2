use crate::scene::node::Scene;

/// Whole-model scale applied to the ground map after import.
pub const MAP_SCALE: f32 = 0.1;

/// The static ground map. Mesh nodes receive shadows but cast none, and
/// nothing animates it.
pub struct MapModel {
    pub scene: Scene,
    pub root: usize,
}

impl MapModel {
    pub fn from_scene(mut scene: Scene) -> Self {
        let root = scene.ensure_single_root("Map");
        for node in &mut scene.nodes {
            if !node.meshes.is_empty() {
                node.receive_shadow = true;
            }
        }
        scene.nodes[root].scale *= MAP_SCALE;
        Self { scene, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::MeshData;
    use crate::scene::node::Node;

    #[test]
    fn map_receives_but_never_casts() {
        let mut scene = Scene::default();
        scene.meshes.push(MeshData::default());
        let mut ground = Node::new("Ground".into());
        ground.meshes = vec![0];
        scene.nodes.push(ground);
        scene.roots.push(0);

        let map = MapModel::from_scene(scene);
        let node = &map.scene.nodes[0];
        assert!(node.receive_shadow);
        assert!(!node.cast_shadow);
        assert!((map.scene.nodes[map.root].scale.x - MAP_SCALE).abs() < 1e-7);
    }
}
