use crate::animation::pose::advance_pose;
use crate::scene::bug::BugModel;
use crate::scene::map::MapModel;
use crate::scene::mesh::MeshData;
use crate::scene::node::{Node, Scene, quat_to_euler};
use nalgebra_glm as glm;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("glTF import failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("model file contains no scene")]
    EmptyScene,
    #[error("joint '{0}' not found in model")]
    MissingJoint(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Bug,
    Map,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Bug => write!(f, "bug"),
            AssetKind::Map => write!(f, "map"),
        }
    }
}

/// Completion message from a background load task, drained by the frame
/// loop once per frame.
pub enum LoadResult {
    Bug(Box<BugModel>),
    Map(Box<MapModel>),
    Failed { asset: AssetKind, error: String },
}

/// The two asset slots the frame loop renders from. Either may stay empty
/// for the whole session if its load fails; the loop renders whatever is
/// present.
#[derive(Default)]
pub struct SceneAssets {
    pub bug: Option<BugModel>,
    pub map: Option<MapModel>,
}

impl SceneAssets {
    /// Fold one load completion into the slots. Failures are logged and
    /// leave the slot untouched; there is no retry.
    pub fn apply(&mut self, result: LoadResult) {
        match result {
            LoadResult::Bug(bug) => {
                log::info!(
                    "character model ready: {} nodes, {} meshes",
                    bug.scene.nodes.len(),
                    bug.scene.meshes.len()
                );
                self.bug = Some(*bug);
            }
            LoadResult::Map(map) => {
                log::info!(
                    "map model ready: {} nodes, {} meshes",
                    map.scene.nodes.len(),
                    map.scene.meshes.len()
                );
                self.map = Some(*map);
            }
            LoadResult::Failed { asset, error } => {
                log::error!("failed to load {asset} model: {error}");
            }
        }
    }
}

/// Import a glTF file into a flat [`Scene`].
pub fn load_scene(path: &Path) -> Result<Scene, LoadError> {
    let (document, buffers, _images) = gltf::import(path)?;
    let source = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(LoadError::EmptyScene)?;

    // Flatten every primitive to one MeshData; remember which of ours each
    // glTF mesh maps to.
    let mut meshes = Vec::new();
    let mut primitive_ids: Vec<Vec<usize>> = Vec::new();
    for mesh in document.meshes() {
        let mut ids = Vec::new();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            if positions.is_empty() {
                continue;
            }
            let indices: Vec<u32> = match reader.read_indices() {
                Some(read) => read.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            let mut data = MeshData {
                name: mesh.name().unwrap_or_default().to_string(),
                positions,
                normals,
                indices,
                base_color: [color[0], color[1], color[2]],
            };
            if data.normals.len() != data.positions.len() {
                data.compute_normals();
            }
            ids.push(meshes.len());
            meshes.push(data);
        }
        primitive_ids.push(ids);
    }

    let mut scene = Scene {
        nodes: Vec::new(),
        roots: Vec::new(),
        meshes,
    };
    for gltf_node in source.nodes() {
        let root = append_node(&mut scene, &gltf_node, -1, &primitive_ids);
        scene.roots.push(root);
    }
    Ok(scene)
}

fn append_node(
    scene: &mut Scene,
    gltf_node: &gltf::Node,
    parent: i32,
    primitive_ids: &[Vec<usize>],
) -> usize {
    let (translation, rotation, scale) = gltf_node.transform().decomposed();

    let mut node = Node::new(gltf_node.name().unwrap_or_default().to_string());
    node.parent = parent;
    node.translation = glm::vec3(translation[0], translation[1], translation[2]);
    node.rotation = quat_to_euler(rotation);
    node.scale = glm::vec3(scale[0], scale[1], scale[2]);
    node.meshes = gltf_node
        .mesh()
        .map(|m| primitive_ids[m.index()].clone())
        .unwrap_or_default();

    let idx = scene.nodes.len();
    scene.nodes.push(node);
    for child in gltf_node.children() {
        let child_idx = append_node(scene, &child, idx as i32, primitive_ids);
        scene.nodes[idx].children.push(child_idx);
    }
    idx
}

/// Kick off both asset loads on the runtime. Results arrive over `sender`
/// in whatever order the tasks finish.
pub fn spawn_scene_loads(handle: &tokio::runtime::Handle, asset_dir: &Path, sender: Sender<LoadResult>) {
    spawn_one(handle, asset_dir.join("bug.glb"), AssetKind::Bug, sender.clone());
    spawn_one(handle, asset_dir.join("map.glb"), AssetKind::Map, sender);
}

fn spawn_one(
    handle: &tokio::runtime::Handle,
    path: PathBuf,
    asset: AssetKind,
    sender: Sender<LoadResult>,
) {
    handle.spawn(async move {
        log::info!("loading {asset} model from {}", path.display());
        let message = match load_asset(&path, asset) {
            Ok(message) => message,
            Err(e) => LoadResult::Failed {
                asset,
                error: e.to_string(),
            },
        };
        // The receiver may already be gone during shutdown.
        let _ = sender.send(message);
    });
}

fn load_asset(path: &Path, asset: AssetKind) -> Result<LoadResult, LoadError> {
    let scene = load_scene(path)?;
    log::info!(
        "parsed {asset} model: {} nodes, {} meshes",
        scene.nodes.len(),
        scene.meshes.len()
    );
    match asset {
        AssetKind::Bug => {
            let mut bug = BugModel::from_scene(scene)?;
            // Pose once so the first rendered frame is already mid-stride.
            advance_pose(&mut bug);
            Ok(LoadResult::Bug(Box::new(bug)))
        }
        AssetKind::Map => Ok(LoadResult::Map(Box::new(MapModel::from_scene(scene)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_scene(Path::new("model/does-not-exist.glb"));
        assert!(err.is_err());
    }

    #[test]
    fn failed_load_leaves_the_slot_empty() {
        let mut assets = SceneAssets::default();
        assets.apply(LoadResult::Failed {
            asset: AssetKind::Bug,
            error: "404".into(),
        });
        assert!(assets.bug.is_none());
        assert!(assets.map.is_none());

        // A later failure for the other asset is just as quiet.
        assets.apply(LoadResult::Failed {
            asset: AssetKind::Map,
            error: "truncated file".into(),
        });
        assert!(assets.map.is_none());
    }
}
