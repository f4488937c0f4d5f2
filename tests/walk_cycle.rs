use bugwalk_rs::animation::pose::{POSE_ANGLE_MAX, POSE_ANGLE_MIN, advance_pose, apply_pose};
use bugwalk_rs::scene::bug::BugModel;
use bugwalk_rs::scene::loader::{AssetKind, LoadResult, SceneAssets, load_scene};
use bugwalk_rs::scene::mesh::MeshData;
use bugwalk_rs::scene::node::{Node, Scene};
use nalgebra_glm as glm;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

/// A small rig with the four joints the walk cycle drives, facing +Z.
fn build_rig() -> BugModel {
    let mut scene = Scene::default();
    scene.meshes.push(MeshData {
        name: "shell".into(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        indices: vec![0, 1, 2],
        base_color: [0.3, 0.25, 0.1],
    });

    scene.nodes.push(Node::new("Body".into()));
    scene.roots.push(0);
    for (i, name) in ["Head", "Neck", "Foot", "Tail"].iter().enumerate() {
        let mut node = Node::new((*name).to_string());
        node.parent = 0;
        node.meshes = vec![0];
        node.rotation = glm::vec3(0.05 * i as f32, 0.0, 0.0);
        scene.nodes.push(node);
        scene.nodes[0].children.push(i + 1);
    }

    BugModel::from_scene(scene).unwrap()
}

#[test]
fn long_run_holds_every_gait_invariant() {
    let mut bug = build_rig();
    let rest_head = bug.rest_rotation.head;

    for frame in 1..=1000u32 {
        advance_pose(&mut bug);
        apply_pose(&mut bug);

        let a = bug.pose_angle;
        assert!(
            (POSE_ANGLE_MIN - 1e-6..=POSE_ANGLE_MAX + 1e-6).contains(&a),
            "angle out of bounds on frame {frame}"
        );

        // head = -neck = foot = -tail on the flex axis
        let o = &bug.rotation_offset;
        assert_eq!(o.head.x, a);
        assert_eq!(o.neck.x, -a);
        assert_eq!(o.foot.x, a);
        assert_eq!(o.tail.x, -a);

        // vertical offset tracks the leg extension formula exactly
        let expected_y = a * bug.foot_length - a * a * 0.5;
        assert!((bug.position_offset.y - expected_y).abs() < 1e-5);

        // drift along the rest facing grows linearly, one step per frame
        let expected_z = -0.01 * frame as f32;
        assert!(
            (bug.position_offset.z - expected_z).abs() < 1e-3,
            "frame {frame}: drift {} != {expected_z}",
            bug.position_offset.z
        );

        // rest snapshots are never touched
        assert_eq!(bug.rest_rotation.head, rest_head);

        // nodes carry rest + offset
        let head = bug.scene.nodes[bug.head].rotation;
        assert!((head.x - (rest_head.x + a)).abs() < 1e-6);
    }
}

#[test]
fn oscillator_full_period_is_116_frames() {
    let mut bug = build_rig();
    bug.pose_angle = POSE_ANGLE_MIN;
    bug.shrinking = false;

    let mut last = bug.shrinking;
    let mut flips = Vec::new();
    for frame in 1..=400u32 {
        advance_pose(&mut bug);
        if bug.shrinking != last {
            last = bug.shrinking;
            flips.push(frame);
        }
    }
    assert!(flips.len() >= 3);
    assert_eq!(flips[1] - flips[0], 58);
    assert_eq!(flips[2] - flips[0], 116);
}

#[test]
fn quarter_pi_start_reaches_the_bound_in_15_frames() {
    let mut bug = build_rig();
    assert!((bug.pose_angle - FRAC_PI_4).abs() < 1e-6);

    for _ in 0..14 {
        advance_pose(&mut bug);
        assert!(!bug.shrinking);
    }
    advance_pose(&mut bug);
    assert!(bug.pose_angle >= FRAC_PI_3);
    assert!(bug.shrinking);
}

#[test]
fn failed_character_load_leaves_the_scene_without_a_bug() {
    // A bogus path never yields a scene
    assert!(load_scene(std::path::Path::new("model/missing.glb")).is_err());

    // The frame loop's asset slots take the failure quietly and stay empty
    let mut assets = SceneAssets::default();
    assets.apply(LoadResult::Failed {
        asset: AssetKind::Bug,
        error: "no such file".into(),
    });
    assert!(assets.bug.is_none());

    // Later frames keep polling empty slots without effect
    for _ in 0..3 {
        assert!(assets.bug.is_none());
        assert!(assets.map.is_none());
    }
}

#[test]
fn rig_extraction_rejects_models_without_the_named_joints() {
    let mut scene = Scene::default();
    scene.nodes.push(Node::new("Torso".into()));
    scene.roots.push(0);
    assert!(BugModel::from_scene(scene).is_err());
}
