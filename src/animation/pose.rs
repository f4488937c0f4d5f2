use crate::scene::bug::BugModel;
use std::f32::consts::PI;

/// Oscillator step per frame: one degree.
pub const POSE_STEP: f32 = PI / 180.0;
/// Lower bound of the pose angle: two degrees.
pub const POSE_ANGLE_MIN: f32 = PI / 90.0;
/// Upper bound of the pose angle: sixty degrees.
pub const POSE_ANGLE_MAX: f32 = PI / 3.0;

// Body drift along the rest facing direction, accumulated every frame.
const WALK_DRIFT: f32 = -0.01;

/// One frame of the walk cycle.
///
/// Steps the triangle-wave pose angle, flips direction the frame a bound is
/// reached or passed, derives the joint offsets and vertical lift from the
/// updated angle, and accumulates the forward drift. Touches only the
/// model's offset fields; rest snapshots stay untouched.
pub fn advance_pose(bug: &mut BugModel) {
    if bug.shrinking {
        bug.pose_angle -= POSE_STEP;
        if bug.pose_angle <= POSE_ANGLE_MIN {
            bug.shrinking = false;
        }
    } else {
        bug.pose_angle += POSE_STEP;
        if bug.pose_angle >= POSE_ANGLE_MAX {
            bug.shrinking = true;
        }
    }

    set_pose(bug, bug.pose_angle);
    bug.position_offset += bug.rest_direction * WALK_DRIFT;
}

/// Derive all pose offsets from a single flex angle.
///
/// Head and foot flex with the angle, neck and tail against it, all around
/// x. The vertical lift rises with the leg extension minus a quadratic
/// correction so the body dips as the legs fold.
fn set_pose(bug: &mut BugModel, angle: f32) {
    let y_fix = angle * angle * 0.5;
    bug.position_offset.y = angle * bug.foot_length - y_fix;

    bug.rotation_offset.head.x = angle;
    bug.rotation_offset.neck.x = -angle;
    bug.rotation_offset.foot.x = angle;
    bug.rotation_offset.tail.x = -angle;
}

/// Write the current pose into the scene nodes: rest transform plus offset,
/// for each joint and for the body root.
pub fn apply_pose(bug: &mut BugModel) {
    bug.scene.nodes[bug.head].rotation = bug.rest_rotation.head + bug.rotation_offset.head;
    bug.scene.nodes[bug.neck].rotation = bug.rest_rotation.neck + bug.rotation_offset.neck;
    bug.scene.nodes[bug.foot].rotation = bug.rest_rotation.foot + bug.rotation_offset.foot;
    bug.scene.nodes[bug.tail].rotation = bug.rest_rotation.tail + bug.rotation_offset.tail;
    bug.scene.nodes[bug.root].translation = bug.rest_position + bug.position_offset;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::bug::rigged_scene;
    use nalgebra_glm as glm;
    use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

    fn fresh_bug() -> BugModel {
        BugModel::from_scene(rigged_scene()).unwrap()
    }

    #[test]
    fn pose_angle_never_leaves_its_bounds() {
        let mut bug = fresh_bug();
        for frame in 0..1000 {
            advance_pose(&mut bug);
            assert!(
                bug.pose_angle >= POSE_ANGLE_MIN - 1e-6 && bug.pose_angle <= POSE_ANGLE_MAX + 1e-6,
                "angle {} out of bounds on frame {frame}",
                bug.pose_angle
            );
        }
    }

    #[test]
    fn oscillator_is_a_triangle_wave_with_period_116() {
        let mut bug = fresh_bug();
        bug.pose_angle = POSE_ANGLE_MIN;
        bug.shrinking = false;

        let mut was_shrinking = bug.shrinking;
        let mut flips = Vec::new();
        for frame in 1..=500 {
            advance_pose(&mut bug);
            if bug.shrinking != was_shrinking {
                was_shrinking = bug.shrinking;
                flips.push(frame);
            }
        }

        assert!(flips.len() >= 4, "too few flips: {flips:?}");
        // 58 one-degree steps per traversal of [2, 60] degrees
        for pair in flips.windows(2) {
            assert_eq!(pair[1] - pair[0], 58, "flips: {flips:?}");
        }
        assert_eq!(flips[2] - flips[0], 116);
    }

    #[test]
    fn vertical_offset_follows_the_leg_extension_formula() {
        let mut bug = fresh_bug();
        for _ in 0..300 {
            advance_pose(&mut bug);
            let a = bug.pose_angle;
            let expected = a * bug.foot_length - (a * a * 0.5);
            // rest_direction of the test rig has no vertical component, so
            // the drift never disturbs y
            assert!(
                (bug.position_offset.y - expected).abs() < 1e-5,
                "y offset {} != {expected}",
                bug.position_offset.y
            );
        }
    }

    #[test]
    fn joint_offsets_mirror_the_flex_angle() {
        let mut bug = fresh_bug();
        for _ in 0..200 {
            advance_pose(&mut bug);
            let a = bug.pose_angle;
            let o = &bug.rotation_offset;
            assert_eq!(o.head.x, a);
            assert_eq!(o.neck.x, -a);
            assert_eq!(o.foot.x, a);
            assert_eq!(o.tail.x, -a);
            for v in [o.head, o.neck, o.foot, o.tail] {
                assert_eq!(v.y, 0.0);
                assert_eq!(v.z, 0.0);
            }
        }
    }

    #[test]
    fn drift_accumulates_linearly_along_the_rest_direction() {
        let mut bug = fresh_bug();
        // Test rig faces +Z
        assert!((bug.rest_direction - glm::vec3(0.0, 0.0, 1.0)).norm() < 1e-6);

        for _ in 0..50 {
            advance_pose(&mut bug);
        }
        assert!((bug.position_offset.z - (-0.01 * 50.0)).abs() < 1e-4);
        assert!(bug.position_offset.x.abs() < 1e-6);

        for _ in 0..50 {
            advance_pose(&mut bug);
        }
        assert!((bug.position_offset.z - (-0.01 * 100.0)).abs() < 1e-4);
    }

    #[test]
    fn growth_flips_the_frame_the_upper_bound_is_reached() {
        let mut bug = fresh_bug();
        assert!((bug.pose_angle - FRAC_PI_4).abs() < 1e-6);
        assert!(!bug.shrinking);

        for frame in 1..=15 {
            assert!(!bug.shrinking, "flipped early, frame {frame}");
            advance_pose(&mut bug);
        }
        // 45 + 15 degrees lands exactly on the bound
        assert!(bug.pose_angle >= FRAC_PI_3);
        assert!(bug.shrinking, "should flip the frame the bound is reached");
    }

    #[test]
    fn apply_adds_offsets_onto_immutable_rest_transforms() {
        let mut bug = fresh_bug();
        let rest_head = bug.rest_rotation.head;
        let rest_tail = bug.rest_rotation.tail;

        for _ in 0..10 {
            advance_pose(&mut bug);
            apply_pose(&mut bug);
        }

        assert_eq!(bug.rest_rotation.head, rest_head);
        assert_eq!(bug.rest_rotation.tail, rest_tail);

        let a = bug.pose_angle;
        let head = bug.scene.nodes[bug.head].rotation;
        let tail = bug.scene.nodes[bug.tail].rotation;
        assert!((head.x - (rest_head.x + a)).abs() < 1e-6);
        assert!((tail.x - (rest_tail.x - a)).abs() < 1e-6);

        let body = bug.scene.nodes[bug.root].translation;
        let expected = bug.rest_position + bug.position_offset;
        assert!((body - expected).norm() < 1e-6);
    }
}
