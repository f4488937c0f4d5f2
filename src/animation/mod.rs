pub mod pose;

pub use pose::{advance_pose, apply_pose};
