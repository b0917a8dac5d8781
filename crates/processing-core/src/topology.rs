//! Hand skeleton topology used to build bone vectors and joint angles.
//!
//! Bone `i` ends at landmark `i + 1`. Where it starts is decided by
//! [`bone_parent`] alone, so an alternative mapping only has to change that
//! one function.

use handsign_common::config::ParentMapping;
use handsign_hand_model::{FEATURE_COUNT, LANDMARK_COUNT, WRIST};

/// Number of bone vectors per hand.
pub const BONE_COUNT: usize = LANDMARK_COUNT - 1;

/// Bones that start at the wrist under [`ParentMapping::WristAnchored`]:
/// the first bone of the index, middle, ring and pinky fingers.
pub const WRIST_ANCHORED_BONES: [usize; 4] = [4, 8, 12, 16];

/// Bones excluded as the first operand of an angle: the last bone of the
/// thumb, index, middle and ring fingers.
pub const FINGER_END_BONES: [usize; 4] = [3, 7, 11, 15];

/// `(first, second)` bone pairs for each angle feature, in model order.
///
/// Pairs are consecutive bones within one finger; pairs that would cross
/// from one finger's tip to the next finger's base are left out.
pub const ANGLE_PAIRS: [(usize, usize); FEATURE_COUNT] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (4, 5),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (10, 11),
    (12, 13),
    (13, 14),
    (14, 15),
    (16, 17),
    (17, 18),
    (18, 19),
];

/// Landmark a bone starts from.
pub fn bone_parent(bone: usize, mapping: ParentMapping) -> usize {
    match mapping {
        ParentMapping::WristAnchored if WRIST_ANCHORED_BONES.contains(&bone) => WRIST,
        ParentMapping::WristAnchored | ParentMapping::Sequential => bone,
    }
}

/// Landmark a bone ends at.
pub fn bone_child(bone: usize) -> usize {
    bone + 1
}
