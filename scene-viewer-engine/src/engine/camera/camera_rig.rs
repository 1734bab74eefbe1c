use bevy::math::Vec3;
use constants::camera_rig::{POSITION_SMOOTHING, TARGET_SMOOTHING};

use super::viewpoint_table::Viewpoint;

/// Fractions of the remaining distance covered in one rig step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFactors {
    pub position: f32,
    pub target: f32,
}

impl SmoothingFactors {
    /// Per-frame factors: position converges about twice as fast as the look target.
    pub const BASELINE: Self = Self {
        position: POSITION_SMOOTHING,
        target: TARGET_SMOOTHING,
    };

    /// Rescale both factors for a frame lasting `delta_secs`.
    pub fn time_normalized(self, delta_secs: f32, reference_fps: f32) -> Self {
        Self {
            position: normalize_alpha(self.position, delta_secs, reference_fps),
            target: normalize_alpha(self.target, delta_secs, reference_fps),
        }
    }
}

impl Default for SmoothingFactors {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// `1 - (1 - alpha)^(dt * fps)`: equals `alpha` when the frame lasts exactly
/// one reference frame, and composes so that two half frames match one full frame.
pub fn normalize_alpha(alpha: f32, delta_secs: f32, reference_fps: f32) -> f32 {
    if delta_secs <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - alpha).powf(delta_secs * reference_fps)
}

/// Camera position and smoothed look-at point carried between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigPose {
    pub position: Vec3,
    pub smoothed_target: Vec3,
}

/// One rig step toward `viewpoint`. First-order filter: no overshoot for factors in (0, 1).
pub fn advance_rig(pose: RigPose, viewpoint: &Viewpoint, factors: SmoothingFactors) -> RigPose {
    RigPose {
        position: approach(pose.position, viewpoint.position, factors.position),
        smoothed_target: approach(pose.smoothed_target, viewpoint.look_at, factors.target),
    }
}

// Written out rather than `Vec3::lerp` so a value already at the goal stays bit-identical.
fn approach(current: Vec3, goal: Vec3, alpha: f32) -> Vec3 {
    current + (goal - current) * alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::viewpoint_table::ViewpointId;

    const EPSILON: f32 = 1e-4;

    fn viewpoint(position: Vec3, look_at: Vec3) -> Viewpoint {
        Viewpoint {
            id: ViewpointId(1),
            position,
            look_at,
        }
    }

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn position_follows_reference_sequence() {
        let target = viewpoint(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        let mut pose = RigPose {
            position: Vec3::ZERO,
            smoothed_target: Vec3::ZERO,
        };

        pose = advance_rig(pose, &target, SmoothingFactors::BASELINE);
        assert_close(pose.position, Vec3::new(1.0, 0.0, 0.0));

        pose = advance_rig(pose, &target, SmoothingFactors::BASELINE);
        assert_close(pose.position, Vec3::new(1.9, 0.0, 0.0));

        for _ in 2..10 {
            pose = advance_rig(pose, &target, SmoothingFactors::BASELINE);
        }
        assert_close(pose.position, Vec3::new(6.5132, 0.0, 0.0));
    }

    #[test]
    fn distance_shrinks_geometrically_per_axis() {
        let target = viewpoint(Vec3::new(4.0, -2.0, 8.0), Vec3::new(1.0, 3.0, -5.0));
        let pose = RigPose {
            position: Vec3::new(-6.0, 10.0, 0.5),
            smoothed_target: Vec3::new(0.0, 2.0, 0.0),
        };

        let next = advance_rig(pose, &target, SmoothingFactors::BASELINE);

        let position_before = (pose.position - target.position).abs();
        let position_after = (next.position - target.position).abs();
        assert_close(position_after, position_before * 0.9);

        let target_before = (pose.smoothed_target - target.look_at).abs();
        let target_after = (next.smoothed_target - target.look_at).abs();
        assert_close(target_after, target_before * 0.95);
    }

    #[test]
    fn fixed_point_is_left_unchanged() {
        let target = viewpoint(Vec3::new(24.26, 12.57, 24.41), Vec3::new(0.0, 2.0, 0.0));
        let pose = RigPose {
            position: target.position,
            smoothed_target: target.look_at,
        };

        assert_eq!(advance_rig(pose, &target, SmoothingFactors::BASELINE), pose);
    }

    #[test]
    fn settled_look_target_never_drifts() {
        let target = viewpoint(Vec3::new(3.0, 1.0, 3.0), Vec3::new(0.0, 2.0, 0.0));
        let mut pose = RigPose {
            position: Vec3::new(-3.0, 5.0, 7.0),
            smoothed_target: Vec3::new(0.0, 2.0, 0.0),
        };

        for _ in 0..1000 {
            pose = advance_rig(pose, &target, SmoothingFactors::BASELINE);
            assert_eq!(pose.smoothed_target, Vec3::new(0.0, 2.0, 0.0));
        }
    }

    #[test]
    fn switching_target_mid_flight_keeps_current_pose() {
        let first = viewpoint(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0));
        let second = viewpoint(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -10.0));
        let mut pose = RigPose {
            position: Vec3::ZERO,
            smoothed_target: Vec3::ZERO,
        };

        for _ in 0..3 {
            pose = advance_rig(pose, &first, SmoothingFactors::BASELINE);
        }
        let mid_flight = pose;

        let next = advance_rig(mid_flight, &second, SmoothingFactors::BASELINE);
        assert_close(
            next.position,
            mid_flight.position + (second.position - mid_flight.position) * 0.1,
        );
        assert_close(
            next.smoothed_target,
            mid_flight.smoothed_target + (second.look_at - mid_flight.smoothed_target) * 0.05,
        );
    }

    #[test]
    fn normalized_alpha_matches_baseline_at_reference_rate() {
        let alpha = normalize_alpha(0.1, 1.0 / 60.0, 60.0);
        assert!((alpha - 0.1).abs() < EPSILON);

        let double_frame = normalize_alpha(0.1, 2.0 / 60.0, 60.0);
        assert!((double_frame - 0.19).abs() < EPSILON);

        assert_eq!(normalize_alpha(0.1, 0.0, 60.0), 0.0);
    }

    #[test]
    fn normalized_steps_are_frame_rate_independent() {
        let target = viewpoint(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0));
        let start = RigPose {
            position: Vec3::ZERO,
            smoothed_target: Vec3::ZERO,
        };

        let one_step = advance_rig(
            start,
            &target,
            SmoothingFactors::BASELINE.time_normalized(1.0 / 30.0, 60.0),
        );

        let half = SmoothingFactors::BASELINE.time_normalized(1.0 / 60.0, 60.0);
        let two_steps = advance_rig(advance_rig(start, &target, half), &target, half);

        assert_close(one_step.position, two_steps.position);
        assert_close(one_step.smoothed_target, two_steps.smoothed_target);
    }
}
