use bevy::math::Vec3;

/// Camera preset as written in the reference configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewpointPreset {
    pub id: u32,
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Presets in display order. Ids must stay unique.
pub const VIEWPOINT_PRESETS: [ViewpointPreset; 5] = [
    ViewpointPreset {
        id: 1,
        position: Vec3::new(24.26, 12.57, 24.41),
        look_at: Vec3::new(0.0, 2.0, 0.0),
    },
    ViewpointPreset {
        id: 2,
        position: Vec3::new(12.0, 6.0, 12.0),
        look_at: Vec3::new(-1.0, 0.1, 1.0),
    },
    ViewpointPreset {
        id: 3,
        position: Vec3::new(-1.693, 5.946, 12.35),
        look_at: Vec3::new(1.5, 0.75, -0.75),
    },
    ViewpointPreset {
        id: 4,
        position: Vec3::new(12.0, 1.0, 9.0),
        look_at: Vec3::new(-1.5, 2.5, -1.0),
    },
    ViewpointPreset {
        id: 5,
        position: Vec3::new(-1.06, 1.93, 15.0),
        look_at: Vec3::new(1.1, 2.0, -1.6),
    },
];

const fn preset_ids_are_unique(presets: &[ViewpointPreset]) -> bool {
    let mut i = 0;
    while i < presets.len() {
        let mut j = i + 1;
        while j < presets.len() {
            if presets[i].id == presets[j].id {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    !VIEWPOINT_PRESETS.is_empty() && preset_ids_are_unique(&VIEWPOINT_PRESETS),
    "viewpoint presets must be non-empty with unique ids"
);

/// Look-at point the camera rig starts smoothing from.
pub const DEFAULT_SMOOTHED_TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
