use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;
use constants::viewpoints::{VIEWPOINT_PRESETS, ViewpointPreset};
use serde::{Deserialize, Serialize};

/// Stable identifier of a camera preset, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewpointId(pub u32);

impl fmt::Display for ViewpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Camera preset: where the camera sits and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub id: ViewpointId,
    pub position: Vec3,
    pub look_at: Vec3,
}

impl From<&ViewpointPreset> for Viewpoint {
    fn from(preset: &ViewpointPreset) -> Self {
        Self {
            id: ViewpointId(preset.id),
            position: preset.position,
            look_at: preset.look_at,
        }
    }
}

/// Validated reference into a [`ViewpointTable`].
///
/// Only the table hands these out, so a selection always resolves to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewpointSelection {
    index: usize,
    id: ViewpointId,
}

impl ViewpointSelection {
    pub fn id(&self) -> ViewpointId {
        self.id
    }
}

/// Ordered, immutable set of camera presets.
#[derive(Resource, Debug, Clone)]
pub struct ViewpointTable {
    entries: Vec<Viewpoint>,
}

impl ViewpointTable {
    /// Build a table in the given order. Rejects an empty list and duplicate ids.
    pub fn new(entries: Vec<Viewpoint>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let mut seen = HashSet::with_capacity(entries.len());
        if !entries.iter().all(|viewpoint| seen.insert(viewpoint.id)) {
            return None;
        }

        Some(Self { entries })
    }

    pub fn from_presets(presets: &[ViewpointPreset]) -> Option<Self> {
        Self::new(presets.iter().map(Viewpoint::from).collect())
    }

    pub fn get(&self, id: ViewpointId) -> Option<&Viewpoint> {
        self.entries.iter().find(|viewpoint| viewpoint.id == id)
    }

    pub fn select(&self, id: ViewpointId) -> Option<ViewpointSelection> {
        self.entries
            .iter()
            .position(|viewpoint| viewpoint.id == id)
            .map(|index| ViewpointSelection { index, id })
    }

    /// Selection by display position, used by the numbered keyboard shortcuts.
    pub fn selection_at(&self, index: usize) -> Option<ViewpointSelection> {
        self.entries
            .get(index)
            .map(|viewpoint| ViewpointSelection {
                index,
                id: viewpoint.id,
            })
    }

    pub fn first_selection(&self) -> ViewpointSelection {
        ViewpointSelection {
            index: 0,
            id: self.entries[0].id,
        }
    }

    /// Resolve a selection handed out by this table.
    pub fn viewpoint(&self, selection: ViewpointSelection) -> &Viewpoint {
        let viewpoint = &self.entries[selection.index];
        debug_assert_eq!(viewpoint.id, selection.id, "selection from another table");
        viewpoint
    }

    pub fn iter(&self) -> impl Iterator<Item = &Viewpoint> {
        self.entries.iter()
    }
}

impl Default for ViewpointTable {
    fn default() -> Self {
        // The constants crate asserts at compile time that the presets are non-empty and unique.
        let Some(table) = Self::from_presets(&VIEWPOINT_PRESETS) else {
            unreachable!("viewpoint presets failed validation");
        };
        table
    }
}
