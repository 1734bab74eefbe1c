/// glTF scene rendered by the viewer, relative to the asset root.
pub const SCENE_ASSET_PATH: &str = "artist_workroom/scene.gltf";

/// Canvas the web build renders into.
pub const CANVAS_SELECTOR: &str = "#bevy";

pub const WINDOW_TITLE: &str = "Scene Viewer";
