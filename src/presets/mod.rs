//! Ready-made scene configurations.

mod layers;
mod title;

pub use layers::{layers_config, layers_scene};
pub use title::{title_config, title_scene};

use crate::{
    foundation::error::{SceneError, SceneResult},
    scene::config::SceneConfig,
};

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 2] = ["layers", "title"];

/// Preset configuration by name.
pub fn by_name(name: &str) -> SceneResult<SceneConfig> {
    match name {
        "layers" => layers_config(),
        "title" => title_config(),
        other => Err(SceneError::config(format!(
            "unknown preset '{other}' (expected one of: {})",
            NAMES.join(", ")
        ))),
    }
}
