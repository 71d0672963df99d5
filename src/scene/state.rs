use std::collections::BTreeMap;

use crate::foundation::{
    color::Rgba8,
    core::{FrameIndex, Vec2},
};

/// Fully resolved visual state of one frame.
///
/// A state is a pure function of the scene configuration and the frame index; the paint layer
/// consumes it as-is.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneState {
    /// Scene identifier.
    pub scene: String,
    /// Requested frame.
    pub frame: FrameIndex,
    /// Frame the state was evaluated at; differs from `frame` only past the end of the scene.
    pub held_frame: FrameIndex,
    /// Active phase id.
    pub phase: String,
    /// Frames since the active phase started.
    pub local_frame: u64,
    /// Focal element id, if any.
    pub focus: Option<String>,
    /// Camera translation applied to the whole stack.
    pub camera_offset: Vec2,
    /// Per-element state keyed by element id.
    pub elements: BTreeMap<String, ElementState>,
    /// Visible overlays of the active phase.
    pub overlays: Vec<OverlayState>,
    /// Active caption line.
    pub caption: Option<String>,
}

/// Resolved state of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementState {
    /// Stack position.
    pub order_index: usize,
    /// Zone the element belongs to.
    pub zone: String,
    /// Base color.
    pub color: Rgba8,
    /// Reveal opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale about the element center; 1 at rest.
    pub scale: f64,
    /// Brightness factor: 1 when focal, the dim or overview factor otherwise.
    pub highlight: f64,
    /// Glow intensity; 0 at rest.
    pub glow: f64,
    /// Translation (the camera offset shared by all elements).
    pub offset: Vec2,
    /// Whether this element is the focal element.
    pub focal: bool,
}

impl ElementState {
    /// Opacity after highlighting, as the paint layer applies it.
    pub fn effective_opacity(&self) -> f64 {
        self.opacity * self.highlight
    }
}

/// A phase overlay with non-zero opacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayState {
    /// Overlay identifier.
    pub id: String,
    /// Text content.
    pub text: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl SceneState {
    /// Element state by id.
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Overlay state by id.
    pub fn overlay(&self, id: &str) -> Option<&OverlayState> {
        self.overlays.iter().find(|o| o.id == id)
    }
}
