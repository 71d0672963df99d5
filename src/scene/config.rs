use std::collections::BTreeSet;
use std::path::Path;

use crate::{
    animation::curve::Curve,
    animation::ease::Ease,
    animation::spring::SpringConfig,
    camera::offset::StackLayout,
    foundation::color::Rgba8,
    foundation::core::Fps,
    foundation::error::{SceneError, SceneResult},
    timeline::focus::FocusRule,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static configuration of one scene.
///
/// A configuration is pure data that can be built in code (see [`crate::presets`]) or loaded from
/// JSON, and is validated once by [`crate::Scene::new`].
pub struct SceneConfig {
    /// Scene identifier.
    pub id: String,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Elements of the stack; `order_index` values must be `0..len` without repeats.
    pub elements: Vec<VisualElement>,
    /// Phases in frame order, gap-free from frame 0.
    pub phases: Vec<PhaseSpec>,
    /// Stack geometry used for camera centering.
    pub stack: StackLayout,
    /// Staggered reveal of the stack.
    #[serde(default)]
    pub reveal: RevealSpec,
    /// Focus highlighting and emphasis defaults.
    #[serde(default)]
    pub highlight: HighlightSpec,
    /// Spring easing camera moves between focus targets.
    #[serde(default = "default_camera_spring")]
    pub camera_spring: SpringConfig,
    /// Spring easing scale/glow as elements gain or lose focus.
    #[serde(default = "default_focus_spring")]
    pub focus_spring: SpringConfig,
    /// Script scene id used to select captions; defaults to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_scene: Option<String>,
}

fn default_camera_spring() -> SpringConfig {
    SpringConfig::new(30.0, 50.0)
}

fn default_focus_spring() -> SpringConfig {
    SpringConfig::new(20.0, 100.0)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One element of the stack.
pub struct VisualElement {
    /// Element identifier, unique within the scene.
    pub id: String,
    /// Position in the stack and in the reveal order.
    pub order_index: usize,
    /// Grouping used by zone-scoped emphasis.
    #[serde(default)]
    pub zone: String,
    /// Base fill color, passed through to the paint layer.
    #[serde(default)]
    pub base_color: Rgba8,
    /// Display label, passed through to the paint layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One phase and its rules.
pub struct PhaseSpec {
    /// Phase identifier.
    pub id: String,
    /// First frame (inclusive).
    pub start_frame: u64,
    /// End frame (exclusive).
    pub end_frame: u64,
    /// Focal element rule.
    #[serde(default)]
    pub focus: FocusRule,
    /// Emphasis curves for the focal element, in phase-local frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<EmphasisSpec>,
    /// Phase-scoped texts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<OverlaySpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Phase-specific scale/glow curves for the focal element.
pub struct EmphasisSpec {
    /// Restrict the emphasis to focal elements of this zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Focal scale over phase-local frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Curve>,
    /// Focal glow over phase-local frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<Curve>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A text shown during one phase.
pub struct OverlaySpec {
    /// Overlay identifier.
    pub id: String,
    /// Text content.
    pub text: String,
    /// Opacity over phase-local frames (clamped).
    pub opacity: Curve,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Staggered fade-in of the element stack.
pub struct RevealSpec {
    /// Phase whose start anchors the reveal; defaults to the first phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Extra frames after the anchor before the first element starts.
    #[serde(default)]
    pub delay: u64,
    /// Frames between consecutive elements starting to fade in.
    #[serde(default = "default_stagger")]
    pub stagger: u64,
    /// Frames each fade-in takes (`> 0`).
    #[serde(default = "default_fade_in")]
    pub fade_in: u64,
    /// Easing of each fade-in.
    #[serde(default)]
    pub ease: Ease,
}

fn default_stagger() -> u64 {
    15
}

fn default_fade_in() -> u64 {
    30
}

impl RevealSpec {
    /// Frame at which the element at stack position `order` starts fading in, counted from
    /// `anchor`.
    pub fn start_frame(&self, anchor: u64, order: usize) -> SceneResult<u64> {
        u64::try_from(order)
            .ok()
            .and_then(|o| o.checked_mul(self.stagger))
            .and_then(|s| s.checked_add(self.delay))
            .and_then(|s| s.checked_add(anchor))
            .ok_or_else(|| SceneError::config("reveal start overflows"))
    }
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            phase: None,
            delay: 0,
            stagger: default_stagger(),
            fade_in: default_fade_in(),
            ease: Ease::Linear,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Focus highlighting values.
pub struct HighlightSpec {
    /// Highlight factor of non-focal elements while something is in focus.
    #[serde(default = "default_dim")]
    pub dim: f64,
    /// Highlight factor of all elements when nothing is in focus; defaults to `dim`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<f64>,
    /// Focal scale when the phase declares no emphasis curve.
    #[serde(default = "default_focus_scale")]
    pub focus_scale: f64,
    /// Focal glow when the phase declares no emphasis curve.
    #[serde(default = "default_focus_glow")]
    pub focus_glow: f64,
}

fn default_dim() -> f64 {
    0.4
}

fn default_focus_scale() -> f64 {
    1.08
}

fn default_focus_glow() -> f64 {
    1.0
}

impl Default for HighlightSpec {
    fn default() -> Self {
        Self {
            dim: default_dim(),
            overview: None,
            focus_scale: default_focus_scale(),
            focus_glow: default_focus_glow(),
        }
    }
}

impl HighlightSpec {
    /// Highlight factor of every element when no element is focal.
    pub fn overview_factor(&self) -> f64 {
        self.overview.unwrap_or(self.dim)
    }
}

impl SceneConfig {
    /// Parse a JSON scene configuration (not yet validated).
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        serde_json::from_str(s).map_err(|e| SceneError::serde(e.to_string()))
    }

    /// Read and parse a JSON scene configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            SceneError::Other(anyhow::Error::new(e).context(format!(
                "read scene config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::serde(e.to_string()))
    }

    /// Validate the parts that are not checked while compiling timeline structures.
    pub fn validate(&self) -> SceneResult<()> {
        self.fps.validate()?;
        if self.id.trim().is_empty() {
            return Err(SceneError::config("scene id must be non-empty"));
        }

        let n = self.elements.len();
        let mut ids = BTreeSet::new();
        let mut orders = BTreeSet::new();
        for e in &self.elements {
            if !ids.insert(e.id.as_str()) {
                return Err(SceneError::config(format!("duplicate element id '{}'", e.id)));
            }
            if e.order_index >= n || !orders.insert(e.order_index) {
                return Err(SceneError::config(format!(
                    "element '{}' order_index {} must be unique and < {n}",
                    e.id, e.order_index
                )));
            }
        }

        if self.reveal.fade_in == 0 {
            return Err(SceneError::config("reveal fade_in must be > 0 frames"));
        }
        if let Some(anchor) = &self.reveal.phase
            && !self.phases.iter().any(|p| &p.id == anchor)
        {
            return Err(SceneError::config(format!(
                "reveal anchor phase '{anchor}' does not exist"
            )));
        }
        let anchor = self
            .reveal
            .phase
            .as_ref()
            .and_then(|id| self.phases.iter().find(|p| &p.id == id))
            .map_or(0, |p| p.start_frame);
        self.reveal
            .start_frame(anchor, n.saturating_sub(1))?
            .checked_add(self.reveal.fade_in)
            .ok_or_else(|| SceneError::config("reveal end overflows"))?;

        let h = &self.highlight;
        for (name, v) in [("dim", h.dim), ("overview", h.overview_factor())] {
            if !(0.0..=1.0).contains(&v) {
                return Err(SceneError::config(format!(
                    "highlight {name} must be within [0, 1]"
                )));
            }
        }
        for (name, v) in [("focus_scale", h.focus_scale), ("focus_glow", h.focus_glow)] {
            if !v.is_finite() || v < 0.0 {
                return Err(SceneError::config(format!(
                    "highlight {name} must be finite and >= 0"
                )));
            }
        }

        for p in &self.phases {
            let mut overlay_ids = BTreeSet::new();
            for o in &p.overlays {
                if !overlay_ids.insert(o.id.as_str()) {
                    return Err(SceneError::config(format!(
                        "phase '{}' has duplicate overlay id '{}'",
                        p.id, o.id
                    )));
                }
            }
        }

        self.camera_spring.validate()?;
        self.focus_spring.validate()?;
        self.stack.validate()
    }

    /// Scene id used to select script lines.
    pub fn script_scene_id(&self) -> &str {
        self.script_scene.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
