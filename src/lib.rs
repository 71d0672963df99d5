//! Deterministic, frame-indexed timeline evaluation for animated explainer scenes.
//!
//! A scene is static configuration (elements, phases, focus rules, springs, curves). Compiling it
//! into a [`Scene`] validates everything once; afterwards any frame can be evaluated in any
//! order, from any thread, and always yields the same [`SceneState`]:
//!
//! - Build a [`SceneConfig`] in code, from JSON, or from [`presets`]
//! - Compile it with [`Scene::new`] (optionally [`Scene::with_script`] for captions)
//! - Evaluate single frames with [`Scene::eval_frame`] or ranges with [`eval_range`]
#![forbid(unsafe_code)]

mod foundation;

/// Easing, keyframe interpolation and spring physics.
pub mod animation;
/// Camera offset that keeps the focal element centered.
pub mod camera;
/// Ready-made scenes.
pub mod presets;
/// Scene configuration, per-frame state and evaluation.
pub mod scene;
/// Voiceover caption timing.
pub mod script;
/// Phase partition and focus rules.
pub mod timeline;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Fps, FrameIndex, FrameRange, Vec2};
pub use crate::foundation::error::{SceneError, SceneResult};

pub use crate::animation::curve::{Curve, CurveKey, CurveOpts, Extrapolate, interpolate, map_range};
pub use crate::animation::ease::Ease;
pub use crate::animation::spring::{SpringConfig, settle_frames};
pub use crate::camera::offset::{Axis, CameraTrack, StackLayout};
pub use crate::scene::builder::Scene;
pub use crate::scene::config::{
    EmphasisSpec, HighlightSpec, OverlaySpec, PhaseSpec, RevealSpec, SceneConfig, VisualElement,
};
pub use crate::scene::range::{EvalThreading, eval_frames, eval_range};
pub use crate::scene::state::{ElementState, OverlayState, SceneState};
pub use crate::script::caption::{CaptionEntry, ScriptTimeline};
pub use crate::timeline::focus::{FocusRule, FocusSegment, FocusTrack};
pub use crate::timeline::phase::{ActivePhase, Phase, PhaseTimeline};
