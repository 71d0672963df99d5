use std::collections::BTreeMap;

use crate::{
    animation::curve::Curve,
    camera::offset::CameraTrack,
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{SceneError, SceneResult},
    scene::config::{SceneConfig, VisualElement},
    scene::state::{ElementState, OverlayState, SceneState},
    script::caption::{CaptionEntry, ScriptTimeline},
    timeline::focus::{FocusRule, FocusTrack},
    timeline::phase::{Phase, PhaseTimeline},
};

#[derive(Clone, Debug, PartialEq)]
struct SceneCaptions {
    origin: u64,
    entries: Vec<CaptionEntry>,
}

/// A validated scene, ready to evaluate any frame in any order.
///
/// Everything that depends on more than one frame (phase partition, focus segments, camera entry
/// offsets, reveal curves) is compiled once in [`Scene::new`]. Evaluation is then a pure lookup,
/// so a `Scene` can be shared across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    config: SceneConfig,
    // Stack position -> index into `config.elements`.
    by_order: Vec<usize>,
    timeline: PhaseTimeline,
    focus: FocusTrack,
    camera: CameraTrack,
    // Indexed by stack position.
    reveal: Vec<Curve>,
    captions: Option<SceneCaptions>,
}

impl Scene {
    /// Validate `config` and compile its timeline structures.
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        config.validate()?;

        let phases = config
            .phases
            .iter()
            .map(|p| Phase::new(p.id.clone(), p.start_frame, p.end_frame))
            .collect::<SceneResult<Vec<_>>>()?;
        let timeline = PhaseTimeline::new(phases)?;

        let n = config.elements.len();
        let rules: Vec<FocusRule> = config.phases.iter().map(|p| p.focus).collect();
        let focus = FocusTrack::new(&timeline, &rules, n)?;
        let camera = CameraTrack::new(&focus, config.stack, n, config.camera_spring, config.fps)?;

        let mut by_order = vec![0usize; n];
        for (i, e) in config.elements.iter().enumerate() {
            by_order[e.order_index] = i;
        }

        let anchor = match &config.reveal.phase {
            Some(id) => timeline
                .phase(id)
                .map(|(_, p)| p.range.start.0)
                .ok_or_else(|| SceneError::config(format!("unknown reveal phase '{id}'")))?,
            None => 0,
        };
        let reveal = (0..n)
            .map(|order| {
                let start = config.reveal.start_frame(anchor, order)? as f64;
                Curve::ramp(
                    start,
                    start + config.reveal.fade_in as f64,
                    0.0,
                    1.0,
                    config.reveal.ease,
                )
            })
            .collect::<SceneResult<Vec<_>>>()?;

        tracing::debug!(
            scene = %config.id,
            elements = n,
            phases = timeline.phases().len(),
            focus_segments = focus.segments().len(),
            total_frames = timeline.total_frames(),
            "compiled scene"
        );

        Ok(Self {
            config,
            by_order,
            timeline,
            focus,
            camera,
            reveal,
            captions: None,
        })
    }

    /// Attach the captions of this scene's script lines.
    ///
    /// Scene frame 0 maps to the first line of the scene in `script`.
    pub fn with_script(mut self, script: &ScriptTimeline) -> SceneResult<Self> {
        let scene_id = self.config.script_scene_id();
        let entries: Vec<CaptionEntry> = script.scene_entries(scene_id).cloned().collect();
        let Some(first) = entries.first() else {
            return Err(SceneError::config(format!(
                "script has no lines for scene '{scene_id}'"
            )));
        };
        let origin = first.start_frame;

        if let Some(span) = script.scene_range(scene_id)
            && span.len_frames() != self.timeline.total_frames()
        {
            tracing::warn!(
                scene = %self.config.id,
                script_frames = span.len_frames(),
                scene_frames = self.timeline.total_frames(),
                "script span differs from scene length"
            );
        }

        self.captions = Some(SceneCaptions { origin, entries });
        Ok(self)
    }

    /// Scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Scene id.
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.config.fps
    }

    /// Phase partition.
    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Compiled focus segments.
    pub fn focus_track(&self) -> &FocusTrack {
        &self.focus
    }

    /// Compiled camera track.
    pub fn camera(&self) -> &CameraTrack {
        &self.camera
    }

    /// Scene length in frames.
    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Every frame of the scene.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Element at stack position `order`.
    pub fn element_at(&self, order: usize) -> Option<&VisualElement> {
        self.by_order.get(order).map(|&i| &self.config.elements[i])
    }

    /// Evaluate the state at `frame`.
    ///
    /// Negative frames are a [`SceneError::Range`]; frames past the end hold the final state.
    #[tracing::instrument(skip(self), fields(scene = %self.config.id))]
    pub fn eval_frame(&self, frame: i64) -> SceneResult<SceneState> {
        let frame = FrameIndex::from_signed(frame)?;
        Ok(self.eval_at(frame))
    }

    /// Evaluate the state at a non-negative frame.
    pub fn eval_at(&self, frame: FrameIndex) -> SceneState {
        let active = self.timeline.active_at(frame);
        let held = active.held_frame();
        let phase_cfg = &self.config.phases[active.index];
        let fps = self.config.fps;

        let (seg_idx, seg) = self.focus.segment_at(held);
        let since_focus = held.0.saturating_sub(seg.range.start.0) as f64;
        let p = self.config.focus_spring.progress(since_focus, fps);

        // The element that just lost focus eases back to rest from where it was.
        let released = seg_idx
            .checked_sub(1)
            .map(|k| &self.focus.segments()[k])
            .and_then(|prev| {
                let i = prev.focus.filter(|&i| Some(i) != seg.focus)?;
                let last = FrameIndex(prev.range.end.0.saturating_sub(1));
                let held_for = prev.range.len_frames().saturating_sub(1) as f64;
                Some((i, self.emphasis(i, last, held_for)))
            });

        let h = &self.config.highlight;
        let offset = self.camera.offset_vec_at(held);
        let mut elements = BTreeMap::new();
        for (order, &idx) in self.by_order.iter().enumerate() {
            let el = &self.config.elements[idx];
            let focal = seg.focus == Some(order);

            let highlight = match seg.focus {
                Some(f) if f == order => 1.0,
                Some(_) => h.dim,
                None => h.overview_factor(),
            };
            let (scale, glow) = if focal {
                self.emphasis(order, held, since_focus)
            } else if let Some((i, (rs, rg))) = released
                && i == order
            {
                (rs + (1.0 - rs) * p, rg * (1.0 - p))
            } else {
                (1.0, 0.0)
            };

            elements.insert(
                el.id.clone(),
                ElementState {
                    order_index: order,
                    zone: el.zone.clone(),
                    color: el.base_color,
                    opacity: self.reveal[order].evaluate_clamped(held.0 as f64).clamp(0.0, 1.0),
                    scale,
                    highlight,
                    glow,
                    offset,
                    focal,
                },
            );
        }

        let local = active.local_frame as f64;
        let overlays = phase_cfg
            .overlays
            .iter()
            .filter_map(|o| {
                let opacity = o.opacity.evaluate_clamped(local).clamp(0.0, 1.0);
                (opacity > 0.0).then(|| OverlayState {
                    id: o.id.clone(),
                    text: o.text.clone(),
                    opacity,
                })
            })
            .collect();

        SceneState {
            scene: self.config.id.clone(),
            frame,
            held_frame: held,
            phase: active.phase.id.clone(),
            local_frame: active.local_frame,
            focus: seg
                .focus
                .and_then(|i| self.element_at(i))
                .map(|e| e.id.clone()),
            camera_offset: offset,
            elements,
            overlays,
            caption: self.caption_at(held),
        }
    }

    /// Scale and glow of the element at stack position `order` while focal at `frame`, after
    /// `since_focus` frames in focus.
    fn emphasis(&self, order: usize, frame: FrameIndex, since_focus: f64) -> (f64, f64) {
        let active = self.timeline.active_at(frame);
        let phase_cfg = &self.config.phases[active.index];
        let zone = self.element_at(order).map(|e| e.zone.as_str());
        let emphasis = phase_cfg
            .emphasis
            .as_ref()
            .filter(|e| e.zone.is_none() || e.zone.as_deref() == zone);

        let local = active.local_frame as f64;
        let h = &self.config.highlight;
        let target_scale = emphasis
            .and_then(|e| e.scale.as_ref())
            .map_or(h.focus_scale, |c| c.evaluate_clamped(local));
        let target_glow = emphasis
            .and_then(|e| e.glow.as_ref())
            .map_or(h.focus_glow, |c| c.evaluate_clamped(local));

        let p = self.config.focus_spring.progress(since_focus, self.config.fps);
        (1.0 + (target_scale - 1.0) * p, target_glow * p)
    }

    fn caption_at(&self, held: FrameIndex) -> Option<String> {
        let captions = self.captions.as_ref()?;
        let global = FrameIndex(captions.origin + held.0);
        let idx = captions
            .entries
            .partition_point(|e| e.start_frame <= global.0)
            .checked_sub(1)?;
        let e = &captions.entries[idx];
        e.range().contains(global).then(|| e.text.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
