use crate::{
    animation::spring::SpringConfig,
    foundation::core::{FrameIndex, Fps, Vec2},
    foundation::error::{SceneError, SceneResult},
    timeline::focus::FocusTrack,
};

/// Stacking direction of the element list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Elements stack top to bottom; the camera translates along y.
    #[default]
    Vertical,
    /// Elements stack left to right; the camera translates along x.
    Horizontal,
}

/// Uniform stacking geometry used for centering.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackLayout {
    /// Extent of one element along the stack axis, in pixels.
    pub element_extent: f64,
    /// Gap between consecutive elements, in pixels.
    #[serde(default)]
    pub gap: f64,
    /// Stack direction.
    #[serde(default)]
    pub axis: Axis,
}

impl StackLayout {
    /// Validate geometry.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.element_extent.is_finite() || self.element_extent <= 0.0 {
            return Err(SceneError::config(
                "stack element_extent must be finite and > 0",
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(SceneError::config("stack gap must be finite and >= 0"));
        }
        Ok(())
    }

    /// Mid-point of element `i` measured from the start of the stack.
    pub fn position(&self, i: usize) -> f64 {
        (i as f64) * (self.element_extent + self.gap) + self.element_extent / 2.0
    }

    /// Extent of `n` stacked elements (no trailing gap).
    pub fn total_extent(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        (n as f64) * self.element_extent + ((n - 1) as f64) * self.gap
    }

    /// Translation placing the focal element's mid-point at the container center.
    ///
    /// No focus means no translation.
    pub fn centering_offset(&self, n: usize, focus: Option<usize>) -> f64 {
        match focus {
            Some(i) => self.total_extent(n) / 2.0 - self.position(i),
            None => 0.0,
        }
    }

    /// Scalar offset as a 2D translation along the stack axis.
    pub fn to_vec2(&self, offset: f64) -> Vec2 {
        match self.axis {
            Axis::Vertical => Vec2::new(0.0, offset),
            Axis::Horizontal => Vec2::new(offset, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CameraSegment {
    start: u64,
    len: u64,
    entry: f64,
    target: f64,
}

/// Spring-eased camera offset for every focus segment of a scene.
///
/// Each segment blends from the offset the previous segment had reached at its end toward the
/// segment's own centering target, so focus changes never jump. The entry offsets are derived
/// once from static configuration; evaluating a frame only needs the elapsed frames since the
/// segment began.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTrack {
    layout: StackLayout,
    spring: SpringConfig,
    fps: Fps,
    segments: Vec<CameraSegment>,
}

impl CameraTrack {
    /// Derive the camera track for `element_count` stacked elements following `focus`.
    pub fn new(
        focus: &FocusTrack,
        layout: StackLayout,
        element_count: usize,
        spring: SpringConfig,
        fps: Fps,
    ) -> SceneResult<Self> {
        layout.validate()?;
        spring.validate()?;

        let mut segments: Vec<CameraSegment> = Vec::with_capacity(focus.segments().len());
        for seg in focus.segments() {
            let entry = match segments.last() {
                Some(prev) => spring.between(prev.entry, prev.target, prev.len as f64, fps),
                None => 0.0,
            };
            segments.push(CameraSegment {
                start: seg.range.start.0,
                len: seg.range.len_frames(),
                entry,
                target: layout.centering_offset(element_count, seg.focus),
            });
        }

        Ok(Self {
            layout,
            spring,
            fps,
            segments,
        })
    }

    /// Stack geometry.
    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    /// Centering target of the segment active at `frame`.
    pub fn target_at(&self, frame: FrameIndex) -> f64 {
        self.segment_at(frame).target
    }

    /// Scalar camera offset at `frame`.
    pub fn offset_at(&self, frame: FrameIndex) -> f64 {
        let seg = self.segment_at(frame);
        let elapsed = frame.0.saturating_sub(seg.start) as f64;
        self.spring.between(seg.entry, seg.target, elapsed, self.fps)
    }

    /// Camera offset at `frame` as a translation along the stack axis.
    pub fn offset_vec_at(&self, frame: FrameIndex) -> Vec2 {
        self.layout.to_vec2(self.offset_at(frame))
    }

    fn segment_at(&self, frame: FrameIndex) -> &CameraSegment {
        let idx = self
            .segments
            .partition_point(|s| s.start <= frame.0)
            .saturating_sub(1);
        &self.segments[idx]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/offset.rs"]
mod tests;
