use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
    timeline::phase::PhaseTimeline,
};

/// How a phase chooses its focal element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusRule {
    /// No focal element (full overview).
    #[default]
    None,
    /// One element stays in focus for the whole phase.
    Fixed {
        /// Element order index.
        index: usize,
    },
    /// Step the focus one element per `dwell` frames from `from` to `to`, then hold `to`.
    ///
    /// `from > to` pans backwards.
    Pan {
        /// First focused order index.
        from: usize,
        /// Last focused order index.
        to: usize,
        /// Frames each element stays in focus.
        dwell: u64,
    },
}

/// A maximal frame range with a single focal element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FocusSegment {
    /// Frames covered, `[start, end)`.
    pub range: FrameRange,
    /// Focal order index, `None` in overview.
    pub focus: Option<usize>,
}

/// Gap-free sequence of focus segments covering a whole scene, compiled once from the per-phase
/// rules.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FocusTrack {
    segments: Vec<FocusSegment>,
}

impl FocusTrack {
    /// Compile `rules` (one per phase, in phase order) against `timeline`.
    pub fn new(
        timeline: &PhaseTimeline,
        rules: &[FocusRule],
        element_count: usize,
    ) -> SceneResult<Self> {
        if rules.len() != timeline.phases().len() {
            return Err(SceneError::config(format!(
                "expected {} focus rules (one per phase), got {}",
                timeline.phases().len(),
                rules.len()
            )));
        }

        let mut segments: Vec<FocusSegment> = Vec::new();
        for (phase, rule) in timeline.phases().iter().zip(rules) {
            let check = |index: usize| {
                if index >= element_count {
                    return Err(SceneError::config(format!(
                        "phase '{}' focuses element {index} but the scene has {element_count}",
                        phase.id
                    )));
                }
                Ok(())
            };
            let (start, end) = (phase.range.start.0, phase.range.end.0);

            match *rule {
                FocusRule::None => push_merged(&mut segments, start, end, None),
                FocusRule::Fixed { index } => {
                    check(index)?;
                    push_merged(&mut segments, start, end, Some(index));
                }
                FocusRule::Pan { from, to, dwell } => {
                    check(from)?;
                    check(to)?;
                    if dwell == 0 {
                        return Err(SceneError::config(format!(
                            "phase '{}' pan dwell must be > 0",
                            phase.id
                        )));
                    }
                    let steps = from.abs_diff(to);
                    for k in 0..=steps {
                        let seg_start = start.saturating_add((k as u64).saturating_mul(dwell));
                        if seg_start >= end {
                            break;
                        }
                        let seg_end = if k == steps {
                            end
                        } else {
                            seg_start.saturating_add(dwell).min(end)
                        };
                        let index = if from <= to { from + k } else { from - k };
                        push_merged(&mut segments, seg_start, seg_end, Some(index));
                    }
                }
            }
        }

        Ok(Self { segments })
    }

    /// Segments in frame order.
    pub fn segments(&self) -> &[FocusSegment] {
        &self.segments
    }

    /// Segment containing `frame`; frames past the end resolve to the last segment.
    pub fn segment_at(&self, frame: FrameIndex) -> (usize, &FocusSegment) {
        let idx = self
            .segments
            .partition_point(|s| s.range.start.0 <= frame.0)
            .saturating_sub(1);
        (idx, &self.segments[idx])
    }

    /// Focal index at `frame`.
    pub fn focal_index(&self, frame: FrameIndex) -> Option<usize> {
        self.segment_at(frame).1.focus
    }
}

fn push_merged(segments: &mut Vec<FocusSegment>, start: u64, end: u64, focus: Option<usize>) {
    if let Some(last) = segments.last_mut()
        && last.focus == focus
        && last.range.end.0 == start
    {
        last.range.end = FrameIndex(end);
        return;
    }
    segments.push(FocusSegment {
        range: FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(end),
        },
        focus,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/focus.rs"]
mod tests;
