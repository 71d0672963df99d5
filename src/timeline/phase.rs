use std::collections::BTreeSet;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
};

/// A contiguous, named frame sub-range of a scene.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    /// Phase identifier, unique within a scene.
    pub id: String,
    /// Frames covered by the phase, `[start, end)`.
    pub range: FrameRange,
}

impl Phase {
    /// Build a phase covering `[start, end)`.
    pub fn new(id: impl Into<String>, start: u64, end: u64) -> SceneResult<Self> {
        Ok(Self {
            id: id.into(),
            range: FrameRange::new(FrameIndex(start), FrameIndex(end))?,
        })
    }

    /// Number of frames in the phase.
    pub fn duration(&self) -> u64 {
        self.range.len_frames()
    }
}

/// The phase active at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePhase<'a> {
    /// The active phase.
    pub phase: &'a Phase,
    /// Position of `phase` in the timeline.
    pub index: usize,
    /// `frame - phase.start`, clamped to the phase duration past the last phase.
    pub local_frame: u64,
}

impl ActivePhase<'_> {
    /// Scene frame the state should be evaluated at; equals the requested frame except for
    /// trailing hold frames, which settle on the last phase's end.
    pub fn held_frame(&self) -> FrameIndex {
        FrameIndex(self.phase.range.start.0 + self.local_frame)
    }

    /// Return `true` when the request fell past the end of the scene.
    pub fn is_settled(&self) -> bool {
        self.local_frame >= self.phase.duration()
    }
}

/// Ordered, gap-free, non-overlapping phase partition of a scene.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseTimeline {
    phases: Vec<Phase>,
}

impl PhaseTimeline {
    /// Validate and build a timeline.
    pub fn new(phases: Vec<Phase>) -> SceneResult<Self> {
        let Some(first) = phases.first() else {
            return Err(SceneError::config("scene must declare at least one phase"));
        };
        if first.range.start.0 != 0 {
            return Err(SceneError::config(format!(
                "first phase '{}' must start at frame 0 (starts at {})",
                first.id, first.range.start.0
            )));
        }

        let mut seen = BTreeSet::new();
        for p in &phases {
            if p.range.is_empty() {
                return Err(SceneError::config(format!(
                    "phase '{}' must have start < end",
                    p.id
                )));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(SceneError::config(format!("duplicate phase id '{}'", p.id)));
            }
        }

        for w in phases.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            if a.range.end != b.range.start {
                let what = if a.range.end.0 < b.range.start.0 {
                    "gap"
                } else {
                    "overlap"
                };
                return Err(SceneError::config(format!(
                    "{what} between phase '{}' (ends {}) and phase '{}' (starts {})",
                    a.id, a.range.end.0, b.id, b.range.start.0
                )));
            }
        }

        Ok(Self { phases })
    }

    /// Build a timeline from consecutive `(id, duration)` pairs.
    pub fn from_durations<I, S>(durations: I) -> SceneResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut start = 0u64;
        let mut phases = Vec::new();
        for (id, len) in durations {
            let end = start.saturating_add(len);
            phases.push(Phase::new(id, start, end)?);
            start = end;
        }
        Self::new(phases)
    }

    /// Total scene length in frames.
    pub fn total_frames(&self) -> u64 {
        self.phases[self.phases.len() - 1].range.end.0
    }

    /// Phases in order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Look up a phase by id.
    pub fn phase(&self, id: &str) -> Option<(usize, &Phase)> {
        self.phases.iter().enumerate().find(|(_, p)| p.id == id)
    }

    /// Resolve the phase active at `frame`.
    ///
    /// Negative frames are a [`SceneError::Range`]; frames at or past the end resolve to the last
    /// phase held at its duration.
    pub fn active_phase(&self, frame: i64) -> SceneResult<ActivePhase<'_>> {
        let frame = FrameIndex::from_signed(frame)?;
        Ok(self.active_at(frame))
    }

    /// Infallible lookup for an already non-negative frame.
    pub fn active_at(&self, frame: FrameIndex) -> ActivePhase<'_> {
        // Phases are contiguous from 0, so the active one is the last that starts <= frame.
        let index = self
            .phases
            .partition_point(|p| p.range.start.0 <= frame.0)
            .saturating_sub(1);
        let phase = &self.phases[index];
        let local_frame = (frame.0 - phase.range.start.0).min(phase.duration());
        ActivePhase {
            phase,
            index,
            local_frame,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
