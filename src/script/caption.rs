use std::path::Path;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
};

/// One timed voiceover line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptionEntry {
    /// Spoken text.
    pub text: String,
    /// First frame of the line (inclusive, script-global).
    pub start_frame: u64,
    /// End frame of the line (exclusive, script-global).
    pub end_frame: u64,
    /// Scene the line belongs to.
    pub scene_id: String,
}

impl CaptionEntry {
    /// Frames covered by the line.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }
}

/// Immutable, contiguous voiceover script.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<CaptionEntry>", into = "Vec<CaptionEntry>")]
pub struct ScriptTimeline {
    entries: Vec<CaptionEntry>,
}

impl ScriptTimeline {
    /// Sort by start frame and validate ranges and contiguity.
    pub fn new(mut entries: Vec<CaptionEntry>) -> SceneResult<Self> {
        entries.sort_by_key(|e| e.start_frame);
        for e in &entries {
            if e.start_frame >= e.end_frame {
                return Err(SceneError::config(format!(
                    "caption '{}' must have start_frame < end_frame ({} >= {})",
                    e.text, e.start_frame, e.end_frame
                )));
            }
            if e.text.trim().is_empty() {
                return Err(SceneError::config(format!(
                    "caption at frame {} has empty text",
                    e.start_frame
                )));
            }
        }
        for w in entries.windows(2) {
            if w[0].end_frame != w[1].start_frame {
                return Err(SceneError::config(format!(
                    "captions must be contiguous: '{}' ends at {} but '{}' starts at {}",
                    w[0].text, w[0].end_frame, w[1].text, w[1].start_frame
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse and validate a JSON array of entries.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        serde_json::from_str(s).map_err(|e| SceneError::serde(e.to_string()))
    }

    /// Read and parse a JSON script file.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            SceneError::Other(anyhow::Error::new(e).context(format!(
                "read script '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Entries sorted by start frame.
    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    /// Frame one past the last caption.
    pub fn total_frames(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.end_frame)
    }

    /// Entry whose `[start_frame, end_frame)` contains `frame`.
    pub fn active(&self, frame: FrameIndex) -> Option<&CaptionEntry> {
        let idx = self
            .entries
            .partition_point(|e| e.start_frame <= frame.0)
            .checked_sub(1)?;
        let e = &self.entries[idx];
        e.range().contains(frame).then_some(e)
    }

    /// Entries belonging to `scene_id`, in order.
    pub fn scene_entries<'a>(
        &'a self,
        scene_id: &'a str,
    ) -> impl Iterator<Item = &'a CaptionEntry> + 'a {
        self.entries.iter().filter(move |e| e.scene_id == scene_id)
    }

    /// Span from the first to the last line of `scene_id`.
    pub fn scene_range(&self, scene_id: &str) -> Option<FrameRange> {
        let mut it = self.scene_entries(scene_id);
        let first = it.next()?;
        let last = it.last().unwrap_or(first);
        Some(FrameRange {
            start: FrameIndex(first.start_frame),
            end: FrameIndex(last.end_frame),
        })
    }

    /// All lines joined by single spaces, for voiceover generation.
    pub fn full_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<Vec<CaptionEntry>> for ScriptTimeline {
    type Error = SceneError;

    fn try_from(entries: Vec<CaptionEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ScriptTimeline> for Vec<CaptionEntry> {
    fn from(script: ScriptTimeline) -> Self {
        script.entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/caption.rs"]
mod tests;
