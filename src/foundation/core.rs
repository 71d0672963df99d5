use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::Vec2;

/// Absolute 0-based frame index in scene timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Convert a caller-supplied signed frame, rejecting negative values.
    pub fn from_signed(frame: i64) -> SceneResult<Self> {
        u64::try_from(frame)
            .map(Self)
            .map_err(|_| SceneError::range(format!("frame {frame} is negative")))
    }
}

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> SceneResult<Self> {
        if start.0 > end.0 {
            return Err(SceneError::config("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
///
/// This is the timeline clock: every time-based quantity is derived from a frame index and
/// this rate, never from wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> SceneResult<Self> {
        if den == 0 {
            return Err(SceneError::config("fps den must be > 0"));
        }
        if num == 0 {
            return Err(SceneError::config("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Check the positivity invariant on deserialized values.
    pub fn validate(self) -> SceneResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Frame rate as frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Elapsed time at `frame`, i.e. `frame / fps`.
    pub fn elapsed_secs(self, frame: FrameIndex) -> f64 {
        self.frames_to_secs(frame.0 as f64)
    }

    /// Convert a (possibly fractional) frame count to seconds.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * self.frame_duration_secs()
    }

    /// Convert seconds to whole frames, rounding down.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}
