use crate::{
    animation::ease::Ease,
    foundation::error::{SceneError, SceneResult},
};

/// One `(frame, value)` keyframe of a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CurveKey {
    /// Frame position of the key. Fractional frames are allowed.
    pub frame: f64,
    /// Value at `frame`.
    pub value: f64,
    /// Easing applied toward the next key.
    pub ease: Ease,
}

impl CurveKey {
    /// Linear key.
    pub fn new(frame: f64, value: f64) -> Self {
        Self {
            frame,
            value,
            ease: Ease::Linear,
        }
    }

    /// Key whose outgoing segment uses `ease`.
    pub fn eased(frame: f64, value: f64, ease: Ease) -> Self {
        Self { frame, value, ease }
    }
}

impl<'de> serde::Deserialize<'de> for CurveKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pair([f64; 2]),
            Obj {
                frame: f64,
                value: f64,
                #[serde(default)]
                ease: Ease,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Pair([frame, value]) => Self::new(frame, value),
            Repr::Obj { frame, value, ease } => Self { frame, value, ease },
        })
    }
}

/// Behavior outside the keyed frame span, per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary key's value.
    #[default]
    Clamp,
    /// Continue the boundary segment's linear slope.
    Extend,
}

/// Edge behavior of a curve evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurveOpts {
    /// Behavior for frames at or before the first key.
    #[serde(default)]
    pub left: Extrapolate,
    /// Behavior for frames at or after the last key.
    #[serde(default)]
    pub right: Extrapolate,
}

impl CurveOpts {
    /// Clamp on both sides.
    pub const fn clamp_both() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }

    /// Extrapolate on both sides.
    pub const fn extend_both() -> Self {
        Self {
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        }
    }
}

/// Piecewise value curve over frames.
///
/// Keys are validated once at construction (non-empty, finite, strictly increasing frames), so
/// evaluation itself cannot fail.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Build a validated curve.
    pub fn new(keys: Vec<CurveKey>) -> SceneResult<Self> {
        if keys.is_empty() {
            return Err(SceneError::config("curve must have at least one keyframe"));
        }
        if let Some(k) = keys
            .iter()
            .find(|k| !k.frame.is_finite() || !k.value.is_finite())
        {
            return Err(SceneError::config(format!(
                "curve keyframe ({}, {}) must be finite",
                k.frame, k.value
            )));
        }
        if let Some(w) = keys.windows(2).find(|w| w[0].frame >= w[1].frame) {
            return Err(SceneError::config(format!(
                "curve keyframe frames must be strictly increasing (got {} then {})",
                w[0].frame, w[1].frame
            )));
        }
        Ok(Self { keys })
    }

    /// Build a linear curve from `(frame, value)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> SceneResult<Self> {
        Self::new(pairs.iter().map(|&(f, v)| CurveKey::new(f, v)).collect())
    }

    /// Two-key curve from `v0` at `f0` to `v1` at `f1`, eased with `ease`.
    pub fn ramp(f0: f64, f1: f64, v0: f64, v1: f64, ease: Ease) -> SceneResult<Self> {
        Self::new(vec![CurveKey::eased(f0, v0, ease), CurveKey::new(f1, v1)])
    }

    /// Constant curve.
    pub fn constant(value: f64) -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, value)],
        }
    }

    /// Keys in frame order.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Frame of the first key.
    pub fn first_frame(&self) -> f64 {
        self.keys[0].frame
    }

    /// Frame of the last key.
    pub fn last_frame(&self) -> f64 {
        self.keys[self.keys.len() - 1].frame
    }

    /// Same curve with every key frame moved by `delta`.
    ///
    /// Fails with a [`SceneError::Config`] if a moved frame is not finite.
    pub fn shifted(&self, delta: f64) -> SceneResult<Self> {
        Self::new(
            self.keys
                .iter()
                .map(|k| CurveKey {
                    frame: k.frame + delta,
                    ..*k
                })
                .collect(),
        )
    }

    /// Evaluate the curve at `frame`.
    pub fn evaluate(&self, frame: f64, opts: CurveOpts) -> f64 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if self.keys.len() == 1 {
            return first.value;
        }

        // `!(a > b)` keeps NaN on the left edge.
        if !(frame > first.frame) {
            return match opts.left {
                Extrapolate::Clamp => first.value,
                Extrapolate::Extend => {
                    let next = self.keys[1];
                    first.value + slope(first, next) * (frame - first.frame)
                }
            };
        }
        if frame >= last.frame {
            return match opts.right {
                Extrapolate::Clamp => last.value,
                Extrapolate::Extend => {
                    let prev = self.keys[self.keys.len() - 2];
                    last.value + slope(prev, last) * (frame - last.frame)
                }
            };
        }

        // first.frame < frame < last.frame, so 1 <= idx < len.
        let idx = self.keys.partition_point(|k| k.frame <= frame);
        let a = self.keys[idx - 1];
        let b = self.keys[idx];
        let t = (frame - a.frame) / (b.frame - a.frame);
        a.value + (b.value - a.value) * a.ease.apply(t)
    }

    /// Evaluate with both sides clamped.
    pub fn evaluate_clamped(&self, frame: f64) -> f64 {
        self.evaluate(frame, CurveOpts::clamp_both())
    }
}

fn slope(a: CurveKey, b: CurveKey) -> f64 {
    (b.value - a.value) / (b.frame - a.frame)
}

impl TryFrom<Vec<CurveKey>> for Curve {
    type Error = SceneError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<Curve> for Vec<CurveKey> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}

/// One-shot interpolation over linear `(frame, value)` pairs.
///
/// Validates the pairs on every call; prefer a prebuilt [`Curve`] on hot paths.
pub fn interpolate(frame: f64, pairs: &[(f64, f64)], opts: CurveOpts) -> SceneResult<f64> {
    Ok(Curve::from_pairs(pairs)?.evaluate(frame, opts))
}

/// Linearly remap `x` from `[a0, a1]` onto `[b0, b1]` without clamping.
///
/// A degenerate input span maps everything to `b0`.
pub fn map_range(x: f64, [a0, a1]: [f64; 2], [b0, b1]: [f64; 2]) -> f64 {
    if a1 == a0 {
        return b0;
    }
    b0 + (b1 - b0) * (x - a0) / (a1 - a0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
