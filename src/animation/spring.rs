use crate::{
    foundation::core::Fps,
    foundation::error::{SceneError, SceneResult},
};

/// Parameters of a damped harmonic oscillator released from rest at 0 and settling at 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Damping coefficient; higher values approach monotonically, lower values overshoot.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Spring stiffness (`> 0`).
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Oscillator mass (`> 0`).
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Cap progress at 1 so underdamped springs never overshoot.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping() -> f64 {
    10.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Spring with the given damping and stiffness and unit mass.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Validate that parameters describe a physical, converging spring.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(SceneError::config("spring stiffness must be finite and > 0"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SceneError::config("spring mass must be finite and > 0"));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(SceneError::config("spring damping must be finite and > 0"));
        }
        Ok(())
    }

    /// Damping ratio `zeta`; `< 1` overshoots, `>= 1` approaches monotonically.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt()).max(1e-9)
    }

    /// Progress after `elapsed_frames`; see [`progress`].
    pub fn progress(&self, elapsed_frames: f64, fps: Fps) -> f64 {
        progress(elapsed_frames, fps, self)
    }

    /// Value eased from `from` to `to` after `elapsed_frames`.
    pub fn between(&self, from: f64, to: f64, elapsed_frames: f64, fps: Fps) -> f64 {
        from + (to - from) * self.progress(elapsed_frames, fps)
    }
}

/// Closed-form spring progress at `elapsed_frames` after release.
///
/// A pure function of its inputs: no integration state is carried between frames, so any frame
/// can be evaluated in isolation. Negative (or NaN) elapsed time returns 0.
pub fn progress(elapsed_frames: f64, fps: Fps, config: &SpringConfig) -> f64 {
    if !(elapsed_frames > 0.0) {
        return 0.0;
    }
    let t = fps.frames_to_secs(elapsed_frames);
    let x = Response::of(config).map_or(0.0, |r| r.displacement(t));
    if config.overshoot_clamping {
        x.min(1.0)
    } else {
        x
    }
}

/// Smallest whole frame count after which the response is guaranteed to stay within
/// `tolerance` of 1.
///
/// Uses the decay envelope of the closed form, so the result is an upper bound for
/// underdamped springs whose oscillation may cross into tolerance earlier.
pub fn settle_frames(fps: Fps, config: &SpringConfig, tolerance: f64) -> SceneResult<u64> {
    config.validate()?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SceneError::config("settle tolerance must be finite and > 0"));
    }
    let Some(response) = Response::of(config) else {
        return Err(SceneError::config("spring has no restoring force"));
    };

    // One hour of frames is the search horizon.
    let horizon = u64::from(fps.num) * 3600 / u64::from(fps.den).max(1);
    (0..=horizon)
        .find(|&n| response.envelope(fps.frames_to_secs(n as f64)) <= tolerance)
        .ok_or_else(|| SceneError::config("spring does not settle within one hour"))
}

#[derive(Clone, Copy, Debug)]
enum Response {
    Underdamped { zeta: f64, w0: f64, wd: f64 },
    Critical { w0: f64 },
    Overdamped { r1: f64, r2: f64, c1: f64, c2: f64 },
}

impl Response {
    fn of(config: &SpringConfig) -> Option<Self> {
        let k = config.stiffness.max(0.0);
        let c = config.damping.max(0.0);
        let m = config.mass.max(1e-9);

        let w0 = (k / m).sqrt();
        if w0 == 0.0 || !w0.is_finite() {
            return None;
        }
        let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

        Some(if (zeta - 1.0).abs() < 1e-6 {
            Self::Critical { w0 }
        } else if zeta < 1.0 {
            Self::Underdamped {
                zeta,
                w0,
                wd: w0 * (1.0 - zeta * zeta).sqrt(),
            }
        } else {
            let z2 = (zeta * zeta - 1.0).sqrt();
            // zeta - z2 == 1 / (zeta + z2); the subtraction loses every digit for large zeta.
            let slow = 1.0 / (zeta + z2);
            Self::Overdamped {
                r1: -w0 * slow,
                r2: -w0 * (zeta + z2),
                c1: slow / (2.0 * z2),
                c2: (zeta + z2) / (2.0 * z2),
            }
        })
    }

    // Step response x(t) with x(0) = 0, v(0) = 0, settling at 1.
    fn displacement(self, t: f64) -> f64 {
        match self {
            Self::Underdamped { zeta, w0, wd } => {
                let e = (-zeta * w0 * t).exp();
                let k = zeta / (1.0 - zeta * zeta).sqrt();
                1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
            }
            Self::Critical { w0 } => 1.0 - (-w0 * t).exp() * (1.0 + w0 * t),
            Self::Overdamped { r1, r2, c1, c2 } => {
                1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
            }
        }
    }

    // Monotone non-increasing bound on |x(t) - 1|.
    fn envelope(self, t: f64) -> f64 {
        match self {
            Self::Underdamped { zeta, w0, .. } => {
                (-zeta * w0 * t).exp() / (1.0 - zeta * zeta).sqrt()
            }
            Self::Critical { .. } | Self::Overdamped { .. } => 1.0 - self.displacement(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
