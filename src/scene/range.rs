use rayon::prelude::*;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
    scene::builder::Scene,
    scene::state::SceneState,
};

/// Threading options for batch evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalThreading {
    /// Evaluate chunks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames handed to the pool at a time; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Evaluate every frame of `range` in frame order.
///
/// Frames are independent, so the parallel path returns exactly what the sequential path does.
#[tracing::instrument(skip(scene, threading), fields(scene = %scene.id()))]
pub fn eval_range(
    scene: &Scene,
    range: FrameRange,
    threading: &EvalThreading,
) -> SceneResult<Vec<SceneState>> {
    if range.is_empty() {
        return Err(SceneError::range("evaluation range must be non-empty"));
    }

    if !threading.parallel {
        return Ok((range.start.0..range.end.0)
            .map(|f| scene.eval_at(FrameIndex(f)))
            .collect());
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
        let frames: Vec<u64> = (chunk_start..chunk_end).collect();
        let states: Vec<SceneState> = pool.install(|| {
            frames
                .par_iter()
                .map(|&f| scene.eval_at(FrameIndex(f)))
                .collect()
        });
        out.extend(states);
        chunk_start = chunk_end;
    }

    tracing::debug!(frames = out.len(), "evaluated range");
    Ok(out)
}

/// Evaluate an arbitrary list of (possibly unordered, possibly repeated) frames.
pub fn eval_frames(scene: &Scene, frames: &[i64]) -> SceneResult<Vec<SceneState>> {
    frames.iter().map(|&f| scene.eval_frame(f)).collect()
}

fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SceneError::config(
            "evaluation threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/scene/range.rs"]
mod tests;
