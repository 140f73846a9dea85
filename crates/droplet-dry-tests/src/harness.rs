// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drives an engine built on the recording doubles until it settles.

use droplet_model::Frame;
use droplet_playback::{Activity, PlaybackConfig, PlaybackEngine, PlaybackError};
use thiserror::Error;

use crate::driver::RecordingDriver;
use crate::fetcher::ScriptedFetcher;

/// Failures detected while driving an engine.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The engine rejected a callback.
    #[error(transparent)]
    Engine(#[from] PlaybackError),
    /// A fetch and an animation batch were outstanding together.
    #[error("fetch and animation in flight at the same time")]
    Overlap,
    /// The engine reported a fetch but the fetcher had nothing outstanding.
    #[error("engine waiting on a fetch that was never requested")]
    Stalled,
}

/// Engine wired to the recording doubles.
pub type TestEngine = PlaybackEngine<RecordingDriver, ScriptedFetcher>;

/// Engine over `frames` with default config, not yet started.
pub fn build_engine(frames: Vec<Frame>) -> TestEngine {
    PlaybackEngine::new(
        PlaybackConfig::default(),
        RecordingDriver::new(),
        ScriptedFetcher::new(frames),
    )
}

/// Engine over `frames`, started and run until the initial frame is placed.
pub fn started_engine(frames: Vec<Frame>) -> Result<TestEngine, HarnessError> {
    let mut engine = build_engine(frames);
    engine.start();
    run_until_idle(&mut engine)?;
    Ok(engine)
}

/// Answers fetches and completes batches until the engine is idle.
///
/// Returns the number of callbacks delivered. Fails if a fetch and a batch are
/// ever outstanding together, or if the engine rejects a callback.
pub fn run_until_idle(engine: &mut TestEngine) -> Result<usize, HarnessError> {
    let mut callbacks = 0;
    loop {
        if engine.driver().active.is_some() && engine.fetcher().outstanding.is_some() {
            return Err(HarnessError::Overlap);
        }
        match engine.activity() {
            Activity::Idle => return Ok(callbacks),
            Activity::Fetching { .. } => {
                let Some(result) = engine.fetcher_mut().respond() else {
                    return Err(HarnessError::Stalled);
                };
                engine.on_frame_fetched(result)?;
            }
            Activity::Animating { .. } => {
                engine.driver_mut().finish();
                engine.on_complete()?;
            }
        }
        callbacks += 1;
    }
}
