// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for the droplet playback crates.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`driver`] - Animation driver that records every call
//! - [`fetcher`] - Fetcher that serves a fixed script of frames
//! - [`frames`] - Frame builders
//! - [`harness`] - Drives an engine to convergence and checks single-flight
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod fetcher;
pub mod frames;
pub mod harness;

pub use config::InMemoryConfigStore;
pub use driver::RecordingDriver;
pub use fetcher::ScriptedFetcher;
pub use frames::{merge_scenario, walking_frames, FrameBuilder};
pub use harness::{build_engine, run_until_idle, started_engine, HarnessError, TestEngine};
