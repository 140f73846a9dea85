// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! droplet-viewer: terminal replay of a droplet simulation.
//!
//! Frames are pulled one JSON-RPC call at a time and replayed with tweened
//! steps. Type commands on stdin (`help` lists them). Logs go to stderr so
//! they do not tear the board; set `RUST_LOG` to change verbosity.

use anyhow::Result;
use clap::Parser;
use droplet_app_core::config::PrefsService;
use droplet_app_core::config_port::ConfigPort;
use droplet_app_core::prefs::ViewerPrefs;
use droplet_config_fs::FsConfigStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod render;
mod tween;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Terminal replay viewer for droplet simulations")]
struct Args {
    /// JSON-RPC endpoint of the simulator
    #[arg(long)]
    url: Option<String>,
    /// RPC method returning one frame of droplet info per call
    #[arg(long)]
    method: Option<String>,
    /// Base tween length per frame step, in milliseconds
    #[arg(long)]
    tween_ms: Option<u64>,
    /// Autoplay step interval, in milliseconds
    #[arg(long)]
    autoplay_ms: Option<u64>,
    /// Board width in cells
    #[arg(long)]
    width: Option<u32>,
    /// Board height in cells
    #[arg(long)]
    height: Option<u32>,
    /// Start with autoplay enabled
    #[arg(long)]
    autoplay: bool,
    /// Save the effective preferences (saved values plus overrides)
    #[arg(long)]
    save_prefs: bool,
}

impl Args {
    fn apply(&self, mut prefs: ViewerPrefs) -> ViewerPrefs {
        if let Some(url) = &self.url {
            prefs.server.url.clone_from(url);
        }
        if let Some(method) = &self.method {
            prefs.server.method.clone_from(method);
        }
        if let Some(ms) = self.tween_ms {
            prefs.playback.tween_ms = ms;
        }
        if let Some(ms) = self.autoplay_ms {
            prefs.playback.autoplay_interval_ms = ms;
        }
        if let Some(width) = self.width {
            prefs.board.width = width;
        }
        if let Some(height) = self.height {
            prefs.board.height = height;
        }
        prefs.sanitized()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let config = match FsConfigStore::user() {
        Ok(store) => Some(PrefsService::new(store)),
        Err(err) => {
            warn!(%err, "config dir unavailable; using defaults");
            None
        }
    };
    let saved = config
        .as_ref()
        .and_then(ConfigPort::load_prefs)
        .unwrap_or_default();
    let prefs = args.apply(saved);
    if args.save_prefs {
        if let Some(config) = &config {
            config.save_prefs(&prefs);
            info!(dir = %config.store().dir().display(), "prefs saved");
        }
    }

    app::run(prefs, args.autoplay).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_saved_prefs() {
        let args = Args::parse_from([
            "droplet-viewer",
            "--url",
            "http://sim:1/rpc",
            "--tween-ms",
            "40",
            "--width",
            "16",
        ]);
        let prefs = args.apply(ViewerPrefs::default());
        assert_eq!(prefs.server.url, "http://sim:1/rpc");
        assert_eq!(prefs.server.method, "visualizer_droplet_info");
        assert_eq!(prefs.playback.tween_ms, 40);
        assert_eq!(prefs.board.width, 16);
        assert_eq!(prefs.board.height, 10);
    }

    #[test]
    fn absent_flags_keep_saved_values() {
        let mut saved = ViewerPrefs::default();
        saved.playback.autoplay_interval_ms = 900;
        let prefs = Args::default().apply(saved.clone());
        assert_eq!(prefs, saved);
    }

    #[test]
    fn zero_override_falls_back_to_default() {
        let args = Args::parse_from(["droplet-viewer", "--tween-ms", "0"]);
        assert_eq!(args.apply(ViewerPrefs::default()).playback.tween_ms, 200);
    }
}
