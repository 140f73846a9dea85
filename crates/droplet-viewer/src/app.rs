// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewer host: owns the engine, feeds it callbacks and draws the board.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use droplet_app_core::prefs::ViewerPrefs;
use droplet_playback::{Activity, FrameFetcher, PlaybackConfig, PlaybackEngine, PlaybackError};
use droplet_rpc_client::{spawn_fetch_worker, Delivery, RpcClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, trace};

use crate::input::{self, Command, InputError, HELP};
use crate::render::{self, Board};
use crate::tween::TweenDriver;

const RENDER_PERIOD: Duration = Duration::from_millis(16);
const RPC_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<F: FrameFetcher, W: Write> {
    engine: PlaybackEngine<TweenDriver, F>,
    board: Board,
    autoplay: bool,
    notice: Option<String>,
    dirty: bool,
    out: W,
}

impl<F: FrameFetcher, W: Write> App<F, W> {
    pub fn new(engine: PlaybackEngine<TweenDriver, F>, board: Board, autoplay: bool, out: W) -> Self {
        Self {
            engine,
            board,
            autoplay,
            notice: None,
            dirty: true,
            out,
        }
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn command(&mut self, cmd: Command) -> Flow {
        self.notice = None;
        self.dirty = true;
        match cmd {
            Command::Forward => self.engine.forward(),
            Command::Backward => self.engine.backward(),
            Command::Seek(frame) => self.engine.seek(frame),
            Command::ToggleAutoplay => {
                self.autoplay = !self.autoplay;
                info!(autoplay = self.autoplay, "autoplay toggled");
            }
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn reject(&mut self, err: &InputError) {
        self.notice = Some(err.to_string());
        self.dirty = true;
    }

    /// One autoplay step; stops autoplay at the end of a closed timeline.
    pub fn autoplay_tick(&mut self) {
        if !self.autoplay {
            return;
        }
        let state = self.engine.state();
        if state.max_frame.is_some_and(|max| state.selected_frame >= max) {
            self.autoplay = false;
            self.dirty = true;
            info!(frame = state.selected_frame, "end of timeline; autoplay stopped");
            return;
        }
        self.engine.forward();
        self.dirty = true;
    }

    pub fn deliver(&mut self, (index, result): Delivery) -> Result<(), PlaybackError> {
        trace!(index, ok = result.is_ok(), "frame delivered");
        self.dirty = true;
        self.engine.on_frame_fetched(result)
    }

    /// Finish due tweens and redraw when something changed.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if self.engine.driver_mut().advance(now) {
            self.engine.on_complete()?;
            self.dirty = true;
        }
        if self.dirty || self.engine.driver().is_animating() {
            self.draw(now).context("drawing board")?;
            self.dirty = false;
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        let state = self.engine.state();
        let slider = self.engine.slider();
        let activity = match self.engine.activity() {
            Activity::Idle => "idle".to_string(),
            Activity::Fetching { index } => format!("fetching {index}"),
            Activity::Animating { delta, .. } if delta < 0 => "rewinding".to_string(),
            Activity::Animating { .. } => "playing".to_string(),
        };
        let end = if state.closed { " [end]" } else { "" };
        format!(
            "frame {} -> {} | slider {}/{}{end} | {activity} | autoplay {}",
            state.display_frame,
            state.selected_frame,
            slider.value,
            slider.max,
            if self.autoplay { "on" } else { "off" },
        )
    }

    fn draw(&mut self, now: Instant) -> io::Result<()> {
        let mut screen = String::from("\x1b[2J\x1b[H");
        let sprites = self.engine.driver().sprites(now);
        render::draw(&self.board, &sprites, &self.status_line(), &mut screen);
        if let Some(notice) = &self.notice {
            screen.push_str(notice);
            screen.push('\n');
        }
        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    #[cfg(test)]
    fn engine_mut(&mut self) -> &mut PlaybackEngine<TweenDriver, F> {
        &mut self.engine
    }
}

/// Run the viewer against the configured simulator until `quit` or EOF.
pub async fn run(prefs: ViewerPrefs, autoplay: bool) -> Result<()> {
    let client = RpcClient::with_timeout(
        prefs.server.url.clone(),
        prefs.server.method.clone(),
        RPC_TIMEOUT,
    )
    .context("building JSON-RPC client")?;
    info!(url = %client.url(), method = %client.method(), "streaming frames");
    let (fetcher, mut deliveries) = spawn_fetch_worker(client);
    let config = PlaybackConfig {
        base_duration: prefs.playback.tween(),
    };
    let engine = PlaybackEngine::new(config, TweenDriver::new(), fetcher);
    let mut app = App::new(engine, Board::from(&prefs.board), autoplay, io::stdout());
    app.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut render_tick = time::interval(RENDER_PERIOD);
    render_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut autoplay_tick = time::interval(prefs.playback.autoplay_interval());
    autoplay_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            Some(delivery) = deliveries.recv() => app.deliver(delivery)?,
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else { break };
                match input::parse(&line) {
                    Ok(cmd) => {
                        if app.command(cmd) == Flow::Quit {
                            break;
                        }
                    }
                    Err(err) => app.reject(&err),
                }
            }
            _ = render_tick.tick() => app.tick(Instant::now())?,
            _ = autoplay_tick.tick() => app.autoplay_tick(),
        }
    }
    info!(autoplay = app.autoplay(), "viewer exiting");
    Ok(())
}
