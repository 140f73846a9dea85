// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tool-facing fetch adapter: a background task plus channels.
//!
//! The engine is synchronous; [`ChannelFetcher`] queues its requests to a
//! tokio task that awaits a [`FrameSource`] and posts each [`Delivery`] back.
//! The host drains deliveries and feeds them to `on_frame_fetched`.

use std::future::Future;

use droplet_model::Frame;
use droplet_playback::{FetchError, FrameFetcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::RpcClient;

/// Fetch result tagged with the requested index.
pub type Delivery = (usize, Result<Frame, FetchError>);

/// Anything that can produce frame `index` asynchronously.
pub trait FrameSource: Send + Sync + 'static {
    /// Produce frame `index`.
    fn fetch(&self, index: usize) -> impl Future<Output = Result<Frame, FetchError>> + Send;
}

impl FrameSource for RpcClient {
    async fn fetch(&self, index: usize) -> Result<Frame, FetchError> {
        self.fetch_frame(index).await.map_err(FetchError::from)
    }
}

/// [`FrameFetcher`] that forwards requests to the worker spawned by
/// [`spawn_fetch_worker`].
#[derive(Debug, Clone)]
pub struct ChannelFetcher {
    requests: mpsc::UnboundedSender<usize>,
    deliveries: mpsc::UnboundedSender<Delivery>,
}

impl FrameFetcher for ChannelFetcher {
    fn request_frame(&mut self, index: usize) {
        if self.requests.send(index).is_err() {
            // Worker is gone; answer locally so the engine closes instead of waiting.
            warn!(index, "fetch worker stopped; closing timeline");
            if self.deliveries.send((index, Err(FetchError::Closed))).is_err() {
                warn!(index, "delivery channel closed; engine left waiting on fetch");
            }
        }
    }
}

/// Spawn the fetch worker on the current tokio runtime.
///
/// Requests are served strictly in order. The returned receiver yields one
/// [`Delivery`] per request.
pub fn spawn_fetch_worker<S: FrameSource>(
    source: S,
) -> (ChannelFetcher, mpsc::UnboundedReceiver<Delivery>) {
    let (req_tx, mut req_rx) = mpsc::unbounded_channel::<usize>();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let worker_tx = out_tx.clone();

    tokio::spawn(async move {
        while let Some(index) = req_rx.recv().await {
            let result = source.fetch(index).await;
            if let Err(err) = &result {
                debug!(index, %err, "frame fetch failed");
            }
            if worker_tx.send((index, result)).is_err() {
                break;
            }
        }
        debug!("fetch worker stopped");
    });

    (
        ChannelFetcher {
            requests: req_tx,
            deliveries: out_tx,
        },
        out_rx,
    )
}
