//! Event loop that drives the reconciliation engine
//!
//! One task owns the engine. It multiplexes four sources with `select!`:
//! teardown, user events from the renderer, completion of the in-flight
//! fetch, and two timers (the poll interval and the minimum loading time).
//! Each event runs to completion before the next one is taken, so camera and
//! persisted zoom updates never interleave.
//!
//! At most one fetch is in flight. A poll tick that fires while a fetch is
//! still pending is skipped. On teardown the loop exits and drops the pending
//! fetch, so its result is never applied. The timers and the event receiver
//! are owned by the loop and go away with it.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::core::config::{PollingConfig, TrackerConfig};
use crate::core::position::Position;
use crate::core::viewport::CameraState;
use crate::tracking::reconcile::{ReconciliationEngine, TickOutcome};
use crate::tracking::source::PositionSource;
use crate::ui::render::Renderer;
use crate::Result;

/// Events the renderer reports back to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Camera after a drag, scroll or pinch
    UserCamera(CameraState),
    Resize { width: f64, height: f64 },
    /// Free-form theme name, usually a button label
    SelectTheme(String),
}

/// Caller side of a running tracker.
///
/// Dropping the handle tears the tracker down.
#[derive(Debug)]
pub struct TrackerHandle {
    events: mpsc::UnboundedSender<ViewEvent>,
    shutdown: CancellationToken,
}

impl TrackerHandle {
    /// Queues an event. Returns false once the tracker has stopped.
    pub fn send(&self, event: ViewEvent) -> bool {
        !self.shutdown.is_cancelled() && self.events.send(event).is_ok()
    }

    pub fn user_camera(&self, camera: CameraState) -> bool {
        self.send(ViewEvent::UserCamera(camera))
    }

    pub fn resize(&self, width: f64, height: f64) -> bool {
        self.send(ViewEvent::Resize { width, height })
    }

    pub fn select_theme(&self, name: impl Into<String>) -> bool {
        self.send(ViewEvent::SelectTheme(name.into()))
    }

    /// Stops the tracker. Calling it again does nothing.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            log::debug!("tracker teardown requested");
            self.shutdown.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

type PendingFetch = BoxFuture<'static, Result<Position>>;

pub struct TrackerController {
    engine: ReconciliationEngine,
    source: Arc<dyn PositionSource>,
    renderer: Box<dyn Renderer>,
    polling: PollingConfig,
    events: mpsc::UnboundedReceiver<ViewEvent>,
    shutdown: CancellationToken,
}

impl TrackerController {
    pub fn new(
        config: &TrackerConfig,
        source: Arc<dyn PositionSource>,
        renderer: Box<dyn Renderer>,
    ) -> Result<(Self, TrackerHandle)> {
        Self::with_engine(ReconciliationEngine::new(config), config, source, renderer)
    }

    /// Builds a controller around an existing engine, e.g. one with a custom
    /// style catalog. Fails if `config` does not validate.
    pub fn with_engine(
        engine: ReconciliationEngine,
        config: &TrackerConfig,
        source: Arc<dyn PositionSource>,
        renderer: Box<dyn Renderer>,
    ) -> Result<(Self, TrackerHandle)> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let controller = Self {
            engine,
            source,
            renderer,
            polling: config.polling.clone(),
            events: rx,
            shutdown: shutdown.clone(),
        };
        let handle = TrackerHandle {
            events: tx,
            shutdown,
        };
        Ok((controller, handle))
    }

    /// Spawns the loop on the current tokio runtime. The join handle yields
    /// the final engine state after teardown.
    pub fn spawn(
        config: &TrackerConfig,
        source: Arc<dyn PositionSource>,
        renderer: Box<dyn Renderer>,
    ) -> Result<(TrackerHandle, JoinHandle<ReconciliationEngine>)> {
        let (controller, handle) = Self::new(config, source, renderer)?;
        Ok((handle, tokio::spawn(controller.run())))
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    /// Runs until teardown and returns the final engine state.
    pub async fn run(mut self) -> ReconciliationEngine {
        let period = self.polling.poll_interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let minimum_loading = time::sleep(self.polling.minimum_loading());
        tokio::pin!(minimum_loading);
        let mut minimum_elapsed = false;

        let mut in_flight: FuturesUnordered<PendingFetch> = FuturesUnordered::new();

        log::info!(
            "tracker started (poll every {:?}, loading at least {:?})",
            period,
            self.polling.minimum_loading()
        );
        self.emit();

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    break;
                }

                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },

                Some(result) = in_flight.next(), if !in_flight.is_empty() => {
                    if self.engine.on_fetch_result(result) == TickOutcome::Applied {
                        self.emit();
                    }
                }

                () = &mut minimum_loading, if !minimum_elapsed => {
                    minimum_elapsed = true;
                    if self.engine.on_minimum_time_elapsed() {
                        self.emit();
                    }
                }

                _ = ticker.tick() => {
                    if in_flight.is_empty() {
                        let source = Arc::clone(&self.source);
                        in_flight.push(async move { source.fetch_latest().await }.boxed());
                    } else {
                        log::debug!("previous fetch still in flight, skipping tick");
                    }
                }
            }
        }

        if !in_flight.is_empty() {
            log::debug!("dropping in-flight fetch on teardown");
        }
        log::info!("tracker stopped");
        self.engine
    }

    fn handle_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::UserCamera(camera) => self.engine.on_user_interaction(camera),
            ViewEvent::Resize { width, height } => self.engine.on_resize(width, height),
            ViewEvent::SelectTheme(name) => {
                self.engine.on_theme_selected(&name);
            }
        }
        self.emit();
    }

    fn emit(&mut self) {
        let frame = self.engine.frame();
        self.renderer.render(&frame);
    }
}
