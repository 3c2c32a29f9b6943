use std::sync::Arc;

use anyhow::Context;
use sattrack::prelude::*;

/// Headless tracker: polls the position endpoint and logs what a map would show.
///
/// Usage: `sattrack-app [config.json] [theme]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            TrackerConfig::from_json(&json).with_context(|| format!("invalid config {}", path))?
        }
        None => TrackerConfig::default(),
    };

    let source = Arc::new(HttpPositionSource::new(config.source.clone()));
    let (handle, join) =
        TrackerController::spawn(&config, source, Box::new(ConsoleRenderer::default()))
            .context("invalid tracker config")?;

    if let Some(theme) = args.next() {
        handle.select_theme(theme);
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    handle.shutdown();

    let engine = join.await.context("tracker task panicked")?;
    let camera = engine.camera();
    log::info!(
        "final camera ({:.4}, {:.4}) zoom {}",
        camera.latitude,
        camera.longitude,
        camera.zoom
    );
    Ok(())
}

/// Logs the dashboard whenever a new fix is shown
#[derive(Default)]
struct ConsoleRenderer {
    last_timestamp: Option<i64>,
    loading_logged: bool,
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        match frame {
            RenderFrame::Loading => {
                if !self.loading_logged {
                    log::info!("Loading...");
                    self.loading_logged = true;
                }
            }
            RenderFrame::Main(view) => {
                if self.last_timestamp == Some(view.position.timestamp_seconds) {
                    return;
                }
                self.last_timestamp = Some(view.position.timestamp_seconds);

                let rows: Vec<String> = view
                    .dashboard
                    .rows()
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, value))
                    .collect();
                log::info!(
                    "{} | zoom {} | style {}",
                    rows.join(" | "),
                    view.camera.zoom,
                    view.style
                );
            }
        }
    }
}
