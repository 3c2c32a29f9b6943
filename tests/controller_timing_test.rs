/// Timing tests for the tracker event loop.
/// All of them run on tokio's paused clock, so a three second poll interval
/// costs no wall time.
#[cfg(test)]
mod controller_timing_tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use sattrack::prelude::*;
    use tokio::time::sleep;

    /// One scripted response of the fake source
    enum Step {
        Fix(Position),
        Fail,
        Slow(Duration, Position),
    }

    /// Replays a script; repeats the last fix once the script runs out
    struct ScriptedSource {
        steps: Mutex<VecDeque<Step>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PositionSource for ScriptedSource {
        async fn fetch_latest(&self) -> sattrack::Result<Position> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = {
                let mut steps = self.steps.lock().expect("script lock");
                if steps.len() > 1 {
                    steps.pop_front()
                } else {
                    steps.front().map(|step| match step {
                        Step::Fix(p) => Step::Fix(*p),
                        Step::Fail => Step::Fail,
                        Step::Slow(d, p) => Step::Slow(*d, *p),
                    })
                }
            };

            match step {
                Some(Step::Fix(position)) => Ok(position),
                Some(Step::Slow(delay, position)) => {
                    sleep(delay).await;
                    Ok(position)
                }
                Some(Step::Fail) | None => Err(TrackerError::HttpStatus(503)),
            }
        }
    }

    fn fix(lat: f64, lng: f64, timestamp: i64) -> Position {
        Position::new(lat, lng, timestamp, 7.66, 408.0)
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn last_main(recorder: &RecordingRenderer) -> MainView {
        recorder
            .last()
            .and_then(|frame| frame.main_view().cloned())
            .expect("tracker should be showing the map")
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_poll_after_one_interval() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Fix(fix(51.5, -0.12, 1))]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(100)).await;
        assert_eq!(source.calls(), 0);
        assert_eq!(recorder.frames(), vec![RenderFrame::Loading]);

        sleep(ms(3_000)).await;
        assert_eq!(source.calls(), 1);

        sleep(ms(6_000)).await;
        assert_eq!(source.calls(), 3);

        handle.shutdown();
        join.await.expect("tracker task");
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_until_minimum_time() {
        init_logging();
        let config = TrackerConfig {
            polling: PollingConfig {
                poll_interval_ms: 500,
                minimum_loading_ms: 2_000,
            },
            ..TrackerConfig::default()
        };
        let source = ScriptedSource::new(vec![Step::Fix(fix(51.5, -0.12, 1))]);
        let recorder = RecordingRenderer::new();
        let (handle, join) =
            TrackerController::spawn(&config, source.clone(), Box::new(recorder.clone()))
                .expect("config should be valid");

        // fixes have arrived but the loading screen stays up
        sleep(ms(1_100)).await;
        assert!(source.calls() >= 2);
        assert!(recorder.frames().iter().all(RenderFrame::is_loading));

        sleep(ms(1_000)).await;
        assert!(!recorder.last().expect("frame").is_loading());

        handle.shutdown();
        let engine = join.await.expect("tracker task");
        assert_eq!(engine.phase(), AppPhase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_fixes_never_leave_loading() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Fix(fix(0.0, 0.0, 0))]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(10_000)).await;
        assert_eq!(source.calls(), 3);
        assert!(recorder.frames().iter().all(RenderFrame::is_loading));

        handle.shutdown();
        let engine = join.await.expect("tracker task");
        assert!(!engine.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_changes_nothing() {
        init_logging();
        let source = ScriptedSource::new(vec![
            Step::Fix(fix(51.5, -0.12, 1)),
            Step::Fail,
            Step::Fix(fix(52.0, 0.5, 7)),
        ]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(3_100)).await;
        let frames_before = recorder.len();
        let before = last_main(&recorder);

        // tick N fails
        sleep(ms(3_000)).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(recorder.len(), frames_before);
        assert_eq!(last_main(&recorder), before);

        // the next tick recovers on its own
        sleep(ms(3_000)).await;
        let after = last_main(&recorder);
        assert_eq!(after.camera.center(), LatLng::new(52.0, 0.5));

        handle.shutdown();
        join.await.expect("tracker task");
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_zoom_survives_next_tick() {
        init_logging();
        let source = ScriptedSource::new(vec![
            Step::Fix(fix(51.5, -0.12, 1)),
            Step::Fix(fix(51.9, 0.4, 4)),
        ]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(3_100)).await;
        let camera = last_main(&recorder).camera;
        assert!(handle.user_camera(camera.with_zoom(9.0)));
        sleep(ms(10)).await;
        assert_eq!(last_main(&recorder).camera.zoom, 9.0);

        sleep(ms(3_000)).await;
        let view = last_main(&recorder);
        assert_eq!(view.camera.center(), LatLng::new(51.9, 0.4));
        assert_eq!(view.camera.zoom, 9.0);

        handle.shutdown();
        let engine = join.await.expect("tracker task");
        assert_eq!(engine.persisted_zoom(), 9.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_handled_while_fetch_is_suspended() {
        init_logging();
        let source = ScriptedSource::new(vec![
            Step::Fix(fix(51.5, -0.12, 1)),
            Step::Slow(ms(1_000), fix(52.5, 1.5, 4)),
        ]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(3_100)).await;

        // second fetch starts at 6s and resolves at 7s
        sleep(ms(3_200)).await;
        assert_eq!(source.calls(), 2);
        let panned = last_main(&recorder)
            .camera
            .with_center(LatLng::new(-33.9, 151.2))
            .with_zoom(7.0);
        assert!(handle.user_camera(panned));
        assert!(handle.select_theme("dark"));
        sleep(ms(10)).await;

        let view = last_main(&recorder);
        assert_eq!(view.camera, panned);
        assert_eq!(view.style.as_str(), "mapbox://styles/mapbox/dark-v9");

        sleep(ms(1_000)).await;
        let view = last_main(&recorder);
        assert_eq!(view.camera.center(), LatLng::new(52.5, 1.5));
        assert_eq!(view.camera.zoom, 7.0);
        assert_eq!(view.style.as_str(), "mapbox://styles/mapbox/dark-v9");

        handle.shutdown();
        join.await.expect("tracker task");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_skipped_while_fetch_in_flight() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Slow(ms(4_000), fix(51.5, -0.12, 1))]);
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(RecordingRenderer::new()),
        )
        .expect("config should be valid");

        // fetches start at 3s and 9s; the 6s tick lands while the first one is pending
        sleep(ms(9_100)).await;
        assert_eq!(source.calls(), 2);

        handle.shutdown();
        join.await.expect("tracker task");
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_drops_in_flight_fetch() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Slow(ms(10_000), fix(51.5, -0.12, 1))]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(3_500)).await;
        assert_eq!(source.calls(), 1);

        handle.shutdown();
        handle.shutdown();
        let engine = join.await.expect("tracker task");

        sleep(ms(20_000)).await;
        assert!(engine.view().last_position().is_none());
        assert!(recorder.frames().iter().all(RenderFrame::is_loading));
        assert_eq!(source.calls(), 1);
        assert!(handle.is_shut_down());
        assert!(!handle.select_theme("dark"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_tracker() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Fix(fix(51.5, -0.12, 1))]);
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(RecordingRenderer::new()),
        )
        .expect("config should be valid");

        drop(handle);
        join.await.expect("tracker task");

        sleep(ms(10_000)).await;
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_recenters_on_last_fix() {
        init_logging();
        let source = ScriptedSource::new(vec![Step::Fix(fix(51.5, -0.12, 1))]);
        let recorder = RecordingRenderer::new();
        let (handle, join) = TrackerController::spawn(
            &TrackerConfig::default(),
            source.clone(),
            Box::new(recorder.clone()),
        )
        .expect("config should be valid");

        sleep(ms(3_100)).await;
        let camera = last_main(&recorder).camera;
        handle.user_camera(camera.with_center(LatLng::new(10.0, 10.0)).with_zoom(3.0));
        handle.resize(1280.0, 720.0);
        sleep(ms(10)).await;

        let camera = last_main(&recorder).camera;
        assert_eq!(camera.center(), LatLng::new(51.5, -0.12));
        assert_eq!(camera.zoom, 3.0);
        assert_eq!(camera.width, Dimension::Pixels(1280.0));
        assert_eq!(camera.height, Dimension::Pixels(720.0));

        handle.shutdown();
        join.await.expect("tracker task");
    }

    #[tokio::test]
    async fn test_zero_poll_interval_is_rejected() {
        init_logging();
        let config = TrackerConfig {
            polling: PollingConfig {
                poll_interval_ms: 0,
                minimum_loading_ms: 0,
            },
            ..TrackerConfig::default()
        };
        let source = ScriptedSource::new(vec![Step::Fix(fix(51.5, -0.12, 1))]);

        let result =
            TrackerController::spawn(&config, source.clone(), Box::new(RecordingRenderer::new()));
        assert!(matches!(result, Err(TrackerError::Config(_))));

        let custom = TrackerProfile::Custom(config).resolve();
        let result =
            TrackerController::new(&custom, source.clone(), Box::new(RecordingRenderer::new()));
        assert!(matches!(result, Err(TrackerError::Config(_))));
        assert_eq!(source.calls(), 0);
    }
}
