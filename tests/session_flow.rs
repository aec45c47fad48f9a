//! End-to-end session behavior across backends and the touch panel.

use async_trait::async_trait;
use cable_tester::backend::build_backend_with_gpio;
use cable_tester::config::{BackendConfig, TouchConfig};
use cable_tester::{
    PanelLayout, PinoutCatalog, Presenter, ScreenAction, SessionError, TestSession, TouchPanel,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tester_core::{
    AcquisitionBackend, BackendMode, HealthStatus, PinId, PinMap, Pinout, RawPinStatus,
    TestResult,
};
use tester_driver_mock::{MockBackend, StatusDistribution};
use tester_driver_mux::{MuxBackend, MuxConfig, SimulatedGpio};
use tester_touch::{Point, RawTouch};
use tokio::sync::Notify;
use tokio_test::{assert_err, assert_ok};
use tracing_test::traced_test;

#[derive(Default)]
struct Recorder {
    screens: Mutex<Vec<String>>,
    results: Mutex<Vec<TestResult>>,
}

impl Presenter for Recorder {
    fn show_home(&self, _catalog: &PinoutCatalog) {
        self.screens.lock().push("home".to_string());
    }

    fn show_pinout(&self, pinout: &Pinout) {
        self.screens.lock().push(format!("pinout:{}", pinout.key()));
    }

    fn show_result(&self, result: &TestResult, status_line: &str) {
        self.screens.lock().push(format!("result:{status_line}"));
        self.results.lock().push(result.clone());
    }
}

fn session_with(backend: Arc<dyn AcquisitionBackend>) -> (Arc<TestSession>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let session = TestSession::new(
        PinoutCatalog::builtin(32).unwrap(),
        backend,
        recorder.clone(),
    );
    (Arc::new(session), recorder)
}

fn always_seen() -> Arc<dyn AcquisitionBackend> {
    Arc::new(
        MockBackend::builder()
            .distribution(StatusDistribution::new(1.0, 0.0).unwrap())
            .build(),
    )
}

/// Holds `run_test` until released.
struct GatedBackend {
    gate: Arc<Notify>,
}

#[async_trait]
impl AcquisitionBackend for GatedBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus::healthy(BackendMode::Mock, "gated")
    }

    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus> {
        self.gate.notified().await;
        PinMap::filled(pins, RawPinStatus::Seen)
    }
}

#[tokio::test]
async fn test_select_run_and_return_home() {
    let (session, recorder) = session_with(always_seen());

    assert_ok!(session.select_pinout("rj45"));
    let result = session.run_active_test().await.unwrap().unwrap();
    assert!(result.passed);
    assert_eq!(result.per_pin.len(), 8);
    assert_eq!(session.last_result(), Some(result));

    session.return_home();
    assert!(session.active_pinout().is_none());
    assert!(session.last_result().is_none());
    assert_eq!(
        *recorder.screens.lock(),
        vec!["pinout:rj45", "result:PASS", "home"]
    );
}

#[tokio::test]
async fn test_result_keys_match_pinout_for_every_backend() {
    let gpio_config = MuxConfig {
        settle: Duration::ZERO,
        ..MuxConfig::default()
    };
    let mux = MuxBackend::new(
        gpio_config.clone(),
        Arc::new(SimulatedGpio::new(&gpio_config).with_connected(0..16)),
    )
    .unwrap();

    let backends: Vec<Arc<dyn AcquisitionBackend>> = vec![
        Arc::new(MockBackend::builder().seed(3).build()),
        Arc::new(mux),
        build_backend_with_gpio(
            &BackendConfig {
                mode: "SERIAL".to_string(),
                ..BackendConfig::default()
            },
            Arc::new(tester_driver_mux::UnavailableGpio),
        )
        .unwrap(),
    ];

    for backend in backends {
        let (session, _) = session_with(backend);
        for pinout in PinoutCatalog::builtin(32).unwrap().iter() {
            session.select_pinout(pinout.key()).unwrap();
            let result = session.run_active_test().await.unwrap().unwrap();
            let keys: Vec<&PinId> = result.per_pin.keys().collect();
            let expected: Vec<&PinId> = pinout.pins().iter().collect();
            assert_eq!(keys, expected, "pinout {}", pinout.key());
        }
    }
}

#[tokio::test]
async fn test_concurrent_test_is_rejected() {
    let gate = Arc::new(Notify::new());
    let (session, _) = session_with(Arc::new(GatedBackend { gate: gate.clone() }));
    session.select_pinout("xlr3").unwrap();

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.run_active_test().await }
    });
    while !session.is_running() {
        tokio::task::yield_now().await;
    }

    assert_eq!(
        session.run_active_test().await,
        Err(SessionError::TestInProgress)
    );

    gate.notify_one();
    let result = first.await.unwrap().unwrap().unwrap();
    assert!(result.passed);
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_leaving_pinout_during_test_hides_result() {
    let gate = Arc::new(Notify::new());
    let (session, recorder) = session_with(Arc::new(GatedBackend { gate: gate.clone() }));
    session.select_pinout("xlr5").unwrap();

    let running = tokio::spawn({
        let session = session.clone();
        async move { session.run_active_test().await }
    });
    while !session.is_running() {
        tokio::task::yield_now().await;
    }
    session.return_home();
    gate.notify_one();

    let result = running.await.unwrap().unwrap();
    assert!(result.is_some());
    assert!(session.last_result().is_none());
    assert!(recorder.results.lock().is_empty());
}

#[tokio::test]
async fn test_reselecting_same_pinout_during_test_hides_stale_result() {
    let gate = Arc::new(Notify::new());
    let (session, recorder) = session_with(Arc::new(GatedBackend { gate: gate.clone() }));
    session.select_pinout("xlr5").unwrap();

    let running = tokio::spawn({
        let session = session.clone();
        async move { session.run_active_test().await }
    });
    while !session.is_running() {
        tokio::task::yield_now().await;
    }
    session.return_home();
    session.select_pinout("xlr5").unwrap();
    gate.notify_one();

    let result = running.await.unwrap().unwrap();
    assert!(result.is_some());
    assert!(session.last_result().is_none());
    assert!(recorder.results.lock().is_empty());
    assert_eq!(
        *recorder.screens.lock(),
        vec!["pinout:xlr5", "home", "pinout:xlr5"]
    );

    // A fresh run on the re-selected pinout is published as usual.
    gate.notify_one();
    let result = session.run_active_test().await.unwrap().unwrap();
    assert_eq!(session.last_result(), Some(result));
    assert_eq!(
        recorder.screens.lock().last().map(String::as_str),
        Some("result:PASS")
    );
}

#[tokio::test]
async fn test_dispatch_covers_every_action() {
    let (session, _) = session_with(always_seen());

    assert_err!(
        session
            .dispatch(ScreenAction::SelectPinout("db9".to_string()))
            .await
    );
    assert_eq!(session.dispatch(ScreenAction::StartTest).await, Ok(None));

    assert_ok!(
        session
            .dispatch(ScreenAction::SelectPinout("xlr3".to_string()))
            .await
    );
    let result = session.dispatch(ScreenAction::StartTest).await.unwrap();
    assert!(result.is_some_and(|r| r.passed));

    assert_eq!(session.dispatch(ScreenAction::Back).await, Ok(None));
    assert!(session.active_pinout().is_none());
}

#[tokio::test]
async fn test_touch_panel_drives_the_session() {
    let (session, recorder) = session_with(always_seen());
    let layout = PanelLayout::default();
    let mut panel = TouchPanel::new(session.clone(), layout, 80);

    // Tap the first home button (rj45).
    panel.handle(RawTouch::Begin(Point::new(400, 60)), 0);
    panel.handle(RawTouch::End, 40);
    assert_eq!(panel.poll(79).await, Ok(None));
    assert_eq!(panel.poll(80).await, Ok(None));
    assert_eq!(
        session.active_pinout().map(|p| p.key().to_string()),
        Some("rj45".to_string())
    );

    // Press start, slide off before the delay: nothing happens.
    panel.handle(RawTouch::Begin(Point::new(400, 420)), 100);
    panel.handle(RawTouch::Update(Point::new(400, 200)), 120);
    panel.handle(RawTouch::End, 130);
    assert_eq!(panel.poll(200).await, Ok(None));
    assert!(recorder.results.lock().is_empty());

    // Proper tap on start.
    panel.handle(RawTouch::Begin(Point::new(400, 420)), 300);
    panel.handle(RawTouch::End, 340);
    let result = panel.poll(380).await.unwrap().unwrap();
    assert!(result.passed);

    // Back to home.
    panel.handle(RawTouch::Begin(Point::new(50, 50)), 500);
    panel.handle(RawTouch::End, 520);
    assert_eq!(panel.poll(600).await, Ok(None));
    assert!(session.active_pinout().is_none());
    assert_eq!(recorder.screens.lock().last().map(String::as_str), Some("home"));
}

#[tokio::test]
async fn test_touch_panel_uses_configured_confirm_delay() {
    let (session, _) = session_with(always_seen());
    let config = TouchConfig {
        confirm_delay: Duration::from_millis(200),
    };
    let mut panel = TouchPanel::from_config(session.clone(), PanelLayout::default(), &config);

    panel.handle(RawTouch::Begin(Point::new(400, 60)), 0);
    panel.handle(RawTouch::End, 40);

    // The default delay would have fired here.
    assert_eq!(panel.poll(80).await, Ok(None));
    assert!(session.active_pinout().is_none());
    assert_eq!(panel.poll(199).await, Ok(None));
    assert!(session.active_pinout().is_none());

    assert_eq!(panel.poll(200).await, Ok(None));
    assert_eq!(
        session.active_pinout().map(|p| p.key().to_string()),
        Some("rj45".to_string())
    );
}

#[tokio::test]
async fn test_health_forwards_backend_status() {
    let (session, _) = session_with(always_seen());
    let health = session.health().await;
    assert!(health.ok);
    assert_eq!(health.backend_mode, BackendMode::Mock);
}

#[test]
#[traced_test]
fn test_unknown_mode_is_logged() {
    let config = BackendConfig {
        mode: "SERIAL".to_string(),
        ..BackendConfig::default()
    };
    let backend =
        build_backend_with_gpio(&config, Arc::new(tester_driver_mux::UnavailableGpio)).unwrap();
    assert_eq!(backend.mode(), BackendMode::Unknown);
    assert!(logs_contain("Unrecognized backend mode"));
}
