//! Test session controller.
//!
//! Holds which pinout is active, runs continuity tests against the
//! configured backend and pushes every state change to a [`Presenter`].
//!
//! ```text
//!   Home ──select_pinout(key)──► Pinout(idle) ──run_active_test──► Pinout(result)
//!    ▲                                │  ▲                              │
//!    └────────── return_home ─────────┘  └──────── run_active_test ─────┘
//! ```
//!
//! Only one test runs at a time. A second `run_active_test` while one is in
//! flight fails with [`SessionError::TestInProgress`].

use crate::catalog::PinoutCatalog;
use crate::error::SessionError;
use crate::screen::ScreenAction;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tester_core::{aggregate, AcquisitionBackend, HealthStatus, Pinout, TestResult};
use tracing::{debug, info, instrument};

/// Display side of the tester.
///
/// Called while session state is locked; implementations must not call
/// back into the [`TestSession`].
pub trait Presenter: Send + Sync {
    /// Pinout selection screen.
    fn show_home(&self, catalog: &PinoutCatalog);

    /// Test screen for `pinout` with every pin in the idle state.
    fn show_pinout(&self, pinout: &Pinout);

    /// Per-pin verdicts plus the "PASS" / "FAIL" banner.
    fn show_result(&self, result: &TestResult, status_line: &str);
}

/// Screen state and test execution for one tester.
///
/// Shared behind an `Arc` between the touch panel and the CLI.
pub struct TestSession {
    catalog: PinoutCatalog,
    backend: Arc<dyn AcquisitionBackend>,
    presenter: Arc<dyn Presenter>,
    active: RwLock<Option<Pinout>>,
    /// Bumped on every select and every return home, under the `active`
    /// write lock.
    selection: AtomicU64,
    last_result: RwLock<Option<TestResult>>,
    running: AtomicBool,
}

/// Clears the running flag when a test finishes, fails or is cancelled.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SessionError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| RunGuard(flag))
            .map_err(|_| SessionError::TestInProgress)
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TestSession {
    /// Session on the home screen with no active pinout.
    pub fn new(
        catalog: PinoutCatalog,
        backend: Arc<dyn AcquisitionBackend>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            catalog,
            backend,
            presenter,
            active: RwLock::new(None),
            selection: AtomicU64::new(0),
            last_result: RwLock::new(None),
            running: AtomicBool::new(false),
        }
    }

    /// Pinouts offered on the home screen.
    pub fn catalog(&self) -> &PinoutCatalog {
        &self.catalog
    }

    /// Backend every test runs against.
    pub fn backend(&self) -> &Arc<dyn AcquisitionBackend> {
        &self.backend
    }

    /// Pinout on screen, `None` on the home screen.
    pub fn active_pinout(&self) -> Option<Pinout> {
        self.active.read().clone()
    }

    /// Result shown for the active pinout, if a test has completed since
    /// it was selected.
    pub fn last_result(&self) -> Option<TestResult> {
        self.last_result.read().clone()
    }

    /// Whether a test is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Make `key` the active pinout and show it with idle pins.
    pub fn select_pinout(&self, key: &str) -> Result<(), SessionError> {
        let pinout = self
            .catalog
            .get(key)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPinout(key.to_string()))?;

        debug!(pinout = key, pins = pinout.pin_count(), "Pinout selected");
        let mut active = self.active.write();
        self.selection.fetch_add(1, Ordering::AcqRel);
        *self.last_result.write() = None;
        self.presenter.show_pinout(&pinout);
        *active = Some(pinout);
        Ok(())
    }

    /// Clear the active pinout and its last result, then show home.
    pub fn return_home(&self) {
        {
            let mut active = self.active.write();
            self.selection.fetch_add(1, Ordering::AcqRel);
            *self.last_result.write() = None;
            *active = None;
        }
        self.presenter.show_home(&self.catalog);
    }

    /// Test the active pinout.
    ///
    /// Returns `Ok(None)` without touching the backend when no pinout is
    /// active. If the operator leaves the pinout while the test runs, the
    /// result is returned but not published, even when the same pinout has
    /// been selected again in the meantime.
    #[instrument(skip(self), fields(mode = %self.backend.mode()))]
    pub async fn run_active_test(&self) -> Result<Option<TestResult>, SessionError> {
        let (pinout, selection) = {
            let active = self.active.read();
            let Some(pinout) = active.clone() else {
                debug!("No active pinout; nothing to test");
                return Ok(None);
            };
            (pinout, self.selection.load(Ordering::Acquire))
        };
        let _guard = RunGuard::acquire(&self.running)?;

        let raw = self.backend.run_test(pinout.pins()).await;
        let result = aggregate(&raw);
        info!(
            pinout = pinout.key(),
            passed = result.passed,
            ok = result.ok_count(),
            bad = result.bad_count(),
            "Continuity test complete"
        );

        // Held while publishing so a concurrent select or return home
        // cannot slip in between the check and the presenter call.
        let active = self.active.read();
        if active.is_some() && self.selection.load(Ordering::Acquire) == selection {
            self.presenter.show_result(&result, result.status_line());
            *self.last_result.write() = Some(result.clone());
        } else {
            debug!(pinout = pinout.key(), "Pinout left during test; result not shown");
        }
        drop(active);

        Ok(Some(result))
    }

    /// Probe the backend.
    pub async fn health(&self) -> HealthStatus {
        self.backend.health().await
    }

    /// Perform a screen action.
    ///
    /// Only [`ScreenAction::StartTest`] yields a result.
    pub async fn dispatch(&self, action: ScreenAction) -> Result<Option<TestResult>, SessionError> {
        match action {
            ScreenAction::SelectPinout(key) => self.select_pinout(&key).map(|()| None),
            ScreenAction::StartTest => self.run_active_test().await,
            ScreenAction::Back => {
                self.return_home();
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for TestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("mode", &self.backend.mode())
            .field("active", &self.active.read().as_ref().map(Pinout::key))
            .field("running", &self.is_running())
            .finish()
    }
}
