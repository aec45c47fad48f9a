//! Touch panel screens.
//!
//! Two screens: home (one button per pinout) and test (start and back).
//! [`TouchPanel`] routes raw touches through the touch pipeline and hands
//! confirmed activations to the [`TestSession`].

use crate::catalog::PinoutCatalog;
use crate::config::TouchConfig;
use crate::error::SessionError;
use crate::session::TestSession;
use std::sync::Arc;
use tester_core::TestResult;
use tester_touch::{ControlLayer, RawTouch, Rect, TouchIntent, TouchRouter};
use tracing::debug;

/// What a control does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Open the test screen for the pinout with this key
    SelectPinout(String),
    /// Run a continuity test on the active pinout
    StartTest,
    /// Return to the home screen
    Back,
}

/// Panel resolution and button layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Panel width in pixels
    pub width: u32,
    /// Panel height in pixels
    pub height: u32,
    /// Space between the panel edge and any button
    pub margin: u32,
    /// Height of every button
    pub button_height: u32,
    /// Vertical space between stacked buttons
    pub gap: u32,
}

impl Default for PanelLayout {
    /// 800x480, the official 7" Raspberry Pi display.
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            margin: 20,
            button_height: 80,
            gap: 16,
        }
    }
}

impl PanelLayout {
    /// Full-width button in row `row`, counted from the top.
    fn row(&self, row: u32) -> Rect {
        let y = self.margin + row * (self.button_height + self.gap);
        Rect::new(
            to_coord(self.margin),
            to_coord(y),
            self.width.saturating_sub(2 * self.margin),
            self.button_height,
        )
    }

    /// Home screen: pinout buttons, top to bottom in catalog order.
    pub fn home(&self, catalog: &PinoutCatalog) -> ControlLayer<ScreenAction> {
        catalog
            .iter()
            .zip(0u32..)
            .fold(ControlLayer::new(), |layer, (pinout, row)| {
                layer.with(
                    ScreenAction::SelectPinout(pinout.key().to_string()),
                    self.row(row),
                )
            })
    }

    /// Test screen: start across the bottom, back in the top-left corner.
    pub fn test(&self) -> ControlLayer<ScreenAction> {
        let bottom = self
            .height
            .saturating_sub(self.margin + self.button_height);
        let start = Rect::new(
            to_coord(self.margin),
            to_coord(bottom),
            self.width.saturating_sub(2 * self.margin),
            self.button_height,
        );
        let back = Rect::new(
            to_coord(self.margin),
            to_coord(self.margin),
            self.width / 4,
            self.button_height,
        );
        ControlLayer::new()
            .with(ScreenAction::StartTest, start)
            .with(ScreenAction::Back, back)
    }
}

fn to_coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Touch input bound to a session.
pub struct TouchPanel {
    session: Arc<TestSession>,
    layout: PanelLayout,
    router: TouchRouter<ScreenAction>,
}

impl TouchPanel {
    /// Start on the home screen.
    pub fn new(session: Arc<TestSession>, layout: PanelLayout, confirm_delay_ms: u64) -> Self {
        let router = TouchRouter::new(layout.home(session.catalog()), confirm_delay_ms);
        Self {
            session,
            layout,
            router,
        }
    }

    /// Start on the home screen with the confirm delay from `config`.
    pub fn from_config(
        session: Arc<TestSession>,
        layout: PanelLayout,
        config: &TouchConfig,
    ) -> Self {
        let delay_ms = u64::try_from(config.confirm_delay.as_millis()).unwrap_or(u64::MAX);
        Self::new(session, layout, delay_ms)
    }

    /// Feed one raw touch event at `now_ms`.
    pub fn handle(&mut self, event: RawTouch, now_ms: u64) -> Option<TouchIntent<ScreenAction>> {
        self.router.handle(event, now_ms)
    }

    /// Run the action of a confirmed press, if one is due, and switch
    /// screens accordingly.
    pub async fn poll(&mut self, now_ms: u64) -> Result<Option<TestResult>, SessionError> {
        let Some(action) = self.router.poll(now_ms) else {
            return Ok(None);
        };
        debug!(?action, "Control activated");

        let outcome = self.session.dispatch(action.clone()).await?;
        match action {
            ScreenAction::SelectPinout(_) => self.router.set_layer(self.layout.test()),
            ScreenAction::Back => self
                .router
                .set_layer(self.layout.home(self.session.catalog())),
            ScreenAction::StartTest => {}
        }
        Ok(outcome)
    }

    /// Session this panel drives.
    pub fn session(&self) -> &Arc<TestSession> {
        &self.session
    }
}
