//! Raw touch → pointer intent state machine.
//!
//! ```text
//!            Begin/Update over control
//!   Idle ───────────────────────────────► Tracking(target, last)
//!    ▲  ◄─────────────────────────────────   │  Update: Move(target, p)
//!    │              End: Release             │
//!    └─ Begin/Update over nothing: consumed ─┘
//! ```
//!
//! The target picked on press is sticky: moving off the control keeps
//! reporting moves against it. Every raw event is consumed; nothing is
//! forwarded to the windowing system.

use crate::geometry::Point;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTouch {
    Begin(Point),
    Update(Point),
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchIntent<T> {
    pub phase: PointerPhase,
    pub position: Point,
    pub target: T,
}

/// Finds the control under a point.
pub trait HitTest {
    type Target: Clone;

    fn control_at(&self, point: Point) -> Option<Self::Target>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum State<T> {
    Idle,
    Tracking { target: T, last: Point },
}

#[derive(Clone, Debug)]
pub struct TouchNormalizer<T> {
    state: State<T>,
}

impl<T> Default for TouchNormalizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TouchNormalizer<T> {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, State::Tracking { .. })
    }

    /// Target of the touch in progress, if any.
    pub fn target(&self) -> Option<&T> {
        match &self.state {
            State::Tracking { target, .. } => Some(target),
            State::Idle => None,
        }
    }

    /// Drop any touch in progress without emitting a release.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

impl<T: Clone> TouchNormalizer<T> {
    pub fn handle<H>(&mut self, event: RawTouch, hit: &H) -> Option<TouchIntent<T>>
    where
        H: HitTest<Target = T> + ?Sized,
    {
        let p = match event {
            RawTouch::Begin(p) | RawTouch::Update(p) => p,
            RawTouch::End => {
                return match std::mem::replace(&mut self.state, State::Idle) {
                    State::Tracking { target, last } => Some(TouchIntent {
                        phase: PointerPhase::Release,
                        position: last,
                        target,
                    }),
                    State::Idle => None,
                };
            }
        };

        if let State::Tracking { target, last } = &mut self.state {
            *last = p;
            return Some(TouchIntent {
                phase: PointerPhase::Move,
                position: p,
                target: target.clone(),
            });
        }

        let Some(target) = hit.control_at(p) else {
            trace!(x = p.x, y = p.y, "Touch outside any control");
            return None;
        };
        self.state = State::Tracking {
            target: target.clone(),
            last: p,
        };
        Some(TouchIntent {
            phase: PointerPhase::Press,
            position: p,
            target,
        })
    }
}
