//! Delayed press confirmation.
//!
//! A press only activates its control if the finger is still on it when the
//! confirmation delay elapses. Drags that slide off a button are dropped,
//! as are presses whose finger was lifted outside the bounds.

use crate::geometry::{Point, Rect};
use tracing::trace;

pub const DEFAULT_CONFIRM_DELAY_MS: u64 = 80;

#[derive(Clone, Debug)]
struct Pending<T> {
    target: T,
    bounds: Rect,
    deadline_ms: u64,
    pointer: Point,
}

#[derive(Clone, Debug)]
pub struct PressConfirmer<T> {
    delay_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T> Default for PressConfirmer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_DELAY_MS)
    }
}

impl<T> PressConfirmer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule activation of `target` at `now_ms + delay`. Replaces any
    /// press still pending.
    pub fn press(&mut self, target: T, bounds: Rect, at: Point, now_ms: u64) {
        self.pending = Some(Pending {
            target,
            bounds,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
            pointer: at,
        });
    }

    /// Latest pointer position for the pending press.
    pub fn track(&mut self, pointer: Point) {
        if let Some(pending) = self.pending.as_mut() {
            pending.pointer = pointer;
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fire the pending press once its deadline has passed.
    ///
    /// Returns the target if the pointer is inside the control's bounds at
    /// that point. Either way the press is consumed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.as_ref()?.deadline_ms > now_ms {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.bounds.contains(pending.pointer) {
            Some(pending.target)
        } else {
            trace!(
                x = pending.pointer.x,
                y = pending.pointer.y,
                "Press dropped: pointer left the control"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Rect = Rect::new(0, 0, 10, 10);

    #[test]
    fn fires_at_deadline_when_pointer_stays() {
        let mut c = PressConfirmer::new(80);
        c.press("A", BUTTON, Point::new(5, 5), 1_000);

        assert_eq!(c.poll(1_079), None);
        assert!(c.is_pending());
        assert_eq!(c.poll(1_080), Some("A"));
        assert_eq!(c.poll(1_200), None);
    }

    #[test]
    fn dropped_when_pointer_moves_out() {
        let mut c = PressConfirmer::new(80);
        c.press("A", BUTTON, Point::new(5, 5), 0);
        c.track(Point::new(50, 5));

        assert_eq!(c.poll(100), None);
        assert!(!c.is_pending());
    }

    #[test]
    fn moving_back_inside_before_deadline_counts() {
        let mut c = PressConfirmer::new(80);
        c.press("A", BUTTON, Point::new(5, 5), 0);
        c.track(Point::new(50, 5));
        c.track(Point::new(8, 8));
        assert_eq!(c.poll(80), Some("A"));
    }

    #[test]
    fn cancel_discards_pending_press() {
        let mut c = PressConfirmer::<&str>::default();
        assert_eq!(c.delay_ms(), DEFAULT_CONFIRM_DELAY_MS);
        c.press("A", BUTTON, Point::new(1, 1), 0);
        c.cancel();
        assert_eq!(c.poll(1_000), None);
    }
}
