//! Touch handling for the tester's front panel.
//!
//! Raw touch events from the panel are turned into pointer intents
//! ([`TouchNormalizer`]), presses are confirmed after a short delay only if
//! the finger is still on the control ([`PressConfirmer`]), and
//! [`TouchRouter`] ties both to a [`ControlLayer`] of on-screen buttons.
//!
//! Everything here is synchronous and time is passed in explicitly as
//! milliseconds, so sequences replay deterministically in tests.

pub mod confirm;
pub mod geometry;
pub mod normalize;
pub mod router;

pub use confirm::{PressConfirmer, DEFAULT_CONFIRM_DELAY_MS};
pub use geometry::{Point, Rect};
pub use normalize::{HitTest, PointerPhase, RawTouch, TouchIntent, TouchNormalizer};
pub use router::{ControlLayer, TouchRouter};
