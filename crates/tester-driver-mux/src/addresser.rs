//! Channel addressing for the 16-channel multiplexer.
//!
//! A channel number `n` in `0..16` is presented on the select lines as its
//! binary expansion, S0 = bit 0 through S3 = bit 3.

use crate::error::{MuxError, Result};
use crate::gpio::Level;
use std::fmt;

/// Number of analog channels behind one multiplexer.
pub const CHANNEL_COUNT: u8 = 16;

/// A multiplexer channel, always in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    pub fn new(n: u8) -> Option<Self> {
        (n < CHANNEL_COUNT).then_some(Self(n))
    }

    pub fn index(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = MuxError;

    fn try_from(n: u8) -> Result<Self> {
        Channel::new(n).ok_or(MuxError::InvalidChannel(n))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Channel for a 1-based pin ordinal. Ordinals past 16 wrap around;
/// ordinal 0 is treated as 1.
pub fn channel_for_ordinal(ordinal: usize) -> Channel {
    let index = ordinal.saturating_sub(1) % CHANNEL_COUNT as usize;
    // index < 16 by construction
    Channel(index as u8)
}

/// Levels for S0..S3 selecting one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectPattern([Level; 4]);

impl SelectPattern {
    pub fn levels(&self) -> [Level; 4] {
        self.0
    }

    /// Pattern as a bit tuple `(s0, s1, s2, s3)`.
    pub fn bits(&self) -> (u8, u8, u8, u8) {
        let b = |l: Level| u8::from(l.is_high());
        (b(self.0[0]), b(self.0[1]), b(self.0[2]), b(self.0[3]))
    }
}

impl From<Channel> for SelectPattern {
    fn from(channel: Channel) -> Self {
        let bit = |i: u8| Level::from((channel.0 >> i) & 1 == 1);
        SelectPattern([bit(0), bit(1), bit(2), bit(3)])
    }
}

/// Maps requested pins onto channels and select patterns.
///
/// Pins with a numeric id are addressed by that number; anything else falls
/// back to its 1-based position in the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelAddresser;

impl ChannelAddresser {
    pub fn select(&self, channel: Channel) -> SelectPattern {
        SelectPattern::from(channel)
    }

    pub fn channel_for(&self, pin: &tester_core::PinId, position: usize) -> Channel {
        channel_for_ordinal(pin.ordinal().unwrap_or(position + 1))
    }
}
