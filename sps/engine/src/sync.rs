//! Line synchronizer: oversampled shift-register histories with delayed
//! edge detection
//!
//! Raw bus lines arrive asynchronously relative to the local tick. Each
//! monitored line keeps a short sample history; edges are computed from
//! the two older taps, so every edge is reported exactly one tick after
//! it physically occurred. The one tick of latency buys a stable,
//! glitch-free observation: no consumer ever acts on a raw sample.
//!
//! Callers must feed `update` at a rate at least twice the fastest
//! expected bus edge rate, and each line transition must hold for at
//! least two local ticks to be seen exactly once.

use sps_core::{Edge, Level};

/// Sample history depth for edge-detecting lines
pub const EDGE_TAPS: u32 = 3;

/// One tick's synchronized view of a monitored line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    /// Edge that occurred one tick earlier, if any
    pub edge: Option<Edge>,
    /// Stabilized sample, one tick behind the newest tap
    pub delayed: Level,
}

/// Edge-detecting synchronizer for a clock or select line
///
/// Keeps the three most-recent raw samples. The edge window is the two
/// older taps: `01` is a rising edge, `10` a falling edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSync {
    hist: u8,
}

impl LineSync {
    /// A synchronizer with an all-zero history, the power-on state
    pub const fn new() -> Self {
        Self { hist: 0 }
    }

    /// Shift in the newest raw sample and return the previous tick's view
    ///
    /// The returned state is computed before the new sample enters the
    /// history, mirroring a registered design where edge outputs settle
    /// from the previous cycle's flops.
    pub fn update(&mut self, raw: Level) -> LineState {
        let state = LineState {
            edge: match (self.hist >> 1) & 0b11 {
                0b01 => Some(Edge::Rising),
                0b10 => Some(Edge::Falling),
                _ => None,
            },
            delayed: Level::from_bit((self.hist >> 1) as u32),
        };
        self.hist = ((self.hist << 1) | raw.bit() as u8) & 0b111;
        state
    }
}

impl Default for LineSync {
    fn default() -> Self {
        Self::new()
    }
}

/// Stabilize-only synchronizer for the data line
///
/// Two taps; no edge detection, only the next-to-newest sample, taken in
/// the same delayed time frame as [`LineSync`] edges so a data bit lines
/// up with the clock edge that samples it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSync {
    hist: u8,
}

impl DataSync {
    /// A synchronizer with an all-zero history
    pub const fn new() -> Self {
        Self { hist: 0 }
    }

    /// Shift in the newest raw sample and return the stabilized one
    pub fn update(&mut self, raw: Level) -> Level {
        let delayed = Level::from_bit((self.hist >> 1) as u32);
        self.hist = ((self.hist << 1) | raw.bit() as u8) & 0b11;
        delayed
    }
}

impl Default for DataSync {
    fn default() -> Self {
        Self::new()
    }
}
