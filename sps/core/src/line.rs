//! Bus line levels, edges, and the raw sample triple

/// Logic level of a bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl Level {
    /// The level as a single shift-register bit
    pub const fn bit(self) -> u32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Check for the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Level corresponding to the least-significant bit of `word`
    pub const fn from_bit(word: u32) -> Self {
        if word & 1 == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "Low"),
            Level::High => defmt::write!(fmt, "High"),
        }
    }
}

/// A transition observed on a sampled line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Low-to-high transition
    Rising,
    /// High-to-low transition
    Falling,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Edge {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Edge::Rising => defmt::write!(fmt, "Rising"),
            Edge::Falling => defmt::write!(fmt, "Falling"),
        }
    }
}

/// One raw sample of the three slave-facing bus lines
///
/// Samples arrive asynchronously relative to the local tick; the engine's
/// line synchronizer is the only consumer of raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusSample {
    /// Serial clock from the bus master
    pub sclk: Level,
    /// Slave select
    pub ssel: Level,
    /// Master-out-slave-in data line
    pub mosi: Level,
}

impl BusSample {
    /// Create a sample from the three line levels
    pub const fn new(sclk: Level, ssel: Level, mosi: Level) -> Self {
        Self { sclk, ssel, mosi }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusSample {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "sclk:{} ssel:{} mosi:{}", self.sclk, self.ssel, self.mosi);
    }
}
