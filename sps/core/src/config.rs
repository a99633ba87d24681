//! Construction-time configuration for the slave engine

use crate::line::Level;
use crate::{SlaveError, SlaveResult};

/// Maximum supported word width in bits
pub const MAX_WORD_BITS: u32 = 32;

/// SPI mode (clock polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl SpiMode {
    /// Idle level of the clock line (CPOL)
    pub const fn idle_clock(self) -> Level {
        match self {
            SpiMode::Mode0 | SpiMode::Mode1 => Level::Low,
            SpiMode::Mode2 | SpiMode::Mode3 => Level::High,
        }
    }

    /// True when data is sampled on the rising clock edge
    ///
    /// Modes 0 and 3 sample on rising edges and drive on falling edges;
    /// modes 1 and 2 do the opposite.
    pub const fn sample_on_rising(self) -> bool {
        matches!(self, SpiMode::Mode0 | SpiMode::Mode3)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SpiMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SpiMode::Mode0 => defmt::write!(fmt, "Mode0"),
            SpiMode::Mode1 => defmt::write!(fmt, "Mode1"),
            SpiMode::Mode2 => defmt::write!(fmt, "Mode2"),
            SpiMode::Mode3 => defmt::write!(fmt, "Mode3"),
        }
    }
}

/// SPI bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

#[cfg(feature = "defmt")]
impl defmt::Format for BitOrder {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BitOrder::MsbFirst => defmt::write!(fmt, "MsbFirst"),
            BitOrder::LsbFirst => defmt::write!(fmt, "LsbFirst"),
        }
    }
}

/// Slave engine configuration, fixed for the life of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaveConfig {
    /// Bits per transaction word, 1..=32
    pub word_bits: u32,
    /// Which end of the word is on the wire first
    pub bit_order: BitOrder,
    /// Clock polarity and phase
    pub mode: SpiMode,
    /// Level at which the select line addresses this slave
    pub select_active: Level,
}

impl SlaveConfig {
    /// The default configuration: 8-bit words, MSB first, mode 0,
    /// active-low select
    pub const fn new() -> Self {
        Self {
            word_bits: 8,
            bit_order: BitOrder::MsbFirst,
            mode: SpiMode::Mode0,
            select_active: Level::Low,
        }
    }

    /// Reject configurations the shift registers cannot represent
    pub fn validate(&self) -> SlaveResult<()> {
        if self.word_bits == 0 || self.word_bits > MAX_WORD_BITS {
            return Err(SlaveError::InvalidWordBits);
        }
        Ok(())
    }

    /// Mask covering the low `word_bits` bits of a register
    pub const fn word_mask(&self) -> u32 {
        if self.word_bits >= 32 {
            u32::MAX
        } else {
            (1 << self.word_bits) - 1
        }
    }

    /// Level of the select line when the slave is not addressed
    pub const fn select_inactive(&self) -> Level {
        self.select_active.inverted()
    }
}

impl Default for SlaveConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SlaveConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SlaveConfig {{ word_bits: {}, bit_order: {}, mode: {} }}",
            self.word_bits,
            self.bit_order,
            self.mode
        );
    }
}
