//! SPI slave transaction state machine
//!
//! Conceptually two states, held as register values rather than a state
//! tag: not-selected (bit counter pinned at zero, no shifting) and
//! selected (one bit in per sampling edge, one bit out per drive edge).
//! Transaction boundaries are the synchronized select edges: the assert
//! edge loads the transmit register, the release edge commits the receive
//! register to the host-visible data-in register when a full word was
//! clocked, and silently discards partial words otherwise.

use sps_core::{BitOrder, BusSample, Edge, Level, SlaveConfig, SlaveResult};

use crate::sync::{DataSync, LineSync};
use crate::trace::{SlaveEvent, TraceBuffer};

/// Trace ring depth per engine instance
pub const TRACE_DEPTH: usize = 16;

/// The SPI slave transaction engine
///
/// Owns every piece of per-instance state: line synchronizer histories,
/// shift registers, the bit counter, and the two host-facing data
/// registers. [`Self::tick`] advances the whole machine by one local
/// clock tick; everything else is register access.
pub struct SpiSlave {
    config: SlaveConfig,
    sclk: LineSync,
    ssel: LineSync,
    mosi: DataSync,
    /// Registered select-active flag, one tick behind the delayed line
    selected: bool,
    bit_count: u32,
    rx_shift: u32,
    tx_shift: u32,
    data_in: u32,
    data_out: u32,
    fresh: bool,
    trace: TraceBuffer<TRACE_DEPTH>,
}

impl SpiSlave {
    /// Create an engine with the given configuration
    pub fn new(config: SlaveConfig) -> SlaveResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Engine with the default 8-bit, MSB-first, mode-0 configuration
    pub fn with_defaults() -> Self {
        Self::from_config(SlaveConfig::new())
    }

    fn from_config(config: SlaveConfig) -> Self {
        Self {
            config,
            sclk: LineSync::new(),
            ssel: LineSync::new(),
            mosi: DataSync::new(),
            selected: false,
            bit_count: 0,
            rx_shift: 0,
            tx_shift: 0,
            data_in: 0,
            data_out: 0,
            fresh: false,
            trace: TraceBuffer::new(),
        }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &SlaveConfig {
        &self.config
    }

    /// Advance the engine by one local clock tick
    ///
    /// Returns the level to present on the serial output line until the
    /// next tick. Must be called at a rate at least twice the fastest
    /// expected bus edge rate; all decisions in a tick are taken from the
    /// previous tick's synchronized view.
    pub fn tick(&mut self, sample: BusSample) -> Level {
        let sclk = self.sclk.update(sample.sclk);
        let ssel = self.ssel.update(sample.ssel);
        let mosi = self.mosi.update(sample.mosi);

        let (sample_edge, drive_edge) = if self.config.mode.sample_on_rising() {
            (Edge::Rising, Edge::Falling)
        } else {
            (Edge::Falling, Edge::Rising)
        };
        let (assert_edge, release_edge) = match self.config.select_active {
            Level::High => (Edge::Rising, Edge::Falling),
            Level::Low => (Edge::Falling, Edge::Rising),
        };
        let asserted = ssel.edge == Some(assert_edge);
        let released = ssel.edge == Some(release_edge);

        if self.selected {
            if sclk.edge == Some(sample_edge) {
                self.bit_count = self.bit_count.saturating_add(1);
                self.rx_shift = self.shift_in(self.rx_shift, mosi);
            }
            // In modes 1 and 3 the drive edge leads the first sample edge;
            // the freshly loaded bit must survive it.
            if sclk.edge == Some(drive_edge) && self.bit_count > 0 {
                self.tx_shift >>= 1;
            }
        } else {
            self.bit_count = 0;
        }

        if asserted {
            self.tx_shift = self.wire_order(self.data_out);
            self.trace.record(SlaveEvent::Started { tx: self.data_out });
        }
        if released {
            if self.bit_count >= self.config.word_bits {
                self.data_in = self.rx_shift & self.config.word_mask();
                self.fresh = true;
                self.trace.record(SlaveEvent::Latched(self.data_in));
            } else if self.bit_count > 0 {
                self.trace.record(SlaveEvent::Dropped {
                    bits: self.bit_count,
                });
            }
        }

        self.selected = ssel.delayed == self.config.select_active;
        self.miso()
    }

    /// Word latched at the end of the most recently completed transaction
    ///
    /// Idempotent; repeated reads without a new transaction return the
    /// same value.
    pub fn read(&self) -> u32 {
        self.data_in
    }

    /// The latched word, once per completed transaction
    ///
    /// Returns `WouldBlock` until a new full word has been committed
    /// since the previous successful poll.
    pub fn poll_read(&mut self) -> nb::Result<u32, core::convert::Infallible> {
        if self.fresh {
            self.fresh = false;
            Ok(self.data_in)
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Queue `word` for transmission on the next transaction
    ///
    /// Masked to the configured word width. A write during a running
    /// transaction does not disturb the bits currently on the wire.
    pub fn write(&mut self, word: u32) {
        self.data_out = word & self.config.word_mask();
    }

    /// Serial output line: bit 0 of the transmit shift register
    pub fn miso(&self) -> Level {
        Level::from_bit(self.tx_shift)
    }

    /// Bits clocked in during the current transaction
    ///
    /// Zero whenever the synchronized select is inactive.
    pub fn bits_clocked(&self) -> u32 {
        self.bit_count
    }

    /// Synchronized, one-tick-delayed select state
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Drain the oldest trace record
    pub fn take_event(&mut self) -> Option<SlaveEvent> {
        self.trace.pop()
    }

    /// Trace records lost to ring eviction
    pub fn events_overwritten(&self) -> u32 {
        self.trace.overwritten()
    }

    /// Return to the power-on state, keeping the configuration
    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::from_config(config);
    }

    fn shift_in(&self, reg: u32, bit: Level) -> u32 {
        match self.config.bit_order {
            BitOrder::MsbFirst => ((reg << 1) | bit.bit()) & self.config.word_mask(),
            BitOrder::LsbFirst => (reg >> 1) | (bit.bit() << (self.config.word_bits - 1)),
        }
    }

    /// Arrange `word` so successive right shifts present bit 0 in wire order
    fn wire_order(&self, word: u32) -> u32 {
        match self.config.bit_order {
            BitOrder::MsbFirst => word.reverse_bits() >> (32 - self.config.word_bits),
            BitOrder::LsbFirst => word,
        }
    }
}
