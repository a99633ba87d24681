//! # SPS Sim
//!
//! Host-side bus master model. Bit-bangs the three slave-facing lines
//! against a [`SpiSlave`] with configurable oversampling, producing the
//! same waveform shape a firmware master's transfer helper generates:
//! assert select, one drive phase and one sample phase per bit cell,
//! release select.
//!
//! The model exists for tests and demos; it is not a bus implementation.

use sps_core::{BitOrder, BusSample, Level, SlaveConfig};
use sps_engine::sync::EDGE_TAPS;
use sps_engine::SpiSlave;

/// Master-side configuration
#[derive(Debug, Clone, Copy)]
pub struct MasterConfig {
    /// Bus parameters, shared with the slave under test
    pub bus: SlaveConfig,
    /// Local ticks the slave runs per line phase
    ///
    /// Must cover the slave's synchronizer depth so every transition is
    /// seen; the default leaves one tick of margin.
    pub settle_ticks: u32,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            bus: SlaveConfig::new(),
            settle_ticks: EDGE_TAPS + 1,
        }
    }
}

/// A bit-banging bus master driving one slave engine
pub struct BusMaster {
    config: MasterConfig,
    sclk: Level,
    ssel: Level,
    mosi: Level,
}

impl BusMaster {
    /// Master with idle lines matching `config`
    pub fn new(config: MasterConfig) -> Self {
        Self {
            sclk: config.bus.mode.idle_clock(),
            ssel: config.bus.select_inactive(),
            mosi: Level::Low,
            config,
        }
    }

    /// Master with the default 8-bit, MSB-first, mode-0 bus
    pub fn with_defaults() -> Self {
        Self::new(MasterConfig::default())
    }

    /// The master-side configuration
    pub fn config(&self) -> &MasterConfig {
        &self.config
    }

    /// Hold the current line levels for `ticks` slave ticks
    pub fn idle(&mut self, slave: &mut SpiSlave, ticks: u32) {
        for _ in 0..ticks {
            slave.tick(BusSample::new(self.sclk, self.ssel, self.mosi));
        }
    }

    /// Assert select and give the slave time to arm its transmit register
    pub fn select(&mut self, slave: &mut SpiSlave) {
        // Hold deselected first so the assert edge is observable even
        // straight out of power-on
        self.ssel = self.config.bus.select_inactive();
        self.settle(slave);
        self.ssel = self.config.bus.select_active;
        self.settle(slave);
    }

    /// Release select, ending the current frame
    pub fn deselect(&mut self, slave: &mut SpiSlave) {
        self.ssel = self.config.bus.select_inactive();
        self.settle(slave);
    }

    /// Drive one bit cell inside the current frame
    ///
    /// Places `bit` on the data line during the drive phase, captures the
    /// slave's output line, then runs the sampling edge. Returns the
    /// captured output bit.
    pub fn clock_bit(&mut self, slave: &mut SpiSlave, bit: Level) -> Level {
        let sample_level = if self.config.bus.mode.sample_on_rising() {
            Level::High
        } else {
            Level::Low
        };

        self.sclk = sample_level.inverted();
        self.settle(slave);
        self.mosi = bit;
        self.settle(slave);
        let miso = slave.miso();
        self.sclk = sample_level;
        self.settle(slave);
        miso
    }

    /// Clock one full word of bit cells inside the current frame
    ///
    /// Returns the word the slave transmitted, assembled in the
    /// configured bit order.
    pub fn clock_word(&mut self, slave: &mut SpiSlave, word: u32) -> u32 {
        let mut captured = 0;
        for index in 0..self.config.bus.word_bits {
            let miso = self.clock_bit(slave, self.outgoing_bit(word, index));
            captured = self.incoming_bit(captured, miso, index);
        }
        self.park_clock(slave);
        captured
    }

    /// Clock only the first `count` bit cells of `word`, wire order
    ///
    /// `count` must not exceed the configured word width.
    pub fn clock_partial(&mut self, slave: &mut SpiSlave, word: u32, count: u32) {
        for index in 0..count {
            self.clock_bit(slave, self.outgoing_bit(word, index));
        }
        self.park_clock(slave);
    }

    /// Select, clock one word, deselect
    ///
    /// Returns the word the slave transmitted during the frame.
    pub fn transfer_word(&mut self, slave: &mut SpiSlave, word: u32) -> u32 {
        self.select(slave);
        let captured = self.clock_word(slave, word);
        self.deselect(slave);
        captured
    }

    /// One framed transaction per word, collecting the slave's output
    pub fn transfer(&mut self, slave: &mut SpiSlave, words: &[u32]) -> Vec<u32> {
        words
            .iter()
            .map(|&word| self.transfer_word(slave, word))
            .collect()
    }

    fn settle(&mut self, slave: &mut SpiSlave) {
        self.idle(slave, self.config.settle_ticks);
    }

    /// Return the clock to its idle level between words
    fn park_clock(&mut self, slave: &mut SpiSlave) {
        self.sclk = self.config.bus.mode.idle_clock();
        self.settle(slave);
    }

    fn outgoing_bit(&self, word: u32, index: u32) -> Level {
        let bits = self.config.bus.word_bits;
        match self.config.bus.bit_order {
            BitOrder::MsbFirst => Level::from_bit(word >> (bits - 1 - index)),
            BitOrder::LsbFirst => Level::from_bit(word >> index),
        }
    }

    fn incoming_bit(&self, acc: u32, bit: Level, index: u32) -> u32 {
        match self.config.bus.bit_order {
            BitOrder::MsbFirst => (acc << 1) | bit.bit(),
            BitOrder::LsbFirst => acc | (bit.bit() << index),
        }
    }
}
