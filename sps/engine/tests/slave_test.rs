//! Transaction engine register and state tests for sps-engine

use sps_engine::{
    BusSample, Level, SharedSlave, SlaveConfig, SlaveError, SlaveEvent, SpiSlave, TraceBuffer,
};

const SETTLE: u32 = 4;

/// Current line levels fed to the engine once per tick
struct Bus {
    sclk: Level,
    ssel: Level,
    mosi: Level,
}

impl Bus {
    fn new() -> Self {
        // Mode-0 idle: clock low, select inactive (high)
        Self {
            sclk: Level::Low,
            ssel: Level::High,
            mosi: Level::Low,
        }
    }

    fn run(&self, slave: &mut SpiSlave, ticks: u32) {
        for _ in 0..ticks {
            slave.tick(BusSample::new(self.sclk, self.ssel, self.mosi));
        }
    }

    /// One full mode-0 byte, MSB first
    fn clock_byte(&mut self, slave: &mut SpiSlave, byte: u8) {
        for bit in (0..8).rev() {
            self.mosi = Level::from_bit((byte >> bit) as u32);
            self.run(slave, SETTLE);
            self.sclk = Level::High;
            self.run(slave, SETTLE);
            self.sclk = Level::Low;
            self.run(slave, SETTLE);
        }
    }

    fn transaction(&mut self, slave: &mut SpiSlave, byte: u8) {
        // Idle deselected long enough for the select edge to be observable
        self.ssel = Level::High;
        self.run(slave, SETTLE);
        self.ssel = Level::Low;
        self.run(slave, SETTLE);
        self.clock_byte(slave, byte);
        self.ssel = Level::High;
        self.run(slave, SETTLE);
    }
}

#[test]
fn test_invalid_word_width_rejected() {
    let config = SlaveConfig {
        word_bits: 0,
        ..SlaveConfig::default()
    };
    assert!(matches!(
        SpiSlave::new(config),
        Err(SlaveError::InvalidWordBits)
    ));

    let config = SlaveConfig {
        word_bits: 33,
        ..SlaveConfig::default()
    };
    assert!(matches!(
        SpiSlave::new(config),
        Err(SlaveError::InvalidWordBits)
    ));
}

#[test]
fn test_counter_zero_whenever_deselected() {
    let mut slave = SpiSlave::with_defaults();
    let mut bus = Bus::new();

    bus.run(&mut slave, 16);
    assert_eq!(slave.bits_clocked(), 0);
    assert!(!slave.is_selected());

    bus.transaction(&mut slave, 0x5A);
    // Select released; the counter must be back at zero
    assert_eq!(slave.bits_clocked(), 0);
    assert!(!slave.is_selected());
}

#[test]
fn test_read_is_idempotent() {
    let mut slave = SpiSlave::with_defaults();
    let mut bus = Bus::new();

    bus.transaction(&mut slave, 0x3C);
    assert_eq!(slave.read(), 0x3C);
    assert_eq!(slave.read(), 0x3C);
    assert_eq!(slave.read(), 0x3C);
}

#[test]
fn test_poll_read_blocks_until_new_word() {
    let mut slave = SpiSlave::with_defaults();
    let mut bus = Bus::new();

    assert_eq!(slave.poll_read(), Err(nb::Error::WouldBlock));

    bus.transaction(&mut slave, 0x42);
    assert_eq!(slave.poll_read(), Ok(0x42));
    assert_eq!(slave.poll_read(), Err(nb::Error::WouldBlock));
    // Plain reads never consume freshness
    assert_eq!(slave.read(), 0x42);

    bus.transaction(&mut slave, 0x43);
    assert_eq!(slave.poll_read(), Ok(0x43));
}

#[test]
fn test_write_masks_to_word_width() {
    let config = SlaveConfig {
        word_bits: 4,
        ..SlaveConfig::default()
    };
    let mut slave = SpiSlave::new(config).unwrap();
    slave.write(0xFF);
    let mut bus = Bus::new();

    // Capture the four transmitted bits of a full 4-bit transaction
    bus.run(&mut slave, SETTLE);
    bus.ssel = Level::Low;
    bus.run(&mut slave, SETTLE);
    let mut seen = Vec::new();
    for _ in 0..4 {
        bus.run(&mut slave, SETTLE);
        seen.push(slave.miso());
        bus.sclk = Level::High;
        bus.run(&mut slave, SETTLE);
        bus.sclk = Level::Low;
        bus.run(&mut slave, SETTLE);
    }
    assert_eq!(seen, vec![Level::High; 4]);
}

#[test]
fn test_reset_restores_power_on_state() {
    let mut slave = SpiSlave::with_defaults();
    let mut bus = Bus::new();

    slave.write(0xAB);
    bus.transaction(&mut slave, 0x77);
    assert_eq!(slave.read(), 0x77);

    slave.reset();
    assert_eq!(slave.read(), 0);
    assert_eq!(slave.bits_clocked(), 0);
    assert!(!slave.is_selected());
    assert_eq!(slave.miso(), Level::Low);
    assert_eq!(slave.take_event(), None);
    assert_eq!(slave.poll_read(), Err(nb::Error::WouldBlock));
}

#[test]
fn test_trace_records_transaction_lifecycle() {
    let mut slave = SpiSlave::with_defaults();
    let mut bus = Bus::new();

    slave.write(0x0F);
    bus.transaction(&mut slave, 0xC3);

    assert_eq!(slave.take_event(), Some(SlaveEvent::Started { tx: 0x0F }));
    assert_eq!(slave.take_event(), Some(SlaveEvent::Latched(0xC3)));
    assert_eq!(slave.take_event(), None);
}

#[test]
fn test_trace_ring_evicts_oldest() {
    let mut trace: TraceBuffer<4> = TraceBuffer::new();
    for i in 0..6 {
        trace.record(SlaveEvent::Latched(i));
    }
    assert_eq!(trace.len(), 4);
    assert_eq!(trace.overwritten(), 2);
    assert_eq!(trace.pop(), Some(SlaveEvent::Latched(2)));

    trace.clear();
    assert!(trace.is_empty());
    assert_eq!(trace.overwritten(), 0);
}

#[test]
fn test_shared_slave_register_access() {
    let shared = SharedSlave::new(SpiSlave::with_defaults());
    shared.write(0x99);
    assert_eq!(shared.read(), 0);
    assert_eq!(shared.poll_read(), Err(nb::Error::WouldBlock));

    // Drive a full transaction through the shared handle
    let mut bus = Bus::new();
    shared.with(|slave| bus.transaction(slave, 0x66));
    assert_eq!(shared.read(), 0x66);
    assert_eq!(shared.poll_read(), Ok(0x66));
    assert_eq!(shared.take_event(), Some(SlaveEvent::Started { tx: 0x99 }));
}
