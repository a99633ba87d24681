//! Digital-pin adapter for the slave engine
//!
//! Polls the three bus input pins into [`SpiSlave::tick`] and drives the
//! serial output pin with the result. Tri-stating the output driver
//! while deselected remains a board-level concern; this adapter only
//! presents the clean signal to gate.

use embedded_hal::digital::{InputPin, OutputPin};
use sps_core::{BusSample, Level, SlaveError, SlaveResult};

use crate::slave::SpiSlave;

/// A slave engine wired to concrete digital pins
pub struct PinSlave<Sclk, Ssel, Mosi, Miso> {
    slave: SpiSlave,
    sclk: Sclk,
    ssel: Ssel,
    mosi: Mosi,
    miso: Miso,
}

impl<Sclk, Ssel, Mosi, Miso> PinSlave<Sclk, Ssel, Mosi, Miso>
where
    Sclk: InputPin,
    Ssel: InputPin,
    Mosi: InputPin,
    Miso: OutputPin,
{
    /// Bind an engine to its bus pins
    pub fn new(slave: SpiSlave, sclk: Sclk, ssel: Ssel, mosi: Mosi, miso: Miso) -> Self {
        Self {
            slave,
            sclk,
            ssel,
            mosi,
            miso,
        }
    }

    /// Sample the bus pins, advance one tick, and drive the output pin
    ///
    /// Call at the oversampling rate, e.g. from a timer interrupt.
    pub fn poll(&mut self) -> SlaveResult<()> {
        let sample = BusSample::new(
            read_level(&mut self.sclk)?,
            read_level(&mut self.ssel)?,
            read_level(&mut self.mosi)?,
        );
        match self.slave.tick(sample) {
            Level::High => self.miso.set_high(),
            Level::Low => self.miso.set_low(),
        }
        .map_err(|_| SlaveError::Pin)
    }

    /// The wrapped engine
    pub fn slave(&self) -> &SpiSlave {
        &self.slave
    }

    /// Mutable access to the wrapped engine, for register I/O
    pub fn slave_mut(&mut self) -> &mut SpiSlave {
        &mut self.slave
    }

    /// Release the engine and the pins
    pub fn free(self) -> (SpiSlave, Sclk, Ssel, Mosi, Miso) {
        (self.slave, self.sclk, self.ssel, self.mosi, self.miso)
    }
}

fn read_level<P: InputPin>(pin: &mut P) -> SlaveResult<Level> {
    pin.is_high().map(Level::from).map_err(|_| SlaveError::Pin)
}
