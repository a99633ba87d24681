//! Interrupt-safe shared handle around a slave engine
//!
//! The sampling tick typically runs from a timer interrupt while host
//! logic reads and writes the data registers from thread mode. All
//! access goes through a critical section; the register ownership rules
//! are unchanged: the engine is the only writer of data-in, the host
//! the only writer of data-out.

use core::cell::RefCell;

use critical_section::Mutex;
use sps_core::{BusSample, Level};

use crate::slave::SpiSlave;
use crate::trace::SlaveEvent;

/// A [`SpiSlave`] shared between an interrupt context and host logic
pub struct SharedSlave {
    inner: Mutex<RefCell<SpiSlave>>,
}

impl SharedSlave {
    /// Wrap an engine for shared access
    pub const fn new(slave: SpiSlave) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(slave)),
        }
    }

    /// Advance the engine by one tick; safe to call from an interrupt
    pub fn tick(&self, sample: BusSample) -> Level {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).tick(sample))
    }

    /// Word latched at the end of the most recent transaction
    pub fn read(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).read())
    }

    /// The latched word, once per completed transaction
    pub fn poll_read(&self) -> nb::Result<u32, core::convert::Infallible> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).poll_read())
    }

    /// Queue `word` for transmission on the next transaction
    pub fn write(&self, word: u32) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).write(word));
    }

    /// Drain the oldest trace record
    pub fn take_event(&self) -> Option<SlaveEvent> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take_event())
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut SpiSlave) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
