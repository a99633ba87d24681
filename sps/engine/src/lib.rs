#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # SPS Engine
//!
//! Synchronous SPI slave transaction engine. Two cooperating pieces form
//! the core:
//!
//! - [`sync`] brings the asynchronous clock/select/data trio into the
//!   local tick domain through fixed-depth sample histories with delayed
//!   edge detection.
//! - [`slave`] consumes the synchronized view: it gates a bit counter on
//!   the select line, shifts inbound bits into a receive register,
//!   drains a transmit register one bit per drive edge, and latches
//!   completed words into a host-visible register.
//!
//! The engine is free-running: [`SpiSlave::tick`] must be invoked at a
//! rate at least twice the fastest expected bus edge rate, from a timer
//! interrupt, a polling loop, or a simulation harness. Nothing in the
//! engine blocks or waits.

pub mod io;
pub mod shared;
pub mod slave;
pub mod sync;
pub mod trace;

pub use io::PinSlave;
pub use shared::SharedSlave;
pub use slave::{SpiSlave, TRACE_DEPTH};
pub use sync::{DataSync, LineState, LineSync};
pub use trace::{SlaveEvent, TraceBuffer};

pub use sps_core::{
    BitOrder, BusSample, Edge, Level, SlaveConfig, SlaveError, SlaveResult, SpiMode,
};
