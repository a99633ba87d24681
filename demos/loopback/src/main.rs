//! Loopback demo
//!
//! A simulated bus master streams a text message into the slave engine
//! one byte per frame. Before each frame the host queues the previously
//! received byte for transmission, so the master reads its own message
//! back shifted by one frame, the same smoke test a firmware master
//! runs against the real device.

use sps_engine::{SlaveEvent, SpiSlave};
use sps_sim::BusMaster;

fn main() {
    let mut slave = SpiSlave::with_defaults();
    let mut master = BusMaster::with_defaults();

    let message = b"HELLO, SLAVE ENGINE";
    println!("sending {} bytes, echo lags one frame\n", message.len());
    println!("{:>5}  {:>4}  {:>4}", "frame", "out", "back");

    let mut received = Vec::new();
    for (frame, &byte) in message.iter().enumerate() {
        slave.write(slave.read());
        let echoed = master.transfer_word(&mut slave, byte as u32) as u8;
        received.push(echoed);
        let shown = if echoed.is_ascii_graphic() || echoed == b' ' {
            echoed as char
        } else {
            '.'
        };
        println!("{:>5}  {:>4}  {:>4}", frame, byte as char, shown);
    }

    // Everything after the first frame is the message, delayed by one
    let echoed_tail: Vec<u8> = received[1..].to_vec();
    assert_eq!(&echoed_tail, &message[..message.len() - 1]);

    println!("\ntransaction trace:");
    while let Some(event) = slave.take_event() {
        match event {
            SlaveEvent::Started { tx } => println!("  started, tx={:#04x}", tx),
            SlaveEvent::Latched(word) => println!("  latched {:#04x}", word),
            SlaveEvent::Dropped { bits } => println!("  dropped partial ({} bits)", bits),
        }
    }
    println!(
        "({} older records evicted from the ring)",
        slave.events_overwritten()
    );
}
