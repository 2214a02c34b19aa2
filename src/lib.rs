//! Pin-level driver for the Microchip MCP23017 16-bit I/O expander on I2C.
//!
//! Pins are numbered 0..=15: pins 0..=7 are port A, pins 8..=15 are port B.
//! Every operation maps onto single-byte register accesses; pin updates are
//! read-modify-write cycles that leave the other pins of the port untouched.
//! The driver keeps no copy of the chip's registers.
//!
//! ```ignore
//! use mcp23017_io::prelude::*;
//!
//! let mut mcp = Mcp23017::new(i2c, 0);
//! mcp.init()?;
//! mcp.set_direction(0, Direction::Output)?;
//! mcp.digital_write(0, PinSet::High)?;
//!
//! mcp.pull_up(8, true)?;
//! mcp.setup_interrupts(
//!     InterruptMirror::MirrorOn,
//!     InterruptDrive::ActiveDriver,
//!     InterruptPolarity::ActiveLow,
//! )?;
//! mcp.setup_interrupt_pin(8, InterruptMode::Falling)?;
//!
//! if let Some(pin) = mcp.last_interrupt_pin()? {
//!     // ...
//! }
//! ```
//!
//! The `async` feature builds the same API as `async fn` over
//! `embedded-hal-async`.
//!
//! Transport failures come back as [`Error::CommunicationErr`] and are also
//! reported through the `log` facade.

#![cfg_attr(not(test), no_std)]

pub mod device;
pub mod interface;
pub mod prelude;
pub mod registers;

pub use device::Mcp23017;
pub use interface::RegReadWrite;
pub use registers::Error;
