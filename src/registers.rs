use core::fmt::Display;
use embedded_hal::i2c::ErrorKind;

/// Fixed part of the 7-bit bus address; A2..A0 select the low three bits.
pub const BASE_ADDRESS: u8 = 0x20;
/// Mask applied to the strap-selected address offset.
pub const ADDRESS_MASK: u8 = 0x07;
/// Number of GPIO pins on the chip, `0..PIN_COUNT`.
pub const PIN_COUNT: u8 = 16;

// IOCON bits
pub const IOCON_MIRROR: u8 = 6;
pub const IOCON_SEQOP: u8 = 5;
pub const IOCON_ODR: u8 = 2;
pub const IOCON_INTPOL: u8 = 1;

/// Register families, addressed for port A with IOCON.BANK = 0.
///
/// The port B register of each family sits at the next address, see
/// [`Register::address`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Register {
    /// I/O direction: 1 = input, 0 = output
    Iodir = 0x00,
    /// Input polarity
    Ipol = 0x02,
    /// Interrupt-on-change enable
    Gpinten = 0x04,
    /// Default compare value for interrupt-on-change
    Defval = 0x06,
    /// Interrupt control: 0 = compare to previous value, 1 = compare to DEFVAL
    Intcon = 0x08,
    /// Chip configuration
    Iocon = 0x0A,
    /// 100k pull-up enable
    Gppu = 0x0C,
    /// Interrupt flags (read-only)
    Intf = 0x0E,
    /// Port value latched at interrupt time (read-only)
    Intcap = 0x10,
    /// Port input value; writes go to OLAT
    Gpio = 0x12,
    /// Output latch
    Olat = 0x14,
}

impl Register {
    /// Register address of this family on the given port.
    #[inline]
    pub fn address(self, port: Port) -> u8 {
        self as u8 | port as u8
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Port {
    /// Pins 0..=7
    A = 0x00,
    /// Pins 8..=15
    B = 0x01,
}

impl TryFrom<u8> for Port {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Port::A),
            1 => Ok(Port::B),
            _ => Err(Error::InvalidParameter),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PinSet {
    Low = 0,
    High = 1,
}

impl From<u8> for PinSet {
    fn from(value: u8) -> Self {
        match value {
            0 => PinSet::Low,
            _ => PinSet::High,
        }
    }
}

impl From<bool> for PinSet {
    fn from(value: bool) -> Self {
        if value {
            PinSet::High
        } else {
            PinSet::Low
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Output = 0,
    Input = 1,
}

/// Condition that raises the interrupt of a pin.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InterruptMode {
    /// Any change compared to the previous pin value
    Change,
    /// Pin differs from a DEFVAL bit of 0
    Rising,
    /// Pin differs from a DEFVAL bit of 1
    Falling,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InterruptMirror {
    /// INTA and INTB are independent
    MirrorOff = 0,
    /// INTA and INTB are internally OR-ed
    MirrorOn = 1,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InterruptDrive {
    /// Active driver, level set by [`InterruptPolarity`]
    ActiveDriver = 0,
    /// Open-drain output, overrides the polarity
    OpenDrain = 1,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InterruptPolarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

///Valid error codes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The bus transaction failed
    CommunicationErr(ErrorKind),
    /// Pin outside `0..16` or port index other than 0/1
    InvalidParameter,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::CommunicationErr(kind) => write!(f, "I2C communication failed: {:?}", kind),
            Error::InvalidParameter => write!(f, "Invalid Parameter"),
        }
    }
}

/**
 * Returns communication error
 */
pub fn i2c_comm_error<E: embedded_hal::i2c::Error>(error: E) -> Error {
    Error::CommunicationErr(error.kind())
}

/// Rejects pins outside `0..PIN_COUNT`.
#[inline]
pub fn check_pin(pin: u8) -> Result<u8, Error> {
    if pin < PIN_COUNT {
        Ok(pin)
    } else {
        Err(Error::InvalidParameter)
    }
}

#[inline]
pub fn bit_for_pin(pin: u8) -> u8 {
    pin % 8
}

#[inline]
pub fn port_for_pin(pin: u8) -> Port {
    if pin < 8 {
        Port::A
    } else {
        Port::B
    }
}

/// Address of the `register` family on the port that holds `pin`.
#[inline]
pub fn register_for_pin(pin: u8, register: Register) -> u8 {
    register.address(port_for_pin(pin))
}

pub fn bit_set(byte: u8, bit: u8) -> u8 {
    byte | (1 << bit)
}

pub fn bit_clear(byte: u8, bit: u8) -> u8 {
    byte & !(1 << bit)
}

pub fn bit_read(byte: u8, bit: u8) -> u8 {
    (byte >> bit) & 0x01
}

pub fn bit_write(byte: u8, bit: u8, value: PinSet) -> u8 {
    match value {
        PinSet::High => bit_set(byte, bit),
        PinSet::Low => bit_clear(byte, bit),
    }
}

/// Index of the lowest set bit, `None` for an empty mask.
pub fn lowest_set_bit(byte: u8) -> Option<u8> {
    if byte == 0 {
        None
    } else {
        Some(byte.trailing_zeros() as u8)
    }
}
