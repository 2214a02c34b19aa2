use crate::interface::*;
use crate::registers::*;
use byteorder::{ByteOrder, LittleEndian};
#[cfg(not(feature = "async"))]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c;
use log::{debug, error, trace};

/// Handle for one MCP23017 on the bus.
///
/// Holds the transport and the resolved device address only; every
/// operation re-reads the registers it modifies.
#[derive(Debug, Clone)]
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Mcp23017<I2C>
where
    I2C: I2c,
{
    /**
     * Binds the transport to the chip strapped at `address_offset` (A2..A0).
     * Only the low three bits are used, so both 0x0..0x7 and 0x20..0x27 select
     * the same device. No bus traffic; call `init` afterwards.
     */
    #[inline]
    pub fn new(i2c: I2C, address_offset: u8) -> Self {
        Mcp23017 {
            i2c,
            address: BASE_ADDRESS | (address_offset & ADDRESS_MASK),
        }
    }

    /**
     * Chip with A2..A0 tied low
     */
    #[inline]
    pub fn with_default_address(i2c: I2C) -> Self {
        Self::new(i2c, 0)
    }

    /// 7-bit bus address used for every transaction.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the transport back.
    #[inline]
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self,),
    async(feature = "async", keep_self)
)]
impl<I2C> RegReadWrite for Mcp23017<I2C>
where
    I2C: I2c,
{
    #[inline]
    async fn read_register(&mut self, register: Register, port: Port) -> Result<u8, Error> {
        let register_address = register.address(port);
        let mut rx_buffer: [u8; 1] = [0; 1];
        self.i2c
            .write_read(self.address, &[register_address], &mut rx_buffer)
            .await
            .map_err(|e| {
                let err = i2c_comm_error(e);
                error!(
                    "read (0x{:02x}) failed reg(0x{:02x}): {}",
                    self.address, register_address, err
                );
                err
            })?;
        Ok(rx_buffer[0])
    }

    #[inline]
    async fn write_register(
        &mut self,
        register: Register,
        port: Port,
        value: u8,
    ) -> Result<(), Error> {
        let register_address = register.address(port);
        self.i2c
            .write(self.address, &[register_address, value])
            .await
            .map_err(|e| {
                let err = i2c_comm_error(e);
                error!(
                    "write (0x{:02x}) failed reg(0x{:02x})=0x{:02x}: {}",
                    self.address, register_address, value, err
                );
                err
            })?;
        Ok(())
    }

    async fn update_register_bit(
        &mut self,
        pin: u8,
        value: PinSet,
        register: Register,
    ) -> Result<(), Error> {
        let pin = check_pin(pin)?;
        let port = port_for_pin(pin);
        let bit = bit_for_pin(pin);

        let current = self.read_register(register, port).await?;
        let updated = bit_write(current, bit, value);
        trace!(
            "{:?}{:?} bit {} -> {:?} (0x{:02x} -> 0x{:02x})",
            register,
            port,
            bit,
            value,
            current,
            updated
        );

        self.write_register(register, port, updated).await
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self,),
    async(feature = "async", keep_self)
)]
impl<I2C> Mcp23017<I2C>
where
    I2C: I2c,
{
    /**
     * Sets every pin of both ports as input, the chip's reset default
     */
    pub async fn init(&mut self) -> Result<(), Error> {
        debug!("mcp23017 (0x{:02x}): all pins input", self.address);
        self.write_register(Register::Iodir, Port::A, 0xFF).await?;
        self.write_register(Register::Iodir, Port::B, 0xFF).await
    }

    #[inline]
    pub async fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), Error> {
        self.update_register_bit(pin, PinSet::from(direction as u8), Register::Iodir)
            .await
    }

    /**
     * Reads both ports in one transaction, port A in the low byte and port B in
     * the high byte. Relies on the chip's sequential register pointer.
     */
    pub async fn read_all_pins(&mut self) -> Result<u16, Error> {
        let register_address = Register::Gpio.address(Port::A);
        let mut rx_buffer: [u8; 2] = [0; 2];
        self.i2c
            .write_read(self.address, &[register_address], &mut rx_buffer)
            .await
            .map_err(|e| {
                let err = i2c_comm_error(e);
                error!("read gpio (0x{:02x}) failed: {}", self.address, err);
                err
            })?;
        Ok(LittleEndian::read_u16(&rx_buffer))
    }

    #[inline]
    pub async fn read_port(&mut self, port: Port) -> Result<u8, Error> {
        self.read_register(Register::Gpio, port).await
    }

    /**
     * Writes both ports in one transaction: GPIOA address, low byte, high byte.
     */
    pub async fn write_all_pins(&mut self, value: u16) -> Result<(), Error> {
        let mut tx_buffer: [u8; 3] = [Register::Gpio.address(Port::A), 0, 0];
        LittleEndian::write_u16(&mut tx_buffer[1..], value);
        self.i2c
            .write(self.address, &tx_buffer)
            .await
            .map_err(|e| {
                let err = i2c_comm_error(e);
                error!(
                    "write gpio (0x{:02x}):0x{:04x} failed: {}",
                    self.address, value, err
                );
                err
            })?;
        Ok(())
    }

    #[inline]
    pub async fn write_port(&mut self, port: Port, value: u8) -> Result<(), Error> {
        self.write_register(Register::Gpio, port, value).await
    }

    /**
     * Drives one output pin. The rest of the port is taken from the output
     * latch rather than GPIO, which reflects the pin levels and not what was
     * last written.
     */
    pub async fn digital_write(&mut self, pin: u8, value: PinSet) -> Result<(), Error> {
        let pin = check_pin(pin)?;
        let port = port_for_pin(pin);

        let latch = self.read_register(Register::Olat, port).await?;
        let gpio = bit_write(latch, bit_for_pin(pin), value);

        self.write_register(Register::Gpio, port, gpio).await
    }

    #[inline]
    pub async fn pull_up(&mut self, pin: u8, enable: bool) -> Result<(), Error> {
        self.update_register_bit(pin, PinSet::from(enable), Register::Gppu)
            .await
    }

    pub async fn digital_read(&mut self, pin: u8) -> Result<PinSet, Error> {
        let pin = check_pin(pin)?;
        let gpio = self.read_register(Register::Gpio, port_for_pin(pin)).await?;
        Ok(PinSet::from(bit_read(gpio, bit_for_pin(pin))))
    }

    /**
     * Configures the INTA/INTB outputs, identically on both ports. Only the
     * MIRROR, ODR and INTPOL bits of IOCON are changed.
     */
    pub async fn setup_interrupts(
        &mut self,
        mirror: InterruptMirror,
        drive: InterruptDrive,
        polarity: InterruptPolarity,
    ) -> Result<(), Error> {
        debug!(
            "mcp23017 (0x{:02x}): interrupts {:?} {:?} {:?}",
            self.address, mirror, drive, polarity
        );
        for port in [Port::A, Port::B] {
            let mut iocon = self.read_register(Register::Iocon, port).await?;
            iocon = bit_write(iocon, IOCON_MIRROR, PinSet::from(mirror as u8));
            iocon = bit_write(iocon, IOCON_ODR, PinSet::from(drive as u8));
            iocon = bit_write(iocon, IOCON_INTPOL, PinSet::from(polarity as u8));
            self.write_register(Register::Iocon, port, iocon).await?;
        }
        Ok(())
    }

    /**
     * Arms the interrupt of `pin`. `Change` compares against the previous pin
     * value; `Rising` and `Falling` compare against DEFVAL 0 and 1. The pin's
     * interrupt is always enabled.
     */
    pub async fn setup_interrupt_pin(&mut self, pin: u8, mode: InterruptMode) -> Result<(), Error> {
        let pin = check_pin(pin)?;
        debug!(
            "mcp23017 (0x{:02x}): interrupt on pin {} {:?}",
            self.address, pin, mode
        );

        self.update_register_bit(
            pin,
            PinSet::from(mode != InterruptMode::Change),
            Register::Intcon,
        )
        .await?;
        // DEFVAL only matters when INTCON is set
        self.update_register_bit(
            pin,
            PinSet::from(mode == InterruptMode::Falling),
            Register::Defval,
        )
        .await?;
        self.update_register_bit(pin, PinSet::High, Register::Gpinten)
            .await
    }

    #[inline]
    pub async fn disable_interrupt_pin(&mut self, pin: u8) -> Result<(), Error> {
        self.update_register_bit(pin, PinSet::Low, Register::Gpinten)
            .await
    }

    /**
     * Lowest-numbered pin with its interrupt flag set, port A first.
     * `None` when no interrupt is pending.
     */
    pub async fn last_interrupt_pin(&mut self) -> Result<Option<u8>, Error> {
        let flags = self.read_register(Register::Intf, Port::A).await?;
        if let Some(bit) = lowest_set_bit(flags) {
            return Ok(Some(bit));
        }

        let flags = self.read_register(Register::Intf, Port::B).await?;
        Ok(lowest_set_bit(flags).map(|bit| bit + 8))
    }

    /**
     * Level of the interrupting pin as captured in INTCAP when the interrupt
     * fired, not its current level. Reading INTCAP clears the interrupt.
     */
    pub async fn last_interrupt_pin_value(&mut self) -> Result<Option<PinSet>, Error> {
        match self.last_interrupt_pin().await? {
            Some(pin) => {
                let captured = self
                    .read_register(Register::Intcap, port_for_pin(pin))
                    .await?;
                Ok(Some(PinSet::from(bit_read(captured, bit_for_pin(pin)))))
            }
            None => Ok(None),
        }
    }
}
