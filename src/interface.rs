use crate::registers::*;

/// Single-register access on the expander.
///
/// Every method is one or two complete bus transactions; nothing is cached
/// between calls.
#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self,),
    async(feature = "async", keep_self)
)]
pub trait RegReadWrite {
    /// Reads one register of `port`.
    async fn read_register(&mut self, register: Register, port: Port) -> Result<u8, Error>;

    /// Writes one register of `port`.
    async fn write_register(&mut self, register: Register, port: Port, value: u8)
        -> Result<(), Error>;

    /// Read-modify-write of the bit that belongs to `pin` in the `register`
    /// family. The other seven bits are written back as read.
    ///
    /// The read and the write are separate transactions, so a concurrent
    /// writer to the same register in between is lost.
    async fn update_register_bit(
        &mut self,
        pin: u8,
        value: PinSet,
        register: Register,
    ) -> Result<(), Error>;
}
