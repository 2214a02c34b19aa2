pub use crate::device::Mcp23017;
pub use crate::interface::RegReadWrite;
pub use crate::registers::{
    Direction, Error, InterruptDrive, InterruptMirror, InterruptMode, InterruptPolarity, PinSet,
    Port, Register,
};
