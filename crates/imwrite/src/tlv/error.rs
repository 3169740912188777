//! Error handling for TLV encoding and decoding
use thiserror::Error;

/// TLV Error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    #[error("Not enough space left in the TLV buffer")]
    BufferTooSmall,

    #[error("Failed to allocate TLV buffer")]
    NoMemory,

    #[error("Truncated TLV element")]
    Truncated,

    #[error("Invalid TLV element type: 0x{0:02X}")]
    InvalidElementType(u8),

    #[error("Unsupported TLV tag control: 0x{0:02X}")]
    InvalidTag(u8),

    #[error("Unexpected TLV element type")]
    WrongType,

    #[error("TLV value out of range")]
    OutOfRange,

    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    #[error("No open TLV container")]
    NoOpenContainer,

    #[error("TLV container type mismatch")]
    ContainerMismatch,

    #[error("TLV container is not terminated")]
    UnterminatedContainer,

    #[error("TLV containers nested too deeply")]
    TooDeep,

    #[error("TLV writer still has open containers")]
    UnclosedContainer,

    #[error("Invalid buffer reservation of {0} bytes")]
    InvalidReservation(usize),
}

/// TLV Result type
pub type TlvResult<T> = Result<T, TlvError>;
