//! Error types for the imwrite library
//!
//! This module defines the error type shared by the interaction model
//! messages and the write client.

use crate::exchange::TransportError;
use crate::im::{MessageType, StatusCode};
use crate::tlv::TlvError;
use thiserror::Error;

/// Errors that can occur while building, sending or completing a write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("TLV error: {0}")]
    Tlv(#[from] TlvError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to allocate message buffer")]
    NoMemory,

    #[error("Invalid state for operation")]
    InvalidState,

    #[error("Attribute does not fit in an empty message")]
    ElementTooLarge,

    #[error("Timed write cannot span more than one message")]
    TimedWriteChunked,

    #[error("Group write cannot carry a data version")]
    GroupDataVersion,

    #[error("Group write cannot span more than one message")]
    GroupWriteChunked,

    #[error("Unsupported list operation")]
    UnsupportedListOperation,

    #[error("Unexpected message type: {0:?}")]
    InvalidMessageType(MessageType),

    #[error("Malformed message: {0}")]
    MalformedMessage(&'static str),

    #[error("Peer returned status: {0:?}")]
    Status(StatusCode),

    #[error("Response timed out")]
    Timeout,

    #[error("Connection closed")]
    ConnectionClosed,
}

impl WriteError {
    /// Check if the error means the current message ran out of space
    pub fn is_no_space(&self) -> bool {
        matches!(self, WriteError::Tlv(TlvError::BufferTooSmall))
    }
}

/// Result type for write operations
pub type WriteResult<T> = Result<T, WriteError>;
