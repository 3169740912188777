//! Message exchange used to carry a write interaction
//!
//! The write client does not own a transport. The caller hands it an
//! [`Exchange`] bound to a secure session, and the client drops it when the
//! interaction terminates.

use crate::im::MessageType;
use bitflags::bitflags;
use std::time::Duration;
use thiserror::Error;

bitflags! {
    /// Per-message send options
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SendFlags: u8 {
        /// A reply is expected; arm the response timer
        const EXPECT_RESPONSE = 0x01;
    }
}

/// Errors reported by an exchange while sending
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Session is no longer available")]
    SessionUnavailable,

    #[error("Message too large for the session: {0} bytes")]
    MessageTooLarge(usize),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// One request/response exchange on a secure session
pub trait Exchange {
    /// Whether the exchange rides a group session (no responses come back)
    fn is_group(&self) -> bool;

    /// Set how long to wait for the peer's next message
    fn set_response_timeout(&mut self, timeout: Duration);

    /// Send one interaction model message
    fn send_message(
        &mut self,
        msg_type: MessageType,
        payload: Vec<u8>,
        flags: SendFlags,
    ) -> Result<(), TransportError>;
}
