//! imwrite - Client side of the interaction model write interaction
//!
//! This library encodes attribute writes into WriteRequestMessages that fit a
//! secure message payload, splitting large writes and long lists across as
//! many messages as needed, and drives the request/response exchange that
//! delivers them. It includes a small TLV encoder/decoder, the interaction
//! model paths, statuses and messages the write needs, and an exchange trait
//! to plug in the transport.

pub mod error;
pub mod exchange;
pub mod im;
pub mod tlv;
pub mod write;

// Re-export common types for convenience
pub use error::{WriteError, WriteResult};
pub use exchange::{Exchange, SendFlags, TransportError};
pub use im::{
    AttributeStatusIB, ConcreteDataAttributePath, ListOperation, MessageType, StatusCode, StatusIB,
};
pub use tlv::{Element, Encode, Octets, Tag, TlvError, TlvReader, TlvWriter};
pub use write::{
    ListEncodingOverride, WriteCallback, WriteClient, WriteClientConfig, WriteState,
};
