//! Interaction Model vocabulary
//!
//! Paths, status codes and the message payloads the write client sends and
//! receives. The chunked write request itself is assembled by
//! [`crate::write`].

pub mod constants;
pub mod messages;
pub mod path;
pub mod status;

#[cfg(test)]
mod tests;

pub use self::constants::*;
pub use self::messages::{
    encode_status_response, encode_timed_request, encode_write_response, parse_status_response,
    parse_timed_request, write_response_statuses, AttributeStatusIB, MessageType,
};
pub use self::path::{
    AttributeId, ClusterId, ConcreteDataAttributePath, DataVersion, EndpointId, ListIndex,
    ListOperation,
};
pub use self::status::{StatusCode, StatusIB};
