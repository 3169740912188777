//! Chunked attribute writes
//!
//! This module implements the client side of the write interaction: the
//! chunk buffers, the AttributeDataIB encoder with its list strategy, the
//! WriteResponse processor and the session state machine tying them to an
//! [`crate::exchange::Exchange`].

pub mod chunk;
pub mod client;
pub mod encoder;
pub mod response;


pub use self::chunk::{ChunkBuilder, ChunkConfig};
pub use self::client::{WriteCallback, WriteClient, WriteClientConfig, WriteState};
pub use self::encoder::{ListEncodingOverride, WriteEncoder};
pub use self::response::process_write_response;
