//! Tag-length-value encoding
//!
//! This module provides the subset of the interaction-model TLV format the
//! write engine needs: a bounded writer that can reserve trailing space and
//! roll back tentative encodes, and a borrowing reader used to copy
//! pre-encoded values and to parse responses.

pub mod constants;
pub mod encode;
pub mod error;
pub mod reader;
pub mod types;
pub mod writer;


pub use self::encode::{encode_to_vec, first_element, Encode, Octets};
pub use self::error::{TlvError, TlvResult};
pub use self::reader::{Element, TlvReader};
pub use self::types::{ContainerType, ElementType, Tag};
pub use self::writer::{TlvWriter, WriterCheckpoint};
