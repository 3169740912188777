//! Type definitions for TLV elements
use super::constants::*;
use super::error::{TlvError, TlvResult};

/// Element tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// No tag (array members, top-level elements)
    Anonymous,
    /// Context-specific tag
    Context(u8),
}

impl Tag {
    /// Tag control bits for the control byte
    pub fn control(&self) -> u8 {
        match self {
            Tag::Anonymous => TLV_TAG_CONTROL_ANONYMOUS,
            Tag::Context(_) => TLV_TAG_CONTROL_CONTEXT,
        }
    }

    /// Number of tag bytes following the control byte
    pub fn encoded_len(&self) -> usize {
        match self {
            Tag::Anonymous => 0,
            Tag::Context(_) => 1,
        }
    }
}

/// Container kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerType {
    Structure,
    Array,
    List,
}

impl ContainerType {
    pub fn element_type(&self) -> ElementType {
        match self {
            ContainerType::Structure => ElementType::Structure,
            ContainerType::Array => ElementType::Array,
            ContainerType::List => ElementType::List,
        }
    }
}

/// Element type, decoded from the lower bits of the control byte
///
/// Integer variants carry the value width in bytes, string variants the width
/// of their length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    SignedInt(u8),
    UnsignedInt(u8),
    Bool(bool),
    Float32,
    Float64,
    Utf8String(u8),
    ByteString(u8),
    Null,
    Structure,
    Array,
    List,
    EndOfContainer,
}

fn width_from_index(index: u8) -> u8 {
    1 << index
}

fn index_from_width(width: u8) -> u8 {
    match width {
        1 => 0,
        2 => 1,
        4 => 2,
        _ => 3,
    }
}

impl TryFrom<u8> for ElementType {
    type Error = TlvError;

    fn try_from(control: u8) -> TlvResult<Self> {
        let ty = control & TLV_TYPE_MASK;
        match ty {
            0x00..=0x03 => Ok(ElementType::SignedInt(width_from_index(ty))),
            0x04..=0x07 => Ok(ElementType::UnsignedInt(width_from_index(ty - TLV_TYPE_UNSIGNED_INT))),
            TLV_TYPE_BOOL_FALSE => Ok(ElementType::Bool(false)),
            TLV_TYPE_BOOL_TRUE => Ok(ElementType::Bool(true)),
            TLV_TYPE_FLOAT32 => Ok(ElementType::Float32),
            TLV_TYPE_FLOAT64 => Ok(ElementType::Float64),
            0x0C..=0x0F => Ok(ElementType::Utf8String(width_from_index(ty - TLV_TYPE_UTF8_STRING))),
            0x10..=0x13 => Ok(ElementType::ByteString(width_from_index(ty - TLV_TYPE_BYTE_STRING))),
            TLV_TYPE_NULL => Ok(ElementType::Null),
            TLV_TYPE_STRUCTURE => Ok(ElementType::Structure),
            TLV_TYPE_ARRAY => Ok(ElementType::Array),
            TLV_TYPE_LIST => Ok(ElementType::List),
            TLV_TYPE_END_OF_CONTAINER => Ok(ElementType::EndOfContainer),
            _ => Err(TlvError::InvalidElementType(ty)),
        }
    }
}

impl From<ElementType> for u8 {
    fn from(ty: ElementType) -> u8 {
        match ty {
            ElementType::SignedInt(w) => TLV_TYPE_SIGNED_INT + index_from_width(w),
            ElementType::UnsignedInt(w) => TLV_TYPE_UNSIGNED_INT + index_from_width(w),
            ElementType::Bool(false) => TLV_TYPE_BOOL_FALSE,
            ElementType::Bool(true) => TLV_TYPE_BOOL_TRUE,
            ElementType::Float32 => TLV_TYPE_FLOAT32,
            ElementType::Float64 => TLV_TYPE_FLOAT64,
            ElementType::Utf8String(w) => TLV_TYPE_UTF8_STRING + index_from_width(w),
            ElementType::ByteString(w) => TLV_TYPE_BYTE_STRING + index_from_width(w),
            ElementType::Null => TLV_TYPE_NULL,
            ElementType::Structure => TLV_TYPE_STRUCTURE,
            ElementType::Array => TLV_TYPE_ARRAY,
            ElementType::List => TLV_TYPE_LIST,
            ElementType::EndOfContainer => TLV_TYPE_END_OF_CONTAINER,
        }
    }
}

impl ElementType {
    /// Check if this element opens a container
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementType::Structure | ElementType::Array | ElementType::List
        )
    }

    /// Container kind, if this element opens one
    pub fn container_type(&self) -> Option<ContainerType> {
        match self {
            ElementType::Structure => Some(ContainerType::Structure),
            ElementType::Array => Some(ContainerType::Array),
            ElementType::List => Some(ContainerType::List),
            _ => None,
        }
    }
}
