//! Encoding of native values into TLV
use super::error::{TlvError, TlvResult};
use super::reader::{Element, TlvReader};
use super::types::{ContainerType, Tag};
use super::writer::TlvWriter;

/// Values that can be written as a single TLV element
pub trait Encode {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()>;
}

/// Octet string wrapper, since `[u8]` encodes as an array of integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octets<'a>(pub &'a [u8]);

macro_rules! impl_encode_unsigned {
    ($($ty:ty),*) => {
        $(impl Encode for $ty {
            fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
                writer.put_u64(tag, u64::from(*self))
            }
        })*
    };
}

macro_rules! impl_encode_signed {
    ($($ty:ty),*) => {
        $(impl Encode for $ty {
            fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
                writer.put_i64(tag, i64::from(*self))
            }
        })*
    };
}

impl_encode_unsigned!(u8, u16, u32, u64);
impl_encode_signed!(i8, i16, i32, i64);

impl Encode for bool {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.put_bool(tag, *self)
    }
}

impl Encode for str {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.put_str(tag, self)
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.put_str(tag, self)
    }
}

impl Encode for Octets<'_> {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.put_bytes(tag, self.0)
    }
}

/// `None` encodes as null
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        match self {
            Some(value) => value.encode(writer, tag),
            None => writer.put_null(tag),
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.start_container(tag, ContainerType::Array)?;
        for item in self {
            item.encode(writer, Tag::Anonymous)?;
        }
        writer.end_container(ContainerType::Array)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        self.as_slice().encode(writer, tag)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        (**self).encode(writer, tag)
    }
}

/// Already-encoded elements are copied verbatim under the new tag
impl Encode for Element<'_> {
    fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> TlvResult<()> {
        writer.copy_element(tag, self)
    }
}

/// Encode a value as one anonymous top-level element
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T) -> TlvResult<Vec<u8>> {
    let mut writer = TlvWriter::unbounded();
    value.encode(&mut writer, Tag::Anonymous)?;
    writer.finish()
}

/// Decode the single top-level element of an encoded value
pub fn first_element(buf: &[u8]) -> TlvResult<Element<'_>> {
    TlvReader::new(buf)
        .next_element()?
        .ok_or(TlvError::Truncated)
}
