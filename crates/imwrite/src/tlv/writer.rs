//! Bounded TLV writer with checkpoint/rollback
use super::constants::*;
use super::error::{TlvError, TlvResult};
use super::reader::Element;
use super::types::{ContainerType, ElementType, Tag};
use byteorder::{ByteOrder, LittleEndian};

/// Snapshot of a writer, taken before a tentative encode
///
/// Rolling back restores the byte length, the open-container stack and the
/// trailing reservation, so the writer is indistinguishable from one that
/// never attempted the encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterCheckpoint {
    len: usize,
    reserved: usize,
    containers: Vec<ContainerType>,
}

/// TLV writer bound to a single buffer of fixed maximum size
///
/// Every put is atomic: an element that does not fit in the remaining
/// capacity fails with [`TlvError::BufferTooSmall`] and writes nothing.
#[derive(Debug)]
pub struct TlvWriter {
    buf: Vec<u8>,
    max_len: usize,
    reserved: usize,
    containers: Vec<ContainerType>,
}

impl TlvWriter {
    /// Create a writer limited to `max_len` bytes, allocating the buffer up front
    pub fn with_capacity(max_len: usize) -> TlvResult<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(max_len)
            .map_err(|_| TlvError::NoMemory)?;

        Ok(Self {
            buf,
            max_len,
            reserved: 0,
            containers: Vec::new(),
        })
    }

    /// Create a writer without a size limit
    pub fn unbounded() -> Self {
        Self {
            buf: Vec::new(),
            max_len: usize::MAX,
            reserved: 0,
            containers: Vec::new(),
        }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Bytes that can still be written before hitting the reservation
    pub fn remaining(&self) -> usize {
        self.max_len
            .saturating_sub(self.reserved)
            .saturating_sub(self.buf.len())
    }

    /// Bytes currently held back at the end of the buffer
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Number of open containers
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Hold back `len` trailing bytes from subsequent writes
    pub fn reserve(&mut self, len: usize) -> TlvResult<()> {
        if len > self.remaining() {
            return Err(TlvError::BufferTooSmall);
        }
        self.reserved += len;
        Ok(())
    }

    /// Release `len` previously reserved bytes
    pub fn unreserve(&mut self, len: usize) -> TlvResult<()> {
        if len > self.reserved {
            return Err(TlvError::InvalidReservation(len));
        }
        self.reserved -= len;
        Ok(())
    }

    pub fn checkpoint(&self) -> WriterCheckpoint {
        WriterCheckpoint {
            len: self.buf.len(),
            reserved: self.reserved,
            containers: self.containers.clone(),
        }
    }

    pub fn rollback(&mut self, checkpoint: WriterCheckpoint) {
        self.buf.truncate(checkpoint.len);
        self.reserved = checkpoint.reserved;
        self.containers = checkpoint.containers;
    }

    /// Encode an unsigned integer using the smallest width that holds it
    pub fn put_u64(&mut self, tag: Tag, value: u64) -> TlvResult<()> {
        let mut scratch = [0u8; 8];
        let width = if value <= u8::MAX as u64 {
            scratch[0] = value as u8;
            1
        } else if value <= u16::MAX as u64 {
            LittleEndian::write_u16(&mut scratch, value as u16);
            2
        } else if value <= u32::MAX as u64 {
            LittleEndian::write_u32(&mut scratch, value as u32);
            4
        } else {
            LittleEndian::write_u64(&mut scratch, value);
            8
        };
        self.put_element(tag, ElementType::UnsignedInt(width), &[&scratch[..width as usize]])
    }

    /// Encode a signed integer using the smallest width that holds it
    pub fn put_i64(&mut self, tag: Tag, value: i64) -> TlvResult<()> {
        let mut scratch = [0u8; 8];
        let width = if i8::try_from(value).is_ok() {
            scratch[0] = value as i8 as u8;
            1
        } else if i16::try_from(value).is_ok() {
            LittleEndian::write_i16(&mut scratch, value as i16);
            2
        } else if i32::try_from(value).is_ok() {
            LittleEndian::write_i32(&mut scratch, value as i32);
            4
        } else {
            LittleEndian::write_i64(&mut scratch, value);
            8
        };
        self.put_element(tag, ElementType::SignedInt(width), &[&scratch[..width as usize]])
    }

    pub fn put_bool(&mut self, tag: Tag, value: bool) -> TlvResult<()> {
        self.put_element(tag, ElementType::Bool(value), &[])
    }

    pub fn put_null(&mut self, tag: Tag) -> TlvResult<()> {
        self.put_element(tag, ElementType::Null, &[])
    }

    pub fn put_str(&mut self, tag: Tag, value: &str) -> TlvResult<()> {
        let (width, prefix) = length_prefix(value.len());
        self.put_element(
            tag,
            ElementType::Utf8String(width),
            &[&prefix[..width as usize], value.as_bytes()],
        )
    }

    pub fn put_bytes(&mut self, tag: Tag, value: &[u8]) -> TlvResult<()> {
        let (width, prefix) = length_prefix(value.len());
        self.put_element(
            tag,
            ElementType::ByteString(width),
            &[&prefix[..width as usize], value],
        )
    }

    /// Flip a boolean already written at `offset`
    ///
    /// The element there must be a boolean carrying `tag`. Booleans keep
    /// their value in the control byte, so the encoded length never changes.
    pub fn overwrite_bool(&mut self, offset: usize, tag: Tag, value: bool) -> TlvResult<()> {
        let end = offset + 1 + tag.encoded_len();
        let encoded = self.buf.get(offset..end).ok_or(TlvError::Truncated)?;
        let is_bool = matches!(
            encoded[0] & TLV_TYPE_MASK,
            TLV_TYPE_BOOL_FALSE | TLV_TYPE_BOOL_TRUE
        );
        let same_tag = encoded[0] & TLV_TAG_CONTROL_MASK == tag.control()
            && match tag {
                Tag::Anonymous => true,
                Tag::Context(number) => encoded[1] == number,
            };
        if !is_bool || !same_tag {
            return Err(TlvError::WrongType);
        }
        self.buf[offset] = tag.control() | u8::from(ElementType::Bool(value));
        Ok(())
    }

    /// Open a container; it must be closed with [`TlvWriter::end_container`]
    pub fn start_container(&mut self, tag: Tag, container: ContainerType) -> TlvResult<()> {
        self.put_element(tag, container.element_type(), &[])?;
        self.containers.push(container);
        Ok(())
    }

    /// Close the innermost container, which must be of the given kind
    pub fn end_container(&mut self, container: ContainerType) -> TlvResult<()> {
        match self.containers.last() {
            None => return Err(TlvError::NoOpenContainer),
            Some(open) if *open != container => return Err(TlvError::ContainerMismatch),
            Some(_) => {}
        }
        self.put_raw(&[&[TLV_TYPE_END_OF_CONTAINER]])?;
        self.containers.pop();
        Ok(())
    }

    /// Copy an element verbatim, replacing its tag
    ///
    /// Containers are copied with all of their members and their closing
    /// marker.
    pub fn copy_element(&mut self, tag: Tag, element: &Element<'_>) -> TlvResult<()> {
        self.put_element(tag, element.element_type(), &[element.raw_value()])
    }

    /// Consume the writer and return the encoded bytes
    pub fn finish(self) -> TlvResult<Vec<u8>> {
        if !self.containers.is_empty() {
            return Err(TlvError::UnclosedContainer);
        }
        Ok(self.buf)
    }

    fn put_element(&mut self, tag: Tag, ty: ElementType, value: &[&[u8]]) -> TlvResult<()> {
        let control = [tag.control() | u8::from(ty)];
        match tag {
            Tag::Anonymous => {
                let mut parts = Vec::with_capacity(value.len() + 1);
                parts.push(&control[..]);
                parts.extend_from_slice(value);
                self.put_raw(&parts)
            }
            Tag::Context(number) => {
                let tag_byte = [number];
                let mut parts = Vec::with_capacity(value.len() + 2);
                parts.push(&control[..]);
                parts.push(&tag_byte[..]);
                parts.extend_from_slice(value);
                self.put_raw(&parts)
            }
        }
    }

    fn put_raw(&mut self, parts: &[&[u8]]) -> TlvResult<()> {
        let total: usize = parts.iter().map(|p| p.len()).sum();
        if total > self.remaining() {
            return Err(TlvError::BufferTooSmall);
        }
        for part in parts {
            self.buf.extend_from_slice(part);
        }
        Ok(())
    }
}

fn length_prefix(len: usize) -> (u8, [u8; 8]) {
    let mut prefix = [0u8; 8];
    let width = if len <= u8::MAX as usize {
        prefix[0] = len as u8;
        1
    } else if len <= u16::MAX as usize {
        LittleEndian::write_u16(&mut prefix, len as u16);
        2
    } else if len <= u32::MAX as usize {
        LittleEndian::write_u32(&mut prefix, len as u32);
        4
    } else {
        LittleEndian::write_u64(&mut prefix, len as u64);
        8
    };
    (width, prefix)
}
