//! TLV reader
use super::constants::*;
use super::error::{TlvError, TlvResult};
use super::types::{ElementType, Tag};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// A decoded element borrowed from the underlying buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    tag: Tag,
    element_type: ElementType,
    /// Bytes after the control byte and tag; for containers this includes
    /// every member and the end-of-container marker
    value: &'a [u8],
}

impl<'a> Element<'a> {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn raw_value(&self) -> &'a [u8] {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.element_type == ElementType::Null
    }

    pub fn is_array(&self) -> bool {
        self.element_type == ElementType::Array
    }

    pub fn u64(&self) -> TlvResult<u64> {
        let mut cursor = Cursor::new(self.value);
        let value = match self.element_type {
            ElementType::UnsignedInt(1) => cursor.read_u8().map(u64::from),
            ElementType::UnsignedInt(2) => cursor.read_u16::<LittleEndian>().map(u64::from),
            ElementType::UnsignedInt(4) => cursor.read_u32::<LittleEndian>().map(u64::from),
            ElementType::UnsignedInt(_) => cursor.read_u64::<LittleEndian>(),
            _ => return Err(TlvError::WrongType),
        };
        value.map_err(|_| TlvError::Truncated)
    }

    pub fn i64(&self) -> TlvResult<i64> {
        let mut cursor = Cursor::new(self.value);
        let value = match self.element_type {
            ElementType::SignedInt(1) => cursor.read_i8().map(i64::from),
            ElementType::SignedInt(2) => cursor.read_i16::<LittleEndian>().map(i64::from),
            ElementType::SignedInt(4) => cursor.read_i32::<LittleEndian>().map(i64::from),
            ElementType::SignedInt(_) => cursor.read_i64::<LittleEndian>(),
            _ => return Err(TlvError::WrongType),
        };
        value.map_err(|_| TlvError::Truncated)
    }

    pub fn u8(&self) -> TlvResult<u8> {
        u8::try_from(self.u64()?).map_err(|_| TlvError::OutOfRange)
    }

    pub fn u16(&self) -> TlvResult<u16> {
        u16::try_from(self.u64()?).map_err(|_| TlvError::OutOfRange)
    }

    pub fn u32(&self) -> TlvResult<u32> {
        u32::try_from(self.u64()?).map_err(|_| TlvError::OutOfRange)
    }

    pub fn bool(&self) -> TlvResult<bool> {
        match self.element_type {
            ElementType::Bool(value) => Ok(value),
            _ => Err(TlvError::WrongType),
        }
    }

    pub fn bytes(&self) -> TlvResult<&'a [u8]> {
        match self.element_type {
            ElementType::ByteString(width) => string_payload(self.value, width),
            _ => Err(TlvError::WrongType),
        }
    }

    pub fn str(&self) -> TlvResult<&'a str> {
        match self.element_type {
            ElementType::Utf8String(width) => {
                let payload = string_payload(self.value, width)?;
                std::str::from_utf8(payload).map_err(|_| TlvError::InvalidUtf8)
            }
            _ => Err(TlvError::WrongType),
        }
    }

    /// Open a reader over the members of this container
    pub fn enter(&self) -> TlvResult<TlvReader<'a>> {
        if !self.element_type.is_container() {
            return Err(TlvError::WrongType);
        }
        Ok(TlvReader {
            buf: self.value,
            pos: 0,
            in_container: true,
            exhausted: false,
        })
    }
}

/// Sequential reader over the elements of a buffer or of one container
#[derive(Debug, Clone)]
pub struct TlvReader<'a> {
    buf: &'a [u8],
    pos: usize,
    in_container: bool,
    exhausted: bool,
}

impl<'a> TlvReader<'a> {
    /// Create a reader over top-level elements
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            in_container: false,
            exhausted: false,
        }
    }

    /// Decode the next element
    ///
    /// Returns `Ok(None)` at the end of the buffer or of the container. A
    /// container whose closing marker is missing is an error, not an end.
    pub fn next_element(&mut self) -> TlvResult<Option<Element<'a>>> {
        if self.exhausted {
            return Ok(None);
        }

        if self.pos >= self.buf.len() {
            if self.in_container {
                return Err(TlvError::UnterminatedContainer);
            }
            self.exhausted = true;
            return Ok(None);
        }

        let control = self.buf[self.pos];
        if control & TLV_TYPE_MASK == TLV_TYPE_END_OF_CONTAINER {
            if !self.in_container || control & TLV_TAG_CONTROL_MASK != TLV_TAG_CONTROL_ANONYMOUS {
                return Err(TlvError::InvalidElementType(control));
            }
            self.pos += 1;
            self.exhausted = true;
            return Ok(None);
        }

        let (element, end) = parse_element(self.buf, self.pos, 0)?;
        self.pos = end;
        Ok(Some(element))
    }

    /// Advance to the first remaining element carrying `tag`
    pub fn find(&mut self, tag: Tag) -> TlvResult<Option<Element<'a>>> {
        while let Some(element) = self.next_element()? {
            if element.tag() == tag {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }
}

/// Decode the element starting at `start`, returning it and the offset just past it
fn parse_element(buf: &[u8], start: usize, depth: usize) -> TlvResult<(Element<'_>, usize)> {
    let control = *buf.get(start).ok_or(TlvError::Truncated)?;
    let element_type = ElementType::try_from(control)?;
    if element_type == ElementType::EndOfContainer {
        return Err(TlvError::InvalidElementType(control));
    }

    let (tag, value_start) = match control & TLV_TAG_CONTROL_MASK {
        TLV_TAG_CONTROL_ANONYMOUS => (Tag::Anonymous, start + 1),
        TLV_TAG_CONTROL_CONTEXT => {
            let number = *buf.get(start + 1).ok_or(TlvError::Truncated)?;
            (Tag::Context(number), start + 2)
        }
        other => return Err(TlvError::InvalidTag(other)),
    };

    let value_end = value_end(buf, value_start, element_type, depth)?;
    let element = Element {
        tag,
        element_type,
        value: &buf[value_start..value_end],
    };
    Ok((element, value_end))
}

fn value_end(buf: &[u8], start: usize, element_type: ElementType, depth: usize) -> TlvResult<usize> {
    let fixed = |len: usize| -> TlvResult<usize> {
        start
            .checked_add(len)
            .filter(|end| *end <= buf.len())
            .ok_or(TlvError::Truncated)
    };

    match element_type {
        ElementType::SignedInt(width) | ElementType::UnsignedInt(width) => fixed(width as usize),
        ElementType::Bool(_) | ElementType::Null => Ok(start),
        ElementType::Float32 => fixed(4),
        ElementType::Float64 => fixed(8),
        ElementType::Utf8String(width) | ElementType::ByteString(width) => {
            let len = read_length(&buf[start.min(buf.len())..], width)?;
            fixed(len.checked_add(width as usize).ok_or(TlvError::Truncated)?)
        }
        ElementType::Structure | ElementType::Array | ElementType::List => {
            if depth >= TLV_MAX_CONTAINER_DEPTH {
                return Err(TlvError::TooDeep);
            }
            let mut pos = start;
            loop {
                let control = *buf.get(pos).ok_or(TlvError::UnterminatedContainer)?;
                if control == TLV_TYPE_END_OF_CONTAINER {
                    return Ok(pos + TLV_END_OF_CONTAINER_LEN);
                }
                let (_, next) = parse_element(buf, pos, depth + 1)?;
                pos = next;
            }
        }
        ElementType::EndOfContainer => Err(TlvError::InvalidElementType(TLV_TYPE_END_OF_CONTAINER)),
    }
}

fn read_length(buf: &[u8], width: u8) -> TlvResult<usize> {
    let mut cursor = Cursor::new(buf);
    let len = match width {
        1 => cursor.read_u8().map(u64::from),
        2 => cursor.read_u16::<LittleEndian>().map(u64::from),
        4 => cursor.read_u32::<LittleEndian>().map(u64::from),
        _ => cursor.read_u64::<LittleEndian>(),
    }
    .map_err(|_| TlvError::Truncated)?;
    usize::try_from(len).map_err(|_| TlvError::Truncated)
}

fn string_payload(value: &[u8], width: u8) -> TlvResult<&[u8]> {
    let len = read_length(value, width)?;
    let end = len.checked_add(width as usize).ok_or(TlvError::Truncated)?;
    value.get(width as usize..end).ok_or(TlvError::Truncated)
}
