//! TLV control byte constants

// Tag control field (upper three bits of the control byte)
pub const TLV_TAG_CONTROL_MASK: u8 = 0xE0;
pub const TLV_TAG_CONTROL_ANONYMOUS: u8 = 0x00;
pub const TLV_TAG_CONTROL_CONTEXT: u8 = 0x20;

// Element type field (lower five bits of the control byte)
pub const TLV_TYPE_MASK: u8 = 0x1F;
pub const TLV_TYPE_SIGNED_INT: u8 = 0x00; // 0x00..=0x03, width 1/2/4/8
pub const TLV_TYPE_UNSIGNED_INT: u8 = 0x04; // 0x04..=0x07
pub const TLV_TYPE_BOOL_FALSE: u8 = 0x08;
pub const TLV_TYPE_BOOL_TRUE: u8 = 0x09;
pub const TLV_TYPE_FLOAT32: u8 = 0x0A;
pub const TLV_TYPE_FLOAT64: u8 = 0x0B;
pub const TLV_TYPE_UTF8_STRING: u8 = 0x0C; // 0x0C..=0x0F, length prefix 1/2/4/8
pub const TLV_TYPE_BYTE_STRING: u8 = 0x10; // 0x10..=0x13
pub const TLV_TYPE_NULL: u8 = 0x14;
pub const TLV_TYPE_STRUCTURE: u8 = 0x15;
pub const TLV_TYPE_ARRAY: u8 = 0x16;
pub const TLV_TYPE_LIST: u8 = 0x17;
pub const TLV_TYPE_END_OF_CONTAINER: u8 = 0x18;

/// Size of an end-of-container marker
pub const TLV_END_OF_CONTAINER_LEN: usize = 1;

/// Maximum nesting depth accepted by the reader
pub const TLV_MAX_CONTAINER_DEPTH: usize = 32;
