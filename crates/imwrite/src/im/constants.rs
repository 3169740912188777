//! Interaction Model constants

// Interaction model message types
pub const IM_MSG_STATUS_RESPONSE: u8 = 0x01;
pub const IM_MSG_READ_REQUEST: u8 = 0x02;
pub const IM_MSG_SUBSCRIBE_REQUEST: u8 = 0x03;
pub const IM_MSG_SUBSCRIBE_RESPONSE: u8 = 0x04;
pub const IM_MSG_REPORT_DATA: u8 = 0x05;
pub const IM_MSG_WRITE_REQUEST: u8 = 0x06;
pub const IM_MSG_WRITE_RESPONSE: u8 = 0x07;
pub const IM_MSG_INVOKE_REQUEST: u8 = 0x08;
pub const IM_MSG_INVOKE_RESPONSE: u8 = 0x09;
pub const IM_MSG_TIMED_REQUEST: u8 = 0x0A;

// Interaction model revision, carried by every message
pub const INTERACTION_MODEL_REVISION: u8 = 12;
pub const IM_REVISION_TAG: u8 = 0xFF;

// WriteRequestMessage tags
pub const WRITE_REQUEST_SUPPRESS_RESPONSE_TAG: u8 = 0;
pub const WRITE_REQUEST_TIMED_REQUEST_TAG: u8 = 1;
pub const WRITE_REQUEST_WRITE_REQUESTS_TAG: u8 = 2;
pub const WRITE_REQUEST_MORE_CHUNKED_MESSAGES_TAG: u8 = 3;

// WriteResponseMessage tags
pub const WRITE_RESPONSE_WRITE_RESPONSES_TAG: u8 = 0;

// AttributeDataIB tags
pub const ATTRIBUTE_DATA_DATA_VERSION_TAG: u8 = 0;
pub const ATTRIBUTE_DATA_PATH_TAG: u8 = 1;
pub const ATTRIBUTE_DATA_DATA_TAG: u8 = 2;

// AttributePathIB tags
pub const ATTRIBUTE_PATH_ENABLE_TAG_COMPRESSION_TAG: u8 = 0;
pub const ATTRIBUTE_PATH_NODE_TAG: u8 = 1;
pub const ATTRIBUTE_PATH_ENDPOINT_TAG: u8 = 2;
pub const ATTRIBUTE_PATH_CLUSTER_TAG: u8 = 3;
pub const ATTRIBUTE_PATH_ATTRIBUTE_TAG: u8 = 4;
pub const ATTRIBUTE_PATH_LIST_INDEX_TAG: u8 = 5;

// AttributeStatusIB tags
pub const ATTRIBUTE_STATUS_PATH_TAG: u8 = 0;
pub const ATTRIBUTE_STATUS_ERROR_STATUS_TAG: u8 = 1;

// StatusIB tags
pub const STATUS_IB_STATUS_TAG: u8 = 0;
pub const STATUS_IB_CLUSTER_STATUS_TAG: u8 = 1;

// StatusResponseMessage tags
pub const STATUS_RESPONSE_STATUS_TAG: u8 = 0;

// TimedRequestMessage tags
pub const TIMED_REQUEST_TIMEOUT_TAG: u8 = 0;

// Interaction model status codes
pub const IM_STATUS_SUCCESS: u8 = 0x00;
pub const IM_STATUS_FAILURE: u8 = 0x01;
pub const IM_STATUS_INVALID_SUBSCRIPTION: u8 = 0x7D;
pub const IM_STATUS_UNSUPPORTED_ACCESS: u8 = 0x7E;
pub const IM_STATUS_UNSUPPORTED_ENDPOINT: u8 = 0x7F;
pub const IM_STATUS_INVALID_ACTION: u8 = 0x80;
pub const IM_STATUS_UNSUPPORTED_COMMAND: u8 = 0x81;
pub const IM_STATUS_INVALID_COMMAND: u8 = 0x85;
pub const IM_STATUS_UNSUPPORTED_ATTRIBUTE: u8 = 0x86;
pub const IM_STATUS_CONSTRAINT_ERROR: u8 = 0x87;
pub const IM_STATUS_UNSUPPORTED_WRITE: u8 = 0x88;
pub const IM_STATUS_RESOURCE_EXHAUSTED: u8 = 0x89;
pub const IM_STATUS_NOT_FOUND: u8 = 0x8B;
pub const IM_STATUS_UNREPORTABLE_ATTRIBUTE: u8 = 0x8C;
pub const IM_STATUS_INVALID_DATA_TYPE: u8 = 0x8D;
pub const IM_STATUS_UNSUPPORTED_READ: u8 = 0x8F;
pub const IM_STATUS_DATA_VERSION_MISMATCH: u8 = 0x92;
pub const IM_STATUS_TIMEOUT: u8 = 0x94;
pub const IM_STATUS_UNSUPPORTED_NODE: u8 = 0x9B;
pub const IM_STATUS_BUSY: u8 = 0x9C;
pub const IM_STATUS_ACCESS_RESTRICTED: u8 = 0x9D;
pub const IM_STATUS_UNSUPPORTED_CLUSTER: u8 = 0xC3;
pub const IM_STATUS_NO_UPSTREAM_SUBSCRIPTION: u8 = 0xC5;
pub const IM_STATUS_NEEDS_TIMED_INTERACTION: u8 = 0xC6;
pub const IM_STATUS_UNSUPPORTED_EVENT: u8 = 0xC7;
pub const IM_STATUS_PATHS_EXHAUSTED: u8 = 0xC8;
pub const IM_STATUS_TIMED_REQUEST_MISMATCH: u8 = 0xC9;
pub const IM_STATUS_FAILSAFE_REQUIRED: u8 = 0xCA;
pub const IM_STATUS_INVALID_IN_STATE: u8 = 0xCB;
pub const IM_STATUS_NO_COMMAND_RESPONSE: u8 = 0xCC;

// Access Control cluster
pub const ACCESS_CONTROL_CLUSTER_ID: u32 = 0x001F;
pub const ACCESS_CONTROL_ACL_ATTRIBUTE_ID: u32 = 0x0000;

// Message size limits
pub const MAX_SECURE_SDU_LENGTH: usize = 1194;
pub const AEAD_MIC_LENGTH: usize = 16;

// Space held back at the end of a chunk for its closing elements
pub const RESERVED_SIZE_FOR_END_OF_CONTAINER: usize = 1;
pub const RESERVED_SIZE_FOR_MORE_CHUNKS_FLAG: usize = 2; // control + tag, boolean has no value bytes
pub const RESERVED_SIZE_FOR_IM_REVISION: usize = 3; // control + tag + u8
pub const RESERVED_SIZE_FOR_TLV_ENCODING_OVERHEAD: usize = RESERVED_SIZE_FOR_IM_REVISION
    + RESERVED_SIZE_FOR_MORE_CHUNKS_FLAG
    + 2 * RESERVED_SIZE_FOR_END_OF_CONTAINER;
// End of the ReplaceAll array and of its AttributeDataIB
pub const RESERVED_SIZE_FOR_END_OF_LIST_ATTRIBUTE_IB: usize = 2 * RESERVED_SIZE_FOR_END_OF_CONTAINER;

/// Response timeout used when the caller does not provide one (ms)
pub const EXPECTED_IM_PROCESSING_TIME_MS: u64 = 2000;
