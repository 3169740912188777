//! Interaction model message payloads exchanged by the write client
use super::constants::*;
use super::path::ConcreteDataAttributePath;
use super::status::{StatusCode, StatusIB};
use crate::error::{WriteError, WriteResult};
use crate::tlv::{first_element, ContainerType, Element, ElementType, Tag, TlvWriter};

/// Interaction model message type (protocol opcode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    StatusResponse,
    ReadRequest,
    SubscribeRequest,
    SubscribeResponse,
    ReportData,
    WriteRequest,
    WriteResponse,
    InvokeRequest,
    InvokeResponse,
    TimedRequest,
    Unknown(u8),
}

impl From<u8> for MessageType {
    fn from(opcode: u8) -> Self {
        match opcode {
            IM_MSG_STATUS_RESPONSE => MessageType::StatusResponse,
            IM_MSG_READ_REQUEST => MessageType::ReadRequest,
            IM_MSG_SUBSCRIBE_REQUEST => MessageType::SubscribeRequest,
            IM_MSG_SUBSCRIBE_RESPONSE => MessageType::SubscribeResponse,
            IM_MSG_REPORT_DATA => MessageType::ReportData,
            IM_MSG_WRITE_REQUEST => MessageType::WriteRequest,
            IM_MSG_WRITE_RESPONSE => MessageType::WriteResponse,
            IM_MSG_INVOKE_REQUEST => MessageType::InvokeRequest,
            IM_MSG_INVOKE_RESPONSE => MessageType::InvokeResponse,
            IM_MSG_TIMED_REQUEST => MessageType::TimedRequest,
            _ => MessageType::Unknown(opcode),
        }
    }
}

impl From<MessageType> for u8 {
    fn from(msg_type: MessageType) -> u8 {
        match msg_type {
            MessageType::StatusResponse => IM_MSG_STATUS_RESPONSE,
            MessageType::ReadRequest => IM_MSG_READ_REQUEST,
            MessageType::SubscribeRequest => IM_MSG_SUBSCRIBE_REQUEST,
            MessageType::SubscribeResponse => IM_MSG_SUBSCRIBE_RESPONSE,
            MessageType::ReportData => IM_MSG_REPORT_DATA,
            MessageType::WriteRequest => IM_MSG_WRITE_REQUEST,
            MessageType::WriteResponse => IM_MSG_WRITE_RESPONSE,
            MessageType::InvokeRequest => IM_MSG_INVOKE_REQUEST,
            MessageType::InvokeResponse => IM_MSG_INVOKE_RESPONSE,
            MessageType::TimedRequest => IM_MSG_TIMED_REQUEST,
            MessageType::Unknown(opcode) => opcode,
        }
    }
}

/// Open the anonymous structure every message payload lives in
fn message_root<'a>(payload: &'a [u8], what: &'static str) -> WriteResult<Element<'a>> {
    let root = first_element(payload)?;
    if root.element_type() != ElementType::Structure {
        return Err(WriteError::MalformedMessage(what));
    }
    Ok(root)
}

fn put_im_revision(writer: &mut TlvWriter) -> WriteResult<()> {
    writer.put_u64(Tag::Context(IM_REVISION_TAG), INTERACTION_MODEL_REVISION.into())?;
    Ok(())
}

/// Encode a StatusResponseMessage
pub fn encode_status_response(status: StatusCode) -> WriteResult<Vec<u8>> {
    let mut writer = TlvWriter::unbounded();
    writer.start_container(Tag::Anonymous, ContainerType::Structure)?;
    writer.put_u64(Tag::Context(STATUS_RESPONSE_STATUS_TAG), u8::from(status).into())?;
    put_im_revision(&mut writer)?;
    writer.end_container(ContainerType::Structure)?;
    Ok(writer.finish()?)
}

/// Parse a StatusResponseMessage and return the carried status
pub fn parse_status_response(payload: &[u8]) -> WriteResult<StatusCode> {
    let root = message_root(payload, "StatusResponseMessage")?;
    let status = root
        .enter()?
        .find(Tag::Context(STATUS_RESPONSE_STATUS_TAG))?
        .ok_or(WriteError::MalformedMessage("StatusResponseMessage without status"))?;
    Ok(StatusCode::from(status.u8()?))
}

/// Encode a TimedRequestMessage opening a write window of `timeout_ms`
pub fn encode_timed_request(timeout_ms: u16) -> WriteResult<Vec<u8>> {
    let mut writer = TlvWriter::unbounded();
    writer.start_container(Tag::Anonymous, ContainerType::Structure)?;
    writer.put_u64(Tag::Context(TIMED_REQUEST_TIMEOUT_TAG), timeout_ms.into())?;
    put_im_revision(&mut writer)?;
    writer.end_container(ContainerType::Structure)?;
    Ok(writer.finish()?)
}

/// Parse a TimedRequestMessage and return its timeout (ms)
pub fn parse_timed_request(payload: &[u8]) -> WriteResult<u16> {
    let root = message_root(payload, "TimedRequestMessage")?;
    let timeout = root
        .enter()?
        .find(Tag::Context(TIMED_REQUEST_TIMEOUT_TAG))?
        .ok_or(WriteError::MalformedMessage("TimedRequestMessage without timeout"))?;
    Ok(timeout.u16()?)
}

/// Per-path status carried in a WriteResponseMessage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeStatusIB {
    pub path: ConcreteDataAttributePath,
    pub status: StatusIB,
}

impl AttributeStatusIB {
    pub fn new(path: ConcreteDataAttributePath, status: StatusIB) -> Self {
        Self { path, status }
    }

    /// Parse one AttributeStatusIB structure
    ///
    /// Both the path and the error status are required.
    pub fn parse(element: &Element<'_>) -> WriteResult<Self> {
        if element.element_type() != ElementType::Structure {
            return Err(WriteError::MalformedMessage("AttributeStatusIB is not a structure"));
        }

        let mut path = None;
        let mut status = None;
        let mut fields = element.enter()?;
        while let Some(field) = fields.next_element()? {
            match field.tag() {
                Tag::Context(ATTRIBUTE_STATUS_PATH_TAG) => {
                    path = Some(ConcreteDataAttributePath::decode_path_ib(&field)?)
                }
                Tag::Context(ATTRIBUTE_STATUS_ERROR_STATUS_TAG) => {
                    status = Some(StatusIB::parse(&field)?)
                }
                _ => {}
            }
        }

        let path = path.ok_or(WriteError::MalformedMessage("AttributeStatusIB without path"))?;
        let status =
            status.ok_or(WriteError::MalformedMessage("AttributeStatusIB without status"))?;
        Ok(Self { path, status })
    }

    pub fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> WriteResult<()> {
        writer.start_container(tag, ContainerType::Structure)?;
        self.path
            .encode_path_ib(writer, Tag::Context(ATTRIBUTE_STATUS_PATH_TAG))?;
        self.status
            .encode(writer, Tag::Context(ATTRIBUTE_STATUS_ERROR_STATUS_TAG))?;
        writer.end_container(ContainerType::Structure)?;
        Ok(())
    }
}

/// Encode a WriteResponseMessage
///
/// `None` leaves out the AttributeStatusIBs array entirely.
pub fn encode_write_response(statuses: Option<&[AttributeStatusIB]>) -> WriteResult<Vec<u8>> {
    let mut writer = TlvWriter::unbounded();
    writer.start_container(Tag::Anonymous, ContainerType::Structure)?;
    if let Some(statuses) = statuses {
        writer.start_container(
            Tag::Context(WRITE_RESPONSE_WRITE_RESPONSES_TAG),
            ContainerType::Array,
        )?;
        for status in statuses {
            status.encode(&mut writer, Tag::Anonymous)?;
        }
        writer.end_container(ContainerType::Array)?;
    }
    put_im_revision(&mut writer)?;
    writer.end_container(ContainerType::Structure)?;
    Ok(writer.finish()?)
}

/// Locate the AttributeStatusIBs array of a WriteResponseMessage, if present
pub fn write_response_statuses(payload: &[u8]) -> WriteResult<Option<Element<'_>>> {
    let root = message_root(payload, "WriteResponseMessage")?;
    let statuses = root
        .enter()?
        .find(Tag::Context(WRITE_RESPONSE_WRITE_RESPONSES_TAG))?;
    match statuses {
        Some(array) if array.element_type() != ElementType::Array => Err(
            WriteError::MalformedMessage("AttributeStatusIBs is not an array"),
        ),
        other => Ok(other),
    }
}
