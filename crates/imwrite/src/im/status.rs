//! Interaction model status codes
use super::constants::*;
use crate::error::{WriteError, WriteResult};
use crate::tlv::{ContainerType, Element, Tag, TlvWriter};

/// Status codes as defined by the interaction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Success,
    Failure,
    InvalidSubscription,
    UnsupportedAccess,
    UnsupportedEndpoint,
    InvalidAction,
    UnsupportedCommand,
    InvalidCommand,
    UnsupportedAttribute,
    ConstraintError,
    UnsupportedWrite,
    ResourceExhausted,
    NotFound,
    UnreportableAttribute,
    InvalidDataType,
    UnsupportedRead,
    DataVersionMismatch,
    Timeout,
    UnsupportedNode,
    Busy,
    AccessRestricted,
    UnsupportedCluster,
    NoUpstreamSubscription,
    NeedsTimedInteraction,
    UnsupportedEvent,
    PathsExhausted,
    TimedRequestMismatch,
    FailsafeRequired,
    InvalidInState,
    NoCommandResponse,
    /// Unknown status code
    Unknown(u8),
}

impl From<u8> for StatusCode {
    fn from(code: u8) -> Self {
        match code {
            IM_STATUS_SUCCESS => StatusCode::Success,
            IM_STATUS_FAILURE => StatusCode::Failure,
            IM_STATUS_INVALID_SUBSCRIPTION => StatusCode::InvalidSubscription,
            IM_STATUS_UNSUPPORTED_ACCESS => StatusCode::UnsupportedAccess,
            IM_STATUS_UNSUPPORTED_ENDPOINT => StatusCode::UnsupportedEndpoint,
            IM_STATUS_INVALID_ACTION => StatusCode::InvalidAction,
            IM_STATUS_UNSUPPORTED_COMMAND => StatusCode::UnsupportedCommand,
            IM_STATUS_INVALID_COMMAND => StatusCode::InvalidCommand,
            IM_STATUS_UNSUPPORTED_ATTRIBUTE => StatusCode::UnsupportedAttribute,
            IM_STATUS_CONSTRAINT_ERROR => StatusCode::ConstraintError,
            IM_STATUS_UNSUPPORTED_WRITE => StatusCode::UnsupportedWrite,
            IM_STATUS_RESOURCE_EXHAUSTED => StatusCode::ResourceExhausted,
            IM_STATUS_NOT_FOUND => StatusCode::NotFound,
            IM_STATUS_UNREPORTABLE_ATTRIBUTE => StatusCode::UnreportableAttribute,
            IM_STATUS_INVALID_DATA_TYPE => StatusCode::InvalidDataType,
            IM_STATUS_UNSUPPORTED_READ => StatusCode::UnsupportedRead,
            IM_STATUS_DATA_VERSION_MISMATCH => StatusCode::DataVersionMismatch,
            IM_STATUS_TIMEOUT => StatusCode::Timeout,
            IM_STATUS_UNSUPPORTED_NODE => StatusCode::UnsupportedNode,
            IM_STATUS_BUSY => StatusCode::Busy,
            IM_STATUS_ACCESS_RESTRICTED => StatusCode::AccessRestricted,
            IM_STATUS_UNSUPPORTED_CLUSTER => StatusCode::UnsupportedCluster,
            IM_STATUS_NO_UPSTREAM_SUBSCRIPTION => StatusCode::NoUpstreamSubscription,
            IM_STATUS_NEEDS_TIMED_INTERACTION => StatusCode::NeedsTimedInteraction,
            IM_STATUS_UNSUPPORTED_EVENT => StatusCode::UnsupportedEvent,
            IM_STATUS_PATHS_EXHAUSTED => StatusCode::PathsExhausted,
            IM_STATUS_TIMED_REQUEST_MISMATCH => StatusCode::TimedRequestMismatch,
            IM_STATUS_FAILSAFE_REQUIRED => StatusCode::FailsafeRequired,
            IM_STATUS_INVALID_IN_STATE => StatusCode::InvalidInState,
            IM_STATUS_NO_COMMAND_RESPONSE => StatusCode::NoCommandResponse,
            _ => StatusCode::Unknown(code),
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> u8 {
        match status {
            StatusCode::Success => IM_STATUS_SUCCESS,
            StatusCode::Failure => IM_STATUS_FAILURE,
            StatusCode::InvalidSubscription => IM_STATUS_INVALID_SUBSCRIPTION,
            StatusCode::UnsupportedAccess => IM_STATUS_UNSUPPORTED_ACCESS,
            StatusCode::UnsupportedEndpoint => IM_STATUS_UNSUPPORTED_ENDPOINT,
            StatusCode::InvalidAction => IM_STATUS_INVALID_ACTION,
            StatusCode::UnsupportedCommand => IM_STATUS_UNSUPPORTED_COMMAND,
            StatusCode::InvalidCommand => IM_STATUS_INVALID_COMMAND,
            StatusCode::UnsupportedAttribute => IM_STATUS_UNSUPPORTED_ATTRIBUTE,
            StatusCode::ConstraintError => IM_STATUS_CONSTRAINT_ERROR,
            StatusCode::UnsupportedWrite => IM_STATUS_UNSUPPORTED_WRITE,
            StatusCode::ResourceExhausted => IM_STATUS_RESOURCE_EXHAUSTED,
            StatusCode::NotFound => IM_STATUS_NOT_FOUND,
            StatusCode::UnreportableAttribute => IM_STATUS_UNREPORTABLE_ATTRIBUTE,
            StatusCode::InvalidDataType => IM_STATUS_INVALID_DATA_TYPE,
            StatusCode::UnsupportedRead => IM_STATUS_UNSUPPORTED_READ,
            StatusCode::DataVersionMismatch => IM_STATUS_DATA_VERSION_MISMATCH,
            StatusCode::Timeout => IM_STATUS_TIMEOUT,
            StatusCode::UnsupportedNode => IM_STATUS_UNSUPPORTED_NODE,
            StatusCode::Busy => IM_STATUS_BUSY,
            StatusCode::AccessRestricted => IM_STATUS_ACCESS_RESTRICTED,
            StatusCode::UnsupportedCluster => IM_STATUS_UNSUPPORTED_CLUSTER,
            StatusCode::NoUpstreamSubscription => IM_STATUS_NO_UPSTREAM_SUBSCRIPTION,
            StatusCode::NeedsTimedInteraction => IM_STATUS_NEEDS_TIMED_INTERACTION,
            StatusCode::UnsupportedEvent => IM_STATUS_UNSUPPORTED_EVENT,
            StatusCode::PathsExhausted => IM_STATUS_PATHS_EXHAUSTED,
            StatusCode::TimedRequestMismatch => IM_STATUS_TIMED_REQUEST_MISMATCH,
            StatusCode::FailsafeRequired => IM_STATUS_FAILSAFE_REQUIRED,
            StatusCode::InvalidInState => IM_STATUS_INVALID_IN_STATE,
            StatusCode::NoCommandResponse => IM_STATUS_NO_COMMAND_RESPONSE,
            StatusCode::Unknown(code) => code,
        }
    }
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        *self == StatusCode::Success
    }
}

/// Status of a single path: interaction model status plus optional cluster status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIB {
    pub status: StatusCode,
    pub cluster_status: Option<u8>,
}

impl StatusIB {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            cluster_status: None,
        }
    }

    pub fn with_cluster_status(status: StatusCode, cluster_status: u8) -> Self {
        Self {
            status,
            cluster_status: Some(cluster_status),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse a StatusIB structure
    pub fn parse(element: &Element<'_>) -> WriteResult<Self> {
        let mut fields = element.enter()?;
        let mut status = None;
        let mut cluster_status = None;

        while let Some(field) = fields.next_element()? {
            match field.tag() {
                Tag::Context(STATUS_IB_STATUS_TAG) => status = Some(StatusCode::from(field.u8()?)),
                Tag::Context(STATUS_IB_CLUSTER_STATUS_TAG) => cluster_status = Some(field.u8()?),
                _ => {}
            }
        }

        let status = status.ok_or(WriteError::MalformedMessage("StatusIB without status"))?;
        Ok(Self {
            status,
            cluster_status,
        })
    }

    pub fn encode(&self, writer: &mut TlvWriter, tag: Tag) -> WriteResult<()> {
        writer.start_container(tag, ContainerType::Structure)?;
        writer.put_u64(Tag::Context(STATUS_IB_STATUS_TAG), u8::from(self.status).into())?;
        if let Some(cluster_status) = self.cluster_status {
            writer.put_u64(Tag::Context(STATUS_IB_CLUSTER_STATUS_TAG), cluster_status.into())?;
        }
        writer.end_container(ContainerType::Structure)?;
        Ok(())
    }
}
