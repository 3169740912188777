//! Attribute paths
use super::constants::*;
use crate::error::{WriteError, WriteResult};
use crate::tlv::{ContainerType, Element, ElementType, Tag, TlvWriter};
use std::fmt;

pub type EndpointId = u16;
pub type ClusterId = u32;
pub type AttributeId = u32;
pub type DataVersion = u32;
pub type ListIndex = u16;

/// How a write addresses a list attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOperation {
    /// Not a list operation
    #[default]
    NotList,
    /// Clear the list and set it to the written items
    ReplaceAll,
    /// Replace the item at the index
    ReplaceItem(ListIndex),
    /// Delete the item at the index
    DeleteItem(ListIndex),
    /// Append one item
    AppendItem,
}

/// Concrete path of an attribute being written, plus write qualifiers
///
/// An endpoint of `None` addresses every endpoint of a group and is only
/// valid for group writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcreteDataAttributePath {
    pub endpoint: Option<EndpointId>,
    pub cluster: ClusterId,
    pub attribute: AttributeId,
    pub data_version: Option<DataVersion>,
    pub list_op: ListOperation,
}

impl ConcreteDataAttributePath {
    pub fn new(endpoint: EndpointId, cluster: ClusterId, attribute: AttributeId) -> Self {
        Self {
            endpoint: Some(endpoint),
            cluster,
            attribute,
            data_version: None,
            list_op: ListOperation::NotList,
        }
    }

    /// Path for a group write (no endpoint)
    pub fn group(cluster: ClusterId, attribute: AttributeId) -> Self {
        Self {
            endpoint: None,
            cluster,
            attribute,
            data_version: None,
            list_op: ListOperation::NotList,
        }
    }

    pub fn with_data_version(mut self, data_version: DataVersion) -> Self {
        self.data_version = Some(data_version);
        self
    }

    pub fn with_list_op(mut self, list_op: ListOperation) -> Self {
        self.list_op = list_op;
        self
    }

    pub fn is_group(&self) -> bool {
        self.endpoint.is_none()
    }

    pub fn is_list_operation(&self) -> bool {
        self.list_op != ListOperation::NotList
    }

    /// Check if the path addresses a single list item
    pub fn is_list_item_operation(&self) -> bool {
        matches!(
            self.list_op,
            ListOperation::ReplaceItem(_) | ListOperation::DeleteItem(_) | ListOperation::AppendItem
        )
    }

    /// Check if the path belongs to the Access Control cluster
    ///
    /// Whole-list writes to any of its attributes use the packed ReplaceAll
    /// encoding.
    pub fn is_access_control_cluster(&self) -> bool {
        self.cluster == ACCESS_CONTROL_CLUSTER_ID
    }

    /// Check that the path can be encoded as written
    ///
    /// Group writes cannot be conditioned on a data version, and only append
    /// is supported among the item operations.
    pub fn validate(&self) -> WriteResult<()> {
        if self.is_group() && self.data_version.is_some() {
            return Err(WriteError::GroupDataVersion);
        }
        if matches!(
            self.list_op,
            ListOperation::ReplaceItem(_) | ListOperation::DeleteItem(_)
        ) {
            return Err(WriteError::UnsupportedListOperation);
        }
        Ok(())
    }

    /// Encode as an AttributePathIB list
    pub fn encode_path_ib(&self, writer: &mut TlvWriter, tag: Tag) -> WriteResult<()> {
        // Only append is encodable among the item operations
        if matches!(
            self.list_op,
            ListOperation::ReplaceItem(_) | ListOperation::DeleteItem(_)
        ) {
            return Err(WriteError::UnsupportedListOperation);
        }

        writer.start_container(tag, ContainerType::List)?;
        if let Some(endpoint) = self.endpoint {
            writer.put_u64(Tag::Context(ATTRIBUTE_PATH_ENDPOINT_TAG), endpoint.into())?;
        }
        writer.put_u64(Tag::Context(ATTRIBUTE_PATH_CLUSTER_TAG), self.cluster.into())?;
        writer.put_u64(Tag::Context(ATTRIBUTE_PATH_ATTRIBUTE_TAG), self.attribute.into())?;
        if self.list_op == ListOperation::AppendItem {
            writer.put_null(Tag::Context(ATTRIBUTE_PATH_LIST_INDEX_TAG))?;
        }
        writer.end_container(ContainerType::List)?;
        Ok(())
    }

    /// Decode a concrete path from an AttributePathIB list
    pub fn decode_path_ib(element: &Element<'_>) -> WriteResult<Self> {
        if element.element_type() != ElementType::List {
            return Err(WriteError::MalformedMessage("AttributePathIB is not a list"));
        }

        let mut fields = element.enter()?;
        let mut endpoint = None;
        let mut cluster = None;
        let mut attribute = None;
        let mut list_op = ListOperation::NotList;

        while let Some(field) = fields.next_element()? {
            match field.tag() {
                Tag::Context(ATTRIBUTE_PATH_ENDPOINT_TAG) => endpoint = Some(field.u16()?),
                Tag::Context(ATTRIBUTE_PATH_CLUSTER_TAG) => cluster = Some(field.u32()?),
                Tag::Context(ATTRIBUTE_PATH_ATTRIBUTE_TAG) => attribute = Some(field.u32()?),
                Tag::Context(ATTRIBUTE_PATH_LIST_INDEX_TAG) => {
                    list_op = if field.is_null() {
                        ListOperation::AppendItem
                    } else {
                        ListOperation::ReplaceItem(field.u16()?)
                    };
                }
                // Tag compression, node id and wildcard flags carry nothing for a concrete path
                _ => {}
            }
        }

        match (endpoint, cluster, attribute) {
            (Some(endpoint), Some(cluster), Some(attribute)) => Ok(Self {
                endpoint: Some(endpoint),
                cluster,
                attribute,
                data_version: None,
                list_op,
            }),
            _ => Err(WriteError::MalformedMessage("AttributePathIB is not concrete")),
        }
    }
}

impl fmt::Display for ConcreteDataAttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.endpoint {
            Some(endpoint) => write!(f, "{}", endpoint)?,
            None => write!(f, "*")?,
        }
        write!(f, "/0x{:08X}/0x{:08X}", self.cluster, self.attribute)?;
        if self.list_op == ListOperation::AppendItem {
            write!(f, "[+]")?;
        }
        Ok(())
    }
}
