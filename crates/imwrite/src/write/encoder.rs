//! AttributeDataIB encoding with chunk rollover
//!
//! Every attribute is encoded tentatively against a writer checkpoint. When
//! the open chunk runs out of room the partial bytes are rolled back and the
//! attribute is retried once in a fresh chunk. Whole-list writes are split
//! into a ReplaceAll element followed by AppendItem elements so a long list
//! can span several chunks.
use super::chunk::{ChunkBuilder, ChunkConfig};
use crate::error::{WriteError, WriteResult};
use crate::im::constants::*;
use crate::im::path::{ConcreteDataAttributePath, ListOperation};
use crate::tlv::{ContainerType, Element, Tag, TlvResult, TlvWriter};
use log::{debug, trace};

/// How a whole-list write of the Access Control List is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListEncodingOverride {
    /// Pack leading entries into a ReplaceAll element, append the rest
    #[default]
    Default,
    /// Empty ReplaceAll then one AppendItem per entry, as for any other list
    ForceLegacy,
}

/// Encodes attributes into a sequence of chunks
#[derive(Debug)]
pub struct WriteEncoder {
    chunks: ChunkBuilder,
    has_data_version: bool,
}

impl WriteEncoder {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            chunks: ChunkBuilder::new(config),
            has_data_version: false,
        }
    }

    pub fn chunks(&self) -> &ChunkBuilder {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut ChunkBuilder {
        &mut self.chunks
    }

    /// Check if any committed attribute carries a data version
    pub fn has_data_version(&self) -> bool {
        self.has_data_version
    }

    /// Encode a pre-encoded value for `path`
    ///
    /// An array written to a path without a list operation replaces the
    /// whole list. An invalid path is rejected before any chunk is touched;
    /// any later error may leave part of a list committed.
    pub fn put_preencoded(
        &mut self,
        path: &ConcreteDataAttributePath,
        value: &Element<'_>,
        list_override: ListEncodingOverride,
    ) -> WriteResult<()> {
        path.validate()?;
        self.chunks.ensure_chunk()?;

        if path.is_list_operation() || !value.is_array() {
            return self.put_single(path, |writer, tag| writer.copy_element(tag, value));
        }

        let replace_all = path.with_list_op(ListOperation::ReplaceAll);
        let packed = if path.is_access_control_cluster() && list_override == ListEncodingOverride::Default {
            if value.enter()?.next_element()?.is_none() {
                debug!("Skipping empty Access Control list write to {}", path);
                return Ok(());
            }
            let (packed, complete) = self.put_packed_list(&replace_all, value)?;
            if complete {
                return Ok(());
            }
            self.chunks.start_new_chunk()?;
            packed
        } else {
            self.put_single(&replace_all, |writer, tag| {
                writer.start_container(tag, ContainerType::Array)?;
                writer.end_container(ContainerType::Array)
            })?;
            0
        };

        let append = path.with_list_op(ListOperation::AppendItem);
        let mut items = value.enter()?;
        let mut index = 0;
        let mut appended = 0;
        while let Some(item) = items.next_element()? {
            index += 1;
            if index <= packed {
                continue;
            }
            self.put_single(&append, |writer, tag| writer.copy_element(tag, &item))?;
            appended += 1;
        }
        trace!("Appended {} list items to {}", appended, path);
        Ok(())
    }

    /// Encode one AttributeDataIB, moving to a fresh chunk if it does not fit
    pub fn put_single<F>(&mut self, path: &ConcreteDataAttributePath, encode_data: F) -> WriteResult<()>
    where
        F: Fn(&mut TlvWriter, Tag) -> TlvResult<()>,
    {
        let checkpoint = self.chunks.ensure_chunk()?.checkpoint();
        match self.try_put_single(path, &encode_data) {
            Ok(()) => return Ok(()),
            Err(err) if err.is_no_space() => self.chunks.writer()?.rollback(checkpoint),
            Err(err) => {
                self.chunks.writer()?.rollback(checkpoint);
                return Err(err);
            }
        }

        trace!("Chunk full, moving {} to a new chunk", path);
        self.chunks.start_new_chunk()?;
        let checkpoint = self.chunks.writer()?.checkpoint();
        self.try_put_single(path, &encode_data).map_err(|err| {
            if let Ok(writer) = self.chunks.writer() {
                writer.rollback(checkpoint);
            }
            if err.is_no_space() {
                WriteError::ElementTooLarge
            } else {
                err
            }
        })
    }

    fn try_put_single<F>(&mut self, path: &ConcreteDataAttributePath, encode_data: &F) -> WriteResult<()>
    where
        F: Fn(&mut TlvWriter, Tag) -> TlvResult<()>,
    {
        self.prepare_attribute_ib(path)?;
        encode_data(self.chunks.writer()?, Tag::Context(ATTRIBUTE_DATA_DATA_TAG))?;
        self.finish_attribute_ib(path)
    }

    /// Open an AttributeDataIB and encode its data version and path
    pub fn prepare_attribute_ib(&mut self, path: &ConcreteDataAttributePath) -> WriteResult<()> {
        let writer = self.chunks.writer()?;
        writer.start_container(Tag::Anonymous, ContainerType::Structure)?;
        if let Some(data_version) = path.data_version {
            writer.put_u64(Tag::Context(ATTRIBUTE_DATA_DATA_VERSION_TAG), data_version.into())?;
        }
        path.encode_path_ib(writer, Tag::Context(ATTRIBUTE_DATA_PATH_TAG))
    }

    /// Close the open AttributeDataIB and commit it to the chunk
    pub fn finish_attribute_ib(&mut self, path: &ConcreteDataAttributePath) -> WriteResult<()> {
        self.chunks.writer()?.end_container(ContainerType::Structure)?;
        self.chunks.commit_attribute();
        self.has_data_version |= path.data_version.is_some();
        Ok(())
    }

    /// Encode a ReplaceAll element holding as many leading items as fit
    ///
    /// Returns the number of items packed and whether that was all of them.
    /// At least one item is always packed, so the ReplaceAll never clears the
    /// list on its own.
    fn put_packed_list(
        &mut self,
        path: &ConcreteDataAttributePath,
        value: &Element<'_>,
    ) -> WriteResult<(usize, bool)> {
        let queued = self.chunks.queued();
        let checkpoint = self.chunks.writer()?.checkpoint();
        self.ensure_list_started(path)?;
        let (packed, complete) = self.pack_items(value)?;
        if packed > 0 {
            self.ensure_list_ended(path)?;
            return Ok((packed, complete));
        }

        // The list opened in an empty chunk and still no item fits
        if self.chunks.committed() == 0 || self.chunks.queued() != queued {
            return Err(WriteError::ElementTooLarge);
        }

        // Not even the first item fits behind what the chunk already holds
        self.chunks.writer()?.rollback(checkpoint);
        self.chunks.start_new_chunk()?;
        self.ensure_list_started(path)?;
        let (packed, complete) = self.pack_items(value)?;
        if packed == 0 {
            return Err(WriteError::ElementTooLarge);
        }
        self.ensure_list_ended(path)?;
        Ok((packed, complete))
    }

    fn pack_items(&mut self, value: &Element<'_>) -> WriteResult<(usize, bool)> {
        let writer = self.chunks.writer()?;
        let mut items = value.enter()?;
        let mut packed = 0;
        while let Some(item) = items.next_element()? {
            let checkpoint = writer.checkpoint();
            match writer.copy_element(Tag::Anonymous, &item) {
                Ok(()) => packed += 1,
                Err(err) => {
                    writer.rollback(checkpoint);
                    let err = WriteError::from(err);
                    if err.is_no_space() {
                        return Ok((packed, false));
                    }
                    return Err(err);
                }
            }
        }
        Ok((packed, true))
    }

    /// Open a ReplaceAll AttributeDataIB and its data array, moving to a
    /// fresh chunk if the opening does not fit
    fn ensure_list_started(&mut self, path: &ConcreteDataAttributePath) -> WriteResult<()> {
        let checkpoint = self.chunks.writer()?.checkpoint();
        match self.try_start_list(path) {
            Ok(()) => return Ok(()),
            Err(err) if err.is_no_space() => self.chunks.writer()?.rollback(checkpoint),
            Err(err) => {
                self.chunks.writer()?.rollback(checkpoint);
                return Err(err);
            }
        }

        self.chunks.start_new_chunk()?;
        let checkpoint = self.chunks.writer()?.checkpoint();
        self.try_start_list(path).map_err(|err| {
            if let Ok(writer) = self.chunks.writer() {
                writer.rollback(checkpoint);
            }
            if err.is_no_space() {
                WriteError::ElementTooLarge
            } else {
                err
            }
        })
    }

    fn try_start_list(&mut self, path: &ConcreteDataAttributePath) -> WriteResult<()> {
        self.chunks
            .writer()?
            .reserve(RESERVED_SIZE_FOR_END_OF_LIST_ATTRIBUTE_IB)?;
        self.prepare_attribute_ib(path)?;
        self.chunks
            .writer()?
            .start_container(Tag::Context(ATTRIBUTE_DATA_DATA_TAG), ContainerType::Array)?;
        Ok(())
    }

    fn ensure_list_ended(&mut self, path: &ConcreteDataAttributePath) -> WriteResult<()> {
        let writer = self.chunks.writer()?;
        writer.unreserve(RESERVED_SIZE_FOR_END_OF_LIST_ATTRIBUTE_IB)?;
        writer.end_container(ContainerType::Array)?;
        self.finish_attribute_ib(path)
    }
}
