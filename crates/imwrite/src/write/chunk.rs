//! WriteRequestMessage chunk buffers
//!
//! A chunk is one WriteRequestMessage under construction. It is bound to a
//! single fixed-capacity buffer whose tail is held back for the MIC and for
//! the elements that close the message, so whatever the encoder manages to
//! put can always be finalized.
use crate::error::{WriteError, WriteResult};
use crate::im::constants::*;
use crate::tlv::{ContainerType, Tag, TlvError, TlvWriter};
use log::{debug, trace};
use std::collections::VecDeque;

// Offset of the TimedRequest flag in every chunk header: the structure
// opener followed by the two-byte SuppressResponse flag
const TIMED_REQUEST_FLAG_OFFSET: usize = 3;

/// Sizing and header flags shared by every chunk of one write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum payload of one secure message
    pub max_payload_len: usize,
    /// Extra trailing bytes held back in every chunk
    pub reserved_margin: usize,
    pub suppress_response: bool,
    pub timed_request: bool,
}

/// Builds chunks and keeps the finalized ones in send order
#[derive(Debug)]
pub struct ChunkBuilder {
    config: ChunkConfig,
    writer: Option<TlvWriter>,
    // AttributeDataIBs committed into the open chunk
    committed: usize,
    queue: VecDeque<Vec<u8>>,
}

impl ChunkBuilder {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            writer: None,
            committed: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Mark chunks as part of a timed write
    ///
    /// The header of the open chunk is patched in place. Finalized chunks are
    /// not touched, so a write that already spans several chunks cannot become
    /// timed.
    pub fn set_timed_request(&mut self, timed: bool) -> WriteResult<()> {
        if timed && !self.queue.is_empty() {
            return Err(WriteError::TimedWriteChunked);
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.overwrite_bool(
                TIMED_REQUEST_FLAG_OFFSET,
                Tag::Context(WRITE_REQUEST_TIMED_REQUEST_TAG),
                timed,
            )?;
        }
        self.config.timed_request = timed;
        Ok(())
    }

    /// Check if any chunk has been opened or finalized
    pub fn is_started(&self) -> bool {
        self.writer.is_some() || !self.queue.is_empty()
    }

    /// Number of AttributeDataIBs committed into the open chunk
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Chunks that would be sent if the write were finalized now
    pub fn chunk_count(&self) -> usize {
        let open = if self.writer.is_some() && self.committed > 0 { 1 } else { 0 };
        self.queue.len() + open
    }

    /// Finalized chunks waiting to be sent
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Writer of the open chunk
    pub fn writer(&mut self) -> WriteResult<&mut TlvWriter> {
        self.writer.as_mut().ok_or(WriteError::InvalidState)
    }

    /// Writer of the open chunk, opening one first if needed
    pub fn ensure_chunk(&mut self) -> WriteResult<&mut TlvWriter> {
        if self.writer.is_none() {
            self.start_new_chunk()?;
        }
        self.writer()
    }

    /// Record that an AttributeDataIB was completely encoded in the open chunk
    pub fn commit_attribute(&mut self) {
        self.committed += 1;
    }

    /// Open a fresh chunk
    ///
    /// An open chunk holding committed attributes is finalized first with the
    /// more-chunks flag set. An open chunk holding nothing is discarded.
    pub fn start_new_chunk(&mut self) -> WriteResult<()> {
        if self.writer.is_some() && self.committed > 0 {
            if self.config.timed_request {
                return Err(WriteError::TimedWriteChunked);
            }
            self.finalize(true)?;
        }

        let mut writer = TlvWriter::with_capacity(self.config.max_payload_len).map_err(|e| match e {
            TlvError::NoMemory => WriteError::NoMemory,
            other => WriteError::Tlv(other),
        })?;
        writer.reserve(AEAD_MIC_LENGTH + self.config.reserved_margin)?;
        writer.reserve(RESERVED_SIZE_FOR_TLV_ENCODING_OVERHEAD)?;

        writer.start_container(Tag::Anonymous, ContainerType::Structure)?;
        writer.put_bool(
            Tag::Context(WRITE_REQUEST_SUPPRESS_RESPONSE_TAG),
            self.config.suppress_response,
        )?;
        writer.put_bool(
            Tag::Context(WRITE_REQUEST_TIMED_REQUEST_TAG),
            self.config.timed_request,
        )?;
        writer.start_container(
            Tag::Context(WRITE_REQUEST_WRITE_REQUESTS_TAG),
            ContainerType::Array,
        )?;

        trace!(
            "Opened WriteRequest chunk {} ({} bytes available)",
            self.queue.len() + 1,
            writer.remaining()
        );
        self.writer = Some(writer);
        self.committed = 0;
        Ok(())
    }

    /// Close the open chunk and append it to the outbound queue
    pub fn finalize(&mut self, has_more: bool) -> WriteResult<()> {
        if self.committed == 0 {
            return Err(WriteError::InvalidState);
        }
        let writer = self.writer()?;
        writer.unreserve(RESERVED_SIZE_FOR_TLV_ENCODING_OVERHEAD)?;
        writer.end_container(ContainerType::Array)?;
        writer.put_bool(
            Tag::Context(WRITE_REQUEST_MORE_CHUNKED_MESSAGES_TAG),
            has_more,
        )?;
        writer.put_u64(
            Tag::Context(IM_REVISION_TAG),
            INTERACTION_MODEL_REVISION.into(),
        )?;
        writer.end_container(ContainerType::Structure)?;
        trace!("Chunk payload: {}", hex::encode(writer.as_bytes()));

        let chunk = self.writer.take().ok_or(WriteError::InvalidState)?.finish()?;
        debug!(
            "Finalized WriteRequest chunk {} ({} bytes, {} attributes, more: {})",
            self.queue.len() + 1,
            chunk.len(),
            self.committed,
            has_more
        );

        self.queue.push_back(chunk);
        self.committed = 0;
        Ok(())
    }

    /// Finalize the last chunk and hand over every chunk in send order
    pub fn finish(&mut self) -> WriteResult<VecDeque<Vec<u8>>> {
        self.finalize(false)?;
        Ok(std::mem::take(&mut self.queue))
    }
}
