//! Write interaction client
//!
//! [`WriteClient`] collects attribute writes, splits them into as many
//! WriteRequestMessages as needed and drives the exchange with the peer:
//! one chunk in flight at a time, the next one sent when the WriteResponse
//! for the previous one arrives.
use super::chunk::ChunkConfig;
use super::encoder::{ListEncodingOverride, WriteEncoder};
use super::response::process_write_response;
use crate::error::{WriteError, WriteResult};
use crate::exchange::{Exchange, SendFlags};
use crate::im::constants::*;
use crate::im::messages::{encode_status_response, encode_timed_request, parse_status_response, MessageType};
use crate::im::path::ConcreteDataAttributePath;
use crate::im::status::{StatusCode, StatusIB};
use crate::tlv::{encode_to_vec, first_element, Element, Encode};
use log::{debug, error, info, trace, warn};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Receives the outcome of a write interaction
pub trait WriteCallback {
    /// Status reported by the peer for one attribute path
    fn on_response(&mut self, path: &ConcreteDataAttributePath, status: StatusIB);

    /// The interaction failed; `on_done` follows
    fn on_error(&mut self, error: &WriteError);

    /// The interaction is over; called exactly once
    fn on_done(&mut self);
}

/// Write client configuration
#[derive(Debug, Clone)]
pub struct WriteClientConfig {
    /// Maximum payload of one secure message
    pub max_payload_len: usize,
    /// Ask the peer not to send WriteResponses
    pub suppress_response: bool,
    /// Run the write as a timed interaction with this window (ms)
    pub timed_write_timeout_ms: Option<u16>,
    /// Extra trailing bytes held back in every chunk, to force chunking in tests
    pub reserved_margin: usize,
    /// Response timeout used when `send` is not given one
    pub default_response_timeout: Duration,
}

impl Default for WriteClientConfig {
    fn default() -> Self {
        Self {
            max_payload_len: MAX_SECURE_SDU_LENGTH,
            suppress_response: false,
            timed_write_timeout_ms: None,
            reserved_margin: 0,
            default_response_timeout: Duration::from_millis(EXPECTED_IM_PROCESSING_TIME_MS),
        }
    }
}

/// Externally visible state of a write interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing encoded yet
    Initialized,
    /// At least one chunk is open; more attributes may be added
    AddingAttribute,
    /// TimedRequest sent, waiting for the peer's StatusResponse
    AwaitingTimedStatus,
    /// A WriteRequest chunk is in flight
    AwaitingResponse,
    /// The last WriteResponse is being processed
    ResponseReceived,
    /// The interaction is over
    Terminated,
}

enum Session {
    Building(WriteEncoder),
    AwaitingTimedStatus {
        exchange: Box<dyn Exchange>,
        queue: VecDeque<Vec<u8>>,
    },
    AwaitingResponse {
        exchange: Box<dyn Exchange>,
        queue: VecDeque<Vec<u8>>,
    },
    ResponseReceived,
    Terminated,
}

/// Client side of one chunked write interaction
pub struct WriteClient {
    callback: Box<dyn WriteCallback>,
    config: WriteClientConfig,
    session: Session,
    response_timeout: Duration,
    deadline: Option<Instant>,
}

impl fmt::Debug for WriteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteClient")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl WriteClient {
    /// Create a client that reports to `callback`
    pub fn new(callback: Box<dyn WriteCallback>, config: WriteClientConfig) -> Self {
        let encoder = WriteEncoder::new(ChunkConfig {
            max_payload_len: config.max_payload_len,
            reserved_margin: config.reserved_margin,
            suppress_response: config.suppress_response,
            timed_request: config.timed_write_timeout_ms.is_some(),
        });
        let response_timeout = config.default_response_timeout;

        Self {
            callback,
            config,
            session: Session::Building(encoder),
            response_timeout,
            deadline: None,
        }
    }

    pub fn config(&self) -> &WriteClientConfig {
        &self.config
    }

    pub fn state(&self) -> WriteState {
        match &self.session {
            Session::Building(encoder) if encoder.chunks().is_started() => {
                WriteState::AddingAttribute
            }
            Session::Building(_) => WriteState::Initialized,
            Session::AwaitingTimedStatus { .. } => WriteState::AwaitingTimedStatus,
            Session::AwaitingResponse { .. } => WriteState::AwaitingResponse,
            Session::ResponseReceived => WriteState::ResponseReceived,
            Session::Terminated => WriteState::Terminated,
        }
    }

    /// Make the write a timed interaction
    ///
    /// Allowed until `send`, as long as everything added so far fits in a
    /// single chunk.
    pub fn set_timed_write_timeout(&mut self, timeout_ms: u16) -> WriteResult<()> {
        let Session::Building(encoder) = &mut self.session else {
            return Err(WriteError::InvalidState);
        };
        encoder.chunks_mut().set_timed_request(true)?;
        self.config.timed_write_timeout_ms = Some(timeout_ms);
        Ok(())
    }

    /// Encode `value` and add it as a write to `path`
    pub fn put_attribute<T>(&mut self, path: &ConcreteDataAttributePath, value: &T) -> WriteResult<()>
    where
        T: Encode + ?Sized,
    {
        let encoded = encode_to_vec(value)?;
        let element = first_element(&encoded)?;
        self.put_preencoded_attribute(path, &element)
    }

    /// Add a write of an already encoded value to `path`
    pub fn put_preencoded_attribute(
        &mut self,
        path: &ConcreteDataAttributePath,
        value: &Element<'_>,
    ) -> WriteResult<()> {
        self.put_preencoded_attribute_with_override(path, value, ListEncodingOverride::Default)
    }

    /// Add a write of an already encoded value, choosing how whole lists are encoded
    ///
    /// An invalid path is rejected and leaves the client untouched. Any other
    /// failure may have committed part of a list, so the interaction is
    /// terminated and nothing already encoded is ever sent.
    pub fn put_preencoded_attribute_with_override(
        &mut self,
        path: &ConcreteDataAttributePath,
        value: &Element<'_>,
        list_override: ListEncodingOverride,
    ) -> WriteResult<()> {
        let Session::Building(encoder) = &mut self.session else {
            return Err(WriteError::InvalidState);
        };
        path.validate()?;
        trace!("Adding write to {}", path);
        if let Err(err) = encoder.put_preencoded(path, value, list_override) {
            warn!("Failed to encode write to {}: {}", path, err);
            self.close();
            return Err(err);
        }
        Ok(())
    }

    /// Finalize the encoded chunks and start sending them on `exchange`
    ///
    /// `timeout` bounds the wait for each response; `None` uses the
    /// configured default. Group exchanges get no responses, so the
    /// interaction terminates as soon as the single chunk is sent.
    pub fn send(&mut self, mut exchange: Box<dyn Exchange>, timeout: Option<Duration>) -> WriteResult<()> {
        let Session::Building(encoder) = &mut self.session else {
            return Err(WriteError::InvalidState);
        };
        if encoder.chunks().chunk_count() == 0 {
            return Err(WriteError::InvalidState);
        }
        if exchange.is_group() {
            if encoder.has_data_version() {
                return Err(WriteError::GroupDataVersion);
            }
            if encoder.chunks().chunk_count() > 1 {
                return Err(WriteError::GroupWriteChunked);
            }
            if self.config.timed_write_timeout_ms.is_some() {
                return Err(WriteError::InvalidState);
            }
        }
        let queue = encoder.chunks_mut().finish()?;
        info!("Sending write interaction in {} chunk(s)", queue.len());

        self.response_timeout = timeout.unwrap_or(self.config.default_response_timeout);
        exchange.set_response_timeout(self.response_timeout);

        if let Some(timeout_ms) = self.config.timed_write_timeout_ms {
            let sent = encode_timed_request(timeout_ms).and_then(|payload| {
                exchange
                    .send_message(MessageType::TimedRequest, payload, SendFlags::EXPECT_RESPONSE)
                    .map_err(WriteError::from)
            });
            if let Err(err) = sent {
                self.fail(err.clone());
                return Err(err);
            }
            debug!("TimedRequest sent ({} ms window)", timeout_ms);
            self.session = Session::AwaitingTimedStatus { exchange, queue };
            self.arm_deadline();
            return Ok(());
        }

        self.session = Session::AwaitingResponse { exchange, queue };
        if let Err(err) = self.send_next_chunk() {
            self.fail(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Handle a message the peer sent on the exchange
    ///
    /// Protocol failures are reported through the callback and terminate the
    /// interaction; the only error returned here is `InvalidState` when no
    /// message is expected.
    pub fn on_message_received(&mut self, msg_type: MessageType, payload: &[u8]) -> WriteResult<()> {
        match self.session {
            Session::AwaitingTimedStatus { .. } => {
                self.deadline = None;
                match check_timed_status(msg_type, payload) {
                    Ok(()) => {
                        debug!("Timed window open, sending write request");
                        self.start_write_after_timed();
                        if let Err(err) = self.send_next_chunk() {
                            self.fail(err);
                        }
                    }
                    Err(err) => self.fail(err),
                }
            }
            Session::AwaitingResponse { .. } => {
                self.deadline = None;
                if let Err(err) = self.process_response(msg_type, payload) {
                    self.reply_invalid_action();
                    self.fail(err);
                    return Ok(());
                }
                if self.queue_is_empty() {
                    self.session = Session::ResponseReceived;
                    info!("Write interaction complete");
                    self.close();
                } else if let Err(err) = self.send_next_chunk() {
                    self.fail(err);
                }
            }
            _ => {
                warn!("Unexpected {:?} in state {:?}", msg_type, self.state());
                return Err(WriteError::InvalidState);
            }
        }
        Ok(())
    }

    /// The exchange gave up waiting for the peer
    pub fn on_response_timeout(&mut self) -> WriteResult<()> {
        match self.session {
            Session::AwaitingTimedStatus { .. } | Session::AwaitingResponse { .. } => {
                error!("Timed out waiting for write response in state {:?}", self.state());
                self.fail(WriteError::Timeout);
                Ok(())
            }
            _ => Err(WriteError::InvalidState),
        }
    }

    /// Fire the response timeout if its deadline has passed
    pub fn process_timeouts(&mut self, now: Instant) -> WriteResult<()> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.on_response_timeout(),
            _ => Ok(()),
        }
    }

    /// The session carrying the exchange went away
    pub fn on_connection_closed(&mut self) -> WriteResult<()> {
        if matches!(self.session, Session::Terminated) {
            return Err(WriteError::InvalidState);
        }
        warn!("Connection closed in state {:?}", self.state());
        self.fail(WriteError::ConnectionClosed);
        Ok(())
    }

    /// Cancel the interaction, dropping every pending chunk
    pub fn abort(&mut self) -> WriteResult<()> {
        if matches!(self.session, Session::Terminated) {
            return Err(WriteError::InvalidState);
        }
        debug!("Write interaction aborted in state {:?}", self.state());
        self.close();
        Ok(())
    }

    fn arm_deadline(&mut self) {
        self.deadline = Instant::now().checked_add(self.response_timeout);
    }

    fn queue_is_empty(&self) -> bool {
        match &self.session {
            Session::AwaitingResponse { queue, .. } => queue.is_empty(),
            _ => true,
        }
    }

    fn start_write_after_timed(&mut self) {
        let session = std::mem::replace(&mut self.session, Session::Terminated);
        self.session = match session {
            Session::AwaitingTimedStatus { exchange, queue } => {
                Session::AwaitingResponse { exchange, queue }
            }
            other => other,
        };
    }

    fn send_next_chunk(&mut self) -> WriteResult<()> {
        let Session::AwaitingResponse { exchange, queue } = &mut self.session else {
            return Err(WriteError::InvalidState);
        };
        let chunk = queue.pop_front().ok_or(WriteError::InvalidState)?;
        let is_group = exchange.is_group();
        let flags = if is_group {
            SendFlags::empty()
        } else {
            SendFlags::EXPECT_RESPONSE
        };

        debug!(
            "Sending WriteRequest ({} bytes, {} chunk(s) left)",
            chunk.len(),
            queue.len()
        );
        exchange.send_message(MessageType::WriteRequest, chunk, flags)?;

        if is_group {
            debug!("Group write sent");
            self.close();
        } else {
            self.arm_deadline();
        }
        Ok(())
    }

    fn process_response(&mut self, msg_type: MessageType, payload: &[u8]) -> WriteResult<()> {
        match msg_type {
            MessageType::WriteResponse => {
                let callback = &mut self.callback;
                let dispatched =
                    process_write_response(payload, |path, status| callback.on_response(path, status))?;
                trace!("WriteResponse carried {} status(es)", dispatched);
                Ok(())
            }
            MessageType::StatusResponse => {
                let status = parse_status_response(payload)?;
                if !status.is_success() {
                    return Err(WriteError::Status(status));
                }
                Err(WriteError::InvalidMessageType(msg_type))
            }
            other => Err(WriteError::InvalidMessageType(other)),
        }
    }

    fn reply_invalid_action(&mut self) {
        let Session::AwaitingResponse { exchange, .. } = &mut self.session else {
            return;
        };
        let sent = encode_status_response(StatusCode::InvalidAction).and_then(|payload| {
            exchange
                .send_message(MessageType::StatusResponse, payload, SendFlags::empty())
                .map_err(WriteError::from)
        });
        if let Err(err) = sent {
            warn!("Failed to send InvalidAction status: {}", err);
        }
    }

    fn fail(&mut self, err: WriteError) {
        error!("Write interaction failed: {}", err);
        self.callback.on_error(&err);
        self.close();
    }

    fn close(&mut self) {
        if matches!(self.session, Session::Terminated) {
            return;
        }
        self.session = Session::Terminated;
        self.deadline = None;
        self.callback.on_done();
    }
}

fn check_timed_status(msg_type: MessageType, payload: &[u8]) -> WriteResult<()> {
    if msg_type != MessageType::StatusResponse {
        return Err(WriteError::InvalidMessageType(msg_type));
    }
    match parse_status_response(payload)? {
        StatusCode::Success => Ok(()),
        status => Err(WriteError::Status(status)),
    }
}
