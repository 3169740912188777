//! WriteResponseMessage processing
use crate::error::{WriteError, WriteResult};
use crate::im::messages::{write_response_statuses, AttributeStatusIB};
use crate::im::path::ConcreteDataAttributePath;
use crate::im::status::StatusIB;
use crate::tlv::Tag;
use log::trace;

/// Dispatch every AttributeStatusIB of a WriteResponseMessage to `on_status`
///
/// Statuses are delivered as they are decoded. A response without an
/// AttributeStatusIBs array accepts every write and dispatches nothing. The
/// first malformed element stops processing and is returned as an error;
/// statuses before it have already been delivered.
///
/// Returns the number of statuses dispatched.
pub fn process_write_response<F>(payload: &[u8], mut on_status: F) -> WriteResult<usize>
where
    F: FnMut(&ConcreteDataAttributePath, StatusIB),
{
    let Some(statuses) = write_response_statuses(payload)? else {
        trace!("WriteResponse without AttributeStatusIBs");
        return Ok(0);
    };

    let mut reader = statuses.enter()?;
    let mut dispatched = 0;
    while let Some(element) = reader.next_element()? {
        if element.tag() != Tag::Anonymous {
            return Err(WriteError::MalformedMessage("AttributeStatusIB is not anonymous"));
        }
        let status = AttributeStatusIB::parse(&element)?;
        trace!("Write status for {}: {:?}", status.path, status.status);
        on_status(&status.path, status.status);
        dispatched += 1;
    }
    Ok(dispatched)
}
