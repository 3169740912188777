//! Unit tests for interaction model paths, statuses and messages

use super::*;
use crate::error::WriteError;
use crate::tlv::{first_element, Tag, TlvWriter};

#[test]
fn test_status_code_conversion() {
    assert_eq!(StatusCode::from(0x00), StatusCode::Success);
    assert_eq!(StatusCode::from(0x80), StatusCode::InvalidAction);
    assert_eq!(StatusCode::from(0x92), StatusCode::DataVersionMismatch);
    assert_eq!(StatusCode::from(0xC6), StatusCode::NeedsTimedInteraction);
    assert_eq!(StatusCode::from(0x42), StatusCode::Unknown(0x42));

    assert_eq!(u8::from(StatusCode::UnsupportedWrite), 0x88);
    assert_eq!(u8::from(StatusCode::Unknown(0x42)), 0x42);
    assert!(StatusCode::Success.is_success());
    assert!(!StatusCode::Failure.is_success());
}

#[test]
fn test_message_type_conversion() {
    assert_eq!(MessageType::from(0x06), MessageType::WriteRequest);
    assert_eq!(MessageType::from(0x07), MessageType::WriteResponse);
    assert_eq!(MessageType::from(0x0A), MessageType::TimedRequest);
    assert_eq!(u8::from(MessageType::StatusResponse), 0x01);
    assert_eq!(u8::from(MessageType::Unknown(0x33)), 0x33);
}

#[test]
fn test_path_encoding() {
    let path = ConcreteDataAttributePath::new(0, ACCESS_CONTROL_CLUSTER_ID, 0);
    let mut writer = TlvWriter::unbounded();
    path.encode_path_ib(&mut writer, Tag::Context(1)).unwrap();
    assert_eq!(hex::encode(writer.as_bytes()), "370124020024031f24040018");

    // Append adds a null list index
    let append = path.with_list_op(ListOperation::AppendItem);
    let mut writer = TlvWriter::unbounded();
    append.encode_path_ib(&mut writer, Tag::Context(1)).unwrap();
    assert_eq!(hex::encode(writer.as_bytes()), "370124020024031f240400340518");

    // Group paths leave out the endpoint
    let group = ConcreteDataAttributePath::group(0x0006, 0x4003);
    let mut writer = TlvWriter::unbounded();
    group.encode_path_ib(&mut writer, Tag::Context(1)).unwrap();
    assert_eq!(hex::encode(writer.as_bytes()), "37012403062504034018");
}

#[test]
fn test_path_rejects_item_operations() {
    let path = ConcreteDataAttributePath::new(1, 6, 0).with_list_op(ListOperation::DeleteItem(3));
    let mut writer = TlvWriter::unbounded();
    assert!(matches!(
        path.encode_path_ib(&mut writer, Tag::Context(1)),
        Err(WriteError::UnsupportedListOperation)
    ));
    assert!(writer.is_empty());
}

#[test]
fn test_path_decoding() {
    let path = ConcreteDataAttributePath::new(3, 0x0028, 5).with_list_op(ListOperation::AppendItem);
    let mut writer = TlvWriter::unbounded();
    path.encode_path_ib(&mut writer, Tag::Anonymous).unwrap();
    let bytes = writer.finish().unwrap();

    let decoded = ConcreteDataAttributePath::decode_path_ib(&first_element(&bytes).unwrap()).unwrap();
    assert_eq!(decoded, path);
    assert!(decoded.is_list_item_operation());
}

#[test]
fn test_path_decoding_requires_concrete_path() {
    let group = ConcreteDataAttributePath::group(6, 0);
    let mut writer = TlvWriter::unbounded();
    group.encode_path_ib(&mut writer, Tag::Anonymous).unwrap();
    let bytes = writer.finish().unwrap();

    assert!(matches!(
        ConcreteDataAttributePath::decode_path_ib(&first_element(&bytes).unwrap()),
        Err(WriteError::MalformedMessage(_))
    ));
}

#[test]
fn test_path_predicates() {
    let acl = ConcreteDataAttributePath::new(0, ACCESS_CONTROL_CLUSTER_ID, ACCESS_CONTROL_ACL_ATTRIBUTE_ID);
    assert!(acl.is_access_control_cluster());
    assert!(!acl.is_list_operation());

    let extension = ConcreteDataAttributePath::new(0, ACCESS_CONTROL_CLUSTER_ID, 1);
    assert!(extension.is_access_control_cluster());
    assert!(!ConcreteDataAttributePath::new(0, 0x28, 0).is_access_control_cluster());

    assert_eq!(acl.validate(), Ok(()));
    assert_eq!(
        ConcreteDataAttributePath::group(0x28, 5).with_data_version(3).validate(),
        Err(WriteError::GroupDataVersion)
    );
    assert_eq!(
        acl.with_list_op(ListOperation::DeleteItem(2)).validate(),
        Err(WriteError::UnsupportedListOperation)
    );

    let replace_all = acl.with_list_op(ListOperation::ReplaceAll);
    assert!(replace_all.is_list_operation());
    assert!(!replace_all.is_list_item_operation());

    assert!(ConcreteDataAttributePath::group(6, 0).is_group());
    assert_eq!(acl.to_string(), "0/0x0000001F/0x00000000");
}

#[test]
fn test_status_response_round_trip() {
    let payload = encode_status_response(StatusCode::InvalidAction).unwrap();
    assert_eq!(hex::encode(&payload), "1524008024ff0c18");
    assert_eq!(parse_status_response(&payload).unwrap(), StatusCode::InvalidAction);
}

#[test]
fn test_timed_request_encoding() {
    let payload = encode_timed_request(500).unwrap();
    assert_eq!(hex::encode(&payload), "152500f40124ff0c18");
    assert_eq!(parse_timed_request(&payload).unwrap(), 500);
}

#[test]
fn test_status_response_without_status_is_malformed() {
    assert!(matches!(
        parse_status_response(&[0x15, 0x18]),
        Err(WriteError::MalformedMessage(_))
    ));
    assert!(matches!(
        parse_status_response(&[0x16, 0x18]),
        Err(WriteError::MalformedMessage(_))
    ));
}

#[test]
fn test_write_response_statuses() {
    let path = ConcreteDataAttributePath::new(1, 6, 0);
    let statuses = [
        AttributeStatusIB::new(path, StatusIB::new(StatusCode::Success)),
        AttributeStatusIB::new(path, StatusIB::with_cluster_status(StatusCode::Failure, 0x03)),
    ];
    let payload = encode_write_response(Some(&statuses)).unwrap();

    let array = write_response_statuses(&payload).unwrap().unwrap();
    let mut reader = array.enter().unwrap();
    let mut decoded = Vec::new();
    while let Some(element) = reader.next_element().unwrap() {
        decoded.push(AttributeStatusIB::parse(&element).unwrap());
    }
    assert_eq!(decoded, statuses);

    let empty = encode_write_response(None).unwrap();
    assert!(write_response_statuses(&empty).unwrap().is_none());
}

#[test]
fn test_attribute_status_requires_status() {
    let mut writer = TlvWriter::unbounded();
    writer.start_container(Tag::Anonymous, crate::tlv::ContainerType::Structure).unwrap();
    ConcreteDataAttributePath::new(1, 6, 0)
        .encode_path_ib(&mut writer, Tag::Context(0))
        .unwrap();
    writer.end_container(crate::tlv::ContainerType::Structure).unwrap();
    let bytes = writer.finish().unwrap();

    assert!(matches!(
        AttributeStatusIB::parse(&first_element(&bytes).unwrap()),
        Err(WriteError::MalformedMessage("AttributeStatusIB without status"))
    ));
}
