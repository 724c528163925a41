//! Body accessor tests

use super::super::*;
use std::collections::HashMap;

fn with_body(body: Option<Vec<u8>>) -> Request {
    Request::new(Method::Post, "/".to_string(), vec![], body, HashMap::new())
}

#[test]
fn raw_bytes_and_text() {
    let req = with_body(Some(b"hello".to_vec()));
    assert_eq!(req.body(), Some(b"hello".as_slice()));
    assert_eq!(req.text(), Some("hello"));
    assert!(req.has_body());
}

#[test]
fn no_body() {
    let req = with_body(None);
    assert_eq!(req.body(), None);
    assert_eq!(req.text(), None);
    assert!(!req.has_body());
}

#[test]
fn empty_body_counts_as_no_body() {
    let req = with_body(Some(Vec::new()));
    assert_eq!(req.body(), Some(b"".as_slice()));
    assert!(!req.has_body());
}

#[test]
fn binary_body_has_no_text() {
    let req = with_body(Some(vec![0xff, 0xfe, 0x00]));
    assert!(req.body().is_some());
    assert_eq!(req.text(), None);
}

#[test]
fn method_display() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Put.to_string(), "PUT");
}

#[test]
fn debug_omits_lookup_plumbing() {
    let req = with_body(Some(b"x".to_vec()));
    let dbg = format!("{req:?}");
    assert!(dbg.contains("method"));
    assert!(!dbg.contains("header_index"));
}
