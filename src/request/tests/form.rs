//! Urlencoded form body parsing tests

use super::super::*;
use std::collections::HashMap;

fn post_form(body: &[u8]) -> Request {
    Request::new(
        Method::Post,
        "/submit".to_string(),
        vec![(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        )],
        Some(body.to_vec()),
        HashMap::new(),
    )
}

#[test]
fn basic_fields() {
    let req = post_form(b"name=Alice&email=alice%40example.com");
    assert!(req.is_form());
    assert_eq!(req.form("name"), Some("Alice"));
    assert_eq!(req.form_or("email", ""), "alice@example.com");
    assert_eq!(req.form("missing"), None);
}

#[test]
fn repeated_keys_collect_all_values() {
    let req = post_form(b"tags=rust&tags=http&tags=test");
    assert_eq!(req.form_all("tags"), &["rust", "http", "test"]);
    assert_eq!(req.form("tags"), Some("rust"));
}

#[test]
fn plus_and_percent_decoding() {
    let req = post_form(b"message=hello+world&special=%26%3D%3F");
    assert_eq!(req.form("message"), Some("hello world"));
    assert_eq!(req.form("special"), Some("&=?"));
}

#[test]
fn empty_body_yields_no_fields() {
    let req = Request::new(
        Method::Post,
        "/submit".to_string(),
        vec![],
        None,
        HashMap::new(),
    );
    assert_eq!(req.form("anything"), None);
    assert!(req.form_all("anything").is_empty());
}

#[test]
fn field_without_value() {
    let req = post_form(b"checked&name=x");
    assert_eq!(req.form("checked"), Some(""));
    assert_eq!(req.form("name"), Some("x"));
}

#[test]
fn non_utf8_body_yields_no_fields() {
    let req = post_form(&[0xff, 0xfe, b'=', b'x']);
    assert_eq!(req.form("x"), None);
}
