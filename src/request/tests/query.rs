//! Query string parsing tests

use super::super::*;
use std::collections::HashMap;

fn get(path: &str) -> Request {
    Request::new(Method::Get, path.to_string(), vec![], None, HashMap::new())
}

#[test]
fn single_and_missing_params() {
    let req = get("/users?page=2&limit=10");
    assert_eq!(req.query("page"), Some("2"));
    assert_eq!(req.query_or("limit", "1"), "10");
    assert_eq!(req.query("missing"), None);
    assert_eq!(req.query_or("missing", "fallback"), "fallback");
}

#[test]
fn repeated_keys_collect_all_values() {
    let req = get("/search?tag=rust&tag=http&tag=test");
    assert_eq!(req.query_all("tag"), &["rust", "http", "test"]);
    assert_eq!(req.query("tag"), Some("rust"));
}

#[test]
fn values_are_percent_decoded() {
    let req = get("/q?msg=hello%20world&sym=%26%3D");
    assert_eq!(req.query("msg"), Some("hello world"));
    assert_eq!(req.query("sym"), Some("&="));
}

#[test]
fn key_without_value_is_empty_string() {
    let req = get("/q?flag&x=1");
    assert_eq!(req.query("flag"), Some(""));
    assert_eq!(req.query("x"), Some("1"));
}

#[test]
fn no_query_string() {
    let req = get("/users");
    assert_eq!(req.query("anything"), None);
    assert!(req.query_all("anything").is_empty());
    assert_eq!(req.path_without_query(), "/users");
}

#[test]
fn path_without_query_strips_at_first_question_mark() {
    let req = get("/users?a=1?b=2");
    assert_eq!(req.path_without_query(), "/users");
    assert_eq!(req.path(), "/users?a=1?b=2");
}

#[test]
fn route_params_come_from_the_params_map() {
    let req = Request::new(
        Method::Get,
        "/users/123".to_string(),
        vec![],
        None,
        [("id".to_string(), "123".to_string())].into_iter().collect(),
    );
    assert_eq!(req.param("id"), Some("123"));
    assert_eq!(req.param("missing"), None);
}
