//! Fake request construction and dispatch tests.

use super::*;
use crate::constants::MULTIPART_CONTENT_TYPE;
use crate::params;

#[test]
fn fake_request_defaults_to_get_root() {
    let req = fake_request(RequestOverrides::new());
    assert_eq!(req.method(), Method::Get);
    assert_eq!(req.path(), "/");
    assert!(req.headers().is_empty());
    assert!(!req.has_body());
}

#[test]
fn overrides_flow_through() {
    let req = fake_request(
        RequestOverrides::new()
            .method(Method::Delete)
            .path("/widgets/9?force=1")
            .header("X-Test", "yes")
            .param("id", "9")
            .body(b"raw".to_vec()),
    );
    assert_eq!(req.method(), Method::Delete);
    assert_eq!(req.path_without_query(), "/widgets/9");
    assert_eq!(req.query("force"), Some("1"));
    assert_eq!(req.header("x-test"), Some("yes"));
    assert_eq!(req.param("id"), Some("9"));
    assert_eq!(req.body(), Some(b"raw".as_slice()));
}

#[test]
#[should_panic(expected = "CR or LF")]
fn header_values_reject_crlf() {
    let _ = RequestOverrides::new().header("X-Bad", "a\r\nX-Injected: b");
}

#[test]
fn empty_params_mean_plain_request() {
    let req = multipart_fake_request(RequestOverrides::new(), &Params::new());
    assert_eq!(req.method(), Method::Get);
    assert!(!req.has_body());
    assert_eq!(req.content_type(), None);
}

#[test]
fn multipart_request_carries_body_and_headers() {
    let req = multipart_fake_request(RequestOverrides::new(), &params! { "name" => "bob" });
    assert_eq!(req.method(), Method::Post);
    assert!(req.is_multipart());
    assert_eq!(req.content_type(), Some(MULTIPART_CONTENT_TYPE));

    let body = req.body().unwrap();
    assert_eq!(
        req.header("content-length").unwrap(),
        body.len().to_string()
    );
    assert!(body.starts_with(b"--"));
}

#[test]
fn multipart_headers_replace_caller_values() {
    let req = multipart_fake_request(
        RequestOverrides::new().header("Content-Type", "text/plain"),
        &params! { "k" => "v" },
    );
    assert_eq!(req.content_type(), Some(MULTIPART_CONTENT_TYPE));
    assert_eq!(req.header_all("content-type").len(), 1);
}

#[test]
fn explicit_method_override_survives_multipart() {
    let req = multipart_fake_request(
        RequestOverrides::new().method(Method::Patch),
        &params! { "k" => "v" },
    );
    assert_eq!(req.method(), Method::Patch);
}

#[test]
fn multipart_post_and_put_set_method_and_path() {
    let post = multipart_post("/widgets", &params! { "k" => "v" }, RequestOverrides::new());
    assert_eq!(post.method(), Method::Post);
    assert_eq!(post.path(), "/widgets");

    let put = multipart_put(
        "/widgets/3",
        &params! { "k" => "v" },
        RequestOverrides::new(),
    );
    assert_eq!(put.method(), Method::Put);
    assert_eq!(put.path(), "/widgets/3");
}

#[test]
fn dispatch_hands_the_request_to_the_handler() {
    let mut seen_path = String::new();
    let mut handler = |req: &Request| {
        seen_path = req.path().to_string();
        Response::ok(b"done".to_vec())
    };

    let req = fake_request(RequestOverrides::new().path("/ping"));
    let res = dispatch_request(&req, &mut handler);
    assert_eq!(res.text(), Some("done"));
    assert_eq!(seen_path, "/ping");
}

#[test]
fn dispatch_with_runs_setup_before_the_action() {
    struct Counter {
        primed: bool,
        calls: u32,
    }
    impl Handler for Counter {
        fn handle(&mut self, _req: &Request) -> Response {
            assert!(self.primed, "setup must run before dispatch");
            self.calls += 1;
            Response::status_only(204)
        }
    }

    let mut controller = Counter {
        primed: false,
        calls: 0,
    };
    let res = dispatch_multipart_to_with(
        &mut controller,
        &params! { "k" => "v" },
        RequestOverrides::new(),
        |c| c.primed = true,
    );
    assert_eq!(res.status(), 204);
    assert_eq!(controller.calls, 1);
}
