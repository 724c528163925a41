//! Property-based tests: accessors never panic on arbitrary input.

use super::super::*;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn url_decode_never_panics(input in ".*") {
        let _ = url_decode(&input);
    }

    #[test]
    fn url_decode_survives_percent_soup(input in "[%0-9a-fA-F]{0,100}") {
        let _ = url_decode(&input);
    }

    #[test]
    fn query_parsing_never_panics(query in ".*") {
        let req = Request::new(
            Method::Get,
            format!("/test?{query}"),
            vec![],
            None,
            HashMap::new(),
        );
        let _ = req.query("key");
        let _ = req.query_all("key");
    }

    #[test]
    fn form_parsing_never_panics(body in proptest::collection::vec(any::<u8>(), 0..256)) {
        let req = Request::new(
            Method::Post,
            "/submit".to_string(),
            vec![],
            Some(body),
            HashMap::new(),
        );
        let _ = req.form("key");
        let _ = req.form_all("key");
    }

    #[test]
    fn header_lookup_never_panics(name in ".{0,32}", value in ".{0,64}") {
        let req = Request::new(
            Method::Get,
            "/".to_string(),
            vec![(name.clone(), value)],
            None,
            HashMap::new(),
        );
        let _ = req.header(&name);
        let _ = req.header_all(&name);
    }
}
