#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pageviews_core::path::MAX_PATH_BYTES;
use pageviews_core::{CounterPath, PathRule};

#[test]
fn missing_and_empty_are_invalid_under_every_rule() {
    for rule in [PathRule::DateSlug, PathRule::NonEmpty] {
        let err = CounterPath::parse(None, rule).expect_err("missing must fail");
        assert_eq!(err.client_code().as_str(), "INVALID_ARGUMENT");

        let err = CounterPath::parse(Some(""), rule).expect_err("empty must fail");
        assert_eq!(err.client_code().as_str(), "INVALID_ARGUMENT");
    }
}

#[test]
fn date_slug_accepts_canonical_shape() {
    let p = CounterPath::parse(Some("/posts/2023/11/05/rust-tips/"), PathRule::DateSlug)
        .expect("canonical path");
    assert_eq!(p.as_str(), "/posts/2023/11/05/rust-tips/");
}

#[test]
fn date_slug_rejects_near_misses() {
    let bad = [
        "/posts/2023/11/05/rust-tips",     // no trailing slash
        "/posts/23/11/05/rust-tips/",      // two-digit year
        "/posts/2023/1/05/rust-tips/",     // one-digit month
        "/posts/2023/11/05//",             // empty slug
        "/posts/2023/11/05/a/b/",          // nested slug
        "/blog/2023/11/05/rust-tips/",     // wrong prefix
        "x/posts/2023/11/05/rust-tips/",   // leading junk
        "/posts/٢٠٢٤/٠١/٠٢/x/",            // non-ASCII digits
        "/posts/２０２３/１１/０５/x/",      // fullwidth digits
    ];
    for raw in bad {
        assert!(
            CounterPath::parse(Some(raw), PathRule::DateSlug).is_err(),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn non_empty_accepts_anything_else() {
    let p = CounterPath::parse(Some("about"), PathRule::NonEmpty).unwrap();
    assert_eq!(p.to_string(), "about");
}

#[test]
fn oversized_path_is_rejected() {
    let long = "a".repeat(MAX_PATH_BYTES + 1);
    let err = CounterPath::parse(Some(long.as_str()), PathRule::NonEmpty).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_ARGUMENT");
}

#[test]
fn rule_deserializes_from_snake_case() {
    let r: PathRule = serde_json::from_str("\"non_empty\"").unwrap();
    assert_eq!(r, PathRule::NonEmpty);
    let r: PathRule = serde_json::from_str("\"date_slug\"").unwrap();
    assert_eq!(r, PathRule::DateSlug);
    assert_eq!(PathRule::default(), PathRule::DateSlug);
}
