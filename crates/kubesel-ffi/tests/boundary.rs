//! Status-code scenarios through the safe API and the C ABI.

use std::ffi::CString;

use kubesel_ffi::{codes, exports, match_label, match_label_selector};
use proptest::prelude::*;

const NGINX_POD: &str = r#"{"app":"nginx","project":"nibiru"}"#;

fn c_match_label(selector: &str, labels: &str) -> i32 {
    let selector = CString::new(selector).unwrap();
    let labels = CString::new(labels).unwrap();
    unsafe { exports::match_label(selector.as_ptr(), labels.as_ptr()) }
}

fn c_match_label_selector(document: &str, labels: &str) -> i32 {
    let document = CString::new(document).unwrap();
    let labels = CString::new(labels).unwrap();
    unsafe { exports::match_label_selector(document.as_ptr(), labels.as_ptr()) }
}

// ============================================================================
// match_label
// ============================================================================

#[test]
fn text_selector_matches() {
    assert_eq!(match_label("app in (nginx)", NGINX_POD), codes::MATCH);
    assert_eq!(match_label("app=nginx", NGINX_POD), codes::MATCH);
    assert_eq!(match_label("app in (nginx)", r#"{"app1":"nginx","project":"nibiru"}"#), codes::NO_MATCH);
}

#[test]
fn text_selector_errors() {
    assert_eq!(match_label("app ?? nginx", NGINX_POD), codes::SELECTOR_ERROR);
    assert_eq!(match_label("app in (a", NGINX_POD), codes::SELECTOR_ERROR);
    assert_eq!(match_label("bad key=x", NGINX_POD), codes::SELECTOR_ERROR);
    assert_eq!(match_label("app=nginx", "not-json"), codes::LABELS_DECODE_ERROR);
    assert_eq!(match_label("app=nginx", r#"{"app":["nginx"]}"#), codes::LABELS_DECODE_ERROR);
}

#[test]
fn empty_selector_text_matches_everything() {
    assert_eq!(match_label("", "{}"), codes::MATCH);
    assert_eq!(match_label("", NGINX_POD), codes::MATCH);
    assert_eq!(match_label("", "null"), codes::MATCH);
}

// ============================================================================
// match_label_selector
// ============================================================================

#[test]
fn document_selector_matches() {
    let doc = r#"{"labelSelector":{"matchExpressions":[{"key":"app","operator":"In","values":["nginx"]}]}}"#;
    assert_eq!(match_label_selector(doc, r#"{"app":"nginx"}"#), codes::MATCH);
    assert_eq!(match_label_selector(doc, r#"{"app":"envoy"}"#), codes::NO_MATCH);
}

#[test]
fn document_combines_labels_and_expressions() {
    let doc = r#"{
        "labelSelector": {
            "matchLabels": {"app": "nginx"},
            "matchExpressions": [
                {"key": "tier", "operator": "NotIn", "values": ["cache"]},
                {"key": "canary", "operator": "DoesNotExist"}
            ]
        }
    }"#;
    assert_eq!(match_label_selector(doc, NGINX_POD), codes::MATCH);
    assert_eq!(match_label_selector(doc, r#"{"app":"nginx","tier":"cache"}"#), codes::NO_MATCH);
    assert_eq!(match_label_selector(doc, r#"{"app":"nginx","canary":""}"#), codes::NO_MATCH);
}

#[test]
fn empty_document_matches_everything() {
    assert_eq!(match_label_selector("{}", NGINX_POD), codes::MATCH);
    assert_eq!(match_label_selector(r#"{"labelSelector":{}}"#, NGINX_POD), codes::MATCH);
}

#[test]
fn document_errors() {
    assert_eq!(match_label_selector("not-json", "{}"), codes::DOCUMENT_DECODE_ERROR);
    assert_eq!(
        match_label_selector(r#"{"labelSelector":{"matchLabels":{"a":1}}}"#, "{}"),
        codes::DOCUMENT_DECODE_ERROR
    );
    assert_eq!(match_label_selector("{}", "not-json"), codes::DOCUMENT_LABELS_DECODE_ERROR);

    let unknown = r#"{"labelSelector":{"matchExpressions":[{"key":"app","operator":"Matches","values":["x"]}]}}"#;
    assert_eq!(match_label_selector(unknown, "{}"), codes::CONVERSION_ERROR);

    let exists_with_values = r#"{"labelSelector":{"matchExpressions":[{"key":"app","operator":"Exists","values":["x"]}]}}"#;
    assert_eq!(match_label_selector(exists_with_values, "{}"), codes::CONVERSION_ERROR);

    let in_without_values = r#"{"labelSelector":{"matchExpressions":[{"key":"app","operator":"In","values":[]}]}}"#;
    assert_eq!(match_label_selector(in_without_values, "{}"), codes::CONVERSION_ERROR);
}

#[test]
fn malformed_documents_never_select_everything() {
    for doc in [
        "[]",
        r#"{"labelSelector":[]}"#,
        r#"{"labelSelector":{"matchExpressions":[{"key":"app"}]}}"#,
        r#"{"labelSelector":{"matchLabels":{"app":["nginx"]}}}"#,
    ] {
        assert_eq!(match_label_selector(doc, NGINX_POD), codes::DOCUMENT_DECODE_ERROR, "{doc}");
    }
}

// ============================================================================
// C ABI agrees with the safe API
// ============================================================================

#[test]
fn c_abi_reference_scenarios() {
    assert_eq!(c_match_label("app in (nginx)", NGINX_POD), 0);
    assert_eq!(c_match_label("app=nginx", NGINX_POD), 0);
    assert_eq!(c_match_label("app ?? nginx", NGINX_POD), -1);
    assert_eq!(c_match_label("app=nginx", "not-json"), -2);

    let doc = r#"{"labelSelector":{"matchLabels":{"app":"nginx"}}}"#;
    assert_eq!(c_match_label_selector(doc, NGINX_POD), 0);
    assert_eq!(c_match_label_selector("[", NGINX_POD), -2);
    assert_eq!(c_match_label_selector(doc, "["), -3);
}

fn selector_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-c]{1,2}",
        "![a-c]{1,2}",
        "[a-c]{1,2}(=|==|!=)[a-c]{0,2}",
        "[a-c]{1,2} (in|notin) \\([a-c]{1,2}(,[a-c]{1,2}){0,2}\\)",
        "[a-c](>|<)[0-9]{1,2}",
        "[a-c=!(),? ]{0,10}",
    ]
}

fn labels_json() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::btree_map("[a-c]{1,2}", "[a-c0-9]{0,2}", 0..4)
            .prop_map(|map| serde_json::to_string(&map).unwrap()),
        Just("not-json".to_string()),
        Just("null".to_string()),
    ]
}

proptest! {
    #[test]
    fn c_abi_matches_safe_api(selector in selector_text(), labels in labels_json()) {
        prop_assert_eq!(c_match_label(&selector, &labels), match_label(&selector, &labels));
    }

    #[test]
    fn codes_stay_in_range(selector in selector_text(), labels in labels_json()) {
        let code = match_label(&selector, &labels);
        prop_assert!((-2..=1).contains(&code));
    }
}
