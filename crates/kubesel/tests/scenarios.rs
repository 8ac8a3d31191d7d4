//! End-to-end selector scenarios across the text and document paths.

use std::collections::HashMap;

use kubesel::{parse, LabelSelector, LabelSet, Operator, Requirement, Selector, SelectorError};

fn labels(json: &str) -> LabelSet {
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn in_matches_present_value() {
    let selector = parse("app in (nginx)").unwrap();
    assert!(selector.matches(&labels(r#"{"app":"nginx","project":"nibiru"}"#)));
}

#[test]
fn equals_matches_present_value() {
    let selector = parse("app=nginx").unwrap();
    assert!(selector.matches(&labels(r#"{"app":"nginx","project":"nibiru"}"#)));
}

#[test]
fn in_misses_on_other_key() {
    let selector = parse("app in (nginx)").unwrap();
    assert!(!selector.matches(&labels(r#"{"app1":"nginx","project":"nibiru"}"#)));
}

#[test]
fn document_in_expression() {
    let doc: LabelSelector = serde_json::from_str(
        r#"{"matchExpressions":[{"key":"app","operator":"In","values":["nginx"]}]}"#,
    )
    .unwrap();
    assert!(doc.to_selector().unwrap().matches(&labels(r#"{"app":"nginx"}"#)));
}

#[test]
fn unknown_operator_token_is_syntax_error() {
    assert!(matches!(
        parse("app ?? nginx"),
        Err(SelectorError::Syntax { position: 4, .. })
    ));
}

// ============================================================================
// Empty selectors
// ============================================================================

#[test]
fn empty_text_and_empty_document_select_everything() {
    let from_text = parse("").unwrap();
    let from_doc = LabelSelector::new().to_selector().unwrap();
    for set in [
        LabelSet::new(),
        labels(r#"{"app":"nginx"}"#),
        labels(r#"{"a":"","b":"c"}"#),
    ] {
        assert!(from_text.matches(&set));
        assert!(from_doc.matches(&set));
    }
    assert_eq!(from_text, from_doc);
}

// ============================================================================
// Operator semantics
// ============================================================================

#[test]
fn negative_operators_match_absent_keys() {
    let empty = LabelSet::new();
    assert!(parse("app!=nginx").unwrap().matches(&empty));
    assert!(parse("app notin (nginx)").unwrap().matches(&empty));
    assert!(parse("!app").unwrap().matches(&empty));
    assert!(!parse("app=nginx").unwrap().matches(&empty));
    assert!(!parse("app in (nginx)").unwrap().matches(&empty));
    assert!(!parse("app").unwrap().matches(&empty));
}

#[test]
fn duplicate_keys_narrow_the_match() {
    let selector = parse("env in (prod,staging),env!=staging").unwrap();
    assert!(selector.matches(&labels(r#"{"env":"prod"}"#)));
    assert!(!selector.matches(&labels(r#"{"env":"staging"}"#)));
    assert!(!selector.matches(&labels(r#"{"env":"dev"}"#)));
}

#[test]
fn numeric_ordering() {
    let selector = parse("replicas>2,replicas<10").unwrap();
    assert!(selector.matches(&labels(r#"{"replicas":"3"}"#)));
    assert!(!selector.matches(&labels(r#"{"replicas":"2"}"#)));
    assert!(!selector.matches(&labels(r#"{"replicas":"10"}"#)));
    assert!(!selector.matches(&labels(r#"{"replicas":"three"}"#)));
    assert!(!selector.matches(&LabelSet::new()));
}

#[test]
fn prefixed_keys_end_to_end() {
    let selector = parse("app.kubernetes.io/name=web,!example.com/canary").unwrap();
    assert!(selector.matches(&labels(r#"{"app.kubernetes.io/name":"web"}"#)));
    assert!(!selector.matches(&labels(
        r#"{"app.kubernetes.io/name":"web","example.com/canary":"true"}"#
    )));
}

#[test]
fn works_with_plain_maps() {
    let mut map = HashMap::new();
    map.insert("app".to_string(), "nginx".to_string());
    assert!(parse("app=nginx").unwrap().matches(&map));
    assert!(!parse("app=envoy").unwrap().matches(&map));
}

// ============================================================================
// Text and document agree
// ============================================================================

#[test]
fn text_and_document_are_equivalent() {
    let pairs = [
        (
            "app=nginx",
            LabelSelector::new().match_label("app", "nginx"),
        ),
        (
            "app in (a,b),!canary",
            LabelSelector::new()
                .match_expression("app", "In", ["a", "b"])
                .match_expression("canary", "DoesNotExist", Vec::<String>::new()),
        ),
        (
            "tier notin (cache),app",
            LabelSelector::new()
                .match_expression("tier", "NotIn", ["cache"])
                .match_expression("app", "Exists", Vec::<String>::new()),
        ),
    ];
    let samples = [
        LabelSet::new(),
        labels(r#"{"app":"nginx"}"#),
        labels(r#"{"app":"a","tier":"web"}"#),
        labels(r#"{"app":"b","canary":"yes"}"#),
        labels(r#"{"tier":"cache","app":"x"}"#),
    ];
    for (text, doc) in pairs {
        let parsed = parse(text).unwrap();
        let converted = doc.to_selector().unwrap();
        assert_eq!(parsed.to_string(), converted.to_string(), "{text}");
        for sample in &samples {
            assert_eq!(parsed.matches(sample), converted.matches(sample), "{text} vs {sample}");
        }
    }
}

// ============================================================================
// Canonical form
// ============================================================================

#[test]
fn canonical_form_is_normalized() {
    let selector = parse("  b in ( z , y ),a ,  ! c , d == e ").unwrap();
    assert_eq!(selector.to_string(), "b in (y,z),a,!c,d==e");
    assert_eq!(parse(&selector.to_string()).unwrap(), selector);
}

#[test]
fn builder_and_parser_agree() {
    let built = Selector::new()
        .add(Requirement::new("app", Operator::In, ["nginx"]).unwrap())
        .add(Requirement::does_not_exist("canary").unwrap());
    assert_eq!(built, parse("app in (nginx),!canary").unwrap());
}

#[test]
fn serializes_requirements() {
    let selector = parse("app in (nginx),!canary").unwrap();
    let json = serde_json::to_value(&selector).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"key": "app", "operator": "In", "values": ["nginx"]},
            {"key": "canary", "operator": "DoesNotExist", "values": []}
        ])
    );
}

#[test]
fn shared_across_threads() {
    let selector = parse("app=nginx").unwrap();
    std::thread::scope(|scope| {
        for i in 0..4 {
            let selector = &selector;
            scope.spawn(move || {
                let set = if i % 2 == 0 {
                    labels(r#"{"app":"nginx"}"#)
                } else {
                    labels(r#"{"app":"envoy"}"#)
                };
                assert_eq!(selector.matches(&set), i % 2 == 0);
            });
        }
    });
}
