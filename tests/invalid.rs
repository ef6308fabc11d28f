mod common;

use selective_binding::{eval, render, BindingError, SelectiveBinding};
use serde_json::json;

#[test]
fn test_unknown_name_without_fallback() {
    let target = json!({"a": 1});
    let ctx = SelectiveBinding::new(&target).get_context();
    assert_eq!(eval("a", &ctx), Err(BindingError::NameNotFound("a".into())));
}

#[test]
fn test_forwarded_name_missing_on_target() {
    let target = json!({"a": 1});
    let mut binder = SelectiveBinding::new(&target);
    binder.forward(["b"]);
    assert_eq!(
        eval("b", &binder.get_context()),
        Err(BindingError::NoSuchMember("b".into()))
    );
}

#[test]
fn test_bad_expression_syntax() {
    let target = json!({});
    let ctx = SelectiveBinding::new(&target).get_context();
    assert!(matches!(eval("f(1,", &ctx), Err(BindingError::Parse(_))));
    assert!(matches!(render("<%= f( %>", &ctx), Err(BindingError::Parse(_))));
}

#[test]
fn test_empty_fallback_does_not_mask_errors() {
    let target = json!({});
    let mut binder = SelectiveBinding::new(&target);
    binder.set_fallback(None, None);
    assert!(eval("anything", &binder.get_context())
        .unwrap_err()
        .is_name_not_found());
}
