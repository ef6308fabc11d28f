#![allow(dead_code)]

use selective_binding::{eval, Context, Scope};
use serde_json::Value;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn assert_binding_value(ctx: &Context<'_>, expected: &[(&str, Value)]) {
    for (name, value) in expected {
        assert_eq!(&eval(name, ctx).unwrap(), value, "value of `{name}`");
    }
}

pub fn assert_not_binding_value(ctx: &dyn Scope, names: &[&str]) {
    for name in names {
        let err = ctx.resolve(name, &[], None).unwrap_err();
        assert!(err.is_name_not_found(), "`{name}` resolved to error {err:?}");
    }
}
