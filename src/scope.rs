use serde_json::Value;

use crate::callback::Callback;
use crate::errors::Result;

/// Name-resolution environment queried by an expression evaluator.
///
/// A bare name reference is a call with no arguments. Implementations return
/// [`BindingError::NameNotFound`](crate::BindingError::NameNotFound) for names
/// they cannot resolve.
pub trait Scope {
    fn resolve(&self, name: &str, args: &[Value], block: Option<&Callback>) -> Result<Value>;
}
