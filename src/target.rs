use indexmap::IndexMap;
use serde_json::Value;

use crate::callback::Callback;
use crate::errors::{BindingError, Result};

/// An object whose members can be exposed through a selective binding.
///
/// `send` invokes the member called `member` with the given arguments and
/// trailing block. Implementations report unknown members with
/// [`BindingError::NoSuchMember`].
pub trait Target {
    fn send(&self, member: &str, args: &[Value], block: Option<&Callback>) -> Result<Value>;
}

/// JSON objects expose their keys as attribute readers. Arguments are ignored.
impl Target for Value {
    fn send(&self, member: &str, _args: &[Value], _block: Option<&Callback>) -> Result<Value> {
        self.as_object()
            .and_then(|obj| obj.get(member))
            .cloned()
            .ok_or_else(|| BindingError::NoSuchMember(member.to_string()))
    }
}

/// A target assembled at runtime from named callbacks.
#[derive(Clone, Debug, Default)]
pub struct Methods {
    inner: IndexMap<String, Callback>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a method.
    pub fn define(mut self, name: impl Into<String>, f: Callback) -> Self {
        self.register(name, f);
        self
    }

    /// Define an attribute reader returning `value`.
    pub fn attr(self, name: impl Into<String>, value: Value) -> Self {
        self.define(name, Callback::constant(value))
    }

    pub fn register(&mut self, name: impl Into<String>, f: Callback) {
        self.inner.insert(name.into(), f);
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.inner.get(name)
    }
}

impl Target for Methods {
    fn send(&self, member: &str, args: &[Value], block: Option<&Callback>) -> Result<Value> {
        match self.get(member) {
            Some(f) => f.call(args, block),
            None => Err(BindingError::NoSuchMember(member.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_object_members() {
        let obj = json!({"name": "blah.com", "port": 80});
        assert_eq!(obj.send("name", &[], None).unwrap(), json!("blah.com"));
        assert_eq!(obj.send("port", &[json!("ignored")], None).unwrap(), json!(80));
        assert_eq!(
            obj.send("missing", &[], None),
            Err(BindingError::NoSuchMember("missing".into()))
        );
    }

    #[test]
    fn non_object_has_no_members() {
        assert!(json!([1, 2]).send("len", &[], None).is_err());
    }

    #[test]
    fn methods_dispatch_and_redefine() {
        let target = Methods::new()
            .attr("greeting", json!("hello"))
            .define("sum", Callback::new(|args| {
                Ok(json!(args.iter().filter_map(Value::as_i64).sum::<i64>()))
            }))
            .attr("greeting", json!("hi"));
        assert_eq!(target.send("greeting", &[], None).unwrap(), json!("hi"));
        assert_eq!(target.send("sum", &[json!(2), json!(3)], None).unwrap(), json!(5));
        assert!(target.send("nope", &[], None).is_err());
    }
}
