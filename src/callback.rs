use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use crate::errors::Result;

type Body = dyn Fn(&[Value], Option<&Callback>) -> Result<Value>;

/// A shared callable taking positional arguments and an optional trailing block.
///
/// Cloning is cheap; clones call the same closure.
#[derive(Clone)]
pub struct Callback {
    inner: Rc<Body>,
}

impl Callback {
    /// Callback that only looks at its arguments. A trailing block is ignored.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        let inner: Rc<Body> = Rc::new(move |args: &[Value], _block: Option<&Callback>| f(args));
        Self { inner }
    }

    /// Callback that also receives the trailing block of the call.
    pub fn with_block<F>(f: F) -> Self
    where
        F: Fn(&[Value], Option<&Callback>) -> Result<Value> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Callback returning a clone of `value` on every call.
    pub fn constant(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    pub fn call(&self, args: &[Value], block: Option<&Callback>) -> Result<Value> {
        (self.inner)(args, block)
    }

    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}
