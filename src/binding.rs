use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::callback::Callback;
use crate::errors::{BindingError, Result};
use crate::scope::Scope;
use crate::target::Target;

/// Reserved name holding the fallback rule.
pub const FALLBACK_NAME: &str = "method_missing";

/// How a registered name resolves.
#[derive(Clone, Debug)]
pub enum Rule {
    /// Delegate to the target's member of the same name.
    Forward,
    /// Always this value; call arguments are discarded.
    Value(Value),
    /// Call with the reference's arguments and block.
    Callback(Callback),
}

impl Rule {
    /// A non-null literal wins over a callback given alongside it.
    fn from_parts(value: Option<Value>, callback: Option<Callback>) -> Self {
        match (value.filter(|v| !v.is_null()), callback) {
            (Some(v), _) => Rule::Value(v),
            (None, Some(f)) => Rule::Callback(f),
            (None, None) => Rule::Value(Value::Null),
        }
    }
}

struct Table<'t> {
    target: &'t dyn Target,
    rules: IndexMap<String, Rule>,
}

/// Builder for a restricted evaluation context around a target.
///
/// Only names that are forwarded or bound are visible through the context;
/// everything else fails with [`BindingError::NameNotFound`] unless a fallback
/// is installed. Registering a name again replaces its rule.
///
/// ```
/// use selective_binding::{eval, SelectiveBinding};
/// use serde_json::json;
///
/// let server = json!({"name": "blah.com", "secret": "hunter2"});
/// let mut binder = SelectiveBinding::new(&server);
/// binder.forward(["name"]).set("port", json!(8080));
///
/// let ctx = binder.get_context();
/// assert_eq!(eval("name", &ctx).unwrap(), json!("blah.com"));
/// assert!(eval("secret", &ctx).is_err());
/// ```
pub struct SelectiveBinding<'t> {
    table: Rc<RefCell<Table<'t>>>,
}

impl<'t> SelectiveBinding<'t> {
    pub fn new(target: &'t dyn Target) -> Self {
        Self {
            table: Rc::new(RefCell::new(Table {
                target,
                rules: IndexMap::new(),
            })),
        }
    }

    fn insert(&mut self, name: String, rule: Rule) {
        self.table.borrow_mut().rules.insert(name, rule);
    }

    /// Bind `name` directly. A non-null `value` is used even when `callback`
    /// is also given; the callback only applies when `value` is absent.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        value: Option<Value>,
        callback: Option<Callback>,
    ) -> &mut Self {
        let name = name.into();
        let rule = Rule::from_parts(value, callback);
        debug!(name = %name, rule = ?rule, "bind");
        self.insert(name, rule);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.bind(name, Some(value), None)
    }

    pub fn set_with(&mut self, name: impl Into<String>, callback: Callback) -> &mut Self {
        self.bind(name, None, Some(callback))
    }

    /// Bind every entry of `mapping` as a literal, in the mapping's order.
    pub fn bind_many<I, K>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (name, value) in mapping {
            self.bind(name, Some(value), None);
        }
        self
    }

    /// Expose the target's members with these names.
    pub fn forward<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            debug!(name = %name, "forward");
            self.insert(name, Rule::Forward);
        }
        self
    }

    /// Install the fallback used for unregistered names. Does nothing when
    /// neither a (non-null) value nor a callback is given.
    ///
    /// A fallback callback receives the missing name followed by the
    /// reference's arguments.
    pub fn set_fallback(&mut self, value: Option<Value>, callback: Option<Callback>) -> &mut Self {
        let value = value.filter(|v| !v.is_null());
        if value.is_none() && callback.is_none() {
            return self;
        }
        self.bind(FALLBACK_NAME, value, callback)
    }

    /// The evaluation context. It shares this builder's table, so later
    /// registrations show up in contexts handed out earlier.
    pub fn get_context(&self) -> Context<'t> {
        Context {
            table: Rc::clone(&self.table),
        }
    }
}

/// Evaluation context produced by [`SelectiveBinding::get_context`].
#[derive(Clone)]
pub struct Context<'t> {
    table: Rc<RefCell<Table<'t>>>,
}

impl<'t> Context<'t> {
    /// Registered names in registration order, fallback excluded.
    pub fn names(&self) -> Vec<String> {
        self.table
            .borrow()
            .rules
            .keys()
            .filter(|k| k.as_str() != FALLBACK_NAME)
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.borrow().rules.contains_key(name)
    }

    pub fn has_fallback(&self) -> bool {
        self.contains(FALLBACK_NAME)
    }

    /// The rule currently registered for `name`.
    pub fn rule(&self, name: &str) -> Option<Rule> {
        self.table.borrow().rules.get(name).cloned()
    }

    // Clone the rule out so callbacks may resolve through this context again.
    fn lookup(&self, name: &str) -> (Option<Rule>, &'t dyn Target) {
        let table = self.table.borrow();
        (table.rules.get(name).cloned(), table.target)
    }

    fn dispatch(
        target: &dyn Target,
        name: &str,
        rule: Rule,
        args: &[Value],
        block: Option<&Callback>,
    ) -> Result<Value> {
        match rule {
            Rule::Forward => target.send(name, args, block),
            Rule::Value(v) => Ok(v),
            Rule::Callback(f) => f.call(args, block),
        }
    }
}

impl Scope for Context<'_> {
    fn resolve(&self, name: &str, args: &[Value], block: Option<&Callback>) -> Result<Value> {
        let (rule, target) = self.lookup(name);
        if let Some(rule) = rule {
            trace!(name = %name, "resolved");
            return Self::dispatch(target, name, rule, args, block);
        }

        let (fallback, _) = self.lookup(FALLBACK_NAME);
        match fallback {
            Some(rule) => {
                trace!(name = %name, "resolved through fallback");
                let mut missing = Vec::with_capacity(args.len() + 1);
                missing.push(Value::String(name.to_string()));
                missing.extend_from_slice(args);
                Self::dispatch(target, FALLBACK_NAME, rule, &missing, block)
            }
            None => Err(BindingError::NameNotFound(name.to_string())),
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context[{}]", self.names().iter().join(", "))?;
        if self.has_fallback() {
            f.write_str(" + fallback")?;
        }
        Ok(())
    }
}

/// Build a context around `target` in one go: forward `names`, then apply
/// `overrides` (which beat forwarded names), then install `fallback`.
pub fn selective_binding<'t, I, S>(
    target: &'t dyn Target,
    names: I,
    overrides: Option<Map<String, Value>>,
    fallback: Option<Callback>,
) -> Context<'t>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut binder = SelectiveBinding::new(target);
    binder.forward(names);
    if let Some(overrides) = overrides {
        binder.bind_many(overrides);
    }
    binder.set_fallback(None, fallback);
    binder.get_context()
}

/// Gives every [`Target`] a `selective_binding` method.
pub trait Bindable: Target + Sized {
    fn selective_binding<I, S>(&self, names: I) -> Context<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        selective_binding(self, names, None, None)
    }
}

impl<T: Target> Bindable for T {}
