//! Selective bindings: evaluation contexts that expose only a whitelisted
//! subset of an object's members, for rendering templates against it.
//!
//! ```
//! use selective_binding::{render, Bindable};
//! use serde_json::json;
//!
//! let obj = json!({"my_attr": "shown", "modify_something": "hidden"});
//! let ctx = obj.selective_binding(["my_attr"]);
//!
//! assert_eq!(render("<%= my_attr %>", &ctx).unwrap(), "shown");
//! assert!(render("<%= modify_something %>", &ctx).is_err());
//! ```

pub mod binding;
pub mod callback;
pub mod errors;
pub mod expression;
pub mod options;
pub mod scope;
pub mod target;
pub mod template;
mod parser;

pub use binding::{selective_binding, Bindable, Context, Rule, SelectiveBinding, FALLBACK_NAME};
pub use callback::Callback;
pub use errors::{BindingError, Result};
pub use expression::eval;
pub use options::TemplateOptions;
pub use scope::Scope;
pub use target::{Methods, Target};
pub use template::{render, render_with};

/// Gem-compatible version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
