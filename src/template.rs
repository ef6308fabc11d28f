use serde_json::Value;
use tracing::trace;

use crate::errors::{BindingError, Result};
use crate::expression;
use crate::options::TemplateOptions;
use crate::scope::Scope;

/// Render `template` with the default `<%= expr %>` delimiters.
pub fn render(template: &str, scope: &dyn Scope) -> Result<String> {
    render_with(template, scope, &TemplateOptions::default())
}

/// Render `template`, replacing each output tag with its expression's value
/// and dropping comment tags. Strings are inserted as-is, `null` as nothing,
/// anything else as JSON.
pub fn render_with(template: &str, scope: &dyn Scope, opts: &TemplateOptions) -> Result<String> {
    if opts.open.is_empty() || opts.close.is_empty() || opts.comment.is_empty() {
        return Err(BindingError::Parse("empty template delimiter".into()));
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((at, is_comment)) = next_tag(rest, opts) {
        out.push_str(&rest[..at]);
        let open_len = if is_comment { opts.comment.len() } else { opts.open.len() };
        let body = &rest[at + open_len..];
        let end = body
            .find(opts.close.as_str())
            .ok_or_else(|| BindingError::Parse(format!("unterminated tag at byte {}", template.len() - rest.len() + at)))?;
        if !is_comment {
            let expr = body[..end].trim();
            trace!(expr = %expr, "render tag");
            push_value(&mut out, expression::eval(expr, scope)?);
        }
        rest = &body[end + opts.close.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

// Earliest output or comment tag; the longer opener wins on a tie.
fn next_tag(s: &str, opts: &TemplateOptions) -> Option<(usize, bool)> {
    let output = s.find(opts.open.as_str());
    let comment = s.find(opts.comment.as_str());
    match (output, comment) {
        (Some(o), Some(c)) if c < o => Some((c, true)),
        (Some(o), Some(c)) if c == o => Some((o, opts.comment.len() > opts.open.len())),
        (Some(o), _) => Some((o, false)),
        (None, Some(c)) => Some((c, true)),
        (None, None) => None,
    }
}

fn push_value(out: &mut String, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(&s),
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SelectiveBinding;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn renders_forwarded_and_bound_names() {
        let target = json!({"server_name": "blah.com", "port": 8080});
        let mut binder = SelectiveBinding::new(&target);
        binder.forward(["server_name", "port"]).set("empty", Value::Null);
        let out = render(
            "server_name <%= server_name %>:<%= port %>;<%= empty %><%# note %>",
            &binder.get_context(),
        )
        .unwrap();
        assert_eq!(out, "server_name blah.com:8080;");
    }

    #[test]
    fn custom_delimiters() {
        let target = json!({"a": [1, 2]});
        let ctx = SelectiveBinding::new(&target).get_context();
        let opts = TemplateOptions::default().with_open("{{").with_close("}}").with_comment("{#");
        assert_eq!(render_with("x{{ 'lit' }}{# hidden }}y", &ctx, &opts).unwrap(), "xlity");
    }

    #[test]
    fn unterminated_tag() {
        let target = json!({});
        let ctx = SelectiveBinding::new(&target).get_context();
        let err = render("ok <%= oops", &ctx).unwrap_err();
        assert_eq!(err, BindingError::Parse("unterminated tag at byte 3".into()));
    }

    #[test]
    fn hidden_name_fails_render() {
        let target = json!({"secret": "x"});
        let ctx = SelectiveBinding::new(&target).get_context();
        assert!(render("<%= secret %>", &ctx).unwrap_err().is_name_not_found());
    }

    #[test]
    fn text_without_tags_is_unchanged() {
        let target = json!({});
        let ctx = SelectiveBinding::new(&target).get_context();
        assert_eq!(render("plain % text", &ctx).unwrap(), "plain % text");
    }
}
