// src/expression.rs
use serde_json::Value;

use crate::errors::{BindingError, Result};
use crate::parser::Parser;
use crate::scope::Scope;

#[derive(Debug, Clone, PartialEq)]
pub enum ENode {
    /// Bare name reference, resolved with no arguments.
    Ident(String),
    Call { name: String, args: Vec<ENode> },
    Str(String),
    Lit(Value),
}

pub fn parse_expr(input: &str) -> Result<ENode> {
    let mut p = EParser::new(input);
    let node = p.parse_node()?;
    p.parser.skip_ws();
    if !p.parser.eof() {
        return Err(BindingError::Parse(format!("trailing input in `{}`", input.trim())));
    }
    Ok(node)
}

struct EParser<'a> {
    parser: Parser<'a>,
}

impl<'a> EParser<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            parser: Parser::new(s),
        }
    }

    fn parse_node(&mut self) -> Result<ENode> {
        self.parser.skip_ws();
        match self.parser.peek_char() {
            Some('"') | Some('\'') => return Ok(ENode::Str(self.parser.parse_quoted_string()?)),
            Some(c) if c == '-' || c.is_ascii_digit() => {
                return Ok(ENode::Lit(self.parser.parse_number_literal()?))
            }
            _ => {}
        }
        let name = self.parser.parse_identifier()?;
        self.parser.skip_ws();
        if self.parser.consume_char('(') {
            let args = self.parse_args()?;
            self.parser.expect(')')?;
            return Ok(ENode::Call { name, args });
        }
        Ok(match name.as_str() {
            "true" => ENode::Lit(Value::Bool(true)),
            "false" => ENode::Lit(Value::Bool(false)),
            "nil" | "null" => ENode::Lit(Value::Null),
            _ => ENode::Ident(name),
        })
    }

    fn parse_args(&mut self) -> Result<Vec<ENode>> {
        let mut out = Vec::new();
        self.parser.skip_ws();
        if self.parser.peek_char() == Some(')') {
            return Ok(out);
        }
        loop {
            out.push(self.parse_node()?);
            self.parser.skip_ws();
            if self.parser.consume_char(',') {
                continue;
            }
            break;
        }
        Ok(out)
    }
}

/// Evaluate AST node against `scope`. Every name goes through the scope.
pub fn eval_ast(node: &ENode, scope: &dyn Scope) -> Result<Value> {
    match node {
        ENode::Str(s) => Ok(Value::String(s.clone())),
        ENode::Lit(v) => Ok(v.clone()),
        ENode::Ident(name) => scope.resolve(name, &[], None),
        ENode::Call { name, args } => {
            let args = args
                .iter()
                .map(|a| eval_ast(a, scope))
                .collect::<Result<Vec<_>>>()?;
            scope.resolve(name, &args, None)
        }
    }
}

/// Parse and evaluate a single expression, e.g. `greet("world")`.
pub fn eval(expr: &str, scope: &dyn Scope) -> Result<Value> {
    let ast = parse_expr(expr)?;
    eval_ast(&ast, scope)
}
