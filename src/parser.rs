// src/parser.rs
use serde_json::Value;

use crate::errors::BindingError;

#[derive(Debug)]
pub enum ParseError {
    InvalidSyntax(String),
}

impl From<ParseError> for BindingError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::InvalidSyntax(msg) => BindingError::Parse(msg),
        }
    }
}

/// Character-level cursor over an expression.
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`, optionally ending in `?` or `!`.
    pub fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.i;
        match self.peek_char() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => self.i += 1,
            _ => return Err(ParseError::InvalidSyntax("identifier expected".into())),
        }
        while let Some(c) = self.peek_char() {
            if c == '_' || c.is_ascii_alphanumeric() {
                self.i += 1;
            } else {
                break;
            }
        }
        if matches!(self.peek_char(), Some('?') | Some('!')) {
            self.i += 1;
        }
        Ok(self.s[start..self.i].to_string())
    }

    pub fn parse_number_literal(&mut self) -> Result<Value, ParseError> {
        let start = self.i;
        if self.peek_char() == Some('-') {
            self.i += 1;
        }
        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.i += 1;
            self.skip_digits();
        }
        let s = &self.s[start..self.i];
        if s.is_empty() || s == "-" {
            return Err(ParseError::InvalidSyntax("number expected".into()));
        }
        if s.contains('.') {
            let f: f64 = s
                .parse()
                .map_err(|_| ParseError::InvalidSyntax(format!("bad float `{s}`")))?;
            Ok(Value::from(f))
        } else {
            let i: i64 = s
                .parse()
                .map_err(|_| ParseError::InvalidSyntax(format!("bad integer `{s}`")))?;
            Ok(Value::from(i))
        }
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    pub fn parse_quoted_string(&mut self) -> Result<String, ParseError> {
        let quote = self
            .peek_char()
            .ok_or_else(|| ParseError::InvalidSyntax("string".into()))?;
        if quote != '\'' && quote != '"' {
            return Err(ParseError::InvalidSyntax("expected quoted string".into()));
        }
        self.i += 1;
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            self.i += c.len_utf8();
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                if let Some(nc) = self.peek_char() {
                    self.i += nc.len_utf8();
                    match nc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\\' => out.push('\\'),
                        '"' => out.push('"'),
                        '\'' => out.push('\''),
                        _ => {
                            out.push('\\');
                            out.push(nc);
                        }
                    }
                } else {
                    break;
                }
            } else {
                out.push(c);
            }
        }
        Err(ParseError::InvalidSyntax("unterminated string".into()))
    }

    pub fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(ParseError::InvalidSyntax(format!("expected '{}'", c)))
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn identifiers() {
        let mut p = Parser::new("get_some_value? rest");
        assert_eq!(p.parse_identifier().unwrap(), "get_some_value?");
        assert!(Parser::new("1abc").parse_identifier().is_err());
    }

    #[test]
    fn numbers() {
        assert_eq!(Parser::new("-42").parse_number_literal().unwrap(), json!(-42));
        assert_eq!(Parser::new("1.5").parse_number_literal().unwrap(), json!(1.5));
        assert!(Parser::new("-").parse_number_literal().is_err());
    }

    #[test]
    fn strings_with_escapes() {
        let mut p = Parser::new(r#"'it\'s' "é\n""#);
        assert_eq!(p.parse_quoted_string().unwrap(), "it's");
        p.skip_ws();
        assert_eq!(p.parse_quoted_string().unwrap(), "é\n");
        assert!(p.eof());
        assert!(Parser::new("'open").parse_quoted_string().is_err());
    }
}
