//! Permissive literal decoder.
//!
//! Accepts the literal subset of a general-purpose expression language on
//! top of JSON: single-quoted strings, bare keys, `True`/`False`/`None`,
//! trailing commas, tuples, unary signs on numbers. Every other expression
//! form is reported as an [`UnsafeConstruct`] and never evaluated.

use super::error::UnsafeConstruct;
use serde_json::{Map, Number, Value};

const MAX_DEPTH: usize = 128;

/// Names that are never literal values, even without a following call.
const KEYWORDS: &[&str] = &[
    "lambda", "import", "from", "exec", "eval", "compile", "open", "globals", "locals",
    "getattr", "setattr", "delattr", "vars", "input", "breakpoint", "yield", "await", "async",
    "not", "and", "or", "if", "else", "for", "in", "is", "del", "def", "class", "return",
];

const OPERATORS: &[char] = &[
    '+', '-', '*', '/', '%', '@', '|', '&', '^', '~', '<', '>', '=', '!',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LiteralError {
    Unsafe {
        construct: UnsafeConstruct,
        offset: usize,
    },
    Syntax {
        message: String,
        offset: usize,
    },
}

impl LiteralError {
    pub(crate) fn describe(&self) -> String {
        match self {
            LiteralError::Unsafe { construct, offset } => {
                format!("{} at offset {}", construct, offset)
            }
            LiteralError::Syntax { message, offset } => {
                format!("{} at offset {}", message, offset)
            }
        }
    }
}

/// Decode `input` as a single literal, rejecting trailing content.
pub(crate) fn parse_permissive(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_value()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.after_value(c, &value)),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn syntax(&self, message: impl Into<String>) -> LiteralError {
        LiteralError::Syntax {
            message: message.into(),
            offset: self.pos,
        }
    }

    fn unsafe_at(&self, construct: UnsafeConstruct, offset: usize) -> LiteralError {
        LiteralError::Unsafe { construct, offset }
    }

    /// Classify the character that follows a complete value where a
    /// separator or closer was expected.
    fn after_value(&self, c: char, value: &Value) -> LiteralError {
        let subject = match value {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        };
        match c {
            '(' => self.unsafe_at(UnsafeConstruct::Call(subject), self.pos),
            '.' => self.unsafe_at(UnsafeConstruct::AttributeAccess(subject), self.pos),
            '[' => self.unsafe_at(UnsafeConstruct::Subscript(subject), self.pos),
            c if OPERATORS.contains(&c) => self.unsafe_at(UnsafeConstruct::Operator(c), self.pos),
            c => self.syntax(format!("unexpected `{}` after value", c)),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        let Some(c) = self.peek() else {
            return Err(self.syntax("unexpected end of input"));
        };

        match c {
            '{' => self.nested(Self::parse_object),
            '[' => self.nested(|p| p.parse_sequence(']')),
            '(' => self.nested(Self::parse_tuple),
            '"' | '\'' => self.parse_string(false).map(Value::String),
            '0'..='9' | '.' => self.parse_number(),
            '-' | '+' => match self.peek_second() {
                Some(d) if d.is_ascii_digit() || d == '.' => self.parse_number(),
                _ => Err(self.unsafe_at(UnsafeConstruct::Operator(c), self.pos)),
            },
            c if c.is_alphabetic() || c == '_' => self.parse_name_value(),
            c if OPERATORS.contains(&c) => {
                Err(self.unsafe_at(UnsafeConstruct::Operator(c), self.pos))
            }
            c => Err(self.syntax(format!("unexpected `{}`", c))),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.syntax("nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.bump(); // '{'
        let mut map = Map::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                None => return Err(self.syntax("unterminated object")),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_ws();
            match self.peek() {
                Some(':') => {
                    self.bump();
                }
                Some(',') | Some('}') => {
                    return Err(self.syntax("set literals are not supported"));
                }
                Some(c) => return Err(self.after_value(c, &Value::String(key))),
                None => return Err(self.syntax("unterminated object")),
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => {
                    let last = map.values().last().cloned().unwrap_or(Value::Null);
                    return Err(self.after_value(c, &last));
                }
                None => return Err(self.syntax("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(false),
            Some(c) if c.is_alphabetic() || c == '_' => {
                let start = self.pos;
                let name = self.read_identifier();
                self.skip_ws();
                if self.peek() == Some(':') {
                    return Ok(name.to_string());
                }
                // Not a bare key; treat it as the start of a value expression.
                self.pos = start;
                match self.parse_name_value()? {
                    Value::String(s) => Ok(s),
                    other => Ok(other.to_string()),
                }
            }
            _ => match self.parse_value()? {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.syntax("object keys must be strings, numbers or names")),
            },
        }
    }

    fn parse_tuple(&mut self) -> Result<Value, LiteralError> {
        self.bump(); // '('
        let mut items = Vec::new();
        let mut saw_comma = false;

        loop {
            self.skip_ws();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    break;
                }
                None => return Err(self.syntax("unterminated tuple")),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    saw_comma = true;
                    self.bump();
                }
                Some(')') => {}
                Some(c) => return Err(self.after_value(c, items.last().unwrap_or(&Value::Null))),
                None => return Err(self.syntax("unterminated tuple")),
            }
        }

        // `(x)` is a parenthesized value, not a one-element tuple.
        if items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::Array(items))
    }

    fn parse_sequence(&mut self, close: char) -> Result<Value, LiteralError> {
        self.bump(); // opener
        let mut items = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                None => return Err(self.syntax("unterminated array")),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(c) => return Err(self.after_value(c, items.last().unwrap_or(&Value::Null))),
                None => return Err(self.syntax("unterminated array")),
            }
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        &src[start..self.pos]
    }

    /// A name in value position: a literal keyword, a string prefix, or
    /// something that would need evaluation.
    fn parse_name_value(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let name = self.read_identifier();

        if matches!(self.peek(), Some('"') | Some('\'')) {
            let prefix = name.to_ascii_lowercase();
            if prefix.contains('f') {
                return Err(self.unsafe_at(UnsafeConstruct::FormatString, start));
            }
            if matches!(prefix.as_str(), "u" | "r" | "b" | "br" | "rb") {
                return self.parse_string(prefix.contains('r')).map(Value::String);
            }
            return Err(self.syntax(format!("unknown string prefix `{}`", name)));
        }

        match name {
            "true" | "True" => return Ok(Value::Bool(true)),
            "false" | "False" => return Ok(Value::Bool(false)),
            "null" | "None" => return Ok(Value::Null),
            _ => {}
        }

        if name.starts_with("__") {
            return Err(self.unsafe_at(UnsafeConstruct::DunderName(name.to_string()), start));
        }
        if KEYWORDS.contains(&name) {
            return Err(self.unsafe_at(UnsafeConstruct::Keyword(name.to_string()), start));
        }

        self.skip_ws();
        match self.peek() {
            Some('(') => Err(self.unsafe_at(UnsafeConstruct::Call(name.to_string()), start)),
            Some('.') => Err(self.unsafe_at(
                UnsafeConstruct::AttributeAccess(name.to_string()),
                start,
            )),
            Some('[') => Err(self.unsafe_at(UnsafeConstruct::Subscript(name.to_string()), start)),
            _ => Err(LiteralError::Syntax {
                message: format!("bare name `{}` is not a literal", name),
                offset: start,
            }),
        }
    }

    fn parse_string(&mut self, raw: bool) -> Result<String, LiteralError> {
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return Err(self.syntax("expected string"));
        };
        let mut out = String::new();

        loop {
            let Some(c) = self.bump() else {
                return Err(LiteralError::Syntax {
                    message: "unterminated string".to_string(),
                    offset: start,
                });
            };
            match c {
                c if c == quote => return Ok(out),
                '\\' if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                '\\' => self.parse_escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let Some(c) = self.bump() else {
            return Err(self.syntax("unterminated escape"));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            '\\' | '\'' | '"' | '/' => out.push(c),
            '\n' => {}
            'x' => {
                let code = self.read_hex(2)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => {
                let code = self.read_hex(4)?;
                out.push(self.decode_utf16_escape(code)?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn decode_utf16_escape(&mut self, high: u32) -> Result<char, LiteralError> {
        if !(0xD800..0xDC00).contains(&high) {
            return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        if self.src[self.pos..].starts_with("\\u") {
            let resume = self.pos;
            self.pos += 2;
            let low = self.read_hex(4)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = resume;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn read_hex(&mut self, digits: usize) -> Result<u32, LiteralError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or_else(|| self.syntax("truncated escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.syntax("invalid hex escape"))?;
        self.pos = end;
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        while let Some(c) = self.peek() {
            let exponent_sign =
                (c == '+' || c == '-') && matches!(self.src[..self.pos].chars().last(), Some('e' | 'E'));
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text: String = self.src[start..self.pos]
            .chars()
            .filter(|c| *c != '_' && *c != '+')
            .collect();
        let invalid = || LiteralError::Syntax {
            message: format!("invalid number `{}`", &self.src[start..self.pos]),
            offset: start,
        };

        if !text.contains(['.', 'e', 'E']) {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
            if let Ok(n) = text.parse::<u64>() {
                return Ok(Value::Number(n.into()));
            }
        }
        let float: f64 = text.parse().map_err(|_| invalid())?;
        Number::from_f64(float).map(Value::Number).ok_or_else(invalid)
    }
}
