//! ARSON parsing.
//!
//! A [`Parser`] walks the input with a byte cursor and builds the value
//! tree by recursive descent. The shape of the next value is decided by
//! its first significant character: `{` objects, `[` lists, quotes for
//! strings, sign/digit for numbers, anything else a bare literal. A
//! pending `@tag` is validated against that shape before the value is
//! built, and applied to it afterwards.
//!
//! Parsing is single-pass over a fully materialized buffer, with no
//! backtracking beyond a one-token lookahead for exponents. Nesting depth
//! is capped so hostile input cannot exhaust the stack.

use crate::codec::Codec;
use crate::tags::{self, Shape};
use crate::{Error, Map, Result, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::ToPrimitive;

/// Maximum nesting depth before parsing fails with a syntax error.
const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    codec: &'a Codec,
    transform: Option<&'a mut dyn FnMut(Value) -> Value>,
}

enum Scanned {
    Int(BigInt),
    Float(f64),
}

enum StrAccum {
    Text(String),
    Bytes(Vec<u8>),
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        input: &'a str,
        codec: &'a Codec,
        transform: Option<&'a mut dyn FnMut(Value) -> Value>,
    ) -> Self {
        Parser {
            input,
            pos: 0,
            depth: 0,
            codec,
            transform,
        }
    }

    /// Parses the single root value and rejects trailing content.
    pub(crate) fn parse_document(mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos != self.input.len() {
            let rest: String = self.input[self.pos..].chars().take(10).collect();
            return Err(Error::syntax_at(
                self.input,
                self.pos,
                format!("trailing content: {rest:?}"),
            ));
        }
        Ok(value)
    }

    // ---- scanner -------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skips runs of layout whitespace, byte-order marks and `#` comments.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | '\u{FEFF}' => self.bump(),
                '#' => {
                    self.bump();
                    while let Some(c) = self.peek() {
                        if c == '\r' || c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans an `@name` tag prefix, if present. The name must be
    /// identifier-shaped and must be followed by at least one space.
    fn scan_tag(&mut self) -> Result<Option<String>> {
        if self.peek() != Some('@') {
            return Ok(None);
        }
        let at_pos = self.pos;
        self.bump();
        match self.peek() {
            Some(c) if is_word(c) && !c.is_ascii_digit() => {}
            _ => return Err(Error::syntax_at(self.input, at_pos, "malformed tag name")),
        }
        let name_start = self.pos;
        while let Some(c) = self.peek() {
            if is_word(c) {
                self.bump();
            } else {
                break;
            }
        }
        let name = self.input[name_start..self.pos].to_string();
        if self.peek() != Some(' ') {
            return Err(Error::syntax_at(
                self.input,
                self.pos,
                format!("expected a space after tag @{name}"),
            ));
        }
        while self.peek() == Some(' ') {
            self.bump();
        }
        Ok(Some(name))
    }

    // ---- value builder -------------------------------------------------

    fn parse_value(&mut self) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::syntax_at(
                self.input,
                self.pos,
                "nesting depth limit exceeded",
            ));
        }
        self.depth += 1;
        let result = self.parse_value_inner();
        self.depth -= 1;
        result
    }

    fn parse_value_inner(&mut self) -> Result<Value> {
        self.skip_whitespace();
        let tag = self.scan_tag()?;
        let tag = tag.as_deref();
        match self.peek() {
            None => Err(Error::syntax_at(
                self.input,
                self.pos,
                "unexpected end of input",
            )),
            Some('@') => Err(Error::syntax_at(self.input, self.pos, "cannot nest tags")),
            Some('{') => self.parse_object(tag),
            Some('[') => self.parse_list(tag),
            Some('\'') | Some('"') => self.parse_string(tag),
            Some(c) if c == '+' || c == '-' || c.is_ascii_digit() => self.parse_number(tag),
            Some(_) => self.parse_literal(tag),
        }
    }

    /// Rejects a reserved tag that is incompatible with the upcoming shape.
    fn check_tag(&self, tag: Option<&str>, shape: Shape) -> Result<()> {
        if let Some(name) = tag {
            if tags::is_reserved(name) && !tags::allowed_for(name, shape) {
                return Err(Error::semantic(
                    self.pos,
                    format!("@{name} cannot be used on {shape}"),
                ));
            }
        }
        Ok(())
    }

    fn apply_transform(&mut self, value: Value) -> Value {
        match self.transform.as_mut() {
            Some(transform) => transform(value),
            None => value,
        }
    }

    fn parse_object(&mut self, tag: Option<&str>) -> Result<Value> {
        self.check_tag(tag, Shape::Object)?;
        let open_pos = self.pos;
        self.bump(); // '{'
        let mut map = Map::new();
        self.skip_whitespace();
        loop {
            match self.peek() {
                None => {
                    return Err(Error::syntax_at(self.input, open_pos, "unterminated object"))
                }
                Some('}') => break,
                Some(_) => {}
            }
            let key_pos = self.pos;
            let key = match self.parse_value()? {
                Value::Text(key) => key,
                other => {
                    return Err(Error::semantic(
                        key_pos,
                        format!("object keys must be strings, found {}", other.kind()),
                    ))
                }
            };
            if map.contains_key(&key) {
                return Err(Error::semantic(key_pos, format!("duplicate key: {key:?}")));
            }
            self.skip_whitespace();
            match self.peek() {
                Some(':') => self.bump(),
                Some(c) => {
                    return Err(Error::syntax_at(
                        self.input,
                        self.pos,
                        format!("expected a key:value pair but found {c:?}"),
                    ))
                }
                None => {
                    return Err(Error::syntax_at(self.input, open_pos, "unterminated object"))
                }
            }
            let item = self.parse_value()?;
            map.insert(key, item);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                Some('}') => {}
                Some(c) => {
                    return Err(Error::syntax_at(
                        self.input,
                        self.pos,
                        format!("expected ',' or '}}' but found {c:?}"),
                    ))
                }
                None => {
                    return Err(Error::syntax_at(self.input, open_pos, "unterminated object"))
                }
            }
        }
        self.bump(); // '}'
        let out = match tag {
            None | Some("object") | Some("record") => Value::Object(map),
            Some("dict") => Value::Dict(map),
            // The shape check already rejected every other reserved tag.
            Some(name) => self.codec.call_tagged_to_object(name, Value::Object(map))?,
        };
        Ok(self.apply_transform(out))
    }

    fn parse_list(&mut self, tag: Option<&str>) -> Result<Value> {
        self.check_tag(tag, Shape::List)?;
        let open_pos = self.pos;
        self.bump(); // '['
        let is_set = tag == Some("set");
        let mut items = Vec::new();
        self.skip_whitespace();
        loop {
            match self.peek() {
                None => return Err(Error::syntax_at(self.input, open_pos, "unterminated list")),
                Some(']') => break,
                Some(_) => {}
            }
            let item_pos = self.pos;
            let item = self.parse_value()?;
            if is_set && items.contains(&item) {
                return Err(Error::semantic(item_pos, "duplicate item in set"));
            }
            items.push(item);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                Some(']') => {}
                Some(c) => {
                    return Err(Error::syntax_at(
                        self.input,
                        self.pos,
                        format!("expected ',' or ']' but found {c:?}"),
                    ))
                }
                None => return Err(Error::syntax_at(self.input, open_pos, "unterminated list")),
            }
        }
        let close_pos = self.pos;
        self.bump(); // ']'
        let out = match tag {
            None | Some("object") | Some("list") => Value::List(items),
            Some("set") => Value::Set(items),
            Some("complex") => {
                // Missing components default to zero: `[]` is 0, `[1]`
                // is 1+0i.
                if items.len() > 2 {
                    return Err(Error::semantic(
                        close_pos,
                        "@complex expects at most [real, imaginary]",
                    ));
                }
                let mut parts = [0.0f64; 2];
                for (slot, item) in parts.iter_mut().zip(&items) {
                    *slot = numeric_to_f64(item)
                        .ok_or_else(|| Error::semantic(close_pos, "@complex expects numbers"))?;
                }
                Value::Complex(Complex64::new(parts[0], parts[1]))
            }
            Some("string") => {
                let mut text = String::new();
                for item in items {
                    match item {
                        Value::Text(part) => text.push_str(&part),
                        other => {
                            return Err(Error::semantic(
                                close_pos,
                                format!("@string expects string elements, found {}", other.kind()),
                            ))
                        }
                    }
                }
                Value::Text(text)
            }
            Some(name) => {
                if let Some((lo, hi)) = tags::width_bounds(name) {
                    for item in &items {
                        match item {
                            Value::Int(i) if *i >= lo && *i <= hi => {}
                            Value::Int(_) => {
                                return Err(Error::semantic(
                                    close_pos,
                                    format!("element out of range for @{name}"),
                                ))
                            }
                            other => {
                                return Err(Error::semantic(
                                    close_pos,
                                    format!(
                                        "@{name} expects an array of integers, found {}",
                                        other.kind()
                                    ),
                                ))
                            }
                        }
                    }
                    Value::List(items)
                } else {
                    // Non-reserved: shape check let it through.
                    self.codec.call_tagged_to_object(name, Value::List(items))?
                }
            }
        };
        Ok(self.apply_transform(out))
    }

    fn parse_string(&mut self, tag: Option<&str>) -> Result<Value> {
        self.check_tag(tag, Shape::Str)?;
        let start = self.pos;
        let quote = match self.peek() {
            Some(q) => q,
            None => return Err(Error::syntax_at(self.input, start, "unexpected end of input")),
        };
        self.bump();
        let mut accum = if tag == Some("bytestring") {
            StrAccum::Bytes(Vec::new())
        } else {
            StrAccum::Text(String::new())
        };
        loop {
            match self.peek() {
                None => return Err(Error::syntax_at(self.input, start, "unterminated string")),
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    self.decode_escape(&mut accum)?;
                }
                Some(c) if is_forbidden_raw(c) => {
                    return Err(Error::syntax_at(
                        self.input,
                        self.pos,
                        "raw control character in string",
                    ))
                }
                Some(c) => {
                    match &mut accum {
                        StrAccum::Text(s) => s.push(c),
                        StrAccum::Bytes(b) => {
                            if !c.is_ascii() {
                                return Err(Error::syntax_at(
                                    self.input,
                                    self.pos,
                                    "bytestring cannot contain non-ascii characters",
                                ));
                            }
                            b.push(c as u8);
                        }
                    }
                    self.bump();
                }
            }
        }
        let out = match accum {
            // Bytestring mode bypasses tag dispatch: the bytes are the value.
            StrAccum::Bytes(bytes) => Value::Bytes(bytes),
            StrAccum::Text(text) => match tag {
                None | Some("string") | Some("object") => Value::Text(text),
                Some("base64") => STANDARD
                    .decode(text.as_bytes())
                    .map(Value::Bytes)
                    .map_err(|_| Error::semantic(start, "invalid base64"))?,
                Some("datetime") => match parse_datetime(&text) {
                    Some(dt) => Value::Datetime(dt),
                    None => {
                        return Err(Error::semantic(
                            start,
                            format!("invalid datetime: {text:?}"),
                        ))
                    }
                },
                Some("float") => match parse_c99_float(&text) {
                    Some(f) => Value::Float(f),
                    None => {
                        return Err(Error::semantic(
                            start,
                            format!("invalid C99 float literal: {text:?}"),
                        ))
                    }
                },
                // Every other reserved string tag was rejected by shape.
                Some(name) => self.codec.call_tagged_to_object(name, Value::Text(text))?,
            },
        };
        Ok(self.apply_transform(out))
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn decode_escape(&mut self, accum: &mut StrAccum) -> Result<()> {
        let esc_pos = self.pos - 1;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Err(Error::syntax_at(
                    self.input,
                    esc_pos,
                    "unterminated escape sequence",
                ))
            }
        };
        if let Some(decoded) = tags::unescape_char(c) {
            self.bump();
            match accum {
                StrAccum::Text(s) => s.push(decoded),
                StrAccum::Bytes(b) => b.push(decoded as u8),
            }
            return Ok(());
        }
        match c {
            'x' => {
                self.bump();
                let n = self.scan_hex(2)?;
                self.push_code(accum, n, esc_pos)
            }
            'u' => {
                self.bump();
                let n = self.scan_hex(4)?;
                self.push_code(accum, n, esc_pos)
            }
            'U' => {
                self.bump();
                let n = self.scan_hex(8)?;
                self.push_code(accum, n, esc_pos)
            }
            // A backslash before a line break is a line continuation.
            '\n' => {
                self.bump();
                Ok(())
            }
            '\r' => {
                self.bump();
                if self.peek() == Some('\n') {
                    self.bump();
                    Ok(())
                } else {
                    Err(Error::syntax_at(
                        self.input,
                        esc_pos,
                        "unknown escape character '\\r'",
                    ))
                }
            }
            other => Err(Error::syntax_at(
                self.input,
                esc_pos,
                format!("unknown escape character {other:?}"),
            )),
        }
    }

    fn scan_hex(&mut self, count: usize) -> Result<u32> {
        let mut n: u32 = 0;
        for _ in 0..count {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    n = n * 16 + d;
                    self.bump();
                }
                None => {
                    return Err(Error::syntax_at(
                        self.input,
                        self.pos,
                        format!("expected {count} hex digits in escape"),
                    ))
                }
            }
        }
        Ok(n)
    }

    fn push_code(&self, accum: &mut StrAccum, n: u32, esc_pos: usize) -> Result<()> {
        match accum {
            StrAccum::Bytes(b) => {
                if n > 0xFF {
                    return Err(Error::syntax_at(
                        self.input,
                        esc_pos,
                        "bytestring cannot have an escape above 255",
                    ));
                }
                b.push(n as u8);
                Ok(())
            }
            StrAccum::Text(s) => {
                if (0xD800..=0xDFFF).contains(&n) {
                    return Err(Error::syntax_at(
                        self.input,
                        esc_pos,
                        "string cannot contain surrogate escapes",
                    ));
                }
                match char::from_u32(n) {
                    Some(c) => {
                        s.push(c);
                        Ok(())
                    }
                    None => Err(Error::syntax_at(
                        self.input,
                        esc_pos,
                        "escape is not a unicode scalar value",
                    )),
                }
            }
        }
    }

    fn parse_number(&mut self, tag: Option<&str>) -> Result<Value> {
        self.check_tag(tag, Shape::Number)?;
        let start = self.pos;
        let mut negative = false;
        match self.peek() {
            Some('+') => self.bump(),
            Some('-') => {
                negative = true;
                self.bump();
            }
            _ => {}
        }
        let rest = &self.input[self.pos..];
        let scanned = if rest.starts_with("0x") {
            Scanned::Int(self.scan_radix_digits(16, "hexadecimal number (0x...)")?)
        } else if rest.starts_with("0o") {
            Scanned::Int(self.scan_radix_digits(8, "octal number (0o...)")?)
        } else if rest.starts_with("0b") {
            Scanned::Int(self.scan_radix_digits(2, "binary number (0b...)")?)
        } else {
            self.scan_decimal()?
        };
        let value = match scanned {
            Scanned::Int(i) => Value::Int(if negative { -i } else { i }),
            Scanned::Float(f) => Value::Float(if negative { -f } else { f }),
        };
        let out = match tag {
            None | Some("object") => value,
            Some("duration") => match numeric_to_f64(&value) {
                Some(seconds) if seconds.is_finite() => Value::Duration(seconds),
                _ => {
                    return Err(Error::semantic(start, "@duration value is out of range"))
                }
            },
            Some("int") => {
                if value.is_float() {
                    return Err(Error::semantic(
                        start,
                        "cannot tag a floating point literal with @int",
                    ));
                }
                value
            }
            Some("float") => match value {
                Value::Int(i) => match i.to_f64() {
                    Some(f) => Value::Float(f),
                    None => {
                        return Err(Error::semantic(start, "@float value is out of range"))
                    }
                },
                other => other,
            },
            Some(name) => {
                if let Some((lo, hi)) = tags::width_bounds(name) {
                    match &value {
                        Value::Int(i) if *i >= lo && *i <= hi => value,
                        Value::Int(_) => {
                            return Err(Error::semantic(
                                start,
                                format!("value out of range for @{name}"),
                            ))
                        }
                        _ => {
                            return Err(Error::semantic(
                                start,
                                format!("@{name} expects an integer"),
                            ))
                        }
                    }
                } else {
                    // Non-reserved: shape check let it through.
                    self.codec.call_tagged_to_object(name, value)?
                }
            }
        };
        Ok(self.apply_transform(out))
    }

    /// Scans the digits of a `0x`/`0o`/`0b` literal, underscores allowed
    /// after the first digit.
    fn scan_radix_digits(&mut self, radix: u32, what: &str) -> Result<BigInt> {
        let err_pos = self.pos;
        self.bump();
        self.bump(); // prefix
        let digits_start = self.pos;
        match self.peek() {
            Some(c) if c.is_digit(radix) => {}
            _ => return Err(Error::syntax_at(self.input, err_pos, format!("invalid {what}"))),
        }
        while let Some(c) = self.peek() {
            if c.is_digit(radix) || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let cleaned: String = self.input[digits_start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        BigInt::parse_bytes(cleaned.as_bytes(), radix)
            .ok_or_else(|| Error::syntax_at(self.input, err_pos, format!("invalid {what}")))
    }

    fn scan_decimal(&mut self) -> Result<Scanned> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {}
            _ => return Err(Error::syntax_at(self.input, start, "invalid number")),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let mut is_float = false;
        if self.peek() == Some('.')
            && matches!(self.peek_second(), Some(c) if c.is_ascii_digit() || c == '_')
        {
            self.bump();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() || c == '_' {
                    self.bump();
                } else {
                    break;
                }
            }
            is_float = true;
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            // Only commit to the exponent if a digit actually follows.
            let save = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() || c == '_' {
                        self.bump();
                    } else {
                        break;
                    }
                }
                is_float = true;
            } else {
                self.pos = save;
            }
        }
        let cleaned: String = self.input[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        if is_float {
            cleaned
                .parse::<f64>()
                .map(Scanned::Float)
                .map_err(|_| Error::syntax_at(self.input, start, "invalid number"))
        } else {
            BigInt::parse_bytes(cleaned.as_bytes(), 10)
                .map(Scanned::Int)
                .ok_or_else(|| Error::syntax_at(self.input, start, "invalid number"))
        }
    }

    fn parse_literal(&mut self, tag: Option<&str>) -> Result<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_word(c) || c == '.' {
                self.bump();
            } else {
                break;
            }
        }
        if start == self.pos {
            let c = self.peek().unwrap_or('\0');
            return Err(Error::syntax_at(
                self.input,
                start,
                format!("unexpected character {c:?}"),
            ));
        }
        let item = &self.input[start..self.pos];
        let value = match item {
            "null" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => {
                return Err(Error::syntax_at(
                    self.input,
                    start,
                    format!("{other:?} is not a recognised built-in"),
                ))
            }
        };
        let out = match tag {
            None | Some("object") => value,
            // @bool is checked against the literal spelling, not the
            // shape table: true and false pass, null does not.
            Some("bool") => {
                if item == "null" {
                    return Err(Error::semantic(
                        start,
                        "@bool can only be used on true or false",
                    ));
                }
                value
            }
            Some(name) if tags::is_reserved(name) => {
                return Err(Error::semantic(
                    start,
                    format!("@{name} has no meaning for literals"),
                ))
            }
            Some(name) => self.codec.call_tagged_to_object(name, value)?,
        };
        Ok(self.apply_transform(out))
    }
}

fn is_word(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_forbidden_raw(c: char) -> bool {
    let n = c as u32;
    n < 0x20 || (0x7F..=0x9F).contains(&n)
}

fn numeric_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => i.to_f64(),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Parses the restricted ISO-8601 form `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`.
/// Other forms, including offset timezones, are not implemented.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let body = s.strip_suffix('Z')?;
    if let Some((_, frac)) = body.split_once('.') {
        if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let naive = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Some(naive.and_utc())
    } else {
        let naive = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S").ok()?;
        Some(naive.and_utc())
    }
}

/// Parses the C99 float grammar accepted by `@float '...'`:
/// `NaN`, `nan`, signed `Inf`/`inf`, or a signed hex-float literal
/// (`0x` hex digits `.` hex digits `p` signed decimal exponent).
fn parse_c99_float(s: &str) -> Option<f64> {
    if s == "NaN" || s == "nan" {
        return Some(f64::NAN);
    }
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if rest == "Inf" || rest == "inf" {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    let rest = rest.strip_prefix("0x")?;
    let (mantissa, exponent) = rest.split_once(['p', 'P'])?;
    let (int_part, frac_part) = mantissa.split_once('.')?;
    if int_part.is_empty()
        || frac_part.is_empty()
        || !int_part.bytes().all(|b| b.is_ascii_hexdigit())
        || !frac_part.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    let (exp_negative, exp_digits) = match exponent.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, exponent.strip_prefix('+').unwrap_or(exponent)),
    };
    if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let exp: i64 = exp_digits.parse().unwrap_or(i64::MAX);
    let exp = if exp_negative { -exp } else { exp };

    // Accumulate up to 124 mantissa bits exactly; anything beyond that is
    // far below f64 precision and only shifts the exponent.
    let mut mant: u128 = 0;
    let mut extra_exp: i64 = 0;
    for b in int_part.bytes() {
        let d = u128::from((b as char).to_digit(16)?);
        if mant >> 124 != 0 {
            extra_exp += 4;
        } else {
            mant = (mant << 4) | d;
        }
    }
    let mut frac_exp: i64 = 0;
    for b in frac_part.bytes() {
        if mant >> 124 != 0 {
            break;
        }
        let d = u128::from((b as char).to_digit(16)?);
        mant = (mant << 4) | d;
        frac_exp += 4;
    }
    let scale = (exp.saturating_add(extra_exp).saturating_sub(frac_exp)).clamp(-2000, 2000) as i32;
    // Split the power of two so neither factor under- or overflows early.
    let value = mant as f64 * 2f64.powi(scale / 2) * 2f64.powi(scale - scale / 2);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn numeric_bases_ignore_separators() {
        assert_eq!(parse("0x0_1_2_3").unwrap(), Value::from(0x0123));
        assert_eq!(parse("0o0_1_2_3").unwrap(), Value::from(0o123));
        assert_eq!(parse("0b0_1_0_1").unwrap(), Value::from(5));
        assert_eq!(parse("1_000_000").unwrap(), Value::from(1_000_000));
        assert_eq!(parse("-0x10").unwrap(), Value::from(-16));
    }

    #[test]
    fn prefixed_literals_need_digits() {
        assert!(parse("0x").unwrap_err().is_syntax());
        assert!(parse("0b_1").unwrap_err().is_syntax());
    }

    #[test]
    fn comments_and_boms_are_whitespace() {
        assert_eq!(parse("0 #comment").unwrap(), Value::from(0));
        assert_eq!(parse("#leading\n 0").unwrap(), Value::from(0));
        assert_eq!(parse("\u{FEFF}0").unwrap(), Value::from(0));
        assert_eq!(
            parse("[1, # one\n 2, # two\n]").unwrap(),
            Value::List(vec![Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn exponents_need_at_least_one_digit() {
        assert_eq!(parse("1e3").unwrap(), Value::from(1000.0));
        assert_eq!(parse("1E+3").unwrap(), Value::from(1000.0));
        assert_eq!(parse("2e-1").unwrap(), Value::from(0.2));
        assert!(parse("1e").unwrap_err().is_syntax());
    }

    #[test]
    fn fraction_requires_following_digit() {
        assert_eq!(parse("1.5").unwrap(), Value::from(1.5));
        assert!(parse("1.").unwrap_err().is_syntax());
    }

    #[test]
    fn line_continuation_contributes_nothing() {
        assert_eq!(parse("\"a\\\nb\"").unwrap(), Value::from("ab"));
        assert_eq!(parse("\"a\\\r\nb\"").unwrap(), Value::from("ab"));
    }

    #[test]
    fn escape_decoding() {
        assert_eq!(parse(r"'fo\no'").unwrap(), Value::from("fo\no"));
        assert_eq!(parse(r#""\x20""#).unwrap(), Value::from(" "));
        assert_eq!(parse(r#""\uF0F0""#).unwrap(), Value::from("\u{F0F0}"));
        assert_eq!(parse(r#""\U0001F0F0""#).unwrap(), Value::from("\u{1F0F0}"));
        assert_eq!(
            parse(r#"'\b\f\r\n\t\"\'\/'"#).unwrap(),
            Value::from("\u{0008}\u{000C}\r\n\t\"'/")
        );
    }

    #[test]
    fn surrogate_escapes_are_syntax_errors() {
        assert!(parse(r#""\uD800""#).unwrap_err().is_syntax());
        assert!(parse(r#""\uD800\uDD01""#).unwrap_err().is_syntax());
    }

    #[test]
    fn raw_control_characters_are_rejected() {
        assert!(parse("\"a\nb\"").unwrap_err().is_syntax());
        assert!(parse("\"a\u{0085}b\"").unwrap_err().is_syntax());
    }

    #[test]
    fn bytestring_escapes() {
        assert_eq!(
            parse(r"@bytestring 'fo\x00o'").unwrap(),
            Value::Bytes(b"fo\x00o".to_vec())
        );
        assert!(parse(r"@bytestring 'Ā'").unwrap_err().is_syntax());
        assert!(parse("@bytestring '\u{00E9}'").unwrap_err().is_syntax());
    }

    #[test]
    fn tags_need_a_trailing_space() {
        assert_eq!(parse("@set [1]").unwrap(), Value::Set(vec![Value::from(1)]));
        assert_eq!(parse("@set   [1]").unwrap(), Value::Set(vec![Value::from(1)]));
        assert!(parse("@set[1]").unwrap_err().is_syntax());
    }

    #[test]
    fn tags_do_not_nest() {
        assert!(parse("@set @set []").unwrap_err().is_syntax());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let deep = "[".repeat(200);
        assert!(parse(&deep).unwrap_err().is_syntax());
        let shallow = format!("{}1{}", "[".repeat(100), "]".repeat(100));
        assert!(parse(&shallow).is_ok());
    }

    #[test]
    fn trailing_content_is_rejected() {
        assert!(parse("1 2").unwrap_err().is_syntax());
        assert!(parse("[] []").unwrap_err().is_syntax());
        assert_eq!(parse("1 # 2").unwrap(), Value::from(1));
    }

    #[test]
    fn eof_and_unterminated_errors() {
        assert!(parse("").unwrap_err().is_syntax());
        assert!(parse("[1").unwrap_err().is_syntax());
        assert!(parse("{'a': 1").unwrap_err().is_syntax());
        assert!(parse("'abc").unwrap_err().is_syntax());
    }

    #[test]
    fn unknown_literal_words() {
        assert!(parse("nil").unwrap_err().is_syntax());
        assert!(parse("True").unwrap_err().is_syntax());
    }

    #[test]
    fn width_tags_check_ranges() {
        assert_eq!(parse("@i8 -128").unwrap(), Value::from(-128));
        assert!(parse("@i8 200").unwrap_err().is_semantic());
        assert!(parse("@u8 -1").unwrap_err().is_semantic());
        assert_eq!(
            parse("@u8 [1, 255]").unwrap(),
            Value::List(vec![Value::from(1), Value::from(255)])
        );
        assert!(parse("@u8 [1, 256]").unwrap_err().is_semantic());
    }

    #[test]
    fn datetime_payloads() {
        let dt = parse("@datetime '2019-04-12T12:30:45.123456Z'").unwrap();
        assert!(dt.as_datetime().is_some());
        assert!(parse_datetime("2019-04-12T12:30:45Z").is_some());
        assert!(parse_datetime("2019-04-12T12:30:45").is_none());
        assert!(parse_datetime("2019-04-12T12:30:45.1234567Z").is_none());
        assert!(parse("@datetime 'tomorrow'").unwrap_err().is_semantic());
    }

    #[test]
    fn c99_float_grammar() {
        assert_eq!(parse_c99_float("0x1.6e36p+21"), Some(3_000_000.0));
        assert_eq!(parse_c99_float("-0x1.8p1"), Some(-3.0));
        assert_eq!(parse_c99_float("inf"), Some(f64::INFINITY));
        assert_eq!(parse_c99_float("-Inf"), Some(f64::NEG_INFINITY));
        assert!(parse_c99_float("NaN").map_or(false, f64::is_nan));
        assert_eq!(parse_c99_float("1.5"), None);
        assert_eq!(parse_c99_float("0x1p1"), None);
        assert_eq!(parse_c99_float("0x.8p1"), None);
    }

    #[test]
    fn hex_float_extremes() {
        assert_eq!(parse_c99_float("0x1.0000000000000p+0"), Some(1.0));
        assert_eq!(parse_c99_float("0x1.8000000000000p-1"), Some(0.75));
        assert_eq!(parse_c99_float("0x1.0p-1100"), Some(0.0));
        assert_eq!(parse_c99_float("0x1.0p+2000"), Some(f64::INFINITY));
        // Smallest subnormal survives the split power-of-two scaling.
        assert_eq!(parse_c99_float("0x1.0p-1074"), Some(f64::from_bits(1)));
    }
}

