use alloc::vec::Vec;

use crate::buffer::FixedBuf;
use crate::segment::Segment;
use crate::token::TokenKind;
use crate::utf8;
use crate::ConfigError;

/// One open container on the scope stack.
///
/// `start` records where the container opened so the matching End-* token can
/// span the whole container.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: TokenKind,
    start: usize,
}

/// A forward-only JSON tokenizer over an in-memory payload.
///
/// The scanner advances one token per [`next`] call and reports positions as
/// [`Segment`]s into the payload; nothing is copied during tokenization.
/// String bodies are decoded only on demand, into a scratch buffer that is
/// reused across tokens, so steady-state scanning performs no allocation.
///
/// Accepted syntax is JSON per RFC 8259 with deliberate leniencies: hex
/// integer literals (`0x1F`), leading zeros in decimal integers, and a signed
/// exponent slot. Malformed input surfaces as the terminal `Invalid` token,
/// never as an error value.
///
/// A scanner is reusable: [`reset`] starts over on another payload while
/// retaining the scratch and stack allocations.
///
/// [`next`]: Scanner::next
/// [`reset`]: Scanner::reset
#[derive(Debug)]
pub struct Scanner<'p> {
    payload: &'p [u8],
    pos: usize,
    seg_offset: usize,
    seg_len: usize,
    kind: TokenKind,
    /// The top container's terminator has been seen; emit its End-* token on
    /// the next advance.
    close: bool,
    /// A separator violation was found during close preparation; report
    /// `Invalid` on the next advance.
    fault: bool,
    decode_needed: bool,
    truth: bool,
    scope: Vec<Frame>,
    scratch: FixedBuf,
}

impl<'p> Scanner<'p> {
    /// Create a scanner over `payload`.
    ///
    /// The decode scratch is sized at `max(capacity_hint, payload.len())` and
    /// the scope stack at `depth_hint` frames; both grow on demand, the hints
    /// only size the initial allocation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] if `depth_hint` is zero.
    pub fn new(
        payload: &'p [u8],
        capacity_hint: usize,
        depth_hint: usize,
    ) -> Result<Self, ConfigError> {
        if depth_hint == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let mut scope = Vec::with_capacity(depth_hint);
        scope.push(Frame {
            kind: TokenKind::None,
            start: 0,
        });
        Ok(Self {
            payload,
            pos: 0,
            seg_offset: 0,
            seg_len: 0,
            kind: TokenKind::None,
            close: false,
            fault: false,
            decode_needed: false,
            truth: false,
            scope,
            scratch: FixedBuf::new(capacity_hint.max(payload.len())),
        })
    }

    /// Start over on another payload, reusing the scratch and stack
    /// allocations. The scratch grows to the new payload length if needed.
    pub fn reset(&mut self, payload: &'p [u8]) {
        self.payload = payload;
        self.pos = 0;
        self.seg_offset = 0;
        self.seg_len = 0;
        self.kind = TokenKind::None;
        self.close = false;
        self.fault = false;
        self.decode_needed = false;
        self.truth = false;
        self.scope.clear();
        self.scope.push(Frame {
            kind: TokenKind::None,
            start: 0,
        });
        self.scratch.try_grow(payload.len());
        self.scratch.clear();
    }

    /// The kind of the current token.
    #[inline]
    #[must_use]
    pub fn token_kind(&self) -> TokenKind {
        self.kind
    }

    /// The payload span of the current token.
    #[inline]
    #[must_use]
    pub fn token_segment(&self) -> Segment<'p> {
        Segment::new(self.payload, self.seg_offset, self.seg_len)
    }

    /// Advance to the next token.
    ///
    /// Returns `false` iff the newly reached state is terminal (`Complete` or
    /// `Invalid`); both are sticky, and every later call returns `false` with
    /// the kind unchanged.
    pub fn next(&mut self) -> bool {
        if self.kind.is_end_of_payload() {
            return false;
        }
        if self.fault {
            self.invalid(self.pos);
            return false;
        }
        self.skip_whitespace();
        self.decode_needed = false;
        match self.top_kind() {
            TokenKind::BeginArray => {
                if self.close {
                    self.end_container(TokenKind::EndArray);
                } else {
                    self.scan_value();
                }
            }
            TokenKind::BeginObject => {
                if self.close {
                    self.end_container(TokenKind::EndObject);
                } else {
                    self.scan_property();
                }
            }
            TokenKind::BeginProperty => {
                if self.close {
                    self.end_property();
                } else {
                    self.scan_value();
                }
            }
            _ => {
                if self.close {
                    self.kind = TokenKind::Complete;
                    self.set_segment(self.pos, 0);
                } else {
                    self.scan_value();
                }
            }
        }
        !self.kind.is_end_of_payload()
    }

    /// Advance until the scope stack returns to its depth at entry, i.e. past
    /// the matching End-* of the container currently open, or to a terminal
    /// state.
    ///
    /// Returns `false` iff a terminal state was reached first.
    pub fn skip(&mut self) -> bool {
        let depth = self.scope.len();
        loop {
            if !self.next() {
                return false;
            }
            if self.scope.len() < depth {
                return true;
            }
        }
    }

    /// Extract the current `Boolean` token.
    #[inline]
    #[must_use]
    pub fn parse_bool(&self) -> Option<bool> {
        (self.kind == TokenKind::Boolean).then_some(self.truth)
    }

    /// Extract the current `Boolean` token, treating `Null` as the absent
    /// value.
    #[must_use]
    pub fn parse_opt_bool(&self) -> Option<Option<bool>> {
        match self.kind {
            TokenKind::Null => Some(None),
            TokenKind::Boolean => Some(Some(self.truth)),
            _ => None,
        }
    }

    /// Extract the current `Integer` token as a signed decimal.
    ///
    /// Hex bodies do not convert; `i64::MIN` does. Overflow fails.
    #[must_use]
    pub fn parse_i64(&self) -> Option<i64> {
        if self.kind != TokenKind::Integer {
            return None;
        }
        core::str::from_utf8(self.token_bytes()).ok()?.parse().ok()
    }

    /// As [`parse_i64`](Scanner::parse_i64), treating `Null` as absent.
    #[must_use]
    pub fn parse_opt_i64(&self) -> Option<Option<i64>> {
        if self.kind == TokenKind::Null {
            return Some(None);
        }
        self.parse_i64().map(Some)
    }

    /// Extract the current `Integer` token as unsigned.
    ///
    /// A body starting `0x`/`0X` converts as hexadecimal, anything else as
    /// decimal. Overflow and negative bodies fail.
    #[must_use]
    pub fn parse_u64(&self) -> Option<u64> {
        if self.kind != TokenKind::Integer {
            return None;
        }
        let text = core::str::from_utf8(self.token_bytes()).ok()?;
        match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => text.parse().ok(),
        }
    }

    /// As [`parse_u64`](Scanner::parse_u64), treating `Null` as absent.
    #[must_use]
    pub fn parse_opt_u64(&self) -> Option<Option<u64>> {
        if self.kind == TokenKind::Null {
            return Some(None);
        }
        self.parse_u64().map(Some)
    }

    /// Extract the current `Integer` or `Float` token through the host's
    /// decimal-to-double parse.
    #[must_use]
    pub fn parse_f64(&self) -> Option<f64> {
        if !self.kind.is_number() {
            return None;
        }
        core::str::from_utf8(self.token_bytes()).ok()?.parse().ok()
    }

    /// As [`parse_f64`](Scanner::parse_f64), treating `Null` as absent.
    #[must_use]
    pub fn parse_opt_f64(&self) -> Option<Option<f64>> {
        if self.kind == TokenKind::Null {
            return Some(None);
        }
        self.parse_f64().map(Some)
    }

    /// Extract the current `String` or `BeginProperty` token as text.
    ///
    /// When the body carries no escape the returned slice borrows the payload
    /// directly and the scratch is untouched. Otherwise the body is decoded
    /// into the scratch, which the next escaped extraction reuses; callers
    /// that keep the text across advances must copy it.
    ///
    /// Fails on other token kinds, on invalid UTF-8, on a malformed escape,
    /// and on an unpaired surrogate half.
    pub fn parse_str(&mut self) -> Option<&str> {
        let body = self.string_body()?;
        if !self.decode_needed {
            return utf8::to_str(body);
        }
        self.decode_body(body)
    }

    /// As [`parse_str`](Scanner::parse_str), treating `Null` as absent.
    pub fn parse_opt_str(&mut self) -> Option<Option<&str>> {
        if self.kind == TokenKind::Null {
            return Some(None);
        }
        self.parse_str().map(Some)
    }

    fn top_kind(&self) -> TokenKind {
        self.scope.last().map_or(TokenKind::None, |f| f.kind)
    }

    #[inline]
    fn set_segment(&mut self, offset: usize, len: usize) {
        self.seg_offset = offset;
        self.seg_len = len;
    }

    fn token_bytes(&self) -> &'p [u8] {
        &self.payload[self.seg_offset..self.seg_offset + self.seg_len]
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.payload.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.payload.get(self.pos + ahead).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    fn invalid(&mut self, offset: usize) {
        self.kind = TokenKind::Invalid;
        self.set_segment(offset, 0);
        self.close = false;
        self.fault = false;
    }

    fn scan_value(&mut self) {
        match self.peek() {
            Some(b'n') => self.scan_literal(b"null", TokenKind::Null, false),
            Some(b't') => self.scan_literal(b"true", TokenKind::Boolean, true),
            Some(b'f') => self.scan_literal(b"false", TokenKind::Boolean, false),
            Some(b'[') => self.open_container(TokenKind::BeginArray),
            Some(b'{') => self.open_container(TokenKind::BeginObject),
            Some(b'"') => self.scan_string(),
            Some(_) => self.scan_number(),
            None => self.invalid(self.pos),
        }
    }

    fn scan_literal(&mut self, literal: &'static [u8], kind: TokenKind, truth: bool) {
        if !self.payload[self.pos..].starts_with(literal) {
            self.invalid(self.pos);
            return;
        }
        self.set_segment(self.pos, literal.len());
        self.pos += literal.len();
        self.kind = kind;
        self.truth = truth;
        self.prepare_close(false);
    }

    fn open_container(&mut self, kind: TokenKind) {
        self.scope.push(Frame {
            kind,
            start: self.pos,
        });
        self.set_segment(self.pos, 1);
        self.pos += 1;
        self.kind = kind;
        self.prepare_close(true);
    }

    fn scan_string(&mut self) {
        let start = self.pos;
        if self.scan_string_raw() {
            self.set_segment(start, self.pos - start);
            self.kind = TokenKind::String;
            self.prepare_close(false);
        }
    }

    /// Advance from the opening quote past the closing one, flagging
    /// `decode_needed` when a backslash is seen. No escape is validated here.
    fn scan_string_raw(&mut self) -> bool {
        self.pos += 1;
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return true;
                }
                Some(b'\\') => {
                    self.decode_needed = true;
                    self.pos += 1;
                    if self.peek().is_none() {
                        self.invalid(self.pos);
                        return false;
                    }
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
                None => {
                    self.invalid(self.pos);
                    return false;
                }
            }
        }
    }

    /// Recognize `"name"` + optional whitespace + `:` and push the property
    /// frame. The reported segment covers the name through the colon.
    fn scan_property(&mut self) {
        let start = self.pos;
        if self.peek() != Some(b'"') {
            self.invalid(self.pos);
            return;
        }
        if !self.scan_string_raw() {
            return;
        }
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            self.invalid(self.pos);
            return;
        }
        self.pos += 1;
        self.scope.push(Frame {
            kind: TokenKind::BeginProperty,
            start,
        });
        self.set_segment(start, self.pos - start);
        self.kind = TokenKind::BeginProperty;
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let Some(first) = self.peek() else {
            self.invalid(self.pos);
            return;
        };
        if !first.is_ascii_digit() {
            self.invalid(self.pos);
            return;
        }
        let mut float = false;
        if first == b'0' && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            if !self.eat_digits(u8::is_ascii_hexdigit) {
                self.invalid(self.pos);
                return;
            }
        } else {
            self.eat_digits(u8::is_ascii_digit);
            if self.peek() == Some(b'.') {
                self.pos += 1;
                if !self.eat_digits(u8::is_ascii_digit) {
                    self.invalid(self.pos);
                    return;
                }
                float = true;
            }
            if matches!(self.peek(), Some(b'e' | b'E')) {
                self.pos += 1;
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                if !self.eat_digits(u8::is_ascii_digit) {
                    self.invalid(self.pos);
                    return;
                }
                float = true;
            }
        }
        self.set_segment(start, self.pos - start);
        self.kind = if float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        self.prepare_close(false);
    }

    /// Consume a run of digits; `false` if none were present.
    fn eat_digits(&mut self, accept: impl Fn(&u8) -> bool) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| accept(&c)) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Look past the element just recognized: the enclosing container's
    /// terminator arms `close`; otherwise one separator is consumed when the
    /// container already holds an element. A missing separator is recorded as
    /// a pending fault and reported on the next advance.
    fn prepare_close(&mut self, first: bool) {
        self.skip_whitespace();
        match self.top_kind() {
            TokenKind::BeginArray => self.prepare_element(b']', first),
            TokenKind::BeginObject => self.prepare_element(b'}', first),
            TokenKind::BeginProperty => self.close = true,
            _ => {
                if self.pos >= self.payload.len() {
                    self.close = true;
                }
            }
        }
    }

    fn prepare_element(&mut self, terminator: u8, first: bool) {
        match self.peek() {
            Some(c) if c == terminator => self.close = true,
            Some(b',') if !first => self.pos += 1,
            Some(_) if first => {}
            _ => self.fault = true,
        }
    }

    /// Emit `EndArray`/`EndObject`: pop the frame, consume the terminator,
    /// and span the whole container from its opening delimiter.
    fn end_container(&mut self, kind: TokenKind) {
        let Some(frame) = self.scope.pop() else {
            self.invalid(self.pos);
            return;
        };
        self.close = false;
        self.pos += 1;
        self.set_segment(frame.start, self.pos - frame.start);
        self.kind = kind;
        self.prepare_close(false);
    }

    /// Emit `EndProperty`: no code unit is consumed, the span runs from the
    /// name's opening quote through the prior token's extent.
    fn end_property(&mut self) {
        let Some(frame) = self.scope.pop() else {
            self.invalid(self.pos);
            return;
        };
        self.close = false;
        let prev_end = self.seg_offset + self.seg_len;
        self.set_segment(frame.start, prev_end - frame.start);
        self.kind = TokenKind::EndProperty;
        self.prepare_close(false);
    }

    /// The undecoded body of the current string-bearing token: quotes are
    /// stripped, and a property name additionally loses the trailing colon
    /// and any whitespace before it.
    fn string_body(&self) -> Option<&'p [u8]> {
        let seg = self.token_bytes();
        match self.kind {
            TokenKind::String => Some(&seg[1..seg.len() - 1]),
            TokenKind::BeginProperty => {
                let mut t = seg.strip_suffix(b":")?;
                while let Some((b' ' | b'\t' | b'\r' | b'\n', rest)) = t.split_last() {
                    t = rest;
                }
                t.strip_prefix(b"\"")?.strip_suffix(b"\"")
            }
            _ => None,
        }
    }

    /// Re-scan an escaped body into the scratch. Raw runs between escapes are
    /// validated and copied whole; escapes decode per the JSON table, with
    /// `\uXXXX` pairs combined into one scalar and unpaired halves rejected.
    fn decode_body(&mut self, body: &'p [u8]) -> Option<&str> {
        self.scratch.clear();
        let mut i = 0;
        let mut run = 0;
        while i < body.len() {
            if body[i] == b'\\' {
                if run < i {
                    let raw = utf8::to_str(&body[run..i])?;
                    if !self.scratch.push_str(raw, 0) {
                        return None;
                    }
                }
                i += 1;
                let c = decode_escape(body, &mut i)?;
                if !self.scratch.push_char(c, 0) {
                    return None;
                }
                run = i;
            } else {
                i += 1;
            }
        }
        if run < body.len() {
            let raw = utf8::to_str(&body[run..])?;
            if !self.scratch.push_str(raw, 0) {
                return None;
            }
        }
        Some(self.scratch.as_str())
    }
}

/// Decode one escape body (the part after `\`), advancing `i` past it.
fn decode_escape(body: &[u8], i: &mut usize) -> Option<char> {
    let c = *body.get(*i)?;
    *i += 1;
    Some(match c {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{0008}',
        b'f' => '\u{000C}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return decode_unicode_escape(body, i),
        _ => return None,
    })
}

fn decode_unicode_escape(body: &[u8], i: &mut usize) -> Option<char> {
    let unit = hex4(body, i)?;
    match unit {
        0xD800..=0xDBFF => {
            // High surrogate: a low half must follow for a valid scalar.
            if body.get(*i) != Some(&b'\\') || body.get(*i + 1) != Some(&b'u') {
                return None;
            }
            *i += 2;
            let low = hex4(body, i)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(scalar)
        }
        0xDC00..=0xDFFF => None,
        _ => char::from_u32(unit),
    }
}

/// Exactly four hex digits, big-endian, accumulated digit by digit.
fn hex4(body: &[u8], i: &mut usize) -> Option<u32> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let digit = char::from(*body.get(*i)?).to_digit(16)?;
        value = value * 16 + digit;
        *i += 1;
    }
    Some(value)
}
