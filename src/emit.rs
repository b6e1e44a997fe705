use alloc::vec::Vec;
use core::fmt;

use crate::buffer::FixedBuf;
use crate::token::TokenKind;
use crate::ConfigError;

/// The truncated form emitted where a value belongs: a complete object.
pub const TRUNCATED_OBJECT: &str = "{\"(truncated)\":true}";

/// The truncated form emitted inside an object: a complete property.
pub const TRUNCATED_PROPERTY: &str = "\"(truncated)\":true";

/// What the next write will place, for preparation dispatch.
#[derive(Clone, Copy)]
enum Slot {
    Container,
    Property,
    Value,
}

/// Outcome of preparing the buffer for a write.
enum Prep {
    Ready,
    /// The write is ungrammatical here; refuse it without truncating.
    Reject,
    /// The separator no longer fits; truncate.
    Full,
}

/// An incremental JSON writer into a fixed-capacity buffer.
///
/// The output never exceeds the construction capacity: before every append
/// the emitter reserves enough free space to later close every open container
/// and, if need be, place a truncated marker. When a write no longer fits,
/// the document self-truncates into the well-formed [`TRUNCATED_OBJECT`] /
/// [`TRUNCATED_PROPERTY`] forms and the emitter goes sticky: further opens
/// and value writes return `false`, while [`close_token`] and [`finish`]
/// still produce a complete document.
///
/// Writes that are ungrammatical in the current position (a property outside
/// an object, a second root value, ...) return `false` without truncating.
///
/// An emitter is reusable: [`clear`] starts a new document in the same
/// allocation.
///
/// [`close_token`]: Emitter::close_token
/// [`finish`]: Emitter::finish
/// [`clear`]: Emitter::clear
#[derive(Debug)]
pub struct Emitter {
    buf: FixedBuf,
    scope: Vec<TokenKind>,
    truncated: bool,
}

impl Emitter {
    /// Create an emitter with the given output capacity.
    ///
    /// The effective capacity is raised to the truncated-object marker length
    /// if smaller, so truncation always fits. `depth_hint` sizes the scope
    /// stack; it is not a runtime depth cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] if `depth_hint` is zero.
    pub fn new(capacity: usize, depth_hint: usize) -> Result<Self, ConfigError> {
        if depth_hint == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let mut scope = Vec::with_capacity(depth_hint + 1);
        scope.push(TokenKind::None);
        Ok(Self {
            buf: FixedBuf::new(capacity.max(TRUNCATED_OBJECT.len())),
            scope,
            truncated: false,
        })
    }

    /// Current output length in code units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The output capacity in code units.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` once the emitter has self-truncated.
    #[inline]
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Borrow the document written so far.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    /// Open an array value.
    pub fn open_array(&mut self) -> bool {
        self.open_container(TokenKind::BeginArray, '[')
    }

    /// Open an object value.
    pub fn open_object(&mut self) -> bool {
        self.open_container(TokenKind::BeginObject, '{')
    }

    /// Open a property of the enclosing object. The name is written quoted
    /// and escaped, followed by the colon; the property's value comes next.
    pub fn open_property(&mut self, name: &str) -> bool {
        if self.truncated {
            return false;
        }
        let mark = self.buf.mark();
        match self.prepare(Slot::Property) {
            Prep::Reject => false,
            Prep::Full => self.fail(mark),
            Prep::Ready => {
                let reserve = self.reserve();
                if self.push_quoted(name, reserve) && self.buf.push_char(':', reserve) {
                    self.scope.push(TokenKind::BeginProperty);
                    true
                } else {
                    self.fail(mark)
                }
            }
        }
    }

    /// Close the topmost open container. An array gets its `]`, an object its
    /// `}`, and a property whose value was never written gets a `null` first.
    /// No-op at the root; returns whether a frame was closed.
    ///
    /// Closing always succeeds, truncated or not: the reserve taken out on
    /// every earlier append covers it.
    pub fn close_token(&mut self) -> bool {
        let closer = match self.scope.last() {
            Some(TokenKind::BeginArray) => ']',
            Some(TokenKind::BeginObject) => '}',
            Some(TokenKind::BeginProperty) => {
                self.scope.pop();
                if self.buf.last() == Some(':') {
                    let ok = self.buf.push_str("null", 0);
                    debug_assert!(ok, "close budget exhausted");
                }
                return true;
            }
            _ => return false,
        };
        self.scope.pop();
        let ok = self.buf.push_char(closer, 0);
        debug_assert!(ok, "close budget exhausted");
        true
    }

    /// Write a `null` value.
    pub fn null(&mut self) -> bool {
        self.put_literal("null")
    }

    /// Write a boolean value.
    pub fn bool(&mut self, value: bool) -> bool {
        self.put_literal(if value { "true" } else { "false" })
    }

    /// Write a signed integer in invariant decimal.
    pub fn int(&mut self, value: i64) -> bool {
        self.put_fmt(format_args!("{value}"))
    }

    /// Write an unsigned integer in invariant decimal.
    pub fn uint(&mut self, value: u64) -> bool {
        self.put_fmt(format_args!("{value}"))
    }

    /// Write a double as the shortest decimal that round-trips.
    pub fn float(&mut self, value: f64) -> bool {
        self.put_fmt(format_args!("{value}"))
    }

    /// Write a single-precision float as the shortest decimal that
    /// round-trips.
    pub fn float32(&mut self, value: f32) -> bool {
        self.put_fmt(format_args!("{value}"))
    }

    /// Write a string value, quoted and escaped. The write is atomic: on
    /// overflow nothing of it remains.
    pub fn text(&mut self, value: &str) -> bool {
        if self.truncated {
            return false;
        }
        let mark = self.buf.mark();
        match self.prepare(Slot::Value) {
            Prep::Reject => false,
            Prep::Full => self.fail(mark),
            Prep::Ready => {
                let reserve = self.reserve();
                if self.push_quoted(value, reserve) {
                    true
                } else {
                    self.fail(mark)
                }
            }
        }
    }

    /// Write an optional string value; `None` emits `null`.
    pub fn opt_text(&mut self, value: Option<&str>) -> bool {
        match value {
            Some(s) => self.text(s),
            None => self.null(),
        }
    }

    /// Close every open container and return the finished document.
    pub fn finish(&mut self) -> &str {
        while self.close_token() {}
        self.buf.as_str()
    }

    /// Start a new document, retaining the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.scope.clear();
        self.scope.push(TokenKind::None);
        self.truncated = false;
    }

    /// Change the output capacity in either direction. Succeeds iff the
    /// content written so far plus the current reserve still fits.
    pub fn try_resize(&mut self, new_capacity: usize) -> bool {
        let reserve = self.reserve();
        self.buf.try_resize(new_capacity, reserve)
    }

    /// Free space every append must leave behind: one separator plus the
    /// truncated marker plus one closer per open container (the root sentinel
    /// slot doubles as the separator's).
    #[inline]
    fn reserve(&self) -> usize {
        self.scope.len() + TRUNCATED_OBJECT.len()
    }

    fn top(&self) -> TokenKind {
        self.scope.last().copied().unwrap_or(TokenKind::None)
    }

    /// Emit the minimal separator for the upcoming write, or classify it as
    /// ungrammatical. "Not first" is read off the last written code unit.
    fn prepare(&mut self, slot: Slot) -> Prep {
        match (self.top(), slot) {
            (TokenKind::None, Slot::Container | Slot::Value) => {
                if self.buf.is_empty() {
                    Prep::Ready
                } else {
                    Prep::Reject
                }
            }
            (TokenKind::BeginArray, Slot::Container | Slot::Value) => self.separate('['),
            (TokenKind::BeginObject, Slot::Property) => self.separate('{'),
            (TokenKind::BeginProperty, Slot::Container) => Prep::Ready,
            (TokenKind::BeginProperty, Slot::Value) => {
                if self.buf.last() == Some(':') {
                    Prep::Ready
                } else {
                    Prep::Reject
                }
            }
            _ => Prep::Reject,
        }
    }

    fn separate(&mut self, opener: char) -> Prep {
        if self.buf.last() == Some(opener) {
            Prep::Ready
        } else if self.buf.push_char(',', self.reserve()) {
            Prep::Ready
        } else {
            Prep::Full
        }
    }

    fn open_container(&mut self, kind: TokenKind, delim: char) -> bool {
        if self.truncated {
            return false;
        }
        let mark = self.buf.mark();
        match self.prepare(Slot::Container) {
            Prep::Reject => false,
            Prep::Full => self.fail(mark),
            Prep::Ready => {
                if self.buf.push_char(delim, self.reserve()) {
                    self.scope.push(kind);
                    true
                } else {
                    self.fail(mark)
                }
            }
        }
    }

    fn put_literal(&mut self, text: &str) -> bool {
        if self.truncated {
            return false;
        }
        let mark = self.buf.mark();
        match self.prepare(Slot::Value) {
            Prep::Reject => false,
            Prep::Full => self.fail(mark),
            Prep::Ready => {
                if self.buf.push_str(text, self.reserve()) {
                    true
                } else {
                    self.fail(mark)
                }
            }
        }
    }

    fn put_fmt(&mut self, args: fmt::Arguments<'_>) -> bool {
        if self.truncated {
            return false;
        }
        let mark = self.buf.mark();
        match self.prepare(Slot::Value) {
            Prep::Reject => false,
            Prep::Full => self.fail(mark),
            Prep::Ready => {
                let reserve = self.reserve();
                if write_into(&mut self.buf, reserve, args) {
                    true
                } else {
                    self.fail(mark)
                }
            }
        }
    }

    /// Roll a failed write back and self-truncate. Always returns `false`.
    fn fail(&mut self, mark: usize) -> bool {
        self.buf.truncate(mark);
        self.write_truncated();
        false
    }

    /// Place the truncated form for the current frame and go sticky. The
    /// separator-plus-marker write is atomic so a marker that no longer fits
    /// leaves the document untouched rather than dangling a separator.
    fn write_truncated(&mut self) {
        let mark = self.buf.mark();
        let ok = match self.top() {
            TokenKind::BeginArray => {
                (self.buf.last() == Some('[') || self.buf.push_char(',', 0))
                    && self.buf.push_str(TRUNCATED_OBJECT, 0)
            }
            TokenKind::BeginObject => {
                (self.buf.last() == Some('{') || self.buf.push_char(',', 0))
                    && self.buf.push_str(TRUNCATED_PROPERTY, 0)
            }
            TokenKind::BeginProperty => {
                if self.buf.last() == Some(':') {
                    self.buf.push_str(TRUNCATED_OBJECT, 0)
                } else {
                    // The property already has its value; inject a sibling
                    // property at the enclosing object level.
                    self.buf.push_char(',', 0) && self.buf.push_str(TRUNCATED_PROPERTY, 0)
                }
            }
            _ => self.buf.push_str(TRUNCATED_OBJECT, 0),
        };
        if !ok {
            self.buf.truncate(mark);
        }
        self.truncated = true;
    }

    /// Quote and escape `value` into the buffer. Not atomic on its own;
    /// callers roll back via their mark on failure.
    fn push_quoted(&mut self, value: &str, reserve: usize) -> bool {
        if !self.buf.push_char('"', reserve) {
            return false;
        }
        for c in value.chars() {
            let ok = match c {
                '"' => self.buf.push_str("\\\"", reserve),
                '\\' => self.buf.push_str("\\\\", reserve),
                '\u{0008}' => self.buf.push_str("\\b", reserve),
                '\u{000C}' => self.buf.push_str("\\f", reserve),
                '\n' => self.buf.push_str("\\n", reserve),
                '\r' => self.buf.push_str("\\r", reserve),
                '\t' => self.buf.push_str("\\t", reserve),
                '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' => write_into(
                    &mut self.buf,
                    reserve,
                    format_args!("\\u{:04X}", u32::from(c)),
                ),
                _ => self.buf.push_char(c, reserve),
            };
            if !ok {
                return false;
            }
        }
        self.buf.push_char('"', reserve)
    }
}

/// Reserve-checked formatting sink over the fixed buffer.
struct Sink<'a> {
    buf: &'a mut FixedBuf,
    reserve: usize,
}

impl fmt::Write for Sink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.buf.push_str(s, self.reserve) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

fn write_into(buf: &mut FixedBuf, reserve: usize, args: fmt::Arguments<'_>) -> bool {
    use fmt::Write as _;
    Sink { buf, reserve }.write_fmt(args).is_ok()
}
