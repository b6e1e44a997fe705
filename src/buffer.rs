use alloc::string::String;

/// A bounded, append-only text accumulator with caller-managed rollback.
///
/// The logical capacity is independent of the underlying allocation: appends
/// are admitted against `capacity`, never against what the allocator happens
/// to have handed out. Every append takes a `reserve`, the number of code
/// units that must remain free *after* the append succeeds; this is how the
/// emitter guarantees it can always close every open container and place the
/// truncated marker.
///
/// Contents are always valid UTF-8, and rollback marks taken with [`mark`]
/// always sit on a character boundary.
///
/// [`mark`]: FixedBuf::mark
#[derive(Debug)]
pub struct FixedBuf {
    data: String,
    capacity: usize,
}

impl FixedBuf {
    /// Create a buffer with the given logical capacity, allocated up front.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one character, leaving at least `reserve` code units free.
    ///
    /// For single-unit characters this is the strict form: an append into the
    /// last free slot succeeds only with a zero reserve.
    #[inline]
    pub fn push_char(&mut self, c: char, reserve: usize) -> bool {
        let needed = self.data.len() + c.len_utf8();
        match needed.checked_add(reserve) {
            Some(total) if total <= self.capacity => {
                self.data.push(c);
                true
            }
            _ => false,
        }
    }

    /// Append a whole string atomically, leaving at least `reserve` code
    /// units free. Either every code unit of `s` is written or none is.
    #[inline]
    pub fn push_str(&mut self, s: &str, reserve: usize) -> bool {
        let needed = self.data.len() + s.len();
        match needed.checked_add(reserve) {
            Some(total) if total <= self.capacity => {
                self.data.push_str(s);
                true
            }
            _ => false,
        }
    }

    /// The last character written, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<char> {
        self.data.chars().next_back()
    }

    /// Current length in code units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The logical capacity in code units.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrow the accumulated text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Record the current length as a rollback point for a composite write.
    #[inline]
    #[must_use]
    pub fn mark(&self) -> usize {
        self.data.len()
    }

    /// Roll back to a length previously returned by [`mark`].
    ///
    /// [`mark`]: FixedBuf::mark
    #[inline]
    pub fn truncate(&mut self, mark: usize) {
        self.data.truncate(mark);
    }

    /// Discard the contents while retaining the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Raise the logical capacity. Expands iff `new_capacity` is strictly
    /// larger than the current capacity; returns whether it did.
    pub fn try_grow(&mut self, new_capacity: usize) -> bool {
        if new_capacity <= self.capacity {
            return false;
        }
        self.data.reserve(new_capacity - self.data.len());
        self.capacity = new_capacity;
        true
    }

    /// Change the logical capacity in either direction.
    ///
    /// Succeeds iff the current contents plus `reserve` still fit, i.e.
    /// `new_capacity - reserve >= len`; otherwise the buffer is untouched.
    pub fn try_resize(&mut self, new_capacity: usize, reserve: usize) -> bool {
        let Some(usable) = new_capacity.checked_sub(reserve) else {
            return false;
        };
        if usable < self.data.len() {
            return false;
        }
        if new_capacity > self.capacity {
            self.data.reserve(new_capacity - self.data.len());
        }
        self.capacity = new_capacity;
        true
    }
}
