/// The kind of the token a [`Scanner`](crate::Scanner) is currently positioned on.
///
/// Kinds fall into groups the predicates below expose: the six *container*
/// kinds (`Begin*`/`End*`), the five *value* kinds, and the two terminal
/// *end-of-payload* kinds. `None` is the state before the first advance and
/// the sentinel kind of the root stack frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// No token has been produced yet.
    None,
    /// `[` opening an array; the matching segment covers the delimiter.
    BeginArray,
    /// `]` closing an array; the segment covers the whole array.
    EndArray,
    /// `{` opening an object; the segment covers the delimiter.
    BeginObject,
    /// `}` closing an object; the segment covers the whole object.
    EndObject,
    /// A property name; the segment covers the quoted name through the colon.
    BeginProperty,
    /// End of a property; the segment covers the name through its value.
    EndProperty,
    /// The `null` literal.
    Null,
    /// The `true` or `false` literal.
    Boolean,
    /// A number without fraction or exponent, including hex forms.
    Integer,
    /// A number with a fraction or exponent.
    Float,
    /// A quoted string; the segment includes both quotes.
    String,
    /// The payload held exactly the tokens already reported. Terminal.
    Complete,
    /// The payload is malformed at the reported offset. Terminal and sticky.
    Invalid,
}

impl TokenKind {
    /// Returns `true` for the six container kinds.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::BeginArray
                | Self::EndArray
                | Self::BeginObject
                | Self::EndObject
                | Self::BeginProperty
                | Self::EndProperty
        )
    }

    /// Returns `true` for `BeginArray`, `BeginObject`, and `BeginProperty`.
    #[inline]
    #[must_use]
    pub const fn is_open_container(self) -> bool {
        matches!(self, Self::BeginArray | Self::BeginObject | Self::BeginProperty)
    }

    /// Returns `true` for `EndArray`, `EndObject`, and `EndProperty`.
    #[inline]
    #[must_use]
    pub const fn is_closed_container(self) -> bool {
        matches!(self, Self::EndArray | Self::EndObject | Self::EndProperty)
    }

    /// Returns `true` for the five value kinds.
    #[inline]
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::Null | Self::Boolean | Self::Integer | Self::Float | Self::String
        )
    }

    /// Returns `true` for `Integer` and `Float`.
    #[inline]
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Returns `true` for the terminal kinds `Complete` and `Invalid`.
    #[inline]
    #[must_use]
    pub const fn is_end_of_payload(self) -> bool {
        matches!(self, Self::Complete | Self::Invalid)
    }
}
