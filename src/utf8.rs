//! UTF-8 validation seam for payload slices.
//!
//! Scanning itself is byte-wise and never validates; this is only consulted
//! when a string body is materialized for a caller.

/// Returns the bytes as `&str` if they are valid UTF-8.
#[inline]
pub(crate) fn to_str(bytes: &[u8]) -> Option<&str> {
    #[cfg(feature = "simdutf8")]
    {
        simdutf8::basic::from_utf8(bytes).ok()
    }

    #[cfg(not(feature = "simdutf8"))]
    {
        core::str::from_utf8(bytes).ok()
    }
}
