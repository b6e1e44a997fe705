use core::fmt;

/// A construction-time configuration error.
///
/// This enum is intentionally small, copyable, and string-free to stay
/// `no_std` friendly. Malformed payloads are never surfaced here: the scanner
/// reports them through the sticky `Invalid` token and the emitter through
/// `false` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The container-stack depth hint was zero; at least the root frame is
    /// required.
    ZeroDepth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ZeroDepth => "container depth hint must be at least 1",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
