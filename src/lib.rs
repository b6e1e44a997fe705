//! # pulse-json
//!
//! Allocation-disciplined JSON scanning and fixed-capacity emission for the
//! **Pulse** telemetry pipeline.
//!
//! ## Design principles
//!
//! - **Tokens are positions, not copies.**
//!   The [`Scanner`] walks a payload one token at a time and reports each as
//!   a [`Segment`] (offset and length into the payload). String bodies are
//!   decoded only when a caller asks, into a scratch buffer that is reused
//!   across tokens.
//! - **Output capacity is a hard bound.**
//!   The [`Emitter`] writes into a pre-sized buffer and reserves, on every
//!   append, enough space to close every open container and place a
//!   well-formed truncated marker. A finished document never exceeds the
//!   construction capacity.
//! - **Steady state allocates nothing.**
//!   Both primitives are reusable (`reset`/`clear` retain allocations); the
//!   hot paths `next`, value writes, `close_token`, and `finish` never touch
//!   the allocator.
//! - **Malformed data is a state, not an error.**
//!   The scanner reports bad payloads through the sticky `Invalid` token and
//!   the emitter reports exhausted capacity through `false` returns; the only
//!   fallible constructions are zero depth hints.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`ConfigError`].
//! - `simdutf8` *(default)*: accelerated UTF-8 validation when string bodies
//!   are materialized; without it, `core::str::from_utf8` is used.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and requires an allocator.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod buffer;
mod emit;
mod error;
mod scanner;
mod segment;
mod token;
mod utf8;

pub use crate::buffer::FixedBuf;
pub use crate::emit::{Emitter, TRUNCATED_OBJECT, TRUNCATED_PROPERTY};
pub use crate::error::ConfigError;
pub use crate::scanner::Scanner;
pub use crate::segment::Segment;
pub use crate::token::TokenKind;
