//! Common utilities for edds2png.
//!
//! This crate provides the foundational pieces shared by the other crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`Error`] / [`Result`] - Shared error type for low-level parsing

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
