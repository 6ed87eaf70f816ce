//! Core token trait definitions.
//!
//! The `Token` trait is deliberately minimal: view routing only compares
//! tokens and looks them up in ordered maps, it never does arithmetic on them.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Minimal token trait for the ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to compare/hash. `Display` is the form shown to
/// operators in errors and logs.
pub trait Token: Clone + Ord + Hash + Send + Sync + Debug + Display + 'static {
    /// Minimum token value (start of ring).
    fn zero() -> Self;
    /// True if this token is the minimum.
    fn is_zero(&self) -> bool;
}
