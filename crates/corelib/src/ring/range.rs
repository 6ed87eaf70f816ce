//! Token ranges on the ring.

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Half-open ring range `(left, right]`.
///
/// A range whose `right` is lower than or equal to `left` wraps past the
/// minimum token. `left == right` covers the whole ring.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRange<T> {
    pub left: T,
    pub right: T,
}

impl<T: Token> TokenRange<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// True if the range crosses the minimum token.
    pub fn is_wrap_around(&self) -> bool {
        self.left >= self.right && !self.right.is_zero()
    }

    pub fn contains(&self, token: &T) -> bool {
        if self.left == self.right {
            return true;
        }
        if self.right.is_zero() {
            // (left, min] means "everything after left"
            return *token > self.left;
        }
        if self.is_wrap_around() {
            *token > self.left || *token <= self.right
        } else {
            *token > self.left && *token <= self.right
        }
    }
}
