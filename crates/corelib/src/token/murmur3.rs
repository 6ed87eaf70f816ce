//! Murmur3 hash token implementation.

use crate::error::Error;
use crate::token::traits::Token;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Murmur3 token using u64 representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Murmur3Token(pub u64);

impl Token for Murmur3Token {
    fn zero() -> Self {
        Murmur3Token(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Murmur3Token {
    /// Creates a token from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = SipHasher13::new();
        data.hash(&mut hasher);
        Murmur3Token(hasher.finish())
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}

impl fmt::Display for Murmur3Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Murmur3Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Murmur3Token)
            .map_err(|e| Error::InvalidToken(format!("{s:?}: {e}")))
    }
}
