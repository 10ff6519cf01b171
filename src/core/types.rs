//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommitHash`] - Validated Git commit identifier (40 hex chars)
//! - [`Identity`] - Author or committer name/email pair
//!
//! # Validation
//!
//! [`CommitHash::new`] enforces validity at construction time: exactly 40
//! hexadecimal characters, normalized to lowercase. Invalid values cannot
//! be represented, which keeps every hash stored anywhere in a graph in
//! canonical form. [`CommitHash::new_unchecked`] is the fast path for
//! parser internals that have already validated their input.
//!
//! # Examples
//!
//! ```
//! use tributary::core::types::CommitHash;
//!
//! // Valid constructions (normalized to lowercase)
//! let hash = CommitHash::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
//! assert_eq!(hash.as_str(), "abc123def4567890abc123def4567890abc12345");
//!
//! // Invalid constructions fail at creation time
//! assert!(CommitHash::new("not-a-sha").is_err());
//! assert!(CommitHash::new("abc123").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid commit hash: {0}")]
    InvalidHash(String),
}

/// A validated Git commit hash.
///
/// Hashes are exactly 40 hexadecimal characters and are normalized to
/// lowercase for consistency.
///
/// # Example
///
/// ```
/// use tributary::core::types::CommitHash;
///
/// let hash = CommitHash::new("abc123def4567890abc123def4567890abc12345").unwrap();
/// assert_eq!(hash.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitHash(String);

impl CommitHash {
    /// Create a new validated commit hash.
    ///
    /// The hash is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidHash` if the string is not exactly 40
    /// hexadecimal characters.
    pub fn new(hash: impl Into<String>) -> Result<Self, TypeError> {
        let hash = hash.into().to_ascii_lowercase();
        Self::validate(&hash)?;
        Ok(Self(hash))
    }

    /// Create a commit hash without validating.
    ///
    /// For parser internals that have already validated the input. The
    /// caller must guarantee the string is 40 lowercase hex characters.
    pub fn new_unchecked(hash: impl Into<String>) -> Self {
        let hash = hash.into();
        debug_assert!(Self::validate(&hash).is_ok());
        Self(hash)
    }

    /// Check whether a string is a valid lowercase 40-hex hash.
    pub fn is_valid(hash: &str) -> bool {
        Self::validate(hash).is_ok()
    }

    fn validate(hash: &str) -> Result<(), TypeError> {
        if hash.len() != 40 {
            return Err(TypeError::InvalidHash(format!(
                "expected 40 hex characters, got {}",
                hash.len()
            )));
        }
        if !hash
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(TypeError::InvalidHash(
                "commit hash must be lowercase hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get an abbreviated form of the hash.
    ///
    /// Returns the first `len` characters, or the full hash if `len`
    /// exceeds its length.
    ///
    /// # Example
    ///
    /// ```
    /// use tributary::core::types::CommitHash;
    ///
    /// let hash = CommitHash::new("abc123def4567890abc123def4567890abc12345").unwrap();
    /// assert_eq!(hash.short(7), "abc123d");
    /// assert_eq!(hash.short(4), "abc1");
    /// ```
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommitHash {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommitHash> for String {
    fn from(hash: CommitHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An author or committer identity.
///
/// Either field may be empty; Git does not require both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name (may be empty)
    pub name: String,

    /// Email address (may be empty)
    pub email: String,
}

impl Identity {
    /// Create an identity from name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.name.is_empty(), self.email.is_empty()) {
            (false, false) => write!(f, "{} <{}>", self.name, self.email),
            (false, true) => write!(f, "{}", self.name),
            (true, false) => write!(f, "<{}>", self.email),
            (true, true) => Ok(()),
        }
    }
}
