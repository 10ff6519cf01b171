//! parse
//!
//! Parsers for the raw Git output the executor captures.
//!
//! # Responsibilities
//!
//! - [`log`] - Delimited `git log` records → commits, with partial success
//! - [`refs`] - `for-each-ref` lines → refs; HEAD probe parsing
//!
//! # Error Model
//!
//! Log parsing never fails as a whole: invalid records are dropped and
//! reported alongside the commits that parsed ([`log::ParsedLog`]). Ref
//! parsing silently drops undecipherable lines. Nothing here panics on
//! untrusted input.

pub mod log;
pub mod refs;

pub use log::{parse_log, ParseError, ParseErrorKind, ParsedLog, LOG_FORMAT};
pub use refs::{parse_head, parse_refs, Head};
