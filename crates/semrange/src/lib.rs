//! Semantic version parsing, ordering and range matching
//!
//! This crate parses `major.minor.patch[-prerelease][+build]` versions and
//! npm-style ranges (`^`, `~`, `x` wildcards, hyphen ranges and `||`), and
//! expands every range into sets of primitive `<`, `<=`, `>`, `>=` and `=`
//! comparators.
//!
//! ```
//! use semrange::{parse_range, parse_version};
//!
//! let range = parse_range("^1.2.3 || 3.x").unwrap();
//! assert_eq!(range.to_string(), ">=1.2.3 <2.0.0 || >=3.0.0 <4.0.0");
//! assert!(range.satisfied_by(&parse_version("1.9.9").unwrap()));
//! assert!(!range.satisfied_by(&parse_version("2.0.0").unwrap()));
//! ```

mod error;
mod lexer;
pub mod range;
mod semver;
mod version;
mod version_parser;

pub use error::{ErrorKind, ParseError};
pub use range::{Comparator, Operator, Range, Set};
pub use semver::Semver;
pub use version::Version;
pub use version_parser::VersionParser;

/// Parse a version with the lenient parser
pub fn parse_version(text: &str) -> Result<Version, ParseError> {
    VersionParser::new().parse_version(text)
}

/// Parse a range with the lenient parser
pub fn parse_range(text: &str) -> Result<Range, ParseError> {
    VersionParser::new().parse_range(text)
}
