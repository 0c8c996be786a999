//! Semver facade providing high-level string operations

use std::cmp::Ordering;

use crate::{ParseError, Range, Version, VersionParser};

/// Main facade for semantic versioning operations on plain strings
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a range. Unparsable input never satisfies.
    pub fn satisfies(version: &str, range: &str) -> bool {
        let parser = VersionParser::new();

        let Some(version) = parse_logged(&parser, version) else {
            return false;
        };

        let range = match parser.parse_range(range) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Ignoring unparsable range {:?}: {}", range, e);
                return false;
            }
        };

        range.satisfied_by(&version)
    }

    /// Return all versions that satisfy the given range, in input order
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let range = match Self::parse_range(range) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Ignoring unparsable range {:?}: {}", range, e);
                return Vec::new();
            }
        };

        versions
            .iter()
            .filter(|v| Self::satisfies_parsed(v, &range))
            .map(|v| v.to_string())
            .collect()
    }

    /// Return the greatest version that satisfies the given range
    pub fn max_satisfying(versions: &[&str], range: &str) -> Option<String> {
        let range = match Self::parse_range(range) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Ignoring unparsable range {:?}: {}", range, e);
                return None;
            }
        };
        let parser = VersionParser::new();

        versions
            .iter()
            .filter_map(|v| Some((parse_logged(&parser, v)?, *v)))
            .filter(|(version, _)| range.satisfied_by(version))
            .max_by(|(a, _), (b, _)| a.compare(b))
            .map(|(_, original)| original.to_string())
    }

    /// Parse a range once for repeated checks
    pub fn parse_range(range: &str) -> Result<Range, ParseError> {
        VersionParser::new().parse_range(range)
    }

    /// Check a version against a pre-parsed range
    pub fn satisfies_parsed(version: &str, range: &Range) -> bool {
        parse_logged(&VersionParser::new(), version).is_some_and(|v| range.satisfied_by(&v))
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let parser = VersionParser::new();

        // Unparsable versions are dropped
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((parse_logged(&parser, v)?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp: Ordering = a.compare(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        // Return original versions in sorted order
        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}

fn parse_logged(parser: &VersionParser, version: &str) -> Option<Version> {
    match parser.parse_version(version) {
        Ok(v) => Some(v),
        Err(e) => {
            log::debug!("Ignoring unparsable version {:?}: {}", version, e);
            None
        }
    }
}
