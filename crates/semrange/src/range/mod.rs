//! Version ranges: disjunctions of comparator sets
//!
//! A [`Range`] holds one [`Set`] per `||` alternative. A [`Set`] is the
//! conjunction of the [`Comparator`]s its terms expanded into, so
//! `^1.2 || 2.0.0 - 2.1` becomes `>=1.2.0 <2.0.0 || >=2.0.0 <2.2.0`.

mod comparator;
mod operator;
mod partial;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::de::{self, Deserialize, Deserializer, Visitor};
#[cfg(feature = "serde")]
use serde::ser::{Serialize, Serializer};

pub use comparator::Comparator;
pub use operator::Operator;
pub(crate) use operator::Prefix;
pub(crate) use partial::PartialVersion;

use crate::{ParseError, Version, VersionParser};

/// Comparators that must all hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    comparators: Vec<Comparator>,
}

impl Set {
    pub fn new(comparators: Vec<Comparator>) -> Self {
        Set { comparators }
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// An empty set is satisfied by every version
    pub fn satisfied_by(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.satisfied_by(version))
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.comparators.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Alternatives of which at least one must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Range {
    sets: Vec<Set>,
}

impl Range {
    pub fn new(sets: Vec<Set>) -> Self {
        Range { sets }
    }

    /// Parse a range with the lenient parser
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        VersionParser::new().parse_range(text)
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn satisfied_by(&self, version: &Version) -> bool {
        self.sets.iter().any(|s| s.satisfied_by(version))
    }

    /// Greatest candidate satisfying the range
    pub fn max_satisfying<'v>(&self, versions: &'v [Version]) -> Option<&'v Version> {
        versions.iter().filter(|v| self.satisfied_by(v)).max()
    }

    /// Least candidate satisfying the range
    pub fn min_satisfying<'v>(&self, versions: &'v [Version]) -> Option<&'v Version> {
        versions.iter().filter(|v| self.satisfied_by(v)).min()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.sets.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join(" || "))
    }
}

impl FromStr for Range {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeVisitor;

        impl<'de> Visitor<'de> for RangeVisitor {
            type Value = Range;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a version range string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Range::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(RangeVisitor)
    }
}
