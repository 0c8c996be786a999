//! A single operator/version pair

use std::fmt;

use super::Operator;
use crate::Version;

/// An operator anchored at a version, e.g. `>=1.2.0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    operator: Operator,
    version: Version,
}

impl Comparator {
    pub fn new(operator: Operator, version: Version) -> Self {
        Comparator { operator, version }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The anchor version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether `version` passes this comparator.
    ///
    /// Equality operators use [`Version::equal_to`], relational operators
    /// use [`Version::compare`].
    pub fn satisfied_by(&self, version: &Version) -> bool {
        match self.operator {
            Operator::None | Operator::Equal => version.equal_to(&self.version),
            Operator::LessThan => version < &self.version,
            Operator::LessThanOrEqual => version <= &self.version,
            Operator::GreaterThan => version > &self.version,
            Operator::GreaterThanOrEqual => version >= &self.version,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
