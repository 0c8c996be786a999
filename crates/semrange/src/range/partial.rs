//! Partial versions and their expansion into primitive comparators

use super::{Comparator, Operator, Prefix};
use crate::Version;

/// A range term version where trailing components may be missing or wildcarded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Vec<String>,
    pub build: Vec<String>,
}

impl PartialVersion {
    fn is_full(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// Missing components filled with zero
    fn lower(&self, major: u64) -> Version {
        Version::new(major, self.minor.unwrap_or(0), self.patch.unwrap_or(0))
            .with_prerelease(self.prerelease.clone())
            .with_build(self.build.clone())
    }

    /// First release past everything the given components describe
    fn next_boundary(&self, major: u64) -> Version {
        match self.minor {
            Some(minor) => Version::new(major, minor.saturating_add(1), 0),
            None => Version::new(major.saturating_add(1), 0, 0),
        }
    }

    /// Bump the left-most non-zero component, missing ones counting as zero
    fn caret_boundary(&self, major: u64) -> Version {
        let minor = self.minor.unwrap_or(0);
        let patch = self.patch.unwrap_or(0);

        if major != 0 {
            Version::new(major.saturating_add(1), 0, 0)
        } else if minor != 0 {
            Version::new(0, minor.saturating_add(1), 0)
        } else {
            Version::new(0, 0, patch.saturating_add(1))
        }
    }

    /// Expand a single range term into the comparators it stands for
    pub fn expand(self, prefix: Prefix) -> Vec<Comparator> {
        let Some(major) = self.major else {
            return vec![gte(lowest())];
        };

        let comparators = match prefix {
            Prefix::Tilde => vec![gte(self.lower(major)), lt(self.next_boundary(major))],
            Prefix::Caret => vec![gte(self.lower(major)), lt(self.caret_boundary(major))],
            Prefix::Plain(operator) if self.is_full() => {
                vec![Comparator::new(operator, self.lower(major))]
            }
            Prefix::Plain(Operator::None | Operator::Equal) => {
                vec![gte(self.lower(major)), lt(self.next_boundary(major))]
            }
            Prefix::Plain(Operator::GreaterThan) => vec![gte(self.next_boundary(major))],
            Prefix::Plain(Operator::GreaterThanOrEqual) => vec![gte(self.lower(major))],
            Prefix::Plain(Operator::LessThan) => vec![lt(self.lower(major))],
            Prefix::Plain(Operator::LessThanOrEqual) => vec![lt(self.next_boundary(major))],
        };

        log::debug!(
            "expanded {:?} {:?} into {}",
            prefix,
            self,
            comparators.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        );

        comparators
    }

    /// Expand `from - to` into an inclusive interval
    pub fn expand_hyphen(from: Self, to: Self) -> Vec<Comparator> {
        let mut comparators = from.expand(Prefix::Plain(Operator::GreaterThanOrEqual));
        comparators.extend(to.expand(Prefix::Plain(Operator::LessThanOrEqual)));
        comparators
    }
}

/// `0.0.0-0`, below every other version
fn lowest() -> Version {
    Version::new(0, 0, 0).with_prerelease(vec!["0".to_string()])
}

fn gte(version: Version) -> Comparator {
    Comparator::new(Operator::GreaterThanOrEqual, version)
}

fn lt(version: Version) -> Comparator {
    Comparator::new(Operator::LessThan, version)
}
