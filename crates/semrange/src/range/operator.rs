//! Operator types for range comparators

use std::fmt;

/// Relational operator carried by a [`Comparator`](super::Comparator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// No operator written, exact match
    #[default]
    None,
    /// Equal (=)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator written in front of a range term, before expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    Plain(Operator),
    Tilde,
    Caret,
}

impl Default for Prefix {
    fn default() -> Self {
        Prefix::Plain(Operator::None)
    }
}

impl Prefix {
    /// Every prefix symbol, two-character operators ahead of their one-character heads
    pub(crate) fn symbols() -> &'static [(&'static str, Prefix)] {
        &[
            ("^", Prefix::Caret),
            ("~", Prefix::Tilde),
            (">=", Prefix::Plain(Operator::GreaterThanOrEqual)),
            ("<=", Prefix::Plain(Operator::LessThanOrEqual)),
            (">", Prefix::Plain(Operator::GreaterThan)),
            ("<", Prefix::Plain(Operator::LessThan)),
            ("=", Prefix::Plain(Operator::Equal)),
        ]
    }
}
