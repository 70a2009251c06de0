use std::fmt;
use std::sync::Arc;

/// A predicate over the root instance that decides whether a validator runs.
pub type Condition<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Which validators in a rule's chain a newly attached condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionScope {
    /// Only the most recently attached validator.
    CurrentValidator,
    /// Every validator attached to the rule so far.
    #[default]
    AllValidators,
}

/// Whether a presence gate opens on a present or on an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    WhenSome,
    WhenNone,
}

impl Polarity {
    /// Whether a value with the given presence satisfies this polarity.
    #[must_use]
    pub fn admits(self, present: bool) -> bool {
        match self {
            Polarity::WhenSome => present,
            Polarity::WhenNone => !present,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::WhenSome => write!(f, "when-some"),
            Polarity::WhenNone => write!(f, "when-none"),
        }
    }
}
