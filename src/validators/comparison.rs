use std::cmp::Ordering;
use std::fmt;

use super::PropertyValidator;
use crate::message::MessageArgs;

/// Comparison operators available to [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Apply the operator to an ordering. `None` (incomparable, e.g. NaN)
    /// satisfies only `Neq`.
    #[must_use]
    pub fn holds(self, ord: Option<Ordering>) -> bool {
        match (self, ord) {
            (CompareOp::Neq, None) => true,
            (_, None) => false,
            (CompareOp::Eq, Some(o)) => o == Ordering::Equal,
            (CompareOp::Neq, Some(o)) => o != Ordering::Equal,
            (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
            (CompareOp::Gte, Some(o)) => o != Ordering::Less,
            (CompareOp::Lt, Some(o)) => o == Ordering::Less,
            (CompareOp::Lte, Some(o)) => o != Ordering::Greater,
        }
    }

    fn template(self) -> &'static str {
        match self {
            CompareOp::Eq => "'{PropertyName}' must be equal to '{ComparisonValue}'.",
            CompareOp::Neq => "'{PropertyName}' must not be equal to '{ComparisonValue}'.",
            CompareOp::Gt => "'{PropertyName}' must be greater than '{ComparisonValue}'.",
            CompareOp::Gte => {
                "'{PropertyName}' must be greater than or equal to '{ComparisonValue}'."
            }
            CompareOp::Lt => "'{PropertyName}' must be less than '{ComparisonValue}'.",
            CompareOp::Lte => "'{PropertyName}' must be less than or equal to '{ComparisonValue}'.",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// Compares the property against a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<T> {
    op: CompareOp,
    value: T,
}

impl<T> Comparison<T> {
    pub fn new(op: CompareOp, value: T) -> Self {
        Self { op, value }
    }

    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.op
    }
}

impl<T> PropertyValidator<T> for Comparison<T>
where
    T: PartialOrd + fmt::Display + Send + Sync,
{
    fn name(&self) -> &'static str {
        "Comparison"
    }

    fn message_template(&self) -> &str {
        self.op.template()
    }

    fn is_valid(&self, value: &T) -> bool {
        self.op.holds(value.partial_cmp(&self.value))
    }

    fn message_args(&self, value: &T) -> MessageArgs {
        MessageArgs::new()
            .with("ComparisonValue", &self.value)
            .with("PropertyValue", value)
    }
}

/// Valid iff `from <= value <= to`.
#[derive(Debug, Clone, PartialEq)]
pub struct InclusiveBetween<T> {
    from: T,
    to: T,
}

impl<T> InclusiveBetween<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

impl<T> PropertyValidator<T> for InclusiveBetween<T>
where
    T: PartialOrd + fmt::Display + Send + Sync,
{
    fn name(&self) -> &'static str {
        "InclusiveBetween"
    }

    fn message_template(&self) -> &str {
        "'{PropertyName}' must be between {From} and {To}. You entered {PropertyValue}."
    }

    fn is_valid(&self, value: &T) -> bool {
        CompareOp::Gte.holds(value.partial_cmp(&self.from))
            && CompareOp::Lte.holds(value.partial_cmp(&self.to))
    }

    fn message_args(&self, value: &T) -> MessageArgs {
        MessageArgs::new()
            .with("From", &self.from)
            .with("To", &self.to)
            .with("PropertyValue", value)
    }
}
