use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::PropertyValidator;

/// Wraps an arbitrary predicate over the property value.
pub struct Predicate<F> {
    predicate: F,
}

impl<F> Predicate<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

impl<T, F> PropertyValidator<T> for Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn name(&self) -> &'static str {
        "Predicate"
    }

    fn message_template(&self) -> &str {
        "The specified condition was not met for '{PropertyName}'."
    }

    fn is_valid(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

/// Types with a notion of emptiness, for [`NotEmpty`].
pub trait IsEmpty {
    fn is_empty_value(&self) -> bool;
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl IsEmpty for &str {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for HashMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Valid iff the value is not empty (whitespace-only strings count as empty).
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl<T: IsEmpty> PropertyValidator<T> for NotEmpty {
    fn name(&self) -> &'static str {
        "NotEmpty"
    }

    fn message_template(&self) -> &str {
        "'{PropertyName}' must not be empty."
    }

    fn is_valid(&self, value: &T) -> bool {
        !value.is_empty_value()
    }
}
