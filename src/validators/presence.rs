use std::fmt;
use std::marker::PhantomData;

use super::PropertyValidator;

/// Valid iff the optional property holds a value.
pub struct MustBePresent<T> {
    _inner: PhantomData<fn() -> T>,
}

/// Valid iff the optional property holds no value.
pub struct MustBeAbsent<T> {
    _inner: PhantomData<fn() -> T>,
}

impl<T> MustBePresent<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _inner: PhantomData,
        }
    }
}

impl<T> MustBeAbsent<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _inner: PhantomData,
        }
    }
}

impl<T> Default for MustBePresent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Default for MustBeAbsent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MustBePresent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MustBePresent")
    }
}

impl<T> fmt::Debug for MustBeAbsent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MustBeAbsent")
    }
}

impl<T> PropertyValidator<Option<T>> for MustBePresent<T> {
    fn name(&self) -> &'static str {
        "MustBePresent"
    }

    fn message_template(&self) -> &str {
        "'{PropertyName}' must contain a value."
    }

    fn is_valid(&self, value: &Option<T>) -> bool {
        value.is_some()
    }
}

impl<T> PropertyValidator<Option<T>> for MustBeAbsent<T> {
    fn name(&self) -> &'static str {
        "MustBeAbsent"
    }

    fn message_template(&self) -> &str {
        "'{PropertyName}' must not contain a value."
    }

    fn is_valid(&self, value: &Option<T>) -> bool {
        value.is_none()
    }
}
