use std::fmt;

/// One unmet validator, naming the property it was declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct ValidationFailure {
    property_name: String,
    message: String,
    validator: String,
}

impl ValidationFailure {
    pub fn new(
        property_name: impl Into<String>,
        message: impl Into<String>,
        validator: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            message: message.into(),
            validator: validator.into(),
        }
    }

    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the validator that produced this failure, e.g. `"MustBePresent"`.
    #[must_use]
    pub fn validator(&self) -> &str {
        &self.validator
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_name, self.message)
    }
}

/// Outcome of validating one instance.
///
/// A validation run never errors; unmet rules are collected here in the order
/// their rules were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct ValidationResult {
    failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Failures recorded against one property, in declaration order.
    pub fn failures_for<'a>(
        &'a self,
        property_name: &'a str,
    ) -> impl Iterator<Item = &'a ValidationFailure> + 'a {
        self.failures
            .iter()
            .filter(move |f| f.property_name == property_name)
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "invalid ({} failures)", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}
