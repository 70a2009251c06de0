use std::fmt;

use tracing::debug;

use super::descriptor::RuleDescriptor;
use super::error::RuleError;
use super::options::ValidatorOptions;
use super::result::ValidationResult;
use super::source::SourceExpression;
use super::view::RuleView;

/// Collects rule declarations for a root type `R`.
///
/// Rules are declared one property at a time and then frozen into an
/// immutable, thread-safe [`Validator`].
///
/// # Example
///
/// ```
/// use optrule::ValidatorBuilder;
///
/// struct Entity {
///     name: String,
///     age: Option<i32>,
/// }
///
/// let mut builder = ValidatorBuilder::<Entity>::new();
/// builder
///     .rule_for("Age", |e: &Entity| e.age)
///     .unwrap()
///     .with_present_value(|age| age.greater_than_or_equal(0))
///     .unwrap();
/// builder
///     .rule_for("Name", |e: &Entity| e.name.clone())
///     .unwrap()
///     .equal("Age".to_owned())
///     .when_present(|e: &Entity| e.age);
/// let validator = builder.build().unwrap();
///
/// let result = validator.validate(&Entity { name: "Age".into(), age: Some(-1) });
/// assert!(!result.is_valid());
/// assert_eq!(result.failures()[0].property_name(), "Age");
/// ```
pub struct ValidatorBuilder<R> {
    rules: Vec<RuleDescriptor<R>>,
    options: ValidatorOptions,
}

impl<R: 'static> ValidatorBuilder<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::default())
    }

    #[must_use]
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            rules: Vec::new(),
            options,
        }
    }

    /// Declare a rule on the property read by `accessor`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NullArgument`] if `property` is empty.
    pub fn rule_for<X, F>(&mut self, property: &str, accessor: F) -> Result<RuleView<'_, R, X>, RuleError>
    where
        X: 'static,
        F: Fn(&R) -> X + Send + Sync + 'static,
    {
        if property.is_empty() {
            return Err(RuleError::NullArgument {
                argument: "property",
            });
        }
        let source = SourceExpression::new(property, accessor);
        debug!(
            property,
            declared = source.declared_type().name(),
            "declared rule"
        );
        self.rules
            .push(RuleDescriptor::new(source, self.options.cascade_mode));
        let index = self.rules.len() - 1;
        Ok(RuleView::new(&mut self.rules[index]))
    }

    /// Declare and configure a rule in one call, in consuming-builder style.
    ///
    /// # Errors
    ///
    /// Propagates any [`RuleError`] from the declaration or from `configure`.
    pub fn rule<X, Y, F, C>(mut self, property: &str, accessor: F, configure: C) -> Result<Self, RuleError>
    where
        X: 'static,
        Y: 'static,
        F: Fn(&R) -> X + Send + Sync + 'static,
        C: for<'v> FnOnce(RuleView<'v, R, X>) -> Result<RuleView<'v, R, Y>, RuleError>,
    {
        let view = self.rule_for(property, accessor)?;
        configure(view)?;
        Ok(self)
    }

    /// Rules declared so far, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleDescriptor<R>] {
        &self.rules
    }

    /// Freeze the declared rules into a [`Validator`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UngatedUnwrap`] if a rule was unwrapped with
    /// `present_value` (or `with_present_value`) and a validator chained after
    /// the unwrap carries no presence gate.
    pub fn build(self) -> Result<Validator<R>, RuleError> {
        if let Some(rule) = self.rules.iter().find(|r| r.is_awaiting_gate()) {
            return Err(RuleError::UngatedUnwrap {
                property: rule.source().property().to_owned(),
            });
        }
        debug!(rules = self.rules.len(), "built validator");
        Ok(Validator { rules: self.rules })
    }
}

impl<R: 'static> Default for ValidatorBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for ValidatorBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("rules", &self.rules)
            .field("options", &self.options)
            .finish()
    }
}

/// A frozen set of rules for `R`. Immutable, `Send + Sync`, and designed to
/// live behind `Arc` while many instances are validated concurrently.
pub struct Validator<R> {
    pub(crate) rules: Vec<RuleDescriptor<R>>,
}

impl<R: 'static> Validator<R> {
    /// Run every rule against `instance`. Never fails; unmet rules are
    /// reported in the returned result.
    pub fn validate(&self, instance: &R) -> ValidationResult {
        crate::evaluate::validate(&self.rules, instance)
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleDescriptor<R>] {
        &self.rules
    }
}

impl<R> fmt::Debug for Validator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<R> fmt::Display for Validator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validator({} rules, {} validators)",
            self.rules.len(),
            self.rules.iter().map(RuleDescriptor::validator_count).sum::<usize>(),
        )
    }
}
