//! Rules over `Option<T>` properties.
//!
//! A rule declared on an `Option<T>` property can be unwrapped so that the
//! validators chained afterwards see the contained `T`. Unwrapping installs a
//! transform on the shared [`RuleDescriptor`] and re-types the
//! [`RuleView`]; a presence condition re-evaluates the rule's own accessor
//! against each validated instance so that the inner validators are skipped
//! when there is nothing to validate.

use std::any::type_name;
use std::sync::Arc;

use tracing::debug;

use crate::types::{
    Accessor, Condition, ConditionScope, ErasedValue, Polarity, RuleDescriptor, RuleError,
    RuleView, Transform,
};
use crate::validators::{MustBeAbsent, MustBePresent};

/// Build a condition that re-reads `accessor` on every call and reports
/// whether the optional matches `polarity`.
///
/// Nothing is cached between calls. A panic raised by the accessor
/// propagates to the caller.
pub fn presence_condition<R, T>(accessor: Accessor<R, Option<T>>, polarity: Polarity) -> Condition<R>
where
    R: 'static,
    T: 'static,
{
    Arc::new(move |root: &R| polarity.admits(accessor(root).is_some()))
}

/// Transform replacing an `Option<T>` with its value, or `T::default()`.
fn unwrap_transform<T: Default + 'static>() -> Transform {
    Arc::new(|value: ErasedValue| match value.downcast::<Option<T>>() {
        Ok(option) => Box::new(option.unwrap_or_default()) as ErasedValue,
        Err(other) => other,
    })
}

/// The rule's own accessor, provided it was declared as `Option<T>`.
fn optional_accessor<R, T>(descriptor: &RuleDescriptor<R>) -> Result<Accessor<R, Option<T>>, RuleError>
where
    R: 'static,
    T: 'static,
{
    let source = descriptor.source();
    source
        .accessor::<Option<T>>()
        .ok_or_else(|| RuleError::InvalidPropertyBinding {
            property: source.property().to_owned(),
            expected: type_name::<Option<T>>(),
            actual: source.declared_type().name(),
        })
}

fn install_unwrap<R, T>(descriptor: &mut RuleDescriptor<R>)
where
    T: Default + 'static,
{
    debug!(
        property = descriptor.source().property(),
        inner = type_name::<T>(),
        replaced = descriptor.has_transform(),
        "installed unwrap transform"
    );
    descriptor.install_transform(unwrap_transform::<T>());
}

impl<'a, R: 'static, T: 'static> RuleView<'a, R, Option<T>> {
    /// Unwrap the rule, let `configure` chain validators on the contained
    /// value, and gate exactly those validators on the value being present.
    ///
    /// When the property is `None` the validators added by `configure` are
    /// not evaluated at all. Validators chained on this rule before the call
    /// keep their own conditions. Validators chained on the returned view
    /// are not covered and need a presence gate of their own.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPropertyBinding`] if the rule's source
    /// expression was not declared as `Option<T>`.
    pub fn with_present_value<C>(self, configure: C) -> Result<RuleView<'a, R, T>, RuleError>
    where
        T: Default,
        C: FnOnce(RuleView<'a, R, T>) -> RuleView<'a, R, T>,
    {
        let accessor = optional_accessor::<R, T>(self.descriptor())?;
        let first = self.descriptor().validator_count();
        let inner = self.unwrap_into()?;

        let mut configured = configure(inner);
        let descriptor = configured.descriptor_mut();
        descriptor.attach_presence_gate_from(first, presence_condition(accessor, Polarity::WhenSome));
        descriptor.gate_from = Some(first);
        debug!(
            property = descriptor.source().property(),
            gated = descriptor.validator_count() - first,
            "gated unwrapped validators on presence"
        );
        Ok(configured)
    }

    /// Unwrap the rule without gating it.
    ///
    /// Every validator chained on the returned view must be covered by a
    /// presence gate ([`when_some`](RuleView::when_some),
    /// [`when_none`](RuleView::when_none),
    /// [`gate_on_presence`](RuleView::gate_on_presence) and friends) attached
    /// after it was chained; otherwise
    /// [`ValidatorBuilder::build`](crate::ValidatorBuilder::build) fails with
    /// [`RuleError::UngatedUnwrap`]. A gate only covers the validators that
    /// exist when it is attached.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPropertyBinding`] if the rule's source
    /// expression was not declared as `Option<T>`.
    pub fn present_value(self) -> Result<RuleView<'a, R, T>, RuleError>
    where
        T: Default,
    {
        let start = self.descriptor().validator_count();
        let mut inner = self.unwrap_into()?;
        inner.descriptor_mut().gate_from = Some(start);
        Ok(inner)
    }

    /// Unwrap the rule with no gate at all: when the property is `None`,
    /// the validators see `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPropertyBinding`] if the rule's source
    /// expression was not declared as `Option<T>`.
    pub fn value_or_default(self) -> Result<RuleView<'a, R, T>, RuleError>
    where
        T: Default,
    {
        let mut inner = self.unwrap_into()?;
        inner.descriptor_mut().gate_from = None;
        Ok(inner)
    }

    /// Fail with `'{PropertyName}' must contain a value.` when `None`.
    pub fn must_be_present(self) -> Self {
        self.set_validator(MustBePresent::<T>::new())
    }

    /// Fail with `'{PropertyName}' must not contain a value.` when `Some`.
    pub fn must_be_absent(self) -> Self {
        self.set_validator(MustBeAbsent::<T>::new())
    }

    fn unwrap_into(mut self) -> Result<RuleView<'a, R, T>, RuleError>
    where
        T: Default,
    {
        optional_accessor::<R, T>(self.descriptor())?;
        install_unwrap::<R, T>(self.descriptor_mut());
        self.rebind::<T>()
    }
}

impl<R: 'static, X: 'static> RuleView<'_, R, X> {
    /// Gate validators on whether `expression` yields a value for the
    /// instance being validated.
    ///
    /// `expression` may read any optional property of the root, not only the
    /// one this rule is declared on.
    pub fn gate_on_presence<T, F>(mut self, expression: F, polarity: Polarity, scope: ConditionScope) -> Self
    where
        T: 'static,
        F: Fn(&R) -> Option<T> + Send + Sync + 'static,
    {
        let accessor: Accessor<R, Option<T>> = Arc::new(expression);
        let descriptor = self.descriptor_mut();
        descriptor.attach_presence_gate(presence_condition(accessor, polarity), scope);
        debug!(
            property = descriptor.source().property(),
            %polarity,
            ?scope,
            "attached presence gate"
        );
        self
    }

    /// Run the validators chained so far only when `expression` is `Some`.
    pub fn when_present<T, F>(self, expression: F) -> Self
    where
        T: 'static,
        F: Fn(&R) -> Option<T> + Send + Sync + 'static,
    {
        self.gate_on_presence(expression, Polarity::WhenSome, ConditionScope::AllValidators)
    }

    /// Run the validators chained so far only when `expression` is `None`.
    pub fn unless_present<T, F>(self, expression: F) -> Self
    where
        T: 'static,
        F: Fn(&R) -> Option<T> + Send + Sync + 'static,
    {
        self.gate_on_presence(expression, Polarity::WhenNone, ConditionScope::AllValidators)
    }

    /// Gate the whole chain on this rule's own property being `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPropertyBinding`] unless the rule's source
    /// expression was declared as `Option<X>`, i.e. this view is an unwrapped one.
    pub fn when_some(self) -> Result<Self, RuleError> {
        self.gate_on_own_presence(Polarity::WhenSome)
    }

    /// Gate the whole chain on this rule's own property being `None`.
    ///
    /// # Errors
    ///
    /// Same as [`when_some`](Self::when_some).
    pub fn when_none(self) -> Result<Self, RuleError> {
        self.gate_on_own_presence(Polarity::WhenNone)
    }

    fn gate_on_own_presence(mut self, polarity: Polarity) -> Result<Self, RuleError> {
        let accessor = optional_accessor::<R, X>(self.descriptor())?;
        let descriptor = self.descriptor_mut();
        descriptor.attach_presence_gate(
            presence_condition(accessor, polarity),
            ConditionScope::AllValidators,
        );
        Ok(self)
    }
}
