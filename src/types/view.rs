use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::condition::{Condition, ConditionScope};
use super::descriptor::{RuleComponent, RuleDescriptor};
use super::error::RuleError;
use super::options::CascadeMode;
use super::source::TypeInfo;
use crate::message::MessageTemplate;
use crate::validators::{
    erase, CompareOp, Comparison, InclusiveBetween, IsEmpty, NotEmpty, Predicate,
    PropertyValidator,
};

/// A typed lens onto a [`RuleDescriptor`], exposing the chaining API at the
/// declared property type `X`.
///
/// The view borrows the descriptor from the builder that owns it. Combinators
/// consume the view and hand it back, so every validator and condition
/// chained through any view lands on the same underlying rule.
pub struct RuleView<'a, R, X> {
    descriptor: &'a mut RuleDescriptor<R>,
    _declared: PhantomData<fn() -> X>,
}

impl<'a, R: 'static, X: 'static> RuleView<'a, R, X> {
    pub(crate) fn new(descriptor: &'a mut RuleDescriptor<R>) -> Self {
        Self {
            descriptor,
            _declared: PhantomData,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &RuleDescriptor<R> {
        &*self.descriptor
    }

    pub(crate) fn descriptor_mut(&mut self) -> &mut RuleDescriptor<R> {
        &mut *self.descriptor
    }

    /// The type this view presents to the rule author.
    #[must_use]
    pub fn declared_type(&self) -> TypeInfo {
        TypeInfo::of::<X>()
    }

    /// Re-type this view as `U`, sharing the same descriptor.
    ///
    /// Only a rule whose source expression was declared as `Option<U>` may be
    /// rebound to `U`. Rebinding installs no transform, so until one is
    /// installed the validators chained at `U` still receive the raw
    /// `Option<U>` and fail. `present_value` and `with_present_value` unwrap
    /// and rebind in one step.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::TypeMismatch`] when the source expression was
    /// declared with any other type.
    pub fn rebind<U: 'static>(self) -> Result<RuleView<'a, R, U>, RuleError> {
        let declared = self.descriptor.source.declared_type();
        if !declared.is::<Option<U>>() {
            return Err(RuleError::TypeMismatch {
                property: self.descriptor.source.property().to_owned(),
                expected: std::any::type_name::<Option<U>>(),
                actual: declared.name(),
            });
        }
        Ok(RuleView::new(self.descriptor))
    }

    /// Append a validator to the chain.
    pub fn set_validator<V>(self, validator: V) -> Self
    where
        V: PropertyValidator<X> + 'static,
    {
        self.descriptor.push(RuleComponent::new(erase::<X, V>(validator)));
        self
    }

    /// Append a validator that checks `predicate`.
    pub fn must<F>(self, predicate: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        self.set_validator(Predicate::new(predicate))
    }

    /// Attach a condition over the root instance.
    pub fn condition(mut self, condition: Condition<R>, scope: ConditionScope) -> Self {
        self.descriptor_mut().attach_condition(condition, scope);
        self
    }

    /// Run the validators chained so far only when `predicate` holds.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.when_scoped(predicate, ConditionScope::AllValidators)
    }

    /// Like [`when`](Self::when), applied to the validators `scope` selects.
    pub fn when_scoped<F>(self, predicate: F, scope: ConditionScope) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.condition(Arc::new(predicate), scope)
    }

    /// Run the validators chained so far only when `predicate` does not hold.
    pub fn unless<F>(self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.unless_scoped(predicate, ConditionScope::AllValidators)
    }

    pub fn unless_scoped<F>(self, predicate: F, scope: ConditionScope) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.condition(Arc::new(move |root: &R| !predicate(root)), scope)
    }

    /// Override the failure message of the most recently chained validator.
    pub fn with_message(self, template: &str) -> Self {
        if let Some(last) = self.descriptor.components.last_mut() {
            last.message = Some(MessageTemplate::parse(template));
        }
        self
    }

    /// Override the property name used in failure messages.
    pub fn with_name(self, name: &str) -> Self {
        self.descriptor.display_name = Some(name.to_owned());
        self
    }

    pub fn cascade(self, mode: CascadeMode) -> Self {
        self.descriptor.cascade = mode;
        self
    }
}

impl<R: 'static, X> RuleView<'_, R, X>
where
    X: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    pub fn equal(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Eq, value))
    }

    pub fn not_equal(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Neq, value))
    }

    pub fn greater_than(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Gt, value))
    }

    pub fn greater_than_or_equal(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Gte, value))
    }

    pub fn less_than(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Lt, value))
    }

    pub fn less_than_or_equal(self, value: X) -> Self {
        self.set_validator(Comparison::new(CompareOp::Lte, value))
    }

    pub fn inclusive_between(self, from: X, to: X) -> Self {
        self.set_validator(InclusiveBetween::new(from, to))
    }
}

impl<R: 'static, X: IsEmpty + 'static> RuleView<'_, R, X> {
    pub fn not_empty(self) -> Self {
        self.set_validator(NotEmpty)
    }
}

impl<R, X> fmt::Debug for RuleView<'_, R, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleView")
            .field("declared", &std::any::type_name::<X>())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
