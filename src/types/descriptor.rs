use std::fmt;

use super::condition::{Condition, ConditionScope};
use super::options::CascadeMode;
use super::source::{ErasedValue, SourceExpression, Transform};
use crate::message::MessageTemplate;
use crate::validators::ErasedValidator;

/// One validator in a rule's chain, with the conditions gating it.
pub(crate) struct RuleComponent<R> {
    pub(crate) validator: Box<dyn ErasedValidator>,
    pub(crate) conditions: Vec<Condition<R>>,
    pub(crate) message: Option<MessageTemplate>,
    /// Set once any presence condition gates this component.
    pub(crate) presence_gated: bool,
}

impl<R> RuleComponent<R> {
    pub(crate) fn new(validator: Box<dyn ErasedValidator>) -> Self {
        Self {
            validator,
            conditions: Vec::new(),
            message: None,
            presence_gated: false,
        }
    }

    /// Whether every attached condition holds for `root`.
    pub(crate) fn applies_to(&self, root: &R) -> bool {
        self.conditions.iter().all(|condition| condition(root))
    }

    pub(crate) fn template(&self) -> &MessageTemplate {
        self.message
            .as_ref()
            .unwrap_or_else(|| self.validator.template())
    }
}

/// The engine's record of one declared rule.
///
/// Owned by the [`ValidatorBuilder`](super::ValidatorBuilder) (and later the
/// frozen [`Validator`](super::Validator)); [`RuleView`](super::RuleView)s
/// only borrow it. Any number of views at different declared types may
/// address the same descriptor in turn, because the installed transform, not
/// the view's static type, decides what the validators receive.
pub struct RuleDescriptor<R> {
    pub(crate) source: SourceExpression<R>,
    pub(crate) display_name: Option<String>,
    pub(crate) transform: Option<Transform>,
    pub(crate) components: Vec<RuleComponent<R>>,
    pub(crate) cascade: CascadeMode,
    /// Index of the first component chained after a `present_value` unwrap.
    /// Every component from there on must carry a presence condition.
    pub(crate) gate_from: Option<usize>,
}

impl<R: 'static> RuleDescriptor<R> {
    pub(crate) fn new(source: SourceExpression<R>, cascade: CascadeMode) -> Self {
        Self {
            source,
            display_name: None,
            transform: None,
            components: Vec::new(),
            cascade,
            gate_from: None,
        }
    }

    /// Read the property through the source expression, then the transform.
    pub(crate) fn read_transformed(&self, root: &R) -> ErasedValue {
        let raw = self.source.evaluate(root);
        match &self.transform {
            Some(transform) => transform(raw),
            None => raw,
        }
    }
}

impl<R> RuleDescriptor<R> {
    /// Whether `component` is handed the untransformed property value.
    ///
    /// The transform feeds the validators attached through a re-typed view.
    /// Validators attached at the source expression's own declared type,
    /// e.g. `must_be_present` chained before an unwrap, keep reading the
    /// raw value.
    pub(crate) fn feeds_raw(&self, component: &RuleComponent<R>) -> bool {
        self.transform.is_none() || component.validator.input_type() == self.source.declared_type()
    }

    /// Replace the transform slot. A descriptor carries at most one transform.
    pub(crate) fn install_transform(&mut self, transform: Transform) {
        self.transform = Some(transform);
    }

    pub(crate) fn push(&mut self, component: RuleComponent<R>) {
        self.components.push(component);
    }

    pub(crate) fn attach_condition(&mut self, condition: Condition<R>, scope: ConditionScope) {
        self.attach_scoped(condition, scope, false);
    }

    /// Attach a condition that tests for presence of an optional value.
    pub(crate) fn attach_presence_gate(&mut self, condition: Condition<R>, scope: ConditionScope) {
        self.attach_scoped(condition, scope, true);
    }

    /// Presence-gate every component at index `start` or later.
    pub(crate) fn attach_presence_gate_from(&mut self, start: usize, condition: Condition<R>) {
        self.attach_from(start, condition, true);
    }

    fn attach_scoped(&mut self, condition: Condition<R>, scope: ConditionScope, presence: bool) {
        let start = match scope {
            ConditionScope::CurrentValidator => self.components.len().saturating_sub(1),
            ConditionScope::AllValidators => 0,
        };
        self.attach_from(start, condition, presence);
    }

    fn attach_from(&mut self, start: usize, condition: Condition<R>, presence: bool) {
        for component in self.components.iter_mut().skip(start) {
            component.conditions.push(condition.clone());
            component.presence_gated |= presence;
        }
    }

    #[must_use]
    pub fn source(&self) -> &SourceExpression<R> {
        &self.source
    }

    /// The name used in failure messages: the `with_name` override, or the
    /// property name the rule was declared with.
    #[must_use]
    pub fn property_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.source.property())
    }

    #[must_use]
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    #[must_use]
    pub fn validator_count(&self) -> usize {
        self.components.len()
    }

    /// Names of the chained validators, in order.
    #[must_use]
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.validator.name()).collect()
    }

    #[must_use]
    pub fn cascade_mode(&self) -> CascadeMode {
        self.cascade
    }

    /// Whether the rule was unwrapped with `present_value` and some validator
    /// chained since the unwrap carries no presence gate.
    #[must_use]
    pub fn is_awaiting_gate(&self) -> bool {
        self.gate_from.is_some_and(|start| {
            self.components
                .iter()
                .skip(start)
                .any(|component| !component.presence_gated)
        })
    }
}

impl<R> fmt::Debug for RuleDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("source", &self.source)
            .field("display_name", &self.display_name)
            .field("transform", &self.transform.is_some())
            .field("validators", &self.validator_names())
            .field("cascade", &self.cascade)
            .field("awaiting_gate", &self.is_awaiting_gate())
            .finish()
    }
}
