use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A typed property accessor over a root type `R`.
pub type Accessor<R, X> = Arc<dyn Fn(&R) -> X + Send + Sync>;

/// A property value after its static type has been erased at the engine boundary.
pub type ErasedValue = Box<dyn Any>;

/// Function applied to the raw property value before any validator sees it.
pub type Transform = Arc<dyn Fn(ErasedValue) -> ErasedValue + Send + Sync>;

/// Runtime identity of a declared type, with a readable name for diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The property access a rule was declared with.
///
/// Holds the accessor twice: once type-erased, which is what the evaluation
/// pass reads through, and once at its declared type so that presence
/// conditions can later re-evaluate the very same accessor against any root
/// instance. Recovering the typed accessor is the type check: it only
/// succeeds for the exact type the property was declared with.
pub struct SourceExpression<R> {
    property: String,
    declared: TypeInfo,
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn Fn(&R) -> ErasedValue + Send + Sync>,
}

impl<R: 'static> SourceExpression<R> {
    pub(crate) fn new<X, F>(property: &str, accessor: F) -> Self
    where
        X: 'static,
        F: Fn(&R) -> X + Send + Sync + 'static,
    {
        let accessor: Accessor<R, X> = Arc::new(accessor);
        let reader = Arc::clone(&accessor);
        Self {
            property: property.to_owned(),
            declared: TypeInfo::of::<X>(),
            typed: Arc::new(accessor),
            erased: Arc::new(move |root: &R| Box::new(reader(root)) as ErasedValue),
        }
    }

    /// The typed accessor, if the property was declared as exactly `X`.
    #[must_use]
    pub fn accessor<X: 'static>(&self) -> Option<Accessor<R, X>> {
        self.typed.downcast_ref::<Accessor<R, X>>().cloned()
    }

    /// Read the property from `root` without any transform applied.
    #[must_use]
    pub fn evaluate(&self, root: &R) -> ErasedValue {
        (self.erased)(root)
    }
}

impl<R> SourceExpression<R> {
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The type the accessor returns, as declared.
    #[must_use]
    pub fn declared_type(&self) -> TypeInfo {
        self.declared
    }
}

impl<R> fmt::Debug for SourceExpression<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceExpression")
            .field("property", &self.property)
            .field("declared", &self.declared)
            .finish_non_exhaustive()
    }
}
