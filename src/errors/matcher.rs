use super::types::{AdapterError, Categorized, Category};
use std::{any::TypeId, error::Error as StdError, fmt, sync::Arc};
type DynError = dyn StdError + Send + Sync + 'static;
/// Decides whether a failure of type `E` belongs to the matched set.
pub trait Matcher<E> {
    fn matches(&self, error: &E) -> bool;
}
impl<E, M: Matcher<E> + ?Sized> Matcher<E> for &M {
    fn matches(&self, error: &E) -> bool {
        (**self).matches(error)
    }
}
impl<E, M: Matcher<E> + ?Sized> Matcher<E> for Box<M> {
    fn matches(&self, error: &E) -> bool {
        (**self).matches(error)
    }
}
impl<E, M: Matcher<E> + ?Sized> Matcher<E> for Arc<M> {
    fn matches(&self, error: &E) -> bool {
        (**self).matches(error)
    }
}
/// Matches nothing: every failure propagates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nothing;
impl<E> Matcher<E> for Nothing {
    fn matches(&self, _error: &E) -> bool {
        false
    }
}
/// Matches with an arbitrary predicate.
#[derive(Clone, Copy)]
pub struct When<P>(pub P);
impl<E, P: Fn(&E) -> bool> Matcher<E> for When<P> {
    fn matches(&self, error: &E) -> bool {
        (self.0)(error)
    }
}
impl<P> fmt::Debug for When<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("When(..)")
    }
}
/// A disjunction of typed categories, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories<C: Category> {
    set: Vec<C>,
}
impl<C: Category> Categories<C> {
    /// The empty set. Legal, and disables interception.
    pub fn none() -> Self {
        Self { set: Vec::new() }
    }
    pub fn single(category: C) -> Result<Self, AdapterError> {
        Self::new([category])
    }
    pub fn new(categories: impl IntoIterator<Item = C>) -> Result<Self, AdapterError> {
        let mut set: Vec<C> = Vec::new();
        for category in categories {
            if category.is_cancellation() {
                return Err(AdapterError::cancellation(format!("{:?}", category)));
            }
            if !set.contains(&category) {
                set.push(category);
            }
        }
        Ok(Self { set })
    }
    pub fn contains(&self, category: &C) -> bool {
        self.set.contains(category)
    }
    pub fn len(&self) -> usize {
        self.set.len()
    }
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.set.iter()
    }
}
impl<C: Category> Default for Categories<C> {
    fn default() -> Self {
        Self::none()
    }
}
impl<E: Categorized> Matcher<E> for Categories<E::Category> {
    fn matches(&self, error: &E) -> bool {
        self.contains(&error.category())
    }
}
#[derive(Clone, Copy)]
struct TypeEntry {
    name: &'static str,
    id: TypeId,
    anyhow: fn(&anyhow::Error) -> bool,
    boxed: fn(&DynError) -> bool,
}
fn downcast_anyhow<T: StdError + Send + Sync + 'static>(error: &anyhow::Error) -> bool {
    error.is::<T>()
}
fn downcast_boxed<T: StdError + Send + Sync + 'static>(error: &DynError) -> bool {
    error.is::<T>()
}
/// A disjunction of concrete error types, for type-erased carriers such as
/// `anyhow::Error` and `Box<dyn Error + Send + Sync>`. Matching is by downcast
/// to the exact type; `anyhow` context layers are seen through.
#[derive(Clone, Default)]
pub struct ErrorTypes {
    entries: Vec<TypeEntry>,
}
impl ErrorTypes {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds `T` to the set. `tokio::task::JoinError` carries cancellation and is
    /// refused.
    pub fn with<T: StdError + Send + Sync + 'static>(mut self) -> Result<Self, AdapterError> {
        let id = TypeId::of::<T>();
        let name = std::any::type_name::<T>();
        if id == TypeId::of::<tokio::task::JoinError>() {
            return Err(AdapterError::cancellation(name));
        }
        if !self.entries.iter().any(|p| p.id == id) {
            self.entries
                .push(TypeEntry {
                    name,
                    id,
                    anyhow: downcast_anyhow::<T>,
                    boxed: downcast_boxed::<T>,
                });
        }
        Ok(self)
    }
    pub fn contains<T: 'static>(&self) -> bool {
        let id = TypeId::of::<T>();
        self.entries.iter().any(|p| p.id == id)
    }
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|p| p.name).collect()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl fmt::Debug for ErrorTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|p| p.name)).finish()
    }
}
impl Matcher<anyhow::Error> for ErrorTypes {
    fn matches(&self, error: &anyhow::Error) -> bool {
        self.entries.iter().any(|p| (p.anyhow)(error))
    }
}
impl Matcher<Box<DynError>> for ErrorTypes {
    fn matches(&self, error: &Box<DynError>) -> bool {
        self.entries.iter().any(|p| (p.boxed)(error.as_ref()))
    }
}
