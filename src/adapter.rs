//! The error adapter: run a target and hand matched failures back as values.
//!
//! A target is any `Fn(A, B, ..) -> Result<T, E>` (or a type implementing
//! [`Target`] by hand). Arguments travel as a tuple and are forwarded in order.
//! The adapter never looks at panics; they unwind through it untouched.
use crate::errors::Matcher;
use std::{fmt, future::Future, ops::Deref};
/// What a successful [`ErrorAdapter::call`] produced.
///
/// `Captured` only ever holds an error that the target failed with and the
/// matcher accepted. A target that *returns* an error-shaped value yields
/// `Returned`, so the two cases never blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E> {
    Returned(T),
    Captured(E),
}
impl<T, E> Outcome<T, E> {
    pub fn is_returned(&self) -> bool {
        matches!(self, Outcome::Returned(_))
    }
    pub fn is_captured(&self) -> bool {
        matches!(self, Outcome::Captured(_))
    }
    pub fn returned(self) -> Option<T> {
        match self {
            Outcome::Returned(value) => Some(value),
            Outcome::Captured(_) => None,
        }
    }
    pub fn captured(self) -> Option<E> {
        match self {
            Outcome::Returned(_) => None,
            Outcome::Captured(error) => Some(error),
        }
    }
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Returned(value) => Outcome::Returned(value),
            Outcome::Captured(error) => Outcome::Captured(error),
        }
    }
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Outcome::Returned(value) => Outcome::Returned(f(value)),
            Outcome::Captured(error) => Outcome::Captured(error),
        }
    }
    /// Turns a captured error back into an `Err`, for callers that want to
    /// re-raise after inspecting it.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Returned(value) => Ok(value),
            Outcome::Captured(error) => Err(error),
        }
    }
}
impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Collapses the nesting produced by an adapter wrapping an adapter.
    pub fn flatten(self) -> Outcome<T, E> {
        match self {
            Outcome::Returned(inner) => inner,
            Outcome::Captured(error) => Outcome::Captured(error),
        }
    }
}
/// A synchronous callable taking its arguments as the tuple `Args`.
pub trait Target<Args> {
    type Output;
    type Error;
    fn invoke(&self, args: Args) -> Result<Self::Output, Self::Error>;
}
/// An asynchronous callable taking its arguments as the tuple `Args`.
pub trait AsyncTarget<Args> {
    type Output;
    type Error;
    type Future: Future<Output = Result<Self::Output, Self::Error>>;
    fn invoke_async(&self, args: Args) -> Self::Future;
}
macro_rules! impl_targets {
    ($($arg:ident),*) => {
        impl<Func, R, E, $($arg,)*> Target<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Result<R, E>,
        {
            type Output = R;
            type Error = E;
            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Result<R, E> {
                (self)($($arg),*)
            }
        }
        impl<Func, Fut, R, E, $($arg,)*> AsyncTarget<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Fut,
            Fut: Future<Output = Result<R, E>>,
        {
            type Output = R;
            type Error = E;
            type Future = Fut;
            #[allow(non_snake_case)]
            fn invoke_async(&self, ($($arg,)*): ($($arg,)*)) -> Fut {
                (self)($($arg),*)
            }
        }
    };
}
impl_targets!();
impl_targets!(A1);
impl_targets!(A1, A2);
impl_targets!(A1, A2, A3);
impl_targets!(A1, A2, A3, A4);
impl_targets!(A1, A2, A3, A4, A5);
impl_targets!(A1, A2, A3, A4, A5, A6);
/// Wraps `target` so that failures accepted by `categories` are returned as
/// [`Outcome::Captured`] instead of propagating.
///
/// The adapter is immutable after construction and holds no state between
/// calls, so a shared reference can be called from any number of threads at
/// once. `Display`, `Debug`, `Deref` and `AsRef` all forward to the target, so
/// diagnostics and member access see the wrapped callable.
#[derive(Clone, Copy)]
pub struct ErrorAdapter<F, M> {
    target: F,
    categories: M,
}
/// Shorthand for [`ErrorAdapter::new`].
pub fn wrap_errors<F, M>(categories: M, target: F) -> ErrorAdapter<F, M> {
    ErrorAdapter::new(categories, target)
}
impl<F, M> ErrorAdapter<F, M> {
    pub fn new(categories: M, target: F) -> Self {
        Self { target, categories }
    }
    pub fn target(&self) -> &F {
        &self.target
    }
    pub fn categories(&self) -> &M {
        &self.categories
    }
    pub fn into_target(self) -> F {
        self.target
    }
    pub fn into_parts(self) -> (M, F) {
        (self.categories, self.target)
    }
    /// Invokes the target with `args`.
    ///
    /// - `Ok(Returned(v))` when the target returned `Ok(v)`.
    /// - `Ok(Captured(e))` when it returned `Err(e)` and `e` matches.
    /// - `Err(e)` otherwise, with `e` exactly as the target produced it.
    pub fn call<Args>(
        &self,
        args: Args,
    ) -> Result<Outcome<F::Output, F::Error>, F::Error>
    where
        F: Target<Args>,
        M: Matcher<F::Error>,
    {
        self.sort(Target::invoke(&self.target, args))
    }
    /// Async counterpart of [`call`](Self::call). Dropping the returned future
    /// cancels the target as usual; cancellation never becomes a value.
    pub async fn call_async<Args>(
        &self,
        args: Args,
    ) -> Result<Outcome<F::Output, F::Error>, F::Error>
    where
        F: AsyncTarget<Args>,
        M: Matcher<F::Error>,
    {
        let result = AsyncTarget::invoke_async(&self.target, args).await;
        self.sort(result)
    }
    fn sort<T, E>(&self, result: Result<T, E>) -> Result<Outcome<T, E>, E>
    where
        M: Matcher<E>,
    {
        match result {
            Ok(value) => Ok(Outcome::Returned(value)),
            Err(error) if self.categories.matches(&error) => Ok(Outcome::Captured(error)),
            Err(error) => Err(error),
        }
    }
}
impl<F, M, Args> Target<Args> for ErrorAdapter<F, M>
where
    F: Target<Args>,
    M: Matcher<F::Error>,
{
    type Output = Outcome<F::Output, F::Error>;
    type Error = F::Error;
    fn invoke(&self, args: Args) -> Result<Self::Output, Self::Error> {
        self.call(args)
    }
}
impl<F: fmt::Display, M> fmt::Display for ErrorAdapter<F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.target, f)
    }
}
impl<F: fmt::Debug, M> fmt::Debug for ErrorAdapter<F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.target, f)
    }
}
impl<F, M> Deref for ErrorAdapter<F, M> {
    type Target = F;
    fn deref(&self) -> &F {
        &self.target
    }
}
impl<F, M> AsRef<F> for ErrorAdapter<F, M> {
    fn as_ref(&self) -> &F {
        &self.target
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Categories, Category, Categorized, Nothing, When};
    use std::sync::{atomic::{AtomicUsize, Ordering}, Arc};
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum CalcKind {
        DivideByZero,
        Type,
    }
    impl Category for CalcKind {}
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum CalcError {
        DivideByZero { numerator: i64 },
        Type(String),
    }
    impl Categorized for CalcError {
        type Category = CalcKind;
        fn category(&self) -> CalcKind {
            match self {
                CalcError::DivideByZero { .. } => CalcKind::DivideByZero,
                CalcError::Type(_) => CalcKind::Type,
            }
        }
    }
    fn divide(a: &str, b: &str) -> Result<i64, CalcError> {
        let a: i64 = a.parse().map_err(|_| CalcError::Type(a.to_string()))?;
        let b: i64 = b.parse().map_err(|_| CalcError::Type(b.to_string()))?;
        a.checked_div(b).ok_or(CalcError::DivideByZero { numerator: a })
    }
    fn zero_only() -> Categories<CalcKind> {
        Categories::single(CalcKind::DivideByZero).unwrap()
    }
    #[test]
    fn test_divide_scenario() {
        let adapter = ErrorAdapter::new(zero_only(), divide);
        assert_eq!(adapter.call(("10", "2")), Ok(Outcome::Returned(5)));
        assert_eq!(
            adapter.call(("10", "0")),
            Ok(Outcome::Captured(CalcError::DivideByZero { numerator: 10 }))
        );
        assert_eq!(adapter.call(("10", "x")), Err(CalcError::Type("x".to_string())));
    }
    #[test]
    fn test_empty_set_is_a_no_op() {
        let adapter = ErrorAdapter::new(Categories::<CalcKind>::none(), divide);
        assert_eq!(adapter.call(("9", "3")).map(Outcome::into_result), Ok(divide("9", "3")));
        assert_eq!(adapter.call(("9", "0")), Err(CalcError::DivideByZero { numerator: 9 }));
        let adapter = ErrorAdapter::new(Nothing, |x: u8| Err::<u8, _>(x));
        assert_eq!(adapter.call((7,)), Err(7));
    }
    #[test]
    fn test_returned_error_value_is_not_captured() {
        let adapter = ErrorAdapter::new(
            zero_only(),
            || Ok::<_, CalcError>(CalcError::DivideByZero { numerator: 1 }),
        );
        let outcome = adapter.call(()).unwrap();
        assert!(outcome.is_returned());
        assert!(!outcome.is_captured());
    }
    #[test]
    fn test_arguments_forwarded_in_order() {
        let adapter = ErrorAdapter::new(
            Nothing,
            |a: u8, b: &str, c: Vec<u8>, d: char, e: bool, f: i32| {
                Ok::<_, ()>(format!("{a}{b}{}{d}{e}{f}", c.len()))
            },
        );
        let outcome = adapter.call((1, "x", vec![0, 0], 'z', true, -3)).unwrap();
        assert_eq!(outcome.returned().as_deref(), Some("1x2ztrue-3"));
    }
    #[derive(Debug)]
    struct Divider {
        marker: &'static str,
    }
    impl Divider {
        fn precision(&self) -> u32 {
            0
        }
    }
    impl fmt::Display for Divider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "<divider {}>", self.marker)
        }
    }
    impl Target<(i64, i64)> for Divider {
        type Output = i64;
        type Error = CalcError;
        fn invoke(&self, (a, b): (i64, i64)) -> Result<i64, CalcError> {
            a.checked_div(b).ok_or(CalcError::DivideByZero { numerator: a })
        }
    }
    #[test]
    fn test_identity_forwarding() {
        let divider = Divider { marker: "int" };
        let expected_display = divider.to_string();
        let expected_debug = format!("{:?}", divider);
        let adapter = ErrorAdapter::new(zero_only(), divider);
        assert_eq!(adapter.to_string(), expected_display);
        assert_eq!(format!("{:?}", adapter), expected_debug);
        assert_eq!(adapter.marker, "int");
        assert_eq!(adapter.precision(), 0);
        assert_eq!(adapter.target().marker, adapter.as_ref().marker);
        assert_eq!(adapter.categories(), & zero_only());
        assert_eq!(adapter.call((8_i64, 4_i64)), Ok(Outcome::Returned(2)));
        assert!(adapter.call((8_i64, 0_i64)).unwrap().is_captured());
        let (_, divider) = adapter.into_parts();
        assert_eq!(divider.marker, "int");
    }
    #[test]
    fn test_wrapping_an_adapter_is_idempotent() {
        let calls = AtomicUsize::new(0);
        let counted = |a: &str, b: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            divide(a, b)
        };
        let twice = wrap_errors(zero_only(), wrap_errors(zero_only(), counted));
        let first = twice.call(("10", "0"));
        let second = twice.call(("10", "0"));
        assert_eq!(first, second);
        assert_eq!(
            first.unwrap().flatten(),
            Outcome::Captured(CalcError::DivideByZero { numerator: 10 })
        );
        assert_eq!(twice.call(("6", "3")).unwrap().flatten(), Outcome::Returned(2));
        assert_eq!(twice.call(("6", "y")), Err(CalcError::Type("y".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
    #[test]
    fn test_concurrent_calls() {
        let adapter = Arc::new(ErrorAdapter::new(When(|e: &u32| *e == 0), |n: u32| {
            if n % 3 == 0 { Err(n % 2) } else { Ok(n * 2) }
        }));
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..12u32)
                .map(|n| {
                    let adapter = Arc::clone(&adapter);
                    s.spawn(move || adapter.call((n,)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results[1], Ok(Outcome::Returned(2)));
        assert_eq!(results[6], Ok(Outcome::Captured(0)));
        assert_eq!(results[3], Err(1));
    }
    #[tokio::test]
    async fn test_call_async() {
        let adapter = ErrorAdapter::new(zero_only(), |a: i64, b: i64| async move {
            tokio::task::yield_now().await;
            a.checked_div(b).ok_or(CalcError::DivideByZero { numerator: a })
        });
        assert_eq!(adapter.call_async((9, 3)).await, Ok(Outcome::Returned(3)));
        assert!(adapter.call_async((9, 0)).await.unwrap().is_captured());
        let strict = ErrorAdapter::new(Nothing, |s: String| async move {
            s.parse::<i64>().map_err(|_| CalcError::Type(s))
        });
        assert_eq!(strict.call_async(("q".to_string(),)).await, Err(CalcError::Type("q".into())));
    }
    #[test]
    #[should_panic(expected = "boom")]
    fn test_panics_are_not_captured() {
        let adapter = ErrorAdapter::new(
            When(|_: &CalcError| true),
            || -> Result<(), CalcError> { panic!("boom") },
        );
        let _ = adapter.call(());
    }
    #[test]
    fn test_outcome_helpers() {
        let returned: Outcome<u8, &str> = Outcome::Returned(1);
        let captured: Outcome<u8, &str> = Outcome::Captured("e");
        assert_eq!(returned.map(|v| v + 1), Outcome::Returned(2));
        assert_eq!(captured.as_ref().captured(), Some(&"e"));
        assert_eq!(captured.into_result(), Err("e"));
        assert_eq!(returned.returned(), Some(1));
    }
}
