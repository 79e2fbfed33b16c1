//! The outcome of an operation: a [`Success`] or an [`Error`], never both.
//!
//! [`Outcome<T>`] carries a value on success; `Outcome<()>` (the default) is
//! the value-less form used by operations that only report whether they
//! worked. Combinators consume the outcome and build a new one. Once an
//! outcome is a failure, no combinator other than the failure handlers
//! (`on_failure`, `map_error`, the failure arm of `match_*`,
//! `value_or_else`) invokes caller code, and the error travels to the end of
//! the chain unchanged.
//!
//! ```rust
//! use verdict::Outcome;
//! use verdict::definitions::{resource, validation};
//!
//! fn find_user(id: u32) -> Outcome<String> {
//!     if id == 7 {
//!         Outcome::ok_with("ada".to_owned())
//!     } else {
//!         resource::not_found().into()
//!     }
//! }
//!
//! let greeting = find_user(7)
//!     .ensure(|name| !name.is_empty(), validation::required())
//!     .map(|name| format!("hello {name}"));
//! assert_eq!(greeting.value(), "hello ada");
//!
//! let missing = find_user(1).map(|name| name.len());
//! assert_eq!(missing.error().code(), 5001);
//! ```
//!
//! # Choosing a mapper
//!
//! `map` takes a mapper returning a plain value and keeps the original status
//! (variant, code and message). When the mapper needs to choose the status
//! itself, use `map_success` (mapper returns a [`Success`]) or `bind` (mapper
//! returns an [`Outcome`], and may fail).

use crate::models::{Error, Success, SuccessKind};
use std::fmt;

// ============================================================================
// Invalid Access
// ============================================================================

/// Reading the wrong branch of an [`Outcome`].
///
/// This is a programming error: the panicking accessors raise it as a panic
/// message and it is never turned into a failed outcome. Use the `try_*`
/// accessors or [`Outcome::match_with`] when the branch is not known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOutcomeAccess {
    /// `error` requested on a success.
    #[error("invalid outcome access: no error on a successful outcome")]
    ErrorOnSuccess,
    /// `value` requested on a failure.
    #[error("invalid outcome access: no value on a failed outcome (E-{code})")]
    ValueOnFailure {
        /// Code of the error the outcome holds.
        code: u32,
    },
    /// `success_details` requested on a failure.
    #[error("invalid outcome access: no success details on a failed outcome (E-{code})")]
    SuccessOnFailure {
        /// Code of the error the outcome holds.
        code: u32,
    },
}

#[cold]
#[inline(never)]
#[track_caller]
fn invalid_access(access: InvalidOutcomeAccess) -> ! {
    tracing::error!(%access, "outcome accessed on the wrong branch");
    panic!("{}", access)
}

// ============================================================================
// Outcome
// ============================================================================

/// A [`Success`] carrying `T`, or an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "this outcome may be a failure, which should be handled"]
pub enum Outcome<T = ()> {
    /// The operation succeeded.
    Success(Success<T>),
    /// The operation failed.
    Failure(Error),
}

impl Outcome<()> {
    /// Value-less `Ok` success.
    #[inline]
    pub fn ok() -> Self {
        Self::Success(Success::ok())
    }

    /// Value-less `Created` success.
    #[inline]
    pub fn created() -> Self {
        Self::Success(Success::created())
    }

    /// Value-less `Accepted` success.
    #[inline]
    pub fn accepted() -> Self {
        Self::Success(Success::accepted())
    }

    /// Value-less `NoContent` success.
    #[inline]
    pub fn no_content() -> Self {
        Self::Success(Success::no_content())
    }
}

impl<T> Outcome<T> {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Wrap a success.
    #[inline]
    pub fn success(success: Success<T>) -> Self {
        Self::Success(success)
    }

    /// Wrap a failure.
    #[inline]
    pub fn failure(error: Error) -> Self {
        Self::Failure(error)
    }

    /// `Ok` success carrying `value`.
    #[inline]
    pub fn ok_with(value: T) -> Self {
        Self::Success(Success::ok_with(value))
    }

    /// `Created` success carrying `value`.
    #[inline]
    pub fn created_with(value: T) -> Self {
        Self::Success(Success::created_with(value))
    }

    /// `Accepted` success carrying `value`.
    #[inline]
    pub fn accepted_with(value: T) -> Self {
        Self::Success(Success::accepted_with(value))
    }

    /// `NoContent` success carrying `value`.
    #[inline]
    pub fn no_content_with(value: T) -> Self {
        Self::Success(Success::no_content_with(value))
    }

    /// Raw value conversion: an `Ok` success carrying `value`.
    #[inline]
    pub fn from_value(value: T) -> Self {
        Self::ok_with(value)
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// True for the success branch.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True for the failure branch.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The error.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidOutcomeAccess::ErrorOnSuccess`] on a success.
    #[inline]
    #[track_caller]
    pub fn error(&self) -> &Error {
        match self {
            Self::Failure(error) => error,
            Self::Success(_) => invalid_access(InvalidOutcomeAccess::ErrorOnSuccess),
        }
    }

    /// The success value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidOutcomeAccess::ValueOnFailure`] on a failure.
    #[inline]
    #[track_caller]
    pub fn value(&self) -> &T {
        match self {
            Self::Success(success) => success.value(),
            Self::Failure(error) => invalid_access(InvalidOutcomeAccess::ValueOnFailure {
                code: error.code(),
            }),
        }
    }

    /// The success payload (variant, code, message and value).
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidOutcomeAccess::SuccessOnFailure`] on a failure.
    #[inline]
    #[track_caller]
    pub fn success_details(&self) -> &Success<T> {
        match self {
            Self::Success(success) => success,
            Self::Failure(error) => invalid_access(InvalidOutcomeAccess::SuccessOnFailure {
                code: error.code(),
            }),
        }
    }

    /// Consume and return the error. Panics on a success.
    #[inline]
    #[track_caller]
    pub fn into_error(self) -> Error {
        match self {
            Self::Failure(error) => error,
            Self::Success(_) => invalid_access(InvalidOutcomeAccess::ErrorOnSuccess),
        }
    }

    /// Consume and return the value. Panics on a failure.
    #[inline]
    #[track_caller]
    pub fn into_value(self) -> T {
        match self {
            Self::Success(success) => success.into_value(),
            Self::Failure(error) => invalid_access(InvalidOutcomeAccess::ValueOnFailure {
                code: error.code(),
            }),
        }
    }

    /// Consume and return the success payload. Panics on a failure.
    #[inline]
    #[track_caller]
    pub fn into_success(self) -> Success<T> {
        match self {
            Self::Success(success) => success,
            Self::Failure(error) => invalid_access(InvalidOutcomeAccess::SuccessOnFailure {
                code: error.code(),
            }),
        }
    }

    /// The error, or `None` on success.
    #[inline]
    pub fn try_error(&self) -> Option<&Error> {
        match self {
            Self::Failure(error) => Some(error),
            Self::Success(_) => None,
        }
    }

    /// The value, or `None` on failure.
    #[inline]
    pub fn try_value(&self) -> Option<&T> {
        match self {
            Self::Success(success) => Some(success.value()),
            Self::Failure(_) => None,
        }
    }

    /// The full success, or `None` on failure.
    #[inline]
    pub fn try_success_details(&self) -> Option<&Success<T>> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Success variant, if successful.
    #[inline]
    pub fn success_kind(&self) -> Option<SuccessKind> {
        self.try_success_details().map(Success::kind)
    }

    // ------------------------------------------------------------------------
    // Promotion
    // ------------------------------------------------------------------------

    /// Attach `value`, keeping the success status or the error.
    ///
    /// ```rust
    /// use verdict::Outcome;
    ///
    /// let saved = Outcome::created().with_value(17);
    /// assert_eq!(saved.success_details().code(), 101);
    /// assert_eq!(*saved.value(), 17);
    /// ```
    #[inline]
    pub fn with_value<U>(self, value: U) -> Outcome<U> {
        match self {
            Self::Success(success) => Outcome::Success(success.with_value(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Detach the value, keeping the success status or the error.
    #[inline]
    pub fn without_value(self) -> Outcome<()> {
        self.with_value(())
    }

    /// Convert into a std `Result`, dropping the success status.
    #[inline]
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Success(success) => Ok(success.into_value()),
            Self::Failure(error) => Err(error),
        }
    }

    /// Convert into a std `Result`, keeping the success status.
    #[inline]
    pub fn into_success_result(self) -> Result<Success<T>, Error> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Failure(error) => Err(error),
        }
    }

    // ------------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------------

    /// Transform the value, keeping the success status.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(success) => Outcome::Success(success.map_value(f)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the value into a new [`Success`], replacing the status.
    ///
    /// ```rust
    /// use verdict::{Outcome, Success, SuccessKind};
    ///
    /// let created = Outcome::ok_with("draft").map_success(|name| Success::created_with(name.len()));
    /// assert_eq!(created.success_kind(), Some(SuccessKind::Created));
    /// ```
    #[inline]
    pub fn map_success<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Success<U>,
    {
        match self {
            Self::Success(success) => Outcome::Success(f(success.into_value())),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain an operation that may itself fail; its outcome becomes the result.
    #[inline]
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(success) => f(success.into_value()),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Fail with `error` unless `predicate` holds for the value.
    #[inline]
    pub fn ensure<P>(self, predicate: P, error: Error) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure_with(predicate, |_| error)
    }

    /// Like [`Outcome::ensure`] but builds the error from the rejected value.
    #[inline]
    pub fn ensure_with<P, E>(self, predicate: P, make_error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> Error,
    {
        match self {
            Self::Success(success) => {
                if predicate(success.value()) {
                    Self::Success(success)
                } else {
                    Self::Failure(make_error(success.value()))
                }
            }
            failure @ Self::Failure(_) => failure,
        }
    }

    /// Fold both branches into one value, seeing the full success payload.
    #[inline]
    pub fn match_with<R, S, E>(self, on_success: S, on_failure: E) -> R
    where
        S: FnOnce(Success<T>) -> R,
        E: FnOnce(Error) -> R,
    {
        match self {
            Self::Success(success) => on_success(success),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Fold both branches into one value, seeing only the success value.
    #[inline]
    pub fn match_value<R, S, E>(self, on_value: S, on_failure: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce(Error) -> R,
    {
        match self {
            Self::Success(success) => on_value(success.into_value()),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Run a side effect on the value; the outcome is returned unchanged.
    #[inline]
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Success(success) = &self {
            f(success.value());
        }
        self
    }

    /// Run a side effect on the error; the outcome is returned unchanged.
    #[inline]
    pub fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&Error),
    {
        if let Self::Failure(error) = &self {
            f(error);
        }
        self
    }

    /// Replace the error with `f(error)`. Successes pass through.
    #[inline]
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self {
            Self::Failure(error) => Self::Failure(f(error)),
            success @ Self::Success(_) => success,
        }
    }

    /// The value, or `default` on failure.
    #[inline]
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Success(success) => success.into_value(),
            Self::Failure(_) => default,
        }
    }

    /// The value, or `f(error)` on failure.
    #[inline]
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(Error) -> T,
    {
        match self {
            Self::Success(success) => success.into_value(),
            Self::Failure(error) => f(error),
        }
    }

    /// The value, or `T::default()` on failure.
    #[inline]
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(|_| T::default())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<T> From<Error> for Outcome<T> {
    #[inline]
    fn from(error: Error) -> Self {
        Self::Failure(error)
    }
}

impl<T> From<Success<T>> for Outcome<T> {
    #[inline]
    fn from(success: Success<T>) -> Self {
        Self::Success(success)
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    #[inline]
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::ok_with(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Collect outcomes into one, stopping at the first failure.
///
/// ```rust
/// use verdict::Outcome;
/// use verdict::definitions::validation;
///
/// let all: Outcome<Vec<i32>> = (1..=3).map(Outcome::ok_with).collect();
/// assert_eq!(all.value(), &[1, 2, 3]);
///
/// let some: Outcome<Vec<i32>> = vec![Outcome::ok_with(1), validation::required().into()]
///     .into_iter()
///     .collect();
/// assert!(some.is_failure());
/// ```
impl<T> FromIterator<Outcome<T>> for Outcome<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        for outcome in iter {
            match outcome {
                Outcome::Success(success) => values.push(success.into_value()),
                Outcome::Failure(error) => return Outcome::Failure(error),
            }
        }
        Outcome::ok_with(values)
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(success) => write!(f, "success: {}", success),
            Self::Failure(error) => write!(f, "failure: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{application, resource, validation};
    use std::cell::Cell;

    #[test]
    fn success_result_keeps_status() {
        let success = match Outcome::created_with("id-7").into_success_result() {
            Ok(success) => success,
            Err(error) => panic!("unexpected failure: {error}"),
        };
        assert_eq!(success.kind(), SuccessKind::Created);
        assert_eq!(success.code(), 101);
        assert_eq!(*success.value(), "id-7");

        let failed: Outcome<&str> = resource::not_found().into();
        assert_eq!(failed.into_success_result().map_err(|e| e.code()).err(), Some(5001));
    }

    #[test]
    fn exactly_one_branch_is_populated() {
        let ok: Outcome<i32> = Outcome::ok_with(1);
        let failed: Outcome<i32> = resource::not_found().into();

        assert!(ok.is_success() && !ok.is_failure());
        assert!(failed.is_failure() && !failed.is_success());
        assert!(ok.try_error().is_none() && ok.try_value().is_some());
        assert!(failed.try_error().is_some() && failed.try_success_details().is_none());
    }

    #[test]
    #[should_panic(expected = "no error on a successful outcome")]
    fn error_on_success_panics() {
        let _ = Outcome::ok().error();
    }

    #[test]
    #[should_panic(expected = "no value on a failed outcome (E-5001)")]
    fn value_on_failure_panics() {
        let outcome: Outcome<i32> = resource::not_found().into();
        let _ = outcome.value();
    }

    #[test]
    #[should_panic(expected = "no success details on a failed outcome")]
    fn success_details_on_failure_panics() {
        let outcome: Outcome = application::internal().into();
        let _ = outcome.success_details();
    }

    #[test]
    fn convenience_constructors_use_variant_codes() {
        assert_eq!(Outcome::ok().success_details().code(), 100);
        assert_eq!(Outcome::created().success_details().code(), 101);
        assert_eq!(Outcome::accepted().success_details().code(), 102);
        assert_eq!(Outcome::no_content().success_details().code(), 103);
        assert_eq!(Outcome::created_with(1).success_kind(), Some(SuccessKind::Created));
        assert_eq!(Outcome::from_value("x").success_kind(), Some(SuccessKind::Ok));
    }

    #[test]
    fn with_value_promotes_success_and_keeps_failure() {
        let promoted = Outcome::success(Success::accepted().with_message("queued")).with_value(9);
        assert_eq!(promoted.success_details().kind(), SuccessKind::Accepted);
        assert_eq!(promoted.success_details().message().as_deref(), Some("queued"));
        assert_eq!(*promoted.value(), 9);

        let err = resource::conflict();
        let failed: Outcome = err.clone().into();
        assert_eq!(failed.with_value(9).into_error(), err);
    }

    #[test]
    fn without_value_round_trips_status() {
        let outcome = Outcome::created_with("doc").without_value();
        assert_eq!(outcome, Outcome::created());
    }

    #[test]
    fn map_keeps_status() {
        let outcome = Outcome::success(Success::created_with(10).with_message("made"))
            .map(|x| x.to_string());
        let success = outcome.success_details();
        assert_eq!(success.value(), "10");
        assert_eq!(success.kind(), SuccessKind::Created);
        assert_eq!(success.message().as_deref(), Some("made"));
    }

    #[test]
    fn map_success_replaces_status() {
        let outcome = Outcome::ok_with(2).map_success(|x| Success::accepted_with(x * 3));
        assert_eq!(outcome.success_kind(), Some(SuccessKind::Accepted));
        assert_eq!(outcome.into_value(), 6);
    }

    #[test]
    fn bind_adopts_inner_failure() {
        let outcome = Outcome::ok_with(10).bind(|_| -> Outcome<String> { resource::not_found().into() });
        assert_eq!(outcome.error().code(), 5001);

        let chained = Outcome::ok_with(10).bind(|x| Outcome::created_with(x + 1));
        assert_eq!(chained.success_kind(), Some(SuccessKind::Created));
        assert_eq!(chained.into_value(), 11);
    }

    #[test]
    fn ensure_boundary() {
        let err_a = validation::out_of_range().with_message("too small");

        let rejected = Outcome::ok_with(5).ensure(|x| *x > 10, err_a.clone());
        assert_eq!(rejected.error(), &err_a);

        let kept = Outcome::ok_with(5).ensure(|x| *x > 0, err_a);
        assert_eq!(kept, Outcome::ok_with(5));
    }

    #[test]
    fn ensure_with_sees_rejected_value() {
        let outcome = Outcome::ok_with(-3).ensure_with(
            |x| *x >= 0,
            |x| validation::out_of_range().with_detail("x", format!("{x} is negative")),
        );
        assert_eq!(outcome.error().details()[0].message(), "-3 is negative");
    }

    #[test]
    fn failures_short_circuit() {
        let calls = Cell::new(0);
        let err = resource::not_found();
        let outcome: Outcome<i32> = err.clone().into();

        let result = outcome
            .map(|x| {
                calls.set(calls.get() + 1);
                x + 1
            })
            .bind(|x| {
                calls.set(calls.get() + 1);
                Outcome::ok_with(x)
            })
            .ensure(
                |_| {
                    calls.set(calls.get() + 1);
                    true
                },
                validation::invalid_input(),
            )
            .tap(|_| calls.set(calls.get() + 1))
            .map_success(|x| {
                calls.set(calls.get() + 1);
                Success::ok_with(x)
            });

        assert_eq!(calls.get(), 0);
        assert_eq!(result.into_error(), err);
    }

    #[test]
    fn tap_and_on_failure_do_not_alter_outcome() {
        let seen = Cell::new(0);
        let ok = Outcome::ok_with(4).tap(|x| seen.set(*x)).on_failure(|_| seen.set(-1));
        assert_eq!(seen.get(), 4);
        assert_eq!(ok, Outcome::ok_with(4));

        let failed: Outcome<i32> = resource::gone().into();
        let failed = failed.tap(|_| seen.set(99)).on_failure(|e| seen.set(e.code() as i32));
        assert_eq!(seen.get(), 5004);
        assert_eq!(failed.error().code(), 5004);
    }

    #[test]
    fn map_error_only_touches_failures() {
        let failed: Outcome<i32> = resource::not_found().into();
        let mapped = failed.map_error(|e| application::internal().with_message(e.message().into_owned()));
        assert_eq!(mapped.error().code(), 1001);
        assert_eq!(mapped.error().message(), resource::NOT_FOUND.default_message());

        let ok = Outcome::ok_with(1).map_error(|_| application::internal());
        assert_eq!(ok, Outcome::ok_with(1));
    }

    #[test]
    fn match_variants() {
        let ok = Outcome::created_with(3);
        let described = ok.match_with(|s| format!("{}:{}", s.code(), s.value()), |e| e.to_string());
        assert_eq!(described, "101:3");

        let failed: Outcome<i32> = resource::locked().into();
        let code = failed.match_value(|_| 0, |e| e.code());
        assert_eq!(code, 5005);
    }

    #[test]
    fn value_fallbacks() {
        let failed = || -> Outcome<i32> { resource::not_found().into() };
        assert_eq!(failed().value_or(7), 7);
        assert_eq!(failed().value_or_default(), 0);
        assert_eq!(failed().value_or_else(|e| e.suffix() as i32), 1);
        assert_eq!(Outcome::ok_with(3).value_or(7), 3);
    }

    #[test]
    fn std_result_conversions() {
        fn parse(input: &str) -> Outcome<i32> {
            input
                .parse::<i32>()
                .map_err(|e| validation::invalid_format().with_detail("input", e.to_string()))
                .into()
        }

        fn doubled(input: &str) -> Result<i32, Error> {
            let value = Result::from(parse(input))?;
            Ok(value * 2)
        }

        assert_eq!(doubled("21"), Ok(42));
        assert_eq!(doubled("x").map_err(|e| e.code()), Err(4003));
        assert_eq!(parse("5").success_kind(), Some(SuccessKind::Ok));
    }

    #[test]
    fn collect_stops_at_first_failure() {
        let pulled = Cell::new(0);
        let outcomes = (0..5).map(|i| {
            pulled.set(pulled.get() + 1);
            if i == 2 {
                Outcome::failure(validation::invalid_value())
            } else {
                Outcome::ok_with(i)
            }
        });

        let collected: Outcome<Vec<i32>> = outcomes.collect();
        assert_eq!(collected.error().code(), 4007);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(Outcome::ok().to_string(), "success: Ok (100)");
        let failed: Outcome = resource::not_found().with_message("nope").into();
        assert_eq!(failed.to_string(), "failure: nope (E-5001)");
    }
}
