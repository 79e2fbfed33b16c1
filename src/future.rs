//! Asynchronous combinators.
//!
//! Two families cover the async cases:
//!
//! - `*_async` methods on [`Outcome`] take an async mapper
//!   (`AsyncFnOnce`), for a ready outcome feeding an async step.
//! - [`OutcomeFuture`] is implemented for every `Future<Output = Outcome<T>>`
//!   and offers the same combinators, with sync mappers under the plain name
//!   and async mappers under the `_async` name.
//!
//! Every combinator awaits its input exactly once and then follows the same
//! rules as the synchronous version: on a failure the mapper is never
//! invoked or awaited. Panics raised by a mapper propagate to the awaiting
//! task, and dropping the returned future cancels the chain at the pending
//! await without running later mappers.
//!
//! ```rust
//! use verdict::{Outcome, OutcomeFuture};
//! use verdict::definitions::resource;
//!
//! async fn load(id: u32) -> Outcome<String> {
//!     if id == 1 {
//!         Outcome::ok_with("alpha".to_owned())
//!     } else {
//!         resource::not_found().into()
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let len = load(1)
//!     .map(|name| name.len())
//!     .bind_async(async |len| Outcome::created_with(len * 2))
//!     .await;
//! assert_eq!(*len.value(), 10);
//!
//! let missing = load(2).map_async(async |name| name.len()).await;
//! assert!(missing.is_failure());
//! # }
//! ```

use crate::models::{Error, Success};
use crate::outcome::Outcome;
use std::future::Future;

// ============================================================================
// Async mappers on a ready outcome
// ============================================================================

impl<T> Outcome<T> {
    /// Async [`Outcome::map`].
    pub async fn map_async<U, F>(self, f: F) -> Outcome<U>
    where
        F: AsyncFnOnce(T) -> U,
    {
        match self {
            Self::Success(success) => {
                let (shell, value) = success.into_parts();
                Outcome::Success(shell.with_value(f(value).await))
            }
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Async [`Outcome::map_success`].
    pub async fn map_success_async<U, F>(self, f: F) -> Outcome<U>
    where
        F: AsyncFnOnce(T) -> Success<U>,
    {
        match self {
            Self::Success(success) => Outcome::Success(f(success.into_value()).await),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Async [`Outcome::bind`].
    pub async fn bind_async<U, F>(self, f: F) -> Outcome<U>
    where
        F: AsyncFnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(success) => f(success.into_value()).await,
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Async [`Outcome::ensure`]; the predicate is awaited only on success.
    pub async fn ensure_async<P>(self, predicate: P, error: Error) -> Self
    where
        P: AsyncFnOnce(&T) -> bool,
    {
        match self {
            Self::Success(success) => {
                if predicate(success.value()).await {
                    Self::Success(success)
                } else {
                    Self::Failure(error)
                }
            }
            failure @ Self::Failure(_) => failure,
        }
    }

    /// Async [`Outcome::match_with`]. Exactly one handler is awaited.
    pub async fn match_with_async<R, S, E>(self, on_success: S, on_failure: E) -> R
    where
        S: AsyncFnOnce(Success<T>) -> R,
        E: AsyncFnOnce(Error) -> R,
    {
        match self {
            Self::Success(success) => on_success(success).await,
            Self::Failure(error) => on_failure(error).await,
        }
    }

    /// Async [`Outcome::match_value`].
    pub async fn match_value_async<R, S, E>(self, on_value: S, on_failure: E) -> R
    where
        S: AsyncFnOnce(T) -> R,
        E: AsyncFnOnce(Error) -> R,
    {
        match self {
            Self::Success(success) => on_value(success.into_value()).await,
            Self::Failure(error) => on_failure(error).await,
        }
    }

    /// Async [`Outcome::tap`].
    pub async fn tap_async<F>(self, f: F) -> Self
    where
        F: AsyncFnOnce(&T),
    {
        if let Self::Success(success) = &self {
            f(success.value()).await;
        }
        self
    }

    /// Async [`Outcome::on_failure`].
    pub async fn on_failure_async<F>(self, f: F) -> Self
    where
        F: AsyncFnOnce(&Error),
    {
        if let Self::Failure(error) = &self {
            f(error).await;
        }
        self
    }

    /// Async [`Outcome::map_error`].
    pub async fn map_error_async<F>(self, f: F) -> Self
    where
        F: AsyncFnOnce(Error) -> Error,
    {
        match self {
            Self::Failure(error) => Self::Failure(f(error).await),
            success @ Self::Success(_) => success,
        }
    }

    /// Async [`Outcome::value_or_else`].
    pub async fn value_or_else_async<F>(self, f: F) -> T
    where
        F: AsyncFnOnce(Error) -> T,
    {
        match self {
            Self::Success(success) => success.into_value(),
            Self::Failure(error) => f(error).await,
        }
    }
}

// ============================================================================
// Combinators on a pending outcome
// ============================================================================

/// Combinators for futures that resolve to an [`Outcome`].
///
/// Implemented for every such future; bring the trait into scope and chain
/// directly on the call that produces the future.
///
/// If `futures::FutureExt` is also in scope, `map` is ambiguous; call
/// `OutcomeFuture::map(fut, f)` in that case.
pub trait OutcomeFuture<T>: Future<Output = Outcome<T>> + Sized {
    // ------------------------------------------------------------------------
    // Sync mappers
    // ------------------------------------------------------------------------

    /// Await, then [`Outcome::map`].
    fn map<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> U,
    {
        async move { self.await.map(f) }
    }

    /// Await, then [`Outcome::map_success`].
    fn map_success<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Success<U>,
    {
        async move { self.await.map_success(f) }
    }

    /// Await, then [`Outcome::bind`].
    fn bind<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        async move { self.await.bind(f) }
    }

    /// Await, then [`Outcome::ensure`].
    fn ensure<P>(self, predicate: P, error: Error) -> impl Future<Output = Outcome<T>>
    where
        P: FnOnce(&T) -> bool,
    {
        async move { self.await.ensure(predicate, error) }
    }

    /// Await, then [`Outcome::match_with`].
    fn match_with<R, S, E>(self, on_success: S, on_failure: E) -> impl Future<Output = R>
    where
        S: FnOnce(Success<T>) -> R,
        E: FnOnce(Error) -> R,
    {
        async move { self.await.match_with(on_success, on_failure) }
    }

    /// Await, then [`Outcome::match_value`].
    fn match_value<R, S, E>(self, on_value: S, on_failure: E) -> impl Future<Output = R>
    where
        S: FnOnce(T) -> R,
        E: FnOnce(Error) -> R,
    {
        async move { self.await.match_value(on_value, on_failure) }
    }

    /// Await, then [`Outcome::tap`].
    fn tap<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T),
    {
        async move { self.await.tap(f) }
    }

    /// Await, then [`Outcome::on_failure`].
    fn on_failure<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&Error),
    {
        async move { self.await.on_failure(f) }
    }

    /// Await, then [`Outcome::map_error`].
    fn map_error<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(Error) -> Error,
    {
        async move { self.await.map_error(f) }
    }

    /// Await, then [`Outcome::with_value`].
    fn with_value<U>(self, value: U) -> impl Future<Output = Outcome<U>> {
        async move { self.await.with_value(value) }
    }

    /// Await, then [`Outcome::value_or`].
    fn value_or(self, default: T) -> impl Future<Output = T> {
        async move { self.await.value_or(default) }
    }

    /// Await, then [`Outcome::value_or_else`].
    fn value_or_else<F>(self, f: F) -> impl Future<Output = T>
    where
        F: FnOnce(Error) -> T,
    {
        async move { self.await.value_or_else(f) }
    }

    /// Await, then [`Outcome::value_or_default`].
    fn value_or_default(self) -> impl Future<Output = T>
    where
        T: Default,
    {
        async move { self.await.value_or_default() }
    }

    // ------------------------------------------------------------------------
    // Async mappers
    // ------------------------------------------------------------------------

    /// Await, then [`Outcome::map_async`].
    fn map_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: AsyncFnOnce(T) -> U,
    {
        async move { self.await.map_async(f).await }
    }

    /// Await, then [`Outcome::map_success_async`].
    fn map_success_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: AsyncFnOnce(T) -> Success<U>,
    {
        async move { self.await.map_success_async(f).await }
    }

    /// Await, then [`Outcome::bind_async`].
    fn bind_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: AsyncFnOnce(T) -> Outcome<U>,
    {
        async move { self.await.bind_async(f).await }
    }

    /// Await, then [`Outcome::ensure_async`].
    fn ensure_async<P>(self, predicate: P, error: Error) -> impl Future<Output = Outcome<T>>
    where
        P: AsyncFnOnce(&T) -> bool,
    {
        async move { self.await.ensure_async(predicate, error).await }
    }

    /// Await, then [`Outcome::match_with_async`].
    fn match_with_async<R, S, E>(self, on_success: S, on_failure: E) -> impl Future<Output = R>
    where
        S: AsyncFnOnce(Success<T>) -> R,
        E: AsyncFnOnce(Error) -> R,
    {
        async move { self.await.match_with_async(on_success, on_failure).await }
    }

    /// Await, then [`Outcome::match_value_async`].
    fn match_value_async<R, S, E>(self, on_value: S, on_failure: E) -> impl Future<Output = R>
    where
        S: AsyncFnOnce(T) -> R,
        E: AsyncFnOnce(Error) -> R,
    {
        async move { self.await.match_value_async(on_value, on_failure).await }
    }

    /// Await, then [`Outcome::tap_async`].
    fn tap_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: AsyncFnOnce(&T),
    {
        async move { self.await.tap_async(f).await }
    }

    /// Await, then [`Outcome::on_failure_async`].
    fn on_failure_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: AsyncFnOnce(&Error),
    {
        async move { self.await.on_failure_async(f).await }
    }

    /// Await, then [`Outcome::map_error_async`].
    fn map_error_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: AsyncFnOnce(Error) -> Error,
    {
        async move { self.await.map_error_async(f).await }
    }

    /// Await, then [`Outcome::value_or_else_async`].
    fn value_or_else_async<F>(self, f: F) -> impl Future<Output = T>
    where
        F: AsyncFnOnce(Error) -> T,
    {
        async move { self.await.value_or_else_async(f).await }
    }
}

impl<T, Fut> OutcomeFuture<T> for Fut where Fut: Future<Output = Outcome<T>> {}
