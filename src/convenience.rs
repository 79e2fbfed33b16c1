//! Macros for functions that return [`Outcome`](crate::Outcome).
//!
//! - [`details!`](crate::details): build a list of [`ErrorDetail`](crate::ErrorDetail)
//!   entries for [`Error::with_details`](crate::Error::with_details)
//! - [`try_outcome!`](crate::try_outcome): unwrap a success value or return the
//!   failure from the enclosing function (the `?` of outcomes)
//! - [`ensure_outcome!`](crate::ensure_outcome): return a failure unless a condition holds
//!
//! ```rust
//! use verdict::{details, ensure_outcome, try_outcome, Outcome};
//! use verdict::definitions::{resource, validation};
//!
//! fn stock(sku: &str) -> Outcome<u32> {
//!     match sku {
//!         "apple" => Outcome::ok_with(12),
//!         _ => resource::not_found().with_detail("sku", sku.to_owned()).into(),
//!     }
//! }
//!
//! fn reserve(sku: &str, qty: u32) -> Outcome<u32> {
//!     ensure_outcome!(qty > 0, validation::out_of_range().with_details(details!["qty" => "must be positive"]));
//!     let available = try_outcome!(stock(sku));
//!     ensure_outcome!(qty <= available, validation::out_of_range(), "only {} left", available);
//!     Outcome::created_with(available - qty)
//! }
//!
//! assert_eq!(reserve("apple", 2).into_value(), 10);
//! assert_eq!(reserve("pear", 2).error().code(), 5001);
//! assert_eq!(reserve("apple", 20).error().message(), "only 12 left");
//! ```

/// Build an array of [`ErrorDetail`](crate::ErrorDetail) from
/// `context => message` pairs.
///
/// ```rust
/// use verdict::details;
/// use verdict::definitions::validation;
///
/// let field = "email";
/// let err = validation::invalid_input().with_details(details![
///     field => "malformed",
///     "age" => format!("{} is negative", -3),
/// ]);
/// assert_eq!(err.details()[1].message(), "-3 is negative");
/// ```
#[macro_export]
macro_rules! details {
    () => {
        <[$crate::ErrorDetail; 0] as ::core::default::Default>::default()
    };
    ($($context:expr => $message:expr),+ $(,)?) => {
        [$($crate::ErrorDetail::new($context, $message)),+]
    };
}

/// Evaluate an `Outcome<T>`; yield its value on success, otherwise return
/// the failure from the enclosing function.
///
/// The enclosing function must return an `Outcome<U>`. The success status
/// of the inner outcome is dropped; only its value is kept.
#[macro_export]
macro_rules! try_outcome {
    ($outcome:expr $(,)?) => {
        match $outcome {
            $crate::Outcome::Success(success) => success.into_value(),
            $crate::Outcome::Failure(error) => return $crate::Outcome::Failure(error),
        }
    };
}

/// Return `Outcome::Failure(error)` from the enclosing function unless
/// `condition` holds.
///
/// With extra format arguments the error's message is replaced by the
/// formatted text. The error expression is only evaluated when the
/// condition fails.
#[macro_export]
macro_rules! ensure_outcome {
    ($condition:expr, $error:expr $(,)?) => {
        if !$condition {
            return $crate::Outcome::Failure($error);
        }
    };
    ($condition:expr, $error:expr, $($fmt:tt)+) => {
        if !$condition {
            return $crate::Outcome::Failure($error.with_message(format!($($fmt)+)));
        }
    };
}
