//! # Verdict
//!
//! Outcome values for operations that can fail, without panics or `?`-style
//! early returns as the only means of control flow.
//!
//! An [`Outcome<T>`] is either a tagged [`Success`] (variant, status code,
//! optional message, value) or an [`Error`] (hierarchical numeric code,
//! message, detail entries). Combinators chain operations and stop at the
//! first failure.
//!
//! ## Codes
//!
//! Error codes are `prefix * 1000 + suffix`. Each [error module](definitions)
//! reserves one prefix:
//!
//! | Prefix | Module | | Prefix | Module |
//! |---:|---|---|---:|---|
//! | 1 | Application | | 7 | Request |
//! | 2 | System | | 8 | External |
//! | 3 | Database | | 9 | Network |
//! | 4 | Validation | | 10 | Concurrency |
//! | 5 | Resource | | 11 | IO |
//! | 6 | Authentication | | | |
//!
//! Success codes are 100 (Ok), 101 (Created), 102 (Accepted) and 103 (NoContent).
//!
//! ## Quick Start
//!
//! ```rust
//! use verdict::{Outcome, Success};
//! use verdict::definitions::{application, resource};
//!
//! let err = application::internal().with_message("boom");
//! assert_eq!(err.code(), 1001);
//! assert_eq!(err.message(), "boom");
//!
//! let lookup: Outcome<String> = resource::not_found().into();
//! let mapped = lookup.map(|name| name.to_uppercase());
//! assert_eq!(mapped.error().code(), 5001);
//!
//! let saved = Outcome::success(Success::created().with_message("saved")).with_value(7);
//! assert_eq!(saved.success_details().code(), 101);
//! ```
//!
//! ## Async
//!
//! Async mappers use the `*_async` methods on [`Outcome`]; futures that
//! resolve to an outcome get the same combinators through [`OutcomeFuture`].
//!
//! ## Messages
//!
//! Factory-built errors carry keyed messages resolved through the installed
//! [`MessageProvider`]; see [`messages`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod future;
pub mod logging;
pub mod messages;
pub mod models;
pub mod outcome;

pub use catalog::{CatalogEntry, CatalogError, ErrorCatalog};
pub use codes::{ContractViolation, ErrorKind, ErrorModule, ModuleCode};
pub use future::OutcomeFuture;
pub use logging::FailureLog;
pub use messages::{Locale, Message, MessageConfig, MessageProvider, StaticMessages};
pub use models::{DetailVec, Error, ErrorDetail, Success, SuccessKind};
pub use outcome::{InvalidOutcomeAccess, Outcome};
