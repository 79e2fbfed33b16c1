//! Structured failure logging.
//!
//! [`FailureLog`] borrows an [`Error`] for the duration of one logging call.
//! It can be written to any [`fmt::Write`] sink with bounded field lengths, or
//! emitted as a `tracing` event at `WARN` level.
//!
//! ```rust
//! use verdict::Outcome;
//! use verdict::definitions::resource;
//!
//! let outcome: Outcome<u32> = resource::not_found().with_detail("id", "42").into();
//!
//! let mut line = String::new();
//! outcome.error().log().operation("load_user").write_to(&mut line).unwrap();
//! assert_eq!(
//!     line,
//!     "[E-5001] Resource/NotFound operation='load_user' message='The requested resource was not found.' id='42'"
//! );
//!
//! // Or straight into the subscriber, leaving the outcome untouched:
//! let outcome = outcome.trace_failure("load_user");
//! assert!(outcome.is_failure());
//! ```

use crate::models::{Error, ErrorDetail};
use crate::outcome::Outcome;
use std::borrow::Cow;
use std::fmt;

/// Longest field written by [`FailureLog::write_to`], in bytes.
const MAX_FIELD_LEN: usize = 1024;

/// Appended to a field cut at [`MAX_FIELD_LEN`].
const TRUNCATED: &str = "...[TRUNCATED]";

/// Borrowed view of an error for one log call.
#[derive(Debug, Clone, Copy)]
pub struct FailureLog<'a> {
    error: &'a Error,
    operation: Option<&'a str>,
}

impl<'a> FailureLog<'a> {
    /// View of `error` with no operation.
    pub fn new(error: &'a Error) -> Self {
        Self {
            error,
            operation: None,
        }
    }

    /// Name the operation that failed.
    #[inline]
    pub fn operation(mut self, operation: &'a str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Full numeric code.
    #[inline]
    pub fn code(&self) -> u32 {
        self.error.code()
    }

    /// Owning module name, or `Custom` for codes outside any module.
    #[inline]
    pub fn module(&self) -> &'static str {
        self.error.module_name()
    }

    /// Kind name, or `"Custom"` for errors built outside a module factory.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        self.error.kind().map_or("Custom", |kind| kind.name())
    }

    /// Operation set with [`operation`](Self::operation).
    #[inline]
    pub fn operation_name(&self) -> Option<&'a str> {
        self.operation
    }

    /// Resolved message.
    #[inline]
    pub fn message(&self) -> Cow<'a, str> {
        self.error.message()
    }

    /// Detail entries of the error.
    #[inline]
    pub fn details(&self) -> &'a [ErrorDetail] {
        self.error.details()
    }

    /// Write one line without building intermediate strings.
    ///
    /// Every free-text field is cut at 1024 bytes on a character boundary and
    /// marked with `...[TRUNCATED]`.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "[E-{}] {}/{}", self.code(), self.module(), self.kind_name())?;

        if let Some(operation) = self.operation {
            write!(f, " operation='{}'", truncate_field(operation))?;
        }

        write!(f, " message='{}'", truncate_field(&self.message()))?;

        for detail in self.details() {
            write!(
                f,
                " {}='{}'",
                truncate_field(detail.context()),
                truncate_field(detail.message())
            )?;
        }

        Ok(())
    }

    /// Send a `WARN` event with `code`, `module`, `kind` and `operation`
    /// fields. The formatted line is the event message.
    ///
    /// The `operation` field is omitted when none was set.
    pub fn emit(&self) {
        tracing::warn!(
            code = self.code(),
            module = self.module(),
            kind = self.kind_name(),
            operation = self.operation,
            details = self.details().len(),
            "{}",
            self
        );
    }
}

impl fmt::Display for FailureLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl Error {
    /// Borrow this error for logging.
    #[inline]
    pub fn log(&self) -> FailureLog<'_> {
        FailureLog::new(self)
    }
}

impl<T> Outcome<T> {
    /// Emit a [`FailureLog`] event if this is a failure. The outcome is
    /// returned unchanged.
    pub fn trace_failure(self, operation: &str) -> Self {
        self.on_failure(|error| error.log().operation(operation).emit())
    }
}

fn truncate_field(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_LEN {
        return Cow::Borrowed(s);
    }

    let mut end = MAX_FIELD_LEN - TRUNCATED.len();
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    let mut cut = String::with_capacity(end + TRUNCATED.len());
    cut.push_str(&s[..end]);
    cut.push_str(TRUNCATED);
    Cow::Owned(cut)
}
