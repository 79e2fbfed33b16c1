//! Success and failure payloads.
//!
//! - [`ErrorDetail`]: one `(context, message)` issue attached to an error
//! - [`SuccessKind`] / [`Success`]: tagged success with status code, optional
//!   message and a value (`Success<()>` is the value-less form)
//! - [`Error`]: tagged failure with a hierarchical code, a message and details
//!
//! All three are immutable once built. Builder methods (`with_message`,
//! `with_detail`, ...) consume the value and return a new one.

use crate::codes::{self, ContractViolation, ErrorKind, ModuleCode};
use crate::messages::Message;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Error Detail
// ============================================================================

/// A single issue attached to an [`Error`], typically one invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorDetail {
    context: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl ErrorDetail {
    /// Create a detail entry.
    pub fn new(context: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }

    /// What the issue is about (field name, header, path...).
    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Detail text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

impl<C, M> From<(C, M)> for ErrorDetail
where
    C: Into<Cow<'static, str>>,
    M: Into<Cow<'static, str>>,
{
    fn from((context, message): (C, M)) -> Self {
        Self::new(context, message)
    }
}

/// Inline storage for details; most errors carry zero to two.
pub type DetailVec = SmallVec<[ErrorDetail; 2]>;

// ============================================================================
// Success
// ============================================================================

/// The four success variants and their status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessKind {
    /// Completed (100).
    Ok,
    /// A new resource was created (101).
    Created,
    /// Accepted for later processing (102).
    Accepted,
    /// Completed with nothing to return (103).
    NoContent,
}

impl SuccessKind {
    /// The status code of this variant.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 100,
            Self::Created => 101,
            Self::Accepted => 102,
            Self::NoContent => 103,
        }
    }

    /// Variant name, e.g. `Created`.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Created => "Created",
            Self::Accepted => "Accepted",
            Self::NoContent => "NoContent",
        }
    }
}

impl fmt::Display for SuccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successful outcome: variant, status code, optional message and a value.
///
/// `Success<()>` is the value-less form. [`Success::with_value`] promotes it
/// to carry data while keeping the variant, code and message exactly.
///
/// ```rust
/// use verdict::{Success, SuccessKind};
///
/// let promoted = Success::ok().with_message("msg").with_value(42);
/// assert_eq!(promoted.kind(), SuccessKind::Ok);
/// assert_eq!(promoted.code(), 100);
/// assert_eq!(promoted.message().as_deref(), Some("msg"));
/// assert_eq!(*promoted.value(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Success<T = ()> {
    kind: SuccessKind,
    code: u16,
    message: Option<Message>,
    value: T,
}

impl Success<()> {
    /// `Ok` without a value.
    #[inline]
    pub fn ok() -> Self {
        Self::new(SuccessKind::Ok, ())
    }

    /// `Created` without a value.
    #[inline]
    pub fn created() -> Self {
        Self::new(SuccessKind::Created, ())
    }

    /// `Accepted` without a value.
    #[inline]
    pub fn accepted() -> Self {
        Self::new(SuccessKind::Accepted, ())
    }

    /// `NoContent` without a value.
    #[inline]
    pub fn no_content() -> Self {
        Self::new(SuccessKind::NoContent, ())
    }
}

impl<T> Success<T> {
    /// A success of `kind` carrying `value`, with the variant's standard code.
    #[inline]
    pub fn new(kind: SuccessKind, value: T) -> Self {
        Self {
            kind,
            code: kind.code(),
            message: None,
            value,
        }
    }

    /// `Ok` carrying `value`.
    #[inline]
    pub fn ok_with(value: T) -> Self {
        Self::new(SuccessKind::Ok, value)
    }

    /// `Created` carrying `value`.
    #[inline]
    pub fn created_with(value: T) -> Self {
        Self::new(SuccessKind::Created, value)
    }

    /// `Accepted` carrying `value`.
    #[inline]
    pub fn accepted_with(value: T) -> Self {
        Self::new(SuccessKind::Accepted, value)
    }

    /// `NoContent` carrying `value`.
    #[inline]
    pub fn no_content_with(value: T) -> Self {
        Self::new(SuccessKind::NoContent, value)
    }

    /// Build a success with an explicit status code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is zero. A zero code is a bug in the caller, not a
    /// runtime failure; use [`Success::checked_from_parts`] for codes that come
    /// from configuration.
    #[track_caller]
    pub fn from_parts(kind: SuccessKind, code: u16, message: Option<Message>, value: T) -> Self {
        if let Err(violation) = codes::validate_success_code(code) {
            panic!("{}", violation);
        }
        Self {
            kind,
            code,
            message,
            value,
        }
    }

    /// Fallible variant of [`Success::from_parts`].
    pub fn checked_from_parts(
        kind: SuccessKind,
        code: u16,
        message: Option<Message>,
        value: T,
    ) -> Result<Self, ContractViolation> {
        codes::validate_success_code(code)?;
        Ok(Self {
            kind,
            code,
            message,
            value,
        })
    }

    /// Replace the message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Promote to carry `value`, keeping variant, code and message.
    #[inline]
    pub fn with_value<U>(self, value: U) -> Success<U> {
        Success {
            kind: self.kind,
            code: self.code,
            message: self.message,
            value,
        }
    }

    /// Drop the value, keeping variant, code and message.
    #[inline]
    pub fn without_value(self) -> Success<()> {
        self.with_value(())
    }

    /// Split into the value-less shell and the value.
    #[inline]
    pub fn into_parts(self) -> (Success<()>, T) {
        let Self {
            kind,
            code,
            message,
            value,
        } = self;
        (
            Success {
                kind,
                code,
                message,
                value: (),
            },
            value,
        )
    }

    /// Transform the value, keeping variant, code and message.
    #[inline]
    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> Success<U> {
        let (shell, value) = self.into_parts();
        shell.with_value(f(value))
    }

    /// Status kind.
    #[inline]
    pub const fn kind(&self) -> SuccessKind {
        self.kind
    }

    /// Status code (100 for `Ok` unless built with [`Success::from_parts`]).
    #[inline]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Resolved message, if any.
    #[inline]
    pub fn message(&self) -> Option<Cow<'_, str>> {
        self.message.as_ref().map(Message::resolve)
    }

    /// The unresolved message.
    #[inline]
    pub fn raw_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Borrow the carried value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Take the carried value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for Success<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{} ({})", message, self.code),
            None => write!(f, "{} ({})", self.kind, self.code),
        }
    }
}

impl<T: Serialize> Serialize for Success<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Success", 4)?;
        state.serialize_field("kind", self.kind.name())?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message().as_deref())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

// ============================================================================
// Error
// ============================================================================

/// A business failure: hierarchical code, message and detail entries.
///
/// `code() == prefix() * 1000 + suffix()`. Both parts are validated when the
/// error is built; an invalid code panics because it can only come from a bug
/// in the module that defined it.
///
/// Errors usually come from a module factory such as
/// [`resource::not_found`](crate::definitions::resource::not_found), whose
/// message is keyed (`"Resource_NotFound"`) and therefore translatable.
/// Passing a message with [`Error::with_message`] replaces it with literal text.
///
/// ```rust
/// use verdict::definitions::{application, validation};
///
/// let err = application::internal().with_message("boom");
/// assert_eq!(err.code(), 1001);
/// assert_eq!(err.message(), "boom");
///
/// let err = validation::invalid_input()
///     .with_detail("email", "must contain @")
///     .with_detail("age", "must be positive");
/// assert_eq!(err.details().len(), 2);
/// ```
#[derive(Clone)]
#[must_use = "errors should be propagated or handled"]
pub struct Error {
    prefix: u16,
    suffix: u16,
    message: Message,
    details: DetailVec,
    kind: Option<&'static ErrorKind>,
}

impl Error {
    /// Create an error outside of any module factory.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is zero or `suffix` is outside `1..=999`.
    #[track_caller]
    pub fn new(prefix: u16, suffix: u16, message: impl Into<Message>) -> Self {
        match Self::checked_new(prefix, suffix, message) {
            Ok(error) => error,
            Err(violation) => panic!("{}", violation),
        }
    }

    /// Fallible variant of [`Error::new`].
    pub fn checked_new(
        prefix: u16,
        suffix: u16,
        message: impl Into<Message>,
    ) -> Result<Self, ContractViolation> {
        codes::validate_error_code(prefix, suffix)?;
        Ok(Self {
            prefix,
            suffix,
            message: message.into(),
            details: DetailVec::new(),
            kind: None,
        })
    }

    /// Create the error described by `kind`, with its keyed default message.
    ///
    /// Descriptor codes are validated when the descriptor is defined.
    #[inline]
    pub fn from_kind(kind: &'static ErrorKind) -> Self {
        Self {
            prefix: kind.prefix(),
            suffix: kind.suffix(),
            message: Message::keyed_static(kind.key(), kind.default_message()),
            details: DetailVec::new(),
            kind: Some(kind),
        }
    }

    /// Replace the message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = message.into();
        self
    }

    /// Append one detail entry.
    #[inline]
    pub fn with_detail(
        mut self,
        context: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.details.push(ErrorDetail::new(context, message));
        self
    }

    /// Append several detail entries, preserving order.
    #[inline]
    pub fn with_details<I>(mut self, details: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ErrorDetail>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }

    /// Module prefix of the code.
    #[inline]
    pub const fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Suffix of the code.
    #[inline]
    pub const fn suffix(&self) -> u16 {
        self.suffix
    }

    /// `prefix * 1000 + suffix`.
    #[inline]
    pub const fn code(&self) -> u32 {
        codes::compose_code(self.prefix, self.suffix)
    }

    /// Message resolved for the active locale.
    #[inline]
    pub fn message(&self) -> Cow<'_, str> {
        self.message.resolve()
    }

    /// The unresolved message.
    #[inline]
    pub fn raw_message(&self) -> &Message {
        &self.message
    }

    /// Detail entries in insertion order.
    #[inline]
    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    /// Descriptor of the factory that built this error, if any.
    #[inline]
    pub const fn kind(&self) -> Option<&'static ErrorKind> {
        self.kind
    }

    /// Built-in module owning this error's prefix.
    #[inline]
    pub const fn module(&self) -> Option<ModuleCode> {
        ModuleCode::from_prefix(self.prefix)
    }

    /// Module name from the descriptor, the built-in table, or `"Custom"`.
    pub fn module_name(&self) -> &'static str {
        match (self.kind, self.module()) {
            (Some(kind), _) => kind.module(),
            (None, Some(module)) => module.name(),
            (None, None) => "Custom",
        }
    }

    /// True if this error has the same code as `kind`.
    #[inline]
    pub fn is(&self, kind: &ErrorKind) -> bool {
        kind.matches(self)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
            && self.suffix == other.suffix
            && self.message == other.message
            && self.details == other.details
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code())
            .field("kind", &self.kind.map(ErrorKind::name))
            .field("message", &self.message)
            .field("details", &self.details.as_slice())
            .finish()
    }
}

impl fmt::Display for Error {
    /// Format: `"{message} (E-{code})"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (E-{})", self.message(), self.code())
    }
}

impl std::error::Error for Error {}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Error", 5)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("module", self.module_name())?;
        state.serialize_field("name", &self.kind.map(ErrorKind::name))?;
        state.serialize_field("message", self.message().as_ref())?;
        state.serialize_field("details", self.details.as_slice())?;
        state.end()
    }
}
