//! Error code namespace.
//!
//! Every [`Error`](crate::Error) carries a two-part code: a **prefix** reserved
//! by the module that produced it and a **suffix** unique inside that module.
//! The combined code is `prefix * 1000 + suffix`, so `Resource/NotFound`
//! (prefix 5, suffix 1) is `5001`.
//!
//! # Module Prefixes
//!
//! | Prefix | Module |
//! |---|---|
//! | 1 | Application |
//! | 2 | System |
//! | 3 | Database |
//! | 4 | Validation |
//! | 5 | Resource |
//! | 6 | Authentication |
//! | 7 | Request |
//! | 8 | External |
//! | 9 | Network |
//! | 10 | Concurrency |
//! | 11 | IO |
//!
//! Downstream crates may define their own modules with
//! [`define_error_module!`](crate::define_error_module) using any unreserved
//! prefix; the [`ErrorCatalog`](crate::ErrorCatalog) refuses to register two
//! modules with the same prefix.
//!
//! # Governance
//!
//! Descriptors ([`ErrorKind`], [`ErrorModule`]) exist only as statics created
//! by the macro. Their constructors are hidden and validate the code parts at
//! compile time, so a malformed code fails the build rather than a request.

use crate::Error;
use std::fmt;

/// Multiplier applied to the prefix when composing a full code.
pub const PREFIX_FACTOR: u32 = 1000;

/// Largest suffix a module may declare.
pub const MAX_SUFFIX: u16 = 999;

/// Compose a full numeric code from its parts.
#[inline]
pub const fn compose_code(prefix: u16, suffix: u16) -> u32 {
    prefix as u32 * PREFIX_FACTOR + suffix as u32
}

/// Split a full numeric code into `(prefix, suffix)`.
///
/// Returns `None` when either part would be zero or the prefix does not fit
/// in a `u16`.
#[inline]
pub const fn decompose_code(code: u32) -> Option<(u16, u16)> {
    let prefix = code / PREFIX_FACTOR;
    let suffix = code % PREFIX_FACTOR;
    if prefix == 0 || suffix == 0 || prefix > u16::MAX as u32 {
        return None;
    }
    Some((prefix as u16, suffix as u16))
}

// ============================================================================
// Built-in Module Prefixes
// ============================================================================

/// Reserved prefixes of the built-in error modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ModuleCode {
    /// General application failures.
    Application = 1,
    /// Host and runtime failures.
    System = 2,
    /// Persistence layer failures.
    Database = 3,
    /// Input validation failures.
    Validation = 4,
    /// Resource lookup and lifecycle failures.
    Resource = 5,
    /// Identity and permission failures.
    Authentication = 6,
    /// Malformed or unacceptable requests.
    Request = 7,
    /// Failures reported by third-party services.
    External = 8,
    /// Transport-level failures.
    Network = 9,
    /// Contention and coordination failures.
    Concurrency = 10,
    /// File and stream failures.
    IO = 11,
}

impl ModuleCode {
    /// Every built-in module, in prefix order.
    pub const ALL: [ModuleCode; 11] = [
        Self::Application,
        Self::System,
        Self::Database,
        Self::Validation,
        Self::Resource,
        Self::Authentication,
        Self::Request,
        Self::External,
        Self::Network,
        Self::Concurrency,
        Self::IO,
    ];

    /// The reserved prefix.
    #[inline]
    pub const fn prefix(self) -> u16 {
        self as u16
    }

    /// Display name, also used as the first half of message keys.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::System => "System",
            Self::Database => "Database",
            Self::Validation => "Validation",
            Self::Resource => "Resource",
            Self::Authentication => "Authentication",
            Self::Request => "Request",
            Self::External => "External",
            Self::Network => "Network",
            Self::Concurrency => "Concurrency",
            Self::IO => "IO",
        }
    }

    /// Look up a built-in module by prefix.
    pub const fn from_prefix(prefix: u16) -> Option<Self> {
        match prefix {
            1 => Some(Self::Application),
            2 => Some(Self::System),
            3 => Some(Self::Database),
            4 => Some(Self::Validation),
            5 => Some(Self::Resource),
            6 => Some(Self::Authentication),
            7 => Some(Self::Request),
            8 => Some(Self::External),
            9 => Some(Self::Network),
            10 => Some(Self::Concurrency),
            11 => Some(Self::IO),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Contract Violations
// ============================================================================

/// Invalid use of the construction API.
///
/// These are programming errors, never business failures: the asserting
/// constructors panic with this message and the `checked_*` constructors
/// return it. It is never wrapped in an [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// Error code prefix is zero.
    #[error("error code prefix must be positive, got {value}")]
    PrefixOutOfRange {
        /// Offending value.
        value: u16,
    },
    /// Error code suffix is zero or exceeds [`MAX_SUFFIX`].
    #[error("error code suffix {value} is out of range (must be 1-999)")]
    SuffixOutOfRange {
        /// Offending value.
        value: u16,
    },
    /// Success status code is zero.
    #[error("success code must be positive, got {value}")]
    SuccessCodeOutOfRange {
        /// Offending value.
        value: u16,
    },
}

/// Validate an error code pair.
#[inline]
pub const fn validate_error_code(prefix: u16, suffix: u16) -> Result<(), ContractViolation> {
    if prefix == 0 {
        return Err(ContractViolation::PrefixOutOfRange { value: prefix });
    }
    if suffix == 0 || suffix > MAX_SUFFIX {
        return Err(ContractViolation::SuffixOutOfRange { value: suffix });
    }
    Ok(())
}

/// Validate a success status code.
#[inline]
pub const fn validate_success_code(code: u16) -> Result<(), ContractViolation> {
    if code == 0 {
        return Err(ContractViolation::SuccessCodeOutOfRange { value: code });
    }
    Ok(())
}

// ============================================================================
// Descriptors
// ============================================================================

/// Static description of one error factory.
///
/// Errors built by a module factory point back at their kind, which is how
/// adapters tell a `Resource/NotFound` from a `Resource/Conflict` without
/// comparing numbers.
pub struct ErrorKind {
    module: &'static str,
    prefix: u16,
    suffix: u16,
    name: &'static str,
    factory_name: &'static str,
    key: &'static str,
    default_message: &'static str,
    factory: fn() -> Error,
}

impl ErrorKind {
    /// Internal constructor used by [`define_error_module!`](crate::define_error_module).
    ///
    /// # Panics
    ///
    /// Panics (at compile time in statics) if the code parts are invalid.
    #[doc(hidden)]
    #[allow(clippy::too_many_arguments)]
    pub const fn __internal_new(
        module: &'static str,
        prefix: u16,
        suffix: u16,
        name: &'static str,
        factory_name: &'static str,
        key: &'static str,
        default_message: &'static str,
        factory: fn() -> Error,
    ) -> Self {
        assert!(prefix > 0, "Error code prefix must be positive");
        assert!(suffix > 0 && suffix <= MAX_SUFFIX, "Error code suffix must be 1-999");
        Self {
            module,
            prefix,
            suffix,
            name,
            factory_name,
            key,
            default_message,
            factory,
        }
    }

    /// Name of the owning module.
    #[inline]
    pub const fn module(&self) -> &'static str {
        self.module
    }

    /// Prefix of the owning module.
    #[inline]
    pub const fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Suffix inside the owning module.
    #[inline]
    pub const fn suffix(&self) -> u16 {
        self.suffix
    }

    /// Full numeric code.
    #[inline]
    pub const fn code(&self) -> u32 {
        compose_code(self.prefix, self.suffix)
    }

    /// Kind name, e.g. `NotFound`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Factory function name, e.g. `not_found`.
    #[inline]
    pub const fn factory_name(&self) -> &'static str {
        self.factory_name
    }

    /// Message lookup key, e.g. `Resource_NotFound`.
    #[inline]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// English text used when no translation exists.
    #[inline]
    pub const fn default_message(&self) -> &'static str {
        self.default_message
    }

    /// Invoke the factory this descriptor belongs to.
    #[inline]
    pub fn create(&self) -> Error {
        (self.factory)()
    }

    /// True if `error` carries this kind's code.
    #[inline]
    pub fn matches(&self, error: &Error) -> bool {
        error.prefix() == self.prefix && error.suffix() == self.suffix
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.suffix == other.suffix
    }
}

impl Eq for ErrorKind {}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorKind")
            .field("code", &self.code())
            .field("module", &self.module)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} (E-{})", self.module, self.name, self.code())
    }
}

/// Static description of an error module: its prefix and every factory it
/// declares, in declaration order.
pub struct ErrorModule {
    name: &'static str,
    prefix: u16,
    kinds: &'static [&'static ErrorKind],
}

impl ErrorModule {
    /// Internal constructor used by [`define_error_module!`](crate::define_error_module).
    #[doc(hidden)]
    pub const fn __internal_new(
        name: &'static str,
        prefix: u16,
        kinds: &'static [&'static ErrorKind],
    ) -> Self {
        assert!(prefix > 0, "Error module prefix must be positive");
        Self { name, prefix, kinds }
    }

    /// Display name, e.g. `Resource`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reserved code prefix.
    #[inline]
    pub const fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Every kind, in declaration order.
    #[inline]
    pub const fn kinds(&self) -> &'static [&'static ErrorKind] {
        self.kinds
    }

    /// Find a kind by suffix.
    pub fn kind(&self, suffix: u16) -> Option<&'static ErrorKind> {
        self.kinds.iter().copied().find(|k| k.suffix() == suffix)
    }

    /// Find a kind by name (`NotFound`) or factory name (`not_found`).
    pub fn kind_named(&self, name: &str) -> Option<&'static ErrorKind> {
        self.kinds
            .iter()
            .copied()
            .find(|k| k.name() == name || k.factory_name() == name)
    }
}

impl fmt::Debug for ErrorModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorModule")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("kinds", &self.kinds.len())
            .finish()
    }
}

// ============================================================================
// Definition Macro
// ============================================================================

/// Define an error module: a prefix, one descriptor static per kind, a
/// `MODULE` descriptor and one factory function per kind.
///
/// Each kind line reads `fn factory_name, STATIC_NAME = suffix, "KindName", "default message";`.
/// The message key is `"<Module>_<KindName>"`. Every generated item gets a
/// doc line naming its module and kind, after any doc comments given here.
///
/// # Example
///
/// ```rust
/// use verdict::define_error_module;
///
/// define_error_module! {
///     /// Billing failures.
///     pub mod billing(40, "Billing") {
///         /// The card was declined.
///         fn card_declined, CARD_DECLINED = 1, "CardDeclined", "The card was declined.";
///         fn invoice_locked, INVOICE_LOCKED = 2, "InvoiceLocked", "The invoice is locked.";
///     }
/// }
///
/// let err = billing::card_declined();
/// assert_eq!(err.code(), 40001);
/// assert_eq!(billing::CARD_DECLINED.key(), "Billing_CardDeclined");
/// assert_eq!(billing::MODULE.kinds().len(), 2);
/// ```
#[macro_export]
macro_rules! define_error_module {
    (
        $(#[$meta:meta])*
        $vis:vis mod $module:ident($prefix:expr, $display:literal) {
            $(
                $(#[$kind_meta:meta])*
                fn $factory:ident, $kind:ident = $suffix:literal, $name:literal, $message:literal;
            )+
        }
    ) => {
        $(#[$meta])*
        ///
        #[doc = concat!("Error module `", $display, "`.")]
        $vis mod $module {
            /// Reserved code prefix of this module.
            pub const PREFIX: u16 = $prefix;

            $(
                $(#[$kind_meta])*
                ///
                #[doc = concat!("Descriptor of `", $display, "/", $name, "`, suffix ", $suffix, ".")]
                pub static $kind: $crate::ErrorKind = $crate::ErrorKind::__internal_new(
                    $display,
                    PREFIX,
                    $suffix,
                    $name,
                    stringify!($factory),
                    concat!($display, "_", $name),
                    $message,
                    $factory,
                );
            )+

            /// Descriptor listing every factory of this module in declaration order.
            pub static MODULE: $crate::ErrorModule =
                $crate::ErrorModule::__internal_new($display, PREFIX, &[$(&$kind),+]);

            $(
                $(#[$kind_meta])*
                ///
                #[doc = concat!("`", $display, "/", $name, "`: ", $message)]
                #[inline]
                pub fn $factory() -> $crate::Error {
                    $crate::Error::from_kind(&$kind)
                }
            )+
        }
    };
}

// ============================================================================
// Tests
// ============================================================================
