//! Built-in error modules.
//!
//! Each module reserves one prefix from [`ModuleCode`](crate::ModuleCode) and
//! exposes one factory per suffix. Factories take no arguments; override the
//! message with [`Error::with_message`](crate::Error::with_message) and attach
//! details with [`Error::with_detail`](crate::Error::with_detail).
//!
//! ```rust
//! use verdict::definitions::{authentication, resource};
//!
//! assert_eq!(resource::not_found().code(), 5001);
//! assert_eq!(authentication::UNAUTHORIZED.key(), "Authentication_Unauthorized");
//! ```
//!
//! # Governance
//!
//! Suffixes are assigned sequentially from 1 within each module and are never
//! reused. New kinds are appended at the end of their module; removing a kind
//! retires its suffix. The tests at the bottom of this file check prefixes
//! against [`ModuleCode`](crate::ModuleCode) and suffixes for uniqueness.
//!
//! # Prefix Assignment
//!
//! System is 2 and Concurrency is 10. Earlier revisions of this catalog also
//! placed System under 10; the duplicate was removed rather than merged, and
//! [`ErrorCatalog::register`](crate::ErrorCatalog::register) rejects any
//! module that reuses a reserved prefix.

use crate::codes::ErrorModule;
use crate::define_error_module;

// -----------------------------------------------------------------------------
// Application (1)
// -----------------------------------------------------------------------------
define_error_module! {
    /// General application failures.
    pub mod application(crate::ModuleCode::Application.prefix(), "Application") {
        /// Unhandled internal failure.
        fn internal, INTERNAL = 1, "Internal", "An internal application error occurred.";
        /// A state the code considered impossible was reached.
        fn unexpected, UNEXPECTED = 2, "Unexpected", "An unexpected error occurred.";
        /// The operation exists but is not implemented.
        fn not_implemented, NOT_IMPLEMENTED = 3, "NotImplemented", "This operation is not implemented.";
        /// The operation is not valid for the current state.
        fn invalid_operation, INVALID_OPERATION = 4, "InvalidOperation", "The operation is not valid in the current state.";
        /// An object is in an inconsistent state.
        fn invalid_state, INVALID_STATE = 5, "InvalidState", "The application is in an invalid state.";
        /// Application configuration is missing or invalid.
        fn configuration, CONFIGURATION = 6, "Configuration", "The application is misconfigured.";
        /// The feature is switched off.
        fn feature_disabled, FEATURE_DISABLED = 7, "FeatureDisabled", "This feature is disabled.";
    }
}

// -----------------------------------------------------------------------------
// System (2)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Host and runtime failures.
    pub mod system(crate::ModuleCode::System.prefix(), "System") {
        /// Generic host failure.
        fn internal, INTERNAL = 1, "Internal", "An internal system error occurred.";
        /// The system cannot serve requests right now.
        fn unavailable, UNAVAILABLE = 2, "Unavailable", "The system is temporarily unavailable.";
        /// Memory could not be allocated.
        fn out_of_memory, OUT_OF_MEMORY = 3, "OutOfMemory", "The system ran out of memory.";
        /// A quota or limit was exhausted.
        fn resource_exhausted, RESOURCE_EXHAUSTED = 4, "ResourceExhausted", "A system resource was exhausted.";
        /// Scheduled maintenance is in progress.
        fn maintenance, MAINTENANCE = 5, "Maintenance", "The system is undergoing maintenance.";
        /// A required component failed to start.
        fn dependency_failure, DEPENDENCY_FAILURE = 6, "DependencyFailure", "A required system component failed.";
        /// The operation timed out inside the host.
        fn timeout, TIMEOUT = 7, "Timeout", "The system operation timed out.";
    }
}

// -----------------------------------------------------------------------------
// Database (3)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Persistence layer failures.
    pub mod database(crate::ModuleCode::Database.prefix(), "Database") {
        fn connection_failed, CONNECTION_FAILED = 1, "ConnectionFailed", "Could not connect to the database.";
        fn query_failed, QUERY_FAILED = 2, "QueryFailed", "The database query failed.";
        fn transaction_failed, TRANSACTION_FAILED = 3, "TransactionFailed", "The database transaction failed.";
        fn constraint_violation, CONSTRAINT_VIOLATION = 4, "ConstraintViolation", "A database constraint was violated.";
        fn duplicate_key, DUPLICATE_KEY = 5, "DuplicateKey", "A record with the same key already exists.";
        fn deadlock, DEADLOCK = 6, "Deadlock", "The database detected a deadlock.";
        fn timeout, TIMEOUT = 7, "Timeout", "The database operation timed out.";
        fn migration_failed, MIGRATION_FAILED = 8, "MigrationFailed", "The database migration failed.";
    }
}

// -----------------------------------------------------------------------------
// Validation (4)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Input validation failures. Attach one detail per offending field.
    pub mod validation(crate::ModuleCode::Validation.prefix(), "Validation") {
        /// One or more inputs are invalid.
        fn invalid_input, INVALID_INPUT = 1, "InvalidInput", "The input is invalid.";
        /// A required value is missing.
        fn required, REQUIRED = 2, "Required", "A required value is missing.";
        /// A value does not match the expected format.
        fn invalid_format, INVALID_FORMAT = 3, "InvalidFormat", "A value has an invalid format.";
        /// A value is outside the permitted range.
        fn out_of_range, OUT_OF_RANGE = 4, "OutOfRange", "A value is out of range.";
        /// A value is longer than permitted.
        fn too_long, TOO_LONG = 5, "TooLong", "A value is too long.";
        /// A value is shorter than permitted.
        fn too_short, TOO_SHORT = 6, "TooShort", "A value is too short.";
        /// A value is not one of the permitted options.
        fn invalid_value, INVALID_VALUE = 7, "InvalidValue", "A value is not permitted.";
        /// Two values contradict each other.
        fn inconsistent, INCONSISTENT = 8, "Inconsistent", "The input values are inconsistent.";
    }
}

// -----------------------------------------------------------------------------
// Resource (5)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Resource lookup and lifecycle failures.
    pub mod resource(crate::ModuleCode::Resource.prefix(), "Resource") {
        /// The resource does not exist.
        fn not_found, NOT_FOUND = 1, "NotFound", "The requested resource was not found.";
        /// A resource with the same identity exists.
        fn already_exists, ALREADY_EXISTS = 2, "AlreadyExists", "The resource already exists.";
        /// The change conflicts with the resource's current state.
        fn conflict, CONFLICT = 3, "Conflict", "The request conflicts with the current state of the resource.";
        /// The resource existed but was removed.
        fn gone, GONE = 4, "Gone", "The resource is no longer available.";
        /// The resource is locked by another party.
        fn locked, LOCKED = 5, "Locked", "The resource is locked.";
        /// The caller's copy is stale.
        fn precondition_failed, PRECONDITION_FAILED = 6, "PreconditionFailed", "The resource was modified since it was last read.";
    }
}

// -----------------------------------------------------------------------------
// Authentication (6)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Identity and permission failures.
    pub mod authentication(crate::ModuleCode::Authentication.prefix(), "Authentication") {
        /// No valid identity was presented.
        fn unauthorized, UNAUTHORIZED = 1, "Unauthorized", "Authentication is required.";
        /// The identity lacks permission.
        fn forbidden, FORBIDDEN = 2, "Forbidden", "You do not have permission to perform this operation.";
        fn invalid_credentials, INVALID_CREDENTIALS = 3, "InvalidCredentials", "The credentials are invalid.";
        fn token_expired, TOKEN_EXPIRED = 4, "TokenExpired", "The access token has expired.";
        fn token_invalid, TOKEN_INVALID = 5, "TokenInvalid", "The access token is invalid.";
        fn account_locked, ACCOUNT_LOCKED = 6, "AccountLocked", "The account is locked.";
        fn session_expired, SESSION_EXPIRED = 7, "SessionExpired", "The session has expired.";
    }
}

// -----------------------------------------------------------------------------
// Request (7)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Malformed or unacceptable requests.
    pub mod request(crate::ModuleCode::Request.prefix(), "Request") {
        fn bad_request, BAD_REQUEST = 1, "BadRequest", "The request is malformed.";
        fn unsupported_media_type, UNSUPPORTED_MEDIA_TYPE = 2, "UnsupportedMediaType", "The media type is not supported.";
        fn payload_too_large, PAYLOAD_TOO_LARGE = 3, "PayloadTooLarge", "The request payload is too large.";
        fn too_many_requests, TOO_MANY_REQUESTS = 4, "TooManyRequests", "Too many requests; try again later.";
        fn method_not_allowed, METHOD_NOT_ALLOWED = 5, "MethodNotAllowed", "The method is not allowed.";
        fn not_acceptable, NOT_ACCEPTABLE = 6, "NotAcceptable", "The requested representation is not available.";
        fn timeout, TIMEOUT = 7, "Timeout", "The request timed out.";
    }
}

// -----------------------------------------------------------------------------
// External (8)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Failures reported by third-party services.
    pub mod external(crate::ModuleCode::External.prefix(), "External") {
        fn service_unavailable, SERVICE_UNAVAILABLE = 1, "ServiceUnavailable", "An external service is unavailable.";
        fn bad_gateway, BAD_GATEWAY = 2, "BadGateway", "An external service returned an invalid response.";
        fn gateway_timeout, GATEWAY_TIMEOUT = 3, "GatewayTimeout", "An external service did not respond in time.";
        fn rejected, REJECTED = 4, "Rejected", "An external service rejected the request.";
        fn rate_limited, RATE_LIMITED = 5, "RateLimited", "An external service rate limit was reached.";
    }
}

// -----------------------------------------------------------------------------
// Network (9)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Transport-level failures.
    pub mod network(crate::ModuleCode::Network.prefix(), "Network") {
        fn connection_refused, CONNECTION_REFUSED = 1, "ConnectionRefused", "The connection was refused.";
        fn connection_lost, CONNECTION_LOST = 2, "ConnectionLost", "The connection was lost.";
        fn timeout, TIMEOUT = 3, "Timeout", "The network operation timed out.";
        fn host_unreachable, HOST_UNREACHABLE = 4, "HostUnreachable", "The host is unreachable.";
        fn dns_failure, DNS_FAILURE = 5, "DnsFailure", "The host name could not be resolved.";
        fn tls_failure, TLS_FAILURE = 6, "TlsFailure", "The secure connection could not be established.";
    }
}

// -----------------------------------------------------------------------------
// Concurrency (10)
// -----------------------------------------------------------------------------
define_error_module! {
    /// Contention and coordination failures.
    pub mod concurrency(crate::ModuleCode::Concurrency.prefix(), "Concurrency") {
        /// Another writer changed the data first.
        fn conflict, CONFLICT = 1, "Conflict", "The operation conflicts with a concurrent change.";
        fn deadlock, DEADLOCK = 2, "Deadlock", "A deadlock was detected.";
        fn lock_timeout, LOCK_TIMEOUT = 3, "LockTimeout", "Timed out waiting for a lock.";
        /// Version check failed on an optimistic update.
        fn stale_version, STALE_VERSION = 4, "StaleVersion", "The data was changed by another operation.";
        fn race_condition, RACE_CONDITION = 5, "RaceCondition", "A race condition was detected.";
    }
}

// -----------------------------------------------------------------------------
// IO (11)
// -----------------------------------------------------------------------------
define_error_module! {
    /// File and stream failures.
    pub mod io(crate::ModuleCode::IO.prefix(), "IO") {
        fn file_not_found, FILE_NOT_FOUND = 1, "FileNotFound", "The file was not found.";
        fn access_denied, ACCESS_DENIED = 2, "AccessDenied", "Access to the file was denied.";
        fn read_failed, READ_FAILED = 3, "ReadFailed", "Reading failed.";
        fn write_failed, WRITE_FAILED = 4, "WriteFailed", "Writing failed.";
        fn disk_full, DISK_FULL = 5, "DiskFull", "There is no space left on the device.";
        fn path_too_long, PATH_TOO_LONG = 6, "PathTooLong", "The path is too long.";
        fn already_exists, ALREADY_EXISTS = 7, "AlreadyExists", "The file already exists.";
    }
}

/// Every built-in module, in prefix order.
pub static BUILTIN_MODULES: [&ErrorModule; 11] = [
    &application::MODULE,
    &system::MODULE,
    &database::MODULE,
    &validation::MODULE,
    &resource::MODULE,
    &authentication::MODULE,
    &request::MODULE,
    &external::MODULE,
    &network::MODULE,
    &concurrency::MODULE,
    &io::MODULE,
];
