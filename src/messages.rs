//! Message resolution for errors and successes.
//!
//! Every display message is either a **literal** string fixed at construction
//! or a **keyed** message that is resolved when it is read. Keyed messages go
//! through the installed [`MessageProvider`] with the active [`Locale`] and fall
//! back to the default text carried by the message itself when the provider has
//! no translation. Literal messages never touch the provider.
//!
//! # Configuration
//!
//! The provider and the process default locale are installed once with
//! [`MessageConfig::install`]. A thread can temporarily override the locale
//! with [`set_active_locale`]; the override is thread-local and is not
//! inherited by spawned threads.
//!
//! ```rust
//! use verdict::messages::{self, Locale, MessageConfig, StaticMessages};
//! use verdict::definitions::resource;
//!
//! MessageConfig::new()
//!     .with_provider(StaticMessages::new().with(
//!         "de",
//!         "Resource_NotFound",
//!         "Die angeforderte Ressource wurde nicht gefunden.",
//!     ))
//!     .install();
//!
//! messages::set_active_locale(Locale::new("de-AT"));
//! assert_eq!(
//!     resource::not_found().message(),
//!     "Die angeforderte Ressource wurde nicht gefunden."
//! );
//! messages::clear_active_locale();
//! ```

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

// ============================================================================
// Locale
// ============================================================================

/// A BCP-47-style language tag such as `en`, `fr` or `pt-BR`.
///
/// Tags are normalized on construction: underscores become hyphens, the
/// language subtag is lowercased and the region subtag uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// English, the locale of every built-in default message.
    pub const EN: Locale = Locale(Cow::Borrowed("en"));

    /// Create a locale from a tag, normalizing it.
    pub fn new(tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim().replace('_', "-");
        let mut parts = tag.splitn(2, '-');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        match parts.next() {
            Some(region) if !region.is_empty() => {
                Self(Cow::Owned(format!("{}-{}", language, region.to_ascii_uppercase())))
            }
            _ => Self(Cow::Owned(language)),
        }
    }

    /// Parse a POSIX locale string (`de_DE.UTF-8`, `fr_FR@euro`).
    ///
    /// Returns `None` for the `C`/`POSIX` pseudo-locales and empty input.
    pub fn parse_posix(raw: &str) -> Option<Self> {
        let tag = raw
            .split(['.', '@'])
            .next()
            .map(str::trim)
            .unwrap_or_default();

        if tag.is_empty() || tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
            return None;
        }
        Some(Self::new(tag))
    }

    /// Read the locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, in that order.
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|raw| Self::parse_posix(&raw))
    }

    /// The full tag.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// The language subtag (`pt` for `pt-BR`).
    #[inline]
    pub fn language(&self) -> &str {
        self.as_str().split('-').next().unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::EN
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Source of translated message text.
///
/// Implementations return `None` when they have no text for the key in the
/// given locale; the caller then uses the message's default text.
pub trait MessageProvider: Send + Sync {
    /// Look up `key` for `locale`.
    fn resolve(&self, key: &str, locale: &Locale) -> Option<String>;
}

impl<F> MessageProvider for F
where
    F: Fn(&str, &Locale) -> Option<String> + Send + Sync,
{
    fn resolve(&self, key: &str, locale: &Locale) -> Option<String> {
        self(key, locale)
    }
}

/// Table-backed [`MessageProvider`].
///
/// Lookups try the exact locale tag first and then the bare language, so an
/// entry stored under `fr` also serves `fr-CA`.
#[derive(Debug, Default, Clone)]
pub struct StaticMessages {
    // locale tag -> key -> text
    entries: HashMap<String, HashMap<String, String>>,
}

impl StaticMessages {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with(mut self, locale: impl AsRef<str>, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, key, text);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, locale: impl AsRef<str>, key: impl Into<String>, text: impl Into<String>) {
        let locale = Locale::new(locale);
        self.entries
            .entry(locale.as_str().to_owned())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Number of entries across all locales.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, locale: &str, key: &str) -> Option<&String> {
        self.entries.get(locale)?.get(key)
    }
}

impl MessageProvider for StaticMessages {
    fn resolve(&self, key: &str, locale: &Locale) -> Option<String> {
        self.get(locale.as_str(), key)
            .or_else(|| self.get(locale.language(), key))
            .cloned()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Process-wide message configuration.
#[derive(Clone, Default)]
pub struct MessageConfig {
    default_locale: Locale,
    provider: Option<Arc<dyn MessageProvider>>,
}

impl MessageConfig {
    /// English default locale, no provider (every keyed message uses its default text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`MessageConfig::new`] but with the default locale taken from the environment.
    pub fn from_env() -> Self {
        Self {
            default_locale: Locale::from_env().unwrap_or_default(),
            provider: None,
        }
    }

    /// Set the locale used when a thread has no override.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Set the translation source.
    pub fn with_provider(mut self, provider: impl MessageProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set an already shared translation source.
    pub fn with_shared_provider(mut self, provider: Arc<dyn MessageProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Whether a provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Replace the process-wide configuration with this one.
    pub fn install(self) {
        tracing::debug!(
            default_locale = %self.default_locale,
            provider = self.provider.is_some(),
            "installing message configuration"
        );
        let mut slot = global().write().unwrap_or_else(PoisonError::into_inner);
        *slot = self;
    }

    /// A copy of the currently installed configuration.
    pub fn current() -> Self {
        global()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for MessageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageConfig")
            .field("default_locale", &self.default_locale)
            .field("provider", &self.provider.as_ref().map(|_| "<installed>"))
            .finish()
    }
}

static CONFIG: OnceLock<RwLock<MessageConfig>> = OnceLock::new();

fn global() -> &'static RwLock<MessageConfig> {
    CONFIG.get_or_init(|| RwLock::new(MessageConfig::default()))
}

/// Restore the default configuration (English, no provider).
pub fn reset_config() {
    MessageConfig::default().install();
}

// Thread-local locale override.
//
// Each thread resolves messages in its own locale and does not share it.
thread_local! {
    static ACTIVE_LOCALE: RefCell<Option<Locale>> = const { RefCell::new(None) };
}

/// Override the locale for messages resolved on this thread.
pub fn set_active_locale(locale: Locale) {
    ACTIVE_LOCALE.with(|slot| *slot.borrow_mut() = Some(locale));
}

/// Remove this thread's override, reverting to the configured default.
pub fn clear_active_locale() {
    ACTIVE_LOCALE.with(|slot| *slot.borrow_mut() = None);
}

/// The locale messages are resolved in on this thread.
pub fn active_locale() -> Locale {
    ACTIVE_LOCALE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(|| MessageConfig::current().default_locale)
}

/// Ask the installed provider for `key` in the active locale.
///
/// Returns `None` when no provider is installed or it has no translation.
pub fn translate(key: &str) -> Option<String> {
    let (provider, default_locale) = {
        let config = global().read().unwrap_or_else(PoisonError::into_inner);
        (config.provider.clone()?, config.default_locale.clone())
    };
    let locale = ACTIVE_LOCALE
        .with(|slot| slot.borrow().clone())
        .unwrap_or(default_locale);

    let text = provider.resolve(key, &locale);
    if text.is_none() {
        tracing::trace!(key, locale = %locale, "no translation, using default message");
    }
    text
}

// ============================================================================
// Message
// ============================================================================

/// A display message, literal or resolved through the provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Message {
    /// Fixed text; never translated.
    Literal(Cow<'static, str>),
    /// Looked up by `key`, falling back to `default`.
    Keyed {
        /// Stable lookup key such as `Authentication_Unauthorized`.
        key: Cow<'static, str>,
        /// Text used when no translation exists.
        default: Cow<'static, str>,
    },
}

impl Message {
    /// Literal text.
    pub fn literal(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal(text.into())
    }

    /// Keyed message with static parts, usable in const contexts.
    pub const fn keyed_static(key: &'static str, default: &'static str) -> Self {
        Self::Keyed {
            key: Cow::Borrowed(key),
            default: Cow::Borrowed(default),
        }
    }

    /// Keyed message.
    pub fn keyed(key: impl Into<Cow<'static, str>>, default: impl Into<Cow<'static, str>>) -> Self {
        Self::Keyed {
            key: key.into(),
            default: default.into(),
        }
    }

    /// Resolve to display text for the active locale.
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            Self::Literal(text) => Cow::Borrowed(text.as_ref()),
            Self::Keyed { key, default } => match translate(key) {
                Some(text) => Cow::Owned(text),
                None => Cow::Borrowed(default.as_ref()),
            },
        }
    }

    /// The lookup key, for keyed messages.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Keyed { key, .. } => Some(key.as_ref()),
        }
    }

    /// True for literal messages.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Keyed { key, default } => f
                .debug_struct("Keyed")
                .field("key", key)
                .field("default", default)
                .finish(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Literal(Cow::Owned(text))
    }
}

impl From<Cow<'static, str>> for Message {
    fn from(text: Cow<'static, str>) -> Self {
        Self::Literal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Tests that install or reset the global configuration hold this lock.
    static GLOBAL_CONFIG: Mutex<()> = Mutex::new(());

    fn lock_config() -> MutexGuard<'static, ()> {
        GLOBAL_CONFIG.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // The only provider installed in this binary. Its table has French
    // entries only, so tests resolving in English are unaffected.
    fn install_french() {
        MessageConfig::new()
            .with_provider(
                StaticMessages::new()
                    .with("fr", "Resource_NotFound", "Ressource introuvable")
                    .with("fr-CA", "Resource_NotFound", "Ressource introuvable (CA)"),
            )
            .install();
    }

    #[test]
    fn locale_normalization() {
        assert_eq!(Locale::new("pt_br").as_str(), "pt-BR");
        assert_eq!(Locale::new(" EN ").as_str(), "en");
        assert_eq!(Locale::new("fr-ca").language(), "fr");
    }

    #[test]
    fn posix_locale_parsing() {
        assert_eq!(Locale::parse_posix("de_DE.UTF-8"), Some(Locale::new("de-DE")));
        assert_eq!(Locale::parse_posix("fr_FR@euro"), Some(Locale::new("fr-FR")));
        assert_eq!(Locale::parse_posix("C"), None);
        assert_eq!(Locale::parse_posix("POSIX.UTF-8"), None);
        assert_eq!(Locale::parse_posix(""), None);
    }

    #[test]
    fn static_messages_fall_back_to_language() {
        let table = StaticMessages::new().with("fr", "k", "texte");
        assert_eq!(table.resolve("k", &Locale::new("fr-BE")).as_deref(), Some("texte"));
        assert_eq!(table.resolve("k", &Locale::new("de")), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn literal_messages_bypass_provider() {
        let _guard = lock_config();
        install_french();
        set_active_locale(Locale::new("fr"));
        let message = Message::literal("Resource_NotFound");
        assert_eq!(message.resolve(), "Resource_NotFound");
        clear_active_locale();
    }

    #[test]
    fn keyed_messages_use_active_locale() {
        let _guard = lock_config();
        install_french();
        let message = Message::keyed_static("Resource_NotFound", "Resource not found");

        set_active_locale(Locale::new("fr-CA"));
        assert_eq!(message.resolve(), "Ressource introuvable (CA)");

        set_active_locale(Locale::new("fr-FR"));
        assert_eq!(message.resolve(), "Ressource introuvable");

        set_active_locale(Locale::new("ja"));
        assert_eq!(message.resolve(), "Resource not found");

        clear_active_locale();
        assert_eq!(message.resolve(), "Resource not found");
    }

    #[test]
    fn owned_keys_resolve_like_static_ones() {
        let _guard = lock_config();
        install_french();
        let message = Message::keyed(String::from("Resource_NotFound"), format!("{} not found", "Resource"));
        assert_eq!(message.key(), Some("Resource_NotFound"));
        assert!(!message.is_literal());
        assert_eq!(message, Message::keyed_static("Resource_NotFound", "Resource not found"));

        set_active_locale(Locale::new("fr"));
        assert_eq!(message.resolve(), "Ressource introuvable");
        clear_active_locale();
        assert_eq!(message.to_string(), "Resource not found");
    }

    #[test]
    fn reset_drops_provider_and_locale() {
        let _guard = lock_config();
        install_french();
        MessageConfig::current().with_default_locale(Locale::new("de")).install();
        assert!(MessageConfig::current().has_provider());
        assert_eq!(active_locale(), Locale::new("de"));

        reset_config();

        let config = MessageConfig::current();
        assert!(!config.has_provider());
        assert_eq!(config.default_locale(), &Locale::EN);
        assert_eq!(translate("Resource_NotFound"), None);
        assert_eq!(
            Message::keyed_static("Resource_NotFound", "Resource not found").resolve(),
            "Resource not found"
        );
    }

    #[test]
    fn shared_provider_is_not_copied() {
        let shared: Arc<dyn MessageProvider> = Arc::new(StaticMessages::new().with("de", "k", "Text"));
        let config = MessageConfig::new().with_shared_provider(Arc::clone(&shared));
        assert!(config.has_provider());
        assert_eq!(Arc::strong_count(&shared), 2);

        drop(config);
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn locale_override_is_thread_local() {
        set_active_locale(Locale::new("fr"));

        let child = std::thread::spawn(|| ACTIVE_LOCALE.with(|slot| slot.borrow().clone()))
            .join()
            .expect("thread should not panic");

        assert_eq!(child, None);
        assert_eq!(active_locale(), Locale::new("fr"));
        clear_active_locale();
    }

    #[test]
    fn closures_are_providers() {
        let provider = |key: &str, locale: &Locale| {
            (locale.language() == "es" && key == "hola").then(|| "hola".to_owned())
        };
        assert_eq!(provider.resolve("hola", &Locale::new("es")).as_deref(), Some("hola"));
        assert_eq!(provider.resolve("hola", &Locale::EN), None);
    }

    #[test]
    fn config_debug_hides_provider() {
        let config = MessageConfig::new().with_provider(StaticMessages::new());
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<installed>"));
        assert!(config.has_provider());
    }
}
