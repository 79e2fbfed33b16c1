//! Registry of error modules for lookup and documentation.
//!
//! The catalog is populated explicitly: [`ErrorCatalog::builtin`] holds the
//! eleven built-in modules and applications [`register`](ErrorCatalog::register)
//! their own. Registration enforces one module per prefix and unique suffixes
//! within a module, which is what keeps every code in the catalog unique.
//!
//! ```rust
//! use verdict::{define_error_module, ErrorCatalog};
//!
//! define_error_module! {
//!     pub mod billing(40, "Billing") {
//!         fn card_declined, CARD_DECLINED = 1, "CardDeclined", "The card was declined.";
//!     }
//! }
//!
//! let mut catalog = ErrorCatalog::builtin();
//! catalog.register(&billing::MODULE).expect("prefix 40 is free");
//!
//! assert_eq!(catalog.lookup(40001), Some(&billing::CARD_DECLINED));
//! assert_eq!(catalog.lookup(5001).map(|k| k.name()), Some("NotFound"));
//! ```

use crate::codes::{self, ErrorKind, ErrorModule};
use crate::definitions::BUILTIN_MODULES;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

// ============================================================================
// Errors
// ============================================================================

/// Registration was refused because it would make codes ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Another module already owns the prefix.
    #[error("prefix {prefix} is already reserved by module '{existing}' (cannot register '{incoming}')")]
    PrefixCollision {
        /// Contested prefix.
        prefix: u16,
        /// Module holding the prefix.
        existing: &'static str,
        /// Module that was refused.
        incoming: &'static str,
    },
    /// Two kinds of one module share a suffix.
    #[error("module '{module}' declares suffix {suffix} more than once")]
    DuplicateSuffix {
        /// Offending module.
        module: &'static str,
        /// Repeated suffix.
        suffix: u16,
    },
    /// A kind's prefix differs from its module's prefix.
    #[error("kind '{kind}' has prefix {kind_prefix} but module '{module}' uses {module_prefix}")]
    PrefixMismatch {
        /// Offending module.
        module: &'static str,
        /// Offending kind.
        kind: &'static str,
        /// Prefix of the module.
        module_prefix: u16,
        /// Prefix carried by the kind.
        kind_prefix: u16,
    },
}

// ============================================================================
// Entries
// ============================================================================

/// One row of the catalog, suitable for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Full numeric code.
    pub code: u32,
    /// Module display name.
    pub module: &'static str,
    /// Module prefix.
    pub prefix: u16,
    /// Suffix inside the module.
    pub suffix: u16,
    /// Kind name.
    pub name: &'static str,
    /// Factory function name.
    pub factory: &'static str,
    /// Message lookup key.
    pub key: &'static str,
    /// English fallback text.
    pub default_message: &'static str,
    /// Message produced by the factory for the active locale.
    pub message: String,
}

impl CatalogEntry {
    fn from_kind(kind: &'static ErrorKind) -> Self {
        let error = kind.create();
        Self {
            code: kind.code(),
            module: kind.module(),
            prefix: kind.prefix(),
            suffix: kind.suffix(),
            name: kind.name(),
            factory: kind.factory_name(),
            key: kind.key(),
            default_message: kind.default_message(),
            message: error.message().into_owned(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Modules keyed by prefix.
#[derive(Debug, Clone, Default)]
pub struct ErrorCatalog {
    modules: BTreeMap<u16, &'static ErrorModule>,
}

impl ErrorCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding every built-in module.
    ///
    /// # Panics
    ///
    /// Panics if the built-in modules are inconsistent, which the governance
    /// tests in [`definitions`](crate::definitions) rule out.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for module in BUILTIN_MODULES {
            if let Err(err) = catalog.register(module) {
                panic!("built-in error modules are inconsistent: {}", err);
            }
        }
        catalog
    }

    /// Add a module.
    ///
    /// Registering the same module twice is a no-op. A different module on an
    /// occupied prefix is refused, as is a module whose kinds repeat a suffix
    /// or carry a foreign prefix.
    pub fn register(&mut self, module: &'static ErrorModule) -> Result<(), CatalogError> {
        if let Some(existing) = self.modules.get(&module.prefix()) {
            if std::ptr::eq(*existing, module) {
                return Ok(());
            }
            tracing::warn!(
                prefix = module.prefix(),
                existing = existing.name(),
                incoming = module.name(),
                "error module prefix collision"
            );
            return Err(CatalogError::PrefixCollision {
                prefix: module.prefix(),
                existing: existing.name(),
                incoming: module.name(),
            });
        }

        validate_module(module)?;

        tracing::debug!(
            module = module.name(),
            prefix = module.prefix(),
            kinds = module.kinds().len(),
            "registered error module"
        );
        self.modules.insert(module.prefix(), module);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_module(mut self, module: &'static ErrorModule) -> Result<Self, CatalogError> {
        self.register(module)?;
        Ok(self)
    }

    /// Registered modules in prefix order.
    pub fn modules(&self) -> impl Iterator<Item = &'static ErrorModule> + '_ {
        self.modules.values().copied()
    }

    /// Module owning `prefix`.
    pub fn module(&self, prefix: u16) -> Option<&'static ErrorModule> {
        self.modules.get(&prefix).copied()
    }

    /// Descriptor for a full code, e.g. `5001`.
    pub fn lookup(&self, code: u32) -> Option<&'static ErrorKind> {
        let (prefix, suffix) = codes::decompose_code(code)?;
        self.module(prefix)?.kind(suffix)
    }

    /// Every kind, ordered by prefix then declaration order.
    ///
    /// Each entry invokes its factory, so `message` reflects the active locale.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.modules()
            .flat_map(|module| module.kinds().iter().copied())
            .map(CatalogEntry::from_kind)
            .collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// True if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Pretty-printed JSON array of [`entries`](Self::entries).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries())
    }

    /// One Markdown table per module.
    pub fn write_markdown(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for (index, module) in self.modules().enumerate() {
            if index > 0 {
                out.write_char('\n')?;
            }
            writeln!(out, "## {} (prefix {})", module.name(), module.prefix())?;
            writeln!(out)?;
            writeln!(out, "| Code | Name | Factory | Key | Default message |")?;
            writeln!(out, "|---:|---|---|---|---|")?;
            for kind in module.kinds() {
                writeln!(
                    out,
                    "| {} | {} | `{}` | `{}` | {} |",
                    kind.code(),
                    kind.name(),
                    kind.factory_name(),
                    kind.key(),
                    escape_cell(kind.default_message())
                )?;
            }
        }
        Ok(())
    }

    /// [`write_markdown`](Self::write_markdown) into a new string.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out);
        out
    }
}

fn validate_module(module: &'static ErrorModule) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(module.kinds().len());
    for kind in module.kinds() {
        if kind.prefix() != module.prefix() {
            return Err(CatalogError::PrefixMismatch {
                module: module.name(),
                kind: kind.name(),
                module_prefix: module.prefix(),
                kind_prefix: kind.prefix(),
            });
        }
        if !seen.insert(kind.suffix()) {
            return Err(CatalogError::DuplicateSuffix {
                module: module.name(),
                suffix: kind.suffix(),
            });
        }
    }
    Ok(())
}

fn escape_cell(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\|"))
    } else {
        Cow::Borrowed(text)
    }
}
