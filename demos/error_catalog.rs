//! Error catalog: register an application module next to the built-ins and
//! export the result as Markdown or JSON.
//!
//! Run with: cargo run --example error_catalog [markdown|json]

use verdict::messages::{self, Locale, MessageConfig, StaticMessages};
use verdict::{define_error_module, ErrorCatalog};

define_error_module! {
    /// Billing failures.
    pub mod billing(40, "Billing") {
        /// The card was declined by the issuer.
        fn card_declined, CARD_DECLINED = 1, "CardDeclined", "The card was declined.";
        fn invoice_locked, INVOICE_LOCKED = 2, "InvoiceLocked", "The invoice can no longer be changed.";
        fn currency_mismatch, CURRENCY_MISMATCH = 3, "CurrencyMismatch", "The currencies do not match.";
    }
}

// An old layout put System on prefix 10, which Concurrency owns.
define_error_module! {
    pub mod legacy_system(10, "System") {
        fn internal, INTERNAL = 1, "Internal", "An internal system error occurred.";
    }
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let mut catalog = ErrorCatalog::builtin();
    if let Err(err) = catalog.register(&billing::MODULE) {
        eprintln!("billing: {err}");
        return;
    }
    if let Err(err) = catalog.register(&legacy_system::MODULE) {
        eprintln!("refused: {err}");
    }

    match std::env::args().nth(1).as_deref() {
        Some("json") => match catalog.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("export failed: {err}"),
        },
        Some("markdown") | None => print!("{}", catalog.render_markdown()),
        Some(other) => {
            eprintln!("unknown format '{other}' (expected markdown or json)");
            return;
        }
    }

    MessageConfig::from_env()
        .with_provider(
            StaticMessages::new()
                .with("pt", "Billing_CardDeclined", "O cartão foi recusado.")
                .with("pt", "Resource_NotFound", "O recurso solicitado não foi encontrado."),
        )
        .install();

    messages::set_active_locale(Locale::new("pt-BR"));
    for code in [40001, 5001, 40002] {
        if let Some(kind) = catalog.lookup(code) {
            eprintln!("{kind}: {}", kind.create().message());
        }
    }
    messages::clear_active_locale();
}
