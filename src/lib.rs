#![doc(test(attr(deny(warnings))))]

//! Expense Core offers the aggregation, reporting, and export primitives
//! behind a shared expense-tracking assistant. The chat transport, the
//! conversational entry flow, and the weekly timer live outside this crate
//! and talk to it through the service layer.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod report;
pub mod store;

pub use errors::{ExpenseError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
