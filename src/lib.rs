#![doc(test(attr(deny(warnings))))]

//! Budget Engine resolves budget period windows, aggregates matching spend and
//! builds the actual/forecast trend series that budget detail views consume.

pub mod calculator;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

pub use errors::{EngineError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Engine tracing initialized.");
    });
}
