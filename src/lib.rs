#![doc(test(attr(deny(warnings))))]

//! ParkQwik books a doorstep car wash from the terminal: plan, vehicle,
//! location and schedule are collected screen by screen, priced, paid for
//! through a simulated gateway and then tracked live.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("ParkQwik tracing initialized.");
    });
}
