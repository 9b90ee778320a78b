//! Test infrastructure for the conformance harness
//!
//! Provides scenario loading, a scripted codec, stochastic table generation
//! and tracing setup.

#![allow(dead_code)]
#![allow(unused_imports)]

mod generators;
mod harness;
mod loader;

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use generators::{Gen, GeneratedTable};
pub use harness::{run_line, run_scenario, ScenarioResult, ScriptedCodec};
pub use loader::{
    fixture_path, load_scenarios_by_name, ErrorKind, Expected, ExpectedOutcome, Response, Scenario,
    ScriptedResponses,
};

static INIT: Once = Once::new();

/// Initialize tracing for tests. `RUST_LOG` overrides the default `info`.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .init();
    });
}
