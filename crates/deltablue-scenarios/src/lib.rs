//! DeltaBlue benchmark scenarios.
//!
//! This crate drives the planner through the two classic workloads:
//! - A chain of required equalities edited from its head
//! - A projection of sources onto destinations through a shared scale and offset
//!
//! and times them with a small configurable runner.

pub mod chain;
pub mod config;
pub mod edit;
pub mod error;
pub mod projection;
pub mod runner;

pub use chain::{chain_test, chain_test_at, CHAIN_STEPS};
pub use config::{ConfigError, ScenarioConfig};
pub use edit::{change, change_at};
pub use error::{ScenarioError, ScenarioResult};
pub use projection::{projection_test, projection_test_at, Projection};
pub use runner::{run, RunReport, ScenarioTiming};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for the `deltablue` binary.
///
/// `RUST_LOG` overrides the default filter, which is `info` for the scenario
/// driver and `warn` for the planner and everything else.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,deltablue_scenarios=info"));

    // A subscriber installed by an embedding process wins.
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
