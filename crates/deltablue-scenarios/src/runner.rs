//! Benchmark runner.
//!
//! Runs warmup and measured rounds of every scenario and collects per-scenario
//! timings into a [`RunReport`].

use std::fmt;
use std::time::{Duration, Instant};

use deltablue_constraint::Planner;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::chain::chain_test_at;
use crate::config::ScenarioConfig;
use crate::error::ScenarioResult;
use crate::projection::projection_test_at;

/// Timings gathered for one scenario.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioTiming {
    pub runs: usize,
    pub total: Duration,
    pub fastest: Option<Duration>,
    pub slowest: Option<Duration>,
    /// Diagnostics raised by the planner in the last measured run.
    pub diagnostics: usize,
}

impl ScenarioTiming {
    fn record(&mut self, elapsed: Duration, diagnostics: usize) {
        self.runs += 1;
        self.total += elapsed;
        self.fastest = Some(self.fastest.map_or(elapsed, |d| d.min(elapsed)));
        self.slowest = Some(self.slowest.map_or(elapsed, |d| d.max(elapsed)));
        self.diagnostics = diagnostics;
    }

    pub fn mean(&self) -> Duration {
        match u32::try_from(self.runs) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(runs) => self.total / runs,
        }
    }
}

/// Result of a full benchmark run, keyed by scenario name in run order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub warmup_rounds: usize,
    pub rounds: usize,
    pub timings: IndexMap<&'static str, ScenarioTiming>,
}

impl RunReport {
    pub fn timing(&self, scenario: &str) -> Option<&ScenarioTiming> {
        self.timings.get(scenario)
    }

    pub fn total(&self) -> Duration {
        self.timings.values().map(|t| t.total).sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DeltaBlue: {} measured rounds ({} warmup)",
            self.rounds, self.warmup_rounds
        )?;
        for (name, timing) in &self.timings {
            writeln!(
                f,
                "  {:<12} mean {:>10.3?}  min {:>10.3?}  max {:>10.3?}",
                name,
                timing.mean(),
                timing.fastest.unwrap_or_default(),
                timing.slowest.unwrap_or_default(),
            )?;
        }
        write!(f, "  {:<12} {:.3?}", "total", self.total())
    }
}

type Scenario = fn(&ScenarioConfig) -> ScenarioResult<Planner>;

fn chain(config: &ScenarioConfig) -> ScenarioResult<Planner> {
    chain_test_at(config.chain_length, config.edit_strength)
}

fn projection(config: &ScenarioConfig) -> ScenarioResult<Planner> {
    projection_test_at(
        config.projection_size,
        config.edit_strength,
        config.change_repeat,
    )
}

const SCENARIOS: [(&str, Scenario); 2] = [("chain", chain), ("projection", projection)];

/// Run every scenario `warmup_rounds + rounds` times, timing the measured
/// rounds. Stops at the first scenario failure.
pub fn run(config: &ScenarioConfig) -> ScenarioResult<RunReport> {
    config.validate()?;
    info!(
        chain = config.chain_length,
        projection = config.projection_size,
        rounds = config.rounds,
        warmup = config.warmup_rounds,
        "starting benchmark"
    );

    let mut report = RunReport {
        warmup_rounds: config.warmup_rounds,
        rounds: config.rounds,
        timings: IndexMap::new(),
    };

    for round in 0..config.warmup_rounds {
        for &(name, scenario) in &SCENARIOS {
            scenario(config)?;
            debug!(round, scenario = name, "warmup done");
        }
    }

    for round in 0..config.rounds {
        for &(name, scenario) in &SCENARIOS {
            let start = Instant::now();
            let planner = scenario(config)?;
            let elapsed = start.elapsed();

            let diagnostics = planner.diagnostics().len();
            report
                .timings
                .entry(name)
                .or_default()
                .record(elapsed, diagnostics);
            debug!(round, scenario = name, ?elapsed, diagnostics, "round done");
        }
    }

    info!(total = ?report.total(), "benchmark finished");
    Ok(report)
}
