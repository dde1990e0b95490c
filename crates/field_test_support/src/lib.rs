//! Scenario harness for the field editing engine.
//!
//! Engine behavior that spans several events (type, paste, step) is
//! captured as TOML fixtures under `scenarios/` and replayed against the
//! pure functions in `field_core`. Fixture parsing fails loudly; behavior
//! mismatches come back as transcript-bearing reports.

mod runner;
mod scenario;

pub use runner::run_scenario;
pub use scenario::{ConfigSpec, Direction, EventSpec, Expectation, Scenario, load_scenarios,
    parse_scenario};
