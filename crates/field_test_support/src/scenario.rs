//! Scenario file format.
//!
//! A scenario is one TOML file: an initial field state, a step
//! configuration, a list of user events, and the expected end state.
//! Malformed fixtures panic loudly with the offending path — a broken
//! fixture is a bug in the corpus, not a test failure to report politely.

use std::fs;
use std::path::{Path, PathBuf};

use field_core::StepConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    /// Initial concrete text. Mutually exclusive with `mixed`.
    #[serde(default)]
    pub value: Option<String>,
    /// Start from the mixed multi-selection state.
    #[serde(default)]
    pub mixed: bool,
    #[serde(default)]
    pub config: ConfigSpec,
    #[serde(default)]
    pub events: Vec<EventSpec>,
    pub expect: Expectation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSpec {
    pub increment_small: Option<f64>,
    pub increment_big: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub integer: Option<bool>,
}

impl ConfigSpec {
    pub fn to_config(&self) -> StepConfig {
        let defaults = StepConfig::default();
        StepConfig {
            increment_small: self.increment_small.unwrap_or(defaults.increment_small),
            increment_big: self.increment_big.unwrap_or(defaults.increment_big),
            minimum: self.minimum,
            maximum: self.maximum,
            integer: self.integer.unwrap_or(defaults.integer),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSpec {
    /// Type `text` one character at a time, each keystroke decided
    /// independently.
    Type { text: String },
    /// Paste `text` in one event.
    Paste { text: String },
    /// Press ArrowUp/ArrowDown, optionally with shift held.
    Arrow {
        direction: Direction,
        #[serde(default)]
        shift: bool,
    },
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    /// Expected final concrete text. Mutually exclusive with `mixed`.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub mixed: bool,
    /// Expected numeric interpretation (within float tolerance).
    #[serde(default)]
    pub numeric: Option<f64>,
    /// Expect the final value to be grammar-acceptable but unevaluable.
    #[serde(default)]
    pub invalid: bool,
}

/// Parse one scenario file.
pub fn parse_scenario(path: &Path) -> Scenario {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenario file {path:?}: {err}"));
    let scenario: Scenario = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("malformed scenario file {path:?}: {err}"));

    assert!(
        scenario.value.is_some() != scenario.mixed,
        "scenario {path:?} must set exactly one of `value` and `mixed = true`"
    );
    assert!(
        scenario.expect.value.is_some() != scenario.expect.mixed,
        "scenario {path:?} must expect exactly one of `value` and `mixed = true`"
    );
    scenario
}

/// Load every `*.toml` scenario under `dir`, sorted by file name.
pub fn load_scenarios(dir: &Path) -> Vec<(PathBuf, Scenario)> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read scenario dir {dir:?}: {err}"));

    let mut paths: Vec<PathBuf> = entries
        .map(|entry| entry.expect("scenario dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    assert!(!paths.is_empty(), "no scenario files found in {dir:?}");

    paths
        .into_iter()
        .map(|path| {
            let scenario = parse_scenario(&path);
            (path, scenario)
        })
        .collect()
}
