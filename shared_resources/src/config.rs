use std::fs;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ElevatorSection {
    pub num_elevators: usize,
    pub min_floor: i32,
    pub max_floor: i32,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct TimingSection {
    pub tick_ms: u64,
    pub door_dwell_ms: u64,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct SchedulingSection {
    pub strategy: StrategyKind,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub elevator: ElevatorSection,
    pub timing: TimingSection,
    pub scheduling: SchedulingSection,
    #[serde(default = "default_runtime_s")]
    pub runtime_s: u64,
}

fn default_runtime_s() -> u64 {
    10
}

/// Which scheduling policy the dispatcher starts with.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    FirstAvailable,
    LeastCost,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_available" | "fcfs" => Ok(StrategyKind::FirstAvailable),
            "least_cost" | "scan" => Ok(StrategyKind::LeastCost),
            other => Err(ConfigError::Invalid(format!("unknown strategy {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSettings {
    pub min_floor: i32,
    pub max_floor: i32,
    pub tick: Duration,
    pub door_dwell: Duration,
}

impl ElevatorSettings {
    pub fn new(min_floor: i32, max_floor: i32) -> Self {
        ElevatorSettings {
            min_floor: min_floor,
            max_floor: max_floor,
            ..ElevatorSettings::default()
        }
    }

    /// Zero tick and zero dwell, for driving elevators step by step.
    pub fn instant(min_floor: i32, max_floor: i32) -> Self {
        ElevatorSettings {
            min_floor: min_floor,
            max_floor: max_floor,
            tick: Duration::ZERO,
            door_dwell: Duration::ZERO,
        }
    }

    pub fn contains(&self, floor: i32) -> bool {
        floor >= self.min_floor && floor <= self.max_floor
    }

    pub fn span(&self) -> i64 {
        i64::from(self.max_floor) - i64::from(self.min_floor)
    }
}

impl Default for ElevatorSettings {
    fn default() -> Self {
        ElevatorSettings {
            min_floor: 0,
            max_floor: 10,
            tick: Duration::from_millis(1000),
            door_dwell: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BankConfig {
    pub num_elevators: usize,
    pub elevator: ElevatorSettings,
    pub strategy: StrategyKind,
    pub runtime: Duration,
}

impl BankConfig {
    /// Reads `config.json`, falling back to `_config.json`, then applies
    /// command line overrides.
    pub fn get() -> Result<Self, ConfigError> {
        let config_file = read_config_file()?;
        let mut config = BankConfig::from(config_file);
        let args: Vec<String> = env::args().skip(1).collect();
        config.apply_args(&args);
        config.validate()?;
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(contents)?;
        let config = BankConfig::from(config_file);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_elevators == 0 {
            return Err(ConfigError::Invalid(String::from("num_elevators must be at least 1")));
        }
        if self.elevator.min_floor > self.elevator.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                self.elevator.min_floor, self.elevator.max_floor
            )));
        }
        Ok(())
    }

    /// Applies `--elevators`, `--strategy` and `--runtime` pairs. Malformed
    /// pairs are reported and skipped.
    pub fn apply_args(&mut self, args: &[String]) {
        for arg_pair in args.chunks_exact(2) {
            match arg_pair[0].as_str() {
                "--elevators" => match arg_pair[1].parse::<usize>() {
                    Ok(num) => self.num_elevators = num,
                    Err(_) => warn!("elevators {} is not a number, skipping...", arg_pair[1]),
                },
                "--strategy" => match arg_pair[1].parse::<StrategyKind>() {
                    Ok(strategy) => self.strategy = strategy,
                    Err(e) => warn!("{}, skipping...", e),
                },
                "--runtime" => match arg_pair[1].parse::<u64>() {
                    Ok(secs) => self.runtime = Duration::from_secs(secs),
                    Err(_) => warn!("runtime {} is not a number, skipping...", arg_pair[1]),
                },
                _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
            }
        }
        if args.len() % 2 == 1 {
            warn!("argument {} has no value, skipping...", args[args.len() - 1]);
        }
    }
}

impl From<ConfigFile> for BankConfig {
    fn from(config_file: ConfigFile) -> Self {
        BankConfig {
            num_elevators: config_file.elevator.num_elevators,
            elevator: ElevatorSettings {
                min_floor: config_file.elevator.min_floor,
                max_floor: config_file.elevator.max_floor,
                tick: Duration::from_millis(config_file.timing.tick_ms),
                door_dwell: Duration::from_millis(config_file.timing.door_dwell_ms),
            },
            strategy: config_file.scheduling.strategy,
            runtime: Duration::from_secs(config_file.runtime_s),
        }
    }
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    let config_contents = match fs::read_to_string(CONFIG_FILE_PATH) {
        Ok(content) => content,
        Err(_) => {
            info!("No configuration file provided, using default settings...");
            fs::read_to_string(FALLBACK_CONFIG_FILE_PATH).map_err(|source| ConfigError::Read {
                path: FALLBACK_CONFIG_FILE_PATH.to_string(),
                source: source,
            })?
        },
    };
    Ok(serde_json::from_str(&config_contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "elevator": { "num_elevators": 2, "min_floor": 0, "max_floor": 10 },
        "timing": { "tick_ms": 1000, "door_dwell_ms": 500 },
        "scheduling": { "strategy": "least_cost" }
    }"#;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_config_file() {
        let config = BankConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.num_elevators, 2);
        assert_eq!(config.elevator.min_floor, 0);
        assert_eq!(config.elevator.max_floor, 10);
        assert_eq!(config.elevator.door_dwell, Duration::from_millis(500));
        assert_eq!(config.strategy, StrategyKind::LeastCost);
        assert_eq!(config.runtime, Duration::from_secs(10));
    }

    #[test]
    fn rejects_inverted_floor_range() {
        let contents = SAMPLE.replace("\"min_floor\": 0", "\"min_floor\": 11");
        assert!(matches!(BankConfig::parse(&contents), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_fleet() {
        let contents = SAMPLE.replace("\"num_elevators\": 2", "\"num_elevators\": 0");
        assert!(matches!(BankConfig::parse(&contents), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_strategy_in_file() {
        let contents = SAMPLE.replace("least_cost", "random");
        assert!(matches!(BankConfig::parse(&contents), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut config = BankConfig::parse(SAMPLE).unwrap();
        config.apply_args(&args(&["--elevators", "4", "--strategy", "fcfs", "--runtime", "3"]));
        assert_eq!(config.num_elevators, 4);
        assert_eq!(config.strategy, StrategyKind::FirstAvailable);
        assert_eq!(config.runtime, Duration::from_secs(3));
    }

    #[test]
    fn malformed_arguments_are_skipped() {
        let mut config = BankConfig::parse(SAMPLE).unwrap();
        config.apply_args(&args(&["--elevators", "many", "--colour", "red", "--strategy"]));
        assert_eq!(config.num_elevators, 2);
        assert_eq!(config.strategy, StrategyKind::LeastCost);
    }

    #[test]
    fn floor_range_is_inclusive() {
        let settings = ElevatorSettings::new(-1, 3);
        assert!(settings.contains(-1));
        assert!(settings.contains(3));
        assert!(!settings.contains(4));
        assert_eq!(settings.span(), 4);
    }
}
