use landlord_core::game::rules::RulesConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Every ordering of three seats.
pub const MAX_SEAT_PERMUTATIONS: usize = 6;
const DEFAULT_MAX_REDEALS: u32 = 3;
const DEFAULT_LATENCY_BUDGET_MS: u64 = 250;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root tournament configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub deals: DealConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_buf = path.as_ref().to_path_buf();
        let file = File::open(&path_buf).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let mut cfg: BenchmarkConfig = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.deals.validate()?;
        self.outputs.validate(&self.run_id)?;
        validate_agents(&mut self.agents)?;
        self.metrics.validate(&self.agents)?;
        if self.rules.max_bid == 0 {
            return Err(invalid("rules.max_bid", "the maximum bid must be at least 1"));
        }
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Which deals get played and how often each is replayed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub games: usize,
    #[serde(default = "default_permutations")]
    pub permutations: usize,
    /// Throw-ins tolerated per game before it is scored as void.
    #[serde(default = "default_max_redeals")]
    pub max_redeals: u32,
}

impl DealConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.games == 0 {
            return Err(invalid("deals.games", "number of games must be greater than zero"));
        }

        if self.permutations == 0 || self.permutations > MAX_SEAT_PERMUTATIONS {
            return Err(invalid(
                "deals.permutations",
                format!("permutations must be between 1 and {MAX_SEAT_PERMUTATIONS}"),
            ));
        }

        Ok(())
    }
}

fn default_permutations() -> usize {
    MAX_SEAT_PERMUTATIONS
}

fn default_max_redeals() -> u32 {
    DEFAULT_MAX_REDEALS
}

/// A tournament participant. `params` is interpreted by the runner.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(label, "path must not be empty"));
            }

            if resolve_template(run_id, value).components().count() == 0 {
                return Err(invalid(label, "resolved path is invalid"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Agent the others are compared against; defaults to the first agent.
    #[serde(default)]
    pub baseline: Option<String>,
    #[serde(default = "default_latency_budget_ms")]
    pub latency_budget_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            baseline: None,
            latency_budget_ms: DEFAULT_LATENCY_BUDGET_MS,
        }
    }
}

impl MetricsConfig {
    fn validate(&mut self, agents: &[AgentConfig]) -> Result<(), ValidationError> {
        if self.baseline.is_none() {
            self.baseline = agents.first().map(|agent| agent.name.clone());
        }

        if let Some(baseline) = self.baseline.as_ref()
            && !agents.iter().any(|agent| &agent.name == baseline)
        {
            return Err(invalid(
                "metrics.baseline",
                format!("baseline agent '{baseline}' is not defined in agents list"),
            ));
        }

        if self.latency_budget_ms == 0 {
            return Err(invalid(
                "metrics.latency_budget_ms",
                "latency budget must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn default_latency_budget_ms() -> u64 {
    DEFAULT_LATENCY_BUDGET_MS
}

/// Structured logs are off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(invalid("run_id", "run_id must not be empty"));
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(invalid(
            "run_id",
            "run_id may only contain alphanumeric characters, '.', '_' or '-'",
        ));
    }

    Ok(())
}

fn validate_agents(agents: &mut [AgentConfig]) -> Result<(), ValidationError> {
    if agents.is_empty() {
        return Err(invalid("agents", "at least one agent must be specified"));
    }

    let mut seen = HashSet::new();
    for agent in agents.iter_mut() {
        if agent.name.trim().is_empty() {
            return Err(invalid("agents.name", "agent name must not be empty"));
        }

        if !agent.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(invalid(
                format!("agents[{}].name", agent.name),
                "agent name contains invalid characters",
            ));
        }

        if !seen.insert(agent.name.clone()) {
            return Err(invalid(
                "agents",
                format!("agent name '{}' defined more than once", agent.name),
            ));
        }

        if agent.params.is_null() {
            agent.params = serde_yaml::Value::Mapping(Default::default());
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.into(),
        message: message.into(),
    }
}
