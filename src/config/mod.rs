//! Configuration for the external frailty predictor.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::util::read_to_string_with_context;
use crate::error::{FrailtyError, Result};

/// Hard ceiling on a single predictor invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Files the predictor needs in its model directory
pub const DEFAULT_ARTIFACTS: [&str; 3] = ["model.pkl", "scaler.pkl", "model_metadata.json"];

/// Configuration for the external predictor process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictorConfig {
    /// Whether to try the external predictor at all
    pub enabled: bool,
    /// Program to run
    pub program: String,
    /// Arguments passed to the program, typically the prediction script
    pub args: Vec<String>,
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,
    /// Artifact file names that must exist in `model_dir`
    pub required_artifacts: Vec<String>,
    /// Working directory for the process; inherited when unset
    pub working_dir: Option<PathBuf>,
    /// Maximum time to wait for the process
    #[serde(rename = "timeoutMs", with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "python3".to_string(),
            args: vec!["predict_frailty.py".to_string()],
            model_dir: PathBuf::from("ml_models"),
            required_artifacts: DEFAULT_ARTIFACTS.iter().map(ToString::to_string).collect(),
            working_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PredictorConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never calls the external predictor
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the program and its arguments
    #[must_use]
    pub fn with_command(mut self, program: &str, args: &[&str]) -> Self {
        self.program = program.to_string();
        self.args = args.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the model directory
    #[must_use]
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }

    /// Replace the list of required artifacts
    #[must_use]
    pub fn with_required_artifacts(mut self, artifacts: &[&str]) -> Self {
        self.required_artifacts = artifacts.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the process working directory
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the invocation timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_to_string_with_context(path, "predictor config")?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| FrailtyError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `FRAILTY_*` environment variables on the defaults
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` on this configuration
    ///
    /// Recognized keys: `FRAILTY_PREDICTOR_PROGRAM`, `FRAILTY_PREDICTOR_SCRIPT`,
    /// `FRAILTY_MODEL_DIR`, `FRAILTY_PREDICTOR_TIMEOUT_MS` and
    /// `FRAILTY_PREDICTOR_DISABLED`.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(program) = lookup("FRAILTY_PREDICTOR_PROGRAM") {
            self.program = program;
        }
        if let Some(script) = lookup("FRAILTY_PREDICTOR_SCRIPT") {
            self.args = vec![script];
        }
        if let Some(dir) = lookup("FRAILTY_MODEL_DIR") {
            self.model_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup("FRAILTY_PREDICTOR_TIMEOUT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                FrailtyError::config(format!("FRAILTY_PREDICTOR_TIMEOUT_MS is not a number: {ms}"))
            })?;
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(flag) = lookup("FRAILTY_PREDICTOR_DISABLED") {
            self.enabled = !parse_flag(&flag)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(FrailtyError::config("Predictor program must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(FrailtyError::config("Predictor timeout must be positive"));
        }
        Ok(())
    }

    /// Full path of the model directory, resolved against the working directory
    #[must_use]
    pub fn resolved_model_dir(&self) -> PathBuf {
        match &self.working_dir {
            Some(cwd) if self.model_dir.is_relative() => cwd.join(&self.model_dir),
            _ => self.model_dir.clone(),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(FrailtyError::config(format!("Not a boolean flag: {other}"))),
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
