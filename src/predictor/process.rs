//! External predictor process
//!
//! Spawns the configured program, pipes one JSON request into it and reads
//! one JSON response back. The whole exchange is raced against the configured
//! timeout; a process that overruns is killed.

use std::io;
use std::process::{ExitStatus, Stdio};

use chrono::Utc;
use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::common::traits::{PredictionFuture, RiskPredictor};
use crate::config::PredictorConfig;
use crate::error::util::require_artifacts;
use crate::error::{FrailtyError, Result};
use crate::models::PatientClinicalProfile;
use crate::predictor::contract::{PredictorRequest, PredictorResponse};

/// Raw result of a finished predictor process
#[derive(Debug)]
struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Client for the external model predictor
#[derive(Debug, Clone)]
pub struct ExternalPredictor {
    config: PredictorConfig,
}

impl ExternalPredictor {
    #[must_use]
    pub const fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Check that every model artifact is in place
    pub fn check_artifacts(&self) -> Result<()> {
        require_artifacts(
            &self.config.resolved_model_dir(),
            &self.config.required_artifacts,
        )
        .map(|_| ())
    }

    /// Run the predictor once for `request`
    ///
    /// # Errors
    /// Spawn failures, I/O errors, timeouts, non-zero exits and output that
    /// does not parse as a response.
    pub async fn invoke(&self, request: &PredictorRequest) -> Result<PredictorResponse> {
        let input = serde_json::to_vec(request)?;
        let mut child = self.spawn()?;

        let outcome = tokio::time::timeout(self.config.timeout, exchange(&mut child, input)).await;

        let output = match outcome {
            Ok(result) => result?,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed-out predictor process: {e}");
                }
                return Err(FrailtyError::Timeout(self.config.timeout));
            }
        };

        if !output.status.success() {
            return Err(FrailtyError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !output.stderr.is_empty() {
            debug!(
                "Predictor stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        PredictorResponse::parse(&String::from_utf8_lossy(&output.stdout))
    }

    fn spawn(&self) -> Result<Child> {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        command.spawn().map_err(|source| FrailtyError::Spawn {
            program: self.config.program.clone(),
            source,
        })
    }
}

/// Feed `input` to the child and collect its output until it exits
async fn exchange(child: &mut Child, input: Vec<u8>) -> Result<ProcessOutput> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("predictor stdin was not captured"))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("predictor stdout was not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("predictor stderr was not captured"))?;

    let write = async move {
        let written = match stdin.write_all(&input).await {
            Ok(()) => stdin.shutdown().await,
            Err(e) => Err(e),
        };
        match written {
            // The predictor may exit without reading its input
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    };
    let read_stdout = async move {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    };
    let read_stderr = async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    };

    let ((), stdout, stderr) = tokio::try_join!(write, read_stdout, read_stderr)?;
    let status = child.wait().await?;

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}

impl RiskPredictor for ExternalPredictor {
    fn predict<'a>(&'a self, profile: &'a PatientClinicalProfile) -> PredictionFuture<'a> {
        Box::pin(async move {
            self.check_artifacts()?;
            let request = PredictorRequest::from(profile);
            let response = self.invoke(&request).await?;
            response.into_assessment(Utc::now())
        })
    }

    fn describe(&self) -> String {
        format!("{} {}", self.config.program, self.config.args.join(" "))
    }
}
