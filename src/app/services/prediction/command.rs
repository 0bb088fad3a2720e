//! External command predictor
//!
//! The command receives a JSON [`PredictionRequest`] on stdin and must print a
//! JSON object on stdout:
//!
//! ```json
//! {"prediction_label": "high_maintenance_vehicle", "confidence": 0.72}
//! ```
//!
//! `prediction` is accepted in place of `prediction_label`, and an `error`
//! field marks the response as failed. Reading stdin is optional.

use super::predictor::Predictor;
use super::summary::PredictionRequest;
use crate::app::models::ExternalPrediction;
use crate::{Error, Result};
use serde::Deserialize;
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(alias = "prediction")]
    prediction_label: Option<String>,
    confidence: Option<f64>,
    error: Option<String>,
}

/// Runs a configured program once per request
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: String,
    args: Vec<String>,
}

impl CommandPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    async fn run(&self, payload: Vec<u8>) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::prediction_unavailable(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Programs that take their input elsewhere may exit before reading stdin;
        // their exit status and stdout still decide the outcome.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("'{}' closed stdin before reading the request", self.program);
                }
                Err(e) => {
                    return Err(Error::prediction_unavailable(format!(
                        "failed to send request: {}",
                        e
                    )));
                }
            }
        }

        let output = child.wait_with_output().await.map_err(|e| {
            Error::prediction_unavailable(format!("failed to read output: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::prediction_unavailable(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Predictor for CommandPredictor {
    fn name(&self) -> &str {
        &self.program
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<ExternalPrediction> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| Error::json("Failed to encode prediction request", e))?;
        debug!(
            "Requesting prediction for {} from '{}'",
            request.vehicle_id, self.program
        );

        let stdout = self.run(payload).await?;
        parse_prediction_output(&stdout)
    }
}

/// Parse predictor stdout into a usable prediction
///
/// The whole output is tried first, then its last non-empty line, so scripts
/// that log before answering still work.
pub fn parse_prediction_output(stdout: &str) -> Result<ExternalPrediction> {
    let trimmed = stdout.trim();
    let response: PredictionResponse = serde_json::from_str(trimmed)
        .or_else(|first_error| {
            trimmed
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .ok_or(first_error)
                .and_then(|line| serde_json::from_str(line.trim()))
        })
        .map_err(|e| Error::prediction_unavailable(format!("malformed response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(Error::prediction_unavailable(format!(
            "predictor reported: {}",
            error
        )));
    }

    let label = response
        .prediction_label
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .ok_or_else(|| Error::prediction_unavailable("response has no prediction label"))?;

    let confidence = response
        .confidence
        .filter(|c| c.is_finite() && (0.0..=1.0).contains(c))
        .ok_or_else(|| {
            Error::prediction_unavailable("response confidence missing or outside 0..1")
        })?;

    Ok(ExternalPrediction { label, confidence })
}
