//! Predictor trait and the predictor selected from configuration

use super::command::CommandPredictor;
use super::summary::PredictionRequest;
use crate::app::models::ExternalPrediction;
use crate::config::PredictionConfig;
use crate::{Error, Result};
use std::future::Future;

/// Source of an optional label describing the vehicle
///
/// Implementations make a single attempt. Timeouts are applied by the caller.
pub trait Predictor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether calling [`Predictor::predict`] can ever succeed
    fn is_enabled(&self) -> bool {
        true
    }

    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<ExternalPrediction>> + Send;
}

/// Predictor used when no external command is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPredictor;

impl Predictor for DisabledPredictor {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn predict(&self, _request: &PredictionRequest) -> Result<ExternalPrediction> {
        Err(Error::prediction_unavailable("external prediction is disabled"))
    }
}

/// Predictor chosen at runtime from [`PredictionConfig`]
#[derive(Debug, Clone)]
pub enum ConfiguredPredictor {
    Command(CommandPredictor),
    Disabled(DisabledPredictor),
}

impl ConfiguredPredictor {
    pub fn from_config(config: &PredictionConfig) -> Self {
        match (&config.command, config.enabled) {
            (Some(program), true) => {
                Self::Command(CommandPredictor::new(program.clone(), config.args.clone()))
            }
            _ => Self::Disabled(DisabledPredictor),
        }
    }
}

impl Predictor for ConfiguredPredictor {
    fn name(&self) -> &str {
        match self {
            Self::Command(predictor) => predictor.name(),
            Self::Disabled(predictor) => predictor.name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::Command(predictor) => predictor.is_enabled(),
            Self::Disabled(predictor) => predictor.is_enabled(),
        }
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<ExternalPrediction> {
        match self {
            Self::Command(predictor) => predictor.predict(request).await,
            Self::Disabled(predictor) => predictor.predict(request).await,
        }
    }
}
