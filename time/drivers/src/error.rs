// Licensed under the Apache-2.0 license

use thiserror_no_std::Error;

use crate::calibration::InitStage;

/// Boot-time failures of the time subsystem.
///
/// Every variant is fatal for the platform: there is no fallback clock, so
/// the host is expected to abort boot when it sees one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    #[error("counter frequency register reads zero")]
    ZeroFrequency,
    #[error("zero multiplier while entering {stage:?}")]
    DegenerateScale { stage: InitStage },
    #[error("timer already initialized on this core")]
    AlreadyInitialized,
    #[error("timer used before time_init")]
    NotInitialized,
}

pub type TimeResult<T> = Result<T, TimeError>;

impl TimeError {
    /// The init stage that could not be entered, for calibration failures.
    pub fn stage(&self) -> Option<InitStage> {
        match self {
            TimeError::ZeroFrequency => Some(InitStage::TickToNsCalibrated),
            TimeError::DegenerateScale { stage } => Some(*stage),
            _ => None,
        }
    }
}
