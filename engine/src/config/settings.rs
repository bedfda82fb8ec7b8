// Engine settings: how amounts are rendered and where the progress bands sit.
// Loaded from a JSON file or embedded inside the client's app config.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::metrics::funding::ProgressBands;
use crate::presentation::CurrencyFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub currency: CurrencyFormat,
    pub progress_bands: ProgressBands,
}

impl EngineSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.currency.decimals > 6 {
            return Err(EngineError::ConfigError(format!(
                "currency decimals must be at most 6, got {}",
                self.currency.decimals
            )));
        }
        self.progress_bands.validate()
    }
}
