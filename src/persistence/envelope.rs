//! Versioned JSON envelope around the stored high score

use serde::{Deserialize, Serialize};

/// Current envelope version
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub version: u32,
    pub high_score: u32,
}

impl HighScoreRecord {
    pub fn new(high_score: u32) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            high_score,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored envelope. Anything unreadable or from an unknown
    /// version decodes to `None`.
    pub fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str::<HighScoreRecord>(json) {
            Ok(record) if record.version == ENVELOPE_VERSION => Some(record),
            Ok(record) => {
                log::warn!("Ignoring high score envelope version {}", record.version);
                None
            }
            Err(e) => {
                log::warn!("Corrupt high score envelope: {}", e);
                None
            }
        }
    }
}
