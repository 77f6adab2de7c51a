//! Instrument status reporting.

use serde::{Deserialize, Serialize};
use zenoh::Session;
use zenmon_common::Result;

/// Instrument status, published on the administrative (`@`) channel at
/// startup and shutdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentStatus {
    /// Instrument name.
    pub instrument: String,
    /// Bridge version.
    pub version: String,
    /// Current status ("running", "offline").
    pub status: String,
    /// Additional metadata.
    #[serde(flatten)]
    pub metadata: serde_json::Value,
}

impl InstrumentStatus {
    /// Create a new status with "running" state.
    pub fn running(instrument: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            version: version.into(),
            status: "running".to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Create a status with "offline" state.
    pub fn offline(instrument: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            version: version.into(),
            status: "offline".to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Add metadata to the status.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Publish this status as JSON to the given key.
    pub async fn publish(&self, session: &Session, key: &str) -> Result<()> {
        let payload = serde_json::to_vec(self)?;
        session.put(key, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_running() {
        let status = InstrumentStatus::running("vpmic0", "0.1.0");
        assert_eq!(status.instrument, "vpmic0");
        assert_eq!(status.status, "running");
    }

    #[test]
    fn test_status_with_metadata() {
        let status = InstrumentStatus::running("vpmic0", "0.1.0").with_metadata(serde_json::json!({
            "channels": 3,
            "attributes": 12,
        }));

        assert_eq!(status.metadata["channels"], 3);
        assert_eq!(status.metadata["attributes"], 12);
    }

    #[test]
    fn test_status_serialization() {
        let status = InstrumentStatus::offline("vpmic0", "0.1.0")
            .with_metadata(serde_json::json!({ "key_prefix": "zenmon/vpmic" }));

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"instrument\":\"vpmic0\""));
        assert!(json.contains("\"status\":\"offline\""));
        assert!(json.contains("\"key_prefix\":\"zenmon/vpmic\""));
    }
}
