//! Optional JS8 network bridge (§6): newline-delimited JSON objects of the
//! shape `{"type": string, "value": string, "params": {string: string}?}`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One newline-delimited JSON message exchanged with the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
}

/// Message types the core emits.
pub mod outgoing {
    pub const TX_SEND_MESSAGE: &str = "TX.SEND_MESSAGE";
}

/// Message types the core consumes.
pub mod incoming {
    pub const RX_DIRECTED: &str = "RX.DIRECTED";
    pub const RX_ACTIVITY: &str = "RX.ACTIVITY";
    pub const STATION_STATUS: &str = "STATION.STATUS";
}

impl BridgeMessage {
    pub fn tx_send_message(text: &str) -> Self {
        Self { kind: outgoing::TX_SEND_MESSAGE.to_string(), value: text.to_string(), params: None }
    }

    /// Serializes as one newline-delimited JSON line.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Parses a single JSON line (trailing newline optional).
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_send_message_roundtrips_through_json() {
        let msg = BridgeMessage::tx_send_message("CQ DL1ABC JO31");
        let line = msg.to_line().unwrap();
        assert!(line.ends_with('\n'));
        let parsed = BridgeMessage::from_line(&line).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn incoming_directed_message_carries_params() {
        let json = r#"{"type":"RX.DIRECTED","value":"N0YPR DL1ABC: HELLO","params":{"snr":"-5"}}"#;
        let parsed = BridgeMessage::from_line(json).unwrap();
        assert_eq!(parsed.kind, incoming::RX_DIRECTED);
        assert_eq!(parsed.params.unwrap().get("snr").unwrap(), "-5");
    }

    #[test]
    fn params_are_omitted_when_absent() {
        let msg = BridgeMessage { kind: incoming::STATION_STATUS.to_string(), value: "idle".to_string(), params: None };
        let line = msg.to_line().unwrap();
        assert!(!line.contains("params"));
    }
}
