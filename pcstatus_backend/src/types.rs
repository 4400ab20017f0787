//! Data types sent to the dashboard client.
//! Keep this module minimal and stable — it defines the wire format.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Current time as an ISO-8601 UTC string, e.g. `2026-08-23T10:15:30.123456+00:00`.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[derive(Debug, Serialize, Clone)]
pub struct PingResponse {
    pub status: &'static str,
    #[serde(rename = "serverTime")]
    pub server_time: String,
    #[serde(rename = "latencyMs")]
    pub latency_ms: u64,
}

#[derive(Debug, Serialize, Clone)]
pub struct CpuResponse {
    #[serde(rename = "usagePercent")]
    pub usage_percent: f32,
    #[serde(rename = "capturedAt")]
    pub captured_at: String,
}

/// Body of a 5xx produced by an injected failure.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
}

/// Messages pushed over the memory stream, tagged by `type`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Welcome {
        #[serde(rename = "serverTime")]
        server_time: String,
    },
    Data {
        #[serde(rename = "usagePercent")]
        usage_percent: f32,
        #[serde(rename = "usedMB")]
        used_mb: u64,
        #[serde(rename = "totalMB")]
        total_mb: u64,
        #[serde(rename = "capturedAt")]
        captured_at: String,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ping_response_field_names() {
        let v = serde_json::to_value(PingResponse {
            status: "OK",
            server_time: "t".into(),
            latency_ms: 3,
        })
        .unwrap();
        assert_eq!(v, json!({"status": "OK", "serverTime": "t", "latencyMs": 3}));
    }

    #[test]
    fn cpu_response_field_names() {
        let v = serde_json::to_value(CpuResponse {
            usage_percent: 12.5,
            captured_at: "t".into(),
        })
        .unwrap();
        assert_eq!(v, json!({"usagePercent": 12.5, "capturedAt": "t"}));
    }

    #[test]
    fn stream_messages_are_type_tagged() {
        let welcome = serde_json::to_value(StreamMessage::Welcome {
            server_time: "t".into(),
        })
        .unwrap();
        assert_eq!(welcome, json!({"type": "welcome", "serverTime": "t"}));

        let data = serde_json::to_value(StreamMessage::Data {
            usage_percent: 42.0,
            used_mb: 4096,
            total_mb: 8192,
            captured_at: "t".into(),
        })
        .unwrap();
        assert_eq!(
            data,
            json!({
                "type": "data",
                "usagePercent": 42.0,
                "usedMB": 4096,
                "totalMB": 8192,
                "capturedAt": "t"
            })
        );

        let err = serde_json::to_value(StreamMessage::Error {
            message: "boom".into(),
        })
        .unwrap();
        assert_eq!(err, json!({"type": "error", "message": "boom"}));
    }

    #[test]
    fn iso_now_is_utc() {
        let ts = iso_now();
        assert!(ts.ends_with("+00:00"), "not UTC: {ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
