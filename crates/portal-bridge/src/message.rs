//! Bridge message types.
//!
//! Messages flow in both directions as `{"type": "<tag>", "data": {...}}`:
//! - **Page -> host**: parsed into an [`Envelope`], then narrowed into the
//!   closed [`BridgeRequest`] enum. Anything else is rejected.
//! - **Host -> page**: a [`BridgeResponse`] serialized with the same shape.
//!
//! There is no request id; a reply answers whichever request of its kind
//! the page sent last.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use portal_common::BridgeError;

use crate::capability::LocalNotification;

/// Wire tags for inbound requests.
pub mod tags {
    pub const NOTIFICATION: &str = "notification";
    pub const FILE_PICKER: &str = "file-picker";
    pub const CAMERA: &str = "camera";
    pub const GALLERY: &str = "gallery";
    pub const LOCATION: &str = "location";
    pub const CONSOLE_LOG: &str = "console-log";
}

/// Title used when a notification request omits one.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Notification";

/// The raw `{type, data}` envelope, before the tag is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse an envelope from a raw JSON string (from the page's postMessage).
    ///
    /// Only a JSON object is an envelope; arrays are not read positionally.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        let object: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }
}

/// Severity of a forwarded `console.*` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Log,
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleLevel {
    fn parse(level: &str) -> Self {
        match level {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Log,
        }
    }
}

/// A request from the page, one variant per recognized tag.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    Notification(LocalNotification),
    FilePicker,
    Camera,
    Gallery,
    Location,
    ConsoleLog { level: ConsoleLevel, message: String },
}

impl BridgeRequest {
    /// The wire tag this request arrived with.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Notification(_) => tags::NOTIFICATION,
            Self::FilePicker => tags::FILE_PICKER,
            Self::Camera => tags::CAMERA,
            Self::Gallery => tags::GALLERY,
            Self::Location => tags::LOCATION,
            Self::ConsoleLog { .. } => tags::CONSOLE_LOG,
        }
    }
}

impl TryFrom<Envelope> for BridgeRequest {
    type Error = BridgeError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        let request = match envelope.kind.as_str() {
            tags::NOTIFICATION => Self::Notification(LocalNotification {
                title: envelope
                    .field_str("title")
                    .unwrap_or(DEFAULT_NOTIFICATION_TITLE)
                    .to_string(),
                body: envelope.field_str("body").unwrap_or_default().to_string(),
            }),
            tags::FILE_PICKER => Self::FilePicker,
            tags::CAMERA => Self::Camera,
            tags::GALLERY => Self::Gallery,
            tags::LOCATION => Self::Location,
            tags::CONSOLE_LOG => {
                let level = ConsoleLevel::parse(envelope.field_str("level").unwrap_or("log"));
                let message = match &envelope.data {
                    Some(Value::String(text)) => text.clone(),
                    Some(data) => match data.get("message") {
                        Some(Value::String(text)) => text.clone(),
                        Some(other) => other.to_string(),
                        None => data.to_string(),
                    },
                    None => String::new(),
                };
                Self::ConsoleLog { level, message }
            }
            _ => return Err(BridgeError::UnknownType(envelope.kind)),
        };
        Ok(request)
    }
}

/// Parse a raw inbound string straight into a typed request.
pub fn parse_request(raw: &str) -> Result<BridgeRequest, BridgeError> {
    BridgeRequest::try_from(Envelope::from_json(raw)?)
}

/// Descriptor for a captured image or picked file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// `file://` URI of the (possibly cached) file.
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A single position fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, when the source reports one.
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A reply posted back into the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum BridgeResponse {
    Location(LocationFix),
    LocationError { message: String },
    ImageCaptured(Asset),
    ImageSelected(Asset),
    FileSelected(Asset),
}

impl BridgeResponse {
    /// The wire tag of this reply.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::LocationError { .. } => "location-error",
            Self::ImageCaptured(_) => "image-captured",
            Self::ImageSelected(_) => "image-selected",
            Self::FileSelected(_) => "file-selected",
        }
    }

    /// Serialize to the JSON string handed to the page.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_notification_with_data() {
        let req = parse_request(r#"{"type":"notification","data":{"title":"T","body":"B"}}"#)
            .unwrap();
        assert_eq!(
            req,
            BridgeRequest::Notification(LocalNotification {
                title: "T".into(),
                body: "B".into(),
            })
        );
    }

    #[test]
    fn notification_without_data_uses_defaults() {
        let req = parse_request(r#"{"type":"notification"}"#).unwrap();
        assert_eq!(
            req,
            BridgeRequest::Notification(LocalNotification {
                title: "Notification".into(),
                body: String::new(),
            })
        );
    }

    #[test]
    fn notification_with_non_string_fields_uses_defaults() {
        let req = parse_request(r#"{"type":"notification","data":{"title":42,"body":null}}"#)
            .unwrap();
        let BridgeRequest::Notification(n) = req else {
            panic!("expected notification");
        };
        assert_eq!(n.title, "Notification");
        assert_eq!(n.body, "");
    }

    #[test]
    fn parses_capability_tags() {
        assert_eq!(parse_request(r#"{"type":"camera"}"#).unwrap(), BridgeRequest::Camera);
        assert_eq!(parse_request(r#"{"type":"gallery"}"#).unwrap(), BridgeRequest::Gallery);
        assert_eq!(
            parse_request(r#"{"type":"file-picker","data":null}"#).unwrap(),
            BridgeRequest::FilePicker
        );
        assert_eq!(
            parse_request(r#"{"type":"location","data":{"ignored":true}}"#).unwrap(),
            BridgeRequest::Location
        );
    }

    #[test]
    fn console_log_variants() {
        let req = parse_request(r#"{"type":"console-log","data":{"level":"warn","message":"careful"}}"#)
            .unwrap();
        assert_eq!(
            req,
            BridgeRequest::ConsoleLog {
                level: ConsoleLevel::Warn,
                message: "careful".into()
            }
        );

        let req = parse_request(r#"{"type":"console-log","data":"plain"}"#).unwrap();
        assert_eq!(
            req,
            BridgeRequest::ConsoleLog {
                level: ConsoleLevel::Log,
                message: "plain".into()
            }
        );

        let req = parse_request(r#"{"type":"console-log","data":{"message":[1,2]}}"#).unwrap();
        assert_eq!(
            req,
            BridgeRequest::ConsoleLog {
                level: ConsoleLevel::Log,
                message: "[1,2]".into()
            }
        );
    }

    #[test]
    fn unknown_and_response_only_tags_are_rejected() {
        for raw in [
            r#"{"type":"teleport"}"#,
            r#"{"type":"image-captured","data":{"uri":"file:///x"}}"#,
            r#"{"type":"location-error"}"#,
            r#"{"type":"CAMERA"}"#,
        ] {
            assert!(
                matches!(parse_request(raw), Err(BridgeError::UnknownType(_))),
                "{raw} should be unknown"
            );
        }
    }

    #[test]
    fn malformed_input_is_rejected() {
        for raw in [
            "",
            "not json",
            "{",
            "[]",
            "42",
            r#"{"data":{}}"#,
            r#"{"type":7}"#,
            r#"["camera"]"#,
            r#"["notification",{}]"#,
        ] {
            assert!(
                matches!(parse_request(raw), Err(BridgeError::Malformed(_))),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn request_kind_matches_wire_tag() {
        assert_eq!(BridgeRequest::FilePicker.kind(), "file-picker");
        assert_eq!(BridgeRequest::Location.kind(), "location");
    }

    #[test]
    fn location_response_shape() {
        let reply = BridgeResponse::Location(LocationFix {
            latitude: 52.5,
            longitude: 13.4,
            accuracy: Some(12.0),
            altitude: None,
            timestamp: 1_700_000_000_000,
        });
        let value: Value = serde_json::from_str(&reply.to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "location",
                "data": {
                    "latitude": 52.5,
                    "longitude": 13.4,
                    "accuracy": 12.0,
                    "timestamp": 1_700_000_000_000i64
                }
            })
        );
    }

    #[test]
    fn location_error_shape() {
        let reply = BridgeResponse::LocationError {
            message: "Location permission denied".into(),
        };
        let value: Value = serde_json::from_str(&reply.to_json()).unwrap();
        assert_eq!(value["type"], "location-error");
        assert_eq!(value["data"]["message"], "Location permission denied");
        assert_eq!(reply.kind(), "location-error");
    }

    #[test]
    fn asset_response_uses_camel_case_and_skips_missing() {
        let reply = BridgeResponse::FileSelected(Asset {
            uri: "file:///tmp/report.pdf".into(),
            name: Some("report.pdf".into()),
            mime_type: Some("application/pdf".into()),
            size: Some(2048),
            width: None,
            height: None,
        });
        let value: Value = serde_json::from_str(&reply.to_json()).unwrap();
        assert_eq!(value["type"], "file-selected");
        assert_eq!(value["data"]["mimeType"], "application/pdf");
        assert!(value["data"].get("width").is_none());
    }
}
