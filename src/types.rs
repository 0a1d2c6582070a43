//! Request and response types for the compression API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TinyPngError;

/// Server-returned metadata describing a compressed image.
///
/// The embedded `output.url` is a temporary capability URL; it is the only
/// handle needed for follow-up resize and download calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub input: ImageInput,
    pub output: ImageOutput,
}

/// Size accounting for the uploaded source image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// The compressed output plus its temporary retrieval URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageOutput {
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub ratio: f64,
    #[serde(default)]
    pub url: String,
}

/// Resize modes supported by the remote service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMethod {
    #[default]
    Fit,
    Scale,
    Cover,
    Thumb,
}

impl ResizeMethod {
    /// Returns the wire name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeMethod::Fit => "fit",
            ResizeMethod::Scale => "scale",
            ResizeMethod::Cover => "cover",
            ResizeMethod::Thumb => "thumb",
        }
    }
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMethod {
    type Err = TinyPngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(ResizeMethod::Fit),
            "scale" => Ok(ResizeMethod::Scale),
            "cover" => Ok(ResizeMethod::Cover),
            "thumb" => Ok(ResizeMethod::Thumb),
            other => Err(TinyPngError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// JSON envelope sent with a resize request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResizeRequest {
    pub resize: ResizeSpec,
}

/// Target geometry for a resize, transient per call.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResizeSpec {
    pub method: ResizeMethod,
    pub width: u32,
    pub height: u32,
}

/// Error body shape returned by the service on failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_result_parses_full_body() {
        let json = r#"{
            "input": {"size": 1000, "type": "image/png"},
            "output": {"size": 500, "type": "image/png", "width": 10, "height": 10, "ratio": 0.5, "url": "https://x/1"}
        }"#;
        let result: CompressionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.input.size, 1000);
        assert_eq!(result.input.content_type.as_deref(), Some("image/png"));
        assert_eq!(result.output.size, 500);
        assert_eq!(result.output.content_type, "image/png");
        assert_eq!(result.output.width, 10);
        assert_eq!(result.output.ratio, 0.5);
        assert_eq!(result.output.url, "https://x/1");
    }

    #[test]
    fn compression_result_tolerates_missing_fields() {
        let json = r#"{"input": {"size": 1}, "output": {"size": 1, "type": "image/png", "url": "https://x/2"}}"#;
        let result: CompressionResult = serde_json::from_str(json).unwrap();
        assert!(result.input.content_type.is_none());
        assert_eq!(result.output.width, 0);
        assert_eq!(result.output.ratio, 0.0);
    }

    #[test]
    fn compression_result_garbage_is_an_error() {
        let parsed: Result<CompressionResult, _> = serde_json::from_str("not json");
        assert!(parsed.is_err());
    }

    #[test]
    fn resize_method_from_str() {
        assert_eq!("fit".parse::<ResizeMethod>().unwrap(), ResizeMethod::Fit);
        assert_eq!("COVER".parse::<ResizeMethod>().unwrap(), ResizeMethod::Cover);
        assert_eq!("Thumb".parse::<ResizeMethod>().unwrap(), ResizeMethod::Thumb);
        assert!(matches!(
            "stretch".parse::<ResizeMethod>(),
            Err(TinyPngError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn resize_method_display_matches_wire_name() {
        assert_eq!(ResizeMethod::Scale.to_string(), "scale");
        assert_eq!(ResizeMethod::default().to_string(), "fit");
    }

    #[test]
    fn resize_request_envelope() {
        let request = ResizeRequest {
            resize: ResizeSpec {
                method: ResizeMethod::Fit,
                width: 150,
                height: 100,
            },
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"resize":{"method":"fit","width":150,"height":100}}"#);
    }

    #[test]
    fn api_error_body_parses() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"BadSignature","message":"bad key"}"#).unwrap();
        assert_eq!(body.error, "BadSignature");
        assert_eq!(body.message, "bad key");
    }

    #[test]
    fn api_error_body_fields_default_to_empty() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_empty());
        assert!(body.message.is_empty());
    }
}
