//! HTTP response and GraphQL envelope handling.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::FetchError;

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// A 200 response with a JSON body.
    pub fn json_ok(body: &Value) -> Self {
        Self::new(200, body.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Decode(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Return an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let body = self.text().unwrap_or_default();
            Err(FetchError::Http {
                status: self.status,
                body,
            })
        }
    }
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphError {
    pub message: String,
}

/// The standard GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphError>>,
}

impl GraphResponse {
    /// Any reported error fails the whole response, even alongside partial data.
    pub fn into_data(self) -> Result<Value, FetchError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(FetchError::Remote {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }
        match self.data {
            Some(Value::Null) | None => Err(FetchError::Decode(
                "Response contained no data".to_string(),
            )),
            Some(data) => Ok(data),
        }
    }
}

/// Decode an HTTP response into GraphQL `data`.
pub fn decode_response(response: HttpResponse) -> Result<Value, FetchError> {
    let envelope: GraphResponse = response.error_for_status()?.json()?;
    envelope.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_response(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, body.to_vec())
    }

    // === Status Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(401, b"").is_success());
    }

    #[test]
    fn test_error_for_status_keeps_body() {
        let err = make_response(500, b"boom").error_for_status().unwrap_err();
        match err {
            FetchError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    // === Envelope Tests ===

    #[test]
    fn test_decode_data() {
        let response =
            HttpResponse::json_ok(&json!({ "data": { "ECProducts_V1": { "items": [] } } }));
        let data = decode_response(response).unwrap();
        assert!(data.get("ECProducts_V1").is_some());
    }

    #[test]
    fn test_decode_graph_errors() {
        let response = HttpResponse::json_ok(&json!({
            "data": null,
            "errors": [{ "message": "Unknown field" }, { "message": "Other" }]
        }));
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.message(), "Unknown field");
    }

    #[test]
    fn test_decode_errors_with_location_fields() {
        let response = HttpResponse::json_ok(&json!({
            "errors": [{
                "message": "Cannot query field",
                "path": ["ECProducts_V1", 0],
                "locations": [{ "line": 2, "column": 3 }]
            }]
        }));
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.message(), "Cannot query field");
    }

    #[test]
    fn test_decode_errors_with_partial_data() {
        let response = HttpResponse::json_ok(&json!({
            "data": { "PublicImageAsset": { "items": [] } },
            "errors": [{ "message": "Partial" }]
        }));
        assert!(matches!(decode_response(response), Err(FetchError::Remote { .. })));
    }

    #[test]
    fn test_decode_empty_errors_array() {
        let response = HttpResponse::json_ok(&json!({ "data": { "x": 1 }, "errors": [] }));
        assert!(decode_response(response).is_ok());
    }

    #[test]
    fn test_decode_missing_data() {
        let response = HttpResponse::json_ok(&json!({}));
        assert!(matches!(decode_response(response), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_json() {
        let response = make_response(200, b"<html>");
        assert!(matches!(decode_response(response), Err(FetchError::Decode(_))));
    }
}
