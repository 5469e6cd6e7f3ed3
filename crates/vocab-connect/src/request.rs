//! Internal request and response types for the AnkiConnect protocol.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// The request format expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, T> {
    /// The action to perform.
    pub action: &'a str,
    /// The API version (always 6).
    pub version: u8,
    /// Optional API key for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    /// Optional parameters for the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<T>,
}

impl<'a, T> AnkiRequest<'a, T> {
    /// Create a new request with parameters.
    pub fn new(action: &'a str, params: T, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: 6,
            key,
            params: Some(params),
        }
    }

    /// Create a new request without parameters.
    pub fn without_params(action: &'a str, key: Option<&'a str>) -> AnkiRequest<'a, ()> {
        AnkiRequest {
            action,
            version: 6,
            key,
            params: None,
        }
    }
}

/// A validated AnkiConnect response envelope.
///
/// AnkiConnect always answers with an object holding exactly `result` and
/// `error`. Anything else is a protocol violation.
#[derive(Debug)]
pub(crate) struct AnkiResponse {
    /// The result of the action, `null` for void actions.
    pub result: Value,
    /// The error message, if the action failed.
    pub error: Option<String>,
}

impl AnkiResponse {
    /// Validate the raw response body.
    pub fn from_value(body: Value) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(Error::Protocol("response is not a JSON object".to_string()));
        };

        if map.len() != 2 {
            return Err(Error::Protocol(format!(
                "response has an unexpected number of fields ({})",
                map.len()
            )));
        }

        let error = map
            .remove("error")
            .ok_or_else(|| Error::Protocol("response is missing required error field".to_string()))?;
        let result = map
            .remove("result")
            .ok_or_else(|| Error::Protocol("response is missing required result field".to_string()))?;

        let error = match error {
            Value::Null => None,
            Value::String(message) => Some(message),
            other => Some(other.to_string()),
        };

        Ok(Self { result, error })
    }

    /// Turn the envelope into the action's result or its error.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            None => Ok(self.result),
            Some(err) if err.contains("permission") => Err(Error::PermissionDenied),
            Some(err) => Err(Error::AnkiConnect(err)),
        }
    }
}
