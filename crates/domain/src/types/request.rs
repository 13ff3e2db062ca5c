//! Request descriptor
//!
//! A [`RequestDescriptor`] names one endpoint call: the HTTP shape, the path
//! relative to the base URL, and the parameters. Once handed to the client it
//! is only ever borrowed, so the auth retry replays exactly the same request.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::errors::{CaptainError, Result};

/// How parameters travel to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET with parameters in the query string
    Get,
    /// POST with parameters as a JSON document
    PostJson,
    /// POST with parameters as multipart form fields
    PostMultipart,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::PostJson => f.write_str("POST"),
            Self::PostMultipart => f.write_str("POST_DATA"),
        }
    }
}

/// Binary payload sent as one multipart field
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// File name reported in the form part
    pub file_name: String,
    /// MIME type of the part, if known
    pub content_type: Option<String>,
    /// Buffered contents, replayed as is on a retry
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// File part without a declared content type.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes: bytes.into() }
    }

    /// Declare the MIME type of the part.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A single request parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Json(Value),
    File(FilePart),
}

impl ParamValue {
    /// Text form used for query strings and multipart scalar fields.
    ///
    /// Strings are sent verbatim; every other JSON value uses its JSON text.
    fn as_text(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<FilePart> for ParamValue {
    fn from(value: FilePart) -> Self {
        Self::File(value)
    }
}

/// Multipart field produced from a descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum FormField<'a> {
    Text { name: &'a str, value: String },
    File { name: &'a str, file: &'a FilePart },
}

/// One endpoint invocation: method, path and parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    endpoint: String,
    params: BTreeMap<String, ParamValue>,
}

impl RequestDescriptor {
    /// Request with no parameters.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self { method, endpoint: endpoint.into(), params: BTreeMap::new() }
    }

    /// GET request; parameters go to the query string.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// POST request; parameters form a JSON object body.
    pub fn post_json(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::PostJson, endpoint)
    }

    /// POST request; parameters become `multipart/form-data` parts.
    pub fn post_multipart(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::PostMultipart, endpoint)
    }

    /// Add (or replace) a parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add every entry of a JSON object as a parameter.
    ///
    /// # Errors
    /// Returns `CaptainError::InvalidRequest` if `value` is not an object.
    pub fn with_json_params(mut self, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    self.params.insert(key, ParamValue::Json(value));
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(CaptainError::InvalidRequest(format!(
                "request parameters must be a JSON object, got {other}"
            ))),
        }
    }

    /// How the request is sent.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path appended to the base URL, query included.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parameters in key order.
    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    /// Parameters as ordered query pairs.
    ///
    /// # Errors
    /// Returns `CaptainError::InvalidRequest` if a file parameter is present.
    pub fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        self.params
            .iter()
            .map(|(key, value)| match value {
                ParamValue::Json(json) => Ok((key.clone(), ParamValue::as_text(json))),
                ParamValue::File(_) => Err(self.file_not_allowed(key)),
            })
            .collect()
    }

    /// Parameters as a JSON document.
    ///
    /// # Errors
    /// Returns `CaptainError::InvalidRequest` if a file parameter is present.
    pub fn json_body(&self) -> Result<Value> {
        let mut body = Map::new();
        for (key, value) in &self.params {
            match value {
                ParamValue::Json(json) => {
                    body.insert(key.clone(), json.clone());
                }
                ParamValue::File(_) => return Err(self.file_not_allowed(key)),
            }
        }
        Ok(Value::Object(body))
    }

    /// Parameters as multipart fields, in key order
    pub fn form_fields(&self) -> Vec<FormField<'_>> {
        self.params
            .iter()
            .map(|(key, value)| match value {
                ParamValue::Json(json) => {
                    FormField::Text { name: key.as_str(), value: ParamValue::as_text(json) }
                }
                ParamValue::File(file) => FormField::File { name: key.as_str(), file },
            })
            .collect()
    }

    fn file_not_allowed(&self, key: &str) -> CaptainError {
        CaptainError::InvalidRequest(format!(
            "parameter '{key}' is a file; {} {} only accepts scalar parameters",
            self.method, self.endpoint
        ))
    }
}
