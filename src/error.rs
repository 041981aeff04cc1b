//! Error types returned by every client operation.

use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Header carrying the service error code.
pub const HEADER_X_MS_ERROR_CODE: &str = "x-ms-error-code";

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required path or query parameter was empty.
    #[error("parameter {0} cannot be empty")]
    EmptyParameter(String),

    /// The service answered with an unexpected status code.
    #[error("{0}")]
    Response(Box<ResponseError>),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to deserialize response at path '{path}': {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Bearer tokens are only sent over HTTPS.
    #[error("authenticated requests are not permitted for non TLS protected (https) endpoints: {0}")]
    InsecureTransport(String),

    #[error("invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("long-running operation error: {0}")]
    Poller(String),

    #[error("invalid resume token: {0}")]
    ResumeToken(String),

    #[error("no more pages")]
    NoMorePages,

    #[error("paging error: {0}")]
    Pager(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The wrapped [`ResponseError`], when the service returned an error status.
    pub fn as_response_error(&self) -> Option<&ResponseError> {
        match self {
            Error::Response(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of a response error.
    pub fn status(&self) -> Option<StatusCode> {
        self.as_response_error().map(|e| e.status_code)
    }
}

impl From<ResponseError> for Error {
    fn from(e: ResponseError) -> Self {
        Error::Response(Box::new(e))
    }
}

/// An HTTP response whose status code the operation did not expect.
#[derive(Debug, Clone)]
pub struct ResponseError {
    /// Error code from the `x-ms-error-code` header or the error body.
    /// Empty when neither carries one.
    pub error_code: String,
    pub status_code: StatusCode,
    pub method: Method,
    pub url: Url,
    pub body: Vec<u8>,
}

impl ResponseError {
    pub fn new(
        method: Method,
        url: Url,
        status_code: StatusCode,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Self {
        let error_code = headers
            .get(HEADER_X_MS_ERROR_CODE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .filter(|c| !c.is_empty())
            .or_else(|| extract_error_code_json(body))
            .or_else(|| extract_error_code_xml(body))
            .unwrap_or_default();
        ResponseError {
            error_code,
            status_code,
            method,
            url,
            body: body.to_vec(),
        }
    }

    /// The service error payload, when the body is an ARM `CloudError`.
    pub fn cloud_error(&self) -> Option<crate::models::CloudError> {
        serde_json::from_slice(&self.body).ok()
    }

    fn url_without_query(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.to_string()
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url_without_query())?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(
            f,
            "RESPONSE {}: {}",
            self.status_code.as_u16(),
            self.status_code.canonical_reason().unwrap_or("Unknown")
        )?;
        if self.error_code.is_empty() {
            writeln!(f, "ERROR CODE UNAVAILABLE")?;
        } else {
            writeln!(f, "ERROR CODE: {}", self.error_code)?;
        }
        writeln!(f, "{SEPARATOR}")?;
        if self.body.is_empty() {
            writeln!(f, "Response contained no body")?;
        } else {
            match serde_json::from_slice::<serde_json::Value>(&self.body)
                .and_then(|v| serde_json::to_string_pretty(&v))
            {
                Ok(pretty) => writeln!(f, "{pretty}")?,
                Err(_) => writeln!(f, "{}", String::from_utf8_lossy(&self.body))?,
            }
        }
        writeln!(f, "{SEPARATOR}")
    }
}

impl std::error::Error for ResponseError {}

fn extract_error_code_json(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let inner = value
        .get("error")
        .or_else(|| value.get("odata.error"))
        .unwrap_or(&value);
    inner
        .get("code")
        .and_then(|c| c.as_str())
        .map(str::to_string)
}

static XML_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn extract_error_code_xml(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    if !text.trim_start().starts_with('<') {
        return None;
    }
    let re = XML_CODE_REGEX.get_or_init(|| {
        Regex::new(r"<(?:\w+:)?Code>([^<]*)</(?:\w+:)?Code>").expect("Invalid Regex")
    });
    re.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn fake_url() -> Url {
        Url::parse("https://fakeurl.com/the/path?qp=removed").unwrap()
    }

    fn response_error(headers: &HeaderMap, body: &str) -> ResponseError {
        ResponseError::new(
            Method::GET,
            fake_url(),
            StatusCode::INTERNAL_SERVER_ERROR,
            headers,
            body.as_bytes(),
        )
    }

    #[test]
    fn test_no_body_no_error_code() {
        let re = response_error(&HeaderMap::new(), "");
        assert_eq!(re.error_code, "");
        let want = "GET https://fakeurl.com/the/path
--------------------------------------------------------------------------------
RESPONSE 500: Internal Server Error
ERROR CODE UNAVAILABLE
--------------------------------------------------------------------------------
Response contained no body
--------------------------------------------------------------------------------
";
        assert_eq!(re.to_string(), want);
    }

    #[test]
    fn test_header_error_code_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HEADER_X_MS_ERROR_CODE,
            HeaderValue::from_static("ErrorTooManyCheats"),
        );
        let re = response_error(
            &headers,
            r#"{ "code": "ErrorItsBroken", "message": "it's not working" }"#,
        );
        assert_eq!(re.error_code, "ErrorTooManyCheats");
        let want = r#"GET https://fakeurl.com/the/path
--------------------------------------------------------------------------------
RESPONSE 500: Internal Server Error
ERROR CODE: ErrorTooManyCheats
--------------------------------------------------------------------------------
{
  "code": "ErrorItsBroken",
  "message": "it's not working"
}
--------------------------------------------------------------------------------
"#;
        assert_eq!(re.to_string(), want);
    }

    #[test]
    fn test_wrapped_error_code() {
        let re = response_error(
            &HeaderMap::new(),
            r#"{ "error": { "code": "ErrorItsBroken", "message": "it's not working" } }"#,
        );
        assert_eq!(re.error_code, "ErrorItsBroken");
        let cloud = re.cloud_error().expect("cloud error body");
        assert_eq!(
            cloud.error.and_then(|e| e.message).as_deref(),
            Some("it's not working")
        );
    }

    #[test]
    fn test_odata_error_code() {
        let re = response_error(
            &HeaderMap::new(),
            r#"{"odata.error": {"code": "ResourceNotFound", "message": {"lang": "en-us", "value": "gone"}}}"#,
        );
        assert_eq!(re.error_code, "ResourceNotFound");
    }

    #[test]
    fn test_invalid_body_printed_raw() {
        let re = response_error(&HeaderMap::new(), "JSON error string");
        assert_eq!(re.error_code, "");
        assert!(re.to_string().contains("\nJSON error string\n"));
    }

    #[test]
    fn test_xml_error_code() {
        let re = response_error(
            &HeaderMap::new(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><m:Error xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata"><m:Code>ContainerAlreadyExists</m:Code><m:Message>exists</m:Message></m:Error>"#,
        );
        assert_eq!(re.error_code, "ContainerAlreadyExists");

        let re = response_error(
            &HeaderMap::new(),
            r#"<?xml version="1.0"?><Error><Message>no code here</Message></Error>"#,
        );
        assert_eq!(re.error_code, "");
    }

    #[test]
    fn test_error_accessors() {
        let err: Error = response_error(&HeaderMap::new(), "").into();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(Error::NoMorePages.as_response_error().is_none());
        assert_eq!(
            Error::EmptyParameter("resourceGroupName".to_string()).to_string(),
            "parameter resourceGroupName cannot be empty"
        );
    }
}
