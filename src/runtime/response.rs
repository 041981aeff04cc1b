//! Buffered HTTP response.

use crate::error::{Error, ResponseError, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// A fully read HTTP response, together with the request line it answers.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    method: Method,
    url: Url,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, method: Method, url: Url) -> Self {
        Response {
            status,
            headers,
            body,
            method,
            url,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL of the request that produced this response.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn has_status_code(&self, codes: &[u16]) -> bool {
        codes.contains(&self.status.as_u16())
    }

    /// Decode the JSON body, reporting the path of the failing field.
    ///
    /// An empty body decodes as `null`, which suits `Option` and unit types.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        let de = &mut serde_json::Deserializer::from_slice(body);
        serde_path_to_error::deserialize(de).map_err(|err| Error::Deserialize {
            path: err.path().to_string(),
            source: err.into_inner(),
        })
    }

    /// Turn this response into an [`Error::Response`].
    pub fn into_error(self) -> Error {
        ResponseError::new(self.method, self.url, self.status, &self.headers, &self.body).into()
    }

    /// Keep the response when its status is one of `codes`, fail otherwise.
    pub fn expect_status(self, codes: &[u16]) -> Result<Self> {
        if self.has_status_code(codes) {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn response(status: u16, body: &str) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Method::GET,
            Url::parse("https://management.azure.com/x?api-version=1").unwrap(),
        )
    }

    #[derive(Deserialize, Debug)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    #[derive(Deserialize, Debug)]
    struct Inner {
        #[allow(dead_code)]
        count: u32,
    }

    #[test]
    fn test_json_reports_path() {
        let err = response(200, r#"{"inner": {"count": "three"}}"#)
            .json::<Outer>()
            .unwrap_err();
        match err {
            Error::Deserialize { path, .. } => assert_eq!(path, "inner.count"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_is_null() {
        let value: Option<Inner> = response(204, "").json().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_expect_status() {
        assert!(response(200, "{}").expect_status(&[200, 201]).is_ok());
        let err = response(404, r#"{"error":{"code":"NotFound"}}"#)
            .expect_status(&[200])
            .unwrap_err();
        let re = err.as_response_error().expect("response error");
        assert_eq!(re.error_code, "NotFound");
        assert_eq!(re.status_code, StatusCode::NOT_FOUND);
    }
}
