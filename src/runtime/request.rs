//! Outgoing HTTP request and URL construction.

use crate::error::{Error, Result};
use bytes::Bytes;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::sync::OnceLock;
use url::Url;

/// Name of the query parameter carrying the REST API version.
pub const API_VERSION_PARAM: &str = "api-version";

/// Matches `{paramName}` placeholders in a URL path template.
static PATH_PARAM_REGEX: OnceLock<Regex> = OnceLock::new();

fn path_param_regex() -> &'static Regex {
    PATH_PARAM_REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("Invalid Regex"))
}

/// Substitute every `{name}` in `template` with its value from `params`.
///
/// Values are percent-encoded as a single path segment. A placeholder with
/// no value, or an empty value, is an error.
///
/// # Example
/// ```
/// use azure_network_arm::runtime::expand_path;
/// let path = expand_path(
///     "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}",
///     &[("subscriptionId", "sub"), ("resourceGroupName", "my rg")],
/// )
/// .unwrap();
/// assert_eq!(path, "/subscriptions/sub/resourceGroups/my%20rg");
/// ```
pub fn expand_path(template: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut path = String::with_capacity(template.len());
    let mut last = 0;
    for caps in path_param_regex().captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 always exists");
        let name = &caps[1];
        let value = params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .unwrap_or_default();
        if value.is_empty() {
            return Err(Error::EmptyParameter(name.to_string()));
        }
        path.push_str(&template[last..whole.start()]);
        path.push_str(&urlencoding::encode(value));
        last = whole.end();
    }
    path.push_str(&template[last..]);
    Ok(path)
}

/// Append `path` to the endpoint, keeping any path the endpoint already has.
pub fn join_path(endpoint: &Url, path: &str) -> Url {
    let mut url = endpoint.clone();
    let joined = format!(
        "{}/{}",
        endpoint.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

/// An HTTP request ready to go through the [`crate::runtime::Pipeline`].
///
/// The body is held as [`Bytes`] so the retry policy can resend it.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Request {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Set a query parameter, replacing any existing value with that name.
    pub fn set_query(&mut self, name: &str, value: &str) {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != name)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(name, value);
    }

    /// Value of a query parameter, if present.
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn insert_header(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub(crate) fn insert_header_value(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Ask for a JSON response.
    pub fn accept_json(&mut self) {
        self.insert_header_value(ACCEPT, HeaderValue::from_static("application/json"));
    }

    /// Serialize `body` as the JSON request body.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<()> {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialize)?;
        self.insert_header_value(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(Bytes::from(bytes));
        Ok(())
    }
}
