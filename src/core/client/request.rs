//! Upstream request description.

use reqwest::Url;

use super::{ApiError, ApiResult};

/// A GET request against the researcher API, relative to the base URL.
///
/// Path segments are kept unescaped here and percent-encoded when the final
/// URL is built, so ids supplied by the caller can never inject extra path
/// components or query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Create a request for the given path segments, e.g. `["v1", "programs"]`.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<T: ToString>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Unencoded path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Path plus `?query` when there is one, for logging.
    pub fn target(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.path()
        } else {
            format!("{}?{}", self.path(), query)
        }
    }

    /// Form-encoded query string (without the leading `?`).
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(&self.query).unwrap_or_default()
    }

    /// Resolve this request against `base`.
    pub fn url(&self, base: &Url) -> ApiResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .extend(self.segments.iter());

        if !self.query.is_empty() {
            url.set_query(Some(&self.query_string()));
        }

        Ok(url)
    }
}
