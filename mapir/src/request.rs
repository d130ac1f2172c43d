//! Construction of outgoing API requests.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};

use crate::config::AccessToken;
use crate::error::MapirError;

/// Host of the map.ir API.
pub const DEFAULT_HOST: &str = "map.ir";
/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Header carrying the access token.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameters of a request.
///
/// Parameters are written into the query string in the order they were first inserted.
///
/// ```
/// use mapir::QueryParams;
///
/// let params = QueryParams::new().with("lat", "35.7").with("lon", "51.4").with("lat", "35.8");
/// assert_eq!(params.get("lat"), Some("35.8"));
/// assert_eq!(params.iter().next(), Some(("lat", "35.8")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of the parameter. If the parameter is already set, its value is replaced
    /// keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Adds one more value for the parameter, even if it is already set.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Builder-style version of [`QueryParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the first value of the parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }

        params
    }
}

/// Value of the `User-Agent` header: `[<app>/<version> ]mapir/<version> <os> (<arch>)`.
///
/// The operating system is identified by its name only (`linux`, `macos`, `windows`, ...), since
/// the standard library does not expose its version. The target architecture is reported instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgent {
    app: Option<(String, String)>,
}

impl UserAgent {
    /// Adds the identity of the host application.
    pub fn with_app(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app = Some((name.into(), version.into()));
        self
    }
}

impl Display for UserAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some((name, version)) = &self.app {
            write!(f, "{name}/{version} ")?;
        }

        write!(
            f,
            "mapir/{} {} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }
}

/// Fully constructed request, ready to be sent by an
/// [`HttpTransport`](crate::platform::HttpTransport).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Full url including the query string.
    pub url: Url,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Timeout of the whole request.
    pub timeout: Duration,
}

/// Builds [`ApiRequest`]s for a host.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    host: String,
    user_agent: UserAgent,
    timeout: Duration,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user_agent: UserAgent::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RequestBuilder {
    /// Sets the API host. Defaults to [`DEFAULT_HOST`].
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Sets request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host the requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds a request to the given path.
    ///
    /// Fails with [`MapirError::Configuration`] if no access token is given, and with
    /// [`MapirError::MalformedUrl`] if the host and path do not form a valid url.
    pub fn build(
        &self,
        access_token: Option<&AccessToken>,
        method: Method,
        path: &str,
        query: &QueryParams,
    ) -> Result<ApiRequest, MapirError> {
        let access_token = access_token
            .ok_or_else(|| MapirError::Configuration("no access token configured".into()))?;

        let url = self.url(path, query)?;
        let headers = self.headers(access_token)?;

        Ok(ApiRequest {
            method,
            url,
            headers,
            timeout: self.timeout,
        })
    }

    fn url(&self, path: &str, query: &QueryParams) -> Result<Url, MapirError> {
        let mut url = Url::parse(&format!("https://{}", self.host))
            .map_err(|err| MapirError::MalformedUrl(format!("invalid host {:?}: {err}", self.host)))?;

        if url.path() != "/" || url.query().is_some() {
            return Err(MapirError::MalformedUrl(format!(
                "host {:?} must not contain path or query",
                self.host
            )));
        }

        if path.contains(['?', '#']) {
            return Err(MapirError::MalformedUrl(format!(
                "path {path:?} must not contain query or fragment"
            )));
        }

        if path.starts_with('/') {
            url.set_path(path);
        } else {
            url.set_path(&format!("/{path}"));
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn headers(&self, access_token: &AccessToken) -> Result<HeaderMap, MapirError> {
        let mut api_key = HeaderValue::from_str(access_token.as_str()).map_err(|_| {
            MapirError::Configuration("access token contains invalid characters".into())
        })?;
        api_key.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&self.user_agent.to_string()).map_err(|_| {
            MapirError::Configuration("user agent contains invalid characters".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, user_agent);

        Ok(headers)
    }
}
