//! Theme catalog for posterform
//!
//! Loads the static theme index (a JSON array of `{theme, name, description}`)
//! once at startup and resolves per-theme preview images.

use crate::debug;
use crate::request::encode_component;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// A poster theme as listed in the index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Short identifier, used in preview paths and in the encoded request
    #[serde(default)]
    pub theme: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

impl Theme {
    pub fn new(theme: &str, name: &str, description: Option<&str>) -> Self {
        Self {
            theme: theme.to_string(),
            name: Some(name.to_string()),
            description: description.map(str::to_string),
        }
    }

    /// Identifier of the theme
    pub fn id(&self) -> &str {
        &self.theme
    }

    /// Display name; an entry without one renders as empty
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Description; absent is treated as empty
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Errors surfaced by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The theme index failed to load or parse
    #[error("Theme catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

/// Availability of a theme's preview image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    /// The image exists at this location
    Available(String),
    /// The image is missing; show a placeholder instead
    ComingSoon,
}

/// HTTP response abstraction for testing
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP headers type
pub type Headers = Vec<(String, String)>;

/// Trait for HTTP operations (allows mocking)
#[cfg_attr(test, automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request.
    ///
    /// Non-success statuses are returned as responses, not errors;
    /// `Err` means the request never completed.
    fn get(&self, url: &str, headers: Headers) -> Result<HttpResponse>;

    /// Send a HEAD request; the body of the response is always empty.
    ///
    /// Bounded by the client's check timeout rather than the fetch timeout.
    fn head(&self, url: &str, headers: Headers) -> Result<HttpResponse>;
}

/// Upper bound for a preview existence check
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Real HTTP client using ureq
pub struct UreqHttpClient {
    agent: ureq::Agent,
    check_agent: ureq::Agent,
}

impl UreqHttpClient {
    /// Create a client, optionally bounding every request by `timeout`
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let check_timeout = timeout.map_or(CHECK_TIMEOUT, |t| t.min(CHECK_TIMEOUT));
        Self {
            agent: builder.build(),
            check_agent: ureq::AgentBuilder::new().timeout(check_timeout).build(),
        }
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new(None)
    }
}

fn send(mut request: ureq::Request, headers: &Headers) -> Result<ureq::Response> {
    for (key, value) in headers {
        request = request.set(key, value);
    }
    match request.call() {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(_, response)) => Ok(response),
        Err(e) => Err(e).context("HTTP request failed"),
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str, headers: Headers) -> Result<HttpResponse> {
        let response = send(self.agent.get(url), &headers)?;
        let status = response.status();
        let body = response.into_string().context("Failed to read response body")?;
        Ok(HttpResponse { status, body })
    }

    fn head(&self, url: &str, headers: Headers) -> Result<HttpResponse> {
        let response = send(self.check_agent.head(url), &headers)?;
        Ok(HttpResponse {
            status: response.status(),
            body: String::new(),
        })
    }
}

/// Where the theme index lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP(S)
    Remote(String),
    /// Read from the local filesystem
    Local(PathBuf),
}

impl CatalogSource {
    /// Interpret a configured location: `http(s)://` is remote,
    /// anything else (including `file://`) is a local path.
    pub fn parse(location: &str) -> Self {
        if is_remote(location) {
            CatalogSource::Remote(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            CatalogSource::Local(PathBuf::from(path))
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Remote(url) => write!(f, "{url}"),
            CatalogSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Parse the body of a theme index.
///
/// Entries are returned in document order; duplicate identifiers are kept.
pub fn parse_index(text: &str) -> Result<Vec<Theme>, CatalogError> {
    serde_json::from_str(text)
        .map_err(|e| CatalogError::CatalogUnavailable(format!("invalid theme index: {e}")))
}

/// Theme catalog client
pub struct ThemeCatalog<H: HttpClient = UreqHttpClient> {
    /// Location of the index
    source: CatalogSource,

    /// Base of the preview images, without trailing slash
    previews_base: String,

    /// Value of the User-Agent header
    user_agent: String,

    /// HTTP client
    http: H,
}

impl ThemeCatalog<UreqHttpClient> {
    /// Create a catalog backed by ureq
    pub fn new(source: CatalogSource, previews_base: &str, timeout: Option<Duration>) -> Self {
        Self::with_http_client(source, previews_base, UreqHttpClient::new(timeout))
    }

    /// Create a catalog from the configured index, previews and timeout
    pub fn from_config(config: &crate::Config) -> Result<Self> {
        let source = CatalogSource::parse(&config.index_location()?);
        let previews_base = config.previews_base()?;
        Ok(Self::new(source, &previews_base, config.fetch_timeout()))
    }
}

impl<H: HttpClient> ThemeCatalog<H> {
    /// Create catalog with custom HTTP client (for testing)
    pub fn with_http_client(source: CatalogSource, previews_base: &str, http: H) -> Self {
        Self {
            source,
            previews_base: previews_base.trim_end_matches('/').to_string(),
            user_agent: crate::request::client_identification(),
            http,
        }
    }

    /// Location of the index
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    fn build_headers(&self, accept: &str) -> Headers {
        vec![
            ("Accept".to_string(), accept.to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ]
    }

    /// Fetch and parse the theme index.
    ///
    /// Performs exactly one read of the source and never retries.
    pub fn load(&self) -> Result<Vec<Theme>, CatalogError> {
        debug::log_catalog(&self.source.to_string(), "load started");

        let result = match self.source {
            CatalogSource::Remote(ref url) => self.load_remote(url),
            CatalogSource::Local(ref path) => load_local(path),
        };

        match result {
            Ok(ref themes) => {
                debug::log_catalog(&self.source.to_string(), &format!("{} themes", themes.len()))
            }
            Err(ref e) => debug::log_catalog(&self.source.to_string(), &e.to_string()),
        }
        result
    }

    fn load_remote(&self, url: &str) -> Result<Vec<Theme>, CatalogError> {
        let headers = self.build_headers("application/json");
        let response = self
            .http
            .get(url, headers)
            .map_err(|e| CatalogError::CatalogUnavailable(format!("{e:#}")))?;

        if !(200..300).contains(&response.status) {
            return Err(CatalogError::CatalogUnavailable(format!(
                "HTTP {}",
                response.status
            )));
        }

        parse_index(&response.body)
    }

    /// Conventional location of a theme's preview image
    pub fn preview_url(&self, theme: &Theme) -> String {
        format!("{}/{}.png", self.previews_base, encode_component(theme.id()))
    }

    /// Check whether a theme's preview image exists.
    ///
    /// A missing image is an expected condition: every failure maps to
    /// `ComingSoon` and is only written to the debug log.
    pub fn check_preview(&self, theme: &Theme) -> PreviewStatus {
        let location = self.preview_url(theme);

        let available = if is_remote(&location) {
            match self.http.head(&location, self.build_headers("image/png")) {
                Ok(response) => (200..300).contains(&response.status),
                Err(e) => {
                    debug::log_catalog(&location, &format!("preview check failed: {e:#}"));
                    false
                }
            }
        } else {
            Path::new(location.strip_prefix("file://").unwrap_or(&location)).is_file()
        };

        if available {
            PreviewStatus::Available(location)
        } else {
            debug::log_catalog(&location, "preview missing");
            PreviewStatus::ComingSoon
        }
    }
}

fn load_local(path: &Path) -> Result<Vec<Theme>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| {
        CatalogError::CatalogUnavailable(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_index(&text)
}


#[cfg(test)]
mod mock_tests {
    use super::*;
    use proptest::prelude::*;

    const INDEX_URL: &str = "https://example.github.io/maptoposter/themes/index.json";
    const PREVIEWS: &str = "https://example.github.io/maptoposter/assets/theme-previews";

    fn catalog_with(mock: MockHttpClient) -> ThemeCatalog<MockHttpClient> {
        ThemeCatalog::with_http_client(
            CatalogSource::Remote(INDEX_URL.to_string()),
            PREVIEWS,
            mock,
        )
    }

    fn respond(status: u16, body: &str) -> MockHttpClient {
        let body = body.to_string();
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .times(1)
            .returning(move |_, _| Ok(HttpResponse { status, body: body.clone() }));
        mock
    }

    #[test]
    fn test_load_with_mock() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url: &str, headers: &Headers| {
                url == INDEX_URL
                    && headers
                        .iter()
                        .any(|(k, v)| k == "User-Agent" && v.starts_with("posterform/"))
            })
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse {
                    status: 200,
                    body: r#"[{"theme": "noir", "name": "Noir", "description": "Classic"}]"#
                        .to_string(),
                })
            });

        let themes = catalog_with(mock).load().unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].display_name(), "Noir");
    }

    #[test]
    fn test_load_404_is_unavailable() {
        let err = catalog_with(respond(404, "Not Found")).load().unwrap_err();
        assert_eq!(err, CatalogError::CatalogUnavailable("HTTP 404".to_string()));
    }

    #[test]
    fn test_load_server_error_is_unavailable() {
        let err = catalog_with(respond(503, "")).load().unwrap_err();
        assert_eq!(err, CatalogError::CatalogUnavailable("HTTP 503".to_string()));
    }

    #[test]
    fn test_load_invalid_json_is_unavailable() {
        let err = catalog_with(respond(200, "{broken")).load().unwrap_err();
        assert!(matches!(err, CatalogError::CatalogUnavailable(_)));
    }

    #[test]
    fn test_load_transport_error_is_unavailable() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));

        let err = catalog_with(mock).load().unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_preview_url() {
        let catalog = catalog_with(MockHttpClient::new());
        let theme = Theme::new("warm_beige", "Warm Beige", None);
        assert_eq!(
            catalog.preview_url(&theme),
            format!("{PREVIEWS}/warm_beige.png")
        );
    }

    #[test]
    fn test_check_preview_available() {
        let mut mock = MockHttpClient::new();
        mock.expect_head()
            .withf(|url: &str, _: &Headers| url.ends_with("/noir.png"))
            .returning(|_, _| Ok(HttpResponse { status: 200, body: String::new() }));

        let catalog = catalog_with(mock);
        let theme = Theme::new("noir", "Noir", None);
        assert_eq!(
            catalog.check_preview(&theme),
            PreviewStatus::Available(format!("{PREVIEWS}/noir.png"))
        );
    }

    #[test]
    fn test_check_preview_missing() {
        let mut mock = MockHttpClient::new();
        mock.expect_head()
            .times(1)
            .returning(|_, _| Ok(HttpResponse { status: 404, body: String::new() }));

        let catalog = catalog_with(mock);
        let theme = Theme::new("noir", "Noir", None);
        assert_eq!(catalog.check_preview(&theme), PreviewStatus::ComingSoon);
    }

    #[test]
    fn test_check_preview_network_failure() {
        let mut mock = MockHttpClient::new();
        mock.expect_head()
            .returning(|_, _| Err(anyhow::anyhow!("timed out")));

        let catalog = catalog_with(mock);
        let theme = Theme::new("noir", "Noir", None);
        assert_eq!(catalog.check_preview(&theme), PreviewStatus::ComingSoon);
    }

    #[test]
    fn test_check_preview_never_downloads() {
        // no get expectation: a GET would panic the mock
        let mut mock = MockHttpClient::new();
        mock.expect_head()
            .times(1)
            .returning(|_, _| Ok(HttpResponse { status: 200, body: String::new() }));

        let catalog = catalog_with(mock);
        let theme = Theme::new("noir", "Noir", None);
        assert!(matches!(catalog.check_preview(&theme), PreviewStatus::Available(_)));
    }

    proptest! {
        #[test]
        fn prop_load_returns_index_unmodified(
            entries in prop::collection::vec(("[a-z_]{1,12}", "[A-Za-z ]{0,16}"), 0..12)
        ) {
            let themes: Vec<Theme> = entries
                .iter()
                .map(|(id, name)| Theme::new(id, name, None))
                .collect();
            let body = serde_json::to_string(&themes).unwrap();

            let loaded = catalog_with(respond(200, &body)).load().unwrap();
            prop_assert_eq!(loaded, themes);
        }
    }
}
