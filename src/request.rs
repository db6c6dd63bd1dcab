//! Poster request encoding
//!
//! Turns a valid [`SelectionState`] into a pre-filled GitHub "new issue" URL.
//! The issue body is a line-oriented `key: value` list read by the poster
//! automation; field names, their order and the `JOB: MAPTOPOSTER` marker
//! line are a fixed protocol.
//!
//! ```text
//! JOB: MAPTOPOSTER
//! city: Springfield
//! country: USA
//! theme: noir
//! distance: 5000
//! requested_at: 2026-10-18T09:15:02.123Z
//! user_agent: posterform/0.1.0 (linux; x86_64)
//! ```

use crate::selection::SelectionState;
use crate::Config;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Key of the marker line
pub const JOB_KEY: &str = "JOB";

/// Value of the marker line
pub const JOB_NAME: &str = "MAPTOPOSTER";

/// Field keys following the marker line, in protocol order
pub const FIELD_ORDER: [&str; 6] = [
    "city",
    "country",
    "theme",
    "distance",
    "requested_at",
    "user_agent",
];

/// Characters left unescaped by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query parameter value or path segment
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Identification string of this client, e.g. `posterform/0.1.0 (linux; x86_64)`
pub fn client_identification() -> String {
    format!(
        "{}/{} ({}; {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Errors from building or reading a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Submit attempted with an incomplete form
    #[error("Please fill in: {}", .0.join(", "))]
    ValidationFailure(Vec<&'static str>),

    /// An issue body that does not follow the request schema
    #[error("Not a poster request: {0}")]
    MalformedBody(String),
}

/// Values that are captured at encode time rather than taken from the form
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub requested_at: DateTime<Utc>,
    pub user_agent: String,
}

impl RequestContext {
    /// Capture the current instant and this client's identification
    pub fn now() -> Self {
        Self {
            requested_at: Utc::now(),
            user_agent: client_identification(),
        }
    }
}

/// Ordered `key: value` list forming the issue body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    fields: Vec<(String, String)>,
}

impl RequestBody {
    /// A body holding only the marker line
    pub fn new() -> Self {
        Self {
            fields: vec![(JOB_KEY.to_string(), JOB_NAME.to_string())],
        }
    }

    /// Append a field. Line breaks inside the value are collapsed to spaces.
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.push((key.to_string(), single_line(value)));
        self
    }

    /// Value of the first field named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field keys in order, marker included
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Render as newline-separated `key: value` lines
    pub fn render(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Read an issue body the way the poster automation does.
    ///
    /// The first non-blank line must be the `JOB: MAPTOPOSTER` marker. Every
    /// later line containing a colon becomes a field; other lines are
    /// ignored. Keys and values are trimmed.
    pub fn parse(text: &str) -> Result<Self, RequestError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        match lines.next().and_then(split_field) {
            Some((key, value)) if key == JOB_KEY && value == JOB_NAME => {}
            _ => {
                return Err(RequestError::MalformedBody(format!(
                    "missing '{JOB_KEY}: {JOB_NAME}' marker line"
                )));
            }
        }

        let mut body = Self::new();
        for (key, value) in lines.filter_map(split_field) {
            body.fields.push((key.to_string(), value.to_string()));
        }
        Ok(body)
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::new()
    }
}

fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Characters a line-splitting reader may treat as a break
fn is_line_break(c: char) -> bool {
    c.is_control() || c == '\u{2028}' || c == '\u{2029}'
}

fn single_line(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .chars()
        .map(|c| if is_line_break(c) { ' ' } else { c })
        .collect()
}

/// A fully encoded poster request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    pub title: String,
    pub body: RequestBody,
    /// Destination URL with title and body embedded
    pub url: String,
}

/// Builds issue requests for one target repository
#[derive(Debug, Clone)]
pub struct RequestEncoder {
    owner: String,
    repo: String,
    labels: Vec<String>,
}

impl RequestEncoder {
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            labels: Vec::new(),
        }
    }

    /// Labels to pre-apply through the `labels` query parameter
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Encoder for the configured repository and labels
    pub fn from_config(config: &Config) -> Result<Self> {
        let (owner, repo) = config.owner_and_repo()?;
        Ok(Self::new(owner, repo).with_labels(config.github.labels.clone()))
    }

    /// Encode with the current time and this client's identification
    pub fn encode(&self, state: &SelectionState) -> Result<IssueRequest, RequestError> {
        self.encode_with(state, &RequestContext::now())
    }

    /// Encode with explicit encode-time values.
    ///
    /// Fails closed with `ValidationFailure` when the form is incomplete.
    pub fn encode_with(
        &self,
        state: &SelectionState,
        context: &RequestContext,
    ) -> Result<IssueRequest, RequestError> {
        let theme = match state.selected_theme() {
            Some(theme) if state.is_valid() => theme,
            _ => return Err(RequestError::ValidationFailure(state.missing_fields())),
        };

        let title = single_line(&format!(
            "Map Request: {}, {} ({})",
            state.city(),
            state.country(),
            theme.display_name()
        ));

        let requested_at = context
            .requested_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let body = RequestBody::new()
            .field("city", state.city())
            .field("country", state.country())
            .field("theme", theme.id())
            .field("distance", state.distance())
            .field("requested_at", &requested_at)
            .field("user_agent", &context.user_agent);

        let url = self.issue_url(&title, &body.render());

        Ok(IssueRequest { title, body, url })
    }

    /// `https://github.com/<owner>/<repo>/issues/new?title=..&body=..`
    pub fn issue_url(&self, title: &str, body: &str) -> String {
        let mut url = format!(
            "https://github.com/{}/{}/issues/new?title={}&body={}",
            self.owner,
            self.repo,
            encode_component(title),
            encode_component(body)
        );
        if !self.labels.is_empty() {
            url.push_str("&labels=");
            url.push_str(&encode_component(&self.labels.join(",")));
        }
        url
    }
}
